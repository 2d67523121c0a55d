//! Schema and record model.
//!
//! The tree engine consumes these as an opaque collaborator: an ordered list
//! of typed, fixed-width columns ([`Schema`]) and a simple key-value record
//! ([`Row`]). Serialization of rows into pages lives in
//! [`crate::storage::codec`], not here.

mod column;
mod row;

pub use column::{Column, ColumnType, Schema, Value};
pub use row::Row;
