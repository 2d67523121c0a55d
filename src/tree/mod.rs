//! The B+ tree: node variants, the metadata page, and the table engine.
//!
//! # Components
//! - [`Node`] / [`LeafNode`] / [`InternalNode`] - in-memory page state
//! - [`Metadata`] - page 0: total-page counter and root pointer
//! - [`Table`] - the engine: descent, insert/split/promote, update, flush

mod metadata;
mod node;
mod table;

pub use metadata::Metadata;
pub use node::{InternalNode, LeafNode, Node};
pub use table::{InsertOutcome, Table};
