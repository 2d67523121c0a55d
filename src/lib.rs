//! SaplingDB - a single-table disk-resident B+ tree storage engine.
//!
//! Fixed-schema rows keyed by an integer id are persisted into fixed-size
//! pages of one backing file. The engine supports point lookup, ordered
//! insertion with node splitting and root promotion, in-place field update,
//! and an existence-probe delete.
//!
//! # Architecture
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                        SaplingDB                          │
//! ├───────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │            Tree Engine (tree/)                      │  │
//! │  │  Table: descent · insert/split/promote · update     │  │
//! │  │  Metadata: page allocation + root pointer (page 0)  │  │
//! │  │  Dirty set: in-memory nodes awaiting flush          │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                            ↓                              │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │            Storage Layer (storage/)                 │  │
//! │  │  Pager: fixed-offset page I/O on one file           │  │
//! │  │  codec: leaf / internal / metadata page layouts     │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! │                                                           │
//! │  ┌─────────────────────────────────────────────────────┐  │
//! │  │        Schema & Record model (schema/)              │  │
//! │  │  Columns: typed, fixed-width, order-significant     │  │
//! │  │  Row: id + name → typed value                       │  │
//! │  └─────────────────────────────────────────────────────┘  │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (PageId, Key, Error, config)
//! - [`schema`] - Column descriptors and row records
//! - [`storage`] - Page I/O and the on-disk page codec
//! - [`tree`] - Node variants, metadata/allocation, and the table engine
//!
//! # Quick Start
//! ```no_run
//! use saplingdb::{Column, ColumnType, Row, Schema, Table, Value};
//!
//! let schema = Schema::new(vec![
//!     Column::new("id", ColumnType::Int32),
//!     Column::new("name", ColumnType::FixedString(32)),
//! ])?;
//! let table = Table::new("users", schema, 4096)?;
//!
//! let mut row = Row::new(1);
//! row.set("id", Value::Int32(1))
//!     .set("name", Value::Str("ada".into()));
//! table.insert(row)?;
//!
//! assert!(table.search(1)?.is_some());
//! # Ok::<(), saplingdb::Error>(())
//! ```

pub mod common;
pub mod schema;
pub mod storage;
pub mod tree;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_PAGE_SIZE, FLUSH_THRESHOLD};
pub use common::{Error, Key, PageId, Result};

pub use schema::{Column, ColumnType, Row, Schema, Value};
pub use storage::Pager;
pub use tree::{InsertOutcome, Node, Table};
