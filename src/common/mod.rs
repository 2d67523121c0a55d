//! Common types and utilities shared across SaplingDB.
//!
//! This module contains fundamental primitives used throughout the codebase:
//! - Configuration constants
//! - Error types
//! - The page identifier

pub mod config;
pub mod error;
mod page_id;

pub use error::{Error, Result};
pub use page_id::PageId;

/// Tree key type. Rows are keyed by a signed 32-bit id, stored as 4 bytes
/// in every node kind.
pub type Key = i32;
