//! Storage layer - disk I/O and page formats.
//!
//! This module handles persistent storage:
//! - [`Pager`] - Low-level file I/O against the single backing file
//! - [`codec`] - The fixed-width binary form of every page kind

pub mod codec;
mod pager;

pub use pager::Pager;
