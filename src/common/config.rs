//! Configuration constants for SaplingDB.

/// Default size of a page in bytes (4KB).
///
/// Page size is a construction-time parameter of [`crate::tree::Table`]
/// because it determines how many keys fit in each node kind; this default
/// matches the OS page size on most systems.
pub const DEFAULT_PAGE_SIZE: usize = 4096;

/// Number of dirty pages that triggers an automatic flush after an insert.
pub const FLUSH_THRESHOLD: usize = 5;
