//! Error types for SaplingDB.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in SaplingDB.
///
/// Every fatal condition in the engine maps to one variant here, so error
/// handling stays consistent across modules. Recoverable conditions
/// (duplicate key on insert, missing key on search/update/delete) are *not*
/// errors: they are reported as distinct result values by the tree engine.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error from disk operations.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A table needs at least one column.
    #[error("schema must declare at least one column")]
    EmptySchema,

    /// A table needs a name to derive its backing file from.
    #[error("table name is required")]
    EmptyTableName,

    /// The page size is too small to hold even one record or child entry.
    #[error("page size {page_size} cannot hold a single {kind} entry; reduce the row width or increase the page size")]
    PageTooSmall { page_size: usize, kind: &'static str },

    /// A record referenced a column the schema does not declare.
    #[error("unknown column: {0}")]
    UnknownColumn(String),

    /// A full-row insert left out a declared column.
    #[error("column {0} is required")]
    MissingColumn(String),

    /// A value's type does not match its column's declared type.
    #[error("column {column} expects {expected}, got {actual}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: &'static str,
    },

    /// A string value is wider than the column's declared byte width.
    #[error("column {column} value exceeds declared width of {width} bytes")]
    ValueTooWide { column: String, width: usize },

    /// A page read produced fewer bytes than its decoder needed.
    #[error("page {0} is truncated")]
    TruncatedPage(u32),

    /// An encoded node did not fit in one page. Indicates a capacity bug,
    /// never a caller-input problem.
    #[error("page {0} overflowed its fixed size during encode")]
    PageOverflow(u32),

    /// A tree-structure invariant did not hold, e.g. descent reached an
    /// internal node where a leaf was expected. Indicates a codec or
    /// routing bug, never a caller-input problem.
    #[error("tree structure invariant violated: {0}")]
    CorruptTree(&'static str),
}
