//! Column descriptors, the schema, and typed values.
//!
//! The tree engine treats rows as opaque fixed-width field lists; this module
//! is the collaborator that defines those fields. Column order is significant:
//! it fixes the field layout inside every serialized record and must be
//! identical at every read and write.

use crate::common::{Error, Result};

/// Type tag of a column, with its fixed on-disk width.
///
/// Every type has a canonical width except [`ColumnType::FixedString`],
/// which carries an explicit declared byte width.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
    Bool,
    /// UTF-8 bytes, zero-padded or rejected at the declared width.
    FixedString(usize),
    /// Seconds since the Unix epoch, UTC, stored as an i64.
    TimestampSeconds,
}

impl ColumnType {
    /// On-disk width of a value of this type, in bytes.
    pub fn width(&self) -> usize {
        match self {
            ColumnType::Int8 | ColumnType::Bool => 1,
            ColumnType::Int16 => 2,
            ColumnType::Int32 | ColumnType::Float32 => 4,
            ColumnType::Int64 | ColumnType::Float64 | ColumnType::TimestampSeconds => 8,
            ColumnType::FixedString(n) => *n,
        }
    }

    /// Human-readable name, used in error messages.
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int8 => "Int8",
            ColumnType::Int16 => "Int16",
            ColumnType::Int32 => "Int32",
            ColumnType::Int64 => "Int64",
            ColumnType::Float32 => "Float32",
            ColumnType::Float64 => "Float64",
            ColumnType::Bool => "Bool",
            ColumnType::FixedString(_) => "FixedString",
            ColumnType::TimestampSeconds => "TimestampSeconds",
        }
    }
}

/// A typed field value stored in a row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(f32),
    Float64(f64),
    Bool(bool),
    Str(String),
    Timestamp(i64),
}

impl Value {
    /// Human-readable type name, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int8(_) => "Int8",
            Value::Int16(_) => "Int16",
            Value::Int32(_) => "Int32",
            Value::Int64(_) => "Int64",
            Value::Float32(_) => "Float32",
            Value::Float64(_) => "Float64",
            Value::Bool(_) => "Bool",
            Value::Str(_) => "FixedString",
            Value::Timestamp(_) => "TimestampSeconds",
        }
    }

    /// Whether this value matches a column's declared type tag.
    pub fn matches(&self, ty: ColumnType) -> bool {
        matches!(
            (self, ty),
            (Value::Int8(_), ColumnType::Int8)
                | (Value::Int16(_), ColumnType::Int16)
                | (Value::Int32(_), ColumnType::Int32)
                | (Value::Int64(_), ColumnType::Int64)
                | (Value::Float32(_), ColumnType::Float32)
                | (Value::Float64(_), ColumnType::Float64)
                | (Value::Bool(_), ColumnType::Bool)
                | (Value::Str(_), ColumnType::FixedString(_))
                | (Value::Timestamp(_), ColumnType::TimestampSeconds)
        )
    }
}

/// A named, typed, fixed-width column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    name: String,
    ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn ty(&self) -> ColumnType {
        self.ty
    }

    /// On-disk width of this column, in bytes.
    pub fn width(&self) -> usize {
        self.ty.width()
    }

    /// Validate a value against this column's type and width.
    ///
    /// # Errors
    /// - [`Error::TypeMismatch`] when the value's type tag differs.
    /// - [`Error::ValueTooWide`] when a string's UTF-8 byte length exceeds
    ///   the declared width.
    pub fn validate(&self, value: &Value) -> Result<()> {
        if !value.matches(self.ty) {
            return Err(Error::TypeMismatch {
                column: self.name.clone(),
                expected: self.ty.name(),
                actual: value.type_name(),
            });
        }
        if let (Value::Str(s), ColumnType::FixedString(width)) = (value, self.ty) {
            if s.len() > width {
                return Err(Error::ValueTooWide {
                    column: self.name.clone(),
                    width,
                });
            }
        }
        Ok(())
    }
}

/// An ordered sequence of columns.
///
/// The order fixes the field layout of every serialized record, so it must
/// not change once a table's backing file exists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    /// Build a schema from columns.
    ///
    /// # Errors
    /// Returns [`Error::EmptySchema`] when `columns` is empty.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        if columns.is_empty() {
            return Err(Error::EmptySchema);
        }
        Ok(Self { columns })
    }

    /// Iterate the columns in declared order.
    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter()
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Total serialized width of one record: the sum of all column widths.
    pub fn record_width(&self) -> usize {
        self.columns.iter().map(|c| c.width()).sum()
    }
}
