//! Page codec - the fixed-width binary form of every page kind.
//!
//! Encoding is deterministic and always produces exactly one page;
//! decoding exactly inverts encoding for any value encoding accepted.
//! All integers are little-endian. "No page" sentinels ([`PageId::INVALID`])
//! encode as `0xFFFFFFFF`, i.e. a signed −1.
//!
//! # Layouts
//! ```text
//! Leaf page (header 17 bytes):
//!   page(4) · parent(4) · keyCount(4) · isLeaf=1(1) · next(4)
//!   · keys[keyCount](4 each) · records[keyCount](recordWidth each)
//!
//! Internal page (header 13 bytes):
//!   page(4) · parent(4) · keyCount(4) · isLeaf=0(1)
//!   · keys[keyCount](4 each) · children[keyCount+1](4 each)
//!
//! Metadata page (page 0):
//!   totalPages(4) · rootPage(4) · zero padding to page size
//! ```
//!
//! A record is its fields concatenated in schema column order, each field
//! padded or truncated to its column's declared width.

use crate::common::{Error, Key, PageId, Result};
use crate::schema::{Column, ColumnType, Row, Schema, Value};
use crate::tree::{InternalNode, LeafNode, Metadata, Node};

/// Byte size of the leaf page header.
pub const LEAF_HEADER_SIZE: usize = 17;

/// Byte size of the internal page header.
pub const INTERNAL_HEADER_SIZE: usize = 13;

/// Byte size of a serialized key.
const KEY_SIZE: usize = 4;

/// Byte size of a serialized child page number.
const CHILD_SIZE: usize = 4;

// ============================================================================
// CAPACITY DERIVATIONS
// ============================================================================

/// Largest key count a leaf page can hold.
///
/// Solves `header + k*(keySize + recordWidth) ≤ pageSize` with one record's
/// worth of slack reserved:
/// `k = (pageSize − header − recordWidth) / (keySize + recordWidth)`.
///
/// # Errors
/// [`Error::PageTooSmall`] when the row is too wide for even one key.
pub fn max_leaf_keys(page_size: usize, record_width: usize) -> Result<usize> {
    let available = (page_size)
        .checked_sub(LEAF_HEADER_SIZE + record_width)
        .unwrap_or(0);
    let max = available / (KEY_SIZE + record_width);
    if max == 0 {
        return Err(Error::PageTooSmall {
            page_size,
            kind: "leaf record",
        });
    }
    Ok(max)
}

/// Largest key count an internal page can hold.
///
/// Solves `header + k*keySize + (k+1)*childSize ≤ pageSize`:
/// `k = (pageSize − header − childSize) / (keySize + childSize)`.
///
/// # Errors
/// [`Error::PageTooSmall`] when not even one separator fits.
pub fn max_internal_keys(page_size: usize) -> Result<usize> {
    let available = page_size
        .checked_sub(INTERNAL_HEADER_SIZE + CHILD_SIZE)
        .unwrap_or(0);
    let max = available / (KEY_SIZE + CHILD_SIZE);
    if max == 0 {
        return Err(Error::PageTooSmall {
            page_size,
            kind: "internal",
        });
    }
    Ok(max)
}

// ============================================================================
// READ / WRITE CURSORS
// ============================================================================

/// Cursor over a page buffer. Every read is bounds-checked; running out of
/// bytes is a fatal [`Error::TruncatedPage`], never a silent zero-fill.
struct PageReader<'a> {
    data: &'a [u8],
    pos: usize,
    page: PageId,
}

impl<'a> PageReader<'a> {
    fn new(page: PageId, data: &'a [u8]) -> Self {
        Self { data, pos: 0, page }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if self.pos + n > self.data.len() {
            return Err(Error::TruncatedPage(self.page.0));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    fn u32(&mut self) -> Result<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i32(&mut self) -> Result<i32> {
        let b = self.take(4)?;
        Ok(i32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    fn i64(&mut self) -> Result<i64> {
        let b = self.take(8)?;
        Ok(i64::from_le_bytes([
            b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
        ]))
    }

    fn page_id(&mut self) -> Result<PageId> {
        Ok(PageId(self.u32()?))
    }
}

/// Growable page buffer that is finalized to exactly one page.
struct PageWriter {
    buf: Vec<u8>,
    page_size: usize,
    page: PageId,
}

impl PageWriter {
    fn new(page: PageId, page_size: usize) -> Self {
        Self {
            buf: Vec::with_capacity(page_size),
            page_size,
            page,
        }
    }

    fn u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn i32(&mut self, v: i32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn page_id(&mut self, pid: PageId) {
        self.u32(pid.0);
    }

    fn bytes(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
    }

    /// Zero-pad to the page size. Overflow indicates a capacity bug.
    fn finish(mut self) -> Result<Vec<u8>> {
        if self.buf.len() > self.page_size {
            return Err(Error::PageOverflow(self.page.0));
        }
        self.buf.resize(self.page_size, 0);
        Ok(self.buf)
    }
}

// ============================================================================
// FIELD VALUES
// ============================================================================

fn encode_value(w: &mut PageWriter, value: &Value, column: &Column) {
    let width = column.width();
    match value {
        Value::Int8(v) => w.bytes(&v.to_le_bytes()),
        Value::Int16(v) => w.bytes(&v.to_le_bytes()),
        Value::Int32(v) => w.bytes(&v.to_le_bytes()),
        Value::Int64(v) => w.bytes(&v.to_le_bytes()),
        Value::Float32(v) => w.bytes(&v.to_le_bytes()),
        Value::Float64(v) => w.bytes(&v.to_le_bytes()),
        Value::Bool(v) => w.u8(*v as u8),
        Value::Timestamp(v) => w.bytes(&v.to_le_bytes()),
        Value::Str(s) => {
            // UTF-8 bytes truncated to the declared width, zero-padded below.
            let raw = s.as_bytes();
            let n = raw.len().min(width);
            w.bytes(&raw[..n]);
            for _ in n..width {
                w.u8(0);
            }
        }
    }
}

fn decode_value(r: &mut PageReader<'_>, column: &Column) -> Result<Value> {
    let value = match column.ty() {
        ColumnType::Int8 => Value::Int8(r.take(1)?[0] as i8),
        ColumnType::Int16 => {
            let b = r.take(2)?;
            Value::Int16(i16::from_le_bytes([b[0], b[1]]))
        }
        ColumnType::Int32 => Value::Int32(r.i32()?),
        ColumnType::Int64 => Value::Int64(r.i64()?),
        ColumnType::Float32 => {
            let b = r.take(4)?;
            Value::Float32(f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
        }
        ColumnType::Float64 => {
            let b = r.take(8)?;
            Value::Float64(f64::from_le_bytes([
                b[0], b[1], b[2], b[3], b[4], b[5], b[6], b[7],
            ]))
        }
        ColumnType::Bool => Value::Bool(r.u8()? != 0),
        ColumnType::TimestampSeconds => Value::Timestamp(r.i64()?),
        ColumnType::FixedString(width) => {
            let raw = r.take(width)?;
            let text = String::from_utf8_lossy(raw);
            Value::Str(text.trim_end_matches('\0').to_string())
        }
    };
    Ok(value)
}

// ============================================================================
// NODE PAGES
// ============================================================================

/// Encode a leaf into exactly one page.
pub fn encode_leaf(leaf: &LeafNode, schema: &Schema, page_size: usize) -> Result<Vec<u8>> {
    let mut w = PageWriter::new(leaf.page, page_size);
    w.page_id(leaf.page);
    w.page_id(leaf.parent);
    w.u32(leaf.keys.len() as u32);
    w.u8(1);
    w.page_id(leaf.next);

    for &key in &leaf.keys {
        w.i32(key);
    }
    for record in &leaf.records {
        for column in schema.columns() {
            // Insert validation guarantees presence; an absent field here is
            // an engine bug, so it would surface as a page overflow or a
            // round-trip mismatch rather than silent corruption.
            if let Some(value) = record.get(column.name()) {
                encode_value(&mut w, value, column);
            } else {
                for _ in 0..column.width() {
                    w.u8(0);
                }
            }
        }
    }
    w.finish()
}

/// Decode a leaf page.
pub fn decode_leaf(page: PageId, data: &[u8], schema: &Schema) -> Result<LeafNode> {
    let mut r = PageReader::new(page, data);
    let page = r.page_id()?;
    let parent = r.page_id()?;
    let key_count = r.u32()? as usize;
    let _is_leaf = r.u8()?;
    let next = r.page_id()?;

    let mut keys: Vec<Key> = Vec::with_capacity(key_count);
    for _ in 0..key_count {
        keys.push(r.i32()?);
    }

    let mut records = Vec::with_capacity(key_count);
    for &key in &keys {
        let mut row = Row::new(key);
        for column in schema.columns() {
            let value = decode_value(&mut r, column)?;
            row.set(column.name(), value);
        }
        records.push(row);
    }

    Ok(LeafNode {
        page,
        parent,
        next,
        keys,
        records,
    })
}

/// Encode an internal node into exactly one page.
pub fn encode_internal(node: &InternalNode, page_size: usize) -> Result<Vec<u8>> {
    let mut w = PageWriter::new(node.page, page_size);
    w.page_id(node.page);
    w.page_id(node.parent);
    w.u32(node.keys.len() as u32);
    w.u8(0);

    for &key in &node.keys {
        w.i32(key);
    }
    for &child in &node.children {
        w.page_id(child);
    }
    w.finish()
}

/// Decode an internal page. Child count is always `keyCount + 1`.
pub fn decode_internal(page: PageId, data: &[u8]) -> Result<InternalNode> {
    let mut r = PageReader::new(page, data);
    let page = r.page_id()?;
    let parent = r.page_id()?;
    let key_count = r.u32()? as usize;
    let _is_leaf = r.u8()?;

    let mut keys: Vec<Key> = Vec::with_capacity(key_count);
    for _ in 0..key_count {
        keys.push(r.i32()?);
    }

    let mut children = Vec::with_capacity(key_count + 1);
    for _ in 0..key_count + 1 {
        children.push(r.page_id()?);
    }

    Ok(InternalNode {
        page,
        parent,
        keys,
        children,
    })
}

/// Encode either node kind.
pub fn encode_node(node: &Node, schema: &Schema, page_size: usize) -> Result<Vec<u8>> {
    match node {
        Node::Leaf(leaf) => encode_leaf(leaf, schema, page_size),
        Node::Internal(internal) => encode_internal(internal, page_size),
    }
}

// ============================================================================
// METADATA PAGE
// ============================================================================

/// Encode the metadata page (page 0).
pub fn encode_metadata(meta: &Metadata, page_size: usize) -> Result<Vec<u8>> {
    let mut w = PageWriter::new(PageId::new(0), page_size);
    w.u32(meta.total_pages);
    w.u32(meta.root.0);
    w.finish()
}

/// Decode the metadata page.
pub fn decode_metadata(data: &[u8]) -> Result<Metadata> {
    let mut r = PageReader::new(PageId::new(0), data);
    let total_pages = r.u32()?;
    let root = r.page_id()?;
    Ok(Metadata { total_pages, root })
}

// ============================================================================
// TESTS
// ============================================================================
