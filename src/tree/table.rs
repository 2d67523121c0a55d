//! Table - the B+ tree engine.
//!
//! The [`Table`] is the sole entry point of the engine. It resolves page
//! numbers to nodes (consulting the in-memory dirty set before disk),
//! drives descent, orchestrates insertion with cascading splits and root
//! promotion, and owns the flush policy.
//!
//! # Thread Safety
//! One coarse `parking_lot::Mutex` guards all mutable state (backing file,
//! metadata, root pointer, dirty set). Every public operation holds it for
//! its full duration; there is no per-page or reader/writer distinction.
//!
//! # Durability
//! Writes are asymmetric on purpose:
//! - metadata changes (page allocation, root pointer) persist synchronously;
//! - `update` writes its single leaf synchronously;
//! - `insert` batches dirty pages and flushes once the dirty set reaches
//!   [`FLUSH_THRESHOLD`] pages.
//!
//! A crash between a root-promoting split and the next flush can lose
//! newly allocated non-root pages, but the root pointer never references a
//! page number that was never allocated.

use std::collections::HashMap;
use std::path::Path;

use parking_lot::Mutex;

use crate::common::config::FLUSH_THRESHOLD;
use crate::common::{Error, Key, PageId, Result};
use crate::schema::{Row, Schema, Value};
use crate::storage::{codec, Pager};
use crate::tree::{InternalNode, LeafNode, Metadata, Node};

/// Outcome of an insert. Duplicates are a reported outcome, not an error:
/// the tree is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    Inserted,
    Duplicate,
}

/// A single-table B+ tree storage engine over one backing file.
#[derive(Debug)]
pub struct Table {
    inner: Mutex<TableCore>,
}

impl Table {
    /// Open or create the table `<name>.bin` in the current directory.
    pub fn new(name: &str, schema: Schema, page_size: usize) -> Result<Self> {
        Self::open_in(".", name, schema, page_size)
    }

    /// Open or create the table `<dir>/<name>.bin`.
    ///
    /// A fresh file is bootstrapped with an empty metadata page (page 0)
    /// and an empty root leaf (page 1), both written through to disk. An
    /// existing file has its metadata and root loaded instead.
    ///
    /// # Errors
    /// - [`Error::EmptyTableName`] for an empty name.
    /// - [`Error::PageTooSmall`] when the page size cannot hold a single
    ///   record or child entry (schema emptiness is unrepresentable:
    ///   [`Schema::new`] already rejects it).
    /// - I/O and decode errors from an existing file.
    pub fn open_in<P: AsRef<Path>>(
        dir: P,
        name: &str,
        schema: Schema,
        page_size: usize,
    ) -> Result<Self> {
        if name.is_empty() {
            return Err(Error::EmptyTableName);
        }
        let max_leaf_keys = codec::max_leaf_keys(page_size, schema.record_width())?;
        let max_internal_keys = codec::max_internal_keys(page_size)?;

        let path = dir.as_ref().join(format!("{name}.bin"));
        let (mut pager, existed) = Pager::open_or_create(&path, page_size)?;

        let mut metadata = if existed {
            Metadata::load(&mut pager)?
        } else {
            let metadata = Metadata::new();
            metadata.persist(&mut pager)?;
            metadata
        };

        let root = if metadata.has_root() {
            metadata.root
        } else {
            // First root leaf is written through so a reopen before the
            // first insert still finds a decodable root page.
            let page = metadata.allocate_page(&mut pager)?;
            let leaf = LeafNode::new(page);
            pager.write_page(page, &codec::encode_leaf(&leaf, &schema, page_size)?)?;
            pager.sync()?;
            metadata.set_root(&mut pager, page)?;
            page
        };

        Ok(Self {
            inner: Mutex::new(TableCore {
                name: name.to_string(),
                schema,
                page_size,
                max_leaf_keys,
                max_internal_keys,
                pager,
                metadata,
                root,
                dirty: HashMap::new(),
            }),
        })
    }

    /// Insert a full row.
    ///
    /// Every schema column must be present and well-typed. Inserting an id
    /// that already exists mutates nothing and reports
    /// [`InsertOutcome::Duplicate`].
    pub fn insert(&self, row: Row) -> Result<InsertOutcome> {
        self.inner.lock().insert(row)
    }

    /// Point lookup by id. Read-only.
    pub fn search(&self, id: Key) -> Result<Option<Row>> {
        self.inner.lock().search(id)
    }

    /// Merge `updates` into the record with `id`, in place.
    ///
    /// Only the supplied fields are validated; absent columns keep their
    /// values. The touched leaf is written to disk immediately — update
    /// never defers persistence. Returns whether the id was found.
    pub fn update(&self, id: Key, updates: HashMap<String, Value>) -> Result<bool> {
        self.inner.lock().update(id, updates)
    }

    /// Report whether `id` exists.
    ///
    /// Deletion is an existence probe only: no key or record is removed
    /// and no rebalancing happens. Known gap, kept deliberately.
    pub fn delete(&self, id: Key) -> Result<bool> {
        self.inner.lock().delete(id)
    }

    /// Write every dirty page at its fixed offset and clear the dirty set.
    pub fn flush(&self) -> Result<()> {
        self.inner.lock().flush()
    }

    /// All rows in ascending key order, walking the leaf chain from the
    /// leftmost leaf. Flushes first so on-disk state matches the output.
    pub fn dump_rows(&self) -> Result<Vec<Row>> {
        self.inner.lock().dump_rows()
    }

    /// Level-order key layout: one entry per level, one key list per node.
    /// Flushes first so on-disk state matches the output.
    pub fn dump_levels(&self) -> Result<Vec<Vec<Vec<Key>>>> {
        self.inner.lock().dump_levels()
    }

    pub fn name(&self) -> String {
        self.inner.lock().name.clone()
    }

    pub fn page_size(&self) -> usize {
        self.inner.lock().page_size
    }

    /// Derived leaf capacity (keys per leaf page).
    pub fn max_leaf_keys(&self) -> usize {
        self.inner.lock().max_leaf_keys
    }

    /// Derived internal capacity (separators per internal page).
    pub fn max_internal_keys(&self) -> usize {
        self.inner.lock().max_internal_keys
    }
}

impl Drop for Table {
    /// Best-effort flush so buffered inserts are not silently lost when
    /// the engine releases the file handle.
    fn drop(&mut self) {
        let _ = self.inner.get_mut().flush();
    }
}

/// Engine state behind the coarse lock.
#[derive(Debug)]
struct TableCore {
    name: String,
    schema: Schema,
    page_size: usize,
    max_leaf_keys: usize,
    max_internal_keys: usize,
    pager: Pager,
    metadata: Metadata,
    /// Current root page number. Changes only through
    /// [`Metadata::set_root`], which persists synchronously.
    root: PageId,
    /// Nodes mutated in memory but not yet written back. Consulted before
    /// disk on every resolution so in-flight mutations are always visible.
    dirty: HashMap<PageId, Node>,
}

impl TableCore {
    // ========================================================================
    // Node resolution and descent
    // ========================================================================

    /// Resolve a page number to a node: dirty-set copy first, else probe
    /// the node-kind flag and decode the page from disk.
    fn get_node(&mut self, page: PageId) -> Result<Node> {
        if let Some(node) = self.dirty.get(&page) {
            return Ok(node.clone());
        }

        let is_leaf = self.pager.read_leaf_flag(page)?;
        let bytes = self.pager.read_page(page)?;
        if is_leaf {
            Ok(Node::Leaf(codec::decode_leaf(page, &bytes, &self.schema)?))
        } else {
            Ok(Node::Internal(codec::decode_internal(page, &bytes)?))
        }
    }

    fn mark_dirty(&mut self, node: Node) {
        self.dirty.insert(node.page(), node);
    }

    /// Descend from the root to the leaf owning `key` by upper-bound
    /// routing: each separator is an exclusive upper bound for everything
    /// below it except the rightmost subtree.
    fn find_leaf(&mut self, key: Key) -> Result<LeafNode> {
        let mut page = self.root;
        loop {
            match self.get_node(page)? {
                Node::Leaf(leaf) => return Ok(leaf),
                Node::Internal(node) => {
                    page = node
                        .route(key)
                        .ok_or(Error::CorruptTree("internal node has no children"))?;
                }
            }
        }
    }

    /// Leftmost leaf of the tree, the head of the leaf chain.
    fn leftmost_leaf(&mut self) -> Result<PageId> {
        let mut page = self.root;
        loop {
            match self.get_node(page)? {
                Node::Leaf(_) => return Ok(page),
                Node::Internal(node) => {
                    page = node
                        .children
                        .first()
                        .copied()
                        .ok_or(Error::CorruptTree("internal node has no children"))?;
                }
            }
        }
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check a row against the schema. `require_all` demands every declared
    /// column (insert); partial rows (update) validate only what they carry.
    fn validate_row(&self, row: &Row, require_all: bool) -> Result<()> {
        for name in row.field_names() {
            if self.schema.column(name).is_none() {
                return Err(Error::UnknownColumn(name.to_string()));
            }
        }
        for column in self.schema.columns() {
            match row.get(column.name()) {
                Some(value) => column.validate(value)?,
                None if require_all => {
                    return Err(Error::MissingColumn(column.name().to_string()))
                }
                None => {}
            }
        }
        Ok(())
    }

    // ========================================================================
    // Insert and splits
    // ========================================================================

    fn insert(&mut self, row: Row) -> Result<InsertOutcome> {
        self.validate_row(&row, true)?;

        let key = row.id();
        let mut leaf = self.find_leaf(key)?;
        if leaf.position_of(key).is_some() {
            return Ok(InsertOutcome::Duplicate);
        }

        if leaf.has_space(self.max_leaf_keys) {
            Self::insert_into_leaf(&mut leaf, key, row);
            self.mark_dirty(Node::Leaf(leaf));
        } else {
            self.split_leaf_and_insert(leaf, key, row)?;
        }

        if self.dirty.len() >= FLUSH_THRESHOLD {
            self.flush()?;
        }
        Ok(InsertOutcome::Inserted)
    }

    /// Insert `(key, row)` at its ascending position. Records stay
    /// index-aligned with keys.
    fn insert_into_leaf(leaf: &mut LeafNode, key: Key, row: Row) {
        let pos = leaf
            .keys
            .iter()
            .position(|&k| k > key)
            .unwrap_or(leaf.keys.len());
        leaf.keys.insert(pos, key);
        leaf.records.insert(pos, row);
    }

    /// Insert a separator and its right-child pointer into an internal
    /// node. The child lands immediately after its separator's position,
    /// or at the end if the separator sorts last.
    fn insert_into_internal(node: &mut InternalNode, key: Key, child: PageId) {
        let pos = node
            .keys
            .iter()
            .position(|&k| k > key)
            .unwrap_or(node.keys.len());
        node.keys.insert(pos, key);
        if pos + 1 >= node.children.len() {
            node.children.push(child);
        } else {
            node.children.insert(pos + 1, child);
        }
    }

    /// Split a full leaf while inserting `(key, row)`.
    ///
    /// The leaf goes transiently over-full, then splits at
    /// `mid = (maxLeafKeys + 1) / 2`. The right leaf inherits the left's
    /// old forward pointer, keeping the leaf chain ordered; its first
    /// remaining key becomes the promoted separator.
    fn split_leaf_and_insert(&mut self, mut leaf: LeafNode, key: Key, row: Row) -> Result<()> {
        Self::insert_into_leaf(&mut leaf, key, row);

        let mid = (self.max_leaf_keys + 1) / 2;
        let right_page = self.metadata.allocate_page(&mut self.pager)?;

        let mut right = LeafNode::new(right_page);
        right.keys = leaf.keys.split_off(mid);
        right.records = leaf.records.split_off(mid);
        right.next = leaf.next;
        leaf.next = right_page;
        // Provisional; corrected if the parent itself splits.
        right.parent = leaf.parent;

        let left_page = leaf.page;
        let separator = right.keys[0];
        self.mark_dirty(Node::Leaf(leaf));
        self.mark_dirty(Node::Leaf(right));

        self.promote(left_page, right_page, separator)
    }

    /// Split a full internal node while inserting `(key, child)`.
    ///
    /// After the transient over-fill, `mid = (maxInternalKeys + 1) / 2`:
    /// the key at `mid` is promoted to the grandparent and retained by
    /// neither half. Children moved to the right half get their parent
    /// pointers rewritten and are marked dirty.
    fn split_internal_and_insert(
        &mut self,
        mut node: InternalNode,
        key: Key,
        child: PageId,
    ) -> Result<()> {
        Self::insert_into_internal(&mut node, key, child);

        let mid = (self.max_internal_keys + 1) / 2;
        let mid_key = node.keys[mid];
        let right_page = self.metadata.allocate_page(&mut self.pager)?;

        let mut right = InternalNode::new(right_page);
        right.keys = node.keys.split_off(mid + 1);
        right.children = node.children.split_off(mid + 1);
        // Drop the promoted separator from the left half.
        node.keys.truncate(mid);
        right.parent = node.parent;

        let left_page = node.page;
        let right_children = right.children.clone();
        self.mark_dirty(Node::Internal(node));
        self.mark_dirty(Node::Internal(right));

        for child in right_children {
            self.reparent(child, right_page)?;
        }

        self.promote(left_page, right_page, mid_key)
    }

    /// Promote a separator after a split.
    ///
    /// If the left node was the root, a new single-key internal root is
    /// allocated over both halves (root promotion: tree height grows by
    /// one) and the metadata root pointer is persisted immediately.
    /// Otherwise the separator is inserted into the parent, recursively
    /// splitting it when full.
    fn promote(&mut self, left: PageId, right: PageId, key: Key) -> Result<()> {
        if left == self.root {
            let root_page = self.metadata.allocate_page(&mut self.pager)?;
            let mut new_root = InternalNode::new(root_page);
            new_root.keys.push(key);
            new_root.children = vec![left, right];

            self.reparent(left, root_page)?;
            self.reparent(right, root_page)?;
            self.mark_dirty(Node::Internal(new_root));

            self.metadata.set_root(&mut self.pager, root_page)?;
            self.root = root_page;
            return Ok(());
        }

        let parent_page = self.get_node(left)?.parent();
        match self.get_node(parent_page)? {
            Node::Internal(mut parent) => {
                if parent.has_space(self.max_internal_keys) {
                    Self::insert_into_internal(&mut parent, key, right);
                    self.mark_dirty(Node::Internal(parent));
                    Ok(())
                } else {
                    self.split_internal_and_insert(parent, key, right)
                }
            }
            Node::Leaf(_) => Err(Error::CorruptTree("parent of a split node is a leaf")),
        }
    }

    /// Rewrite a node's parent pointer and mark it dirty.
    fn reparent(&mut self, page: PageId, parent: PageId) -> Result<()> {
        let mut node = self.get_node(page)?;
        node.set_parent(parent);
        self.mark_dirty(node);
        Ok(())
    }

    // ========================================================================
    // Search, update, delete
    // ========================================================================

    fn search(&mut self, id: Key) -> Result<Option<Row>> {
        let leaf = self.find_leaf(id)?;
        Ok(leaf.position_of(id).map(|pos| leaf.records[pos].clone()))
    }

    fn update(&mut self, id: Key, updates: HashMap<String, Value>) -> Result<bool> {
        for (name, value) in &updates {
            let column = self
                .schema
                .column(name)
                .ok_or_else(|| Error::UnknownColumn(name.clone()))?;
            column.validate(value)?;
        }

        let mut leaf = self.find_leaf(id)?;
        let Some(pos) = leaf.position_of(id) else {
            return Ok(false);
        };

        leaf.records[pos].merge(&updates);

        // Update bypasses the dirty-set batching: the single touched leaf
        // is durable before the call returns. The dirty-set copy stays the
        // authoritative in-memory version; a later flush rewrites the same
        // bytes, which is redundant but harmless.
        let bytes = codec::encode_leaf(&leaf, &self.schema, self.page_size)?;
        self.pager.write_page(leaf.page, &bytes)?;
        self.pager.sync()?;
        self.mark_dirty(Node::Leaf(leaf));
        Ok(true)
    }

    fn delete(&mut self, id: Key) -> Result<bool> {
        // Existence probe only. Keys, records and tree shape are untouched;
        // there is no merging or redistribution on deletion.
        let leaf = self.find_leaf(id)?;
        Ok(leaf.position_of(id).is_some())
    }

    // ========================================================================
    // Flush and diagnostics
    // ========================================================================

    /// Write every dirty page at `page * pageSize`, fsync once, clear the
    /// set. Iteration order does not matter: each write targets a
    /// disjoint fixed offset.
    fn flush(&mut self) -> Result<()> {
        if self.dirty.is_empty() {
            return Ok(());
        }
        for (page, node) in &self.dirty {
            let bytes = codec::encode_node(node, &self.schema, self.page_size)?;
            self.pager.write_page(*page, &bytes)?;
        }
        self.pager.sync()?;
        self.dirty.clear();
        Ok(())
    }

    fn dump_rows(&mut self) -> Result<Vec<Row>> {
        self.flush()?;

        let mut rows = Vec::new();
        let mut page = self.leftmost_leaf()?;
        loop {
            match self.get_node(page)? {
                Node::Leaf(leaf) => {
                    rows.extend(leaf.records.iter().cloned());
                    if !leaf.next.is_valid() {
                        break;
                    }
                    page = leaf.next;
                }
                Node::Internal(_) => {
                    return Err(Error::CorruptTree("leaf chain visited an internal node"))
                }
            }
        }
        Ok(rows)
    }

    fn dump_levels(&mut self) -> Result<Vec<Vec<Vec<Key>>>> {
        self.flush()?;

        let mut levels = Vec::new();
        let mut current = vec![self.root];
        while !current.is_empty() {
            let mut level = Vec::with_capacity(current.len());
            let mut next_level = Vec::new();
            for page in current {
                match self.get_node(page)? {
                    Node::Leaf(leaf) => level.push(leaf.keys.clone()),
                    Node::Internal(node) => {
                        level.push(node.keys.clone());
                        next_level.extend(node.children.iter().copied());
                    }
                }
            }
            levels.push(level);
            current = next_level;
        }
        Ok(levels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{Column, ColumnType};
    use tempfile::tempdir;

    /// Page size 64, single Int32 column: max leaf keys = 5, max internal
    /// keys = 5. Small enough to force splits within a handful of inserts.
    fn tiny_table(dir: &Path) -> Table {
        let schema = Schema::new(vec![Column::new("id", ColumnType::Int32)]).unwrap();
        Table::open_in(dir, "tiny", schema, 64).unwrap()
    }

    fn id_row(id: Key) -> Row {
        let mut row = Row::new(id);
        row.set("id", Value::Int32(id));
        row
    }

    #[test]
    fn test_derived_capacities() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());
        assert_eq!(table.max_leaf_keys(), 5);
        assert_eq!(table.max_internal_keys(), 5);
    }

    #[test]
    fn test_empty_name_rejected() {
        let dir = tempdir().unwrap();
        let schema = Schema::new(vec![Column::new("id", ColumnType::Int32)]).unwrap();
        let err = Table::open_in(dir.path(), "", schema, 64).unwrap_err();
        assert!(matches!(err, Error::EmptyTableName));
    }

    #[test]
    fn test_row_too_wide_rejected() {
        let dir = tempdir().unwrap();
        let schema = Schema::new(vec![Column::new("blob", ColumnType::FixedString(60))]).unwrap();
        let err = Table::open_in(dir.path(), "wide", schema, 64).unwrap_err();
        assert!(matches!(err, Error::PageTooSmall { .. }));
    }

    #[test]
    fn test_insert_and_search() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        for id in [3, 1, 2] {
            assert_eq!(table.insert(id_row(id)).unwrap(), InsertOutcome::Inserted);
        }
        for id in 1..=3 {
            let row = table.search(id).unwrap().unwrap();
            assert_eq!(row.id(), id);
            assert_eq!(row.get("id"), Some(&Value::Int32(id)));
        }
        assert_eq!(table.search(4).unwrap(), None);
    }

    #[test]
    fn test_duplicate_insert_is_reported_not_applied() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        assert_eq!(table.insert(id_row(1)).unwrap(), InsertOutcome::Inserted);
        assert_eq!(table.insert(id_row(1)).unwrap(), InsertOutcome::Duplicate);

        let levels = table.dump_levels().unwrap();
        assert_eq!(levels, vec![vec![vec![1]]]);
    }

    #[test]
    fn test_insert_validation() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        // Unknown column.
        let mut row = Row::new(1);
        row.set("id", Value::Int32(1)).set("ghost", Value::Bool(true));
        assert!(matches!(
            table.insert(row).unwrap_err(),
            Error::UnknownColumn(_)
        ));

        // Missing required column.
        let row = Row::new(1);
        assert!(matches!(
            table.insert(row).unwrap_err(),
            Error::MissingColumn(_)
        ));

        // Type mismatch.
        let mut row = Row::new(1);
        row.set("id", Value::Bool(false));
        assert!(matches!(
            table.insert(row).unwrap_err(),
            Error::TypeMismatch { .. }
        ));

        // Nothing was inserted by the failed attempts.
        assert_eq!(table.search(1).unwrap(), None);
    }

    #[test]
    fn test_first_split_promotes_new_root() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        // Max leaf keys is 5; the sixth insert forces exactly one split.
        for id in 1..=6 {
            table.insert(id_row(id)).unwrap();
        }

        let levels = table.dump_levels().unwrap();
        assert_eq!(levels.len(), 2);
        // mid = (5 + 1) / 2 = 3: left keeps [1,2,3], right takes [4,5,6],
        // and the new root's key is the right leaf's smallest id.
        assert_eq!(levels[0], vec![vec![4]]);
        assert_eq!(levels[1], vec![vec![1, 2, 3], vec![4, 5, 6]]);

        for id in 1..=6 {
            assert_eq!(table.search(id).unwrap().unwrap().id(), id);
        }
        assert_eq!(table.search(7).unwrap(), None);
    }

    #[test]
    fn test_keys_ascending_in_every_node() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        // Shuffled inserts; 0..50 covers multiple levels of splits.
        for id in (0..50).rev() {
            table.insert(id_row(id)).unwrap();
        }
        for id in 50..100 {
            table.insert(id_row(id)).unwrap();
        }

        for level in table.dump_levels().unwrap() {
            for keys in level {
                for pair in keys.windows(2) {
                    assert!(pair[0] < pair[1], "keys not strictly ascending: {keys:?}");
                }
            }
        }
    }

    #[test]
    fn test_leaf_chain_visits_all_rows_in_order() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        let mut ids: Vec<Key> = (0..60).collect();
        // Deterministic shuffle.
        ids.sort_by_key(|id| (id * 37) % 60);
        for &id in &ids {
            table.insert(id_row(id)).unwrap();
        }

        let rows = table.dump_rows().unwrap();
        let got: Vec<Key> = rows.iter().map(|r| r.id()).collect();
        let expected: Vec<Key> = (0..60).collect();
        assert_eq!(got, expected);
    }

    #[test]
    fn test_update_is_partial_and_immediately_visible() {
        let dir = tempdir().unwrap();
        let schema = Schema::new(vec![
            Column::new("id", ColumnType::Int32),
            Column::new("name", ColumnType::FixedString(8)),
        ])
        .unwrap();
        let table = Table::open_in(dir.path(), "users", schema, 128).unwrap();

        let mut row = Row::new(1);
        row.set("id", Value::Int32(1))
            .set("name", Value::Str("ada".into()));
        table.insert(row).unwrap();

        let mut updates = HashMap::new();
        updates.insert("name".to_string(), Value::Str("grace".into()));
        assert!(table.update(1, updates).unwrap());

        // Visible through search with no explicit flush; untouched fields
        // keep their prior values.
        let row = table.search(1).unwrap().unwrap();
        assert_eq!(row.get("name"), Some(&Value::Str("grace".into())));
        assert_eq!(row.get("id"), Some(&Value::Int32(1)));

        assert!(!table.update(42, HashMap::new()).unwrap());
    }

    #[test]
    fn test_update_validates_supplied_fields_only() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());
        table.insert(id_row(1)).unwrap();

        let mut updates = HashMap::new();
        updates.insert("ghost".to_string(), Value::Int32(0));
        assert!(matches!(
            table.update(1, updates).unwrap_err(),
            Error::UnknownColumn(_)
        ));

        let mut updates = HashMap::new();
        updates.insert("id".to_string(), Value::Bool(true));
        assert!(matches!(
            table.update(1, updates).unwrap_err(),
            Error::TypeMismatch { .. }
        ));
    }

    #[test]
    fn test_delete_probes_without_removing() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        table.insert(id_row(1)).unwrap();
        assert!(table.delete(1).unwrap());
        assert!(!table.delete(2).unwrap());

        // The record is still there.
        assert_eq!(table.search(1).unwrap().unwrap().id(), 1);
    }

    #[test]
    fn test_deep_tree_stays_searchable() {
        let dir = tempdir().unwrap();
        let table = tiny_table(dir.path());

        // Enough keys to split internal nodes too (max 5 separators).
        for id in 0..500 {
            table.insert(id_row(id)).unwrap();
        }

        let levels = table.dump_levels().unwrap();
        assert!(levels.len() >= 3, "expected height ≥ 3, got {}", levels.len());

        for id in 0..500 {
            assert_eq!(table.search(id).unwrap().unwrap().id(), id);
        }
        assert_eq!(table.search(500).unwrap(), None);
        assert_eq!(table.search(-1).unwrap(), None);
    }
}
