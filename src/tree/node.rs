//! In-memory node representations.
//!
//! A [`Node`] is a tagged variant over the two page kinds. Nodes hold
//! tree-local state only and answer capacity queries; all I/O and encoding
//! lives in [`crate::storage`]. Pages reference each other by [`PageId`],
//! never by owned edges — parent, child and sibling links are plain page
//! numbers resolved through the engine's `get_node`.

use crate::common::{Key, PageId};
use crate::schema::Row;

/// A leaf page in memory.
///
/// `keys` is ascending and duplicate-free; `records` is index-aligned with
/// `keys`. `next` chains leaves in ascending key order for range scans
/// ([`PageId::INVALID`] terminates the chain).
#[derive(Debug, Clone, PartialEq)]
pub struct LeafNode {
    pub page: PageId,
    pub parent: PageId,
    pub next: PageId,
    pub keys: Vec<Key>,
    pub records: Vec<Row>,
}

impl LeafNode {
    /// Create an empty leaf with no parent and no next sibling.
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            parent: PageId::INVALID,
            next: PageId::INVALID,
            keys: Vec::new(),
            records: Vec::new(),
        }
    }

    /// Whether one more key fits without splitting.
    pub fn has_space(&self, max_keys: usize) -> bool {
        self.keys.len() < max_keys
    }

    /// Position of `key`, if present.
    pub fn position_of(&self, key: Key) -> Option<usize> {
        self.keys.iter().position(|&k| k == key)
    }
}

/// An internal page in memory.
///
/// `children.len() == keys.len() + 1`; every key in the subtree under
/// `children[i]` is `< keys[i]`, and the last child is unbounded above.
#[derive(Debug, Clone, PartialEq)]
pub struct InternalNode {
    pub page: PageId,
    pub parent: PageId,
    pub keys: Vec<Key>,
    pub children: Vec<PageId>,
}

impl InternalNode {
    /// Create an empty internal node with no parent.
    pub fn new(page: PageId) -> Self {
        Self {
            page,
            parent: PageId::INVALID,
            keys: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Whether one more separator fits without splitting.
    pub fn has_space(&self, max_keys: usize) -> bool {
        self.keys.len() < max_keys
    }

    /// Child to descend into for `key`: the first child whose separator is
    /// an exclusive upper bound, or the last child when no separator is.
    /// `None` only for a childless node, which no well-formed page decodes
    /// to.
    pub fn route(&self, key: Key) -> Option<PageId> {
        for (i, &sep) in self.keys.iter().enumerate() {
            if key < sep {
                return Some(self.children[i]);
            }
        }
        self.children.last().copied()
    }
}

/// An in-memory node: one page's worth of tree state.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Internal(InternalNode),
    Leaf(LeafNode),
}

impl Node {
    /// Page number, the node's identity.
    pub fn page(&self) -> PageId {
        match self {
            Node::Internal(n) => n.page,
            Node::Leaf(n) => n.page,
        }
    }

    /// Parent page number ([`PageId::INVALID`] for the root).
    pub fn parent(&self) -> PageId {
        match self {
            Node::Internal(n) => n.parent,
            Node::Leaf(n) => n.parent,
        }
    }

    pub fn set_parent(&mut self, parent: PageId) {
        match self {
            Node::Internal(n) => n.parent = parent,
            Node::Leaf(n) => n.parent = parent,
        }
    }

    pub fn keys(&self) -> &[Key] {
        match self {
            Node::Internal(n) => &n.keys,
            Node::Leaf(n) => &n.keys,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }
}
