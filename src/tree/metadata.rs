//! Metadata page and page allocation.
//!
//! Page 0 of every table file is the metadata page: the total-page counter
//! and the current root page number. [`Metadata`] owns the allocation
//! protocol: page numbers are handed out by incrementing the counter, and
//! every counter or root change is persisted synchronously before anything
//! else happens. A crash after an allocation but before the new node's
//! content is flushed leaves an orphaned page number, never a collision;
//! a lost root pointer would make the whole tree unreachable, so root
//! changes are never left to the deferred flush path.

use crate::common::{PageId, Result};
use crate::storage::{codec, Pager};

/// The singleton metadata record at page 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Metadata {
    /// Monotonically increasing page counter; also the number of the most
    /// recently allocated page. Page numbers are gap-free from 1.
    pub total_pages: u32,
    /// Page number of the current tree root. `PageId(0)` on a freshly
    /// bootstrapped file, before the first root leaf is allocated (page 0
    /// is the metadata page itself, never a node).
    pub root: PageId,
}

impl Metadata {
    /// Fresh metadata for a new table file.
    pub fn new() -> Self {
        Self {
            total_pages: 0,
            root: PageId::new(0),
        }
    }

    /// Whether a root node has been recorded yet.
    pub fn has_root(&self) -> bool {
        self.root != PageId::new(0)
    }

    /// Allocate the next page number.
    ///
    /// Increments the counter and synchronously persists the metadata page
    /// before returning, making the allocation durable even if the new
    /// page's own content never reaches disk.
    pub fn allocate_page(&mut self, pager: &mut Pager) -> Result<PageId> {
        self.total_pages += 1;
        self.persist(pager)?;
        Ok(PageId::new(self.total_pages))
    }

    /// Update the root pointer and synchronously persist it.
    pub fn set_root(&mut self, pager: &mut Pager, root: PageId) -> Result<()> {
        self.root = root;
        self.persist(pager)
    }

    /// Write the metadata page at offset 0 and fsync.
    pub fn persist(&self, pager: &mut Pager) -> Result<()> {
        let bytes = codec::encode_metadata(self, pager.page_size())?;
        pager.write_page(PageId::new(0), &bytes)?;
        pager.sync()
    }

    /// Load metadata from an existing table file.
    pub fn load(pager: &mut Pager) -> Result<Self> {
        let bytes = pager.read_page(PageId::new(0))?;
        codec::decode_metadata(&bytes)
    }
}

impl Default for Metadata {
    fn default() -> Self {
        Self::new()
    }
}
