//! Pager - low-level file I/O for table pages.
//!
//! The [`Pager`] handles all direct file operations: reading and writing
//! fixed-size pages of the single backing file, and the cheap node-kind
//! probe used before a full decode.

use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::common::{Error, PageId, Result};

/// Offset of the 1-byte leaf flag inside node pages (after page number,
/// parent and key count, 4 bytes each).
const LEAF_FLAG_OFFSET: u64 = 12;

/// Manages disk I/O for a single table file.
///
/// # File Layout
/// The table is stored as one file of fixed-size pages laid out
/// sequentially; page N lives at byte offset `N * page_size`. Page 0 is
/// always the metadata page, node pages are numbered from 1 in allocation
/// order.
///
/// # Thread Safety
/// `Pager` is **single-threaded**. The tree engine serializes access under
/// its one coarse lock.
#[derive(Debug)]
pub struct Pager {
    file: File,
    path: PathBuf,
    page_size: usize,
}

impl Pager {
    /// Open the backing file at `path`, creating it if absent.
    ///
    /// Returns the pager and whether the file already existed (an existing
    /// file carries a metadata page to load; a fresh one must be
    /// bootstrapped by the caller).
    pub fn open_or_create<P: AsRef<Path>>(path: P, page_size: usize) -> Result<(Self, bool)> {
        let existed = path.as_ref().exists();
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&path)?;

        Ok((
            Self {
                file,
                path: path.as_ref().to_path_buf(),
                page_size,
            },
            existed,
        ))
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size of one page in bytes.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Read a full page from disk.
    ///
    /// # Errors
    /// Returns [`Error::TruncatedPage`] when the file ends before a full
    /// page could be read — a short read is fatal, never zero-filled.
    pub fn read_page(&mut self, page: PageId) -> Result<Vec<u8>> {
        self.file.seek(SeekFrom::Start(page.offset(self.page_size)))?;

        let mut buf = vec![0u8; self.page_size];
        self.file
            .read_exact(&mut buf)
            .map_err(|e| Self::map_short_read(e, page))?;
        Ok(buf)
    }

    /// Probe whether a node page holds a leaf by reading only the 1-byte
    /// flag at offset 12, avoiding a full decode to learn the node kind.
    pub fn read_leaf_flag(&mut self, page: PageId) -> Result<bool> {
        self.file
            .seek(SeekFrom::Start(page.offset(self.page_size) + LEAF_FLAG_OFFSET))?;

        let mut flag = [0u8; 1];
        self.file
            .read_exact(&mut flag)
            .map_err(|e| Self::map_short_read(e, page))?;
        Ok(flag[0] != 0)
    }

    /// Write one encoded page at its fixed offset.
    ///
    /// The buffer must be exactly one page; the codec guarantees this.
    /// Durability is the caller's policy: metadata writes are followed by
    /// [`Pager::sync`], batched node flushes sync once at the end.
    pub fn write_page(&mut self, page: PageId, data: &[u8]) -> Result<()> {
        debug_assert_eq!(data.len(), self.page_size);

        self.file.seek(SeekFrom::Start(page.offset(self.page_size)))?;
        self.file.write_all(data)?;
        Ok(())
    }

    /// fsync the backing file.
    pub fn sync(&mut self) -> Result<()> {
        self.file.sync_all()?;
        Ok(())
    }

    fn map_short_read(err: std::io::Error, page: PageId) -> Error {
        if err.kind() == ErrorKind::UnexpectedEof {
            Error::TruncatedPage(page.0)
        } else {
            Error::Io(err)
        }
    }
}
