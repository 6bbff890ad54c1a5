//! Fixed-modification-time decorator.
//!
//! [`ModTimeFs`] wraps any filesystem source and reports one fixed
//! timestamp as the modification time of every file and directory, leaving
//! everything else - content, names, sizes, modes, hierarchy, errors -
//! exactly as the inner source produced it. Content bundled into a binary
//! has no meaningful timestamp of its own; pinning one lets it participate
//! in `Last-Modified` / `If-Modified-Since` HTTP caching.
//!
//! The substitution is transitive. Opening a path yields a handle whose
//! metadata reports the fixed time; listing a directory yields entries
//! that materialize to metadata with the fixed time; a directory handle's
//! own listing is wrapped the same way.
//!
//! `ModTimeFs<F>` implements exactly the capability traits `F` implements:
//! it has `StatFs` when `F: StatFs` and `ReadDirFs` when `F: ReadDirFs`,
//! and never emulates a capability the inner source lacks.
//!
//! # Example
//!
//! ```rust
//! use std::time::{Duration, UNIX_EPOCH};
//! use shimfs_memfs::MemFs;
//! use shimfs_modtime::with_mod_time;
//! use shimfs_vfs::{Metadata, StatFs};
//!
//! let assets = MemFs::builder().file("app.css", "body {}").build().unwrap();
//! let built_at = UNIX_EPOCH + Duration::from_secs(1_727_600_261);
//!
//! let fs = with_mod_time(assets, built_at);
//! assert_eq!(fs.stat("app.css").unwrap().modified(), built_at);
//! ```

use std::io::{self, Read, Seek, SeekFrom};
use std::time::SystemTime;

use shimfs_vfs::{DirEntry, File, FileType, Fs, FsError, Metadata, ReadDirFs, StatFs};

/// Decorate `inner` so every metadata record reports `mtime`.
pub fn with_mod_time<F>(inner: F, mtime: SystemTime) -> ModTimeFs<F> {
    ModTimeFs::new(inner, mtime)
}

/// A filesystem source whose entries all report one fixed modification
/// time.
///
/// Everything except the modification time delegates to the inner source
/// verbatim; errors pass through unchanged in kind and payload. The inner
/// source's real timestamps are never read.
pub struct ModTimeFs<F> {
    inner: F,
    mtime: SystemTime,
}

impl<F> ModTimeFs<F> {
    /// Create a decorator reporting `mtime` for every entry of `inner`.
    pub fn new(inner: F, mtime: SystemTime) -> Self {
        Self { inner, mtime }
    }

    /// Get a reference to the inner source.
    pub fn inner(&self) -> &F {
        &self.inner
    }

    /// Unwrap back into the inner source.
    pub fn into_inner(self) -> F {
        self.inner
    }

    /// The fixed modification time.
    pub fn mod_time(&self) -> SystemTime {
        self.mtime
    }
}

impl<F: Fs> Fs for ModTimeFs<F> {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        let inner = self.inner.open(path)?;
        Ok(Box::new(ModTimeFile {
            inner,
            mtime: self.mtime,
        }))
    }
}

impl<F: StatFs> StatFs for ModTimeFs<F> {
    fn stat(&self, path: &str) -> Result<Box<dyn Metadata>, FsError> {
        let inner = self.inner.stat(path)?;
        Ok(Box::new(ModTimeMeta {
            inner,
            mtime: self.mtime,
        }))
    }
}

impl<F: ReadDirFs> ReadDirFs for ModTimeFs<F> {
    fn read_dir(&self, path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        let entries = self.inner.read_dir(path)?;
        Ok(wrap_entries(entries, self.mtime))
    }
}

fn wrap_entries(entries: Vec<Box<dyn DirEntry>>, mtime: SystemTime) -> Vec<Box<dyn DirEntry>> {
    entries
        .into_iter()
        .map(|inner| Box::new(ModTimeEntry { inner, mtime }) as Box<dyn DirEntry>)
        .collect()
}

/// Handle wrapper: owns the inner handle, substitutes the time in its
/// metadata. Dropping it drops the inner handle.
struct ModTimeFile {
    inner: Box<dyn File>,
    mtime: SystemTime,
}

impl Read for ModTimeFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for ModTimeFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl File for ModTimeFile {
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        let inner = self.inner.metadata()?;
        Ok(Box::new(ModTimeMeta {
            inner,
            mtime: self.mtime,
        }))
    }

    fn read_dir(&mut self, n: Option<usize>) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        let entries = self.inner.read_dir(n)?;
        Ok(wrap_entries(entries, self.mtime))
    }
}

/// Listing-entry wrapper: substitutes the time at materialization.
struct ModTimeEntry {
    inner: Box<dyn DirEntry>,
    mtime: SystemTime,
}

impl DirEntry for ModTimeEntry {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn file_type(&self) -> FileType {
        self.inner.file_type()
    }

    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        let inner = self.inner.metadata()?;
        Ok(Box::new(ModTimeMeta {
            inner,
            mtime: self.mtime,
        }))
    }
}

/// Metadata wrapper: the single point where the time is substituted.
struct ModTimeMeta {
    inner: Box<dyn Metadata>,
    mtime: SystemTime,
}

impl Metadata for ModTimeMeta {
    fn name(&self) -> &str {
        self.inner.name()
    }

    fn len(&self) -> u64 {
        self.inner.len()
    }

    fn mode(&self) -> u32 {
        self.inner.mode()
    }

    fn file_type(&self) -> FileType {
        self.inner.file_type()
    }

    fn modified(&self) -> SystemTime {
        self.mtime
    }
}
