//! The filesystem trait family: capability traits and object traits.

use std::io;
use std::time::SystemTime;

use crate::FsError;

/// Whether an entry is a regular file or a directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileType {
    File,
    Dir,
}

impl FileType {
    /// True for `FileType::Dir`.
    pub fn is_dir(self) -> bool {
        matches!(self, FileType::Dir)
    }
}

/// A read-only filesystem addressed by slash-separated relative paths.
///
/// This is the minimum contract: open a path, get a handle. The root
/// directory is the empty path `""`.
///
/// # Object Safety
///
/// This trait is object-safe: you can use `&dyn Fs` or `Box<dyn Fs>`.
pub trait Fs: Send + Sync {
    /// Open the file or directory at `path`.
    ///
    /// # Returns
    ///
    /// * `Ok(handle)` - A live handle supporting reads and metadata.
    /// * `Err(FsError::NotFound)` - The path does not exist.
    /// * `Err(_)` - Whatever else the source reports, unclassified.
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError>;
}

/// Optional capability: query metadata without opening.
///
/// A source implements this when it can answer a stat cheaper than
/// open-then-stat. Consumers that only have `Fs` can use
/// [`crate::stat_via_open`] instead.
pub trait StatFs: Fs {
    /// Metadata for the file or directory at `path`.
    fn stat(&self, path: &str) -> Result<Box<dyn Metadata>, FsError>;
}

/// Optional capability: list a directory in one call.
///
/// The returned order is whatever the source produces; sources in this
/// workspace are deterministic, and consumers must preserve the order
/// they are given.
pub trait ReadDirFs: Fs {
    /// All entries of the directory at `path`.
    fn read_dir(&self, path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError>;
}

/// A live handle to an opened file or directory.
///
/// Handles own their underlying resource; dropping the handle releases it.
/// Reads and seeks follow the `std::io` contracts of the source.
pub trait File: io::Read + io::Seek + Send {
    /// Metadata for this handle.
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError>;

    /// Read directory entries from a directory handle.
    ///
    /// * `Some(n)` - Return up to `n` entries in listing order, and
    ///   `FsError::Exhausted` once the listing is consumed.
    /// * `None` - Return all remaining entries; an empty vector thereafter.
    ///
    /// Handles to regular files return `FsError::NotADirectory`, which is
    /// the default.
    fn read_dir(&mut self, n: Option<usize>) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        let _ = n;
        let path = self
            .metadata()
            .map(|m| m.name().to_string())
            .unwrap_or_default();
        Err(FsError::NotADirectory { path })
    }
}

/// A named entry produced during a directory listing.
///
/// Name and type are cheap; `metadata` may touch the source again.
pub trait DirEntry: Send + Sync {
    /// The entry's base name, without any path prefix.
    fn name(&self) -> &str;

    /// Whether the entry is a file or a directory.
    fn file_type(&self) -> FileType;

    /// Materialize the full metadata record for this entry.
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError>;

    /// True if the entry is a directory.
    fn is_dir(&self) -> bool {
        self.file_type().is_dir()
    }
}

/// A point-in-time metadata snapshot for one path.
pub trait Metadata: Send + Sync {
    /// Base name of the described file or directory.
    fn name(&self) -> &str;

    /// Content length in bytes; sources may report 0 for directories.
    fn len(&self) -> u64;

    /// Unix permission bits.
    fn mode(&self) -> u32;

    /// Whether the path is a file or a directory.
    fn file_type(&self) -> FileType;

    /// Last modification time.
    fn modified(&self) -> SystemTime;

    /// True if the path is a directory.
    fn is_dir(&self) -> bool {
        self.file_type().is_dir()
    }
}

// Blanket implementations for references and boxes

impl<T: Fs + ?Sized> Fs for &T {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        (**self).open(path)
    }
}

impl<T: StatFs + ?Sized> StatFs for &T {
    fn stat(&self, path: &str) -> Result<Box<dyn Metadata>, FsError> {
        (**self).stat(path)
    }
}

impl<T: ReadDirFs + ?Sized> ReadDirFs for &T {
    fn read_dir(&self, path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        (**self).read_dir(path)
    }
}

impl<T: Fs + ?Sized> Fs for Box<T> {
    fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
        self.as_ref().open(path)
    }
}

impl<T: StatFs + ?Sized> StatFs for Box<T> {
    fn stat(&self, path: &str) -> Result<Box<dyn Metadata>, FsError> {
        self.as_ref().stat(path)
    }
}

impl<T: ReadDirFs + ?Sized> ReadDirFs for Box<T> {
    fn read_dir(&self, path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        self.as_ref().read_dir(path)
    }
}
