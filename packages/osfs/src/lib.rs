//! OS-directory filesystem source.
//!
//! `OsFs` exposes a directory on the local disk, read-only, through the
//! shimfs trait family. Native `std::io` failures map onto the `FsError`
//! taxonomy by kind and are never reclassified beyond that mapping.
//!
//! `std::fs::read_dir` makes no ordering promise, so listings are sorted
//! by name to keep them deterministic.

use std::fs;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use shimfs_vfs::{path, DirEntry, File, FileType, Fs, FsError, Metadata, ReadDirFs, StatFs};

/// A read-only filesystem rooted at an OS directory.
///
/// The root must exist and be a directory; it is canonicalized once at
/// construction. Paths are validated before they touch the OS, so a
/// request can never escape the root.
#[derive(Debug)]
pub struct OsFs {
    root: PathBuf,
}

impl OsFs {
    /// Create a source rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, FsError> {
        let root = root.into();
        let display = root.display().to_string();

        let attr = fs::metadata(&root).map_err(|e| map_io(e, &display))?;
        if !attr.is_dir() {
            return Err(FsError::NotADirectory { path: display });
        }

        let root = root.canonicalize().map_err(|e| map_io(e, &display))?;
        Ok(OsFs { root })
    }

    /// The canonicalized root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full_path(&self, fs_path: &str) -> Result<PathBuf, FsError> {
        path::validate(fs_path)?;
        let mut full = self.root.clone();
        for component in path::split(fs_path) {
            full.push(component);
        }
        Ok(full)
    }

    fn list(full: &Path, fs_path: &str) -> Result<Vec<OsDirEntry>, FsError> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(full).map_err(|e| map_io(e, fs_path))? {
            let entry = entry.map_err(|e| map_io(e, fs_path))?;
            let file_type = entry.file_type().map_err(|e| map_io(e, fs_path))?;
            entries.push(OsDirEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                file_type: if file_type.is_dir() {
                    FileType::Dir
                } else {
                    FileType::File
                },
                full: entry.path(),
            });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }
}

impl Fs for OsFs {
    fn open(&self, fs_path: &str) -> Result<Box<dyn File>, FsError> {
        let full = self.full_path(fs_path)?;
        log::debug!("opening {}", full.display());

        let attr = fs::metadata(&full).map_err(|e| map_io(e, fs_path))?;
        let name = path::base_name(fs_path).to_string();

        if attr.is_dir() {
            let entries = Self::list(&full, fs_path)?;
            Ok(Box::new(OsDir {
                meta: os_metadata(&name, &attr)?,
                entries,
                offset: 0,
            }))
        } else {
            let inner = fs::File::open(&full).map_err(|e| map_io(e, fs_path))?;
            Ok(Box::new(OsFile { name, inner }))
        }
    }
}

impl StatFs for OsFs {
    fn stat(&self, fs_path: &str) -> Result<Box<dyn Metadata>, FsError> {
        let full = self.full_path(fs_path)?;
        log::debug!("stat {}", full.display());

        let attr = fs::metadata(&full).map_err(|e| map_io(e, fs_path))?;
        Ok(Box::new(os_metadata(path::base_name(fs_path), &attr)?))
    }
}

impl ReadDirFs for OsFs {
    fn read_dir(&self, fs_path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        let full = self.full_path(fs_path)?;
        log::debug!("read_dir {}", full.display());

        let attr = fs::metadata(&full).map_err(|e| map_io(e, fs_path))?;
        if !attr.is_dir() {
            return Err(FsError::NotADirectory {
                path: fs_path.to_string(),
            });
        }

        Ok(Self::list(&full, fs_path)?
            .into_iter()
            .map(|e| Box::new(e) as Box<dyn DirEntry>)
            .collect())
    }
}

fn map_io(err: io::Error, fs_path: &str) -> FsError {
    match err.kind() {
        io::ErrorKind::NotFound => FsError::NotFound {
            path: fs_path.to_string(),
        },
        io::ErrorKind::PermissionDenied => FsError::PermissionDenied {
            path: fs_path.to_string(),
        },
        io::ErrorKind::NotADirectory => FsError::NotADirectory {
            path: fs_path.to_string(),
        },
        _ => FsError::Io(err),
    }
}

fn os_metadata(name: &str, attr: &fs::Metadata) -> Result<OsMetadata, FsError> {
    Ok(OsMetadata {
        name: name.to_string(),
        len: attr.len(),
        mode: mode_bits(attr),
        file_type: if attr.is_dir() {
            FileType::Dir
        } else {
            FileType::File
        },
        modified: attr.modified()?,
    })
}

#[cfg(unix)]
fn mode_bits(attr: &fs::Metadata) -> u32 {
    use std::os::unix::fs::PermissionsExt;
    attr.permissions().mode() & 0o7777
}

#[cfg(not(unix))]
fn mode_bits(attr: &fs::Metadata) -> u32 {
    if attr.permissions().readonly() {
        0o444
    } else {
        0o644
    }
}

struct OsFile {
    name: String,
    inner: fs::File,
}

impl Read for OsFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.inner.read(buf)
    }
}

impl Seek for OsFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.inner.seek(pos)
    }
}

impl File for OsFile {
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        let attr = self.inner.metadata()?;
        Ok(Box::new(os_metadata(&self.name, &attr)?))
    }
}

struct OsDir {
    meta: OsMetadata,
    entries: Vec<OsDirEntry>,
    offset: usize,
}

impl Read for OsDir {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", self.meta.name),
        ))
    }
}

impl Seek for OsDir {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", self.meta.name),
        ))
    }
}

impl File for OsDir {
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        Ok(Box::new(self.meta.clone()))
    }

    fn read_dir(&mut self, n: Option<usize>) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        let remaining = self.entries.len() - self.offset;
        let take = match n {
            Some(_) if remaining == 0 => return Err(FsError::Exhausted),
            Some(n) => remaining.min(n),
            None => remaining,
        };

        let batch = self.entries[self.offset..self.offset + take]
            .iter()
            .cloned()
            .map(|e| Box::new(e) as Box<dyn DirEntry>)
            .collect();
        self.offset += take;
        Ok(batch)
    }
}

#[derive(Clone)]
struct OsDirEntry {
    name: String,
    file_type: FileType,
    full: PathBuf,
}

impl DirEntry for OsDirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        let attr = fs::metadata(&self.full).map_err(|e| map_io(e, &self.name))?;
        Ok(Box::new(os_metadata(&self.name, &attr)?))
    }
}

#[derive(Clone)]
struct OsMetadata {
    name: String,
    len: u64,
    mode: u32,
    file_type: FileType,
    modified: SystemTime,
}

impl Metadata for OsMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn mode(&self) -> u32 {
        self.mode
    }

    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn modified(&self) -> SystemTime {
        self.modified
    }
}
