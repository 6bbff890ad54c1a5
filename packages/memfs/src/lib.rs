//! In-memory filesystem source.
//!
//! `MemFs` holds a tree of named byte blobs built once from `(path, bytes)`
//! pairs and immutable afterwards. It is the bundled-assets source: content
//! compiled into a binary has no meaningful modification time, so `MemFs`
//! reports the Unix epoch for everything and leaves timestamp policy to a
//! decorating layer.
//!
//! Listings are stored in a B-tree, so directory order is name-sorted and
//! deterministic across runs.
//!
//! # Example
//!
//! ```rust
//! use shimfs_memfs::MemFs;
//! use shimfs_vfs::{DirEntry, ReadDirFs};
//!
//! let fs = MemFs::builder()
//!     .file("index.html", "<html></html>")
//!     .file("assets/app.css", "body {}")
//!     .build()
//!     .unwrap();
//!
//! let entries = fs.read_dir("").unwrap();
//! assert_eq!(entries[0].name(), "assets");
//! assert_eq!(entries[1].name(), "index.html");
//! ```

use std::collections::BTreeMap;
use std::io::{self, Cursor, Read, Seek, SeekFrom};
use std::time::{SystemTime, UNIX_EPOCH};

use bytes::Bytes;

use shimfs_vfs::{path, DirEntry, File, FileType, Fs, FsError, Metadata, ReadDirFs, StatFs};

const FILE_MODE: u32 = 0o444;
const DIR_MODE: u32 = 0o555;

#[derive(Debug)]
enum Node {
    File { data: Bytes },
    Dir { children: BTreeMap<String, Node> },
}

impl Node {
    fn empty_dir() -> Node {
        Node::Dir {
            children: BTreeMap::new(),
        }
    }

    fn file_type(&self) -> FileType {
        match self {
            Node::File { .. } => FileType::File,
            Node::Dir { .. } => FileType::Dir,
        }
    }

    fn len(&self) -> u64 {
        match self {
            Node::File { data } => data.len() as u64,
            Node::Dir { .. } => 0,
        }
    }
}

/// Builder for [`MemFs`].
///
/// Intermediate directories are synthesized from the file paths; they are
/// never declared explicitly.
#[derive(Default)]
pub struct MemFsBuilder {
    files: Vec<(String, Bytes)>,
}

impl MemFsBuilder {
    /// Add a file at `path` with the given content.
    #[must_use]
    pub fn file(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.files.push((path.into(), data.into()));
        self
    }

    /// Freeze the tree.
    ///
    /// Fails with `FsError::InvalidPath` if a path is malformed, names the
    /// root, collides with an existing entry, or routes through a file.
    pub fn build(self) -> Result<MemFs, FsError> {
        let mut root = Node::empty_dir();

        for (file_path, data) in self.files {
            path::validate(&file_path)?;
            if file_path.is_empty() {
                return Err(FsError::InvalidPath { path: file_path });
            }

            let components: Vec<&str> = path::split(&file_path).collect();
            let (leaf, dirs) = components.split_last().expect("validated non-empty path");

            let mut node = &mut root;
            for dir in dirs {
                let Node::Dir { children } = node else {
                    return Err(FsError::InvalidPath { path: file_path });
                };
                node = children
                    .entry((*dir).to_string())
                    .or_insert_with(Node::empty_dir);
            }

            let Node::Dir { children } = node else {
                return Err(FsError::InvalidPath { path: file_path });
            };
            if children.contains_key(*leaf) {
                return Err(FsError::InvalidPath { path: file_path });
            }
            children.insert((*leaf).to_string(), Node::File { data });
        }

        Ok(MemFs { root })
    }
}

/// An immutable in-memory filesystem.
///
/// Implements all three capability traits: [`Fs`], [`StatFs`], and
/// [`ReadDirFs`]. Native modification times are the Unix epoch.
#[derive(Debug)]
pub struct MemFs {
    root: Node,
}

impl MemFs {
    /// Start building a filesystem.
    pub fn builder() -> MemFsBuilder {
        MemFsBuilder::default()
    }

    fn node(&self, fs_path: &str) -> Result<&Node, FsError> {
        path::validate(fs_path)?;

        let mut node = &self.root;
        let mut walked = String::new();
        for component in path::split(fs_path) {
            let Node::Dir { children } = node else {
                return Err(FsError::NotADirectory { path: walked });
            };
            node = children.get(component).ok_or_else(|| FsError::NotFound {
                path: fs_path.to_string(),
            })?;
            if !walked.is_empty() {
                walked.push('/');
            }
            walked.push_str(component);
        }
        Ok(node)
    }

    fn entries_of(children: &BTreeMap<String, Node>) -> Vec<MemDirEntry> {
        children
            .iter()
            .map(|(name, node)| MemDirEntry {
                name: name.clone(),
                file_type: node.file_type(),
                len: node.len(),
            })
            .collect()
    }

    fn metadata_for(fs_path: &str, node: &Node) -> MemMetadata {
        MemMetadata {
            name: path::base_name(fs_path).to_string(),
            len: node.len(),
            file_type: node.file_type(),
        }
    }
}

impl Fs for MemFs {
    fn open(&self, fs_path: &str) -> Result<Box<dyn File>, FsError> {
        match self.node(fs_path)? {
            Node::File { data } => Ok(Box::new(MemFile {
                name: path::base_name(fs_path).to_string(),
                cursor: Cursor::new(data.clone()),
            })),
            Node::Dir { children } => Ok(Box::new(MemDir {
                name: path::base_name(fs_path).to_string(),
                entries: Self::entries_of(children),
                offset: 0,
            })),
        }
    }
}

impl StatFs for MemFs {
    fn stat(&self, fs_path: &str) -> Result<Box<dyn Metadata>, FsError> {
        let node = self.node(fs_path)?;
        Ok(Box::new(Self::metadata_for(fs_path, node)))
    }
}

impl ReadDirFs for MemFs {
    fn read_dir(&self, fs_path: &str) -> Result<Vec<Box<dyn DirEntry>>, FsError> {
        match self.node(fs_path)? {
            Node::Dir { children } => Ok(Self::entries_of(children)
                .into_iter()
                .map(|e| Box::new(e) as Box<dyn DirEntry>)
                .collect()),
            Node::File { .. } => Err(FsError::NotADirectory {
                path: fs_path.to_string(),
            }),
        }
    }
}

/// Open handle to an in-memory file. Reads share the underlying bytes.
struct MemFile {
    name: String,
    cursor: Cursor<Bytes>,
}

impl Read for MemFile {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.cursor.read(buf)
    }
}

impl Seek for MemFile {
    fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl File for MemFile {
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        Ok(Box::new(MemMetadata {
            name: self.name.clone(),
            len: self.cursor.get_ref().len() as u64,
            file_type: FileType::File,
        }))
    }
}

/// Open handle to an in-memory directory, with a listing position.
struct MemDir {
    name: String,
    entries: Vec<MemDirEntry>,
    offset: usize,
}

impl Read for MemDir {
    fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", self.name),
        ))
    }
}

impl Seek for MemDir {
    fn seek(&mut self, _pos: SeekFrom) -> io::Result<u64> {
        Err(io::Error::new(
            io::ErrorKind::Other,
            format!("{} is a directory", self.name),
        ))
    }
}

impl File for MemDir {
    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        Ok(Box::new(MemMetadata {
            name: self.name.clone(),
            len: 0,
            file_type: FileType::Dir,
        }))
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
struct MemDirEntry {
    name: String,
    file_type: FileType,
    len: u64,
}

impl DirEntry for MemDirEntry {
    fn name(&self) -> &str {
        &self.name
    }

    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
        Ok(Box::new(MemMetadata {
            name: self.name.clone(),
            len: self.len,
            file_type: self.file_type,
        }))
    }
}

struct MemMetadata {
    name: String,
    len: u64,
    file_type: FileType,
}

impl Metadata for MemMetadata {
    fn name(&self) -> &str {
        &self.name
    }

    fn len(&self) -> u64 {
        self.len
    }

    fn mode(&self) -> u32 {
        match self.file_type {
            FileType::File => FILE_MODE,
            FileType::Dir => DIR_MODE,
        }
    }

    fn file_type(&self) -> FileType {
        self.file_type
    }

    fn modified(&self) -> SystemTime {
        UNIX_EPOCH
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shimfs_vfs::ErrorKind;

    fn sample() -> MemFs {
        MemFs::builder()
            .file("index.html", "<html></html>")
            .file("assets/app.css", "body {}")
            .file("assets/app.js", "let x;")
            .build()
            .unwrap()
    }

    #[test]
    fn open_and_read_file() {
        let fs = sample();
        let mut file = fs.open("assets/app.css").unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "body {}");
    }

    #[test]
    fn seek_within_file() {
        let fs = sample();
        let mut file = fs.open("index.html").unwrap();
        file.seek(SeekFrom::Start(1)).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        assert_eq!(content, "html></html>");
    }

    #[test]
    fn stat_reports_epoch_and_size() {
        let fs = sample();
        let meta = fs.stat("index.html").unwrap();
        assert_eq!(meta.name(), "index.html");
        assert_eq!(meta.len(), 13);
        assert_eq!(meta.modified(), UNIX_EPOCH);
        assert!(!meta.is_dir());
        assert_eq!(meta.mode(), 0o444);
    }

    #[test]
    fn stat_root_is_directory() {
        let fs = sample();
        let meta = fs.stat("").unwrap();
        assert_eq!(meta.name(), ".");
        assert!(meta.is_dir());
        assert_eq!(meta.mode(), 0o555);
    }

    #[test]
    fn read_dir_is_sorted() {
        let fs = sample();
        let names: Vec<String> = fs
            .read_dir("")
            .unwrap()
            .iter()
            .map(|e| e.name().to_string())
            .collect();
        assert_eq!(names, vec!["assets", "index.html"]);
    }

    #[test]
    fn read_dir_entry_materializes_metadata() {
        let fs = sample();
        let entries = fs.read_dir("assets").unwrap();
        let meta = entries[0].metadata().unwrap();
        assert_eq!(meta.name(), "app.css");
        assert_eq!(meta.len(), 7);
    }

    #[test]
    fn open_missing_is_not_found() {
        let fs = sample();
        let err = fs.open("assets/missing.css").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    }

    #[test]
    fn path_through_file_is_not_a_directory() {
        let fs = sample();
        let err = fs.open("index.html/child").err().unwrap();
        assert!(matches!(err, FsError::NotADirectory { path } if path == "index.html"));
    }

    #[test]
    fn read_dir_on_file_path_fails() {
        let fs = sample();
        let err = fs.read_dir("index.html").err().unwrap();
        assert_eq!(err.kind(), ErrorKind::NotADirectory);
    }

    #[test]
    fn dir_handle_lists_in_batches() {
        let fs = sample();
        let mut dir = fs.open("assets").unwrap();

        let first = dir.read_dir(Some(1)).unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(first[0].name(), "app.css");

        let second = dir.read_dir(Some(5)).unwrap();
        assert_eq!(second.len(), 1);
        assert_eq!(second[0].name(), "app.js");

        let err = dir.read_dir(Some(1)).err().unwrap();
        assert_eq!(err.kind(), ErrorKind::Exhausted);
    }

    #[test]
    fn dir_handle_lists_all_with_none() {
        let fs = sample();
        let mut dir = fs.open("assets").unwrap();
        assert_eq!(dir.read_dir(None).unwrap().len(), 2);
        assert!(dir.read_dir(None).unwrap().is_empty());
    }

    #[test]
    fn dir_handle_read_fails() {
        let fs = sample();
        let mut dir = fs.open("assets").unwrap();
        let mut buf = [0u8; 8];
        assert!(dir.read(&mut buf).is_err());
    }

    #[test]
    fn builder_rejects_duplicate_path() {
        let err = MemFs::builder()
            .file("a.txt", "one")
            .file("a.txt", "two")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn builder_rejects_file_under_file() {
        let err = MemFs::builder()
            .file("a.txt", "one")
            .file("a.txt/b.txt", "two")
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidPath);
    }

    #[test]
    fn builder_rejects_invalid_paths() {
        assert!(MemFs::builder().file("/abs", "x").build().is_err());
        assert!(MemFs::builder().file("a/../b", "x").build().is_err());
        assert!(MemFs::builder().file("", "x").build().is_err());
    }
}
