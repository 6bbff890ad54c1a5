//! Core shimfs: the read-only filesystem trait family.
//!
//! This layer defines the contract everything else in the workspace builds
//! on:
//! - `Fs`: open a path, get a handle (the minimum capability)
//! - `StatFs`: query metadata without opening (optional capability)
//! - `ReadDirFs`: list a directory in bulk (optional capability)
//! - `File`, `DirEntry`, `Metadata`: the object traits those operations
//!   produce
//!
//! Optional capabilities are separate traits on purpose: a wrapper or
//! adapter forwards a capability by implementing the capability trait only
//! when its inner source does, so generic consumers probing for `StatFs` or
//! `ReadDirFs` see a faithful picture of what is efficiently available.
//!
//! # Example
//!
//! ```rust
//! use shimfs_vfs::{File, Fs, FsError, Metadata};
//!
//! fn content_length(fs: &dyn Fs, path: &str) -> Result<u64, FsError> {
//!     Ok(fs.open(path)?.metadata()?.len())
//! }
//! ```

mod error;
mod ops;
pub mod path;
mod traits;

pub use error::{ErrorKind, FsError};
pub use ops::{read_to_vec, stat, stat_via_open};
pub use traits::{DirEntry, File, FileType, Fs, Metadata, ReadDirFs, StatFs};
