//! shimfs: read-only filesystem sources and decorators.
//!
//! The family, bottom up:
//! - [`shimfs_vfs`]: the trait contract - `Fs`, optional `StatFs` /
//!   `ReadDirFs` capabilities, and the `File` / `DirEntry` / `Metadata`
//!   object traits
//! - [`shimfs_memfs`]: immutable in-memory source for bundled content
//! - [`shimfs_osfs`]: read-only OS directory source
//! - [`shimfs_modtime`]: decorator pinning one fixed modification time on
//!   every entry
//! - [`shimfs_http`]: conditional-caching static file handler
//!
//! The typical composition: bundle assets into a `MemFs`, pin the build
//! timestamp with `with_mod_time`, and serve through `FileServer` so
//! `If-Modified-Since` clients get `304 Not Modified`.

pub use shimfs_http::FileServer;
pub use shimfs_memfs::MemFs;
pub use shimfs_modtime::{with_mod_time, ModTimeFs};
pub use shimfs_osfs::OsFs;
pub use shimfs_vfs::{
    read_to_vec, stat, stat_via_open, DirEntry, ErrorKind, File, FileType, Fs, FsError, Metadata,
    ReadDirFs, StatFs,
};
