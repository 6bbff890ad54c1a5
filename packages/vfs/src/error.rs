//! Error type shared by every filesystem source and wrapper.
//!
//! The taxonomy is fixed: sources map their native failures onto these
//! variants, and wrappers pass them through untouched. No crate in the
//! workspace defines a second filesystem error type.

/// Errors produced by filesystem sources.
///
/// Decorators and adapters must return these unmodified in kind and
/// payload; they never wrap, annotate, or reclassify an error from the
/// source underneath them.
#[derive(Debug, thiserror::Error)]
pub enum FsError {
    /// The path does not exist.
    #[error("not found: {path}")]
    NotFound { path: String },

    /// The path exists but may not be accessed.
    #[error("permission denied: {path}")]
    PermissionDenied { path: String },

    /// A directory operation was attempted on a non-directory.
    #[error("not a directory: {path}")]
    NotADirectory { path: String },

    /// A file operation was attempted on a directory.
    #[error("is a directory: {path}")]
    IsADirectory { path: String },

    /// The path string is not a valid slash-separated relative path.
    #[error("invalid path: {path}")]
    InvalidPath { path: String },

    /// A chunked directory listing has no entries left.
    #[error("directory listing exhausted")]
    Exhausted,

    /// An underlying I/O failure with no more specific classification.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Discriminant of `FsError`, for dispatch and assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    PermissionDenied,
    NotADirectory,
    IsADirectory,
    InvalidPath,
    Exhausted,
    Io,
}

impl FsError {
    /// The kind of this error, independent of its payload.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FsError::NotFound { .. } => ErrorKind::NotFound,
            FsError::PermissionDenied { .. } => ErrorKind::PermissionDenied,
            FsError::NotADirectory { .. } => ErrorKind::NotADirectory,
            FsError::IsADirectory { .. } => ErrorKind::IsADirectory,
            FsError::InvalidPath { .. } => ErrorKind::InvalidPath,
            FsError::Exhausted => ErrorKind::Exhausted,
            FsError::Io(_) => ErrorKind::Io,
        }
    }

    /// True if this error means "the path does not exist".
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
