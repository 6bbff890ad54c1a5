//! Convenience operations over the trait family.

use std::io::Read;

use crate::{File, Fs, FsError, Metadata, StatFs};

/// Stat a path through a source's direct-stat capability.
pub fn stat<F: StatFs + ?Sized>(fs: &F, path: &str) -> Result<Box<dyn Metadata>, FsError> {
    fs.stat(path)
}

/// Stat a path by opening it and querying the handle.
///
/// Always correct on any `Fs`, but pays for a full open. Use this as the
/// fallback when a source does not implement [`StatFs`]; it is not a
/// substitute for the capability, and nothing in this workspace applies it
/// silently on a source's behalf.
pub fn stat_via_open<F: Fs + ?Sized>(fs: &F, path: &str) -> Result<Box<dyn Metadata>, FsError> {
    fs.open(path)?.metadata()
}

/// Read the entire content of a file into a vector.
pub fn read_to_vec<F: Fs + ?Sized>(fs: &F, path: &str) -> Result<Vec<u8>, FsError> {
    let mut file = fs.open(path)?;
    let mut buf = Vec::new();
    file.read_to_end(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FileType;
    use std::io::{self, Cursor, Seek, SeekFrom};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    struct OneFileFs;

    struct OneFile {
        cursor: Cursor<&'static [u8]>,
    }

    struct OneMetadata;

    impl Fs for OneFileFs {
        fn open(&self, path: &str) -> Result<Box<dyn File>, FsError> {
            if path == "data.bin" {
                Ok(Box::new(OneFile {
                    cursor: Cursor::new(b"\x01\x02\x03"),
                }))
            } else {
                Err(FsError::NotFound {
                    path: path.to_string(),
                })
            }
        }
    }

    impl io::Read for OneFile {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.cursor.read(buf)
        }
    }

    impl Seek for OneFile {
        fn seek(&mut self, pos: SeekFrom) -> io::Result<u64> {
            self.cursor.seek(pos)
        }
    }

    impl File for OneFile {
        fn metadata(&self) -> Result<Box<dyn Metadata>, FsError> {
            Ok(Box::new(OneMetadata))
        }
    }

    impl Metadata for OneMetadata {
        fn name(&self) -> &str {
            "data.bin"
        }

        fn len(&self) -> u64 {
            3
        }

        fn mode(&self) -> u32 {
            0o444
        }

        fn file_type(&self) -> FileType {
            FileType::File
        }

        fn modified(&self) -> SystemTime {
            UNIX_EPOCH + Duration::from_secs(42)
        }
    }

    #[test]
    fn read_to_vec_returns_content() {
        let data = read_to_vec(&OneFileFs, "data.bin").unwrap();
        assert_eq!(data, vec![1, 2, 3]);
    }

    #[test]
    fn read_to_vec_propagates_not_found() {
        let err = read_to_vec(&OneFileFs, "nope").unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn stat_via_open_queries_the_handle() {
        let meta = stat_via_open(&OneFileFs, "data.bin").unwrap();
        assert_eq!(meta.name(), "data.bin");
        assert_eq!(meta.len(), 3);
        assert_eq!(meta.modified(), UNIX_EPOCH + Duration::from_secs(42));
    }
}
