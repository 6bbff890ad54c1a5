//! Decorator behavior against real sources: every access path reports the
//! fixed time, and nothing else changes.

use std::fs as std_fs;
use std::io::{Read, Write};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use shimfs_memfs::MemFs;
use shimfs_modtime::{with_mod_time, ModTimeFs};
use shimfs_osfs::OsFs;
use shimfs_vfs::{DirEntry, ErrorKind, File, Fs, Metadata, ReadDirFs, StatFs};

fn fixed() -> SystemTime {
    UNIX_EPOCH + Duration::from_secs(1_727_600_261)
}

fn sample_memfs() -> MemFs {
    MemFs::builder()
        .file("index.html", "<html></html>")
        .file("assets/app.css", "body {}")
        .file("assets/app.js", "let x;")
        .build()
        .unwrap()
}

fn check_entries(mtime: SystemTime, entries: &[Box<dyn DirEntry>]) {
    for entry in entries {
        let meta = entry.metadata().unwrap();
        assert_eq!(
            meta.modified(),
            mtime,
            "entry {} reported the wrong time",
            entry.name()
        );
    }
}

#[test]
fn stat_reports_fixed_time() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let meta = fs.stat("index.html").unwrap();
    assert_eq!(meta.modified(), fixed());
}

#[test]
fn stat_preserves_everything_but_the_time() {
    let inner = sample_memfs();
    let undecorated = inner.stat("assets/app.css").unwrap();

    let fs = with_mod_time(inner, fixed());
    let decorated = fs.stat("assets/app.css").unwrap();

    assert_eq!(decorated.name(), undecorated.name());
    assert_eq!(decorated.len(), undecorated.len());
    assert_eq!(decorated.mode(), undecorated.mode());
    assert_eq!(decorated.file_type(), undecorated.file_type());
    assert_ne!(decorated.modified(), undecorated.modified());
}

#[test]
fn read_dir_wraps_every_entry() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let entries = fs.read_dir("").unwrap();
    check_entries(fixed(), &entries);
}

#[test]
fn read_dir_preserves_order() {
    let inner = sample_memfs();
    let undecorated: Vec<String> = inner
        .read_dir("assets")
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();

    let fs = with_mod_time(inner, fixed());
    let decorated: Vec<String> = fs
        .read_dir("assets")
        .unwrap()
        .iter()
        .map(|e| e.name().to_string())
        .collect();

    assert_eq!(decorated, undecorated);
}

#[test]
fn opened_file_stat_reports_fixed_time() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let mut file = fs.open("index.html").unwrap();
    let meta = file.metadata().unwrap();
    assert_eq!(meta.modified(), fixed());
    assert_eq!(meta.name(), "index.html");

    let mut content = String::new();
    file.read_to_string(&mut content).unwrap();
    assert_eq!(content, "<html></html>");
}

#[test]
fn opened_dir_read_dir_reports_fixed_time() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let mut dir = fs.open("").unwrap();
    let entries = dir.read_dir(Some(10)).unwrap();
    assert_eq!(entries.len(), 2);
    check_entries(fixed(), &entries);
}

#[test]
fn opened_dir_exhaustion_passes_through() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let mut dir = fs.open("assets").unwrap();
    dir.read_dir(Some(10)).unwrap();
    let err = dir.read_dir(Some(1)).err().unwrap();
    assert_eq!(err.kind(), ErrorKind::Exhausted);
}

#[test]
fn directory_metadata_reports_fixed_time() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let meta = fs.stat("assets").unwrap();
    assert!(meta.is_dir());
    assert_eq!(meta.modified(), fixed());
}

#[test]
fn not_found_is_unchanged() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let err = fs.open("missing.txt").err().unwrap();
    assert!(matches!(
        err,
        shimfs_vfs::FsError::NotFound { path } if path == "missing.txt"
    ));
}

#[test]
fn capability_parity_with_full_source() {
    fn assert_fs<F: Fs>(_: &F) {}
    fn assert_stat<F: StatFs>(_: &F) {}
    fn assert_read_dir<F: ReadDirFs>(_: &F) {}

    let fs: ModTimeFs<MemFs> = with_mod_time(sample_memfs(), fixed());
    assert_fs(&fs);
    assert_stat(&fs);
    assert_read_dir(&fs);
}

#[test]
fn os_source_gets_the_same_treatment() {
    let dir = tempfile::tempdir().unwrap();
    std_fs::create_dir(dir.path().join("docs")).unwrap();
    std_fs::File::create(dir.path().join("docs/readme.md"))
        .unwrap()
        .write_all(b"# hi")
        .unwrap();

    let inner = OsFs::new(dir.path()).unwrap();
    let real = inner.stat("docs/readme.md").unwrap();
    assert_ne!(real.modified(), fixed());

    let fs = with_mod_time(inner, fixed());

    let meta = fs.stat("docs/readme.md").unwrap();
    assert_eq!(meta.modified(), fixed());
    assert_eq!(meta.len(), real.len());
    assert_eq!(meta.mode(), real.mode());

    let entries = fs.read_dir("docs").unwrap();
    check_entries(fixed(), &entries);

    let via_open = fs.open("docs/readme.md").unwrap().metadata().unwrap();
    assert_eq!(via_open.modified(), fixed());
}

#[test]
fn same_time_everywhere() {
    let fs = with_mod_time(sample_memfs(), fixed());

    let direct = fs.stat("index.html").unwrap().modified();
    let via_open = fs.open("index.html").unwrap().metadata().unwrap().modified();
    let via_entry = fs.read_dir("").unwrap()[1].metadata().unwrap().modified();
    let via_handle_listing = fs.open("assets").unwrap().read_dir(None).unwrap()[0]
        .metadata()
        .unwrap()
        .modified();

    assert_eq!(direct, fixed());
    assert_eq!(via_open, direct);
    assert_eq!(via_entry, direct);
    assert_eq!(via_handle_listing, direct);
}
