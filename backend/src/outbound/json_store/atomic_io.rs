//! Crash-safe replacement of the data file.
//!
//! The document is written to a hidden sibling, flushed, and renamed over the
//! target, so readers only ever see the previous or the next full document.

use std::io::{self, Write};
use std::sync::atomic::{AtomicU64, Ordering};

use cap_std::fs::{Dir, OpenOptions};

static TEMP_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Replace `file_name` inside `dir` with `contents`.
///
/// `file_name` must be a bare file name. A failed write or rename leaves the
/// previous file untouched and removes the temporary sibling.
pub(super) fn replace_file(dir: &Dir, file_name: &str, contents: &[u8]) -> io::Result<()> {
    let tmp_name = temp_name(file_name);

    if let Err(err) = write_synced(dir, &tmp_name, contents) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    if let Err(err) = rename_over(dir, &tmp_name, file_name) {
        discard(dir, &tmp_name);
        return Err(err);
    }
    sync_directory(dir);
    Ok(())
}

fn temp_name(file_name: &str) -> String {
    let counter = TEMP_COUNTER.fetch_add(1, Ordering::Relaxed);
    format!(".{file_name}.tmp.{}.{counter}", std::process::id())
}

fn write_synced(dir: &Dir, tmp_name: &str, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(tmp_name, &options)?;
    file.write_all(contents)?;
    file.sync_all()
}

#[cfg(windows)]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    // Windows rename fails if the target exists.
    match dir.remove_file(target_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => return Err(err),
    }
    dir.rename(tmp_name, dir, target_name)
}

#[cfg(not(windows))]
fn rename_over(dir: &Dir, tmp_name: &str, target_name: &str) -> io::Result<()> {
    dir.rename(tmp_name, dir, target_name)
}

fn discard(dir: &Dir, tmp_name: &str) {
    match dir.remove_file(tmp_name) {
        Ok(()) => {}
        Err(err) if err.kind() == io::ErrorKind::NotFound => {}
        Err(err) => tracing::debug!(error = %err, tmp_name, "temporary data file left behind"),
    }
}

fn sync_directory(dir: &Dir) {
    if let Err(err) = dir.open(".").and_then(|handle| handle.sync_all()) {
        tracing::debug!(error = %err, "data directory sync skipped");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cap_std::ambient_authority;
    use rstest::{fixture, rstest};
    use tempfile::TempDir;

    #[fixture]
    fn scratch() -> (TempDir, Dir) {
        let temp = TempDir::new().expect("temp dir");
        let dir = Dir::open_ambient_dir(temp.path(), ambient_authority()).expect("open temp dir");
        (temp, dir)
    }

    fn entries(dir: &Dir) -> Vec<String> {
        let mut names: Vec<String> = dir
            .entries()
            .expect("list dir")
            .map(|entry| {
                entry
                    .expect("entry")
                    .file_name()
                    .to_string_lossy()
                    .into_owned()
            })
            .collect();
        names.sort();
        names
    }

    #[rstest]
    fn replaces_existing_contents(scratch: (TempDir, Dir)) {
        let (_temp, dir) = scratch;
        replace_file(&dir, "db.json", b"first").expect("first write");
        replace_file(&dir, "db.json", b"second").expect("second write");

        assert_eq!(dir.read_to_string("db.json").expect("read"), "second");
        assert_eq!(entries(&dir), vec!["db.json".to_owned()]);
    }

    #[rstest]
    fn temp_names_are_hidden_and_unique() {
        let first = temp_name("db.json");
        let second = temp_name("db.json");
        assert!(first.starts_with(".db.json.tmp."));
        assert_ne!(first, second);
    }
}
