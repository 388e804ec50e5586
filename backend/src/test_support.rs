//! Test utilities for the backend crate.
//!
//! This module provides shared helpers for both unit tests (in `src/`) and
//! integration tests (in `tests/`). It is only compiled when running tests
//! or when the `test-support` feature is enabled.

use std::sync::Mutex;

use chrono::{DateTime, Duration, Local, Utc};
use mockable::Clock;

/// Clock whose current instant only moves when a test advances it.
///
/// # Examples
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use mockable::Clock;
/// use shipment_tracker::test_support::MutableClock;
///
/// let start = Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap();
/// let clock = MutableClock::new(start);
/// clock.advance_seconds(30);
/// assert_eq!((clock.utc() - start).num_seconds(), 30);
/// ```
#[derive(Debug)]
pub struct MutableClock {
    now: Mutex<DateTime<Utc>>,
}

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    /// Move the clock forward (or backward for negative values).
    pub fn advance_seconds(&self, seconds: i64) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += Duration::seconds(seconds);
    }

    /// Pin the clock to an explicit instant.
    pub fn set(&self, instant: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = instant;
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

pub mod cap_fs {
    //! Capability-safe filesystem helpers for tests.
    //!
    //! The data store never touches `std::fs` directly. These helpers give
    //! test suites the same `cap_std::fs::Dir` based access when seeding or
    //! inspecting a data file.

    use std::ffi::OsString;
    use std::io;
    use std::path::Path;

    use cap_std::{ambient_authority, fs::Dir};

    /// Read a UTF-8 text file through `cap_std`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use shipment_tracker::test_support::cap_fs::{read_file_to_string, write_file};
    ///
    /// let path = std::env::temp_dir().join("cap-fs-read-example.json");
    /// write_file(&path, b"{}\n")?;
    ///
    /// let content = read_file_to_string(&path)?;
    /// assert_eq!(content, "{}\n");
    /// # Ok::<(), std::io::Error>(())
    /// ```
    pub fn read_file_to_string(path: &Path) -> io::Result<String> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.read_to_string(Path::new(&file_name))
    }

    /// Write bytes to a file, replacing any existing contents.
    pub fn write_file(path: &Path, contents: &[u8]) -> io::Result<()> {
        let (parent, file_name) = parent_and_file_name(path)?;
        let directory = Dir::open_ambient_dir(parent, ambient_authority())?;
        directory.write(Path::new(&file_name), contents)
    }

    fn parent_and_file_name(path: &Path) -> io::Result<(&Path, OsString)> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        let file_name = path.file_name().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                "path must include a file name",
            )
        })?;
        Ok((parent, file_name.to_os_string()))
    }
}

pub mod openapi {
    //! OpenAPI schema traversal helpers.
    //!
    //! Resolves utoipa `RefOr<Schema>` wrappers to concrete `Object` schemas
    //! with diagnostic panics on type mismatches.

    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::{Object, Schema};

    pub fn unwrap_object_schema<'a>(schema: &'a RefOr<Schema>, name: &str) -> &'a Object {
        match schema {
            RefOr::T(Schema::Object(obj)) => obj,
            RefOr::Ref(reference) => {
                panic!(
                    "schema '{name}' is a $ref to '{}'; resolve the reference first",
                    reference.ref_location
                );
            }
            RefOr::T(Schema::Array(_)) => {
                panic!("schema '{name}' is an Array, not an Object");
            }
            _ => panic!("schema '{name}' has unexpected type"),
        }
    }

    pub fn get_property<'a>(obj: &'a Object, field: &str) -> &'a RefOr<Schema> {
        match obj.properties.get(field) {
            Some(property) => property,
            None => panic!("property '{field}' not found"),
        }
    }
}

pub mod data_file {
    //! Scratch data files for store tests.

    use std::io;

    use camino::{Utf8Path, Utf8PathBuf};
    use tempfile::TempDir;

    /// A `db.json` path inside a temporary directory removed on drop.
    pub struct TempDataFile {
        _dir: TempDir,
        path: Utf8PathBuf,
    }

    impl TempDataFile {
        /// Reserve a path; the file itself is not created.
        pub fn new() -> io::Result<Self> {
            let dir = TempDir::new()?;
            let root = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).map_err(|path| {
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("temporary directory is not UTF-8: {}", path.display()),
                )
            })?;
            Ok(Self {
                _dir: dir,
                path: root.join("db.json"),
            })
        }

        pub fn path(&self) -> &Utf8Path {
            &self.path
        }

        /// Current file contents.
        pub fn read(&self) -> io::Result<String> {
            super::cap_fs::read_file_to_string(self.path.as_std_path())
        }

        /// Seed the file with raw contents.
        pub fn write(&self, contents: &str) -> io::Result<()> {
            super::cap_fs::write_file(self.path.as_std_path(), contents.as_bytes())
        }
    }
}
