//! Flat JSON file adapter for the user and shipment repository ports.
//!
//! Every call loads the whole document, and every mutation rewrites it
//! atomically. Calls are serialised behind one async mutex, so a single
//! process never interleaves a load with a concurrent save. Several processes
//! sharing one file are not coordinated.
//!
//! A missing (or blank) file is an empty collection and is created on the
//! first write. Unreadable or malformed files are reported as errors and are
//! never overwritten.

mod atomic_io;

use std::io;
use std::sync::Arc;

use async_trait::async_trait;
use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tokio::sync::Mutex;
use tracing::{debug, error};

use crate::domain::ports::{
    ShipmentPersistenceError, ShipmentRepository, UserPersistenceError, UserRepository,
};
use crate::domain::{Shipment, ShipmentId, User, UserId, Username};

use super::document::StoreDocument;

/// Errors raised while opening, loading or saving the data file.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JsonStoreError {
    /// The configured path has no file name component.
    #[error("data file path must name a file: {path}")]
    InvalidPath { path: Utf8PathBuf },
    /// The parent directory could not be created or opened.
    #[error("failed to open data directory {path}: {message}")]
    Directory { path: Utf8PathBuf, message: String },
    /// The file exists but could not be read.
    #[error("failed to read {path}: {message}")]
    Read { path: Utf8PathBuf, message: String },
    /// The file is not a valid collection document.
    #[error("{path} is not a valid store document: {message}")]
    Parse { path: Utf8PathBuf, message: String },
    /// The document could not be serialised or written.
    #[error("failed to write {path}: {message}")]
    Write { path: Utf8PathBuf, message: String },
    /// The blocking I/O task panicked or was cancelled.
    #[error("data file task failed: {message}")]
    Task { message: String },
}

impl JsonStoreError {
    fn is_write(&self) -> bool {
        matches!(self, Self::Write { .. })
    }
}

impl From<JsonStoreError> for UserPersistenceError {
    fn from(err: JsonStoreError) -> Self {
        if err.is_write() {
            Self::save(err.to_string())
        } else {
            Self::load(err.to_string())
        }
    }
}

impl From<JsonStoreError> for ShipmentPersistenceError {
    fn from(err: JsonStoreError) -> Self {
        if err.is_write() {
            Self::save(err.to_string())
        } else {
            Self::load(err.to_string())
        }
    }
}

/// Repository adapter persisting the collection root to one JSON file.
#[derive(Debug)]
pub struct JsonStore {
    dir: Arc<Dir>,
    file_name: String,
    path: Utf8PathBuf,
    lock: Mutex<()>,
}

impl JsonStore {
    /// Open the store at `path`, creating the parent directory if needed.
    ///
    /// The file itself is not touched until the first load or save.
    ///
    /// # Examples
    /// ```no_run
    /// use shipment_tracker::outbound::json_store::JsonStore;
    ///
    /// let store = JsonStore::open("./db.json")?;
    /// assert_eq!(store.path().as_str(), "./db.json");
    /// # Ok::<(), shipment_tracker::outbound::json_store::JsonStoreError>(())
    /// ```
    pub fn open(path: impl AsRef<Utf8Path>) -> Result<Self, JsonStoreError> {
        let path = path.as_ref();
        let file_name = path
            .file_name()
            .ok_or_else(|| JsonStoreError::InvalidPath {
                path: path.to_path_buf(),
            })?
            .to_owned();
        let parent = path
            .parent()
            .filter(|parent| !parent.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));

        let directory_error = |err: io::Error| JsonStoreError::Directory {
            path: parent.to_path_buf(),
            message: err.to_string(),
        };
        Dir::create_ambient_dir_all(parent, ambient_authority()).map_err(directory_error)?;
        let dir = Dir::open_ambient_dir(parent, ambient_authority()).map_err(directory_error)?;

        Ok(Self {
            dir: Arc::new(dir),
            file_name,
            path: path.to_path_buf(),
            lock: Mutex::new(()),
        })
    }

    /// Configured data file path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the current document.
    pub async fn load(&self) -> Result<StoreDocument, JsonStoreError> {
        let _guard = self.lock.lock().await;
        self.read_document().await
    }

    async fn inspect<T>(
        &self,
        view: impl FnOnce(&StoreDocument) -> T,
    ) -> Result<T, JsonStoreError> {
        let _guard = self.lock.lock().await;
        let document = self.read_document().await?;
        Ok(view(&document))
    }

    async fn modify<T>(
        &self,
        apply: impl FnOnce(&mut StoreDocument) -> T,
    ) -> Result<T, JsonStoreError> {
        let _guard = self.lock.lock().await;
        let mut document = self.read_document().await?;
        let outcome = apply(&mut document);
        self.write_document(&document).await?;
        Ok(outcome)
    }

    async fn read_document(&self) -> Result<StoreDocument, JsonStoreError> {
        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || read_document(&dir, &file_name, &path))
            .await
            .map_err(|err| JsonStoreError::Task {
                message: err.to_string(),
            })?
            .inspect_err(|err| error!(error = %err, "data file could not be loaded"))
    }

    async fn write_document(&self, document: &StoreDocument) -> Result<(), JsonStoreError> {
        let mut contents =
            serde_json::to_vec_pretty(document).map_err(|err| JsonStoreError::Write {
                path: self.path.clone(),
                message: err.to_string(),
            })?;
        contents.push(b'\n');

        let dir = Arc::clone(&self.dir);
        let file_name = self.file_name.clone();
        let path = self.path.clone();
        tokio::task::spawn_blocking(move || {
            atomic_io::replace_file(&dir, &file_name, &contents).map_err(|err| {
                JsonStoreError::Write {
                    path,
                    message: err.to_string(),
                }
            })
        })
        .await
        .map_err(|err| JsonStoreError::Task {
            message: err.to_string(),
        })?
        .inspect_err(|err| error!(error = %err, "data file could not be saved"))
    }
}

fn read_document(
    dir: &Dir,
    file_name: &str,
    path: &Utf8Path,
) -> Result<StoreDocument, JsonStoreError> {
    let raw = match dir.read_to_string(file_name) {
        Ok(raw) => raw,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            debug!(path = %path, "data file absent; starting with an empty collection");
            return Ok(StoreDocument::default());
        }
        Err(err) => {
            return Err(JsonStoreError::Read {
                path: path.to_path_buf(),
                message: err.to_string(),
            });
        }
    };
    if raw.trim().is_empty() {
        return Ok(StoreDocument::default());
    }
    serde_json::from_str(&raw).map_err(|err| JsonStoreError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })
}

#[async_trait]
impl UserRepository for JsonStore {
    async fn list(&self) -> Result<Vec<User>, UserPersistenceError> {
        Ok(self.inspect(|document| document.users.clone()).await?)
    }

    async fn find_by_username(
        &self,
        username: &Username,
    ) -> Result<Option<User>, UserPersistenceError> {
        Ok(self
            .inspect(|document| document.find_user_by_username(username))
            .await?)
    }

    async fn insert(&self, user: &User) -> Result<(), UserPersistenceError> {
        Ok(self
            .modify(|document| document.insert_user(user.clone()))
            .await?)
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        Ok(self
            .modify(|document| document.replace_user(user.clone()))
            .await?)
    }
}

#[async_trait]
impl ShipmentRepository for JsonStore {
    async fn find_by_id(
        &self,
        id: &ShipmentId,
    ) -> Result<Option<Shipment>, ShipmentPersistenceError> {
        Ok(self.inspect(|document| document.find_shipment(id)).await?)
    }

    async fn list_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Shipment>, ShipmentPersistenceError> {
        Ok(self
            .inspect(|document| document.shipments_for(user_id))
            .await?)
    }

    async fn save(&self, shipment: &Shipment) -> Result<(), ShipmentPersistenceError> {
        Ok(self
            .modify(|document| document.put_shipment(shipment.clone()))
            .await?)
    }

    async fn delete(&self, id: &ShipmentId) -> Result<bool, ShipmentPersistenceError> {
        Ok(self
            .modify(|document| document.remove_shipment(id))
            .await?)
    }
}
