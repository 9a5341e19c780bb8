//! # Persistence Backends
//!
//! A [`ResourceActor`](crate::ResourceActor) keeps its records in memory and mirrors every
//! accepted mutation to a [`Snapshot`] backend before replying. Because the actor is the only
//! writer and handles one message at a time, a snapshot write never races another write.
//!
//! - [`Volatile`] keeps nothing; the store lives and dies with the process.
//! - [`JsonFile`] rewrites a single JSON array file wholesale on every mutation. The new
//!   content goes to a sibling temp file which is then renamed over the old one, so a crash
//!   mid-write leaves the previous snapshot intact.

use crate::error::StoreError;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// A backend that can load and replace the full contents of one actor partition.
#[async_trait]
pub trait Snapshot<T>: Send + Sync {
    /// Reads every persisted record. A backend with nothing stored yet returns an empty list.
    async fn load(&self) -> Result<Vec<T>, StoreError>;

    /// Replaces the persisted contents with `records`.
    async fn save(&self, records: &[&T]) -> Result<(), StoreError>;
}

/// In-memory only.
#[derive(Debug, Clone, Copy, Default)]
pub struct Volatile;

#[async_trait]
impl<T: Send + Sync> Snapshot<T> for Volatile {
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        Ok(Vec::new())
    }

    async fn save(&self, _records: &[&T]) -> Result<(), StoreError> {
        Ok(())
    }
}

/// A JSON array stored in one file.
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
        move |source| StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

#[async_trait]
impl<T> Snapshot<T> for JsonFile
where
    T: Serialize + DeserializeOwned + Send + Sync,
{
    async fn load(&self) -> Result<Vec<T>, StoreError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(Self::io_error(&self.path)(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }
        serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, records: &[&T]) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Self::io_error(parent))?;
        }

        let staging = self.path.with_extension("json.tmp");
        tokio::fs::write(&staging, bytes)
            .await
            .map_err(Self::io_error(&staging))?;
        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(Self::io_error(&self.path)(e));
        }
        Ok(())
    }
}

/// The pair of backends for an actor's live and archived partitions.
pub struct Storage<T> {
    pub(crate) live: Box<dyn Snapshot<T>>,
    pub(crate) archive: Box<dyn Snapshot<T>>,
}

impl<T: Send + Sync + 'static> Storage<T> {
    pub fn new(live: impl Snapshot<T> + 'static, archive: impl Snapshot<T> + 'static) -> Self {
        Self {
            live: Box::new(live),
            archive: Box::new(archive),
        }
    }

    /// Both partitions in memory only.
    pub fn volatile() -> Self {
        Self::new(Volatile, Volatile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Dish {
        id: u32,
        name: String,
    }

    #[tokio::test]
    async fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("menu.json"));
        let loaded: Vec<Dish> = file.load().await.unwrap();
        assert!(loaded.is_empty());
    }

    #[tokio::test]
    async fn save_replaces_contents_wholesale() {
        let dir = tempfile::tempdir().unwrap();
        let file = JsonFile::new(dir.path().join("nested").join("menu.json"));

        let tea = Dish { id: 1, name: "Tea".into() };
        let dosa = Dish { id: 2, name: "Dosa".into() };
        file.save(&[&tea, &dosa]).await.unwrap();
        file.save(&[&dosa]).await.unwrap();

        let loaded: Vec<Dish> = file.load().await.unwrap();
        assert_eq!(loaded, vec![dosa]);
        assert!(!dir.path().join("nested").join("menu.json.tmp").exists());
    }

    #[tokio::test]
    async fn failed_rename_removes_staging_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("menu.json");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("occupied"), "x").unwrap();

        let tea = Dish { id: 1, name: "Tea".into() };
        let result = JsonFile::new(&path).save(&[&tea]).await;
        assert!(matches!(result, Err(StoreError::Io { path: p, .. }) if p == path));
        assert!(!dir.path().join("menu.json.tmp").exists());
    }

    #[tokio::test]
    async fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orders.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: Result<Vec<Dish>, _> = JsonFile::new(&path).load().await;
        assert!(matches!(result, Err(StoreError::Corrupt { path: p, .. }) if p == path));
    }

    #[tokio::test]
    async fn blank_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("orderhistory.json");
        std::fs::write(&path, "\n").unwrap();

        let loaded: Vec<Dish> = JsonFile::new(&path).load().await.unwrap();
        assert!(loaded.is_empty());
    }
}
