use crate::core::kv::store::KeyValueStore;
use anyhow::{Context, Error};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

/// File-backed key-value store. The whole store is one JSON object
/// on disk; writes go to a sibling temp file first and are renamed
/// into place, so an interrupted write never truncates the map.
pub struct FileStore {
    path: PathBuf,
    /// Serializes read-modify-write cycles on the backing file.
    write_lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            write_lock: Mutex::new(()),
        }
    }

    async fn read_map(&self) -> Result<HashMap<String, String>, Error> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(HashMap::new()),
            Err(e) => {
                return Err(Error::from(e))
                    .with_context(|| format!("failed to read store file {}", self.path.display()));
            }
        };

        serde_json::from_str(&raw)
            .with_context(|| format!("store file {} is not a json map", self.path.display()))
    }

    async fn write_map(&self, map: &HashMap<String, String>) -> Result<(), Error> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }

        let tmp = self.path.with_extension("tmp");
        let raw = serde_json::to_string(map)?;

        tokio::fs::write(&tmp, raw).await?;
        tokio::fs::rename(&tmp, &self.path).await?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, Error> {
        Ok(self.read_map().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: String) -> Result<(), Error> {
        let _guard = self.write_lock.lock().await;

        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        assert_eq!(store.get_item("cartItems").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_set_then_get_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        store
            .set_item("cartItems", "[\"p1\"]".to_string())
            .await
            .unwrap();

        assert_eq!(
            store.get_item("cartItems").await.unwrap(),
            Some("[\"p1\"]".to_string())
        );
    }

    #[tokio::test]
    async fn test_value_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let store = FileStore::new(path.clone());
        store.set_item("k", "v".to_string()).await.unwrap();
        drop(store);

        let reopened = FileStore::new(path);
        assert_eq!(reopened.get_item("k").await.unwrap(), Some("v".to_string()));
    }

    #[tokio::test]
    async fn test_overwrite_replaces_value() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        store.set_item("k", "a".to_string()).await.unwrap();
        store.set_item("k", "b".to_string()).await.unwrap();

        assert_eq!(store.get_item("k").await.unwrap(), Some("b".to_string()));
    }

    #[tokio::test]
    async fn test_keys_are_independent() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("store.json"));

        store.set_item("a", "1".to_string()).await.unwrap();
        store.set_item("b", "2".to_string()).await.unwrap();

        assert_eq!(store.get_item("a").await.unwrap(), Some("1".to_string()));
        assert_eq!(store.get_item("b").await.unwrap(), Some("2".to_string()));
    }
}
