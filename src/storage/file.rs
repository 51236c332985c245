use std::{collections::BTreeMap, io::ErrorKind, path::PathBuf};

use async_trait::async_trait;

use crate::error::StoreError;

use super::TokenStore;

/// Keeps all entries in a single pretty-printed JSON object on disk.
///
/// Every call reads the file again, so several processes sharing the file
/// see each other's writes. There is no locking between them. Writes go to a
/// sibling temp file that is renamed over the original, so readers never see
/// a half-written object.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `<data_local_dir>/spotrec/storage.json`
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("spotrec/storage.json");
        path
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    async fn read_all(&self) -> Result<BTreeMap<String, String>, StoreError> {
        match async_fs::read_to_string(&self.path).await {
            Ok(content) if content.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(content) => Ok(serde_json::from_str(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    async fn write_all(&self, items: &BTreeMap<String, String>) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            async_fs::create_dir_all(parent).await?;
        }

        let json = serde_json::to_string_pretty(items)?;
        let tmp = self.tmp_path();
        async_fs::write(&tmp, json).await?;
        async_fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl Default for FileStore {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[async_trait]
impl TokenStore for FileStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.read_all().await?.remove(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<(), StoreError> {
        let mut items = self.read_all().await?;
        items.insert(key.to_string(), value.to_string());
        self.write_all(&items).await
    }

    /// An unreadable object is replaced by an empty one, so the key is absent
    /// afterwards either way.
    async fn remove_item(&self, key: &str) -> Result<(), StoreError> {
        let mut items = match self.read_all().await {
            Ok(items) => items,
            Err(StoreError::Serde(e)) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "resetting unreadable token storage"
                );
                return self.write_all(&BTreeMap::new()).await;
            }
            Err(e) => return Err(e),
        };
        if items.remove(key).is_some() {
            self.write_all(&items).await?;
        }
        Ok(())
    }
}
