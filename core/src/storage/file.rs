use super::PreferenceStore;
use crate::error::PreferenceError;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// [`PreferenceStore`] backed by one JSON object on disk.
///
/// The document is loaded lazily on first access and every set rewrites it
/// through a temporary sibling file followed by a rename, so a crash mid-write
/// leaves the previous document intact.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    document: Mutex<Option<Map<String, Value>>>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            document: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self, key: &str) -> Result<Map<String, Value>, PreferenceError> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "Preference file {} does not exist yet, starting empty",
                    self.path.display()
                );
                return Ok(Map::new());
            }
            Err(e) => {
                return Err(PreferenceError::Read {
                    key: key.to_string(),
                    reason: format!("{}: {e}", self.path.display()),
                });
            }
        };

        if contents.trim().is_empty() {
            return Ok(Map::new());
        }

        match serde_json::from_str::<Value>(&contents) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(_) => Err(PreferenceError::Serialization {
                key: key.to_string(),
                reason: format!("{} does not contain a JSON object", self.path.display()),
            }),
            Err(e) => Err(PreferenceError::Serialization {
                key: key.to_string(),
                reason: format!("{}: {e}", self.path.display()),
            }),
        }
    }

    async fn persist(&self, key: &str, document: &Map<String, Value>) -> Result<(), PreferenceError> {
        let write_error = |reason: String| PreferenceError::Write {
            key: key.to_string(),
            reason,
        };

        let serialized =
            serde_json::to_vec_pretty(document).map_err(|e| PreferenceError::Serialization {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| write_error(format!("{}: {e}", parent.display())))?;
        }

        let mut temp_path = self.path.clone().into_os_string();
        temp_path.push(".tmp");
        let temp_path = PathBuf::from(temp_path);

        tokio::fs::write(&temp_path, serialized)
            .await
            .map_err(|e| write_error(format!("{}: {e}", temp_path.display())))?;
        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| write_error(format!("{}: {e}", self.path.display())))?;

        Ok(())
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get_object(&self, key: &str) -> Result<Option<Value>, PreferenceError> {
        let mut document = self.document.lock().await;
        if document.is_none() {
            *document = Some(self.load(key).await?);
        }
        Ok(document.as_ref().and_then(|map| map.get(key).cloned()))
    }

    async fn set_object(&self, key: &str, value: Value) -> Result<(), PreferenceError> {
        let mut document = self.document.lock().await;
        let mut updated = match document.take() {
            Some(map) => map,
            None => self.load(key).await?,
        };
        let previous = updated.insert(key.to_string(), value);

        match self.persist(key, &updated).await {
            Ok(()) => {
                *document = Some(updated);
                Ok(())
            }
            Err(e) => {
                // Keep memory in step with what is on disk.
                match previous {
                    Some(previous) => updated.insert(key.to_string(), previous),
                    None => updated.remove(key),
                };
                *document = Some(updated);
                Err(e)
            }
        }
    }
}
