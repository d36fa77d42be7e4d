//! Stored editor layouts.
//!
//! Files hold the canonical export document, so any stored layout can be
//! loaded back as a host source.

use crate::error::StorageError;
use crate::export;
use crate::registry::load;
use crate::types::HostModel;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::Serialize;
use std::path::PathBuf;
use tokio::fs;
use tracing::debug;

/// Regex for valid layout names: alphanumeric, dash, underscore only
const NAME_PATTERN: &str = r"^[a-zA-Z0-9_-]+$";

/// Maximum name length
const MAX_NAME_LENGTH: usize = 64;

/// Metadata of a stored layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutInfo {
    pub name: String,
    pub hosts: usize,
    pub created_at: String,
    pub updated_at: String,
}

/// A stored layout and its metadata.
#[derive(Debug, Clone)]
pub struct StoredLayout {
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
    pub model: HostModel,
}

/// Named layouts, one `<name>.json` export document each.
pub struct LayoutStorage {
    layout_dir: PathBuf,
    name_regex: Regex,
}

impl LayoutStorage {
    /// Open storage rooted at `dir`, creating it if needed.
    pub fn new(dir: PathBuf) -> Result<Self, StorageError> {
        std::fs::create_dir_all(&dir).map_err(|e| {
            StorageError::DirectoryAccess(format!("{}: {}", dir.display(), e))
        })?;

        let name_regex = Regex::new(NAME_PATTERN)
            .map_err(|e| StorageError::InvalidName(format!("Bad name pattern: {}", e)))?;

        Ok(Self {
            layout_dir: dir,
            name_regex,
        })
    }

    fn validate_name(&self, name: &str) -> Result<(), StorageError> {
        let problem = if name.is_empty() {
            "layout name is empty".to_string()
        } else if name.len() > MAX_NAME_LENGTH {
            format!("layout name is longer than {} characters", MAX_NAME_LENGTH)
        } else if !self.name_regex.is_match(name) {
            format!("layout name '{}' may only use letters, digits, '-' and '_'", name)
        } else {
            return Ok(());
        };
        Err(StorageError::InvalidName(problem))
    }

    fn layout_path(&self, name: &str) -> PathBuf {
        self.layout_dir.join(name).with_extension("json")
    }

    /// List all stored layouts. Unreadable files are skipped.
    pub async fn list(&self) -> Result<Vec<LayoutInfo>, StorageError> {
        let mut layouts = Vec::new();
        let mut entries = fs::read_dir(&self.layout_dir)
            .await
            .map_err(StorageError::Io)?;

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();

            if path.extension().and_then(|s| s.to_str()) != Some("json") {
                continue;
            }

            let name = match path.file_stem().and_then(|s| s.to_str()) {
                Some(n) => n.to_string(),
                None => continue,
            };

            if self.validate_name(&name).is_err() {
                continue;
            }

            match self.read(&name).await {
                Ok(Some(layout)) => layouts.push(LayoutInfo {
                    name: layout.name,
                    hosts: layout.model.len(),
                    created_at: layout.created_at,
                    updated_at: layout.updated_at,
                }),
                Ok(None) => continue,
                Err(e) => {
                    debug!(layout = %name, error = %e, "Skipping unreadable layout");
                    continue;
                }
            }
        }

        layouts.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(layouts)
    }

    /// Read a layout by name.
    pub async fn read(&self, name: &str) -> Result<Option<StoredLayout>, StorageError> {
        self.validate_name(name)?;

        let path = self.layout_path(name);

        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path).await.map_err(StorageError::Io)?;
        let model = load(&content).map_err(|source| StorageError::Corrupt {
            name: name.to_string(),
            source,
        })?;

        let metadata = fs::metadata(&path).await.map_err(StorageError::Io)?;
        let timestamp = |t: std::io::Result<std::time::SystemTime>| {
            t.map(|t| DateTime::<Utc>::from(t).to_rfc3339())
                .unwrap_or_default()
        };

        Ok(Some(StoredLayout {
            name: name.to_string(),
            created_at: timestamp(metadata.created()),
            updated_at: timestamp(metadata.modified()),
            model,
        }))
    }

    /// Save a layout, replacing any layout with the same name.
    pub async fn save(&self, name: &str, model: &HostModel) -> Result<(), StorageError> {
        self.validate_name(name)?;

        let path = self.layout_path(name);
        let content = export::serialize(model).map_err(StorageError::Serialization)?;

        fs::write(&path, content).await.map_err(StorageError::Io)?;
        debug!(layout = name, hosts = model.len(), "Layout saved");

        Ok(())
    }

    /// Delete a layout. Deleting a missing layout is `NotFound`.
    pub async fn delete(&self, name: &str) -> Result<(), StorageError> {
        self.validate_name(name)?;

        match fs::remove_file(self.layout_path(name)).await {
            Ok(()) => {
                debug!(layout = name, "Layout deleted");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StorageError::NotFound(name.to_string()))
            }
            Err(e) => Err(StorageError::Io(e)),
        }
    }
}
