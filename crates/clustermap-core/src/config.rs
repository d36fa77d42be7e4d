//! Client configuration.
//!
//! Read from `config.json` in the platform config directory, or from an
//! explicit path. Every field has a default, so a missing file is not an
//! error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::debug;

use crate::error::ConfigError;
use crate::fetch::clock::SESSION_REFRESH_INTERVAL;
use crate::scaler::RenderSize;

/// Settings for the live map client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Host-list endpoint (URL or file path)
    pub hosts_url: Option<String>,
    /// Session-list endpoint (URL or file path)
    pub sessions_url: Option<String>,
    /// Seconds between session refreshes
    pub refresh_interval_secs: u64,
    /// Rendered map width; reference width if unset
    pub render_width: Option<i32>,
    /// Rendered map height; reference height if unset
    pub render_height: Option<i32>,
    /// Background map image (path or URL)
    pub map_image: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts_url: None,
            sessions_url: None,
            refresh_interval_secs: SESSION_REFRESH_INTERVAL.as_secs(),
            render_width: None,
            render_height: None,
            map_image: None,
        }
    }
}

impl ClientConfig {
    /// Load from `path`, falling back to defaults if the file does not exist.
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|source| ConfigError::Read {
                path: path.display().to_string(),
                source,
            })?;
        let config: ClientConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "refresh_interval_secs".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }

        for (field, value) in [
            ("render_width", self.render_width),
            ("render_height", self.render_height),
        ] {
            if matches!(value, Some(v) if v <= 0) {
                return Err(ConfigError::InvalidValue {
                    field: field.to_string(),
                    message: "must be positive".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Render size if both extents are set.
    pub fn render_size(&self) -> Option<RenderSize> {
        match (self.render_width, self.render_height) {
            (Some(width), Some(height)) => Some(RenderSize::new(width, height)),
            _ => None,
        }
    }
}

/// Default path of the client config file.
pub fn default_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "clustermap", "clustermap")
        .map(|dirs| dirs.config_dir().join("config.json"))
}
