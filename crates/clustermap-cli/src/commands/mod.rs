//! Command implementations.

pub mod edit;
pub mod hosts;
pub mod layout;
pub mod render;

pub use edit::run_move;
pub use hosts::run_hosts;
pub use layout::run_layout;
pub use render::{run_render, run_watch};

use std::path::{Path, PathBuf};

use clustermap_core::config::{default_config_path, ClientConfig};
use clustermap_core::scaler::RenderSize;
use clustermap_core::storage::{default_layout_dir, LayoutStorage};
use clustermap_core::MapSettings;

use crate::cli::SizeArgs;
use crate::error::CliError;

/// Load the client config from `path`, or from the platform default.
pub async fn load_config(path: Option<&Path>) -> Result<ClientConfig, CliError> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match default_config_path() {
            Some(p) => p,
            None => return Ok(ClientConfig::default()),
        },
    };
    Ok(ClientConfig::load(&path).await?)
}

/// Open layout storage at `dir`, or at the platform default.
pub fn create_layout_storage(dir: Option<PathBuf>) -> Result<LayoutStorage, CliError> {
    let dir = match dir {
        Some(d) => d,
        None => default_layout_dir().ok_or_else(|| {
            CliError::Other("Could not determine app data directory".to_string())
        })?,
    };
    Ok(LayoutStorage::new(dir)?)
}

/// Resolve the rendered size: flags first, then the fallback, then the
/// reference size of `settings`.
pub fn resolve_size(
    args: &SizeArgs,
    fallback: Option<RenderSize>,
    settings: &MapSettings,
) -> RenderSize {
    let base = fallback.unwrap_or_else(|| RenderSize::reference(settings));
    RenderSize::new(
        args.width.unwrap_or(base.width),
        args.height.unwrap_or(base.height),
    )
}
