//! Storage services for editor layouts.

pub mod layout;

pub use layout::{LayoutInfo, LayoutStorage, StoredLayout};

/// Get the default data directory for cluster map tools.
///
/// Uses the `directories` crate to find the appropriate platform-specific
/// data directory.
pub fn default_data_dir() -> Option<std::path::PathBuf> {
    directories::ProjectDirs::from("", "clustermap", "clustermap")
        .map(|dirs| dirs.data_dir().to_path_buf())
}

/// Default directory for stored layouts.
pub fn default_layout_dir() -> Option<std::path::PathBuf> {
    default_data_dir().map(|dir| dir.join("layouts"))
}
