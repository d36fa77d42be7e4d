//! Output formatting for CLI results.

pub mod json;
pub mod table;

pub use json::JsonOutput;
pub use table::TableOutput;

use clustermap_core::scaler::RenderSize;
use clustermap_core::storage::LayoutInfo;
use clustermap_core::{HostModel, Position, RenderOutput};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format a live map render
    fn format_render(&self, output: &RenderOutput) -> String;

    /// Format the hosts of a model with their render positions
    fn format_hosts(&self, model: &HostModel, size: RenderSize) -> String;

    /// Format stored layout list
    fn format_layouts(&self, layouts: &[LayoutInfo]) -> String;

    /// Format the outcome of a drag gesture
    fn format_move(&self, host: &str, from: Position, to: Position, saved: bool) -> String;

    /// Format a generic message
    fn format_message(&self, message: &str) -> String;
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput::new())
    } else {
        Box::new(TableOutput::new())
    }
}
