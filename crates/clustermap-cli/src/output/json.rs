//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use clustermap_core::registry::short_id;
use clustermap_core::scaler::{to_render_position, RenderSize};
use clustermap_core::storage::LayoutInfo;
use clustermap_core::{HostModel, Position, RenderOutput};

use super::OutputFormatter;

pub struct JsonOutput;

impl JsonOutput {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for JsonOutput {
    fn format_render(&self, output: &RenderOutput) -> String {
        Self::to_json(output)
    }

    fn format_hosts(&self, model: &HostModel, size: RenderSize) -> String {
        let hosts: Vec<Value> = model
            .all_hosts()
            .into_iter()
            .map(|host| {
                let render = to_render_position(host.position, &model.map_settings, size);
                json!({
                    "hostname": host.id,
                    "label": short_id(&host.id),
                    "reference": host.position,
                    "render": render,
                })
            })
            .collect();

        Self::to_json(&json!({
            "mapsettings": model.map_settings,
            "render": size,
            "hosts": hosts,
            "count": model.len()
        }))
    }

    fn format_layouts(&self, layouts: &[LayoutInfo]) -> String {
        Self::to_json(&json!({
            "layouts": layouts,
            "count": layouts.len()
        }))
    }

    fn format_move(&self, host: &str, from: Position, to: Position, saved: bool) -> String {
        Self::to_json(&json!({
            "hostname": host,
            "from": from,
            "to": to,
            "saved": saved
        }))
    }

    fn format_message(&self, message: &str) -> String {
        Self::to_json(&json!({ "message": message }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustermap_core::{Host, MapSettings};

    #[test]
    fn test_format_hosts() {
        let model = HostModel::new(
            MapSettings::new(100, 200, 10, 4).unwrap(),
            vec![Host::new("f1r1s1.codam.nl", Position::new(100, 50))],
        );
        let out = JsonOutput::new().format_hosts(&model, RenderSize::new(100, 50));
        let value: Value = serde_json::from_str(&out).unwrap();

        assert_eq!(value["count"], 1);
        assert_eq!(value["hosts"][0]["label"], "f1r1s1");
        assert_eq!(value["hosts"][0]["render"]["left"], 50);
        assert_eq!(value["hosts"][0]["render"]["top"], 25);
    }

    #[test]
    fn test_format_render_is_tagged() {
        let out = JsonOutput::new().format_render(&RenderOutput::SessionsLoading);
        let value: Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["status"], "sessions_loading");
    }
}
