//! Table-formatted output for CLI.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use clustermap_core::overlay::IconVariant;
use clustermap_core::registry::short_id;
use clustermap_core::scaler::{to_render_position, RenderSize};
use clustermap_core::storage::LayoutInfo;
use clustermap_core::{HostModel, InteractionState, MapView, Position, RenderOutput};

use super::OutputFormatter;

pub struct TableOutput;

impl TableOutput {
    pub fn new() -> Self {
        Self
    }

    fn format_map(view: &MapView) -> String {
        let mut lines = Vec::new();

        if let Some(background) = &view.background {
            lines.push(format!("Map: {} ({}x{})", background, view.width, view.height));
        } else {
            lines.push(format!("Map: {}x{}", view.width, view.height));
        }

        for warning in &view.warnings {
            lines.push(format!("{} {}", "[!]".yellow(), warning.yellow()));
        }

        if view.icons.is_empty() {
            lines.push("No hosts to show.".to_string());
            return lines.join("\n");
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Host", "Label", "Left", "Top", "Size", "Users"]);

        for icon in &view.icons {
            let users = match &icon.variant {
                IconVariant::Active { usernames } => {
                    Cell::new(usernames.join(", ")).fg(Color::Green)
                }
                IconVariant::Empty => Cell::new("-"),
            };
            let label = match icon.state {
                InteractionState::Idle => Cell::new(&icon.label),
                _ => Cell::new(&icon.label).fg(Color::Cyan),
            };

            table.add_row(vec![
                Cell::new(&icon.key),
                label,
                Cell::new(icon.left.to_string()),
                Cell::new(icon.top.to_string()),
                Cell::new(icon.size.to_string()),
                users,
            ]);
        }

        lines.push(table.to_string());
        lines.push(String::new());
        lines.push(format!(
            "{} host(s), {} active",
            view.icons.len(),
            view.active_count().to_string().green()
        ));

        lines.join("\n")
    }
}

impl Default for TableOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TableOutput {
    fn format_render(&self, output: &RenderOutput) -> String {
        match output {
            RenderOutput::Fatal { message } => {
                format!("{} {}", "Map unavailable:".red().bold(), message)
            }
            RenderOutput::Loading => "Loading hosts...".to_string(),
            RenderOutput::SessionsLoading => "Loading sessions...".to_string(),
            RenderOutput::Map(view) => Self::format_map(view),
        }
    }

    fn format_hosts(&self, model: &HostModel, size: RenderSize) -> String {
        if model.is_empty() {
            return "No hosts found.".to_string();
        }

        let settings = &model.map_settings;
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Host", "Label", "Ref Left", "Ref Top", "Left", "Top"]);

        for host in model.all_hosts() {
            let render = to_render_position(host.position, settings, size);
            table.add_row(vec![
                Cell::new(&host.id),
                Cell::new(short_id(&host.id)),
                Cell::new(host.position.left.to_string()),
                Cell::new(host.position.top.to_string()),
                Cell::new(render.left.to_string()),
                Cell::new(render.top.to_string()),
            ]);
        }

        format!(
            "Reference: {}x{} (icons {}/{}), rendered at {}x{}\n{}\n\n{} host(s)",
            settings.reference_width,
            settings.reference_height,
            settings.active_icon_size,
            settings.empty_icon_size,
            size.width,
            size.height,
            table,
            model.len()
        )
    }

    fn format_layouts(&self, layouts: &[LayoutInfo]) -> String {
        if layouts.is_empty() {
            return "No layouts stored.".to_string();
        }

        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec!["Name", "Hosts", "Updated"]);

        for layout in layouts {
            table.add_row(vec![
                Cell::new(&layout.name),
                Cell::new(layout.hosts.to_string()),
                Cell::new(&layout.updated_at),
            ]);
        }

        format!("{}\n\n{} layout(s)", table, layouts.len())
    }

    fn format_move(&self, host: &str, from: Position, to: Position, saved: bool) -> String {
        let status = if saved {
            "saved".green()
        } else {
            "not saved (dry run)".yellow()
        };
        format!(
            "{}: ({}, {}) -> ({}, {}) [{}]",
            host, from.left, from.top, to.left, to.top, status
        )
    }

    fn format_message(&self, message: &str) -> String {
        message.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clustermap_core::{Host, MapSettings};

    #[test]
    fn test_format_fatal() {
        colored::control::set_override(false);
        let out = TableOutput::new().format_render(&RenderOutput::Fatal {
            message: "HTTP 500".to_string(),
        });
        assert_eq!(out, "Map unavailable: HTTP 500");
    }

    #[test]
    fn test_format_hosts_lists_every_host() {
        let model = HostModel::new(
            MapSettings::default(),
            vec![
                Host::new("f1r1s1.codam.nl", Position::new(10, 20)),
                Host::new("f1r1s2.codam.nl", Position::new(30, 40)),
            ],
        );
        let out = TableOutput::new().format_hosts(&model, RenderSize::reference(&model.map_settings));
        assert!(out.contains("f1r1s1.codam.nl"));
        assert!(out.contains("f1r1s2"));
        assert!(out.ends_with("2 host(s)"));
    }

    #[test]
    fn test_format_empty_layouts() {
        assert_eq!(TableOutput::new().format_layouts(&[]), "No layouts stored.");
    }
}
