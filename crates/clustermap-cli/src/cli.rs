//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Cluster map - live "who is where" map and layout editor
#[derive(Parser, Debug)]
#[command(name = "clustermap")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Config file (default: platform config dir)
    #[arg(long, global = true, env = "CLUSTERMAP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory for stored layouts (default: platform data dir)
    #[arg(long, global = true, env = "CLUSTERMAP_LAYOUT_DIR")]
    pub layout_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch hosts and sessions once and print the map
    Render(RenderArgs),

    /// Keep the map up to date, refreshing sessions periodically
    Watch(WatchArgs),

    /// Decode a host source and show where each host lands
    Hosts(HostsArgs),

    /// Stored layout management
    Layout(LayoutArgs),

    /// Move a host in a stored layout
    Move(MoveArgs),
}

// ==================== Render / Watch ====================

/// Rendered map size overrides
#[derive(Args, Debug, Clone)]
pub struct SizeArgs {
    /// Rendered map width in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub width: Option<i32>,

    /// Rendered map height in pixels
    #[arg(long, value_parser = clap::value_parser!(i32).range(1..))]
    pub height: Option<i32>,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Host source: URL or JSON file
    #[arg(long, env = "CLUSTERMAP_HOSTS")]
    pub hosts: Option<String>,

    /// Session source: URL or JSON file
    #[arg(long, env = "CLUSTERMAP_SESSIONS")]
    pub sessions: Option<String>,

    /// Background map image (path or URL)
    #[arg(long)]
    pub map_image: Option<String>,

    /// Only show hosts whose id matches this regex
    #[arg(long)]
    pub filter: Option<String>,

    #[command(flatten)]
    pub size: SizeArgs,
}

#[derive(Args, Debug)]
pub struct WatchArgs {
    #[command(flatten)]
    pub render: RenderArgs,

    /// Session refresh interval in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub interval: Option<u64>,
}

// ==================== Hosts ====================

#[derive(Args, Debug)]
pub struct HostsArgs {
    /// Host source JSON file
    pub file: PathBuf,

    #[command(flatten)]
    pub size: SizeArgs,
}

// ==================== Layout ====================

#[derive(Args, Debug)]
pub struct LayoutArgs {
    #[command(subcommand)]
    pub command: LayoutCommands,
}

#[derive(Subcommand, Debug)]
pub enum LayoutCommands {
    /// Import a host source file as a stored layout
    Import(LayoutImportArgs),

    /// List stored layouts
    List,

    /// Show the hosts of a stored layout
    Show(LayoutShowArgs),

    /// Write a stored layout in the canonical export format
    Export(LayoutExportArgs),

    /// Delete a stored layout
    Delete(LayoutDeleteArgs),
}

#[derive(Args, Debug)]
pub struct LayoutImportArgs {
    /// Host source JSON file (any accepted shape)
    pub file: PathBuf,

    /// Layout name
    #[arg(short, long)]
    pub name: String,
}

#[derive(Args, Debug)]
pub struct LayoutShowArgs {
    /// Layout name
    pub name: String,

    /// Background map image (path or URL)
    #[arg(long)]
    pub map_image: Option<String>,

    #[command(flatten)]
    pub size: SizeArgs,
}

#[derive(Args, Debug)]
pub struct LayoutDeleteArgs {
    /// Layout name
    pub name: String,
}

#[derive(Args, Debug)]
pub struct LayoutExportArgs {
    /// Layout name
    pub name: String,

    /// Output file (default: stdout)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

// ==================== Move ====================

/// One pointer movement
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Delta {
    pub dx: f64,
    pub dy: f64,
}

fn parse_delta(s: &str) -> Result<Delta, String> {
    let (dx, dy) = s
        .split_once(',')
        .ok_or_else(|| format!("expected DX,DY, got '{}'", s))?;
    let parse = |v: &str| {
        v.trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .ok_or_else(|| format!("'{}' is not a number", v))
    };
    Ok(Delta {
        dx: parse(dx)?,
        dy: parse(dy)?,
    })
}

#[derive(Args, Debug)]
pub struct MoveArgs {
    /// Stored layout name
    pub layout: String,

    /// Full host id
    pub host: String,

    /// Pointer delta DX,DY; repeat to accumulate
    #[arg(long = "by", required = true, allow_hyphen_values = true, value_parser = parse_delta)]
    pub by: Vec<Delta>,

    /// Print the result without saving
    #[arg(long)]
    pub dry_run: bool,
}
