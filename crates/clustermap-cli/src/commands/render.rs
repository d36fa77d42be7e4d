//! Render and watch commands implementation.

use std::io::{self, Write};
use std::ops::ControlFlow;
use std::path::Path;
use std::time::Duration;

use chrono::Local;
use colored::*;
use regex::Regex;
use tracing::{debug, info, warn};

use clustermap_core::config::ClientConfig;
use clustermap_core::fetch::{manual_ticker, Endpoint, EndpointSource, IntervalTicker, Monitor};
use clustermap_core::scaler::RenderSize;
use clustermap_core::{LiveMap, RenderOutput};

use super::load_config;
use crate::cli::{RenderArgs, WatchArgs};
use crate::error::CliError;
use crate::output::{get_formatter, OutputFormatter};

/// Map settings resolved from config file and flags.
struct MapTarget {
    source: EndpointSource,
    size: Option<RenderSize>,
    background: Option<String>,
    filter: Option<Regex>,
    interval: Duration,
}

impl MapTarget {
    fn resolve(args: RenderArgs, config: ClientConfig) -> Result<Self, CliError> {
        let hosts = args.hosts.or(config.hosts_url.clone()).ok_or_else(|| {
            CliError::InvalidArgument(
                "No host source: pass --hosts or set hosts_url in the config".to_string(),
            )
        })?;

        // Without a session source every host is drawn empty.
        let sessions = match args.sessions.or(config.sessions_url.clone()) {
            Some(target) => Endpoint::parse(&target),
            None => {
                warn!("No session source configured, showing all hosts as empty");
                Endpoint::Inline("[]".to_string())
            }
        };

        let width = args.size.width.or(config.render_width);
        let height = args.size.height.or(config.render_height);
        let size = match (width, height) {
            (Some(w), Some(h)) => Some(RenderSize::new(w, h)),
            (None, None) => None,
            _ => {
                warn!("Render size needs both width and height, using the reference size");
                None
            }
        };

        let filter = args
            .filter
            .as_deref()
            .map(Regex::new)
            .transpose()
            .map_err(|e| CliError::InvalidArgument(format!("Invalid filter: {}", e)))?;

        let source = EndpointSource::new(Endpoint::parse(&hosts), sessions)?;
        debug!(hosts = %source.hosts_endpoint(), sessions = %source.sessions_endpoint(), "Resolved sources");

        Ok(Self {
            source,
            size,
            background: args.map_image.or(config.map_image.clone()),
            filter,
            interval: config.refresh_interval(),
        })
    }
}

/// Keep only icons whose host id matches `filter`.
fn apply_filter(output: &RenderOutput, filter: Option<&Regex>) -> RenderOutput {
    match (output, filter) {
        (RenderOutput::Map(view), Some(re)) => {
            let mut view = view.clone();
            view.icons.retain(|icon| re.is_match(&icon.key));
            RenderOutput::Map(view)
        }
        _ => output.clone(),
    }
}

/// Run the render command: fetch once, print, exit.
pub async fn run_render(
    args: RenderArgs,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let config = load_config(config_path).await?;
    let target = MapTarget::resolve(args, config)?;

    // The tick handle is dropped right away; one-shot renders never refresh.
    let (_, ticker) = manual_ticker();
    let mut monitor = Monitor::new(
        target.source,
        ticker,
        LiveMap::new(target.size, target.background),
    );

    let mut last = RenderOutput::Loading;
    monitor
        .run(|output| match output {
            RenderOutput::Fatal { .. } | RenderOutput::Map(_) => {
                last = output.clone();
                ControlFlow::Break(())
            }
            _ => ControlFlow::Continue(()),
        })
        .await;

    println!(
        "{}",
        formatter.format_render(&apply_filter(&last, target.filter.as_ref()))
    );

    match last {
        RenderOutput::Fatal { message } => Err(CliError::MapUnavailable(message)),
        _ => Ok(()),
    }
}

/// Run the watch command: redraw after every update until Ctrl+C.
pub async fn run_watch(
    args: WatchArgs,
    config_path: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let formatter = get_formatter(json);
    let config = load_config(config_path).await?;
    let target = MapTarget::resolve(args.render, config)?;
    let interval = args
        .interval
        .map(Duration::from_secs)
        .unwrap_or(target.interval);

    info!(interval_secs = interval.as_secs(), "Watching cluster map");

    let filter = target.filter;
    let mut monitor = Monitor::new(
        target.source,
        IntervalTicker::new(interval),
        LiveMap::new(target.size, target.background),
    );

    let redraw = |output: &RenderOutput| {
        draw(formatter.as_ref(), &apply_filter(output, filter.as_ref()), json);
        ControlFlow::Continue(())
    };

    tokio::select! {
        _ = monitor.run(redraw) => {}
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted");
        }
    }

    Ok(())
}

fn draw(formatter: &dyn OutputFormatter, output: &RenderOutput, json: bool) {
    if json {
        // One document per update so the stream can be piped.
        println!("{}", formatter.format_render(output));
    } else {
        print!("\x1B[2J\x1B[1;1H");
        println!("{}", "Cluster Map Watch".bold());
        println!(
            "{}",
            format!(
                "Updated {} - press Ctrl+C to stop",
                Local::now().format("%H:%M:%S")
            )
            .dimmed()
        );
        println!();
        println!("{}", formatter.format_render(output));
    }

    io::stdout().flush().ok();
}
