//! Hosts command implementation.

use tokio::fs;

use clustermap_core::registry::load;

use super::resolve_size;
use crate::cli::HostsArgs;
use crate::error::CliError;
use crate::output::get_formatter;

/// Run the hosts command
pub async fn run_hosts(args: HostsArgs, json: bool) -> Result<(), CliError> {
    let formatter = get_formatter(json);

    let content = fs::read_to_string(&args.file).await?;
    let model = load(&content)?;
    let size = resolve_size(&args.size, None, &model.map_settings);

    println!("{}", formatter.format_hosts(&model, size));

    Ok(())
}
