//! Cluster map CLI - live "who is where" map and layout editor.
//!
//! Renders the live session map in the terminal and edits stored host
//! layouts.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;

use cli::{Cli, Commands};
use error::{exit_codes, CliError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init_logging(cli.verbose);

    let result = run(cli).await;

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let config = cli.config.as_deref();

    match cli.command {
        Commands::Render(args) => commands::run_render(args, config, cli.json).await,
        Commands::Watch(args) => commands::run_watch(args, config, cli.json).await,
        Commands::Hosts(args) => commands::run_hosts(args, cli.json).await,
        Commands::Layout(args) => commands::run_layout(args, cli.layout_dir, cli.json).await,
        Commands::Move(args) => commands::run_move(args, cli.layout_dir, cli.json).await,
    }
}
