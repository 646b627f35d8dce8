//! cardsync CLI - reconcile trading card collections from the command line
//!
//! Loads server/client snapshots and pending change queues from JSON files and
//! runs them through the reconciliation engine.

mod cli;
mod commands;
mod config_profiles;
mod error;


use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Commands};
use crate::commands::checksum::run_checksum;
use crate::commands::common::resolve_queue_path;
use crate::commands::compare::run_compare;
use crate::commands::completions::run_completions;
use crate::commands::config::run_config;
use crate::commands::queue::run_queue;
use crate::commands::resolve::{run_resolve, ResolveOptions};
use crate::commands::status::run_status;
use crate::error::CliError;

fn main() {
    if let Err(error) = run() {
        eprintln!("Error: {error}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), CliError> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("cardsync=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Compare { snapshots, json } => run_compare(&snapshots, json)?,
        Commands::Resolve {
            snapshots,
            strategy,
            accept_recommended,
            output,
            json,
        } => {
            let options = ResolveOptions {
                strategy,
                accept_recommended,
                output: output.as_deref(),
                as_json: json,
            };
            run_resolve(&snapshots, &options, profile)?;
        }
        Commands::Status {
            snapshots,
            queue,
            syncing,
            json,
        } => run_status(&snapshots, queue, syncing, json)?,
        Commands::Checksum { paths } => run_checksum(&paths)?,
        Commands::Queue { queue, command } => {
            run_queue(command, &resolve_queue_path(queue), profile)?;
        }
        Commands::Config { command } => run_config(command, profile)?,
        Commands::Completions { shell, output } => {
            run_completions(shell, output.as_deref())?;
        }
    }

    Ok(())
}
