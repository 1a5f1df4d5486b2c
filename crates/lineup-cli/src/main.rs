//! Lineup CLI Application
//!
//! Admin console for programs, their scheduled executions and the featured
//! show slots of the public upcoming list.

mod args;
mod cli;
mod renderer;

use std::process::ExitCode;

use anyhow::{Context, Result};
use args::{Args, Commands};
use clap::Parser;
use cli::Cli;
use lineup_core::{LineupBuilder, LineupError, OperationStatus};
use log::{error, info};
use renderer::TerminalRenderer;
use Commands::*;

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::init();

    let args = Args::parse();
    let renderer = TerminalRenderer::new(!args.no_color);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            let status = match err.downcast_ref::<LineupError>() {
                Some(lineup_err) => OperationStatus::from(lineup_err),
                None => OperationStatus::failure(format!("{err:#}")),
            };
            renderer.render_error(&status.to_string());
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let Args {
        database_file,
        no_color,
        json,
        capacity_policy,
        command,
    } = args;

    let mut builder = LineupBuilder::new().with_database_path(database_file);
    if let Some(policy) = capacity_policy {
        builder = builder.with_capacity_policy(policy);
    }
    let lineup = builder
        .build()
        .await
        .context("Failed to initialize lineup")?;

    info!("Lineup started");

    let cli = Cli::new(lineup, TerminalRenderer::new(!no_color), json);
    match command {
        Some(Program { command }) => cli.handle_program_command(command).await,
        Some(Execution { command }) => cli.handle_execution_command(command).await,
        Some(Slot { command }) => cli.handle_slot_command(command).await,
        Some(Upcoming { limit }) => cli.show_upcoming(limit).await,
        None => cli.show_upcoming(Default::default()).await,
    }
}
