use std::path::PathBuf;

use clap::{Parser, Subcommand};
use lineup_core::{CapacityPolicy, Limit};

use crate::cli::{ExecutionCommands, ProgramCommands, SlotCommands};

/// Admin console for programs and their featured upcoming executions
///
/// Lineup schedules executions of recurring or annual programs and keeps a
/// short, ordered list of featured executions for the public "upcoming"
/// page. Without a subcommand it prints that public list.
#[derive(Parser)]
#[command(version, about, name = "lineup")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/lineup/lineup.db
    #[arg(long, global = true, env = "LINEUP_DATABASE")]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// When the featured list counts as full: "count-based" (default,
    /// reuses freed slots) or "max-order-based" (appends after the highest
    /// slot)
    #[arg(long, global = true, env = "LINEUP_CAPACITY_POLICY")]
    pub capacity_policy: Option<CapacityPolicy>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands for the Lineup CLI
#[derive(Subcommand)]
pub enum Commands {
    /// Manage programs
    #[command(alias = "p")]
    Program {
        #[command(subcommand)]
        command: ProgramCommands,
    },
    /// Manage scheduled executions of programs
    #[command(alias = "e")]
    Execution {
        #[command(subcommand)]
        command: ExecutionCommands,
    },
    /// Manage the featured show slots
    #[command(alias = "s")]
    Slot {
        #[command(subcommand)]
        command: SlotCommands,
    },
    /// Show the public upcoming list
    #[command(alias = "u")]
    Upcoming {
        /// Number of entries, or "all"
        #[arg(short, long, default_value_t = Limit::default())]
        limit: Limit,
    },
}
