//! Subcommand definitions and their handlers.
//!
//! Each subcommand has a clap `Args` wrapper that converts into the matching
//! core parameter type, so clap attributes never leak into `lineup-core`:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Lineup → Display / JSON
//! ```
//!
//! [`Cli`] runs the core operation and renders its result. Failures are
//! returned to `main`, which renders them as an error status.

use std::fmt::{self, Display};

use anyhow::{Context, Result};
use clap::{Args, Subcommand, ValueEnum};
use jiff::{tz::TimeZone, Timestamp};
use lineup_core::{
    params::*, CreateResult, DeleteResult, Limit, Lineup, UpdateResult,
};
use log::debug;
use serde::Serialize;
use serde_json::json;
use uuid::Uuid;

use crate::renderer::TerminalRenderer;

// ============================================================================
// Program arguments
// ============================================================================

/// Program recurrence accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ProgramTypeArg {
    /// Held every day
    Daily,
    /// Held once a year
    Annually,
}

impl Display for ProgramTypeArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramTypeArg::Daily => write!(f, "daily"),
            ProgramTypeArg::Annually => write!(f, "annually"),
        }
    }
}

/// Program type filter for listing
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum ProgramTypeFilterArg {
    All,
    Daily,
    Annually,
}

impl Display for ProgramTypeFilterArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramTypeFilterArg::All => write!(f, "all"),
            ProgramTypeFilterArg::Daily => write!(f, "daily"),
            ProgramTypeFilterArg::Annually => write!(f, "annually"),
        }
    }
}

/// Create a new program
///
/// The id is derived from the title, the current year and a random suffix
/// unless given explicitly.
#[derive(Args)]
pub struct CreateProgramArgs {
    /// Title of the program
    pub title: String,
    /// Rich-text content, stored as-is
    #[arg(long, default_value = "")]
    pub content: String,
    /// Short plain-text description
    #[arg(short, long, default_value = "")]
    pub description: String,
    /// Image path or URL
    #[arg(long, default_value = "")]
    pub image: String,
    /// How often the program is held
    #[arg(short = 't', long = "type", default_value_t = ProgramTypeArg::Daily)]
    pub program_type: ProgramTypeArg,
    /// Custom URL slug
    #[arg(long)]
    pub custom_url: Option<String>,
    /// Explicit program id
    #[arg(long)]
    pub id: Option<String>,
}

impl From<CreateProgramArgs> for CreateProgram {
    fn from(val: CreateProgramArgs) -> Self {
        let id = val.id.unwrap_or_else(|| generate_program_id(&val.title));
        CreateProgram {
            id,
            title: val.title,
            content: val.content,
            description: val.description,
            image: val.image,
            program_type: Some(val.program_type.to_string()),
            custom_url: val.custom_url,
        }
    }
}

/// List programs
#[derive(Args)]
pub struct ListProgramsArgs {
    /// Only programs of this type
    #[arg(short = 't', long = "type", default_value_t = ProgramTypeFilterArg::All)]
    pub program_type: ProgramTypeFilterArg,
    /// Number of programs to show, or "all"
    #[arg(short, long)]
    pub limit: Option<Limit>,
}

impl From<ListProgramsArgs> for ListPrograms {
    fn from(val: ListProgramsArgs) -> Self {
        ListPrograms {
            program_type: Some(val.program_type.to_string()),
            limit: val.limit,
        }
    }
}

/// Show a program and its executions
#[derive(Args)]
pub struct ShowArgs {
    /// Identifier of the record to show
    pub id: String,
}

impl From<ShowArgs> for Id {
    fn from(val: ShowArgs) -> Self {
        Id { id: val.id }
    }
}

/// Update a program's details
#[derive(Args)]
pub struct UpdateProgramArgs {
    /// ID of the program to update
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub content: Option<String>,
    #[arg(short, long)]
    pub description: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(short = 't', long = "type")]
    pub program_type: Option<ProgramTypeArg>,
    #[arg(long, conflicts_with = "clear_custom_url")]
    pub custom_url: Option<String>,
    /// Remove the custom URL
    #[arg(long)]
    pub clear_custom_url: bool,
}

impl From<UpdateProgramArgs> for UpdateProgram {
    fn from(val: UpdateProgramArgs) -> Self {
        UpdateProgram {
            id: val.id,
            title: val.title,
            content: val.content,
            description: val.description,
            image: val.image,
            program_type: val.program_type.map(|t| t.to_string()),
            custom_url: val.custom_url,
            clear_custom_url: val.clear_custom_url,
        }
    }
}

/// Delete records by id
#[derive(Args)]
pub struct DeleteArgs {
    /// IDs of the records to delete
    #[arg(required = true)]
    pub ids: Vec<String>,
}

impl From<DeleteArgs> for Ids {
    fn from(val: DeleteArgs) -> Self {
        Ids { ids: val.ids }
    }
}

#[derive(Subcommand)]
pub enum ProgramCommands {
    /// Create a new program
    #[command(alias = "c")]
    Create(CreateProgramArgs),
    /// List programs, optionally by type
    #[command(aliases = ["l", "ls"])]
    List(ListProgramsArgs),
    /// List every program; fails when there are none
    All,
    /// Show a program with its executions
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Update a program's details
    #[command(alias = "u")]
    Update(UpdateProgramArgs),
    /// Delete programs and their executions
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Execution arguments
// ============================================================================

/// Execution status accepted on the command line
#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    /// Scheduled and not yet held
    Upcoming,
    /// Already held
    Done,
    /// Called off
    Canceled,
}

impl Display for StatusArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusArg::Upcoming => write!(f, "upcoming"),
            StatusArg::Done => write!(f, "done"),
            StatusArg::Canceled => write!(f, "canceled"),
        }
    }
}

/// Schedule a new execution of a program
#[derive(Args)]
pub struct CreateExecutionArgs {
    /// ID of the program this execution belongs to
    pub program_id: String,
    /// Title shown for this execution
    pub title: String,
    /// Date as RFC 3339 or a local "YYYY-MM-DD[THH:MM]"; omit for "Coming
    /// Soon"
    #[arg(long)]
    pub date: Option<String>,
    #[arg(long)]
    pub image: Option<String>,
    #[arg(short, long)]
    pub status: Option<StatusArg>,
}

impl From<CreateExecutionArgs> for CreateExecution {
    fn from(val: CreateExecutionArgs) -> Self {
        CreateExecution {
            program_id: val.program_id,
            title: val.title,
            image: val.image,
            date: val.date,
            status: val.status.map(|s| s.to_string()),
        }
    }
}

/// Create an upcoming execution copying a program's title and image
#[derive(Args)]
pub struct DeriveExecutionArgs {
    /// ID of the program to derive from
    pub program_id: String,
}

impl From<DeriveExecutionArgs> for Id {
    fn from(val: DeriveExecutionArgs) -> Self {
        Id { id: val.program_id }
    }
}

/// Update an execution's title, image, date or status
#[derive(Args)]
pub struct UpdateExecutionArgs {
    /// ID of the execution to update
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long, conflicts_with = "clear_image")]
    pub image: Option<String>,
    /// Remove the image
    #[arg(long)]
    pub clear_image: bool,
    #[arg(long, conflicts_with = "clear_date")]
    pub date: Option<String>,
    /// Mark the date as not yet decided
    #[arg(long)]
    pub clear_date: bool,
    #[arg(short, long)]
    pub status: Option<StatusArg>,
}

impl From<UpdateExecutionArgs> for UpdateExecution {
    fn from(val: UpdateExecutionArgs) -> Self {
        UpdateExecution {
            id: val.id,
            title: val.title,
            image: val.image,
            clear_image: val.clear_image,
            date: val.date,
            clear_date: val.clear_date,
            status: val.status.map(|s| s.to_string()),
        }
    }
}

/// Set the status of an execution
#[derive(Args)]
pub struct TransitionStatusArgs {
    /// ID of the execution
    pub id: String,
    /// New status
    pub status: StatusArg,
}

impl From<TransitionStatusArgs> for TransitionStatus {
    fn from(val: TransitionStatusArgs) -> Self {
        TransitionStatus {
            id: val.id,
            status: val.status.to_string(),
        }
    }
}

#[derive(Subcommand)]
pub enum ExecutionCommands {
    /// Schedule a new execution
    #[command(alias = "c")]
    Create(CreateExecutionArgs),
    /// Create an upcoming execution from a program
    Derive(DeriveExecutionArgs),
    /// List every execution
    #[command(aliases = ["l", "ls"])]
    List,
    /// Show an execution
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Update an execution
    #[command(alias = "u")]
    Update(UpdateExecutionArgs),
    /// Set the status of an execution
    Status(TransitionStatusArgs),
    /// Delete executions
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
}

// ============================================================================
// Slot arguments
// ============================================================================

/// List the featured executions
#[derive(Args)]
pub struct ListFeaturedArgs {
    /// Number of entries, or "all"
    #[arg(short, long, default_value_t = Limit::default())]
    pub limit: Limit,
}

impl From<ListFeaturedArgs> for ListFeatured {
    fn from(val: ListFeaturedArgs) -> Self {
        ListFeatured { limit: val.limit }
    }
}

/// Exchange the show slots of two executions
#[derive(Args)]
pub struct SwapSlotsArgs {
    pub first_id: String,
    pub second_id: String,
}

impl From<SwapSlotsArgs> for SwapSlots {
    fn from(val: SwapSlotsArgs) -> Self {
        SwapSlots {
            first_id: val.first_id,
            second_id: val.second_id,
        }
    }
}

/// Replace the featured list
#[derive(Args)]
pub struct ReorderArgs {
    /// Execution ids in slot order; every other execution is unfeatured
    pub ids: Vec<String>,
}

impl From<ReorderArgs> for ReorderFeatured {
    fn from(val: ReorderArgs) -> Self {
        ReorderFeatured { ids: val.ids }
    }
}

#[derive(Subcommand)]
pub enum SlotCommands {
    /// Feature an execution in the next free slot
    #[command(alias = "a")]
    Add(ShowArgs),
    /// Remove an execution from the featured list
    #[command(aliases = ["r", "rm"])]
    Remove(ShowArgs),
    /// List the featured executions in slot order
    #[command(aliases = ["l", "ls"])]
    List(ListFeaturedArgs),
    /// Exchange the slots of two executions
    #[command(alias = "sw")]
    Swap(SwapSlotsArgs),
    /// Replace the featured list with the given executions
    Reorder(ReorderArgs),
}

/// Builds a program id of the form `{title_with_underscores}-{year}-{uuid}`.
pub fn generate_program_id(title: &str) -> String {
    let year = Timestamp::now().to_zoned(TimeZone::system()).year();
    format!("{}-{}-{}", title.trim().replace(' ', "_"), year, Uuid::new_v4())
}

// ============================================================================
// Handlers
// ============================================================================

/// Runs subcommands against a [`Lineup`] and renders their results.
pub struct Cli {
    lineup: Lineup,
    renderer: TerminalRenderer,
    json: bool,
}

impl Cli {
    pub fn new(lineup: Lineup, renderer: TerminalRenderer, json: bool) -> Self {
        Self {
            lineup,
            renderer,
            json,
        }
    }

    /// Renders `view` as markdown, or `data` as pretty JSON.
    fn output<V: Display, D: Serialize + ?Sized>(&self, view: &V, data: &D) -> Result<()> {
        if self.json {
            let text = serde_json::to_string_pretty(data).context("Failed to encode JSON")?;
            println!("{text}");
            Ok(())
        } else {
            self.renderer.render(&view.to_string())
        }
    }

    pub async fn handle_program_command(&self, command: ProgramCommands) -> Result<()> {
        match command {
            ProgramCommands::Create(args) => {
                let program = self.lineup.create_program(&args.into()).await?;
                self.output(&CreateResult::new(program.clone()), &program)
            }
            ProgramCommands::List(args) => {
                let programs = self.lineup.list_programs(&args.into()).await?;
                self.output(&programs, &programs)
            }
            ProgramCommands::All => {
                let programs = self.lineup.list_all_programs().await?;
                self.output(&programs, &programs)
            }
            ProgramCommands::Show(args) => {
                let program = self.lineup.get_program(&args.into()).await?;
                self.output(&program, &program)
            }
            ProgramCommands::Update(args) => {
                let program = self.lineup.update_program(&args.into()).await?;
                self.output(&UpdateResult::new(program.clone()), &program)
            }
            ProgramCommands::Delete(args) => {
                let deleted = self.lineup.delete_programs(&args.into()).await?;
                self.output(
                    &DeleteResult::new("programs", deleted),
                    &json!({ "deleted": deleted }),
                )
            }
        }
    }

    pub async fn handle_execution_command(&self, command: ExecutionCommands) -> Result<()> {
        match command {
            ExecutionCommands::Create(args) => {
                let execution = self.lineup.create_execution(&args.into()).await?;
                self.output(&CreateResult::new(execution.clone()), &execution)
            }
            ExecutionCommands::Derive(args) => {
                let execution = self.lineup.derive_execution(&args.into()).await?;
                self.output(&CreateResult::new(execution.clone()), &execution)
            }
            ExecutionCommands::List => {
                let executions = self.lineup.list_all().await?;
                self.output(&executions, &executions)
            }
            ExecutionCommands::Show(args) => {
                let execution = self.lineup.get_execution(&args.into()).await?;
                self.output(&execution, &execution)
            }
            ExecutionCommands::Update(args) => {
                let params: UpdateExecution = args.into();
                let changes = params.changes();
                debug!("Updating execution {} ({} change(s))", params.id, changes.len());
                let execution = self.lineup.update_execution(&params).await?;
                self.output(
                    &UpdateResult::with_changes(execution.clone(), changes),
                    &execution,
                )
            }
            ExecutionCommands::Status(args) => {
                let params: TransitionStatus = args.into();
                let changes = vec![format!("Status: {}", params.status)];
                let execution = self.lineup.transition_status(&params).await?;
                self.output(
                    &UpdateResult::with_changes(execution.clone(), changes),
                    &execution,
                )
            }
            ExecutionCommands::Delete(args) => {
                let deleted = self.lineup.delete_executions(&args.into()).await?;
                self.output(
                    &DeleteResult::new("upcoming programs", deleted),
                    &json!({ "deleted": deleted }),
                )
            }
        }
    }

    pub async fn handle_slot_command(&self, command: SlotCommands) -> Result<()> {
        match command {
            SlotCommands::Add(args) => {
                let allocation = self.lineup.allocate_slot(&args.into()).await?;
                self.output(&allocation, &allocation)
            }
            SlotCommands::Remove(args) => {
                let execution = self.lineup.clear_slot(&args.into()).await?;
                self.output(
                    &UpdateResult::with_changes(
                        execution.clone(),
                        vec!["Show order: not shown".to_string()],
                    ),
                    &execution,
                )
            }
            SlotCommands::List(args) => {
                let featured = self.lineup.list_featured(&args.into()).await?;
                self.output(&featured, &featured)
            }
            SlotCommands::Swap(args) => {
                let swapped = self.lineup.swap_slots(&args.into()).await?;
                self.output(&swapped, &swapped)
            }
            SlotCommands::Reorder(args) => {
                let featured = self.lineup.reorder_featured(&args.into()).await?;
                self.output(&featured, &featured)
            }
        }
    }

    pub async fn show_upcoming(&self, limit: Limit) -> Result<()> {
        let upcoming = self
            .lineup
            .list_upcoming_public(&ListUpcoming { limit })
            .await?;
        self.output(&upcoming, &upcoming)
    }
}
