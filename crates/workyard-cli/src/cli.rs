use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use workyard::core::models::piece::Rotation;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Workyard Planner contributors",
    version,
    about = "Workyard CLI - Plan Graveyard Keeper workstation layouts on location grids, with placement validated against bounds, buildable areas, occupancy and rotation.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    #[command(flatten)]
    pub plan: PlanArgs,
}

/// Options that select the plan, its grid and its catalog.
#[derive(Args, Debug, Clone, Default)]
pub struct PlanArgs {
    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// The plan to edit. Can be a path or a logical name (e.g., 'morgue-v2')
    /// stored in the data directory.
    #[arg(long, global = true, value_name = "NAME_OR_PATH")]
    pub plan: Option<String>,

    /// Use the fixed grid of a game location (workyard, garden, morgue).
    #[arg(long, global = true, value_name = "NAME")]
    pub location: Option<String>,

    /// Build the grid from an area layout file (.toml, or legacy .json).
    #[arg(long, global = true, value_name = "PATH")]
    pub areas: Option<PathBuf>,

    /// Use a piece catalog file instead of the built-in workstation list.
    #[arg(long, global = true, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// How saved placements that no longer fit are handled: trust, drop-invalid or reject.
    #[arg(long, global = true, value_name = "POLICY")]
    pub load_policy: Option<String>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S grid.location=garden
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the placeable piece types.
    Catalog(CatalogArgs),
    /// Render the grid and list the placed instances.
    Show,
    /// Preview a placement and report whether it is legal, without changing the plan.
    Check(PlacementArgs),
    /// Place a new piece and save the plan.
    Place(PlacementArgs),
    /// Move a placed instance and save the plan.
    Move(MoveArgs),
    /// Toggle a placed instance between 0 and 90 degrees and save the plan.
    Rotate(TargetArgs),
    /// Remove a placed instance and save the plan.
    Remove(TargetArgs),
    /// Manage the local data directory where named plans are stored.
    Data(DataArgs),
}

/// Arguments for the `catalog` subcommand.
#[derive(Args, Debug, Clone, Copy)]
pub struct CatalogArgs {
    /// List every piece, even when a location is selected.
    #[arg(long)]
    pub all: bool,
}

/// A piece type and the cell its top-left corner should cover.
#[derive(Args, Debug, Clone)]
pub struct PlacementArgs {
    /// Catalog id of the piece (e.g., 'stone_cutter').
    pub piece: String,

    /// Column of the top-left cell.
    #[arg(allow_negative_numbers = true)]
    pub x: i32,

    /// Row of the top-left cell.
    #[arg(allow_negative_numbers = true)]
    pub y: i32,

    /// Rotation in degrees (0 or 90).
    #[arg(short, long, value_name = "DEG", default_value = "0")]
    pub rotation: Rotation,
}

/// Arguments for the `move` subcommand.
#[derive(Args, Debug, Clone)]
pub struct MoveArgs {
    /// Index of the instance, as listed by `show` (starting at 1).
    pub index: usize,

    #[arg(allow_negative_numbers = true)]
    pub x: i32,

    #[arg(allow_negative_numbers = true)]
    pub y: i32,

    /// New rotation in degrees. Keeps the current rotation if omitted.
    #[arg(short, long, value_name = "DEG")]
    pub rotation: Option<Rotation>,

    /// Only preview the move.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments naming one placed instance.
#[derive(Args, Debug, Clone, Copy)]
pub struct TargetArgs {
    /// Index of the instance, as listed by `show` (starting at 1).
    pub index: usize,
}

/// Arguments for the `data` subcommand.
#[derive(Args, Debug)]
pub struct DataArgs {
    #[command(subcommand)]
    pub command: DataCommands,
}

/// Available commands for data management.
#[derive(Subcommand, Debug)]
pub enum DataCommands {
    /// Show the absolute path to the local data directory.
    Path,
    /// Set a custom absolute path for the local data directory.
    SetPath {
        /// The new path to use for storing plans.
        #[arg(required = true)]
        path: PathBuf,
    },
    /// Reset the data path to its default, OS-specific location.
    ResetPath,
}
