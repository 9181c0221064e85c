mod cli;
mod commands;
mod config;
mod data;
mod error;
mod logging;
mod ui;
mod utils;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 Workyard CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let plan = &cli.plan;
    let command_result = match cli.command {
        Commands::Catalog(args) => {
            info!("Dispatching to 'catalog' command.");
            commands::catalog::run(plan, args)
        }
        Commands::Show => {
            info!("Dispatching to 'show' command.");
            commands::show::run(plan)
        }
        Commands::Check(args) => {
            info!("Dispatching to 'check' command.");
            commands::edit::run_check(plan, args)
        }
        Commands::Place(args) => {
            info!("Dispatching to 'place' command.");
            commands::edit::run_place(plan, args)
        }
        Commands::Move(args) => {
            info!("Dispatching to 'move' command.");
            commands::edit::run_move(plan, args)
        }
        Commands::Rotate(args) => {
            info!("Dispatching to 'rotate' command.");
            commands::edit::run_rotate(plan, args)
        }
        Commands::Remove(args) => {
            info!("Dispatching to 'remove' command.");
            commands::edit::run_remove(plan, args)
        }
        Commands::Data(args) => {
            info!("Dispatching to 'data' command.");
            commands::data::run(args)
        }
    };

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}
