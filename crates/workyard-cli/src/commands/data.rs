use crate::cli::{DataArgs, DataCommands};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use std::path::{Path, PathBuf};
use tracing::info;

pub fn run(args: DataArgs) -> Result<()> {
    match args.command {
        DataCommands::Path => {
            handle_path()?;
        }
        DataCommands::SetPath { path } => {
            handle_set_path(path)?;
        }
        DataCommands::ResetPath => {
            handle_reset_path()?;
        }
    }
    Ok(())
}

fn handle_path() -> Result<()> {
    let manager = DataManager::new()?;
    print!("{}", describe_data_dir(&manager)?);
    Ok(())
}

fn handle_set_path(path: PathBuf) -> Result<()> {
    check_absolute(&path)?;
    DataManager::set_custom_path(&path)?;
    info!("Data path set to {:?}", path);
    println!("✓ Plans will now be stored under: {}", path.display());
    Ok(())
}

fn handle_reset_path() -> Result<()> {
    DataManager::reset_path()?;
    let manager = DataManager::new()?;
    info!("Data path reset to {:?}", manager.get_data_path());
    println!(
        "✓ Data path reset to the default location: {}",
        manager.get_data_path().display()
    );
    Ok(())
}

fn check_absolute(path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(CliError::Argument(format!(
            "The data path must be absolute, got '{}'.",
            path.display()
        )))
    }
}

fn describe_data_dir(manager: &DataManager) -> Result<String> {
    let mut out = format!("{}\n", manager.get_data_path().display());
    let plans = manager.list_plans()?;
    if plans.is_empty() {
        out.push_str("No saved plans.\n");
    } else {
        out.push_str("Saved plans:\n");
        for name in plans {
            out.push_str(&format!("  {}\n", name));
        }
    }
    Ok(out)
}
