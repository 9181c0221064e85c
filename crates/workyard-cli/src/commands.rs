pub mod catalog;
pub mod data;
pub mod edit;
pub mod show;

use crate::cli::PlanArgs;
use crate::config::{AppConfig, build_config};
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::ui;
use std::path::Path;
use tracing::info;
use workyard::core::catalog::PieceCatalog;
use workyard::core::io::file::TomlFileStore;
use workyard::core::models::ids::InstanceId;
use workyard::engine::session::Session;
use workyard::workflows;

/// Everything a plan command works on.
pub struct PlanContext {
    pub config: AppConfig,
    pub catalog: PieceCatalog,
    pub store: TomlFileStore,
    pub session: Session,
}

impl PlanContext {
    /// Maps a 1-based index, as printed by `show`, to the instance id.
    pub fn instance_id(&self, index: usize) -> Result<InstanceId> {
        index
            .checked_sub(1)
            .and_then(|i| self.session.instances().nth(i))
            .map(|inst| inst.id)
            .ok_or_else(|| {
                CliError::Argument(format!(
                    "No placed instance #{}; the plan has {} instance(s).",
                    index,
                    self.session.len()
                ))
            })
    }
}

pub fn resolve_config(args: &PlanArgs) -> Result<AppConfig> {
    let data_manager = DataManager::new()?;
    build_config(args, &data_manager)
}

pub fn load_catalog(path: Option<&Path>) -> Result<PieceCatalog> {
    match path {
        Some(path) => {
            info!("Loading piece catalog from {:?}", path);
            PieceCatalog::load(path).map_err(|e| CliError::FileParsing {
                path: path.to_path_buf(),
                source: e.into(),
            })
        }
        None => Ok(PieceCatalog::builtin()),
    }
}

/// Resolves configuration, loads the catalog, and replays the stored plan.
pub fn open_plan(args: &PlanArgs) -> Result<PlanContext> {
    let config = resolve_config(args)?;
    open_with_config(config)
}

pub fn open_with_config(config: AppConfig) -> Result<PlanContext> {
    let catalog = load_catalog(config.catalog_path.as_deref())?;
    let store = TomlFileStore::new(&config.plan_path);
    info!("Opening plan {:?}", store.path());

    let opened = workflows::plan::open(&config.planner, &catalog, &store)?;
    if let Some(warning) = ui::render_load_report(&opened.report) {
        eprint!("{}", warning);
    }

    Ok(PlanContext {
        config,
        catalog,
        store,
        session: opened.session,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use tempfile::tempdir;
    use workyard::core::models::piece::Rotation;
    use workyard::engine::config::{GridSource, PlannerConfigBuilder};

    pub(crate) fn config_for(plan_path: PathBuf, width: usize, height: usize) -> AppConfig {
        AppConfig {
            planner: PlannerConfigBuilder::new()
                .grid(GridSource::Rectangle { width, height })
                .build()
                .unwrap(),
            catalog_path: None,
            plan_path,
            location: None,
        }
    }

    #[test]
    fn open_with_missing_plan_is_empty() {
        let dir = tempdir().unwrap();
        let ctx = open_with_config(config_for(dir.path().join("plan.toml"), 4, 4)).unwrap();
        assert!(ctx.session.is_empty());
        assert_eq!(ctx.catalog.len(), 8);
    }

    #[test]
    fn instance_indices_are_one_based() {
        let dir = tempdir().unwrap();
        let mut ctx = open_with_config(config_for(dir.path().join("plan.toml"), 4, 4)).unwrap();
        let bed = ctx.catalog.lookup("garden_bed").unwrap().clone();
        let first = ctx.session.place(&bed, 0, 0, Rotation::Deg0).unwrap();
        let second = ctx.session.place(&bed, 1, 0, Rotation::Deg0).unwrap();

        assert_eq!(ctx.instance_id(1).unwrap(), first.id);
        assert_eq!(ctx.instance_id(2).unwrap(), second.id);
        assert!(matches!(ctx.instance_id(0), Err(CliError::Argument(_))));
        assert!(matches!(ctx.instance_id(3), Err(CliError::Argument(_))));
    }

    #[test]
    fn custom_catalog_files_are_loaded() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("pieces.toml");
        fs::write(&path, "[[pieces]]\nname = \"Beehive\"\nwidth = 1\nheight = 1\n").unwrap();

        let catalog = load_catalog(Some(&path)).unwrap();
        assert_eq!(catalog.len(), 1);
        assert!(matches!(
            load_catalog(Some(&dir.path().join("missing.toml"))),
            Err(CliError::FileParsing { .. })
        ));
    }
}
