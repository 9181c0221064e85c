use crate::error::{CliError, Result};
use crate::utils::parser::PlanName;
use directories::ProjectDirs;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const PLANS_DIR: &str = "plans";

/// Owns the local data directory where named plans live.
///
/// The directory defaults to the OS-specific data location and can be redirected
/// persistently with `data set-path`; the override is kept in `path.conf` in the
/// config directory.
#[derive(Debug)]
pub struct DataManager {
    base_path: PathBuf,
}

impl DataManager {
    pub fn new() -> Result<Self> {
        let path = Self::determine_data_path()?;
        debug!("DataManager initialized with path: {:?}", &path);
        Ok(Self { base_path: path })
    }

    #[cfg(test)]
    pub fn with_custom_path(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    pub fn get_data_path(&self) -> &Path {
        &self.base_path
    }

    pub fn set_custom_path(path: &Path) -> Result<()> {
        let path_str = path.to_str().ok_or_else(|| {
            CliError::Argument(format!("Path is not valid UTF-8: {}", path.display()))
        })?;
        let config_path = Self::get_path_config_file()?;
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(config_path, path_str).map_err(CliError::from)
    }

    pub fn reset_path() -> Result<()> {
        if let Ok(config_path) = Self::get_path_config_file() {
            if config_path.exists() {
                fs::remove_file(config_path)?;
            }
        }
        Ok(())
    }

    /// Location of a named plan. The file need not exist yet.
    pub fn resolve_plan_name(&self, name: &PlanName) -> PathBuf {
        self.base_path
            .join(PLANS_DIR)
            .join(format!("{}.toml", name.as_str()))
    }

    /// Named plans present in the data directory, sorted.
    pub fn list_plans(&self) -> Result<Vec<String>> {
        let dir = self.base_path.join(PLANS_DIR);
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.extension().is_some_and(|ext| ext == "toml") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        names.sort();
        Ok(names)
    }

    fn determine_data_path() -> Result<PathBuf> {
        match Self::get_path_config_file() {
            Ok(config_path) if config_path.exists() => {
                let custom_path_str = fs::read_to_string(&config_path)?.trim().to_string();
                if custom_path_str.is_empty() {
                    warn!("Custom path config file is empty, falling back to default path.");
                    Self::get_default_data_path()
                } else {
                    Ok(PathBuf::from(custom_path_str))
                }
            }
            _ => Self::get_default_data_path(),
        }
    }

    fn get_path_config_file() -> Result<PathBuf> {
        ProjectDirs::from("io", "workyard", "workyard")
            .map(|dirs| dirs.config_dir().join("path.conf"))
            .ok_or_else(|| CliError::Data("Could not determine config directory path.".to_string()))
    }

    fn get_default_data_path() -> Result<PathBuf> {
        ProjectDirs::from("io", "workyard", "workyard")
            .map(|dirs| dirs.data_dir().to_path_buf())
            .ok_or_else(|| {
                CliError::Data("Could not determine default data directory path.".to_string())
            })
    }
}
