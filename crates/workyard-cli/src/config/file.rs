use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileGridConfig {
    pub location: Option<String>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub areas: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileCatalogConfig {
    pub path: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FilePersistenceConfig {
    pub plan: Option<String>,
    pub load_policy: Option<String>,
}

#[derive(Deserialize, Debug, Default, Clone)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub grid: Option<FileGridConfig>,
    pub catalog: Option<FileCatalogConfig>,
    pub persistence: Option<FilePersistenceConfig>,
}

impl FileConfig {
    /// Reads a config file. Relative `areas` and catalog paths are taken relative to
    /// the file's own directory.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e.into(),
        })?;

        if let Some(base) = path.parent() {
            if let Some(areas) = config.grid.as_mut().and_then(|g| g.areas.as_mut()) {
                *areas = rebase(base, areas);
            }
            if let Some(catalog) = config.catalog.as_mut().and_then(|c| c.path.as_mut()) {
                *catalog = rebase(base, catalog);
            }
        }
        Ok(config)
    }
}

fn rebase(base: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        base.join(path)
    }
}
