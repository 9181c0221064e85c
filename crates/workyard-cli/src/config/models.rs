use std::path::PathBuf;
use workyard::engine::config::PlannerConfig;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub planner: PlannerConfig,
    /// Catalog file; the built-in workstation list is used when absent.
    pub catalog_path: Option<PathBuf>,
    pub plan_path: PathBuf,
    /// Selected game location, used to filter catalog listings.
    pub location: Option<String>,
}
