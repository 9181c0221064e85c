use workyard::core::models::grid::DEFAULT_GRID_SIZE;

pub struct DefaultsConfig {
    pub grid_width: usize,
    pub grid_height: usize,
    pub plan: String,
    pub load_policy: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            plan: "default".to_string(),
            load_policy: "drop-invalid".to_string(),
        }
    }
}
