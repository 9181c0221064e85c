//! Layered configuration: built-in defaults, a TOML config file, `-S KEY=VALUE`
//! overrides, then command line flags, in increasing order of precedence.

mod builder;
mod defaults;
mod file;
mod models;

pub use builder::build_config;
pub use models::AppConfig;
