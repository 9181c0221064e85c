use super::defaults::DefaultsConfig;
use super::file::FileConfig;
use super::models::AppConfig;
use crate::cli::PlanArgs;
use crate::data::DataManager;
use crate::error::{CliError, Result};
use crate::utils::parser;
use std::path::{Path, PathBuf};
use workyard::core::catalog::builtin::known_locations;
use workyard::core::layout::AreaLayout;
use workyard::engine::config::{GridSource, LoadPolicy, PlannerConfigBuilder};

pub fn build_config(args: &PlanArgs, data_manager: &DataManager) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();

    let file_config = if let Some(config_path) = &args.config {
        FileConfig::from_file(config_path)?
    } else {
        FileConfig::default()
    };

    let mut file_config = apply_set_values(file_config, &args.set_values)?;

    let grid_file = file_config.grid.take().unwrap_or_default();
    let catalog_file = file_config.catalog.take().unwrap_or_default();
    let persistence_file = file_config.persistence.take().unwrap_or_default();

    let location = args
        .location
        .clone()
        .or_else(|| grid_file.location.clone());

    let grid = if let Some(areas) = &args.areas {
        load_areas(areas)?
    } else if let Some(location) = &args.location {
        location_grid(location)?
    } else if let Some(areas) = &grid_file.areas {
        load_areas(areas)?
    } else if let Some(location) = &grid_file.location {
        location_grid(location)?
    } else {
        GridSource::Rectangle {
            width: grid_file.width.unwrap_or(defaults.grid_width),
            height: grid_file.height.unwrap_or(defaults.grid_height),
        }
    };

    let load_policy = args
        .load_policy
        .as_deref()
        .or(persistence_file.load_policy.as_deref())
        .unwrap_or(&defaults.load_policy)
        .parse::<LoadPolicy>()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let planner = PlannerConfigBuilder::new()
        .grid(grid)
        .load_policy(load_policy)
        .build()
        .map_err(|e| CliError::Config(e.to_string()))?;

    let plan_path = resolve_plan(
        args.plan.as_deref(),
        persistence_file.plan.as_deref(),
        &defaults.plan,
        data_manager,
    )?;

    Ok(AppConfig {
        planner,
        catalog_path: args.catalog.clone().or(catalog_file.path),
        plan_path,
        location,
    })
}

fn load_areas(path: &Path) -> Result<GridSource> {
    let layout = AreaLayout::load(path).map_err(|e| CliError::FileParsing {
        path: path.to_path_buf(),
        source: e.into(),
    })?;
    Ok(GridSource::Areas(layout))
}

fn location_grid(location: &str) -> Result<GridSource> {
    GridSource::for_location(location).ok_or_else(|| {
        CliError::Config(format!(
            "Unknown location '{}'. Known locations: {}",
            location,
            known_locations().join(", ")
        ))
    })
}

fn resolve_plan(
    cli_arg: Option<&str>,
    file_arg: Option<&str>,
    default_arg: &str,
    data_manager: &DataManager,
) -> Result<PathBuf> {
    let name_or_path = cli_arg.or(file_arg).unwrap_or(default_arg);

    if parser::looks_like_path(name_or_path) {
        return Ok(PathBuf::from(name_or_path));
    }

    let name =
        parser::parse_plan_name(name_or_path).map_err(|e| CliError::Argument(e.to_string()))?;
    Ok(data_manager.resolve_plan_name(&name))
}

fn apply_set_values(mut config: FileConfig, set_values: &[String]) -> Result<FileConfig> {
    for kv_pair in set_values {
        let (key, value_str) =
            parser::parse_assignment(kv_pair).map_err(|e| CliError::Config(e.to_string()))?;

        let parse_size = |value: &str| -> Result<usize> {
            value.parse().map_err(|_| {
                CliError::Config(format!("Invalid integer value for {}: {}", key, value))
            })
        };

        match key {
            "grid.location" => {
                config.grid.get_or_insert_with(Default::default).location =
                    Some(value_str.to_string());
            }
            "grid.width" => {
                config.grid.get_or_insert_with(Default::default).width =
                    Some(parse_size(value_str)?);
            }
            "grid.height" => {
                config.grid.get_or_insert_with(Default::default).height =
                    Some(parse_size(value_str)?);
            }
            "grid.areas" => {
                config.grid.get_or_insert_with(Default::default).areas =
                    Some(PathBuf::from(value_str));
            }
            "catalog.path" => {
                config.catalog.get_or_insert_with(Default::default).path =
                    Some(PathBuf::from(value_str));
            }
            "persistence.plan" => {
                config.persistence.get_or_insert_with(Default::default).plan =
                    Some(value_str.to_string());
            }
            "persistence.load-policy" => {
                config
                    .persistence
                    .get_or_insert_with(Default::default)
                    .load_policy = Some(value_str.to_string());
            }
            _ => {
                return Err(CliError::Config(format!(
                    "Unsupported configuration key for --set: '{}'",
                    key
                )));
            }
        }
    }
    Ok(config)
}
