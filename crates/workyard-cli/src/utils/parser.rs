use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Plan name cannot be empty.")]
    EmptyName,

    #[error(
        "Invalid plan name '{0}'. Use letters, digits, '-' and '_' only, or give a path (e.g., './plans/yard.toml')."
    )]
    InvalidPlanName(String),

    #[error("Invalid --set format: '{0}'. Expected KEY=VALUE.")]
    InvalidAssignment(String),
}

/// A logical plan name, stored as `<data dir>/plans/<name>.toml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanName(String);

impl PlanName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Whether `value` should be taken as a filesystem path rather than a logical name.
pub fn looks_like_path(value: &str) -> bool {
    std::path::Path::new(value).is_absolute()
        || value.contains(['/', '\\'])
        || value.ends_with(".toml")
}

pub fn parse_plan_name(name: &str) -> Result<PlanName, ParseError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyName);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ParseError::InvalidPlanName(name.to_string()));
    }
    Ok(PlanName(name.to_string()))
}

/// Splits a `-S KEY=VALUE` assignment at the first `=`.
pub fn parse_assignment(pair: &str) -> Result<(&str, &str), ParseError> {
    match pair.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => Ok((key.trim(), value.trim())),
        _ => Err(ParseError::InvalidAssignment(pair.to_string())),
    }
}
