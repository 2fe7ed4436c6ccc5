//! Environment overrides.

use crate::error::ConfigError;

use super::defaults::{ENV_ACTIVE_THEME, ENV_FONT_SCALE};
use super::Config;

pub(super) fn apply_env_overrides<FEnv>(
    config: &mut Config,
    env_lookup: &FEnv,
) -> Result<(), ConfigError>
where
    FEnv: Fn(&str) -> Option<String>,
{
    if let Some(active) = non_empty(env_lookup(ENV_ACTIVE_THEME)) {
        config.active = active;
    }
    if let Some(raw) = non_empty(env_lookup(ENV_FONT_SCALE)) {
        let parsed = raw.parse::<f64>().map_err(|_| {
            ConfigError::Invalid(format!(
                "invalid {ENV_FONT_SCALE} value `{raw}`: expected a positive number"
            ))
        })?;
        config.font_scale = Some(validate_font_scale(parsed, ENV_FONT_SCALE)?);
    }
    Ok(())
}

/// Font scales must be finite and strictly positive.
pub fn validate_font_scale(value: f64, origin: &str) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::Invalid(format!(
            "{origin} must be a positive finite number, got {value}"
        )))
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
