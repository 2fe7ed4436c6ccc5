//! Configuration loading from TOML files and environment variables.
//!
//! Config is loaded in this order of precedence (highest wins):
//! 1. Environment variables (`VEGA_THEMES_ACTIVE`, `VEGA_THEMES_FONT_SCALE`)
//! 2. TOML file specified via --config CLI flag
//! 3. ./vega-themes.toml in the current directory
//! 4. $XDG_CONFIG_HOME/vega-themes/vega-themes.toml (platform config dir
//!    when unset)
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use crate::error::ConfigError;

mod defaults;
mod env;
mod sources;
mod types;

pub use env::validate_font_scale;
pub use sources::{config_root_dir, ConfigSource};
pub use types::{Config, ThemeOverride};
use types::FileConfig;

/// Config plus the source it was read from.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedConfig {
    pub config: Config,
    pub source: ConfigSource,
}

/// Load configuration from disk and environment.
///
/// `path_override` is an explicit config file path (from --config flag).
pub fn load_config(path_override: Option<&str>) -> Result<Config, ConfigError> {
    Ok(load_config_with_source(path_override)?.config)
}

/// Load configuration and report where it came from.
pub fn load_config_with_source(path_override: Option<&str>) -> Result<LoadedConfig, ConfigError> {
    load_config_from_sources(
        path_override,
        |path| std::fs::read_to_string(path),
        |name| std::env::var(name).ok(),
        config_root_dir,
    )
}

fn load_config_from_sources<FRead, FEnv, FRoot>(
    path_override: Option<&str>,
    read_file: FRead,
    env_lookup: FEnv,
    config_root: FRoot,
) -> Result<LoadedConfig, ConfigError>
where
    FRead: Fn(&Path) -> Result<String, std::io::Error>,
    FEnv: Fn(&str) -> Option<String>,
    FRoot: Fn() -> Option<PathBuf>,
{
    let (config_text, source) =
        sources::read_config_text_with_sources(path_override, &read_file, &config_root)?;
    let parsed: FileConfig = toml::from_str(&config_text)?;
    let mut config = resolve_file_config(parsed)?;
    env::apply_env_overrides(&mut config, &env_lookup)?;
    tracing::debug!(?source, active = %config.active, "loaded config");

    Ok(LoadedConfig { config, source })
}

fn resolve_file_config(parsed: FileConfig) -> Result<Config, ConfigError> {
    let mut config = Config::default();
    if let Some(active) = parsed.active {
        let trimmed = active.trim();
        if trimmed.is_empty() {
            return Err(ConfigError::Invalid("`active` must not be empty".to_string()));
        }
        config.active = trimmed.to_string();
    }
    if let Some(scale) = parsed.font_scale {
        config.font_scale = Some(env::validate_font_scale(scale, "`font_scale`")?);
    }
    for (name, theme) in parsed.themes {
        if name.trim().is_empty() {
            return Err(ConfigError::Invalid("theme names must not be empty".to_string()));
        }
        config.themes.insert(name, theme);
    }
    Ok(config)
}
