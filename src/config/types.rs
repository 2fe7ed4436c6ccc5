//! Configuration data model.
//!
//! `FileConfig` mirrors the TOML file; `Config` is the resolved form after
//! defaults and environment overrides are applied.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::defaults::DEFAULT_ACTIVE_THEME;

/// Raw `vega-themes.toml` contents.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub(super) struct FileConfig {
    pub active: Option<String>,
    pub font_scale: Option<f64>,
    pub themes: BTreeMap<String, ThemeOverride>,
}

/// Custom theme declared under `[themes.<name>]`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ThemeOverride {
    /// Registered theme whose configuration this one starts from.
    pub extends: Option<String>,
    /// Configuration merged over the base theme's.
    pub config: toml::Table,
}

/// Resolved startup configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Theme enabled at startup.
    pub active: String,
    /// Optional font scale applied to the active theme at startup.
    pub font_scale: Option<f64>,
    pub themes: BTreeMap<String, ThemeOverride>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            active: DEFAULT_ACTIVE_THEME.to_string(),
            font_scale: None,
            themes: BTreeMap::new(),
        }
    }
}
