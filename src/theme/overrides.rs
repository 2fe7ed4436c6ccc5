//! Apply a loaded [`Config`] to a theme registry at startup.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::config::{validate_font_scale, Config, ThemeOverride};
use crate::error::{AppError, ConfigError, RegistryError};

use super::{ThemeRegistry, ThemeValue};

/// Register custom themes, enable the configured theme, and apply the
/// startup font scale. Returns the name left active.
///
/// Every `[themes.<name>]` entry is resolved before any is registered, so a
/// bad override leaves the registry untouched.
pub fn apply_config(registry: &ThemeRegistry<Value>, config: &Config) -> Result<String, AppError> {
    if !config.themes.contains_key(&config.active) {
        registry.get(&config.active)?;
    }

    let mut resolved = BTreeMap::new();
    for name in config.themes.keys() {
        resolve_override(registry, &config.themes, name, &mut Vec::new(), &mut resolved)?;
    }
    for (name, merged) in resolved {
        registry.register(name, move || Value::from_config(merged.clone()));
    }

    registry.enable(&config.active)?;
    if let Some(scale) = config.font_scale {
        registry.modify(Some(scale))?;
    }

    let active = registry.active()?;
    tracing::info!(%active, custom = config.themes.len(), "applied theme config");
    Ok(active)
}

/// Switch to `name` and/or rescale by `font_scale` on top of an applied
/// config. Returns the name left active.
///
/// A new name falls back to the configured scale, and an explicit scale
/// replaces it; scaling always derives from the unscaled theme. With neither
/// argument the startup activation is left as is.
pub fn select_theme(
    registry: &ThemeRegistry<Value>,
    config: &Config,
    name: Option<&str>,
    font_scale: Option<f64>,
) -> Result<String, AppError> {
    let font_scale = font_scale
        .map(|scale| validate_font_scale(scale, "--font-scale"))
        .transpose()?;
    if name.is_none() && font_scale.is_none() {
        return Ok(registry.active()?);
    }

    registry.enable(name.unwrap_or(&config.active))?;
    if let Some(scale) = font_scale.or(config.font_scale) {
        registry.modify(Some(scale))?;
    }
    Ok(registry.active()?)
}

/// Resolve `name` after its `extends` chain, depth first.
///
/// Parents declared in the same config resolve first regardless of order;
/// anything else (including a theme extending its own registered name) is
/// read from the registry.
fn resolve_override(
    registry: &ThemeRegistry<Value>,
    themes: &BTreeMap<String, ThemeOverride>,
    name: &str,
    visiting: &mut Vec<String>,
    resolved: &mut BTreeMap<String, Map<String, Value>>,
) -> Result<(), AppError> {
    if resolved.contains_key(name) {
        return Ok(());
    }
    if visiting.iter().any(|seen| seen == name) {
        visiting.push(name.to_string());
        return Err(ConfigError::Invalid(format!(
            "theme `extends` cycle: {}",
            visiting.join(" -> ")
        ))
        .into());
    }
    let Some(theme) = themes.get(name) else {
        return Ok(());
    };

    visiting.push(name.to_string());
    let mut base = match theme.extends.as_deref() {
        Some(parent) if parent != name && themes.contains_key(parent) => {
            resolve_override(registry, themes, parent, visiting, resolved)?;
            resolved.get(parent).cloned().unwrap_or_default()
        }
        Some(parent) => {
            let value = registry.get(parent)?();
            value.config().cloned().ok_or_else(|| {
                RegistryError::MalformedTheme(format!(
                    "theme `{parent}` extended by `{name}` has no config mapping"
                ))
            })?
        }
        None => Map::new(),
    };
    visiting.pop();

    let overlay = match serde_json::to_value(&theme.config).map_err(|e| {
        ConfigError::Invalid(format!("theme `{name}` config is not JSON-compatible: {e}"))
    })? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    merge_config(&mut base, overlay);
    resolved.insert(name.to_string(), base);
    Ok(())
}

/// Deep-merge `overlay` into `base`: objects merge, everything else replaces.
pub fn merge_config(base: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, value) in overlay {
        let Value::Object(incoming) = value else {
            base.insert(key, value);
            continue;
        };
        if let Some(Value::Object(existing)) = base.get_mut(&key) {
            merge_config(existing, incoming);
            continue;
        }
        base.insert(key, Value::Object(incoming));
    }
}
