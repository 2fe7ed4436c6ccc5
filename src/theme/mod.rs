//! Theme registry: named Vega-Lite `config` producers.
//!
//! A theme is any value exposing a configuration mapping (see
//! [`ThemeValue`]). Besides the plain registry operations, a
//! [`ThemeRegistry`] can derive a rescaled copy of the active theme with
//! [`ThemeRegistry::modify`].

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::ops::Deref;
use std::sync::OnceLock;

use crate::error::RegistryError;
use crate::registry::{PluginEnabler, Registry};

pub mod builtins;
pub mod overrides;
pub mod scale;

pub use scale::{default_font_schema, scale_fonts, FontSchema};

/// Top-level key holding a theme's configuration in chart specs.
pub const CONFIG_KEY: &str = "config";
/// Last `_` component marking a theme derived by `modify`.
pub const MODIFIED_SUFFIX: &str = "modified";

/// Capability shared by every value a theme factory may produce.
pub trait ThemeValue {
    /// Configuration mapping carried by this value, if any.
    fn config(&self) -> Option<&Map<String, Value>>;

    /// Wrap a configuration mapping as a theme value.
    fn from_config(config: Map<String, Value>) -> Self;
}

/// Raw JSON themes keep their configuration under [`CONFIG_KEY`].
impl ThemeValue for Value {
    fn config(&self) -> Option<&Map<String, Value>> {
        self.get(CONFIG_KEY)?.as_object()
    }

    fn from_config(config: Map<String, Value>) -> Self {
        let mut theme = Map::new();
        theme.insert(CONFIG_KEY.to_string(), Value::Object(config));
        Value::Object(theme)
    }
}

/// Typed theme value. Serializes as `{"config": {...}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub config: Map<String, Value>,
}

impl ThemeValue for Theme {
    fn config(&self) -> Option<&Map<String, Value>> {
        Some(&self.config)
    }

    fn from_config(config: Map<String, Value>) -> Self {
        Self { config }
    }
}

/// Registry of theme factories with font-scaling derivation.
pub struct ThemeRegistry<T = Value> {
    registry: Registry<T>,
    font_schema: BTreeMap<String, FontSchema>,
}

impl<T: ThemeValue> ThemeRegistry<T> {
    /// Empty registry using the default Vega font-size schema.
    pub fn new() -> Self {
        Self::with_font_schema(default_font_schema().clone())
    }

    /// Empty registry scaling the fields described by `font_schema`.
    pub fn with_font_schema(font_schema: BTreeMap<String, FontSchema>) -> Self {
        Self {
            registry: Registry::new("theme"),
            font_schema,
        }
    }

    pub fn font_schema(&self) -> &BTreeMap<String, FontSchema> {
        &self.font_schema
    }

    /// Invoke the active theme's factory.
    pub fn active_theme(&self) -> Result<T, RegistryError> {
        Ok(self.get_active()?())
    }

    /// Derive a theme from the active one, register it under the derived
    /// name, and activate it.
    ///
    /// With `font_scale`, every schema font size is multiplied by the factor
    /// (missing sizes start from their default). The derived entry returns
    /// the configuration computed here on every call.
    pub fn modify(&self, font_scale: Option<f64>) -> Result<PluginEnabler<'_, T>, RegistryError>
    where
        T: 'static,
    {
        let active = self.active()?;
        let theme = self.get(&active)?();
        let config = theme.config().ok_or_else(|| {
            RegistryError::MalformedTheme(format!(
                "theme `{active}` has no `{CONFIG_KEY}` mapping"
            ))
        })?;

        let config = match font_scale {
            Some(factor) => scale_fonts(config, &self.font_schema, factor)?,
            None => config.clone(),
        };

        let derived = derived_theme_name(&active);
        tracing::info!(from = %active, to = %derived, ?font_scale, "modified theme");
        self.register(derived.clone(), move || T::from_config(config.clone()));
        self.enable(&derived)
    }
}

impl<T: ThemeValue> Default for ThemeRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl ThemeRegistry<Value> {
    /// Registry seeded with the built-in themes, `default` active.
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        builtins::register_builtins(&registry);
        if let Err(err) = registry.enable(builtins::DEFAULT_THEME) {
            tracing::warn!(%err, "built-in default theme missing");
        }
        registry
    }
}

impl<T> Deref for ThemeRegistry<T> {
    type Target = Registry<T>;

    fn deref(&self) -> &Self::Target {
        &self.registry
    }
}

impl<T> std::fmt::Debug for ThemeRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeRegistry")
            .field("registry", &self.registry)
            .field("font_schema", &self.font_schema)
            .finish()
    }
}

impl<T> std::fmt::Display for ThemeRegistry<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.registry, f)
    }
}

/// Process-wide theme registry seeded with the built-ins.
pub fn themes() -> &'static ThemeRegistry {
    static THEMES: OnceLock<ThemeRegistry> = OnceLock::new();
    THEMES.get_or_init(ThemeRegistry::with_builtins)
}

/// Name `modify` registers its result under.
///
/// Already-derived names are reused so repeated modification overwrites.
pub fn derived_theme_name(active: &str) -> String {
    if active.rsplit('_').next() == Some(MODIFIED_SUFFIX) {
        active.to_string()
    } else {
        format!("{active}_{MODIFIED_SUFFIX}")
    }
}
