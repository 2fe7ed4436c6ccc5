//! Themes bundled with the crate.

use serde_json::{json, Value};

use super::ThemeRegistry;

/// Theme enabled by [`ThemeRegistry::with_builtins`].
pub const DEFAULT_THEME: &str = "default";

/// Register `default`, `opaque`, `none`, and `dark` on `registry`.
pub fn register_builtins(registry: &ThemeRegistry<Value>) {
    registry.register(DEFAULT_THEME, default_theme);
    registry.register("opaque", opaque_theme);
    registry.register("none", || json!({"config": {}}));
    registry.register("dark", dark_theme);
}

fn default_theme() -> Value {
    json!({
        "config": {
            "view": {"continuousWidth": 300, "continuousHeight": 300}
        }
    })
}

fn opaque_theme() -> Value {
    let mut theme = default_theme();
    if let Some(config) = theme.get_mut("config").and_then(Value::as_object_mut) {
        config.insert("background".to_string(), json!("white"));
    }
    theme
}

fn dark_theme() -> Value {
    let light = "#fff";
    let grid = "#888";
    json!({
        "config": {
            "background": "#333",
            "view": {"continuousWidth": 300, "continuousHeight": 300, "stroke": grid},
            "title": {"color": light, "subtitleColor": light},
            "style": {
                "guide-label": {"fill": light},
                "guide-title": {"fill": light}
            },
            "axis": {"domainColor": light, "gridColor": grid, "tickColor": light},
            "legend": {"labelColor": light, "titleColor": light},
            "header": {"labelColor": light, "titleColor": light}
        }
    })
}
