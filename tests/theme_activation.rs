//! End-to-end activation and derivation behavior through the public API.

use serde_json::{json, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use vega_themes::error::RegistryError;
use vega_themes::registry::Registry;
use vega_themes::theme::{FontSchema, ThemeRegistry, ThemeValue};

fn seeded() -> ThemeRegistry {
    let themes = ThemeRegistry::with_builtins();
    themes.register("poster", || {
        json!({"config": {"title": {"fontSize": 10}, "background": "#fafafa"}})
    });
    themes
}

#[test]
fn retrieval_returns_factory_output() {
    let themes = seeded();
    assert_eq!(
        themes.get("poster").expect("poster")(),
        json!({"config": {"title": {"fontSize": 10}, "background": "#fafafa"}})
    );
}

#[test]
fn panic_inside_scope_restores_previous_theme() {
    let themes = seeded();
    let result = catch_unwind(AssertUnwindSafe(|| {
        let _guard = themes.enable("dark").expect("enable").scoped();
        panic!("render failed");
    }));
    assert!(result.is_err());
    assert_eq!(themes.active().expect("active"), "default");
}

#[test]
fn nested_scopes_restore_in_lifo_order() {
    let themes = seeded();
    let outer = themes.enable("dark").expect("enable").scoped();
    let inner = themes.enable("poster").expect("enable").scoped();
    assert_eq!(themes.active().expect("active"), "poster");
    drop(inner);
    assert_eq!(themes.active().expect("active"), "dark");
    drop(outer);
    assert_eq!(themes.active().expect("active"), "default");
}

#[test]
fn repeated_modify_overwrites_single_derived_entry() {
    let themes = seeded();
    themes.enable("dark").expect("enable");
    themes.modify(Some(1.25)).expect("first");
    themes.modify(None).expect("second");
    assert_eq!(themes.active().expect("active"), "dark_modified");
    assert!(!themes.contains("dark_modified_modified"));

    let theme = themes.active_theme().expect("theme");
    assert_eq!(theme["config"]["title"]["fontSize"], json!(16.25));
    assert_eq!(theme["config"]["background"], json!("#333"));
}

#[test]
fn scaled_theme_fills_every_default_size() {
    let themes = seeded();
    themes.enable("poster").expect("enable");
    themes.modify(Some(2.0)).expect("modify");

    let theme = themes.active_theme().expect("theme");
    let config = theme.config().expect("config");
    assert_eq!(config["title"]["fontSize"], json!(20.0));
    assert_eq!(config["legend"]["titleFontSize"], json!(22.0));
    assert_eq!(config["axis"]["labelFontSize"], json!(20.0));
    assert_eq!(config["background"], json!("#fafafa"));
}

#[test]
fn custom_schema_limits_scaled_fields() {
    let schema = [(
        "legend".to_string(),
        FontSchema::section([("titleFontSize", FontSchema::Size(11.0))]),
    )]
    .into_iter()
    .collect();
    let themes = ThemeRegistry::<Value>::with_font_schema(schema);
    themes.register("bare", || json!({"config": {}}));
    themes.enable("bare").expect("enable");
    themes.modify(Some(2.0)).expect("modify");
    assert_eq!(
        themes.active_theme().expect("theme"),
        json!({"config": {"legend": {"titleFontSize": 22.0}}})
    );
}

#[test]
fn modify_on_empty_registry_reports_missing_active_theme() {
    let themes = ThemeRegistry::<Value>::new();
    assert!(matches!(
        themes.modify(Some(2.0)),
        Err(RegistryError::NotFound { name: None, .. })
    ));
}

#[test]
fn generic_registry_holds_non_theme_values() {
    let renderers: Registry<fn(&str) -> String> = Registry::new("renderer");
    renderers.register("upper", || (|s: &str| s.to_uppercase()) as fn(&str) -> String);
    renderers.enable("upper").expect("enable");
    let render = renderers.get_active().expect("active")();
    assert_eq!(render("svg"), "SVG");
    assert_eq!(
        renderers.to_string(),
        "RendererRegistry(active=upper, enabled=true, registered=[upper])"
    );
}
