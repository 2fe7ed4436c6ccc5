//! vega-themes: a named registry of Vega-Lite chart themes.
//!
//! Themes are zero-argument factories registered under a name; one of them
//! is active at a time. Activation can be scoped so the previous theme comes
//! back when the scope ends, and the active theme can be rescaled into a
//! derived `<name>_modified` theme.
//!
//! # Quick start
//!
//! ```
//! use serde_json::json;
//! use vega_themes::theme::ThemeRegistry;
//!
//! let themes = ThemeRegistry::with_builtins();
//! themes.register("poster", || json!({"config": {"title": {"fontSize": 20}}}));
//!
//! {
//!     let _scope = themes.enable("poster").unwrap().scoped();
//!     let _big = themes.modify(Some(1.5)).unwrap().scoped();
//!     let theme = themes.active_theme().unwrap();
//!     assert_eq!(theme["config"]["title"]["fontSize"], json!(30.0));
//! }
//! assert_eq!(themes.active().unwrap(), "default");
//! ```

pub mod config;
pub mod error;
pub mod registry;
#[cfg(test)]
pub mod testsupport;
pub mod theme;
