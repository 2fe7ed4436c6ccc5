//! Default configuration constants.

/// Theme enabled when neither the file nor the environment picks one.
pub(super) const DEFAULT_ACTIVE_THEME: &str = crate::theme::builtins::DEFAULT_THEME;
/// Config file name looked up locally and under the global config root.
pub(super) const CONFIG_FILE_NAME: &str = "vega-themes.toml";
/// Directory under the global config root holding [`CONFIG_FILE_NAME`].
pub(super) const CONFIG_DIR_NAME: &str = "vega-themes";

pub(super) const ENV_ACTIVE_THEME: &str = "VEGA_THEMES_ACTIVE";
pub(super) const ENV_FONT_SCALE: &str = "VEGA_THEMES_FONT_SCALE";
