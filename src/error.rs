//! Unified error types for the registry, config loading, and the CLI.

use std::fmt;

// ---------------------------------------------------------------------------
// RegistryError
// ---------------------------------------------------------------------------

/// Errors raised by registry lookups and theme derivation.
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The requested name is not registered, or nothing is active and no
    /// name was given (`name` is `None`).
    NotFound {
        kind: &'static str,
        name: Option<String>,
        available: Vec<String>,
    },
    /// A theme value did not expose the configuration mapping the scaler
    /// expects, held a non-numeric value at a font-size field, or a scaled
    /// size that overflows.
    MalformedTheme(String),
    /// Font scale factor is not a finite number.
    InvalidFontScale(f64),
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound {
                kind,
                name: Some(name),
                available,
            } => {
                write!(f, "unknown {kind} `{name}`")?;
                if available.is_empty() {
                    write!(f, " (nothing registered)")
                } else {
                    write!(f, ". Available: {}", available.join(", "))
                }
            }
            Self::NotFound {
                kind, name: None, ..
            } => write!(f, "no active {kind} is set"),
            Self::MalformedTheme(msg) => write!(f, "malformed theme: {msg}"),
            Self::InvalidFontScale(value) => write!(f, "invalid font scale: {value}"),
        }
    }
}

impl std::error::Error for RegistryError {}

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Errors when loading or parsing configuration.
#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Toml(toml::de::Error),
    Invalid(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "io: {e}"),
            Self::Toml(e) => write!(f, "toml: {e}"),
            Self::Invalid(msg) => write!(f, "invalid config: {msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e)
    }
}

// ---------------------------------------------------------------------------
// AppError (top-level)
// ---------------------------------------------------------------------------

/// Top-level error type for startup wiring and the CLI.
#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Registry(RegistryError),
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "config: {e}"),
            Self::Registry(e) => write!(f, "registry: {e}"),
            Self::Json(e) => write!(f, "json: {e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}

impl From<RegistryError> for AppError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
