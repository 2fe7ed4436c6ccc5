//! Schema-driven font-size scaling.

use serde_json::{Map, Number, Value};
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::error::RegistryError;

/// Tree of font-size fields subject to scaling.
#[derive(Debug, Clone, PartialEq)]
pub enum FontSchema {
    /// Font-size field with its unscaled default.
    Size(f64),
    /// Nested configuration section.
    Section(BTreeMap<String, FontSchema>),
}

impl FontSchema {
    /// Build a section from `(key, node)` pairs.
    pub fn section<I, K>(children: I) -> Self
    where
        I: IntoIterator<Item = (K, FontSchema)>,
        K: Into<String>,
    {
        Self::Section(
            children
                .into_iter()
                .map(|(key, node)| (key.into(), node))
                .collect(),
        )
    }
}

/// Vega config font sizes and their renderer defaults.
pub fn default_font_schema() -> &'static BTreeMap<String, FontSchema> {
    static SCHEMA: OnceLock<BTreeMap<String, FontSchema>> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        let labelled = |label: f64, title: f64| {
            FontSchema::section([
                ("labelFontSize", FontSchema::Size(label)),
                ("titleFontSize", FontSchema::Size(title)),
            ])
        };
        BTreeMap::from([
            ("axis".to_string(), labelled(10.0, 11.0)),
            ("header".to_string(), labelled(10.0, 13.0)),
            ("legend".to_string(), labelled(10.0, 11.0)),
            (
                "text".to_string(),
                FontSchema::section([("fontSize", FontSchema::Size(11.0))]),
            ),
            (
                "title".to_string(),
                FontSchema::section([("fontSize", FontSchema::Size(13.0))]),
            ),
        ])
    })
}

/// Return a copy of `config` with every schema font size multiplied by
/// `factor`. Missing sizes start from the schema default.
pub fn scale_fonts(
    config: &Map<String, Value>,
    schema: &BTreeMap<String, FontSchema>,
    factor: f64,
) -> Result<Map<String, Value>, RegistryError> {
    if !factor.is_finite() {
        return Err(RegistryError::InvalidFontScale(factor));
    }
    scale_section(config, schema, factor, "")
}

fn scale_section(
    config: &Map<String, Value>,
    schema: &BTreeMap<String, FontSchema>,
    factor: f64,
    path: &str,
) -> Result<Map<String, Value>, RegistryError> {
    let mut scaled = config.clone();
    for (key, node) in schema {
        let key_path = if path.is_empty() {
            key.clone()
        } else {
            format!("{path}.{key}")
        };
        let value = match node {
            FontSchema::Section(children) => {
                let empty = Map::new();
                let section = match config.get(key) {
                    None => &empty,
                    Some(Value::Object(section)) => section,
                    Some(other) => {
                        return Err(RegistryError::MalformedTheme(format!(
                            "`{key_path}` must be an object, found {other}"
                        )));
                    }
                };
                Value::Object(scale_section(section, children, factor, &key_path)?)
            }
            FontSchema::Size(default) => {
                let base = match config.get(key) {
                    None => *default,
                    Some(value) => value.as_f64().ok_or_else(|| {
                        RegistryError::MalformedTheme(format!(
                            "`{key_path}` must be a number, found {value}"
                        ))
                    })?,
                };
                let size = base * factor;
                let number = Number::from_f64(size).ok_or_else(|| {
                    RegistryError::MalformedTheme(format!(
                        "`{key_path}` overflows when scaled: {base} * {factor}"
                    ))
                })?;
                Value::Number(number)
            }
        };
        scaled.insert(key.clone(), value);
    }
    Ok(scaled)
}
