//! Built-in themes, sorted by name.

use crate::error::{ThemeError, ThemeResult};
use serde_json::Value;

const THEMES: &[(&str, &str)] = &[
    ("dark", include_str!("../../config/themes/dark.yaml")),
    ("dark-qm", include_str!("../../config/themes/dark-qm.yaml")),
    (
        "dark-unstyled",
        include_str!("../../config/themes/dark-unstyled.yaml"),
    ),
    ("light", include_str!("../../config/themes/light.yaml")),
    ("light-qm", include_str!("../../config/themes/light-qm.yaml")),
    (
        "light-unstyled",
        include_str!("../../config/themes/light-unstyled.yaml"),
    ),
];

/// Return a fresh copy of the named theme.
pub fn get_theme(name: &str) -> ThemeResult<Value> {
    let (_, source) = THEMES
        .iter()
        .find(|(theme, _)| *theme == name)
        .ok_or_else(|| ThemeError::invalid_theme(name))?;
    serde_yaml::from_str(source)
        .map_err(|e| ThemeError::improper_theme(format_args!("{}: {}", name, e)))
}

/// Names of the available themes.
pub fn get_themes() -> Vec<&'static str> {
    THEMES.iter().map(|(name, _)| *name).collect()
}
