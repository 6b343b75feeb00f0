//! Configuration types.

use crate::format::OutputFormat;
use serde::{Deserialize, Serialize};

/// Theme used when a template request names none.
pub const DEFAULT_THEME: &str = "light";

/// User configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Default theme for templates built without an explicit theme.
    #[serde(default = "default_theme")]
    pub theme: String,

    /// Default output format for the CLI.
    #[serde(default)]
    pub output: OutputFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: default_theme(),
            output: OutputFormat::default(),
        }
    }
}

fn default_theme() -> String {
    DEFAULT_THEME.to_string()
}
