//! Helpers for plotting-library figures (`{"data": [...], "layout": {...}}`).

use crate::error::{ThemeError, ThemeResult};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A figure: a list of traces plus a layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    #[serde(default)]
    pub data: Vec<Value>,
    #[serde(default)]
    pub layout: Map<String, Value>,
}

impl Figure {
    /// Coerce a loosely-typed value into a figure.
    pub fn from_value(value: Value) -> ThemeResult<Self> {
        if !value.is_object() {
            return Err(ThemeError::invalid_figure(format_args!(
                "expected an object, got '{}'",
                value
            )));
        }
        serde_json::from_value(value).map_err(ThemeError::invalid_figure)
    }
}

/// Split a figure into one figure per trace, each keeping the full layout.
pub fn strip_figure(figure: &Figure) -> Vec<Figure> {
    figure
        .data
        .iter()
        .map(|trace| Figure {
            data: vec![trace.clone()],
            layout: figure.layout.clone(),
        })
        .collect()
}

/// Union of the figures' layouts; later figures win on conflicting keys.
///
/// The union is shallow: a nested object from a later figure replaces the
/// earlier one whole.
pub fn get_base_layout(figures: &[Figure]) -> Map<String, Value> {
    let mut layout = Map::new();
    for figure in figures {
        for (key, value) in &figure.layout {
            layout.insert(key.clone(), value.clone());
        }
    }
    layout
}
