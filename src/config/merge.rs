//! Deep merge for nested configuration values.
//!
//! Used both for tiered config files and for layering themes onto the
//! skeleton.
//!
//! - Objects: deep-merge by key
//! - Arrays: REPLACE (last wins)
//! - Scalars and null: override (last wins)

use serde_json::{Map, Value};

/// Deep merge two JSON values, with `overlay` taking precedence over `base`.
///
/// - Objects are merged recursively: keys in overlay override keys in base
/// - Arrays, strings, numbers, booleans are replaced entirely
/// - An explicit null in overlay replaces the base value
///
/// # Example
/// ```
/// use serde_json::json;
/// use quant_theme::config::deep_merge;
///
/// let base = json!({"line": {"width": 2, "dash": "solid"}});
/// let overlay = json!({"line": {"dash": "dash"}});
/// let result = deep_merge(base, overlay);
/// assert_eq!(result, json!({"line": {"width": 2, "dash": "dash"}}));
/// ```
pub fn deep_merge(base: Value, overlay: Value) -> Value {
    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            update(&mut base_map, overlay_map);
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

/// Merge `overlay` into `target` in place.
pub fn update(target: &mut Map<String, Value>, overlay: Map<String, Value>) {
    for (key, overlay_value) in overlay {
        let merged = match target.remove(&key) {
            Some(base_value) => deep_merge(base_value, overlay_value),
            None => overlay_value,
        };
        target.insert(key, merged);
    }
}

/// Merge multiple values in order, with later values taking precedence.
pub fn deep_merge_all(values: impl IntoIterator<Item = Value>) -> Value {
    values.into_iter().fold(Value::Null, deep_merge)
}
