//! Base skeleton all themes are merged onto.

use crate::error::{ThemeError, ThemeResult};
use serde_json::Value;

const SKELETON: &str = include_str!("../../config/skeleton.yaml");

/// Return a fresh copy of the base skeleton.
pub fn get_skeleton() -> ThemeResult<Value> {
    serde_yaml::from_str(SKELETON).map_err(ThemeError::improper_skeleton)
}
