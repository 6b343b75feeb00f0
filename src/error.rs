//! Structured error types for theming operations.

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Error codes for programmatic error handling.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Caller input
    InvalidTheme,
    InvalidKeyword,
    InvalidArgument,
    InvalidFigure,

    // Embedded assets
    ImproperSkeleton,
    ImproperTheme,

    InternalError,
}

/// Structured error for theming and template operations.
#[derive(Debug, Error, Serialize)]
#[error("{message}")]
pub struct ThemeError {
    pub code: ErrorCode,
    pub message: String,
    /// Component or argument the error refers to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl ThemeError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            field: None,
        }
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    // Convenience constructors

    pub fn invalid_theme(theme: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InvalidTheme, format!("Invalid theme '{}'.", theme))
    }

    /// A key outside the allow-list of `component`.
    pub fn invalid_keyword(component: &str, key: &str) -> Self {
        Self::new(
            ErrorCode::InvalidKeyword,
            format!("Invalid keyword '{}'.", key),
        )
        .with_field(component)
    }

    /// A convenience argument whose shape could not be coerced.
    pub fn invalid_argument(name: &str, value: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidArgument,
            format!("Invalid {} '{}'.", name, value),
        )
        .with_field(name)
    }

    pub fn invalid_figure(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::InvalidFigure,
            format!("Invalid figure: {}", reason),
        )
    }

    pub fn improper_skeleton(reason: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ImproperSkeleton,
            format!(
                "Improperly configured skeleton ({}). Consider reinstalling quant-theme.",
                reason
            ),
        )
    }

    pub fn improper_theme(theme: impl fmt::Display) -> Self {
        Self::new(
            ErrorCode::ImproperTheme,
            format!("Improperly configured theme '{}'.", theme),
        )
    }

    pub fn internal(err: impl fmt::Display) -> Self {
        Self::new(ErrorCode::InternalError, err.to_string())
    }
}

impl From<serde_json::Error> for ThemeError {
    fn from(err: serde_json::Error) -> Self {
        ThemeError::internal(err)
    }
}

/// Result type for theming operations.
pub type ThemeResult<T> = std::result::Result<T, ThemeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_keyword_message_and_field() {
        let err = ThemeError::invalid_keyword("colors", "purple");
        assert_eq!(err.code, ErrorCode::InvalidKeyword);
        assert_eq!(err.to_string(), "Invalid keyword 'purple'.");
        assert_eq!(err.field.as_deref(), Some("colors"));
    }

    #[test]
    fn test_serializes_code_in_screaming_case() {
        let err = ThemeError::invalid_theme("neon");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "INVALID_THEME");
        assert_eq!(json["message"], "Invalid theme 'neon'.");
        assert!(json.get("field").is_none());
    }
}
