//! Request Validation Module
//!
//! Provides form validation and input sanitization for security.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::error::AppError;

/// Maximum length of a display name
pub const MAX_DISPLAY_NAME_LENGTH: usize = 64;

/// Maximum length of a single guess field
pub const MAX_GUESS_LENGTH: usize = 256;

/// Validation error types
#[derive(Debug, Error, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required field '{field}' is missing")]
    MissingField { field: String },

    #[error("Field '{field}' is too long (max: {max}, got: {got})")]
    TooLong {
        field: String,
        max: usize,
        got: usize,
    },

    #[error("Field '{field}' is not a valid piece number: {value}")]
    InvalidPiece { field: String, value: String },
}

impl From<ValidationError> for AppError {
    fn from(e: ValidationError) -> Self {
        AppError::Validation(e.to_string())
    }
}

/// Validation result type
pub type ValidationResult<T> = std::result::Result<T, ValidationError>;

/// Request validator implementation
#[derive(Debug, Clone)]
pub struct RequestValidator {
    /// Maximum allowed field length
    max_field_length: usize,
}

impl Default for RequestValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestValidator {
    /// Create new validator
    pub fn new() -> Self {
        Self {
            max_field_length: MAX_GUESS_LENGTH,
        }
    }

    /// Set maximum field length
    pub fn with_max_field_length(mut self, length: usize) -> Self {
        self.max_field_length = length;
        self
    }

    /// Validate field length
    pub fn validate_length(&self, field: &str, value: &str) -> ValidationResult<()> {
        let length = value.chars().count();
        if length > self.max_field_length {
            return Err(ValidationError::TooLong {
                field: field.to_string(),
                max: self.max_field_length,
                got: length,
            });
        }
        Ok(())
    }

    /// Sanitize string input
    ///
    /// Any whitespace (tabs, newlines) becomes a plain space so word
    /// boundaries survive; remaining control characters are dropped.
    pub fn sanitize_string(input: &str) -> String {
        input
            .trim()
            .chars()
            .map(|c| if c.is_whitespace() { ' ' } else { c })
            .filter(|c| !c.is_control())
            .collect()
    }

    /// Escape for HTML text and attribute content (prevent XSS)
    pub fn escape_html(input: &str) -> String {
        let mut out = String::with_capacity(input.len());
        for c in input.chars() {
            match c {
                '&' => out.push_str("&amp;"),
                '<' => out.push_str("&lt;"),
                '>' => out.push_str("&gt;"),
                '"' => out.push_str("&quot;"),
                '\'' => out.push_str("&#x27;"),
                _ => out.push(c),
            }
        }
        out
    }
}

/// Common validation helpers
pub mod validators {
    use super::*;

    /// Sanitize and validate a display name. Empty names are allowed.
    pub fn display_name(name: &str) -> ValidationResult<String> {
        let name = RequestValidator::sanitize_string(name);
        RequestValidator::new()
            .with_max_field_length(MAX_DISPLAY_NAME_LENGTH)
            .validate_length("name", &name)?;
        Ok(name)
    }

    /// Sanitize and validate one free-text guess field.
    pub fn guess_field(field: &str, value: &str) -> ValidationResult<String> {
        let value = RequestValidator::sanitize_string(value);
        RequestValidator::new().validate_length(field, &value)?;
        Ok(value)
    }

    /// Parse a piece number from a form or query value.
    pub fn piece_id(field: &str, value: Option<&str>) -> ValidationResult<usize> {
        let value = value.ok_or_else(|| ValidationError::MissingField {
            field: field.to_string(),
        })?;
        value
            .trim()
            .parse::<usize>()
            .map_err(|_| ValidationError::InvalidPiece {
                field: field.to_string(),
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::validators::*;
    use super::*;

    #[test]
    fn test_display_name() {
        assert_eq!(display_name("  Clara\u{0}  ").unwrap(), "Clara");
        assert_eq!(display_name("").unwrap(), "");
        let long = "x".repeat(MAX_DISPLAY_NAME_LENGTH + 1);
        assert!(matches!(
            display_name(&long),
            Err(ValidationError::TooLong { max: MAX_DISPLAY_NAME_LENGTH, .. })
        ));
    }

    #[test]
    fn test_guess_field_keeps_inner_spaces() {
        assert_eq!(
            guess_field("name", " Moonlight  Sonata\n").unwrap(),
            "Moonlight  Sonata"
        );
    }

    #[test]
    fn test_guess_field_keeps_tab_separated_words_apart() {
        assert_eq!(
            guess_field("name", "Moonlight\tSonata").unwrap(),
            "Moonlight Sonata"
        );
        assert_eq!(
            guess_field("name", "Eine\r\nkleine\u{0}").unwrap(),
            "Eine  kleine"
        );
    }

    #[test]
    fn test_piece_id() {
        assert_eq!(piece_id("id", Some("12")).unwrap(), 12);
        assert_eq!(piece_id("id", Some(" 3 ")).unwrap(), 3);
        assert!(matches!(
            piece_id("id", Some("-1")),
            Err(ValidationError::InvalidPiece { .. })
        ));
        assert!(matches!(
            piece_id("id", Some("abc")),
            Err(ValidationError::InvalidPiece { .. })
        ));
        assert!(matches!(
            piece_id("id", None),
            Err(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            RequestValidator::escape_html("<b>\"Bach\" & 'sons'</b>"),
            "&lt;b&gt;&quot;Bach&quot; &amp; &#x27;sons&#x27;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_validation_error_maps_to_bad_request() {
        let err: AppError = ValidationError::MissingField {
            field: "id".into(),
        }
        .into();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
