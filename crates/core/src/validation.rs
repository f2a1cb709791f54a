//! Field validation for build descriptors
//!
//! Provides a fluent validator used for:
//! - Application identifiers and namespaces
//! - Numeric bounds (SDK levels, version codes)
//!
//! # Example
//!
//! ```rust
//! use variantctl_core::validation::Validator;
//!
//! let result = Validator::new()
//!     .required("application_id", "com.example.client_mobile")
//!     .application_id("application_id", "com.example.client_mobile")
//!     .range("min_sdk", 24, 1, 100)
//!     .validate();
//!
//! assert!(result.is_valid());
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Reverse-domain identifier: at least two dot-separated segments, each
/// starting with a letter.
static APPLICATION_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$")
        .expect("application id pattern is valid")
});

/// Validation error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationError {
    /// Field that failed validation
    pub field: String,
    /// Error message
    pub message: String,
    /// Error code
    pub code: String,
    /// Expected value (if applicable)
    pub expected: Option<String>,
    /// Actual value (if applicable)
    pub actual: Option<String>,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validation result
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    /// Create a new empty result
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if validation passed
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Get all errors
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Add an error
    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    /// Join all error messages into one line
    pub fn summary(&self) -> String {
        self.errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Fluent validator builder
pub struct Validator {
    result: ValidationResult,
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

impl Validator {
    /// Create a new validator
    pub fn new() -> Self {
        Self {
            result: ValidationResult::new(),
        }
    }

    /// Validate that a field is not empty
    pub fn required(mut self, field: &str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: "Field is required".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }
        self
    }

    /// Validate a reverse-domain application id (`com.example.app`)
    ///
    /// Empty values are left to [`Validator::required`].
    pub fn application_id(mut self, field: &str, value: &str) -> Self {
        if !value.is_empty() && !APPLICATION_ID.is_match(value) {
            self.result.add_error(pattern_error(
                field,
                value,
                "reverse-domain form (e.g. com.example.app)",
            ));
        }
        self
    }

    /// Validate a numeric range
    pub fn range<T: PartialOrd + std::fmt::Display>(
        mut self,
        field: &str,
        value: T,
        min: T,
        max: T,
    ) -> Self {
        if value < min || value > max {
            self.result.add_error(ValidationError {
                field: field.to_string(),
                message: format!("Must be between {} and {}", min, max),
                code: "RANGE".to_string(),
                expected: Some(format!("{} - {}", min, max)),
                actual: Some(value.to_string()),
            });
        }
        self
    }

    /// Complete validation and return result
    pub fn validate(self) -> ValidationResult {
        self.result
    }
}

fn pattern_error(field: &str, value: &str, description: &str) -> ValidationError {
    ValidationError {
        field: field.to_string(),
        message: format!("Must match {}", description),
        code: "PATTERN".to_string(),
        expected: Some(description.to_string()),
        actual: Some(value.to_string()),
    }
}
