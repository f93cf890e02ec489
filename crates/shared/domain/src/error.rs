//! Domain-level errors.
//!
//! These errors represent invalid data shapes and filter values.
//! They are independent of infrastructure concerns (database, sessions).

use thiserror::Error;
use validator::ValidationErrors;

/// Domain-specific errors for rule violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed for a field or input
    #[error("Validation error: {0}")]
    Validation(String),

    /// A filter or ordering value could not be interpreted
    #[error("Invalid filter: {0}")]
    InvalidFilter(String),
}

impl DomainError {
    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        DomainError::Validation(msg.into())
    }

    /// Create an invalid filter error
    pub fn invalid_filter(msg: impl Into<String>) -> Self {
        DomainError::InvalidFilter(msg.into())
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        DomainError::Validation(format_validation_errors(&errors))
    }
}

/// Format validation errors into a single readable line, sorted by field
fn format_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    fields
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for domain operations
pub type DomainResult<T> = Result<T, DomainError>;
