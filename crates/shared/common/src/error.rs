//! Unified error handling for repository operations.
//!
//! "Not found" is not part of the normal error path: reads, updates and
//! deletes return `Option`, and callers opt into [`RepoError::NotFound`]
//! through [`OptionExt`].

use domain::DomainError;
use thiserror::Error;

/// Repository error types
#[derive(Error, Debug)]
pub enum RepoError {
    // Lifecycle
    #[error("SessionManager is not initialized")]
    NotInitialized,

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    #[error("Multiple rows found in {table} where one was expected")]
    MultipleResults { table: String },

    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    // Validation & configuration
    #[error("{0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    // External service errors
    #[cfg(feature = "database")]
    #[error("Database error: {0}")]
    Database(sea_orm::DbErr),
}

impl RepoError {
    /// Stable error code for logs
    pub fn code(&self) -> &'static str {
        match self {
            RepoError::NotInitialized => "NOT_INITIALIZED",
            RepoError::NotFound => "NOT_FOUND",
            RepoError::MultipleResults { .. } => "MULTIPLE_RESULTS",
            RepoError::ConstraintViolation(_) => "CONSTRAINT_VIOLATION",
            RepoError::Validation(_) => "VALIDATION_ERROR",
            RepoError::Configuration(_) => "CONFIGURATION_ERROR",
            #[cfg(feature = "database")]
            RepoError::Database(_) => "DATABASE_ERROR",
        }
    }
}

// =============================================================================
// Database Error Conversion
// =============================================================================

/// Store-reported constraint violations are lifted out of the generic
/// database variant so callers can match on them.
#[cfg(feature = "database")]
impl From<sea_orm::DbErr> for RepoError {
    fn from(err: sea_orm::DbErr) -> Self {
        use sea_orm::SqlErr;

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(msg)) => RepoError::ConstraintViolation(msg),
            Some(SqlErr::ForeignKeyConstraintViolation(msg)) => {
                RepoError::ConstraintViolation(msg)
            }
            _ => RepoError::Database(err),
        }
    }
}

// =============================================================================
// Domain Error Conversion
// =============================================================================

impl From<DomainError> for RepoError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::Validation(msg) => RepoError::Validation(msg),
            DomainError::InvalidFilter(msg) => RepoError::Configuration(msg),
        }
    }
}

/// Result type alias
pub type RepoResult<T> = Result<T, RepoError>;

/// Extension trait for Option -> RepoError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> RepoResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> RepoResult<T> {
        self.ok_or(RepoError::NotFound)
    }
}

/// Convenience constructors
impl RepoError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        RepoError::Configuration(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        RepoError::Validation(msg.into())
    }

    pub fn multiple_results(table: impl Into<String>) -> Self {
        RepoError::MultipleResults {
            table: table.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_errors_map_to_repo_errors() {
        let err = RepoError::from(DomainError::validation("bad email"));
        assert!(matches!(err, RepoError::Validation(ref msg) if msg == "bad email"));
        assert_eq!(err.code(), "VALIDATION_ERROR");

        let err = RepoError::from(DomainError::invalid_filter("bad direction"));
        assert_eq!(err.code(), "CONFIGURATION_ERROR");
    }

    #[test]
    fn test_ok_or_not_found() {
        assert!(matches!(Some(1).ok_or_not_found(), Ok(1)));
        assert!(matches!(
            None::<i32>.ok_or_not_found(),
            Err(RepoError::NotFound)
        ));
    }

    #[test]
    fn test_multiple_results_message_names_table() {
        let err = RepoError::multiple_results("users");
        assert_eq!(
            err.to_string(),
            "Multiple rows found in users where one was expected"
        );
    }

    #[cfg(feature = "database")]
    #[test]
    fn test_generic_db_error_stays_database() {
        let err = RepoError::from(sea_orm::DbErr::Custom("boom".to_string()));
        assert_eq!(err.code(), "DATABASE_ERROR");
    }
}
