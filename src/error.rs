//! Error types for Belongings.
//!
//! Provides structured error handling with:
//! - Machine-readable error codes (`ErrorCode`)
//! - Category-based exit codes (2=storage, 3=not_found, 4=validation, etc.)
//! - Retryability flags
//! - Context-aware recovery hints
//! - Structured JSON output for piped / non-TTY consumers

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for Belongings operations.
pub type Result<T> = std::result::Result<T, Error>;

// ── Error Code ────────────────────────────────────────────────

/// Machine-readable error codes grouped by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    // Storage (exit 2)
    StorageUnavailable,
    NotInitialized,
    AlreadyInitialized,
    DatabaseError,
    DecodeError,

    // Not Found (exit 3)
    ItemNotFound,

    // Validation (exit 4)
    ValidationError,
    InvalidStatus,
    UnknownCategory,

    // Constraint (exit 5)
    ConstraintViolation,

    // Config (exit 7)
    ConfigError,

    // I/O (exit 8)
    IoError,
    JsonError,

    // Internal (exit 1)
    InternalError,
}

impl ErrorCode {
    /// Machine-readable SCREAMING_SNAKE code string.
    #[must_use]
    pub const fn as_str(&self) -> &str {
        match self {
            Self::StorageUnavailable => "STORAGE_UNAVAILABLE",
            Self::NotInitialized => "NOT_INITIALIZED",
            Self::AlreadyInitialized => "ALREADY_INITIALIZED",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DecodeError => "DECODE_ERROR",
            Self::ItemNotFound => "ITEM_NOT_FOUND",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidStatus => "INVALID_STATUS",
            Self::UnknownCategory => "UNKNOWN_CATEGORY",
            Self::ConstraintViolation => "CONSTRAINT_VIOLATION",
            Self::ConfigError => "CONFIG_ERROR",
            Self::IoError => "IO_ERROR",
            Self::JsonError => "JSON_ERROR",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    /// Category-based exit code.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::InternalError => 1,
            Self::StorageUnavailable
            | Self::NotInitialized
            | Self::AlreadyInitialized
            | Self::DatabaseError
            | Self::DecodeError => 2,
            Self::ItemNotFound => 3,
            Self::ValidationError | Self::InvalidStatus | Self::UnknownCategory => 4,
            Self::ConstraintViolation => 5,
            Self::ConfigError => 7,
            Self::IoError | Self::JsonError => 8,
        }
    }

    /// Whether the caller should retry with corrected input.
    ///
    /// Nothing is retried automatically; this only tells the caller that
    /// fixing the input can succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ValidationError
                | Self::InvalidStatus
                | Self::UnknownCategory
                | Self::ConstraintViolation
        )
    }
}

// ── Error Enum ────────────────────────────────────────────────

/// Errors that can occur in Belongings operations.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Storage unavailable at {path}: {reason}")]
    StorageUnavailable { path: PathBuf, reason: String },

    #[error("Not initialized: the item store has not been opened")]
    NotInitialized,

    #[error("Already initialized at {path}")]
    AlreadyInitialized { path: PathBuf },

    #[error("An item with id '{id}' already exists")]
    ConstraintViolation { id: String },

    #[error("Invalid {field}: {message}")]
    Validation { field: &'static str, message: String },

    #[error("Invalid status: {input}")]
    InvalidStatus {
        input: String,
        suggestion: Option<String>,
    },

    #[error("Unknown category: {input}")]
    UnknownCategory {
        input: String,
        suggestion: Option<String>,
    },

    #[error("Item not found: {id}")]
    ItemNotFound { id: String, similar: Vec<String> },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Background task failed: {0}")]
    Task(#[from] tokio::task::JoinError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Build a validation error for a single form field.
    pub fn validation(field: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            field,
            message: message.into(),
        }
    }

    /// Map this error to its structured `ErrorCode`.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::StorageUnavailable { .. } => ErrorCode::StorageUnavailable,
            Self::NotInitialized => ErrorCode::NotInitialized,
            Self::AlreadyInitialized { .. } => ErrorCode::AlreadyInitialized,
            Self::ConstraintViolation { .. } => ErrorCode::ConstraintViolation,
            Self::Validation { .. } => ErrorCode::ValidationError,
            Self::InvalidStatus { .. } => ErrorCode::InvalidStatus,
            Self::UnknownCategory { .. } => ErrorCode::UnknownCategory,
            Self::ItemNotFound { .. } => ErrorCode::ItemNotFound,
            Self::Database(
                rusqlite::Error::FromSqlConversionFailure(..)
                | rusqlite::Error::InvalidColumnType(..),
            ) => ErrorCode::DecodeError,
            Self::Database(_) => ErrorCode::DatabaseError,
            Self::Io(_) => ErrorCode::IoError,
            Self::Json(_) => ErrorCode::JsonError,
            Self::Config(_) => ErrorCode::ConfigError,
            Self::Task(_) | Self::Other(_) => ErrorCode::InternalError,
        }
    }

    /// Category-based exit code, delegating to the `ErrorCode`.
    #[must_use]
    pub const fn exit_code(&self) -> u8 {
        self.error_code().exit_code()
    }

    /// Context-aware recovery hint.
    ///
    /// Returns `None` if no actionable suggestion exists.
    #[must_use]
    pub fn hint(&self) -> Option<String> {
        match self {
            Self::StorageUnavailable { path, .. } => Some(format!(
                "Check that {} is writable, or pass a different path with --db.",
                path.display()
            )),

            Self::NotInitialized => Some("Run `bl init` to create the item store".to_string()),

            Self::AlreadyInitialized { path } => Some(format!(
                "Database already exists at {}. Use `--force` to recreate it.",
                path.display()
            )),

            Self::ConstraintViolation { .. } => {
                Some("Ids are generated on `bl add`; use `bl edit <id>` to change an existing item.".to_string())
            }

            Self::InvalidStatus { suggestion, .. } => Some(match suggestion {
                Some(s) => format!("Did you mean: {s}? Valid statuses: in-use, sold, retired"),
                None => "Valid statuses: in-use, sold, retired".to_string(),
            }),

            Self::UnknownCategory { suggestion, .. } => {
                let valid = crate::model::CATEGORIES
                    .iter()
                    .map(|c| c.id)
                    .collect::<Vec<_>>()
                    .join(", ");
                Some(match suggestion {
                    Some(s) => format!("Did you mean: {s}? Valid categories: {valid}"),
                    None => format!("Valid categories: {valid}"),
                })
            }

            Self::ItemNotFound { id, similar } => {
                if similar.is_empty() {
                    Some(format!(
                        "No item with ID '{id}'. Use `bl list` to see available items."
                    ))
                } else {
                    Some(format!("Did you mean: {}?", similar.join(", ")))
                }
            }

            Self::Validation { field, .. } if *field == "price" => {
                Some("Price must be a number greater than 0".to_string())
            }
            Self::Validation { field, .. } if *field == "purchase date" => {
                Some("Dates use the YYYY-MM-DD format, e.g. 2024-10-15".to_string())
            }

            Self::Validation { .. }
            | Self::Database(_)
            | Self::Io(_)
            | Self::Json(_)
            | Self::Task(_)
            | Self::Config(_)
            | Self::Other(_) => None,
        }
    }

    /// Structured JSON representation for machine consumption.
    #[must_use]
    pub fn to_structured_json(&self) -> serde_json::Value {
        let code = self.error_code();
        let mut obj = serde_json::json!({
            "error": {
                "code": code.as_str(),
                "message": self.to_string(),
                "retryable": code.is_retryable(),
                "exit_code": code.exit_code(),
            }
        });

        if let Some(hint) = self.hint() {
            obj["error"]["hint"] = serde_json::Value::String(hint);
        }

        obj
    }

    /// Whether a rusqlite error is a uniqueness/primary-key violation.
    pub(crate) fn is_constraint_violation(err: &rusqlite::Error) -> bool {
        matches!(
            err,
            rusqlite::Error::SqliteFailure(e, _)
                if e.code == rusqlite::ErrorCode::ConstraintViolation
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_by_category() {
        assert_eq!(Error::NotInitialized.exit_code(), 2);
        assert_eq!(
            Error::ItemNotFound { id: "x".into(), similar: vec![] }.exit_code(),
            3
        );
        assert_eq!(Error::validation("name", "required").exit_code(), 4);
        assert_eq!(Error::ConstraintViolation { id: "1".into() }.exit_code(), 5);
        assert_eq!(Error::Other("boom".into()).exit_code(), 1);
    }

    #[test]
    fn test_decode_failures_have_their_own_code() {
        let err = Error::Database(rusqlite::Error::InvalidColumnType(
            4,
            "price".to_string(),
            rusqlite::types::Type::Text,
        ));
        assert_eq!(err.error_code(), ErrorCode::DecodeError);
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_structured_json_includes_hint() {
        let err = Error::InvalidStatus {
            input: "sould".into(),
            suggestion: Some("sold".into()),
        };
        let json = err.to_structured_json();
        assert_eq!(json["error"]["code"], "INVALID_STATUS");
        assert_eq!(json["error"]["retryable"], true);
        assert!(json["error"]["hint"].as_str().unwrap().contains("sold"));
    }

    #[test]
    fn test_not_found_hint_lists_similar_ids() {
        let err = Error::ItemNotFound {
            id: "12".into(),
            similar: vec!["1".into(), "2".into()],
        };
        assert_eq!(err.hint().as_deref(), Some("Did you mean: 1, 2?"));
    }
}
