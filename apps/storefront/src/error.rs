//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in NovaTime                               │
//! │                                                                         │
//! │  {"cmd":"add_watch","args":{...}}                                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function → Result<T, ApiError>                          │  │
//! │  │         │                                                        │  │
//! │  │  Not logged in / not admin? ── ApiError::unauthorized/forbidden ─┤  │
//! │  │         │                                                        │  │
//! │  │  Draft invalid? ─── CoreError::Validation ──────► ApiError ──────┤  │
//! │  │         │                                                        │  │
//! │  │  Slot write failed? ─── DbError::QueryFailed ──► ApiError ───────┤  │
//! │  │         │                                                        │  │
//! │  │  Success ───────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"error":{"code":"FORBIDDEN","message":"Admin access required"}}       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Failed logins are not errors: they come back as
//! `AuthResponse { success: false }`.

use serde::{Deserialize, Serialize};

use crate::state::ConfigError;
use novatime_core::{CoreError, ValidationError};
use novatime_db::DbError;

/// API error returned from commands.
///
/// ```json
/// { "code": "NOT_FOUND", "message": "Watch not found: 42" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Persisted slot could not be read or written (500)
    DatabaseError,

    /// No one is logged in (401)
    Unauthorized,

    /// Logged in, but not an admin (403)
    Forbidden,

    /// Configuration could not be loaded
    ConfigError,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an unauthorized error.
    pub fn unauthorized() -> Self {
        ApiError::new(ErrorCode::Unauthorized, "Login required")
    }

    /// Creates a forbidden error.
    pub fn forbidden() -> Self {
        ApiError::new(ErrorCode::Forbidden, "Admin access required")
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
///
/// Internal details are logged, never returned.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::ConnectionFailed(e) => {
                tracing::error!("Database connection failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Database migration failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database migration failed")
            }
            DbError::QueryFailed(e) => {
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::InvalidSlotValue { key, reason } => {
                tracing::error!(key = %key, "Invalid slot value: {}", reason);
                ApiError::new(ErrorCode::DatabaseError, "Stored session is unreadable")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::WatchNotFound(id) => ApiError::not_found("Watch", id),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for commands.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::not_found("Watch", 42)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "code": "NOT_FOUND", "message": "Watch not found: 42" })
        );
    }

    #[test]
    fn test_core_errors_map_to_codes() {
        assert_eq!(
            ApiError::from(CoreError::WatchNotFound(7)).code,
            ErrorCode::NotFound
        );
        let api = ApiError::from(CoreError::from(ValidationError::required("name")));
        assert_eq!(api.code, ErrorCode::ValidationError);
        assert_eq!(api.message, "name is required");
    }

    #[test]
    fn test_db_errors_hide_details() {
        let api = ApiError::from(DbError::QueryFailed("disk I/O error at page 9".into()));
        assert_eq!(api.code, ErrorCode::DatabaseError);
        assert!(!api.message.contains("page 9"));
    }
}
