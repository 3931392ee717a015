//! # Error Types
//!
//! Domain-specific error types for novatime-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  novatime-core errors (this file)                                      │
//! │  ├── CoreError        - Catalog/domain rule failures                   │
//! │  └── ValidationError  - Form and input validation failures             │
//! │                                                                         │
//! │  novatime-db errors (separate crate)                                   │
//! │  └── DbError          - Slot persistence failures                      │
//! │                                                                         │
//! │  storefront errors (in app)                                            │
//! │  └── ApiError         - What the view layer sees (serialized)          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → View layer             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Bad credentials and duplicate registrations are NOT errors: the auth
//! store reports them as `false`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Watch id is not in the catalog.
    ///
    /// ## When This Occurs
    /// - Adding a deleted watch to the cart
    /// - Editing or deleting an id the admin panel no longer shows
    #[error("Watch not found: {0}")]
    WatchNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value above the accepted maximum.
    #[error("{field} must be at most {max}")]
    OutOfRange { field: String, max: i64 },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match")]
    Mismatch { field: String },
}

impl ValidationError {
    /// Creates a Required error for a field.
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
