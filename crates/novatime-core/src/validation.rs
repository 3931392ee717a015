//! # Validation Module
//!
//! Input validation for the auth forms and the admin catalog editor.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: View layer                                                   │
//! │  ├── Required/minLength hints on the inputs                            │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command (Rust)                                    │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: form and catalog rules                               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Stores                                                       │
//! │  └── Duplicate email / unknown id checks                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use novatime_core::validation::{validate_email, validate_registration};
//!
//! assert!(validate_email("ana@example.com").is_ok());
//! assert!(validate_registration("Ana", "ana@example.com", "secret1", "secret1").is_ok());
//! assert!(validate_registration("Ana", "ana@example.com", "secret1", "secret2").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::WatchDraft;
use crate::{MAX_NAME_LENGTH, MAX_WATCH_PRICE, MIN_PASSWORD_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Auth Form Validators
// =============================================================================

/// Validates an email address.
///
/// ## Rules
/// - Must not be empty
/// - Exactly one `@`, with a non-empty local part
/// - Domain contains a `.` that is neither first nor last
/// - No whitespace
pub fn validate_email(email: &str) -> ValidationResult<()> {
    let email = email.trim();

    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("expected name@domain"));
    }

    if domain.starts_with('.') || domain.ends_with('.') || !domain.contains('.') {
        return Err(invalid("domain must look like example.com"));
    }

    Ok(())
}

/// Validates a display name (register form).
pub fn validate_display_name(name: &str) -> ValidationResult<()> {
    validate_text_field("name", name)
}

/// Validates a new password.
///
/// ## Rules
/// - At least [`MIN_PASSWORD_LENGTH`] characters
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(ValidationError::TooShort {
            field: "password".to_string(),
            min: MIN_PASSWORD_LENGTH,
        });
    }

    Ok(())
}

/// Validates the whole register form.
///
/// Checks run in the order the form reports them: confirmation first,
/// then length, then the remaining fields.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> ValidationResult<()> {
    if password != confirm_password {
        return Err(ValidationError::Mismatch {
            field: "password confirmation".to_string(),
        });
    }

    validate_password(password)?;
    validate_display_name(name)?;
    validate_email(email)?;

    Ok(())
}

/// Validates the login form: both fields must be filled in.
///
/// Format is not checked here; an unknown email simply fails to log in.
pub fn validate_login(email: &str, password: &str) -> ValidationResult<()> {
    if email.trim().is_empty() {
        return Err(ValidationError::required("email"));
    }

    if password.is_empty() {
        return Err(ValidationError::required("password"));
    }

    Ok(())
}

// =============================================================================
// Catalog Validators
// =============================================================================

/// Validates an admin watch draft.
///
/// ## Rules
/// - `name`, `brand`: required, at most [`MAX_NAME_LENGTH`] characters
/// - `price`: positive, at most [`MAX_WATCH_PRICE`]
/// - `original_price`: not negative (0 means "no original price"), at most
///   [`MAX_WATCH_PRICE`]
/// - `image`: required
///
/// ## Example
/// ```rust
/// use novatime_core::validation::validate_watch_draft;
/// use novatime_core::WatchDraft;
///
/// let mut draft = WatchDraft {
///     name: "GUESS Executive Black".into(),
///     brand: "GUESS".into(),
///     price: 459_900,
///     original_price: 599_900,
///     image: "/images/17.jpeg".into(),
///     description: String::new(),
///     features: vec![],
///     in_stock: true,
/// };
/// assert!(validate_watch_draft(&draft).is_ok());
///
/// draft.price = 0;
/// assert!(validate_watch_draft(&draft).is_err());
/// ```
pub fn validate_watch_draft(draft: &WatchDraft) -> ValidationResult<()> {
    validate_text_field("name", &draft.name)?;
    validate_text_field("brand", &draft.brand)?;

    if draft.price <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    if draft.original_price < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "originalPrice".to_string(),
        });
    }

    if draft.price > MAX_WATCH_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            max: MAX_WATCH_PRICE,
        });
    }

    if draft.original_price > MAX_WATCH_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "originalPrice".to_string(),
            max: MAX_WATCH_PRICE,
        });
    }

    if draft.image.trim().is_empty() {
        return Err(ValidationError::required("image"));
    }

    Ok(())
}

fn validate_text_field(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
