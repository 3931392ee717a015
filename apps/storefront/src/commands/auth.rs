//! # Auth Commands
//!
//! Commands backing the login/register modal and the account menu.
//!
//! ## Login Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {"cmd":"login","args":{"email":"admin@novatime.com","password":"…"}}   │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  validate_login ── empty field? ──► VALIDATION_ERROR                    │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  AuthStore::login ── sleep(latency) ── directory lookup                 │
//! │        │                                                                │
//! │        ├── match    ─► { success: true,  user, "¡Bienvenido de vuelta!"}│
//! │        └── no match ─► { success: false, "Email o contraseña …" }       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `message` is the text the view shows as a transient notification.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ApiError, ApiResult};
use crate::state::{AuthStore, Scope};
use novatime_core::validation::{validate_login, validate_registration};
use novatime_core::{User, ValidationError};

pub const MSG_LOGIN_OK: &str = "¡Bienvenido de vuelta!";
pub const MSG_LOGIN_FAILED: &str = "Email o contraseña incorrectos";
pub const MSG_REGISTER_OK: &str = "¡Cuenta creada exitosamente!";
pub const MSG_EMAIL_TAKEN: &str = "El email ya está registrado";
pub const MSG_PASSWORD_MISMATCH: &str = "Las contraseñas no coinciden";
pub const MSG_PASSWORD_TOO_SHORT: &str = "La contraseña debe tener al menos 6 caracteres";
pub const MSG_LOGGED_OUT: &str = "Sesión cerrada";

/// Outcome of login or register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub success: bool,
    pub user: Option<User>,
    pub message: String,
}

/// Who is logged in, for headers and route guards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user: Option<User>,
    pub is_admin: bool,
    pub is_loading: bool,
}

impl From<&AuthStore> for SessionResponse {
    fn from(auth: &AuthStore) -> Self {
        let user = auth.current_user();
        SessionResponse {
            is_admin: user.as_ref().is_some_and(User::is_admin),
            user,
            is_loading: auth.is_loading(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginArgs {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterArgs {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Gets the current session.
pub fn get_session(scope: &Scope) -> SessionResponse {
    debug!("get_session command");
    SessionResponse::from(scope.state::<AuthStore>())
}

/// Logs in with a demo account.
///
/// Leading and trailing whitespace is trimmed from the email before the
/// lookup, as an email input would; the rest of the email and the whole
/// password must match exactly.
///
/// ## Returns
/// `success: false` for unknown credentials; the session is unchanged.
pub async fn login(scope: &Scope, args: LoginArgs) -> ApiResult<AuthResponse> {
    debug!(email = %args.email, "login command");
    validate_login(&args.email, &args.password)?;

    let auth = scope.state::<AuthStore>();
    let success = auth.login(args.email.trim(), &args.password).await?;

    Ok(AuthResponse {
        success,
        user: auth.current_user(),
        message: (if success { MSG_LOGIN_OK } else { MSG_LOGIN_FAILED }).to_string(),
    })
}

/// Registers a shopper and logs them in.
///
/// ## Validation
/// Confirmation must match, password ≥ 6 characters, name present,
/// email well-formed. Failures are `VALIDATION_ERROR` with the form's
/// own wording for the password checks.
pub async fn register(scope: &Scope, args: RegisterArgs) -> ApiResult<AuthResponse> {
    debug!(email = %args.email, "register command");
    validate_registration(
        &args.name,
        &args.email,
        &args.password,
        &args.confirm_password,
    )
    .map_err(form_error)?;

    let auth = scope.state::<AuthStore>();
    let success = auth
        .register(args.name.trim(), args.email.trim(), &args.password)
        .await?;

    Ok(AuthResponse {
        success,
        user: auth.current_user(),
        message: (if success { MSG_REGISTER_OK } else { MSG_EMAIL_TAKEN }).to_string(),
    })
}

/// Logs out and clears the persisted session.
pub async fn logout(scope: &Scope) -> ApiResult<SessionResponse> {
    debug!("logout command");
    let auth = scope.state::<AuthStore>();
    auth.logout().await?;
    Ok(SessionResponse::from(auth))
}

fn form_error(err: ValidationError) -> ApiError {
    match err {
        ValidationError::Mismatch { .. } => ApiError::validation(MSG_PASSWORD_MISMATCH),
        ValidationError::TooShort { ref field, .. } if field == "password" => {
            ApiError::validation(MSG_PASSWORD_TOO_SHORT)
        }
        other => ApiError::from(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::scope;
    use crate::error::ErrorCode;
    use novatime_core::Role;

    fn register_args(password: &str, confirm: &str) -> RegisterArgs {
        RegisterArgs {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            password: password.into(),
            confirm_password: confirm.into(),
        }
    }

    #[tokio::test]
    async fn test_login_success_message() {
        let storefront = scope().await;
        let response = login(
            storefront.scope(),
            LoginArgs {
                email: "admin@novatime.com".into(),
                password: "admin123".into(),
            },
        )
        .await
        .unwrap();

        assert!(response.success);
        assert_eq!(response.message, MSG_LOGIN_OK);
        assert_eq!(response.user.unwrap().role, Role::Admin);
        assert!(get_session(storefront.scope()).is_admin);
    }

    #[tokio::test]
    async fn test_login_failure_is_not_an_error() {
        let storefront = scope().await;
        let response = login(
            storefront.scope(),
            LoginArgs {
                email: "admin@novatime.com".into(),
                password: "nope".into(),
            },
        )
        .await
        .unwrap();

        assert!(!response.success);
        assert_eq!(response.message, MSG_LOGIN_FAILED);
        assert!(response.user.is_none());
    }

    #[tokio::test]
    async fn test_login_trims_email_only() {
        let storefront = scope().await;
        let padded = |email: &str, password: &str| LoginArgs {
            email: email.into(),
            password: password.into(),
        };

        let response = login(storefront.scope(), padded("  user@novatime.com ", "user123"))
            .await
            .unwrap();
        assert!(response.success);

        let response = login(storefront.scope(), padded("admin@novatime.com", " admin123"))
            .await
            .unwrap();
        assert!(!response.success);
        assert_eq!(response.user.unwrap().email, "user@novatime.com");
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let storefront = scope().await;
        let err = login(
            storefront.scope(),
            LoginArgs {
                email: " ".into(),
                password: "x".into(),
            },
        )
        .await
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_register_form_messages() {
        let storefront = scope().await;

        let err = register(storefront.scope(), register_args("secret1", "secret2"))
            .await
            .unwrap_err();
        assert_eq!(err.message, MSG_PASSWORD_MISMATCH);

        let err = register(storefront.scope(), register_args("abc", "abc"))
            .await
            .unwrap_err();
        assert_eq!(err.message, MSG_PASSWORD_TOO_SHORT);

        let mut args = register_args("secret1", "secret1");
        args.email = "not-an-email".into();
        let err = register(storefront.scope(), args).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_register_and_logout() {
        let storefront = scope().await;

        let response = register(storefront.scope(), register_args("secret1", "secret1"))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.message, MSG_REGISTER_OK);
        assert_eq!(response.user.unwrap().name, "Ana");

        let session = logout(storefront.scope()).await.unwrap();
        assert!(session.user.is_none());
        assert!(!session.is_admin);
    }

    #[tokio::test]
    async fn test_register_taken_email() {
        let storefront = scope().await;
        let mut args = register_args("secret1", "secret1");
        args.email = "user@novatime.com".into();

        let response = register(storefront.scope(), args).await.unwrap();
        assert!(!response.success);
        assert_eq!(response.message, MSG_EMAIL_TAKEN);
        assert!(get_session(storefront.scope()).user.is_none());
    }
}
