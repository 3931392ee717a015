//! # JSON-Lines IPC Bridge
//!
//! Lets a view process drive the storefront over stdin/stdout.
//!
//! ## Wire Format
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  stdin  (one request per line)                                          │
//! │  {"cmd":"login","args":{"email":"user@novatime.com","password":"…"}}    │
//! │  {"cmd":"add_to_cart","args":{"watchId":1}}                             │
//! │  {"cmd":"get_cart"}                                                     │
//! │                                                                         │
//! │  stdout (one response per line, same order)                             │
//! │  {"ok":{"success":true,"user":{…},"message":"¡Bienvenido de vuelta!"}}  │
//! │  {"ok":{"items":[…],"totals":{…},"isOpen":true}}                        │
//! │  {"error":{"code":"NOT_FOUND","message":"Watch not found: 9"}}          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Requests are handled one at a time, in order. A malformed line gets a
//! `VALIDATION_ERROR` response and the bridge keeps reading.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::commands::{auth, cart, catalog, config};
use crate::error::{ApiError, ApiResult};
use crate::state::Scope;

/// One request line.
#[derive(Debug, Clone, Deserialize)]
pub struct Request {
    pub cmd: String,
    #[serde(default)]
    pub args: Value,
}

/// One response line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Response {
    Ok(Value),
    Error(ApiError),
}

impl From<ApiResult<Value>> for Response {
    fn from(result: ApiResult<Value>) -> Self {
        match result {
            Ok(value) => Response::Ok(value),
            Err(err) => Response::Error(err),
        }
    }
}

/// Names accepted in `cmd`.
pub const COMMANDS: &[&str] = &[
    "get_session",
    "login",
    "register",
    "logout",
    "get_cart",
    "add_to_cart",
    "update_cart_item",
    "remove_from_cart",
    "clear_cart",
    "set_cart_open",
    "list_watches",
    "get_watch",
    "add_watch",
    "edit_watch",
    "delete_watch",
    "get_config",
];

/// Parses and executes one request line.
pub async fn handle_line(scope: &Scope, line: &str) -> Response {
    match serde_json::from_str::<Request>(line) {
        Ok(request) => dispatch(scope, request).await.into(),
        Err(e) => {
            warn!(error = %e, "Malformed request line");
            Response::Error(ApiError::validation(format!("Malformed request: {}", e)))
        }
    }
}

/// Routes a request to its command.
pub async fn dispatch(scope: &Scope, request: Request) -> ApiResult<Value> {
    let Request { cmd, args } = request;
    debug!(cmd = %cmd, "Dispatching request");

    match cmd.as_str() {
        "get_session" => encode(auth::get_session(scope)),
        "login" => encode(auth::login(scope, parse(&cmd, args)?).await?),
        "register" => encode(auth::register(scope, parse(&cmd, args)?).await?),
        "logout" => encode(auth::logout(scope).await?),

        "get_cart" => encode(cart::get_cart(scope)),
        "add_to_cart" => encode(cart::add_to_cart(scope, parse(&cmd, args)?)?),
        "update_cart_item" => encode(cart::update_cart_item(scope, parse(&cmd, args)?)),
        "remove_from_cart" => encode(cart::remove_from_cart(scope, parse(&cmd, args)?)),
        "clear_cart" => encode(cart::clear_cart(scope)),
        "set_cart_open" => encode(cart::set_cart_open(scope, parse(&cmd, args)?)),

        "list_watches" => encode(catalog::list_watches(scope)),
        "get_watch" => encode(catalog::get_watch(scope, parse(&cmd, args)?)?),
        "add_watch" => encode(catalog::add_watch(scope, parse(&cmd, args)?)?),
        "edit_watch" => encode(catalog::edit_watch(scope, parse(&cmd, args)?)?),
        "delete_watch" => encode(catalog::delete_watch(scope, parse(&cmd, args)?)?),

        "get_config" => encode(config::get_config(scope)),

        other => Err(ApiError::validation(format!("Unknown command: {}", other))),
    }
}

/// Serves requests from `reader` until EOF, writing responses to `writer`.
///
/// Returns the number of requests handled.
pub async fn serve<R, W>(scope: &Scope, reader: R, mut writer: W) -> std::io::Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    info!(commands = COMMANDS.len(), "IPC bridge ready");

    let mut lines = reader.lines();
    let mut handled = 0u64;

    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        let response = handle_line(scope, &line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
        handled += 1;
    }

    info!(handled, "IPC input closed");
    Ok(handled)
}

fn parse<T: DeserializeOwned>(cmd: &str, args: Value) -> ApiResult<T> {
    serde_json::from_value(args)
        .map_err(|e| ApiError::validation(format!("Invalid args for {}: {}", cmd, e)))
}

fn encode<T: Serialize>(value: T) -> ApiResult<Value> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::test_support::scope;
    use crate::error::ErrorCode;
    use serde_json::json;

    fn error_code(response: &Response) -> ErrorCode {
        match response {
            Response::Error(err) => err.code,
            Response::Ok(value) => panic!("expected error, got {}", value),
        }
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        let ok = serde_json::to_value(Response::Ok(json!(1))).unwrap();
        assert_eq!(ok, json!({ "ok": 1 }));

        let err = serde_json::to_value(Response::Error(ApiError::forbidden())).unwrap();
        assert_eq!(err["error"]["code"], "FORBIDDEN");
    }

    #[tokio::test]
    async fn test_malformed_lines() {
        let storefront = scope().await;
        let scope = storefront.scope();

        assert_eq!(
            error_code(&handle_line(scope, "not json").await),
            ErrorCode::ValidationError
        );
        assert_eq!(
            error_code(&handle_line(scope, r#"{"cmd":"teleport"}"#).await),
            ErrorCode::ValidationError
        );
        assert_eq!(
            error_code(&handle_line(scope, r#"{"cmd":"add_to_cart","args":{"id":1}}"#).await),
            ErrorCode::ValidationError
        );
    }

    #[tokio::test]
    async fn test_no_arg_commands_accept_missing_args() {
        let storefront = scope().await;
        let response = handle_line(storefront.scope(), r#"{"cmd":"get_cart"}"#).await;
        match response {
            Response::Ok(value) => assert_eq!(value["isOpen"], false),
            Response::Error(err) => panic!("unexpected error: {}", err),
        }
    }

    #[tokio::test]
    async fn test_every_listed_command_is_routed() {
        let storefront = scope().await;
        for cmd in COMMANDS {
            let line = json!({ "cmd": cmd }).to_string();
            if let Response::Error(err) = handle_line(storefront.scope(), &line).await {
                assert!(
                    !err.message.starts_with("Unknown command"),
                    "{} is not routed",
                    cmd
                );
            }
        }
    }

    #[tokio::test]
    async fn test_serve_session() {
        let storefront = scope().await;
        let input = concat!(
            r#"{"cmd":"login","args":{"email":"admin@novatime.com","password":"admin123"}}"#,
            "\n\n",
            r#"{"cmd":"add_to_cart","args":{"watchId":1}}"#,
            "\n",
            r#"{"cmd":"add_to_cart","args":{"watchId":9}}"#,
            "\n",
            r#"{"cmd":"delete_watch","args":{"id":5}}"#,
            "\n",
        );

        let mut output = Vec::new();
        let handled = serve(storefront.scope(), input.as_bytes(), &mut output)
            .await
            .unwrap();
        assert_eq!(handled, 4);

        let lines: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();

        assert_eq!(lines[0]["ok"]["success"], true);
        assert_eq!(lines[0]["ok"]["user"]["role"], "admin");
        assert_eq!(lines[1]["ok"]["totals"]["totalItems"], 1);
        assert_eq!(lines[2]["error"]["code"], "NOT_FOUND");
        assert_eq!(lines[3]["ok"]["id"], 5);
    }

    #[tokio::test]
    async fn test_serve_survives_oversized_quantity() {
        let storefront = scope().await;
        let input = concat!(
            r#"{"cmd":"add_to_cart","args":{"watchId":1}}"#,
            "\n",
            r#"{"cmd":"update_cart_item","args":{"watchId":1,"quantity":5000000000}}"#,
            "\n",
            r#"{"cmd":"add_to_cart","args":{"watchId":1}}"#,
            "\n",
            r#"{"cmd":"get_cart"}"#,
            "\n",
        );

        let mut output = Vec::new();
        let handled = serve(storefront.scope(), input.as_bytes(), &mut output)
            .await
            .unwrap();
        assert_eq!(handled, 4);

        let last: Value = String::from_utf8(output)
            .unwrap()
            .lines()
            .last()
            .map(|l| serde_json::from_str(l).unwrap())
            .unwrap();
        assert_eq!(last["ok"]["items"][0]["quantity"], u64::from(u32::MAX));
        assert_eq!(last["ok"]["totals"]["totalItems"], u64::from(u32::MAX));
    }
}
