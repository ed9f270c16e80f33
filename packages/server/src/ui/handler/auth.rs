//! HTTP Basic authentication middleware.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Response},
};
use base64::{Engine as _, engine::general_purpose::STANDARD};

use crate::ui::state::AppState;

pub const REALM: &str = "snakk";

/// Reject requests without the configured credentials.
///
/// Passes everything through when basic auth is disabled.
pub async fn require_basic_auth(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let Some((username, password)) = &state.basic_auth else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(decode_basic_credentials)
        .is_some_and(|(user, pass)| user == *username && pass == *password);

    if authorized {
        next.run(request).await
    } else {
        tracing::warn!("Rejected request to {} without valid credentials", request.uri());
        unauthorized()
    }
}

/// Decode an `Authorization: Basic ...` header value into `(user, password)`
pub fn decode_basic_credentials(value: &str) -> Option<(String, String)> {
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (user, password) = decoded.split_once(':')?;
    Some((user.to_string(), password.to_string()))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(
            header::WWW_AUTHENTICATE,
            format!("Basic realm=\"{}\"", REALM),
        )],
        "Unauthorized",
    )
        .into_response()
}
