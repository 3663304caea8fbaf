use std::sync::Arc;

use axum::body::{Body, to_bytes};
use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use serde_json::Value;

use crate::errors::{ApiError, AuthError};
use crate::services::AuthService;

pub const SECRET_KEY_HEADER: &str = "x-secret-key";

// Wearables send a few hundred bytes at most
const MAX_PAYLOAD_SIZE: usize = 64 * 1024;

#[derive(Clone)]
pub struct AuthState {
    pub auth_service: Arc<AuthService>,
}

/// Telemetry body that passed the device check, parsed once for the handler.
#[derive(Debug, Clone)]
pub struct AuthenticatedPayload(pub Value);

/// Credentials travel inside the JSON body, so the body is buffered, checked and
/// handed to the handler through the request extensions.
pub async fn device_auth(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let (parts, body) = req.into_parts();
    let bytes = to_bytes(body, MAX_PAYLOAD_SIZE)
        .await
        .map_err(|_| AuthError::MissingCredentials)?;

    let payload: Value = serde_json::from_slice(&bytes).map_err(|_| AuthError::MissingCredentials)?;

    state
        .auth_service
        .authenticate(
            payload.get("deviceId").and_then(Value::as_str),
            payload.get("secretKey").and_then(Value::as_str),
        )
        .await?;

    tracing::debug!("Request is authenticated");

    let mut req = Request::from_parts(parts, Body::from(bytes));
    req.extensions_mut().insert(AuthenticatedPayload(payload));

    Ok(next.run(req).await)
}

/// Dashboard reads only carry the shared secret.
pub async fn secret_auth(
    State(state): State<AuthState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let secret_key = req
        .headers()
        .get(SECRET_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    state.auth_service.verify_secret(secret_key)?;

    Ok(next.run(req).await)
}
