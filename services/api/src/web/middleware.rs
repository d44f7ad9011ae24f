//! services/api/src/web/middleware.rs
//!
//! Authentication middleware for protecting routes.

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use daily_literature_core::ports::PortError;
use std::sync::Arc;
use tracing::{error, warn};

use crate::web::state::AppState;

/// Name of the cookie carrying the auth session token.
pub const SESSION_COOKIE: &str = "session";

/// Extracts the auth session token from the `Cookie` header, if any.
pub fn session_cookie(headers: &HeaderMap) -> Option<String> {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())?
        .split(';')
        .find_map(|c| {
            let (name, value) = c.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// Middleware that validates the auth session cookie and resolves the identity.
///
/// If valid, inserts the `SessionIdentity` into request extensions for handlers to use.
/// If missing, unknown or expired, returns 401 Unauthorized.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let token = session_cookie(req.headers()).ok_or(StatusCode::UNAUTHORIZED)?;

    let identity = state
        .directory
        .validate_auth_session(&token)
        .await
        .map_err(|e| match e {
            PortError::Unauthorized => {
                warn!("Rejected unknown or expired auth session");
                StatusCode::UNAUTHORIZED
            }
            other => {
                error!("Failed to validate auth session: {}", other);
                StatusCode::INTERNAL_SERVER_ERROR
            }
        })?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
