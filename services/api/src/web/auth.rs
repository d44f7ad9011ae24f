//! services/api/src/web/auth.rs
//!
//! Session endpoints: anonymous sign-in and logout.

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use chrono::{Duration, Utc};
use daily_literature_core::{ports::PortError, SessionContext};
use serde::Serialize;
use std::sync::Arc;
use tracing::{error, info, warn};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::adapters::identity::CookieIdentity;
use crate::web::{failure, middleware::{session_cookie, SESSION_COOKIE}, state::AppState};

/// Lifetime of an auth session token and of its cookie.
const SESSION_DAYS: i64 = 30;

//=========================================================================================
// Response Types
//=========================================================================================

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub user_id: String,
    pub is_anonymous: bool,
}

//=========================================================================================
// Handlers
//=========================================================================================

/// POST /auth/anonymous - Resume the cookie's identity or sign in anonymously
///
/// Always issues a fresh auth session token; the presented one is revoked.
#[utoipa::path(
    post,
    path = "/auth/anonymous",
    responses(
        (status = 200, description = "Session established", body = SessionResponse),
        (status = 401, description = "The identity provider is unavailable"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn anonymous_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let presented = session_cookie(&headers);

    // 1. Resolve or create the identity
    let provider = CookieIdentity::new(state.directory.clone(), presented.clone());
    let context = SessionContext::establish(&provider, state.store.clone())
        .await
        .map_err(failure)?;
    let identity = context
        .identity()
        .cloned()
        .ok_or((StatusCode::UNAUTHORIZED, "No active session".to_string()))?;
    state.adopt_session(context).await;

    // 2. Issue a new auth session token
    let auth_session_id = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + Duration::days(SESSION_DAYS);
    state
        .directory
        .create_auth_session(&auth_session_id, &identity.id, expires_at)
        .await
        .map_err(|e| {
            error!("Failed to create auth session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to create session".to_string())
        })?;

    // 3. Revoke the token that was presented
    if let Some(old) = presented {
        if let Err(e) = state.directory.delete_auth_session(&old).await {
            warn!("Failed to revoke previous auth session: {}", e);
        }
    }

    let cookie = format!(
        "{}={}; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age={}",
        SESSION_COOKIE,
        auth_session_id,
        Duration::days(SESSION_DAYS).num_seconds()
    );

    let response = SessionResponse {
        user_id: identity.id,
        is_anonymous: identity.is_anonymous,
    };

    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)], Json(response)))
}

/// POST /auth/logout - Revoke the auth session and clear the cookie
#[utoipa::path(
    post,
    path = "/auth/logout",
    responses(
        (status = 200, description = "Logout successful"),
        (status = 401, description = "No active session"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn logout_handler(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let auth_session_id = session_cookie(&headers)
        .ok_or((StatusCode::UNAUTHORIZED, "No session found".to_string()))?;

    match state.directory.validate_auth_session(&auth_session_id).await {
        Ok(identity) => {
            state.end_session(&identity.id).await;
            info!("Logged out {}", identity.id);
        }
        Err(PortError::Unauthorized) => {}
        Err(e) => {
            error!("Failed to resolve auth session on logout: {}", e);
            return Err((StatusCode::INTERNAL_SERVER_ERROR, "Failed to logout".to_string()));
        }
    }

    state
        .directory
        .delete_auth_session(&auth_session_id)
        .await
        .map_err(|e| {
            error!("Failed to delete auth session: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to logout".to_string())
        })?;

    let cookie = format!("{}=; HttpOnly; Secure; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE);
    Ok((StatusCode::OK, [(header::SET_COOKIE, cookie)]))
}
