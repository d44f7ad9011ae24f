pub mod auth;
pub mod favorites;
pub mod middleware;
pub mod requests;
pub mod rest;
pub mod state;

use axum::{
    http::{header::{ACCEPT, CONTENT_TYPE}, HeaderValue, Method, StatusCode},
    middleware as axum_middleware,
    routing::{delete, get, post},
    Router,
};
use daily_literature_core::LiteratureError;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::error;

pub use middleware::require_auth;
pub use state::AppState;

/// Builds the API router with public and cookie-protected routes.
pub fn router(app_state: Arc<AppState>, cors_origin: HeaderValue) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(cors_origin)
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE, ACCEPT]);

    // Public routes (no session required)
    let public_routes = Router::new()
        .route("/auth/anonymous", post(auth::anonymous_handler))
        .route("/auth/logout", post(auth::logout_handler))
        .route("/quotes/today", get(rest::today_handler))
        .route("/quotes/random", get(rest::random_handler))
        .route("/quotes/search", get(rest::search_handler))
        .route("/quotes/eras", get(rest::eras_handler))
        .route("/quotes/share-text", post(rest::share_text_handler));

    // Protected routes (session required)
    let protected_routes = Router::new()
        .route(
            "/favorites",
            get(favorites::list_favorites_handler).post(favorites::add_favorite_handler),
        )
        .route("/favorites/{id}", delete(favorites::remove_favorite_handler))
        .route("/favorites/{id}/complete", get(favorites::complete_favorite_handler))
        .route("/requests", post(requests::submit_request_handler))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

/// Maps a core failure onto the status code and message sent to the client.
pub(crate) fn failure(e: LiteratureError) -> (StatusCode, String) {
    match e {
        LiteratureError::Validation(errors) => (StatusCode::UNPROCESSABLE_ENTITY, errors.to_string()),
        LiteratureError::Identity(e) => {
            error!("Identity failure: {}", e);
            (StatusCode::UNAUTHORIZED, "Could not resolve a session identity".to_string())
        }
        LiteratureError::NotAuthenticated => {
            (StatusCode::UNAUTHORIZED, "No active session".to_string())
        }
        LiteratureError::Remote(e) => {
            error!("Store failure: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "The document store is unavailable".to_string())
        }
    }
}
