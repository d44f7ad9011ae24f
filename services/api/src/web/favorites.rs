//! services/api/src/web/favorites.rs
//!
//! Handlers for the signed-in user's favorites. Every handler works on the
//! user's live `SessionContext`, loading the favorites document on first use.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use daily_literature_core::{
    complete_favorite, filter_favorites,
    domain::{FavoriteRecord, FavoriteSort, Quote, SessionIdentity},
    FavoritesState, SessionContext,
};
use serde::Deserialize;
use std::sync::Arc;
use utoipa::IntoParams;

use crate::web::{failure, state::AppState};

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FavoritesParams {
    /// Substring matched against text, author and work.
    pub q: Option<String>,
    /// One of `newest`, `oldest`, `author`, `era`.
    #[param(value_type = Option<String>)]
    pub sort: Option<FavoriteSort>,
}

async fn ensure_loaded(context: &mut SessionContext) -> Result<(), (StatusCode, String)> {
    if context.favorites_state() != FavoritesState::Ready {
        context.load_favorites().await.map_err(failure)?;
    }
    Ok(())
}

/// Lists the user's favorites.
#[utoipa::path(
    get,
    path = "/favorites",
    params(FavoritesParams),
    responses(
        (status = 200, description = "The filtered favorites list"),
        (status = 401, description = "No valid session cookie"),
        (status = 500, description = "The document store is unavailable")
    )
)]
pub async fn list_favorites_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<SessionIdentity>,
    Query(params): Query<FavoritesParams>,
) -> Result<Json<Vec<FavoriteRecord>>, (StatusCode, String)> {
    let session = state.session_for(&identity).await;
    let mut context = session.lock().await;
    ensure_loaded(&mut context).await?;

    Ok(Json(filter_favorites(
        context.favorites(),
        params.q.as_deref().unwrap_or_default(),
        params.sort.unwrap_or_default(),
    )))
}

/// Favorites a quote.
#[utoipa::path(
    post,
    path = "/favorites",
    request_body(content_type = "application/json", description = "The quote to favorite."),
    responses(
        (status = 201, description = "The stored favorite record"),
        (status = 401, description = "No valid session cookie"),
        (status = 409, description = "The quote is already a favorite"),
        (status = 500, description = "The document store is unavailable")
    )
)]
pub async fn add_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<SessionIdentity>,
    Json(quote): Json<Quote>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session = state.session_for(&identity).await;
    let mut context = session.lock().await;
    ensure_loaded(&mut context).await?;

    if context.is_favorite(&quote) {
        return Err((StatusCode::CONFLICT, "The quote is already a favorite".to_string()));
    }

    let record = context.add_favorite(&quote).await.map_err(failure)?;
    Ok((StatusCode::CREATED, Json(record)))
}

/// Removes a favorite by its identity.
#[utoipa::path(
    delete,
    path = "/favorites/{id}",
    params(("id" = String, Path, description = "The favorite identity.")),
    responses(
        (status = 200, description = "The removed favorite record"),
        (status = 401, description = "No valid session cookie"),
        (status = 404, description = "No favorite with this identity"),
        (status = 500, description = "The document store is unavailable")
    )
)]
pub async fn remove_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<FavoriteRecord>, (StatusCode, String)> {
    let session = state.session_for(&identity).await;
    let mut context = session.lock().await;
    ensure_loaded(&mut context).await?;

    context
        .remove_favorite(&id)
        .await
        .map_err(failure)?
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, format!("No favorite {}", id)))
}

/// Resolves a favorite to the full quote, filling in missing sections.
#[utoipa::path(
    get,
    path = "/favorites/{id}/complete",
    params(("id" = String, Path, description = "The favorite identity.")),
    responses(
        (status = 200, description = "The completed quote"),
        (status = 401, description = "No valid session cookie"),
        (status = 404, description = "No favorite with this identity")
    )
)]
pub async fn complete_favorite_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<SessionIdentity>,
    Path(id): Path<String>,
) -> Result<Json<Quote>, (StatusCode, String)> {
    let session = state.session_for(&identity).await;
    let mut context = session.lock().await;
    ensure_loaded(&mut context).await?;

    let favorite = context
        .favorites()
        .iter()
        .find(|f| f.id == id)
        .ok_or((StatusCode::NOT_FOUND, format!("No favorite {}", id)))?;

    Ok(Json(complete_favorite(&state.catalog, favorite)))
}
