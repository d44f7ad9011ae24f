//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the quote endpoints and the master
//! definition for the OpenAPI specification.

use crate::web::{auth, favorites, requests, state::AppState};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
};
use daily_literature_core::{
    available_eras,
    domain::{Quote, SortMode, ALL_ERAS},
    quote_of_today, random_quote, search, share_text,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{IntoParams, OpenApi, ToSchema};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(
        auth::anonymous_handler,
        auth::logout_handler,
        today_handler,
        random_handler,
        search_handler,
        eras_handler,
        share_text_handler,
        favorites::list_favorites_handler,
        favorites::add_favorite_handler,
        favorites::remove_favorite_handler,
        favorites::complete_favorite_handler,
        requests::submit_request_handler,
    ),
    components(
        schemas(
            auth::SessionResponse,
            ShareTextResponse,
            requests::RequestCreatedResponse,
            requests::ValidationErrorResponse,
        )
    ),
    tags(
        (name = "Daily Literature API", description = "Quotes of the day, favorites and quote requests.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// API Response and Payload Structs
//=========================================================================================

#[derive(Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchParams {
    /// Free-text query; blank disables filtering.
    pub q: Option<String>,
    /// Era to keep, or `all`.
    pub era: Option<String>,
    /// One of `relevance`, `author`, `era`, `length`.
    #[param(value_type = Option<String>)]
    pub sort: Option<SortMode>,
}

#[derive(Serialize, ToSchema)]
pub struct ShareTextResponse {
    pub text: String,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// The quote selected for the current calendar day.
#[utoipa::path(
    get,
    path = "/quotes/today",
    responses(
        (status = 200, description = "Quote of the day"),
        (status = 404, description = "The catalog is empty")
    )
)]
pub async fn today_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Quote>, (StatusCode, String)> {
    quote_of_today(&app_state.catalog)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "The catalog is empty".to_string()))
}

/// A uniformly random quote.
#[utoipa::path(
    get,
    path = "/quotes/random",
    responses(
        (status = 200, description = "A random quote"),
        (status = 404, description = "The catalog is empty")
    )
)]
pub async fn random_handler(
    State(app_state): State<Arc<AppState>>,
) -> Result<Json<Quote>, (StatusCode, String)> {
    random_quote(&app_state.catalog)
        .cloned()
        .map(Json)
        .ok_or((StatusCode::NOT_FOUND, "The catalog is empty".to_string()))
}

/// Filters the catalog by query and era and orders the result.
#[utoipa::path(
    get,
    path = "/quotes/search",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching quotes"),
        (status = 400, description = "Unknown sort mode")
    )
)]
pub async fn search_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<Quote>> {
    let results = search(
        &app_state.catalog,
        params.q.as_deref().unwrap_or_default(),
        params.era.as_deref().unwrap_or(ALL_ERAS),
        params.sort.unwrap_or_default(),
    );
    Json(results)
}

/// Era filter options, `all` first.
#[utoipa::path(
    get,
    path = "/quotes/eras",
    responses(
        (status = 200, description = "Era filter options", body = [String])
    )
)]
pub async fn eras_handler(State(app_state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(available_eras(&app_state.catalog))
}

/// Formats a quote for sharing on social media.
#[utoipa::path(
    post,
    path = "/quotes/share-text",
    request_body(content_type = "application/json", description = "The quote to share."),
    responses(
        (status = 200, description = "Share text", body = ShareTextResponse)
    )
)]
pub async fn share_text_handler(Json(quote): Json<Quote>) -> Json<ShareTextResponse> {
    Json(ShareTextResponse {
        text: share_text(&quote),
    })
}
