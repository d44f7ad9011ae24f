//! services/api/src/web/requests.rs
//!
//! Handler for quote request submission.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Extension,
};
use daily_literature_core::{
    domain::{RequestForm, SessionIdentity},
    LiteratureError,
};
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;
use utoipa::ToSchema;

use crate::web::{failure, state::AppState};

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RequestCreatedResponse {
    pub request_id: String,
}

/// Field name to message for every invalid field.
#[derive(Serialize, ToSchema)]
pub struct ValidationErrorResponse {
    pub errors: BTreeMap<String, String>,
}

/// Submits a request to add a quote to the catalog.
#[utoipa::path(
    post,
    path = "/requests",
    request_body(content_type = "application/json", description = "The request form."),
    responses(
        (status = 201, description = "Request stored", body = RequestCreatedResponse),
        (status = 401, description = "No valid session cookie"),
        (status = 422, description = "The form is invalid", body = ValidationErrorResponse),
        (status = 500, description = "The document store is unavailable")
    )
)]
pub async fn submit_request_handler(
    State(state): State<Arc<AppState>>,
    Extension(identity): Extension<SessionIdentity>,
    Json(form): Json<RequestForm>,
) -> Result<Response, (StatusCode, String)> {
    let session = state.session_for(&identity).await;
    let context = session.lock().await;

    match context.submit_request(&form).await {
        Ok(request_id) => {
            info!("Request {} submitted by {}", request_id, identity.id);
            Ok((StatusCode::CREATED, Json(RequestCreatedResponse { request_id })).into_response())
        }
        Err(LiteratureError::Validation(errors)) => {
            let errors = errors
                .fields()
                .iter()
                .map(|(field, message)| (field.to_string(), message.clone()))
                .collect();
            Ok((
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(ValidationErrorResponse { errors }),
            )
                .into_response())
        }
        Err(e) => Err(failure(e)),
    }
}
