//! crates/daily_literature_core/src/requests.rs
//!
//! Validation and persistence of "please add this quote" proposals.

use std::sync::{Arc, OnceLock};

use regex::Regex;
use tracing::{error, info};

use crate::domain::{QuoteRequest, RequestForm, RequestStatus};
use crate::error::{LiteratureError, LiteratureResult, ValidationErrors};
use crate::ports::{DocumentStore, NewDocument, PortError};

pub const REQUESTS_COLLECTION: &str = "quoteRequests";

const MIN_QUOTE_TEXT_CHARS: usize = 10;
const MIN_REASON_CHARS: usize = 20;

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

/// Checks a form without touching the store.
pub fn validate_request(form: &RequestForm) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let quote_text = form.quote_text.trim();
    if quote_text.is_empty() {
        errors.insert("quoteText", "Please enter the quote.");
    } else if quote_text.chars().count() < MIN_QUOTE_TEXT_CHARS {
        errors.insert("quoteText", "The quote must be at least 10 characters long.");
    }

    if form.author.trim().is_empty() {
        errors.insert("author", "Please enter the author's name.");
    }

    let reason = form.reason.trim();
    if reason.is_empty() {
        errors.insert("reason", "Please explain why you recommend this quote.");
    } else if reason.chars().count() < MIN_REASON_CHARS {
        errors.insert("reason", "The reason must be at least 20 characters long.");
    }

    if let Some(email) = form.email.as_deref().map(str::trim).filter(|e| !e.is_empty()) {
        if !email_pattern().is_match(email) {
            errors.insert("email", "Please enter a valid email address.");
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Builds the pending record for a validated form, trimming every text field.
pub fn build_request(user_id: &str, form: &RequestForm) -> QuoteRequest {
    fn trimmed(value: &Option<String>) -> String {
        value.as_deref().map(str::trim).unwrap_or_default().to_string()
    }

    QuoteRequest {
        user_id: user_id.to_string(),
        quote_text: form.quote_text.trim().to_string(),
        author: form.author.trim().to_string(),
        work: trimmed(&form.work),
        era: trimmed(&form.era),
        reason: form.reason.trim().to_string(),
        requester_name: trimmed(&form.requester_name),
        email: trimmed(&form.email),
        book_title: trimmed(&form.book_title),
        publisher: trimmed(&form.publisher),
        status: RequestStatus::Pending,
        submitted_at: None,
        reviewed_at: None,
        reviewer_notes: String::new(),
    }
}

/// Submits quote requests to the `quoteRequests` collection.
#[derive(Clone)]
pub struct RequestSubmitter {
    store: Arc<dyn DocumentStore>,
}

impl RequestSubmitter {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self { store }
    }

    /// Validates and stores the request, returning the generated request id.
    ///
    /// Invalid forms fail with `LiteratureError::Validation` and make no remote
    /// call. Store failures are returned as-is inside `LiteratureError::Remote`.
    pub async fn submit(&self, user_id: &str, form: &RequestForm) -> LiteratureResult<String> {
        validate_request(form).map_err(LiteratureError::Validation)?;

        let request = build_request(user_id, form);
        let body =
            serde_json::to_value(&request).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let request_id = self
            .store
            .append_to_collection(
                REQUESTS_COLLECTION,
                NewDocument {
                    body,
                    server_timestamp_field: Some("submittedAt"),
                },
            )
            .await
            .map_err(|e| {
                error!("Failed to submit quote request for {}: {}", user_id, e);
                LiteratureError::Remote(e)
            })?;

        info!("Quote request {} submitted by {}", request_id, user_id);
        Ok(request_id)
    }
}
