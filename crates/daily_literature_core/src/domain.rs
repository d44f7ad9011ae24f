//! crates/daily_literature_core/src/domain.rs
//!
//! Defines the pure, core data structures for the application.
//! Field names serialize in camelCase so the persisted documents keep the
//! shape the front end reads (`favorites/{userId}.quotes[]`, `quoteRequests/{id}`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Era filter value that disables era filtering.
pub const ALL_ERAS: &str = "all";

/// A single literary quotation from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub text: String,
    pub author: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub era: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author_info: Option<AuthorInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keywords: Option<Vec<Keyword>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exam_points: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_info: Option<WorkInfo>,
}

impl Quote {
    /// Creates a quote with only the required fields set.
    pub fn new(text: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            author: author.into(),
            work: None,
            era: None,
            source: None,
            meaning: None,
            author_info: None,
            keywords: None,
            exam_points: None,
            work_info: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorInfo {
    pub lifespan: String,
    pub background: String,
    pub literary_style: String,
    pub major_works: Vec<String>,
}

/// A notable word in a quote together with its gloss.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Keyword {
    pub word: String,
    pub meaning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkInfo {
    pub genre: String,
    pub publish_year: String,
    pub background: String,
}

/// A quote as it was when the user favorited it.
///
/// Optional text fields are stored as empty strings and optional sections as
/// `null`, so two snapshots of the same quote compare equal field by field
/// except for `added_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FavoriteRecord {
    pub id: String,
    pub text: String,
    pub author: String,
    pub work: String,
    pub era: String,
    pub source: String,
    pub meaning: String,
    pub author_info: Option<AuthorInfo>,
    pub keywords: Option<Vec<Keyword>>,
    pub exam_points: Option<Vec<String>>,
    pub work_info: Option<WorkInfo>,
    pub added_at: DateTime<Utc>,
}

impl FavoriteRecord {
    /// Takes a snapshot of `quote` under the given identity.
    pub fn snapshot(id: String, quote: &Quote, added_at: DateTime<Utc>) -> Self {
        Self {
            id,
            text: quote.text.clone(),
            author: quote.author.clone(),
            work: quote.work.clone().unwrap_or_default(),
            era: quote.era.clone().unwrap_or_default(),
            source: quote.source.clone().unwrap_or_default(),
            meaning: quote.meaning.clone().unwrap_or_default(),
            author_info: quote.author_info.clone(),
            keywords: quote.keywords.clone(),
            exam_points: quote.exam_points.clone(),
            work_info: quote.work_info.clone(),
            added_at,
        }
    }

    /// Converts the snapshot back into a quote, mapping empty strings to `None`.
    pub fn to_quote(&self) -> Quote {
        fn non_empty(value: &str) -> Option<String> {
            (!value.is_empty()).then(|| value.to_string())
        }

        Quote {
            text: self.text.clone(),
            author: self.author.clone(),
            work: non_empty(&self.work),
            era: non_empty(&self.era),
            source: non_empty(&self.source),
            meaning: non_empty(&self.meaning),
            author_info: self.author_info.clone(),
            keywords: self.keywords.clone(),
            exam_points: self.exam_points.clone(),
            work_info: self.work_info.clone(),
        }
    }
}

/// The per-user favorites document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FavoritesDocument {
    #[serde(default)]
    pub quotes: Vec<FavoriteRecord>,
}

/// Review state of a submitted quote request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// The raw form a visitor fills in to propose a new quote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestForm {
    pub quote_text: String,
    pub author: String,
    pub reason: String,
    pub work: Option<String>,
    pub era: Option<String>,
    pub requester_name: Option<String>,
    pub email: Option<String>,
    pub book_title: Option<String>,
    pub publisher: Option<String>,
}

/// A persisted quote request. Never modified by the client after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub user_id: String,
    pub quote_text: String,
    pub author: String,
    pub work: String,
    pub era: String,
    pub reason: String,
    pub requester_name: String,
    pub email: String,
    pub book_title: String,
    pub publisher: String,
    pub status: RequestStatus,
    /// Filled in by the store when the record is written.
    pub submitted_at: Option<DateTime<Utc>>,
    pub reviewed_at: Option<DateTime<Utc>>,
    pub reviewer_notes: String,
}

/// The user identifier issued by the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionIdentity {
    pub id: String,
    pub is_anonymous: bool,
}

/// Ordering applied to catalog search results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    Author,
    Era,
    Length,
    #[default]
    Relevance,
}

/// Ordering applied to the favorites list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FavoriteSort {
    #[default]
    Newest,
    Oldest,
    Author,
    Era,
}
