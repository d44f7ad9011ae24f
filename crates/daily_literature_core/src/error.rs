//! crates/daily_literature_core/src/error.rs
//!
//! Error taxonomy for the core operations.

use std::collections::BTreeMap;
use std::fmt;

use crate::ports::PortError;

/// Field name to message mapping produced by request validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(BTreeMap<&'static str, String>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &BTreeMap<&'static str, String> {
        &self.0
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<&str> = self.0.keys().copied().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// The error type returned by the core adapters.
#[derive(Debug, thiserror::Error)]
pub enum LiteratureError {
    /// The identity provider could not supply or create an identity.
    #[error("Identity provider error: {0}")]
    Identity(#[source] PortError),

    /// The request form failed client-side validation. No remote call was made.
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    /// A read or write against the document store failed.
    #[error("Remote store error: {0}")]
    Remote(#[from] PortError),

    /// An operation that needs a user was called on a torn-down session.
    #[error("No active session identity")]
    NotAuthenticated,
}

/// A convenience type alias for `Result<T, LiteratureError>`.
pub type LiteratureResult<T> = Result<T, LiteratureError>;
