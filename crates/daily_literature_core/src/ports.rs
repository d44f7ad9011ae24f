//! crates/daily_literature_core/src/ports.rs
//!
//! Defines the service contracts (traits) for the application's core logic.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of a specific identity provider or document database.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::SessionIdentity;

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., database, network).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
    /// The presented credential is unknown or expired.
    #[error("Unauthorized")]
    Unauthorized,
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Document Store Types
//=========================================================================================

/// Atomic operation applied to an array field of a stored document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrayOp {
    /// Appends the element to the end of the array.
    Append,
    /// Removes every element equal to the given one.
    Remove,
}

/// A document to be appended to a collection under a store-generated key.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDocument {
    pub body: Value,
    /// Top-level field the store overwrites with its own current time.
    pub server_timestamp_field: Option<&'static str>,
}

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Returns the identity already attached to this session, if any.
    async fn current_identity(&self) -> PortResult<Option<SessionIdentity>>;

    /// Issues a fresh anonymous identity.
    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity>;
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Reads a document; `Ok(None)` when it does not exist.
    async fn read_document(&self, collection: &str, key: &str) -> PortResult<Option<Value>>;

    /// Creates or fully overwrites a document.
    async fn write_document(&self, collection: &str, key: &str, value: Value) -> PortResult<()>;

    /// Atomically appends to or removes from an array field.
    ///
    /// Fails with `PortError::NotFound` when the document does not exist.
    async fn mutate_array_field(
        &self,
        collection: &str,
        key: &str,
        field: &str,
        op: ArrayOp,
        element: Value,
    ) -> PortResult<()>;

    /// Stores a new document under a generated key and returns that key.
    async fn append_to_collection(&self, collection: &str, document: NewDocument)
        -> PortResult<String>;
}
