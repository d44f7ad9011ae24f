//! crates/daily_literature_core/src/favorites.rs
//!
//! Keeps a user's favorites list in step with the remote `favorites/{userId}`
//! document. The remote document is authoritative; the in-memory list is a
//! cache that is only touched after the corresponding remote write succeeded.

use std::sync::Arc;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, error, info, warn};

use crate::domain::{FavoriteRecord, FavoritesDocument, Quote};
use crate::error::{LiteratureError, LiteratureResult};
use crate::identity::identity_of;
use crate::ports::{ArrayOp, DocumentStore, PortError};

pub const FAVORITES_COLLECTION: &str = "favorites";
pub const FAVORITES_FIELD: &str = "quotes";

/// Lifecycle of the favorites cache within one session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoritesState {
    Uninitialized,
    Loading,
    Ready,
}

/// The favorites adapter for a single session.
pub struct FavoritesStore {
    store: Arc<dyn DocumentStore>,
    state: FavoritesState,
    cache: Vec<FavoriteRecord>,
}

impl FavoritesStore {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        Self {
            store,
            state: FavoritesState::Uninitialized,
            cache: Vec::new(),
        }
    }

    pub fn state(&self) -> FavoritesState {
        self.state
    }

    /// The cached favorites, in the order they were loaded or added.
    pub fn favorites(&self) -> &[FavoriteRecord] {
        &self.cache
    }

    /// Reads the user's favorites document, creating it empty if absent.
    ///
    /// On failure the error is logged and returned, and the cache keeps its
    /// previous contents.
    pub async fn load(&mut self, user_id: &str) -> LiteratureResult<&[FavoriteRecord]> {
        let previous = self.state;
        self.state = FavoritesState::Loading;

        match self.fetch(user_id).await {
            Ok(records) => {
                self.cache = records;
                self.state = FavoritesState::Ready;
                Ok(&self.cache)
            }
            Err(e) => {
                error!("Failed to load favorites for {}: {}", user_id, e);
                self.state = previous;
                Err(e.into())
            }
        }
    }

    async fn fetch(&self, user_id: &str) -> Result<Vec<FavoriteRecord>, PortError> {
        match self.store.read_document(FAVORITES_COLLECTION, user_id).await? {
            Some(value) => {
                let document: FavoritesDocument = serde_json::from_value(value)
                    .map_err(|e| PortError::Unexpected(e.to_string()))?;
                info!("Loaded {} favorites for {}", document.quotes.len(), user_id);
                Ok(document.quotes)
            }
            None => {
                self.store
                    .write_document(FAVORITES_COLLECTION, user_id, json!({ FAVORITES_FIELD: [] }))
                    .await?;
                info!("Created empty favorites document for {}", user_id);
                Ok(Vec::new())
            }
        }
    }

    /// Favorites `quote`. Does not check for an existing entry: adding the
    /// same quote twice stores two records that differ only in `added_at`.
    ///
    /// A missing favorites document is not an error; it is created holding
    /// just the new record.
    pub async fn add(&mut self, user_id: &str, quote: &Quote) -> LiteratureResult<FavoriteRecord> {
        let record = FavoriteRecord::snapshot(identity_of(quote), quote, Utc::now());
        let element =
            serde_json::to_value(&record).map_err(|e| PortError::Unexpected(e.to_string()))?;

        let appended = self
            .store
            .mutate_array_field(
                FAVORITES_COLLECTION,
                user_id,
                FAVORITES_FIELD,
                ArrayOp::Append,
                element.clone(),
            )
            .await;

        match appended {
            Ok(()) => {
                self.cache.push(record.clone());
            }
            Err(PortError::NotFound(_)) => {
                warn!("Favorites document for {} missing, creating it", user_id);
                self.store
                    .write_document(FAVORITES_COLLECTION, user_id, json!({ FAVORITES_FIELD: [element] }))
                    .await
                    .map_err(|e| {
                        error!("Failed to create favorites document for {}: {}", user_id, e);
                        LiteratureError::Remote(e)
                    })?;
                self.cache = vec![record.clone()];
            }
            Err(e) => {
                error!("Failed to add favorite for {}: {}", user_id, e);
                return Err(e.into());
            }
        }

        self.state = FavoritesState::Ready;
        info!("Added favorite {} by {}", record.id, record.author);
        Ok(record)
    }

    /// Removes the first cached record with the given identity.
    ///
    /// Returns `Ok(None)` without touching the store when nothing matches.
    pub async fn remove(
        &mut self,
        user_id: &str,
        identity: &str,
    ) -> LiteratureResult<Option<FavoriteRecord>> {
        let Some(record) = self.cache.iter().find(|r| r.id == identity).cloned() else {
            debug!("Favorite {} not cached for {}, nothing to remove", identity, user_id);
            return Ok(None);
        };

        let element =
            serde_json::to_value(&record).map_err(|e| PortError::Unexpected(e.to_string()))?;
        self.store
            .mutate_array_field(
                FAVORITES_COLLECTION,
                user_id,
                FAVORITES_FIELD,
                ArrayOp::Remove,
                element,
            )
            .await
            .map_err(|e| {
                error!("Failed to remove favorite {} for {}: {}", identity, user_id, e);
                LiteratureError::Remote(e)
            })?;

        self.cache.retain(|r| r != &record);
        self.state = FavoritesState::Ready;
        info!("Removed favorite {} by {}", record.id, record.author);
        Ok(Some(record))
    }

    /// Cache-only membership test.
    pub fn is_favorite(&self, quote: &Quote) -> bool {
        let id = identity_of(quote);
        self.cache.iter().any(|r| r.id == id)
    }

    /// Drops every cached record and returns to `Uninitialized`.
    pub fn clear(&mut self) {
        self.cache.clear();
        self.state = FavoritesState::Uninitialized;
    }
}
