//! crates/daily_literature_core/src/session.rs
//!
//! The per-session context: who the user is and what they have favorited.
//! Created when a session starts, torn down on logout.

use std::sync::Arc;

use tracing::{error, info};

use crate::domain::{FavoriteRecord, Quote, RequestForm, SessionIdentity};
use crate::error::{LiteratureError, LiteratureResult};
use crate::favorites::{FavoritesState, FavoritesStore};
use crate::ports::{DocumentStore, IdentityProvider};
use crate::requests::RequestSubmitter;

pub struct SessionContext {
    identity: Option<SessionIdentity>,
    favorites: FavoritesStore,
    requests: RequestSubmitter,
}

impl SessionContext {
    /// Resolves the session identity, signing in anonymously when the provider
    /// has none, and prepares the adapters bound to it.
    pub async fn establish(
        provider: &dyn IdentityProvider,
        store: Arc<dyn DocumentStore>,
    ) -> LiteratureResult<Self> {
        let identity = resolve_identity(provider).await?;
        Ok(Self::with_identity(identity, store))
    }

    /// Builds a context for an identity that is already known.
    pub fn with_identity(identity: SessionIdentity, store: Arc<dyn DocumentStore>) -> Self {
        Self {
            identity: Some(identity),
            favorites: FavoritesStore::new(store.clone()),
            requests: RequestSubmitter::new(store),
        }
    }

    /// Re-runs identity resolution, e.g. after the provider was unavailable.
    pub async fn retry(&mut self, provider: &dyn IdentityProvider) -> LiteratureResult<&SessionIdentity> {
        let identity = resolve_identity(provider).await?;
        if self.identity.as_ref().map(|i| &i.id) != Some(&identity.id) {
            self.favorites.clear();
        }
        Ok(self.identity.insert(identity))
    }

    pub fn identity(&self) -> Option<&SessionIdentity> {
        self.identity.as_ref()
    }

    fn require_identity(&self) -> LiteratureResult<&SessionIdentity> {
        self.identity.as_ref().ok_or(LiteratureError::NotAuthenticated)
    }

    pub fn favorites_state(&self) -> FavoritesState {
        self.favorites.state()
    }

    pub fn favorites(&self) -> &[FavoriteRecord] {
        self.favorites.favorites()
    }

    pub async fn load_favorites(&mut self) -> LiteratureResult<&[FavoriteRecord]> {
        let identity = self.identity.as_ref().ok_or(LiteratureError::NotAuthenticated)?;
        self.favorites.load(&identity.id).await
    }

    pub async fn add_favorite(&mut self, quote: &Quote) -> LiteratureResult<FavoriteRecord> {
        let identity = self.identity.as_ref().ok_or(LiteratureError::NotAuthenticated)?;
        self.favorites.add(&identity.id, quote).await
    }

    pub async fn remove_favorite(&mut self, favorite_id: &str) -> LiteratureResult<Option<FavoriteRecord>> {
        let identity = self.identity.as_ref().ok_or(LiteratureError::NotAuthenticated)?;
        self.favorites.remove(&identity.id, favorite_id).await
    }

    /// Adds the quote if it is not a favorite yet, otherwise removes every
    /// record with its identity. Returns whether the quote is a favorite afterwards.
    pub async fn toggle_favorite(&mut self, quote: &Quote) -> LiteratureResult<bool> {
        if self.favorites.is_favorite(quote) {
            let id = crate::identity::identity_of(quote);
            while self.favorites.is_favorite(quote) {
                if self.remove_favorite(&id).await?.is_none() {
                    break;
                }
            }
        } else {
            self.add_favorite(quote).await?;
        }
        Ok(self.favorites.is_favorite(quote))
    }

    pub fn is_favorite(&self, quote: &Quote) -> bool {
        self.favorites.is_favorite(quote)
    }

    pub async fn submit_request(&self, form: &RequestForm) -> LiteratureResult<String> {
        let identity = self.require_identity()?;
        self.requests.submit(&identity.id, form).await
    }

    /// Forgets the identity and the cached favorites.
    pub fn teardown(&mut self) {
        if let Some(identity) = self.identity.take() {
            info!("Session for {} torn down", identity.id);
        }
        self.favorites.clear();
    }
}

async fn resolve_identity(provider: &dyn IdentityProvider) -> LiteratureResult<SessionIdentity> {
    let current = provider.current_identity().await.map_err(|e| {
        error!("Identity provider unavailable: {}", e);
        LiteratureError::Identity(e)
    })?;

    if let Some(identity) = current {
        info!(
            "Session identity {} ({})",
            identity.id,
            if identity.is_anonymous { "anonymous" } else { "registered" }
        );
        return Ok(identity);
    }

    info!("No session identity, signing in anonymously");
    let identity = provider.create_anonymous_identity().await.map_err(|e| {
        error!("Anonymous sign-in failed: {}", e);
        LiteratureError::Identity(e)
    })?;
    info!("Anonymous identity {} created", identity.id);
    Ok(identity)
}
