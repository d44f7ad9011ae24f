//! services/api/src/adapters/identity.rs
//!
//! Identity handling for HTTP clients. The `session` cookie carries an opaque
//! auth session token; the directory maps live tokens to identities and knows
//! which identities exist.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_literature_core::domain::SessionIdentity;
use daily_literature_core::ports::{IdentityProvider, PortError, PortResult};
use uuid::Uuid;

/// Storage of issued identities and their auth sessions.
#[async_trait]
pub trait IdentityDirectory: Send + Sync {
    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity>;

    /// Stores `token` as a credential for `user_id` until `expires_at`.
    async fn create_auth_session(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()>;

    /// Resolves a token to its identity.
    ///
    /// Unknown and expired tokens are `PortError::Unauthorized`.
    async fn validate_auth_session(&self, token: &str) -> PortResult<SessionIdentity>;

    async fn delete_auth_session(&self, token: &str) -> PortResult<()>;

    /// Drops every expired auth session. Returns how many were removed.
    async fn purge_expired_sessions(&self) -> PortResult<u64>;
}

/// Identity provider bound to one request's cookie.
pub struct CookieIdentity {
    directory: Arc<dyn IdentityDirectory>,
    token: Option<String>,
}

impl CookieIdentity {
    pub fn new(directory: Arc<dyn IdentityDirectory>, token: Option<String>) -> Self {
        Self { directory, token }
    }
}

#[async_trait]
impl IdentityProvider for CookieIdentity {
    async fn current_identity(&self) -> PortResult<Option<SessionIdentity>> {
        let Some(token) = self.token.as_deref() else {
            return Ok(None);
        };
        match self.directory.validate_auth_session(token).await {
            Ok(identity) => Ok(Some(identity)),
            Err(PortError::Unauthorized) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity> {
        self.directory.create_anonymous_identity().await
    }
}

//=========================================================================================
// In-Memory Directory
//=========================================================================================

struct AuthSession {
    user_id: String,
    expires_at: DateTime<Utc>,
}

/// In-process identity directory used with the memory store backend.
#[derive(Default)]
pub struct MemoryIdentityDirectory {
    identities: Mutex<HashMap<String, SessionIdentity>>,
    auth_sessions: Mutex<HashMap<String, AuthSession>>,
}

fn locked<T>(mutex: &Mutex<T>) -> PortResult<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| PortError::Unexpected("identity directory lock poisoned".to_string()))
}

impl MemoryIdentityDirectory {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl IdentityDirectory for MemoryIdentityDirectory {
    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity> {
        let identity = SessionIdentity {
            id: Uuid::new_v4().to_string(),
            is_anonymous: true,
        };
        locked(&self.identities)?.insert(identity.id.clone(), identity.clone());
        Ok(identity)
    }

    async fn create_auth_session(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        if !locked(&self.identities)?.contains_key(user_id) {
            return Err(PortError::NotFound(format!("User {} not found", user_id)));
        }
        locked(&self.auth_sessions)?.insert(
            token.to_string(),
            AuthSession {
                user_id: user_id.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn validate_auth_session(&self, token: &str) -> PortResult<SessionIdentity> {
        let user_id = match locked(&self.auth_sessions)?.get(token) {
            Some(session) if session.expires_at > Utc::now() => session.user_id.clone(),
            _ => return Err(PortError::Unauthorized),
        };
        locked(&self.identities)?
            .get(&user_id)
            .cloned()
            .ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        locked(&self.auth_sessions)?.remove(token);
        Ok(())
    }

    async fn purge_expired_sessions(&self) -> PortResult<u64> {
        let now = Utc::now();
        let mut sessions = locked(&self.auth_sessions)?;
        let before = sessions.len();
        sessions.retain(|_, s| s.expires_at > now);
        Ok((before - sessions.len()) as u64)
    }
}
