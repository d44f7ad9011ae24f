//! services/api/src/web/state.rs
//!
//! Defines the application's shared state and the per-user session contexts.

use crate::adapters::identity::IdentityDirectory;
use crate::config::Config;
use daily_literature_core::{
    domain::{Quote, SessionIdentity},
    ports::DocumentStore,
    SessionContext,
};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::{sync::Mutex, task::JoinHandle, time::Instant};
use tracing::{debug, error, info};

//=========================================================================================
// AppState (Shared Across All Requests)
//=========================================================================================

/// A cached session context and the last time a request used it.
struct LiveSession {
    context: Arc<Mutex<SessionContext>>,
    last_used: Instant,
}

/// The shared application state, created once at startup and passed to all handlers.
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub directory: Arc<dyn IdentityDirectory>,
    pub config: Arc<Config>,
    pub catalog: Arc<Vec<Quote>>,
    /// Live session contexts keyed by user id. Each context is behind its own
    /// lock, so one user's favorites mutations run one at a time.
    sessions: Mutex<HashMap<String, LiveSession>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        directory: Arc<dyn IdentityDirectory>,
        config: Arc<Config>,
        catalog: Vec<Quote>,
    ) -> Self {
        Self {
            store,
            directory,
            config,
            catalog: Arc::new(catalog),
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the live context for `identity`, creating one if needed.
    pub async fn session_for(&self, identity: &SessionIdentity) -> Arc<Mutex<SessionContext>> {
        let mut sessions = self.sessions.lock().await;
        let live = sessions.entry(identity.id.clone()).or_insert_with(|| {
            info!("Opening session context for {}", identity.id);
            LiveSession {
                context: Arc::new(Mutex::new(SessionContext::with_identity(
                    identity.clone(),
                    self.store.clone(),
                ))),
                last_used: Instant::now(),
            }
        });
        live.last_used = Instant::now();
        live.context.clone()
    }

    /// Registers a freshly established context unless one is already live.
    pub async fn adopt_session(&self, context: SessionContext) -> Arc<Mutex<SessionContext>> {
        let Some(id) = context.identity().map(|i| i.id.clone()) else {
            return Arc::new(Mutex::new(context));
        };
        let mut sessions = self.sessions.lock().await;
        let live = sessions.entry(id).or_insert_with(|| LiveSession {
            context: Arc::new(Mutex::new(context)),
            last_used: Instant::now(),
        });
        live.last_used = Instant::now();
        live.context.clone()
    }

    /// Tears down and forgets the context of `user_id`. Returns whether one was live.
    pub async fn end_session(&self, user_id: &str) -> bool {
        let removed = self.sessions.lock().await.remove(user_id);
        match removed {
            Some(live) => {
                live.context.lock().await.teardown();
                true
            }
            None => false,
        }
    }

    /// Number of cached session contexts.
    pub async fn live_sessions(&self) -> usize {
        self.sessions.lock().await.len()
    }

    /// Tears down every context unused for at least `max_idle`.
    ///
    /// Contexts still held by an in-flight request are kept. Returns how many
    /// were evicted.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let evicted: Vec<(String, LiveSession)> = {
            let mut sessions = self.sessions.lock().await;
            let idle: Vec<String> = sessions
                .iter()
                .filter(|(_, live)| {
                    live.last_used.elapsed() >= max_idle && Arc::strong_count(&live.context) == 1
                })
                .map(|(id, _)| id.clone())
                .collect();
            idle.into_iter()
                .filter_map(|id| sessions.remove(&id).map(|live| (id, live)))
                .collect()
        };

        for (id, live) in &evicted {
            live.context.lock().await.teardown();
            debug!("Evicted idle session context for {}", id);
        }
        evicted.len()
    }
}

/// Periodically evicts idle session contexts and purges expired auth sessions.
pub fn spawn_session_sweeper(state: Arc<AppState>) -> JoinHandle<()> {
    let every = state.config.session_sweep_interval;
    let max_idle = state.config.session_idle_timeout;
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        loop {
            ticker.tick().await;
            let evicted = state.evict_idle(max_idle).await;
            match state.directory.purge_expired_sessions().await {
                Ok(purged) if evicted > 0 || purged > 0 => {
                    info!("Session sweep: {} idle contexts, {} expired tokens", evicted, purged);
                }
                Ok(_) => {}
                Err(e) => error!("Failed to purge expired auth sessions: {}", e),
            }
        }
    })
}
