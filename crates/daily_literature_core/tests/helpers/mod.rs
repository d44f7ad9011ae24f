//! Shared test doubles for the core integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use daily_literature_core::{
    ArrayOp, DocumentStore, IdentityProvider, MemoryDocumentStore, NewDocument, PortError,
    PortResult, Quote, SessionIdentity,
};
use serde_json::Value;

/// Wraps the in-memory store and fails selected operations on demand.
#[derive(Default)]
pub struct FaultyStore {
    pub inner: MemoryDocumentStore,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub fail_mutations: AtomicBool,
    pub fail_appends: AtomicBool,
    pub calls: AtomicUsize,
}

impl FaultyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn check(&self, flag: &AtomicBool) -> PortResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if flag.load(Ordering::SeqCst) {
            Err(PortError::Unexpected("injected failure".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl DocumentStore for FaultyStore {
    async fn read_document(&self, collection: &str, key: &str) -> PortResult<Option<Value>> {
        self.check(&self.fail_reads)?;
        self.inner.read_document(collection, key).await
    }

    async fn write_document(&self, collection: &str, key: &str, value: Value) -> PortResult<()> {
        self.check(&self.fail_writes)?;
        self.inner.write_document(collection, key, value).await
    }

    async fn mutate_array_field(
        &self,
        collection: &str,
        key: &str,
        field: &str,
        op: ArrayOp,
        element: Value,
    ) -> PortResult<()> {
        self.check(&self.fail_mutations)?;
        self.inner
            .mutate_array_field(collection, key, field, op, element)
            .await
    }

    async fn append_to_collection(
        &self,
        collection: &str,
        document: NewDocument,
    ) -> PortResult<String> {
        self.check(&self.fail_appends)?;
        self.inner.append_to_collection(collection, document).await
    }
}

/// Identity provider with a scripted current identity.
pub struct ScriptedIdentity {
    pub current: Mutex<Option<SessionIdentity>>,
    pub unavailable: AtomicBool,
    pub created: AtomicUsize,
}

impl ScriptedIdentity {
    pub fn signed_out() -> Self {
        Self {
            current: Mutex::new(None),
            unavailable: AtomicBool::new(false),
            created: AtomicUsize::new(0),
        }
    }

    pub fn signed_in(id: &str) -> Self {
        let provider = Self::signed_out();
        *provider.current.lock().unwrap() = Some(SessionIdentity {
            id: id.to_string(),
            is_anonymous: false,
        });
        provider
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentity {
    async fn current_identity(&self) -> PortResult<Option<SessionIdentity>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("auth/configuration-not-found".to_string()));
        }
        Ok(self.current.lock().unwrap().clone())
    }

    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(PortError::Unexpected("auth/operation-not-allowed".to_string()));
        }
        let n = self.created.fetch_add(1, Ordering::SeqCst) + 1;
        let identity = SessionIdentity {
            id: format!("anon-{n}"),
            is_anonymous: true,
        };
        *self.current.lock().unwrap() = Some(identity.clone());
        Ok(identity)
    }
}

pub fn quote(author: &str, text: &str) -> Quote {
    Quote::new(text, author)
}
