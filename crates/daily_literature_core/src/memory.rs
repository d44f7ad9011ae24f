//! crates/daily_literature_core/src/memory.rs
//!
//! An in-process implementation of the `DocumentStore` port. Used by the
//! service when no database is configured and by the test suites.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use uuid::Uuid;

use crate::ports::{ArrayOp, DocumentStore, NewDocument, PortError, PortResult};

type DocumentKey = (String, String);

/// Document store that keeps everything in a map guarded by a mutex.
#[derive(Default)]
pub struct MemoryDocumentStore {
    documents: Mutex<HashMap<DocumentKey, Value>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of documents currently held in `collection`.
    pub fn collection_len(&self, collection: &str) -> usize {
        self.lock()
            .map(|docs| docs.keys().filter(|(c, _)| c == collection).count())
            .unwrap_or(0)
    }

    fn lock(&self) -> PortResult<MutexGuard<'_, HashMap<DocumentKey, Value>>> {
        self.documents
            .lock()
            .map_err(|_| PortError::Unexpected("document store lock poisoned".to_string()))
    }
}

fn key_of(collection: &str, key: &str) -> DocumentKey {
    (collection.to_string(), key.to_string())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn read_document(&self, collection: &str, key: &str) -> PortResult<Option<Value>> {
        Ok(self.lock()?.get(&key_of(collection, key)).cloned())
    }

    async fn write_document(&self, collection: &str, key: &str, value: Value) -> PortResult<()> {
        self.lock()?.insert(key_of(collection, key), value);
        Ok(())
    }

    async fn mutate_array_field(
        &self,
        collection: &str,
        key: &str,
        field: &str,
        op: ArrayOp,
        element: Value,
    ) -> PortResult<()> {
        let mut documents = self.lock()?;
        let document = documents
            .get_mut(&key_of(collection, key))
            .ok_or_else(|| PortError::NotFound(format!("{collection}/{key}")))?;

        let object = document.as_object_mut().ok_or_else(|| {
            PortError::Unexpected(format!("{collection}/{key} is not an object"))
        })?;

        let slot = object
            .entry(field.to_string())
            .or_insert_with(|| Value::Array(Vec::new()));
        if !slot.is_array() {
            *slot = Value::Array(Vec::new());
        }

        if let Value::Array(items) = slot {
            match op {
                ArrayOp::Append => items.push(element),
                ArrayOp::Remove => items.retain(|item| item != &element),
            }
        }
        Ok(())
    }

    async fn append_to_collection(
        &self,
        collection: &str,
        document: NewDocument,
    ) -> PortResult<String> {
        let NewDocument {
            mut body,
            server_timestamp_field,
        } = document;

        if let (Some(field), Some(object)) = (server_timestamp_field, body.as_object_mut()) {
            let now = serde_json::to_value(Utc::now())
                .map_err(|e| PortError::Unexpected(e.to_string()))?;
            object.insert(field.to_string(), now);
        }

        let id = Uuid::new_v4().to_string();
        self.lock()?.insert(key_of(collection, &id), body);
        Ok(id)
    }
}
