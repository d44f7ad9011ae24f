//! Integration tests for the favorites adapter against the in-memory store.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use daily_literature_core::favorites::{FAVORITES_COLLECTION, FAVORITES_FIELD};
use daily_literature_core::{
    identity_of, DocumentStore, FavoritesDocument, FavoritesState, FavoritesStore,
    LiteratureError, MemoryDocumentStore, PortError,
};
use helpers::{quote, FaultyStore};
use pretty_assertions::assert_eq;
use serde_json::json;

async fn remote_quotes(store: &dyn DocumentStore, user: &str) -> FavoritesDocument {
    let value = store
        .read_document(FAVORITES_COLLECTION, user)
        .await
        .unwrap()
        .expect("favorites document exists");
    serde_json::from_value(value).unwrap()
}

#[tokio::test]
async fn load_creates_missing_document() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    assert_eq!(favorites.state(), FavoritesState::Uninitialized);

    let loaded = favorites.load("u1").await.unwrap();
    assert!(loaded.is_empty());
    assert_eq!(favorites.state(), FavoritesState::Ready);

    let doc = store.read_document(FAVORITES_COLLECTION, "u1").await.unwrap();
    assert_eq!(doc, Some(json!({ FAVORITES_FIELD: [] })));
}

#[tokio::test]
async fn load_reads_existing_records() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut writer = FavoritesStore::new(store.clone());
    writer.load("u1").await.unwrap();
    let record = writer.add("u1", &quote("A", "alpha beta")).await.unwrap();

    let mut reader = FavoritesStore::new(store);
    let loaded = reader.load("u1").await.unwrap();
    assert_eq!(loaded, &[record]);
}

#[tokio::test]
async fn load_tolerates_document_without_quotes_field() {
    let store = Arc::new(MemoryDocumentStore::new());
    store
        .write_document(FAVORITES_COLLECTION, "u1", json!({}))
        .await
        .unwrap();

    let mut favorites = FavoritesStore::new(store);
    assert!(favorites.load("u1").await.unwrap().is_empty());
}

#[tokio::test]
async fn load_failure_keeps_cache_and_state() {
    let store = Arc::new(FaultyStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    favorites.add("u1", &quote("A", "alpha")).await.unwrap();

    store.fail_reads.store(true, Ordering::SeqCst);
    let err = favorites.load("u1").await.unwrap_err();
    assert!(matches!(err, LiteratureError::Remote(PortError::Unexpected(_))));
    assert_eq!(favorites.favorites().len(), 1);
    assert_eq!(favorites.state(), FavoritesState::Ready);
}

#[tokio::test]
async fn add_then_remove_round_trips_membership() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    let q = quote("夏目漱石", "吾輩は猫である。名前はまだ無い。");

    assert!(!favorites.is_favorite(&q));
    let record = favorites.add("u1", &q).await.unwrap();
    assert!(favorites.is_favorite(&q));
    assert_eq!(record.id, identity_of(&q));
    assert_eq!(remote_quotes(store.as_ref(), "u1").await.quotes, vec![record.clone()]);

    let removed = favorites.remove("u1", &identity_of(&q)).await.unwrap();
    assert_eq!(removed, Some(record));
    assert!(!favorites.is_favorite(&q));
    assert!(remote_quotes(store.as_ref(), "u1").await.quotes.is_empty());
}

#[tokio::test]
async fn add_twice_keeps_two_records() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    let q = quote("A", "alpha beta");

    let first = favorites.add("u1", &q).await.unwrap();
    let second = favorites.add("u1", &q).await.unwrap();

    let cached = favorites.favorites();
    assert_eq!(cached.len(), 2);
    assert_eq!(cached[0].id, cached[1].id);
    let mut second_aligned = second.clone();
    second_aligned.added_at = first.added_at;
    assert_eq!(first, second_aligned);
    assert_eq!(remote_quotes(store.as_ref(), "u1").await.quotes.len(), 2);
}

#[tokio::test]
async fn remove_of_duplicate_drops_only_the_first_record() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    let q = quote("A", "alpha beta");
    let first = favorites.add("u1", &q).await.unwrap();
    let second = favorites.add("u1", &q).await.unwrap();

    let removed = favorites.remove("u1", &first.id).await.unwrap();
    assert_eq!(removed, Some(first.clone()));

    if first == second {
        // Same timestamp: the store removes every equal element.
        assert!(favorites.favorites().is_empty());
    } else {
        assert_eq!(favorites.favorites(), &[second]);
        assert!(favorites.is_favorite(&q));
    }
}

#[tokio::test]
async fn add_without_document_creates_it() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut favorites = FavoritesStore::new(store.clone());

    let record = favorites.add("u1", &quote("A", "alpha")).await.unwrap();

    assert_eq!(favorites.favorites(), &[record.clone()]);
    assert_eq!(favorites.state(), FavoritesState::Ready);
    assert_eq!(remote_quotes(store.as_ref(), "u1").await.quotes, vec![record]);
}

#[tokio::test]
async fn add_failure_leaves_cache_untouched() {
    let store = Arc::new(FaultyStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();

    store.fail_mutations.store(true, Ordering::SeqCst);
    let q = quote("A", "alpha");
    let err = favorites.add("u1", &q).await.unwrap_err();

    assert!(matches!(err, LiteratureError::Remote(PortError::Unexpected(_))));
    assert!(favorites.favorites().is_empty());
    assert!(!favorites.is_favorite(&q));
}

#[tokio::test]
async fn failed_recovery_create_is_reported() {
    let store = Arc::new(FaultyStore::new());
    store.fail_writes.store(true, Ordering::SeqCst);
    let mut favorites = FavoritesStore::new(store.clone());

    let err = favorites.add("u1", &quote("A", "alpha")).await.unwrap_err();
    assert!(matches!(err, LiteratureError::Remote(_)));
    assert!(favorites.favorites().is_empty());
}

#[tokio::test]
async fn remove_unknown_identity_is_a_silent_no_op() {
    let store = Arc::new(FaultyStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    let calls_before = store.calls();

    let removed = favorites.remove("u1", "does-not-exist").await.unwrap();
    assert_eq!(removed, None);
    assert_eq!(store.calls(), calls_before);
}

#[tokio::test]
async fn remove_failure_keeps_record_cached() {
    let store = Arc::new(FaultyStore::new());
    let mut favorites = FavoritesStore::new(store.clone());
    favorites.load("u1").await.unwrap();
    let q = quote("A", "alpha");
    favorites.add("u1", &q).await.unwrap();

    store.fail_mutations.store(true, Ordering::SeqCst);
    assert!(favorites.remove("u1", &identity_of(&q)).await.is_err());
    assert!(favorites.is_favorite(&q));
}

#[tokio::test]
async fn is_favorite_never_touches_the_store() {
    let store = Arc::new(FaultyStore::new());
    let favorites = FavoritesStore::new(store.clone());

    assert!(!favorites.is_favorite(&quote("A", "alpha")));
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn users_have_separate_documents() {
    let store = Arc::new(MemoryDocumentStore::new());
    let mut alice = FavoritesStore::new(store.clone());
    let mut bob = FavoritesStore::new(store.clone());
    alice.load("alice").await.unwrap();
    bob.load("bob").await.unwrap();

    alice.add("alice", &quote("A", "alpha")).await.unwrap();

    assert_eq!(remote_quotes(store.as_ref(), "alice").await.quotes.len(), 1);
    assert!(remote_quotes(store.as_ref(), "bob").await.quotes.is_empty());
}
