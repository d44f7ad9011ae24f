//! Integration tests for quote request submission.

mod helpers;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use daily_literature_core::requests::REQUESTS_COLLECTION;
use daily_literature_core::{
    DocumentStore, LiteratureError, PortError, QuoteRequest, RequestForm, RequestStatus,
    RequestSubmitter,
};
use helpers::FaultyStore;

fn form_with_reason(reason: &str) -> RequestForm {
    RequestForm {
        quote_text: "知に働けば角が立つ。情に棹させば流される。".to_string(),
        author: "夏目漱石".to_string(),
        reason: reason.to_string(),
        email: Some(" reader@example.com ".to_string()),
        ..RequestForm::default()
    }
}

#[tokio::test]
async fn reason_of_nineteen_characters_is_rejected_without_remote_call() {
    let store = Arc::new(FaultyStore::new());
    let submitter = RequestSubmitter::new(store.clone());

    let err = submitter
        .submit("u1", &form_with_reason(&"a".repeat(19)))
        .await
        .unwrap_err();

    match err {
        LiteratureError::Validation(errors) => {
            assert!(errors.contains("reason"));
            assert_eq!(errors.fields().len(), 1);
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(store.calls(), 0);
}

#[tokio::test]
async fn reason_of_twenty_characters_is_submitted() {
    let store = Arc::new(FaultyStore::new());
    let submitter = RequestSubmitter::new(store.clone());

    let id = submitter
        .submit("u1", &form_with_reason(&"a".repeat(20)))
        .await
        .unwrap();

    assert_eq!(store.calls(), 1);
    let stored = store
        .read_document(REQUESTS_COLLECTION, &id)
        .await
        .unwrap()
        .expect("request stored");
    let request: QuoteRequest = serde_json::from_value(stored).unwrap();
    assert_eq!(request.user_id, "u1");
    assert_eq!(request.status, RequestStatus::Pending);
    assert_eq!(request.email, "reader@example.com");
    assert!(request.submitted_at.is_some());
    assert!(request.reviewed_at.is_none());
    assert_eq!(request.reviewer_notes, "");
}

#[tokio::test]
async fn store_failure_is_propagated_unchanged() {
    let store = Arc::new(FaultyStore::new());
    store.fail_appends.store(true, Ordering::SeqCst);
    let submitter = RequestSubmitter::new(store.clone());

    let err = submitter
        .submit("u1", &form_with_reason(&"a".repeat(25)))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        LiteratureError::Remote(PortError::Unexpected(ref msg)) if msg == "injected failure"
    ));
}

#[tokio::test]
async fn each_submission_gets_its_own_record() {
    let store = Arc::new(FaultyStore::new());
    let submitter = RequestSubmitter::new(store.clone());
    let form = form_with_reason(&"a".repeat(30));

    let first = submitter.submit("u1", &form).await.unwrap();
    let second = submitter.submit("u1", &form).await.unwrap();

    assert_ne!(first, second);
    assert_eq!(store.inner.collection_len(REQUESTS_COLLECTION), 2);
}
