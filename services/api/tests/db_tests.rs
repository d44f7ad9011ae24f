//! PostgreSQL adapter tests. Each test gets a fresh database with the crate's
//! migrations applied; run with `DATABASE_URL` set and `--ignored`.

use api_lib::adapters::{DbAdapter, IdentityDirectory};
use chrono::{DateTime, Duration, Utc};
use daily_literature_core::ports::{ArrayOp, DocumentStore, NewDocument, PortError};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use sqlx::PgPool;

const COLLECTION: &str = "favorites";
const FIELD: &str = "quotes";

fn record(id: &str, added_at: &str) -> Value {
    json!({ "id": id, "text": "吾輩は猫である。", "addedAt": added_at })
}

async fn quotes(db: &DbAdapter, key: &str) -> Value {
    db.read_document(COLLECTION, key).await.unwrap().unwrap()[FIELD].clone()
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn append_extends_an_existing_array(pool: PgPool) {
    let db = DbAdapter::new(pool);
    db.write_document(COLLECTION, "u1", json!({ FIELD: [] })).await.unwrap();

    let a = record("a", "2024-01-01T00:00:00Z");
    let b = record("b", "2024-01-02T00:00:00Z");
    db.mutate_array_field(COLLECTION, "u1", FIELD, ArrayOp::Append, a.clone()).await.unwrap();
    db.mutate_array_field(COLLECTION, "u1", FIELD, ArrayOp::Append, b.clone()).await.unwrap();

    assert_eq!(quotes(&db, "u1").await, json!([a, b]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn append_creates_a_missing_field(pool: PgPool) {
    let db = DbAdapter::new(pool);
    db.write_document(COLLECTION, "u1", json!({})).await.unwrap();

    let a = record("a", "2024-01-01T00:00:00Z");
    db.mutate_array_field(COLLECTION, "u1", FIELD, ArrayOp::Append, a.clone()).await.unwrap();

    assert_eq!(quotes(&db, "u1").await, json!([a]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn mutating_a_missing_document_is_not_found(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let a = record("a", "2024-01-01T00:00:00Z");

    let appended = db.mutate_array_field(COLLECTION, "nobody", FIELD, ArrayOp::Append, a.clone()).await;
    assert!(matches!(appended, Err(PortError::NotFound(_))));

    let removed = db.mutate_array_field(COLLECTION, "nobody", FIELD, ArrayOp::Remove, a).await;
    assert!(matches!(removed, Err(PortError::NotFound(_))));
    assert_eq!(db.read_document(COLLECTION, "nobody").await.unwrap(), None);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn remove_takes_only_the_exact_element(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let first = record("same", "2024-01-01T00:00:00Z");
    let second = record("same", "2024-01-02T00:00:00Z");
    let other = record("other", "2024-01-03T00:00:00Z");
    db.write_document(COLLECTION, "u1", json!({ FIELD: [first, second, other] }))
        .await
        .unwrap();

    db.mutate_array_field(COLLECTION, "u1", FIELD, ArrayOp::Remove, first).await.unwrap();

    assert_eq!(quotes(&db, "u1").await, json!([second, other]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn removing_the_last_element_leaves_an_empty_array(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let only = record("a", "2024-01-01T00:00:00Z");
    db.write_document(COLLECTION, "u1", json!({ FIELD: [only] })).await.unwrap();

    db.mutate_array_field(COLLECTION, "u1", FIELD, ArrayOp::Remove, only).await.unwrap();

    assert_eq!(quotes(&db, "u1").await, json!([]));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn append_to_collection_stamps_the_server_time(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let before = Utc::now() - Duration::minutes(1);

    let key = db
        .append_to_collection(
            "quoteRequests",
            NewDocument {
                body: json!({ "status": "pending", "submittedAt": null }),
                server_timestamp_field: Some("submittedAt"),
            },
        )
        .await
        .unwrap();

    let stored = db.read_document("quoteRequests", &key).await.unwrap().unwrap();
    assert_eq!(stored["status"], "pending");
    let stamped: DateTime<Utc> = serde_json::from_value(stored["submittedAt"].clone()).unwrap();
    assert!(stamped > before);
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn auth_sessions_resolve_until_expired_or_deleted(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let identity = db.create_anonymous_identity().await.unwrap();
    assert!(identity.is_anonymous);

    let tomorrow = Utc::now() + Duration::days(1);
    db.create_auth_session("live", &identity.id, tomorrow).await.unwrap();
    db.create_auth_session("expired", &identity.id, Utc::now() - Duration::seconds(1))
        .await
        .unwrap();

    assert_eq!(db.validate_auth_session("live").await, Ok(identity.clone()));
    assert_eq!(db.validate_auth_session("expired").await, Err(PortError::Unauthorized));
    assert_eq!(db.validate_auth_session(&identity.id).await, Err(PortError::Unauthorized));

    assert_eq!(db.purge_expired_sessions().await.unwrap(), 1);

    db.delete_auth_session("live").await.unwrap();
    assert_eq!(db.validate_auth_session("live").await, Err(PortError::Unauthorized));
}

#[sqlx::test(migrations = "./migrations")]
#[ignore = "needs a PostgreSQL DATABASE_URL"]
async fn auth_session_for_an_unknown_user_is_not_found(pool: PgPool) {
    let db = DbAdapter::new(pool);
    let stranger = uuid::Uuid::new_v4().to_string();
    let result = db
        .create_auth_session("token", &stranger, Utc::now() + Duration::days(1))
        .await;
    assert!(matches!(result, Err(PortError::NotFound(_))));
}
