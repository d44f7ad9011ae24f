//! services/api/src/adapters/db.rs
//!
//! This module contains the database adapter, which is the concrete implementation
//! of the `DocumentStore` port from the core crate and of the identity directory
//! used by the web layer. It handles all interactions with PostgreSQL using `sqlx`.
//!
//! Documents live in a single JSONB table keyed by `(collection, key)`. Array
//! mutations run as one `UPDATE` statement each, so concurrent appends and
//! removals on the same document never lose each other's element.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use daily_literature_core::domain::SessionIdentity;
use daily_literature_core::ports::{ArrayOp, DocumentStore, NewDocument, PortError, PortResult};
use serde_json::Value;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::adapters::identity::IdentityDirectory;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// A database adapter that implements the `DocumentStore` port.
#[derive(Clone)]
pub struct DbAdapter {
    pool: PgPool,
}

impl DbAdapter {
    /// Creates a new `DbAdapter`.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// A helper function to run database migrations at startup.
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }
}

//=========================================================================================
// "Impure" Database Record Structs
//=========================================================================================

#[derive(FromRow)]
struct UserRecord {
    user_id: Uuid,
    is_anonymous: bool,
}
impl UserRecord {
    fn to_domain(self) -> SessionIdentity {
        SessionIdentity {
            id: self.user_id.to_string(),
            is_anonymous: self.is_anonymous,
        }
    }
}

fn unexpected(e: sqlx::Error) -> PortError {
    PortError::Unexpected(e.to_string())
}

//=========================================================================================
// SQL
//=========================================================================================

const APPEND_SQL: &str = r#"
UPDATE documents
SET body = jsonb_set(
        body,
        ARRAY[$3::text],
        COALESCE(CASE WHEN jsonb_typeof(body -> $3::text) = 'array' THEN body -> $3::text END, '[]'::jsonb)
            || jsonb_build_array($4::jsonb),
        true
    ),
    updated_at = now()
WHERE collection = $1 AND key = $2
"#;

const REMOVE_SQL: &str = r#"
UPDATE documents
SET body = jsonb_set(
        body,
        ARRAY[$3::text],
        COALESCE(
            (SELECT jsonb_agg(e.value ORDER BY e.ordinality)
             FROM jsonb_array_elements(
                 CASE WHEN jsonb_typeof(body -> $3::text) = 'array' THEN body -> $3::text ELSE '[]'::jsonb END
             ) WITH ORDINALITY AS e(value, ordinality)
             WHERE e.value <> $4::jsonb),
            '[]'::jsonb
        ),
        true
    ),
    updated_at = now()
WHERE collection = $1 AND key = $2
"#;

const INSERT_STAMPED_SQL: &str = r#"
INSERT INTO documents (collection, key, body)
VALUES (
    $1,
    $2,
    CASE WHEN $4::text IS NULL THEN $3::jsonb
         ELSE jsonb_set($3::jsonb, ARRAY[$4::text], to_jsonb(now()), true)
    END
)
"#;

//=========================================================================================
// `DocumentStore` Trait Implementation
//=========================================================================================

#[async_trait]
impl DocumentStore for DbAdapter {
    async fn read_document(&self, collection: &str, key: &str) -> PortResult<Option<Value>> {
        sqlx::query_scalar::<_, Value>(
            "SELECT body FROM documents WHERE collection = $1 AND key = $2",
        )
        .bind(collection)
        .bind(key)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)
    }

    async fn write_document(&self, collection: &str, key: &str, value: Value) -> PortResult<()> {
        sqlx::query(
            "INSERT INTO documents (collection, key, body) VALUES ($1, $2, $3)
             ON CONFLICT (collection, key) DO UPDATE SET body = EXCLUDED.body, updated_at = now()",
        )
        .bind(collection)
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;
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
        let sql = match op {
            ArrayOp::Append => APPEND_SQL,
            ArrayOp::Remove => REMOVE_SQL,
        };

        let result = sqlx::query(sql)
            .bind(collection)
            .bind(key)
            .bind(field)
            .bind(element)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(PortError::NotFound(format!("Document {}/{} not found", collection, key)));
        }
        Ok(())
    }

    async fn append_to_collection(
        &self,
        collection: &str,
        document: NewDocument,
    ) -> PortResult<String> {
        let key = Uuid::new_v4().to_string();
        sqlx::query(INSERT_STAMPED_SQL)
            .bind(collection)
            .bind(&key)
            .bind(document.body)
            .bind(document.server_timestamp_field)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(key)
    }
}

//=========================================================================================
// `IdentityDirectory` Trait Implementation
//=========================================================================================

#[async_trait]
impl IdentityDirectory for DbAdapter {
    async fn create_anonymous_identity(&self) -> PortResult<SessionIdentity> {
        let record = sqlx::query_as::<_, UserRecord>(
            "INSERT INTO users (user_id, is_anonymous) VALUES ($1, TRUE) RETURNING user_id, is_anonymous",
        )
        .bind(Uuid::new_v4())
        .fetch_one(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(record.to_domain())
    }

    async fn create_auth_session(
        &self,
        token: &str,
        user_id: &str,
        expires_at: DateTime<Utc>,
    ) -> PortResult<()> {
        let user_id = Uuid::parse_str(user_id)
            .map_err(|_| PortError::NotFound(format!("User {} not found", user_id)))?;

        sqlx::query("INSERT INTO auth_sessions (auth_session_id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(token)
            .bind(user_id)
            .bind(expires_at)
            .execute(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db) if db.is_foreign_key_violation() => {
                    PortError::NotFound(format!("User {} not found", user_id))
                }
                other => unexpected(other),
            })?;
        Ok(())
    }

    async fn validate_auth_session(&self, token: &str) -> PortResult<SessionIdentity> {
        let record = sqlx::query_as::<_, UserRecord>(
            "SELECT u.user_id, u.is_anonymous
             FROM auth_sessions s JOIN users u ON u.user_id = s.user_id
             WHERE s.auth_session_id = $1 AND s.expires_at > now()",
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        record.map(UserRecord::to_domain).ok_or(PortError::Unauthorized)
    }

    async fn delete_auth_session(&self, token: &str) -> PortResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE auth_session_id = $1")
            .bind(token)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(())
    }

    async fn purge_expired_sessions(&self) -> PortResult<u64> {
        let result = sqlx::query("DELETE FROM auth_sessions WHERE expires_at <= now()")
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;
        Ok(result.rows_affected())
    }
}
