//! Document store over PostgreSQL
//!
//! Every resource lives in its own collection: a table holding a JSONB
//! document plus server-assigned id and timestamps. The store is created
//! once at startup and injected into handlers through application state;
//! there is no lazily-cached global connection.

use crate::config::DatabaseConfig;
use crate::error::AppError;
use chrono::{DateTime, Utc};
use deadpool_postgres::{Config, ManagerConfig, Pool, RecyclingMethod, Runtime};
use serde_json::Value;
use tokio_postgres::error::SqlState;
use tokio_postgres::NoTls;
use tracing::{debug, info};
use uuid::Uuid;

/// Collection names. One table per collection, identical layout.
pub mod collections {
    pub const ADMISSION_ENQUIRIES: &str = "admission_enquiries";
    pub const CONTACT_ENQUIRIES: &str = "contact_enquiries";
    pub const FEES_ENQUIRIES: &str = "fees_enquiries";
    pub const CAMPUS_VISITS: &str = "campus_visits";
    pub const BANNERS: &str = "banners";
    pub const NOTICES: &str = "notices";
    pub const ACHIEVERS: &str = "achievers";
    pub const ADMINS: &str = "admins";

    pub const ALL: &[&str] = &[
        ADMISSION_ENQUIRIES,
        CONTACT_ENQUIRIES,
        FEES_ENQUIRIES,
        CAMPUS_VISITS,
        BANNERS,
        NOTICES,
        ACHIEVERS,
        ADMINS,
    ];
}

/// A stored document with its server-assigned identity and timestamps
#[derive(Debug, Clone)]
pub struct StoredDoc {
    pub id: Uuid,
    pub doc: Value,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl StoredDoc {
    /// Merge id and timestamps into the document for API responses
    pub fn into_json(self) -> Value {
        let mut doc = self.doc;
        if let Value::Object(ref mut map) = doc {
            map.insert("id".to_string(), Value::String(self.id.to_string()));
            map.insert(
                "createdAt".to_string(),
                Value::String(self.created_at.to_rfc3339()),
            );
            map.insert(
                "updatedAt".to_string(),
                Value::String(self.updated_at.to_rfc3339()),
            );
        }
        doc
    }
}

/// Create the connection pool from configuration.
///
/// Managed hosts that demand TLS (sslmode=require) get a rustls connector
/// built from the native cert store; everything else connects plain.
pub fn create_pool(config: &DatabaseConfig) -> Result<Pool, AppError> {
    let mut cfg = Config::new();
    cfg.host = Some(config.host.clone());
    cfg.port = Some(config.port);
    cfg.user = Some(config.user.clone());
    cfg.password = Some(config.password.clone());
    cfg.dbname = Some(config.database.clone());
    cfg.manager = Some(ManagerConfig {
        recycling_method: RecyclingMethod::Fast,
    });

    if config.require_tls {
        let certs = rustls_native_certs::load_native_certs();
        let mut root_store = rustls::RootCertStore::empty();
        for cert in certs.certs {
            root_store.add(cert).ok();
        }

        let tls_config = rustls::ClientConfig::builder()
            .with_root_certificates(root_store)
            .with_no_client_auth();

        let tls = tokio_postgres_rustls::MakeRustlsConnect::new(tls_config);

        cfg.create_pool(Some(Runtime::Tokio1), tls)
            .map_err(|e| AppError::Config(format!("Failed to create TLS pool: {}", e)))
    } else {
        cfg.create_pool(Some(Runtime::Tokio1), NoTls)
            .map_err(|e| AppError::Config(format!("Failed to create pool: {}", e)))
    }
}

/// Document store handle shared across handlers
#[derive(Clone)]
pub struct DocStore {
    pool: Pool,
}

impl DocStore {
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }

    /// Verify connectivity and create collection tables and indexes
    pub async fn init_schema(&self) -> Result<(), AppError> {
        let client = self.pool.get().await?;
        client.query_one("SELECT 1", &[]).await?;

        for collection in collections::ALL {
            let ddl = format!(
                "CREATE TABLE IF NOT EXISTS {} (
                    id UUID PRIMARY KEY,
                    doc JSONB NOT NULL,
                    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                    updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
                )",
                collection
            );
            client.execute(&ddl, &[]).await?;
        }

        // Duplicate registrations race past the handler-level check; the
        // index turns the loser into a unique violation.
        client
            .execute(
                "CREATE UNIQUE INDEX IF NOT EXISTS idx_admins_username
                 ON admins ((doc->>'username'))",
                &[],
            )
            .await?;

        info!("Document store schema initialized ({} collections)", collections::ALL.len());
        Ok(())
    }

    /// Insert a document; the store assigns id and timestamps
    pub async fn insert(&self, collection: &'static str, doc: &Value) -> Result<StoredDoc, AppError> {
        let client = self.pool.get().await?;
        let id = Uuid::new_v4();
        let query = format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2)
             RETURNING id, doc, created_at, updated_at",
            collection
        );

        let row = client
            .query_one(&query, &[&id, doc])
            .await
            .map_err(|e| {
                if e.code() == Some(&SqlState::UNIQUE_VIOLATION) {
                    AppError::Conflict("Record already exists".to_string())
                } else {
                    AppError::Database(e)
                }
            })?;

        debug!("Inserted document {} into {}", id, collection);
        Ok(Self::row_to_doc(&row))
    }

    /// List every document in a collection, newest first
    pub async fn list_newest_first(&self, collection: &'static str) -> Result<Vec<StoredDoc>, AppError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT id, doc, created_at, updated_at FROM {}
             ORDER BY created_at DESC",
            collection
        );
        let rows = client.query(&query, &[]).await?;
        Ok(rows.iter().map(Self::row_to_doc).collect())
    }

    /// Find a single document whose text field equals the given value
    pub async fn find_by_text_field(
        &self,
        collection: &'static str,
        field: &str,
        value: &str,
    ) -> Result<Option<StoredDoc>, AppError> {
        let client = self.pool.get().await?;
        let query = format!(
            "SELECT id, doc, created_at, updated_at FROM {}
             WHERE doc->>$1 = $2 LIMIT 1",
            collection
        );
        let row = client.query_opt(&query, &[&field, &value]).await?;
        Ok(row.as_ref().map(Self::row_to_doc))
    }

    /// Replace one top-level field of a document, bumping updated_at.
    /// Returns None when the id does not exist.
    pub async fn update_field(
        &self,
        collection: &'static str,
        id: Uuid,
        field: &str,
        value: &Value,
    ) -> Result<Option<StoredDoc>, AppError> {
        let client = self.pool.get().await?;
        let query = format!(
            "UPDATE {} SET doc = jsonb_set(doc, ARRAY[$2], $3), updated_at = NOW()
             WHERE id = $1
             RETURNING id, doc, created_at, updated_at",
            collection
        );
        let row = client.query_opt(&query, &[&id, &field, value]).await?;
        Ok(row.as_ref().map(Self::row_to_doc))
    }

    /// Hard-delete by identifier. Returns false when the id does not exist.
    pub async fn delete(&self, collection: &'static str, id: Uuid) -> Result<bool, AppError> {
        let client = self.pool.get().await?;
        let query = format!("DELETE FROM {} WHERE id = $1", collection);
        let deleted = client.execute(&query, &[&id]).await?;
        Ok(deleted > 0)
    }

    fn row_to_doc(row: &tokio_postgres::Row) -> StoredDoc {
        StoredDoc {
            id: row.get("id"),
            doc: row.get("doc"),
            created_at: row.get("created_at"),
            updated_at: row.get("updated_at"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn into_json_merges_identity_and_timestamps() {
        let created = "2026-03-01T09:00:00+00:00".parse::<DateTime<Utc>>().unwrap();
        let stored = StoredDoc {
            id: Uuid::nil(),
            doc: json!({"title": "Sports Day"}),
            created_at: created,
            updated_at: created,
        };

        let merged = stored.into_json();
        assert_eq!(merged["title"], "Sports Day");
        assert_eq!(merged["id"], Uuid::nil().to_string());
        assert_eq!(merged["createdAt"], "2026-03-01T09:00:00+00:00");
        assert_eq!(merged["updatedAt"], "2026-03-01T09:00:00+00:00");
    }

    #[test]
    fn all_collections_are_listed_once() {
        let mut names = collections::ALL.to_vec();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), collections::ALL.len());
    }
}
