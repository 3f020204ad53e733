//! Persistence adapter: upsert/read/delete over a `kv_store` table.
//!
//! Backed by `sqlx`'s SQLite pool — a single file is something this
//! harness can stand up without an external database process. The pool
//! is capped at one connection, so every call genuinely queues on that
//! single connection rather than racing several pooled connections
//! against SQLite's single-writer file lock (which surfaces as `database
//! is locked` errors under concurrent load). This is what actually gives
//! the "connection is a singleton shared under a mutex" contract, not
//! the pool abstraction by itself.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::error::ApiError;

/// A handle to the relational store backing the server.
#[derive(Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Connects to `db_path`, creating the file and schema if absent.
    pub async fn connect(db_path: &str) -> Result<Self, sqlx::Error> {
        let url = format!("sqlite://{db_path}?mode=rwc");
        let pool = SqlitePoolOptions::new().max_connections(1).connect(&url).await?;
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS kv_store (key TEXT PRIMARY KEY, value TEXT NOT NULL)",
        )
        .execute(&pool)
        .await?;
        Ok(Store { pool })
    }

    /// Upsert semantics: insert, or replace the value on a key conflict.
    pub async fn put(&self, key: &str, value: &str) -> Result<(), ApiError> {
        sqlx::query(
            "INSERT INTO kv_store (key, value) VALUES (?1, ?2) \
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Returns the stored value, or `None` if the key has no row.
    pub async fn get(&self, key: &str) -> Result<Option<String>, ApiError> {
        let row: Option<(String,)> =
            sqlx::query_as("SELECT value FROM kv_store WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;
        Ok(row.map(|(value,)| value))
    }

    /// Deletes `key`. Returns whether a row existed and was removed.
    pub async fn delete(&self, key: &str) -> Result<bool, ApiError> {
        let result = sqlx::query("DELETE FROM kv_store WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
