use crate::config::DatabaseConfig;
use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Connection, PgPool, Row};
use tinylink_core::{Result, StorageError, UrlRepository};

/// PostgreSQL implementation of the repository contract.
///
/// The backing table is `urls (id BIGSERIAL PRIMARY KEY, alias TEXT NOT
/// NULL UNIQUE, url TEXT NOT NULL)` with a supporting index on `alias`;
/// the schema is assumed to pre-exist (see `ddl/postgres/urls.sql`).
/// Alias uniqueness is enforced solely by the `UNIQUE` constraint, which
/// is the only mechanism that stays race-free under concurrent inserts.
#[derive(Debug, Clone)]
pub struct PostgresStorage {
    pool: PgPool,
}

impl PostgresStorage {
    /// Creates a storage handle from an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool from the given configuration and verifies
    /// the database is reachable before handing the handle out.
    ///
    /// The ping is mandatory: a pool can be constructed even when the
    /// backing database is down, which would defer the failure to the
    /// first real query.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        const OP: &str = "storage.postgres.connect";

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.connection_url())
            .await
            .map_err(|err| connection_error(OP, err))?;

        let mut conn = pool
            .acquire()
            .await
            .map_err(|err| connection_error(OP, err))?;
        conn.ping().await.map_err(|err| connection_error(OP, err))?;

        Ok(Self::new(pool))
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Closes the pool, waiting for in-flight connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn connection_error(op: &str, err: sqlx::Error) -> StorageError {
    StorageError::Connection(format!("{op}: {err}"))
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

#[async_trait]
impl UrlRepository for PostgresStorage {
    async fn save_url(&self, url: &str, alias: &str) -> Result<i64> {
        const OP: &str = "storage.postgres.save_url";

        // RETURNING fetches the generated id in the same round trip; a
        // separate "last inserted id" query is unreliable under
        // concurrent writers.
        let result = sqlx::query(
            r#"
            INSERT INTO urls (url, alias)
            VALUES ($1, $2)
            RETURNING id
            "#,
        )
        .bind(url)
        .bind(alias)
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row
                .try_get("id")
                .map_err(|err| StorageError::persistence(OP, err)),
            Err(err) if is_unique_violation(&err) => {
                Err(StorageError::AliasExists(alias.to_string()))
            }
            Err(err) => Err(StorageError::persistence(OP, err)),
        }
    }
}
