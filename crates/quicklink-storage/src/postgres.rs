use crate::config::StoreConfig;
use async_trait::async_trait;
use quicklink_core::deadline::with_timeout;
use quicklink_core::error::{Result, StoreError};
use quicklink_core::{Alias, ReadStore, RecordId, TargetUrl, UrlStore};
use sqlx::postgres::{PgPool, PgPoolOptions};
use sqlx::Connection;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};
use uuid::Uuid;

const SCHEMA: &str = include_str!("../ddl/postgres/url.sql");

/// PostgreSQL implementation of the store contract.
///
/// Records live in a single `url` table keyed by a database-generated UUID,
/// with a unique constraint and a lookup index on `alias`. Every operation is
/// one statement against the pool; uniqueness and atomicity are left to the
/// database.
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
    query_timeout: Option<Duration>,
}

impl PostgresStore {
    /// Opens a new connection pool and makes sure the schema exists.
    ///
    /// Fails with `Connection` if the pool cannot be created and with
    /// `Schema` if the table or index cannot be created.
    pub async fn open(config: &StoreConfig) -> Result<Self> {
        const OP: &str = "open";

        config.validate()?;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await
            .map_err(|e| StoreError::Connection {
                op: OP,
                message: e.to_string(),
            })?;

        let store = Self {
            pool,
            query_timeout: config.query_timeout,
        };

        if let Err(err) = store.ensure_schema().await {
            store.pool.close().await;
            return Err(err);
        }

        info!(
            max_connections = config.max_connections,
            min_connections = config.min_connections,
            "url store opened"
        );

        Ok(store)
    }

    /// Creates a store from an existing pool. The schema is not touched and
    /// no query timeout applies until [`Self::with_query_timeout`] sets one.
    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            pool,
            query_timeout: None,
        }
    }

    /// Bounds every subsequent operation by `timeout`.
    pub fn with_query_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.query_timeout = timeout;
        self
    }

    /// Creates the `url` table and its alias index if they are missing.
    pub async fn ensure_schema(&self) -> Result<()> {
        const OP: &str = "ensure_schema";

        self.run(OP, async {
            sqlx::raw_sql(SCHEMA)
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(OP, Access::Schema, e))?;
            Ok(())
        })
        .await
    }

    /// Returns a reference to the underlying pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    async fn run<T, F>(&self, op: &'static str, fut: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        match self.query_timeout {
            Some(timeout) => with_timeout(op, timeout, fut).await,
            None => fut.await,
        }
    }
}

/// What a failed statement was doing, used to pick the error variant.
#[derive(Debug, Clone, Copy)]
enum Access {
    Read,
    Write,
    Schema,
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(sqlx::error::DatabaseError::is_unique_violation)
}

fn map_sqlx_error(op: &'static str, access: Access, err: sqlx::Error) -> StoreError {
    let message = err.to_string();

    match err {
        sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed
        | sqlx::Error::WorkerCrashed
        | sqlx::Error::Io(_)
        | sqlx::Error::Tls(_) => StoreError::Connection { op, message },
        _ => match access {
            Access::Read => StoreError::Read { op, message },
            Access::Write => StoreError::Write { op, message },
            Access::Schema => StoreError::Schema { op, message },
        },
    }
}

#[async_trait]
impl ReadStore for PostgresStore {
    async fn get(&self, alias: &Alias) -> Result<TargetUrl> {
        const OP: &str = "get";

        let url = self
            .run(OP, async {
                sqlx::query_scalar::<_, String>(
                    r#"
                    SELECT url
                    FROM url
                    WHERE alias = $1
                    "#,
                )
                .bind(alias.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(OP, Access::Read, e))
            })
            .await?;

        debug!(%alias, found = url.is_some(), "looked up alias");

        url.map(TargetUrl::new_unchecked)
            .ok_or_else(|| StoreError::NotFound {
                op: OP,
                alias: alias.to_string(),
            })
    }

    async fn exists(&self, alias: &Alias) -> Result<bool> {
        const OP: &str = "exists";

        self.run(OP, async {
            sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM url
                    WHERE alias = $1
                )
                "#,
            )
            .bind(alias.as_str())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_sqlx_error(OP, Access::Read, e))
        })
        .await
    }

    async fn ping(&self) -> Result<()> {
        const OP: &str = "ping";

        self.run(OP, async {
            let mut conn = self.pool.acquire().await.map_err(|e| StoreError::Connection {
                op: OP,
                message: e.to_string(),
            })?;
            conn.ping().await.map_err(|e| StoreError::Connection {
                op: OP,
                message: e.to_string(),
            })
        })
        .await
    }
}

#[async_trait]
impl UrlStore for PostgresStore {
    async fn save(&self, url: &TargetUrl, alias: &Alias) -> Result<RecordId> {
        const OP: &str = "save";

        let id = self
            .run(OP, async {
                let result = sqlx::query_scalar::<_, Uuid>(
                    r#"
                    INSERT INTO url (url, alias)
                    VALUES ($1, $2)
                    RETURNING id
                    "#,
                )
                .bind(url.as_str())
                .bind(alias.as_str())
                .fetch_one(&self.pool)
                .await;

                match result {
                    Ok(id) => Ok(RecordId::from_uuid(id)),
                    Err(err) if is_unique_violation(&err) => Err(StoreError::DuplicateAlias {
                        op: OP,
                        alias: alias.to_string(),
                    }),
                    Err(err) => Err(map_sqlx_error(OP, Access::Write, err)),
                }
            })
            .await?;

        debug!(%alias, %id, "saved url");
        Ok(id)
    }

    async fn delete(&self, id: &RecordId) -> Result<bool> {
        const OP: &str = "delete";

        let result = self
            .run(OP, async {
                sqlx::query(
                    r#"
                    DELETE FROM url
                    WHERE id = $1
                    "#,
                )
                .bind(*id.as_uuid())
                .execute(&self.pool)
                .await
                .map_err(|e| map_sqlx_error(OP, Access::Write, e))
            })
            .await?;

        let removed = result.rows_affected() > 0;
        debug!(%id, removed, "deleted url");
        Ok(removed)
    }

    async fn close(&self) {
        if self.pool.is_closed() {
            return;
        }
        self.pool.close().await;
        info!("url store closed");
    }
}
