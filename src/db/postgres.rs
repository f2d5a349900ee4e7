//! PostgreSQL database client implementation.
//!
//! Provides the `PostgresClient` struct that implements the `DatabaseClient` trait
//! for PostgreSQL databases using sqlx.

use crate::config::ConnectionConfig;
use crate::db::queries::{self, ERROR_DAYS_SQL, TOP_ARTICLES_SQL, TOP_AUTHORS_SQL};
use crate::db::{ArticleViews, AuthorViews, DatabaseClient, ErrorDay};
use crate::error::{ReportError, Result};
use crate::safety::ensure_read_only;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use std::time::{Duration, Instant};
use tracing::debug;

/// Time allowed for establishing the connection.
const ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// PostgreSQL database client.
///
/// Holds a pool capped at a single connection; every session is read-only.
#[derive(Debug)]
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Opens one read-only connection described by `config`.
    ///
    /// The report queries are checked by the SQL guard before the server is
    /// contacted.
    pub async fn connect(config: &ConnectionConfig) -> Result<Self> {
        for (_, sql) in queries::ALL {
            ensure_read_only(sql)?;
        }

        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(ACQUIRE_TIMEOUT_SECS))
            .connect_with(connect_options(config)?)
            .await
            .map_err(|e| map_connection_error(e, config))?;

        debug!("Successfully connected to database");
        Ok(Self { pool })
    }
}

#[async_trait]
impl DatabaseClient for PostgresClient {
    async fn top_articles(&self, limit: Option<u32>) -> Result<Vec<ArticleViews>> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, ArticleViews>(TOP_ARTICLES_SQL)
            .bind(limit.map(i64::from))
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), elapsed = ?start.elapsed(), "top articles query finished");
        Ok(rows)
    }

    async fn top_authors(&self, limit: Option<u32>) -> Result<Vec<AuthorViews>> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, AuthorViews>(TOP_AUTHORS_SQL)
            .bind(limit.map(i64::from))
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), elapsed = ?start.elapsed(), "top authors query finished");
        Ok(rows)
    }

    async fn error_days(&self, threshold: f64, limit: Option<u32>) -> Result<Vec<ErrorDay>> {
        let start = Instant::now();

        let rows = sqlx::query_as::<_, ErrorDay>(ERROR_DAYS_SQL)
            .bind(threshold)
            .bind(limit.map(i64::from))
            .fetch_all(&self.pool)
            .await?;

        debug!(rows = rows.len(), elapsed = ?start.elapsed(), "error days query finished");
        Ok(rows)
    }

    async fn close(&self) -> Result<()> {
        self.pool.close().await;
        Ok(())
    }
}

/// Builds driver options directly from the resolved fields, so credentials
/// never pass through URL encoding.
fn connect_options(config: &ConnectionConfig) -> Result<PgConnectOptions> {
    let mut options = PgConnectOptions::new()
        .host(config.host())
        .port(config.port())
        .username(config.user())
        .database(config.database())
        .application_name(env!("CARGO_PKG_NAME"))
        .options([("default_transaction_read_only", "on")]);

    if let Some(password) = config.password() {
        options = options.password(password);
    }

    if let Some(mode) = &config.sslmode {
        let ssl_mode = mode
            .parse::<PgSslMode>()
            .map_err(|source| ReportError::SslMode {
                value: mode.clone(),
                source,
            })?;
        options = options.ssl_mode(ssl_mode);
    }

    Ok(options)
}

/// Maps sqlx connection errors to user-friendly messages.
fn map_connection_error(error: sqlx::Error, config: &ConnectionConfig) -> ReportError {
    let host = config.host();
    let port = config.port();

    let error_str = error.to_string().to_lowercase();

    let message = if error_str.contains("connection refused")
        || error_str.contains("could not connect")
    {
        format!("Cannot connect to {host}:{port}. Check that the server is running.")
    } else if error_str.contains("password authentication failed")
        || error_str.contains("authentication failed")
    {
        format!(
            "Authentication failed for user '{}'. Check your credentials.",
            config.user()
        )
    } else if error_str.contains("does not exist") && error_str.contains("database") {
        format!("Database '{}' does not exist.", config.database())
    } else if error_str.contains("ssl") || error_str.contains("tls") {
        "Server requires SSL. Add '?sslmode=require' to the connection string or set PGSSLMODE."
            .to_string()
    } else if error_str.contains("timed out") || error_str.contains("timeout") {
        format!(
            "Connection to {host}:{port} timed out. The server may be overloaded or unreachable."
        )
    } else {
        format!("{host}:{port}: {error}")
    };

    ReportError::Connection {
        message,
        source: error,
    }
}
