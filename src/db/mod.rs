//! Database abstraction layer for news-report.
//!
//! Provides a trait-based interface for the three report queries, so the
//! report runner works the same against PostgreSQL and the in-memory fixture.

mod fixture;
mod postgres;
pub mod queries;
mod types;

pub use fixture::{Article, Author, FailingDatabaseClient, FixtureDatabase, LogEntry};
pub use postgres::PostgresClient;
pub use types::{ArticleViews, AuthorViews, ErrorDay};

use crate::config::ConnectionConfig;
use crate::error::Result;
use async_trait::async_trait;

/// Opens a PostgreSQL client for the given configuration.
///
/// This is the central factory function for database connections.
pub async fn connect(config: &ConnectionConfig) -> Result<Box<dyn DatabaseClient>> {
    let client = PostgresClient::connect(config).await?;
    Ok(Box::new(client))
}

/// Trait defining the interface for report data sources.
///
/// A `limit` of `None` returns every row.
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// Articles ordered by descending view count.
    async fn top_articles(&self, limit: Option<u32>) -> Result<Vec<ArticleViews>>;

    /// Authors ordered by descending summed view count.
    async fn top_authors(&self, limit: Option<u32>) -> Result<Vec<AuthorViews>>;

    /// Days whose error percentage exceeds `threshold`, newest first.
    async fn error_days(&self, threshold: f64, limit: Option<u32>) -> Result<Vec<ErrorDay>>;

    /// Closes the database connection.
    async fn close(&self) -> Result<()>;
}
