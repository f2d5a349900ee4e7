//! The three log reports and the runner that produces them.
//!
//! All three queries run before anything is returned, so a failure in any of
//! them means no report output at all.

mod render;

pub use render::render;

use crate::config::{ConnectionConfig, ReportSettings};
use crate::db::{self, ArticleViews, AuthorViews, DatabaseClient, ErrorDay};
use crate::error::Result;
use serde::Serialize;
use tracing::{info, warn};

/// Number of rows in the top-articles report. `--limit` does not apply to it.
pub const TOP_ARTICLES: u32 = 3;

/// The results of all three reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Most viewed articles.
    pub articles: Vec<ArticleViews>,

    /// Most viewed authors.
    pub authors: Vec<AuthorViews>,

    /// Days above the error threshold, newest first.
    pub error_days: Vec<ErrorDay>,

    /// The threshold the error days were selected with, in percent.
    pub error_threshold: f64,
}

/// Runs the reports against a database client.
pub struct ReportRunner<'a> {
    db: &'a dyn DatabaseClient,
    settings: ReportSettings,
}

impl<'a> ReportRunner<'a> {
    /// Creates a new report runner.
    pub fn new(db: &'a dyn DatabaseClient, settings: ReportSettings) -> Self {
        Self { db, settings }
    }

    /// The `limit` most viewed articles of all time.
    pub async fn top_articles(&self, limit: u32) -> Result<Vec<ArticleViews>> {
        self.db.top_articles(Some(limit)).await
    }

    /// The most viewed authors of all time, by summed article views.
    pub async fn top_authors(&self, limit: Option<u32>) -> Result<Vec<AuthorViews>> {
        self.db.top_authors(limit).await
    }

    /// Days where more than `threshold` percent of requests failed.
    pub async fn error_days(&self, threshold: f64, limit: Option<u32>) -> Result<Vec<ErrorDay>> {
        self.db.error_days(threshold, limit).await
    }

    /// Runs the three reports in order.
    pub async fn run(&self) -> Result<Report> {
        let limit = self.settings.limit;
        let threshold = self.settings.threshold;

        info!("Running top articles report");
        let articles = self.top_articles(TOP_ARTICLES).await?;

        info!(?limit, "Running top authors report");
        let authors = self.top_authors(limit).await?;

        info!(?limit, threshold, "Running error days report");
        let error_days = self.error_days(threshold, limit).await?;

        Ok(Report {
            articles,
            authors,
            error_days,
            error_threshold: threshold,
        })
    }
}

/// Connects, runs all reports, and closes the connection whatever the outcome.
pub async fn generate_report(
    connection: &ConnectionConfig,
    settings: &ReportSettings,
) -> Result<Report> {
    info!("Connecting to {}", connection.display_string());
    let client = db::connect(connection).await?;

    let result = ReportRunner::new(client.as_ref(), settings.clone()).run().await;

    if let Err(e) = client.close().await {
        warn!("Failed to close database connection: {e}");
    }

    result
}
