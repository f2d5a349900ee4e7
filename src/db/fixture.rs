//! In-memory database clients for testing.
//!
//! `FixtureDatabase` holds articles, authors and log entries and computes the
//! report aggregates the same way the SQL does.

use super::{ArticleViews, AuthorViews, DatabaseClient, ErrorDay};
use crate::error::{ReportError, Result};
use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use std::collections::{BTreeMap, HashMap};

/// A row of the `articles` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Article {
    pub id: i32,
    pub title: String,
    pub slug: String,
    pub author: i32,
}

/// A row of the `authors` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Author {
    pub id: i32,
    pub name: String,
}

/// A row of the `log` table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub path: String,
    pub status: String,
    pub time: NaiveDateTime,
}

impl LogEntry {
    /// Returns true if the status code is not 2xx.
    pub fn is_error(&self) -> bool {
        !self.status.starts_with('2')
    }
}

/// An in-memory news database.
#[derive(Debug, Clone, Default)]
pub struct FixtureDatabase {
    articles: Vec<Article>,
    authors: Vec<Author>,
    log: Vec<LogEntry>,
}

impl FixtureDatabase {
    /// Creates an empty fixture database.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an author.
    pub fn with_author(mut self, id: i32, name: impl Into<String>) -> Self {
        self.authors.push(Author {
            id,
            name: name.into(),
        });
        self
    }

    /// Adds an article.
    pub fn with_article(
        mut self,
        id: i32,
        title: impl Into<String>,
        slug: impl Into<String>,
        author: i32,
    ) -> Self {
        self.articles.push(Article {
            id,
            title: title.into(),
            slug: slug.into(),
            author,
        });
        self
    }

    /// Adds `count` identical log entries.
    pub fn with_requests(
        mut self,
        path: &str,
        status: &str,
        time: NaiveDateTime,
        count: usize,
    ) -> Self {
        let entry = LogEntry {
            path: path.to_string(),
            status: status.to_string(),
            time,
        };
        self.log.extend(std::iter::repeat(entry).take(count));
        self
    }

    /// Adds `count` successful requests for the article with `slug`.
    pub fn with_views(self, slug: &str, time: NaiveDateTime, count: usize) -> Self {
        self.with_requests(&format!("/article/{slug}"), "200 OK", time, count)
    }

    /// View counts per article, skipping articles nobody requested.
    fn article_views(&self) -> Vec<(&Article, i64)> {
        let mut hits: HashMap<&str, i64> = HashMap::new();
        for entry in &self.log {
            if let Some(slug) = entry.path.strip_prefix("/article/") {
                *hits.entry(slug).or_default() += 1;
            }
        }

        self.articles
            .iter()
            .filter_map(|article| hits.get(article.slug.as_str()).map(|&n| (article, n)))
            .collect()
    }
}

fn apply_limit<T>(mut rows: Vec<T>, limit: Option<u32>) -> Vec<T> {
    if let Some(limit) = limit {
        rows.truncate(limit as usize);
    }
    rows
}

#[async_trait]
impl DatabaseClient for FixtureDatabase {
    async fn top_articles(&self, limit: Option<u32>) -> Result<Vec<ArticleViews>> {
        let mut rows: Vec<ArticleViews> = self
            .article_views()
            .into_iter()
            .map(|(article, views)| ArticleViews::new(article.id, article.title.clone(), views))
            .collect();
        rows.sort_by(|a, b| b.views.cmp(&a.views).then(a.id.cmp(&b.id)));
        Ok(apply_limit(rows, limit))
    }

    async fn top_authors(&self, limit: Option<u32>) -> Result<Vec<AuthorViews>> {
        let mut totals: BTreeMap<i32, i64> = BTreeMap::new();
        for (article, views) in self.article_views() {
            *totals.entry(article.author).or_default() += views;
        }

        let mut rows: Vec<AuthorViews> = self
            .authors
            .iter()
            .filter_map(|author| {
                totals
                    .get(&author.id)
                    .map(|&views| AuthorViews::new(author.id, author.name.clone(), views))
            })
            .collect();
        rows.sort_by(|a, b| b.views.cmp(&a.views).then(a.id.cmp(&b.id)));
        Ok(apply_limit(rows, limit))
    }

    async fn error_days(&self, threshold: f64, limit: Option<u32>) -> Result<Vec<ErrorDay>> {
        let mut days: BTreeMap<NaiveDate, (i64, i64)> = BTreeMap::new();
        for entry in &self.log {
            let (errors, total) = days.entry(entry.time.date()).or_default();
            *total += 1;
            if entry.is_error() {
                *errors += 1;
            }
        }

        let rows = days
            .into_iter()
            .rev()
            .filter(|(_, (errors, total))| 100.0 * *errors as f64 > threshold * *total as f64)
            .map(|(day, (errors, total))| ErrorDay::new(day, errors, total))
            .collect();
        Ok(apply_limit(rows, limit))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}

/// A client whose every query fails, for exercising error paths.
#[derive(Debug, Clone)]
pub struct FailingDatabaseClient {
    message: String,
}

impl FailingDatabaseClient {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl DatabaseClient for FailingDatabaseClient {
    async fn top_articles(&self, _limit: Option<u32>) -> Result<Vec<ArticleViews>> {
        Err(ReportError::query(self.message.clone()))
    }

    async fn top_authors(&self, _limit: Option<u32>) -> Result<Vec<AuthorViews>> {
        Err(ReportError::query(self.message.clone()))
    }

    async fn error_days(&self, _threshold: f64, _limit: Option<u32>) -> Result<Vec<ErrorDay>> {
        Err(ReportError::query(self.message.clone()))
    }

    async fn close(&self) -> Result<()> {
        Ok(())
    }
}
