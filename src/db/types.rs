//! Report row types.
//!
//! Each struct mirrors one row of a report query and is decoded directly
//! from PostgreSQL with `sqlx::FromRow`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// An article together with its all-time view count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ArticleViews {
    /// Article identifier.
    pub id: i32,

    /// Article title.
    pub title: String,

    /// Number of log entries requesting the article.
    pub views: i64,
}

impl ArticleViews {
    pub fn new(id: i32, title: impl Into<String>, views: i64) -> Self {
        Self {
            id,
            title: title.into(),
            views,
        }
    }
}

/// An author together with the summed views of all their articles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct AuthorViews {
    /// Author identifier.
    pub id: i32,

    /// Author display name.
    pub name: String,

    /// Sum of the view counts of the author's articles.
    pub views: i64,
}

impl AuthorViews {
    pub fn new(id: i32, name: impl Into<String>, views: i64) -> Self {
        Self {
            id,
            name: name.into(),
            views,
        }
    }
}

/// A calendar day with its request and error counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct ErrorDay {
    /// The calendar day.
    #[sqlx(rename = "log_day")]
    pub day: NaiveDate,

    /// Requests answered with a non-2xx status.
    pub errors: i64,

    /// All requests of the day.
    pub total: i64,
}

impl ErrorDay {
    pub fn new(day: NaiveDate, errors: i64, total: i64) -> Self {
        Self { day, errors, total }
    }

    /// Percentage of the day's requests that failed.
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        100.0 * self.errors as f64 / self.total as f64
    }
}
