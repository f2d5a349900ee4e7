//! Read-only query guard.
//!
//! Parses SQL and refuses anything that could modify the database before it
//! reaches the server.

mod parser;

pub use parser::classify_sql;

use crate::error::{ReportError, Result};
use std::fmt;

/// Access level required by a SQL string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SafetyLevel {
    /// Plain queries (SELECT, VALUES, set operations over them).
    ReadOnly,
    /// Anything that writes, locks rows, or changes the schema.
    Write,
    /// The SQL could not be parsed.
    Unparseable,
}

impl fmt::Display for SafetyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::Write => write!(f, "write"),
            Self::Unparseable => write!(f, "unparseable"),
        }
    }
}

/// Returns an error unless `sql` is a read-only query.
pub fn ensure_read_only(sql: &str) -> Result<()> {
    match classify_sql(sql) {
        SafetyLevel::ReadOnly => Ok(()),
        level => Err(ReportError::query(format!(
            "Refusing to run {level} SQL against the news database"
        ))),
    }
}
