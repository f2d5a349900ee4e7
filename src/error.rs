//! Error types for news-report.
//!
//! Every failure ends the run with exit status 1 and a single
//! `<category>: <message>` line on stderr. The underlying driver, parser or
//! I/O error is kept as the `source`.

use std::path::PathBuf;
use thiserror::Error;

/// Exit status for any failure after argument parsing. clap exits with 2 on
/// usage errors before a `ReportError` can exist.
pub const EXIT_FAILURE: u8 = 1;

#[derive(Error, Debug)]
pub enum ReportError {
    /// The server was unreachable, rejected the login, or lacks the database.
    #[error("{message}")]
    Connection {
        message: String,
        #[source]
        source: sqlx::Error,
    },

    /// A report query failed once the session was open.
    #[error("{message}")]
    Query {
        message: String,
        #[source]
        source: Option<sqlx::Error>,
    },

    #[error("Invalid connection string: {0}")]
    ConnectionString(#[from] url::ParseError),

    #[error("Invalid sslmode '{value}'")]
    SslMode {
        value: String,
        #[source]
        source: sqlx::Error,
    },

    #[error("Failed to read config file {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {}:\n  {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Settings that parse but make no sense (zero limit, unknown connection).
    #[error("{0}")]
    Config(String),

    #[error("Failed to serialize report: {0}")]
    Output(#[from] serde_json::Error),
}

impl ReportError {
    /// A query error without a driver error behind it.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::Query {
            message: msg.into(),
            source: None,
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Returns the error category as a string for display purposes.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Connection { .. } => "Connection Error",
            Self::Query { .. } => "Query Error",
            Self::ConnectionString(_)
            | Self::SslMode { .. }
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::Config(_) => "Configuration Error",
            Self::Output(_) => "Internal Error",
        }
    }

    /// The line printed to stderr when the run fails.
    pub fn diagnostic(&self) -> String {
        format!("{}: {}", self.category(), self)
    }

    pub fn exit_code(&self) -> u8 {
        EXIT_FAILURE
    }
}

/// Driver errors raised while running a report are query errors; connection
/// failures are mapped separately where the pool is opened.
impl From<sqlx::Error> for ReportError {
    fn from(source: sqlx::Error) -> Self {
        Self::Query {
            message: describe_query_error(&source),
            source: Some(source),
        }
    }
}

/// Formats a query error with PostgreSQL detail and hint if available.
fn describe_query_error(error: &sqlx::Error) -> String {
    let Some(db_error) = error.as_database_error() else {
        return error.to_string();
    };

    let mut result = String::from("ERROR: ");
    result.push_str(db_error.message());

    if let Some(pg_error) = db_error.try_downcast_ref::<sqlx::postgres::PgDatabaseError>() {
        let fields = [
            ("DETAIL", pg_error.detail()),
            ("HINT", pg_error.hint()),
            ("TABLE", pg_error.table()),
            ("COLUMN", pg_error.column()),
        ];
        for (label, value) in fields {
            if let Some(value) = value {
                result.push_str(&format!("\n  {label}: {value}"));
            }
        }
    }

    result
}

/// Result type alias using ReportError.
pub type Result<T> = std::result::Result<T, ReportError>;
