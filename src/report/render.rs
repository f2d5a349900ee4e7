//! Text and JSON rendering of a finished report.

use super::Report;
use crate::cli::OutputFormat;
use crate::db::{ArticleViews, AuthorViews, ErrorDay};
use crate::error::Result;
use chrono::NaiveDate;
use serde::Serialize;
use std::fmt::Write;

/// Renders the report in the requested format.
pub fn render(report: &Report, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(report)),
        OutputFormat::Json => render_json(report),
    }
}

fn render_text(report: &Report) -> String {
    let mut out = String::new();

    section(
        &mut out,
        "The most popular three articles of all time:",
        &report.articles,
        |a: &ArticleViews| format!("{} ({} views)", a.title, a.views),
        "No popular articles to report.",
    );

    section(
        &mut out,
        "The most popular article authors of all time:",
        &report.authors,
        |a: &AuthorViews| format!("{} ({} views)", a.name, a.views),
        "No popular authors to report.",
    );

    section(
        &mut out,
        &format!(
            "Days with more than {}% of requests leading to errors:",
            report.error_threshold
        ),
        &report.error_days,
        |d: &ErrorDay| format!("{} ({:.2}% error)", d.day, d.error_rate()),
        "No error days to report.",
    );

    out
}

fn section<T>(
    out: &mut String,
    heading: &str,
    rows: &[T],
    format_row: impl Fn(&T) -> String,
    empty: &str,
) {
    // Writing to a String cannot fail.
    let _ = writeln!(out, "{heading}");
    if rows.is_empty() {
        let _ = writeln!(out, "  {empty}");
    }
    for row in rows {
        let _ = writeln!(out, "  {}", format_row(row));
    }
    out.push('\n');
}

#[derive(Serialize)]
struct JsonReport<'a> {
    articles: &'a [ArticleViews],
    authors: &'a [AuthorViews],
    error_days: Vec<JsonErrorDay>,
    error_threshold: f64,
}

#[derive(Serialize)]
struct JsonErrorDay {
    day: NaiveDate,
    errors: i64,
    total: i64,
    error_rate: f64,
}

fn render_json(report: &Report) -> Result<String> {
    let doc = JsonReport {
        articles: &report.articles,
        authors: &report.authors,
        error_days: report
            .error_days
            .iter()
            .map(|d| JsonErrorDay {
                day: d.day,
                errors: d.errors,
                total: d.total,
                error_rate: d.error_rate(),
            })
            .collect(),
        error_threshold: report.error_threshold,
    };

    let mut json = serde_json::to_string_pretty(&doc)?;
    json.push('\n');
    Ok(json)
}
