//! Report integration tests against a live news database.
//!
//! The properties checked here hold for any contents of the news schema.

use news_report::config::{ConnectionConfig, ReportSettings};
use news_report::db::{DatabaseClient, PostgresClient};
use news_report::report::{generate_report, ReportRunner, TOP_ARTICLES};

/// Helper to get a connection config from the environment.
fn get_test_config() -> Option<ConnectionConfig> {
    let url = std::env::var("DATABASE_URL").ok()?;
    ConnectionConfig::from_connection_string(&url).ok()
}

/// Helper to create a test client.
async fn get_test_client() -> Option<PostgresClient> {
    PostgresClient::connect(&get_test_config()?).await.ok()
}

#[tokio::test]
async fn test_top_articles_sorted_and_limited() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };
    let runner = ReportRunner::new(&client, ReportSettings::default());

    for limit in [1, 3, 8] {
        let rows = runner.top_articles(limit).await.unwrap();
        assert!(rows.len() <= limit as usize);
        assert!(rows.windows(2).all(|w| w[0].views >= w[1].views));
    }

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_author_views_match_article_views() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let articles = client.top_articles(None).await.unwrap();
    let authors = client.top_authors(None).await.unwrap();

    let article_total: i64 = articles.iter().map(|a| a.views).sum();
    let author_total: i64 = authors.iter().map(|a| a.views).sum();
    assert_eq!(article_total, author_total);
    assert!(authors.windows(2).all(|w| w[0].views >= w[1].views));

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_error_days_above_threshold() {
    let Some(client) = get_test_client().await else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let days = client.error_days(1.0, None).await.unwrap();
    for day in &days {
        assert!(day.errors <= day.total);
        assert!(100 * day.errors > day.total, "{} is below 1%", day.day);
    }
    assert!(days.windows(2).all(|w| w[0].day > w[1].day));

    let limited = client.error_days(1.0, Some(1)).await.unwrap();
    assert!(limited.len() <= 1);

    client.close().await.unwrap();
}

#[tokio::test]
async fn test_generate_report() {
    let Some(config) = get_test_config() else {
        eprintln!("Skipping test: DATABASE_URL not set");
        return;
    };

    let settings = ReportSettings {
        limit: Some(2),
        ..Default::default()
    };
    let report = generate_report(&config, &settings).await.unwrap();

    assert!(report.articles.len() <= TOP_ARTICLES as usize);
    assert!(report.authors.len() <= 2);
    assert!(report.error_days.len() <= 2);
}
