//! news-report - prints the most popular articles, the most popular authors,
//! and the days with too many failed requests.

use news_report::cli::Cli;
use news_report::config::Config;
use news_report::error::Result;
use news_report::{logging, report};
use std::process::ExitCode;
use tracing::{debug, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // A missing .env file is fine
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    logging::init_stderr_logging(cli.verbose);

    match run(&cli).await {
        Ok(output) => {
            print!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e.diagnostic());
            ExitCode::from(e.exit_code())
        }
    }
}

async fn run(cli: &Cli) -> Result<String> {
    let config_path = cli.config_path();
    debug!("Loading config from: {}", config_path.display());
    let config = Config::load_from_file(&config_path)?;

    let connection = cli.resolve_connection(&config)?;
    let settings = cli.report_settings(&config)?;

    let report = report::generate_report(&connection, &settings).await?;
    info!(
        articles = report.articles.len(),
        authors = report.authors.len(),
        error_days = report.error_days.len(),
        "Reports complete"
    );

    report::render(&report, cli.format)
}
