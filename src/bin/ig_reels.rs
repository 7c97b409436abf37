// Reels analytics for an Instagram profile, saved as JSON and/or CSV

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info};

use social_scraper::cli::{self, CommonArgs, InstagramArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::progress::SpinnerProgress;
use social_scraper::scraper::http::{HttpPageFetcher, BROWSER_USER_AGENT};
use social_scraper::scraper::instagram::{InstagramSession, InstagramWebClient};
use social_scraper::scraper::models::ReelsOutcome;
use social_scraper::scraper::reels::{save_report, OutputFormat, ReelsAnalyticsFetcher};

#[derive(Parser, Debug)]
#[command(name = "ig-reels", version, about = "Scrape Instagram Reels Analytics")]
struct Cli {
    /// Instagram username to scrape
    username: String,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Directory for the report files
    #[arg(long, env = "OUTPUT_DIR", default_value = ".")]
    output_dir: PathBuf,

    /// Also print the report (or error) as JSON on stdout
    #[arg(long)]
    print: bool,

    #[command(flatten)]
    instagram: InstagramArgs,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli: Cli = cli::parse_or_exit();
    logging::init(cli.common.verbose)?;
    cli::runtime()?.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScraperConfig::from_args(&cli.common);
    config.log_redacted();

    let session = InstagramSession::load_or_warn(cli.instagram.session_path().as_deref());
    let fetcher = HttpPageFetcher::new(&config.network, BROWSER_USER_AGENT)?;
    let client = InstagramWebClient::new(fetcher, session);
    let reels = ReelsAnalyticsFetcher::new(Box::new(client))
        .with_progress(Box::new(SpinnerProgress::new(format!("@{}", cli.username))));

    info!("Fetching reels for @{}...", cli.username);
    let outcome = reels.fetch_profile_reels(&cli.username).await;
    if cli.print {
        cli::print_json(&outcome)?;
    }

    if let ReelsOutcome::Report(report) = &outcome {
        info!(reels = report.reels_count, followers = report.follower_count, "report ready");
        match save_report(report, cli.format, &cli.output_dir) {
            Ok(paths) => {
                for path in paths {
                    info!("Data saved to {}", path.display());
                }
            }
            Err(e) => error!("Failed to save report: {}", e),
        }
    }
    Ok(())
}
