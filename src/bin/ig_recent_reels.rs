// Recent reel URLs from a profile's public reels tab, printed as a JSON array

use anyhow::Result;
use clap::Parser;
use tracing::error;

use social_scraper::cli::{self, CommonArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::http::{HttpPageFetcher, BROWSER_USER_AGENT};
use social_scraper::scraper::instagram::scrape_recent_reels;

#[derive(Parser, Debug)]
#[command(name = "ig-recent-reels", version, about = "List up to 12 recent reels of an Instagram profile")]
struct Cli {
    /// Instagram username, e.g. nasa
    username: String,

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
    let fetcher = HttpPageFetcher::new(&config.network, BROWSER_USER_AGENT)?;

    match scrape_recent_reels(&fetcher, &cli.username).await {
        Ok(urls) => cli::print_json(&urls),
        Err(e) => {
            error!("Failed to fetch reels: {}", e);
            std::process::exit(1);
        }
    }
}
