// Print permalinks of an Instagram profile's most recent posts, one per line

use anyhow::Result;
use clap::Parser;
use tracing::error;

use social_scraper::cli::{self, CommonArgs, InstagramArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::http::{HttpPageFetcher, BROWSER_USER_AGENT};
use social_scraper::scraper::instagram::{InstagramSession, InstagramWebClient};
use social_scraper::scraper::post_urls::{list_recent_post_urls, DEFAULT_MAX_COUNT};

#[derive(Parser, Debug)]
#[command(name = "ig-post-urls", version, about = "List the most recent post URLs of an Instagram profile")]
struct Cli {
    /// Instagram username
    username: String,

    /// How many posts to list
    #[arg(default_value_t = DEFAULT_MAX_COUNT)]
    count: usize,

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

    match list_recent_post_urls(&client, &cli.username, cli.count).await {
        Ok(urls) => {
            for url in urls {
                println!("{}", url);
            }
        }
        Err(e) => error!("Error: {}", e),
    }
    Ok(())
}
