// Metadata of a single Instagram post or reel through the GraphQL endpoint

use anyhow::Result;
use clap::Parser;
use tracing::error;

use social_scraper::cli::{self, CommonArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::http::HttpPageFetcher;
use social_scraper::scraper::instagram::{fetch_media, MediaAuth};

#[derive(Parser, Debug)]
#[command(name = "ig-media", version, about = "Fetch metadata for an Instagram post or reel URL")]
struct Cli {
    /// Post or reel URL
    url: String,

    /// Print the platform-neutral record instead
    #[arg(long)]
    record: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli: Cli = cli::parse_or_exit();
    logging::init(cli.common.verbose)?;

    let auth = match config::media_auth_from_env() {
        Ok(auth) => auth,
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    };
    cli::runtime()?.block_on(run(cli, auth))
}

async fn run(cli: Cli, auth: MediaAuth) -> Result<()> {
    let config = ScraperConfig::from_args(&cli.common);
    let fetcher = HttpPageFetcher::new(&config.network, &auth.user_agent)?;
    match fetch_media(&fetcher, &cli.url, &auth).await {
        Ok(media) if cli.record => cli::print_json(&media.to_record(&cli.url)),
        Ok(media) => cli::print_json(&media),
        Err(e) => {
            error!("Failed to fetch media: {}", e);
            Ok(())
        }
    }
}
