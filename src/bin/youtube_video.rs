// Metadata of a single YouTube video or short

use anyhow::Result;
use clap::Parser;

use social_scraper::cli::{self, CommonArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::youtube::YouTubeVideoMetadataFetcher;

#[derive(Parser, Debug)]
#[command(
    name = "youtube-video",
    version,
    about = "Fetch metadata for a YouTube video or shorts URL",
    after_help = "Example: youtube-video https://www.youtube.com/watch?v=dQw4w9WgXcQ"
)]
struct Cli {
    /// Video or shorts URL
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
    cli::runtime()?.block_on(run(cli))
}

async fn run(cli: Cli) -> Result<()> {
    let config = ScraperConfig::from_args(&cli.common);
    config.log_redacted();

    let fetcher = YouTubeVideoMetadataFetcher::new(Box::new(cli::build_extractor()), config.extractor);
    match fetcher.fetch_video_metadata(&cli.url).await {
        Some(meta) if cli.record => cli::print_json(&meta.to_record(&cli.url)),
        Some(meta) => cli::print_json(&meta),
        None => Ok(()),
    }
}
