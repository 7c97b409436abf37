// Metadata of a single TikTok video

use anyhow::Result;
use clap::Parser;

use social_scraper::cli::{self, CommonArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::tiktok::TikTokVideoMetadataFetcher;

#[derive(Parser, Debug)]
#[command(name = "tiktok-video", version, about = "Fetch metadata for a TikTok video URL")]
struct Cli {
    /// Video URL, e.g. https://www.tiktok.com/@user/video/7515221269865073966
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

    let fetcher = TikTokVideoMetadataFetcher::new(Box::new(cli::build_extractor()), config.extractor);
    match fetcher.fetch_video_metadata(&cli.url).await {
        Some(meta) if cli.record => cli::print_json(&meta.to_record(&cli.url)),
        Some(meta) => cli::print_json(&meta),
        None => Ok(()),
    }
}
