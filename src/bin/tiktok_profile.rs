// Follower count and average views of a TikTok profile

use std::io::{self, BufRead, Write};

use anyhow::{bail, Result};
use clap::Parser;

use social_scraper::cli::{self, CommonArgs};
use social_scraper::config::{self, ScraperConfig};
use social_scraper::logging;
use social_scraper::scraper::http::{HttpPageFetcher, BROWSER_USER_AGENT};
use social_scraper::scraper::tiktok::TikTokProfileStatsFetcher;

#[derive(Parser, Debug)]
#[command(name = "tiktok-profile", version, about = "TikTok follower count and average views")]
struct Cli {
    /// TikTok username; asked for on stdin when omitted
    username: Option<String>,

    /// Print the platform-neutral record instead
    #[arg(long)]
    record: bool,

    #[command(flatten)]
    common: CommonArgs,
}

fn prompt_username() -> Result<String> {
    print!("Enter TikTok username: ");
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    let username = line.trim().to_string();
    if username.is_empty() {
        bail!("no username given");
    }
    Ok(username)
}

fn main() -> Result<()> {
    config::load_dotenv();
    let cli: Cli = cli::parse_or_exit();
    logging::init(cli.common.verbose)?;

    let username = match cli.username.clone() {
        Some(username) => username,
        None => prompt_username()?,
    };
    cli::runtime()?.block_on(run(cli, username))
}

async fn run(cli: Cli, username: String) -> Result<()> {
    let config = ScraperConfig::from_args(&cli.common);
    config.log_redacted();

    let fetcher = HttpPageFetcher::new(&config.network, BROWSER_USER_AGENT)?;
    let stats = TikTokProfileStatsFetcher::new(
        Box::new(fetcher),
        Box::new(cli::build_extractor()),
        config.extractor.clone(),
    )
    .fetch_stats(&username)
    .await;

    if cli.record {
        cli::print_json(&stats.to_record())
    } else {
        cli::print_json(&stats)
    }
}
