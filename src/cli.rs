// Shared command-line arguments and process conventions

use std::path::PathBuf;

use clap::{Args, Parser};
use serde::Serialize;
use tracing::{debug, warn};

use crate::scraper::extractors::{ExtractorMode, InfoExtractorOrchestrator};
use crate::scraper::instagram::default_session_path;
use crate::scraper::models::local_offset;
use crate::scraper::tools::ToolManager;

/// Network and extractor flags every binary accepts
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Proxy for HTTP requests and yt-dlp (e.g. socks5://127.0.0.1:1080)
    #[arg(long, env = "SCRAPER_PROXY")]
    pub proxy: Option<String>,

    /// Network timeout in seconds
    #[arg(long, env = "SCRAPER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout: u32,

    /// yt-dlp backend: auto, python or cli
    #[arg(long, env = "YTDLP_MODE", default_value = "auto")]
    pub extractor: ExtractorMode,

    /// cookies.txt passed to yt-dlp
    #[arg(long, env = "YTDLP_COOKIES")]
    pub cookies: Option<String>,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Flags for binaries that read an Instagram session
#[derive(Args, Debug, Clone)]
pub struct InstagramArgs {
    /// JSON file of Instagram cookies (name -> value)
    #[arg(long, env = "INSTAGRAM_SESSION_FILE")]
    pub session_file: Option<PathBuf>,
}

impl InstagramArgs {
    pub fn session_path(&self) -> Option<PathBuf> {
        self.session_file.clone().or_else(default_session_path)
    }
}

/// Parse arguments; usage errors exit with status 1, `--help`/`--version` with 0
pub fn parse_or_exit<T: Parser>() -> T {
    match T::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let code = if e.use_stderr() { 1 } else { 0 };
            let _ = e.print();
            std::process::exit(code);
        }
    }
}

/// Single-threaded runtime. Reads the local UTC offset first, which `time`
/// only allows while the process has one thread.
pub fn runtime() -> std::io::Result<tokio::runtime::Runtime> {
    local_offset();
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
}

/// yt-dlp extractor for the configured mode; detected tools are logged at debug
pub fn build_extractor() -> InfoExtractorOrchestrator {
    if tracing::enabled!(tracing::Level::DEBUG) {
        for tool in ToolManager::new().get_all_tools() {
            debug!(
                tool = tool.name.as_str(),
                available = tool.is_available,
                version = tool.version.as_deref().unwrap_or("-"),
                path = tool.path.as_deref().unwrap_or("-"),
                "external tool"
            );
        }
    }

    let orchestrator = InfoExtractorOrchestrator::new();
    let status = orchestrator.get_status();
    if !status.python_available && !status.cli_available {
        warn!("Neither yt-dlp nor the Python yt_dlp module was found (pip3 install yt-dlp)");
    }
    orchestrator
}

/// Pretty JSON on stdout
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
