// Public-metadata fetchers for Instagram, TikTok and YouTube.
// Each binary under src/bin is one independent entry point.

pub mod cli;
pub mod config;
pub mod logging;
pub mod progress;
pub mod scraper;
