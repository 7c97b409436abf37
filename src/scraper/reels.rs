// Reels analytics for an Instagram profile, with JSON/CSV export

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, error, info, warn};

use super::errors::ScrapeError;
use super::instagram::PostStream;
use super::models::{
    format_rfc3339, now_local, ErrorKind, ErrorReport, ProfileReelsReport, ReelRecord, ReelsOutcome,
};
use super::traits::{NoProgress, ProfileSource, ProgressSink};

/// Reels kept per report
pub const MAX_REELS: usize = 12;

const CSV_HEADERS: [&str; 8] = [
    "Username",
    "Follower Count",
    "Reel URL",
    "View Count",
    "Like Count",
    "Thumbnail URL",
    "Caption",
    "Timestamp",
];

/// Which files to write for a report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Csv,
    Both,
}

pub struct ReelsAnalyticsFetcher {
    source: Box<dyn ProfileSource>,
    progress: Box<dyn ProgressSink>,
}

impl ReelsAnalyticsFetcher {
    pub fn new(source: Box<dyn ProfileSource>) -> Self {
        Self {
            source,
            progress: Box::new(NoProgress),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressSink>) -> Self {
        self.progress = progress;
        self
    }

    /// Report for `username`, or a structured error. Never fails.
    pub async fn fetch_profile_reels(&self, username: &str) -> ReelsOutcome {
        match self.try_fetch_profile_reels(username).await {
            Ok(report) => ReelsOutcome::Report(report),
            Err(e) => {
                error!(username, "reels fetch failed: {}", e);
                ReelsOutcome::Error(error_report(&e))
            }
        }
    }

    pub async fn try_fetch_profile_reels(&self, username: &str) -> Result<ProfileReelsReport, ScrapeError> {
        if username.trim().is_empty() {
            return Err(ScrapeError::InvalidInput("username must not be empty".to_string()));
        }
        info!(source = self.source.name(), username, "fetching reels");
        let profile = self.source.profile(username).await?;
        let mut posts = PostStream::new(self.source.as_ref(), &profile)?;

        let mut reels = Vec::new();
        while let Some(item) = posts.next().await? {
            match item {
                Ok(post) if post.is_reel() => match post.permalink() {
                    Some(reel_url) => reels.push(ReelRecord {
                        reel_url,
                        view_count: post.video_view_count,
                        like_count: post.likes,
                        thumbnail_url: post.display_url.clone().filter(|u| !u.is_empty()),
                        caption: post.caption.clone().filter(|c| !c.is_empty()),
                        timestamp: post.date_local(),
                    }),
                    None => warn!(username, "skipping reel without shortcode"),
                },
                Ok(_) => {}
                Err(e) => warn!(username, "skipping post: {}", e),
            }
            self.progress.post_processed(reels.len());
            if reels.len() >= MAX_REELS {
                break;
            }
        }
        self.progress.finish(reels.len());
        debug!(username, reels = reels.len(), "collected reels");

        Ok(ProfileReelsReport {
            username: username.to_string(),
            follower_count: profile.follower_count,
            reels_count: reels.len(),
            reels,
            scraped_at: now_local(),
        })
    }
}

fn error_report(error: &ScrapeError) -> ErrorReport {
    match error {
        ScrapeError::ProfileNotFound(_) => ErrorReport {
            error: "Profile does not exist".to_string(),
            kind: ErrorKind::ProfileNotFound,
        },
        ScrapeError::PrivateProfile(_) => ErrorReport {
            error: "Private profile".to_string(),
            kind: ErrorKind::PrivateProfile,
        },
        other => ErrorReport {
            error: other.to_string(),
            kind: ErrorKind::Other,
        },
    }
}

fn output_path(dir: &Path, username: &str, extension: &str) -> PathBuf {
    dir.join(format!("{}_reels_analytics.{}", username, extension))
}

/// Write `<username>_reels_analytics.json` (indented, UTF-8 as-is)
pub fn save_to_json(report: &ProfileReelsReport, dir: &Path) -> Result<PathBuf, ScrapeError> {
    let path = output_path(dir, &report.username, "json");
    let mut file = File::create(&path)?;
    serde_json::to_writer_pretty(&mut file, report)?;
    file.write_all(b"\n")?;
    info!(path = %path.display(), "saved JSON report");
    Ok(path)
}

/// Write `<username>_reels_analytics.csv`, one row per reel
pub fn save_to_csv(report: &ProfileReelsReport, dir: &Path) -> Result<PathBuf, ScrapeError> {
    let path = output_path(dir, &report.username, "csv");
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(CSV_HEADERS)?;

    let opt = |v: Option<u64>| v.map(|n| n.to_string()).unwrap_or_default();
    for reel in &report.reels {
        writer.write_record([
            report.username.clone(),
            report.follower_count.to_string(),
            reel.reel_url.clone(),
            opt(reel.view_count),
            opt(reel.like_count),
            reel.thumbnail_url.clone().unwrap_or_default(),
            reel.caption.clone().unwrap_or_default(),
            reel.timestamp.and_then(format_rfc3339).unwrap_or_default(),
        ])?;
    }
    writer.flush()?;
    info!(path = %path.display(), "saved CSV report");
    Ok(path)
}

/// Write the report in the requested format(s)
pub fn save_report(
    report: &ProfileReelsReport,
    format: OutputFormat,
    dir: &Path,
) -> Result<Vec<PathBuf>, ScrapeError> {
    let mut written = Vec::new();
    if matches!(format, OutputFormat::Json | OutputFormat::Both) {
        written.push(save_to_json(report, dir)?);
    }
    if matches!(format, OutputFormat::Csv | OutputFormat::Both) {
        written.push(save_to_csv(report, dir)?);
    }
    Ok(written)
}
