// Collaborator seams: raw HTTP, profile/post iteration, progress reporting

use async_trait::async_trait;

use super::errors::ScrapeError;
use super::instagram::{PostPage, Profile};

/// Fetches raw page text over HTTP
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the body; non-success statuses are `ScrapeError::Http`
    async fn get_text(&self, url: &str, headers: &[(&str, &str)]) -> Result<String, ScrapeError>;

    /// POST an urlencoded form body and return the response text
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &str,
    ) -> Result<String, ScrapeError>;
}

/// Resolves profiles and iterates their posts, most recent first
#[async_trait]
pub trait ProfileSource: Send + Sync {
    /// Name of the source (for logging)
    fn name(&self) -> &'static str;

    /// Look up a profile together with its first page of posts
    async fn profile(&self, username: &str) -> Result<Profile, ScrapeError>;

    /// Fetch the page of posts following `cursor`
    async fn posts_page(&self, profile: &Profile, cursor: &str) -> Result<PostPage, ScrapeError>;
}

/// Receives per-post progress from long iterations
pub trait ProgressSink: Send + Sync {
    /// One post has been looked at; `kept` posts qualified so far
    fn post_processed(&self, kept: usize);

    /// Iteration is over
    fn finish(&self, kept: usize);
}

/// Progress sink that discards everything
pub struct NoProgress;

impl ProgressSink for NoProgress {
    fn post_processed(&self, _kept: usize) {}

    fn finish(&self, _kept: usize) {}
}
