// Most recent post permalinks of an Instagram profile

use tracing::debug;

use super::errors::ScrapeError;
use super::instagram::PostStream;
use super::traits::ProfileSource;

pub const DEFAULT_MAX_COUNT: usize = 20;

/// Permalinks of up to `max_count` most recent posts, newest first.
///
/// Reels render as `/reel/<code>/`, everything else as `/p/<code>/`.
/// Any failure aborts the listing; there are no partial results.
pub async fn list_recent_post_urls(
    source: &dyn ProfileSource,
    username: &str,
    max_count: usize,
) -> Result<Vec<String>, ScrapeError> {
    if username.trim().is_empty() {
        return Err(ScrapeError::InvalidInput("username must not be empty".to_string()));
    }
    let mut urls = Vec::with_capacity(max_count.min(DEFAULT_MAX_COUNT));
    if max_count == 0 {
        return Ok(urls);
    }

    let profile = source.profile(username).await?;
    let mut posts = PostStream::new(source, &profile)?;

    while let Some(item) = posts.next().await? {
        let post = item?;
        let url = post
            .permalink()
            .ok_or_else(|| ScrapeError::Item(format!("{} post without shortcode", post.typename)))?;
        urls.push(url);
        if urls.len() >= max_count {
            break;
        }
    }

    debug!(username, count = urls.len(), "listed recent posts");
    Ok(urls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::instagram::posts::testing::{image_node, page, profile, video_node, FakeSource};
    use crate::scraper::instagram::PostPage;
    use serde_json::json;
    use std::collections::HashMap;

    fn source(first: PostPage, pages: Vec<(&str, PostPage)>) -> FakeSource {
        FakeSource {
            profile: Ok(profile(first)),
            pages: pages.into_iter().map(|(c, p)| (c.to_string(), Ok(p))).collect(),
        }
    }

    #[tokio::test]
    async fn test_permalinks_by_post_kind() {
        let src = source(
            page(vec![video_node("Reel0001", 5), image_node("Post0001")], Some("c1")),
            vec![("c1", page(vec![video_node("Reel0002", 7)], None))],
        );
        let urls = list_recent_post_urls(&src, "nasa", DEFAULT_MAX_COUNT).await.unwrap();
        assert_eq!(
            urls,
            vec![
                "https://www.instagram.com/reel/Reel0001/",
                "https://www.instagram.com/p/Post0001/",
                "https://www.instagram.com/reel/Reel0002/",
            ]
        );
    }

    #[tokio::test]
    async fn test_length_never_exceeds_max_count() {
        let nodes: Vec<_> = (0..30).map(|i| image_node(&format!("P{:07}", i))).collect();
        for max in [0, 1, 5, 30, 50] {
            let src = source(page(nodes.clone(), None), vec![]);
            let urls = list_recent_post_urls(&src, "nasa", max).await.unwrap();
            assert!(urls.len() <= max);
            assert!(urls.iter().all(|u| u.starts_with("https://www.instagram.com/p/")));
        }
    }

    #[tokio::test]
    async fn test_profile_errors_propagate() {
        let src = FakeSource {
            profile: Err(ScrapeError::ProfileNotFound("ghost".to_string())),
            pages: HashMap::new(),
        };
        let err = list_recent_post_urls(&src, "ghost", 3).await.unwrap_err();
        assert_eq!(err, ScrapeError::ProfileNotFound("ghost".to_string()));
    }

    #[tokio::test]
    async fn test_page_and_item_failures_abort() {
        let mut pages = HashMap::new();
        pages.insert("c1".to_string(), Err(ScrapeError::NetworkTimeout));
        let src = FakeSource {
            profile: Ok(profile(page(vec![image_node("A0000001")], Some("c1")))),
            pages,
        };
        assert_eq!(
            list_recent_post_urls(&src, "nasa", 10).await,
            Err(ScrapeError::NetworkTimeout)
        );

        let src = source(page(vec![json!({"shortcode": "broken"})], None), vec![]);
        assert!(matches!(
            list_recent_post_urls(&src, "nasa", 10).await,
            Err(ScrapeError::Item(_))
        ));
    }

    #[tokio::test]
    async fn test_empty_username_is_rejected() {
        let src = source(PostPage::default(), vec![]);
        assert!(matches!(
            list_recent_post_urls(&src, "  ", 5).await,
            Err(ScrapeError::InvalidInput(_))
        ));
    }
}
