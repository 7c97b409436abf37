// Instagram access: web client, timeline paging, reels tab, single media

pub mod client;
pub mod media;
pub mod posts;
pub mod reels_page;
pub mod session;

pub use client::{parse_profile, InstagramWebClient, IG_APP_ID};
pub use media::{extract_shortcode, fetch_media, parse_media, MediaAuth};
pub use posts::{parse_media_connection, Post, PostItem, PostPage, PostStream, Profile};
pub use reels_page::{extract_reel_shortcodes, scrape_recent_reels, MAX_RECENT_REELS};
pub use session::{default_session_path, InstagramSession};

/// Public URL of a post: `/reel/<code>/` for reels, `/p/<code>/` for everything else
pub fn permalink(code: &str, is_reel: bool) -> String {
    let kind = if is_reel { "reel" } else { "p" };
    format!("https://www.instagram.com/{}/{}/", kind, code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_permalink_shapes() {
        assert_eq!(permalink("Abc", true), "https://www.instagram.com/reel/Abc/");
        assert_eq!(permalink("Abc", false), "https://www.instagram.com/p/Abc/");
    }
}
