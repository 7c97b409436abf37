// Recent reels from the public reels tab HTML, no session needed

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::scraper::errors::ScrapeError;
use crate::scraper::http::BROWSER_USER_AGENT;
use crate::scraper::traits::PageFetcher;

pub const MAX_RECENT_REELS: usize = 12;

lazy_static! {
    static ref LD_JSON_RE: Regex =
        Regex::new(r#"(?s)<script type="application/ld\+json">(.*?)</script>"#).unwrap();
    static ref SHORTCODE_RE: Regex = Regex::new(r#""shortcode":"([A-Za-z0-9_-]{8,})""#).unwrap();
}

/// Shortcodes from the structured-data block, empty when absent or unparsable
fn shortcodes_from_ld_json(html: &str) -> Vec<String> {
    let Some(caps) = LD_JSON_RE.captures(html) else {
        return Vec::new();
    };
    let Ok(ld) = serde_json::from_str::<Value>(&caps[1]) else {
        return Vec::new();
    };
    ld.pointer("/mainEntity/itemListElement")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| item.get("url").and_then(Value::as_str))
                .filter_map(|url| url.split("/reel/").nth(1))
                .map(|rest| rest.trim_end_matches('/').to_string())
                .filter(|code| !code.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Reel shortcodes in page order, de-duplicated, at most `MAX_RECENT_REELS`
pub fn extract_reel_shortcodes(html: &str) -> Vec<String> {
    let mut codes = shortcodes_from_ld_json(html);
    if codes.is_empty() {
        codes = SHORTCODE_RE
            .captures_iter(html)
            .map(|c| c[1].to_string())
            .collect();
    }

    let mut unique: Vec<String> = Vec::new();
    for code in codes {
        if !unique.contains(&code) {
            unique.push(code);
        }
        if unique.len() == MAX_RECENT_REELS {
            break;
        }
    }
    unique
}

/// Fetch the reels tab of `username` and return reel URLs
pub async fn scrape_recent_reels(
    fetcher: &dyn PageFetcher,
    username: &str,
) -> Result<Vec<String>, ScrapeError> {
    if username.trim().is_empty() {
        return Err(ScrapeError::InvalidInput("username must not be empty".to_string()));
    }
    let url = format!("https://www.instagram.com/{}/reels/", username);
    let html = fetcher
        .get_text(&url, &[("User-Agent", BROWSER_USER_AGENT), ("Accept", "text/html")])
        .await?;

    let codes = extract_reel_shortcodes(&html);
    debug!(username, found = codes.len(), "scraped reels tab");
    Ok(codes
        .iter()
        .map(|code| super::permalink(code, true))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scraper::instagram::client::testing::FakeFetcher;

    #[test]
    fn test_ld_json_is_preferred() {
        let html = r#"<html><script type="application/ld+json">
            {"mainEntity": {"itemListElement": [
                {"url": "https://www.instagram.com/reel/AAAAAAAA1/"},
                {"url": "https://www.instagram.com/p/PHOTO0001/"},
                {"url": "https://www.instagram.com/reel/BBBBBBBB2/"}
            ]}}
        </script>"shortcode":"IGNOREDCODE"</html>"#;
        assert_eq!(extract_reel_shortcodes(html), vec!["AAAAAAAA1", "BBBBBBBB2"]);
    }

    #[test]
    fn test_falls_back_to_page_source() {
        let html = r#"{"shortcode":"Cx1234567"},{"shortcode":"short"},{"shortcode":"Cx1234567"},{"shortcode":"Dy7654321"}"#;
        assert_eq!(extract_reel_shortcodes(html), vec!["Cx1234567", "Dy7654321"]);
    }

    #[test]
    fn test_broken_ld_json_falls_back() {
        let html = r#"<script type="application/ld+json">{not json</script>"shortcode":"Ez1234567""#;
        assert_eq!(extract_reel_shortcodes(html), vec!["Ez1234567"]);
    }

    #[test]
    fn test_caps_at_twelve() {
        let html: String = (0..20)
            .map(|i| format!(r#""shortcode":"CODE{:06}""#, i))
            .collect();
        let codes = extract_reel_shortcodes(&html);
        assert_eq!(codes.len(), MAX_RECENT_REELS);
        assert_eq!(codes[0], "CODE000000");
    }

    #[tokio::test]
    async fn test_scrape_builds_reel_urls() {
        let fetcher = FakeFetcher::default().with(
            "https://www.instagram.com/nasa/reels/",
            Ok(r#""shortcode":"Cx1234567""#.to_string()),
        );
        let urls = scrape_recent_reels(&fetcher, "nasa").await.unwrap();
        assert_eq!(urls, vec!["https://www.instagram.com/reel/Cx1234567/"]);
    }
}
