// Single post/reel metadata through the Instagram GraphQL endpoint

use serde_json::Value;
use tracing::debug;

use crate::scraper::errors::ScrapeError;
use crate::scraper::models::InstagramMedia;
use crate::scraper::traits::PageFetcher;

const GRAPHQL_ENDPOINT: &str = "https://www.instagram.com/api/graphql";
const MEDIA_DOC_ID: &str = "10015901848480474";

/// Facebook LSD token (anti-CSRF, public static value used by web scrapers)
const FB_LSD_TOKEN: &str = "AVqbxe3J_YA";
const FB_ASBD_ID: &str = "129477";

/// Request identity, both values come from the environment
#[derive(Debug, Clone)]
pub struct MediaAuth {
    pub user_agent: String,
    pub app_id: String,
}

/// Shortcode from `/p/`, `/reel/`, `/reels/` or `/stories/` URLs,
/// optionally prefixed with a username segment
pub fn extract_shortcode(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    if host != "instagram.com" && !host.ends_with(".instagram.com") {
        return None;
    }
    let segments: Vec<&str> = parsed.path_segments()?.filter(|s| !s.is_empty()).collect();
    const CONTENT_TYPES: &[&str] = &["p", "reel", "reels", "stories"];

    let code = match segments.as_slice() {
        [kind, code, ..] if CONTENT_TYPES.contains(kind) => *code,
        [_, kind, code, ..] if CONTENT_TYPES.contains(kind) => *code,
        _ => return None,
    };
    let valid = code
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    (valid && !code.is_empty()).then(|| code.to_string())
}

/// Project `data.xdt_shortcode_media` into `InstagramMedia`
pub fn parse_media(json: &Value) -> Result<InstagramMedia, ScrapeError> {
    let items = json
        .pointer("/data/xdt_shortcode_media")
        .filter(|v| v.is_object())
        .ok_or_else(|| ScrapeError::ParseError("no media data found in response".to_string()))?;

    let str_field = |key: &str| items.get(key).and_then(Value::as_str).map(str::to_string);
    let value_field = |key: &str| items.get(key).filter(|v| !v.is_null()).cloned();

    Ok(InstagramMedia {
        typename: str_field("__typename"),
        shortcode: str_field("shortcode"),
        dimensions: value_field("dimensions"),
        display_url: str_field("display_url"),
        display_resources: value_field("display_resources"),
        has_audio: items.get("has_audio").and_then(Value::as_bool),
        video_url: str_field("video_url"),
        video_view_count: items.get("video_view_count").and_then(Value::as_u64),
        video_play_count: items.get("video_play_count").and_then(Value::as_u64),
        is_video: items.get("is_video").and_then(Value::as_bool),
        caption: items
            .pointer("/edge_media_to_caption/edges/0/node/text")
            .and_then(Value::as_str)
            .map(str::to_string),
        is_paid_partnership: items.get("is_paid_partnership").and_then(Value::as_bool),
        location: value_field("location"),
        owner: value_field("owner"),
        product_type: str_field("product_type"),
        video_duration: items.get("video_duration").and_then(Value::as_f64),
        thumbnail_src: str_field("thumbnail_src"),
        clips_music_attribution_info: value_field("clips_music_attribution_info"),
        sidecar: items.pointer("/edge_sidecar_to_children/edges").cloned(),
    })
}

/// Fetch metadata for one post or reel URL
pub async fn fetch_media(
    fetcher: &dyn PageFetcher,
    url: &str,
    auth: &MediaAuth,
) -> Result<InstagramMedia, ScrapeError> {
    let shortcode = extract_shortcode(url)
        .ok_or_else(|| ScrapeError::InvalidInput(format!("not an Instagram reel/post URL: {}", url)))?;

    let variables = serde_json::json!({ "shortcode": shortcode }).to_string();
    let body = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("variables", &variables)
        .append_pair("doc_id", MEDIA_DOC_ID)
        .append_pair("lsd", FB_LSD_TOKEN)
        .finish();

    debug!(shortcode = %shortcode, "querying Instagram GraphQL");
    let text = fetcher
        .post_form(
            GRAPHQL_ENDPOINT,
            &[
                ("User-Agent", auth.user_agent.as_str()),
                ("X-IG-App-ID", auth.app_id.as_str()),
                ("X-FB-LSD", FB_LSD_TOKEN),
                ("X-ASBD-ID", FB_ASBD_ID),
                ("Sec-Fetch-Site", "same-origin"),
            ],
            &body,
        )
        .await?;

    let json: Value = serde_json::from_str(&text)?;
    parse_media(&json)
}
