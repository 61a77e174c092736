use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

lazy_static! {
    static ref VIDEO_ID: Regex = Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("valid video id pattern");
}

const EMBED_PREFIX: &str = "/embed/";

pub fn is_video_id(candidate: &str) -> bool {
    VIDEO_ID.is_match(candidate)
}

/// Extract a YouTube video ID from a raw ID or a watch, short or embed URL.
///
/// Returns `None` for anything else. Never touches the network.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if is_video_id(input) {
        return Some(input.to_string());
    }

    let url = Url::parse(input).ok().filter(Url::has_host)?;

    // Standard watch URL: youtube.com/watch?v=ID
    if let Some(v) = url.query_pairs().filter(|(k, _)| k == "v").map(|(_, v)| v).last() {
        if is_video_id(&v) {
            return Some(v.into_owned());
        }
    }

    let path = url.path();

    // Short URL: youtu.be/ID
    if url.host_str() == Some("youtu.be") {
        let candidate = path.trim_start_matches('/');
        if is_video_id(candidate) {
            return Some(candidate.to_string());
        }
    }

    // Embed URL: youtube.com/embed/ID
    if let Some(candidate) = path.strip_prefix(EMBED_PREFIX) {
        if is_video_id(candidate) {
            return Some(candidate.to_string());
        }
    }

    None
}

/// Lenient variant for stored values: the extracted ID when there is one,
/// otherwise the trimmed input as-is
pub fn playable_video_id(value: &str) -> String {
    extract_video_id(value).unwrap_or_else(|| value.trim().to_string())
}

pub fn embed_url(video_id: &str) -> String {
    format!("https://www.youtube.com/embed/{}", urlencoding::encode(video_id))
}
