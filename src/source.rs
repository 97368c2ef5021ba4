//! Video reference parsing.
//!
//! Turns whatever the user pasted (a watch URL, a short link, an embed URL or a
//! bare id) into a canonical 11-character YouTube video id.

use crate::error::{Result, VidaskError};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static BARE_ID: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{11}$").expect("Invalid regex"));

// Tried in order; the first match wins.
static EMBEDDED_ID_PATTERNS: LazyLock<[Regex; 4]> = LazyLock::new(|| {
    [
        r"v=([A-Za-z0-9_-]{11})",
        r"youtu\.be/([A-Za-z0-9_-]{11})",
        r"shorts/([A-Za-z0-9_-]{11})",
        r"embed/([A-Za-z0-9_-]{11})",
    ]
    .map(|p| Regex::new(p).expect("Invalid regex"))
});

/// A validated YouTube video id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoReference(String);

impl VideoReference {
    /// The bare 11-character id.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Canonical watch URL for this video.
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }

    /// Watch URL that starts playback at the given offset.
    pub fn url_with_timestamp(&self, seconds: f64) -> String {
        format!("https://youtube.com/watch?v={}&t={}s", self.0, seconds as u32)
    }
}

impl std::fmt::Display for VideoReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for VideoReference {
    type Err = VidaskError;

    /// Strict parse: accepts only a bare id.
    fn from_str(s: &str) -> Result<Self> {
        if BARE_ID.is_match(s) {
            Ok(VideoReference(s.to_string()))
        } else {
            Err(VidaskError::UnrecognizedReference(s.to_string()))
        }
    }
}

/// Extract a video id from a URL or bare id.
pub fn extract_video_id(input: &str) -> Result<VideoReference> {
    let trimmed = input.trim();
    if BARE_ID.is_match(trimmed) {
        return Ok(VideoReference(trimmed.to_string()));
    }

    EMBEDDED_ID_PATTERNS
        .iter()
        .find_map(|re| re.captures(trimmed))
        .and_then(|caps| caps.get(1))
        .map(|m| VideoReference(m.as_str().to_string()))
        .ok_or_else(|| VidaskError::UnrecognizedReference(input.to_string()))
}
