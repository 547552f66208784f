use serde::{Deserialize, Serialize};

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_ARTIST: &str = "Unknown Artist";
pub const UNKNOWN_ALBUM: &str = "Unknown Album";

/// Display metadata scraped from a result page.
///
/// Each field falls back to its `Unknown ...` sentinel independently when
/// nothing could be extracted for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackInfo {
    pub title: String,
    pub artist: String,
    pub album: String,
    pub url: String,
}

impl TrackInfo {
    pub fn new(
        title: Option<String>,
        artist: Option<String>,
        album: Option<String>,
        url: impl Into<String>,
    ) -> Self {
        Self {
            title: or_sentinel(title, UNKNOWN_TITLE),
            artist: or_sentinel(artist, UNKNOWN_ARTIST),
            album: or_sentinel(album, UNKNOWN_ALBUM),
            url: url.into(),
        }
    }
}

fn or_sentinel(value: Option<String>, sentinel: &str) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| sentinel.to_string())
}
