use crate::media::MediaFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One concrete playable stream variant.
///
/// Direct downloads carry only `url`/`ext`/`format_id`; variants expanded
/// from an HLS or DASH manifest also carry whatever the manifest declared
/// (resolution, bandwidth, codecs).
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct FormatInfo {
    // Url of the stream
    pub url: String,
    // Container extension, e.g., "mp4"
    pub ext: String,
    pub format: MediaFormat,
    // Identifier within the format list, e.g., "hls-1080", "mp4-direct"
    pub format_id: String,
    pub format_note: Option<String>,
    // Ranking weight; lower sorts earlier (worse). 0 unless overridden.
    pub preference: i32,
    pub width: Option<u64>,
    pub height: Option<u64>,
    // Declared bandwidth in bits per second
    pub bandwidth: Option<u64>,
    pub codecs: Option<String>,
}

impl FormatInfo {
    pub fn new(url: impl Into<String>, ext: impl Into<String>, format: MediaFormat) -> Self {
        let ext = ext.into();
        Self {
            url: url.into(),
            format_id: format.as_str().to_string(),
            ext,
            format,
            format_note: None,
            preference: 0,
            width: None,
            height: None,
            bandwidth: None,
            codecs: None,
        }
    }
}

impl fmt::Display for FormatInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.width, self.height) {
            (Some(w), Some(h)) => write!(f, "{} - {}x{}", self.format_id, w, h),
            _ => write!(f, "{} - {}", self.format_id, self.ext),
        }
    }
}
