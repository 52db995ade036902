use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaFormat {
    Mp4,
    Hls,
    Dash,
}

impl MediaFormat {
    pub fn as_str(&self) -> &str {
        match self {
            MediaFormat::Mp4 => "mp4",
            MediaFormat::Hls => "hls",
            MediaFormat::Dash => "dash",
        }
    }

    pub fn from_str(format: &str) -> Option<Self> {
        match format.to_lowercase().as_str() {
            "mp4" => Some(MediaFormat::Mp4),
            "hls" => Some(MediaFormat::Hls),
            "dash" => Some(MediaFormat::Dash),
            _ => None,
        }
    }
}
