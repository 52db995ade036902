use super::format_info::FormatInfo;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Represents the result of extracting a single video page.
///
/// Metadata fields are scraped independently from the page's Open Graph
/// tags; any of them may be absent without the extraction failing. An empty
/// `formats` list is a valid (unplayable) outcome.
///
/// # Examples
///
/// ```rust
/// use la7_parser::media::MediaInfo;
///
/// let media = MediaInfo::builder("inccool8-02-10-2015-163722", "https://www.la7.it")
///     .title("Inc.Cool8")
///     .thumbnail_url("https://www.la7.it/cover.jpg")
///     .formats(vec![])
///     .build();
/// ```
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MediaInfo {
    // Identifier captured from the page URL
    pub id: String,
    // Url of the page the media was extracted from
    pub site_url: String,
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail_url: Option<String>,
    // Available formats, ranked by `sort_formats` (best last)
    pub formats: Vec<FormatInfo>,
    pub extras: Option<FxHashMap<String, String>>,
}

#[derive(Debug, Clone)]
pub struct MediaInfoBuilder {
    id: String,
    site_url: String,
    title: Option<String>,
    description: Option<String>,
    thumbnail_url: Option<String>,
    formats: Vec<FormatInfo>,
    extras: Option<FxHashMap<String, String>>,
}

impl MediaInfo {
    pub fn builder(id: impl Into<String>, site_url: impl Into<String>) -> MediaInfoBuilder {
        MediaInfoBuilder::new(id, site_url)
    }

    /// Serialize the MediaInfo to a JSON string
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Serialize the MediaInfo to a pretty-formatted JSON string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize a MediaInfo from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Convert to a serde_json::Value for flexible manipulation
    pub fn to_value(&self) -> Result<serde_json::Value, serde_json::Error> {
        serde_json::to_value(self)
    }

    /// Create from a serde_json::Value
    pub fn from_value(value: serde_json::Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }

    /// Best-ranked format, if any. Formats are sorted worst to best.
    pub fn best_format(&self) -> Option<&FormatInfo> {
        self.formats.last()
    }
}

impl MediaInfoBuilder {
    pub fn new(id: impl Into<String>, site_url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            site_url: site_url.into(),
            title: None,
            description: None,
            thumbnail_url: None,
            formats: Vec::new(),
            extras: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn title_opt(mut self, title: Option<String>) -> Self {
        self.title = title;
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn description_opt(mut self, description: Option<String>) -> Self {
        self.description = description;
        self
    }

    pub fn thumbnail_url(mut self, thumbnail_url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(thumbnail_url.into());
        self
    }

    pub fn thumbnail_url_opt(mut self, thumbnail_url: Option<String>) -> Self {
        self.thumbnail_url = thumbnail_url;
        self
    }

    pub fn formats(mut self, formats: Vec<FormatInfo>) -> Self {
        self.formats = formats;
        self
    }

    pub fn extras(mut self, extras: FxHashMap<String, String>) -> Self {
        self.extras = Some(extras);
        self
    }

    pub fn extras_opt(mut self, extras: Option<FxHashMap<String, String>>) -> Self {
        self.extras = extras;
        self
    }

    pub fn build(self) -> MediaInfo {
        MediaInfo {
            id: self.id,
            site_url: self.site_url,
            title: self.title,
            description: self.description,
            thumbnail_url: self.thumbnail_url,
            formats: self.formats,
            extras: self.extras,
        }
    }
}
