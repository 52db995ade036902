use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use tracing::{debug, warn};

use super::models::{
    DASH_REWRITES, HLS_REWRITES, MP4_REWRITES, STREAM_BASE_REWRITES, SourceSet, apply_rewrites,
};
use crate::extractor::dash_extractor::DashExtractor;
use crate::extractor::error::ExtractorError;
use crate::extractor::hls_extractor::HlsExtractor;
use crate::extractor::js_object::{find_object_value, parse_js_object};
use crate::extractor::platform_extractor::{Extractor, PlatformExtractor};
use crate::extractor::utils::{
    capture_group_1_or_invalid_url, og_search_description, og_search_thumbnail, og_search_title,
};
use crate::media::{FormatInfo, MediaFormat, MediaInfo, sort_formats};

pub static URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:https?://)?(?:(?:www\.)?la7\.it/[^/]+/(?:rivedila7|video)/|tg\.la7\.it/repliche-tgla7\?id=)(.+)",
    )
    .unwrap()
});

// Two historical page-template variants. Tried in order, first match wins.
static PLAYER_DATA_PATTERNS: LazyLock<[(&str, Regex); 2]> = LazyLock::new(|| {
    [
        (
            "videoParams",
            Regex::new(r"(?s)videoParams\s*=\s*(\{.+?\});").unwrap(),
        ),
        ("videoLa7", Regex::new(r"videoLa7\((\{[^;]+\})\);").unwrap()),
    ]
});

pub struct La7 {
    extractor: Extractor,
}

impl La7 {
    pub fn new(
        platform_url: String,
        client: Client,
        cookies: Option<String>,
        _extras: Option<serde_json::Value>,
    ) -> Self {
        let mut extractor = Extractor::new("La7", platform_url, client);
        extractor.set_referer_static("https://www.la7.it/");
        if let Some(cookies) = cookies {
            extractor.set_cookies_from_string(&cookies);
        }
        Self { extractor }
    }

    /// Identifier is everything after the site prefix; its content (numeric
    /// id vs slug) is not validated further.
    pub fn video_id(&self) -> Result<&str, ExtractorError> {
        capture_group_1_or_invalid_url(&URL_REGEX, &self.extractor.url)
    }

    pub(crate) fn find_player_data(webpage: &str) -> Result<&str, ExtractorError> {
        for (name, regex) in PLAYER_DATA_PATTERNS.iter() {
            if let Some(captures) = regex.captures(webpage)
                && let Some(player_data) = captures.get(1)
            {
                debug!(pattern = name, "Found player data block");
                return Ok(player_data.as_str());
            }
        }
        Err(ExtractorError::PatternNotFound("player data"))
    }

    pub(crate) fn parse_sources(player_data: &str) -> Result<SourceSet, ExtractorError> {
        let fragment = find_object_value(player_data, "src")
            .ok_or(ExtractorError::PatternNotFound("sources"))?;
        let value = parse_js_object(fragment)?;
        SourceSet::from_value(&value)
    }

    fn direct_mp4_format(source_url: &str) -> FormatInfo {
        let url = apply_rewrites(source_url, MP4_REWRITES);
        let mut format = FormatInfo::new(url, "mp4", MediaFormat::Mp4);
        format.format_id = "mp4-direct".to_string();
        format.format_note = Some("mp4 direct download (usually lower quality)".to_string());
        format.preference = -50;
        format
    }

    async fn assemble_formats(&self, sources: &SourceSet) -> Vec<FormatInfo> {
        let mut formats = Vec::new();

        if let Some(mp4_url) = &sources.mp4 {
            formats.push(Self::direct_mp4_format(mp4_url));
        }

        if let Some(m3u8_url) = &sources.m3u8 {
            let base_url = apply_rewrites(m3u8_url, STREAM_BASE_REWRITES);
            let headers = self.extractor.get_platform_headers().clone();

            // Manifest failures degrade to partial results instead of
            // aborting the extraction.
            let dash_url = apply_rewrites(&base_url, DASH_REWRITES);
            match self
                .extract_dash_formats(&self.extractor.client, Some(headers.clone()), &dash_url)
                .await
            {
                Ok(dash_formats) => formats.extend(dash_formats),
                Err(e) => warn!(url = %dash_url, error = %e, "Skipping DASH formats"),
            }

            let hls_url = apply_rewrites(&base_url, HLS_REWRITES);
            match self
                .extract_hls_formats(&self.extractor.client, Some(headers), &hls_url)
                .await
            {
                Ok(hls_formats) => formats.extend(hls_formats),
                Err(e) => warn!(url = %hls_url, error = %e, "Skipping HLS formats"),
            }
        }

        sort_formats(&mut formats);
        formats
    }
}

impl HlsExtractor for La7 {}
impl DashExtractor for La7 {}

#[async_trait]
impl PlatformExtractor for La7 {
    fn get_extractor(&self) -> &Extractor {
        &self.extractor
    }

    async fn extract(&self) -> Result<MediaInfo, ExtractorError> {
        let video_id = self.video_id()?.to_string();
        let webpage = self.extractor.get_text(&self.extractor.url).await?;

        let player_data = Self::find_player_data(&webpage)?;
        let sources = Self::parse_sources(player_data)?;
        debug!(video_id = %video_id, ?sources, "Parsed source set");

        let formats = self.assemble_formats(&sources).await;

        Ok(MediaInfo::builder(video_id, self.extractor.url.clone())
            .title_opt(og_search_title(&webpage))
            .description_opt(og_search_description(&webpage))
            .thumbnail_url_opt(og_search_thumbnail(&webpage))
            .formats(formats)
            .build())
    }
}
