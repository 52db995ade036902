use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use reqwest::Client;

use super::error::ExtractorError;
use crate::media::{FormatInfo, MediaFormat};

#[async_trait]
pub trait DashExtractor {
    /// Fetches a DASH MPD manifest and expands it into one format per
    /// `Representation`.
    ///
    /// Formats keep the manifest URL; a downloader is expected to re-read
    /// the MPD to resolve segments.
    async fn extract_dash_formats(
        &self,
        client: &Client,
        headers: Option<reqwest::header::HeaderMap>,
        mpd_url: &str,
    ) -> Result<Vec<FormatInfo>, ExtractorError> {
        let response = client
            .get(mpd_url)
            .headers(headers.unwrap_or_default())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;

        parse_mpd_formats(&response, mpd_url)
    }
}

/// Parses the representations out of an MPD document.
///
/// Only the attributes a format descriptor needs are read (id, bandwidth,
/// resolution, codecs); segment timelines and everything else are left to
/// the downloader.
pub fn parse_mpd_formats(data: &[u8], mpd_url: &str) -> Result<Vec<FormatInfo>, ExtractorError> {
    let mut reader = Reader::from_reader(data);
    reader.config_mut().trim_text(true);

    let mut formats = Vec::new();
    let mut buf = Vec::new();
    // Representations inherit mimeType/codecs from their AdaptationSet.
    let mut set_mime_type: Option<String> = None;
    let mut set_codecs: Option<String> = None;
    let mut saw_mpd_root = false;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) | Ok(Event::Empty(ref e)) => {
                match local_name(e.name().as_ref()) {
                    b"MPD" => saw_mpd_root = true,
                    b"AdaptationSet" => {
                        set_mime_type = get_attribute(e, "mimeType");
                        set_codecs = get_attribute(e, "codecs");
                    }
                    b"Representation"
                        if is_media_mime_type(
                            get_attribute(e, "mimeType")
                                .or_else(|| set_mime_type.clone())
                                .as_deref(),
                        ) =>
                    {
                        let bandwidth =
                            get_attribute(e, "bandwidth").and_then(|v| v.parse::<u64>().ok());
                        let mut format = FormatInfo::new(mpd_url, "mp4", MediaFormat::Dash);
                        format.format_id = match get_attribute(e, "id") {
                            Some(id) => format!("dash-{id}"),
                            None => format!("dash-{}", bandwidth.unwrap_or(0) / 1000),
                        };
                        format.bandwidth = bandwidth;
                        format.width =
                            get_attribute(e, "width").and_then(|v| v.parse::<u64>().ok());
                        format.height =
                            get_attribute(e, "height").and_then(|v| v.parse::<u64>().ok());
                        format.codecs = get_attribute(e, "codecs").or_else(|| set_codecs.clone());
                        formats.push(format);
                    }
                    _ => {}
                }
            }
            Ok(Event::End(ref e)) => {
                if local_name(e.name().as_ref()) == b"AdaptationSet" {
                    set_mime_type = None;
                    set_codecs = None;
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ExtractorError::DashManifestError(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    if !saw_mpd_root {
        return Err(ExtractorError::DashManifestError(
            "document has no MPD root element".to_string(),
        ));
    }

    Ok(formats)
}

fn local_name(qualified: &[u8]) -> &[u8] {
    match qualified.iter().rposition(|&b| b == b':') {
        Some(pos) => &qualified[pos + 1..],
        None => qualified,
    }
}

fn get_attribute(element: &BytesStart, name: &str) -> Option<String> {
    element.attributes().flatten().find_map(|attr| {
        if attr.key.as_ref() == name.as_bytes() {
            attr.unescape_value().ok().map(|v| v.into_owned())
        } else {
            None
        }
    })
}

fn is_media_mime_type(mime_type: Option<&str>) -> bool {
    match mime_type {
        Some(m) => m.starts_with("video/") || m.starts_with("audio/"),
        // No mimeType anywhere; assume media rather than dropping the entry.
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MPD: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<MPD xmlns="urn:mpeg:dash:schema:mpd:2011" type="static" mediaPresentationDuration="PT634S">
  <Period>
    <AdaptationSet mimeType="video/mp4" codecs="avc1.4d401f">
      <Representation id="video-1" bandwidth="1200000" width="1280" height="720"/>
      <Representation id="video-2" bandwidth="3500000" width="1920" height="1080" codecs="avc1.640028"/>
    </AdaptationSet>
    <AdaptationSet mimeType="audio/mp4">
      <Representation id="audio-1" bandwidth="128000" codecs="mp4a.40.2"/>
    </AdaptationSet>
    <AdaptationSet mimeType="text/vtt">
      <Representation id="sub-1" bandwidth="1000"/>
    </AdaptationSet>
  </Period>
</MPD>"#;

    #[test]
    fn test_parse_mpd_formats() {
        let url = "https://awsvodpkg.iltrovatore.it/local/dash/bar/master.urlset/manifest.mpd";
        let formats = parse_mpd_formats(MPD.as_bytes(), url).unwrap();

        assert_eq!(formats.len(), 3);
        assert_eq!(formats[0].format_id, "dash-video-1");
        assert_eq!(formats[0].height, Some(720));
        assert_eq!(formats[0].codecs.as_deref(), Some("avc1.4d401f"));
        assert_eq!(formats[1].codecs.as_deref(), Some("avc1.640028"));
        assert_eq!(formats[2].format_id, "dash-audio-1");
        assert!(formats.iter().all(|f| f.url == url));
        assert!(formats.iter().all(|f| f.format == MediaFormat::Dash));
    }

    #[test]
    fn test_parse_mpd_rejects_non_mpd() {
        let err = parse_mpd_formats(b"<html><body>not found</body></html>", "https://x/m.mpd");
        assert!(matches!(err, Err(ExtractorError::DashManifestError(_))));
    }

    #[test]
    fn test_parse_mpd_no_representations() {
        let formats =
            parse_mpd_formats(b"<MPD><Period></Period></MPD>", "https://x/m.mpd").unwrap();
        assert!(formats.is_empty());
    }
}
