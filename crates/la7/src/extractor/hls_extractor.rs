use async_trait::async_trait;
use m3u8_rs::{MasterPlaylist, Playlist};
use reqwest::Client;
use url::Url;

use super::error::ExtractorError;
use crate::media::{FormatInfo, MediaFormat};

#[async_trait]
pub trait HlsExtractor {
    /// Fetches an HLS playlist and expands it into one format per variant.
    ///
    /// A media playlist (no variants) yields a single format pointing at the
    /// playlist itself.
    async fn extract_hls_formats(
        &self,
        client: &Client,
        headers: Option<reqwest::header::HeaderMap>,
        m3u8_url: &str,
    ) -> Result<Vec<FormatInfo>, ExtractorError> {
        let base_url =
            Url::parse(m3u8_url).map_err(|e| ExtractorError::HlsPlaylistError(e.to_string()))?;

        let response = client
            .get(m3u8_url)
            .headers(headers.unwrap_or_default())
            .send()
            .await?
            .error_for_status()?
            .bytes()
            .await?;
        let playlist = m3u8_rs::parse_playlist_res(&response)
            .map_err(|e| ExtractorError::HlsPlaylistError(e.to_string()))?;

        let formats = match playlist {
            Playlist::MasterPlaylist(pl) => process_master_playlist(pl, &base_url)?,
            Playlist::MediaPlaylist(_) => {
                vec![FormatInfo::new(m3u8_url, "mp4", MediaFormat::Hls)]
            }
        };

        Ok(formats)
    }
}

fn process_master_playlist(
    playlist: MasterPlaylist,
    base_url: &Url,
) -> Result<Vec<FormatInfo>, ExtractorError> {
    playlist
        .variants
        .into_iter()
        .map(|variant| {
            let stream_url = base_url
                .join(&variant.uri)
                .map_err(|e| ExtractorError::HlsPlaylistError(e.to_string()))?;

            let mut format = FormatInfo::new(stream_url, "mp4", MediaFormat::Hls);
            format.format_id = match variant.resolution {
                Some(r) => format!("hls-{}", r.height),
                None => format!("hls-{}", variant.bandwidth / 1000),
            };
            format.width = variant.resolution.map(|r| r.width);
            format.height = variant.resolution.map(|r| r.height);
            format.bandwidth = Some(variant.bandwidth);
            format.codecs = variant.codecs;
            Ok(format)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MASTER_PLAYLIST: &str = "\
#EXTM3U
#EXT-X-STREAM-INF:BANDWIDTH=1200000,RESOLUTION=1280x720,CODECS=\"avc1.4d401f,mp4a.40.2\"
720p/index.m3u8
#EXT-X-STREAM-INF:BANDWIDTH=3500000,RESOLUTION=1920x1080
1080p/index.m3u8
";

    #[test]
    fn test_process_master_playlist() {
        let playlist = match m3u8_rs::parse_playlist_res(MASTER_PLAYLIST.as_bytes()).unwrap() {
            Playlist::MasterPlaylist(pl) => pl,
            _ => panic!("expected master playlist"),
        };
        let base = Url::parse("https://awsvodpkg.iltrovatore.it/local/hls/bar/master.m3u8").unwrap();

        let formats = process_master_playlist(playlist, &base).unwrap();

        assert_eq!(formats.len(), 2);
        assert_eq!(formats[0].format_id, "hls-720");
        assert_eq!(
            formats[0].url,
            "https://awsvodpkg.iltrovatore.it/local/hls/bar/720p/index.m3u8"
        );
        assert_eq!(formats[0].bandwidth, Some(1_200_000));
        assert_eq!(formats[0].codecs.as_deref(), Some("avc1.4d401f,mp4a.40.2"));
        assert_eq!(formats[1].height, Some(1080));
        assert!(formats.iter().all(|f| f.format == MediaFormat::Hls));
    }
}
