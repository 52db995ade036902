use serde_json::Value;

use crate::extractor::error::ExtractorError;

/// The `src:` object from the player configuration. At most two entries,
/// each a single URL; unknown keys are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceSet {
    pub mp4: Option<String>,
    pub m3u8: Option<String>,
}

impl SourceSet {
    pub fn from_value(value: &Value) -> Result<Self, ExtractorError> {
        let object = value.as_object().ok_or_else(|| {
            ExtractorError::JsObjectError("sources fragment is not an object".to_string())
        })?;

        let url_entry = |key: &str| {
            object
                .get(key)
                .and_then(Value::as_str)
                .map(ToOwned::to_owned)
        };

        Ok(Self {
            mp4: url_entry("mp4"),
            m3u8: url_entry("m3u8"),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.mp4.is_none() && self.m3u8.is_none()
    }
}

// CDN-facing hosts rewritten to their origin-facing equivalents. These are
// literal substring substitutions; an absent substring is a no-op.
pub(crate) const MP4_REWRITES: &[(&str, &str)] = &[
    (
        "vodpmd.la7.it.edgesuite.net/",
        "vodpkg.iltrovatore.it/local/mp4/",
    ),
    ("http://", "https://"),
];

pub(crate) const STREAM_BASE_REWRITES: &[(&str, &str)] =
    &[("csmil", "urlset"), ("http://", "https://")];

pub(crate) const DASH_REWRITES: &[(&str, &str)] = &[
    (
        "la7-vh.akamaihd.net/i/",
        "awsvodpkg.iltrovatore.it/local/dash/",
    ),
    ("master.m3u8", "manifest.mpd"),
];

pub(crate) const HLS_REWRITES: &[(&str, &str)] = &[(
    "la7-vh.akamaihd.net/i/",
    "awsvodpkg.iltrovatore.it/local/hls/",
)];

pub(crate) fn apply_rewrites(url: &str, rules: &[(&str, &str)]) -> String {
    rules.iter().fold(url.to_string(), |url, (pattern, replacement)| {
        url.replace(pattern, replacement)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_source_set_from_value() {
        let value = json!({
            "mp4": "http://vodpmd.la7.it.edgesuite.net/foo.mp4",
            "m3u8": "http://la7-vh.akamaihd.net/i/bar/master.csmil/master.m3u8",
            "dash": 42,
        });
        let sources = SourceSet::from_value(&value).unwrap();

        assert_eq!(
            sources.mp4.as_deref(),
            Some("http://vodpmd.la7.it.edgesuite.net/foo.mp4")
        );
        assert_eq!(
            sources.m3u8.as_deref(),
            Some("http://la7-vh.akamaihd.net/i/bar/master.csmil/master.m3u8")
        );
    }

    #[test]
    fn test_source_set_missing_keys() {
        let sources = SourceSet::from_value(&json!({})).unwrap();
        assert!(sources.is_empty());

        // Non-string entries are treated as absent, not as errors.
        let sources = SourceSet::from_value(&json!({"mp4": {"nested": true}})).unwrap();
        assert!(sources.mp4.is_none());
    }

    #[test]
    fn test_source_set_rejects_non_object() {
        assert!(SourceSet::from_value(&json!("http://a/v.mp4")).is_err());
        assert!(SourceSet::from_value(&json!(["http://a/v.mp4"])).is_err());
    }

    #[test]
    fn test_mp4_rewrite() {
        assert_eq!(
            apply_rewrites("http://vodpmd.la7.it.edgesuite.net/foo.mp4", MP4_REWRITES),
            "https://vodpkg.iltrovatore.it/local/mp4/foo.mp4"
        );
    }

    #[test]
    fn test_rewrite_is_noop_without_expected_substring() {
        assert_eq!(
            apply_rewrites("https://cdn.example.com/foo.mp4", MP4_REWRITES),
            "https://cdn.example.com/foo.mp4"
        );
    }

    #[test]
    fn test_stream_base_and_dash_hls_rewrites() {
        let base = apply_rewrites(
            "http://la7-vh.akamaihd.net/i/bar/master.csmil/master.m3u8",
            STREAM_BASE_REWRITES,
        );
        assert_eq!(
            base,
            "https://la7-vh.akamaihd.net/i/bar/master.urlset/master.m3u8"
        );

        assert_eq!(
            apply_rewrites(&base, DASH_REWRITES),
            "https://awsvodpkg.iltrovatore.it/local/dash/bar/master.urlset/manifest.mpd"
        );
        assert_eq!(
            apply_rewrites(&base, HLS_REWRITES),
            "https://awsvodpkg.iltrovatore.it/local/hls/bar/master.urlset/master.m3u8"
        );
    }
}
