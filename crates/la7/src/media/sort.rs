use super::format_info::FormatInfo;

/// Ranks a format list in place, worst first, best last.
///
/// Ordering key: explicit preference weight, then vertical resolution, then
/// declared bandwidth. The sort is stable, so formats that tie keep the
/// order their manifests declared them in.
pub fn sort_formats(formats: &mut [FormatInfo]) {
    formats.sort_by_key(|f| {
        (
            f.preference,
            f.height.unwrap_or(0),
            f.bandwidth.unwrap_or(0),
        )
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::MediaFormat;

    fn format(id: &str, preference: i32, height: Option<u64>, bandwidth: Option<u64>) -> FormatInfo {
        let mut f = FormatInfo::new("https://example.com/v", "mp4", MediaFormat::Hls);
        f.format_id = id.to_string();
        f.preference = preference;
        f.height = height;
        f.bandwidth = bandwidth;
        f
    }

    #[test]
    fn test_negative_preference_sorts_first() {
        let mut formats = vec![
            format("hls-720", 0, Some(720), Some(2_000_000)),
            format("mp4-direct", -50, None, None),
            format("hls-1080", 0, Some(1080), Some(4_000_000)),
        ];
        sort_formats(&mut formats);

        assert_eq!(formats[0].format_id, "mp4-direct");
        assert_eq!(formats[2].format_id, "hls-1080");
    }

    #[test]
    fn test_bandwidth_breaks_resolution_ties() {
        let mut formats = vec![
            format("dash-2", 0, Some(720), Some(3_000_000)),
            format("dash-1", 0, Some(720), Some(1_500_000)),
        ];
        sort_formats(&mut formats);

        assert_eq!(formats[0].format_id, "dash-1");
        assert_eq!(formats[1].format_id, "dash-2");
    }

    #[test]
    fn test_stable_on_ties() {
        let mut formats = vec![
            format("a", 0, None, None),
            format("b", 0, None, None),
        ];
        sort_formats(&mut formats);

        assert_eq!(formats[0].format_id, "a");
        assert_eq!(formats[1].format_id, "b");
    }
}
