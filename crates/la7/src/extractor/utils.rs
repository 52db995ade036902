use std::sync::LazyLock;

use regex::Regex;

use crate::extractor::error::ExtractorError;

#[inline]
pub fn capture_group_1<'a>(re: &Regex, input: &'a str) -> Option<&'a str> {
    re.captures(input)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

#[inline]
pub fn capture_group_1_owned(re: &Regex, input: &str) -> Option<String> {
    capture_group_1(re, input).map(ToOwned::to_owned)
}

#[inline]
pub fn capture_group_1_or_invalid_url<'a>(
    re: &Regex,
    input: &'a str,
) -> Result<&'a str, ExtractorError> {
    capture_group_1(re, input).ok_or_else(|| ExtractorError::InvalidUrl(input.to_string()))
}

// Open Graph meta tags appear with either attribute order and either quote
// style depending on the page template, so each property gets four patterns.
// Quote styles are separate patterns because the content may itself contain
// the other quote character (Italian titles are full of apostrophes).
macro_rules! og_regexes {
    ($property:literal) => {
        LazyLock::new(|| {
            [
                Regex::new(concat!(
                    r#"<meta[^>]+property=["']og:"#,
                    $property,
                    r#"["'][^>]+content="([^"]+)""#
                ))
                .unwrap(),
                Regex::new(concat!(
                    r#"<meta[^>]+property=["']og:"#,
                    $property,
                    r#"["'][^>]+content='([^']+)'"#
                ))
                .unwrap(),
                Regex::new(concat!(
                    r#"<meta[^>]+content="([^"]+)"[^>]+property=["']og:"#,
                    $property,
                    r#"["']"#
                ))
                .unwrap(),
                Regex::new(concat!(
                    r#"<meta[^>]+content='([^']+)'[^>]+property=["']og:"#,
                    $property,
                    r#"["']"#
                ))
                .unwrap(),
            ]
        })
    };
}

static OG_TITLE_REGEXES: LazyLock<[Regex; 4]> = og_regexes!("title");
static OG_DESCRIPTION_REGEXES: LazyLock<[Regex; 4]> = og_regexes!("description");
static OG_IMAGE_REGEXES: LazyLock<[Regex; 4]> = og_regexes!("image");

fn og_search(regexes: &[Regex; 4], webpage: &str) -> Option<String> {
    regexes
        .iter()
        .find_map(|re| capture_group_1_owned(re, webpage))
        .map(|s| html_unescape(s.trim()))
}

/// Scrapes the `og:title` meta tag. Missing tag yields `None`, never an error.
pub fn og_search_title(webpage: &str) -> Option<String> {
    og_search(&OG_TITLE_REGEXES, webpage)
}

pub fn og_search_description(webpage: &str) -> Option<String> {
    og_search(&OG_DESCRIPTION_REGEXES, webpage)
}

pub fn og_search_thumbnail(webpage: &str) -> Option<String> {
    og_search(&OG_IMAGE_REGEXES, webpage)
}

/// Decodes the handful of named entities that show up in meta tag content.
fn html_unescape(input: &str) -> String {
    if !input.contains('&') {
        return input.to_string();
    }
    // `&amp;` goes last so `&amp;lt;` decodes to `&lt;`, not `<`.
    input
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&#039;", "'")
        .replace("&amp;", "&")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_og_search_title_property_first() {
        let webpage = r#"<html><head>
            <meta property="og:title" content="Inc.Cool8" />
        </head></html>"#;
        assert_eq!(og_search_title(webpage), Some("Inc.Cool8".to_string()));
    }

    #[test]
    fn test_og_search_title_content_first() {
        let webpage = r#"<meta content="Inc.Cool8" property="og:title" />"#;
        assert_eq!(og_search_title(webpage), Some("Inc.Cool8".to_string()));
    }

    #[test]
    fn test_og_search_description_with_apostrophes() {
        let webpage = r#"<meta property="og:description" content="Benvenuti nell'incredibile mondo della INC. COOL. 8." />"#;
        assert_eq!(
            og_search_description(webpage),
            Some("Benvenuti nell'incredibile mondo della INC. COOL. 8.".to_string())
        );
    }

    #[test]
    fn test_og_search_does_not_double_decode_entities() {
        let webpage = r#"<meta property="og:description" content="1 &amp;lt; 2 &amp; 3" />"#;
        assert_eq!(
            og_search_description(webpage),
            Some("1 &lt; 2 & 3".to_string())
        );
    }

    #[test]
    fn test_og_search_missing_tag() {
        let webpage = "<html><head><title>plain</title></head></html>";
        assert_eq!(og_search_title(webpage), None);
        assert_eq!(og_search_description(webpage), None);
        assert_eq!(og_search_thumbnail(webpage), None);
    }

    #[test]
    fn test_og_search_thumbnail() {
        let webpage =
            r#"<meta property="og:image" content="https://www.la7.it/cover.jpg?x=1&amp;y=2"/>"#;
        assert_eq!(
            og_search_thumbnail(webpage),
            Some("https://www.la7.it/cover.jpg?x=1&y=2".to_string())
        );
    }

    #[test]
    fn test_capture_group_1() {
        let re = Regex::new(r"id=(\d+)").unwrap();
        assert_eq!(capture_group_1(&re, "page?id=189080"), Some("189080"));
        assert_eq!(capture_group_1(&re, "page?name=x"), None);
    }
}
