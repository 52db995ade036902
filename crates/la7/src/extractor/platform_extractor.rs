use crate::extractor::default::DEFAULT_UA;

use super::{super::media::media_info::MediaInfo, error::ExtractorError};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, RequestBuilder};
use rustc_hash::FxHashMap;
use std::str::FromStr;
use tracing::debug;

/// Base extractor shared by every site extractor.
///
/// Holds the target URL, the HTTP client, and per-extractor request state:
/// default browser-like headers, query parameters, and a cookie store. The
/// cookie store lets a caller import a session (e.g. from a browser) without
/// the extractor itself having to know about it.
#[derive(Debug, Clone)]
pub struct Extractor {
    // url to extract from, e.g., "https://www.la7.it/crozza/video/123"
    pub url: String,
    // name of the site, e.g., "La7"
    pub platform_name: String,
    // The reqwest client
    pub client: Client,
    // platform-specific headers and parameters
    platform_headers: HeaderMap,
    pub platform_params: FxHashMap<String, String>,
    pub cookies: FxHashMap<String, String>,
}

impl Extractor {
    pub fn new<S1: Into<String>, S2: Into<String>>(
        platform_name: S1,
        platform_url: S2,
        client: Client,
    ) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            reqwest::header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_UA),
        );
        default_headers.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            reqwest::header::ACCEPT_LANGUAGE,
            HeaderValue::from_static("it-IT,it;q=0.8,en-US;q=0.5,en;q=0.3"),
        );
        // Do not set `Accept-Encoding` here.
        // Reqwest auto-adds it (and auto-decompresses) when the corresponding
        // crate features are enabled, as long as we don't override the header.

        Self {
            platform_name: platform_name.into(),
            url: platform_url.into(),
            client,
            platform_headers: default_headers,
            platform_params: FxHashMap::default(),
            cookies: FxHashMap::default(),
        }
    }

    #[inline]
    pub fn set_referer_static(&mut self, referer: &'static str) {
        self.platform_headers
            .insert(reqwest::header::REFERER, HeaderValue::from_static(referer));
    }

    pub fn add_header<K: AsRef<str>, V: AsRef<str>>(&mut self, key: K, value: V) {
        match HeaderName::from_str(key.as_ref()) {
            Ok(name) => match HeaderValue::from_str(value.as_ref()) {
                Ok(value) => {
                    self.platform_headers.insert(name, value);
                }
                Err(e) => {
                    debug!(error = %e, "Invalid header value; skipping");
                }
            },
            Err(e) => {
                debug!(error = %e, "Invalid header name; skipping");
            }
        }
    }

    pub fn add_param<K: Into<String>, V: Into<String>>(&mut self, key: K, value: V) {
        self.platform_params.insert(key.into(), value.into());
    }

    pub fn get_param(&self, key: &str) -> Option<&String> {
        self.platform_params.get(key)
    }

    pub fn add_cookie<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.cookies.insert(name.into(), value.into());
    }

    /// Set cookies from a cookie string (format: "name1=value1; name2=value2").
    /// This is useful for importing cookies from browsers or external sources.
    pub fn set_cookies_from_string(&mut self, cookie_string: &str) {
        // Accept common separators: ';' from Cookie headers and '\n' from copy/paste.
        for part in cookie_string.split(&[';', '\n'][..]).map(str::trim) {
            if part.is_empty() {
                continue;
            }

            let Some((name, value)) = part.split_once('=') else {
                continue;
            };
            let name = name.trim();
            let value = value.trim();
            if name.is_empty() || value.is_empty() {
                continue;
            }

            self.cookies.insert(name.to_owned(), value.to_owned());
        }
    }

    pub fn get_cookie(&self, name: &str) -> Option<&String> {
        self.cookies.get(name)
    }

    /// Convert stored cookies to a Cookie header value string.
    fn build_cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }

        let mut cookie_string = String::with_capacity(
            self.cookies
                .iter()
                .map(|(k, v)| k.len() + 1 + v.len() + 2)
                .sum(),
        );

        for (name, value) in &self.cookies {
            if !cookie_string.is_empty() {
                cookie_string.push_str("; ");
            }
            cookie_string.push_str(name);
            cookie_string.push('=');
            cookie_string.push_str(value);
        }

        Some(cookie_string)
    }

    pub fn get(&self, url: &str) -> RequestBuilder {
        self.request(Method::GET, url)
    }

    /// Create an HTTP request with platform headers and stored cookies
    /// pre-configured.
    pub fn request(&self, method: Method, url: &str) -> RequestBuilder {
        let mut headers = self.platform_headers.clone();

        if let Some(cookie_header) = self.build_cookie_header() {
            match HeaderValue::from_str(&cookie_header) {
                Ok(value) => {
                    headers.insert(reqwest::header::COOKIE, value);
                }
                Err(e) => {
                    // If cookies are malformed, skip the Cookie header instead of
                    // sending an empty/invalid value.
                    debug!(error = %e, "Failed to build Cookie header");
                }
            }
        }

        self.client
            .request(method, url)
            .headers(headers)
            .query(&self.platform_params)
    }

    /// Fetch a URL as text, treating any HTTP error status as a failure.
    pub async fn get_text(&self, url: &str) -> Result<String, ExtractorError> {
        let response = self.get(url).send().await?;
        let response = response.error_for_status()?;
        Ok(response.text().await?)
    }

    pub fn get_platform_headers(&self) -> &HeaderMap {
        &self.platform_headers
    }
}

#[async_trait]
pub trait PlatformExtractor: Send + Sync {
    fn get_extractor(&self) -> &Extractor;

    fn get_platform_headers(&self) -> &HeaderMap {
        &self.get_extractor().platform_headers
    }

    fn get_platform_params(&self) -> &FxHashMap<String, String> {
        &self.get_extractor().platform_params
    }

    async fn extract(&self) -> Result<MediaInfo, ExtractorError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn install_test_crypto_provider() {
        let _ = rustls::crypto::aws_lc_rs::default_provider().install_default();
    }

    #[test]
    fn test_set_cookies_from_string() {
        install_test_crypto_provider();
        let mut extractor = Extractor::new("La7", "https://www.la7.it", Client::new());
        extractor.set_cookies_from_string("sessionid=abc123; theme=dark; broken");

        assert_eq!(extractor.get_cookie("sessionid"), Some(&"abc123".to_string()));
        assert_eq!(extractor.get_cookie("theme"), Some(&"dark".to_string()));
        assert_eq!(extractor.get_cookie("broken"), None);
    }

    #[test]
    fn test_default_headers_present() {
        install_test_crypto_provider();
        let extractor = Extractor::new("La7", "https://www.la7.it", Client::new());
        let headers = extractor.get_platform_headers();

        assert!(headers.contains_key(reqwest::header::USER_AGENT));
        assert!(headers.contains_key(reqwest::header::ACCEPT));
    }
}
