use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid url: {0}")]
    InvalidUrl(String),
    #[error("http error: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("json error: {0}")]
    JsonError(#[from] serde_json::Error),
    #[error("unable to find {0} in page")]
    PatternNotFound(&'static str),
    #[error("js object error: {0}")]
    JsObjectError(String),
    #[error("hls playlist error: {0}")]
    HlsPlaylistError(String),
    #[error("dash manifest error: {0}")]
    DashManifestError(String),
    #[error("unsupported extractor")]
    UnsupportedExtractor,
    #[error("other: {0}")]
    Other(String),
}
