//! Media extraction for la7.it video pages.
//!
//! The entry point is [`extractor::factory::ExtractorFactory`] (or
//! [`extractor::default_factory`]): give it a page URL and it returns the
//! matching [`extractor::platform_extractor::PlatformExtractor`], whose
//! `extract()` resolves the page into a [`media::MediaInfo`] with ranked
//! playable formats.
//!
//! ```rust,no_run
//! # async fn doc() -> Result<(), Box<dyn std::error::Error>> {
//! use la7_parser::PlatformExtractor;
//! use la7_parser::extractor::default_factory;
//!
//! let factory = default_factory();
//! let extractor =
//!     factory.create_extractor("https://www.la7.it/crozza/video/some-episode", None, None)?;
//! let media_info = extractor.extract().await?;
//! println!("{}", media_info.to_json_pretty()?);
//! # Ok(())
//! # }
//! ```

pub mod extractor;
pub mod media;

pub use extractor::error::ExtractorError;
pub use extractor::factory::ExtractorFactory;
pub use extractor::platform_extractor::PlatformExtractor;
pub use media::{FormatInfo, MediaFormat, MediaInfo};
