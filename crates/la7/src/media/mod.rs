pub mod format_info;
pub mod media_format;
pub mod media_info;
pub mod sort;

pub use format_info::FormatInfo;
pub use media_format::MediaFormat;
pub use media_info::MediaInfo;
pub use sort::sort_formats;
