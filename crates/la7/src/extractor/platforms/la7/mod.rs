mod builder;
mod models;

pub use builder::{La7, URL_REGEX};
pub use models::SourceSet;
