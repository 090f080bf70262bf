//! Guide retrieval: HTTP download, gzip decompression and cache write.

mod fetcher;
mod http;
mod source;

pub use fetcher::fetch_guide;
pub use http::{HttpGuideSource, HttpGuideSourceBuilder};
pub use source::{GuideSource, LocalGuideSource};
