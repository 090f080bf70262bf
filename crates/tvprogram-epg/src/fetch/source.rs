//! `GuideSource` trait definition.
#![allow(clippy::future_not_send)]

use crate::error::FetchError;

/// Remote guide source.
///
/// Abstracts the download step so the acquisition pipeline can run
/// against a fake source in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(GuideSource: Send)]
pub trait LocalGuideSource {
    /// Downloads the raw (still compressed) guide for one channel.
    ///
    /// # Errors
    ///
    /// Returns a `FetchError` on an invalid URL, transport failure or
    /// non-success HTTP status.
    async fn download(&self, source_id: &str, url: &str) -> Result<Vec<u8>, FetchError>;
}
