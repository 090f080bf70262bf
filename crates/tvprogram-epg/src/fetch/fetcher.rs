//! Download-to-cache step for a single channel.

use std::io::Read;
use std::path::Path;

use flate2::read::GzDecoder;
use tracing::instrument;

use super::source::LocalGuideSource;
use crate::error::FetchError;
use crate::store::{GuideStore, write_atomic};

/// Fetches one channel's guide into the store and returns the decompressed bytes.
///
/// The download is written to `{source_id}.xml.gz`, decompressed in memory,
/// and persisted as `{source_id}.xml`. The compressed artifact is removed
/// once read, whether or not decompression succeeded.
///
/// # Errors
///
/// Returns a `FetchError` if the download, decompression or a cache write
/// fails. A failed fetch leaves any previous `{source_id}.xml` in place.
#[instrument(skip_all, fields(source_id = %source_id))]
pub async fn fetch_guide(
    source: &(impl LocalGuideSource + Sync),
    store: &GuideStore,
    source_id: &str,
    url: &str,
) -> Result<Vec<u8>, FetchError> {
    let compressed = source.download(source_id, url).await?;

    let gz_path = store.compressed_path(source_id);
    let decoded = std::fs::write(&gz_path, &compressed)
        .map_err(|source| FetchError::Io {
            source_id: source_id.to_owned(),
            path: gz_path.clone(),
            source,
        })
        .and_then(|()| gunzip(&gz_path, source_id));
    remove_artifact(&gz_path);
    let decoded = decoded?;

    let xml_path = store.guide_path(source_id);
    write_atomic(&xml_path, &decoded).map_err(|source| FetchError::Io {
        source_id: source_id.to_owned(),
        path: xml_path.clone(),
        source,
    })?;

    tracing::debug!(
        compressed_len = compressed.len(),
        decompressed_len = decoded.len(),
        path = %xml_path.display(),
        "Guide cached"
    );
    Ok(decoded)
}

/// Removes the compressed download, including a partially written one.
fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to remove compressed guide");
        }
    }
}

/// Reads and fully decompresses a gzip file.
fn gunzip(path: &Path, source_id: &str) -> Result<Vec<u8>, FetchError> {
    let file = std::fs::File::open(path).map_err(|source| FetchError::Io {
        source_id: source_id.to_owned(),
        path: path.to_path_buf(),
        source,
    })?;

    let mut decoded = Vec::new();
    GzDecoder::new(file)
        .read_to_end(&mut decoded)
        .map_err(|source| FetchError::Decompress {
            source_id: source_id.to_owned(),
            source,
        })?;
    Ok(decoded)
}
