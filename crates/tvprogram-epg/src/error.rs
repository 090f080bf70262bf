//! Per-channel and batch-level error types.
//!
//! Per-channel failures (`FetchError`, `ParseError`) are collected into an
//! [`AcquisitionReport`](crate::AcquisitionReport) instead of aborting the
//! batch. Only [`CacheError`] stops an acquisition run.

use std::path::PathBuf;

use thiserror::Error;

/// Failure while retrieving or decompressing one channel's guide.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The registered URL could not be parsed.
    #[error("{source_id}: invalid guide URL {url:?}")]
    InvalidUrl {
        /// Channel source identifier.
        source_id: String,
        /// Offending URL text.
        url: String,
        /// Underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// Transport-level failure (connect, timeout, body read).
    #[error("{source_id}: request failed")]
    Http {
        /// Channel source identifier.
        source_id: String,
        /// Underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// Server answered with a non-success status.
    #[error("{source_id}: server returned HTTP {status}")]
    Status {
        /// Channel source identifier.
        source_id: String,
        /// HTTP status code.
        status: u16,
    },

    /// The downloaded artifact is not valid gzip.
    #[error("{source_id}: failed to decompress guide")]
    Decompress {
        /// Channel source identifier.
        source_id: String,
        /// Underlying decoder error.
        #[source]
        source: std::io::Error,
    },

    /// Reading or writing a cache file failed.
    #[error("{source_id}: cache file {} failed", path.display())]
    Io {
        /// Channel source identifier.
        source_id: String,
        /// File being read or written.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Returns the channel identifier the failure belongs to.
    #[must_use]
    pub fn source_id(&self) -> &str {
        match self {
            Self::InvalidUrl { source_id, .. }
            | Self::Http { source_id, .. }
            | Self::Status { source_id, .. }
            | Self::Decompress { source_id, .. }
            | Self::Io { source_id, .. } => source_id,
        }
    }
}

/// Failure while parsing one guide document.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The guide file could not be read.
    #[error("failed to read guide {}", path.display())]
    Io {
        /// Guide file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not a well-formed guide.
    #[error("malformed guide {origin}")]
    Xml {
        /// File path or channel identifier the document came from.
        origin: String,
        /// Underlying deserializer error.
        #[source]
        source: quick_xml::DeError,
    },
}

/// Batch-level failure on the guide directory or freshness marker.
#[derive(Debug, Error)]
pub enum CacheError {
    /// The guide directory could not be created.
    #[error("failed to create guide directory {}", path.display())]
    CreateDir {
        /// Directory path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The freshness marker could not be written.
    #[error("failed to write freshness marker {}", path.display())]
    WriteMarker {
        /// Marker file path.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

/// A channel skipped because no guide URL is registered for it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("no guide URL registered for {source_id}")]
pub struct ConfigurationGap {
    /// Channel source identifier.
    pub source_id: String,
}

/// Per-channel failure recorded in the acquisition report.
#[derive(Debug, Error)]
pub enum ChannelFailure {
    /// Download or decompression failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),
    /// The guide document could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Formats an error with its `source()` chain, joined by `": "`.
#[must_use]
pub fn display_chain(err: &(dyn std::error::Error + 'static)) -> String {
    let mut out = err.to_string();
    let mut cause = err.source();
    while let Some(c) = cause {
        out.push_str(": ");
        out.push_str(&c.to_string());
        cause = c.source();
    }
    out
}
