//! On-disk guide cache: directory layout and freshness marker.
//!
//! The guide directory is flat: one decompressed `{source_id}.xml` per
//! channel plus `last_update.txt` holding the last successful acquisition
//! date as `YYYY-MM-DD`.

use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};

use chrono::{NaiveDate, NaiveDateTime};

use crate::error::CacheError;

/// Freshness marker file name.
pub const MARKER_FILE: &str = "last_update.txt";

/// Age in days at which cached guides are re-fetched.
pub const STALE_AFTER_DAYS: i64 = 2;

/// Marker date format.
const MARKER_DATE_FORMAT: &str = "%Y-%m-%d";

/// Guide cache directory.
#[derive(Debug, Clone)]
pub struct GuideStore {
    dir: PathBuf,
}

impl GuideStore {
    /// Creates a store rooted at `dir`. Nothing is touched on disk yet.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Guide directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the guide directory if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::CreateDir` if the directory cannot be created.
    pub fn ensure_dir(&self) -> Result<(), CacheError> {
        std::fs::create_dir_all(&self.dir).map_err(|source| CacheError::CreateDir {
            path: self.dir.clone(),
            source,
        })
    }

    /// Path of the decompressed guide for a channel.
    #[must_use]
    pub fn guide_path(&self, source_id: &str) -> PathBuf {
        self.dir.join(format!("{source_id}.xml"))
    }

    /// Path of the transient compressed download for a channel.
    #[must_use]
    pub fn compressed_path(&self, source_id: &str) -> PathBuf {
        self.dir.join(format!("{source_id}.xml.gz"))
    }

    /// Path of the freshness marker.
    #[must_use]
    pub fn marker_path(&self) -> PathBuf {
        self.dir.join(MARKER_FILE)
    }

    /// Reads the marker date. `None` if absent, unreadable or malformed.
    #[must_use]
    pub fn read_marker(&self) -> Option<NaiveDate> {
        let path = self.marker_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No freshness marker");
                return None;
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read freshness marker");
                return None;
            }
        };

        match NaiveDate::parse_from_str(content.trim(), MARKER_DATE_FORMAT) {
            Ok(date) => Some(date),
            Err(e) => {
                tracing::warn!(
                    path = %path.display(),
                    content = content.trim(),
                    error = %e,
                    "Malformed freshness marker"
                );
                None
            }
        }
    }

    /// Whether cached guides must be re-fetched as of `today`.
    ///
    /// True when the marker is missing or malformed, or dated
    /// [`STALE_AFTER_DAYS`] or more days before `today`.
    #[must_use]
    pub fn is_stale(&self, today: NaiveDate) -> bool {
        let Some(last) = self.read_marker() else {
            return true;
        };
        let age = today.signed_duration_since(last).num_days();
        tracing::debug!(last_update = %last, age_days = age, "Freshness marker checked");
        age >= STALE_AFTER_DAYS
    }

    /// Replaces the marker with `now`'s calendar date.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::WriteMarker` if the marker cannot be written.
    pub fn mark_fresh(&self, now: NaiveDateTime) -> Result<(), CacheError> {
        let path = self.marker_path();
        let date = now.date().format(MARKER_DATE_FORMAT).to_string();
        write_atomic(&path, date.as_bytes()).map_err(|source| CacheError::WriteMarker {
            path: path.clone(),
            source,
        })?;
        tracing::debug!(path = %path.display(), %date, "Freshness marker updated");
        Ok(())
    }
}

/// Writes `contents` to a sibling temp file, then renames it over `path`.
pub(crate) fn write_atomic(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut tmp: OsString = path.as_os_str().to_owned();
    tmp.push(".tmp");
    let tmp = PathBuf::from(tmp);

    if let Err(e) = std::fs::write(&tmp, contents) {
        if let Err(cleanup) = std::fs::remove_file(&tmp) {
            tracing::debug!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
        }
        return Err(e);
    }
    std::fs::rename(&tmp, path)
}
