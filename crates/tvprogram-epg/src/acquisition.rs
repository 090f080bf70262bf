//! Acquisition pipeline: consolidated override, freshness check,
//! sequential per-channel fetch and parse, schedule rebuild.

use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use tracing::instrument;

use crate::channels::{ChannelEntry, ChannelRegistry};
use crate::error::{CacheError, ChannelFailure, ConfigurationGap, display_chain};
use crate::fetch::{LocalGuideSource, fetch_guide};
use crate::parser::{GuideParser, ParsedGuide};
use crate::schedule::ScheduleIndex;
use crate::store::GuideStore;

/// How cached guides are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshPolicy {
    /// Re-fetch only when the freshness marker is stale.
    RespectMarker,
    /// Re-fetch regardless of the marker.
    Force,
}

/// Where the schedule data came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AcquisitionMode {
    /// A consolidated multi-channel guide file short-circuited the run.
    Consolidated(PathBuf),
    /// Cached per-channel guides were reused.
    Cached,
    /// Per-channel guides were downloaded.
    Fetched,
}

/// Outcome for one guide source.
#[derive(Debug)]
pub enum ChannelOutcome {
    /// The guide was parsed; `entries` mapped programmes were indexed.
    Loaded {
        /// Number of programmes added to the schedule.
        entries: usize,
    },
    /// No cached guide exists for the channel.
    NotCached,
    /// The channel has no registered guide URL.
    Skipped(ConfigurationGap),
    /// Download or parse failed.
    Failed(ChannelFailure),
}

/// Report line for one guide source.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ChannelReport {
    /// Source id, or the file path for a consolidated guide.
    pub origin: String,
    /// What happened.
    pub outcome: ChannelOutcome,
}

/// Summary of one acquisition run.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct AcquisitionReport {
    /// Data origin for this run.
    pub mode: AcquisitionMode,
    /// Per-source outcomes in processing order.
    pub channels: Vec<ChannelReport>,
    /// Whether the freshness marker was rewritten.
    pub marker_updated: bool,
}

impl AcquisitionReport {
    fn new(mode: AcquisitionMode) -> Self {
        Self {
            mode,
            channels: Vec::new(),
            marker_updated: false,
        }
    }

    /// Per-source failures.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &ChannelFailure)> {
        self.channels.iter().filter_map(|r| match &r.outcome {
            ChannelOutcome::Failed(f) => Some((r.origin.as_str(), f)),
            _ => None,
        })
    }

    /// Whether any source failed.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failures().next().is_some()
    }

    /// Total programmes indexed.
    #[must_use]
    pub fn loaded_entries(&self) -> usize {
        self.channels
            .iter()
            .map(|r| match r.outcome {
                ChannelOutcome::Loaded { entries } => entries,
                _ => 0,
            })
            .sum()
    }

    fn push(&mut self, origin: &str, outcome: ChannelOutcome) {
        self.channels.push(ChannelReport {
            origin: origin.to_owned(),
            outcome,
        });
    }
}

/// Rebuilt schedule plus the report describing how it was built.
#[derive(Debug)]
pub struct AcquisitionOutput {
    /// Freshly built schedule.
    pub schedule: ScheduleIndex,
    /// Run report.
    pub report: AcquisitionReport,
}

/// One acquisition run over a registry and guide store.
#[derive(Debug)]
pub struct Acquisition<'a, S> {
    registry: &'a ChannelRegistry,
    store: &'a GuideStore,
    source: &'a S,
    consolidated: Option<&'a Path>,
}

impl<'a, S: LocalGuideSource + Sync> Acquisition<'a, S> {
    /// Creates a run without a consolidated override.
    #[must_use]
    pub const fn new(registry: &'a ChannelRegistry, store: &'a GuideStore, source: &'a S) -> Self {
        Self {
            registry,
            store,
            source,
            consolidated: None,
        }
    }

    /// Sets the consolidated guide path checked before anything else.
    #[must_use]
    pub const fn consolidated(mut self, path: Option<&'a Path>) -> Self {
        self.consolidated = path;
        self
    }

    /// Runs the pipeline as of `now`.
    ///
    /// Channels are processed one at a time in registry order. Per-channel
    /// failures are recorded in the report and do not stop the run, but they
    /// keep the freshness marker from being rewritten.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::CreateDir` if the guide directory cannot be
    /// created; nothing is fetched or parsed in that case.
    #[instrument(skip_all, fields(policy = ?policy))]
    pub async fn run(
        &self,
        now: NaiveDateTime,
        policy: RefreshPolicy,
    ) -> Result<AcquisitionOutput, CacheError> {
        let mut schedule = ScheduleIndex::new();
        for name in self.registry.display_names() {
            schedule.add_entries(name, Vec::new());
        }

        if let Some(path) = self.consolidated.filter(|p| p.is_file()) {
            tracing::info!(path = %path.display(), "Using consolidated guide");
            let report = self.load_consolidated(path, now, &mut schedule);
            return Ok(Self::finish(schedule, report));
        }

        self.store.ensure_dir().inspect_err(|e| {
            tracing::error!(error = %display_chain(e), "Acquisition aborted");
        })?;

        let stale = policy == RefreshPolicy::Force || self.store.is_stale(now.date());
        let report = if stale {
            self.fetch_all(now, &mut schedule).await
        } else {
            tracing::info!("Guides are fresh, using cache");
            self.load_cached(now, &mut schedule)
        };

        Ok(Self::finish(schedule, report))
    }

    fn finish(schedule: ScheduleIndex, report: AcquisitionReport) -> AcquisitionOutput {
        tracing::info!(
            mode = ?report.mode,
            sources = report.channels.len(),
            entries = report.loaded_entries(),
            failed = report.failures().count(),
            marker_updated = report.marker_updated,
            "Acquisition finished"
        );
        AcquisitionOutput { schedule, report }
    }

    /// Parses the consolidated guide for all channels.
    fn load_consolidated(
        &self,
        path: &Path,
        now: NaiveDateTime,
        schedule: &mut ScheduleIndex,
    ) -> AcquisitionReport {
        let mut report = AcquisitionReport::new(AcquisitionMode::Consolidated(path.to_path_buf()));
        let origin = path.display().to_string();
        let outcome = match GuideParser::new(self.registry).parse_file(path, now.date()) {
            Ok(parsed) => self.index(parsed, schedule),
            Err(e) => Self::failed(&origin, e.into()),
        };
        report.push(&origin, outcome);
        report
    }

    /// Parses cached guide files without touching the network.
    fn load_cached(&self, now: NaiveDateTime, schedule: &mut ScheduleIndex) -> AcquisitionReport {
        let mut report = AcquisitionReport::new(AcquisitionMode::Cached);
        let parser = GuideParser::new(self.registry);

        for entry in self.registry.entries() {
            let path = self.store.guide_path(&entry.source_id);
            let outcome = if path.is_file() {
                tracing::debug!(path = %path.display(), "Parsing cached guide");
                match parser.parse_file(&path, now.date()) {
                    Ok(parsed) => self.index(parsed, schedule),
                    Err(e) => Self::failed(&entry.source_id, e.into()),
                }
            } else {
                tracing::debug!(path = %path.display(), "No cached guide");
                ChannelOutcome::NotCached
            };
            report.push(&entry.source_id, outcome);
        }
        report
    }

    /// Downloads and parses every channel, then updates the marker if
    /// nothing failed.
    async fn fetch_all(&self, now: NaiveDateTime, schedule: &mut ScheduleIndex) -> AcquisitionReport {
        let mut report = AcquisitionReport::new(AcquisitionMode::Fetched);

        for entry in self.registry.entries() {
            let outcome = self.fetch_one(entry, now, schedule).await;
            report.push(&entry.source_id, outcome);
        }

        if report.has_failures() {
            tracing::warn!("Some guides failed, freshness marker left unchanged");
        } else {
            match self.store.mark_fresh(now) {
                Ok(()) => report.marker_updated = true,
                Err(e) => tracing::warn!(error = %display_chain(&e), "Failed to update freshness marker"),
            }
        }
        report
    }

    async fn fetch_one(
        &self,
        entry: &ChannelEntry,
        now: NaiveDateTime,
        schedule: &mut ScheduleIndex,
    ) -> ChannelOutcome {
        let source_id = entry.source_id.as_str();
        let Some(url) = entry.source_url.as_deref() else {
            let gap = ConfigurationGap {
                source_id: source_id.to_owned(),
            };
            tracing::debug!(%gap, "Skipping channel");
            return ChannelOutcome::Skipped(gap);
        };

        let bytes = match fetch_guide(self.source, self.store, source_id, url).await {
            Ok(bytes) => bytes,
            Err(e) => return Self::failed(source_id, e.into()),
        };

        match GuideParser::new(self.registry).parse_from(source_id, &bytes, now.date()) {
            Ok(parsed) => self.index(parsed, schedule),
            Err(e) => Self::failed(source_id, e.into()),
        }
    }

    /// Adds parsed entries to the schedule under their display names.
    fn index(&self, parsed: ParsedGuide, schedule: &mut ScheduleIndex) -> ChannelOutcome {
        let entries = parsed.entries.len();
        for (source_id, entry) in parsed.entries {
            if let Some(name) = self.registry.lookup_display_name(&source_id) {
                schedule.add_entries(name, [entry]);
            }
        }
        ChannelOutcome::Loaded { entries }
    }

    fn failed(origin: &str, failure: ChannelFailure) -> ChannelOutcome {
        tracing::warn!(%origin, error = %display_chain(&failure), "Guide source failed");
        ChannelOutcome::Failed(failure)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;
    use std::io::Write;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use flate2::Compression;
    use flate2::write::GzEncoder;

    use super::*;
    use crate::error::FetchError;
    use crate::schedule::no_data_line;

    /// In-memory guide source counting downloads.
    #[derive(Debug, Default)]
    pub(crate) struct FakeSource {
        bodies: HashMap<String, Vec<u8>>,
        calls: AtomicUsize,
    }

    impl FakeSource {
        pub(crate) fn serve(mut self, url: &str, xml: &str) -> Self {
            self.bodies.insert(url.to_owned(), gzip(xml.as_bytes()));
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl LocalGuideSource for FakeSource {
        async fn download(&self, source_id: &str, url: &str) -> Result<Vec<u8>, FetchError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.bodies.get(url).cloned().ok_or_else(|| FetchError::Status {
                source_id: source_id.to_owned(),
                status: 404,
            })
        }
    }

    pub(crate) fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    pub(crate) fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 6, 1)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    pub(crate) fn guide(channel: &str, start: &str, title: &str) -> String {
        format!(
            r#"<tv><channel id="{channel}"/><programme channel="{channel}" start="{start}"><title>{title}</title></programme></tv>"#
        )
    }

    pub(crate) fn test_registry() -> ChannelRegistry {
        ChannelRegistry::new(vec![
            ChannelEntry::new("RTS1", "rts1.sr", "http://guides/rts1"),
            ChannelEntry::new("HBO", "hbo.movie", "http://guides/hbo"),
        ])
        .unwrap()
    }

    fn two_channel_source() -> FakeSource {
        FakeSource::default()
            .serve("http://guides/rts1", &guide("rts1.sr", "20250601060000", "Jutro"))
            .serve("http://guides/hbo", &guide("hbo.movie", "20250601210000", "Film"))
    }

    #[tokio::test]
    async fn test_fetch_path_builds_schedule_and_marks_fresh() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path().join("epg"));
        let registry = test_registry();
        let source = two_channel_source();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Fetched);
        assert!(out.report.marker_updated);
        assert_eq!(out.report.loaded_entries(), 2);
        assert_eq!(source.calls(), 2);
        assert_eq!(out.schedule.entries("RTS1").len(), 1);
        assert_eq!(out.schedule.entries("HBO").len(), 1);
        assert!(store.guide_path("rts1.sr").is_file());
        assert!(!store.compressed_path("rts1.sr").exists());
        assert_eq!(std::fs::read_to_string(store.marker_path()).unwrap(), "2025-06-01");
    }

    #[tokio::test]
    async fn test_second_run_within_window_uses_cache() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let source = two_channel_source();
        let acquisition = Acquisition::new(&registry, &store, &source);
        acquisition.run(now(), RefreshPolicy::RespectMarker).await.unwrap();
        let guide_before = std::fs::read(store.guide_path("rts1.sr")).unwrap();
        let marker_before = std::fs::read(store.marker_path()).unwrap();

        // Act
        let later = now() + chrono::Duration::hours(30);
        let out = acquisition.run(later, RefreshPolicy::RespectMarker).await.unwrap();

        // Assert
        assert_eq!(source.calls(), 2);
        assert_eq!(out.report.mode, AcquisitionMode::Cached);
        assert!(!out.report.marker_updated);
        assert_eq!(std::fs::read(store.guide_path("rts1.sr")).unwrap(), guide_before);
        assert_eq!(std::fs::read(store.marker_path()).unwrap(), marker_before);
        // 2025-06-02 now: the 2025-06-01 programmes are dropped on re-parse.
        assert_eq!(out.schedule.entry_count(), 0);
    }

    #[tokio::test]
    async fn test_force_refetches_fresh_cache() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let source = two_channel_source();
        let acquisition = Acquisition::new(&registry, &store, &source);
        acquisition.run(now(), RefreshPolicy::RespectMarker).await.unwrap();

        // Act
        let out = acquisition.run(now(), RefreshPolicy::Force).await.unwrap();

        // Assert
        assert_eq!(source.calls(), 4);
        assert_eq!(out.report.mode, AcquisitionMode::Fetched);
    }

    #[tokio::test]
    async fn test_failed_channel_is_isolated_and_blocks_marker() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let source = FakeSource::default()
            .serve("http://guides/hbo", &guide("hbo.movie", "20250601210000", "Film"));

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        let failures: Vec<&str> = out.report.failures().map(|(origin, _)| origin).collect();
        assert_eq!(failures, vec!["rts1.sr"]);
        assert!(!out.report.marker_updated);
        assert!(!store.marker_path().exists());
        assert_eq!(out.schedule.entries("HBO").len(), 1);
        assert!(out.schedule.entries("RTS1").is_empty());
        assert!(store.guide_path("hbo.movie").is_file());
    }

    #[tokio::test]
    async fn test_malformed_download_is_parse_failure() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let source = two_channel_source().serve("http://guides/rts1", "<tv><programme channel=");

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        let (origin, failure) = out.report.failures().next().unwrap();
        assert_eq!(origin, "rts1.sr");
        assert!(matches!(failure, ChannelFailure::Parse(_)));
        assert!(out.schedule.entries("RTS1").is_empty());
        assert!(!out.report.marker_updated);
    }

    #[tokio::test]
    async fn test_configuration_gap_is_skipped() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = ChannelRegistry::new(vec![
            ChannelEntry::new("RTS1", "rts1.sr", "http://guides/rts1"),
            ChannelEntry {
                display_name: String::from("Local"),
                source_id: String::from("local.tv"),
                source_url: None,
            },
        ])
        .unwrap();
        let source = two_channel_source();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert!(matches!(
            out.report.channels.get(1).map(|r| &r.outcome),
            Some(ChannelOutcome::Skipped(gap)) if gap.source_id == "local.tv"
        ));
        assert!(out.report.marker_updated);
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_unmapped_ids_never_reach_schedule() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let xml = r#"<tv>
  <programme channel="rts1.sr" start="20250601060000"><title>Jutro</title></programme>
  <programme channel="stranger.xx" start="20250601070000"><title>Tudje</title></programme>
</tv>"#;
        let source = two_channel_source().serve("http://guides/rts1", xml);

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.schedule.channel_count(), 2);
        assert_eq!(out.schedule.entry_count(), 2);
        assert!(!out.schedule.contains_channel("stranger.xx"));
    }

    #[tokio::test]
    async fn test_consolidated_guide_short_circuits() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path().join("epg"));
        let registry = test_registry();
        let source = two_channel_source();
        let consolidated = dir.path().join("all.xml");
        std::fs::write(
            &consolidated,
            r#"<tv>
  <programme channel="RTS1.sr" start="20250601060000"><title>Jutro</title></programme>
  <programme channel="hbo.movie" start="20250601210000"><title>Film</title></programme>
</tv>"#,
        )
        .unwrap();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .consolidated(Some(&consolidated))
            .run(now(), RefreshPolicy::Force)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Consolidated(consolidated.clone()));
        assert_eq!(source.calls(), 0);
        assert_eq!(out.schedule.entry_count(), 2);
        assert!(!out.report.marker_updated);
        assert!(!store.dir().exists());
    }

    #[tokio::test]
    async fn test_missing_consolidated_guide_is_ignored() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        let source = two_channel_source();
        let consolidated = dir.path().join("absent.xml");

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .consolidated(Some(&consolidated))
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Fetched);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_cached_mode_reports_missing_files() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        std::fs::write(store.marker_path(), "2025-06-01").unwrap();
        std::fs::write(
            store.guide_path("hbo.movie"),
            guide("hbo.movie", "20250601210000", "Film"),
        )
        .unwrap();
        let source = FakeSource::default();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Cached);
        assert!(matches!(
            out.report.channels.first().map(|r| &r.outcome),
            Some(ChannelOutcome::NotCached)
        ));
        assert_eq!(out.schedule.entries("HBO").len(), 1);
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_uncreatable_directory_aborts() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, "x").unwrap();
        let store = GuideStore::new(blocker.join("epg"));
        let registry = test_registry();
        let source = two_channel_source();

        // Act
        let result = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await;

        // Assert
        assert!(matches!(result, Err(CacheError::CreateDir { .. })));
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_corrupt_cached_guide_is_isolated() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path());
        let registry = test_registry();
        std::fs::write(store.marker_path(), "2025-06-01").unwrap();
        std::fs::write(store.guide_path("rts1.sr"), "<tv><programme channel=").unwrap();
        std::fs::write(
            store.guide_path("hbo.movie"),
            guide("hbo.movie", "20250601210000", "Film"),
        )
        .unwrap();
        let source = FakeSource::default();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Cached);
        assert!(matches!(
            out.report.channels.first(),
            Some(ChannelReport { origin, outcome: ChannelOutcome::Failed(ChannelFailure::Parse(_)) })
                if origin == "rts1.sr"
        ));
        assert!(matches!(
            out.report.channels.get(1).map(|r| &r.outcome),
            Some(ChannelOutcome::Loaded { entries: 1 })
        ));
        assert_eq!(out.schedule.query("RTS1"), vec![no_data_line("RTS1")]);
        assert_eq!(out.schedule.entries("HBO").len(), 1);
        assert!(!out.report.marker_updated);
        assert_eq!(std::fs::read_to_string(store.marker_path()).unwrap(), "2025-06-01");
        assert_eq!(source.calls(), 0);
    }

    #[tokio::test]
    async fn test_malformed_consolidated_guide_reports_failure() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let store = GuideStore::new(dir.path().join("epg"));
        let registry = test_registry();
        let source = two_channel_source();
        let consolidated = dir.path().join("all.xml");
        std::fs::write(&consolidated, "<tv><programme channel=").unwrap();

        // Act
        let out = Acquisition::new(&registry, &store, &source)
            .consolidated(Some(&consolidated))
            .run(now(), RefreshPolicy::RespectMarker)
            .await
            .unwrap();

        // Assert
        assert_eq!(out.report.mode, AcquisitionMode::Consolidated(consolidated.clone()));
        assert_eq!(out.report.channels.len(), 1);
        assert!(matches!(
            out.report.channels.first().map(|r| &r.outcome),
            Some(ChannelOutcome::Failed(ChannelFailure::Parse(_)))
        ));
        assert_eq!(source.calls(), 0);
        for name in registry.display_names() {
            assert_eq!(out.schedule.query(name), vec![no_data_line(name)]);
        }
        assert!(!out.report.marker_updated);
        assert!(!store.marker_path().exists());
    }
}
