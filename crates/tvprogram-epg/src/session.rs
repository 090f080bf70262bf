//! Presentation-facing session: owns the registry, cache, current schedule
//! and picon lookup behind a small query surface.

use std::path::PathBuf;

use chrono::{Local, NaiveDateTime};

use crate::acquisition::{Acquisition, AcquisitionReport, RefreshPolicy};
use crate::channels::ChannelRegistry;
use crate::error::CacheError;
use crate::fetch::LocalGuideSource;
use crate::picon::PiconResolver;
use crate::schedule::{ScheduleIndex, current_program_index};
use crate::store::GuideStore;

/// EPG session backing a channel list and schedule view.
///
/// The schedule is replaced only by an acquisition run that was not aborted;
/// until then queries see the previous (initially empty) schedule.
#[derive(Debug)]
pub struct EpgSession<S> {
    registry: ChannelRegistry,
    store: GuideStore,
    consolidated: Option<PathBuf>,
    picons: PiconResolver,
    source: S,
    schedule: ScheduleIndex,
}

impl<S: LocalGuideSource + Sync> EpgSession<S> {
    /// Creates a session with an empty schedule.
    #[must_use]
    pub fn new(
        registry: ChannelRegistry,
        store: GuideStore,
        picons: PiconResolver,
        source: S,
    ) -> Self {
        Self {
            registry,
            store,
            consolidated: None,
            picons,
            source,
            schedule: ScheduleIndex::new(),
        }
    }

    /// Sets the consolidated guide checked before per-channel acquisition.
    #[must_use]
    pub fn with_consolidated_guide(mut self, path: impl Into<PathBuf>) -> Self {
        self.consolidated = Some(path.into());
        self
    }

    /// Display names in registry order.
    #[must_use]
    pub fn list_channels(&self) -> Vec<&str> {
        self.registry.display_names().collect()
    }

    /// Rendered schedule lines for a channel.
    #[must_use]
    pub fn schedule(&self, display_name: &str) -> Vec<String> {
        self.schedule.query(display_name)
    }

    /// Index of the line airing at `now` in [`Self::schedule`]'s output.
    #[must_use]
    pub fn current_index(&self, display_name: &str, now: NaiveDateTime) -> usize {
        current_program_index(&self.schedule(display_name), now)
    }

    /// Picon for a channel, or the placeholder.
    #[must_use]
    pub fn resolve_picon(&self, display_name: &str) -> Option<PathBuf> {
        self.picons.resolve(&self.registry, display_name)
    }

    /// Runs acquisition against the local clock.
    ///
    /// # Errors
    ///
    /// See [`Self::run_acquisition_at`].
    pub async fn run_acquisition(&mut self) -> Result<AcquisitionReport, CacheError> {
        self.run_acquisition_at(Local::now().naive_local()).await
    }

    /// Runs acquisition as of `now`, honoring the freshness marker.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the guide directory cannot be created; the
    /// previous schedule stays in place.
    pub async fn run_acquisition_at(
        &mut self,
        now: NaiveDateTime,
    ) -> Result<AcquisitionReport, CacheError> {
        self.acquire(now, RefreshPolicy::RespectMarker).await
    }

    /// Runs acquisition as of `now`, re-fetching regardless of the marker.
    ///
    /// # Errors
    ///
    /// Returns `CacheError` if the guide directory cannot be created.
    pub async fn refresh_at(&mut self, now: NaiveDateTime) -> Result<AcquisitionReport, CacheError> {
        self.acquire(now, RefreshPolicy::Force).await
    }

    async fn acquire(
        &mut self,
        now: NaiveDateTime,
        policy: RefreshPolicy,
    ) -> Result<AcquisitionReport, CacheError> {
        let output = Acquisition::new(&self.registry, &self.store, &self.source)
            .consolidated(self.consolidated.as_deref())
            .run(now, policy)
            .await?;
        self.schedule = output.schedule;
        Ok(output.report)
    }

    /// Channel registry.
    #[must_use]
    pub const fn registry(&self) -> &ChannelRegistry {
        &self.registry
    }

    /// Guide store.
    #[must_use]
    pub const fn store(&self) -> &GuideStore {
        &self.store
    }

    /// Current schedule.
    #[must_use]
    pub const fn schedule_index(&self) -> &ScheduleIndex {
        &self.schedule
    }
}
