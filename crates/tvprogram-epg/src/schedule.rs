//! In-memory per-channel schedule and its text rendering.

use std::collections::HashMap;

use chrono::{NaiveDate, NaiveDateTime};

/// Prefix of date-header lines.
pub const HEADER_PREFIX: &str = "---";

/// Display format for dates in rendered lines.
const DISPLAY_DATE: &str = "%d.%m.%Y";

/// Format of the leading stamp of a rendered program line.
const LINE_STAMP: &str = "%d.%m.%Y %H:%M";

/// A single programme as stored in the index.
///
/// `start` keeps the upstream stamp verbatim (`YYYYMMDDHHMMSS`, optionally
/// with a UTC offset suffix); ordering and date grouping compare it as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramEntry {
    /// Upstream start stamp.
    pub start: String,
    /// Programme title (never empty).
    pub title: String,
    /// Programme description (may be empty).
    pub description: String,
}

impl ProgramEntry {
    /// Creates an entry.
    #[must_use]
    pub fn new(
        start: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            start: start.into(),
            title: title.into(),
            description: description.into(),
        }
    }

    /// The `YYYYMMDD` prefix of the start stamp.
    #[must_use]
    pub fn date_key(&self) -> &str {
        self.start.get(..8).unwrap_or(&self.start)
    }

    /// Renders the program line, with the description on a continuation line.
    fn render(&self) -> String {
        let mut line = format!(
            "{} {} - {}",
            display_date(self.date_key()),
            display_time(&self.start),
            self.title
        );
        if !self.description.is_empty() {
            line.push_str("\n  ");
            line.push_str(&self.description);
        }
        line
    }
}

/// Placeholder shown for a channel without guide data.
#[must_use]
pub fn no_data_line(display_name: &str) -> String {
    format!("Nema EPG podataka za kanal: {display_name}")
}

/// `YYYYMMDD` → `DD.MM.YYYY`; unparseable keys are shown as-is.
fn display_date(date_key: &str) -> String {
    NaiveDate::parse_from_str(date_key, "%Y%m%d").map_or_else(
        |_| date_key.to_owned(),
        |d| d.format(DISPLAY_DATE).to_string(),
    )
}

/// `HHMM` part of a start stamp → `HH:MM`.
fn display_time(start: &str) -> String {
    match (start.get(8..10), start.get(10..12)) {
        (Some(h), Some(m)) => format!("{h}:{m}"),
        _ => String::from("--:--"),
    }
}

/// Per-channel programme lists keyed by display name.
#[derive(Debug, Default, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ScheduleIndex {
    channels: HashMap<String, Vec<ProgramEntry>>,
}

impl ScheduleIndex {
    /// Creates an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends entries to a channel, registering the channel even when
    /// `entries` is empty.
    pub fn add_entries(
        &mut self,
        display_name: &str,
        entries: impl IntoIterator<Item = ProgramEntry>,
    ) {
        self.channels
            .entry(display_name.to_owned())
            .or_default()
            .extend(entries);
    }

    /// Stored entries for a channel in insertion order.
    #[must_use]
    pub fn entries(&self, display_name: &str) -> &[ProgramEntry] {
        self.channels
            .get(display_name)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether the channel has been registered.
    #[must_use]
    pub fn contains_channel(&self, display_name: &str) -> bool {
        self.channels.contains_key(display_name)
    }

    /// Number of registered channels.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Total number of stored entries.
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.channels.values().map(Vec::len).sum()
    }

    /// Renders a channel's schedule.
    ///
    /// Entries are ordered by start stamp (stable for equal stamps) and
    /// grouped under a `--- DD.MM.YYYY ---` header per date. A channel with
    /// no entries yields the single [`no_data_line`].
    #[must_use]
    pub fn query(&self, display_name: &str) -> Vec<String> {
        let entries = self.entries(display_name);
        if entries.is_empty() {
            tracing::debug!(channel = display_name, "No guide data for channel");
            return vec![no_data_line(display_name)];
        }

        let mut sorted: Vec<&ProgramEntry> = entries.iter().collect();
        sorted.sort_by(|a, b| a.start.cmp(&b.start));

        let mut lines = Vec::with_capacity(sorted.len().saturating_add(8));
        let mut current_date: Option<&str> = None;
        for entry in sorted {
            let date = entry.date_key();
            if current_date != Some(date) {
                lines.push(format!("{HEADER_PREFIX} {} {HEADER_PREFIX}", display_date(date)));
                current_date = Some(date);
            }
            lines.push(entry.render());
        }
        lines
    }
}

/// Index of the programme airing at `now` within rendered `lines`.
///
/// Header lines are skipped; each program line's leading `DD.MM.YYYY HH:MM`
/// stamp is re-parsed and the last line starting at or before `now` wins.
/// A programme stays current until the next one starts. Lines that fail to
/// re-parse are ignored. Returns 0 if no line qualifies.
#[must_use]
pub fn current_program_index(lines: &[String], now: NaiveDateTime) -> usize {
    lines
        .iter()
        .enumerate()
        .filter(|(_, line)| !line.starts_with(HEADER_PREFIX))
        .filter_map(|(idx, line)| line_start(line).map(|start| (idx, start)))
        .filter(|(_, start)| *start <= now)
        .map(|(idx, _)| idx)
        .last()
        .unwrap_or(0)
}

/// Parses the leading stamp of a rendered program line.
fn line_start(line: &str) -> Option<NaiveDateTime> {
    let (stamp, _) = line.split_once(" - ")?;
    NaiveDateTime::parse_from_str(stamp, LINE_STAMP).ok()
}
