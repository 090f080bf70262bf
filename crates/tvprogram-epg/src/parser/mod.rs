//! Guide document parser.
//!
//! Turns one XMLTV-flavoured document into registry-mapped programme
//! entries dated today or later. Encoding problems never fail a document:
//! bytes that are not UTF-8 are read as Latin-1.

pub(crate) mod xml;

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};

use self::xml::{TvDocument, XmlProgramme};
use crate::channels::ChannelRegistry;
use crate::error::ParseError;
use crate::schedule::ProgramEntry;

/// Title substituted for programmes without one.
pub const UNTITLED: &str = "No Title";

/// UTF-8 byte-order mark.
const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Strips a UTF-8 BOM and decodes as UTF-8, falling back to Latin-1.
#[must_use]
pub fn decode_document(bytes: &[u8]) -> Cow<'_, str> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    match std::str::from_utf8(bytes) {
        Ok(text) => Cow::Borrowed(text),
        Err(e) => {
            tracing::debug!(valid_up_to = e.valid_up_to(), "Guide is not UTF-8, decoding as Latin-1");
            Cow::Owned(bytes.iter().copied().map(char::from).collect())
        }
    }
}

/// Whether a start stamp's date is `today_key` (`YYYYMMDD`) or later.
///
/// Compares the first eight characters as text; the stamp is fixed-width
/// and zero-padded so this matches calendar order.
#[must_use]
pub fn is_current_or_upcoming(start: &str, today_key: &str) -> bool {
    start.get(..8).is_some_and(|date| date >= today_key)
}

/// Whether the stamp begins with a valid `YYYYMMDDHHMM`.
fn has_valid_stamp(start: &str) -> bool {
    start
        .get(..12)
        .is_some_and(|head| NaiveDateTime::parse_from_str(head, "%Y%m%d%H%M").is_ok())
}

/// Result of parsing one document.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ParsedGuide {
    /// `(source id, entry)` pairs for registered channels, in document order.
    pub entries: Vec<(String, ProgramEntry)>,
    /// Lowercased `channel/@id` values declared by the document.
    pub channel_ids: BTreeSet<String>,
    /// Distinct `YYYYMMDD` dates seen in programme starts.
    pub programme_dates: BTreeSet<String>,
    /// Unregistered channel ids with the number of programmes dropped.
    pub unmapped: BTreeMap<String, usize>,
    /// Programmes dropped for starting before today.
    pub past_skipped: usize,
    /// Programmes dropped for a missing channel or unusable start.
    pub invalid_skipped: usize,
}

/// Parses guide documents against a channel registry.
#[derive(Debug, Clone, Copy)]
pub struct GuideParser<'a> {
    registry: &'a ChannelRegistry,
}

impl<'a> GuideParser<'a> {
    /// Creates a parser mapping ids through `registry`.
    #[must_use]
    pub const fn new(registry: &'a ChannelRegistry) -> Self {
        Self { registry }
    }

    /// Reads and parses a guide file.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::Xml` if it is not a well-formed guide.
    pub fn parse_file(&self, path: &Path, today: NaiveDate) -> Result<ParsedGuide, ParseError> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.parse_from(&path.display().to_string(), &bytes, today)
    }

    /// Parses an in-memory document, labelling failures with `origin`.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Xml` if the document is not a well-formed guide.
    pub fn parse_from(
        &self,
        origin: &str,
        bytes: &[u8],
        today: NaiveDate,
    ) -> Result<ParsedGuide, ParseError> {
        self.parse(bytes, today).map_err(|source| ParseError::Xml {
            origin: origin.to_owned(),
            source,
        })
    }

    /// Parses a document, keeping programmes dated `today` or later.
    ///
    /// # Errors
    ///
    /// Returns the deserializer error if the XML is malformed.
    pub fn parse(&self, bytes: &[u8], today: NaiveDate) -> Result<ParsedGuide, quick_xml::DeError> {
        let text = decode_document(bytes);
        let doc: TvDocument = quick_xml::de::from_str(&text)?;
        let today_key = today.format("%Y%m%d").to_string();

        let mut parsed = ParsedGuide {
            channel_ids: doc
                .channels
                .iter()
                .filter_map(|c| c.id.as_deref())
                .map(str::to_lowercase)
                .collect(),
            ..ParsedGuide::default()
        };

        for programme in doc.programmes {
            self.accept(&mut parsed, programme, &today_key);
        }

        tracing::debug!(
            entries = parsed.entries.len(),
            past_skipped = parsed.past_skipped,
            invalid_skipped = parsed.invalid_skipped,
            unmapped_count = parsed.unmapped.len(),
            unmapped = ?parsed.unmapped.keys().collect::<Vec<_>>(),
            channel_ids = ?parsed.channel_ids,
            programme_dates = ?parsed.programme_dates,
            "Guide parsed"
        );
        Ok(parsed)
    }

    /// Applies defaults and filters to one programme.
    fn accept(&self, parsed: &mut ParsedGuide, programme: XmlProgramme, today_key: &str) {
        let (Some(channel), Some(start)) = (programme.channel, programme.start) else {
            parsed.invalid_skipped = parsed.invalid_skipped.saturating_add(1);
            return;
        };
        let start = start.trim();
        if !has_valid_stamp(start) {
            tracing::trace!(%channel, start, "Skipping programme with unusable start");
            parsed.invalid_skipped = parsed.invalid_skipped.saturating_add(1);
            return;
        }
        if let Some(date) = start.get(..8) {
            parsed.programme_dates.insert(date.to_owned());
        }
        if !is_current_or_upcoming(start, today_key) {
            parsed.past_skipped = parsed.past_skipped.saturating_add(1);
            return;
        }

        let channel = channel.to_lowercase();
        if self.registry.lookup_display_name(&channel).is_none() {
            let count = parsed.unmapped.entry(channel).or_default();
            *count = count.saturating_add(1);
            return;
        }

        let title = programme
            .titles
            .first()
            .and_then(xml::XmlText::non_blank)
            .unwrap_or(UNTITLED);
        let description = programme
            .descs
            .first()
            .and_then(xml::XmlText::non_blank)
            .unwrap_or_default();

        parsed
            .entries
            .push((channel, ProgramEntry::new(start, title, description)));
    }
}
