//! Fixed channel registry: display name, source identifier and guide URL.

use std::collections::{HashMap, HashSet};

use anyhow::{Result, bail};

/// Built-in channel table in display order: `(display name, source id)`.
const BUILTIN_CHANNELS: &[(&str, &str)] = &[
    ("RTS1", "rts1.sr"),
    ("RTS2", "rts2.sr"),
    ("B92", "b92.sr"),
    ("Prva", "prva-srpska-tv.sr"),
    ("Pink", "pink.sr"),
    ("Nova S", "nova-s.sr"),
    ("HTV1", "htv1.hr"),
    ("HTV2", "htv2.hr"),
    ("HTV3", "htv3.hr"),
    ("HTV4", "htv4.hr"),
    ("Nova TV", "nova.hr"),
    ("RTL", "rtl.hr"),
    ("RTL2", "rtl2.hr"),
    ("Doma TV", "doma-tv.movie"),
    ("Plava TV", "plava-televizija.hr"),
    ("Vinkovačka TV", "vinkovacka-tv.hr"),
    ("TV Zapad", "tv-zapad.hr"),
    ("SLO1", "slo1.si"),
    ("SLO2", "slo2.si"),
    ("SLO3", "slo3.si"),
    ("Nova M", "nova-m.cg"),
    ("Al Jazeera Balkans", "al-jazeera-balkans.info"),
    ("RTRS", "rtrs.ba"),
    ("BHT1", "bht1.ba"),
    ("FTV", "ftv.ba"),
    ("OBN", "obn.ba"),
    ("Hayat", "hayat-tv.ba"),
    ("Nova BH", "nova-bh.ba"),
    ("Cartoon Network", "cartoon-network.toons"),
    ("Disney Channel", "disney-channel.toons"),
    ("Kika", "kika.toons"),
    ("MTV 00", "mtv00s.music"),
    ("CMC Music", "cmc.music"),
    ("HBO", "hbo.movie"),
    ("SciFi", "scifi.movie"),
    ("Cinestar", "cinestar-tv.movie"),
    ("Discovery", "discovery-europe.doc"),
    ("Eurosport", "eurosport.sport"),
    ("Sport Klub HR", "sportklub-hr.sport"),
    ("Arena Sport 1 HR", "tv-arena-sport-1-hr.sport"),
    ("Arena Sport 1 BH", "arena-sport-1-ba.sport"),
    ("Arena Sport 1", "tv-arena-sport-1.sport"),
    ("Arena Sport 2", "tv-arena-sport-2.sport"),
    ("Arena Sport 3", "tv-arena-sport-3.sport"),
    ("CNN", "cnn.info"),
    ("Euronews", "euronews.info"),
    ("Sky News", "skynews.info"),
    ("BBC1", "bbc1.uk"),
    ("CNBC", "cnbc.info"),
    ("Bloomberg", "bloomberg.info"),
    ("RAI1", "rai-1.it"),
    ("RTL DE", "rtl-de.de"),
    ("PRO7", "pro-7.de"),
    ("Kabel1", "kabel-1.de"),
    ("Sat1", "sat-1.de"),
    ("ZDF", "zdf.de"),
];

/// Builds the weekly tvprofil.net XMLTV feed URL for a source id.
fn tvprofil_url(source_id: &str) -> String {
    format!("https://tvprofil.net/xmltv/data/{source_id}/weekly_{source_id}_tvprofil.net.xml.gz")
}

/// A single registered channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelEntry {
    /// User-facing label, also the schedule lookup key.
    pub display_name: String,
    /// Lowercase upstream identifier, unique within a registry.
    pub source_id: String,
    /// Gzip-compressed guide URL (`None` = configuration gap).
    pub source_url: Option<String>,
}

impl ChannelEntry {
    /// Creates an entry with a guide URL.
    #[must_use]
    pub fn new(
        display_name: impl Into<String>,
        source_id: impl Into<String>,
        source_url: impl Into<String>,
    ) -> Self {
        Self {
            display_name: display_name.into(),
            source_id: source_id.into(),
            source_url: Some(source_url.into()),
        }
    }
}

/// Immutable channel registry.
///
/// Lookups never fail; an unknown key yields `None`. When several entries
/// share a display name, the first one wins for name-based lookups.
#[derive(Debug, Clone)]
#[allow(clippy::module_name_repetitions)]
pub struct ChannelRegistry {
    entries: Vec<ChannelEntry>,
    by_source_id: HashMap<String, usize>,
    by_display_name: HashMap<String, usize>,
}

impl ChannelRegistry {
    /// Builds a registry from the given entries, preserving their order.
    ///
    /// # Errors
    ///
    /// Returns an error if a source id is duplicated or not lowercase.
    pub fn new(entries: Vec<ChannelEntry>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(entries.len());
        for entry in &entries {
            if entry.source_id != entry.source_id.to_lowercase() {
                bail!("source id {:?} must be lowercase", entry.source_id);
            }
            if !seen.insert(entry.source_id.as_str()) {
                bail!("duplicate source id {:?}", entry.source_id);
            }
        }
        Ok(Self::indexed(entries))
    }

    /// Returns the compiled-in channel table.
    #[must_use]
    pub fn builtin() -> Self {
        Self::indexed(
            BUILTIN_CHANNELS
                .iter()
                .map(|&(name, id)| ChannelEntry::new(name, id, tvprofil_url(id)))
                .collect(),
        )
    }

    /// Builds both lookup maps over already validated entries.
    fn indexed(entries: Vec<ChannelEntry>) -> Self {
        let mut by_source_id = HashMap::with_capacity(entries.len());
        let mut by_display_name = HashMap::with_capacity(entries.len());
        for (idx, entry) in entries.iter().enumerate() {
            by_source_id.insert(entry.source_id.clone(), idx);
            by_display_name
                .entry(entry.display_name.clone())
                .or_insert(idx);
        }

        Self {
            entries,
            by_source_id,
            by_display_name,
        }
    }

    /// Maps a display name to its source id.
    #[must_use]
    pub fn lookup_source_id(&self, display_name: &str) -> Option<&str> {
        self.by_display_name
            .get(display_name)
            .and_then(|&idx| self.entries.get(idx))
            .map(|e| e.source_id.as_str())
    }

    /// Maps a source id to its display name.
    #[must_use]
    pub fn lookup_display_name(&self, source_id: &str) -> Option<&str> {
        self.entry(source_id).map(|e| e.display_name.as_str())
    }

    /// Returns the guide URL registered for a source id.
    #[must_use]
    pub fn source_url(&self, source_id: &str) -> Option<&str> {
        self.entry(source_id).and_then(|e| e.source_url.as_deref())
    }

    /// Returns the entry for a source id.
    #[must_use]
    pub fn entry(&self, source_id: &str) -> Option<&ChannelEntry> {
        self.by_source_id
            .get(source_id)
            .and_then(|&idx| self.entries.get(idx))
    }

    /// All entries in registry order.
    #[must_use]
    pub fn entries(&self) -> &[ChannelEntry] {
        &self.entries
    }

    /// Display names in registry order.
    pub fn display_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.display_name.as_str())
    }

    /// Number of registered channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry has no channels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
