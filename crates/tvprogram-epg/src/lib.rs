//! EPG acquisition library for tvprogram.
//!
//! Downloads per-channel XMLTV guides into a local cache, parses them into a
//! per-channel schedule index and renders display lines for a channel list
//! and schedule view.

/// Acquisition pipeline orchestrating cache, fetch and parse.
pub mod acquisition;

/// Fixed channel registry.
pub mod channels;

/// Error types.
pub mod error;

/// Guide download.
pub mod fetch;

/// XMLTV guide parsing.
pub mod parser;

/// Channel logo lookup.
pub mod picon;

/// Schedule index and line rendering.
pub mod schedule;

/// Presentation-facing session.
pub mod session;

/// On-disk guide cache.
pub mod store;

pub use acquisition::{
    Acquisition, AcquisitionMode, AcquisitionOutput, AcquisitionReport, ChannelOutcome,
    ChannelReport, RefreshPolicy,
};
pub use channels::{ChannelEntry, ChannelRegistry};
pub use error::{CacheError, ChannelFailure, ConfigurationGap, FetchError, ParseError};
pub use fetch::{GuideSource, HttpGuideSource, HttpGuideSourceBuilder, LocalGuideSource};
pub use picon::PiconResolver;
pub use schedule::{ProgramEntry, ScheduleIndex, current_program_index};
pub use session::EpgSession;
pub use store::GuideStore;
