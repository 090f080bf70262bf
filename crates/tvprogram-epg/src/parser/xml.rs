//! XMLTV document shape consumed by the parser.
//!
//! Only `channel/@id` and `programme/@channel`, `@start`, `title`, `desc`
//! are read; every other element and attribute is ignored.

use serde::Deserialize;

/// `<tv>` root element.
#[derive(Debug, Deserialize)]
#[serde(rename = "tv")]
pub struct TvDocument {
    /// Declared channels.
    #[serde(rename = "channel", default)]
    pub channels: Vec<XmlChannel>,
    /// Programme listings.
    #[serde(rename = "programme", default)]
    pub programmes: Vec<XmlProgramme>,
}

/// `<channel>` element.
#[derive(Debug, Deserialize)]
pub struct XmlChannel {
    /// Channel identifier as declared upstream (any case).
    #[serde(rename = "@id", default)]
    pub id: Option<String>,
}

/// `<programme>` element.
#[derive(Debug, Deserialize)]
pub struct XmlProgramme {
    /// Channel identifier this programme belongs to.
    #[serde(rename = "@channel", default)]
    pub channel: Option<String>,
    /// Start stamp, `YYYYMMDDHHMMSS` optionally followed by a UTC offset.
    #[serde(rename = "@start", default)]
    pub start: Option<String>,
    /// Title elements (one per language; the first is used).
    #[serde(rename = "title", default)]
    pub titles: Vec<XmlText>,
    /// Description elements (the first is used).
    #[serde(rename = "desc", default)]
    pub descs: Vec<XmlText>,
}

/// A text-only element such as `<title lang="sr">...</title>`.
#[derive(Debug, Deserialize)]
pub struct XmlText {
    /// Element text.
    #[serde(rename = "$text", default)]
    pub value: String,
}

impl XmlText {
    /// Returns the trimmed text, or `None` if it is blank.
    pub fn non_blank(&self) -> Option<&str> {
        let trimmed = self.value.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}
