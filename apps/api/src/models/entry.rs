use std::fmt;

use chrono::Datelike;
use serde::{de, Deserialize, Deserializer, Serialize};

/// Stored in `link` when an entry has no external URL. Never navigated to.
pub const LINK_PLACEHOLDER: &str = "#";

/// Release year of an entry. Falls back to a display string when the year
/// could not be resolved. Serialized untagged: a JSON number or a JSON string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Year {
    Known(i32),
    Unknown(String),
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Year::Known(year) => write!(f, "{year}"),
            Year::Unknown(label) => f.write_str(label),
        }
    }
}

/// A single catalog record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub id: String,
    pub title: String,
    pub year: Year,
    pub director: String,
    pub genre: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    pub synopsis: String,
    pub poster_url: String,
    pub style_keywords: Vec<String>,
    pub system_notes: String,
    #[serde(default = "placeholder_link")]
    pub link: String,
}

impl Entry {
    /// The external URL, or `None` when the entry only carries the placeholder.
    pub fn external_link(&self) -> Option<&str> {
        let link = self.link.trim();
        if link.is_empty() || link == LINK_PLACEHOLDER {
            None
        } else {
            Some(link)
        }
    }
}

fn placeholder_link() -> String {
    LINK_PLACEHOLDER.to_string()
}

/// Metadata suggested by the generative model for a title.
/// Every field is optional; callers resolve missing ones field by field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryMetadata {
    #[serde(default, deserialize_with = "deserialize_year")]
    pub year: Option<i32>,
    pub director: Option<String>,
    pub genre: Option<Vec<String>>,
    pub synopsis: Option<String>,
    pub style_keywords: Option<Vec<String>>,
    pub system_notes: Option<String>,
}

/// On-demand profile of an entry's synopsis. Never stored in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub psychological_profile: String,
    pub visual_motifs: Vec<String>,
    pub risk_assessment: String,
}

/// The model answers `year` as a JSON number, which may arrive as `2021.0`.
fn deserialize_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<f64>::deserialize(deserializer)? else {
        return Ok(None);
    };
    if raw.fract() != 0.0 || raw < f64::from(i32::MIN) || raw > f64::from(i32::MAX) {
        return Err(de::Error::custom(format!(
            "year must be a whole number, got {raw}"
        )));
    }
    Ok(Some(raw as i32))
}

/// Current calendar year in local time. Used wherever a year must be guessed.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}
