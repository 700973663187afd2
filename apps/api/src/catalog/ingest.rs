use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::info;

use crate::catalog::store::Catalog;
use crate::enrichment::Enricher;
use crate::errors::AppError;
use crate::models::entry::{Entry, EntryMetadata, Year, LINK_PLACEHOLDER};

// Sentinels for fields that neither the user nor the model supplied.
pub const UNKNOWN_DIRECTOR: &str = "未知";
pub const UNKNOWN_COUNTRY: &str = "未知";
pub const UNCATEGORIZED_GENRE: &str = "未分类";
pub const NO_SYNOPSIS: &str = "暂无数据。";
pub const RAW_STYLE_KEYWORD: &str = "原始";
pub const MANUAL_ENTRY_NOTES: &str = "手动录入条目。";

/// Manual input for a new entry. Only the title is required.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewEntry {
    pub title: String,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub genres: Vec<String>,
}

/// Fetches metadata for the title and appends the resolved entry.
///
/// A blank title is rejected before the enricher is called.
/// The catalog lock is not held while the enricher runs.
pub async fn ingest_entry(
    catalog: &RwLock<Catalog>,
    enricher: &dyn Enricher,
    input: NewEntry,
) -> Result<Entry, AppError> {
    let title = input.title.trim();
    if title.is_empty() {
        return Err(AppError::Validation("title cannot be empty".to_string()));
    }

    let metadata = enricher.fetch_metadata(title).await;
    let entry = catalog.write().await.create(&input, metadata);

    info!("Archived entry {} ({})", entry.id, entry.title);
    Ok(entry)
}

/// Builds an entry from manual input and model metadata.
///
/// Per field: non-empty manual value, else non-empty model value, else sentinel.
pub fn resolve_entry(
    id: String,
    input: &NewEntry,
    metadata: EntryMetadata,
    current_year: i32,
) -> Entry {
    let manual_genres: Vec<String> = input
        .genres
        .iter()
        .map(|g| g.trim())
        .filter(|g| !g.is_empty())
        .map(String::from)
        .collect();

    let genre = if manual_genres.is_empty() {
        non_empty_list(metadata.genre).unwrap_or_else(|| vec![UNCATEGORIZED_GENRE.to_string()])
    } else {
        manual_genres
    };

    let year = metadata
        .year
        .filter(|y| *y != 0)
        .unwrap_or(current_year);

    Entry {
        poster_url: poster_url_for(&id),
        id,
        title: input.title.trim().to_string(),
        year: Year::Known(year),
        director: non_empty(metadata.director).unwrap_or_else(|| UNKNOWN_DIRECTOR.to_string()),
        genre,
        country: Some(non_empty(Some(input.country.clone())).unwrap_or_else(|| UNKNOWN_COUNTRY.to_string())),
        synopsis: non_empty(metadata.synopsis).unwrap_or_else(|| NO_SYNOPSIS.to_string()),
        style_keywords: non_empty_list(metadata.style_keywords)
            .unwrap_or_else(|| vec![RAW_STYLE_KEYWORD.to_string()]),
        system_notes: non_empty(metadata.system_notes)
            .unwrap_or_else(|| MANUAL_ENTRY_NOTES.to_string()),
        link: non_empty(Some(input.link.clone())).unwrap_or_else(|| LINK_PLACEHOLDER.to_string()),
    }
}

/// Placeholder poster keyed by entry id.
pub fn poster_url_for(id: &str) -> String {
    format!("https://picsum.photos/400/600?random={id}")
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn non_empty_list(value: Option<Vec<String>>) -> Option<Vec<String>> {
    value.filter(|items| !items.is_empty())
}

// ────────────────────────────────────────────────────────────────────────────
// In-flight guard
// ────────────────────────────────────────────────────────────────────────────

/// Held for the duration of one create. Dropping it reopens ingestion.
pub struct IngestGuard {
    flag: Arc<AtomicBool>,
}

impl IngestGuard {
    /// Returns `None` while another create is still running.
    pub fn try_acquire(flag: &Arc<AtomicBool>) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag: flag.clone() })
    }
}

impl Drop for IngestGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}
