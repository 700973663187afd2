//! Grouped view — filters, sorts, and partitions the catalog for display.
//!
//! Algorithm:
//! 1. Keep entries whose title or director contains the query (case-insensitive)
//!    and whose genre list contains the genre filter. Empty inputs match all.
//! 2. Stable sort by title with `compare_titles`.
//! 3. Partition by the uppercased first character of the title. Keys ascend.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::Serialize;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::models::entry::Entry;

/// Entries sharing a title initial.
#[derive(Debug, Clone, Serialize)]
pub struct EntryGroup {
    pub key: String,
    pub entries: Vec<Entry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroupedView {
    /// Number of entries that passed the filters.
    pub total: usize,
    pub groups: Vec<EntryGroup>,
}

pub fn build_view(entries: &[Entry], query: &str, genre: &str) -> GroupedView {
    let query = query.to_lowercase();

    let mut matched: Vec<&Entry> = entries
        .iter()
        .filter(|e| matches_query(e, &query) && matches_genre(e, genre))
        .collect();

    // `sort_by` is stable, so equal titles keep insertion order.
    matched.sort_by(|a, b| compare_titles(&a.title, &b.title));

    let total = matched.len();
    let mut grouped: BTreeMap<String, Vec<Entry>> = BTreeMap::new();
    for entry in matched {
        grouped
            .entry(group_key(&entry.title))
            .or_default()
            .push(entry.clone());
    }

    GroupedView {
        total,
        groups: grouped
            .into_iter()
            .map(|(key, entries)| EntryGroup { key, entries })
            .collect(),
    }
}

/// `query` must already be lowercased.
fn matches_query(entry: &Entry, query: &str) -> bool {
    query.is_empty()
        || entry.title.to_lowercase().contains(query)
        || entry.director.to_lowercase().contains(query)
}

fn matches_genre(entry: &Entry, genre: &str) -> bool {
    genre.is_empty() || entry.genre.iter().any(|g| g == genre)
}

/// Uppercased first character of a title. May be more than one char (`ß` → `SS`).
pub fn group_key(title: &str) -> String {
    title
        .chars()
        .next()
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

/// Locale-style title ordering. Ties fall through three levels:
/// base letters (accents and case ignored), then accents, then case with
/// lowercase first at the first differing position.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.chars()
                .flat_map(char::to_lowercase)
                .cmp(b.chars().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .zip(b.chars())
                .find(|(x, y)| x != y)
                .map(|(x, y)| case_rank(x).cmp(&case_rank(y)).then(x.cmp(&y)))
                .unwrap_or(Ordering::Equal)
        })
}

/// Decomposed, lowercased, combining marks dropped: `Amélie` → `amelie`.
fn base_letters(title: &str) -> impl Iterator<Item = char> + '_ {
    title
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

fn case_rank(c: char) -> u8 {
    if c.is_uppercase() {
        1
    } else {
        0
    }
}
