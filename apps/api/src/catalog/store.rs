use tracing::debug;

use crate::catalog::ingest::{resolve_entry, NewEntry};
use crate::catalog::snapshot::CatalogSnapshot;
use crate::catalog::view::{build_view, GroupedView};
use crate::models::entry::{current_year, Entry, EntryMetadata};

const ID_PREFIX: &str = "M";

/// The in-memory catalog: entries in insertion order plus the id sequence.
///
/// Ids come from a monotonic counter, so they are never reused after a delete.
#[derive(Debug)]
pub struct Catalog {
    entries: Vec<Entry>,
    next_seq: u32,
    revision: u64,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            next_seq: 1,
            revision: 0,
        }
    }

    /// Restores a catalog. The counter is raised past every sequence id already in use.
    pub fn from_parts(entries: Vec<Entry>, next_seq: u32) -> Self {
        let highest = entries
            .iter()
            .filter_map(|e| parse_seq(&e.id))
            .max()
            .unwrap_or(0);

        Self {
            entries,
            next_seq: next_seq.max(highest.saturating_add(1)),
            revision: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn next_seq(&self) -> u32 {
        self.next_seq
    }

    /// Bumped on every mutation that changed the collection.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn get(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Allocates the next id and appends the resolved entry.
    pub fn create(&mut self, input: &NewEntry, metadata: EntryMetadata) -> Entry {
        let id = self.allocate_id();
        let entry = resolve_entry(id, input, metadata, current_year());
        self.entries.push(entry.clone());
        self.revision += 1;
        entry
    }

    /// Replaces the entry with `id` in place, trimming the title. Unknown ids are ignored.
    /// Returns whether anything was replaced.
    pub fn update(&mut self, id: &str, mut record: Entry) -> bool {
        let Some(slot) = self.entries.iter_mut().find(|e| e.id == id) else {
            debug!("Update skipped: no entry {id}");
            return false;
        };
        record.id = id.to_string();
        record.title = record.title.trim().to_string();
        *slot = record;
        self.revision += 1;
        true
    }

    /// Removes the entry with `id`. Unknown ids are ignored.
    /// Returns whether anything was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() != before;
        if removed {
            self.revision += 1;
        } else {
            debug!("Delete skipped: no entry {id}");
        }
        removed
    }

    pub fn view(&self, query: &str, genre: &str) -> GroupedView {
        build_view(&self.entries, query, genre)
    }

    pub fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            next_seq: self.next_seq,
            entries: self.entries().to_vec(),
        }
    }

    fn allocate_id(&mut self) -> String {
        loop {
            let id = format!("{ID_PREFIX}{:03}", self.next_seq);
            self.next_seq += 1;
            if self.get(&id).is_none() {
                return id;
            }
        }
    }
}

fn parse_seq(id: &str) -> Option<u32> {
    id.strip_prefix(ID_PREFIX)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::catalog::seed::seed_entries;

    fn titled(title: &str) -> NewEntry {
        NewEntry {
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_entry_is_m001() {
        let mut catalog = Catalog::new();
        let entry = catalog.create(&titled("Dune"), EntryMetadata::default());
        assert_eq!(entry.id, "M001");
        assert_eq!(catalog.len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_after_deletes() {
        let mut catalog = Catalog::new();
        let mut seen = HashSet::new();
        for round in 0..5 {
            let a = catalog.create(&titled("A"), EntryMetadata::default());
            let b = catalog.create(&titled("B"), EntryMetadata::default());
            assert!(seen.insert(a.id.clone()), "duplicate id in round {round}");
            assert!(seen.insert(b.id.clone()), "duplicate id in round {round}");
            catalog.delete(&a.id);
        }
        let live: HashSet<_> = catalog.entries().iter().map(|e| e.id.clone()).collect();
        assert_eq!(live.len(), catalog.len());
    }

    #[test]
    fn test_seeded_catalog_continues_sequence() {
        let seed = seed_entries();
        let count = seed.len();
        let mut catalog = Catalog::from_parts(seed, 1);
        let entry = catalog.create(&titled("Dune"), EntryMetadata::default());
        assert_eq!(entry.id, format!("M{:03}", count + 1));
    }

    #[test]
    fn test_from_parts_respects_higher_counter() {
        let catalog = Catalog::from_parts(seed_entries(), 42);
        assert_eq!(catalog.next_seq(), 42);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut catalog = Catalog::from_parts(seed_entries(), 1);
        let mut record = catalog.get("M002").cloned().unwrap();
        record.title = "Arrival (Director's Cut)".to_string();
        record.id = "ignored".to_string();

        assert!(catalog.update("M002", record));

        assert_eq!(catalog.entries()[1].id, "M002");
        assert_eq!(catalog.entries()[1].title, "Arrival (Director's Cut)");
        assert!(catalog.get("ignored").is_none());
    }

    #[test]
    fn test_update_trims_title() {
        let mut catalog = Catalog::from_parts(seed_entries(), 1);
        let mut record = catalog.get("M001").cloned().unwrap();
        record.title = "  zed ".to_string();

        assert!(catalog.update("M001", record));
        assert_eq!(catalog.get("M001").unwrap().title, "zed");
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut catalog = Catalog::from_parts(seed_entries(), 1);
        let before = catalog.entries().to_vec();
        let mut record = before[0].clone();
        record.title = "Ghost".to_string();

        assert!(!catalog.update("M999", record));

        assert_eq!(catalog.entries(), before.as_slice());
        assert_eq!(catalog.revision(), 0);
    }

    #[test]
    fn test_delete_unknown_id_is_noop() {
        let mut catalog = Catalog::from_parts(seed_entries(), 1);
        let before = catalog.entries().to_vec();

        assert!(!catalog.delete("M999"));

        assert_eq!(catalog.entries(), before.as_slice());
    }

    #[test]
    fn test_delete_removes_entry() {
        let mut catalog = Catalog::from_parts(seed_entries(), 1);
        let count = catalog.len();
        assert!(catalog.delete("M003"));
        assert_eq!(catalog.len(), count - 1);
        assert!(catalog.get("M003").is_none());
        assert_eq!(catalog.revision(), 1);
    }

    #[test]
    fn test_view_over_seed_finds_both_villeneuve_films() {
        let catalog = Catalog::from_parts(seed_entries(), 1);
        let view = catalog.view("villeneuve", "");
        assert_eq!(view.total, 2);
        let keys: Vec<_> = view.groups.iter().map(|g| g.key.as_str()).collect();
        assert_eq!(keys, vec!["A", "B"]);
    }
}
