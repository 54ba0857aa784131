use std::collections::BTreeMap;

use shared::domain::{Artwork, ArtworkId};

/// Records the user marked, keyed by id. Knows nothing about pages.
#[derive(Debug, Default, Clone)]
pub struct SelectionSet {
    entries: BTreeMap<ArtworkId, Artwork>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts the record, replacing the stored value when its id is
    /// already selected.
    pub fn select(&mut self, record: Artwork) {
        self.entries.insert(record.id, record);
    }

    pub fn unselect(&mut self, id: ArtworkId) {
        self.entries.remove(&id);
    }

    pub fn is_selected(&self, id: ArtworkId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn get(&self, id: ArtworkId) -> Option<&Artwork> {
        self.entries.get(&id)
    }

    pub fn all(&self) -> Vec<Artwork> {
        self.entries.values().cloned().collect()
    }

    pub fn ids(&self) -> impl Iterator<Item = ArtworkId> + '_ {
        self.entries.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/selection_tests.rs"]
mod tests;
