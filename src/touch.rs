//! Prerequisite Touch Index
//!
//! Reverse prerequisite edges over a loaded catalog: for each quest, which
//! other quests list it as a prerequisite. Kept outside [`QuestDef`] so
//! definitions stay immutable after load; completing quest `p` means every
//! entry in `touched_by(p)` may have just become available.

use std::collections::HashMap;

use tracing::warn;

use crate::definition::{Catalog, QuestId};

/// Reverse prerequisite edges: prerequisite id -> dependent quest ids.
#[derive(Debug, Clone, Default)]
pub struct TouchIndex {
    touches: HashMap<QuestId, Vec<QuestId>>,
}

impl TouchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the index for a whole catalog.
    ///
    /// Quests are walked in ascending id order, so dependent lists come out
    /// the same for the same catalog regardless of map iteration order.
    /// Prerequisites that name an id missing from the catalog get no edge,
    /// only a warning.
    pub fn build(catalog: &Catalog) -> Self {
        let mut index = Self::new();

        let mut ids: Vec<QuestId> = catalog.keys().copied().collect();
        ids.sort_unstable();

        for id in ids {
            let Some(def) = catalog.get(&id) else {
                continue;
            };
            for &prerequisite in &def.prerequisites {
                if catalog.contains_key(&prerequisite) {
                    index.add_touch(prerequisite, def.id);
                } else {
                    warn!(
                        "Quest {} lists unknown prerequisite {}",
                        def.id, prerequisite
                    );
                }
            }
        }

        index
    }

    /// Record that completing `prerequisite` touches `dependent`.
    pub fn add_touch(&mut self, prerequisite: QuestId, dependent: QuestId) {
        self.touches.entry(prerequisite).or_default().push(dependent);
    }

    /// Quests that list `id` as a prerequisite, in insertion order.
    pub fn touched_by(&self, id: QuestId) -> &[QuestId] {
        self.touches.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of quests with at least one dependent.
    pub fn len(&self) -> usize {
        self.touches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.touches.is_empty()
    }
}
