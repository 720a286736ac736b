//! Load Reports
//!
//! Per-load outcome accounting. A [`LoadReport`] is returned by every
//! source load so callers can see what was added, what was skipped and
//! why, without any of it escaping as a hard failure.

use std::sync::Arc;

use crate::definition::{QuestDef, QuestId};
use crate::error::{RecordError, SourceError};

/// One record that was rejected and skipped.
#[derive(Debug, Clone)]
pub struct SkippedRecord {
    /// The record's quest id, when it could be recovered from the raw
    /// value. Records too malformed to carry a readable id report `None`.
    pub id: Option<QuestId>,
    pub reason: RecordError,
}

/// A valid record whose id was already present in the catalog.
///
/// The catalog keeps the first definition; both sides are carried here so
/// callers can diff them without going back to the source files.
#[derive(Debug, Clone)]
pub struct Collision {
    pub id: QuestId,
    /// The definition that was NOT inserted.
    pub incoming: QuestDef,
    /// The definition already in the catalog, which stays.
    pub existing: Arc<QuestDef>,
}

/// Everything that happened during one load.
#[derive(Debug, Clone, Default)]
pub struct LoadReport {
    /// Ids inserted into the catalog, in load order.
    pub loaded: Vec<QuestId>,
    /// Records rejected by validation or decoding.
    pub skipped: Vec<SkippedRecord>,
    /// Valid records dropped because their id was already taken.
    pub collisions: Vec<Collision>,
    /// Sources that failed wholesale.
    pub source_errors: Vec<SourceError>,
}

impl LoadReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of quests this load added to the catalog.
    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// True when nothing was skipped, dropped or failed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.collisions.is_empty() && self.source_errors.is_empty()
    }

    /// Record a definition inserted into the catalog.
    pub fn record_loaded(&mut self, id: QuestId) {
        self.loaded.push(id);
    }

    /// Record a rejected record, with its id when one was recoverable.
    pub fn record_skip(&mut self, id: Option<QuestId>, reason: RecordError) {
        self.skipped.push(SkippedRecord { id, reason });
    }

    /// Record a definition dropped because its id was already loaded.
    pub fn record_collision(&mut self, incoming: QuestDef, existing: Arc<QuestDef>) {
        self.collisions.push(Collision {
            id: incoming.id,
            incoming,
            existing,
        });
    }

    /// Record a source that failed as a whole.
    pub fn record_source_error(&mut self, error: SourceError) {
        self.source_errors.push(error);
    }

    /// Fold another report into this one, preserving order.
    pub fn merge(&mut self, other: LoadReport) {
        self.loaded.extend(other.loaded);
        self.skipped.extend(other.skipped);
        self.collisions.extend(other.collisions);
        self.source_errors.extend(other.source_errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_report_is_clean() {
        let mut report = LoadReport::new();
        assert!(report.is_clean());
        assert_eq!(report.loaded_count(), 0);

        report.record_loaded(1);
        assert!(report.is_clean());
        assert_eq!(report.loaded_count(), 1);
        assert_eq!(report.loaded, vec![1]);

        report.record_skip(Some(2), RecordError::MissingRequirements);
        assert!(!report.is_clean());
    }

    #[test]
    fn test_merge_preserves_order() {
        let mut first = LoadReport::new();
        first.record_loaded(1);
        first.record_source_error(SourceError::Unreadable {
            path: "a.json".to_string(),
            reason: "gone".to_string(),
        });

        let mut second = LoadReport::new();
        second.record_loaded(2);
        second.record_skip(None, RecordError::Malformed("not an object".to_string()));

        first.merge(second);
        assert_eq!(first.loaded, vec![1, 2]);
        assert_eq!(first.skipped.len(), 1);
        assert_eq!(first.source_errors.len(), 1);
        assert!(!first.is_clean());
    }
}
