//! Quest Catalog Loading
//!
//! Loads quest definitions from JSON sources into a caller-owned
//! [`Catalog`]. Loading never fails outright: unreadable or malformed
//! sources end that source, rejected records are skipped one at a time,
//! and everything that went wrong is logged and carried back in the
//! [`LoadReport`]. The catalog keeps whatever was already in it; a later
//! record never replaces an earlier one with the same id.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};

use crate::definition::{Catalog, QuestDef, QuestId, RawQuestRecord};
use crate::error::{RecordError, SourceError};
use crate::report::LoadReport;

/// Anything that can feed quest definitions into a catalog.
///
/// Sources append to the map they are given and report what happened;
/// they never clear it, so one catalog can be filled from several
/// sources in sequence.
pub trait CatalogSource {
    fn load(&self, quests: &mut Catalog) -> LoadReport;
}

// ============================================================================
// JSON File Loader
// ============================================================================

/// Loads quest definitions from a single JSON file.
///
/// The file must hold a top-level array of quest records. Records are
/// decoded and validated one at a time, so one bad record costs only
/// itself, not the rest of the file.
pub struct JsonLoader {
    path: PathBuf,
}

impl JsonLoader {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Load every record in the file into `quests`.
    pub fn load(&self, quests: &mut Catalog) -> LoadReport {
        let mut report = LoadReport::new();

        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                error!("Failed to read quest source {:?}: {}", self.path, e);
                report.record_source_error(SourceError::Unreadable {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                });
                return report;
            }
        };

        // The container parse happens before any record is touched, so a
        // broken file leaves the catalog exactly as it was.
        let records: Vec<Value> = match serde_json::from_str(&content) {
            Ok(records) => records,
            Err(e) => {
                error!("Failed to parse quest source {:?}: {}", self.path, e);
                report.record_source_error(SourceError::Malformed {
                    path: self.path.display().to_string(),
                    reason: e.to_string(),
                });
                return report;
            }
        };

        info!("Loading {} quest records from {:?}", records.len(), self.path);

        for value in records {
            load_record(value, quests, &mut report);
        }

        info!(
            "Loaded {} quests from {:?} ({} skipped, {} duplicates)",
            report.loaded_count(),
            self.path,
            report.skipped.len(),
            report.collisions.len()
        );

        report
    }
}

impl CatalogSource for JsonLoader {
    fn load(&self, quests: &mut Catalog) -> LoadReport {
        JsonLoader::load(self, quests)
    }
}

/// Decode, validate and insert a single record.
fn load_record(value: Value, quests: &mut Catalog, report: &mut LoadReport) {
    // Pull the id out of the raw value up front so even records that fail
    // to decode can be reported against an id when they carry one.
    let id_hint = record_id(&value);

    let raw: RawQuestRecord = match serde_json::from_value(value) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Skipping malformed quest record (id {:?}): {}", id_hint, e);
            report.record_skip(id_hint, RecordError::Malformed(e.to_string()));
            return;
        }
    };

    let def = match QuestDef::from_raw(&raw) {
        Ok(def) => def,
        Err(e) => {
            warn!("Skipping quest {}: {}", raw.id, e);
            report.record_skip(Some(raw.id), e);
            return;
        }
    };

    if let Some(existing) = quests.get(&def.id) {
        error!(
            "Duplicate quest id {}: keeping {:?}, dropping {:?}",
            def.id, existing.description, def.description
        );
        report.record_collision(def, existing.clone());
        return;
    }

    report.record_loaded(def.id);
    quests.insert(def.id, Arc::new(def));
}

/// Best-effort quest id from an undecoded record, for reporting.
fn record_id(value: &Value) -> Option<QuestId> {
    value
        .get("id")
        .and_then(Value::as_i64)
        .and_then(|id| QuestId::try_from(id).ok())
}

// ============================================================================
// Directory Loading
// ============================================================================

/// Load every `*.json` file in `dir` into `quests`.
///
/// Files load in path order, so when two files define the same id the
/// one that sorts first wins regardless of directory iteration order.
/// A missing directory is not an error, just an empty load.
pub fn load_directory(dir: impl AsRef<Path>, quests: &mut Catalog) -> LoadReport {
    let dir = dir.as_ref();
    let mut report = LoadReport::new();

    if !dir.exists() {
        warn!("Quest directory does not exist: {:?}", dir);
        return report;
    }

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            error!("Failed to read quest directory {:?}: {}", dir, e);
            report.record_source_error(SourceError::Unreadable {
                path: dir.display().to_string(),
                reason: e.to_string(),
            });
            return report;
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().map_or(false, |ext| ext == "json"))
        .collect();
    paths.sort();

    for path in paths {
        report.merge(JsonLoader::new(path).load(quests));
    }

    info!(
        "Loaded {} quest definitions from {:?}",
        report.loaded_count(),
        dir
    );

    report
}
