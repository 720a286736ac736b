//! Quest Catalog
//!
//! Loads quest definitions from JSON sources into an in-memory catalog.
//! Records are validated one at a time with skip-and-log semantics: a bad
//! record, or a whole bad file, never aborts a load, and every outcome is
//! returned to the caller in a [`LoadReport`]. Loaded definitions are
//! immutable and shared; live quests are cheap handles onto them.

pub mod definition;
pub mod error;
pub mod loader;
pub mod quest;
pub mod report;
pub mod touch;

pub use definition::{Catalog, QuestDef, QuestId, QuestRequest, RequestType};
pub use error::{RecordError, SourceError};
pub use loader::{CatalogSource, JsonLoader, load_directory};
pub use quest::Quest;
pub use report::{Collision, LoadReport, SkippedRecord};
pub use touch::TouchIndex;
