//! Live Quest Instances
//!
//! A [`Quest`] is a lightweight handle onto a shared [`QuestDef`]. Every
//! instance created from the same definition points at the same allocation;
//! per-player progress state lives with the caller, not here.

use std::sync::Arc;

use crate::definition::{QuestDef, QuestId};

/// An active quest bound to its catalog definition.
#[derive(Debug, Clone)]
pub struct Quest {
    def: Arc<QuestDef>,
}

impl Quest {
    pub fn new(def: Arc<QuestDef>) -> Self {
        Self { def }
    }

    pub fn id(&self) -> QuestId {
        self.def.id
    }

    /// The shared definition backing this instance.
    pub fn def(&self) -> &QuestDef {
        &self.def
    }
}
