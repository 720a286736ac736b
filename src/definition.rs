//! Quest Definition Structures
//!
//! Raw quest records as they appear in JSON sources, and the validated,
//! immutable [`QuestDef`] prototypes built from them.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::RecordError;
use crate::quest::Quest;

/// Quest identifier as it appears in the source data.
pub type QuestId = i32;

/// A loaded catalog: quest id -> shared definition.
///
/// Keyed by `QuestDef::id` at the insertion site. The definition type
/// itself carries no id-based equality; treating two definitions with the
/// same id as the same slot is catalog policy, not a property of the type.
pub type Catalog = HashMap<QuestId, Arc<QuestDef>>;

// ============================================================================
// Requirement Types
// ============================================================================

/// Kinds of completion requirement a quest can carry.
///
/// The wire format stores the variant's ordinal code, so the order below
/// is stable and strictly append-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RequestType {
    /// Kill a number of entities of one kind.
    Kill,
    /// Gather a number of items of one kind.
    Gather,
    /// Talk to a specific NPC.
    Talk,
    /// Reach a specific location.
    Reach,
}

impl RequestType {
    /// Resolve a wire code into a requirement kind.
    ///
    /// Out-of-range codes resolve to `None`; they are never mapped to a
    /// default variant.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(RequestType::Kill),
            1 => Some(RequestType::Gather),
            2 => Some(RequestType::Talk),
            3 => Some(RequestType::Reach),
            _ => None,
        }
    }

    /// The wire code for this kind.
    pub fn code(&self) -> i32 {
        match self {
            RequestType::Kill => 0,
            RequestType::Gather => 1,
            RequestType::Talk => 2,
            RequestType::Reach => 3,
        }
    }
}

/// One completion requirement: act on `subject_id`, `count` times.
///
/// Equality covers the full field tuple; duplicate entries in a source
/// record collapse to one inside the requirement set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct QuestRequest {
    /// Id of the entity, item or location the requirement is about.
    pub subject_id: i32,
    pub request_type: RequestType,
    /// Target quantity. Not range-checked in this layer; zero and negative
    /// counts load as-is.
    pub count: i32,
}

// ============================================================================
// Raw JSON Structures
// ============================================================================

/// Raw requirement entry from a record's `required` array.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRequirement {
    /// Subject id (entity/item/location).
    pub id: i32,
    /// Ordinal type code, resolved via [`RequestType::from_code`].
    #[serde(rename = "type")]
    pub request_type: i32,
    pub count: i32,
}

/// Raw quest record as it appears in a JSON source.
///
/// The optional list fields are `Option` so that an explicit `null` in the
/// source decodes the same as an absent key; both normalize to an empty
/// list in [`QuestDef::from_raw`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawQuestRecord {
    pub id: QuestId,
    pub description: String,
    pub ongoing: String,
    pub onfinished: String,
    #[serde(default)]
    pub questgivers: Option<Vec<i32>>,
    #[serde(default)]
    pub prerequisites: Option<Vec<QuestId>>,
    #[serde(default, rename = "pre_dialog_lines")]
    pub pre_dialogue_lines: Option<Vec<String>>,
    /// Completion requirements. An absent key, an explicit `null`, and an
    /// empty array are all rejected identically in [`QuestDef::from_raw`].
    #[serde(default)]
    pub required: Option<Vec<RawRequirement>>,
}

// ============================================================================
// Resolved Definition
// ============================================================================

/// Immutable prototype for one quest (flyweight).
///
/// Built once by the loader, then shared behind an [`Arc`]; live quests are
/// cheap handles created through [`QuestDef::create_quest`]. Reverse
/// prerequisite edges are tracked outside the definition, in
/// [`crate::touch::TouchIndex`], so nothing here mutates after load.
#[derive(Debug, Clone, Serialize)]
pub struct QuestDef {
    pub id: QuestId,
    /// Text shown when the quest is offered.
    pub description: String,
    /// Text shown while the quest is underway.
    pub ongoing: String,
    /// Text shown once the quest is finished.
    pub onfinished: String,
    /// NPC ids able to hand out this quest.
    pub quest_givers: Vec<i32>,
    /// Ids of quests that must be completed first.
    pub prerequisites: Vec<QuestId>,
    /// Dialogue lines shown before acceptance.
    pub pre_dialogue_lines: Vec<String>,
    /// Completion requirements. Never empty: requirement-free records are
    /// rejected by [`QuestDef::from_raw`].
    pub requirements: HashSet<QuestRequest>,
}

impl QuestDef {
    /// Validate a raw record into a definition.
    ///
    /// Rejects records whose `required` array is absent, `null`, or empty
    /// (a quest with no requirements could never be completed) and records
    /// whose requirement entries carry an unknown type code. Duplicate
    /// requirement tuples collapse to a single entry.
    pub fn from_raw(raw: &RawQuestRecord) -> Result<Self, RecordError> {
        let required = raw.required.as_deref().unwrap_or_default();
        if required.is_empty() {
            return Err(RecordError::MissingRequirements);
        }

        let mut requirements = HashSet::new();
        for req in required {
            let request_type = RequestType::from_code(req.request_type).ok_or(
                RecordError::InvalidRequestType {
                    code: req.request_type,
                },
            )?;
            requirements.insert(QuestRequest {
                subject_id: req.id,
                request_type,
                count: req.count,
            });
        }

        Ok(Self {
            id: raw.id,
            description: raw.description.clone(),
            ongoing: raw.ongoing.clone(),
            onfinished: raw.onfinished.clone(),
            quest_givers: raw.questgivers.clone().unwrap_or_default(),
            prerequisites: raw.prerequisites.clone().unwrap_or_default(),
            pre_dialogue_lines: raw.pre_dialogue_lines.clone().unwrap_or_default(),
            requirements,
        })
    }

    /// Create a live quest bound to this shared definition.
    pub fn create_quest(self: Arc<Self>) -> Quest {
        Quest::new(self)
    }

    /// Whether `other` must be completed before this quest.
    pub fn requires(&self, other: QuestId) -> bool {
        self.prerequisites.contains(&other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_record(json: &str) -> RawQuestRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_request_type_codes() {
        assert_eq!(RequestType::from_code(0), Some(RequestType::Kill));
        assert_eq!(RequestType::from_code(1), Some(RequestType::Gather));
        assert_eq!(RequestType::from_code(2), Some(RequestType::Talk));
        assert_eq!(RequestType::from_code(3), Some(RequestType::Reach));
        assert_eq!(RequestType::from_code(4), None);
        assert_eq!(RequestType::from_code(-1), None);

        for code in 0..4 {
            assert_eq!(RequestType::from_code(code).unwrap().code(), code);
        }
    }

    #[test]
    fn test_from_raw_resolves_fields() {
        let raw = parse_record(
            r#"{
                "id": 1,
                "description": "Cull the herd",
                "ongoing": "Still culling",
                "onfinished": "Culled",
                "questgivers": [101, 102],
                "prerequisites": [7],
                "pre_dialog_lines": ["Hail", "Listen"],
                "required": [{"id": 201, "type": 0, "count": 5}]
            }"#,
        );

        let def = QuestDef::from_raw(&raw).unwrap();
        assert_eq!(def.id, 1);
        assert_eq!(def.description, "Cull the herd");
        assert_eq!(def.ongoing, "Still culling");
        assert_eq!(def.onfinished, "Culled");
        assert_eq!(def.quest_givers, vec![101, 102]);
        assert_eq!(def.prerequisites, vec![7]);
        assert_eq!(def.pre_dialogue_lines, vec!["Hail", "Listen"]);

        assert_eq!(def.requirements.len(), 1);
        let req = def.requirements.iter().next().unwrap();
        assert_eq!(req.subject_id, 201);
        assert_eq!(req.request_type, RequestType::Kill);
        assert_eq!(req.count, 5);

        assert!(def.requires(7));
        assert!(!def.requires(8));
    }

    #[test]
    fn test_optional_fields_default_to_empty() {
        let absent = parse_record(
            r#"{
                "id": 2,
                "description": "d",
                "ongoing": "o",
                "onfinished": "f",
                "required": [{"id": 1, "type": 1, "count": 3}]
            }"#,
        );
        let explicit = parse_record(
            r#"{
                "id": 2,
                "description": "d",
                "ongoing": "o",
                "onfinished": "f",
                "questgivers": [],
                "prerequisites": [],
                "pre_dialog_lines": [],
                "required": [{"id": 1, "type": 1, "count": 3}]
            }"#,
        );
        let null = parse_record(
            r#"{
                "id": 2,
                "description": "d",
                "ongoing": "o",
                "onfinished": "f",
                "questgivers": null,
                "prerequisites": null,
                "pre_dialog_lines": null,
                "required": [{"id": 1, "type": 1, "count": 3}]
            }"#,
        );

        let from_absent = QuestDef::from_raw(&absent).unwrap();
        let from_explicit = QuestDef::from_raw(&explicit).unwrap();
        let from_null = QuestDef::from_raw(&null).unwrap();

        assert!(from_absent.quest_givers.is_empty());
        assert!(from_absent.prerequisites.is_empty());
        assert!(from_absent.pre_dialogue_lines.is_empty());
        assert_eq!(from_absent.quest_givers, from_explicit.quest_givers);
        assert_eq!(from_absent.prerequisites, from_explicit.prerequisites);
        assert_eq!(
            from_absent.pre_dialogue_lines,
            from_explicit.pre_dialogue_lines
        );
        assert_eq!(from_null.quest_givers, from_absent.quest_givers);
        assert_eq!(from_null.prerequisites, from_absent.prerequisites);
        assert_eq!(
            from_null.pre_dialogue_lines,
            from_absent.pre_dialogue_lines
        );
    }

    #[test]
    fn test_from_raw_rejects_missing_requirements() {
        let absent = parse_record(
            r#"{"id": 3, "description": "d", "ongoing": "o", "onfinished": "f"}"#,
        );
        let empty = parse_record(
            r#"{"id": 3, "description": "d", "ongoing": "o", "onfinished": "f", "required": []}"#,
        );
        let null = parse_record(
            r#"{"id": 3, "description": "d", "ongoing": "o", "onfinished": "f", "required": null}"#,
        );

        assert_eq!(
            QuestDef::from_raw(&absent).unwrap_err(),
            RecordError::MissingRequirements
        );
        assert_eq!(
            QuestDef::from_raw(&empty).unwrap_err(),
            RecordError::MissingRequirements
        );
        assert_eq!(
            QuestDef::from_raw(&null).unwrap_err(),
            RecordError::MissingRequirements
        );
    }

    #[test]
    fn test_from_raw_rejects_unknown_type_code() {
        let raw = parse_record(
            r#"{
                "id": 4,
                "description": "d",
                "ongoing": "o",
                "onfinished": "f",
                "required": [
                    {"id": 1, "type": 0, "count": 1},
                    {"id": 2, "type": 9, "count": 1}
                ]
            }"#,
        );

        assert_eq!(
            QuestDef::from_raw(&raw).unwrap_err(),
            RecordError::InvalidRequestType { code: 9 }
        );
    }

    #[test]
    fn test_duplicate_requirements_collapse() {
        let raw = parse_record(
            r#"{
                "id": 5,
                "description": "d",
                "ongoing": "o",
                "onfinished": "f",
                "required": [
                    {"id": 201, "type": 0, "count": 5},
                    {"id": 201, "type": 0, "count": 5},
                    {"id": 201, "type": 0, "count": 6}
                ]
            }"#,
        );

        let def = QuestDef::from_raw(&raw).unwrap();
        // Same tuple twice collapses; the different count stays distinct.
        assert_eq!(def.requirements.len(), 2);
    }
}
