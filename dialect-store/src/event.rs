//! Store change events
//!
//! Each applied mutation appends one event to the store's log; the
//! presentation layer drains the log explicitly instead of observing
//! properties. Absorbed no-ops (stale edits against missing targets)
//! produce no event.

use dialect_core::{AgentId, EntityId, IntentId, SampleId, SkillId, SlotId};
use serde::{Deserialize, Serialize};

/// What happened to the entity named by a [`StoreEvent`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeKind {
    Added,
    Updated,
    Removed,
}

/// One applied mutation, addressed the same way the operation was.
///
/// Embedded entities carry their full resolution path so a consumer can
/// find the changed object without scanning the tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StoreEvent {
    Agent {
        kind: ChangeKind,
        id: AgentId,
    },
    Skill {
        kind: ChangeKind,
        id: SkillId,
    },
    Entity {
        kind: ChangeKind,
        id: EntityId,
    },
    Intent {
        kind: ChangeKind,
        skill: SkillId,
        id: IntentId,
    },
    Slot {
        kind: ChangeKind,
        skill: SkillId,
        intent: IntentId,
        id: SlotId,
    },
    Sample {
        kind: ChangeKind,
        skill: SkillId,
        intent: IntentId,
        id: SampleId,
    },
}

impl StoreEvent {
    /// The change kind, independent of which entity it touched.
    pub fn kind(&self) -> ChangeKind {
        match self {
            StoreEvent::Agent { kind, .. }
            | StoreEvent::Skill { kind, .. }
            | StoreEvent::Entity { kind, .. }
            | StoreEvent::Intent { kind, .. }
            | StoreEvent::Slot { kind, .. }
            | StoreEvent::Sample { kind, .. } => *kind,
        }
    }
}
