//! Edit commands dispatched by the presentation layer
//!
//! One inbound surface for the editor: every store operation is a
//! [`Command`] applied through [`AgentStore::apply`]. Upserts route on the
//! presence of an id in the payload: with an id they update, without one
//! they create. The update payloads use `Option` fields where `None` (or an
//! empty string) preserves the current value.

use crate::store::AgentStore;
use dialect_core::{AgentId, EntityId, IntentId, SampleId, SkillId, SlotId};
use serde::{Deserialize, Serialize};

/// Partial update for a slot. Absent or empty fields preserve the current
/// value; there is no clear-to-empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotUpdate {
    pub name: Option<String>,
    pub entity: Option<EntityId>,
}

/// One edit to a sample's span-annotation set, keyed by `(start, end)`.
///
/// With a `slot` reference this upserts the annotation at that key; without
/// one it removes the annotation at that key (if any).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanEdit {
    pub start: usize,
    pub end: usize,
    pub value: String,
    pub slot: Option<SlotId>,
}

/// Partial update for a sample: optional text replacement plus an optional
/// span edit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SampleUpdate {
    pub text: Option<String>,
    pub span: Option<SpanEdit>,
}

/// An edit operation against the store, one variant per operation the
/// editor can dispatch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    UpsertAgent {
        id: Option<AgentId>,
        name: String,
        description: String,
    },
    EditAgentSkills {
        id: AgentId,
        skills: Vec<SkillId>,
    },
    RemoveAgent {
        id: AgentId,
    },
    UpsertEntity {
        id: Option<EntityId>,
        name: String,
        kind: String,
        content: String,
    },
    RemoveEntity {
        id: EntityId,
    },
    UpsertSkill {
        id: Option<SkillId>,
        name: String,
        description: String,
    },
    RemoveSkill {
        id: SkillId,
    },
    UpsertIntent {
        id: Option<IntentId>,
        skill: SkillId,
        name: String,
        description: String,
    },
    RemoveIntent {
        id: IntentId,
        skill: SkillId,
    },
    UpsertSlot {
        id: Option<SlotId>,
        skill: SkillId,
        intent: IntentId,
        update: SlotUpdate,
    },
    RemoveSlot {
        id: SlotId,
        skill: SkillId,
        intent: IntentId,
    },
    UpsertSample {
        id: Option<SampleId>,
        skill: SkillId,
        intent: IntentId,
        update: SampleUpdate,
    },
    RemoveSample {
        id: SampleId,
        skill: SkillId,
        intent: IntentId,
    },
}

impl AgentStore {
    /// Apply one edit command. Shares the store's failure policy: commands
    /// aimed at missing targets are absorbed silently.
    ///
    /// A slot or sample upsert without an id creates a fresh, empty object;
    /// any update fields in the payload are ignored on that path, matching
    /// the create operations.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::UpsertAgent {
                id: Some(id),
                name,
                description,
            } => self.set_agent(id, &name, &description),
            Command::UpsertAgent {
                id: None,
                name,
                description,
            } => {
                self.add_agent(&name, &description);
            }
            Command::EditAgentSkills { id, skills } => self.set_agent_skills(id, skills),
            Command::RemoveAgent { id } => self.delete_agent(id),
            Command::UpsertEntity {
                id: Some(id),
                name,
                kind,
                content,
            } => self.set_entity(id, &name, &kind, &content),
            Command::UpsertEntity {
                id: None,
                name,
                kind,
                content,
            } => {
                self.add_entity(&name, &kind, &content);
            }
            Command::RemoveEntity { id } => self.delete_entity(id),
            Command::UpsertSkill {
                id: Some(id),
                name,
                description,
            } => self.set_skill(id, &name, &description),
            Command::UpsertSkill {
                id: None,
                name,
                description,
            } => {
                self.add_skill(&name, &description);
            }
            Command::RemoveSkill { id } => self.delete_skill(id),
            Command::UpsertIntent {
                id: Some(id),
                skill,
                name,
                description,
            } => self.set_intent(id, skill, &name, &description),
            Command::UpsertIntent {
                id: None,
                skill,
                name,
                description,
            } => {
                self.add_intent(&name, &description, skill);
            }
            Command::RemoveIntent { id, skill } => self.delete_intent(id, skill),
            Command::UpsertSlot {
                id: Some(id),
                skill,
                intent,
                update,
            } => self.set_slot(id, skill, intent, update),
            Command::UpsertSlot {
                id: None,
                skill,
                intent,
                ..
            } => {
                self.add_slot(skill, intent);
            }
            Command::RemoveSlot { id, skill, intent } => self.delete_slot(id, skill, intent),
            Command::UpsertSample {
                id: Some(id),
                skill,
                intent,
                update,
            } => self.set_sample(id, skill, intent, update),
            Command::UpsertSample {
                id: None,
                skill,
                intent,
                ..
            } => {
                self.add_sample(skill, intent);
            }
            Command::RemoveSample { id, skill, intent } => self.delete_sample(id, skill, intent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::picker::ScriptedColorPicker;

    fn store() -> AgentStore {
        AgentStore::with_color_picker(ScriptedColorPicker::first_available())
    }

    #[test]
    fn test_upsert_without_id_creates() {
        let mut store = store();
        store.apply(Command::UpsertAgent {
            id: None,
            name: "jarvis".to_string(),
            description: "assistant".to_string(),
        });
        assert_eq!(store.agents().count(), 1);
        assert_eq!(store.agent(AgentId::new(1)).unwrap().name, "jarvis");
    }

    #[test]
    fn test_upsert_with_id_updates() {
        let mut store = store();
        let id = store.add_agent("jarvis", "v1").id;
        store.apply(Command::UpsertAgent {
            id: Some(id),
            name: "jarvis".to_string(),
            description: "v2".to_string(),
        });
        assert_eq!(store.agents().count(), 1);
        assert_eq!(store.agent(id).unwrap().description, "v2");
    }

    #[test]
    fn test_upsert_with_stale_id_does_not_create() {
        let mut store = store();
        store.apply(Command::UpsertSkill {
            id: Some(SkillId::new(3)),
            name: "ghost".to_string(),
            description: String::new(),
        });
        assert_eq!(store.skills().count(), 0);
    }

    #[test]
    fn test_slot_upsert_without_id_ignores_update_fields() {
        let mut store = store();
        let skill = store.add_skill("weather", "").id;
        let intent = store.add_intent("forecast", "", skill).unwrap().id;
        store.apply(Command::UpsertSlot {
            id: None,
            skill,
            intent,
            update: SlotUpdate {
                name: Some("city".to_string()),
                entity: None,
            },
        });
        let slot = store.slot(skill, intent, SlotId::new(1)).unwrap();
        assert!(slot.name.is_empty());
    }

    #[test]
    fn test_command_round_trips_through_json() {
        let command = Command::UpsertSample {
            id: Some(SampleId::new(2)),
            skill: SkillId::new(1),
            intent: IntentId::new(1),
            update: SampleUpdate {
                text: Some("fly to paris".to_string()),
                span: Some(SpanEdit {
                    start: 7,
                    end: 12,
                    value: "paris".to_string(),
                    slot: Some(SlotId::new(1)),
                }),
            },
        };
        let json = serde_json::to_string(&command).unwrap();
        let back: Command = serde_json::from_str(&json).unwrap();
        assert_eq!(back, command);
    }
}
