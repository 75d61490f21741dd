//! Core entity structures
//!
//! Ownership follows the data model: agents reference skills by id, skills
//! embed their intents, intents embed their slots and training samples.
//! Entities form a flat lexicon referenced by slots.

use crate::{AgentId, EntityId, IntentId, SampleId, SkillId, SlotColor, SlotId};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A named conversational-agent configuration.
///
/// `skills` is an ordered reference list (order = display order), not an
/// ownership list: the skills themselves live in the top-level skill table,
/// and an id left dangling by a skill deletion stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub description: String,
    pub skills: Vec<SkillId>,
}

impl Agent {
    /// Create an agent with an empty skill list.
    pub fn new(id: AgentId, name: &str, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            skills: Vec::new(),
        }
    }
}

/// A named grouping of intents. Intents are embedded: deleting the skill
/// deletes them (and transitively their slots and samples).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub description: String,
    pub intents: Vec<Intent>,
}

impl Skill {
    /// Create a skill with no intents.
    pub fn new(id: SkillId, name: &str, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            description: description.to_string(),
            intents: Vec::new(),
        }
    }

    /// Look up an embedded intent by id.
    pub fn intent(&self, id: IntentId) -> Option<&Intent> {
        self.intents.iter().find(|intent| intent.id == id)
    }

    /// Mutable lookup of an embedded intent by id.
    pub fn intent_mut(&mut self, id: IntentId) -> Option<&mut Intent> {
        self.intents.iter_mut().find(|intent| intent.id == id)
    }
}

/// A classifiable user-goal definition owning slots and training samples.
///
/// `skill_id` is a back-reference kept in sync at creation; no operation
/// re-parents an intent, so it always names the owning skill.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Intent {
    pub id: IntentId,
    pub skill_id: SkillId,
    pub name: String,
    pub description: String,
    /// Slots keyed by id; `BTreeMap` keeps ascending-id iteration order.
    pub slots: BTreeMap<SlotId, Slot>,
    /// Training samples in insertion order.
    pub training: Vec<Sample>,
}

impl Intent {
    /// Create an intent with no slots and no training samples.
    pub fn new(id: IntentId, skill_id: SkillId, name: &str, description: &str) -> Self {
        Self {
            id,
            skill_id,
            name: name.to_string(),
            description: description.to_string(),
            slots: BTreeMap::new(),
            training: Vec::new(),
        }
    }

    /// Look up an embedded sample by id.
    pub fn sample(&self, id: SampleId) -> Option<&Sample> {
        self.training.iter().find(|sample| sample.id == id)
    }

    /// Mutable lookup of an embedded sample by id.
    pub fn sample_mut(&mut self, id: SampleId) -> Option<&mut Sample> {
        self.training.iter_mut().find(|sample| sample.id == id)
    }
}

/// A named, colored placeholder within an intent, optionally bound to an
/// entity from the lexicon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub id: SlotId,
    pub name: String,
    /// Weak reference into the entity table; `None` means unbound.
    pub entity: Option<EntityId>,
    pub color: SlotColor,
}

impl Slot {
    /// Create an unnamed, unbound slot with the given color.
    pub fn new(id: SlotId, color: SlotColor) -> Self {
        Self {
            id,
            name: String::new(),
            entity: None,
            color,
        }
    }
}

/// One training utterance with optional character-span annotations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub id: SampleId,
    pub text: String,
    /// Span annotations; a given `(start, end)` pair appears at most once.
    pub slots: Vec<SpanAnnotation>,
}

impl Sample {
    /// Create a sample with empty text and no annotations.
    pub fn new(id: SampleId) -> Self {
        Self {
            id,
            text: String::new(),
            slots: Vec::new(),
        }
    }

    /// Annotation at exactly `(start, end)`, if any.
    pub fn span_at(&self, start: usize, end: usize) -> Option<&SpanAnnotation> {
        self.slots
            .iter()
            .find(|span| span.start == start && span.end == end)
    }

    /// Mutable annotation lookup at exactly `(start, end)`.
    pub fn span_at_mut(&mut self, start: usize, end: usize) -> Option<&mut SpanAnnotation> {
        self.slots
            .iter_mut()
            .find(|span| span.start == start && span.end == end)
    }
}

/// Marks that characters `[start, end)` of a sample's text instantiate the
/// given slot with the given value. `slot` is a weak reference: the slot may
/// have been deleted since the annotation was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpanAnnotation {
    pub start: usize,
    pub end: usize,
    pub value: String,
    pub slot: SlotId,
}

/// A flat, reusable lexicon item referenced by slots. Entities have no
/// ownership relationship to any skill or intent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
}

impl Entity {
    /// Create a lexicon entity.
    pub fn new(id: EntityId, name: &str, kind: &str, content: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            kind: kind.to_string(),
            content: content.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_agent_has_no_skills() {
        let agent = Agent::new(AgentId::new(1), "jarvis", "home assistant");
        assert_eq!(agent.id, AgentId::new(1));
        assert!(agent.skills.is_empty());
    }

    #[test]
    fn test_skill_intent_lookup() {
        let mut skill = Skill::new(SkillId::new(1), "weather", "");
        skill
            .intents
            .push(Intent::new(IntentId::new(1), skill.id, "forecast", ""));
        assert!(skill.intent(IntentId::new(1)).is_some());
        assert!(skill.intent(IntentId::new(2)).is_none());
    }

    #[test]
    fn test_sample_span_lookup_is_keyed_by_start_end() {
        let mut sample = Sample::new(SampleId::new(1));
        sample.slots.push(SpanAnnotation {
            start: 3,
            end: 8,
            value: "paris".to_string(),
            slot: SlotId::new(1),
        });
        assert!(sample.span_at(3, 8).is_some());
        assert!(sample.span_at(3, 9).is_none());
        assert!(sample.span_at(4, 8).is_none());
    }

    #[test]
    fn test_entity_kind_serializes_as_type() {
        let entity = Entity::new(EntityId::new(1), "city", "list", "paris\nlondon");
        let json = serde_json::to_string(&entity).unwrap();
        assert!(json.contains("\"type\":\"list\""));
    }
}
