//! The authoritative in-memory tree and its mutations
//!
//! Mutation semantics, in one place:
//! - ids are monotonic-next-free within each collection (1 if empty, else
//!   max + 1), so deleting the highest-numbered entry lets the next insert
//!   reuse that id;
//! - every failed lookup is a silent no-op (stale edits from the editor are
//!   benign races, not errors);
//! - deletion never chases weak references: removing a skill leaves its id
//!   in agents' skill lists, removing a slot leaves span annotations that
//!   name it. Consumers resolve and treat "not found" as absent.

use crate::command::{SampleUpdate, SlotUpdate};
use crate::event::{ChangeKind, StoreEvent};
use crate::picker::{ColorPicker, RandomColorPicker};
use dialect_core::{
    Agent, AgentId, CollectionId, Entity, EntityId, Intent, IntentId, Sample, SampleId, Skill,
    SkillId, Slot, SlotColor, SlotId, SpanAnnotation,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

/// Next free id for a map-shaped collection: 1 if empty, else max key + 1.
fn next_map_id<K: CollectionId, V>(map: &BTreeMap<K, V>) -> K {
    K::from_raw(map.keys().next_back().map_or(0, |key| key.raw()) + 1)
}

/// Next free id for a sequence-shaped collection, from the ids it holds.
fn next_seq_id<I: CollectionId>(ids: impl Iterator<Item = I>) -> I {
    I::from_raw(ids.map(CollectionId::raw).max().unwrap_or(0) + 1)
}

/// The serializable tree: top-level agent, skill and entity tables.
///
/// This is the persistence and snapshot boundary; it carries no behavior
/// beyond lookups, so it can be deep-compared, cloned and shipped whole.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreData {
    pub agents: BTreeMap<AgentId, Agent>,
    pub skills: BTreeMap<SkillId, Skill>,
    pub entities: BTreeMap<EntityId, Entity>,
}

impl StoreData {
    /// Resolve an intent by `(skill, id)`.
    pub fn intent(&self, skill: SkillId, id: IntentId) -> Option<&Intent> {
        self.skills.get(&skill)?.intent(id)
    }

    fn intent_mut(&mut self, skill: SkillId, id: IntentId) -> Option<&mut Intent> {
        self.skills.get_mut(&skill)?.intent_mut(id)
    }

    /// Resolve a slot by `(skill, intent, id)`.
    pub fn slot(&self, skill: SkillId, intent: IntentId, id: SlotId) -> Option<&Slot> {
        self.intent(skill, intent)?.slots.get(&id)
    }

    fn slot_mut(&mut self, skill: SkillId, intent: IntentId, id: SlotId) -> Option<&mut Slot> {
        self.intent_mut(skill, intent)?.slots.get_mut(&id)
    }

    /// Resolve a sample by `(skill, intent, id)`.
    pub fn sample(&self, skill: SkillId, intent: IntentId, id: SampleId) -> Option<&Sample> {
        self.intent(skill, intent)?.sample(id)
    }

    fn sample_mut(&mut self, skill: SkillId, intent: IntentId, id: SampleId) -> Option<&mut Sample> {
        self.intent_mut(skill, intent)?.sample_mut(id)
    }
}

/// The hierarchical store: one exclusively-owned mutable aggregate.
///
/// All mutations run to completion synchronously; the event log records
/// each applied change for the presentation layer to drain.
#[derive(Debug)]
pub struct AgentStore {
    data: StoreData,
    picker: Box<dyn ColorPicker>,
    events: Vec<StoreEvent>,
}

impl Default for AgentStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentStore {
    /// Empty store with the production (uniform random) color picker.
    pub fn new() -> Self {
        Self::with_color_picker(RandomColorPicker)
    }

    /// Empty store with an injected color picker.
    pub fn with_color_picker(picker: impl ColorPicker + 'static) -> Self {
        Self {
            data: StoreData::default(),
            picker: Box::new(picker),
            events: Vec::new(),
        }
    }

    /// Rehydrate a store from a previously exported snapshot.
    pub fn from_data(data: StoreData) -> Self {
        Self {
            data,
            picker: Box::new(RandomColorPicker),
            events: Vec::new(),
        }
    }

    /// The whole tree, for snapshotting, persistence or deep comparison.
    pub fn data(&self) -> &StoreData {
        &self.data
    }

    /// Drain the accumulated change events, oldest first.
    pub fn drain_events(&mut self) -> Vec<StoreEvent> {
        std::mem::take(&mut self.events)
    }

    // ========================================================================
    // GETTERS
    // ========================================================================

    /// All agents, in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.data.agents.values()
    }

    /// All skills, in ascending id order.
    pub fn skills(&self) -> impl Iterator<Item = &Skill> {
        self.data.skills.values()
    }

    /// All lexicon entities, in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.data.entities.values()
    }

    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.data.agents.get(&id)
    }

    pub fn skill(&self, id: SkillId) -> Option<&Skill> {
        self.data.skills.get(&id)
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.data.entities.get(&id)
    }

    pub fn intent(&self, skill: SkillId, id: IntentId) -> Option<&Intent> {
        self.data.intent(skill, id)
    }

    pub fn slot(&self, skill: SkillId, intent: IntentId, id: SlotId) -> Option<&Slot> {
        self.data.slot(skill, intent, id)
    }

    pub fn sample(&self, skill: SkillId, intent: IntentId, id: SampleId) -> Option<&Sample> {
        self.data.sample(skill, intent, id)
    }

    // ========================================================================
    // AGENTS
    // ========================================================================

    /// Create an agent with an empty skill list and the next free id.
    pub fn add_agent(&mut self, name: &str, description: &str) -> &Agent {
        let id = next_map_id(&self.data.agents);
        trace!(%id, name, "agent added");
        self.events.push(StoreEvent::Agent {
            kind: ChangeKind::Added,
            id,
        });
        self.data
            .agents
            .entry(id)
            .or_insert_with(|| Agent::new(id, name, description))
    }

    /// Replace an agent's name and description. No-op on unknown id.
    pub fn set_agent(&mut self, id: AgentId, name: &str, description: &str) {
        let Some(agent) = self.data.agents.get_mut(&id) else {
            debug!(%id, "set_agent ignored: unknown agent");
            return;
        };
        agent.name = name.to_string();
        agent.description = description.to_string();
        self.events.push(StoreEvent::Agent {
            kind: ChangeKind::Updated,
            id,
        });
    }

    /// Replace an agent's skill-reference list wholesale.
    ///
    /// The referenced skill ids are trusted, not existence-checked; they are
    /// weak references resolved at read time.
    pub fn set_agent_skills(&mut self, id: AgentId, skills: Vec<SkillId>) {
        let Some(agent) = self.data.agents.get_mut(&id) else {
            debug!(%id, "set_agent_skills ignored: unknown agent");
            return;
        };
        agent.skills = skills;
        self.events.push(StoreEvent::Agent {
            kind: ChangeKind::Updated,
            id,
        });
    }

    /// Remove an agent. The skills it referenced are untouched.
    pub fn delete_agent(&mut self, id: AgentId) {
        if self.data.agents.remove(&id).is_none() {
            debug!(%id, "delete_agent ignored: unknown agent");
            return;
        }
        trace!(%id, "agent removed");
        self.events.push(StoreEvent::Agent {
            kind: ChangeKind::Removed,
            id,
        });
    }

    // ========================================================================
    // ENTITIES
    // ========================================================================

    /// Create a lexicon entity with the next free id.
    pub fn add_entity(&mut self, name: &str, kind: &str, content: &str) -> &Entity {
        let id = next_map_id(&self.data.entities);
        trace!(%id, name, "entity added");
        self.events.push(StoreEvent::Entity {
            kind: ChangeKind::Added,
            id,
        });
        self.data
            .entities
            .entry(id)
            .or_insert_with(|| Entity::new(id, name, kind, content))
    }

    /// Replace an entity's fields. No-op on unknown id.
    pub fn set_entity(&mut self, id: EntityId, name: &str, kind: &str, content: &str) {
        let Some(entity) = self.data.entities.get_mut(&id) else {
            debug!(%id, "set_entity ignored: unknown entity");
            return;
        };
        entity.name = name.to_string();
        entity.kind = kind.to_string();
        entity.content = content.to_string();
        self.events.push(StoreEvent::Entity {
            kind: ChangeKind::Updated,
            id,
        });
    }

    /// Remove a lexicon entity. Slots bound to it keep their dangling
    /// reference and resolve to "absent" from then on.
    pub fn delete_entity(&mut self, id: EntityId) {
        if self.data.entities.remove(&id).is_none() {
            debug!(%id, "delete_entity ignored: unknown entity");
            return;
        }
        self.events.push(StoreEvent::Entity {
            kind: ChangeKind::Removed,
            id,
        });
    }

    // ========================================================================
    // SKILLS
    // ========================================================================

    /// Create a skill with no intents and the next free id.
    pub fn add_skill(&mut self, name: &str, description: &str) -> &Skill {
        let id = next_map_id(&self.data.skills);
        trace!(%id, name, "skill added");
        self.events.push(StoreEvent::Skill {
            kind: ChangeKind::Added,
            id,
        });
        self.data
            .skills
            .entry(id)
            .or_insert_with(|| Skill::new(id, name, description))
    }

    /// Replace a skill's name and description. No-op on unknown id.
    pub fn set_skill(&mut self, id: SkillId, name: &str, description: &str) {
        let Some(skill) = self.data.skills.get_mut(&id) else {
            debug!(%id, "set_skill ignored: unknown skill");
            return;
        };
        skill.name = name.to_string();
        skill.description = description.to_string();
        self.events.push(StoreEvent::Skill {
            kind: ChangeKind::Updated,
            id,
        });
    }

    /// Remove a skill and everything it embeds (intents, their slots and
    /// samples). Agents referencing the skill are not scanned; their lists
    /// keep the now-dangling id.
    pub fn delete_skill(&mut self, id: SkillId) {
        if self.data.skills.remove(&id).is_none() {
            debug!(%id, "delete_skill ignored: unknown skill");
            return;
        }
        trace!(%id, "skill removed");
        self.events.push(StoreEvent::Skill {
            kind: ChangeKind::Removed,
            id,
        });
    }

    // ========================================================================
    // INTENTS
    // ========================================================================

    /// Append an intent to a skill, with an id allocated from that skill's
    /// intents only (not globally). No-op on unknown skill.
    pub fn add_intent(&mut self, name: &str, description: &str, skill: SkillId) -> Option<&Intent> {
        let Some(skill_ref) = self.data.skills.get_mut(&skill) else {
            debug!(%skill, "add_intent ignored: unknown skill");
            return None;
        };
        let id = next_seq_id(skill_ref.intents.iter().map(|intent| intent.id));
        trace!(%skill, %id, name, "intent added");
        self.events.push(StoreEvent::Intent {
            kind: ChangeKind::Added,
            skill,
            id,
        });
        skill_ref
            .intents
            .push(Intent::new(id, skill, name, description));
        skill_ref.intents.last()
    }

    /// Replace an intent's name and description, resolving by
    /// `(skill, id)`. No-op if the pair does not resolve.
    pub fn set_intent(&mut self, id: IntentId, skill: SkillId, name: &str, description: &str) {
        let Some(intent) = self.data.intent_mut(skill, id) else {
            debug!(%skill, %id, "set_intent ignored: unknown intent");
            return;
        };
        intent.name = name.to_string();
        intent.description = description.to_string();
        self.events.push(StoreEvent::Intent {
            kind: ChangeKind::Updated,
            skill,
            id,
        });
    }

    /// Remove the intent matching `(skill, id)` from its skill.
    pub fn delete_intent(&mut self, id: IntentId, skill: SkillId) {
        let Some(skill_ref) = self.data.skills.get_mut(&skill) else {
            debug!(%skill, %id, "delete_intent ignored: unknown skill");
            return;
        };
        let Some(index) = skill_ref.intents.iter().position(|intent| intent.id == id) else {
            debug!(%skill, %id, "delete_intent ignored: unknown intent");
            return;
        };
        skill_ref.intents.remove(index);
        self.events.push(StoreEvent::Intent {
            kind: ChangeKind::Removed,
            skill,
            id,
        });
    }

    // ========================================================================
    // SLOTS
    // ========================================================================

    /// Add an empty, unbound slot to an intent, colored from the palette
    /// entries its sibling slots have not taken (whole palette once
    /// exhausted). No-op on an unresolved `(skill, intent)` pair.
    pub fn add_slot(&mut self, skill: SkillId, intent: IntentId) -> Option<&Slot> {
        let Some(intent_ref) = self.data.intent_mut(skill, intent) else {
            debug!(%skill, %intent, "add_slot ignored: unknown intent");
            return None;
        };
        let id = next_map_id(&intent_ref.slots);
        let taken: Vec<SlotColor> = intent_ref.slots.values().map(|slot| slot.color).collect();
        let available: Vec<SlotColor> = SlotColor::PALETTE
            .iter()
            .copied()
            .filter(|color| !taken.contains(color))
            .collect();
        let color = if available.is_empty() {
            self.picker.pick(&SlotColor::PALETTE)
        } else {
            self.picker.pick(&available)
        };
        trace!(%skill, %intent, %id, %color, "slot added");
        self.events.push(StoreEvent::Slot {
            kind: ChangeKind::Added,
            skill,
            intent,
            id,
        });
        Some(
            intent_ref
                .slots
                .entry(id)
                .or_insert_with(|| Slot::new(id, color)),
        )
    }

    /// Partially update a slot: each field is replaced only when the update
    /// carries a non-empty value, otherwise preserved. There is no
    /// clear-to-empty. No-op if `(skill, intent, id)` does not resolve.
    pub fn set_slot(&mut self, id: SlotId, skill: SkillId, intent: IntentId, update: SlotUpdate) {
        let Some(slot) = self.data.slot_mut(skill, intent, id) else {
            debug!(%skill, %intent, %id, "set_slot ignored: unknown slot");
            return;
        };
        if let Some(name) = update.name.filter(|name| !name.is_empty()) {
            slot.name = name;
        }
        if let Some(entity) = update.entity {
            slot.entity = Some(entity);
        }
        self.events.push(StoreEvent::Slot {
            kind: ChangeKind::Updated,
            skill,
            intent,
            id,
        });
    }

    /// Remove a slot from its intent. Span annotations referencing it are
    /// not pruned; they dangle and resolve to "absent" at compile time.
    pub fn delete_slot(&mut self, id: SlotId, skill: SkillId, intent: IntentId) {
        let Some(intent_ref) = self.data.intent_mut(skill, intent) else {
            debug!(%skill, %intent, %id, "delete_slot ignored: unknown intent");
            return;
        };
        if intent_ref.slots.remove(&id).is_none() {
            debug!(%skill, %intent, %id, "delete_slot ignored: unknown slot");
            return;
        }
        self.events.push(StoreEvent::Slot {
            kind: ChangeKind::Removed,
            skill,
            intent,
            id,
        });
    }

    // ========================================================================
    // SAMPLES
    // ========================================================================

    /// Append an empty sample to an intent, with an id allocated from that
    /// intent's samples only. No-op on an unresolved `(skill, intent)` pair.
    pub fn add_sample(&mut self, skill: SkillId, intent: IntentId) -> Option<&Sample> {
        let Some(intent_ref) = self.data.intent_mut(skill, intent) else {
            debug!(%skill, %intent, "add_sample ignored: unknown intent");
            return None;
        };
        let id = next_seq_id(intent_ref.training.iter().map(|sample| sample.id));
        trace!(%skill, %intent, %id, "sample added");
        self.events.push(StoreEvent::Sample {
            kind: ChangeKind::Added,
            skill,
            intent,
            id,
        });
        intent_ref.training.push(Sample::new(id));
        intent_ref.training.last()
    }

    /// Partially update a sample.
    ///
    /// A non-empty `text` replaces the sample text (empty preserves, same
    /// rule as [`set_slot`](Self::set_slot)). A `span` edit upserts into the
    /// annotation set keyed by `(start, end)`: with a slot reference it
    /// overwrites the annotation at that key in place (last write wins) or
    /// appends a new one; without a slot reference it removes the annotation
    /// at that key. No-op if `(skill, intent, id)` does not resolve.
    pub fn set_sample(
        &mut self,
        id: SampleId,
        skill: SkillId,
        intent: IntentId,
        update: SampleUpdate,
    ) {
        let Some(sample) = self.data.sample_mut(skill, intent, id) else {
            debug!(%skill, %intent, %id, "set_sample ignored: unknown sample");
            return;
        };
        if let Some(text) = update.text.filter(|text| !text.is_empty()) {
            sample.text = text;
        }
        if let Some(edit) = update.span {
            match edit.slot {
                None => {
                    if let Some(index) = sample
                        .slots
                        .iter()
                        .position(|span| span.start == edit.start && span.end == edit.end)
                    {
                        sample.slots.remove(index);
                    }
                }
                Some(slot) => {
                    if let Some(existing) = sample.span_at_mut(edit.start, edit.end) {
                        existing.value = edit.value;
                        existing.slot = slot;
                    } else {
                        sample.slots.push(SpanAnnotation {
                            start: edit.start,
                            end: edit.end,
                            value: edit.value,
                            slot,
                        });
                    }
                }
            }
        }
        self.events.push(StoreEvent::Sample {
            kind: ChangeKind::Updated,
            skill,
            intent,
            id,
        });
    }

    /// Remove the sample matching `(skill, intent, id)`.
    pub fn delete_sample(&mut self, id: SampleId, skill: SkillId, intent: IntentId) {
        let Some(intent_ref) = self.data.intent_mut(skill, intent) else {
            debug!(%skill, %intent, %id, "delete_sample ignored: unknown intent");
            return;
        };
        let Some(index) = intent_ref
            .training
            .iter()
            .position(|sample| sample.id == id)
        else {
            debug!(%skill, %intent, %id, "delete_sample ignored: unknown sample");
            return;
        };
        intent_ref.training.remove(index);
        self.events.push(StoreEvent::Sample {
            kind: ChangeKind::Removed,
            skill,
            intent,
            id,
        });
    }
}

// ============================================================================
// TESTS
// ============================================================================
