//! Dialect Test Utilities
//!
//! Centralized test infrastructure for the Dialect workspace:
//! - Deterministic store construction (scripted color picker)
//! - Fixture builders for the common agent → skill → intent pipeline

// Re-export the deterministic picker from its source crate
pub use dialect_store::ScriptedColorPicker;

// Re-export core types for convenience
pub use dialect_core::{
    Agent, AgentId, Entity, EntityId, Intent, IntentId, Sample, SampleId, Skill, SkillId, Slot,
    SlotColor, SlotId, SpanAnnotation,
};

use dialect_store::{AgentStore, SampleUpdate, SlotUpdate, SpanEdit};

/// A populated store plus the ids of everything the fixture created.
#[derive(Debug)]
pub struct Fixture {
    pub store: AgentStore,
    pub agent: AgentId,
    pub skill: SkillId,
    pub intent: IntentId,
    pub slot: SlotId,
    pub entity: EntityId,
    pub sample: SampleId,
}

/// Empty store with a deterministic (first-available) color picker.
pub fn deterministic_store() -> AgentStore {
    AgentStore::with_color_picker(ScriptedColorPicker::first_available())
}

/// One agent wired to one skill/intent, with a `city`-bound slot and a
/// single annotated sample ("will it rain in paris").
pub fn annotated_pipeline() -> Fixture {
    let mut store = deterministic_store();
    let agent = store.add_agent("jarvis", "home assistant").id;
    let skill = store.add_skill("weather", "forecasts and conditions").id;
    let intent = store
        .add_intent("forecast", "ask for tomorrow's weather", skill)
        .expect("skill exists")
        .id;
    store.set_agent_skills(agent, vec![skill]);

    let entity = store.add_entity("city", "list", "paris\nlondon\ntokyo").id;
    let slot = store.add_slot(skill, intent).expect("intent exists").id;
    store.set_slot(
        slot,
        skill,
        intent,
        SlotUpdate {
            name: Some("place".to_string()),
            entity: Some(entity),
        },
    );

    let sample = store.add_sample(skill, intent).expect("intent exists").id;
    store.set_sample(
        sample,
        skill,
        intent,
        SampleUpdate {
            text: Some("will it rain in paris".to_string()),
            span: Some(SpanEdit {
                start: 16,
                end: 21,
                value: "paris".to_string(),
                slot: Some(slot),
            }),
        },
    );

    // Fixtures should hand out a quiet store.
    store.drain_events();

    Fixture {
        store,
        agent,
        skill,
        intent,
        slot,
        entity,
        sample,
    }
}
