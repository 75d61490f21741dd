//! Dialect Corpus - Training Corpus Compiler
//!
//! Flattens one agent's tree into a backend-agnostic training corpus: a
//! list of labeled examples with character-span entity annotations. The
//! compiler only reads the store; it never mutates and never fails. Any
//! branch that no longer resolves (a skill id left dangling in the agent's
//! list, a span whose slot or entity was deleted) contributes nothing
//! rather than erroring, in line with the store's weak-reference model.
//!
//! # Walk order
//!
//! agent → skills (in the agent's list order) → intents (in skill order) →
//! samples (in training order). Each sample emits exactly one example
//! carrying all of its span annotations as parallel entity spans; see
//! DESIGN.md for why no per-entity duplication scheme exists.

use dialect_core::{AgentId, DialectResult, Intent, Sample, SlotId};
use dialect_store::AgentStore;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ============================================================================
// WIRE TYPES
// ============================================================================

/// One entity span of an example, in the training-backend wire shape.
///
/// `entityName` is the name of the entity the annotated slot is bound to,
/// resolved at compile time; it is absent when the slot was deleted, is
/// unbound, or references a deleted entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityAnnotation {
    pub start: usize,
    pub end: usize,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
}

/// One labeled training example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Example {
    pub text: String,
    pub intent_name: String,
    pub entities: Vec<EntityAnnotation>,
}

/// The flattened, backend-ready corpus for one agent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    pub examples: Vec<Example>,
}

impl Corpus {
    /// Serialize the corpus to its JSON wire form.
    pub fn to_json(&self) -> DialectResult<String> {
        Ok(serde_json::to_string(self).map_err(dialect_core::CorpusError::from)?)
    }
}

// ============================================================================
// COMPILATION
// ============================================================================

/// Compile the training corpus for one agent.
///
/// An unknown agent id yields an empty corpus; skill ids that no longer
/// resolve are skipped.
pub fn compile_training_corpus(store: &AgentStore, agent: AgentId) -> Corpus {
    let Some(agent) = store.agent(agent) else {
        debug!(%agent, "compile skipped: unknown agent");
        return Corpus::default();
    };
    let mut examples = Vec::new();
    for &skill_id in &agent.skills {
        let Some(skill) = store.skill(skill_id) else {
            debug!(%skill_id, "compile skipped dangling skill reference");
            continue;
        };
        for intent in &skill.intents {
            for sample in &intent.training {
                examples.push(compile_sample(store, intent, sample));
            }
        }
    }
    Corpus { examples }
}

fn compile_sample(store: &AgentStore, intent: &Intent, sample: &Sample) -> Example {
    let entities = sample
        .slots
        .iter()
        .map(|span| EntityAnnotation {
            start: span.start,
            end: span.end,
            value: span.value.clone(),
            entity_name: resolve_entity_name(store, intent, span.slot),
        })
        .collect();
    Example {
        text: sample.text.replace('\n', ""),
        intent_name: intent.name.clone(),
        entities,
    }
}

/// Follow span → slot → entity, treating any broken link as absent.
fn resolve_entity_name(store: &AgentStore, intent: &Intent, slot: SlotId) -> Option<String> {
    let slot = intent.slots.get(&slot)?;
    let entity = store.entity(slot.entity?)?;
    Some(entity.name.clone())
}

// ============================================================================
// RASA NLU ENVELOPE
// ============================================================================

/// Rasa NLU export format, the envelope the training backend historically
/// consumed. The backend-agnostic [`Corpus`] stays primary; this wrapper
/// exists for backends that still speak `rasa_nlu_data`.
pub mod rasa {
    use super::Corpus;
    use dialect_core::DialectResult;
    use serde::{Deserialize, Serialize};

    /// Top-level `rasa_nlu_data` document.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RasaNluData {
        pub rasa_nlu_data: RasaNluPayload,
    }

    /// Payload arrays; regex features and synonyms are always exported
    /// empty, as upstream produced them.
    #[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RasaNluPayload {
        pub common_examples: Vec<RasaExample>,
        pub regex_features: Vec<serde_json::Value>,
        pub entity_synonyms: Vec<serde_json::Value>,
    }

    /// One common example in Rasa's shape.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RasaExample {
        pub text: String,
        pub intent: String,
        pub entities: Vec<RasaEntity>,
    }

    /// One entity span in Rasa's shape; an unresolvable entity name becomes
    /// the empty string.
    #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
    pub struct RasaEntity {
        pub start: usize,
        pub end: usize,
        pub value: String,
        pub entity: String,
    }

    impl RasaNluData {
        /// Serialize the envelope to its JSON wire form.
        pub fn to_json(&self) -> DialectResult<String> {
            Ok(serde_json::to_string(self).map_err(dialect_core::CorpusError::from)?)
        }
    }

    impl From<Corpus> for RasaNluData {
        fn from(corpus: Corpus) -> Self {
            let common_examples = corpus
                .examples
                .into_iter()
                .map(|example| RasaExample {
                    text: example.text,
                    intent: example.intent_name,
                    entities: example
                        .entities
                        .into_iter()
                        .map(|span| RasaEntity {
                            start: span.start,
                            end: span.end,
                            value: span.value,
                            entity: span.entity_name.unwrap_or_default(),
                        })
                        .collect(),
                })
                .collect();
            Self {
                rasa_nlu_data: RasaNluPayload {
                    common_examples,
                    regex_features: Vec::new(),
                    entity_synonyms: Vec::new(),
                },
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use dialect_core::{IntentId, SkillId};
    use dialect_store::{SampleUpdate, ScriptedColorPicker, SpanEdit};
    use proptest::prelude::*;

    fn arb_span_key() -> impl Strategy<Value = (usize, usize)> {
        (0usize..16, 1usize..8).prop_map(|(start, len)| (start, start + len))
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// Multi-annotation policy: however many annotations a sample
        /// carries, it compiles to exactly one example holding one entity
        /// span per unique (start, end) key. No duplication scheme exists.
        #[test]
        fn prop_one_example_per_sample_with_all_spans(
            keys in prop::collection::hash_set(arb_span_key(), 0..12),
        ) {
            let mut store = AgentStore::with_color_picker(ScriptedColorPicker::first_available());
            let agent = store.add_agent("a", "").id;
            let skill = store.add_skill("s", "").id;
            let intent = store.add_intent("i", "", skill).unwrap().id;
            store.set_agent_skills(agent, vec![skill]);
            let sample = store.add_sample(skill, intent).unwrap().id;
            for &(start, end) in &keys {
                store.set_sample(sample, skill, intent, SampleUpdate {
                    text: Some("does not matter here".to_string()),
                    span: Some(SpanEdit {
                        start,
                        end,
                        value: "v".to_string(),
                        slot: Some(dialect_core::SlotId::new(1)),
                    }),
                });
            }

            let corpus = compile_training_corpus(&store, agent);
            prop_assert_eq!(corpus.examples.len(), 1);
            prop_assert_eq!(corpus.examples[0].entities.len(), keys.len());
        }

        /// Compilation is a pure read: compiling twice yields equal corpora
        /// and leaves the tree untouched.
        #[test]
        fn prop_compilation_is_pure(sample_count in 0usize..6) {
            let mut store = AgentStore::with_color_picker(ScriptedColorPicker::first_available());
            let agent = store.add_agent("a", "").id;
            let skill = store.add_skill("s", "").id;
            let intent: IntentId = store.add_intent("i", "", skill).unwrap().id;
            store.set_agent_skills(agent, vec![skill, SkillId::new(99)]);
            for _ in 0..sample_count {
                store.add_sample(skill, intent);
            }
            let before = store.data().clone();

            let first = compile_training_corpus(&store, agent);
            let second = compile_training_corpus(&store, agent);
            prop_assert_eq!(&first, &second);
            prop_assert_eq!(first.examples.len(), sample_count);
            prop_assert_eq!(store.data(), &before);
        }
    }
}
