//! End-to-end tests over the store → compiler pipeline
//!
//! Drives the fixture store the way the editor would (edits, deletions,
//! stale edits) and checks what the compiled corpus looks like afterwards.

use dialect_corpus::{compile_training_corpus, rasa::RasaNluData};
use dialect_store::{SampleUpdate, SpanEdit};
use dialect_test_utils::{annotated_pipeline, AgentId, SlotId};

#[test]
fn annotated_fixture_compiles_to_one_labeled_example() {
    let fixture = annotated_pipeline();
    let corpus = compile_training_corpus(&fixture.store, fixture.agent);

    assert_eq!(corpus.examples.len(), 1);
    let example = &corpus.examples[0];
    assert_eq!(example.text, "will it rain in paris");
    assert_eq!(example.intent_name, "forecast");
    assert_eq!(example.entities.len(), 1);
    let span = &example.entities[0];
    assert_eq!((span.start, span.end), (16, 21));
    assert_eq!(span.value, "paris");
    assert_eq!(span.entity_name.as_deref(), Some("city"));
}

#[test]
fn deleting_the_slot_degrades_to_unnamed_entity_spans() {
    let mut fixture = annotated_pipeline();
    fixture
        .store
        .delete_slot(fixture.slot, fixture.skill, fixture.intent);

    let corpus = compile_training_corpus(&fixture.store, fixture.agent);
    let example = &corpus.examples[0];
    assert_eq!(example.entities.len(), 1);
    assert!(example.entities[0].entity_name.is_none());
}

#[test]
fn deleting_the_skill_empties_the_corpus_without_failing() {
    let mut fixture = annotated_pipeline();
    fixture.store.delete_skill(fixture.skill);

    let corpus = compile_training_corpus(&fixture.store, fixture.agent);
    assert!(corpus.examples.is_empty());
}

#[test]
fn stale_edits_do_not_change_the_compiled_corpus() {
    let mut fixture = annotated_pipeline();
    let before = compile_training_corpus(&fixture.store, fixture.agent);

    fixture.store.set_agent(AgentId::new(77), "ghost", "");
    fixture.store.set_sample(
        fixture.sample,
        fixture.skill,
        fixture.intent,
        SampleUpdate {
            // Empty text preserves; the span edit targets a key that does
            // not exist, so removal is a no-op.
            text: Some(String::new()),
            span: Some(SpanEdit {
                start: 0,
                end: 1,
                value: String::new(),
                slot: None,
            }),
        },
    );

    let after = compile_training_corpus(&fixture.store, fixture.agent);
    assert_eq!(before, after);
}

#[test]
fn second_annotation_on_same_sample_stays_in_one_example() {
    let mut fixture = annotated_pipeline();
    fixture.store.set_sample(
        fixture.sample,
        fixture.skill,
        fixture.intent,
        SampleUpdate {
            text: None,
            span: Some(SpanEdit {
                start: 8,
                end: 12,
                value: "rain".to_string(),
                slot: Some(SlotId::new(9)),
            }),
        },
    );

    let corpus = compile_training_corpus(&fixture.store, fixture.agent);
    assert_eq!(corpus.examples.len(), 1);
    assert_eq!(corpus.examples[0].entities.len(), 2);
}

#[test]
fn rasa_export_carries_the_fixture_example() {
    let fixture = annotated_pipeline();
    let corpus = compile_training_corpus(&fixture.store, fixture.agent);
    let envelope = RasaNluData::from(corpus);

    let example = &envelope.rasa_nlu_data.common_examples[0];
    assert_eq!(example.intent, "forecast");
    assert_eq!(example.entities[0].entity, "city");
}
