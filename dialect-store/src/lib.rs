//! Dialect Store - Hierarchical In-Memory Store
//!
//! Owns the authoritative tree of agents, skills, intents, slots and
//! training samples, plus the flat entity lexicon, and keeps it internally
//! consistent under arbitrary insert/update/delete sequences.
//!
//! # Failure policy
//!
//! Every lookup that fails resolves to a silent no-op, never an error. The
//! editor may dispatch a stale edit after a concurrent delete; the store
//! treats that as a benign race rather than a programming error. Absorbed
//! edits are logged at `debug` level.
//!
//! # Concurrency
//!
//! The store is an owned, exclusively-mutated aggregate: mutations take
//! `&mut self`, reads take `&self`, nothing suspends or re-enters. A caller
//! that needs cross-thread access wraps the whole store in one exclusive
//! lock; there is no finer-grained locking.
//!
//! # Change notification
//!
//! Instead of implicit property observation, each applied mutation appends
//! a [`StoreEvent`] that the presentation layer drains explicitly via
//! [`AgentStore::drain_events`].

pub mod command;
pub mod event;
pub mod picker;
mod store;

pub use command::{Command, SampleUpdate, SlotUpdate, SpanEdit};
pub use event::{ChangeKind, StoreEvent};
pub use picker::{ColorPicker, RandomColorPicker, ScriptedColorPicker};
pub use store::{AgentStore, StoreData};

// Re-export core types for convenience
pub use dialect_core::{
    Agent, AgentId, Entity, EntityId, Intent, IntentId, Sample, SampleId, Skill, SkillId, Slot,
    SlotColor, SlotId, SpanAnnotation,
};
