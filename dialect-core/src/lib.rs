//! Dialect Core - Entity Types
//!
//! Pure data structures for the Dialect training-dataset builder.
//! All other crates depend on this. This crate contains ONLY data types -
//! no store behavior, no compilation logic.
//!
//! # Data model
//!
//! ```text
//! Agent ──references──▶ Skill ──owns──▶ Intent ──owns──▶ Slot
//!                                          │                │
//!                                          └──owns──▶ Sample │
//!                                                       │    │
//!                                                SpanAnnotation ──▶ Slot id
//! Entity (flat lexicon) ◀──references── Slot
//! ```
//!
//! Skills are owned by a top-level table and only *referenced* by agents;
//! intents (and their slots/samples) are embedded in their skill. All
//! cross-references are weak: an id plus a lookup, where a failed lookup
//! means "absent".

mod entities;
mod error;
mod identity;
mod palette;

pub use entities::{Agent, Entity, Intent, Sample, Skill, Slot, SpanAnnotation};
pub use error::{CorpusError, DialectError, DialectResult};
pub use identity::{AgentId, CollectionId, EntityId, IntentId, SampleId, SkillId, SlotId};
pub use palette::SlotColor;
