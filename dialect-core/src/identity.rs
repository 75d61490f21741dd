//! Identity types for Dialect entities
//!
//! Every identifier is a positive integer unique within its containing
//! collection, allocated by the store (never supplied by callers at
//! creation). Ids are not globally unique over a collection's lifetime:
//! deleting the highest-numbered entry lets the next insert reuse that id.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Common interface over the per-collection id newtypes.
///
/// Lets generic code (id allocation in the store, proptest generators)
/// work across collections without caring which id kind it holds.
pub trait CollectionId: Copy + Ord {
    /// Wrap a raw id value.
    fn from_raw(raw: u32) -> Self;
    /// Raw integer value.
    fn raw(self) -> u32;
}

macro_rules! collection_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Wrap a raw id value.
            pub const fn new(raw: u32) -> Self {
                Self(raw)
            }

            /// Raw integer value.
            pub const fn get(self) -> u32 {
                self.0
            }
        }

        impl CollectionId for $name {
            fn from_raw(raw: u32) -> Self {
                Self(raw)
            }

            fn raw(self) -> u32 {
                self.0
            }
        }

        impl From<u32> for $name {
            fn from(raw: u32) -> Self {
                Self(raw)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }
    };
}

collection_id!(
    /// Identifier of an agent in the top-level agent table.
    AgentId
);
collection_id!(
    /// Identifier of a skill in the top-level skill table.
    SkillId
);
collection_id!(
    /// Identifier of an entity in the flat lexicon table.
    EntityId
);
collection_id!(
    /// Identifier of an intent, unique among the intents of one skill.
    IntentId
);
collection_id!(
    /// Identifier of a slot, unique among the slots of one intent.
    SlotId
);
collection_id!(
    /// Identifier of a training sample, unique among the samples of one intent.
    SampleId
);
