//! Slot color palette
//!
//! Slots carry one of a fixed palette of 9 colors so the editor can render
//! span highlights. A color must stay unique among sibling slots of the same
//! intent while unused palette entries remain; once the palette is
//! exhausted, reuse is permitted.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the 9 palette colors assignable to a slot.
///
/// Serialized as the hex string the presentation layer consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotColor {
    #[serde(rename = "#F44336")]
    Red,
    #[serde(rename = "#E91E63")]
    Pink,
    #[serde(rename = "#9C27B0")]
    Purple,
    #[serde(rename = "#673AB7")]
    DeepPurple,
    #[serde(rename = "#3F51B5")]
    Indigo,
    #[serde(rename = "#009688")]
    Teal,
    #[serde(rename = "#795548")]
    Brown,
    #[serde(rename = "#607D8B")]
    BlueGrey,
    #[serde(rename = "#000000")]
    Black,
}

impl SlotColor {
    /// The full palette, in canonical order.
    pub const PALETTE: [SlotColor; 9] = [
        SlotColor::Red,
        SlotColor::Pink,
        SlotColor::Purple,
        SlotColor::DeepPurple,
        SlotColor::Indigo,
        SlotColor::Teal,
        SlotColor::Brown,
        SlotColor::BlueGrey,
        SlotColor::Black,
    ];

    /// Hex representation, e.g. `#F44336`.
    pub const fn hex(self) -> &'static str {
        match self {
            SlotColor::Red => "#F44336",
            SlotColor::Pink => "#E91E63",
            SlotColor::Purple => "#9C27B0",
            SlotColor::DeepPurple => "#673AB7",
            SlotColor::Indigo => "#3F51B5",
            SlotColor::Teal => "#009688",
            SlotColor::Brown => "#795548",
            SlotColor::BlueGrey => "#607D8B",
            SlotColor::Black => "#000000",
        }
    }
}

impl fmt::Display for SlotColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.hex())
    }
}
