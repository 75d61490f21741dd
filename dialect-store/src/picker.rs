//! Slot color selection
//!
//! New slots get a color drawn from the palette entries not yet used by
//! sibling slots (or from the whole palette once it is exhausted). The
//! drawing strategy sits behind [`ColorPicker`] so tests can inject a
//! deterministic source; production uses uniform randomness.

use dialect_core::SlotColor;
use rand::Rng;
use std::fmt;

/// Strategy for choosing a slot color from the currently available set.
///
/// `available` is never empty: when every palette entry is taken by a
/// sibling slot, the store passes the full palette instead.
pub trait ColorPicker: fmt::Debug + Send {
    fn pick(&mut self, available: &[SlotColor]) -> SlotColor;
}

/// Production picker: uniform random choice from the available set.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomColorPicker;

impl ColorPicker for RandomColorPicker {
    fn pick(&mut self, available: &[SlotColor]) -> SlotColor {
        let mut rng = rand::rng();
        available[rng.random_range(0..available.len())]
    }
}

/// Deterministic picker for tests: follows a scripted index sequence, then
/// falls back to the first available color once the script runs out.
#[derive(Debug, Clone, Default)]
pub struct ScriptedColorPicker {
    script: Vec<usize>,
    cursor: usize,
}

impl ScriptedColorPicker {
    /// Picker that always takes the first available color.
    pub fn first_available() -> Self {
        Self::default()
    }

    /// Picker that follows `script` (indices into the available set, taken
    /// modulo its length) before falling back to the first available color.
    pub fn new(script: Vec<usize>) -> Self {
        Self { script, cursor: 0 }
    }
}

impl ColorPicker for ScriptedColorPicker {
    fn pick(&mut self, available: &[SlotColor]) -> SlotColor {
        let index = self.script.get(self.cursor).copied().unwrap_or(0);
        self.cursor += 1;
        available[index % available.len()]
    }
}
