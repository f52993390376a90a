// Error types for the theory engine.
//
// Two failure kinds reach callers of the engine: `InvalidInput` (a note,
// formula, index or fretboard parameter the engine does not recognise) and
// `UnsupportedFormula` (chord building requested for a formula whose note
// count the active `ChordPolicy` does not serve). Nothing is ever reported as
// an empty result instead of an error.
//
// Config-file failures have their own `ConfigError` in `config.rs`, which
// wraps `TheoryError` for values that parse but are out of range.

use crate::formula::ScaleFormula;
use crate::fretboard::{MAX_FRETS, MAX_STRINGS};

/// Top-level error returned by every fallible engine operation.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum TheoryError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),
    #[error("chords are only built for 7-note formulas; {formula} has {note_count} notes")]
    UnsupportedFormula {
        formula: ScaleFormula,
        note_count: usize,
    },
}

impl TheoryError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, TheoryError::InvalidInput(_))
    }

    pub fn is_unsupported_formula(&self) -> bool {
        matches!(self, TheoryError::UnsupportedFormula { .. })
    }
}

/// The specific reason an input was rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidInput {
    #[error("unrecognised note name {0:?}")]
    UnknownNote(String),
    #[error("unknown scale formula {0:?}")]
    UnknownFormula(String),
    #[error("pitch class index {0} is outside 0-11")]
    PitchClassOutOfRange(u8),
    #[error("a scale needs at least 2 entries to build chords, got {0}")]
    ScaleTooShort(usize),
    #[error("fret count {0} is outside 1-{max}", max = MAX_FRETS)]
    FretCountOutOfRange(u8),
    #[error("tuning has {0} strings, expected 1-{max}", max = MAX_STRINGS)]
    StringCountOutOfRange(usize),
}

pub type Result<T> = std::result::Result<T, TheoryError>;
