// Harmonia music-theory engine.
//
// Given a root note and a scale formula name, derives the ordered scale
// notes, the diatonic triads stacked on each degree, and each triad's
// quality. The same output feeds the scale explorer, the circle-of-fifths
// overlay and fretboard highlighting, so those note computations live here
// too. Nothing in this crate does I/O apart from `TheoryConfig::load`.
//
// Architecture:
// - pitch.rs: `PitchClass` (0-11), note-name parsing, spelling policies
// - formula.rs: the closed `ScaleFormula` table, compile-time octave check
// - scale.rs: `Scale` instances and `generate_scale`
// - chord.rs: triad quality, Roman numerals, `build_chords` + `ChordPolicy`
// - engine.rs: `generate_scale_with_chords`, `Engine`, `ScaleReport`
// - circle.rs: circle-of-fifths order, key signatures, `CircleView`
// - fretboard.rs: tunings and fretboard note grids
// - config.rs: JSON-loadable `TheoryConfig`
// - error.rs: `TheoryError` (`InvalidInput` / `UnsupportedFormula`)
//
// All operations are pure and deterministic; every public type is plain
// data and safe to share across threads.

pub mod chord;
pub mod circle;
pub mod config;
pub mod engine;
pub mod error;
pub mod formula;
pub mod fretboard;
pub mod pitch;
pub mod scale;

pub use chord::{ChordPolicy, ChordQuality, DiatonicChord, build_chords, chord_quality};
pub use config::TheoryConfig;
pub use engine::{Engine, ScaleReport, generate_scale_with_chords};
pub use error::{InvalidInput, TheoryError};
pub use formula::ScaleFormula;
pub use pitch::{PitchClass, Spelling, SpellingPolicy};
pub use scale::{Scale, generate_scale};
