// Scale formula table.
//
// Every scale the engine knows is a `ScaleFormula` variant mapped to an
// ordered list of semitone steps. The set is closed: an unknown name is
// rejected when it is parsed, never discovered later as a missing table
// entry.
//
// Invariant: the steps of every formula sum to 12 (one octave). The `const`
// block below checks this at compile time.
//
// Names match the labels of the scale picker ("Dorian ♭2", "Blues (Minor)").
// Parsing is case-insensitive, treats `b`/`♭` and `#`/`♯` as the same, and
// also accepts the church-mode names `ionian` and `aeolian`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Grouping used when listing formulas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormulaFamily {
    DiatonicMode,
    Pentatonic,
    Blues,
    Harmonic,
    Melodic,
    MelodicMinorMode,
    Exotic,
}

impl FormulaFamily {
    pub const ALL: [FormulaFamily; 7] = [
        FormulaFamily::DiatonicMode,
        FormulaFamily::Pentatonic,
        FormulaFamily::Blues,
        FormulaFamily::Harmonic,
        FormulaFamily::Melodic,
        FormulaFamily::MelodicMinorMode,
        FormulaFamily::Exotic,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FormulaFamily::DiatonicMode => "Diatonic Modes",
            FormulaFamily::Pentatonic => "Pentatonic",
            FormulaFamily::Blues => "Blues",
            FormulaFamily::Harmonic => "Harmonic",
            FormulaFamily::Melodic => "Melodic",
            FormulaFamily::MelodicMinorMode => "Melodic Minor Modes",
            FormulaFamily::Exotic => "Exotic / World",
        }
    }
}

/// A named scale formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScaleFormula {
    Major,
    Minor,
    Dorian,
    Phrygian,
    Lydian,
    Mixolydian,
    Locrian,
    MajorPentatonic,
    MinorPentatonic,
    BluesMinor,
    BluesMajor,
    HarmonicMinor,
    HarmonicMajor,
    MelodicMinor,
    DorianFlat2,
    LydianAugmented,
    LydianDominant,
    MixolydianFlat6,
    LocrianSharp2,
    Altered,
    HungarianMinor,
    DoubleHarmonicMajor,
    NeapolitanMinor,
    NeapolitanMajor,
    PhrygianDominant,
    Enigmatic,
}

impl ScaleFormula {
    /// Every formula, in picker order.
    pub const ALL: [ScaleFormula; 26] = [
        ScaleFormula::Major,
        ScaleFormula::Minor,
        ScaleFormula::Dorian,
        ScaleFormula::Phrygian,
        ScaleFormula::Lydian,
        ScaleFormula::Mixolydian,
        ScaleFormula::Locrian,
        ScaleFormula::MajorPentatonic,
        ScaleFormula::MinorPentatonic,
        ScaleFormula::BluesMinor,
        ScaleFormula::BluesMajor,
        ScaleFormula::HarmonicMinor,
        ScaleFormula::HarmonicMajor,
        ScaleFormula::MelodicMinor,
        ScaleFormula::DorianFlat2,
        ScaleFormula::LydianAugmented,
        ScaleFormula::LydianDominant,
        ScaleFormula::MixolydianFlat6,
        ScaleFormula::LocrianSharp2,
        ScaleFormula::Altered,
        ScaleFormula::HungarianMinor,
        ScaleFormula::DoubleHarmonicMajor,
        ScaleFormula::NeapolitanMinor,
        ScaleFormula::NeapolitanMajor,
        ScaleFormula::PhrygianDominant,
        ScaleFormula::Enigmatic,
    ];

    /// Semitone steps between successive scale notes, ending back on the root.
    pub const fn steps(self) -> &'static [u8] {
        match self {
            ScaleFormula::Major => &[2, 2, 1, 2, 2, 2, 1],
            ScaleFormula::Minor => &[2, 1, 2, 2, 1, 2, 2],
            ScaleFormula::Dorian => &[2, 1, 2, 2, 2, 1, 2],
            ScaleFormula::Phrygian => &[1, 2, 2, 2, 1, 2, 2],
            ScaleFormula::Lydian => &[2, 2, 2, 1, 2, 2, 1],
            ScaleFormula::Mixolydian => &[2, 2, 1, 2, 2, 1, 2],
            ScaleFormula::Locrian => &[1, 2, 2, 1, 2, 2, 2],
            ScaleFormula::MajorPentatonic => &[2, 2, 3, 2, 3],
            ScaleFormula::MinorPentatonic => &[3, 2, 2, 3, 2],
            ScaleFormula::BluesMinor => &[3, 2, 1, 1, 3, 2],
            ScaleFormula::BluesMajor => &[2, 1, 1, 3, 2, 3],
            ScaleFormula::HarmonicMinor => &[2, 1, 2, 2, 1, 3, 1],
            ScaleFormula::HarmonicMajor => &[2, 2, 1, 2, 1, 3, 1],
            ScaleFormula::MelodicMinor => &[2, 1, 2, 2, 2, 2, 1],
            ScaleFormula::DorianFlat2 => &[1, 2, 2, 2, 2, 1, 2],
            ScaleFormula::LydianAugmented => &[2, 2, 2, 2, 1, 2, 1],
            ScaleFormula::LydianDominant => &[2, 2, 2, 1, 2, 1, 2],
            ScaleFormula::MixolydianFlat6 => &[2, 2, 1, 2, 1, 2, 2],
            ScaleFormula::LocrianSharp2 => &[2, 1, 2, 1, 2, 2, 2],
            ScaleFormula::Altered => &[1, 2, 1, 2, 2, 2, 2],
            ScaleFormula::HungarianMinor => &[2, 1, 3, 1, 1, 3, 1],
            ScaleFormula::DoubleHarmonicMajor => &[1, 3, 1, 2, 1, 3, 1],
            ScaleFormula::NeapolitanMinor => &[1, 2, 2, 2, 1, 3, 1],
            ScaleFormula::NeapolitanMajor => &[1, 2, 2, 2, 2, 2, 1],
            ScaleFormula::PhrygianDominant => &[1, 3, 1, 2, 1, 2, 2],
            ScaleFormula::Enigmatic => &[1, 3, 2, 2, 2, 1, 1],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ScaleFormula::Major => "Major",
            ScaleFormula::Minor => "Minor",
            ScaleFormula::Dorian => "Dorian",
            ScaleFormula::Phrygian => "Phrygian",
            ScaleFormula::Lydian => "Lydian",
            ScaleFormula::Mixolydian => "Mixolydian",
            ScaleFormula::Locrian => "Locrian",
            ScaleFormula::MajorPentatonic => "Major Pentatonic",
            ScaleFormula::MinorPentatonic => "Minor Pentatonic",
            ScaleFormula::BluesMinor => "Blues (Minor)",
            ScaleFormula::BluesMajor => "Blues (Major)",
            ScaleFormula::HarmonicMinor => "Harmonic Minor",
            ScaleFormula::HarmonicMajor => "Harmonic Major",
            ScaleFormula::MelodicMinor => "Melodic Minor (Asc)",
            ScaleFormula::DorianFlat2 => "Dorian ♭2",
            ScaleFormula::LydianAugmented => "Lydian Augmented",
            ScaleFormula::LydianDominant => "Lydian Dominant",
            ScaleFormula::MixolydianFlat6 => "Mixolydian ♭6",
            ScaleFormula::LocrianSharp2 => "Locrian ♯2",
            ScaleFormula::Altered => "Altered Scale",
            ScaleFormula::HungarianMinor => "Hungarian Minor",
            ScaleFormula::DoubleHarmonicMajor => "Double Harmonic Major",
            ScaleFormula::NeapolitanMinor => "Neapolitan Minor",
            ScaleFormula::NeapolitanMajor => "Neapolitan Major",
            ScaleFormula::PhrygianDominant => "Phrygian Dominant",
            ScaleFormula::Enigmatic => "Enigmatic",
        }
    }

    pub fn family(self) -> FormulaFamily {
        match self {
            ScaleFormula::Major
            | ScaleFormula::Minor
            | ScaleFormula::Dorian
            | ScaleFormula::Phrygian
            | ScaleFormula::Lydian
            | ScaleFormula::Mixolydian
            | ScaleFormula::Locrian => FormulaFamily::DiatonicMode,
            ScaleFormula::MajorPentatonic | ScaleFormula::MinorPentatonic => {
                FormulaFamily::Pentatonic
            }
            ScaleFormula::BluesMinor | ScaleFormula::BluesMajor => FormulaFamily::Blues,
            ScaleFormula::HarmonicMinor | ScaleFormula::HarmonicMajor => FormulaFamily::Harmonic,
            ScaleFormula::MelodicMinor => FormulaFamily::Melodic,
            ScaleFormula::DorianFlat2
            | ScaleFormula::LydianAugmented
            | ScaleFormula::LydianDominant
            | ScaleFormula::MixolydianFlat6
            | ScaleFormula::LocrianSharp2
            | ScaleFormula::Altered => FormulaFamily::MelodicMinorMode,
            ScaleFormula::HungarianMinor
            | ScaleFormula::DoubleHarmonicMajor
            | ScaleFormula::NeapolitanMinor
            | ScaleFormula::NeapolitanMajor
            | ScaleFormula::PhrygianDominant
            | ScaleFormula::Enigmatic => FormulaFamily::Exotic,
        }
    }

    /// Number of distinct notes in the scale (equal to the step count).
    pub fn note_count(self) -> usize {
        self.steps().len()
    }

    pub fn is_heptatonic(self) -> bool {
        self.note_count() == 7
    }

    /// Semitone offsets of each distinct scale degree from the root,
    /// starting at 0.
    pub fn intervals(self) -> Vec<u8> {
        self.steps()
            .iter()
            .scan(0u8, |offset, &step| {
                let current = *offset;
                *offset += step;
                Some(current)
            })
            .collect()
    }

    pub fn in_family(family: FormulaFamily) -> impl Iterator<Item = ScaleFormula> {
        ScaleFormula::ALL
            .into_iter()
            .filter(move |formula| formula.family() == family)
    }
}

const fn step_sum(steps: &[u8]) -> u32 {
    let mut total = 0;
    let mut i = 0;
    while i < steps.len() {
        total += steps[i] as u32;
        i += 1;
    }
    total
}

const _: () = {
    let mut i = 0;
    while i < ScaleFormula::ALL.len() {
        assert!(
            step_sum(ScaleFormula::ALL[i].steps()) == 12,
            "scale formula steps must sum to one octave"
        );
        i += 1;
    }
};

impl fmt::Display for ScaleFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Lower-case, unify accidental glyphs and collapse runs of whitespace.
fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            word.chars()
                .map(|c| match c {
                    '♭' => 'b',
                    '♯' => '#',
                    c => c.to_ascii_lowercase(),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

impl FromStr for ScaleFormula {
    type Err = InvalidInput;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(text);
        let alias = match wanted.as_str() {
            "ionian" => Some(ScaleFormula::Major),
            "aeolian" | "natural minor" => Some(ScaleFormula::Minor),
            "melodic minor" => Some(ScaleFormula::MelodicMinor),
            "altered" => Some(ScaleFormula::Altered),
            _ => None,
        };
        alias
            .or_else(|| {
                ScaleFormula::ALL
                    .into_iter()
                    .find(|formula| normalize_name(formula.name()) == wanted)
            })
            .ok_or_else(|| InvalidInput::UnknownFormula(text.to_string()))
    }
}
