// Pitch classes and note spelling.
//
// A `PitchClass` is one of the 12 chromatic classes under octave and
// enharmonic equivalence, stored as its chromatic index (C = 0 ... B = 11).
// The index is validated at construction, so every `PitchClass` in the
// program is in range and all arithmetic on it wraps mod 12.
//
// Spelling is a display concern only. Parsing accepts any conventional
// spelling (`C#`, `C♯`, `Db`, `D♭`, double accidentals, and the combined
// picker labels like `C#/Db`) and collapses it to the pitch class. Output
// spelling is chosen by `Spelling`, or resolved from the user's root text by
// `SpellingPolicy::MatchRoot`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::InvalidInput;

/// Sharp spellings, indexed by pitch class.
pub const SHARP_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

/// Flat spellings, indexed by pitch class.
pub const FLAT_NAMES: [&str; 12] = [
    "C", "Db", "D", "Eb", "E", "F", "Gb", "G", "Ab", "A", "Bb", "B",
];

/// Combined picker labels, indexed by pitch class.
pub const BOTH_NAMES: [&str; 12] = [
    "C", "C#/Db", "D", "D#/Eb", "E", "F", "F#/Gb", "G", "G#/Ab", "A", "A#/Bb", "B",
];

/// One of the 12 chromatic pitch classes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PitchClass(u8);

impl PitchClass {
    pub const C: PitchClass = PitchClass(0);
    pub const D: PitchClass = PitchClass(2);
    pub const E: PitchClass = PitchClass(4);
    pub const F: PitchClass = PitchClass(5);
    pub const G: PitchClass = PitchClass(7);
    pub const A: PitchClass = PitchClass(9);
    pub const B: PitchClass = PitchClass(11);

    /// All 12 pitch classes in chromatic order starting from C.
    pub const ALL: [PitchClass; 12] = [
        PitchClass(0),
        PitchClass(1),
        PitchClass(2),
        PitchClass(3),
        PitchClass(4),
        PitchClass(5),
        PitchClass(6),
        PitchClass(7),
        PitchClass(8),
        PitchClass(9),
        PitchClass(10),
        PitchClass(11),
    ];

    /// Build a pitch class from a chromatic index, rejecting anything above 11.
    pub fn new(index: u8) -> Result<Self, InvalidInput> {
        if index < 12 {
            Ok(PitchClass(index))
        } else {
            Err(InvalidInput::PitchClassOutOfRange(index))
        }
    }

    /// Build a pitch class from any semitone count, wrapping into 0-11.
    pub fn from_semitones(semitones: i32) -> Self {
        PitchClass(semitones.rem_euclid(12) as u8)
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn transpose(self, semitones: i32) -> Self {
        Self::from_semitones(self.0 as i32 + semitones)
    }

    /// Ascending interval in semitones (0-11) from `self` up to `other`.
    pub fn interval_to(self, other: PitchClass) -> u8 {
        (other.0 + 12 - self.0) % 12
    }

    /// White-key pitch classes have a single spelling.
    pub fn is_natural(self) -> bool {
        SHARP_NAMES[self.0 as usize].len() == 1
    }

    pub fn name(self, spelling: Spelling) -> &'static str {
        let table = match spelling {
            Spelling::Sharp => &SHARP_NAMES,
            Spelling::Flat => &FLAT_NAMES,
            Spelling::Both => &BOTH_NAMES,
        };
        table[self.0 as usize]
    }
}

impl TryFrom<u8> for PitchClass {
    type Error = InvalidInput;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        PitchClass::new(index)
    }
}

impl From<PitchClass> for u8 {
    fn from(pc: PitchClass) -> u8 {
        pc.0
    }
}

impl fmt::Display for PitchClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name(Spelling::Sharp))
    }
}

impl FromStr for PitchClass {
    type Err = InvalidInput;

    /// Parse a note name. A combined label (`C#/Db`) is accepted only when
    /// both halves name the same pitch class.
    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let unknown = || InvalidInput::UnknownNote(text.to_string());
        let trimmed = text.trim();
        match trimmed.split_once('/') {
            Some((first, second)) => {
                let a = parse_spelling(first.trim()).ok_or_else(unknown)?;
                let b = parse_spelling(second.trim()).ok_or_else(unknown)?;
                if a == b { Ok(a) } else { Err(unknown()) }
            }
            None => parse_spelling(trimmed).ok_or_else(unknown),
        }
    }
}

/// Parse a single spelling: a letter followed by up to two accidentals of
/// the same kind.
fn parse_spelling(text: &str) -> Option<PitchClass> {
    let mut chars = text.chars();
    let base = match chars.next()?.to_ascii_uppercase() {
        'C' => 0,
        'D' => 2,
        'E' => 4,
        'F' => 5,
        'G' => 7,
        'A' => 9,
        'B' => 11,
        _ => return None,
    };
    let mut offset: i32 = 0;
    let mut count = 0;
    for c in chars {
        let step = match c {
            '#' | '♯' => 1,
            'b' | '♭' => -1,
            _ => return None,
        };
        if offset != 0 && offset.signum() != step {
            return None;
        }
        offset += step;
        count += 1;
    }
    if count > 2 {
        return None;
    }
    Some(PitchClass::from_semitones(base + offset))
}

/// How black-key pitch classes are written in output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Spelling {
    /// `C#`, `D#`, `F#`, `G#`, `A#`.
    #[default]
    Sharp,
    /// `Db`, `Eb`, `Gb`, `Ab`, `Bb`.
    Flat,
    /// `C#/Db` and so on, the way the root-note picker labels them.
    Both,
}

/// Configured spelling choice. `MatchRoot` defers the decision until the
/// root text is known.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpellingPolicy {
    #[default]
    Sharp,
    Flat,
    Both,
    /// Flats if the root was written with a flat, the combined label if the
    /// root was a combined label, sharps otherwise.
    MatchRoot,
}

impl SpellingPolicy {
    pub fn resolve(self, root_text: &str) -> Spelling {
        match self {
            SpellingPolicy::Sharp => Spelling::Sharp,
            SpellingPolicy::Flat => Spelling::Flat,
            SpellingPolicy::Both => Spelling::Both,
            SpellingPolicy::MatchRoot => {
                let root = root_text.trim();
                if root.contains('/') {
                    Spelling::Both
                } else if root.chars().skip(1).any(|c| c == 'b' || c == '♭') {
                    Spelling::Flat
                } else {
                    Spelling::Sharp
                }
            }
        }
    }
}

impl FromStr for SpellingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sharp" | "sharps" => Ok(SpellingPolicy::Sharp),
            "flat" | "flats" => Ok(SpellingPolicy::Flat),
            "both" => Ok(SpellingPolicy::Both),
            "match-root" | "match_root" | "auto" => Ok(SpellingPolicy::MatchRoot),
            other => Err(format!(
                "unknown spelling '{other}' (expected sharp, flat, both or match-root)"
            )),
        }
    }
}
