// Fretboard note grids.
//
// A fretboard is a tuning (open-string pitch classes, string 1 = highest)
// plus a fret count. Each (string, fret) cell sounds `open + fret` mod 12.
// Laying a scale over it marks every cell whose pitch class is a scale
// degree, and separately the cells holding the root.
//
// Only notes are computed here. Where cells land on screen is the renderer's
// business.

use serde::Serialize;

use crate::error::{InvalidInput, Result};
use crate::pitch::PitchClass;
use crate::scale::Scale;

/// Highest fret count a `Fretboard` accepts.
pub const MAX_FRETS: u8 = 24;

/// Most strings a `Tuning` accepts.
pub const MAX_STRINGS: usize = 12;

pub const DEFAULT_FRETS: u8 = 12;

/// Open-string pitch classes, ordered from string 1 (highest) down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tuning {
    strings: Vec<PitchClass>,
}

impl Tuning {
    pub fn new(strings: Vec<PitchClass>) -> Result<Self> {
        if strings.is_empty() || strings.len() > MAX_STRINGS {
            return Err(InvalidInput::StringCountOutOfRange(strings.len()).into());
        }
        Ok(Tuning { strings })
    }

    /// Parse open-string note names, string 1 first.
    pub fn parse<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        let strings = names
            .iter()
            .map(|name| name.as_ref().parse::<PitchClass>())
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Tuning::new(strings)
    }

    /// Standard six-string guitar: E B G D A E.
    pub fn standard() -> Self {
        Tuning {
            strings: vec![
                PitchClass::E,
                PitchClass::B,
                PitchClass::G,
                PitchClass::D,
                PitchClass::A,
                PitchClass::E,
            ],
        }
    }

    /// Drop D: standard with the lowest string tuned down to D.
    pub fn drop_d() -> Self {
        let mut tuning = Tuning::standard();
        tuning.strings[5] = PitchClass::D;
        tuning
    }

    /// Four-string bass: G D A E.
    pub fn bass() -> Self {
        Tuning {
            strings: vec![PitchClass::G, PitchClass::D, PitchClass::A, PitchClass::E],
        }
    }

    /// Look up a named preset (`standard`, `drop-d`, `bass`).
    pub fn preset(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "standard" => Some(Tuning::standard()),
            "drop-d" | "drop_d" | "dropd" => Some(Tuning::drop_d()),
            "bass" => Some(Tuning::bass()),
            _ => None,
        }
    }

    pub fn strings(&self) -> &[PitchClass] {
        &self.strings
    }
}

impl Default for Tuning {
    fn default() -> Self {
        Tuning::standard()
    }
}

/// Pitch class sounding at `fret` on a string tuned to `open`.
pub fn note_at_fret(open: PitchClass, fret: u8) -> PitchClass {
    open.transpose(fret as i32)
}

/// One cell of the fretboard with its scale flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FretPosition {
    /// 1-based string number, 1 = highest string.
    pub string: usize,
    /// 0 = open string.
    pub fret: u8,
    pub pitch_class: PitchClass,
    pub in_scale: bool,
    pub is_root: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fretboard {
    tuning: Tuning,
    frets: u8,
}

impl Fretboard {
    pub fn new(tuning: Tuning, frets: u8) -> Result<Self> {
        if frets == 0 || frets > MAX_FRETS {
            return Err(InvalidInput::FretCountOutOfRange(frets).into());
        }
        Ok(Fretboard { tuning, frets })
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn frets(&self) -> u8 {
        self.frets
    }

    /// Pitch class at a 1-based string and fret, or None off the board.
    pub fn note_at(&self, string: usize, fret: u8) -> Option<PitchClass> {
        if fret > self.frets {
            return None;
        }
        let open = *self.tuning.strings.get(string.checked_sub(1)?)?;
        Some(note_at_fret(open, fret))
    }

    /// Every cell, string-major then fret-ascending, flagged against `scale`.
    pub fn positions(&self, scale: &Scale) -> Vec<FretPosition> {
        let set = scale.pitch_class_set();
        self.tuning
            .strings
            .iter()
            .enumerate()
            .flat_map(|(i, &open)| {
                (0..=self.frets).map(move |fret| {
                    let pitch_class = note_at_fret(open, fret);
                    FretPosition {
                        string: i + 1,
                        fret,
                        pitch_class,
                        in_scale: set[pitch_class.index() as usize],
                        is_root: scale.is_root(pitch_class),
                    }
                })
            })
            .collect()
    }

    /// Only the cells whose note belongs to `scale`.
    pub fn scale_positions(&self, scale: &Scale) -> Vec<FretPosition> {
        self.positions(scale)
            .into_iter()
            .filter(|position| position.in_scale)
            .collect()
    }
}

impl Default for Fretboard {
    fn default() -> Self {
        Fretboard {
            tuning: Tuning::standard(),
            frets: DEFAULT_FRETS,
        }
    }
}
