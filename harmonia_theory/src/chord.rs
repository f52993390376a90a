// Triad qualities and diatonic chord building.
//
// A triad's quality is read off two intervals above its root: the third and
// the fifth. Only the four tertian shapes are named; anything else is
// `Unknown` rather than the nearest match.
//
// Diatonic chords are stacked by skipping a degree twice: degree i, i+2,
// i+4, wrapping within the distinct degrees of the scale. That rule is only
// meaningful for 7-note scales. `ChordPolicy::Heptatonic` (the default)
// refuses other note counts with `UnsupportedFormula`; `ChordPolicy::Uniform`
// applies the same stacking to every formula, so pentatonic and blues scales
// still get one (often `Unknown`) triad per degree.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{InvalidInput, Result, TheoryError};
use crate::pitch::{PitchClass, Spelling};
use crate::scale::Scale;

const ROMAN_NUMERALS: [&str; 7] = ["I", "II", "III", "IV", "V", "VI", "VII"];

/// Triad quality by interval structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChordQuality {
    Major,
    Minor,
    Diminished,
    Augmented,
    Unknown,
}

impl ChordQuality {
    /// Classify from the semitone intervals root→third and root→fifth.
    pub fn from_intervals(third: u8, fifth: u8) -> Self {
        match (third, fifth) {
            (4, 7) => ChordQuality::Major,
            (3, 7) => ChordQuality::Minor,
            (3, 6) => ChordQuality::Diminished,
            (4, 8) => ChordQuality::Augmented,
            _ => ChordQuality::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChordQuality::Major => "Major",
            ChordQuality::Minor => "Minor",
            ChordQuality::Diminished => "Diminished",
            ChordQuality::Augmented => "Augmented",
            ChordQuality::Unknown => "Unknown",
        }
    }

    /// Minor and diminished triads take lower-case numerals, all others upper.
    fn upper_case_numeral(self) -> bool {
        matches!(
            self,
            ChordQuality::Major | ChordQuality::Augmented | ChordQuality::Unknown
        )
    }

    fn numeral_suffix(self) -> &'static str {
        match self {
            ChordQuality::Diminished => "°",
            ChordQuality::Augmented => "+",
            ChordQuality::Unknown => "?",
            ChordQuality::Major | ChordQuality::Minor => "",
        }
    }
}

impl fmt::Display for ChordQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Quality of the triad (root, third, fifth).
pub fn chord_quality(root: PitchClass, third: PitchClass, fifth: PitchClass) -> ChordQuality {
    ChordQuality::from_intervals(root.interval_to(third), root.interval_to(fifth))
}

/// Quality of a triad given as raw chromatic indices. Fails with
/// `InvalidInput` if any index is above 11.
pub fn chord_quality_from_indices(root: u8, third: u8, fifth: u8) -> Result<ChordQuality> {
    Ok(chord_quality(
        PitchClass::new(root)?,
        PitchClass::new(third)?,
        PitchClass::new(fifth)?,
    ))
}

/// Three pitch classes stacked from a root.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Triad {
    pub root: PitchClass,
    pub third: PitchClass,
    pub fifth: PitchClass,
}

impl Triad {
    pub fn quality(&self) -> ChordQuality {
        chord_quality(self.root, self.third, self.fifth)
    }

    pub fn notes(&self) -> [PitchClass; 3] {
        [self.root, self.third, self.fifth]
    }
}

/// A triad built on one scale degree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DiatonicChord {
    /// 1-based scale degree of the chord root.
    pub degree: usize,
    pub triad: Triad,
    pub quality: ChordQuality,
}

impl DiatonicChord {
    pub fn root(&self) -> PitchClass {
        self.triad.root
    }

    /// Roman-numeral label: `I`, `ii`, `vii°`, `III+`.
    pub fn numeral(&self) -> String {
        let base = match ROMAN_NUMERALS.get(self.degree.wrapping_sub(1)) {
            Some(numeral) => numeral.to_string(),
            None => self.degree.to_string(),
        };
        let cased = if self.quality.upper_case_numeral() {
            base
        } else {
            base.to_lowercase()
        };
        format!("{cased}{}", self.quality.numeral_suffix())
    }

    /// Display label such as `"C Major"`.
    pub fn label(&self, spelling: Spelling) -> String {
        format!("{} {}", self.root().name(spelling), self.quality)
    }
}

/// Which formulas chord building accepts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChordPolicy {
    /// Only 7-note formulas; others fail with `UnsupportedFormula`.
    #[default]
    Heptatonic,
    /// Stack triads on every formula regardless of note count.
    Uniform,
}

impl FromStr for ChordPolicy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "heptatonic" | "diatonic" => Ok(ChordPolicy::Heptatonic),
            "uniform" | "all" => Ok(ChordPolicy::Uniform),
            other => Err(format!(
                "unknown chord policy '{other}' (expected heptatonic or uniform)"
            )),
        }
    }
}

/// Stack a triad on every distinct degree of a scale sequence.
///
/// `notes` is a scale as produced by `Scale::notes`, including the closing
/// octave root. Degree i takes degrees (i+2) and (i+4) modulo the number of
/// distinct degrees as its third and fifth.
pub fn stack_triads(notes: &[PitchClass]) -> Result<Vec<DiatonicChord>> {
    if notes.len() < 2 {
        return Err(InvalidInput::ScaleTooShort(notes.len()).into());
    }
    let degrees = notes.len() - 1;
    let chords = (0..degrees)
        .map(|i| {
            let triad = Triad {
                root: notes[i],
                third: notes[(i + 2) % degrees],
                fifth: notes[(i + 4) % degrees],
            };
            DiatonicChord {
                degree: i + 1,
                triad,
                quality: triad.quality(),
            }
        })
        .collect();
    Ok(chords)
}

/// Build the diatonic chords of a scale under the given policy.
pub fn build_chords(scale: &Scale, policy: ChordPolicy) -> Result<Vec<DiatonicChord>> {
    let formula = scale.formula();
    if policy == ChordPolicy::Heptatonic && !formula.is_heptatonic() {
        return Err(TheoryError::UnsupportedFormula {
            formula,
            note_count: formula.note_count(),
        });
    }
    stack_triads(scale.notes())
}
