// Scale instances.
//
// A `Scale` is derived on demand from a root pitch class and a formula: walk
// the formula's steps from the root, mod 12, keeping every note visited. The
// walk ends on the root one octave up, so a 7-step formula yields 8 entries.
// That closing root is kept in `notes()` because callers display it, and
// dropped from `degrees()` which is what chord building and membership use.
//
// `generate_scale` is the string entry point used by front ends; it parses
// both inputs and fails with `InvalidInput` instead of returning an empty
// scale.

use serde::Serialize;

use crate::error::Result;
use crate::formula::ScaleFormula;
use crate::pitch::{PitchClass, Spelling};

/// An ordered scale, root first, closing on the root an octave up.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Scale {
    root: PitchClass,
    formula: ScaleFormula,
    notes: Vec<PitchClass>,
}

impl Scale {
    pub fn new(root: PitchClass, formula: ScaleFormula) -> Self {
        let steps = formula.steps();
        let mut notes = Vec::with_capacity(steps.len() + 1);
        notes.push(root);
        let mut current = root;
        for &step in steps {
            current = current.transpose(step as i32);
            notes.push(current);
        }
        Scale {
            root,
            formula,
            notes,
        }
    }

    pub fn root(&self) -> PitchClass {
        self.root
    }

    pub fn formula(&self) -> ScaleFormula {
        self.formula
    }

    /// Every entry including the closing octave root.
    pub fn notes(&self) -> &[PitchClass] {
        &self.notes
    }

    /// The distinct scale degrees, without the closing octave root.
    pub fn degrees(&self) -> &[PitchClass] {
        &self.notes[..self.notes.len() - 1]
    }

    pub fn degree_count(&self) -> usize {
        self.notes.len() - 1
    }

    pub fn contains(&self, pc: PitchClass) -> bool {
        self.degrees().contains(&pc)
    }

    pub fn is_root(&self, pc: PitchClass) -> bool {
        pc == self.root
    }

    /// Zero-based scale degree of a pitch class, or None if it is not in
    /// the scale.
    pub fn degree_of(&self, pc: PitchClass) -> Option<usize> {
        self.degrees().iter().position(|&note| note == pc)
    }

    /// Membership as a boolean array indexed by pitch class.
    pub fn pitch_class_set(&self) -> [bool; 12] {
        let mut set = [false; 12];
        for pc in self.degrees() {
            set[pc.index() as usize] = true;
        }
        set
    }

    pub fn names(&self, spelling: Spelling) -> Vec<&'static str> {
        self.notes.iter().map(|pc| pc.name(spelling)).collect()
    }
}

/// Parse a root note and a formula name and build the scale.
pub fn generate_scale(root: &str, formula: &str) -> Result<Scale> {
    let root: PitchClass = root.parse()?;
    let formula: ScaleFormula = formula.parse()?;
    Ok(Scale::new(root, formula))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InvalidInput, TheoryError};

    #[test]
    fn test_c_major() {
        let scale = generate_scale("C", "Major").unwrap();
        assert_eq!(
            scale.names(Spelling::Sharp),
            vec!["C", "D", "E", "F", "G", "A", "B", "C"]
        );
        assert_eq!(scale.degree_count(), 7);
    }

    #[test]
    fn test_length_is_steps_plus_one() {
        for formula in ScaleFormula::ALL {
            for root in PitchClass::ALL {
                let scale = Scale::new(root, formula);
                assert_eq!(scale.notes().len(), formula.steps().len() + 1);
                assert_eq!(scale.notes().first(), Some(&root));
                assert_eq!(scale.notes().last(), Some(&root));
            }
        }
    }

    #[test]
    fn test_a_minor_pentatonic() {
        let scale = generate_scale("A", "Minor Pentatonic").unwrap();
        assert_eq!(
            scale.names(Spelling::Sharp),
            vec!["A", "C", "D", "E", "G", "A"]
        );
    }

    #[test]
    fn test_flat_spelling() {
        let scale = generate_scale("F", "Major").unwrap();
        assert_eq!(
            scale.names(Spelling::Flat),
            vec!["F", "G", "A", "Bb", "C", "D", "E", "F"]
        );
    }

    #[test]
    fn test_enharmonic_roots_agree() {
        let sharp = generate_scale("C#", "Major").unwrap();
        let flat = generate_scale("Db", "Major").unwrap();
        assert_eq!(sharp.notes(), flat.notes());
        assert_eq!(sharp.names(Spelling::Sharp)[1], "D#");
        assert_eq!(flat.names(Spelling::Flat)[1], "Eb");
    }

    #[test]
    fn test_invalid_root_and_formula() {
        let err = generate_scale("H", "Major").unwrap_err();
        assert!(err.is_invalid_input());
        assert_eq!(
            err,
            TheoryError::InvalidInput(InvalidInput::UnknownNote("H".to_string()))
        );
        let err = generate_scale("C", "Nonexistent").unwrap_err();
        assert_eq!(
            err,
            TheoryError::InvalidInput(InvalidInput::UnknownFormula("Nonexistent".to_string()))
        );
    }

    #[test]
    fn test_membership_and_degrees() {
        let scale = Scale::new(PitchClass::D, ScaleFormula::Dorian);
        assert!(scale.contains(PitchClass::F));
        assert!(!scale.contains(PitchClass::new(6).unwrap()));
        assert_eq!(scale.degree_of(PitchClass::A), Some(4));
        assert_eq!(scale.degree_of(PitchClass::new(3).unwrap()), None);
        assert!(scale.is_root(PitchClass::D));
        let set = scale.pitch_class_set();
        assert_eq!(set.iter().filter(|&&b| b).count(), 7);
        assert!(set[0]); // C
        assert!(!set[1]); // C#
    }
}
