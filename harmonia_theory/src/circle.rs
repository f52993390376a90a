// Circle of fifths ordering.
//
// The circle is the 12 pitch classes reached by repeatedly climbing a
// perfect fifth (7 semitones) from C. Position on the circle gives the key
// signature of the major key: positions 1-6 clockwise add sharps, positions
// 7-11 are read counter-clockwise as flats. F#/Gb sits at the bottom and is
// reported as six sharps.
//
// `CircleView` pairs each position with scale membership flags, the data the
// wheel renderer needs to colour segments. No geometry lives here.

use serde::{Deserialize, Serialize};

use crate::pitch::PitchClass;
use crate::scale::Scale;

const FIFTH: i32 = 7;

/// The 12 pitch classes in circle-of-fifths order starting from C.
pub fn circle_of_fifths() -> [PitchClass; 12] {
    let mut circle = [PitchClass::C; 12];
    for (i, slot) in circle.iter_mut().enumerate() {
        *slot = PitchClass::C.transpose(FIFTH * i as i32);
    }
    circle
}

/// Clockwise position of a pitch class on the circle (C = 0, G = 1, ...).
pub fn circle_position(pc: PitchClass) -> usize {
    // 7 is its own inverse mod 12, so position = pc * 7 mod 12.
    (pc.index() as usize * FIFTH as usize) % 12
}

pub fn relative_minor(major_root: PitchClass) -> PitchClass {
    major_root.transpose(9)
}

pub fn relative_major(minor_root: PitchClass) -> PitchClass {
    minor_root.transpose(3)
}

/// Key signature of a major key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeySignature {
    Natural,
    Sharps(u8),
    Flats(u8),
}

impl KeySignature {
    pub fn of_major(root: PitchClass) -> Self {
        match circle_position(root) {
            0 => KeySignature::Natural,
            p @ 1..=6 => KeySignature::Sharps(p as u8),
            p => KeySignature::Flats((12 - p) as u8),
        }
    }

    /// Key signature of a natural minor key, via its relative major.
    pub fn of_minor(root: PitchClass) -> Self {
        KeySignature::of_major(relative_major(root))
    }

    pub fn accidental_count(self) -> u8 {
        match self {
            KeySignature::Natural => 0,
            KeySignature::Sharps(n) | KeySignature::Flats(n) => n,
        }
    }
}

/// One circle position with its scale flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CircleSegment {
    pub position: usize,
    pub pitch_class: PitchClass,
    pub in_scale: bool,
    pub is_root: bool,
}

/// The whole circle laid against one scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CircleView {
    pub segments: Vec<CircleSegment>,
}

impl CircleView {
    pub fn new(scale: &Scale) -> Self {
        let segments = circle_of_fifths()
            .into_iter()
            .enumerate()
            .map(|(position, pitch_class)| CircleSegment {
                position,
                pitch_class,
                in_scale: scale.contains(pitch_class),
                is_root: scale.is_root(pitch_class),
            })
            .collect();
        CircleView { segments }
    }

    pub fn root_segment(&self) -> Option<&CircleSegment> {
        self.segments.iter().find(|segment| segment.is_root)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &CircleSegment> {
        self.segments.iter().filter(|segment| segment.in_scale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ScaleFormula;
    use crate::pitch::Spelling;

    #[test]
    fn test_circle_order() {
        let names: Vec<&str> = circle_of_fifths()
            .iter()
            .map(|pc| pc.name(Spelling::Sharp))
            .collect();
        assert_eq!(
            names,
            vec!["C", "G", "D", "A", "E", "B", "F#", "C#", "G#", "D#", "A#", "F"]
        );
    }

    #[test]
    fn test_position_inverts_the_circle() {
        for (i, pc) in circle_of_fifths().into_iter().enumerate() {
            assert_eq!(circle_position(pc), i);
        }
    }

    #[test]
    fn test_key_signatures() {
        assert_eq!(KeySignature::of_major(PitchClass::C), KeySignature::Natural);
        assert_eq!(KeySignature::of_major(PitchClass::G), KeySignature::Sharps(1));
        assert_eq!(KeySignature::of_major(PitchClass::E), KeySignature::Sharps(4));
        assert_eq!(KeySignature::of_major(PitchClass::F), KeySignature::Flats(1));
        let b_flat = "Bb".parse().unwrap();
        assert_eq!(KeySignature::of_major(b_flat), KeySignature::Flats(2));
        let f_sharp = "F#".parse().unwrap();
        assert_eq!(KeySignature::of_major(f_sharp), KeySignature::Sharps(6));
        assert_eq!(KeySignature::of_minor(PitchClass::A), KeySignature::Natural);
        assert_eq!(KeySignature::of_minor(PitchClass::D).accidental_count(), 1);
    }

    #[test]
    fn test_relative_keys() {
        assert_eq!(relative_minor(PitchClass::C), PitchClass::A);
        assert_eq!(relative_major(PitchClass::E), PitchClass::G);
    }

    #[test]
    fn test_major_scale_is_contiguous_on_the_circle() {
        let scale = Scale::new(PitchClass::G, ScaleFormula::Major);
        let view = CircleView::new(&scale);
        let positions: Vec<usize> = view.highlighted().map(|s| s.position).collect();
        // G major is C through F#, one fifth clockwise of C major's block.
        assert_eq!(positions, vec![0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(view.root_segment().map(|s| s.pitch_class), Some(PitchClass::G));
    }

    #[test]
    fn test_f_major_wraps_around_the_top() {
        let scale = Scale::new(PitchClass::F, ScaleFormula::Major);
        let view = CircleView::new(&scale);
        let positions: Vec<usize> = view.highlighted().map(|s| s.position).collect();
        // Same block as C major with Bb in place of B.
        assert_eq!(positions, vec![0, 1, 2, 3, 4, 10, 11]);
        assert_eq!(view.root_segment().map(|s| s.position), Some(11));
    }
}
