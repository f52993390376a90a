// End-to-end tests for the scale/chord pipeline.
//
// These go through the public string entry points only, the same calls a
// front end makes, and check the properties callers rely on: determinism,
// scale length, closure over the 12 pitch classes, and the concrete C major
// results.

use harmonia_theory::chord::chord_quality_from_indices;
use harmonia_theory::{
    ChordPolicy, ChordQuality, Engine, PitchClass, ScaleFormula, Spelling, TheoryConfig,
    TheoryError, generate_scale, generate_scale_with_chords,
};

/// Every root spelling a picker might send.
const ROOTS: [&str; 17] = [
    "C", "C#", "Db", "D", "D#", "Eb", "E", "F", "F#", "Gb", "G", "G#", "Ab", "A", "A#", "Bb", "B",
];

fn uniform_engine() -> Engine {
    Engine::new(TheoryConfig {
        chord_policy: ChordPolicy::Uniform,
        ..TheoryConfig::default()
    })
}

#[test]
fn repeated_calls_are_identical() {
    let engine = uniform_engine();
    for root in ROOTS {
        for formula in ScaleFormula::ALL {
            let first = engine.generate(root, formula.name()).unwrap();
            let second = engine.generate(root, formula.name()).unwrap();
            assert_eq!(first, second, "{root} {formula}");
        }
    }
}

#[test]
fn scale_length_is_step_count_plus_one() {
    for root in ROOTS {
        for formula in ScaleFormula::ALL {
            let scale = generate_scale(root, formula.name()).unwrap();
            assert_eq!(scale.notes().len(), formula.steps().len() + 1);
        }
    }
}

#[test]
fn scale_notes_are_chromatic_pitch_classes() {
    for root in ROOTS {
        for formula in ScaleFormula::ALL {
            let scale = generate_scale(root, formula.name()).unwrap();
            assert!(scale.notes().iter().all(|pc| pc.index() < 12));
            assert!(
                scale
                    .notes()
                    .iter()
                    .all(|pc| PitchClass::ALL.contains(pc))
            );
        }
    }
}

#[test]
fn c_major_scale() {
    let scale = generate_scale("C", "Major").unwrap();
    assert_eq!(
        scale.names(Spelling::Sharp),
        vec!["C", "D", "E", "F", "G", "A", "B", "C"]
    );
}

#[test]
fn triad_qualities() {
    // (C, E, G), (D, F, A), (B, D, F)
    assert_eq!(chord_quality_from_indices(0, 4, 7), Ok(ChordQuality::Major));
    assert_eq!(chord_quality_from_indices(2, 5, 9), Ok(ChordQuality::Minor));
    assert_eq!(chord_quality_from_indices(11, 2, 5), Ok(ChordQuality::Diminished));
}

#[test]
fn c_major_chords() {
    let (_, chords) = generate_scale_with_chords("C", "Major").unwrap();
    let labels: Vec<String> = chords.iter().map(|c| c.label(Spelling::Sharp)).collect();
    assert_eq!(
        labels,
        vec![
            "C Major",
            "D Minor",
            "E Minor",
            "F Major",
            "G Major",
            "A Minor",
            "B Diminished",
        ]
    );
}

#[test]
fn invalid_input_is_reported() {
    assert!(matches!(
        generate_scale("H", "Major"),
        Err(TheoryError::InvalidInput(_))
    ));
    assert!(matches!(
        generate_scale("C", "Nonexistent"),
        Err(TheoryError::InvalidInput(_))
    ));
    assert!(generate_scale("", "Major").is_err());
    assert!(generate_scale("C", "").is_err());
}

#[test]
fn enharmonic_roots_give_the_same_scale() {
    let pairs = [("C#", "Db"), ("D#", "Eb"), ("F#", "Gb"), ("G#", "Ab"), ("A#", "Bb")];
    for (sharp, flat) in pairs {
        for formula in ScaleFormula::ALL {
            let a = generate_scale(sharp, formula.name()).unwrap();
            let b = generate_scale(flat, formula.name()).unwrap();
            assert_eq!(a.notes(), b.notes(), "{sharp}/{flat} {formula}");
        }
    }
    let unicode = generate_scale("D♭", "Major").unwrap();
    let combined = generate_scale("C♯/D♭", "Major").unwrap();
    assert_eq!(unicode.notes(), combined.notes());
}

#[test]
fn every_heptatonic_formula_builds_seven_chords() {
    for formula in ScaleFormula::ALL.into_iter().filter(|f| f.is_heptatonic()) {
        let (scale, chords) = generate_scale_with_chords("G", formula.name()).unwrap();
        assert_eq!(chords.len(), 7, "{formula}");
        for (i, chord) in chords.iter().enumerate() {
            assert_eq!(chord.root(), scale.degrees()[i]);
            assert_eq!(chord.degree, i + 1);
        }
    }
}

#[test]
fn diatonic_modes_rotate_the_major_chords() {
    let qualities = |root: &str, formula: &str| -> Vec<ChordQuality> {
        generate_scale_with_chords(root, formula)
            .unwrap()
            .1
            .iter()
            .map(|c| c.quality)
            .collect()
    };
    let major = qualities("C", "Major");
    let modes = [
        ("D", "Dorian"),
        ("E", "Phrygian"),
        ("F", "Lydian"),
        ("G", "Mixolydian"),
        ("A", "Minor"),
        ("B", "Locrian"),
    ];
    for (shift, (root, formula)) in modes.into_iter().enumerate() {
        let mut rotated = major.clone();
        rotated.rotate_left(shift + 1);
        assert_eq!(qualities(root, formula), rotated, "{root} {formula}");
    }
}

#[test]
fn non_heptatonic_formulas_follow_policy() {
    for formula in ScaleFormula::ALL.into_iter().filter(|f| !f.is_heptatonic()) {
        let err = generate_scale_with_chords("E", formula.name()).unwrap_err();
        assert!(err.is_unsupported_formula(), "{formula}");
        let (scale, chords) = uniform_engine().generate("E", formula.name()).unwrap();
        assert_eq!(chords.len(), scale.degree_count());
    }
}
