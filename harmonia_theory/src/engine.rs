// Engine entry points.
//
// `generate_scale_with_chords` is the single call front ends make: parse the
// root and formula, build the scale, stack its diatonic chords. It runs
// under the default config. `Engine` carries a `TheoryConfig` for callers
// that choose the spelling, chord policy or fretboard, and `Engine::analyze`
// turns one request into a serialisable `ScaleReport` with every display
// string already spelled.
//
// Everything here is pure: no caching, no shared state, identical inputs
// give identical outputs.

use serde::{Deserialize, Serialize};

use crate::chord::{ChordQuality, DiatonicChord, build_chords};
use crate::circle::KeySignature;
use crate::config::TheoryConfig;
use crate::error::Result;
use crate::formula::ScaleFormula;
use crate::fretboard::Fretboard;
use crate::pitch::{PitchClass, Spelling};
use crate::scale::{Scale, generate_scale};

/// Build a scale and its diatonic chords with the default configuration.
pub fn generate_scale_with_chords(
    root: &str,
    formula: &str,
) -> Result<(Scale, Vec<DiatonicChord>)> {
    Engine::default().generate(root, formula)
}

/// One chord of a `ScaleReport`, spelled for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChordReport {
    pub degree: usize,
    pub numeral: String,
    pub root: String,
    pub quality: ChordQuality,
    /// `"C Major"`.
    pub label: String,
    pub notes: Vec<String>,
}

/// Fully spelled result of one engine request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScaleReport {
    pub root: String,
    pub formula: String,
    pub family: String,
    pub spelling: Spelling,
    /// Scale names including the closing octave root.
    pub scale: Vec<String>,
    pub pitch_classes: Vec<PitchClass>,
    pub chords: Vec<ChordReport>,
    /// Key signature, for the seven diatonic modes only.
    pub key_signature: Option<KeySignature>,
    /// `"C - D - E - ..."`.
    pub scale_text: String,
    /// `"C Major, D Minor, ..."`.
    pub chords_text: String,
}

#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: TheoryConfig,
}

impl Engine {
    pub fn new(config: TheoryConfig) -> Self {
        Engine { config }
    }

    pub fn config(&self) -> &TheoryConfig {
        &self.config
    }

    /// Scale plus chords under this engine's chord policy.
    pub fn generate(&self, root: &str, formula: &str) -> Result<(Scale, Vec<DiatonicChord>)> {
        log::debug!("generating {formula:?} on {root:?}");
        let scale = generate_scale(root, formula)?;
        let chords = build_chords(&scale, self.config.chord_policy)?;
        log::debug!(
            "{} {}: {} notes, {} chords",
            scale.root(),
            scale.formula(),
            scale.notes().len(),
            chords.len()
        );
        Ok((scale, chords))
    }

    /// Generate and spell a full report, resolving the spelling policy
    /// against the root text as written.
    pub fn analyze(&self, root: &str, formula: &str) -> Result<ScaleReport> {
        self.analyze_scale(root, formula).map(|(_, report)| report)
    }

    /// Like `analyze`, but also hands back the `Scale` the report was built
    /// from, for callers that lay it over a circle or fretboard.
    pub fn analyze_scale(&self, root: &str, formula: &str) -> Result<(Scale, ScaleReport)> {
        let (scale, chords) = self.generate(root, formula)?;
        let spelling = self.config.spelling.resolve(root);
        let report = report(&scale, &chords, spelling);
        Ok((scale, report))
    }

    pub fn fretboard(&self) -> Result<Fretboard> {
        self.config.fretboard.build()
    }
}

fn report(scale: &Scale, chords: &[DiatonicChord], spelling: Spelling) -> ScaleReport {
    let names: Vec<String> = scale
        .names(spelling)
        .into_iter()
        .map(str::to_string)
        .collect();
    let chord_reports: Vec<ChordReport> = chords
        .iter()
        .map(|chord| ChordReport {
            degree: chord.degree,
            numeral: chord.numeral(),
            root: chord.root().name(spelling).to_string(),
            quality: chord.quality,
            label: chord.label(spelling),
            notes: chord
                .triad
                .notes()
                .iter()
                .map(|pc| pc.name(spelling).to_string())
                .collect(),
        })
        .collect();
    let key_signature = match scale.formula() {
        ScaleFormula::Major => Some(KeySignature::of_major(scale.root())),
        ScaleFormula::Minor => Some(KeySignature::of_minor(scale.root())),
        formula => modal_key_signature(formula, scale.root()),
    };
    let chords_text = chord_reports
        .iter()
        .map(|chord| chord.label.as_str())
        .collect::<Vec<_>>()
        .join(", ");
    ScaleReport {
        root: scale.root().name(spelling).to_string(),
        formula: scale.formula().name().to_string(),
        family: scale.formula().family().label().to_string(),
        spelling,
        scale_text: names.join(" - "),
        scale: names,
        pitch_classes: scale.notes().to_vec(),
        chords: chord_reports,
        key_signature,
        chords_text,
    }
}

/// Church modes share the signature of the major key they are a rotation of.
fn modal_key_signature(formula: ScaleFormula, root: PitchClass) -> Option<KeySignature> {
    let major_degree = match formula {
        ScaleFormula::Dorian => 2,
        ScaleFormula::Phrygian => 4,
        ScaleFormula::Lydian => 5,
        ScaleFormula::Mixolydian => 7,
        ScaleFormula::Locrian => 11,
        _ => return None,
    };
    Some(KeySignature::of_major(root.transpose(-major_degree)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chord::ChordPolicy;
    use crate::error::TheoryError;
    use crate::pitch::SpellingPolicy;

    #[test]
    fn test_c_major_report() {
        let report = Engine::default().analyze("C", "Major").unwrap();
        assert_eq!(report.scale_text, "C - D - E - F - G - A - B - C");
        assert_eq!(
            report.chords_text,
            "C Major, D Minor, E Minor, F Major, G Major, A Minor, B Diminished"
        );
        assert_eq!(report.chords[6].numeral, "vii°");
        assert_eq!(report.chords[0].notes, vec!["C", "E", "G"]);
        assert_eq!(report.key_signature, Some(KeySignature::Natural));
        assert_eq!(report.family, "Diatonic Modes");
    }

    #[test]
    fn test_match_root_spelling() {
        let engine = Engine::new(TheoryConfig {
            spelling: SpellingPolicy::MatchRoot,
            ..TheoryConfig::default()
        });
        let report = engine.analyze("Eb", "Major").unwrap();
        assert_eq!(report.scale, vec!["Eb", "F", "G", "Ab", "Bb", "C", "D", "Eb"]);
        assert_eq!(report.key_signature, Some(KeySignature::Flats(3)));
        let report = engine.analyze("E", "Major").unwrap();
        assert_eq!(report.scale[2], "G#");
    }

    #[test]
    fn test_modal_key_signatures() {
        let engine = Engine::default();
        // D Dorian and E Phrygian share C major's empty signature.
        for (root, formula) in [("D", "Dorian"), ("E", "Phrygian"), ("B", "Locrian")] {
            let report = engine.analyze(root, formula).unwrap();
            assert_eq!(report.key_signature, Some(KeySignature::Natural));
        }
        let report = engine.analyze("A", "Mixolydian").unwrap();
        assert_eq!(report.key_signature, Some(KeySignature::Sharps(2)));
        let report = engine.analyze("A", "Harmonic Minor").unwrap();
        assert_eq!(report.key_signature, None);
    }

    #[test]
    fn test_policy_comes_from_config() {
        let err = Engine::default().analyze("C", "Blues (Minor)").unwrap_err();
        assert!(err.is_unsupported_formula());

        let engine = Engine::new(TheoryConfig {
            chord_policy: ChordPolicy::Uniform,
            ..TheoryConfig::default()
        });
        let report = engine.analyze("C", "Blues (Minor)").unwrap();
        assert_eq!(report.scale.len(), 7);
        assert_eq!(report.chords.len(), 6);
    }

    #[test]
    fn test_errors_surface() {
        assert!(matches!(
            generate_scale_with_chords("H", "Major"),
            Err(TheoryError::InvalidInput(_))
        ));
        assert!(matches!(
            generate_scale_with_chords("C", "Nonexistent"),
            Err(TheoryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_analyze_scale_returns_the_reported_scale() {
        let engine = Engine::default();
        let (scale, report) = engine.analyze_scale("D", "Dorian").unwrap();
        assert_eq!(scale, generate_scale("D", "Dorian").unwrap());
        assert_eq!(report.pitch_classes, scale.notes());
        assert_eq!(report, engine.analyze("D", "Dorian").unwrap());
    }

    #[test]
    fn test_report_json_round_trip() {
        let report = Engine::default().analyze("A", "Minor").unwrap();
        let json = serde_json::to_string(&report).unwrap();
        let restored: ScaleReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, restored);
    }
}
