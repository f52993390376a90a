// Text rendering for the CLI.
//
// Each function returns a String so output can be checked in tests;
// `main` only prints. Formatting follows the scale screen: the scale joined
// with " - ", the chords joined with ", ", then one line per chord with its
// numeral and notes.

use std::fmt::Write;

use harmonia_theory::circle::{CircleView, KeySignature};
use harmonia_theory::formula::FormulaFamily;
use harmonia_theory::fretboard::Fretboard;
use harmonia_theory::{Scale, ScaleFormula, ScaleReport, Spelling};

const FRET_CELL_WIDTH: usize = 6;

pub fn describe_key_signature(signature: KeySignature) -> String {
    match signature {
        KeySignature::Natural => "no sharps or flats".to_string(),
        KeySignature::Sharps(1) => "1 sharp".to_string(),
        KeySignature::Flats(1) => "1 flat".to_string(),
        KeySignature::Sharps(n) => format!("{n} sharps"),
        KeySignature::Flats(n) => format!("{n} flats"),
    }
}

pub fn render_report(report: &ScaleReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {} ({})", report.root, report.formula, report.family);
    let _ = writeln!(out, "Scale:  {}", report.scale_text);
    if let Some(signature) = report.key_signature {
        let _ = writeln!(out, "Key:    {}", describe_key_signature(signature));
    }
    let _ = writeln!(out, "Chords: {}", report.chords_text);
    for chord in &report.chords {
        let _ = writeln!(
            out,
            "  {:<6}{:<16}{}",
            chord.numeral,
            chord.label,
            chord.notes.join(" ")
        );
    }
    out
}

pub fn render_circle(view: &CircleView, spelling: Spelling) -> String {
    let mut out = String::from("Circle of fifths:\n");
    for segment in &view.segments {
        let marker = if segment.is_root {
            "root"
        } else if segment.in_scale {
            "in scale"
        } else {
            ""
        };
        let line = format!(
            "  {:>2}  {:<6} {}",
            segment.position,
            segment.pitch_class.name(spelling),
            marker
        );
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

/// Grid with one row per string. In-scale notes are shown by name and the
/// root is bracketed.
pub fn render_fretboard(board: &Fretboard, scale: &Scale, spelling: Spelling) -> String {
    let mut out = String::from("Fretboard:\n");
    let _ = write!(out, "{:<6}", "");
    for fret in 0..=board.frets() {
        let _ = write!(out, "{fret:<FRET_CELL_WIDTH$}");
    }
    out.truncate(out.trim_end().len());
    out.push('\n');

    let positions = board.positions(scale);
    let per_string = board.frets() as usize + 1;
    for (row, open) in positions
        .chunks(per_string)
        .zip(board.tuning().strings().iter())
    {
        let mut line = format!("{:<6}", open.name(spelling));
        for position in row {
            let cell = if position.is_root {
                format!("[{}]", position.pitch_class.name(spelling))
            } else if position.in_scale {
                position.pitch_class.name(spelling).to_string()
            } else {
                "-".to_string()
            };
            let _ = write!(line, "{cell:<FRET_CELL_WIDTH$}");
        }
        let _ = writeln!(out, "{}", line.trim_end());
    }
    out
}

pub fn render_formula_list() -> String {
    let mut out = String::new();
    for family in FormulaFamily::ALL {
        let _ = writeln!(out, "{}:", family.label());
        for formula in ScaleFormula::in_family(family) {
            let _ = writeln!(
                out,
                "  {:<24}{} notes",
                formula.name(),
                formula.note_count()
            );
        }
    }
    out
}
