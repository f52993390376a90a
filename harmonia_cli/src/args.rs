// Command-line argument parsing.
//
// Plain `std::env::args()` matching, no clap dependency: two positionals
// (root, formula) and a handful of flags. Parsing is kept out of `main` so
// it can be tested without a process.

use std::path::PathBuf;

use harmonia_theory::{ChordPolicy, SpellingPolicy};

pub const USAGE: &str = "\
Usage:
  harmonia <ROOT> <FORMULA> [OPTIONS]
  harmonia --list

Options:
  --spelling <sharp|flat|both|match-root>   How to spell black-key notes
  --chords <heptatonic|uniform>             Chord building policy
  --tuning <PRESET|NOTES>                   standard, drop-d, bass, or e.g. \"E,B,G,D,A,E\"
  --frets <N>                               Fret count for --fretboard (1-24)
  --config <PATH>                           JSON config file (default: ./harmonia.json if present)
  --circle                                  Show circle-of-fifths membership
  --fretboard                               Show the scale on a fretboard
  --json                                    Print the report as JSON
  --list                                    List every scale formula";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Help,
    Analyze(AnalyzeArgs),
}

/// Overrides and output switches for one analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnalyzeArgs {
    pub root: String,
    pub formula: String,
    pub spelling: Option<SpellingPolicy>,
    pub chords: Option<ChordPolicy>,
    pub tuning: Option<Vec<String>>,
    pub frets: Option<u8>,
    pub config: Option<PathBuf>,
    pub circle: bool,
    pub fretboard: bool,
    pub json: bool,
}

/// Parse arguments, not including the program name.
pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut parsed = AnalyzeArgs::default();
    let mut positionals = Vec::new();
    let mut i = 0;

    while i < args.len() {
        match args[i].as_str() {
            "--list" => return Ok(Command::List),
            "--help" | "-h" => return Ok(Command::Help),
            "--circle" => parsed.circle = true,
            "--fretboard" => parsed.fretboard = true,
            "--json" => parsed.json = true,
            "--spelling" => {
                i += 1;
                parsed.spelling = Some(flag_value(args, i, "--spelling")?.parse()?);
            }
            "--chords" => {
                i += 1;
                parsed.chords = Some(flag_value(args, i, "--chords")?.parse()?);
            }
            "--tuning" => {
                i += 1;
                parsed.tuning = Some(split_tuning(flag_value(args, i, "--tuning")?));
            }
            "--frets" => {
                i += 1;
                let value = flag_value(args, i, "--frets")?;
                parsed.frets = Some(
                    value
                        .parse()
                        .map_err(|_| format!("--frets requires a number, got '{value}'"))?,
                );
            }
            "--config" => {
                i += 1;
                parsed.config = Some(PathBuf::from(flag_value(args, i, "--config")?));
            }
            other if other.starts_with("--") => {
                return Err(format!("unknown option '{other}'"));
            }
            positional => positionals.push(positional.to_string()),
        }
        i += 1;
    }

    match positionals.len() {
        2 => {
            let mut positionals = positionals.into_iter();
            parsed.root = positionals.next().unwrap_or_default();
            parsed.formula = positionals.next().unwrap_or_default();
            Ok(Command::Analyze(parsed))
        }
        0 => Ok(Command::Help),
        n => Err(format!("expected a root note and a formula name, got {n} arguments")),
    }
}

fn flag_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("{flag} requires a value"))
}

/// A tuning is either a preset name or a comma/space separated note list.
/// Presets are resolved later, by the caller, against `Tuning::preset`.
fn split_tuning(value: &str) -> Vec<String> {
    value
        .split([',', ' '])
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}
