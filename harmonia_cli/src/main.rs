// Harmonia CLI entry point.
//
// Builds the scale and diatonic chords for one root/formula pair and prints
// them, optionally with the circle-of-fifths membership, a fretboard grid,
// or the whole report as JSON.
//
// Usage:
//   harmonia <ROOT> <FORMULA> [--spelling S] [--chords P] [--tuning T]
//     [--frets N] [--config PATH] [--circle] [--fretboard] [--json]
//   harmonia --list
//
// Config: without --config, ./harmonia.json is used if it exists; a broken
// implicit config is logged and skipped. Flags override config values.
// Set RUST_LOG=debug to trace engine calls.

mod args;
mod render;

use std::path::Path;

use anyhow::{Context, Result};
use harmonia_theory::circle::CircleView;
use harmonia_theory::fretboard::Tuning;
use harmonia_theory::{Engine, TheoryConfig, TheoryError};

use crate::args::{AnalyzeArgs, Command};

const DEFAULT_CONFIG_PATH: &str = "harmonia.json";

fn main() {
    env_logger::init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    let command = match args::parse_args(&argv) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("{e}\n\n{}", args::USAGE);
            std::process::exit(2);
        }
    };

    let result = match command {
        Command::Help => {
            println!("{}", args::USAGE);
            Ok(())
        }
        Command::List => {
            print!("{}", render::render_formula_list());
            Ok(())
        }
        Command::Analyze(analyze) => run(&analyze),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(analyze: &AnalyzeArgs) -> Result<()> {
    let config = load_config(analyze.config.as_deref())?;
    let engine = Engine::new(apply_overrides(config, analyze)?);

    let (scale, report) = engine
        .analyze_scale(&analyze.root, &analyze.formula)
        .map_err(|e| with_hint(e, &analyze.formula))?;
    let circle = analyze.circle.then(|| CircleView::new(&scale));
    let fretboard = if analyze.fretboard {
        Some(engine.fretboard()?)
    } else {
        None
    };

    if analyze.json {
        let mut value = serde_json::to_value(&report).context("serializing report")?;
        if let Some(view) = &circle {
            value["circle"] = serde_json::to_value(view)?;
        }
        if let Some(board) = &fretboard {
            value["fretboard"] = serde_json::to_value(board.scale_positions(&scale))?;
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    print!("{}", render::render_report(&report));
    if let Some(view) = &circle {
        println!();
        print!("{}", render::render_circle(view, report.spelling));
    }
    if let Some(board) = &fretboard {
        println!();
        print!("{}", render::render_fretboard(board, &scale, report.spelling));
    }
    Ok(())
}

/// Explicit config paths must load; the implicit one falls back to defaults.
fn load_config(explicit: Option<&Path>) -> Result<TheoryConfig> {
    if let Some(path) = explicit {
        return TheoryConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()));
    }
    let path = Path::new(DEFAULT_CONFIG_PATH);
    if !path.exists() {
        return Ok(TheoryConfig::default());
    }
    log::info!("found {}, loading", path.display());
    match TheoryConfig::load(path) {
        Ok(config) => Ok(config),
        Err(e) => {
            log::warn!("ignoring {}: {e}. Using defaults.", path.display());
            Ok(TheoryConfig::default())
        }
    }
}

fn apply_overrides(mut config: TheoryConfig, analyze: &AnalyzeArgs) -> Result<TheoryConfig> {
    if let Some(spelling) = analyze.spelling {
        config.spelling = spelling;
    }
    if let Some(policy) = analyze.chords {
        config.chord_policy = policy;
    }
    if let Some(tuning) = &analyze.tuning {
        let preset = match tuning.as_slice() {
            [name] => Tuning::preset(name),
            _ => None,
        };
        config.fretboard.tuning = match preset {
            Some(preset) => preset.strings().iter().map(|pc| pc.to_string()).collect(),
            None => tuning.clone(),
        };
    }
    if let Some(frets) = analyze.frets {
        config.fretboard.frets = frets;
    }
    config.validate().context("invalid fretboard settings")?;
    Ok(config)
}

fn with_hint(error: TheoryError, formula: &str) -> anyhow::Error {
    if error.is_unsupported_formula() {
        anyhow::Error::new(error).context(format!(
            "cannot build chords for '{formula}' (pass --chords uniform to stack triads anyway)"
        ))
    } else {
        anyhow::Error::new(error)
    }
}
