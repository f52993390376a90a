// Data-driven engine configuration.
//
// The engine's choices that are not fixed by music theory live here in
// `TheoryConfig`, loaded from JSON: how black-key notes are spelled, whether
// chord building accepts non-heptatonic formulas, and the fretboard used for
// note grids. Every field has a default, so a config file only needs the
// fields it changes.
//
// The formula table and the chromatic note table are not configurable; they
// are compile-time constants in `formula.rs` and `pitch.rs`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::chord::ChordPolicy;
use crate::error::TheoryError;
use crate::fretboard::{DEFAULT_FRETS, Fretboard, Tuning};
use crate::pitch::{SHARP_NAMES, SpellingPolicy};

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("config value rejected: {0}")]
    Invalid(#[from] TheoryError),
}

/// Fretboard used for note grids.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FretboardConfig {
    /// Open-string note names, string 1 (highest) first.
    pub tuning: Vec<String>,
    pub frets: u8,
}

impl Default for FretboardConfig {
    fn default() -> Self {
        Self {
            tuning: Tuning::standard()
                .strings()
                .iter()
                .map(|pc| SHARP_NAMES[pc.index() as usize].to_string())
                .collect(),
            frets: DEFAULT_FRETS,
        }
    }
}

impl FretboardConfig {
    pub fn build(&self) -> Result<Fretboard, TheoryError> {
        Fretboard::new(Tuning::parse(&self.tuning)?, self.frets)
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TheoryConfig {
    pub spelling: SpellingPolicy,
    pub chord_policy: ChordPolicy,
    pub fretboard: FretboardConfig,
}

impl TheoryConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_json_str(&text)
    }

    /// Parse and validate a JSON config string.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: TheoryConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values serde cannot: tuning note names and fret range.
    pub fn validate(&self) -> Result<(), TheoryError> {
        self.fretboard.build().map(|_| ())
    }
}
