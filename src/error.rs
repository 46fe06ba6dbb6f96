//! Error types for dodeca.

use thiserror::Error;

use crate::pitch::PitchClass;

#[derive(Debug, Error)]
pub enum Error {
    #[error("tone row must have exactly 12 pitch classes, found {0}")]
    InvalidRow(usize),
    #[error("pitch class out of range 0..=11: {0}")]
    InvalidPitchClass(PitchClass),
    #[error("tone row repeats pitch class {duplicate}")]
    NonPermutationRow { duplicate: PitchClass },
    #[error("unknown accidentals mode: {0:?} (expected \"sharps\" or \"flats\")")]
    UnknownAccidentals(String),
    #[error("could not parse tone row: {0}")]
    Parse(String),
    #[error("invalid MIDI configuration: {0}")]
    InvalidMidiConfig(String),
    #[error("MIDI encoding error: {0}")]
    Midi(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
