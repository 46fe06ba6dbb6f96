//! # dodeca
//!
//! A crate for building the twelve-tone matrices used in serial composition.
//!
//! The `matrix` module derives every transposition of a tone row and
//! arranges them so that the prime, retrograde, inversion and
//! retrograde-inversion forms can all be read off a single 12x12 table.
//! The `pitch` module translates pitch classes to note names and MIDI
//! numbers, `parser` reads rows from text, and `render` and `midi` turn
//! rows into something to look at or listen to.
//!
//! ```
//! use dodeca::Matrix;
//!
//! let m: Matrix = "D# C# A F E F# G# G C A# B D".parse().unwrap();
//! assert_eq!(m.rows()[11][11], 3);
//! ```

pub mod error;
pub mod matrix;
pub mod midi;
pub mod parser;
pub mod pitch;
pub mod render;

pub use error::{Error, Result};
pub use matrix::Matrix;
pub use pitch::{Accidentals, PitchClass, ToneRow};
