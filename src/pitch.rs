//! Pitch classes and their translation to note names and MIDI numbers.
//!
//! A pitch class is a plain integer in `0..12`, with `0` standing for `C`.
//! All arithmetic on pitch classes is taken modulo 12.
//!
//! ```
//! use dodeca::pitch::{to_flat_name, to_midi, to_sharp_name};
//!
//! assert_eq!(to_sharp_name(1).unwrap(), "C♯");
//! assert_eq!(to_flat_name(1).unwrap(), "D♭");
//! assert_eq!(to_midi(0).unwrap(), 60);
//! ```

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// A single equal-tempered semitone class.
pub type PitchClass = u8;

/// Signed distance in semitones between two consecutive pitch classes.
///
/// This is not reduced modulo 12.
pub type Interval = i8;

/// The total number of pitch classes.
pub const PITCH_CLASS_COUNT: usize = 12;

/// An ordered arrangement of twelve pitch classes.
pub type ToneRow = [PitchClass; PITCH_CLASS_COUNT];

/// The intervals between consecutive elements of a `ToneRow`.
pub type Intervals = [Interval; PITCH_CLASS_COUNT - 1];

/// MIDI note number of pitch class `0`.
pub const MIDDLE_C: u8 = 60;

static SHARP_NAMES: [&str; PITCH_CLASS_COUNT] = [
    "C", "C♯", "D", "D♯", "E", "F", "F♯", "G", "G♯", "A", "A♯", "B",
];

static FLAT_NAMES: [&str; PITCH_CLASS_COUNT] = [
    "C", "D♭", "D", "E♭", "E", "F", "G♭", "G", "A♭", "A", "B♭", "B",
];

fn check(pitch_class: PitchClass) -> Result<usize> {
    if (pitch_class as usize) < PITCH_CLASS_COUNT {
        Ok(pitch_class as usize)
    } else {
        Err(Error::InvalidPitchClass(pitch_class))
    }
}

/// Returns the note name of `pitch_class` spelled with sharps.
pub fn to_sharp_name(pitch_class: PitchClass) -> Result<&'static str> {
    check(pitch_class).map(|i| SHARP_NAMES[i])
}

/// Returns the note name of `pitch_class` spelled with flats.
pub fn to_flat_name(pitch_class: PitchClass) -> Result<&'static str> {
    check(pitch_class).map(|i| FLAT_NAMES[i])
}

/// Returns the MIDI note number of `pitch_class` in the octave starting at
/// middle C.
pub fn to_midi(pitch_class: PitchClass) -> Result<u8> {
    check(pitch_class).map(|_| pitch_class + MIDDLE_C)
}

/// A natural note letter.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NoteClass {
    A, B, C, D, E, F, G
}

impl NoteClass {
    /// Construct a `NoteClass` from a char representation.
    pub fn from_char(input: char) -> Option<NoteClass> {
        use self::NoteClass::*;

        match input {
            'A' => Some(A),
            'B' => Some(B),
            'C' => Some(C),
            'D' => Some(D),
            'E' => Some(E),
            'F' => Some(F),
            'G' => Some(G),
            _   => None
        }
    }

    /// Returns the pitch class of the natural note.
    pub fn pitch_class(&self) -> PitchClass {
        use self::NoteClass::*;

        match *self {
            C => 0,
            D => 2,
            E => 4,
            F => 5,
            G => 7,
            A => 9,
            B => 11,
        }
    }

    /// Returns the pitch class of this note after applying `offset`
    /// accidentals, positive for sharps and negative for flats.
    ///
    /// ```
    /// use dodeca::pitch::NoteClass;
    ///
    /// assert_eq!(NoteClass::C.with_offset(-1), 11);
    /// assert_eq!(NoteClass::B.with_offset(1), 0);
    /// ```
    pub fn with_offset(&self, offset: i32) -> PitchClass {
        (self.pitch_class() as i32 + offset).rem_euclid(PITCH_CLASS_COUNT as i32) as PitchClass
    }
}

/// How pitch classes are spelled when displayed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Accidentals {
    #[default]
    Sharps,
    Flats,
}

impl Accidentals {
    /// Returns the note name of `pitch_class` in this spelling.
    pub fn name(&self, pitch_class: PitchClass) -> Result<&'static str> {
        match *self {
            Accidentals::Sharps => to_sharp_name(pitch_class),
            Accidentals::Flats => to_flat_name(pitch_class),
        }
    }
}

impl FromStr for Accidentals {
    type Err = Error;

    fn from_str(s: &str) -> Result<Accidentals> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sharps" => Ok(Accidentals::Sharps),
            "flats" => Ok(Accidentals::Flats),
            _ => Err(Error::UnknownAccidentals(s.to_string())),
        }
    }
}

impl fmt::Display for Accidentals {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Accidentals::Sharps => f.write_str("sharps"),
            Accidentals::Flats => f.write_str("flats"),
        }
    }
}
