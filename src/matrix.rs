//! The twelve-tone matrix.
//!
//! A `Matrix` is built once from a tone row and never changes afterwards.
//! Row `r` is the prime form transposed to the `r`-th pitch class of the
//! inversion starting on the row's first pitch class, so that reading
//! rows forwards and backwards gives the prime and retrograde forms, and
//! reading columns downwards and upwards gives the inversion and
//! retrograde-inversion forms.
//!
//! ```
//! use dodeca::matrix::Matrix;
//!
//! let m = Matrix::new(&[3, 1, 9, 5, 4, 6, 8, 7, 0, 10, 11, 2]).unwrap();
//!
//! assert_eq!(m.rows()[0], *m.tone_row());
//! assert_eq!(m.rows()[11][0], 4);
//! assert!((0..12).all(|x| m.rows()[x][x] == 3));
//! ```

use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::parser;
use crate::pitch::{Intervals, PitchClass, ToneRow, PITCH_CLASS_COUNT};

/// A 12x12 arrangement of every transposition of a tone row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Matrix {
    /// The row the matrix was built from
    row: ToneRow,

    /// Consecutive differences of `row`, computed once
    intervals: Intervals,

    /// The assembled transpositions, top to bottom
    rows: [ToneRow; PITCH_CLASS_COUNT],
}

/// Walks `intervals` from `root`, reducing every step modulo 12.
fn walk<I>(root: PitchClass, intervals: I) -> ToneRow
    where I: IntoIterator<Item = i32>
{
    let modulus = PITCH_CLASS_COUNT as i32;
    let mut out = [0; PITCH_CLASS_COUNT];
    let mut current = root as i32 % modulus;
    out[0] = current as PitchClass;

    for (slot, interval) in out[1..].iter_mut().zip(intervals) {
        current = (current + interval).rem_euclid(modulus);
        *slot = current as PitchClass;
    }
    out
}

impl Matrix {
    /// Construct the matrix of `row`.
    ///
    /// The row must be a permutation of the pitch classes `0..12`. A row of
    /// the wrong length fails with `Error::InvalidRow`, an element above 11
    /// with `Error::InvalidPitchClass` and a repeated element with
    /// `Error::NonPermutationRow`.
    pub fn new(row: &[PitchClass]) -> Result<Matrix> {
        if row.len() != PITCH_CLASS_COUNT {
            return Err(Error::InvalidRow(row.len()));
        }

        let mut seen = [false; PITCH_CLASS_COUNT];
        let mut tone_row = [0; PITCH_CLASS_COUNT];

        for (slot, &pitch_class) in tone_row.iter_mut().zip(row) {
            let index = pitch_class as usize;
            if index >= PITCH_CLASS_COUNT {
                return Err(Error::InvalidPitchClass(pitch_class));
            }
            if seen[index] {
                return Err(Error::NonPermutationRow { duplicate: pitch_class });
            }
            seen[index] = true;
            *slot = pitch_class;
        }

        Ok(Matrix::build(tone_row))
    }

    /// Construct the matrix of a uniformly shuffled tone row.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Matrix {
        Matrix::build(Matrix::random_row(rng))
    }

    /// Construct the matrix of a tone row shuffled by the thread-local
    /// generator.
    pub fn from_entropy() -> Matrix {
        Matrix::random(&mut rand::thread_rng())
    }

    /// Returns a uniformly shuffled permutation of `0..12`.
    pub fn random_row<R: Rng + ?Sized>(rng: &mut R) -> ToneRow {
        let mut row = [0; PITCH_CLASS_COUNT];
        for (pitch_class, slot) in row.iter_mut().enumerate() {
            *slot = pitch_class as PitchClass;
        }
        row.shuffle(rng);
        row
    }

    fn build(row: ToneRow) -> Matrix {
        debug!(?row, "building twelve-tone matrix");

        let mut intervals = [0; PITCH_CLASS_COUNT - 1];
        for (slot, pair) in intervals.iter_mut().zip(row.windows(2)) {
            *slot = pair[1] as i8 - pair[0] as i8;
        }

        let mut matrix = Matrix {
            row,
            intervals,
            rows: [[0; PITCH_CLASS_COUNT]; PITCH_CLASS_COUNT],
        };

        let roots = matrix.inversion_row(row[0]);
        for (index, &root) in roots.iter().enumerate() {
            matrix.rows[index] = matrix.transposition(root);
            trace!(index, root, row = ?matrix.rows[index], "assembled matrix row");
        }

        matrix
    }

    /// The tone row this matrix was built from.
    pub fn tone_row(&self) -> &ToneRow {
        &self.row
    }

    /// The signed differences between consecutive pitch classes of the
    /// tone row, not reduced modulo 12.
    pub fn intervals(&self) -> &Intervals {
        &self.intervals
    }

    /// The intervals with every direction reversed.
    pub fn inverted_intervals(&self) -> Intervals {
        let mut inverted = self.intervals;
        for interval in inverted.iter_mut() {
            *interval = -*interval;
        }
        inverted
    }

    /// The prime form transposed to begin on `root` (taken modulo 12).
    pub fn transposition(&self, root: PitchClass) -> ToneRow {
        walk(root, self.intervals.iter().map(|&i| i as i32))
    }

    /// The inversion transposed to begin on `root` (taken modulo 12).
    pub fn inversion_row(&self, root: PitchClass) -> ToneRow {
        walk(root, self.intervals.iter().map(|&i| -(i as i32)))
    }

    /// All twelve rows of the matrix, top to bottom.
    pub fn rows(&self) -> &[ToneRow; PITCH_CLASS_COUNT] {
        &self.rows
    }

    /// The row at `index`, if it exists.
    pub fn row(&self, index: usize) -> Option<&ToneRow> {
        self.rows.get(index)
    }

    /// The column at `index` read top to bottom, if it exists.
    pub fn column(&self, index: usize) -> Option<ToneRow> {
        if index >= PITCH_CLASS_COUNT {
            return None;
        }

        let mut column = [0; PITCH_CLASS_COUNT];
        for (slot, row) in column.iter_mut().zip(self.rows.iter()) {
            *slot = row[index];
        }
        Some(column)
    }

    /// A row of the matrix chosen uniformly at random.
    pub fn melody<R: Rng + ?Sized>(&self, rng: &mut R) -> &ToneRow {
        &self.rows[rng.gen_range(0..PITCH_CLASS_COUNT)]
    }

    /// The prime form beginning on `pitch_class`, read left to right along
    /// the matrix row that starts with it.
    pub fn prime(&self, pitch_class: PitchClass) -> Result<ToneRow> {
        self.rows.iter()
            .find(|row| row[0] == pitch_class)
            .copied()
            .ok_or(Error::InvalidPitchClass(pitch_class))
    }

    /// The prime form beginning on `pitch_class` read backwards.
    pub fn retrograde(&self, pitch_class: PitchClass) -> Result<ToneRow> {
        let mut row = self.prime(pitch_class)?;
        row.reverse();
        Ok(row)
    }

    /// The inversion beginning on `pitch_class`, read top to bottom along
    /// the matrix column that starts with it.
    pub fn inversion(&self, pitch_class: PitchClass) -> Result<ToneRow> {
        self.rows[0].iter()
            .position(|&p| p == pitch_class)
            .and_then(|index| self.column(index))
            .ok_or(Error::InvalidPitchClass(pitch_class))
    }

    /// The inversion beginning on `pitch_class` read backwards.
    pub fn retrograde_inversion(&self, pitch_class: PitchClass) -> Result<ToneRow> {
        let mut row = self.inversion(pitch_class)?;
        row.reverse();
        Ok(row)
    }
}

impl FromStr for Matrix {
    type Err = Error;

    /// Parses a tone row as accepted by `parser::parse_tone_row` and builds
    /// its matrix.
    fn from_str(s: &str) -> Result<Matrix> {
        let row = parser::parse_tone_row(s)?;
        Matrix::new(&row)
    }
}
