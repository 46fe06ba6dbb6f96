//! Plain-text rendering of rows and matrices.
//!
//! ```
//! use dodeca::matrix::Matrix;
//! use dodeca::pitch::Accidentals;
//! use dodeca::render::render_row;
//!
//! let m = Matrix::new(&[3, 1, 9, 5, 4, 6, 8, 7, 0, 10, 11, 2]).unwrap();
//! let text = render_row(m.tone_row(), Accidentals::Flats).unwrap();
//!
//! assert_eq!(text, "E♭ D♭ A F E G♭ A♭ G C B♭ B D");
//! ```

use std::fmt;

use crate::error::Result;
use crate::matrix::Matrix;
use crate::pitch::{Accidentals, PitchClass};

/// Renders a row of pitch classes as note names separated by single spaces.
pub fn render_row(row: &[PitchClass], accidentals: Accidentals) -> Result<String> {
    let names = row.iter()
        .map(|&pc| accidentals.name(pc))
        .collect::<Result<Vec<_>>>()?;

    Ok(names.join(" "))
}

/// Renders the whole matrix as a table of note names, one matrix row per
/// line.
///
/// Every cell is right-aligned to the width of the widest name.
pub fn render_matrix(matrix: &Matrix, accidentals: Accidentals) -> Result<String> {
    let mut lines = Vec::with_capacity(matrix.rows().len());

    for row in matrix.rows() {
        let cells = row.iter()
            .map(|&pc| accidentals.name(pc).map(|name| format!("{:>2}", name)))
            .collect::<Result<Vec<_>>>()?;
        lines.push(cells.join(" "));
    }

    Ok(lines.join("\n"))
}

/// Writes the matrix as a numeric table.
impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (index, row) in self.rows().iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for (column, pc) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{:>2}", pc)?;
            }
        }
        Ok(())
    }
}
