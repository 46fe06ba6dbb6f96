//! Handles parsing of free-form tone rows.
//!
//! A row may be written with integer pitch classes, note names or a mix of
//! both:
//!
//! ```
//! use dodeca::parser::parse_tone_row;
//!
//! assert_eq!(parse_tone_row("0 t e 4").unwrap(), vec![0, 10, 11, 4]);
//! assert_eq!(parse_tone_row("[C, D♭, B#]").unwrap(), vec![0, 1, 0]);
//! ```
//!
//! Only the syntax is checked here. Length and permutation checks happen when
//! the row is turned into a `Matrix`.

use combine::parser::char::{digit, spaces};
use combine::parser::token::satisfy_map;
use combine::stream::position;
use combine::{between, choice, eof, many, many1, one_of, satisfy, sep_end_by, skip_many1, token};
use combine::{EasyParser, Parser, Stream};

use crate::error::{Error, Result};
use crate::pitch::{NoteClass, PitchClass};

/// Parses a single accidental.
///
/// ```text
/// Accidental : 'b' '#' '♭' '♯'
///            ;
/// ```
fn accidental<Input>() -> impl Parser<Input, Output = i32>
    where Input: Stream<Token = char>
{
    one_of("b#♭♯".chars())
        .map(|x| match x {
            '#' | '♯' => 1,
            _ => -1,
        })
}

/// Parses a note name plus its accidentals into a pitch class.
///
/// Accidentals accumulate, so `F#bb` is `E`.
///
/// ```text
/// Note : [A-G] Accidental*
///      ;
/// ```
fn note<Input>() -> impl Parser<Input, Output = u32>
    where Input: Stream<Token = char>
{
    let letter = satisfy_map(NoteClass::from_char).expected("note: [A-G]");

    let offset =
        many(accidental())
            .map(|x: Vec<i32>| x.iter().sum::<i32>());

    (letter, offset)
        .map(|(letter, offset): (NoteClass, i32)| u32::from(letter.with_offset(offset)))
}

/// Parses a decimal or duodecimal pitch class.
///
/// Values too large for a `u32` saturate and are rejected later as out of
/// range.
///
/// ```text
/// Number : [0-9]+ | 't' | 'e'
///        ;
/// ```
fn number<Input>() -> impl Parser<Input, Output = u32>
    where Input: Stream<Token = char>
{
    let decimal =
        many1(digit())
            .map(|digits: String| {
                digits.chars().fold(0u32, |acc, d| {
                    acc.saturating_mul(10).saturating_add(d as u32 - '0' as u32)
                })
            });

    choice((
        decimal,
        token('t').map(|_| 10),
        token('e').map(|_| 11),
    ))
}

/// Parses the separator between two row elements.
///
/// ```text
/// Separator : (' ' | '\t' | '\n' | ',')+
///           ;
/// ```
fn separator<Input>() -> impl Parser<Input, Output = ()>
    where Input: Stream<Token = char>
{
    skip_many1(satisfy(|c: char| c.is_whitespace() || c == ','))
}

/// Parses a sequence of row elements with an optional trailing separator.
///
/// ```text
/// Elements : (Element Separator)* Element?
///          ;
///
/// Element : Number | Note
///         ;
/// ```
fn elements<Input>() -> impl Parser<Input, Output = Vec<u32>>
    where Input: Stream<Token = char>
{
    let element = choice((number(), note())).expected("pitch class or note name");
    sep_end_by(element, separator())
}

/// Recognizes an entire tone row, optionally enclosed in brackets.
///
/// ```text
/// Row : '[' Elements ']' | Elements
///     ;
/// ```
fn tone_row<Input>() -> impl Parser<Input, Output = Vec<u32>>
    where Input: Stream<Token = char>
{
    let bracketed =
        between(token('['), token(']'), (spaces(), elements()))
            .map(|(_, row)| row);

    (spaces(), choice((bracketed, elements())), spaces(), eof())
        .map(|(_, row, _, _)| row)
}

/// Parse a tone row from text.
///
/// Values that parse but cannot be a pitch class at all are reported as a
/// parse error; values in `12..=255` are passed through so that `Matrix::new`
/// can report them.
pub fn parse_tone_row(input: &str) -> Result<Vec<PitchClass>> {
    let (values, _) = tone_row()
        .easy_parse(position::Stream::new(input))
        .map_err(|e| Error::Parse(e.to_string()))?;

    values.into_iter()
        .map(|value| {
            PitchClass::try_from(value)
                .map_err(|_| Error::Parse(format!("pitch class out of range: {}", value)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_note_no_accidentals() {
        assert_eq!(note().parse("A"), Ok((9, "")));
        assert_eq!(note().parse("C"), Ok((0, "")));
    }

    #[test]
    fn parse_note_unicode_accidentals() {
        assert_eq!(note().parse("A♯#"), Ok((11, "")));
        assert_eq!(note().parse("G♭"), Ok((6, "")));
        assert_eq!(note().parse("Cb"), Ok((11, "")));
    }

    #[test]
    fn parse_note_trailing_junk() {
        assert_eq!(note().parse("Bbasd"), Ok((10, "asd")));
    }

    #[test]
    fn parse_note_invalid_root() {
        assert!(note().parse("I").is_err());
    }

    #[test]
    fn parse_numbers() {
        assert_eq!(number().parse("11"), Ok((11, "")));
        assert_eq!(number().parse("t"), Ok((10, "")));
        assert_eq!(number().parse("e"), Ok((11, "")));
        assert_eq!(number().parse("99999999999"), Ok((u32::MAX, "")));
    }

    #[test]
    fn parse_integer_row() {
        let row = parse_tone_row("3 1 9 5 4 6 8 7 0 10 11 2").unwrap();
        assert_eq!(row, vec![3, 1, 9, 5, 4, 6, 8, 7, 0, 10, 11, 2]);
    }

    #[test]
    fn parse_note_row() {
        let row = parse_tone_row("E♭ D♭ A F E G♭ A♭ G C B♭ B D").unwrap();
        assert_eq!(row, vec![3, 1, 9, 5, 4, 6, 8, 7, 0, 10, 11, 2]);
    }

    #[test]
    fn parse_bracketed_comma_row() {
        let row = parse_tone_row("  [3, 1,9 , 5 ]\n").unwrap();
        assert_eq!(row, vec![3, 1, 9, 5]);

        let row = parse_tone_row("[]").unwrap();
        assert!(row.is_empty());
    }

    #[test]
    fn parse_mixed_row() {
        let row = parse_tone_row("0,C#,t,e,D").unwrap();
        assert_eq!(row, vec![0, 1, 10, 11, 2]);
    }

    #[test]
    fn out_of_range_values() {
        assert_eq!(parse_tone_row("12 200").unwrap(), vec![12, 200]);
        assert!(matches!(parse_tone_row("256"), Err(Error::Parse(_))));
    }

    #[test]
    fn reject_junk() {
        assert!(matches!(parse_tone_row("3 1 x"), Err(Error::Parse(_))));
        assert!(matches!(parse_tone_row("[3 1"), Err(Error::Parse(_))));
        assert!(matches!(parse_tone_row("C#D"), Err(Error::Parse(_))));
    }
}
