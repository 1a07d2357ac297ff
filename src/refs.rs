use std::{fmt::Display, str::FromStr};

use crate::error::ParseError;

mod lexer;
mod parser;

/// Number of rows that can be named with at most two letters
pub const MAX_ROWS: usize = 26 * 26;

/// Widest board supported, in holes (100 inches at 0.1" pitch)
pub const MAX_HOLES: usize = 1000;

/// A hole on the board, written as row letters followed by the hole number
/// ("A4", "AC13").
///
/// Refs order row-major: first by row, then by hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ref {
    row: usize,
    hole: usize,
}

impl Ref {
    pub fn new(row: usize, hole: usize) -> Result<Self, ParseError> {
        if row >= MAX_ROWS {
            return Err(ParseError::InvalidRow(
                isize::try_from(row).unwrap_or(isize::MAX),
            ));
        }
        if hole >= MAX_HOLES {
            return Err(ParseError::InvalidHole(
                isize::try_from(hole).unwrap_or(isize::MAX),
            ));
        }
        Ok(Self { row, hole })
    }

    /// Zero-based row index ("A" is 0, "AA" is 26)
    pub fn row(&self) -> usize {
        self.row
    }

    pub fn hole(&self) -> usize {
        self.hole
    }

    pub fn row_name(&self) -> String {
        row_name(self.row)
    }

    /// Move by a number of rows and holes
    pub fn offset(&self, rows: isize, holes: isize) -> Result<Self, ParseError> {
        let row = isize::try_from(self.row)
            .ok()
            .and_then(|row| row.checked_add(rows))
            .filter(|row| (0..MAX_ROWS as isize).contains(row))
            .ok_or_else(|| ParseError::InvalidRow((self.row as isize).saturating_add(rows)))?;
        let hole = isize::try_from(self.hole)
            .ok()
            .and_then(|hole| hole.checked_add(holes))
            .filter(|hole| (0..MAX_HOLES as isize).contains(hole))
            .ok_or_else(|| ParseError::InvalidHole((self.hole as isize).saturating_add(holes)))?;
        Self::new(row as usize, hole as usize)
    }
}

impl Display for Ref {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", row_name(self.row), self.hole)
    }
}

impl FromStr for Ref {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parser::Parser::new(s).parse_ref()
    }
}

impl TryFrom<&str> for Ref {
    type Error = ParseError;

    fn try_from(input: &str) -> Result<Self, Self::Error> {
        input.parse()
    }
}

/// Letters naming a row: A..Z, then AA, AB, ...
pub fn row_name(row: usize) -> String {
    let mut n = row + 1;
    let mut name = Vec::new();
    while n > 0 {
        n -= 1;
        name.push(b'A' + (n % 26) as u8);
        n /= 26;
    }
    name.iter().rev().map(|&b| b as char).collect()
}

/// Inverse of [`row_name`]
pub fn row_index(name: &str) -> Result<usize, ParseError> {
    if name.is_empty() || !name.bytes().all(|b| b.is_ascii_uppercase()) {
        return Err(ParseError::MalformedRef(name.to_owned()));
    }
    let mut n: usize = 0;
    for b in name.bytes() {
        n = n * 26 + (b - b'A' + 1) as usize;
        if n > MAX_ROWS {
            return Err(ParseError::InvalidRow(n as isize - 1));
        }
    }
    let row = n - 1;
    if row >= MAX_ROWS {
        return Err(ParseError::InvalidRow(row as isize));
    }
    Ok(row)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("A4", 0, 4)]
    #[case("Z0", 25, 0)]
    #[case("AA1", 26, 1)]
    #[case("AC13", 28, 13)]
    #[case("YZ7", 675, 7)]
    fn parses_refs(#[case] input: &str, #[case] row: usize, #[case] hole: usize) {
        let r: Ref = input.parse().unwrap();
        assert_eq!((r.row(), r.hole()), (row, hole));
    }

    #[rstest]
    #[case("A4", "A4")]
    #[case("A04", "A4")]
    #[case("AC013", "AC13")]
    #[case("B000", "B0")]
    fn formats_canonically(#[case] input: &str, #[case] expected: &str) {
        let r = Ref::try_from(input).unwrap();
        assert_eq!(r.to_string(), expected);
        assert_eq!(expected.parse::<Ref>().unwrap(), r);
    }

    #[test]
    fn row_names_are_a_bijection() {
        for i in 0..MAX_ROWS {
            let name = row_name(i);
            assert!(name.len() <= 2, "{name}");
            assert_eq!(row_index(&name), Ok(i));
        }
    }

    #[test]
    fn rejects_rows_past_two_letters() {
        assert_eq!("ZA1".parse::<Ref>(), Err(ParseError::InvalidRow(676)));
        assert!(matches!(
            "ZZZZZZZZZZZZZZ1".parse::<Ref>(),
            Err(ParseError::InvalidRow(_))
        ));
    }

    #[test]
    fn offsets() {
        let r: Ref = "Z3".parse().unwrap();
        assert_eq!(r.offset(1, 2).unwrap().to_string(), "AA5");
        assert_eq!(r.offset(-25, -3).unwrap().to_string(), "A0");
        assert_eq!(r.offset(-26, 0), Err(ParseError::InvalidRow(-1)));
        assert_eq!(r.offset(0, -4), Err(ParseError::InvalidHole(-1)));
        assert_eq!(r.offset(651, 0), Err(ParseError::InvalidRow(676)));
    }

    #[rstest]
    #[case(0, isize::MAX, ParseError::InvalidHole(isize::MAX))]
    #[case(isize::MAX, 0, ParseError::InvalidRow(isize::MAX))]
    #[case(0, 1, ParseError::InvalidHole(MAX_HOLES as isize))]
    #[case(isize::MIN, 0, ParseError::InvalidRow(isize::MIN))]
    fn offsets_far_off_the_board(
        #[case] rows: isize,
        #[case] holes: isize,
        #[case] expected: ParseError,
    ) {
        let r = Ref::new(0, MAX_HOLES - 1).unwrap();
        assert_eq!(r.offset(rows, holes), Err(expected));
    }

    #[rstest]
    #[case("A1000", 1000)]
    #[case("A9223372036854775807", isize::MAX)]
    fn rejects_holes_past_the_widest_board(#[case] input: &str, #[case] hole: isize) {
        assert_eq!(input.parse::<Ref>(), Err(ParseError::InvalidHole(hole)));
    }

    #[test]
    fn widest_hole_parses() {
        let r: Ref = "B999".parse().unwrap();
        assert_eq!(r.hole(), MAX_HOLES - 1);
        assert_eq!(Ref::new(0, MAX_HOLES), Err(ParseError::InvalidHole(1000)));
    }

    #[test]
    fn orders_row_major() {
        let mut refs: Vec<Ref> = ["B0", "A9", "A10", "AA0"]
            .iter()
            .map(|s| s.parse().unwrap())
            .collect();
        refs.sort();
        let names: Vec<_> = refs.iter().map(|r| r.to_string()).collect();
        assert_eq!(names, vec!["A9", "A10", "B0", "AA0"]);
    }
}
