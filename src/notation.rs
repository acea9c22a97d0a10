use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;
use crate::square::Square;

/// An origin/destination pair, written `e2-e4`.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: Square,
    pub to: Square,
}

impl Move {
    /// Parse `<file><rank>-<file><rank>`, files `a`-`h` lowercase and ranks
    /// `1`-`8`. Surrounding whitespace is ignored, nothing else is.
    pub fn parse(text: &str) -> Result<Move, MoveError> {
        let malformed = || MoveError::MalformedNotation(text.to_string());
        let bytes = text.trim().as_bytes();
        if bytes.len() != 5 || bytes[2] != b'-' {
            return Err(malformed());
        }
        let from = square_from_bytes(bytes[0], bytes[1]).ok_or_else(malformed)?;
        let to = square_from_bytes(bytes[3], bytes[4]).ok_or_else(malformed)?;
        Ok(Move { from, to })
    }
}

/// Parse move notation into an (origin, destination) pair.
pub fn parse(text: &str) -> Result<(Square, Square), MoveError> {
    Move::parse(text).map(|m| (m.from, m.to))
}

fn square_from_bytes(file: u8, rank: u8) -> Option<Square> {
    if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
        return None;
    }
    Square::new(file - b'a', b'8' - rank)
}

impl FromStr for Move {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::parse(s)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for Square {
    type Err = MoveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let square = match s.as_bytes() {
            &[file, rank] => square_from_bytes(file, rank),
            _ => None,
        };
        square.ok_or_else(|| MoveError::MalformedNotation(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_e2_e4_into_grid_coordinates() {
        let (from, to) = parse("e2-e4").unwrap();
        assert_eq!(from, Square::new(4, 6).unwrap());
        assert_eq!(to, Square::new(4, 4).unwrap());
    }

    #[test]
    fn corners() {
        let m = Move::parse("a8-h1").unwrap();
        assert_eq!(m.from, Square::new(0, 0).unwrap());
        assert_eq!(m.to, Square::new(7, 7).unwrap());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert!(parse("  g1-f3\n").is_ok());
    }

    #[test]
    fn malformed_inputs_are_rejected() {
        for bad in [
            "", "e2", "e2e4", "e2-e44", "e2 e4", "e2_e4", "E2-E4", "z9-e4", "i2-i4",
            "e0-e4", "e2-e9", "e-2e4", "2e-4e", "e2--e4", "ée-e4",
        ] {
            assert_eq!(
                parse(bad),
                Err(MoveError::MalformedNotation(bad.to_string())),
                "{bad:?}"
            );
        }
    }

    #[test]
    fn display_round_trips() {
        let m: Move = "b1-c3".parse().unwrap();
        assert_eq!(m.to_string(), "b1-c3");
    }

    #[test]
    fn square_from_str() {
        assert_eq!("h8".parse::<Square>().unwrap(), Square::new(7, 0).unwrap());
        assert!("h9".parse::<Square>().is_err());
        assert!("h".parse::<Square>().is_err());
    }
}
