use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::MoveError;

/// A cell on the 8×8 grid.
///
/// Coordinates follow the on-screen layout: file 0 is the `a` file, rank 0 is
/// the top row (black's back rank, printed as `8`). So `e2` is `(4, 6)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Square {
    file: u8,
    rank: u8,
}

impl Square {
    /// Returns `None` when either coordinate is outside `0..8`.
    pub const fn new(file: u8, rank: u8) -> Option<Square> {
        if file < 8 && rank < 8 {
            Some(Square { file, rank })
        } else {
            None
        }
    }

    /// Offset by a signed delta, staying on the board.
    pub fn offset(self, df: i32, dr: i32) -> Option<Square> {
        let f = self.file as i32 + df;
        let r = self.rank as i32 + dr;
        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square { file: f as u8, rank: r as u8 })
        } else {
            None
        }
    }

    pub const fn file(self) -> u8 {
        self.file
    }

    pub const fn rank(self) -> u8 {
        self.rank
    }

    /// Every square, rank 0 first.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8u8).flat_map(|rank| (0..8u8).map(move |file| Square { file, rank }))
    }

    /// Algebraic name, e.g. `e2`.
    pub fn name(self) -> String {
        self.to_string()
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = MoveError;

    fn try_from((file, rank): (usize, usize)) -> Result<Self, Self::Error> {
        if file < 8 && rank < 8 {
            Ok(Square { file: file as u8, rank: rank as u8 })
        } else {
            Err(MoveError::InvalidSquare { file, rank })
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file) as char;
        let rank = (b'8' - self.rank) as char;
        write!(f, "{file}{rank}")
    }
}
