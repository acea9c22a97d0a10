use std::fmt;

use serde::{Deserialize, Serialize};

use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    White,
    Black,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }

    /// Rank delta of a forward step. White starts at the bottom of the grid
    /// (ranks 6 and 7) and walks toward rank 0.
    pub fn forward(self) -> i32 {
        match self {
            Side::White => -1,
            Side::Black => 1,
        }
    }

    /// Rank the side's pawns start on.
    pub fn pawn_rank(self) -> u8 {
        match self {
            Side::White => 6,
            Side::Black => 1,
        }
    }

    pub fn back_rank(self) -> u8 {
        match self {
            Side::White => 7,
            Side::Black => 0,
        }
    }

    /// Single-letter prefix used in piece codes (`w_pawn`).
    fn prefix(self) -> char {
        match self {
            Side::White => 'w',
            Side::Black => 'b',
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::White => write!(f, "white"),
            Side::Black => write!(f, "black"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Pawn => "pawn",
            PieceKind::Knight => "knight",
            PieceKind::Bishop => "bishop",
            PieceKind::Rook => "rook",
            PieceKind::Queen => "queen",
            PieceKind::King => "king",
        }
    }

    /// Code used in log lines, e.g. `w_pawn`, `b_king`.
    pub fn code(self, side: Side) -> String {
        format!("{}_{}", side.prefix(), self.name())
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A piece on the board. `home` is where it stood when the game began.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
    pub home: Square,
}

impl Piece {
    pub fn new(kind: PieceKind, side: Side, home: Square) -> Self {
        Piece { kind, side, home }
    }

    pub fn code(&self) -> String {
        self.kind.code(self.side)
    }

    /// One-letter board glyph: uppercase for white, lowercase for black.
    pub fn glyph(&self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.side {
            Side::White => c.to_ascii_uppercase(),
            Side::Black => c,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_match_log_format() {
        let home = Square::new(4, 7).unwrap();
        assert_eq!(Piece::new(PieceKind::King, Side::White, home).code(), "w_king");
        assert_eq!(Piece::new(PieceKind::Pawn, Side::Black, home).code(), "b_pawn");
    }

    #[test]
    fn white_moves_up_the_grid() {
        assert_eq!(Side::White.forward(), -1);
        assert_eq!(Side::Black.forward(), 1);
        assert_eq!(Side::White.opposite(), Side::Black);
    }
}
