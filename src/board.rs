use std::fmt;

use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceKind, Side};
use crate::square::Square;

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 8×8 grid. A plain container: it never checks whether a move is legal.
///
/// `squares[rank][file]`, with rank 0 at the top of the screen.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board { squares: [[None; 8]; 8] }
    }

    /// Standard opening position: black on ranks 0-1, white on ranks 6-7.
    pub fn standard() -> Self {
        let mut board = Board::empty();
        for side in [Side::Black, Side::White] {
            let back = side.back_rank();
            let pawns = side.pawn_rank();
            for (file, kind) in BACK_RANK.iter().enumerate() {
                let file = file as u8;
                board.put(*kind, side, at(file, back));
                board.put(PieceKind::Pawn, side, at(file, pawns));
            }
        }
        board
    }

    /// Place a fresh piece whose home square is `square`.
    pub fn put(&mut self, kind: PieceKind, side: Side, square: Square) -> Option<Piece> {
        self.place(Piece::new(kind, side, square), square)
    }

    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.squares[square.rank() as usize][square.file() as usize].as_ref()
    }

    pub fn is_empty(&self, square: Square) -> bool {
        self.piece_at(square).is_none()
    }

    /// Put `piece` on `square`, returning whatever was there.
    pub fn place(&mut self, piece: Piece, square: Square) -> Option<Piece> {
        self.slot(square).replace(piece)
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.slot(square).take()
    }

    /// Relocate the occupant of `from` to `to`. Returns the piece that stood
    /// on `to`, if any. Moving from an empty square only clears `to`.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        match self.remove(from) {
            Some(piece) => self.place(piece, to),
            None => self.remove(to),
        }
    }

    /// Reverse a `move_piece(from, to)` that returned `captured`.
    pub fn unmove_piece(&mut self, from: Square, to: Square, captured: Option<Piece>) {
        let piece = self.remove(to);
        if let Some(piece) = piece {
            self.place(piece, from);
        }
        if let Some(captured) = captured {
            self.place(captured, to);
        }
    }

    pub fn find_king(&self, side: Side) -> Option<Square> {
        self.pieces()
            .find(|(_, p)| p.kind == PieceKind::King && p.side == side)
            .map(|(sq, _)| sq)
    }

    /// All occupied squares, rank 0 first.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, &Piece)> + '_ {
        Square::all().filter_map(move |sq| self.piece_at(sq).map(|p| (sq, p)))
    }

    fn slot(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.squares[square.rank() as usize][square.file() as usize]
    }
}

fn at(file: u8, rank: u8) -> Square {
    match Square::new(file, rank) {
        Some(sq) => sq,
        None => unreachable!("setup square ({file}, {rank}) is on the board"),
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in 0..8u8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8u8 {
                let glyph = self.piece_at(at(file, rank)).map_or('.', Piece::glyph);
                write!(f, " {glyph}")?;
            }
            writeln!(f)?;
        }
        writeln!(f, "   a b c d e f g h")
    }
}
