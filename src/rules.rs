//! Movement rules.
//!
//! One entry point, [`is_legal`], checks the destination once and then
//! dispatches on [`PieceKind`]. Nothing here mutates the board. There is no
//! check detection, castling, en passant or promotion: a game ends when a
//! king is actually captured.

use crate::board::Board;
use crate::error::MoveError;
use crate::piece::{Piece, PieceKind, Side};
use crate::square::Square;

const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

const STRAIGHT_DIRS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];
const DIAG_DIRS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

/// Can `piece`, standing on `from`, move to `to` on `board`?
pub fn is_legal(piece: &Piece, from: Square, to: Square, board: &Board) -> bool {
    if from == to {
        return false;
    }
    // Friendly-occupied squares are never a destination.
    if board.piece_at(to).is_some_and(|p| p.side == piece.side) {
        return false;
    }

    match piece.kind {
        PieceKind::Pawn => pawn_move(piece.side, from, to, board),
        PieceKind::Knight => knight_move(from, to),
        PieceKind::Bishop => diagonal(from, to) && path_clear(from, to, board),
        PieceKind::Rook => straight(from, to) && path_clear(from, to, board),
        PieceKind::Queen => {
            (straight(from, to) || diagonal(from, to)) && path_clear(from, to, board)
        }
        PieceKind::King => king_move(from, to),
    }
}

/// [`is_legal`] with the rejection spelled out.
pub fn legality(piece: &Piece, from: Square, to: Square, board: &Board) -> Result<(), MoveError> {
    if is_legal(piece, from, to, board) {
        Ok(())
    } else {
        Err(MoveError::IllegalDestination { kind: piece.kind, from, to })
    }
}

/// Every square the piece on `from` may move to. Empty when `from` is empty.
pub fn legal_destinations(from: Square, board: &Board) -> Vec<Square> {
    let Some(piece) = board.piece_at(from) else {
        return Vec::new();
    };
    Square::all()
        .filter(|&to| is_legal(piece, from, to, board))
        .collect()
}

fn deltas(from: Square, to: Square) -> (i32, i32) {
    (
        to.file() as i32 - from.file() as i32,
        to.rank() as i32 - from.rank() as i32,
    )
}

fn pawn_move(side: Side, from: Square, to: Square, board: &Board) -> bool {
    let dir = side.forward();
    let (df, dr) = deltas(from, to);

    // Single push
    if df == 0 && dr == dir {
        return board.is_empty(to);
    }

    // Double push from the starting rank
    if df == 0 && dr == 2 * dir && from.rank() == side.pawn_rank() {
        let Some(between) = from.offset(0, dir) else {
            return false;
        };
        return board.is_empty(between) && board.is_empty(to);
    }

    // Diagonal capture; the central check already excluded friendly pieces
    if df.abs() == 1 && dr == dir {
        return !board.is_empty(to);
    }

    false
}

fn knight_move(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    matches!((df.abs(), dr.abs()), (1, 2) | (2, 1))
}

fn king_move(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    df.abs() <= 1 && dr.abs() <= 1
}

fn straight(from: Square, to: Square) -> bool {
    from.file() == to.file() || from.rank() == to.rank()
}

fn diagonal(from: Square, to: Square) -> bool {
    let (df, dr) = deltas(from, to);
    df.abs() == dr.abs()
}

/// Every square strictly between `from` and `to` is empty. Only meaningful
/// when the two share a line or a diagonal.
fn path_clear(from: Square, to: Square, board: &Board) -> bool {
    let (df, dr) = deltas(from, to);
    let (sf, sr) = (df.signum(), dr.signum());
    let mut cur = from;
    loop {
        cur = match cur.offset(sf, sr) {
            Some(next) => next,
            None => return false,
        };
        if cur == to {
            return true;
        }
        if !board.is_empty(cur) {
            return false;
        }
    }
}

/// Does any `attacker` piece attack `square`? Pawns attack diagonally
/// forward only. Turn order and king safety are ignored.
pub fn square_attacked_by(square: Square, attacker: Side, board: &Board) -> bool {
    let holds = |sq: Option<Square>, kinds: &[PieceKind]| {
        sq.and_then(|sq| board.piece_at(sq))
            .is_some_and(|p| p.side == attacker && kinds.contains(&p.kind))
    };

    if KNIGHT_OFFSETS
        .iter()
        .any(|&(df, dr)| holds(square.offset(df, dr), &[PieceKind::Knight]))
    {
        return true;
    }

    for df in -1..=1 {
        for dr in -1..=1 {
            if (df, dr) != (0, 0) && holds(square.offset(df, dr), &[PieceKind::King]) {
                return true;
            }
        }
    }

    // A pawn one step "behind" the square, on an adjacent file, attacks it.
    let behind = -attacker.forward();
    if [-1, 1]
        .iter()
        .any(|&df| holds(square.offset(df, behind), &[PieceKind::Pawn]))
    {
        return true;
    }

    let rays = [
        (&STRAIGHT_DIRS, [PieceKind::Rook, PieceKind::Queen]),
        (&DIAG_DIRS, [PieceKind::Bishop, PieceKind::Queen]),
    ];
    for (dirs, sliders) in rays {
        for &(df, dr) in dirs {
            let mut cur = square.offset(df, dr);
            while let Some(sq) = cur {
                if let Some(p) = board.piece_at(sq) {
                    if p.side == attacker && sliders.contains(&p.kind) {
                        return true;
                    }
                    break;
                }
                cur = sq.offset(df, dr);
            }
        }
    }

    false
}
