//! Error types.
//!
//! `MoveError` is what the rules core reports for bad input. Every variant is
//! recoverable: the game is left exactly as it was before the call.

use crate::piece::{PieceKind, Side};
use crate::square::Square;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MoveError {
    #[error("square ({file}, {rank}) is off the board")]
    InvalidSquare { file: usize, rank: usize },

    #[error("no piece on {0}")]
    NoPieceAtOrigin(Square),

    #[error("it is {expected}'s turn, the piece on the origin square is {found}")]
    WrongSideToMove { expected: Side, found: Side },

    #[error("{kind} cannot move from {from} to {to}")]
    IllegalDestination { kind: PieceKind, from: Square, to: Square },

    #[error("malformed move notation {0:?}, expected e.g. \"e2-e4\"")]
    MalformedNotation(String),

    #[error("game is already over, {winner} won")]
    GameAlreadyOver { winner: Side },
}

/// Failures of the session store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("session store I/O failed")]
    Io(#[from] std::io::Error),

    #[error("malformed session record on line {line}")]
    Decode {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode session record")]
    Encode(#[source] serde_json::Error),
}

/// Failures reading or writing the JSON configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file I/O failed")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON")]
    Json(#[from] serde_json::Error),
}
