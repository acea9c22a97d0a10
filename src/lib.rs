pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod log;
pub mod notation;
pub mod piece;
pub mod rules;
pub mod session;
pub mod square;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use board::Board;
pub use error::MoveError;
pub use game::{GameEvent, GameState, Status};
pub use log::{LogLine, MoveEntry, MoveLog};
pub use piece::{Piece, PieceKind, Side};
pub use square::Square;
