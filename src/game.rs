// =============================================================================
// Game state
//
// Owns the board, whose turn it is, the shared move log and the game-over
// flag. All mutation goes through `submit_move`, which validates against the
// movement rules, applies the move, flips the turn and then looks for a
// missing king. The game ends on king capture; there is no check, mate or
// draw detection.
//
// Callers must serialize calls (`&mut self` enforces it within one thread).
// Listeners receive `GameEvent`s over channels handed out by `subscribe`.
// =============================================================================

use crossbeam_channel::{unbounded, Receiver, Sender};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::board::Board;
use crate::error::MoveError;
use crate::log::{MoveEntry, MoveLog};
use crate::notation;
use crate::piece::{Piece, Side};
use crate::rules;
use crate::session::SessionRecord;
use crate::square::Square;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    AwaitingMove(Side),
    Terminal { winner: Side },
}

/// What listeners are told about.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GameEvent {
    NewGame,
    MoveAccepted(MoveEntry),
    MoveRejected(MoveError),
    TurnChanged(Side),
    GameOver(Side),
}

#[derive(Debug)]
pub struct GameState {
    board: Board,
    side_to_move: Side,
    log: MoveLog,
    winner: Option<Side>,
    subscribers: Vec<Sender<GameEvent>>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh game from the standard position, white to move.
    pub fn new() -> Self {
        Self::with_board(Board::standard(), Side::White)
    }

    /// Start from an arbitrary position. No king scan happens until the
    /// first move or an explicit `check_terminal`.
    pub fn with_board(board: Board, side_to_move: Side) -> Self {
        GameState {
            board,
            side_to_move,
            log: MoveLog::new(),
            winner: None,
            subscribers: Vec::new(),
        }
    }

    /// Reset to the standard position. Subscribers stay attached and the
    /// log handle stays shared; its contents are cleared.
    pub fn new_game(&mut self) {
        self.board = Board::standard();
        self.side_to_move = Side::White;
        self.winner = None;
        self.log.clear();
        info!("new game");
        self.emit(GameEvent::NewGame);
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Direct board access for setting up positions. Bypasses the rules.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn side_to_move(&self) -> Side {
        self.side_to_move
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_over(&self) -> bool {
        self.winner.is_some()
    }

    pub fn status(&self) -> Status {
        match self.winner {
            Some(winner) => Status::Terminal { winner },
            None => Status::AwaitingMove(self.side_to_move),
        }
    }

    /// Handle to the shared log. Clones see every later append.
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    /// A channel that receives every event from now on.
    pub fn subscribe(&mut self) -> Receiver<GameEvent> {
        let (tx, rx) = unbounded();
        self.subscribers.push(tx);
        rx
    }

    /// Squares the piece on `from` could move to right now. Empty if the
    /// square is empty, holds the wrong side's piece, or the game is over.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        match self.board.piece_at(from) {
            Some(p) if p.side == self.side_to_move && !self.is_over() => {
                rules::legal_destinations(from, &self.board)
            }
            _ => Vec::new(),
        }
    }

    /// Submit a move by raw `(file, rank)` coordinates.
    pub fn submit_coords(
        &mut self,
        from: (usize, usize),
        to: (usize, usize),
    ) -> Result<MoveEntry, MoveError> {
        let squares = Square::try_from(from).and_then(|f| Square::try_from(to).map(|t| (f, t)));
        match squares {
            Ok((from, to)) => self.submit_move(from, to),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Submit a move written like `e2-e4`.
    pub fn submit_notation(&mut self, text: &str) -> Result<MoveEntry, MoveError> {
        match notation::parse(text) {
            Ok((from, to)) => self.submit_move(from, to),
            Err(err) => Err(self.reject(err)),
        }
    }

    /// Validate and apply a move. On error nothing changes except an
    /// "illegal move" note in the log when a piece of the mover was involved.
    pub fn submit_move(&mut self, from: Square, to: Square) -> Result<MoveEntry, MoveError> {
        match self.apply(from, to) {
            Ok(entry) => Ok(entry),
            Err(err) => Err(self.reject(err)),
        }
    }

    fn apply(&mut self, from: Square, to: Square) -> Result<MoveEntry, MoveError> {
        if let Some(winner) = self.winner {
            return Err(MoveError::GameAlreadyOver { winner });
        }

        let piece = *self.board.piece_at(from).ok_or(MoveError::NoPieceAtOrigin(from))?;
        if piece.side != self.side_to_move {
            self.log_illegal(&piece, from, to);
            return Err(MoveError::WrongSideToMove {
                expected: self.side_to_move,
                found: piece.side,
            });
        }
        if let Err(err) = rules::legality(&piece, from, to, &self.board) {
            self.log_illegal(&piece, from, to);
            return Err(err);
        }

        let captured = self.board.remove(to);
        let displaced = self.board.move_piece(from, to);
        debug_assert!(displaced.is_none(), "destination was cleared before relocation");
        debug_assert!(self.board.is_empty(from), "origin still occupied after move");
        debug_assert_eq!(self.board.piece_at(to), Some(&piece), "mover not on destination");

        let entry = MoveEntry::new(&piece, from, to, captured.as_ref());
        self.log.append_move(entry);
        debug!(
            side = %piece.side,
            piece = %piece.kind,
            %from,
            %to,
            captured = entry.captured,
            "move accepted"
        );

        self.side_to_move = self.side_to_move.opposite();
        self.emit(GameEvent::MoveAccepted(entry));
        self.emit(GameEvent::TurnChanged(self.side_to_move));

        self.check_terminal();
        Ok(entry)
    }

    /// Look for both kings. If exactly one is gone the other side wins and
    /// the game becomes terminal. Returns the winner, if any.
    pub fn check_terminal(&mut self) -> Option<Side> {
        if self.winner.is_some() {
            return self.winner;
        }

        let white = self.board.find_king(Side::White).is_some();
        let black = self.board.find_king(Side::Black).is_some();
        let winner = match (white, black) {
            (true, true) => return None,
            (true, false) => Side::White,
            (false, true) => Side::Black,
            (false, false) => {
                warn!("no king of either side on the board, no winner declared");
                return None;
            }
        };

        self.winner = Some(winner);
        self.log.append_note(format!("Game Over: {} Wins!", title(winner)));
        info!(%winner, "game over");
        self.emit(GameEvent::GameOver(winner));
        Some(winner)
    }

    /// The record a session store keeps for this game.
    pub fn session_record(&self, session_name: impl Into<String>) -> SessionRecord {
        SessionRecord {
            session_name: session_name.into(),
            move_history: self.log.render(),
        }
    }

    fn log_illegal(&self, piece: &Piece, from: Square, to: Square) {
        self.log.append_note(format!(
            "Player {}: Illegal move attempted by {} from square {from} to square {to}. Move denied.",
            self.side_to_move,
            piece.code()
        ));
    }

    fn reject(&mut self, err: MoveError) -> MoveError {
        debug!(error = %err, "move rejected");
        self.emit(GameEvent::MoveRejected(err.clone()));
        err
    }

    fn emit(&mut self, event: GameEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }
}

fn title(side: Side) -> &'static str {
    match side {
        Side::White => "White",
        Side::Black => "Black",
    }
}
