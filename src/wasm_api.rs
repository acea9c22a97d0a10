use crate::game::{GameState, Status};
use crate::piece::{PieceKind, Side};
use crate::session::session_name_at;
use crate::square::Square;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct SquarePiece {
    piece_type: String,
    color: String,
}

#[derive(Serialize)]
struct BoardState {
    squares: Vec<Vec<Option<SquarePiece>>>,
    current_turn: String,
    game_over: bool,
    winner: Option<String>,
    log: String,
}

#[derive(Serialize)]
struct MoveResult {
    #[serde(flatten)]
    board_state: Option<BoardState>,
    error: Option<String>,
}

fn kind_to_string(kind: PieceKind) -> String {
    match kind {
        PieceKind::King => "King".to_string(),
        PieceKind::Queen => "Queen".to_string(),
        PieceKind::Rook => "Rook".to_string(),
        PieceKind::Bishop => "Bishop".to_string(),
        PieceKind::Knight => "Knight".to_string(),
        PieceKind::Pawn => "Pawn".to_string(),
    }
}

fn side_to_string(side: Side) -> String {
    match side {
        Side::White => "White".to_string(),
        Side::Black => "Black".to_string(),
    }
}

fn build_board_state(game: &GameState) -> BoardState {
    let squares = (0..8u8)
        .map(|rank| {
            (0..8u8)
                .map(|file| {
                    Square::new(file, rank)
                        .and_then(|sq| game.board().piece_at(sq))
                        .map(|p| SquarePiece {
                            piece_type: kind_to_string(p.kind),
                            color: side_to_string(p.side),
                        })
                })
                .collect()
        })
        .collect();

    let winner = match game.status() {
        Status::Terminal { winner } => Some(side_to_string(winner)),
        Status::AwaitingMove(_) => None,
    };

    BoardState {
        squares,
        current_turn: side_to_string(game.side_to_move()),
        game_over: game.is_over(),
        winner,
        log: game.log().render(),
    }
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn move_result(game: &GameState, outcome: Result<(), String>) -> JsValue {
    let result = match outcome {
        Ok(()) => MoveResult { board_state: Some(build_board_state(game)), error: None },
        Err(error) => MoveResult { board_state: None, error: Some(error) },
    };
    to_js(&result)
}

#[wasm_bindgen]
pub struct Game {
    state: GameState,
}

#[wasm_bindgen]
impl Game {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Game {
        Game { state: GameState::new() }
    }

    pub fn new_game(&mut self) {
        self.state.new_game();
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&build_board_state(&self.state))
    }

    /// Coordinates are `(file, rank)` with rank 0 at the top.
    pub fn make_move(
        &mut self,
        from_file: usize,
        from_rank: usize,
        to_file: usize,
        to_rank: usize,
    ) -> JsValue {
        let outcome = self
            .state
            .submit_coords((from_file, from_rank), (to_file, to_rank))
            .map(|_| ())
            .map_err(|e| e.to_string());
        move_result(&self.state, outcome)
    }

    pub fn submit_notation(&mut self, text: &str) -> JsValue {
        let outcome = self.state.submit_notation(text).map(|_| ()).map_err(|e| e.to_string());
        move_result(&self.state, outcome)
    }

    pub fn get_legal_moves_for_square(&self, file: usize, rank: usize) -> JsValue {
        let targets: Vec<[u8; 2]> = Square::try_from((file, rank))
            .map(|sq| self.state.legal_destinations(sq))
            .unwrap_or_default()
            .into_iter()
            .map(|sq| [sq.file(), sq.rank()])
            .collect();
        to_js(&targets)
    }

    pub fn get_log(&self) -> String {
        self.state.log().render()
    }

    /// Session record named from the browser clock, for the host to persist.
    pub fn session_record(&self) -> JsValue {
        let millis = js_sys::Date::now() as i64;
        let name = chrono::DateTime::from_timestamp_millis(millis)
            .map(|t| session_name_at(t.naive_utc()))
            .unwrap_or_else(|| format!("Session_data_{millis}"));
        to_js(&self.state.session_record(name))
    }
}
