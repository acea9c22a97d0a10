//! Random play from the opening position, checking the game's bookkeeping
//! after every accepted and rejected move.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use szachy::game::{GameState, Status};
use szachy::rules;
use szachy::{Side, Square};

const GAMES: u64 = 40;
const MAX_PLIES: usize = 400;

fn candidate_moves(game: &GameState) -> Vec<(Square, Square)> {
    game.board()
        .pieces()
        .filter(|(_, p)| p.side == game.side_to_move())
        .flat_map(|(from, _)| game.legal_destinations(from).into_iter().map(move |to| (from, to)))
        .collect()
}

#[test]
fn random_games_keep_invariants() {
    for seed in 0..GAMES {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut game = GameState::new();
        let mut accepted = 0usize;

        for _ in 0..MAX_PLIES {
            if game.is_over() {
                break;
            }

            // Throw in a random (usually bad) attempt now and then.
            if rng.gen_bool(0.3) {
                let before = game.board().clone();
                let side = game.side_to_move();
                let from = (rng.gen_range(0..9), rng.gen_range(0..9));
                let to = (rng.gen_range(0..9), rng.gen_range(0..9));
                if game.submit_coords(from, to).is_ok() {
                    accepted += 1;
                } else {
                    assert_eq!(game.board(), &before, "seed {seed}: rejection mutated the board");
                    assert_eq!(game.side_to_move(), side);
                }
                continue;
            }

            let moves = candidate_moves(&game);
            let Some(&(from, to)) = moves.choose(&mut rng) else {
                break;
            };
            let count_before = game.board().pieces().count();
            let mover = *game.board().piece_at(from).unwrap();

            let entry = game.submit_move(from, to).unwrap();
            accepted += 1;

            let count_after = game.board().pieces().count();
            assert_eq!(count_before - count_after, usize::from(entry.captured));
            assert_eq!(game.board().piece_at(to), Some(&mover));
            assert!(game.board().is_empty(from));
            let expected = if accepted % 2 == 0 { Side::White } else { Side::Black };
            assert_eq!(game.side_to_move(), expected, "seed {seed}");
        }

        assert_eq!(game.log().entries().len(), accepted);
        match game.status() {
            Status::Terminal { winner } => {
                assert!(game.board().find_king(winner).is_some());
                assert!(game.board().find_king(winner.opposite()).is_none());
            }
            Status::AwaitingMove(_) => {
                assert!(game.board().find_king(Side::White).is_some());
                assert!(game.board().find_king(Side::Black).is_some());
            }
        }
    }
}

#[test]
fn legality_never_allows_friendly_or_null_moves() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = GameState::new();
    for _ in 0..200 {
        if game.is_over() {
            break;
        }
        let board = game.board();
        for (from, piece) in board.pieces() {
            assert!(!rules::is_legal(piece, from, from, board));
            for to in Square::all() {
                if board.piece_at(to).is_some_and(|p| p.side == piece.side) {
                    assert!(!rules::is_legal(piece, from, to, board), "{from}-{to}");
                }
            }
        }
        let moves = candidate_moves(&game);
        let Some(&(from, to)) = moves.choose(&mut rng) else {
            break;
        };
        game.submit_move(from, to).unwrap();
    }
}
