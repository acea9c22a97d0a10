use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use szachy::config::Config;
use szachy::game::{GameEvent, GameState};
use szachy::session::{session_name_now, JsonLinesStore, SessionStore};
use szachy::Square;

/// Two players at one terminal. Type moves like `e2-e4`.
#[derive(Parser, Debug)]
#[command(name = "play")]
struct Args {
    /// JSON configuration file.
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// Where finished games are appended (overrides the config file).
    #[arg(long)]
    sessions: Option<PathBuf>,
}

const HELP: &str = "\
commands:
  e2-e4      move a piece
  moves e2   list destinations for the piece on e2
  board      show the board
  log        show the move log
  new        start over
  quit       leave";

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::load_or_default(&args.config)
        .with_context(|| format!("reading {}", args.config.display()))?;
    let store = JsonLinesStore::new(args.sessions.unwrap_or(config.sessions_path));

    let mut game = GameState::new();
    let events = game.subscribe();

    println!("{HELP}\n");
    println!("{}", game.board());
    prompt(&game)?;

    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        let mut words = line.split_whitespace();
        match (words.next(), words.next()) {
            (None, _) => {}
            (Some("quit" | "exit"), _) => break,
            (Some("help"), _) => println!("{HELP}"),
            (Some("board"), _) => println!("{}", game.board()),
            (Some("log"), _) => print!("{}", game.log().render()),
            (Some("new"), _) => {
                game.new_game();
                println!("{}", game.board());
            }
            (Some("moves"), Some(square)) => match square.parse::<Square>() {
                Ok(sq) => {
                    let targets: Vec<String> =
                        game.legal_destinations(sq).into_iter().map(Square::name).collect();
                    if targets.is_empty() {
                        println!("{sq}: none");
                    } else {
                        println!("{sq}: {}", targets.join(" "));
                    }
                }
                Err(e) => println!("{e}"),
            },
            (Some(_), _) => {
                if let Err(e) = game.submit_notation(&line) {
                    println!("rejected: {e}");
                }
            }
        }

        for event in events.try_iter() {
            match event {
                GameEvent::MoveAccepted(entry) => {
                    println!("{entry}");
                    println!("{}", game.board());
                }
                GameEvent::GameOver(winner) => {
                    println!("game over, {winner} wins");
                    let record = game.session_record(session_name_now());
                    store
                        .save(&record)
                        .with_context(|| format!("saving session to {}", store.path().display()))?;
                    println!("saved {} to {}", record.session_name, store.path().display());
                    println!("type `new` to play again");
                }
                GameEvent::NewGame
                | GameEvent::TurnChanged(_)
                | GameEvent::MoveRejected(_) => {}
            }
        }
        prompt(&game)?;
    }

    Ok(())
}

fn prompt(game: &GameState) -> Result<()> {
    if !game.is_over() {
        print!("{} to move> ", game.side_to_move());
    }
    io::stdout().flush()?;
    Ok(())
}
