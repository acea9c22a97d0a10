use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use szachy::game::GameState;
use szachy::session::session_name_now;

/// Replay a file of `e2-e4` style moves (one per line, `#` starts a comment)
/// and print the resulting session record as JSON.
#[derive(Parser, Debug)]
#[command(name = "replay")]
struct Args {
    /// File with one move per line.
    moves: PathBuf,

    /// Session name to record; defaults to one built from the clock.
    #[arg(long)]
    name: Option<String>,

    /// Stop at the first rejected move instead of logging it and going on.
    #[arg(long)]
    strict: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let text = fs::read_to_string(&args.moves)
        .with_context(|| format!("reading {}", args.moves.display()))?;

    let mut game = GameState::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        if let Err(e) = game.submit_notation(line) {
            if args.strict {
                bail!("line {}: {line}: {e}", i + 1);
            }
            warn!(line = i + 1, text = line, error = %e, "move rejected");
        }
    }

    let record = game.session_record(args.name.unwrap_or_else(session_name_now));
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}
