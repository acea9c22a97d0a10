//! Shared move log.
//!
//! The game appends to it; a display may read it from another thread. A
//! `MoveLog` is a handle: clones share one underlying log.

use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::piece::{Piece, PieceKind, Side};
use crate::square::Square;

/// One accepted move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveEntry {
    pub side: Side,
    pub piece_kind: PieceKind,
    pub origin: Square,
    pub destination: Square,
    pub captured: bool,
    pub captured_kind: Option<PieceKind>,
}

impl MoveEntry {
    pub fn new(
        piece: &Piece,
        origin: Square,
        destination: Square,
        captured: Option<&Piece>,
    ) -> Self {
        MoveEntry {
            side: piece.side,
            piece_kind: piece.kind,
            origin,
            destination,
            captured: captured.is_some(),
            captured_kind: captured.map(|p| p.kind),
        }
    }
}

impl fmt::Display for MoveEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Player {}: Moved {} from square {} to square {}",
            self.side,
            self.piece_kind.code(self.side),
            self.origin,
            self.destination
        )?;
        if let Some(kind) = self.captured_kind {
            write!(f, " capturing {}", kind.code(self.side.opposite()))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLine {
    Move(MoveEntry),
    Note(String),
}

impl fmt::Display for LogLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLine::Move(entry) => fmt::Display::fmt(entry, f),
            LogLine::Note(text) => f.write_str(text),
        }
    }
}

#[derive(Clone, Default, Debug)]
pub struct MoveLog {
    lines: Arc<Mutex<Vec<LogLine>>>,
}

impl MoveLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&self, line: LogLine) {
        self.lines.lock().push(line);
    }

    pub fn append_move(&self, entry: MoveEntry) {
        self.append(LogLine::Move(entry));
    }

    pub fn append_note(&self, text: impl Into<String>) {
        self.append(LogLine::Note(text.into()));
    }

    /// The whole log as text, one line per entry, in append order.
    pub fn render(&self) -> String {
        let lines = self.lines.lock();
        let mut out = String::new();
        for line in lines.iter() {
            out.push_str(&line.to_string());
            out.push('\n');
        }
        out
    }

    pub fn clear(&self) {
        self.lines.lock().clear();
    }

    /// Snapshot of every line.
    pub fn lines(&self) -> Vec<LogLine> {
        self.lines.lock().clone()
    }

    /// Snapshot of the accepted moves only.
    pub fn entries(&self) -> Vec<MoveEntry> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| match line {
                LogLine::Move(entry) => Some(*entry),
                LogLine::Note(_) => None,
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn sq(name: &str) -> Square {
        name.parse().unwrap()
    }

    fn pawn_push() -> MoveEntry {
        let pawn = Piece::new(PieceKind::Pawn, Side::White, sq("e2"));
        MoveEntry::new(&pawn, sq("e2"), sq("e4"), None)
    }

    #[test]
    fn renders_in_append_order() {
        let log = MoveLog::new();
        log.append_move(pawn_push());
        log.append_note("Game Over: White Wins!");
        assert_eq!(
            log.render(),
            "Player white: Moved w_pawn from square e2 to square e4\nGame Over: White Wins!\n"
        );
        assert_eq!(log.entries(), vec![pawn_push()]);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn capture_names_the_victim() {
        let rook = Piece::new(PieceKind::Rook, Side::Black, sq("a8"));
        let king = Piece::new(PieceKind::King, Side::White, sq("e1"));
        let entry = MoveEntry::new(&rook, sq("a1"), sq("e1"), Some(&king));
        assert!(entry.captured);
        assert_eq!(
            entry.to_string(),
            "Player black: Moved b_rook from square a1 to square e1 capturing w_king"
        );
    }

    #[test]
    fn clones_share_the_log_and_clear_empties_it() {
        let log = MoveLog::new();
        let view = log.clone();
        log.append_move(pawn_push());
        assert_eq!(view.len(), 1);
        view.clear();
        assert!(log.is_empty());
        assert_eq!(log.render(), "");
    }

    #[test]
    fn concurrent_appends_never_interleave() {
        let log = MoveLog::new();
        let writers: Vec<_> = (0..4)
            .map(|i| {
                let log = log.clone();
                thread::spawn(move || {
                    for n in 0..100 {
                        log.append_note(format!("writer {i} line {n}"));
                    }
                })
            })
            .collect();
        let reader = {
            let log = log.clone();
            thread::spawn(move || {
                for _ in 0..50 {
                    let text = log.render();
                    assert!(text.is_empty() || text.ends_with('\n'));
                    assert!(text.lines().all(|l| l.starts_with("writer ")));
                }
            })
        };
        for w in writers {
            w.join().unwrap();
        }
        reader.join().unwrap();
        assert_eq!(log.len(), 400);
        assert_eq!(log.render().lines().count(), 400);
    }
}
