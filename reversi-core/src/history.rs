//! Snapshot history and the exported match record.
//!
//! One snapshot is recorded per board mutation, plus the opening state, so
//! `len() == moves applied + 1`. Passes do not touch the board and are not
//! recorded.

use serde::Serialize;

use crate::{GameState, Piece};

/// Append-only list of game states, trimmed from the top on undo.
#[derive(Clone, Debug)]
pub struct History {
    snapshots: Vec<GameState>,
}

impl History {
    /// Start a history at `initial`.
    pub fn new(initial: GameState) -> History {
        History {
            snapshots: vec![initial],
        }
    }

    /// Drop everything and start over at `initial`.
    pub fn reset(&mut self, initial: GameState) {
        self.snapshots.clear();
        self.snapshots.push(initial);
    }

    pub fn push(&mut self, state: GameState) {
        self.snapshots.push(state);
    }

    /// Number of snapshots, never zero.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Most recent snapshot.
    pub fn latest(&self) -> &GameState {
        // Never empty: constructors seed it and pop/truncate keep the opening.
        &self.snapshots[self.snapshots.len() - 1]
    }

    /// Remove the most recent snapshot and return the one below it.
    ///
    /// The opening snapshot is never removed.
    pub fn pop(&mut self) -> Option<&GameState> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop();
        Some(self.latest())
    }

    /// Keep only the first `len` snapshots (at least one).
    pub fn truncate(&mut self, len: usize) {
        self.snapshots.truncate(len.max(1));
    }

    pub fn snapshots(&self) -> &[GameState] {
        &self.snapshots
    }

    /// Project the history into an exportable record.
    pub fn record(&self, first: Piece) -> MatchRecord {
        MatchRecord {
            first: (first as u8).to_string(),
            history: self.snapshots.iter().map(|s| s.board.to_rows()).collect(),
            newest: self
                .snapshots
                .iter()
                .map(|s| match s.last_placed {
                    Some(at) => [at.row() as i8, at.col() as i8],
                    None => MatchRecord::NO_PLACEMENT,
                })
                .collect(),
            reversal: self
                .snapshots
                .iter()
                .map(|s| {
                    s.last_captures
                        .iter()
                        .map(|c| [c.row(), c.col()])
                        .collect()
                })
                .collect(),
        }
    }
}

/// Write-only match log: one entry per history snapshot in each sequence.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchRecord {
    /// Piece that moved first, as the string "1" or "2".
    pub first: String,
    /// Board snapshots as rows of cell values.
    pub history: Vec<[[u8; 8]; 8]>,
    /// Last placed cell per snapshot, `[-1, -1]` before the first move.
    pub newest: Vec<[i8; 2]>,
    /// Captured cells per snapshot.
    pub reversal: Vec<Vec<[u8; 2]>>,
}

impl MatchRecord {
    pub const NO_PLACEMENT: [i8; 2] = [-1, -1];

    /// Pretty-printed JSON document.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
