//! Automated players.
//!
//! A strategy maps the position and the legal-move table of the side to move
//! to one of the table's placements. Neither strategy looks ahead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::{Board, Coord, LegalMoves, Piece};

/// Decision function of an automated player.
pub trait Strategy: Send {
    /// Short display name.
    fn name(&self) -> &'static str;

    /// One-line description of how the strategy plays.
    fn description(&self) -> &'static str;

    /// Pick a placement from `moves`.
    ///
    /// Returns None only for an empty table; callers pass instead of asking.
    fn decide(&mut self, board: &Board, to_move: Piece, moves: &LegalMoves) -> Option<Coord>;
}

/// Uniformly random legal placement.
#[derive(Clone, Debug)]
pub struct RandomStrategy {
    rng: StdRng,
}

impl RandomStrategy {
    /// Seeded from OS entropy.
    pub fn new() -> RandomStrategy {
        RandomStrategy {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Deterministic stream for a given seed.
    pub fn seeded(seed: u64) -> RandomStrategy {
        RandomStrategy {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomStrategy {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for RandomStrategy {
    fn name(&self) -> &'static str {
        "Muddler"
    }

    fn description(&self) -> &'static str {
        "Knows nothing at all; drops a piece on any legal cell at random."
    }

    fn decide(&mut self, _board: &Board, _to_move: Piece, moves: &LegalMoves) -> Option<Coord> {
        if moves.is_empty() {
            return None;
        }
        let idx = self.rng.random_range(0..moves.len());
        moves.get(idx).map(|p| p.at)
    }
}

/// Placement flipping the most pieces; ties go to the earliest in scan order.
#[derive(Clone, Copy, Debug, Default)]
pub struct GreedyMaxCapture;

impl Strategy for GreedyMaxCapture {
    fn name(&self) -> &'static str {
        "Greedy"
    }

    fn description(&self) -> &'static str {
        "Always takes the cell that flips the most pieces right now."
    }

    fn decide(&mut self, _board: &Board, _to_move: Piece, moves: &LegalMoves) -> Option<Coord> {
        let mut best: Option<(Coord, usize)> = None;
        for placement in moves.iter() {
            let size = placement.captures.len();
            // Strictly greater: later equal-sized candidates never replace the first.
            if best.map_or(true, |(_, best_size)| size > best_size) {
                best = Some((placement.at, size));
            }
        }
        best.map(|(at, _)| at)
    }
}
