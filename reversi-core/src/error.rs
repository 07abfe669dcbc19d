//! Error types.

use thiserror::Error;

use crate::Coord;

/// Why a human selection was rejected. The state is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("it is not the human player's turn")]
    NotYourTurn,
    #[error("the round is over")]
    RoundOver,
    #[error("{0} is not a legal placement")]
    Illegal(Coord),
}

/// Coordinate text that could not be turned into a board cell.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordError {
    #[error("expected `row col`, got `{0}`")]
    Malformed(String),
    #[error("({row},{col}) is off the board")]
    OutOfBounds { row: usize, col: usize },
}

/// Grid handed to [`crate::Board::from_rows`] holds something other than 0, 1 or 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell ({row},{col}) holds {value}, expected 0, 1 or 2")]
    InvalidCell { row: usize, col: usize, value: u8 },
}

/// Rejected match configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("unknown strategy `{0}` (expected random or greedy)")]
    UnknownStrategy(String),
    #[error("strategy index {0} out of range")]
    StrategyIndex(usize),
    #[error("unknown delay preset `{0}` (expected none or default)")]
    UnknownDelay(String),
    #[error("unknown piece `{0}` (expected one or two)")]
    UnknownPiece(String),
}
