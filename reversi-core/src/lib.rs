//! Reversi game logic with bitboard representation.
//!
//! # Board Encoding (2 × 64-bit)
//!
//! ```text
//! one: bit i set => PlayerOne occupies cell i
//! two: bit i set => PlayerTwo occupies cell i
//! one & two == 0 (a cell holds at most one piece)
//!
//! Cell indices (row-major order):
//!   (0,0)=0   (0,1)=1   ...  (0,7)=7
//!   (1,0)=8   (1,1)=9   ...  (1,7)=15
//!   ...
//!   (7,0)=56  (7,1)=57  ...  (7,7)=63
//! ```
//!
//! # Capture Sets
//!
//! A capture set is a 64-bit mask over the same cell indices. Iterating a
//! capture set yields coordinates in row-major order.
//!
//! # Placement Order
//!
//! [`Board::legal_moves`] scans cells in row-major order, so the placement list
//! of a [`LegalMoves`] table is always sorted by cell index. The automated
//! players rely on this order.

use std::fmt;
use std::str::FromStr;

pub mod config;
pub mod controller;
pub mod error;
pub mod history;
pub mod strategy;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::{AiDelay, MatchConfig, StrategyKind};
pub use controller::{AiTicket, Phase, TurnController, Verdict, View};
pub use error::{BoardError, ConfigError, CoordError, MoveError};
pub use history::{History, MatchRecord};
pub use strategy::{GreedyMaxCapture, RandomStrategy, Strategy};

/// Side length of the board.
pub const BOARD_SIZE: u8 = 8;

/// Number of cells on the board.
pub const CELLS: usize = 64;

/// The 8 walking directions as (row delta, col delta).
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Piece identifier. `One` always moves first.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[repr(u8)]
pub enum Piece {
    One = 1,
    Two = 2,
}

impl Piece {
    /// Get the opposing piece.
    #[inline]
    pub fn opponent(self) -> Piece {
        match self {
            Piece::One => Piece::Two,
            Piece::Two => Piece::One,
        }
    }

    /// Convert from u8 (1 or 2) to Piece.
    #[inline]
    pub fn from_bits(bits: u8) -> Option<Piece> {
        match bits {
            1 => Some(Piece::One),
            2 => Some(Piece::Two),
            _ => None,
        }
    }

    /// Single-character symbol used in text renderings.
    pub fn symbol(self) -> char {
        match self {
            Piece::One => 'X',
            Piece::Two => 'O',
        }
    }
}

/// Position on the 8x8 board (0-63), row-major.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash, PartialOrd, Ord)]
pub struct Coord(pub u8);

impl Coord {
    /// Create a coordinate from row and column (0-7 each).
    #[inline]
    pub const fn from_row_col(row: u8, col: u8) -> Coord {
        debug_assert!(row < BOARD_SIZE && col < BOARD_SIZE);
        Coord(row * BOARD_SIZE + col)
    }

    /// Bounds-checked constructor for coordinates coming from outside the engine.
    pub fn new(row: usize, col: usize) -> Result<Coord, CoordError> {
        if row >= BOARD_SIZE as usize || col >= BOARD_SIZE as usize {
            return Err(CoordError::OutOfBounds { row, col });
        }
        Ok(Coord::from_row_col(row as u8, col as u8))
    }

    /// Get the row (0-7).
    #[inline]
    pub const fn row(self) -> u8 {
        self.0 / BOARD_SIZE
    }

    /// Get the column (0-7).
    #[inline]
    pub const fn col(self) -> u8 {
        self.0 % BOARD_SIZE
    }

    /// Check if this is a valid coordinate (0-63).
    #[inline]
    pub const fn is_valid(self) -> bool {
        (self.0 as usize) < CELLS
    }

    /// Single-bit mask for this cell.
    #[inline]
    pub const fn bit(self) -> u64 {
        1u64 << self.0
    }

    /// The neighbouring coordinate in direction (dr, dc), or None past the edge.
    #[inline]
    fn step(self, dr: i8, dc: i8) -> Option<Coord> {
        let row = self.row() as i8 + dr;
        let col = self.col() as i8 + dc;
        if (0..BOARD_SIZE as i8).contains(&row) && (0..BOARD_SIZE as i8).contains(&col) {
            Some(Coord::from_row_col(row as u8, col as u8))
        } else {
            None
        }
    }

    /// Iterate over all 64 coordinates in scan order.
    pub fn all() -> impl Iterator<Item = Coord> {
        (0..CELLS as u8).map(Coord)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.row(), self.col())
    }
}

impl FromStr for Coord {
    type Err = CoordError;

    /// Parse "r c", "r,c" or "(r,c)".
    fn from_str(s: &str) -> Result<Coord, CoordError> {
        let inner = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts: Vec<&str> = inner
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty())
            .collect();
        if parts.len() != 2 {
            return Err(CoordError::Malformed(s.trim().to_string()));
        }
        let row: usize = parts[0]
            .parse()
            .map_err(|_| CoordError::Malformed(s.trim().to_string()))?;
        let col: usize = parts[1]
            .parse()
            .map_err(|_| CoordError::Malformed(s.trim().to_string()))?;
        Coord::new(row, col)
    }
}

/// Set of captured coordinates, packed as a cell mask.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CaptureSet(pub u64);

impl CaptureSet {
    pub const EMPTY: CaptureSet = CaptureSet(0);

    /// Number of captured pieces.
    #[inline]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn contains(self, coord: Coord) -> bool {
        self.0 & coord.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, coord: Coord) {
        self.0 |= coord.bit();
    }

    /// Iterate captured coordinates in row-major order.
    pub fn iter(self) -> impl Iterator<Item = Coord> {
        let mut rest = self.0;
        std::iter::from_fn(move || {
            if rest == 0 {
                return None;
            }
            let idx = rest.trailing_zeros() as u8;
            rest &= rest - 1;
            Some(Coord(idx))
        })
    }
}

impl FromIterator<Coord> for CaptureSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> CaptureSet {
        let mut set = CaptureSet::EMPTY;
        for coord in iter {
            set.insert(coord);
        }
        set
    }
}

impl fmt::Debug for CaptureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// A legal placement together with the pieces it flips.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Placement {
    pub at: Coord,
    pub captures: CaptureSet,
}

impl Placement {
    const NONE: Placement = Placement {
        at: Coord(0),
        captures: CaptureSet::EMPTY,
    };
}

/// Upper bound on legal placements (one per cell).
pub const MAX_PLACEMENTS: usize = CELLS;

/// Legal-move table: placements in scan order, each with its capture set.
///
/// Fixed-size, no heap allocation.
#[derive(Clone, Copy)]
pub struct LegalMoves {
    entries: [Placement; MAX_PLACEMENTS],
    len: u8,
}

impl LegalMoves {
    /// Create an empty table.
    #[inline]
    pub const fn new() -> LegalMoves {
        LegalMoves {
            entries: [Placement::NONE; MAX_PLACEMENTS],
            len: 0,
        }
    }

    /// Append a placement. Captures must be non-empty.
    #[inline]
    pub fn push(&mut self, placement: Placement) {
        debug_assert!(!placement.captures.is_empty());
        debug_assert!((self.len as usize) < MAX_PLACEMENTS);
        self.entries[self.len as usize] = placement;
        self.len += 1;
    }

    /// Get the number of placements.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Placements in scan order.
    #[inline]
    pub fn as_slice(&self) -> &[Placement] {
        &self.entries[..self.len as usize]
    }

    /// Get a placement by index into the scan order.
    #[inline]
    pub fn get(&self, idx: usize) -> Option<&Placement> {
        self.as_slice().get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Placement> + '_ {
        self.as_slice().iter()
    }

    /// Placement coordinates in scan order.
    pub fn placements(&self) -> impl Iterator<Item = Coord> + '_ {
        self.iter().map(|p| p.at)
    }

    /// Capture set for a coordinate, or None if it is not a legal placement.
    pub fn captures_for(&self, at: Coord) -> Option<CaptureSet> {
        self.iter().find(|p| p.at == at).map(|p| p.captures)
    }

    pub fn contains(&self, at: Coord) -> bool {
        self.captures_for(at).is_some()
    }

    /// Mask of all legal placement cells (for highlighting).
    pub fn mask(&self) -> u64 {
        self.iter().fold(0, |mask, p| mask | p.at.bit())
    }
}

impl Default for LegalMoves {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LegalMoves {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|p| (p.at, p.captures)))
            .finish()
    }
}

impl PartialEq for LegalMoves {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl Eq for LegalMoves {}

/// Board state as a pair of occupancy masks.
///
/// See module documentation for encoding details.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Board {
    one: u64,
    two: u64,
}

impl Board {
    /// Board with no pieces at all.
    #[inline]
    pub const fn empty() -> Board {
        Board { one: 0, two: 0 }
    }

    /// The standard opening: PlayerTwo on (3,3) and (4,4), PlayerOne on (3,4) and (4,3).
    pub const fn initial() -> Board {
        Board {
            one: Coord::from_row_col(3, 4).bit() | Coord::from_row_col(4, 3).bit(),
            two: Coord::from_row_col(3, 3).bit() | Coord::from_row_col(4, 4).bit(),
        }
    }

    /// Build a board from rows of cell values (0=empty, 1=PlayerOne, 2=PlayerTwo).
    pub fn from_rows(rows: [[u8; 8]; 8]) -> Result<Board, BoardError> {
        let mut board = Board::empty();
        for (row, cells) in rows.iter().enumerate() {
            for (col, &value) in cells.iter().enumerate() {
                let coord = Coord::from_row_col(row as u8, col as u8);
                match value {
                    0 => {}
                    _ => {
                        let piece = Piece::from_bits(value)
                            .ok_or(BoardError::InvalidCell { row, col, value })?;
                        board.set(coord, Some(piece));
                    }
                }
            }
        }
        Ok(board)
    }

    /// Rows of cell values (0=empty, 1=PlayerOne, 2=PlayerTwo).
    pub fn to_rows(&self) -> [[u8; 8]; 8] {
        let mut rows = [[0u8; 8]; 8];
        for coord in Coord::all() {
            rows[coord.row() as usize][coord.col() as usize] = self.cell_value(coord);
        }
        rows
    }

    /// Piece at a cell, or None if the cell is empty.
    #[inline]
    pub fn cell(&self, coord: Coord) -> Option<Piece> {
        if self.one & coord.bit() != 0 {
            Some(Piece::One)
        } else if self.two & coord.bit() != 0 {
            Some(Piece::Two)
        } else {
            None
        }
    }

    /// Cell value as 0, 1 or 2.
    #[inline]
    pub fn cell_value(&self, coord: Coord) -> u8 {
        self.cell(coord).map_or(0, |piece| piece as u8)
    }

    /// Overwrite a single cell.
    #[inline]
    pub fn set(&mut self, coord: Coord, piece: Option<Piece>) {
        let bit = coord.bit();
        self.one &= !bit;
        self.two &= !bit;
        match piece {
            Some(Piece::One) => self.one |= bit,
            Some(Piece::Two) => self.two |= bit,
            None => {}
        }
    }

    /// Occupancy mask for one side.
    #[inline]
    pub fn mask(&self, piece: Piece) -> u64 {
        match piece {
            Piece::One => self.one,
            Piece::Two => self.two,
        }
    }

    /// Mask of empty cells.
    #[inline]
    pub fn empty_mask(&self) -> u64 {
        !(self.one | self.two)
    }

    /// Number of cells holding `piece`.
    #[inline]
    pub fn count_pieces(&self, piece: Piece) -> u32 {
        self.mask(piece).count_ones()
    }

    // ========== Move Finding ==========

    /// Pieces that `piece` would flip by placing at `at`.
    ///
    /// Walks each direction over a run of opposing pieces. The run counts only
    /// when it is non-empty and closed by one of the mover's own pieces; a run
    /// ending at the edge or at an empty cell flips nothing. Occupied cells
    /// always yield an empty set.
    pub fn captures_at(&self, at: Coord, piece: Piece) -> CaptureSet {
        if self.cell(at).is_some() {
            return CaptureSet::EMPTY;
        }

        let own = self.mask(piece);
        let theirs = self.mask(piece.opponent());
        let mut captures = 0u64;

        for (dr, dc) in DIRECTIONS {
            let mut run = 0u64;
            let mut cursor = at.step(dr, dc);
            while let Some(coord) = cursor {
                if theirs & coord.bit() != 0 {
                    run |= coord.bit();
                    cursor = coord.step(dr, dc);
                } else {
                    if own & coord.bit() != 0 {
                        captures |= run;
                    }
                    break;
                }
            }
        }

        CaptureSet(captures)
    }

    /// Legal-move table for `piece`, in row-major scan order.
    ///
    /// Only placements flipping at least one piece appear. An empty table means
    /// `piece` must pass.
    pub fn legal_moves(&self, piece: Piece) -> LegalMoves {
        let mut moves = LegalMoves::new();
        for at in Coord::all() {
            let captures = self.captures_at(at, piece);
            if !captures.is_empty() {
                moves.push(Placement { at, captures });
            }
        }
        moves
    }

    /// Put `piece` on `at` and flip every captured cell to it.
    #[inline]
    pub fn place(&mut self, at: Coord, captures: CaptureSet, piece: Piece) {
        let flipped = captures.0 | at.bit();
        match piece {
            Piece::One => {
                self.one |= flipped;
                self.two &= !flipped;
            }
            Piece::Two => {
                self.two |= flipped;
                self.one &= !flipped;
            }
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ")?;
        for col in 0..BOARD_SIZE {
            write!(f, " {}", col)?;
        }
        writeln!(f)?;
        for row in 0..BOARD_SIZE {
            write!(f, "{}", row)?;
            for col in 0..BOARD_SIZE {
                let symbol = self
                    .cell(Coord::from_row_col(row, col))
                    .map_or('.', Piece::symbol);
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Result of a finished round.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Winner(Piece),
    Draw,
}

impl Outcome {
    /// Strictly larger count wins; equal counts draw.
    pub fn from_board(board: &Board) -> Outcome {
        let one = board.count_pieces(Piece::One);
        let two = board.count_pieces(Piece::Two);
        match one.cmp(&two) {
            std::cmp::Ordering::Greater => Outcome::Winner(Piece::One),
            std::cmp::Ordering::Less => Outcome::Winner(Piece::Two),
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

/// Full game state: board, side to move, last move and pass streak.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GameState {
    pub board: Board,
    pub to_move: Piece,
    pub last_placed: Option<Coord>,
    pub last_captures: CaptureSet,
    /// Consecutive passes. Two in a row end the round.
    pub pass_streak: u8,
}

impl GameState {
    /// Opening position with PlayerOne to move.
    pub fn new() -> GameState {
        GameState::from_board(Board::initial(), Piece::One)
    }

    /// Fresh state over an arbitrary board.
    pub fn from_board(board: Board, to_move: Piece) -> GameState {
        GameState {
            board,
            to_move,
            last_placed: None,
            last_captures: CaptureSet::EMPTY,
            pass_streak: 0,
        }
    }

    /// Legal-move table for the side to move.
    #[inline]
    pub fn legal_moves(&self) -> LegalMoves {
        self.board.legal_moves(self.to_move)
    }

    /// Apply a placement taken from the current legal-move table.
    ///
    /// The capture set is trusted, not re-derived: passing anything other than
    /// an entry of [`GameState::legal_moves`] is a caller bug.
    pub fn apply(&mut self, at: Coord, captures: CaptureSet) {
        debug_assert!(!self.is_over(), "apply after the round ended");
        debug_assert!(at.is_valid());
        debug_assert!(!captures.is_empty(), "placement at {} captures nothing", at);

        self.board.place(at, captures, self.to_move);
        self.to_move = self.to_move.opponent();
        self.last_placed = Some(at);
        self.last_captures = captures;
        self.pass_streak = 0;
    }

    /// Hand the turn over without touching the board.
    pub fn pass(&mut self) {
        debug_assert!(!self.is_over(), "pass after the round ended");
        self.to_move = self.to_move.opponent();
        self.pass_streak += 1;
    }

    /// Both sides passed in succession.
    #[inline]
    pub fn is_over(&self) -> bool {
        self.pass_streak >= 2
    }

    #[inline]
    pub fn count(&self, piece: Piece) -> u32 {
        self.board.count_pieces(piece)
    }

    /// Outcome of the round, or None while it is still being played.
    pub fn outcome(&self) -> Option<Outcome> {
        self.is_over().then(|| Outcome::from_board(&self.board))
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(row: u8, col: u8) -> Coord {
        Coord::from_row_col(row, col)
    }

    #[test]
    fn test_piece_opponent() {
        assert_eq!(Piece::One.opponent(), Piece::Two);
        assert_eq!(Piece::Two.opponent(), Piece::One);
    }

    #[test]
    fn test_piece_from_bits() {
        assert_eq!(Piece::from_bits(1), Some(Piece::One));
        assert_eq!(Piece::from_bits(2), Some(Piece::Two));
        assert_eq!(Piece::from_bits(0), None);
        assert_eq!(Piece::from_bits(3), None);
    }

    #[test]
    fn test_coord_row_col() {
        assert_eq!(c(0, 0), Coord(0));
        assert_eq!(c(0, 7), Coord(7));
        assert_eq!(c(1, 0), Coord(8));
        assert_eq!(c(7, 7), Coord(63));
        for i in 0..64 {
            let coord = Coord(i);
            assert_eq!(c(coord.row(), coord.col()), coord);
        }
    }

    #[test]
    fn test_coord_new_bounds() {
        assert_eq!(Coord::new(2, 4), Ok(c(2, 4)));
        assert_eq!(
            Coord::new(8, 0),
            Err(CoordError::OutOfBounds { row: 8, col: 0 })
        );
        assert!(Coord::new(0, 8).is_err());
    }

    #[test]
    fn test_coord_step_stops_at_edge() {
        assert_eq!(c(0, 0).step(-1, 0), None);
        assert_eq!(c(0, 0).step(0, -1), None);
        assert_eq!(c(7, 7).step(1, 1), None);
        assert_eq!(c(0, 7).step(0, 1), None);
        assert_eq!(c(3, 3).step(1, -1), Some(c(4, 2)));
    }

    #[test]
    fn test_coord_parse() {
        assert_eq!("2 4".parse::<Coord>(), Ok(c(2, 4)));
        assert_eq!("2,4".parse::<Coord>(), Ok(c(2, 4)));
        assert_eq!(" (5, 3) ".parse::<Coord>(), Ok(c(5, 3)));
        assert!(matches!("9 9".parse::<Coord>(), Err(CoordError::OutOfBounds { .. })));
        assert!(matches!("x y".parse::<Coord>(), Err(CoordError::Malformed(_))));
        assert!(matches!("1".parse::<Coord>(), Err(CoordError::Malformed(_))));
    }

    #[test]
    fn test_coord_display() {
        assert_eq!(c(3, 5).to_string(), "(3,5)");
    }

    #[test]
    fn test_capture_set_iterates_in_scan_order() {
        let set: CaptureSet = [c(4, 4), c(0, 1), c(3, 7)].into_iter().collect();
        assert_eq!(set.len(), 3);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![c(0, 1), c(3, 7), c(4, 4)]);
        assert!(set.contains(c(3, 7)));
        assert!(!set.contains(c(3, 6)));
    }

    #[test]
    fn test_initial_board() {
        let board = Board::initial();
        assert_eq!(board.cell(c(3, 3)), Some(Piece::Two));
        assert_eq!(board.cell(c(4, 4)), Some(Piece::Two));
        assert_eq!(board.cell(c(3, 4)), Some(Piece::One));
        assert_eq!(board.cell(c(4, 3)), Some(Piece::One));
        assert_eq!(board.count_pieces(Piece::One), 2);
        assert_eq!(board.count_pieces(Piece::Two), 2);
        assert_eq!(board.empty_mask().count_ones(), 60);
    }

    #[test]
    fn test_board_rows_roundtrip() {
        let board = Board::initial();
        let rows = board.to_rows();
        assert_eq!(rows[3], [0, 0, 0, 2, 1, 0, 0, 0]);
        assert_eq!(rows[4], [0, 0, 0, 1, 2, 0, 0, 0]);
        assert_eq!(Board::from_rows(rows), Ok(board));
    }

    #[test]
    fn test_board_from_rows_rejects_bad_value() {
        let mut rows = [[0u8; 8]; 8];
        rows[6][2] = 3;
        assert_eq!(
            Board::from_rows(rows),
            Err(BoardError::InvalidCell { row: 6, col: 2, value: 3 })
        );
    }

    #[test]
    fn test_board_set_overwrites() {
        let mut board = Board::empty();
        board.set(c(0, 0), Some(Piece::One));
        board.set(c(0, 0), Some(Piece::Two));
        assert_eq!(board.cell(c(0, 0)), Some(Piece::Two));
        assert_eq!(board.count_pieces(Piece::One), 0);
        board.set(c(0, 0), None);
        assert_eq!(board.cell(c(0, 0)), None);
    }

    #[test]
    fn test_board_display() {
        let text = Board::initial().to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "  0 1 2 3 4 5 6 7");
        assert_eq!(lines[4], "3 . . . O X . . .");
        assert_eq!(lines[5], "4 . . . X O . . .");
    }

    // ========== Move Finding ==========

    #[test]
    fn test_legal_moves_initial_player_one() {
        let moves = Board::initial().legal_moves(Piece::One);
        let placements: Vec<Coord> = moves.placements().collect();
        assert_eq!(placements, vec![c(2, 3), c(3, 2), c(4, 5), c(5, 4)]);
        for placement in moves.iter() {
            assert_eq!(placement.captures.len(), 1);
        }
        assert_eq!(moves.captures_for(c(2, 3)), Some([c(3, 3)].into_iter().collect()));
        assert_eq!(moves.captures_for(c(5, 4)), Some([c(4, 4)].into_iter().collect()));
    }

    #[test]
    fn test_legal_moves_initial_player_two() {
        let moves = Board::initial().legal_moves(Piece::Two);
        let placements: Vec<Coord> = moves.placements().collect();
        assert_eq!(placements, vec![c(2, 3), c(3, 2), c(4, 5), c(5, 4)]);
    }

    #[test]
    fn test_captures_require_own_terminator() {
        // X O O _ : placing X on the blank closes the run from the right.
        let mut board = Board::empty();
        board.set(c(0, 0), Some(Piece::One));
        board.set(c(0, 1), Some(Piece::Two));
        board.set(c(0, 2), Some(Piece::Two));
        let set = board.captures_at(c(0, 3), Piece::One);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![c(0, 1), c(0, 2)]);

        // Run closed by the edge.
        let mut board = Board::empty();
        board.set(c(0, 6), Some(Piece::Two));
        board.set(c(0, 7), Some(Piece::Two));
        assert!(board.captures_at(c(0, 5), Piece::One).is_empty());

        // Run closed by an empty cell.
        let mut board = Board::empty();
        board.set(c(0, 1), Some(Piece::Two));
        board.set(c(0, 3), Some(Piece::One));
        assert!(board.captures_at(c(0, 0), Piece::One).is_empty());
    }

    #[test]
    fn test_captures_union_over_directions() {
        // Center placement closing runs in three directions.
        let mut board = Board::empty();
        let at = c(4, 4);
        for (run, end) in [
            ([c(4, 5), c(4, 6)], c(4, 7)),
            ([c(3, 3), c(2, 2)], c(1, 1)),
            ([c(5, 4), c(6, 4)], c(7, 4)),
        ] {
            for coord in run {
                board.set(coord, Some(Piece::Two));
            }
            board.set(end, Some(Piece::One));
        }
        // A direction that is not closed.
        board.set(c(3, 4), Some(Piece::Two));

        let set = board.captures_at(at, Piece::One);
        assert_eq!(set.len(), 6);
        assert!(!set.contains(c(3, 4)));
        assert!(!set.contains(c(4, 7)));
        assert!(!set.contains(at));
    }

    #[test]
    fn test_occupied_cell_is_never_legal() {
        let board = Board::initial();
        assert!(board.captures_at(c(3, 3), Piece::One).is_empty());
        assert!(board.captures_at(c(3, 4), Piece::Two).is_empty());
    }

    #[test]
    fn test_no_moves_on_full_board() {
        let mut board = Board::empty();
        for coord in Coord::all() {
            let piece = if coord.0 % 3 == 0 { Piece::Two } else { Piece::One };
            board.set(coord, Some(piece));
        }
        assert_eq!(board.empty_mask(), 0);
        assert!(board.legal_moves(Piece::One).is_empty());
        assert!(board.legal_moves(Piece::Two).is_empty());
    }

    #[test]
    fn test_legal_moves_mask() {
        let moves = Board::initial().legal_moves(Piece::One);
        let expected = c(2, 3).bit() | c(3, 2).bit() | c(4, 5).bit() | c(5, 4).bit();
        assert_eq!(moves.mask(), expected);
        assert!(moves.contains(c(3, 2)));
        assert!(!moves.contains(c(0, 0)));
        assert_eq!(moves.get(2).map(|p| p.at), Some(c(4, 5)));
        assert_eq!(moves.get(4), None);
    }

    // ========== Apply & Pass ==========

    #[test]
    fn test_apply_flips_and_switches() {
        let mut state = GameState::new();
        let captures: CaptureSet = [c(3, 3)].into_iter().collect();
        assert_eq!(state.legal_moves().captures_for(c(2, 3)), Some(captures));
        state.apply(c(2, 3), captures);

        assert_eq!(state.board.cell(c(2, 3)), Some(Piece::One));
        assert_eq!(state.board.cell(c(3, 3)), Some(Piece::One));
        assert_eq!(state.board.cell(c(4, 4)), Some(Piece::Two));
        assert_eq!(state.count(Piece::One), 4);
        assert_eq!(state.count(Piece::Two), 1);
        assert_eq!(state.to_move, Piece::Two);
        assert_eq!(state.last_placed, Some(c(2, 3)));
        assert_eq!(state.last_captures, captures);
    }

    #[test]
    fn test_apply_resets_pass_streak() {
        let mut state = GameState::new();
        state.pass();
        assert_eq!(state.pass_streak, 1);
        assert_eq!(state.to_move, Piece::Two);
        let placement = *state.legal_moves().get(0).unwrap();
        state.apply(placement.at, placement.captures);
        assert_eq!(state.pass_streak, 0);
    }

    #[test]
    fn test_pass_keeps_board() {
        let mut state = GameState::new();
        let before = state;
        state.pass();
        assert_eq!(state.board, before.board);
        assert_eq!(state.last_placed, None);
        assert_eq!(state.last_captures, CaptureSet::EMPTY);
        assert!(!state.is_over());
        state.pass();
        assert!(state.is_over());
        assert_eq!(state.outcome(), Some(Outcome::Draw));
    }

    #[test]
    fn test_outcome_none_while_playing() {
        assert_eq!(GameState::new().outcome(), None);
    }

    #[test]
    fn test_outcome_from_counts() {
        let mut board = Board::empty();
        board.set(c(0, 0), Some(Piece::Two));
        assert_eq!(Outcome::from_board(&board), Outcome::Winner(Piece::Two));
        board.set(c(0, 1), Some(Piece::One));
        board.set(c(0, 2), Some(Piece::One));
        assert_eq!(Outcome::from_board(&board), Outcome::Winner(Piece::One));
        board.set(c(0, 3), Some(Piece::Two));
        assert_eq!(Outcome::from_board(&board), Outcome::Draw);
    }
}
