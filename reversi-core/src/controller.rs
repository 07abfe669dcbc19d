//! Turn control for a human against an automated player.
//!
//! # Phases
//!
//! ```text
//!                select(P) legal
//!   WaitingForHuman ──────────────▶ AiThinking
//!         ▲                             │ resolve_ai(ticket)
//!         └─────────────────────────────┘
//!   any phase ── passStreak reaches 2 ──▶ RoundOver ── restart ──▶ ...
//! ```
//!
//! After every transition the controller runs a turn-start check for the side
//! to move: a side without legal placements passes on the spot, and the check
//! repeats for the other side. So a phase of `WaitingForHuman` or `AiThinking`
//! always means the side to move has at least one placement.
//!
//! # Deferred AI moves
//!
//! The controller never sleeps. In `AiThinking` the host asks for an
//! [`AiTicket`] with [`TurnController::schedule_ai`], waits `ticket.delay()` in
//! whatever way suits it, then hands the ticket back to
//! [`TurnController::resolve_ai`]. Only one ticket is outstanding at a time.
//! `restart` and `recall` bump the epoch, so a ticket issued before them is
//! discarded when it comes back.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::config::MatchConfig;
use crate::history::{History, MatchRecord};
use crate::strategy::Strategy;
use crate::{
    Board, CaptureSet, Coord, GameState, LegalMoves, MoveError, Outcome, Piece, Placement,
};

/// Who is allowed to act.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Phase {
    WaitingForHuman,
    AiThinking,
    RoundOver,
}

/// Finished round from the human's point of view.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Verdict {
    HumanWins,
    AiWins,
    Draw,
}

/// Permission for one deferred AI move, valid for a single epoch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct AiTicket {
    epoch: u64,
    delay: Duration,
}

impl AiTicket {
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// How long the host should wait before resolving the ticket.
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

/// Everything a renderer needs after a mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct View {
    pub board: Board,
    pub to_move: Piece,
    pub phase: Phase,
    /// Table of the side currently allowed to act; empty once the round is over.
    pub legal: LegalMoves,
    pub is_over: bool,
    pub count_one: u32,
    pub count_two: u32,
    pub last_placed: Option<Coord>,
    pub last_captures: CaptureSet,
    pub verdict: Option<Verdict>,
}

/// Owns the game state, its history and the pending AI slot.
pub struct TurnController {
    config: MatchConfig,
    strategy: Box<dyn Strategy>,
    state: GameState,
    history: History,
    phase: Phase,
    epoch: u64,
    pending: Option<AiTicket>,
}

impl TurnController {
    pub fn new(config: MatchConfig) -> TurnController {
        let strategy = config.strategy.build(config.seed);
        TurnController::with_strategy(config, strategy)
    }

    /// Use a custom strategy instead of the one named by `config.strategy`.
    pub fn with_strategy(config: MatchConfig, strategy: Box<dyn Strategy>) -> TurnController {
        let state = GameState::new();
        let mut controller = TurnController {
            config,
            strategy,
            state,
            history: History::new(state),
            phase: Phase::WaitingForHuman,
            epoch: 0,
            pending: None,
        };
        controller.settle();
        info!(
            human = ?config.human,
            strategy = controller.strategy.name(),
            phase = ?controller.phase,
            "match started"
        );
        controller
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn strategy(&self) -> &dyn Strategy {
        self.strategy.as_ref()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Whether an AI ticket is outstanding.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::RoundOver
    }

    /// Table for the side currently allowed to act.
    pub fn legal_moves(&self) -> LegalMoves {
        match self.phase {
            Phase::RoundOver => LegalMoves::new(),
            _ => self.state.legal_moves(),
        }
    }

    /// Result of the round in board terms, once it is over.
    pub fn outcome(&self) -> Option<Outcome> {
        self.state.outcome()
    }

    /// Result of the round from the human's side, once it is over.
    pub fn verdict(&self) -> Option<Verdict> {
        self.outcome().map(|outcome| match outcome {
            Outcome::Draw => Verdict::Draw,
            Outcome::Winner(piece) if piece == self.config.human => Verdict::HumanWins,
            Outcome::Winner(_) => Verdict::AiWins,
        })
    }

    pub fn view(&self) -> View {
        View {
            board: self.state.board,
            to_move: self.state.to_move,
            phase: self.phase,
            legal: self.legal_moves(),
            is_over: self.is_over(),
            count_one: self.state.count(Piece::One),
            count_two: self.state.count(Piece::Two),
            last_placed: self.state.last_placed,
            last_captures: self.state.last_captures,
            verdict: self.verdict(),
        }
    }

    /// Exportable projection of the history.
    pub fn record(&self) -> MatchRecord {
        self.history.record(Piece::One)
    }

    // ========== Human Path ==========

    /// The human picked a cell. Rejected selections leave everything untouched.
    pub fn select(&mut self, at: Coord) -> Result<Placement, MoveError> {
        match self.phase {
            Phase::WaitingForHuman => {}
            Phase::AiThinking => return Err(MoveError::NotYourTurn),
            Phase::RoundOver => return Err(MoveError::RoundOver),
        }
        debug_assert_eq!(self.state.to_move, self.config.human);

        let captures = self
            .state
            .legal_moves()
            .captures_for(at)
            .ok_or(MoveError::Illegal(at))?;
        let placement = Placement { at, captures };
        debug!(placement = %at, captures = captures.len(), "human placed");
        self.commit(placement);
        Ok(placement)
    }

    // ========== AI Path ==========

    /// Claim the pending-move slot if the AI is to move and nothing is outstanding.
    pub fn schedule_ai(&mut self) -> Option<AiTicket> {
        if self.phase != Phase::AiThinking || self.pending.is_some() {
            return None;
        }
        let ticket = AiTicket {
            epoch: self.epoch,
            delay: self.config.delay.duration(),
        };
        self.pending = Some(ticket);
        debug!(epoch = ticket.epoch, delay = ?ticket.delay, "AI move scheduled");
        Some(ticket)
    }

    /// Run the strategy for a ticket whose delay has elapsed.
    ///
    /// Returns None when the ticket is stale (a restart or undo happened while
    /// it was pending) or does not match the outstanding one.
    pub fn resolve_ai(&mut self, ticket: AiTicket) -> Option<Placement> {
        if self.pending != Some(ticket) {
            debug!(
                ticket_epoch = ticket.epoch,
                epoch = self.epoch,
                "discarding stale AI ticket"
            );
            return None;
        }
        self.pending = None;
        debug_assert_eq!(self.phase, Phase::AiThinking);

        let moves = self.state.legal_moves();
        let board = self.state.board;
        let Some(at) = self.strategy.decide(&board, self.state.to_move, &moves) else {
            // settle() passes for a side without placements before AiThinking
            // is entered, so an empty table here means the state was bypassed.
            warn!("strategy returned no placement");
            self.settle();
            return None;
        };
        let placement = match moves.captures_for(at) {
            Some(captures) => Placement { at, captures },
            None => {
                // Non-empty table: decide() returned a cell.
                let fallback = *moves.get(0)?;
                warn!(
                    placement = %at,
                    fallback = %fallback.at,
                    strategy = self.strategy.name(),
                    "strategy chose an illegal cell"
                );
                fallback
            }
        };
        info!(
            strategy = self.strategy.name(),
            placement = %placement.at,
            captures = placement.captures.len(),
            "AI placed"
        );
        self.commit(placement);
        Some(placement)
    }

    // ========== Undo & Restart ==========

    /// Take back the human's last move and the AI's reply.
    ///
    /// No-op (returns false) with fewer than 3 snapshots. Otherwise the top two
    /// snapshots are dropped and play resumes from the new top with the human
    /// to move and a cleared pass streak.
    pub fn recall(&mut self) -> bool {
        let len = self.history.len();
        if len < 3 {
            debug!(snapshots = len, "nothing to recall");
            return false;
        }
        self.history.truncate(len - 2);

        let mut state = *self.history.latest();
        state.to_move = self.config.human;
        state.pass_streak = 0;
        self.state = state;

        self.invalidate_pending();
        self.settle();
        info!(snapshots = self.history.len(), "recalled one round");
        true
    }

    /// Start a fresh round with the current configuration.
    pub fn restart(&mut self) {
        self.state = GameState::new();
        self.history.reset(self.state);
        self.invalidate_pending();
        self.settle();
        info!(epoch = self.epoch, phase = ?self.phase, "round restarted");
    }

    /// Start a fresh round with a new configuration.
    pub fn restart_with(&mut self, config: MatchConfig) {
        self.strategy = config.strategy.build(config.seed);
        self.config = config;
        self.restart();
    }

    // ========== Internals ==========

    fn invalidate_pending(&mut self) {
        self.epoch += 1;
        if let Some(ticket) = self.pending.take() {
            debug!(ticket_epoch = ticket.epoch, "pending AI move cancelled");
        }
    }

    fn commit(&mut self, placement: Placement) {
        self.state.apply(placement.at, placement.captures);
        self.history.push(self.state);
        self.settle();
    }

    /// Turn-start check: pass for sides without placements, then pick the phase.
    fn settle(&mut self) {
        loop {
            if self.state.is_over() {
                if self.phase != Phase::RoundOver {
                    info!(
                        one = self.state.count(Piece::One),
                        two = self.state.count(Piece::Two),
                        outcome = ?self.state.outcome(),
                        "round over"
                    );
                }
                self.phase = Phase::RoundOver;
                return;
            }
            if self.state.legal_moves().is_empty() {
                debug!(piece = ?self.state.to_move, "no legal placement, passing");
                self.state.pass();
                continue;
            }
            self.phase = if self.state.to_move == self.config.human {
                Phase::WaitingForHuman
            } else {
                Phase::AiThinking
            };
            return;
        }
    }
}
