//! WASM bindings for reversi-core
//!
//! Provides a JavaScript-friendly API around the turn controller. The page
//! owns the timer: after every call it asks `scheduleAi()`, and when a ticket
//! comes back it waits `aiDelayMs()` with `setTimeout` before calling
//! `resolveAi(ticket)`. Tickets from before a restart or undo are ignored.

use wasm_bindgen::prelude::*;

use crate::{
    AiDelay, AiTicket, Coord, MatchConfig, Phase, Piece, StrategyKind, TurnController, Verdict,
};

/// WASM-friendly wrapper around TurnController
#[wasm_bindgen]
pub struct WasmMatch {
    inner: TurnController,
    ticket: Option<AiTicket>,
}

#[wasm_bindgen]
impl WasmMatch {
    /// Create a match.
    /// human: 1 or 2; delayed: use the default AI delay; strategy: 0 (random) or 1 (greedy)
    #[wasm_bindgen(constructor)]
    pub fn new(human: u8, delayed: bool, strategy: usize, seed: u64) -> Result<WasmMatch, JsError> {
        let config = config_from_js(human, delayed, strategy, seed)?;
        Ok(WasmMatch {
            inner: TurnController::new(config),
            ticket: None,
        })
    }

    /// Piece to move (1 or 2)
    #[wasm_bindgen(js_name = currentPiece)]
    pub fn current_piece(&self) -> u8 {
        self.inner.state().to_move as u8
    }

    /// "waiting_for_human", "ai_thinking" or "round_over"
    pub fn phase(&self) -> String {
        match self.inner.phase() {
            Phase::WaitingForHuman => "waiting_for_human",
            Phase::AiThinking => "ai_thinking",
            Phase::RoundOver => "round_over",
        }
        .to_string()
    }

    /// 64 cell values (0 empty, 1, 2), row-major
    pub fn board(&self) -> Vec<u8> {
        let board = self.inner.state().board;
        Coord::all().map(|c| board.cell_value(c)).collect()
    }

    /// Legal placements for the side allowed to act, as JSON array
    /// Each entry is { at: [row, col], captures: [[row, col], ...] }
    #[wasm_bindgen(js_name = legalMoves)]
    pub fn legal_moves(&self) -> Result<JsValue, JsError> {
        let moves: Vec<WasmPlacement> = self
            .inner
            .legal_moves()
            .iter()
            .map(|p| WasmPlacement {
                at: [p.at.row(), p.at.col()],
                captures: p.captures.iter().map(|c| [c.row(), c.col()]).collect(),
            })
            .collect();
        Ok(serde_wasm_bindgen::to_value(&moves)?)
    }

    /// Piece counts as [one, two]
    pub fn counts(&self) -> Vec<u32> {
        let state = self.inner.state();
        vec![state.count(Piece::One), state.count(Piece::Two)]
    }

    /// Last placed cell as [row, col], or empty before the first move
    #[wasm_bindgen(js_name = lastPlaced)]
    pub fn last_placed(&self) -> Vec<u8> {
        self.inner
            .state()
            .last_placed
            .map(|c| vec![c.row(), c.col()])
            .unwrap_or_default()
    }

    /// Last captured cells as [row, col, row, col, ...]
    #[wasm_bindgen(js_name = lastCaptures)]
    pub fn last_captures(&self) -> Vec<u8> {
        self.inner
            .state()
            .last_captures
            .iter()
            .flat_map(|c| [c.row(), c.col()])
            .collect()
    }

    /// Human selected a cell. Returns true if the move was applied.
    #[wasm_bindgen(js_name = selectCell)]
    pub fn select_cell(&mut self, row: usize, col: usize) -> bool {
        match Coord::new(row, col) {
            Ok(at) => self.inner.select(at).is_ok(),
            Err(_) => false,
        }
    }

    /// Claim an AI move. Returns the ticket number to hand to `resolveAi`,
    /// or undefined if the AI is not to move or a ticket is outstanding.
    #[wasm_bindgen(js_name = scheduleAi)]
    pub fn schedule_ai(&mut self) -> Option<u32> {
        let ticket = self.inner.schedule_ai()?;
        self.ticket = Some(ticket);
        Some(ticket.epoch() as u32)
    }

    /// Delay the page should wait before resolving a ticket
    #[wasm_bindgen(js_name = aiDelayMs)]
    pub fn ai_delay_ms(&self) -> u32 {
        self.inner.config().delay.duration().as_millis() as u32
    }

    /// Apply the AI move for a ticket. Returns false for stale tickets.
    #[wasm_bindgen(js_name = resolveAi)]
    pub fn resolve_ai(&mut self, ticket: u32) -> bool {
        match self.ticket {
            Some(pending) if pending.epoch() as u32 == ticket => {
                self.ticket = None;
                self.inner.resolve_ai(pending).is_some()
            }
            _ => false,
        }
    }

    /// Undo the last round. Returns true if anything was undone.
    pub fn recall(&mut self) -> bool {
        let undone = self.inner.recall();
        if undone {
            self.ticket = None;
        }
        undone
    }

    /// Start a new round, optionally with new settings.
    pub fn restart(&mut self, human: u8, delayed: bool, strategy: usize, seed: u64) -> Result<(), JsError> {
        let config = config_from_js(human, delayed, strategy, seed)?;
        self.ticket = None;
        self.inner.restart_with(config);
        Ok(())
    }

    /// Check if the round is over
    #[wasm_bindgen(js_name = isOver)]
    pub fn is_over(&self) -> bool {
        self.inner.is_over()
    }

    /// Round result: "ongoing", "human_wins", "ai_wins" or "draw"
    pub fn result(&self) -> String {
        match self.inner.verdict() {
            None => "ongoing",
            Some(Verdict::HumanWins) => "human_wins",
            Some(Verdict::AiWins) => "ai_wins",
            Some(Verdict::Draw) => "draw",
        }
        .to_string()
    }

    /// Display name and description of the active strategy
    #[wasm_bindgen(js_name = strategyInfo)]
    pub fn strategy_info(&self) -> Vec<String> {
        let strategy = self.inner.strategy();
        vec![strategy.name().to_string(), strategy.description().to_string()]
    }

    /// Match log as a JSON document
    #[wasm_bindgen(js_name = exportRecord)]
    pub fn export_record(&self) -> Result<String, JsError> {
        Ok(self.inner.record().to_json()?)
    }
}

fn config_from_js(human: u8, delayed: bool, strategy: usize, seed: u64) -> Result<MatchConfig, JsError> {
    let human = Piece::from_bits(human).ok_or_else(|| JsError::new("human must be 1 or 2"))?;
    Ok(MatchConfig {
        human,
        delay: if delayed { AiDelay::Default } else { AiDelay::None },
        strategy: StrategyKind::try_from(strategy)?,
        seed: Some(seed),
    })
}

/// Serializable placement for JavaScript
#[derive(serde::Serialize)]
struct WasmPlacement {
    at: [u8; 2],
    captures: Vec<[u8; 2]>,
}
