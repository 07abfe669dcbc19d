//! Text rendering of the match for the terminal.

use std::fmt::Write;

use reversi_core::{Coord, MatchConfig, Phase, Piece, Verdict, View};

/// Board with legal placements marked `*` and the last placement in brackets.
pub fn board(view: &View) -> String {
    let legal = view.legal.mask();
    let mut out = String::from("   ");
    for col in 0..8 {
        let _ = write!(out, " {} ", col);
    }
    out.push('\n');

    for row in 0..8u8 {
        let _ = write!(out, " {} ", row);
        for col in 0..8u8 {
            let at = Coord::from_row_col(row, col);
            let symbol = match view.board.cell(at) {
                Some(piece) => piece.symbol(),
                None if legal & at.bit() != 0 => '*',
                None => '.',
            };
            if view.last_placed == Some(at) {
                let _ = write!(out, "[{}]", symbol);
            } else {
                let _ = write!(out, " {} ", symbol);
            }
        }
        out.push('\n');
    }
    out
}

/// Counts, side to move and round result.
pub fn status(view: &View, config: &MatchConfig) -> String {
    let who = |piece: Piece| if piece == config.ai() { "AI" } else { "you" };
    let mut out = format!(
        "{} {} ({})   {} {} ({})",
        Piece::One.symbol(),
        view.count_one,
        who(Piece::One),
        Piece::Two.symbol(),
        view.count_two,
        who(Piece::Two),
    );
    match view.phase {
        Phase::WaitingForHuman => {
            let _ = write!(out, "   your move ({})", view.to_move.symbol());
        }
        Phase::AiThinking => out.push_str("   AI is thinking..."),
        Phase::RoundOver => {
            let verdict = match view.verdict {
                Some(Verdict::HumanWins) => "You win!",
                Some(Verdict::AiWins) => "AI wins!",
                Some(Verdict::Draw) | None => "Draw!",
            };
            let _ = write!(out, "   round over: {}", verdict);
        }
    }
    out
}
