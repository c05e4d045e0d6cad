//! UCI wire format
//!
//! Builds the request lines the session sends and parses the few response
//! lines it cares about. Everything here is pure string handling; the pipe
//! itself belongs to [`EngineClient`](super::EngineClient).

use crate::game::error::{EngineError, EngineResult};
use crate::game::types::ChessMove;
use std::time::Duration;

pub const UCI: &str = "uci";
pub const UCI_OK: &str = "uciok";
pub const IS_READY: &str = "isready";
pub const READY_OK: &str = "readyok";
pub const NEW_GAME: &str = "ucinewgame";
pub const QUIT: &str = "quit";

/// `position startpos [moves ...]` for the full game so far
pub fn position_command(history: &[ChessMove]) -> String {
    if history.is_empty() {
        return "position startpos".to_string();
    }
    let moves: Vec<String> = history.iter().map(|mv| mv.to_uci()).collect();
    format!("position startpos moves {}", moves.join(" "))
}

/// `go movetime <ms>`, never below one millisecond
pub fn go_command(time_budget: Duration) -> String {
    format!("go movetime {}", time_budget.as_millis().max(1))
}

pub fn is_bestmove(line: &str) -> bool {
    line.split_whitespace().next() == Some("bestmove")
}

/// Parse `bestmove <move> [ponder <move>]`
///
/// # Errors
/// [`EngineError::ProtocolParse`] for a missing token, `(none)`, `0000` or
/// anything that is not coordinate notation.
pub fn parse_bestmove(line: &str) -> EngineResult<ChessMove> {
    let mut tokens = line.split_whitespace();
    if tokens.next() != Some("bestmove") {
        return Err(parse_error(line));
    }
    tokens
        .next()
        .and_then(ChessMove::from_uci)
        .ok_or_else(|| parse_error(line))
}

/// Engine identification collected during the handshake
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EngineIdentity {
    pub name: Option<String>,
    pub author: Option<String>,
}

impl EngineIdentity {
    /// Record an `id name ...` / `id author ...` line, ignoring anything else
    pub fn absorb(&mut self, line: &str) {
        let Some(rest) = line.strip_prefix("id ") else {
            return;
        };
        if let Some(name) = rest.strip_prefix("name ") {
            self.name = Some(name.trim().to_string());
        } else if let Some(author) = rest.strip_prefix("author ") {
            self.author = Some(author.trim().to_string());
        }
    }
}

fn parse_error(line: &str) -> EngineError {
    EngineError::ProtocolParse {
        line: line.to_string(),
    }
}
