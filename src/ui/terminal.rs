//! Line-oriented terminal front-end
//!
//! Prints the board after every iteration and reads one command per line:
//!
//! - `e2` - click the centre of that square
//! - `click <x> <y>` - click a raw pixel position
//! - `quit` / `q` / end of input - leave the session

use super::{BoardView, Frontend};
use crate::game::resources::TurnPhase;
use crate::game::systems::HUMAN_SIDE;
use crate::game::types::Square;
use crate::input::{CoordinateMapper, InputEvent, PixelPoint};
use std::io::{self, BufRead, Write};
use tracing::warn;

/// Terminal front-end over any reader/writer pair
pub struct TerminalFrontend<R, W> {
    input: R,
    output: W,
    mapper: CoordinateMapper,
}

impl TerminalFrontend<io::StdinLock<'static>, io::Stdout> {
    /// Front-end on the process's stdin/stdout
    pub fn stdio(mapper: CoordinateMapper) -> Self {
        Self::new(io::stdin().lock(), io::stdout(), mapper)
    }
}

impl<R: BufRead, W: Write> TerminalFrontend<R, W> {
    pub fn new(input: R, output: W, mapper: CoordinateMapper) -> Self {
        Self {
            input,
            output,
            mapper,
        }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn render(&mut self, view: &BoardView<'_>) -> io::Result<()> {
        let out = &mut self.output;
        let destinations = view.selection.destinations();

        writeln!(out)?;
        for rank in (0..8u8).rev() {
            write!(out, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let Some(square) = Square::from_coords(file, rank) else {
                    continue;
                };
                let piece = view.board.piece_char_at(square);
                let cell = if view.selection.selected_square == Some(square) {
                    format!("[{}]", piece.unwrap_or('.'))
                } else if destinations.contains(&square) {
                    match piece {
                        Some(p) => format!("({p})"),
                        None => " * ".to_string(),
                    }
                } else {
                    format!(" {} ", piece.unwrap_or('.'))
                };
                write!(out, "{cell}")?;
            }
            writeln!(out)?;
        }
        writeln!(out, "   a  b  c  d  e  f  g  h")?;

        match (view.phase, view.game_over) {
            (_, Some(over)) => writeln!(out, "Game Over! Result: {} - {}", over.result, over.message())?,
            (TurnPhase::EngineTurn, None) => writeln!(out, "Engine is thinking...")?,
            (TurnPhase::AwaitingDestination, None) => {
                writeln!(out, "Choose a destination (any other square cancels)")?
            }
            _ => writeln!(out, "{:?} to move: enter a square, 'click X Y' or 'quit'", HUMAN_SIDE)?,
        }
        out.flush()
    }
}

impl<R: BufRead, W: Write> Frontend for TerminalFrontend<R, W> {
    fn poll_events(&mut self) -> Vec<InputEvent> {
        if let Err(e) = write!(self.output, "> ").and_then(|_| self.output.flush()) {
            warn!("[UI] Failed to write prompt: {}", e);
        }

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => vec![InputEvent::Quit],
            Ok(_) => match parse_command(&line, &self.mapper) {
                Some(event) => vec![event],
                None => {
                    let _ = writeln!(self.output, "Unrecognised input: {}", line.trim());
                    Vec::new()
                }
            },
            Err(e) => {
                warn!("[UI] Failed to read input: {}", e);
                vec![InputEvent::Quit]
            }
        }
    }

    fn redraw(&mut self, view: &BoardView<'_>) {
        if let Err(e) = self.render(view) {
            warn!("[UI] Failed to draw board: {}", e);
        }
    }
}

/// Translate one input line into an event
pub fn parse_command(line: &str, mapper: &CoordinateMapper) -> Option<InputEvent> {
    let mut tokens = line.split_whitespace();
    let first = tokens.next()?.to_ascii_lowercase();
    let event = match first.as_str() {
        "quit" | "q" | "exit" => InputEvent::Quit,
        "click" => {
            let x = tokens.next()?.parse().ok()?;
            let y = tokens.next()?.parse().ok()?;
            InputEvent::PointerDown(PixelPoint::new(x, y))
        }
        name => InputEvent::PointerDown(mapper.center_of(Square::from_algebraic(name)?)),
    };
    tokens.next().is_none().then_some(event)
}
