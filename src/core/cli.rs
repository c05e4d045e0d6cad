//! Command-line flags
//!
//! Flags override individual values of the loaded [`SessionSettings`].

use crate::core::SessionSettings;
use crate::game::ai::AIDifficulty;
use crate::game::types::PromotionPiece;
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(
    name = "xfchess-session",
    version,
    about = "Play chess against a UCI engine"
)]
pub struct Cli {
    /// Engine executable to launch
    #[arg(long = "engine", value_name = "PATH")]
    pub engine: Option<PathBuf>,

    /// Board square size in pixels
    #[arg(long = "square-size", value_name = "PX")]
    pub square_size: Option<u32>,

    /// Engine thinking time per move, in seconds
    #[arg(long = "movetime", value_name = "SECS", conflicts_with = "difficulty")]
    pub movetime: Option<f32>,

    /// Thinking time preset (easy 0.5s, medium 1.5s, hard 3.0s)
    #[arg(long = "difficulty", value_enum)]
    pub difficulty: Option<AIDifficulty>,

    /// Piece to promote to
    #[arg(long = "promotion", value_enum)]
    pub promotion: Option<PromotionPiece>,

    /// Settings file to read instead of the default location
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Write the effective settings back to the settings file
    #[arg(long = "save-config")]
    pub save_config: bool,
}

impl Cli {
    /// Apply the flags that were given on top of `settings`
    pub fn apply_to(&self, settings: &mut SessionSettings) {
        if let Some(engine) = &self.engine {
            settings.engine_path = engine.clone();
        }
        if let Some(square_size) = self.square_size {
            settings.square_size_px = square_size;
        }
        if let Some(difficulty) = self.difficulty {
            settings.seconds_per_move = difficulty.seconds_per_move();
        }
        if let Some(movetime) = self.movetime {
            settings.seconds_per_move = movetime;
        }
        if let Some(promotion) = self.promotion {
            settings.promotion = promotion;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_keeps_settings() {
        let cli = Cli::try_parse_from(["xfchess-session"]).unwrap();
        let mut settings = SessionSettings::default();
        cli.apply_to(&mut settings);
        assert_eq!(settings, SessionSettings::default());
        assert!(!cli.save_config);
    }

    #[test]
    fn test_flags_override() {
        let cli = Cli::try_parse_from([
            "xfchess-session",
            "--engine",
            "/opt/stockfish",
            "--square-size",
            "64",
            "--difficulty",
            "hard",
            "--promotion",
            "rook",
        ])
        .unwrap();
        let mut settings = SessionSettings::default();
        cli.apply_to(&mut settings);

        assert_eq!(settings.engine_path, PathBuf::from("/opt/stockfish"));
        assert_eq!(settings.square_size_px, 64);
        assert_eq!(settings.seconds_per_move, 3.0);
        assert_eq!(settings.promotion, PromotionPiece::Rook);
    }

    #[test]
    fn test_movetime_conflicts_with_difficulty() {
        let parsed =
            Cli::try_parse_from(["xfchess-session", "--movetime", "1", "--difficulty", "easy"]);
        assert!(parsed.is_err());
    }
}
