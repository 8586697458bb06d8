//! Screen/phase state machine shared by both games

use serde::{Deserialize, Serialize};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for start
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Frozen; no part of the tick runs
    Paused,
    /// Run ended by losing
    GameOver,
    /// Every level cleared
    Victory,
}

impl GamePhase {
    /// Run has ended (either way)
    pub fn is_terminal(self) -> bool {
        matches!(self, GamePhase::GameOver | GamePhase::Victory)
    }

    /// Phase after a pause toggle
    pub fn toggle_pause(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
            other => other,
        }
    }
}
