//! Per-tick input snapshot

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// Cardinal direction for grid movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Unit cell delta (+y is down)
    pub fn delta(self) -> IVec2 {
        match self {
            Self::Up => IVec2::new(0, -1),
            Self::Down => IVec2::new(0, 1),
            Self::Left => IVec2::new(-1, 0),
            Self::Right => IVec2::new(1, 0),
        }
    }
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TickInput {
    /// Close the application (handled by the runner)
    pub quit: bool,
    /// Pause toggle
    pub pause: bool,
    /// Start a run from the menu or after game over
    pub start: bool,
    /// Back to the menu (Esc)
    pub menu: bool,
    /// Launch stuck balls (breaker)
    pub launch: bool,
    /// Pointer x in screen pixels (breaker paddle center)
    pub pointer_x: Option<f32>,
    /// Held horizontal keys: -1 left, 0 none, +1 right (breaker)
    pub paddle_axis: i8,
    /// Requested heading (serpent)
    pub direction: Option<Direction>,
    /// Idle/demo mode - the session plays itself
    pub idle_mode: bool,
}

impl TickInput {
    /// Clear one-shot commands after the first substep consumed them
    pub fn clear_one_shots(&mut self) {
        self.pause = false;
        self.start = false;
        self.menu = false;
        self.launch = false;
        self.direction = None;
    }

    /// Fold in one-shot commands from an earlier poll that no step consumed
    pub fn carry_one_shots(&mut self, earlier: &TickInput) {
        self.pause |= earlier.pause;
        self.start |= earlier.start;
        self.menu |= earlier.menu;
        self.launch |= earlier.launch;
        self.direction = self.direction.or(earlier.direction);
    }
}
