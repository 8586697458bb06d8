//! Events emitted by a session for the host to consume
//!
//! Sessions never call back into the host; they queue events and the frame
//! runner drains them after each step.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Rgb;
use super::breaker::PowerUpKind;
use super::serpent::FoodKind;

/// Which cosmetic burst to spawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    BrickBreak,
    BallLost,
    PowerUpCollect,
    FoodEaten,
    Trail,
    Collision,
}

/// A fire-and-forget request for particles (screen pixels)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleRequest {
    pub kind: EffectKind,
    pub pos: Vec2,
    pub color: Rgb,
    pub count: u32,
}

/// Notable things that happened during a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Particles(ParticleRequest),
    BrickDestroyed { points: u64 },
    PowerUpCollected(PowerUpKind),
    FoodEaten { kind: FoodKind, points: u64 },
    ComboEngaged,
    LifeLost { lives_left: u32 },
    LevelComplete { level: usize, bonus: u64 },
    GameOver { score: u64 },
    Victory { score: u64 },
}

impl GameEvent {
    pub fn particles(kind: EffectKind, pos: Vec2, color: Rgb, count: u32) -> Self {
        GameEvent::Particles(ParticleRequest {
            kind,
            pos,
            color,
            count,
        })
    }
}
