//! Brick breaker: paddle, balls, bricks and falling power-ups
//!
//! Positions are screen pixels with +y down. Velocities are pixels per
//! fixed step; timers are seconds.

pub mod autopilot;
pub mod ball;
pub mod brick;
pub mod collision;
pub mod levels;
pub mod paddle;
pub mod powerup;
pub mod session;

pub use ball::{Ball, BrickContact};
pub use brick::{Brick, BrickKind, HitOutcome};
pub use collision::Side;
pub use levels::{build_level, level_count};
pub use paddle::Paddle;
pub use powerup::{PowerUp, PowerUpEffect, PowerUpKind};
pub use session::{BreakerSession, EffectTimers};
