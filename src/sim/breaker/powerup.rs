//! Falling power-up capsules
//!
//! Collecting a capsule yields a `PowerUpEffect`; the session applies it.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::Rgb;
use crate::consts::breaker::*;
use crate::consts::palette;

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerUpKind {
    MultiBall,
    ExtendPaddle,
    SlowBall,
    ExtraLife,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 4] = [
        PowerUpKind::MultiBall,
        PowerUpKind::ExtendPaddle,
        PowerUpKind::SlowBall,
        PowerUpKind::ExtraLife,
    ];

    /// Uniformly random kind
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn name(self) -> &'static str {
        match self {
            PowerUpKind::MultiBall => "MULTI-BALL",
            PowerUpKind::ExtendPaddle => "EXTEND PADDLE",
            PowerUpKind::SlowBall => "SLOW BALL",
            PowerUpKind::ExtraLife => "EXTRA LIFE",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            PowerUpKind::MultiBall => palette::YELLOW,
            PowerUpKind::ExtendPaddle => palette::BLUE,
            PowerUpKind::SlowBall => palette::GREEN,
            PowerUpKind::ExtraLife => palette::RED,
        }
    }

    /// What collecting this kind does
    pub fn effect(self) -> PowerUpEffect {
        match self {
            PowerUpKind::MultiBall => PowerUpEffect::SpawnBalls(MULTIBALL_COUNT),
            PowerUpKind::ExtendPaddle => PowerUpEffect::ExtendPaddle {
                duration: POWERUP_DURATION,
            },
            PowerUpKind::SlowBall => PowerUpEffect::SlowBalls {
                duration: POWERUP_DURATION,
            },
            PowerUpKind::ExtraLife => PowerUpEffect::AddLife,
        }
    }
}

/// Command returned on collection
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PowerUpEffect {
    SpawnBalls(usize),
    ExtendPaddle { duration: f32 },
    SlowBalls { duration: f32 },
    AddLife,
}

/// A falling capsule
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub rect: Rect,
    pub kind: PowerUpKind,
    /// Cleared on collection or once off screen
    pub active: bool,
}

impl PowerUp {
    /// Spawn with the top-left corner at `pos`
    pub fn new(pos: Vec2, kind: PowerUpKind) -> Self {
        Self {
            rect: Rect::new(pos.x, pos.y, POWERUP_WIDTH, POWERUP_HEIGHT),
            kind,
            active: true,
        }
    }

    /// Fall one step; deactivate once past the bottom edge
    pub fn update(&mut self) {
        if !self.active {
            return;
        }
        self.rect.y += POWERUP_SPEED;
        if self.rect.top() > SCREEN_HEIGHT {
            self.active = false;
        }
    }

    /// One-shot collection
    pub fn collect(&mut self) -> Option<PowerUpEffect> {
        if !self.active {
            return None;
        }
        self.active = false;
        Some(self.kind.effect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_collect_is_one_shot() {
        let mut p = PowerUp::new(Vec2::new(100.0, 100.0), PowerUpKind::ExtraLife);
        assert_eq!(p.collect(), Some(PowerUpEffect::AddLife));
        assert!(!p.active);
        assert_eq!(p.collect(), None);
    }

    #[test]
    fn test_falls_and_expires_off_screen() {
        let mut p = PowerUp::new(Vec2::new(100.0, SCREEN_HEIGHT - 4.0), PowerUpKind::SlowBall);
        p.update();
        assert!(p.active);
        assert_eq!(p.rect.top(), SCREEN_HEIGHT - 1.0);
        p.update();
        assert!(!p.active);
        assert_eq!(p.collect(), None);
    }

    #[test]
    fn test_effects_carry_duration() {
        assert_eq!(
            PowerUpKind::ExtendPaddle.effect(),
            PowerUpEffect::ExtendPaddle {
                duration: POWERUP_DURATION
            }
        );
        assert_eq!(
            PowerUpKind::MultiBall.effect(),
            PowerUpEffect::SpawnBalls(MULTIBALL_COUNT)
        );
    }

    #[test]
    fn test_random_kind_covers_all() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut seen = [false; 4];
        for _ in 0..200 {
            let kind = PowerUpKind::random(&mut rng);
            let idx = PowerUpKind::ALL.iter().position(|k| *k == kind).unwrap_or(0);
            seen[idx] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
