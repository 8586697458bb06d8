//! Food: kinds, effects and rejection-sampled spawning

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Obstacles;
use super::snake::Snake;
use crate::Rgb;
use crate::consts::palette;
use crate::consts::serpent::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FoodKind {
    #[default]
    Normal,
    Golden,
    Speed,
}

/// What eating a food does to the snake
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FoodEffect {
    Grow(u32),
    SpeedBoost,
}

impl FoodKind {
    /// Weighted draw: 5% golden, 5% speed, otherwise normal
    pub fn random<R: Rng>(rng: &mut R) -> Self {
        let roll: f32 = rng.random();
        if roll < GOLDEN_FOOD_CHANCE {
            FoodKind::Golden
        } else if roll < GOLDEN_FOOD_CHANCE + SPEED_FOOD_CHANCE {
            FoodKind::Speed
        } else {
            FoodKind::Normal
        }
    }

    pub fn points(self) -> u32 {
        match self {
            FoodKind::Normal => FOOD_POINTS,
            FoodKind::Golden => GOLDEN_FOOD_POINTS,
            FoodKind::Speed => SPEED_FOOD_POINTS,
        }
    }

    pub fn effect(self) -> FoodEffect {
        match self {
            FoodKind::Normal => FoodEffect::Grow(1),
            FoodKind::Golden => FoodEffect::Grow(2),
            FoodKind::Speed => FoodEffect::SpeedBoost,
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            FoodKind::Normal => palette::RED,
            FoodKind::Golden => palette::GOLD,
            FoodKind::Speed => palette::SKY,
        }
    }
}

/// A food item on the board
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub pos: IVec2,
    pub kind: FoodKind,
    /// Game clock at spawn (seconds)
    pub spawn_time: f32,
    pub lifetime: f32,
}

impl Food {
    /// Place a food on a random free cell.
    ///
    /// Tries `FOOD_SPAWN_ATTEMPTS` cells; `None` if every draw landed on the
    /// snake or an obstacle.
    pub fn spawn<R: Rng>(
        rng: &mut R,
        snake: &Snake,
        obstacles: &Obstacles,
        now: f32,
    ) -> Option<Food> {
        for _ in 0..FOOD_SPAWN_ATTEMPTS {
            let pos = IVec2::new(
                rng.random_range(0..GRID_WIDTH),
                rng.random_range(0..GRID_HEIGHT),
            );
            if snake.occupies(pos) || obstacles.is_obstacle(pos) {
                continue;
            }
            return Some(Food {
                pos,
                kind: FoodKind::random(rng),
                spawn_time: now,
                lifetime: FOOD_LIFETIME,
            });
        }
        None
    }

    pub fn is_expired(&self, now: f32) -> bool {
        now - self.spawn_time >= self.lifetime
    }
}
