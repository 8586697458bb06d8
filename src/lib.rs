//! Twin Arcade - brick breaker and snake on one simulation loop
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, sessions)
//! - `platform`: Presentation/input contract and the frame runner
//! - `settings`: Host preferences loaded from JSON

pub mod platform;
pub mod settings;
pub mod sim;

pub use settings::{QualityPreset, Settings};

use serde::{Deserialize, Serialize};

/// 8-bit RGB color handed to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep shared by both games (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Palette shared by entities and particle requests
    pub mod palette {
        use crate::Rgb;

        pub const WHITE: Rgb = Rgb(255, 255, 255);
        pub const RED: Rgb = Rgb(255, 50, 50);
        pub const GREEN: Rgb = Rgb(50, 255, 50);
        pub const BLUE: Rgb = Rgb(50, 100, 255);
        pub const YELLOW: Rgb = Rgb(255, 255, 50);
        pub const ORANGE: Rgb = Rgb(255, 150, 50);
        pub const PURPLE: Rgb = Rgb(180, 70, 230);
        pub const GRAY: Rgb = Rgb(100, 100, 100);
        pub const GOLD: Rgb = Rgb(255, 215, 0);
        pub const SKY: Rgb = Rgb(50, 150, 255);
    }

    /// Brick breaker tuning. Velocities are pixels per simulation step.
    pub mod breaker {
        pub const SCREEN_WIDTH: f32 = 800.0;
        pub const SCREEN_HEIGHT: f32 = 600.0;

        /// Paddle defaults
        pub const PADDLE_WIDTH: f32 = 100.0;
        pub const PADDLE_EXTENDED_WIDTH: f32 = 150.0;
        pub const PADDLE_HEIGHT: f32 = 20.0;
        pub const PADDLE_BOTTOM_GAP: f32 = 20.0;
        pub const PADDLE_SPEED: f32 = 8.0;

        /// Ball defaults
        pub const BALL_RADIUS: f32 = 10.0;
        pub const BALL_SPEED_X: f32 = 4.0;
        pub const BALL_SPEED_Y: f32 = -4.0;
        pub const BALL_SPEED_INCREMENT: f32 = 0.2;
        pub const MAX_BALL_SPEED: f32 = 10.0;
        /// Floor on |vy| after a paddle bounce
        pub const MIN_VERTICAL_SPEED: f32 = 2.0;
        /// Steepest paddle deflection from vertical, degrees
        pub const MAX_BOUNCE_ANGLE_DEG: f32 = 60.0;
        /// Gap between a stuck ball and the paddle top
        pub const STUCK_GAP: f32 = 5.0;

        /// Brick grid
        pub const BRICK_WIDTH: f32 = 75.0;
        pub const BRICK_HEIGHT: f32 = 30.0;
        pub const BRICK_PADDING: f32 = 5.0;
        pub const BRICK_MARGIN_TOP: f32 = 70.0;
        pub const BRICK_ROWS: usize = 5;
        pub const BRICK_COLS: usize = 9;

        /// Power-ups
        pub const POWERUP_WIDTH: f32 = 40.0;
        pub const POWERUP_HEIGHT: f32 = 20.0;
        pub const POWERUP_SPEED: f32 = 3.0;
        /// Seconds
        pub const POWERUP_DURATION: f32 = 10.0;
        pub const MULTIBALL_COUNT: usize = 2;
        pub const MULTIBALL_MIN_SPEED: f32 = 3.0;
        pub const MULTIBALL_MAX_SPEED: f32 = 5.0;

        /// Session
        pub const INITIAL_LIVES: u32 = 3;
        /// Seconds a combo chain survives without a scoring hit
        pub const COMBO_TIMER: f32 = 1.0;
        /// Bonus points per chained brick
        pub const COMBO_BONUS: u32 = 5;
        pub const LEVEL_BONUS: u64 = 100;
        /// Chance per step that every ball speeds up
        pub const SPEED_RAMP_CHANCE: f64 = 0.01;
    }

    /// Serpent tuning. Speeds are grid moves per second.
    pub mod serpent {
        pub const GRID_WIDTH: i32 = 40;
        pub const GRID_HEIGHT: i32 = 30;
        /// Pixels per cell on an 800x600 screen
        pub const CELL_SIZE: f32 = 20.0;

        /// Snake
        pub const SNAKE_START_LENGTH: usize = 3;
        pub const SNAKE_SPEED: f32 = 10.0;
        pub const SPEED_INCREMENT: f32 = 0.5;
        pub const MAX_SPEED: f32 = 20.0;
        pub const SPEED_BOOST_FACTOR: f32 = 1.5;
        /// Seconds
        pub const SPEED_BOOST_DURATION: f32 = 5.0;
        pub const INVINCIBILITY_DURATION: f32 = 5.0;

        /// Food
        pub const FOOD_LIFETIME: f32 = 15.0;
        pub const FOOD_SPAWN_ATTEMPTS: u32 = 100;
        pub const GOLDEN_FOOD_CHANCE: f32 = 0.05;
        pub const SPEED_FOOD_CHANCE: f32 = 0.05;
        pub const FOOD_POINTS: u32 = 10;
        pub const GOLDEN_FOOD_POINTS: u32 = 50;
        pub const SPEED_FOOD_POINTS: u32 = 25;

        /// Combo
        pub const COMBO_WINDOW: f32 = 2.0;
        pub const COMBO_THRESHOLD: u32 = 5;
        pub const COMBO_MULTIPLIER: f32 = 1.5;
        pub const COMBO_DURATION: f32 = 3.0;

        /// Progression
        pub const SPEEDUP_EVERY_FOODS: u32 = 5;
        pub const LEVEL_COMPLETE_BONUS: u64 = 100;
        pub const LEVEL_TARGET_LENGTH: [usize; 3] = [10, 20, 30];
        pub const EXTRA_OBSTACLES_MIN: usize = 2;
        pub const EXTRA_OBSTACLES_MAX: usize = 5;
    }
}
