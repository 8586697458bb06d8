//! Serpent: a snake on a 40x30 grid with food, obstacles and levels
//!
//! Cells are integer coordinates with +y down. The snake moves in discrete
//! steps at `speed` moves per second.

pub mod autopilot;
pub mod food;
pub mod grid;
pub mod session;
pub mod snake;

pub use food::{Food, FoodEffect, FoodKind};
pub use grid::Obstacles;
pub use session::{SerpentSession, cell_center, target_length};
pub use snake::Snake;
