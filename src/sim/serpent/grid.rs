//! Obstacle cells: per-level layouts plus random extras

use glam::IVec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::snake::Snake;
use crate::consts::serpent::{GRID_HEIGHT, GRID_WIDTH};

/// Fixed obstacle layouts as (x, y) cells
const LAYOUTS: [&[(i32, i32)]; 3] = [
    // Open field
    &[],
    // Two short walls
    &[(10, 10), (10, 11), (10, 12), (25, 15), (25, 16), (25, 17)],
    // Maze
    &[
        (5, 5), (6, 5), (7, 5), (8, 5), (9, 5),
        (5, 20), (6, 20), (7, 20), (8, 20), (9, 20),
        (20, 8), (20, 9), (20, 10), (20, 11), (20, 12),
        (30, 8), (30, 9), (30, 10), (30, 11), (30, 12),
        (15, 15), (16, 15), (17, 15), (18, 15), (19, 15),
    ],
];

pub fn layout_count() -> usize {
    LAYOUTS.len()
}

/// Static obstacle set for the current level
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Obstacles {
    /// Insertion order is kept so iteration is stable
    cells: Vec<IVec2>,
}

impl Obstacles {
    /// Replace the obstacles with a level layout (index wraps)
    pub fn load_level(&mut self, index: usize) {
        self.cells = LAYOUTS[index % LAYOUTS.len()]
            .iter()
            .map(|&(x, y)| IVec2::new(x, y))
            .collect();
    }

    /// Scatter up to `count` extra obstacles on free cells.
    ///
    /// Gives up after `count * 10` draws; returns how many were placed.
    pub fn add_random_obstacles<R: Rng>(
        &mut self,
        rng: &mut R,
        count: usize,
        snake: &Snake,
        food: Option<IVec2>,
    ) -> usize {
        let mut added = 0;
        let mut attempts = count * 10;

        while added < count && attempts > 0 {
            attempts -= 1;
            let cell = IVec2::new(
                rng.random_range(0..GRID_WIDTH),
                rng.random_range(0..GRID_HEIGHT),
            );
            if snake.occupies(cell) || food == Some(cell) || self.is_obstacle(cell) {
                continue;
            }
            self.cells.push(cell);
            added += 1;
        }

        added
    }

    pub fn is_obstacle(&self, cell: IVec2) -> bool {
        self.cells.contains(&cell)
    }

    pub fn cells(&self) -> &[IVec2] {
        &self.cells
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
