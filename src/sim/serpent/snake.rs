//! The snake: grid movement, growth, timed boosts and collision tests

use std::collections::VecDeque;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use super::grid::Obstacles;
use crate::consts::serpent::*;
use crate::sim::input::Direction;

/// Snake body and movement state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Body cells. Head is at the front (index 0).
    pub segments: VecDeque<IVec2>,
    /// Heading used by the last step
    pub direction: Direction,
    /// Buffered heading for the next step
    pub next_direction: Direction,
    /// Steps left during which the tail is kept
    pub grow_pending: u32,
    /// Current moves per second (includes any boost)
    pub speed: f32,
    /// Moves per second without a boost
    pub base_speed: f32,
    /// Seconds since the last step
    pub move_timer: f32,
    pub speed_boost_timer: f32,
    pub invincible_timer: f32,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new(IVec2::new(GRID_WIDTH / 2, GRID_HEIGHT / 2))
    }
}

impl Snake {
    /// Starting snake with its head at `head`, heading right
    pub fn new(head: IVec2) -> Self {
        let segments = (0..SNAKE_START_LENGTH as i32)
            .map(|i| head - IVec2::new(i, 0))
            .collect();
        Self {
            segments,
            direction: Direction::Right,
            next_direction: Direction::Right,
            grow_pending: 0,
            speed: SNAKE_SPEED,
            base_speed: SNAKE_SPEED,
            move_timer: 0.0,
            speed_boost_timer: 0.0,
            invincible_timer: 0.0,
        }
    }

    #[inline]
    pub fn head(&self) -> IVec2 {
        self.segments.front().copied().unwrap_or_default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn occupies(&self, cell: IVec2) -> bool {
        self.segments.contains(&cell)
    }

    pub fn is_invincible(&self) -> bool {
        self.invincible_timer > 0.0
    }

    pub fn is_boosted(&self) -> bool {
        self.speed_boost_timer > 0.0
    }

    /// Tick timers and step once the move interval has elapsed.
    ///
    /// The accumulator is reset on a step, so any overshoot past the
    /// interval is dropped. Returns whether the snake moved.
    pub fn update(&mut self, dt: f32) -> bool {
        if self.speed_boost_timer > 0.0 {
            self.speed_boost_timer -= dt;
            if self.speed_boost_timer <= 0.0 {
                self.speed_boost_timer = 0.0;
                self.speed = self.base_speed;
            }
        }
        if self.invincible_timer > 0.0 {
            self.invincible_timer = (self.invincible_timer - dt).max(0.0);
        }

        self.move_timer += dt;
        if self.move_timer >= 1.0 / self.speed {
            self.move_timer = 0.0;
            self.step();
            return true;
        }
        false
    }

    /// Advance one cell in the buffered direction
    pub fn step(&mut self) {
        self.direction = self.next_direction;
        let new_head = self.head() + self.direction.delta();
        self.segments.push_front(new_head);

        if self.grow_pending > 0 {
            self.grow_pending -= 1;
        } else {
            self.segments.pop_back();
        }
    }

    /// Buffer a heading; an exact reversal of the current heading is ignored
    pub fn change_direction(&mut self, dir: Direction) {
        if dir != self.direction.opposite() {
            self.next_direction = dir;
        }
    }

    pub fn grow(&mut self, cells: u32) {
        self.grow_pending += cells;
    }

    /// Raise the base speed by one increment (capped)
    pub fn increase_speed(&mut self) {
        self.base_speed = (self.base_speed + SPEED_INCREMENT).min(MAX_SPEED);
        if self.is_boosted() {
            self.speed = (self.base_speed * SPEED_BOOST_FACTOR).min(MAX_SPEED * SPEED_BOOST_FACTOR);
        } else {
            self.speed = self.base_speed;
        }
    }

    pub fn activate_speed_boost(&mut self) {
        self.speed = (self.base_speed * SPEED_BOOST_FACTOR).min(MAX_SPEED * SPEED_BOOST_FACTOR);
        self.speed_boost_timer = SPEED_BOOST_DURATION;
    }

    pub fn activate_invincibility(&mut self) {
        self.invincible_timer = INVINCIBILITY_DURATION;
    }

    /// Head outside the grid
    pub fn check_wall_collision(&self) -> bool {
        if self.is_invincible() {
            return false;
        }
        let head = self.head();
        head.x < 0 || head.x >= GRID_WIDTH || head.y < 0 || head.y >= GRID_HEIGHT
    }

    /// Head inside the rest of the body
    pub fn check_self_collision(&self) -> bool {
        if self.is_invincible() {
            return false;
        }
        let head = self.head();
        self.segments.iter().skip(1).any(|&cell| cell == head)
    }

    pub fn check_obstacle_collision(&self, obstacles: &Obstacles) -> bool {
        !self.is_invincible() && obstacles.is_obstacle(self.head())
    }
}
