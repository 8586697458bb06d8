//! The ball: motion, wall bounces, paddle and brick contact

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::brick::Brick;
use super::collision::{Side, contact_side, paddle_bounce, relative_hit};
use super::paddle::Paddle;
use crate::sim::geom::Rect;
use crate::consts::breaker::*;

/// Outcome of a resolved ball/brick contact
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrickContact {
    pub side: Side,
    pub points: f32,
    pub destroyed: bool,
}

/// A ball entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    /// Bounding square of the ball
    pub rect: Rect,
    /// Pixels per step
    pub vel: Vec2,
    pub radius: f32,
    /// Position is slaved to the paddle until launched
    pub stuck_to_paddle: bool,
    /// Seconds until a slowed ball regains double speed
    pub slow_timer: f32,
}

impl Default for Ball {
    fn default() -> Self {
        Self::new(Vec2::new(SCREEN_WIDTH / 2.0, SCREEN_HEIGHT / 2.0))
    }
}

impl Ball {
    /// New stuck ball centered at `center`
    pub fn new(center: Vec2) -> Self {
        Self {
            rect: Rect::from_center(center, BALL_RADIUS * 2.0, BALL_RADIUS * 2.0),
            vel: Vec2::new(BALL_SPEED_X, BALL_SPEED_Y),
            radius: BALL_RADIUS,
            stuck_to_paddle: true,
            slow_timer: 0.0,
        }
    }

    /// New free ball with the given velocity
    pub fn free(center: Vec2, vel: Vec2) -> Self {
        Self {
            vel,
            stuck_to_paddle: false,
            ..Self::new(center)
        }
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.rect.center()
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Place a stuck ball just above the paddle center
    pub fn follow_paddle(&mut self, paddle: &Paddle) {
        self.rect.set_center_x(paddle.rect.center_x());
        self.rect.set_bottom(paddle.rect.top() - STUCK_GAP);
    }

    /// Advance one step.
    ///
    /// A stuck ball only tracks the paddle. A free ball integrates its
    /// velocity, restores speed when the slow timer lapses, reflects off the
    /// side walls and ceiling, and is clamped back inside the screen.
    pub fn update(&mut self, paddle: &Paddle, dt: f32) {
        if self.stuck_to_paddle {
            self.follow_paddle(paddle);
            return;
        }

        self.rect.translate(self.vel);

        if self.slow_timer > 0.0 {
            self.slow_timer -= dt;
            if self.slow_timer <= 0.0 {
                self.slow_timer = 0.0;
                self.vel *= 2.0;
                self.clamp_speed();
            }
        }

        if self.rect.left() <= 0.0 || self.rect.right() >= SCREEN_WIDTH {
            self.vel.x = -self.vel.x;
        }
        if self.rect.top() <= 0.0 {
            self.vel.y = -self.vel.y;
        }

        if self.rect.left() < 0.0 {
            self.rect.set_left(0.0);
        }
        if self.rect.right() > SCREEN_WIDTH {
            self.rect.set_right(SCREEN_WIDTH);
        }
        if self.rect.top() < 0.0 {
            self.rect.set_top(0.0);
        }
    }

    pub fn launch(&mut self) {
        self.stuck_to_paddle = false;
    }

    /// Fell past the bottom edge
    pub fn is_lost(&self) -> bool {
        self.rect.top() > SCREEN_HEIGHT
    }

    /// Bounce off the paddle when descending onto it.
    ///
    /// Returns whether contact occurred.
    pub fn check_paddle_collision(&mut self, paddle: &Paddle) -> bool {
        if self.vel.y <= 0.0 || !self.rect.intersects(&paddle.rect) {
            return false;
        }
        let rel = relative_hit(self.rect.center_x(), &paddle.rect);
        self.vel = paddle_bounce(self.speed(), rel);
        true
    }

    /// Resolve contact with one brick: deflect away from the struck face and
    /// let the brick score the hit. `None` if the brick is gone or not
    /// touched.
    pub fn check_brick_collision(&mut self, brick: &mut Brick) -> Option<BrickContact> {
        if !brick.visible || !self.rect.intersects(&brick.rect) {
            return None;
        }

        let side = contact_side(&self.rect, &brick.rect);
        self.vel = side.deflect(self.vel);

        let outcome = brick.hit();
        Some(BrickContact {
            side,
            points: outcome.points,
            destroyed: outcome.destroyed,
        })
    }

    /// Speed up by `BALL_SPEED_INCREMENT`, never past `MAX_BALL_SPEED`.
    /// No-op once at the cap.
    pub fn increase_speed(&mut self) {
        let current = self.speed();
        if current < MAX_BALL_SPEED {
            self.vel *= 1.0 + BALL_SPEED_INCREMENT;
            self.clamp_speed();
        }
    }

    /// Halve velocity for `duration` seconds. An already slowed ball only
    /// has its timer refreshed, so expiry always restores the original speed.
    pub fn slow_down(&mut self, duration: f32) {
        if self.slow_timer <= 0.0 {
            self.vel /= 2.0;
        }
        self.slow_timer = duration;
    }

    fn clamp_speed(&mut self) {
        let speed = self.speed();
        if speed > MAX_BALL_SPEED {
            self.vel *= MAX_BALL_SPEED / speed;
        }
    }
}
