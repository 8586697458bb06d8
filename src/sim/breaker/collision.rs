//! Collision geometry for the ball against paddle and bricks
//!
//! The ball is treated as its bounding square; contact side and bounce
//! angle are derived from center offsets.

use glam::Vec2;

use crate::sim::geom::Rect;
use crate::consts::breaker::{MAX_BOUNCE_ANGLE_DEG, MIN_VERTICAL_SPEED};

/// Which face of a brick the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Top,
    Bottom,
    Left,
    Right,
}

impl Side {
    /// Velocity with the component normal to this face pointing away from it
    pub fn deflect(self, vel: Vec2) -> Vec2 {
        match self {
            Side::Bottom => Vec2::new(vel.x, vel.y.abs()),
            Side::Top => Vec2::new(vel.x, -vel.y.abs()),
            Side::Left => Vec2::new(-vel.x.abs(), vel.y),
            Side::Right => Vec2::new(vel.x.abs(), vel.y),
        }
    }
}

/// Classify the contact face from center deltas (`ball - brick`) and the
/// half-extent sums of both rects.
///
/// Compares `width*dy` against `height*dx`, i.e. which diagonal sector of
/// the combined box the ball center lies in. Ties fall to Right/Top.
pub fn classify_side(dx: f32, dy: f32, width: f32, height: f32) -> Side {
    let cross_width = width * dy;
    let cross_height = height * dx;

    if cross_width > cross_height {
        if cross_width > -cross_height {
            Side::Bottom
        } else {
            Side::Left
        }
    } else if cross_width > -cross_height {
        Side::Right
    } else {
        Side::Top
    }
}

/// Side classification for two overlapping rects
pub fn contact_side(ball: &Rect, brick: &Rect) -> Side {
    let delta = ball.center() - brick.center();
    let width = (ball.w + brick.w) / 2.0;
    let height = (ball.h + brick.h) / 2.0;
    classify_side(delta.x, delta.y, width, height)
}

/// Normalized hit offset from paddle center, clamped to [-1, 1]
pub fn relative_hit(ball_center_x: f32, paddle: &Rect) -> f32 {
    let half = paddle.w / 2.0;
    if half <= 0.0 {
        return 0.0;
    }
    ((ball_center_x - paddle.center_x()) / half).clamp(-1.0, 1.0)
}

/// Outgoing velocity for a paddle bounce at constant speed.
///
/// The offset maps linearly to an angle off vertical in ±60°; the result
/// always heads upward, with `|vy|` floored at `MIN_VERTICAL_SPEED`.
pub fn paddle_bounce(speed: f32, relative_x: f32) -> Vec2 {
    let angle = (relative_x.clamp(-1.0, 1.0) * MAX_BOUNCE_ANGLE_DEG).to_radians();
    let vx = speed * angle.sin();
    let mut vy = -speed * angle.cos();
    if vy.abs() < MIN_VERTICAL_SPEED {
        vy = if vy < 0.0 {
            -MIN_VERTICAL_SPEED
        } else {
            MIN_VERTICAL_SPEED
        };
    }
    Vec2::new(vx, vy)
}
