//! The player's paddle

use serde::{Deserialize, Serialize};

use crate::sim::geom::Rect;
use crate::consts::breaker::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
    /// Seconds of extension left; 0 when at normal width
    pub extend_timer: f32,
}

impl Default for Paddle {
    fn default() -> Self {
        Self {
            rect: Rect::new(
                SCREEN_WIDTH / 2.0 - PADDLE_WIDTH / 2.0,
                SCREEN_HEIGHT - PADDLE_HEIGHT - PADDLE_BOTTOM_GAP,
                PADDLE_WIDTH,
                PADDLE_HEIGHT,
            ),
            extend_timer: 0.0,
        }
    }
}

impl Paddle {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.rect.w
    }

    pub fn is_extended(&self) -> bool {
        self.extend_timer > 0.0
    }

    /// Move from pointer and keyboard input, keep on screen, tick the
    /// extension timer.
    pub fn update(&mut self, pointer_x: Option<f32>, axis: i8, dt: f32) {
        if let Some(x) = pointer_x {
            self.rect.set_center_x(x);
        }
        self.rect.x += f32::from(axis.signum()) * PADDLE_SPEED;
        self.rect.clamp_x(0.0, SCREEN_WIDTH);

        if self.extend_timer > 0.0 {
            self.extend_timer -= dt;
            if self.extend_timer <= 0.0 {
                self.extend_timer = 0.0;
                self.rect.set_width_centered(PADDLE_WIDTH);
                self.rect.clamp_x(0.0, SCREEN_WIDTH);
            }
        }
    }

    /// Widen for `duration` seconds (refreshes the timer if already wide)
    pub fn extend(&mut self, duration: f32) {
        self.extend_timer = duration;
        self.rect.set_width_centered(PADDLE_EXTENDED_WIDTH);
        self.rect.clamp_x(0.0, SCREEN_WIDTH);
    }
}
