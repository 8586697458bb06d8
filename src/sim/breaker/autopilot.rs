//! Idle/demo driver for the brick breaker

use std::cmp::Ordering;

use super::session::BreakerSession;
use crate::consts::breaker::*;
use crate::sim::input::TickInput;

/// Below this line a descending ball is the paddle's only concern
const DANGER_Y: f32 = SCREEN_HEIGHT * 0.5;

/// Fill in paddle/launch commands for an idle session
pub fn drive(session: &BreakerSession, input: &TickInput) -> TickInput {
    let mut input = input.clone();

    // Auto-launch anything sitting on the paddle
    if session.balls.iter().any(|b| b.stuck_to_paddle) {
        input.launch = true;
    }

    // Lowest descending ball is the most dangerous
    let threat = session
        .balls
        .iter()
        .filter(|b| !b.stuck_to_paddle && b.vel.y > 0.0)
        .max_by(|a, b| {
            a.rect
                .bottom()
                .partial_cmp(&b.rect.bottom())
                .unwrap_or(Ordering::Equal)
        });

    let ball_is_safe = threat.is_none_or(|b| b.rect.bottom() < DANGER_Y);

    // With no pressure, go catch the lowest capsule
    let target_pickup = if ball_is_safe {
        session
            .powerups
            .iter()
            .filter(|p| p.active)
            .max_by(|a, b| {
                a.rect
                    .bottom()
                    .partial_cmp(&b.rect.bottom())
                    .unwrap_or(Ordering::Equal)
            })
            .map(|p| p.rect.center_x())
    } else {
        None
    };

    if let Some(x) = target_pickup {
        input.pointer_x = Some(x);
    } else if let Some(ball) = threat {
        // Oscillating offset so the bounce angle varies between rallies
        let time_factor = session.time_ticks as f32 * 0.01;
        let offset = time_factor.sin() * 0.3 + (time_factor * 0.7).sin() * 0.15;
        let reach = session.paddle.width() / 2.0;
        input.pointer_x = Some(ball.rect.center_x() + offset * reach);
    }

    input.paddle_axis = 0;
    input
}
