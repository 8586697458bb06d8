//! Platform abstraction layer
//!
//! The simulation never talks to a window, a keyboard or a GPU. A host
//! supplies:
//! - an `InputSource` polled once per frame
//! - a `Presenter` that receives draw calls and particle requests
//!
//! and drives any `Game` through the frame `Runner`.

pub mod headless;
pub mod runner;

use glam::IVec2;
use serde::{Deserialize, Serialize};

use crate::sim::breaker::{Ball, Brick, EffectTimers, Paddle, PowerUp};
use crate::sim::serpent::{Food, Snake};
use crate::sim::{BreakerSession, GameEvent, GamePhase, ParticleRequest, SerpentSession, TickInput};

pub use headless::{AutoplayInput, LogPresenter, ScriptedInput};
pub use runner::{RunSummary, Runner};

/// Produces the input snapshot for the next frame
pub trait InputSource {
    fn poll(&mut self) -> TickInput;
}

/// Score/status overlay for the current frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    /// 1-based level shown to the player
    pub level: usize,
    /// Breaker only
    pub lives: Option<u32>,
    /// Breaker only: seconds left on timed power-ups
    pub effects: Option<EffectTimers>,
    /// Active score multiplier (serpent) or combo chain (breaker)
    pub combo: f32,
}

/// One thing to draw this frame. Borrowed straight from session state.
#[derive(Debug, Clone, Copy)]
pub enum Drawable<'a> {
    Paddle(&'a Paddle),
    Ball(&'a Ball),
    Brick(&'a Brick),
    PowerUp(&'a PowerUp),
    Snake(&'a Snake),
    Food(&'a Food),
    /// Obstacle cell
    Obstacle(IVec2),
    Hud(&'a Hud),
}

/// Receives everything the host needs to show a frame
pub trait Presenter {
    fn begin_frame(&mut self) {}
    fn draw(&mut self, item: Drawable<'_>);
    /// Fire-and-forget cosmetic burst
    fn spawn_particles(&mut self, req: &ParticleRequest);
    /// Frame finished; `dt` is the frame time in seconds
    fn present(&mut self, dt: f32);
}

/// A session the runner can drive
pub trait Game {
    fn name(&self) -> &'static str;
    fn tick(&mut self, input: &TickInput, dt: f32);
    fn draw(&self, presenter: &mut dyn Presenter);
    fn drain_events(&mut self) -> Vec<GameEvent>;
    fn phase(&self) -> GamePhase;
    fn score(&self) -> u64;
    fn high_score(&self) -> u64;
    /// Text printed on launch
    fn controls_banner(&self) -> &'static str;
}

const BREAKER_BANNER: &str = "\
Brick Breaker - Defender of the Crystal Kingdom
==================================================
Controls:
- Move paddle: Mouse or LEFT/RIGHT arrow keys
- Launch ball: SPACEBAR
- Pause: P key
- Menu: ESC key
==================================================";

const SERPENT_BANNER: &str = "\
Emerald Serpent - The Mystical Garden Quest
==================================================
Controls:
- Movement: Arrow Keys or WASD
- Pause: P key
- Menu: ESC key
==================================================
Objective:
- Eat food to grow
- Reach target length to complete levels
- Avoid walls, obstacles, and yourself
==================================================";

impl Game for BreakerSession {
    fn name(&self) -> &'static str {
        "breaker"
    }

    fn tick(&mut self, input: &TickInput, dt: f32) {
        BreakerSession::tick(self, input, dt);
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        for brick in self.bricks.iter().filter(|b| b.visible) {
            presenter.draw(Drawable::Brick(brick));
        }
        for powerup in self.powerups.iter().filter(|p| p.active) {
            presenter.draw(Drawable::PowerUp(powerup));
        }
        presenter.draw(Drawable::Paddle(&self.paddle));
        for ball in &self.balls {
            presenter.draw(Drawable::Ball(ball));
        }

        let hud = Hud {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            level: self.level + 1,
            lives: Some(self.lives),
            effects: Some(self.effects.clone()),
            combo: self.combo as f32,
        };
        presenter.draw(Drawable::Hud(&hud));
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        BreakerSession::drain_events(self)
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn high_score(&self) -> u64 {
        self.high_score
    }

    fn controls_banner(&self) -> &'static str {
        BREAKER_BANNER
    }
}

impl Game for SerpentSession {
    fn name(&self) -> &'static str {
        "serpent"
    }

    fn tick(&mut self, input: &TickInput, dt: f32) {
        SerpentSession::tick(self, input, dt);
    }

    fn draw(&self, presenter: &mut dyn Presenter) {
        for &cell in self.obstacles.cells() {
            presenter.draw(Drawable::Obstacle(cell));
        }
        if let Some(food) = &self.food {
            presenter.draw(Drawable::Food(food));
        }
        presenter.draw(Drawable::Snake(&self.snake));

        let hud = Hud {
            phase: self.phase,
            score: self.score,
            high_score: self.high_score,
            level: self.level + 1,
            lives: None,
            effects: None,
            combo: self.combo,
        };
        presenter.draw(Drawable::Hud(&hud));
    }

    fn drain_events(&mut self) -> Vec<GameEvent> {
        SerpentSession::drain_events(self)
    }

    fn phase(&self) -> GamePhase {
        self.phase
    }

    fn score(&self) -> u64 {
        self.score
    }

    fn high_score(&self) -> u64 {
        self.high_score
    }

    fn controls_banner(&self) -> &'static str {
        SERPENT_BANNER
    }
}
