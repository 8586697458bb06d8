//! Headless host: scripted or self-playing input and a presenter that only
//! keeps counts and logs the HUD now and then

use std::collections::VecDeque;

use super::{Drawable, Hud, InputSource, Presenter};
use crate::sim::{ParticleRequest, ParticleSystem, TickInput};

/// Presses start once, then lets the session play itself
#[derive(Debug, Clone, Default)]
pub struct AutoplayInput {
    started: bool,
}

impl InputSource for AutoplayInput {
    fn poll(&mut self) -> TickInput {
        let start = !self.started;
        self.started = true;
        TickInput {
            start,
            idle_mode: true,
            ..Default::default()
        }
    }
}

/// Replays a fixed list of inputs, then idles
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    frames: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(frames: Vec<TickInput>) -> Self {
        Self {
            frames: frames.into(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> TickInput {
        self.frames.pop_front().unwrap_or_default()
    }
}

/// Frames between HUD log lines
const HUD_LOG_INTERVAL: u64 = 600;

/// Presenter with no output device
#[derive(Debug, Clone)]
pub struct LogPresenter {
    particles: ParticleSystem,
    particles_spawned: u64,
    draw_calls: u64,
    frames: u64,
    last_hud: Option<Hud>,
}

impl LogPresenter {
    pub fn new(max_particles: usize, seed: u64) -> Self {
        Self {
            particles: ParticleSystem::new(max_particles, seed),
            particles_spawned: 0,
            draw_calls: 0,
            frames: 0,
            last_hud: None,
        }
    }

    pub fn particles_spawned(&self) -> u64 {
        self.particles_spawned
    }

    pub fn live_particles(&self) -> usize {
        self.particles.len()
    }

    pub fn draw_calls(&self) -> u64 {
        self.draw_calls
    }

    pub fn last_hud(&self) -> Option<&Hud> {
        self.last_hud.as_ref()
    }
}

impl Presenter for LogPresenter {
    fn draw(&mut self, item: Drawable<'_>) {
        self.draw_calls += 1;
        if let Drawable::Hud(hud) = item {
            self.last_hud = Some(hud.clone());
        }
    }

    fn spawn_particles(&mut self, req: &ParticleRequest) {
        self.particles_spawned += u64::from(req.count);
        self.particles.emit(req);
    }

    fn present(&mut self, dt: f32) {
        self.particles.update(dt);
        self.frames += 1;

        if self.frames % HUD_LOG_INTERVAL == 0 {
            if let Some(hud) = &self.last_hud {
                log::debug!(
                    "[frame {}] {:?} level {} score {} (best {}) particles {}",
                    self.frames,
                    hud.phase,
                    hud.level,
                    hud.score,
                    hud.high_score,
                    self.particles.len()
                );
            }
        }
    }
}
