//! Cosmetic particle bursts
//!
//! Driven by `ParticleRequest`s forwarded from a session. Nothing in here
//! feeds back into gameplay, so it keeps its own RNG stream.

use std::collections::VecDeque;
use std::f32::consts::{PI, TAU};

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::events::{EffectKind, ParticleRequest};
use crate::Rgb;

/// Screen-space gravity for falling debris (px/s^2)
const GRAVITY: f32 = 300.0;

/// A particle for visual effects
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Particle {
    pub pos: Vec2,
    /// Pixels per second
    pub vel: Vec2,
    pub color: Rgb,
    /// 0-1, decreases over time
    pub life: f32,
    pub size: f32,
    gravity: f32,
    /// Life lost per second
    decay: f32,
}

impl Particle {
    fn new(pos: Vec2, vel: Vec2, color: Rgb, size: f32) -> Self {
        Self {
            pos,
            vel,
            color,
            life: 1.0,
            size,
            gravity: 0.0,
            decay: 1.5,
        }
    }

    fn with_gravity(mut self, gravity: f32) -> Self {
        self.gravity = gravity;
        self
    }

    fn with_decay(mut self, decay: f32) -> Self {
        self.decay = decay;
        self
    }
}

/// Bounded pool of live particles
#[derive(Debug, Clone)]
pub struct ParticleSystem {
    particles: VecDeque<Particle>,
    max_particles: usize,
    rng: Pcg32,
}

impl ParticleSystem {
    pub fn new(max_particles: usize, seed: u64) -> Self {
        Self {
            particles: VecDeque::with_capacity(max_particles),
            max_particles,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    /// Spawn a burst shaped by the request's effect kind
    pub fn emit(&mut self, req: &ParticleRequest) {
        if self.max_particles == 0 {
            return;
        }

        for i in 0..req.count {
            let particle = self.spawn_one(req, i);
            if self.particles.len() >= self.max_particles {
                // Remove oldest particles to make room
                self.particles.pop_front();
            }
            self.particles.push_back(particle);
        }
    }

    fn spawn_one(&mut self, req: &ParticleRequest, index: u32) -> Particle {
        let rng = &mut self.rng;
        match req.kind {
            EffectKind::BrickBreak => {
                let angle = rng.random_range(0.0..TAU);
                let speed: f32 = rng.random_range(60.0..240.0);
                let size = rng.random_range(2.0..5.0);
                Particle::new(req.pos, Vec2::from_angle(angle) * speed, req.color, size)
                    .with_gravity(GRAVITY)
            }
            EffectKind::BallLost => {
                // Splash back up from the bottom edge
                let angle = rng.random_range(-PI..0.0);
                let speed: f32 = rng.random_range(120.0..300.0);
                Particle::new(req.pos, Vec2::from_angle(angle) * speed, req.color, 3.0)
                    .with_gravity(GRAVITY)
            }
            EffectKind::PowerUpCollect => {
                let vel = Vec2::new(rng.random_range(-60.0..60.0), rng.random_range(-240.0..-120.0));
                Particle::new(req.pos, vel, req.color, 4.0).with_decay(1.2)
            }
            EffectKind::FoodEaten => {
                let angle = index as f32 / req.count.max(1) as f32 * TAU;
                let speed: f32 = rng.random_range(90.0..150.0);
                Particle::new(req.pos, Vec2::from_angle(angle) * speed, req.color, 3.0)
                    .with_decay(2.0)
            }
            EffectKind::Trail => {
                let vel = Vec2::new(rng.random_range(-15.0..15.0), rng.random_range(-15.0..15.0));
                Particle::new(req.pos, vel, req.color, 2.0).with_decay(2.5)
            }
            EffectKind::Collision => {
                let angle = index as f32 / req.count.max(1) as f32 * TAU;
                let speed: f32 = rng.random_range(240.0..360.0);
                Particle::new(req.pos, Vec2::from_angle(angle) * speed, req.color, 5.0)
                    .with_decay(1.0)
            }
        }
    }

    /// Integrate, decay and drop dead particles
    pub fn update(&mut self, dt: f32) {
        for particle in self.particles.iter_mut() {
            particle.pos += particle.vel * dt;
            particle.vel.y += particle.gravity * dt;
            // Drag
            particle.vel *= 0.98;
            particle.life -= particle.decay * dt;
            // Shrink as they die
            particle.size *= 0.995;
        }
        self.particles.retain(|p| p.life > 0.0);
    }
}
