//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (insertion order of entity lists)
//! - No rendering or platform dependencies

pub mod breaker;
pub mod clock;
pub mod events;
pub mod geom;
pub mod input;
pub mod particles;
pub mod phase;
pub mod serpent;

pub use breaker::BreakerSession;
pub use clock::FixedTimestep;
pub use events::{EffectKind, GameEvent, ParticleRequest};
pub use geom::Rect;
pub use input::{Direction, TickInput};
pub use particles::{Particle, ParticleSystem};
pub use phase::GamePhase;
pub use serpent::SerpentSession;
