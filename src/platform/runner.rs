//! Frame loop: poll input, run fixed substeps, forward events, draw

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use super::{Game, InputSource, Presenter};
use crate::Settings;
use crate::consts::SIM_DT;
use crate::sim::{FixedTimestep, GameEvent, GamePhase, TickInput};

/// What happened during a run, for the host to report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub game: String,
    pub frames: u64,
    /// Simulation steps executed
    pub steps: u64,
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    pub bricks_destroyed: u32,
    pub powerups_collected: u32,
    pub foods_eaten: u32,
    pub lives_lost: u32,
    pub levels_completed: u32,
    /// Stopped because the input asked to quit
    pub quit: bool,
}

impl RunSummary {
    fn new(game: &dyn Game) -> Self {
        Self {
            game: game.name().to_string(),
            frames: 0,
            steps: 0,
            phase: game.phase(),
            score: game.score(),
            high_score: game.high_score(),
            bricks_destroyed: 0,
            powerups_collected: 0,
            foods_eaten: 0,
            lives_lost: 0,
            levels_completed: 0,
            quit: false,
        }
    }
}

/// Drives a `Game` at a target frame rate through a `FixedTimestep`
#[derive(Debug, Clone)]
pub struct Runner {
    clock: FixedTimestep,
    target_fps: u32,
    /// Measure wall-clock frame time and sleep to cap the rate
    realtime: bool,
    max_frames: Option<u64>,
}

impl Runner {
    pub fn new(settings: &Settings) -> Self {
        Self {
            clock: FixedTimestep::default(),
            target_fps: settings.target_fps.max(1),
            realtime: settings.realtime,
            max_frames: settings.max_frames,
        }
    }

    fn frame_budget(&self) -> f32 {
        1.0 / self.target_fps as f32
    }

    /// Run until quit, frame limit, or a terminal phase
    pub fn run(
        &mut self,
        game: &mut dyn Game,
        input: &mut dyn InputSource,
        presenter: &mut dyn Presenter,
    ) -> RunSummary {
        let mut summary = RunSummary::new(game);
        let mut unconsumed: Option<TickInput> = None;
        let mut last_frame = Instant::now();
        self.clock.reset();

        log::info!(
            "Running {} at {} fps ({})",
            game.name(),
            self.target_fps,
            if self.realtime { "realtime" } else { "as fast as possible" }
        );

        loop {
            if self.max_frames.is_some_and(|max| summary.frames >= max) {
                log::info!("Frame limit reached");
                break;
            }

            let frame_start = Instant::now();
            let mut tick_input = input.poll();
            if tick_input.quit {
                summary.quit = true;
                break;
            }
            if let Some(earlier) = unconsumed.take() {
                tick_input.carry_one_shots(&earlier);
            }

            let frame_dt = if self.realtime {
                frame_start.duration_since(last_frame).as_secs_f32()
            } else {
                self.frame_budget()
            };
            last_frame = frame_start;

            let substeps = self.clock.advance(frame_dt);
            if substeps == 0 {
                unconsumed = Some(tick_input);
            } else {
                for _ in 0..substeps {
                    game.tick(&tick_input, SIM_DT);
                    summary.steps += 1;
                    // One-shot commands only apply to the first substep
                    tick_input.clear_one_shots();
                    Self::forward_events(game, presenter, &mut summary);
                }
            }

            presenter.begin_frame();
            game.draw(presenter);
            presenter.present(frame_dt);
            summary.frames += 1;

            if game.phase().is_terminal() {
                break;
            }

            if self.realtime {
                let budget = Duration::from_secs_f32(self.frame_budget());
                let spent = frame_start.elapsed();
                if spent < budget {
                    std::thread::sleep(budget - spent);
                }
            }
        }

        summary.phase = game.phase();
        summary.score = game.score();
        summary.high_score = game.high_score();
        log::info!(
            "{} finished after {} frames: {:?}, score {}",
            summary.game,
            summary.frames,
            summary.phase,
            summary.score
        );
        summary
    }

    fn forward_events(game: &mut dyn Game, presenter: &mut dyn Presenter, summary: &mut RunSummary) {
        for event in game.drain_events() {
            match event {
                GameEvent::Particles(req) => presenter.spawn_particles(&req),
                GameEvent::BrickDestroyed { .. } => summary.bricks_destroyed += 1,
                GameEvent::PowerUpCollected(kind) => {
                    summary.powerups_collected += 1;
                    log::debug!("Collected {}", kind.name());
                }
                GameEvent::FoodEaten { kind, points } => {
                    summary.foods_eaten += 1;
                    log::trace!("Ate {:?} food for {} points", kind, points);
                }
                GameEvent::ComboEngaged => log::debug!("Combo multiplier engaged"),
                GameEvent::LifeLost { lives_left } => {
                    summary.lives_lost += 1;
                    log::debug!("Life lost, {} left", lives_left);
                }
                GameEvent::LevelComplete { level, bonus } => {
                    summary.levels_completed += 1;
                    log::debug!("Level {} cleared (+{})", level + 1, bonus);
                }
                GameEvent::GameOver { score } | GameEvent::Victory { score } => {
                    log::debug!("Run ended with {} points", score);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::{AutoplayInput, LogPresenter, ScriptedInput};
    use crate::sim::{BreakerSession, SerpentSession};

    fn headless_settings(max_frames: u64) -> Settings {
        Settings {
            realtime: false,
            max_frames: Some(max_frames),
            ..Default::default()
        }
    }

    #[test]
    fn test_start_then_frame_limit() {
        let settings = headless_settings(30);
        let mut game = SerpentSession::new(1);
        let mut input = ScriptedInput::new(vec![TickInput {
            start: true,
            ..Default::default()
        }]);
        let mut presenter = LogPresenter::new(100, 1);
        let summary = Runner::new(&settings).run(&mut game, &mut input, &mut presenter);
        assert_eq!(summary.frames, 30);
        assert_eq!(summary.phase, GamePhase::Playing);
        assert!(summary.steps >= 29);
        assert!(!summary.quit);
    }

    #[test]
    fn test_quit_stops_immediately() {
        let settings = headless_settings(100);
        let mut game = BreakerSession::new(2);
        let mut input = ScriptedInput::new(vec![TickInput {
            quit: true,
            ..Default::default()
        }]);
        let mut presenter = LogPresenter::new(100, 2);
        let summary = Runner::new(&settings).run(&mut game, &mut input, &mut presenter);
        assert!(summary.quit);
        assert_eq!(summary.frames, 0);
        assert_eq!(summary.steps, 0);
    }

    #[test]
    fn test_start_does_not_launch() {
        let settings = headless_settings(5);
        let mut game = BreakerSession::new(3);
        let mut input = ScriptedInput::new(vec![TickInput {
            start: true,
            ..Default::default()
        }]);
        let mut presenter = LogPresenter::new(100, 3);
        Runner::new(&settings).run(&mut game, &mut input, &mut presenter);
        assert_eq!(game.phase, GamePhase::Playing);
        assert!(game.balls[0].stuck_to_paddle);
    }

    #[test]
    fn test_autoplay_breaker_forwards_particles() {
        let settings = headless_settings(3_000);
        let mut game = BreakerSession::new(4);
        let mut input = AutoplayInput::default();
        let mut presenter = LogPresenter::new(500, 4);
        let summary = Runner::new(&settings).run(&mut game, &mut input, &mut presenter);
        assert!(summary.bricks_destroyed > 0);
        assert_eq!(summary.score, game.score);
        assert!(presenter.particles_spawned() > 0);
    }

    #[test]
    fn test_summary_serializes() {
        let summary = RunSummary::new(&SerpentSession::new(5));
        let json = serde_json::to_string(&summary).unwrap_or_default();
        assert!(json.contains("\"game\":\"serpent\""));
        let back: RunSummary = serde_json::from_str(&json).unwrap_or_else(|_| summary.clone());
        assert_eq!(back, summary);
    }
}
