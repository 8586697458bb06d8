//! Brick breaker session: owns every entity and advances them in a fixed
//! order each step (paddle -> balls -> bricks -> power-ups).

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::autopilot;
use super::ball::Ball;
use super::brick::{Brick, BrickKind};
use super::levels::{build_level, level_count};
use super::paddle::Paddle;
use super::powerup::{PowerUp, PowerUpEffect, PowerUpKind};
use crate::consts::breaker::*;
use crate::consts::palette;
use crate::sim::events::{EffectKind, GameEvent};
use crate::sim::input::TickInput;
use crate::sim::phase::GamePhase;

/// Remaining seconds on timed power-ups, shown as HUD timer bars
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EffectTimers {
    pub extend_paddle: f32,
    pub slow_ball: f32,
}

impl EffectTimers {
    fn decay(&mut self, dt: f32) {
        self.extend_paddle = (self.extend_paddle - dt).max(0.0);
        self.slow_ball = (self.slow_ball - dt).max(0.0);
    }
}

/// Complete brick breaker state
#[derive(Debug, Clone)]
pub struct BreakerSession {
    pub phase: GamePhase,
    pub score: u64,
    /// In-memory best score, survives restarts of this session
    pub high_score: u64,
    pub lives: u32,
    /// Current level index (0-based)
    pub level: usize,
    /// Consecutive scoring hits within the combo window
    pub combo: u32,
    pub combo_timer: f32,
    /// Breakable bricks still standing
    pub bricks_left: u32,
    pub paddle: Paddle,
    pub balls: Vec<Ball>,
    pub bricks: Vec<Brick>,
    pub powerups: Vec<PowerUp>,
    pub effects: EffectTimers,
    /// Simulation steps run while playing
    pub time_ticks: u64,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl BreakerSession {
    /// New session on the menu screen with level 1 laid out
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            lives: INITIAL_LIVES,
            level: 0,
            combo: 0,
            combo_timer: 0.0,
            bricks_left: 0,
            paddle: Paddle::default(),
            balls: Vec::new(),
            bricks: Vec::new(),
            powerups: Vec::new(),
            effects: EffectTimers::default(),
            time_ticks: 0,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.load_level(0);
        session
    }

    /// Reset score, lives and level and start playing
    pub fn start_run(&mut self) {
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.load_level(0);
        self.phase = GamePhase::Playing;
        log::info!("Breaker run started");
    }

    /// Lay out a level and put a fresh ball on the paddle
    pub fn load_level(&mut self, index: usize) {
        self.level = index % level_count();
        self.bricks = build_level(self.level);
        self.powerups.clear();
        self.bricks_left = self.bricks.iter().filter(|b| b.counts_for_clear()).count() as u32;

        self.paddle.reset();
        self.effects = EffectTimers::default();
        self.balls.clear();
        self.spawn_ball_stuck();

        self.combo = 0;
        self.combo_timer = 0.0;

        log::info!(
            "Breaker level {} loaded ({} bricks, {} breakable)",
            self.level + 1,
            self.bricks.len(),
            self.bricks_left
        );
    }

    /// Take every event queued since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn spawn_ball_stuck(&mut self) {
        let mut ball = Ball::default();
        ball.follow_paddle(&self.paddle);
        self.balls.push(ball);
    }

    /// Spawn free balls at the first ball's center with random headings
    pub fn create_extra_balls(&mut self, count: usize) {
        let Some(origin) = self.balls.first().map(Ball::center) else {
            return;
        };
        for _ in 0..count {
            let angle = self.rng.random_range(0.0..std::f32::consts::TAU);
            let speed = self
                .rng
                .random_range(MULTIBALL_MIN_SPEED..=MULTIBALL_MAX_SPEED);
            let vel = Vec2::new(angle.cos(), angle.sin()) * speed;
            self.balls.push(Ball::free(origin, vel));
        }
    }

    /// Apply a collected power-up
    pub fn apply_effect(&mut self, effect: PowerUpEffect) {
        match effect {
            PowerUpEffect::SpawnBalls(count) => self.create_extra_balls(count),
            PowerUpEffect::ExtendPaddle { duration } => {
                self.effects.extend_paddle = duration;
                self.paddle.extend(duration);
            }
            PowerUpEffect::SlowBalls { duration } => {
                self.effects.slow_ball = duration;
                for ball in &mut self.balls {
                    ball.slow_down(duration);
                }
            }
            PowerUpEffect::AddLife => self.lives += 1,
        }
    }

    /// Advance the session by one fixed step
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        if input.menu && self.phase != GamePhase::Menu {
            self.phase = GamePhase::Menu;
            return;
        }

        match self.phase {
            GamePhase::Menu | GamePhase::GameOver | GamePhase::Victory => {
                if input.start {
                    self.start_run();
                }
            }
            GamePhase::Paused => {
                if input.pause {
                    self.phase = self.phase.toggle_pause();
                }
            }
            GamePhase::Playing => {
                if input.pause {
                    self.phase = self.phase.toggle_pause();
                    return;
                }
                self.step(input, dt);
            }
        }
    }

    fn step(&mut self, input: &TickInput, dt: f32) {
        let input = if input.idle_mode {
            autopilot::drive(self, input)
        } else {
            input.clone()
        };

        self.time_ticks += 1;

        self.paddle.update(input.pointer_x, input.paddle_axis, dt);
        if input.launch {
            for ball in self.balls.iter_mut().filter(|b| b.stuck_to_paddle) {
                ball.launch();
            }
        }

        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_timer = 0.0;
                self.combo = 0;
            }
        }

        self.effects.decay(dt);

        let mut level_cleared = false;
        for ball in self.balls.iter_mut() {
            ball.update(&self.paddle, dt);

            if !ball.stuck_to_paddle {
                ball.check_paddle_collision(&self.paddle);
            }

            for brick in self.bricks.iter_mut().filter(|b| b.visible) {
                let Some(contact) = ball.check_brick_collision(brick) else {
                    continue;
                };

                if contact.points > 0.0 {
                    if self.combo_timer > 0.0 {
                        self.combo += 1;
                    } else {
                        self.combo = 1;
                    }
                    self.combo_timer = COMBO_TIMER;

                    let bonus = (self.combo - 1) * COMBO_BONUS;
                    let earned = (contact.points + bonus as f32) as u64;
                    self.score += earned;

                    self.events.push(GameEvent::particles(
                        EffectKind::BrickBreak,
                        brick.rect.center(),
                        brick.color(),
                        20,
                    ));
                }

                if contact.destroyed {
                    self.bricks_left = self.bricks_left.saturating_sub(1);
                    self.events.push(GameEvent::BrickDestroyed {
                        points: contact.points as u64,
                    });

                    if brick.kind == BrickKind::PowerUp {
                        let kind = PowerUpKind::random(&mut self.rng);
                        self.powerups.push(PowerUp::new(brick.rect.center(), kind));
                    }

                    if self.bricks_left == 0 {
                        level_cleared = true;
                    }
                }

                // One brick per ball per step
                break;
            }

            if level_cleared {
                break;
            }
        }

        if level_cleared {
            self.level_complete();
            return;
        }

        let events = &mut self.events;
        self.balls.retain(|ball| {
            if ball.is_lost() {
                events.push(GameEvent::particles(
                    EffectKind::BallLost,
                    Vec2::new(ball.rect.center_x(), SCREEN_HEIGHT),
                    palette::WHITE,
                    20,
                ));
                false
            } else {
                true
            }
        });

        if self.balls.is_empty() {
            self.lives = self.lives.saturating_sub(1);
            self.events.push(GameEvent::LifeLost {
                lives_left: self.lives,
            });
            if self.lives == 0 {
                self.game_over();
                return;
            }
            log::info!("Ball lost, {} lives left", self.lives);
            self.spawn_ball_stuck();
        }

        let mut collected = Vec::new();
        for powerup in self.powerups.iter_mut() {
            powerup.update();
            if powerup.active && powerup.rect.intersects(&self.paddle.rect) {
                if let Some(effect) = powerup.collect() {
                    collected.push((powerup.kind, powerup.rect.center(), effect));
                }
            }
        }
        self.powerups.retain(|p| p.active);

        for (kind, pos, effect) in collected {
            log::debug!("Power-up collected: {}", kind.name());
            self.apply_effect(effect);
            self.events.push(GameEvent::PowerUpCollected(kind));
            self.events.push(GameEvent::particles(
                EffectKind::PowerUpCollect,
                pos,
                kind.color(),
                15,
            ));
        }

        if self.rng.random_bool(SPEED_RAMP_CHANCE) {
            for ball in &mut self.balls {
                ball.increase_speed();
            }
        }
    }

    fn level_complete(&mut self) {
        let bonus = (self.level as u64 + 1) * LEVEL_BONUS;
        self.score += bonus;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::LevelComplete {
            level: self.level,
            bonus,
        });
        log::info!(
            "Breaker level {} complete, bonus {} (score {})",
            self.level + 1,
            bonus,
            self.score
        );

        if self.level + 1 >= level_count() {
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory { score: self.score });
            log::info!("All breaker levels cleared with {} points", self.score);
        } else {
            self.load_level(self.level + 1);
        }
    }

    fn game_over(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Breaker game over: score {}, high score {}",
            self.score,
            self.high_score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::geom::Rect;

    fn playing(seed: u64) -> BreakerSession {
        let mut s = BreakerSession::new(seed);
        s.start_run();
        s
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    /// Park a free ball just under the given brick, moving up into it
    fn ball_under(brick: &Brick) -> Ball {
        let c = brick.rect.center();
        Ball::free(Vec2::new(c.x, brick.rect.bottom() + 6.0), Vec2::new(0.0, -4.0))
    }

    #[test]
    fn test_new_session_waits_on_menu() {
        let mut s = BreakerSession::new(1);
        assert_eq!(s.phase, GamePhase::Menu);
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.phase, GamePhase::Menu);
        assert_eq!(s.time_ticks, 0);

        let start = TickInput {
            start: true,
            ..Default::default()
        };
        s.tick(&start, SIM_DT);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.bricks_left, 27);
        assert_eq!(s.lives, INITIAL_LIVES);
    }

    #[test]
    fn test_pause_freezes_everything() {
        let mut s = playing(2);
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        s.tick(&launch, SIM_DT);
        let pos = s.balls[0].rect;

        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        s.tick(&pause, SIM_DT);
        assert_eq!(s.phase, GamePhase::Paused);
        for _ in 0..10 {
            s.tick(&idle(), SIM_DT);
        }
        assert_eq!(s.balls[0].rect, pos);

        s.tick(&pause, SIM_DT);
        assert_eq!(s.phase, GamePhase::Playing);
    }

    #[test]
    fn test_launch_releases_ball() {
        let mut s = playing(3);
        assert!(s.balls[0].stuck_to_paddle);
        let launch = TickInput {
            launch: true,
            ..Default::default()
        };
        s.tick(&launch, SIM_DT);
        assert!(!s.balls[0].stuck_to_paddle);
    }

    #[test]
    fn test_combo_bonus_accumulates() {
        let mut s = playing(4);
        s.balls = vec![ball_under(&s.bricks[18])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.score, 10);
        assert_eq!(s.combo, 1);
        assert_eq!(s.bricks_left, 26);

        s.balls = vec![ball_under(&s.bricks[19])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.combo, 2);
        assert_eq!(s.score, 10 + 10 + COMBO_BONUS as u64);
    }

    #[test]
    fn test_combo_resets_after_timeout() {
        let mut s = playing(5);
        s.balls = vec![ball_under(&s.bricks[18])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.combo, 1);

        s.balls = vec![Ball::default()];
        for _ in 0..70 {
            s.tick(&idle(), SIM_DT);
        }
        assert_eq!(s.combo, 0);
        assert_eq!(s.combo_timer, 0.0);
    }

    #[test]
    fn test_only_first_brick_resolved_per_ball() {
        let mut s = playing(6);
        // Straddle two horizontally adjacent bricks
        let left = s.bricks[18].rect;
        let x = left.right() + BRICK_PADDING / 2.0;
        s.balls = vec![Ball::free(
            Vec2::new(x, left.bottom() + 6.0),
            Vec2::new(0.0, -4.0),
        )];
        s.tick(&idle(), SIM_DT);
        let destroyed = s.bricks.iter().filter(|b| !b.visible).count();
        assert_eq!(destroyed, 1);
    }

    #[test]
    fn test_losing_all_balls_costs_a_life() {
        let mut s = playing(7);
        s.balls = vec![Ball::free(
            Vec2::new(400.0, SCREEN_HEIGHT + 20.0),
            Vec2::new(0.0, 4.0),
        )];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.lives, INITIAL_LIVES - 1);
        assert_eq!(s.balls.len(), 1);
        assert!(s.balls[0].stuck_to_paddle);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::LifeLost {
            lives_left: INITIAL_LIVES - 1
        }));
    }

    #[test]
    fn test_last_life_ends_run() {
        let mut s = playing(8);
        s.score = 120;
        s.lives = 1;
        s.balls = vec![Ball::free(
            Vec2::new(400.0, SCREEN_HEIGHT + 20.0),
            Vec2::new(0.0, 4.0),
        )];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.high_score, 120);

        // Restart keeps the high score
        let start = TickInput {
            start: true,
            ..Default::default()
        };
        s.tick(&start, SIM_DT);
        assert_eq!(s.phase, GamePhase::Playing);
        assert_eq!(s.score, 0);
        assert_eq!(s.high_score, 120);
    }

    #[test]
    fn test_clearing_level_advances() {
        let mut s = playing(9);
        for brick in s.bricks.iter_mut().skip(1) {
            brick.visible = false;
        }
        s.bricks_left = 1;
        s.balls = vec![ball_under(&s.bricks[0])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.level, 1);
        assert_eq!(s.score, 10 + LEVEL_BONUS);
        assert_eq!(s.high_score, s.score);
        assert_eq!(s.bricks_left, 36);
        assert!(s.balls[0].stuck_to_paddle);
    }

    #[test]
    fn test_clearing_last_level_is_victory() {
        let mut s = playing(10);
        s.load_level(2);
        for brick in s.bricks.iter_mut().filter(|b| b.counts_for_clear()) {
            brick.visible = false;
        }
        // Bottom-left normal brick
        let target = s.bricks.len() - 9;
        s.bricks[target].visible = true;
        s.bricks_left = 1;
        s.balls = vec![ball_under(&s.bricks[target])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.phase, GamePhase::Victory);
        assert_eq!(s.score, 10 + 3 * LEVEL_BONUS);
    }

    #[test]
    fn test_unbreakable_hit_scores_nothing() {
        let mut s = playing(11);
        s.load_level(2);
        let idx = 0;
        assert_eq!(s.bricks[idx].kind, BrickKind::Unbreakable);
        // Hit the fence from above so nothing else is in the way
        let c = s.bricks[idx].rect.center();
        s.balls = vec![Ball::free(
            Vec2::new(c.x, s.bricks[idx].rect.top() - 6.0),
            Vec2::new(0.0, 4.0),
        )];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.score, 0);
        assert_eq!(s.combo, 0);
        assert!(s.bricks[idx].visible);
        assert!(s.balls[0].vel.y < 0.0);
    }

    #[test]
    fn test_powerup_brick_drops_capsule() {
        let mut s = playing(12);
        s.load_level(2);
        // Row 1 col 0 is a power-up brick; it is checked before the row below
        let idx = 9;
        assert_eq!(s.bricks[idx].kind, BrickKind::PowerUp);
        s.balls = vec![ball_under(&s.bricks[idx])];
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.powerups.len(), 1);
        assert!(s.powerups[0].active);
    }

    #[test]
    fn test_collecting_powerups_applies_effects() {
        let mut s = playing(13);
        let paddle_top = s.paddle.rect.top();
        let cx = s.paddle.rect.center_x();

        s.powerups.push(PowerUp::new(
            Vec2::new(cx - POWERUP_WIDTH / 2.0, paddle_top - POWERUP_HEIGHT + 1.0),
            PowerUpKind::ExtendPaddle,
        ));
        s.tick(&idle(), SIM_DT);
        assert!(s.powerups.is_empty());
        assert_eq!(s.paddle.width(), PADDLE_EXTENDED_WIDTH);
        assert!(s.effects.extend_paddle > 0.0);

        s.powerups.push(PowerUp::new(
            Vec2::new(cx - POWERUP_WIDTH / 2.0, paddle_top - POWERUP_HEIGHT + 1.0),
            PowerUpKind::ExtraLife,
        ));
        s.tick(&idle(), SIM_DT);
        assert_eq!(s.lives, INITIAL_LIVES + 1);
        assert!(
            s.drain_events()
                .contains(&GameEvent::PowerUpCollected(PowerUpKind::ExtraLife))
        );
    }

    #[test]
    fn test_multiball_spawns_two_free_balls() {
        let mut s = playing(14);
        s.apply_effect(PowerUpEffect::SpawnBalls(2));
        assert_eq!(s.balls.len(), 3);
        for ball in &s.balls[1..] {
            assert!(!ball.stuck_to_paddle);
            let speed = ball.speed();
            assert!((MULTIBALL_MIN_SPEED - 1e-4..=MULTIBALL_MAX_SPEED + 1e-4).contains(&speed));
        }
    }

    #[test]
    fn test_slow_ball_halves_every_ball() {
        let mut s = playing(15);
        s.balls = vec![Ball::free(Vec2::new(400.0, 300.0), Vec2::new(4.0, -4.0))];
        s.apply_effect(PowerUpEffect::SlowBalls { duration: 10.0 });
        assert_eq!(s.balls[0].vel, Vec2::new(2.0, -2.0));
        assert_eq!(s.effects.slow_ball, 10.0);
    }

    #[test]
    fn test_menu_input_returns_to_menu() {
        let mut s = playing(16);
        let esc = TickInput {
            menu: true,
            ..Default::default()
        };
        s.tick(&esc, SIM_DT);
        assert_eq!(s.phase, GamePhase::Menu);
    }

    #[test]
    fn test_speed_ramp_fires_and_stops_at_cap() {
        let mut s = playing(21);
        let center = Vec2::new(SCREEN_WIDTH / 2.0, 320.0);
        let base = Vec2::new(4.0, -4.0);

        let mut ramped = 0;
        for _ in 0..2_000 {
            s.balls = vec![Ball::free(center, base)];
            s.tick(&idle(), SIM_DT);
            if s.balls[0].speed() > base.length() + 1e-4 {
                ramped += 1;
            }
        }
        assert!(ramped > 0);

        s.balls = vec![Ball::free(center, Vec2::new(6.0, -7.5))];
        for _ in 0..2_000 {
            s.balls[0].rect = Rect::from_center(center, BALL_RADIUS * 2.0, BALL_RADIUS * 2.0);
            s.tick(&idle(), SIM_DT);
            assert!(s.balls[0].speed() <= MAX_BALL_SPEED + 1e-3);
        }
        assert!((s.balls[0].speed() - MAX_BALL_SPEED).abs() < 1e-3);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playing(99);
        let mut b = playing(99);
        let input = TickInput {
            launch: true,
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..2_000 {
            a.tick(&input, SIM_DT);
            b.tick(&input, SIM_DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.lives, b.lives);
        assert_eq!(a.balls.len(), b.balls.len());
        assert_eq!(a.bricks_left, b.bricks_left);
    }
}
