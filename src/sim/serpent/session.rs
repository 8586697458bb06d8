//! Serpent session: snake -> collisions -> food, every fixed step

use glam::{IVec2, Vec2};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::autopilot;
use super::food::{Food, FoodEffect};
use super::grid::{Obstacles, layout_count};
use super::snake::Snake;
use crate::consts::palette;
use crate::consts::serpent::*;
use crate::sim::events::{EffectKind, GameEvent};
use crate::sim::input::TickInput;
use crate::sim::phase::GamePhase;

/// Snake length needed to clear a level
pub fn target_length(level: usize) -> usize {
    match LEVEL_TARGET_LENGTH.get(level) {
        Some(&target) => target,
        None => {
            let last = LEVEL_TARGET_LENGTH.len() - 1;
            LEVEL_TARGET_LENGTH[last] + (level - last) * 10
        }
    }
}

/// Pixel center of a grid cell
pub fn cell_center(cell: IVec2) -> Vec2 {
    cell.as_vec2() * CELL_SIZE + Vec2::splat(CELL_SIZE / 2.0)
}

/// Complete serpent state
#[derive(Debug, Clone)]
pub struct SerpentSession {
    pub phase: GamePhase,
    pub score: u64,
    pub high_score: u64,
    /// Current level index (0-based)
    pub level: usize,
    /// Score multiplier, 1.0 or `COMBO_MULTIPLIER`
    pub combo: f32,
    /// Quick pickups in the current streak
    pub combo_counter: u32,
    /// Seconds left on an engaged multiplier
    pub combo_timer: f32,
    /// Foods eaten this level (drives speed-ups)
    pub consecutive_foods: u32,
    /// Seconds of play this run
    pub game_time: f32,
    pub last_food_time: Option<f32>,
    pub snake: Snake,
    pub obstacles: Obstacles,
    /// `None` after a failed spawn; retried next step
    pub food: Option<Food>,
    rng: Pcg32,
    events: Vec<GameEvent>,
}

impl SerpentSession {
    pub fn new(seed: u64) -> Self {
        let mut session = Self {
            phase: GamePhase::Menu,
            score: 0,
            high_score: 0,
            level: 0,
            combo: 1.0,
            combo_counter: 0,
            combo_timer: 0.0,
            consecutive_foods: 0,
            game_time: 0.0,
            last_food_time: None,
            snake: Snake::default(),
            obstacles: Obstacles::default(),
            food: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
        };
        session.load_level(0);
        session
    }

    /// Reset score, clock and level and start playing
    pub fn start_run(&mut self) {
        self.score = 0;
        self.game_time = 0.0;
        self.load_level(0);
        self.phase = GamePhase::Playing;
        log::info!("Serpent run started");
    }

    /// Fresh snake, layout obstacles and food; streak counters cleared
    pub fn load_level(&mut self, index: usize) {
        self.level = index;
        self.snake = Snake::default();
        self.obstacles.load_level(index);
        self.food = None;
        self.spawn_food();

        self.combo = 1.0;
        self.combo_counter = 0;
        self.combo_timer = 0.0;
        self.consecutive_foods = 0;
        self.last_food_time = None;

        log::info!(
            "Serpent level {} loaded ({} obstacles, target length {})",
            self.level + 1,
            self.obstacles.len(),
            target_length(self.level)
        );
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Try to place food; leaves `food` as `None` when the board is too full
    pub fn spawn_food(&mut self) {
        self.food = Food::spawn(&mut self.rng, &self.snake, &self.obstacles, self.game_time);
        if self.food.is_none() {
            log::warn!("No free cell found for food, retrying next step");
        }
    }

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

        if let Some(dir) = input.direction {
            self.snake.change_direction(dir);
        }

        self.game_time += dt;

        if self.combo_timer > 0.0 {
            self.combo_timer -= dt;
            if self.combo_timer <= 0.0 {
                self.combo_timer = 0.0;
                self.combo = 1.0;
                self.combo_counter = 0;
            }
        }

        if self.food.is_none() {
            self.spawn_food();
        }

        self.snake.update(dt);

        if self.snake.check_wall_collision()
            || self.snake.check_self_collision()
            || self.snake.check_obstacle_collision(&self.obstacles)
        {
            self.events.push(GameEvent::particles(
                EffectKind::Collision,
                cell_center(self.snake.head()),
                palette::RED,
                30,
            ));
            self.game_over();
            return;
        }

        let head = self.snake.head();
        if self.food.as_ref().is_some_and(|f| f.pos == head) {
            self.eat_food();
        } else if self
            .food
            .as_ref()
            .is_some_and(|f| f.is_expired(self.game_time))
        {
            self.spawn_food();
        }

        self.events.push(GameEvent::particles(
            EffectKind::Trail,
            cell_center(head),
            palette::GREEN,
            1,
        ));

        if self.snake.len() >= target_length(self.level) {
            self.level_complete();
        }
    }

    fn eat_food(&mut self) {
        let Some(food) = self.food.take() else {
            return;
        };

        let points = (food.kind.points() as f32 * self.combo) as u64;
        self.score += points;

        match food.kind.effect() {
            FoodEffect::Grow(cells) => self.snake.grow(cells),
            FoodEffect::SpeedBoost => self.snake.activate_speed_boost(),
        }

        self.consecutive_foods += 1;

        let quick = self
            .last_food_time
            .is_some_and(|last| self.game_time - last < COMBO_WINDOW);
        if quick {
            self.combo_counter += 1;
            if self.combo_counter >= COMBO_THRESHOLD {
                self.combo = COMBO_MULTIPLIER;
                self.combo_timer = COMBO_DURATION;
                self.combo_counter = 0;
                self.events.push(GameEvent::ComboEngaged);
                log::debug!("Combo engaged at {:.1}s", self.game_time);
            }
        } else {
            self.combo_counter = 1;
            self.combo = 1.0;
        }
        self.last_food_time = Some(self.game_time);

        self.events.push(GameEvent::particles(
            EffectKind::FoodEaten,
            cell_center(food.pos),
            food.kind.color(),
            15,
        ));
        self.events.push(GameEvent::FoodEaten {
            kind: food.kind,
            points,
        });

        self.spawn_food();

        if self.consecutive_foods % SPEEDUP_EVERY_FOODS == 0 {
            self.snake.increase_speed();
            log::debug!("Snake speed now {:.1}", self.snake.base_speed);
        }
    }

    fn level_complete(&mut self) {
        let bonus = LEVEL_COMPLETE_BONUS * (self.level as u64 + 1);
        self.score += bonus;
        self.high_score = self.high_score.max(self.score);
        self.events.push(GameEvent::LevelComplete {
            level: self.level,
            bonus,
        });
        log::info!(
            "Serpent level {} complete, bonus {} (score {})",
            self.level + 1,
            bonus,
            self.score
        );

        let next = self.level + 1;
        if next >= layout_count() {
            self.level = next;
            self.phase = GamePhase::Victory;
            self.events.push(GameEvent::Victory { score: self.score });
            log::info!("All serpent levels cleared with {} points", self.score);
            return;
        }

        self.load_level(next);
        let count = self
            .rng
            .random_range(EXTRA_OBSTACLES_MIN..=EXTRA_OBSTACLES_MAX);
        let food = self.food.as_ref().map(|f| f.pos);
        let added = self
            .obstacles
            .add_random_obstacles(&mut self.rng, count, &self.snake, food);
        log::debug!("Added {} random obstacles", added);
    }

    fn game_over(&mut self) {
        self.high_score = self.high_score.max(self.score);
        self.phase = GamePhase::GameOver;
        self.events.push(GameEvent::GameOver { score: self.score });
        log::info!(
            "Serpent game over: score {}, length {}, high score {}",
            self.score,
            self.snake.len(),
            self.high_score
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::sim::input::Direction;
    use crate::sim::serpent::FoodKind;

    fn playing(seed: u64) -> SerpentSession {
        let mut s = SerpentSession::new(seed);
        s.start_run();
        s
    }

    /// Food of `kind` directly ahead of the head
    fn food_ahead(s: &mut SerpentSession, kind: FoodKind) {
        let pos = s.snake.head() + s.snake.next_direction.delta();
        s.food = Some(Food {
            pos,
            kind,
            spawn_time: s.game_time,
            lifetime: FOOD_LIFETIME,
        });
    }

    /// Keep a fresh food in the top-left corner, out of the snake's way
    fn park_food(s: &mut SerpentSession) {
        s.food = Some(Food {
            pos: IVec2::ZERO,
            kind: FoodKind::Normal,
            spawn_time: s.game_time,
            lifetime: FOOD_LIFETIME,
        });
    }

    /// Tick until the snake takes one step
    fn tick_until_move(s: &mut SerpentSession) {
        let head = s.snake.head();
        for _ in 0..60 {
            s.tick(&TickInput::default(), SIM_DT);
            if s.snake.head() != head || s.phase != GamePhase::Playing {
                return;
            }
        }
    }

    #[test]
    fn test_new_session_waits_on_menu() {
        let mut s = SerpentSession::new(1);
        assert_eq!(s.phase, GamePhase::Menu);
        s.tick(&TickInput::default(), SIM_DT);
        assert_eq!(s.game_time, 0.0);
        assert!(s.food.is_some());
    }

    #[test]
    fn test_eating_normal_food() {
        let mut s = playing(2);
        food_ahead(&mut s, FoodKind::Normal);
        tick_until_move(&mut s);
        assert_eq!(s.score, 10);
        assert_eq!(s.snake.grow_pending, 1);
        assert_eq!(s.consecutive_foods, 1);
        assert_eq!(s.combo_counter, 1);
        assert!(s.food.is_some());
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::FoodEaten {
            kind: FoodKind::Normal,
            points: 10
        }));
    }

    #[test]
    fn test_speed_food_boosts() {
        let mut s = playing(3);
        food_ahead(&mut s, FoodKind::Speed);
        tick_until_move(&mut s);
        assert_eq!(s.score, 25);
        assert!(s.snake.is_boosted());
        assert_eq!(s.snake.grow_pending, 0);
    }

    #[test]
    fn test_combo_engages_then_resets_after_gap() {
        let mut s = playing(4);
        for _ in 0..5 {
            food_ahead(&mut s, FoodKind::Normal);
            tick_until_move(&mut s);
        }
        assert_eq!(s.combo, COMBO_MULTIPLIER);
        assert_eq!(s.score, 50);
        assert!(s.drain_events().contains(&GameEvent::ComboEngaged));

        // Stall the snake so the multiplier runs out with no pickups
        s.snake.speed = 0.1;
        for _ in 0..200 {
            s.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(s.combo, 1.0);
        s.snake.speed = s.snake.base_speed;

        food_ahead(&mut s, FoodKind::Normal);
        tick_until_move(&mut s);
        assert_eq!(s.score, 60);
        assert_eq!(s.combo, 1.0);
        assert_eq!(s.combo_counter, 1);
    }

    #[test]
    fn test_combo_multiplies_points() {
        let mut s = playing(5);
        s.combo = COMBO_MULTIPLIER;
        s.combo_timer = COMBO_DURATION;
        s.last_food_time = Some(s.game_time);
        s.combo_counter = 1;
        food_ahead(&mut s, FoodKind::Golden);
        tick_until_move(&mut s);
        assert_eq!(s.score, 75);
    }

    #[test]
    fn test_combo_timer_expiry_resets_multiplier() {
        let mut s = playing(6);
        s.combo = COMBO_MULTIPLIER;
        s.combo_timer = 0.05;
        for _ in 0..4 {
            s.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(s.combo, 1.0);
        assert_eq!(s.combo_counter, 0);
    }

    #[test]
    fn test_reverse_input_keeps_heading() {
        let mut s = playing(7);
        s.food = None;
        let head = s.snake.head();
        let left = TickInput {
            direction: Some(Direction::Left),
            ..Default::default()
        };
        s.tick(&left, SIM_DT);
        assert_eq!(s.snake.next_direction, Direction::Right);
        tick_until_move(&mut s);
        assert_eq!(s.snake.head(), head + IVec2::X);
    }

    #[test]
    fn test_wall_hit_ends_run() {
        let mut s = playing(8);
        s.score = 40;
        s.food = None;
        s.snake = Snake::new(IVec2::new(GRID_WIDTH - 1, 3));
        tick_until_move(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);
        assert_eq!(s.high_score, 40);
        let events = s.drain_events();
        assert!(events.contains(&GameEvent::GameOver { score: 40 }));
        assert!(events.iter().any(|e| matches!(
            e,
            GameEvent::Particles(req) if req.kind == EffectKind::Collision && req.count == 30
        )));
    }

    #[test]
    fn test_obstacle_hit_ends_run() {
        let mut s = playing(9);
        s.load_level(1);
        s.food = None;
        s.snake = Snake::new(IVec2::new(9, 10));
        tick_until_move(&mut s);
        assert_eq!(s.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_expired_food_respawns() {
        let mut s = playing(10);
        if let Some(food) = s.food.as_mut() {
            food.spawn_time = -FOOD_LIFETIME - 1.0;
            food.pos = IVec2::ZERO;
        }
        s.tick(&TickInput::default(), SIM_DT);
        let spawned_at = s.food.as_ref().map(|f| f.spawn_time);
        assert_eq!(spawned_at, Some(s.game_time));
    }

    #[test]
    fn test_missing_food_is_retried() {
        let mut s = playing(11);
        s.food = None;
        s.tick(&TickInput::default(), SIM_DT);
        assert!(s.food.is_some());
    }

    #[test]
    fn test_level_target_advances_level() {
        let mut s = playing(12);
        s.snake.grow((target_length(0) - s.snake.len()) as u32);
        for _ in 0..120 {
            park_food(&mut s);
            s.tick(&TickInput::default(), SIM_DT);
            if s.level == 1 {
                break;
            }
        }
        assert_eq!(s.level, 1);
        assert_eq!(s.score, LEVEL_COMPLETE_BONUS);
        assert_eq!(s.snake.len(), SNAKE_START_LENGTH);
        let extra = s.obstacles.len() - 6;
        assert!((EXTRA_OBSTACLES_MIN..=EXTRA_OBSTACLES_MAX).contains(&extra));
        assert_eq!(s.combo_counter, 0);
    }

    #[test]
    fn test_last_level_is_victory() {
        let mut s = playing(13);
        s.load_level(2);
        s.snake = Snake::new(IVec2::new(30, 25));
        s.snake.grow((target_length(2) - s.snake.len()) as u32);
        s.obstacles = Obstacles::default();
        for _ in 0..400 {
            // Turn up along the right-hand edge
            if s.snake.head().x >= GRID_WIDTH - 2 {
                s.snake.change_direction(Direction::Up);
            }
            park_food(&mut s);
            s.tick(&TickInput::default(), SIM_DT);
            if s.phase != GamePhase::Playing {
                break;
            }
        }
        assert_eq!(s.phase, GamePhase::Victory);
        assert_eq!(s.score, LEVEL_COMPLETE_BONUS * 3);
    }

    #[test]
    fn test_target_lengths() {
        assert_eq!(target_length(0), 10);
        assert_eq!(target_length(2), 30);
        assert_eq!(target_length(4), 50);
    }

    #[test]
    fn test_pause_freezes_clock() {
        let mut s = playing(14);
        let pause = TickInput {
            pause: true,
            ..Default::default()
        };
        s.tick(&pause, SIM_DT);
        let clock = s.game_time;
        let head = s.snake.head();
        for _ in 0..30 {
            s.tick(&TickInput::default(), SIM_DT);
        }
        assert_eq!(s.game_time, clock);
        assert_eq!(s.snake.head(), head);
    }

    #[test]
    fn test_every_fifth_food_raises_speed() {
        let mut s = playing(15);
        for _ in 0..4 {
            food_ahead(&mut s, FoodKind::Normal);
            tick_until_move(&mut s);
        }
        assert_eq!(s.consecutive_foods, 4);
        assert_eq!(s.snake.base_speed, SNAKE_SPEED);

        food_ahead(&mut s, FoodKind::Normal);
        tick_until_move(&mut s);
        assert_eq!(s.consecutive_foods, 5);
        assert_eq!(s.snake.base_speed, SNAKE_SPEED + SPEED_INCREMENT);
        assert_eq!(s.snake.speed, s.snake.base_speed);
    }

    #[test]
    fn test_combo_window_is_exclusive() {
        let mut s = playing(16);
        s.game_time = 4.0;
        s.combo_counter = 3;
        s.last_food_time = Some(4.0 - COMBO_WINDOW);
        park_food(&mut s);
        s.eat_food();
        assert_eq!(s.combo_counter, 1);

        s.game_time = 5.5;
        park_food(&mut s);
        s.eat_food();
        assert_eq!(s.combo_counter, 2);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = playing(77);
        let mut b = playing(77);
        let input = TickInput {
            idle_mode: true,
            ..Default::default()
        };
        for _ in 0..3_000 {
            a.tick(&input, SIM_DT);
            b.tick(&input, SIM_DT);
        }
        assert_eq!(a.score, b.score);
        assert_eq!(a.snake.segments, b.snake.segments);
        assert_eq!(a.phase, b.phase);
    }
}
