//! Snake
//!
//! Classic grid snake on a 20×20 field. The head advances one cell per
//! tick; the tail follows unless food was eaten, so length grows by exactly
//! one per food. Cadence is tied to difficulty: the tick rate starts at
//! 10 Hz and gains 1 Hz every 5 points, capped at 20 Hz.

use std::collections::VecDeque;

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{Tone, Waveform};
use crate::collision::GridBounds;
use crate::input::{Dir, TickInput};
use crate::persistence::{GameId, PersistencePort};
use crate::phase::Phase;
use crate::render::{Align, Color, DrawCmd};
use crate::score::ScoreBoard;

use super::ArcadeGame;

pub const GRID: GridBounds = GridBounds::new(20, 20);
/// Cell edge in pixels; the field is 400×400.
pub const CELL: f32 = 20.0;

const INITIAL_HEAD: (i32, i32) = (10, 10);
const INITIAL_FOOD: (i32, i32) = (15, 15);
const BASE_RATE_HZ: u32 = 10;
const MAX_RATE_HZ: u32 = 20;
/// Points between speed-ups.
const SPEED_UP_EVERY: u32 = 5;

const EAT_CUE: Tone = Tone::new(600.0, 0.2, Waveform::Sine);
const GAME_OVER_CUE: Tone = Tone::new(150.0, 1.0, Waveform::Square);

pub struct SnakeGame {
    phase: Phase,
    /// Head-first; consecutive cells are edge-adjacent.
    body: VecDeque<(i32, i32)>,
    dir: Option<Dir>,
    food: (i32, i32),
    rate_hz: u32,
    score: ScoreBoard,
    rng: Pcg32,
    seed: u64,
    cues: Vec<Tone>,
}

impl SnakeGame {
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            phase: Phase::Waiting,
            body: VecDeque::from([INITIAL_HEAD]),
            dir: None,
            food: INITIAL_FOOD,
            rate_hz: BASE_RATE_HZ,
            score: ScoreBoard::new(high_score),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            cues: Vec::new(),
        }
    }

    pub fn body(&self) -> &VecDeque<(i32, i32)> {
        &self.body
    }

    pub fn food(&self) -> (i32, i32) {
        self.food
    }

    pub fn tick_rate_hz(&self) -> u32 {
        self.rate_hz
    }

    fn restart(&mut self) {
        *self = Self::new(self.seed, self.score.high_score);
    }

    /// Re-sample until the food lands off the body. The sample range stops
    /// one cell short of the far edge.
    fn spawn_food(&mut self) -> (i32, i32) {
        loop {
            let cell = (
                self.rng.random_range(0..GRID.cols - 1),
                self.rng.random_range(0..GRID.rows - 1),
            );
            if !self.body.contains(&cell) {
                return cell;
            }
        }
    }

    fn head(&self) -> (i32, i32) {
        *self.body.front().unwrap_or(&INITIAL_HEAD)
    }

    fn hit_wall_or_self(&self) -> bool {
        let head = self.head();
        if !GRID.contains(head) {
            return true;
        }
        self.body.iter().skip(1).any(|&cell| cell == head)
    }
}

impl ArcadeGame for SnakeGame {
    fn id(&self) -> GameId {
        GameId::Snake
    }

    fn tick(&mut self, input: &TickInput, store: &mut dyn PersistencePort) {
        if input.pause {
            self.phase.toggle_pause();
        }
        match self.phase {
            Phase::Waiting => {
                if input.start && self.phase.start() {
                    // First move heads right.
                    self.dir = Some(Dir::Right);
                }
                return;
            }
            Phase::GameOver => {
                if input.reset {
                    self.restart();
                }
                return;
            }
            Phase::Paused => return,
            Phase::Playing => {}
        }

        // Apply the queued turn unless it would reverse into the body.
        if let Some(next) = input.queued_dir {
            let reverses = self.dir.is_some_and(|dir| next == dir.opposite());
            if !reverses {
                self.dir = Some(next);
            }
        }
        let Some(dir) = self.dir else { return };

        let (dx, dy) = dir.delta();
        let head = self.head();
        let new_head = (head.0 + dx, head.1 + dy);
        self.body.push_front(new_head);

        if new_head == self.food {
            self.score.award(1);
            self.score.sync(store, GameId::Snake);
            if self.score.score % SPEED_UP_EVERY == 0 {
                self.rate_hz = (self.rate_hz + 1).min(MAX_RATE_HZ);
            }
            self.food = self.spawn_food();
            self.cues.push(EAT_CUE);
        } else {
            self.body.pop_back();
        }

        if self.hit_wall_or_self() {
            self.phase.end();
            self.score.sync(store, GameId::Snake);
            self.cues.push(GAME_OVER_CUE);
        }
    }

    fn draw(&self) -> Vec<DrawCmd> {
        let width = GRID.cols as f32 * CELL;
        let height = GRID.rows as f32 * CELL;
        let mut cmds = vec![DrawCmd::rect(0.0, 0.0, width, height, Color::BLACK)];

        for (i, &(x, y)) in self.body.iter().enumerate() {
            let color = if i == 0 { Color::YELLOW } else { Color::GREEN };
            cmds.push(DrawCmd::rect(x as f32 * CELL, y as f32 * CELL, CELL, CELL, color));
        }
        cmds.push(DrawCmd::rect(
            self.food.0 as f32 * CELL,
            self.food.1 as f32 * CELL,
            CELL,
            CELL,
            Color::RED,
        ));

        cmds.push(DrawCmd::text_aligned(
            10.0,
            20.0,
            16.0,
            format!("Score: {}", self.score.score),
            Color::CYAN,
            Align::Left,
        ));
        cmds.push(DrawCmd::text_aligned(
            width - 10.0,
            20.0,
            16.0,
            format!("High Score: {}", self.score.high_score),
            Color::CYAN,
            Align::Right,
        ));

        match self.phase {
            Phase::Waiting => {
                cmds.push(DrawCmd::text(width / 2.0, height / 3.0, 30.0, "SNAKE", Color::CYAN));
                cmds.push(DrawCmd::text(
                    width / 2.0,
                    height / 2.0,
                    20.0,
                    "Press SPACE to Start",
                    Color::CYAN,
                ));
            }
            Phase::Paused => {
                cmds.push(DrawCmd::text(width / 2.0, height / 2.0, 30.0, "PAUSED", Color::CYAN));
            }
            Phase::GameOver => {
                cmds.push(DrawCmd::text(
                    width / 2.0,
                    height / 3.0,
                    30.0,
                    "GAME OVER",
                    Color::MAGENTA,
                ));
                cmds.push(DrawCmd::text(
                    width / 2.0,
                    height * 2.0 / 3.0,
                    16.0,
                    "Press R to Restart",
                    Color::WHITE,
                ));
            }
            Phase::Playing => {}
        }
        cmds
    }

    fn phase(&self) -> Phase {
        self.phase
    }

    fn score(&self) -> &ScoreBoard {
        &self.score
    }

    fn drain_cues(&mut self) -> Vec<Tone> {
        std::mem::take(&mut self.cues)
    }

    fn tick_interval_ms(&self) -> f64 {
        1000.0 / self.rate_hz as f64
    }
}
