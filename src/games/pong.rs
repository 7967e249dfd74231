//! Pong
//!
//! Continuous-coordinate pong on a 600×400 field at 60 Hz. The ball
//! integrates its velocity each tick; paddle hits reflect with an angle
//! proportional to the offset from the paddle center and scale the speed
//! by 1.05 per hit up to a cap, so a rally only ever gets faster. The
//! computer paddle runs a reaction-deadband AI whose hand-tuned constants
//! are part of the game's feel and must not change.

use std::f32::consts::FRAC_PI_4;

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::audio::{Tone, Waveform};
use crate::collision::Aabb;
use crate::input::{Dir, TickInput};
use crate::persistence::{GameId, PersistencePort};
use crate::phase::Phase;
use crate::render::{Color, DrawCmd};
use crate::score::ScoreBoard;

use super::ArcadeGame;

pub const FIELD_W: f32 = 600.0;
pub const FIELD_H: f32 = 400.0;

const PADDLE_W: f32 = 10.0;
const PADDLE_H: f32 = 80.0;
const PLAYER_SPEED: f32 = 8.0;
const BALL_RADIUS: f32 = 8.0;
/// Serve speed per axis, pixels per tick.
const SERVE_SPEED: f32 = 5.0;
/// Speed gain per paddle hit.
const HIT_SPEEDUP: f32 = 1.05;
const MAX_BALL_SPEED: f32 = 15.0;
const WIN_SCORE: u32 = 5;

const TICK_MS: f64 = 1000.0 / 60.0;

const WALL_CUE: Tone = Tone::new(150.0, 0.1, Waveform::Square);
const PADDLE_CUE: Tone = Tone::new(300.0, 0.2, Waveform::Sine);
const PLAYER_POINT_CUE: Tone = Tone::new(700.0, 0.3, Waveform::Sawtooth);
const COMPUTER_POINT_CUE: Tone = Tone::new(400.0, 0.3, Waveform::Sawtooth);

/// Computer paddle strength, setting the AI's speed, reaction deadband
/// and aim error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    fn ai_speed(self) -> f32 {
        match self {
            Difficulty::Easy => 3.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 7.0,
        }
    }

    fn reaction_deadband(self) -> f32 {
        match self {
            Difficulty::Easy => 50.0,
            Difficulty::Medium => 25.0,
            Difficulty::Hard => 10.0,
        }
    }

    fn max_error(self) -> f32 {
        match self {
            Difficulty::Easy => 10.0,
            Difficulty::Medium => 5.0,
            Difficulty::Hard => 2.5,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub rect: Aabb,
    pub speed: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
    pub radius: f32,
}

impl Ball {
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}

pub struct PongGame {
    phase: Phase,
    player: Paddle,
    computer: Paddle,
    ball: Ball,
    computer_points: u32,
    win_score: u32,
    difficulty: Difficulty,
    /// `score.score` is the player's points; the high score tracks it.
    score: ScoreBoard,
    rng: Pcg32,
    seed: u64,
    cues: Vec<Tone>,
}

impl PongGame {
    pub fn new(seed: u64, high_score: u32, difficulty: Difficulty) -> Self {
        let mut game = Self {
            phase: Phase::Waiting,
            player: Paddle {
                rect: Aabb::new(10.0, 200.0, PADDLE_W, PADDLE_H),
                speed: PLAYER_SPEED,
            },
            computer: Paddle {
                rect: Aabb::new(580.0, 200.0, PADDLE_W, PADDLE_H),
                speed: difficulty.ai_speed(),
            },
            ball: Ball {
                pos: Vec2::new(FIELD_W / 2.0, FIELD_H / 2.0),
                vel: Vec2::ZERO,
                radius: BALL_RADIUS,
            },
            computer_points: 0,
            win_score: WIN_SCORE,
            difficulty,
            score: ScoreBoard::new(high_score),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            cues: Vec::new(),
        };
        game.reset_ball();
        game
    }

    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    pub fn computer_points(&self) -> u32 {
        self.computer_points
    }

    /// Only meaningful on the attract screen, but harmless anytime: the
    /// computer paddle just changes gear.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        self.computer.speed = difficulty.ai_speed();
    }

    fn restart(&mut self) {
        *self = Self::new(self.seed, self.score.high_score, self.difficulty);
    }

    fn reset_ball(&mut self) {
        self.ball.pos = Vec2::new(FIELD_W / 2.0, FIELD_H / 2.0);
        let sx = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        let sy = if self.rng.random_bool(0.5) { 1.0 } else { -1.0 };
        self.ball.vel = Vec2::new(SERVE_SPEED * sx, SERVE_SPEED * sy);
    }

    fn move_player(&mut self, input: &TickInput) {
        if input.dir_held(Dir::Up) {
            self.player.rect.y = (self.player.rect.y - self.player.speed).max(0.0);
        }
        if input.dir_held(Dir::Down) {
            self.player.rect.y =
                (self.player.rect.y + self.player.speed).min(FIELD_H - self.player.rect.h);
        }
    }

    fn move_computer(&mut self) {
        let paddle_center = self.computer.rect.y + self.computer.rect.h / 2.0;
        let ball_center = self.ball.pos.y;
        let speed = self.computer.speed;

        if self.ball.vel.x > 0.0 {
            let deadband = self.difficulty.reaction_deadband();
            let err = self.difficulty.max_error();
            let error = self.rng.random_range(-err..err);

            if paddle_center < ball_center - deadband + error {
                self.computer.rect.y =
                    (self.computer.rect.y + speed).min(FIELD_H - self.computer.rect.h);
            } else if paddle_center > ball_center + deadband + error {
                self.computer.rect.y = (self.computer.rect.y - speed).max(0.0);
            }
        } else {
            // Ball receding: drift back toward the vertical center.
            if paddle_center < FIELD_H / 2.0 - 20.0 {
                self.computer.rect.y =
                    (self.computer.rect.y + speed / 2.0).min(FIELD_H - self.computer.rect.h);
            } else if paddle_center > FIELD_H / 2.0 + 20.0 {
                self.computer.rect.y = (self.computer.rect.y - speed / 2.0).max(0.0);
            }
        }
    }

    fn update_ball(&mut self, store: &mut dyn PersistencePort) {
        self.ball.pos += self.ball.vel;

        if self.ball.pos.x > FIELD_W {
            self.score.award(1);
            self.score.sync(store, GameId::Pong);
            self.cues.push(PLAYER_POINT_CUE);
            if self.score.score >= self.win_score {
                self.phase.end();
            } else {
                self.reset_ball();
            }
        } else if self.ball.pos.x < 0.0 {
            self.computer_points += 1;
            self.cues.push(COMPUTER_POINT_CUE);
            if self.computer_points >= self.win_score {
                self.phase.end();
            } else {
                self.reset_ball();
            }
        }
    }

    fn check_collisions(&mut self) {
        if self.ball.pos.y - self.ball.radius <= 0.0
            || self.ball.pos.y + self.ball.radius >= FIELD_H
        {
            self.ball.vel.y = -self.ball.vel.y;
            self.cues.push(WALL_CUE);
        }

        // Entity-list order: the player's paddle is checked first and a hit
        // consumes the test for this tick.
        if self.try_paddle_bounce(true) {
            return;
        }
        self.try_paddle_bounce(false);
    }

    fn try_paddle_bounce(&mut self, player_side: bool) -> bool {
        let paddle = if player_side { &self.player } else { &self.computer };
        let rect = paddle.rect;
        let ball = &self.ball;

        let hit = ball.pos.x - ball.radius <= rect.right()
            && ball.pos.x + ball.radius >= rect.x
            && ball.pos.y >= rect.y
            && ball.pos.y <= rect.bottom();
        if !hit {
            return false;
        }

        // Offset from paddle center, normalized to [-1, 1]: middle sends the
        // ball straight back, edges up to 45 degrees.
        let offset = ((ball.pos.y - (rect.y + rect.h / 2.0)) / (rect.h / 2.0)).clamp(-1.0, 1.0);
        let bounce_angle = offset * FRAC_PI_4;
        let speed = (ball.speed() * HIT_SPEEDUP).min(MAX_BALL_SPEED);
        let direction = if player_side { 1.0 } else { -1.0 };

        self.ball.vel = Vec2::new(
            direction * speed * bounce_angle.cos(),
            speed * bounce_angle.sin(),
        );
        self.cues.push(PADDLE_CUE);
        true
    }
}

impl ArcadeGame for PongGame {
    fn id(&self) -> GameId {
        GameId::Pong
    }

    fn tick(&mut self, input: &TickInput, store: &mut dyn PersistencePort) {
        if input.pause {
            self.phase.toggle_pause();
        }
        match self.phase {
            Phase::Waiting => {
                if input.start {
                    self.phase.start();
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

        self.move_player(input);
        self.move_computer();
        self.update_ball(store);
        if self.phase.is_playing() {
            self.check_collisions();
        }
    }

    fn draw(&self) -> Vec<DrawCmd> {
        let mut cmds = vec![DrawCmd::rect(0.0, 0.0, FIELD_W, FIELD_H, Color::BLACK)];

        // Dashed center net.
        let mut y = 0.0;
        while y < FIELD_H {
            cmds.push(DrawCmd::rect(FIELD_W / 2.0 - 1.0, y, 2.0, 10.0, Color::WHITE));
            y += 20.0;
        }

        for paddle in [&self.player, &self.computer] {
            let r = paddle.rect;
            cmds.push(DrawCmd::rect(r.x, r.y, r.w, r.h, Color::YELLOW));
        }
        cmds.push(DrawCmd::circle(
            self.ball.pos.x,
            self.ball.pos.y,
            self.ball.radius,
            Color::CYAN,
        ));

        cmds.push(DrawCmd::text(
            FIELD_W / 4.0,
            60.0,
            48.0,
            self.score.score.to_string(),
            Color::GREEN,
        ));
        cmds.push(DrawCmd::text(
            3.0 * FIELD_W / 4.0,
            60.0,
            48.0,
            self.computer_points.to_string(),
            Color::GREEN,
        ));

        match self.phase {
            Phase::Waiting => {
                cmds.push(DrawCmd::text(FIELD_W / 2.0, FIELD_H / 3.0, 48.0, "PONG", Color::GREEN));
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 2.0,
                    24.0,
                    "Press SPACE to Start",
                    Color::GREEN,
                ));
            }
            Phase::Paused => {
                cmds.push(DrawCmd::text(FIELD_W / 2.0, FIELD_H / 2.0, 48.0, "PAUSED", Color::GREEN));
            }
            Phase::GameOver => {
                let verdict = if self.score.score > self.computer_points {
                    "YOU WIN!"
                } else {
                    "COMPUTER WINS!"
                };
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 3.0,
                    48.0,
                    "GAME OVER",
                    Color::MAGENTA,
                ));
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 3.0 + 60.0,
                    48.0,
                    verdict,
                    Color::MAGENTA,
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
        TICK_MS
    }
}
