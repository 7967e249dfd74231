//! Tetris
//!
//! 10×20 board, the seven classic tetrominoes. Input is sampled at 60 Hz;
//! gravity runs off its own level-derived accumulator so horizontal moves
//! and rotations still apply immediately between drops. Rotation uses a
//! fixed six-offset kick table, not standard SRS kicks; the offsets and
//! their order are part of the game's feel and must not change.

use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{Tone, Waveform};
use crate::input::{Dir, TickInput};
use crate::persistence::{GameId, PersistencePort};
use crate::phase::Phase;
use crate::render::{Align, Color, DrawCmd};
use crate::score::ScoreBoard;

use super::ArcadeGame;

pub const COLS: usize = 10;
pub const ROWS: usize = 20;
/// Cell edge in pixels.
pub const BLOCK: f32 = 20.0;

const TICK_MS: f64 = 1000.0 / 60.0;

/// Shape matrices are square; the value doubles as the color id.
const SHAPES: [&[&[u8]]; 7] = [
    // I
    &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    // J
    &[&[2, 0, 0], &[2, 2, 2], &[0, 0, 0]],
    // L
    &[&[0, 0, 3], &[3, 3, 3], &[0, 0, 0]],
    // O
    &[&[4, 4], &[4, 4]],
    // S
    &[&[0, 5, 5], &[5, 5, 0], &[0, 0, 0]],
    // T
    &[&[0, 6, 0], &[6, 6, 6], &[0, 0, 0]],
    // Z
    &[&[7, 7, 0], &[0, 7, 7], &[0, 0, 0]],
];

/// Positional offsets tried in order when a rotation collides.
const KICKS: [(i32, i32); 6] = [(0, 0), (1, 0), (-1, 0), (0, -1), (1, -1), (-1, -1)];

/// Points for 0..=4 cleared lines, before multipliers.
const BASE_POINTS: [u32; 5] = [0, 100, 300, 500, 800];
const POINTS_PER_DROP_CELL: u32 = 2;

const MOVE_CUE: Tone = Tone::new(200.0, 0.05, Waveform::Sine);
const ROTATE_CUE: Tone = Tone::new(400.0, 0.1, Waveform::Sine);
const HARD_DROP_CUE: Tone = Tone::new(600.0, 0.2, Waveform::Square);
const HOLD_CUE: Tone = Tone::new(350.0, 0.1, Waveform::Sine);
const LOCK_CUE: Tone = Tone::new(200.0, 0.2, Waveform::Triangle);
const GAME_OVER_CUE: Tone = Tone::new(150.0, 1.5, Waveform::Sawtooth);

/// Gravity cadence for a level: starts at 800 ms and shrinks with
/// diminishing returns, floored at 100 ms.
pub fn drop_interval_ms(level: u32) -> f64 {
    (800.0 * 0.85f64.powi(level as i32 - 1)).floor().max(100.0)
}

pub type Shape = Vec<Vec<u8>>;

#[derive(Debug, Clone, PartialEq)]
pub struct Piece {
    pub shape: Shape,
    pub x: i32,
    pub y: i32,
}

impl Piece {
    fn spawn(shape: Shape) -> Self {
        let width = shape[0].len() as i32;
        Self {
            shape,
            x: COLS as i32 / 2 - width / 2,
            y: 0,
        }
    }
}

fn shape_matrix(index: usize) -> Shape {
    SHAPES[index].iter().map(|row| row.to_vec()).collect()
}

fn rotated(shape: &Shape, clockwise: bool) -> Shape {
    let size = shape.len();
    let mut out = vec![vec![0u8; size]; size];
    for (y, row) in out.iter_mut().enumerate() {
        for (x, cell) in row.iter_mut().enumerate() {
            *cell = if clockwise {
                shape[size - 1 - x][y]
            } else {
                shape[x][size - 1 - y]
            };
        }
    }
    out
}

/// Would the piece, offset by (dx, dy), leave the board or overlap a
/// filled cell?
fn collides(piece: &Piece, board: &[Vec<u8>], dx: i32, dy: i32) -> bool {
    for (y, row) in piece.shape.iter().enumerate() {
        for (x, &cell) in row.iter().enumerate() {
            if cell == 0 {
                continue;
            }
            let nx = piece.x + x as i32 + dx;
            let ny = piece.y + y as i32 + dy;
            if nx < 0 || nx >= COLS as i32 || ny < 0 || ny >= ROWS as i32 {
                return true;
            }
            if board[ny as usize][nx as usize] != 0 {
                return true;
            }
        }
    }
    false
}

pub struct TetrisGame {
    phase: Phase,
    /// 0 = empty, 1..=7 = locked piece color id. Always exactly ROWS rows.
    board: Vec<Vec<u8>>,
    current: Piece,
    next: Piece,
    hold: Option<Shape>,
    can_hold: bool,
    lines: u32,
    drop_interval_ms: f64,
    gravity_accum_ms: f64,
    score: ScoreBoard,
    rng: Pcg32,
    seed: u64,
    cues: Vec<Tone>,
}

impl TetrisGame {
    pub fn new(seed: u64, high_score: u32) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let current = Piece::spawn(shape_matrix(rng.random_range(0..SHAPES.len())));
        let next = Piece::spawn(shape_matrix(rng.random_range(0..SHAPES.len())));
        Self {
            phase: Phase::Waiting,
            board: vec![vec![0; COLS]; ROWS],
            current,
            next,
            hold: None,
            can_hold: true,
            lines: 0,
            drop_interval_ms: drop_interval_ms(1),
            gravity_accum_ms: 0.0,
            score: ScoreBoard::new(high_score),
            rng,
            seed,
            cues: Vec::new(),
        }
    }

    pub fn board(&self) -> &[Vec<u8>] {
        &self.board
    }

    pub fn current(&self) -> &Piece {
        &self.current
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn drop_interval(&self) -> f64 {
        self.drop_interval_ms
    }

    fn restart(&mut self) {
        *self = Self::new(self.seed, self.score.high_score);
    }

    fn random_piece(&mut self) -> Piece {
        Piece::spawn(shape_matrix(self.rng.random_range(0..SHAPES.len())))
    }

    fn try_shift(&mut self, dx: i32) {
        if !collides(&self.current, &self.board, dx, 0) {
            self.current.x += dx;
            self.cues.push(MOVE_CUE);
        }
    }

    /// Rotate, trying each kick offset in order; reject if none fits.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let shape = rotated(&self.current.shape, clockwise);
        let candidate = Piece {
            shape,
            x: self.current.x,
            y: self.current.y,
        };
        for (dx, dy) in KICKS {
            if !collides(&candidate, &self.board, dx, dy) {
                self.current = Piece {
                    shape: candidate.shape,
                    x: candidate.x + dx,
                    y: candidate.y + dy,
                };
                self.cues.push(ROTATE_CUE);
                return true;
            }
        }
        false
    }

    pub fn rotate_cw(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        if !self.phase.is_playing() {
            return false;
        }
        self.try_rotate(false)
    }

    fn soft_drop(&mut self) {
        if !collides(&self.current, &self.board, 0, 1) {
            self.current.y += 1;
        }
    }

    fn hard_drop(&mut self, store: &mut dyn PersistencePort) {
        let mut distance = 0;
        while !collides(&self.current, &self.board, 0, distance + 1) {
            distance += 1;
        }
        if distance > 0 {
            self.current.y += distance;
            self.score.award(POINTS_PER_DROP_CELL * distance as u32);
            self.cues.push(HARD_DROP_CUE);
            self.lock_piece(store);
        }
    }

    fn hold_piece(&mut self) {
        if !self.can_hold {
            return;
        }
        match self.hold.take() {
            None => {
                let parked = std::mem::replace(&mut self.current, self.next.clone());
                self.hold = Some(parked.shape);
                self.next = self.random_piece();
            }
            Some(shape) => {
                let parked = std::mem::replace(&mut self.current, Piece::spawn(shape));
                self.hold = Some(parked.shape);
            }
        }
        self.can_hold = false;
        self.cues.push(HOLD_CUE);
    }

    fn descend(&mut self, store: &mut dyn PersistencePort) {
        if collides(&self.current, &self.board, 0, 1) {
            self.lock_piece(store);
        } else {
            self.current.y += 1;
        }
    }

    fn lock_piece(&mut self, store: &mut dyn PersistencePort) {
        for (y, row) in self.current.shape.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell == 0 {
                    continue;
                }
                let by = self.current.y + y as i32;
                let bx = self.current.x + x as i32;
                if by < 0 {
                    // Locked above the visible board.
                    self.game_over(store);
                    return;
                }
                self.board[by as usize][bx as usize] = cell;
            }
        }

        let cleared = self.clear_full_rows();
        if cleared > 0 {
            self.cues.push(Tone::new(
                300.0 + cleared as f32 * 100.0,
                0.3,
                Waveform::Sawtooth,
            ));
            self.apply_clear_score(cleared, store);
        } else {
            self.score.combo = 0;
            self.cues.push(LOCK_CUE);
        }

        self.can_hold = true;
        self.gravity_accum_ms = 0.0;
        self.spawn_next(store);
    }

    /// Remove every fully-filled row and prepend that many empty rows, so
    /// the board height never changes.
    fn clear_full_rows(&mut self) -> usize {
        self.board.retain(|row| row.iter().any(|&cell| cell == 0));
        let cleared = ROWS - self.board.len();
        for _ in 0..cleared {
            self.board.insert(0, vec![0; COLS]);
        }
        cleared
    }

    fn apply_clear_score(&mut self, cleared: usize, store: &mut dyn PersistencePort) {
        // Points use the level and combo from before this clear; the bumps
        // below only affect the next one.
        let level_before = self.score.level;
        let combo_before = self.score.combo;

        self.lines += cleared as u32;
        let new_level = (self.lines / (10 + self.lines / 50)).min(15) + 1;
        if new_level > self.score.level {
            self.score.level = new_level;
            self.drop_interval_ms = drop_interval_ms(new_level);
            self.cues.push(Tone::new(
                440.0 + new_level as f32 * 50.0,
                0.3,
                Waveform::Square,
            ));
        }

        let base = BASE_POINTS.get(cleared).copied().unwrap_or(1000);
        let level_mult = 1.2f32.powi(level_before as i32 - 1);
        let combo_mult = 1.0 + combo_before as f32 * 0.1;
        let points = (base as f32 * level_mult * combo_mult).floor() as u32;
        self.score.award(points);
        self.score.combo += 1;
        self.score.sync(store, GameId::Tetris);
    }

    fn spawn_next(&mut self, store: &mut dyn PersistencePort) {
        self.current = self.next.clone();
        self.next = self.random_piece();
        if collides(&self.current, &self.board, 0, 0) {
            // Board overflow: the fresh piece has nowhere to exist.
            self.game_over(store);
        }
    }

    fn game_over(&mut self, store: &mut dyn PersistencePort) {
        self.phase.end();
        self.score.sync(store, GameId::Tetris);
        self.cues.push(GAME_OVER_CUE);
    }
}

impl ArcadeGame for TetrisGame {
    fn id(&self) -> GameId {
        GameId::Tetris
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

        if let Some(dir) = input.queued_dir {
            match dir {
                Dir::Left => self.try_shift(-1),
                Dir::Right => self.try_shift(1),
                Dir::Up => {
                    self.try_rotate(true);
                }
                Dir::Down => self.soft_drop(),
            }
        }
        if input.swap {
            self.hold_piece();
        }
        if input.action_pressed {
            self.hard_drop(store);
        }
        if !self.phase.is_playing() {
            return;
        }

        self.gravity_accum_ms += TICK_MS;
        if self.gravity_accum_ms >= self.drop_interval_ms {
            self.gravity_accum_ms -= self.drop_interval_ms;
            self.descend(store);
        }
    }

    fn draw(&self) -> Vec<DrawCmd> {
        let width = COLS as f32 * BLOCK;
        let height = ROWS as f32 * BLOCK;
        let mut cmds = vec![DrawCmd::rect(0.0, 0.0, width + 140.0, height, Color::BLACK)];

        for (y, row) in self.board.iter().enumerate() {
            for (x, &cell) in row.iter().enumerate() {
                if cell != 0 {
                    cmds.push(DrawCmd::rect(
                        x as f32 * BLOCK,
                        y as f32 * BLOCK,
                        BLOCK,
                        BLOCK,
                        cell_color(cell),
                    ));
                }
            }
        }

        if self.phase.is_playing() || self.phase == Phase::Paused {
            for (y, row) in self.current.shape.iter().enumerate() {
                for (x, &cell) in row.iter().enumerate() {
                    if cell != 0 {
                        let by = self.current.y + y as i32;
                        let bx = self.current.x + x as i32;
                        if by >= 0 {
                            cmds.push(DrawCmd::rect(
                                bx as f32 * BLOCK,
                                by as f32 * BLOCK,
                                BLOCK,
                                BLOCK,
                                cell_color(cell),
                            ));
                        }
                    }
                }
            }

            // Next-piece preview to the right of the board.
            cmds.push(DrawCmd::text(width + 70.0, 20.0, 16.0, "NEXT", Color::WHITE));
            for (y, row) in self.next.shape.iter().enumerate() {
                for (x, &cell) in row.iter().enumerate() {
                    if cell != 0 {
                        cmds.push(DrawCmd::rect(
                            width + 30.0 + x as f32 * BLOCK,
                            40.0 + y as f32 * BLOCK,
                            BLOCK,
                            BLOCK,
                            cell_color(cell),
                        ));
                    }
                }
            }
        }

        cmds.push(DrawCmd::text_aligned(
            width + 10.0,
            height - 60.0,
            16.0,
            format!("Score: {}", self.score.score),
            Color::CYAN,
            Align::Left,
        ));
        cmds.push(DrawCmd::text_aligned(
            width + 10.0,
            height - 40.0,
            16.0,
            format!("Level: {}", self.score.level),
            Color::CYAN,
            Align::Left,
        ));
        cmds.push(DrawCmd::text_aligned(
            width + 10.0,
            height - 20.0,
            16.0,
            format!("Lines: {}", self.lines),
            Color::CYAN,
            Align::Left,
        ));

        match self.phase {
            Phase::Waiting => {
                cmds.push(DrawCmd::text(width / 2.0, height / 3.0, 30.0, "TETRIS", Color::CYAN));
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
        TICK_MS
    }
}

fn cell_color(id: u8) -> Color {
    match id {
        1 => Color::CYAN,
        2 => Color::BLUE,
        3 => Color::ORANGE,
        4 => Color::YELLOW,
        5 => Color::GREEN,
        6 => Color::MAGENTA,
        7 => Color::RED,
        _ => Color::BLACK,
    }
}
