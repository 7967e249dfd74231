//! Space Invaders
//!
//! 500×500 field at 75 Hz. The enemy formation marches as one unit: when
//! any member would cross a side boundary, every enemy drops one row and
//! the shared direction reverses in that same tick, with no horizontal
//! motion. Collisions resolve in entity-list order - the first match
//! consumes the projectile and later targets are untouched that tick.

use glam::Vec2;
use rand::Rng;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::audio::{Tone, Waveform};
use crate::collision::Aabb;
use crate::input::{Dir, TickInput};
use crate::persistence::{GameId, PersistencePort};
use crate::phase::Phase;
use crate::render::{Align, Color, DrawCmd};
use crate::score::ScoreBoard;

use super::ArcadeGame;

pub const FIELD_W: f32 = 500.0;
pub const FIELD_H: f32 = 500.0;

const TICK_MS: f64 = 1000.0 / 75.0;

const PLAYER_W: f32 = 40.0;
const PLAYER_H: f32 = 20.0;
const PLAYER_SPEED: f32 = 5.0;
const START_LIVES: u8 = 3;

const BULLET_SPEED: f32 = 15.0;
const MAX_BULLETS: usize = 4;
/// ~80 ms at the 75 Hz cadence.
const BULLET_COOLDOWN_TICKS: u32 = 6;

const ENEMY_W: f32 = 30.0;
const ENEMY_H: f32 = 20.0;
const ENEMY_PADDING: f32 = 15.0;
const FORMATION_TOP: f32 = 50.0;
const ENEMY_SPEED: f32 = 1.0;
const ENEMY_DROP_DISTANCE: f32 = 20.0;
const ENEMY_BULLET_SPEED: f32 = 3.0;
/// Per-enemy fire probability per tick.
const ENEMY_FIRE_RATE: f64 = 0.01;

const SHIELD_W: f32 = 60.0;
const SHIELD_H: f32 = 20.0;
const SHIELD_HEALTH: u8 = 3;
const SHIELD_COUNT: usize = 4;

const POWER_UP_SIZE: f32 = 20.0;
const POWER_UP_FALL_SPEED: f32 = 2.0;
const POWER_UP_SPAWN_RATE: f64 = 0.01;
/// 10 seconds at 75 Hz.
const POWER_UP_DURATION_TICKS: u32 = 750;

const SHOOT_CUE: Tone = Tone::new(440.0, 0.1, Waveform::Square);
const ENEMY_SHOOT_CUE: Tone = Tone::new(220.0, 0.1, Waveform::Sawtooth);
const EXPLOSION_CUE: Tone = Tone::new(80.0, 0.3, Waveform::Square);
const PLAYER_HIT_CUE: Tone = Tone::new(830.0, 0.2, Waveform::Sine);
const LEVEL_UP_CUE: Tone = Tone::new(440.0, 0.4, Waveform::Sine);
const POWER_UP_CUE: Tone = Tone::new(440.0, 0.2, Waveform::Triangle);
const GAME_OVER_CUE: Tone = Tone::new(440.0, 1.0, Waveform::Sawtooth);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyKind {
    Basic,
    Medium,
    Advanced,
}

impl EnemyKind {
    pub fn points(self) -> u32 {
        match self {
            EnemyKind::Basic => 10,
            EnemyKind::Medium => 20,
            EnemyKind::Advanced => 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub rect: Aabb,
    pub kind: EnemyKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Player,
    Enemy,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub rect: Aabb,
    pub vel: Vec2,
    pub owner: Owner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Shield {
    pub rect: Aabb,
    pub health: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    RapidFire,
    Shield,
    MultiShot,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PowerUp {
    pub rect: Aabb,
    pub kind: PowerUpKind,
}

pub struct InvadersGame {
    phase: Phase,
    player: Aabb,
    lives: u8,
    enemies: Vec<Enemy>,
    /// +1 marching right, -1 marching left; shared by the whole formation.
    formation_dir: f32,
    player_shots: Vec<Projectile>,
    enemy_shots: Vec<Projectile>,
    shields: Vec<Shield>,
    power_ups: Vec<PowerUp>,
    active_power_up: Option<(PowerUpKind, u32)>,
    shot_cooldown: u32,
    tick_count: u64,
    score: ScoreBoard,
    rng: Pcg32,
    seed: u64,
    cues: Vec<Tone>,
}

/// Formation for a level: denser every few levels, capped at 5×10.
fn formation(level: u32) -> Vec<Enemy> {
    let rows = (3 + level / 2).min(5);
    let cols = (6 + level / 3).min(10);
    let mut enemies = Vec::with_capacity((rows * cols) as usize);
    for row in 0..rows {
        for col in 0..cols {
            let kind = match row {
                0 | 1 => EnemyKind::Advanced,
                2 => EnemyKind::Medium,
                _ => EnemyKind::Basic,
            };
            enemies.push(Enemy {
                rect: Aabb::new(
                    col as f32 * (ENEMY_W + ENEMY_PADDING) + ENEMY_PADDING,
                    row as f32 * (ENEMY_H + ENEMY_PADDING) + FORMATION_TOP,
                    ENEMY_W,
                    ENEMY_H,
                ),
                kind,
            });
        }
    }
    enemies
}

fn shields() -> Vec<Shield> {
    let spacing = FIELD_W / (SHIELD_COUNT as f32 + 1.0);
    (0..SHIELD_COUNT)
        .map(|i| Shield {
            rect: Aabb::new(
                spacing * (i as f32 + 1.0) - SHIELD_W / 2.0,
                FIELD_H - 100.0,
                SHIELD_W,
                SHIELD_H,
            ),
            health: SHIELD_HEALTH,
        })
        .collect()
}

impl InvadersGame {
    pub fn new(seed: u64, high_score: u32) -> Self {
        Self {
            phase: Phase::Waiting,
            player: Aabb::new(
                FIELD_W / 2.0 - PLAYER_W / 2.0,
                FIELD_H - PLAYER_H - 20.0,
                PLAYER_W,
                PLAYER_H,
            ),
            lives: START_LIVES,
            enemies: formation(1),
            formation_dir: 1.0,
            player_shots: Vec::new(),
            enemy_shots: Vec::new(),
            shields: shields(),
            power_ups: Vec::new(),
            active_power_up: None,
            shot_cooldown: 0,
            tick_count: 0,
            score: ScoreBoard::new(high_score),
            rng: Pcg32::seed_from_u64(seed),
            seed,
            cues: Vec::new(),
        }
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub fn lives(&self) -> u8 {
        self.lives
    }

    pub fn shields(&self) -> &[Shield] {
        &self.shields
    }

    fn restart(&mut self) {
        *self = Self::new(self.seed, self.score.high_score);
    }

    fn rapid_fire(&self) -> bool {
        matches!(self.active_power_up, Some((PowerUpKind::RapidFire, _)))
    }

    fn multi_shot(&self) -> bool {
        matches!(self.active_power_up, Some((PowerUpKind::MultiShot, _)))
    }

    fn shielded(&self) -> bool {
        matches!(self.active_power_up, Some((PowerUpKind::Shield, _)))
    }

    fn move_player(&mut self, input: &TickInput) {
        if input.dir_held(Dir::Left) {
            self.player.x = (self.player.x - PLAYER_SPEED).max(0.0);
        }
        if input.dir_held(Dir::Right) {
            self.player.x = (self.player.x + PLAYER_SPEED).min(FIELD_W - self.player.w);
        }
    }

    fn try_shoot(&mut self) {
        let cooldown = if self.rapid_fire() {
            BULLET_COOLDOWN_TICKS / 2
        } else {
            BULLET_COOLDOWN_TICKS
        };
        let max_bullets = if self.rapid_fire() {
            MAX_BULLETS * 2
        } else {
            MAX_BULLETS
        };
        if self.shot_cooldown > 0 || self.player_shots.len() >= max_bullets {
            return;
        }
        self.shot_cooldown = cooldown;

        let origin_x = self.player.x + self.player.w / 2.0 - 2.0;
        let origin_y = self.player.y - 10.0;
        let angles: &[f32] = if self.multi_shot() {
            &[-0.2, 0.0, 0.2]
        } else {
            &[0.0]
        };
        for &angle in angles {
            if self.player_shots.len() >= max_bullets {
                break;
            }
            self.player_shots.push(Projectile {
                rect: Aabb::new(origin_x, origin_y, 4.0, 10.0),
                vel: Vec2::new(BULLET_SPEED * angle.sin(), -BULLET_SPEED),
                owner: Owner::Player,
            });
        }
        self.cues.push(SHOOT_CUE);
    }

    fn update_player_shots(&mut self) {
        for shot in &mut self.player_shots {
            shot.rect.x += shot.vel.x;
            shot.rect.y += shot.vel.y;
        }
        self.player_shots.retain(|shot| shot.rect.y > 0.0);
    }

    /// March the formation. A boundary contact drops and reverses every
    /// enemy in the same tick; nobody moves horizontally on a drop tick.
    fn update_formation(&mut self, store: &mut dyn PersistencePort) {
        let dir = self.formation_dir;
        let hits_boundary = self.enemies.iter().any(|enemy| {
            (dir > 0.0 && enemy.rect.right() + ENEMY_SPEED >= FIELD_W)
                || (dir < 0.0 && enemy.rect.x - ENEMY_SPEED <= 0.0)
        });

        if hits_boundary {
            for enemy in &mut self.enemies {
                enemy.rect.y += ENEMY_DROP_DISTANCE;
            }
            self.formation_dir = -dir;
        } else {
            for enemy in &mut self.enemies {
                enemy.rect.x += ENEMY_SPEED * dir;
            }
        }

        if self
            .enemies
            .iter()
            .any(|enemy| enemy.rect.bottom() >= self.player.y)
        {
            self.game_over(store);
        }
    }

    fn fire_enemy_bullets(&mut self) {
        let mut spawned = Vec::new();
        for enemy in &self.enemies {
            if self.rng.random_bool(ENEMY_FIRE_RATE) {
                spawned.push(Projectile {
                    rect: Aabb::new(
                        enemy.rect.x + enemy.rect.w / 2.0,
                        enemy.rect.bottom(),
                        3.0,
                        10.0,
                    ),
                    vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
                    owner: Owner::Enemy,
                });
            }
        }
        if !spawned.is_empty() {
            self.cues.push(ENEMY_SHOOT_CUE);
            self.enemy_shots.append(&mut spawned);
        }
    }

    fn update_enemy_shots(&mut self) {
        for shot in &mut self.enemy_shots {
            shot.rect.y += shot.vel.y;
        }
        self.enemy_shots.retain(|shot| shot.rect.y < FIELD_H);
    }

    fn check_collisions(&mut self, store: &mut dyn PersistencePort) {
        // Player shots against the formation, entity-list order: the first
        // overlapping enemy eats the bullet.
        let mut shot_idx = 0;
        while shot_idx < self.player_shots.len() {
            let shot = self.player_shots[shot_idx].rect;
            if let Some(enemy_idx) = self
                .enemies
                .iter()
                .position(|enemy| shot.overlaps(&enemy.rect))
            {
                let enemy = self.enemies.remove(enemy_idx);
                self.player_shots.remove(shot_idx);
                self.score.award(enemy.kind.points());
                self.cues.push(EXPLOSION_CUE);
            } else {
                shot_idx += 1;
            }
        }

        // Enemy shots against the player.
        let shielded = self.shielded();
        let mut idx = 0;
        while idx < self.enemy_shots.len() {
            if self.enemy_shots[idx].rect.overlaps(&self.player) {
                self.enemy_shots.remove(idx);
                if shielded {
                    continue;
                }
                self.lives = self.lives.saturating_sub(1);
                self.cues.push(PLAYER_HIT_CUE);
                if self.lives == 0 {
                    self.game_over(store);
                    return;
                }
            } else {
                idx += 1;
            }
        }

        // Enemy shots against the barricades.
        let mut idx = 0;
        while idx < self.enemy_shots.len() {
            let shot = self.enemy_shots[idx].rect;
            if let Some(shield) = self
                .shields
                .iter_mut()
                .find(|shield| shot.overlaps(&shield.rect))
            {
                shield.health = shield.health.saturating_sub(1);
                self.enemy_shots.remove(idx);
            } else {
                idx += 1;
            }
        }
        self.shields.retain(|shield| shield.health > 0);
    }

    fn update_power_ups(&mut self) {
        if self.tick_count % 3 != 0 {
            return;
        }
        if self.power_ups.is_empty() && self.rng.random_bool(POWER_UP_SPAWN_RATE) {
            let kind = match self.rng.random_range(0..3) {
                0 => PowerUpKind::RapidFire,
                1 => PowerUpKind::Shield,
                _ => PowerUpKind::MultiShot,
            };
            let x = self.rng.random_range(0.0..FIELD_W - POWER_UP_SIZE);
            self.power_ups.push(PowerUp {
                rect: Aabb::new(x, 50.0, POWER_UP_SIZE, POWER_UP_SIZE),
                kind,
            });
        }

        for power_up in &mut self.power_ups {
            power_up.rect.y += POWER_UP_FALL_SPEED;
        }
        self.power_ups.retain(|p| p.rect.y < FIELD_H);

        if let Some(idx) = self
            .power_ups
            .iter()
            .position(|p| p.rect.overlaps(&self.player))
        {
            let collected = self.power_ups.remove(idx);
            self.power_ups.clear();
            self.active_power_up = Some((collected.kind, POWER_UP_DURATION_TICKS));
            self.cues.push(POWER_UP_CUE);
        }
    }

    fn expire_power_up(&mut self) {
        if let Some((_, ticks)) = &mut self.active_power_up {
            *ticks -= 1;
            if *ticks == 0 {
                self.active_power_up = None;
            }
        }
    }

    fn next_level(&mut self) {
        self.score.level += 1;
        self.enemies = formation(self.score.level);
        self.player_shots.clear();
        self.enemy_shots.clear();
        self.cues.push(LEVEL_UP_CUE);
    }

    fn game_over(&mut self, store: &mut dyn PersistencePort) {
        self.phase.end();
        self.score.sync(store, GameId::Invaders);
        self.cues.push(GAME_OVER_CUE);
    }
}

impl ArcadeGame for InvadersGame {
    fn id(&self) -> GameId {
        GameId::Invaders
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

        self.tick_count += 1;
        self.shot_cooldown = self.shot_cooldown.saturating_sub(1);
        self.expire_power_up();

        self.move_player(input);
        if input.action_held || input.action_pressed {
            self.try_shoot();
        }

        self.update_player_shots();
        self.update_formation(store);
        if !self.phase.is_playing() {
            return;
        }
        self.fire_enemy_bullets();
        self.update_enemy_shots();
        self.check_collisions(store);
        if !self.phase.is_playing() {
            return;
        }

        self.update_power_ups();

        if self.enemies.is_empty() {
            self.next_level();
        }
    }

    fn draw(&self) -> Vec<DrawCmd> {
        let mut cmds = vec![DrawCmd::rect(0.0, 0.0, FIELD_W, FIELD_H, Color::BLACK)];

        cmds.push(DrawCmd::rect(
            self.player.x,
            self.player.y,
            self.player.w,
            self.player.h,
            Color::GREEN,
        ));

        for enemy in &self.enemies {
            let color = match enemy.kind {
                EnemyKind::Advanced => Color::MAGENTA,
                EnemyKind::Medium => Color::CYAN,
                EnemyKind::Basic => Color::GREEN,
            };
            let r = enemy.rect;
            cmds.push(DrawCmd::rect(r.x, r.y, r.w, r.h, color));
        }

        for shot in self.player_shots.iter().chain(&self.enemy_shots) {
            let color = match shot.owner {
                Owner::Player => Color::WHITE,
                Owner::Enemy => Color::RED,
            };
            let r = shot.rect;
            cmds.push(DrawCmd::rect(r.x, r.y, r.w, r.h, color));
        }

        for shield in &self.shields {
            let color = match shield.health {
                3 => Color::GREEN,
                2 => Color::YELLOW,
                _ => Color::RED,
            };
            let r = shield.rect;
            cmds.push(DrawCmd::rect(r.x, r.y, r.w, r.h, color));
        }

        for power_up in &self.power_ups {
            let color = match power_up.kind {
                PowerUpKind::RapidFire => Color::YELLOW,
                PowerUpKind::Shield => Color::GREEN,
                PowerUpKind::MultiShot => Color::MAGENTA,
            };
            let r = power_up.rect;
            cmds.push(DrawCmd::rect(r.x, r.y, r.w, r.h, color));
        }

        cmds.push(DrawCmd::text_aligned(
            10.0,
            20.0,
            16.0,
            format!("Score: {}", self.score.score),
            Color::CYAN,
            Align::Left,
        ));
        cmds.push(DrawCmd::text_aligned(
            FIELD_W - 10.0,
            20.0,
            16.0,
            format!("Lives: {}  Level: {}", self.lives, self.score.level),
            Color::CYAN,
            Align::Right,
        ));

        match self.phase {
            Phase::Waiting => {
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 3.0,
                    30.0,
                    "SPACE INVADERS",
                    Color::GREEN,
                ));
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 2.0,
                    20.0,
                    "Press SPACE to Start",
                    Color::GREEN,
                ));
            }
            Phase::Paused => {
                cmds.push(DrawCmd::text(FIELD_W / 2.0, FIELD_H / 2.0, 30.0, "PAUSED", Color::GREEN));
            }
            Phase::GameOver => {
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H / 3.0,
                    30.0,
                    "GAME OVER",
                    Color::MAGENTA,
                ));
                cmds.push(DrawCmd::text(
                    FIELD_W / 2.0,
                    FIELD_H * 2.0 / 3.0,
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    fn started(seed: u64) -> (InvadersGame, MemoryStore) {
        let mut game = InvadersGame::new(seed, 0);
        let mut store = MemoryStore::new();
        game.tick(
            &TickInput {
                start: true,
                ..TickInput::default()
            },
            &mut store,
        );
        assert!(game.phase.is_playing());
        (game, store)
    }

    fn player_shot(x: f32, y: f32) -> Projectile {
        Projectile {
            rect: Aabb::new(x, y, 4.0, 10.0),
            vel: Vec2::new(0.0, -BULLET_SPEED),
            owner: Owner::Player,
        }
    }

    fn enemy_shot(x: f32, y: f32) -> Projectile {
        Projectile {
            rect: Aabb::new(x, y, 3.0, 10.0),
            vel: Vec2::new(0.0, ENEMY_BULLET_SPEED),
            owner: Owner::Enemy,
        }
    }

    #[test]
    fn level_one_formation_layout() {
        let game = InvadersGame::new(1, 0);
        assert_eq!(game.enemies.len(), 18);
        assert_eq!(game.enemies[0].rect.x, 15.0);
        assert_eq!(game.enemies[0].rect.y, 50.0);
        assert_eq!(game.enemies[0].kind, EnemyKind::Advanced);
        assert_eq!(game.enemies[6].kind, EnemyKind::Advanced);
        assert_eq!(game.enemies[12].kind, EnemyKind::Medium);
        assert_eq!(game.shields.len(), SHIELD_COUNT);
    }

    #[test]
    fn formation_marches_in_lockstep() {
        let (mut game, mut store) = started(1);
        let before: Vec<Aabb> = game.enemies.iter().map(|e| e.rect).collect();

        game.tick(&TickInput::default(), &mut store);

        for (enemy, old) in game.enemies.iter().zip(&before) {
            assert_eq!(enemy.rect.x, old.x + ENEMY_SPEED);
            assert_eq!(enemy.rect.y, old.y);
        }
    }

    #[test]
    fn boundary_drop_and_reverse_are_atomic() {
        let (mut game, mut store) = started(1);
        // Park a member on the left edge while marching left.
        game.formation_dir = -1.0;
        game.enemies[0].rect.x = 0.0;
        let before: Vec<Aabb> = game.enemies.iter().map(|e| e.rect).collect();

        game.tick(&TickInput::default(), &mut store);

        // Every enemy dropped, none moved horizontally, direction flipped.
        for (enemy, old) in game.enemies.iter().zip(&before) {
            assert_eq!(enemy.rect.y, old.y + ENEMY_DROP_DISTANCE);
            assert_eq!(enemy.rect.x, old.x);
        }
        assert_eq!(game.formation_dir, 1.0);
    }

    #[test]
    fn bullet_consumes_only_the_first_overlapping_enemy() {
        let (mut game, mut store) = started(1);
        // Two enemies stacked on the same spot; one bullet between them.
        game.enemies = vec![
            Enemy {
                rect: Aabb::new(100.0, 100.0, ENEMY_W, ENEMY_H),
                kind: EnemyKind::Medium,
            },
            Enemy {
                rect: Aabb::new(100.0, 100.0, ENEMY_W, ENEMY_H),
                kind: EnemyKind::Basic,
            },
        ];
        game.player_shots = vec![player_shot(110.0, 105.0)];

        game.check_collisions(&mut store);

        assert_eq!(game.enemies.len(), 1);
        assert_eq!(game.enemies[0].kind, EnemyKind::Basic);
        assert!(game.player_shots.is_empty());
        assert_eq!(game.score.score, EnemyKind::Medium.points());
    }

    #[test]
    fn enemy_reaching_player_row_ends_the_game() {
        let (mut game, mut store) = started(1);
        game.enemies[0].rect.y = game.player.y - ENEMY_H + 1.0;

        game.tick(&TickInput::default(), &mut store);

        assert_eq!(game.phase, Phase::GameOver);
    }

    #[test]
    fn losing_the_last_life_ends_the_game_and_persists() {
        let (mut game, mut store) = started(1);
        game.lives = 1;
        game.score.score = 120;
        game.enemy_shots = vec![enemy_shot(game.player.x + 10.0, game.player.y + 5.0)];

        game.check_collisions(&mut store);

        assert_eq!(game.lives, 0);
        assert_eq!(game.phase, Phase::GameOver);
        assert_eq!(store.high_score(GameId::Invaders), Some(120));
    }

    #[test]
    fn shield_power_up_absorbs_hits() {
        let (mut game, mut store) = started(1);
        game.active_power_up = Some((PowerUpKind::Shield, 100));
        game.enemy_shots = vec![enemy_shot(game.player.x + 10.0, game.player.y + 5.0)];

        game.check_collisions(&mut store);

        assert_eq!(game.lives, START_LIVES);
        assert!(game.enemy_shots.is_empty());
        assert!(game.phase.is_playing());
    }

    #[test]
    fn barricades_erode_and_disappear() {
        let (mut game, mut store) = started(1);
        let shield_rect = game.shields[0].rect;

        for hit in 0..SHIELD_HEALTH {
            game.enemy_shots = vec![enemy_shot(shield_rect.x + 5.0, shield_rect.y + 5.0)];
            game.check_collisions(&mut store);
            assert!(game.enemy_shots.is_empty());
            let remaining = SHIELD_COUNT - usize::from(hit == SHIELD_HEALTH - 1);
            assert_eq!(game.shields.len(), remaining);
        }
    }

    #[test]
    fn shooting_respects_cooldown_and_bullet_cap() {
        let (mut game, mut store) = started(1);
        let held = TickInput {
            action_held: true,
            ..TickInput::default()
        };

        game.tick(&held, &mut store);
        assert_eq!(game.player_shots.len(), 1);
        // Cooldown blocks the immediate follow-up.
        game.tick(&held, &mut store);
        assert_eq!(game.player_shots.len(), 1);

        // Saturate the cap.
        for _ in 0..60 {
            game.tick(&held, &mut store);
        }
        assert!(game.player_shots.len() <= MAX_BULLETS);
    }

    #[test]
    fn rapid_fire_halves_cooldown_and_doubles_cap() {
        let (mut game, mut store) = started(1);
        game.active_power_up = Some((PowerUpKind::RapidFire, POWER_UP_DURATION_TICKS));
        let held = TickInput {
            action_held: true,
            ..TickInput::default()
        };

        game.tick(&held, &mut store);
        assert_eq!(game.shot_cooldown, BULLET_COOLDOWN_TICKS / 2);
        for _ in 0..60 {
            game.tick(&held, &mut store);
        }
        assert!(game.player_shots.len() > MAX_BULLETS);
        assert!(game.player_shots.len() <= MAX_BULLETS * 2);
    }

    #[test]
    fn multi_shot_fires_a_three_bullet_fan() {
        let (mut game, mut store) = started(1);
        game.active_power_up = Some((PowerUpKind::MultiShot, POWER_UP_DURATION_TICKS));

        game.tick(
            &TickInput {
                action_pressed: true,
                ..TickInput::default()
            },
            &mut store,
        );

        assert_eq!(game.player_shots.len(), 3);
        assert!(game.player_shots[0].vel.x < 0.0);
        assert_eq!(game.player_shots[1].vel.x, 0.0);
        assert!(game.player_shots[2].vel.x > 0.0);
        for shot in &game.player_shots {
            assert!(shot.vel.y < 0.0);
        }
    }

    #[test]
    fn collected_power_up_activates_with_timer() {
        let (mut game, mut store) = started(1);
        game.tick_count = 2; // next tick lands on the every-third-tick update
        game.power_ups = vec![PowerUp {
            rect: Aabb::new(game.player.x, game.player.y - 1.0, POWER_UP_SIZE, POWER_UP_SIZE),
            kind: PowerUpKind::RapidFire,
        }];

        game.tick(&TickInput::default(), &mut store);

        assert!(game.power_ups.is_empty());
        let (kind, ticks) = game.active_power_up.expect("power-up active");
        assert_eq!(kind, PowerUpKind::RapidFire);
        assert_eq!(ticks, POWER_UP_DURATION_TICKS);
    }

    #[test]
    fn power_up_expires_after_duration() {
        let (mut game, mut store) = started(1);
        game.active_power_up = Some((PowerUpKind::MultiShot, 2));
        game.tick(&TickInput::default(), &mut store);
        assert!(game.active_power_up.is_some());
        game.tick(&TickInput::default(), &mut store);
        assert!(game.active_power_up.is_none());
    }

    #[test]
    fn clearing_the_formation_spawns_a_denser_wave() {
        let (mut game, mut store) = started(1);
        game.enemies = vec![Enemy {
            rect: Aabb::new(200.0, 200.0, ENEMY_W, ENEMY_H),
            kind: EnemyKind::Basic,
        }];
        // Bullet placed so it overlaps the enemy after this tick's movement.
        game.player_shots = vec![player_shot(210.0, 220.0)];

        game.tick(&TickInput::default(), &mut store);

        assert_eq!(game.score.level, 2);
        // Level 2: min(3 + 1, 5) rows × min(6 + 0, 10) cols.
        assert_eq!(game.enemies.len(), 24);
        assert!(game.player_shots.is_empty());
        assert!(game.enemy_shots.is_empty());
    }

    #[test]
    fn reset_restores_the_initial_battlefield() {
        let (mut game, mut store) = started(1);
        game.lives = 1;
        game.score.score = 70;
        game.enemy_shots = vec![enemy_shot(game.player.x + 10.0, game.player.y + 5.0)];
        game.check_collisions(&mut store);
        assert_eq!(game.phase, Phase::GameOver);
        let high = game.score.high_score;

        game.tick(
            &TickInput {
                reset: true,
                ..TickInput::default()
            },
            &mut store,
        );

        let fresh = InvadersGame::new(1, high);
        assert_eq!(game.phase, Phase::Waiting);
        assert_eq!(game.player, fresh.player);
        assert_eq!(game.enemies, fresh.enemies);
        assert_eq!(game.shields, fresh.shields);
        assert_eq!(game.lives, START_LIVES);
        assert_eq!(game.score.score, 0);
        assert_eq!(game.score.high_score, high);
    }

    #[test]
    fn paused_game_freezes_the_formation() {
        let (mut game, mut store) = started(1);
        game.tick(
            &TickInput {
                pause: true,
                ..TickInput::default()
            },
            &mut store,
        );
        let before: Vec<Aabb> = game.enemies.iter().map(|e| e.rect).collect();
        game.tick(&TickInput::default(), &mut store);
        let after: Vec<Aabb> = game.enemies.iter().map(|e| e.rect).collect();
        assert_eq!(before, after);
    }
}
