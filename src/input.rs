//! Input normalization
//!
//! Raw keyboard/touch events arrive asynchronously relative to the tick.
//! They are folded into a held-key set, one queued directional intent and a
//! handful of edge-triggered flags, then snapshotted exactly once per tick
//! by `sample` so intent application is deterministic within a tick.
//!
//! The mapping itself is game-agnostic: "up" is a direction to snake, a
//! rotation to tetris. Interpreting an intent is the rule set's job.

use std::collections::HashSet;

/// Discrete movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

impl Dir {
    pub const ALL: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

    /// Grid delta for one step in this direction (y grows downward).
    pub fn delta(self) -> (i32, i32) {
        match self {
            Dir::Up => (0, -1),
            Dir::Down => (0, 1),
            Dir::Left => (-1, 0),
            Dir::Right => (1, 0),
        }
    }

    pub fn opposite(self) -> Dir {
        match self {
            Dir::Up => Dir::Down,
            Dir::Down => Dir::Up,
            Dir::Left => Dir::Right,
            Dir::Right => Dir::Left,
        }
    }

    fn index(self) -> usize {
        match self {
            Dir::Up => 0,
            Dir::Down => 1,
            Dir::Left => 2,
            Dir::Right => 3,
        }
    }
}

/// One tick's worth of sampled intents.
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held directions, indexed per [`Dir`]; prefer [`TickInput::dir_held`].
    pub held: [bool; 4],
    /// At most one pending direction/rotation, applied at tick start.
    pub queued_dir: Option<Dir>,
    /// Action key went down since the last sample (hard drop).
    pub action_pressed: bool,
    /// Action key is currently down (autofire-style shooting).
    pub action_held: bool,
    /// Secondary action (tetris hold).
    pub swap: bool,
    pub pause: bool,
    pub start: bool,
    pub reset: bool,
}

impl TickInput {
    pub fn dir_held(&self, dir: Dir) -> bool {
        self.held[dir.index()]
    }

    /// Builder-style helper for synthetic input (demo bots, tests).
    pub fn with_dir_held(mut self, dir: Dir) -> Self {
        self.held[dir.index()] = true;
        self
    }
}

/// Accumulates raw events between ticks.
#[derive(Debug, Default)]
pub struct InputSource {
    held: HashSet<Dir>,
    action_down: bool,
    queued_dir: Option<Dir>,
    action_pressed: bool,
    swap: bool,
    pause: bool,
    start: bool,
    reset: bool,
}

impl InputSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a key-down event. `code` is the DOM-style key value
    /// ("ArrowUp", "w", " ", "Enter", ...); unknown keys are ignored.
    pub fn key_down(&mut self, code: &str) {
        match normalize(code) {
            Some(RawIntent::Dir(dir)) => {
                self.held.insert(dir);
                self.queued_dir = Some(dir);
            }
            Some(RawIntent::Action) => {
                if !self.action_down {
                    self.action_pressed = true;
                }
                self.action_down = true;
                // Space doubles as the start key on the attract screen.
                self.start = true;
            }
            Some(RawIntent::Start) => self.start = true,
            Some(RawIntent::Swap) => self.swap = true,
            Some(RawIntent::Pause) => self.pause = true,
            Some(RawIntent::Reset) => self.reset = true,
            None => {}
        }
    }

    /// Feed a key-up event.
    pub fn key_up(&mut self, code: &str) {
        match normalize(code) {
            Some(RawIntent::Dir(dir)) => {
                self.held.remove(&dir);
            }
            Some(RawIntent::Action) => self.action_down = false,
            _ => {}
        }
    }

    /// Feed a completed touch swipe; the dominant axis wins.
    pub fn swipe(&mut self, dx: f32, dy: f32) {
        let dir = if dx.abs() > dy.abs() {
            if dx > 0.0 { Dir::Right } else { Dir::Left }
        } else if dy > 0.0 {
            Dir::Down
        } else {
            Dir::Up
        };
        self.queued_dir = Some(dir);
    }

    /// Feed a tap (start/fire on touch devices).
    pub fn tap(&mut self) {
        self.action_pressed = true;
        self.start = true;
    }

    /// Snapshot the current intents and clear the edge-triggered ones.
    /// Held state persists until the matching key-up.
    pub fn sample(&mut self) -> TickInput {
        let mut held = [false; 4];
        for dir in &self.held {
            held[dir.index()] = true;
        }
        TickInput {
            held,
            queued_dir: self.queued_dir.take(),
            action_pressed: std::mem::take(&mut self.action_pressed),
            action_held: self.action_down,
            swap: std::mem::take(&mut self.swap),
            pause: std::mem::take(&mut self.pause),
            start: std::mem::take(&mut self.start),
            reset: std::mem::take(&mut self.reset),
        }
    }

    /// Drop all state. Call on teardown so a detached game never sees
    /// stale held keys.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

enum RawIntent {
    Dir(Dir),
    Action,
    Swap,
    Pause,
    Start,
    Reset,
}

fn normalize(code: &str) -> Option<RawIntent> {
    let intent = match code.to_ascii_lowercase().as_str() {
        "arrowup" | "w" => RawIntent::Dir(Dir::Up),
        "arrowdown" | "s" => RawIntent::Dir(Dir::Down),
        "arrowleft" | "a" => RawIntent::Dir(Dir::Left),
        "arrowright" | "d" => RawIntent::Dir(Dir::Right),
        " " | "space" => RawIntent::Action,
        "enter" => RawIntent::Start,
        "c" => RawIntent::Swap,
        "p" => RawIntent::Pause,
        "r" => RawIntent::Reset,
        _ => return None,
    };
    Some(intent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn held_keys_persist_across_samples() {
        let mut input = InputSource::new();
        input.key_down("ArrowLeft");
        assert!(input.sample().dir_held(Dir::Left));
        assert!(input.sample().dir_held(Dir::Left));
        input.key_up("ArrowLeft");
        assert!(!input.sample().dir_held(Dir::Left));
    }

    #[test]
    fn queued_direction_is_consumed_once() {
        let mut input = InputSource::new();
        input.key_down("w");
        assert_eq!(input.sample().queued_dir, Some(Dir::Up));
        assert_eq!(input.sample().queued_dir, None);
    }

    #[test]
    fn latest_queued_direction_wins() {
        let mut input = InputSource::new();
        input.key_down("ArrowUp");
        input.key_down("ArrowLeft");
        assert_eq!(input.sample().queued_dir, Some(Dir::Left));
    }

    #[test]
    fn action_edge_fires_once_but_held_persists() {
        let mut input = InputSource::new();
        input.key_down(" ");
        let first = input.sample();
        assert!(first.action_pressed);
        assert!(first.action_held);
        let second = input.sample();
        assert!(!second.action_pressed);
        assert!(second.action_held);
        input.key_up(" ");
        assert!(!input.sample().action_held);
    }

    #[test]
    fn edge_flags_clear_after_sampling() {
        let mut input = InputSource::new();
        input.key_down("p");
        input.key_down("r");
        input.key_down("Enter");
        let sampled = input.sample();
        assert!(sampled.pause && sampled.reset && sampled.start);
        let next = input.sample();
        assert!(!next.pause && !next.reset && !next.start);
    }

    #[test]
    fn swipe_picks_dominant_axis() {
        let mut input = InputSource::new();
        input.swipe(40.0, -8.0);
        assert_eq!(input.sample().queued_dir, Some(Dir::Right));
        input.swipe(-3.0, -25.0);
        assert_eq!(input.sample().queued_dir, Some(Dir::Up));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let mut input = InputSource::new();
        input.key_down("F13");
        input.key_up("F13");
        let sampled = input.sample();
        assert_eq!(sampled.queued_dir, None);
        assert!(!sampled.action_pressed);
    }

    #[test]
    fn clear_releases_everything() {
        let mut input = InputSource::new();
        input.key_down("ArrowRight");
        input.key_down(" ");
        input.clear();
        let sampled = input.sample();
        assert!(!sampled.dir_held(Dir::Right));
        assert!(!sampled.action_held);
    }
}
