//! High-score persistence port
//!
//! The only state that outlives a play session is one integer per game.
//! Stores must never lower a stored value: `set_high_score` with a value
//! that is not strictly greater than the current one is a no-op.

use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Identifies one of the four cabinets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameId {
    Snake,
    Pong,
    Tetris,
    Invaders,
}

impl GameId {
    pub const ALL: [GameId; 4] = [GameId::Snake, GameId::Pong, GameId::Tetris, GameId::Invaders];

    /// Stable storage key, shared with the web portal's saved scores.
    pub fn storage_key(&self) -> &'static str {
        match self {
            GameId::Snake => "snakeHighScore",
            GameId::Pong => "pongHighScore",
            GameId::Tetris => "tetrisHighScore",
            GameId::Invaders => "spaceInvadersHighScore",
        }
    }
}

/// Durable storage for one high score per game.
pub trait PersistencePort {
    fn high_score(&self, game: GameId) -> Option<u32>;

    /// Record a new high score. Implementations only overwrite when `score`
    /// is strictly greater than the stored value.
    fn set_high_score(&mut self, game: GameId, score: u32);
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    scores: BTreeMap<&'static str, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PersistencePort for MemoryStore {
    fn high_score(&self, game: GameId) -> Option<u32> {
        self.scores.get(game.storage_key()).copied()
    }

    fn set_high_score(&mut self, game: GameId, score: u32) {
        let current = self.scores.get(game.storage_key()).copied().unwrap_or(0);
        if score > current {
            self.scores.insert(game.storage_key(), score);
        }
    }
}

/// JSON-file-backed store: one object keyed by storage key.
///
/// I/O failures degrade gracefully - a missing or corrupt file loads as
/// empty, a failed write is logged and the in-memory value kept.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    scores: BTreeMap<String, u32>,
}

impl JsonFileStore {
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let scores = match fs::read_to_string(&path) {
            Ok(json) => match serde_json::from_str::<BTreeMap<String, u32>>(&json) {
                Ok(scores) => {
                    log::info!("loaded {} high scores from {}", scores.len(), path.display());
                    scores
                }
                Err(err) => {
                    log::warn!("corrupt high-score file {}: {err}", path.display());
                    BTreeMap::new()
                }
            },
            Err(_) => BTreeMap::new(),
        };
        Self { path, scores }
    }

    fn flush(&self) {
        let json = match serde_json::to_string_pretty(&self.scores) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("high-score serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("high-score write to {} failed: {err}", self.path.display());
        }
    }
}

impl PersistencePort for JsonFileStore {
    fn high_score(&self, game: GameId) -> Option<u32> {
        self.scores.get(game.storage_key()).copied()
    }

    fn set_high_score(&mut self, game: GameId, score: u32) {
        let current = self.scores.get(game.storage_key()).copied().unwrap_or(0);
        if score > current {
            self.scores.insert(game.storage_key().to_string(), score);
            self.flush();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_round_trip() {
        let mut store = MemoryStore::new();
        assert_eq!(store.high_score(GameId::Snake), None);
        store.set_high_score(GameId::Snake, 12);
        assert_eq!(store.high_score(GameId::Snake), Some(12));
    }

    #[test]
    fn lower_score_is_a_no_op() {
        let mut store = MemoryStore::new();
        store.set_high_score(GameId::Tetris, 900);
        store.set_high_score(GameId::Tetris, 900);
        store.set_high_score(GameId::Tetris, 450);
        assert_eq!(store.high_score(GameId::Tetris), Some(900));
    }

    #[test]
    fn games_do_not_share_scores() {
        let mut store = MemoryStore::new();
        store.set_high_score(GameId::Pong, 5);
        assert_eq!(store.high_score(GameId::Invaders), None);
        assert_eq!(store.high_score(GameId::Pong), Some(5));
    }

    #[test]
    fn file_store_survives_reload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");

        let mut store = JsonFileStore::load(&path);
        store.set_high_score(GameId::Invaders, 310);
        store.set_high_score(GameId::Snake, 7);

        let reloaded = JsonFileStore::load(&path);
        assert_eq!(reloaded.high_score(GameId::Invaders), Some(310));
        assert_eq!(reloaded.high_score(GameId::Snake), Some(7));
    }

    #[test]
    fn corrupt_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scores.json");
        fs::write(&path, "not json").unwrap();

        let store = JsonFileStore::load(&path);
        for game in GameId::ALL {
            assert_eq!(store.high_score(game), None);
        }
    }
}
