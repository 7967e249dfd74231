//! Score, level and combo bookkeeping
//!
//! The per-game rule sets own the arithmetic (how many points, when the
//! level rises); this board only holds the counters and pushes new high
//! scores through the persistence port. A sync with a score that is not
//! strictly greater never touches storage.

use crate::persistence::{GameId, PersistencePort};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    pub score: u32,
    pub level: u32,
    pub combo: u32,
    pub high_score: u32,
}

impl ScoreBoard {
    pub fn new(high_score: u32) -> Self {
        Self {
            score: 0,
            level: 1,
            combo: 0,
            high_score,
        }
    }

    /// Seed the board from whatever the store remembers for `game`.
    pub fn load(store: &dyn PersistencePort, game: GameId) -> Self {
        Self::new(store.high_score(game).unwrap_or(0))
    }

    pub fn award(&mut self, points: u32) {
        self.score += points;
    }

    /// Zero the run counters; the high score survives.
    pub fn clear_run(&mut self) {
        self.score = 0;
        self.level = 1;
        self.combo = 0;
    }

    /// Raise the cached high score and write through the port. The port
    /// enforces the strictly-greater rule, so calling this eagerly is safe.
    pub fn sync(&mut self, store: &mut dyn PersistencePort, game: GameId) {
        if self.score > self.high_score {
            self.high_score = self.score;
            log::info!("new {:?} high score: {}", game, self.score);
        }
        store.set_high_score(game, self.score);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[test]
    fn sync_persists_only_improvements() {
        let mut store = MemoryStore::new();
        let mut board = ScoreBoard::new(0);

        board.award(10);
        board.sync(&mut store, GameId::Snake);
        assert_eq!(store.high_score(GameId::Snake), Some(10));
        assert_eq!(board.high_score, 10);

        board.clear_run();
        board.award(4);
        board.sync(&mut store, GameId::Snake);
        assert_eq!(store.high_score(GameId::Snake), Some(10));
        assert_eq!(board.high_score, 10);
    }

    #[test]
    fn clear_run_keeps_high_score() {
        let mut board = ScoreBoard::new(50);
        board.award(7);
        board.level = 3;
        board.combo = 2;
        board.clear_run();
        assert_eq!(board.score, 0);
        assert_eq!(board.level, 1);
        assert_eq!(board.combo, 0);
        assert_eq!(board.high_score, 50);
    }

    #[test]
    fn load_reads_the_store() {
        let mut store = MemoryStore::new();
        store.set_high_score(GameId::Tetris, 1200);
        let board = ScoreBoard::load(&store, GameId::Tetris);
        assert_eq!(board.high_score, 1200);
        assert_eq!(board.score, 0);
    }
}
