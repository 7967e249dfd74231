//! The four cabinets
//!
//! Each game is a self-contained rule set behind the same host-facing
//! surface: feed it one sampled [`TickInput`] per scheduler step, drain the
//! audio cues it queued, and hand the draw list to the surface. The shared
//! machinery (phase machine, collision primitives, score board) lives in
//! the sibling modules; only the rule tables are game-specific.

pub mod invaders;
pub mod pong;
pub mod snake;
pub mod tetris;

pub use crate::input::TickInput;

use crate::audio::Tone;
use crate::persistence::{GameId, PersistencePort};
use crate::phase::Phase;
use crate::render::DrawCmd;
use crate::score::ScoreBoard;

/// Host-facing surface shared by all cabinets.
///
/// Velocities and movement constants are expressed per tick at the game's
/// own cadence (`tick_interval_ms`), matching the fixed-timestep contract:
/// the scheduler guarantees the cadence, so the rules never see a variable
/// delta.
pub trait ArcadeGame {
    fn id(&self) -> GameId;

    /// Advance one simulation step. Transition intents (start/pause/reset)
    /// are honored in every phase; gameplay intents only while playing.
    fn tick(&mut self, input: &TickInput, store: &mut dyn PersistencePort);

    /// Full frame of draw primitives, including overlay content for the
    /// waiting/paused/game-over states.
    fn draw(&self) -> Vec<DrawCmd>;

    fn phase(&self) -> Phase;

    fn score(&self) -> &ScoreBoard;

    /// Audio cues queued since the last drain, in playback order.
    fn drain_cues(&mut self) -> Vec<Tone>;

    /// Current tick cadence. May change between ticks (snake speed,
    /// tetris drop interval); the host re-tunes its scheduler from this.
    fn tick_interval_ms(&self) -> f64;
}
