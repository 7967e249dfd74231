//! RetroVerse arcade core
//!
//! The shared simulation engine behind the four arcade cabinets. All gameplay
//! logic is deterministic: fixed ticks, seeded RNG, no rendering or platform
//! dependencies. The host UI owns scheduling and input capture; everything in
//! here is a pure state transform plus the draw-primitive list it emits.
//!
//! Core modules:
//! - `games`: per-cabinet rule sets (snake, pong, tetris, invaders)
//! - `phase`: the waiting/playing/paused/game-over state machine
//! - `scheduler`: fixed-timestep accumulator decoupled from any timer
//! - `input`: raw event → intent normalization with per-tick sampling
//! - `collision`: AABB and grid-occupancy primitives
//! - `audio`/`persistence`: ports the simulation calls out through
//! - `render`: the draw-primitive contract consumed by the surface

pub mod audio;
pub mod collision;
pub mod games;
pub mod input;
pub mod persistence;
pub mod phase;
pub mod render;
pub mod scheduler;
pub mod score;
pub mod settings;

pub use audio::{AudioPort, Tone, Waveform};
pub use games::{ArcadeGame, TickInput};
pub use persistence::{GameId, PersistencePort};
pub use phase::Phase;
pub use scheduler::Scheduler;
pub use score::ScoreBoard;
pub use settings::Settings;
