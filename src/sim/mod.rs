//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay deterministic:
//! - One tick per call, movement measured per tick
//! - Seeded RNG only
//! - Time enters only through the explicit `dt` argument
//! - No rendering, audio or storage dependencies

pub mod collision;
pub mod difficulty;
pub mod physics;
pub mod pipes;
pub mod scoring;
pub mod state;
pub mod tick;

pub use collision::{Aabb, bird_hits_pipe, circle_rect_overlap, pipe_hitboxes};
pub use pipes::{PipeField, generate};
pub use state::{Bird, GameEvent, GamePhase, GameState, Pipe, ScorePulse, Snapshot, TerminalCause};
pub use tick::{TickInput, start_session, tick};
