//! Hoop Flap - a one-button pipe-dodging arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, pipes, collisions, session state)
//! - `tuning`: Data-driven game balance
//! - `runner`: Frame driver that routes input and persists results
//! - `persistence`, `highscores`, `settings`: Key-value storage and what lives in it
//! - `audio`: Event-driven procedural sound effects
//! - `ui`: Screen hit targets
//! - `platform`: Browser/native platform abstraction

pub mod audio;
pub mod highscores;
pub mod persistence;
pub mod platform;
pub mod runner;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod ui;

pub use highscores::BestScore;
pub use runner::{FrameClock, PointerOutcome, Runner};
pub use settings::Settings;
pub use tuning::{Tuning, TuningError};
