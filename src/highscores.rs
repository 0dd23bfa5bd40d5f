//! Best score tracking
//!
//! Read once when the game boots and written whenever a session beats it.
//! Storage problems are logged and otherwise ignored: the best score then
//! simply lives in memory for the rest of the process.

use crate::persistence::{KeyValueStore, load_json, save_json};

/// The best score seen so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestScore {
    value: u64,
}

impl BestScore {
    /// Storage key
    pub const STORAGE_KEY: &'static str = "hoop_flap_best";

    /// Load the persisted best, falling back to 0
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Self {
        match load_json::<u64, _>(store, Self::STORAGE_KEY) {
            Ok(Some(value)) => {
                log::info!("Loaded best score {}", value);
                Self { value }
            }
            Ok(None) => {
                log::info!("No best score found, starting fresh");
                Self::default()
            }
            Err(e) => {
                log::warn!("Could not read best score ({e}), starting fresh");
                Self::default()
            }
        }
    }

    pub fn get(&self) -> u64 {
        self.value
    }

    /// Raise the best score and persist it; lower values are ignored
    pub fn set<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, value: u64) {
        if value <= self.value {
            return;
        }
        self.value = value;
        match save_json(store, Self::STORAGE_KEY, &value) {
            Ok(()) => log::info!("Best score saved ({})", value),
            Err(e) => log::warn!("Could not save best score ({e}), keeping it in memory"),
        }
    }

    /// Offer a finished session's score; returns true if it is a new best
    pub fn record<S: KeyValueStore + ?Sized>(&mut self, store: &mut S, score: u64) -> bool {
        let beaten = score > self.value;
        self.set(store, score);
        beaten
    }
}
