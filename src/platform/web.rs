//! Browser entry point
//!
//! JS owns the canvas, drawing and DOM events. It calls `frame` from
//! `requestAnimationFrame`, forwards pointer and key presses, and draws from
//! `snapshot_json`. Sounds and the background loop are driven here from the
//! tick's events.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::audio::{AudioManager, MusicCommand, effects_for};
use crate::persistence::LocalStorageStore;
use crate::runner::{PointerOutcome, Runner};
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    log::info!("Hoop Flap (web) starting...");
}

/// Game handle exported to JS
#[wasm_bindgen]
pub struct WebGame {
    runner: Runner<LocalStorageStore>,
    audio: AudioManager,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; `tuning_json` may be empty for the default balance
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: &str) -> Result<WebGame, JsValue> {
        let tuning = if tuning_json.trim().is_empty() {
            Tuning::default()
        } else {
            Tuning::from_json(tuning_json).map_err(|e| JsValue::from_str(&e.to_string()))?
        };
        let runner = Runner::new(super::run_seed(), tuning, LocalStorageStore::open())
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let audio = AudioManager::new(runner.settings());
        Ok(Self { runner, audio })
    }

    /// Advance one tick; `now_ms` is the rAF timestamp
    pub fn frame(&mut self, now_ms: f64) {
        let events = self.runner.frame_at(now_ms);
        self.audio.apply_settings(self.runner.settings());
        for effect in effects_for(&events) {
            self.audio.play(effect);
        }
        for command in events.iter().filter_map(MusicCommand::for_event) {
            self.audio.music(command);
        }
        self.audio.schedule_music();
    }

    /// Pointer press in playfield pixels; returns true for the share button
    pub fn pointer_down(&mut self, x: f32, y: f32) -> bool {
        self.runner.pointer_down(Vec2::new(x, y)) == PointerOutcome::Share
    }

    pub fn flap(&mut self) {
        self.runner.flap();
    }

    pub fn toggle_pause(&mut self) {
        self.runner.toggle_pause();
    }

    pub fn toggle_mute(&mut self) {
        self.runner.toggle_mute();
    }

    pub fn best_score(&self) -> u64 {
        self.runner.best_score()
    }

    /// Render state as JSON
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string(&self.runner.snapshot()).unwrap_or_default()
    }

    /// Button rectangles as JSON
    pub fn layout_json(&self) -> String {
        serde_json::to_string(self.runner.layout()).unwrap_or_default()
    }
}
