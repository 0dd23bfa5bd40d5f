//! Frame driver
//!
//! Sits between a host's event loop and the sim: input handlers only queue
//! intents, and `frame` applies them at the next tick boundary, runs exactly
//! one tick, then persists whatever the tick decided (new best, mute).
//! Hosts that only have timestamps can call `frame_at` and let the runner's
//! `FrameClock` work out the delta.

use glam::Vec2;

use crate::highscores::BestScore;
use crate::persistence::KeyValueStore;
use crate::settings::Settings;
use crate::sim::{GameEvent, GamePhase, GameState, Snapshot, TickInput, tick};
use crate::tuning::{Tuning, TuningError};
use crate::ui::{HitTarget, Layout};

/// Longest frame delta fed to the difficulty clock (seconds)
///
/// Absorbs the gap after a backgrounded tab resumes.
pub const MAX_FRAME_DT: f32 = 0.25;

/// Turns host timestamps into frame deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    /// Seconds since the previous timestamp; 0 on the first call after a reset
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => 0.0,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    /// Forget the previous timestamp so a stalled host does not show up as
    /// one long frame
    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// What a pointer press turned into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    Ignored,
    Flap,
    Begin,
    Mute,
    /// Share is handled entirely by the host
    Share,
}

/// Owns a game, its storage, and pending input
pub struct Runner<S: KeyValueStore> {
    state: GameState,
    store: S,
    best: BestScore,
    settings: Settings,
    layout: Layout,
    input: TickInput,
    clock: FrameClock,
}

impl<S: KeyValueStore> Runner<S> {
    /// Boot a game, reading best score and settings once
    ///
    /// Fails before touching storage if the tuning is unusable.
    pub fn new(seed: u64, tuning: Tuning, store: S) -> Result<Self, TuningError> {
        tuning.validate()?;
        let best = BestScore::load(&store);
        let settings = Settings::load(&store);
        let layout = Layout::new(&tuning);
        let mut state = GameState::new(seed, tuning, best.get())?;
        state.muted = settings.muted;
        Ok(Self {
            state,
            store,
            best,
            settings,
            layout,
            input: TickInput::default(),
            clock: FrameClock::default(),
        })
    }

    /// Route a pointer press through the visible hit targets
    pub fn pointer_down(&mut self, point: Vec2) -> PointerOutcome {
        match self.layout.hit_test(self.state.phase, point) {
            Some(HitTarget::Mute) => {
                self.toggle_mute();
                PointerOutcome::Mute
            }
            Some(HitTarget::Start | HitTarget::Restart) => {
                self.input.flap = true;
                PointerOutcome::Begin
            }
            Some(HitTarget::Share) => PointerOutcome::Share,
            None if self.state.phase == GamePhase::Running => {
                self.input.flap = true;
                PointerOutcome::Flap
            }
            None => PointerOutcome::Ignored,
        }
    }

    /// Primary action from a key: flap, or activate the visible button
    pub fn flap(&mut self) {
        if self.state.phase != GamePhase::Paused {
            self.input.flap = true;
        }
    }

    /// Pause key; only meaningful while a session is live
    pub fn toggle_pause(&mut self) {
        if matches!(self.state.phase, GamePhase::Running | GamePhase::Paused) {
            // Two presses in one frame cancel out
            self.input.pause = !self.input.pause;
            // Hosts may stop delivering frames while paused
            self.clock.reset();
        }
    }

    pub fn toggle_mute(&mut self) {
        self.input.mute = !self.input.mute;
    }

    /// Run one tick with the queued intents; returns the tick's events
    pub fn frame(&mut self, dt: f32) -> Vec<GameEvent> {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        let input = std::mem::take(&mut self.input);
        tick(&mut self.state, &input, dt);

        let events = self.state.drain_events();
        for event in &events {
            match *event {
                GameEvent::SessionEnded {
                    score,
                    new_best: true,
                    ..
                } => {
                    self.best.record(&mut self.store, score);
                }
                GameEvent::MuteToggled { muted } => {
                    self.settings.muted = muted;
                    self.settings.save(&mut self.store);
                }
                _ => {}
            }
        }
        events
    }

    /// Like `frame`, with the delta measured from host timestamps (ms)
    pub fn frame_at(&mut self, now_ms: f64) -> Vec<GameEvent> {
        let dt = self.clock.delta(now_ms);
        self.frame(dt)
    }

    pub fn snapshot(&self) -> Snapshot {
        self.state.snapshot()
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn best_score(&self) -> u64 {
        self.best.get()
    }

    /// Overwrite the best score (only upward) and persist it
    pub fn set_best_score(&mut self, value: u64) {
        self.best.set(&mut self.store, value);
        self.state.best_score = self.state.best_score.max(value);
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
