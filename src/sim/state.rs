//! Game state and core simulation types
//!
//! One explicit world struct owns everything a session mutates; every sim
//! operation takes it by reference.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::pipes::PipeField;
use crate::tuning::{Tuning, TuningError};

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the start button
    Start,
    /// Active gameplay
    Running,
    /// World frozen, waiting for the pause toggle
    Paused,
    /// Session over, waiting for restart
    GameOver,
}

/// What ended a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerminalCause {
    Pipe,
    Floor,
    Ceiling,
}

/// Discrete things that happened during a tick, for sound and HUD
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    SessionStarted,
    Flapped,
    Scored { score: u64 },
    Collided { cause: TerminalCause },
    SessionEnded { score: u64, best: u64, new_best: bool },
    PauseToggled { paused: bool },
    MuteToggled { muted: bool },
}

/// The player-controlled ball
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bird {
    /// Center; x never changes during a session
    pub pos: Vec2,
    /// Vertical velocity in pixels/tick (positive is down)
    pub vel_y: f32,
    pub radius: f32,
}

impl Bird {
    /// Bird resting at mid-playfield
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(tuning.bird_x, tuning.playfield_height / 2.0),
            vel_y: 0.0,
            radius: tuning.bird_radius,
        }
    }
}

/// A pipe pair with a gap
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pipe {
    /// Left edge
    pub x: f32,
    /// Top edge of the gap
    pub gap_top: f32,
    /// Frozen at creation
    pub gap_height: f32,
    pub passed: bool,
}

impl Pipe {
    /// Bottom edge of the gap
    #[inline]
    pub fn gap_bottom(&self) -> f32 {
        self.gap_top + self.gap_height
    }

    /// Right edge, given the pipe width
    #[inline]
    pub fn trailing_edge(&self, width: f32) -> f32 {
        self.x + width
    }
}

/// Score emphasis: jumps to a scale factor and decays back to 1.0
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScorePulse {
    pub ticks_left: u32,
}

impl ScorePulse {
    pub fn trigger(&mut self, tuning: &Tuning) {
        self.ticks_left = tuning.score_pulse_ticks;
    }

    pub fn decay(&mut self) {
        self.ticks_left = self.ticks_left.saturating_sub(1);
    }

    /// Current draw scale (1.0 at rest)
    pub fn scale(&self, tuning: &Tuning) -> f32 {
        if tuning.score_pulse_ticks == 0 {
            return 1.0;
        }
        let t = self.ticks_left as f32 / tuning.score_pulse_ticks as f32;
        1.0 + (tuning.score_pulse_scale - 1.0) * t
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub rng: Pcg32,
    pub phase: GamePhase,
    pub bird: Bird,
    pub pipes: PipeField,
    pub score: u64,
    /// Best score across sessions (mirrors the persisted value)
    pub best_score: u64,
    /// Set at game over when the session beat the best score
    pub new_best: bool,
    /// Session time in seconds; frozen while paused and after game over
    pub elapsed: f32,
    /// Ticks simulated this session
    pub time_ticks: u64,
    pub score_pulse: ScorePulse,
    pub muted: bool,
    /// Events raised since the last drain
    pub events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game state on the start screen
    ///
    /// The tuning is validated first: a balance whose saturated gap leaves the
    /// pipe generator nothing to draw from is refused here.
    pub fn new(seed: u64, tuning: Tuning, best_score: u64) -> Result<Self, TuningError> {
        tuning.validate()?;
        log::debug!("New game state, seed {seed}");
        Ok(Self {
            bird: Bird::spawn(&tuning),
            tuning,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Start,
            pipes: PipeField::default(),
            score: 0,
            best_score,
            new_best: false,
            elapsed: 0.0,
            time_ticks: 0,
            score_pulse: ScorePulse::default(),
            muted: false,
            events: Vec::new(),
        })
    }

    /// Take all events raised since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Render-ready view of the world
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            bird_x: self.bird.pos.x,
            bird_y: self.bird.pos.y,
            bird_vel_y: self.bird.vel_y,
            bird_radius: self.bird.radius,
            pipe_width: self.tuning.pipe_width,
            pipes: self.pipes.iter().copied().collect(),
            score: self.score,
            best_score: self.best_score,
            new_best: self.new_best,
            elapsed: self.elapsed,
            ticks: self.time_ticks,
            speed: super::difficulty::speed(&self.tuning, self.elapsed),
            score_scale: self.score_pulse.scale(&self.tuning),
            muted: self.muted,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub bird_x: f32,
    pub bird_y: f32,
    pub bird_vel_y: f32,
    pub bird_radius: f32,
    pub pipe_width: f32,
    pub pipes: Vec<Pipe>,
    pub score: u64,
    pub best_score: u64,
    pub new_best: bool,
    pub elapsed: f32,
    /// Ticks simulated this session
    pub ticks: u64,
    pub speed: f32,
    pub score_scale: f32,
    pub muted: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_waits_on_start_screen() {
        let state = GameState::new(7, Tuning::default(), 3).unwrap();
        assert_eq!(state.phase, GamePhase::Start);
        assert_eq!(state.best_score, 3);
        assert!(state.pipes.is_empty());
        assert_eq!(state.bird.pos, Vec2::new(80.0, 300.0));
    }

    #[test]
    fn test_score_pulse_decays_to_unity() {
        let tuning = Tuning::default();
        let mut pulse = ScorePulse::default();
        assert_eq!(pulse.scale(&tuning), 1.0);

        pulse.trigger(&tuning);
        assert!((pulse.scale(&tuning) - tuning.score_pulse_scale).abs() < 1e-6);

        let mut last = pulse.scale(&tuning);
        for _ in 0..tuning.score_pulse_ticks {
            pulse.decay();
            let scale = pulse.scale(&tuning);
            assert!(scale <= last);
            last = scale;
        }
        assert_eq!(pulse.scale(&tuning), 1.0);
    }

    #[test]
    fn test_snapshot_serializes() {
        let state = GameState::new(1, Tuning::default(), 0).unwrap();
        let json = serde_json::to_string(&state.snapshot()).unwrap();
        assert!(json.contains("\"phase\":\"Start\""));
        assert!(json.contains("\"ticks\":0"));
    }

    #[test]
    fn test_over_capped_tuning_is_refused() {
        let tuning = Tuning {
            base_gap: 560.0,
            gap_cap_delta: 400.0,
            gap_ramp: 1000.0,
            gap_margin: 0.0,
            ..Tuning::default()
        };
        assert!(matches!(
            GameState::new(1, tuning, 0),
            Err(TuningError::GapRangeEmpty { .. })
        ));
    }
}
