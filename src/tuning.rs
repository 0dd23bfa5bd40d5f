//! Data-driven game balance
//!
//! Every pixel and pacing value the game was tuned with lives here so a host
//! can load an alternative balance from JSON. The numeric relationships are
//! what matters: the saturated gap height must always leave the obstacle
//! generator a non-empty range to draw from.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Tuning values, in reference-resolution pixels and ticks unless noted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,

    // === Bird ===
    /// Fixed horizontal position of the bird's center
    pub bird_x: f32,
    pub bird_radius: f32,
    /// Added to vertical velocity every tick (pixels/tick²)
    pub gravity: f32,
    /// Velocity a flap sets (negative is up)
    pub flap_velocity: f32,

    // === Pipes ===
    pub pipe_width: f32,
    /// Minimum distance between the gap and the ceiling/floor
    pub gap_margin: f32,
    /// Horizontal inset of each pipe's hitbox
    pub collision_inset: f32,
    /// Distance the newest pipe must travel before the next one spawns
    pub pipe_spacing: f32,

    // === Difficulty (ramps are per second of session time) ===
    pub base_speed: f32,
    pub speed_ramp: f32,
    pub speed_cap: f32,
    pub base_gap: f32,
    pub gap_ramp: f32,
    pub gap_cap_delta: f32,

    // === Score pulse (cosmetic) ===
    pub score_pulse_scale: f32,
    pub score_pulse_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            playfield_width: 400.0,
            playfield_height: 600.0,

            bird_x: 80.0,
            bird_radius: 20.0,
            gravity: 0.5,
            flap_velocity: -8.0,

            pipe_width: 60.0,
            gap_margin: 60.0,
            collision_inset: 4.0,
            pipe_spacing: 240.0,

            base_speed: 2.0,
            speed_ramp: 0.05,
            speed_cap: 5.0,
            base_gap: 150.0,
            gap_ramp: 1.0,
            gap_cap_delta: 50.0,

            score_pulse_scale: 1.5,
            score_pulse_ticks: 12,
        }
    }
}

/// Why a tuning was rejected
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TuningError {
    #[error("invalid tuning json: {0}")]
    Parse(String),
    #[error("{field} must be positive, got {value}")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must not be negative, got {value}")]
    NegativeRamp { field: &'static str, value: f32 },
    #[error("flap_velocity must be negative (upward), got {value}")]
    FlapNotUpward { value: f32 },
    #[error(
        "saturated gap {max_gap} leaves no room in a {playfield_height}px playfield with {margin}px margins"
    )]
    GapRangeEmpty {
        max_gap: f32,
        playfield_height: f32,
        margin: f32,
    },
    #[error("speed_cap {cap} is below base_speed {base}")]
    SpeedCapBelowBase { base: f32, cap: f32 },
}

impl Tuning {
    /// Parse a (possibly partial) JSON tuning and validate it
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning =
            serde_json::from_str(json).map_err(|e| TuningError::Parse(e.to_string()))?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Largest gap height the difficulty ramp can ever produce
    #[inline]
    pub fn max_gap(&self) -> f32 {
        self.base_gap + self.gap_cap_delta
    }

    /// Check the relationships the simulation relies on
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("playfield_width", self.playfield_width),
            ("playfield_height", self.playfield_height),
            ("bird_radius", self.bird_radius),
            ("gravity", self.gravity),
            ("pipe_width", self.pipe_width),
            ("pipe_spacing", self.pipe_spacing),
            ("base_speed", self.base_speed),
            ("base_gap", self.base_gap),
        ];
        for (field, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::NonPositive { field, value });
            }
        }

        let ramps = [
            ("speed_ramp", self.speed_ramp),
            ("gap_ramp", self.gap_ramp),
            ("gap_cap_delta", self.gap_cap_delta),
            ("gap_margin", self.gap_margin),
            ("collision_inset", self.collision_inset),
        ];
        for (field, value) in ramps {
            if !(value >= 0.0) {
                return Err(TuningError::NegativeRamp { field, value });
            }
        }

        if !(self.flap_velocity < 0.0) {
            return Err(TuningError::FlapNotUpward {
                value: self.flap_velocity,
            });
        }

        if self.speed_cap < self.base_speed {
            return Err(TuningError::SpeedCapBelowBase {
                base: self.base_speed,
                cap: self.speed_cap,
            });
        }

        if self.playfield_height - self.max_gap() - 2.0 * self.gap_margin < 0.0 {
            return Err(TuningError::GapRangeEmpty {
                max_gap: self.max_gap(),
                playfield_height: self.playfield_height,
                margin: self.gap_margin,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tuning_is_valid() {
        assert_eq!(Tuning::default().validate(), Ok(()));
    }

    #[test]
    fn test_gap_cap_must_fit_playfield() {
        let tuning = Tuning {
            gap_cap_delta: 400.0,
            ..Tuning::default()
        };
        assert!(matches!(
            tuning.validate(),
            Err(TuningError::GapRangeEmpty { .. })
        ));
    }

    #[test]
    fn test_flap_must_point_up() {
        let tuning = Tuning {
            flap_velocity: 3.0,
            ..Tuning::default()
        };
        assert_eq!(
            tuning.validate(),
            Err(TuningError::FlapNotUpward { value: 3.0 })
        );
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let tuning = Tuning::from_json(r#"{ "pipe_spacing": 300.0 }"#).unwrap();
        assert_eq!(tuning.pipe_spacing, 300.0);
        assert_eq!(tuning.gravity, Tuning::default().gravity);
    }

    #[test]
    fn test_bad_json_is_rejected() {
        assert!(matches!(
            Tuning::from_json("{ not json"),
            Err(TuningError::Parse(_))
        ));
        assert!(matches!(
            Tuning::from_json(r#"{ "speed_ramp": -1.0 }"#),
            Err(TuningError::NegativeRamp { field: "speed_ramp", .. })
        ));
    }

    #[test]
    fn test_error_messages_name_the_problem() {
        let err = Tuning {
            gravity: 0.0,
            ..Tuning::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "gravity must be positive, got 0");

        let err = Tuning {
            speed_cap: 1.0,
            ..Tuning::default()
        }
        .validate()
        .unwrap_err();
        assert_eq!(err.to_string(), "speed_cap 1 is below base_speed 2");

        let err: Box<dyn std::error::Error> = Box::new(TuningError::Parse("eof".into()));
        assert_eq!(err.to_string(), "invalid tuning json: eof");
    }
}
