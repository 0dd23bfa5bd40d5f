//! Difficulty as a pure function of session time
//!
//! Both curves are linear ramps that hit a hard ceiling, so far enough into
//! a session they return the capped value exactly.

use crate::tuning::Tuning;

/// Scroll speed (pixels/tick) after `elapsed` seconds
#[inline]
pub fn speed(tuning: &Tuning, elapsed: f32) -> f32 {
    (tuning.base_speed + elapsed * tuning.speed_ramp).min(tuning.speed_cap)
}

/// Gap height for a pipe created after `elapsed` seconds
#[inline]
pub fn gap_height(tuning: &Tuning, elapsed: f32) -> f32 {
    tuning.base_gap + (elapsed * tuning.gap_ramp).min(tuning.gap_cap_delta)
}
