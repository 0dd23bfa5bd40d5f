//! Vertical integration of the bird
//!
//! Units are per tick: gravity is added to velocity, then velocity to
//! position. Leaving the playfield clamps the bird onto the boundary first
//! and only then reports it, so the last drawn frame is a legal one.

use super::state::{Bird, TerminalCause};

/// Advance one tick under gravity, clamping against floor and ceiling
///
/// Returns the boundary that was breached, if any.
pub fn integrate(bird: &mut Bird, gravity: f32, playfield_height: f32) -> Option<TerminalCause> {
    bird.vel_y += gravity;
    bird.pos.y += bird.vel_y;

    if bird.pos.y + bird.radius > playfield_height {
        bird.pos.y = playfield_height - bird.radius;
        bird.vel_y = 0.0;
        return Some(TerminalCause::Floor);
    }
    if bird.pos.y - bird.radius < 0.0 {
        bird.pos.y = bird.radius;
        bird.vel_y = 0.0;
        return Some(TerminalCause::Ceiling);
    }
    None
}

/// Flap: replace the velocity, never add to it
#[inline]
pub fn apply_impulse(bird: &mut Bird, flap_velocity: f32) {
    bird.vel_y = flap_velocity;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Tuning;

    #[test]
    fn test_gravity_accumulates_per_tick() {
        let tuning = Tuning::default();
        let mut bird = Bird::spawn(&tuning);
        for n in 1..=10 {
            assert_eq!(integrate(&mut bird, tuning.gravity, tuning.playfield_height), None);
            assert!((bird.vel_y - n as f32 * tuning.gravity).abs() < 1e-4);
        }
    }

    #[test]
    fn test_impulse_overrides_velocity() {
        let tuning = Tuning::default();
        let mut bird = Bird::spawn(&tuning);
        for prior in [-20.0, -8.0, 0.0, 3.5, 40.0] {
            bird.vel_y = prior;
            apply_impulse(&mut bird, tuning.flap_velocity);
            assert_eq!(bird.vel_y, tuning.flap_velocity);
        }
    }

    #[test]
    fn test_floor_clamps_before_signalling() {
        let tuning = Tuning::default();
        let mut bird = Bird::spawn(&tuning);
        bird.pos.y = tuning.playfield_height - bird.radius - 1.0;
        bird.vel_y = 10.0;

        let cause = integrate(&mut bird, tuning.gravity, tuning.playfield_height);
        assert_eq!(cause, Some(TerminalCause::Floor));
        assert_eq!(bird.pos.y, tuning.playfield_height - bird.radius);
        assert_eq!(bird.vel_y, 0.0);
    }

    #[test]
    fn test_ceiling_clamps_before_signalling() {
        let tuning = Tuning::default();
        let mut bird = Bird::spawn(&tuning);
        bird.pos.y = bird.radius + 1.0;
        bird.vel_y = tuning.flap_velocity;

        let cause = integrate(&mut bird, tuning.gravity, tuning.playfield_height);
        assert_eq!(cause, Some(TerminalCause::Ceiling));
        assert_eq!(bird.pos.y, bird.radius);
        assert_eq!(bird.vel_y, 0.0);
    }
}
