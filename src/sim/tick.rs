//! Per-frame simulation tick
//!
//! Owns the session state machine (Start → Running ⇄ Paused → GameOver →
//! Running) and, while Running, runs the world in a fixed order: physics,
//! pipe scroll/retire/spawn, collision, scoring. The first terminal
//! condition ends the tick.

use super::state::{Bird, GameEvent, GamePhase, GameState, ScorePulse, TerminalCause};
use super::{collision, difficulty, physics, pipes, scoring};

/// Input intents collected since the previous tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Flap while running; activates the start/restart button otherwise
    pub flap: bool,
    /// Pause toggle
    pub pause: bool,
    /// Mute toggle
    pub mute: bool,
}

/// Advance the game by one display frame
///
/// `dt` is the wall-clock time since the previous frame in seconds; it only
/// feeds the difficulty clock; movement is per tick.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if input.mute {
        state.muted = !state.muted;
        state.events.push(GameEvent::MuteToggled { muted: state.muted });
    }

    match state.phase {
        GamePhase::Start | GamePhase::GameOver => {
            if input.flap {
                start_session(state);
            }
            return;
        }
        GamePhase::Paused => {
            if !input.pause {
                return;
            }
            state.phase = GamePhase::Running;
            state.events.push(GameEvent::PauseToggled { paused: false });
            log::debug!("Resumed at {:.2}s", state.elapsed);
            // Flaps issued while paused are dropped
            step(state, false, dt);
        }
        GamePhase::Running => {
            if input.pause {
                state.phase = GamePhase::Paused;
                state.events.push(GameEvent::PauseToggled { paused: true });
                log::debug!("Paused at {:.2}s", state.elapsed);
                return;
            }
            step(state, input.flap, dt);
        }
    }
}

/// Reset the world and enter Running with one pipe already queued
pub fn start_session(state: &mut GameState) {
    state.bird = Bird::spawn(&state.tuning);
    state.score = 0;
    state.new_best = false;
    state.elapsed = 0.0;
    state.time_ticks = 0;
    state.score_pulse = ScorePulse::default();
    state.pipes.clear();
    spawn_pipe(state);
    state.phase = GamePhase::Running;
    state.events.push(GameEvent::SessionStarted);
    log::info!("Session started (best {})", state.best_score);
}

fn spawn_pipe(state: &mut GameState) {
    let gap = difficulty::gap_height(&state.tuning, state.elapsed);
    let pipe = pipes::generate(&mut state.rng, &state.tuning, gap);
    log::debug!(
        "Spawned pipe: gap_top={:.1} gap_height={:.1}",
        pipe.gap_top,
        pipe.gap_height
    );
    state.pipes.push(pipe);
}

fn step(state: &mut GameState, flap: bool, dt: f32) {
    state.elapsed += dt;
    state.time_ticks += 1;
    state.score_pulse.decay();

    if flap {
        physics::apply_impulse(&mut state.bird, state.tuning.flap_velocity);
        state.events.push(GameEvent::Flapped);
    }

    if let Some(cause) = physics::integrate(
        &mut state.bird,
        state.tuning.gravity,
        state.tuning.playfield_height,
    ) {
        end_session(state, cause);
        return;
    }

    let speed = difficulty::speed(&state.tuning, state.elapsed);
    state.pipes.advance(speed);
    if state.pipes.retire(state.tuning.pipe_width).is_some() {
        log::debug!("Retired pipe, {} live", state.pipes.len());
    }
    if state.pipes.wants_spawn(&state.tuning) {
        spawn_pipe(state);
    }

    if collision::bird_hits_any(&state.bird, state.pipes.iter(), &state.tuning) {
        end_session(state, TerminalCause::Pipe);
        return;
    }

    let passed =
        scoring::collect_passed(&mut state.pipes, state.bird.pos.x, state.tuning.pipe_width);
    for _ in 0..passed {
        state.score += 1;
        state.events.push(GameEvent::Scored { score: state.score });
    }
    if passed > 0 {
        state.score_pulse.trigger(&state.tuning);
    }
}

fn end_session(state: &mut GameState, cause: TerminalCause) {
    state.phase = GamePhase::GameOver;
    state.events.push(GameEvent::Collided { cause });

    if state.score > state.best_score {
        state.best_score = state.score;
        state.new_best = true;
        log::info!("New best score: {}", state.score);
    }
    state.events.push(GameEvent::SessionEnded {
        score: state.score,
        best: state.best_score,
        new_best: state.new_best,
    });
    log::info!(
        "Session ended by {:?} with score {} after {:.1}s",
        cause,
        state.score,
        state.elapsed
    );
}
