//! Hoop Flap entry point
//!
//! The browser build is driven from JS through `platform::web`. Natively
//! there is no window: the binary plays a few headless sessions with a
//! simple autopilot and logs how they went.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use hoop_flap::Runner;
    use hoop_flap::persistence::MemoryStore;
    use hoop_flap::sim::GamePhase;
    use hoop_flap::tuning::Tuning;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Hoop Flap (native, headless) starting...");

    const FRAME_DT: f32 = 1.0 / 60.0;
    const SESSIONS: u32 = 3;
    const MAX_FRAMES: u32 = 60 * 120;

    let seed = hoop_flap::platform::run_seed();
    let mut runner = match Runner::new(seed, Tuning::default(), MemoryStore::new()) {
        Ok(runner) => runner,
        Err(e) => {
            log::error!("Refusing to start: {e}");
            return;
        }
    };

    for session in 1..=SESSIONS {
        runner.flap();
        runner.frame(FRAME_DT);

        let mut frames = 0;
        while runner.phase() == GamePhase::Running && frames < MAX_FRAMES {
            if autopilot_wants_flap(runner.state()) {
                runner.flap();
            }
            runner.frame(FRAME_DT);
            frames += 1;
        }

        let snapshot = runner.snapshot();
        log::info!(
            "Session {}: score {} in {:.1}s / {} ticks (best {})",
            session,
            snapshot.score,
            snapshot.elapsed,
            snapshot.ticks,
            runner.best_score()
        );
    }
}

/// Flap when falling below the next gap's safe line
#[cfg(not(target_arch = "wasm32"))]
fn autopilot_wants_flap(state: &hoop_flap::sim::GameState) -> bool {
    let bird = &state.bird;
    let width = state.tuning.pipe_width;
    let target = state
        .pipes
        .iter()
        .find(|p| p.trailing_edge(width) >= bird.pos.x - bird.radius)
        .map(|p| p.gap_bottom() - bird.radius - 12.0)
        .unwrap_or(state.tuning.playfield_height / 2.0);

    bird.pos.y > target && bird.vel_y >= 0.0
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
