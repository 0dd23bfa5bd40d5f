//! End-to-end session scenarios

use glam::Vec2;

use hoop_flap::highscores::BestScore;
use hoop_flap::persistence::{KeyValueStore, MemoryStore};
use hoop_flap::sim::{GameEvent, GamePhase, GameState, TerminalCause, TickInput, tick};
use hoop_flap::tuning::Tuning;
use hoop_flap::{PointerOutcome, Runner};

const DT: f32 = 1.0 / 60.0;

fn begin(state: &mut GameState) {
    tick(
        state,
        &TickInput {
            flap: true,
            ..Default::default()
        },
        DT,
    );
    assert_eq!(state.phase, GamePhase::Running);
    state.drain_events();
}

#[test]
fn immediate_drop_hits_floor_on_predicted_tick() {
    let tuning = Tuning::default();

    // Same arithmetic as the integrator, starting from mid-playfield at rest
    let mut y = tuning.playfield_height / 2.0;
    let mut vel = 0.0f32;
    let mut expected_ticks = 0;
    loop {
        expected_ticks += 1;
        vel += tuning.gravity;
        y += vel;
        if y + tuning.bird_radius > tuning.playfield_height {
            break;
        }
    }

    let mut state = GameState::new(2024, tuning.clone(), 0).unwrap();
    begin(&mut state);

    let mut ticks = 0;
    let mut terminal_signals = 0;
    while state.phase == GamePhase::Running {
        tick(&mut state, &TickInput::default(), DT);
        ticks += 1;
        terminal_signals += state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::Collided { .. }))
            .count();
        assert!(ticks <= expected_ticks);
    }

    assert_eq!(ticks, expected_ticks);
    assert_eq!(terminal_signals, 1);
    assert_eq!(state.phase, GamePhase::GameOver);
    assert_eq!(state.score, 0);
    assert_eq!(
        state.bird.pos.y,
        tuning.playfield_height - tuning.bird_radius
    );
    assert_eq!(state.bird.vel_y, 0.0);
}

#[test]
fn drop_reports_floor_cause() {
    let mut state = GameState::new(1, Tuning::default(), 0).unwrap();
    begin(&mut state);
    let mut events = Vec::new();
    while state.phase == GamePhase::Running {
        tick(&mut state, &TickInput::default(), DT);
        events.extend(state.drain_events());
    }
    assert!(events.contains(&GameEvent::Collided {
        cause: TerminalCause::Floor
    }));
}

#[test]
fn pause_freezes_world() {
    let pause = TickInput {
        pause: true,
        ..Default::default()
    };
    let mut paused = GameState::new(77, Tuning::default(), 0).unwrap();
    let mut reference = GameState::new(77, Tuning::default(), 0).unwrap();
    begin(&mut paused);
    begin(&mut reference);

    for _ in 0..30 {
        tick(&mut paused, &TickInput::default(), DT);
        tick(&mut reference, &TickInput::default(), DT);
    }

    tick(&mut paused, &pause, DT);
    assert_eq!(paused.phase, GamePhase::Paused);
    let frozen = paused.snapshot();

    for _ in 0..100 {
        tick(&mut paused, &TickInput::default(), DT);
        assert_eq!(paused.snapshot(), frozen);
    }

    tick(&mut paused, &pause, DT);
    tick(&mut reference, &TickInput::default(), DT);
    assert_eq!(paused.phase, GamePhase::Running);
    assert_eq!(paused.snapshot(), reference.snapshot());
}

/// Balance where the gap spans almost the whole playfield
fn easy_tuning() -> Tuning {
    Tuning {
        base_gap: 560.0,
        gap_ramp: 0.0,
        gap_cap_delta: 0.0,
        gap_margin: 20.0,
        speed_ramp: 0.0,
        ..Tuning::default()
    }
}

/// Hover around mid-playfield until `target` pipes are passed, then drop
fn play_session(runner: &mut Runner<MemoryStore>, target: u64) -> Vec<GameEvent> {
    let start = runner.layout().action_button;
    let center = Vec2::new(start.x + start.w / 2.0, start.y + start.h / 2.0);
    assert_eq!(runner.pointer_down(center), PointerOutcome::Begin);
    runner.frame(DT);
    assert_eq!(runner.phase(), GamePhase::Running);

    let mut events = Vec::new();
    let mut frames = 0;
    while runner.phase() == GamePhase::Running {
        let state = runner.state();
        if state.score < target && state.bird.pos.y > 300.0 && state.bird.vel_y >= 0.0 {
            runner.flap();
        }
        events.extend(runner.frame(DT));
        frames += 1;
        assert!(frames < 10_000, "session never ended");
    }
    events
}

#[test]
fn best_score_persists_across_sessions() {
    let mut store = MemoryStore::new();
    store.set_item(BestScore::STORAGE_KEY, "3").unwrap();
    let mut runner = Runner::new(11, easy_tuning(), store).unwrap();
    assert_eq!(runner.best_score(), 3);

    let events = play_session(&mut runner, 5);
    assert_eq!(runner.state().score, 5);
    assert!(events.contains(&GameEvent::SessionEnded {
        score: 5,
        best: 5,
        new_best: true
    }));
    assert!(runner.snapshot().new_best);
    assert_eq!(runner.best_score(), 5);
    assert_eq!(BestScore::load(runner.store()).get(), 5);

    let events = play_session(&mut runner, 2);
    assert_eq!(runner.state().score, 2);
    assert!(events.contains(&GameEvent::SessionEnded {
        score: 2,
        best: 5,
        new_best: false
    }));
    assert!(!runner.snapshot().new_best);
    assert_eq!(runner.best_score(), 5);
    assert_eq!(BestScore::load(runner.store()).get(), 5);
}
