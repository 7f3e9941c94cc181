//! Integration tests for cadenced
//!
//! These tests drive complete sessions from a program file through the
//! engine, with a manual clock standing in for real time.

use cadence_api::{ActivityItem, Command, EventPayload, Phase};
use cadence_config::{load_config, parse_config};
use cadence_core::{CoreEvent, PhaseProgram, SessionEngine};
use cadence_util::ManualClock;
use std::io::Write;
use std::time::Duration;

const TABATA: &str = r#"
    config_version = 1

    [program]
    name = "Mini tabata"
    prep_seconds = 10
    item_seconds = 30
    rest_seconds = 10

    [[items]]
    id = "squats"
    name = "Squats"

    [[items]]
    id = "pushups"
    name = "Push-ups"

    [[items]]
    id = "plank"
    name = "Plank"
"#;

fn secs(s: u64) -> Duration {
    Duration::from_secs(s)
}

fn engine_from(toml: &str) -> (SessionEngine<ActivityItem, ManualClock>, ManualClock) {
    let config = parse_config(toml).unwrap();
    let clock = ManualClock::new();
    (SessionEngine::new(config.program, clock.clone()), clock)
}

fn run_for(
    engine: &mut SessionEngine<ActivityItem, ManualClock>,
    clock: &ManualClock,
    total: Duration,
    step: Duration,
) -> Vec<CoreEvent> {
    let mut events = Vec::new();
    let mut elapsed = Duration::ZERO;
    while elapsed < total {
        clock.advance(step);
        elapsed += step;
        events.extend(engine.tick());
    }
    events
}

#[test]
fn test_program_file_to_completion() {
    let (mut engine, clock) = engine_from(TABATA);
    assert_eq!(engine.program().total_duration(), secs(120));

    let mut events = engine.start();
    events.extend(run_for(&mut engine, &clock, secs(121), Duration::from_millis(100)));

    let entered: Vec<_> = events
        .iter()
        .filter_map(|e| match e {
            CoreEvent::PhaseEntered {
                phase, item_index, ..
            } => Some((*phase, *item_index)),
            _ => None,
        })
        .collect();

    assert_eq!(
        entered,
        vec![
            (Phase::Preparing, None),
            (Phase::Active, Some(0)),
            (Phase::Resting, Some(0)),
            (Phase::Active, Some(1)),
            (Phase::Resting, Some(1)),
            (Phase::Active, Some(2)),
            (Phase::Completed, None),
        ]
    );

    let completions: Vec<_> = events
        .iter()
        .filter(|e| matches!(e, CoreEvent::SessionCompleted { .. }))
        .collect();
    assert_eq!(completions.len(), 1);
    assert_eq!(engine.overall_progress(), 1.0);
}

#[test]
fn test_scenario_with_pause() {
    let (mut engine, clock) = engine_from(TABATA);
    engine.start();

    clock.advance(secs(10));
    engine.tick();
    assert_eq!(engine.phase(), Phase::Active);
    assert_eq!(engine.current_item().map(|i| i.name.as_str()), Some("Squats"));
    assert_eq!(engine.time_remaining(), secs(30));

    engine.handle_command(Command::Pause);
    clock.advance(secs(5));
    engine.handle_command(Command::Resume);
    clock.advance(secs(30));
    engine.tick();

    let snapshot = engine.snapshot();
    assert_eq!(snapshot.phase, Phase::Resting);
    assert_eq!(snapshot.item_index, Some(0));
    assert_eq!(snapshot.time_remaining, secs(10));
}

#[test]
fn test_coarse_ticks_keep_schedule() {
    let (mut fine, fine_clock) = engine_from(TABATA);
    let (mut coarse, coarse_clock) = engine_from(TABATA);
    fine.start();
    coarse.start();

    run_for(&mut fine, &fine_clock, secs(73), Duration::from_millis(100));
    run_for(&mut coarse, &coarse_clock, secs(73), Duration::from_millis(7300));

    assert_eq!(fine.phase(), coarse.phase());
    assert_eq!(fine.item_index(), coarse.item_index());
    assert_eq!(fine.time_remaining(), coarse.time_remaining());
    assert_eq!(coarse.phase(), Phase::Active);
    assert_eq!(coarse.item_index(), Some(1));
    assert_eq!(coarse.time_remaining(), secs(7));
}

#[test]
fn test_skip_through_rests() {
    let (mut engine, clock) = engine_from(TABATA);
    engine.start();
    engine.handle_command(Command::SkipPrep);

    for expected in 1..3 {
        clock.advance(secs(30));
        engine.tick();
        assert_eq!(engine.phase(), Phase::Resting);
        engine.handle_command(Command::SkipRest);
        assert_eq!(engine.item_index(), Some(expected));
    }

    clock.advance(secs(30));
    let events = engine.tick();
    assert!(events.iter().any(|e| matches!(
        e,
        CoreEvent::SessionCompleted { items_completed: 3, total_active, .. } if *total_active == secs(90)
    )));
}

#[test]
fn test_stop_midway_then_restart() {
    let (mut engine, clock) = engine_from(TABATA);
    engine.start();
    clock.advance(secs(45));
    engine.tick();

    let events = engine.handle_command(Command::Stop);
    assert!(matches!(
        &events[..],
        [CoreEvent::SessionStopped { phase: Phase::Resting, active_elapsed, .. }] if *active_elapsed == secs(45)
    ));

    clock.advance(secs(1000));
    assert!(engine.tick().is_empty());

    engine.handle_command(Command::Start);
    assert_eq!(engine.phase(), Phase::Preparing);
    assert_eq!(engine.time_remaining(), secs(10));
}

#[test]
fn test_events_convert_to_api_payloads() {
    let (mut engine, _clock) = engine_from(TABATA);
    let events = engine.start();

    let payloads: Vec<EventPayload> = events.into_iter().map(Into::into).collect();
    assert!(matches!(payloads[0], EventPayload::SessionStarted { item_count: 3, .. }));
    assert!(matches!(
        payloads[1],
        EventPayload::PhaseEntered { phase: Phase::Preparing, item_index: None, .. }
    ));
    assert!(payloads.iter().all(|p| p.session_id() == engine.session_id()));
}

#[test]
fn test_empty_program_file() {
    let (mut engine, _clock) = engine_from(
        r#"
        config_version = 1

        [program]
        item_seconds = 30
        "#,
    );

    engine.start();
    assert_eq!(engine.phase(), Phase::Completed);
    assert_eq!(engine.overall_progress(), 1.0);
    assert_eq!(engine.segment_progress(), 1.0);
}

#[test]
fn test_load_program_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABATA.as_bytes()).unwrap();

    let config = load_config(file.path()).unwrap();
    assert_eq!(config.display_name(), "Mini tabata");

    let program = config.program.with_prep_duration(Duration::ZERO);
    let clock = ManualClock::new();
    let mut engine = SessionEngine::new(program, clock.clone());
    engine.start();
    assert_eq!(engine.phase(), Phase::Active);
    assert_eq!(engine.time_remaining(), secs(30));
}

#[test]
fn test_generic_program_items() {
    let program = PhaseProgram::new(vec!["focus", "review"], secs(0), secs(25 * 60), secs(5 * 60));
    let clock = ManualClock::new();
    let mut engine = SessionEngine::new(program, clock.clone());

    engine.start();
    assert_eq!(engine.current_item(), Some(&"focus"));
    clock.advance(secs(25 * 60));
    engine.tick();
    assert_eq!(engine.phase(), Phase::Resting);
    clock.advance(secs(5 * 60));
    engine.tick();
    assert_eq!(engine.current_item(), Some(&"review"));
}
