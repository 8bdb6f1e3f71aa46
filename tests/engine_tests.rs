//! Match orchestration tests.
//!
//! These tests drive `GameEngine` through whole matches with a manual
//! clock, covering scoring, forfeits, rejection rules, and the order of
//! emitted notifications.

use std::sync::mpsc;
use std::time::Duration;

use rust_rps::core::{Difficulty, GameMode, Gesture, ManualClock, MatchConfig, RoundPhase, Side};
use rust_rps::engine::{ChannelListener, EngineEvent, EventKind, EventLog, GameEngine, RoundOutcome};
use rust_rps::error::SubmitError;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn engine_with(config: MatchConfig) -> (GameEngine, ManualClock, EventLog) {
    init_tracing();
    let clock = ManualClock::new();
    let log = EventLog::new();
    let mut engine = GameEngine::new(clock.clone());
    engine.add_listener(log.clone());
    engine.initialize(config);
    (engine, clock, log)
}

fn pvp(max_rounds: u32) -> (GameEngine, ManualClock, EventLog) {
    engine_with(
        MatchConfig::new(GameMode::HumanVsHuman)
            .with_max_rounds(max_rounds)
            .with_names("Alice", "Bob"),
    )
}

/// Play one human-vs-human round with side A's and side B's keys.
fn play(engine: &mut GameEngine, key_a: char, key_b: char) {
    assert!(engine.start_round());
    engine.submit_input(Side::A, key_a).unwrap();
    engine.submit_input(Side::B, key_b).unwrap();
}

// === Scoring ===

/// Test that a best-of-3 ends as soon as one side has two wins.
#[test]
fn test_best_of_three_ends_early() {
    let (mut engine, _, _) = pvp(3);

    play(&mut engine, 'a', 'l'); // Rock vs Scissors
    assert_eq!(engine.state().unwrap().phase(), RoundPhase::Resolved);
    assert!(!engine.is_match_finished());

    play(&mut engine, 's', 'j'); // Paper vs Rock
    let state = engine.state().unwrap();
    assert_eq!(state.current_round(), 2);
    assert_eq!(state.wins(Side::A), 2);
    assert_eq!(state.phase(), RoundPhase::MatchFinished);
    assert_eq!(state.winner(), Some(Side::A));
    assert!(engine.is_match_finished());

    assert!(!engine.start_round());
    assert_eq!(engine.state().unwrap().current_round(), 2);
}

/// Test that draws do not count toward the majority.
#[test]
fn test_draws_extend_to_round_cap() {
    let (mut engine, _, _) = pvp(3);

    play(&mut engine, 'a', 'j');
    assert_eq!(engine.last_round().unwrap().outcome, RoundOutcome::Draw);
    assert_eq!(engine.last_round().unwrap().reason, "It's a tie!");

    play(&mut engine, 'd', 'k'); // Scissors vs Paper
    play(&mut engine, 'a', 'k'); // Rock vs Paper

    let tally = engine.state().unwrap().tally();
    assert_eq!(tally.draws, 1);
    assert_eq!(tally.side_a_wins, 1);
    assert_eq!(tally.side_b_wins, 1);
    assert_eq!(tally.rounds_played, 3);
    assert!(engine.is_match_finished());
    assert_eq!(engine.state().unwrap().winner(), None);
}

/// Test the majority threshold for a best-of-5.
#[test]
fn test_best_of_five_majority() {
    let (mut engine, _, _) = pvp(5);

    play(&mut engine, 'a', 'k'); // B
    play(&mut engine, 'a', 'k'); // B
    play(&mut engine, 'a', 'l'); // A
    assert!(!engine.is_match_finished());
    play(&mut engine, 'd', 'j'); // B

    let state = engine.state().unwrap();
    assert_eq!(state.wins(Side::B), 3);
    assert_eq!(state.current_round(), 4);
    assert_eq!(state.winner(), Some(Side::B));
    assert!(engine.is_match_finished());
}

/// Test that the round report names the winning gesture first.
#[test]
fn test_round_report_reason() {
    let (mut engine, _, _) = pvp(3);
    play(&mut engine, 'a', 'k');

    let report = engine.last_round().unwrap();
    assert_eq!(report.round, 1);
    assert_eq!(report.gesture(Side::A), Some(Gesture::Rock));
    assert_eq!(report.gesture(Side::B), Some(Gesture::Paper));
    assert_eq!(report.winner(), Some(Side::B));
    assert_eq!(report.reason, "Paper beats Rock");
}

// === Forfeits ===

/// Test that one missing side forfeits once the deadline passes.
#[test]
fn test_single_forfeit_on_deadline() {
    let (mut engine, clock, _) = pvp(3);
    engine.start_round();
    engine.submit_input(Side::B, 'j').unwrap();

    clock.advance(Duration::from_millis(2999));
    assert!(engine.poll().is_none());
    assert_eq!(engine.time_remaining(), Duration::from_millis(1));

    clock.advance(Duration::from_millis(1));
    let report = engine.poll().unwrap();
    assert_eq!(report.outcome, RoundOutcome::Forfeit { winner: Side::B });
    assert_eq!(report.reason, "Alice forfeited!");
    assert_eq!(report.gesture(Side::A), None);
    assert_eq!(engine.state().unwrap().wins(Side::B), 1);
}

/// Test that nobody scores when both sides miss the deadline.
#[test]
fn test_double_forfeit() {
    let (mut engine, clock, _) = pvp(3);
    engine.start_round();
    clock.advance(Duration::from_secs(5));

    let report = engine.poll().unwrap();
    assert_eq!(report.outcome, RoundOutcome::DoubleForfeit);
    assert_eq!(report.reason, "Both players forfeited!");

    let tally = engine.state().unwrap().tally();
    assert_eq!(tally.side_a_wins + tally.side_b_wins, 0);
    assert_eq!(tally.draws, 1);
}

/// Test that the computer learns nothing from a round its opponent forfeited.
#[test]
fn test_forfeit_leaves_computer_history_empty() {
    let (mut engine, clock, _) = engine_with(MatchConfig::new(GameMode::HumanVsComputer).with_seed(3));
    engine.start_round();
    assert!(engine.player(Side::B).unwrap().has_submitted());

    clock.advance(Duration::from_secs(3));
    let report = engine.poll().unwrap();
    assert_eq!(report.outcome, RoundOutcome::Forfeit { winner: Side::B });
    assert_eq!(report.reason, "Player 1 forfeited!");

    let brain = engine.player(Side::B).unwrap().brain().unwrap();
    assert!(brain.history().is_empty());
}

/// Test that force-ending a round scores whatever was committed.
#[test]
fn test_force_end_round() {
    let (mut engine, _, _) = pvp(3);
    assert!(engine.force_end_round().is_none());

    engine.start_round();
    engine.submit_input(Side::A, 'd').unwrap();
    let report = engine.force_end_round().unwrap();
    assert_eq!(report.outcome, RoundOutcome::Forfeit { winner: Side::A });

    assert!(engine.force_end_round().is_none());
    assert!(engine.poll().is_none());
}

// === Rejections ===

/// Test that a second submission is rejected and the first one stands.
#[test]
fn test_duplicate_submission_rejected() {
    let (mut engine, _, _) = pvp(3);
    engine.start_round();

    assert_eq!(engine.submit_input(Side::A, 'a'), Ok(Gesture::Rock));
    assert_eq!(
        engine.submit_input(Side::A, 's'),
        Err(SubmitError::DuplicateSubmission { side: Side::A })
    );
    assert_eq!(engine.player(Side::A).unwrap().gesture(), Some(Gesture::Rock));
}

/// Test that symbols outside a side's bindings are rejected.
#[test]
fn test_unmapped_input_rejected() {
    let (mut engine, _, log) = pvp(3);
    engine.start_round();
    log.take();

    assert_eq!(
        engine.submit_input(Side::A, 'j'),
        Err(SubmitError::UnmappedInput { symbol: 'j' })
    );
    assert_eq!(
        engine.submit_input(Side::B, 'x'),
        Err(SubmitError::UnmappedInput { symbol: 'x' })
    );
    assert!(!engine.player(Side::A).unwrap().has_submitted());
    assert!(log.events().is_empty());
}

/// Test that the computer side cannot be driven from the keyboard.
#[test]
fn test_computer_side_rejects_input() {
    let (mut engine, _, _) = engine_with(MatchConfig::new(GameMode::HumanVsComputer).with_seed(9));
    engine.start_round();
    assert_eq!(
        engine.submit_input(Side::B, 'r'),
        Err(SubmitError::UnmappedInput { symbol: 'r' })
    );
}

/// Test that input outside an active round is rejected.
#[test]
fn test_inactive_round_rejected() {
    let (mut engine, _, _) = pvp(1);
    assert_eq!(engine.submit_input(Side::A, 'a'), Err(SubmitError::InactiveRound));

    play(&mut engine, 'a', 'l');
    assert!(engine.is_match_finished());
    assert_eq!(engine.submit_input(Side::A, 'a'), Err(SubmitError::InactiveRound));
    assert_eq!(engine.process_key('a'), Err(SubmitError::InactiveRound));
}

// === Keyboard routing ===

/// Test that a shared keyboard routes keys to the side that binds them.
#[test]
fn test_process_key_routes_by_binding() {
    let (mut engine, _, _) = pvp(3);
    engine.start_round();

    assert_eq!(engine.process_key('l'), Ok((Side::B, Gesture::Scissors)));
    assert_eq!(engine.process_key('D'), Ok((Side::A, Gesture::Scissors)));
    assert_eq!(engine.last_round().unwrap().outcome, RoundOutcome::Draw);
}

/// Test that a held key is reported once and bursts are throttled.
#[test]
fn test_press_key_guard() {
    let (mut engine, clock, _) = pvp(3);
    engine.start_round();

    assert_eq!(engine.press_key('a'), Ok((Side::A, Gesture::Rock)));
    assert_eq!(engine.press_key('a'), Err(SubmitError::KeyRepeat { key: 'a' }));
    engine.release_key('a');

    // Eight more accepted presses fill the window of ten.
    for _ in 0..8 {
        assert_eq!(engine.press_key('z'), Err(SubmitError::UnmappedInput { symbol: 'z' }));
        engine.release_key('z');
    }
    assert_eq!(
        engine.press_key('a'),
        Err(SubmitError::DuplicateSubmission { side: Side::A })
    );
    engine.release_key('a');
    assert_eq!(engine.press_key('j'), Err(SubmitError::Throttled));
    engine.release_key('j');

    clock.advance(Duration::from_millis(1001));
    assert_eq!(engine.press_key('j'), Ok((Side::B, Gesture::Rock)));
}

// === Computer opponent ===

/// Test that the computer commits at round start and learns from each round.
#[test]
fn test_computer_learns_from_rounds() {
    let config = MatchConfig::new(GameMode::HumanVsComputer)
        .with_max_rounds(9)
        .with_difficulty(Difficulty::Medium)
        .with_seed(17);
    let (mut engine, _, _) = engine_with(config);

    engine.start_round();
    engine.submit_input(Side::A, 'r').unwrap();
    assert_eq!(engine.state().unwrap().phase(), RoundPhase::Resolved);

    engine.start_round();
    engine.submit_input(Side::A, 'r').unwrap();
    assert_eq!(engine.last_round().unwrap().gesture(Side::B), Some(Gesture::Paper));

    let brain = engine.player(Side::B).unwrap().brain().unwrap();
    assert_eq!(brain.history().len(), 2);
}

/// Test that the same seed replays the same computer choices.
#[test]
fn test_seeded_matches_replay() {
    let run = || {
        let config = MatchConfig::new(GameMode::HumanVsComputer)
            .with_max_rounds(7)
            .with_difficulty(Difficulty::Hard)
            .with_seed(1234);
        let (mut engine, _, _) = engine_with(config);
        let mut seen = Vec::new();
        for key in ['r', 'p', 's', 'r', 'p', 's', 'r'] {
            if !engine.start_round() {
                break;
            }
            engine.submit_input(Side::A, key).unwrap();
            seen.push(engine.last_round().unwrap().gesture(Side::B));
        }
        seen
    };
    assert_eq!(run(), run());
}

/// Test that out-of-range difficulty levels are clamped.
#[test]
fn test_difficulty_level_clamped() {
    let mut engine = GameEngine::new(ManualClock::new());

    engine.initialize_with(GameMode::HumanVsComputer, 3, "Ann", "CPU", 7);
    assert_eq!(engine.config().unwrap().difficulty, Difficulty::Hard);
    assert_eq!(engine.player(Side::B).unwrap().brain().unwrap().difficulty(), Difficulty::Hard);

    engine.initialize_with(GameMode::HumanVsComputer, 3, "Ann", "CPU", -4);
    assert_eq!(engine.config().unwrap().difficulty, Difficulty::Easy);
}

/// Test that a zero round limit still plays one round.
#[test]
fn test_zero_rounds_clamped() {
    let (mut engine, _, _) = pvp(0);
    assert_eq!(engine.state().unwrap().max_rounds(), 1);
    play(&mut engine, 'a', 'l');
    assert!(engine.is_match_finished());
}

// === Lifecycle ===

/// Test that reset restores a fresh match and clears computer history.
#[test]
fn test_reset_match() {
    let (mut engine, _, log) = engine_with(
        MatchConfig::new(GameMode::HumanVsComputer)
            .with_max_rounds(3)
            .with_seed(5),
    );
    engine.start_round();
    engine.submit_input(Side::A, 'p').unwrap();
    log.take();

    assert!(engine.reset_match());

    let state = engine.state().unwrap();
    assert_eq!(state.current_round(), 0);
    assert_eq!(state.phase(), RoundPhase::Idle);
    assert_eq!(state.tally().draws + state.wins(Side::A) + state.wins(Side::B), 0);
    assert!(engine.last_round().is_none());
    assert!(engine.player(Side::B).unwrap().brain().unwrap().history().is_empty());
    assert_eq!(log.kinds(), vec![EventKind::MatchInitialized]);
}

/// Test that snapshots hide committed gestures until the round resolves.
#[test]
fn test_snapshot_reveal() {
    let (mut engine, _, _) = pvp(3);
    engine.start_round();
    engine.submit_input(Side::A, 's').unwrap();

    let snapshot = engine.snapshot().unwrap();
    assert!(snapshot.players[Side::A].submitted);
    assert_eq!(snapshot.players[Side::A].revealed, None);
    assert_eq!(
        snapshot.players[Side::B].key_help.as_deref(),
        Some("Bob: J=Rock, K=Paper, L=Scissors")
    );
    assert_eq!(snapshot.time_remaining, Duration::from_millis(3000));

    engine.submit_input(Side::B, 'l').unwrap();
    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.players[Side::A].revealed, Some(Gesture::Paper));
    assert_eq!(snapshot.players[Side::B].revealed, Some(Gesture::Scissors));
    assert_eq!(snapshot.tally.side_b_wins, 1);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["time_remaining"], 3000);
}

/// Test that the snapshot timer keeps running down after a round resolves.
#[test]
fn test_snapshot_timer_after_forfeit() {
    let (mut engine, clock, _) = pvp(3);
    engine.start_round();
    clock.advance(Duration::from_millis(3500));
    engine.poll().unwrap();

    let snapshot = engine.snapshot().unwrap();
    assert_eq!(snapshot.phase, RoundPhase::Resolved);
    assert_eq!(snapshot.time_remaining, Duration::ZERO);
    assert_eq!(engine.time_remaining(), Duration::ZERO);

    engine.start_round();
    assert_eq!(engine.time_remaining(), Duration::from_millis(3000));
}

/// Test that a settings document may give the difficulty as a raw level.
#[test]
fn test_json_difficulty_level_clamped() {
    let config = MatchConfig::from_json(r#"{ "mode": "HumanVsComputer", "difficulty": 7, "seed": 4 }"#).unwrap();
    let (engine, _, _) = engine_with(config);

    let brain = engine.player(Side::B).unwrap().brain().unwrap();
    assert_eq!(brain.difficulty(), Difficulty::Hard);
}

// === Notifications ===

/// Test the exact order of notifications across a short match.
#[test]
fn test_event_order() {
    let (mut engine, _, log) = pvp(3);

    play(&mut engine, 'a', 'l');
    play(&mut engine, 'a', 'l');

    assert_eq!(
        log.kinds(),
        vec![
            EventKind::MatchInitialized,
            EventKind::RoundStarted,
            EventKind::GestureSubmitted,
            EventKind::GestureSubmitted,
            EventKind::RoundResult,
            EventKind::RoundStarted,
            EventKind::GestureSubmitted,
            EventKind::GestureSubmitted,
            EventKind::RoundResult,
            EventKind::MatchEnded,
        ]
    );

    match log.events().last() {
        Some(EngineEvent::MatchEnded { winner, tally }) => {
            assert_eq!(*winner, Some(Side::A));
            assert_eq!(tally.side_a_wins, 2);
        }
        other => panic!("expected MatchEnded, got {other:?}"),
    }
}

/// Test that the computer's hidden choice is not announced.
#[test]
fn test_computer_choice_not_announced() {
    let (mut engine, _, log) = engine_with(MatchConfig::new(GameMode::HumanVsComputer).with_seed(8));
    engine.start_round();
    engine.submit_input(Side::A, 'r').unwrap();

    let submitted: Vec<_> = log
        .events()
        .into_iter()
        .filter(|event| event.kind() == EventKind::GestureSubmitted)
        .collect();
    assert_eq!(
        submitted,
        vec![EngineEvent::GestureSubmitted { side: Side::A, gesture: Gesture::Rock }]
    );
}

/// Test that listeners see state already updated, and can be removed.
#[test]
fn test_listener_sees_committed_state() {
    let (tx, rx) = mpsc::channel();
    let (mut engine, _, _) = pvp(3);
    let id = engine.add_listener(ChannelListener(tx));

    play(&mut engine, 'a', 'l');
    let results: Vec<_> = rx
        .try_iter()
        .filter_map(|event| match event {
            EngineEvent::RoundResult(report) => Some(report),
            _ => None,
        })
        .collect();
    assert_eq!(results.len(), 1);
    assert_eq!(Some(&results[0]), engine.last_round());

    assert!(engine.remove_listener(id));
    play(&mut engine, 'a', 'l');
    assert_eq!(rx.try_iter().count(), 0);
}
