use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ecosort::{
    catalog::CategoryTag,
    notify::NotificationKind,
    runtime::{AppEvent, ChannelEventSource, FixedTicker, Runner},
    scanner::CameraState,
    scoreboard::{ChallengeState, CompletionCounting},
    ScriptedDraws, Session, SessionConfig,
};

// One simulated camera frame per tick, whatever the wall-clock interval.
const FRAME: Duration = Duration::from_millis(100);

fn key(c: char) -> AppEvent {
    AppEvent::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE))
}

// Headless scanner flow: camera on, live frame triggers, report lands, camera off.
#[test]
fn headless_live_detection_flow() {
    let mut session = Session::new(SessionConfig {
        counting: CompletionCounting::OnCompletion,
        live_detection: true,
    })
    .unwrap();

    // frame 1 misses the 15% trigger, frame 2 hits it, then one battery with +2 jitter
    let mut draws = ScriptedDraws::new([50, 3, 1, 42, 2]);

    let (tx, rx) = mpsc::channel();
    let runner = Runner::new(
        ChannelEventSource::new(rx),
        FixedTicker::new(Duration::from_millis(2)),
    );
    tx.send(key('c')).unwrap();

    let mut reports = vec![];
    let mut stages = 0;
    for _ in 0..200u32 {
        match runner.step() {
            AppEvent::Tick => {
                let before = session.scanner.current_run().and_then(|r| r.current_stage());
                if let Some(report) = session.tick(FRAME, &mut draws) {
                    reports.push(report);
                    tx.send(key('s')).unwrap();
                }
                let after = session.scanner.current_run().and_then(|r| r.current_stage());
                if after.is_some() && after != before {
                    stages += 1;
                }
            }
            AppEvent::Resize => {}
            AppEvent::Key(k) => match k.code {
                KeyCode::Char('c') => session.start_camera(),
                KeyCode::Char('s') => {
                    session.stop_camera();
                    break;
                }
                _ => {}
            },
        }
    }

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].results[0].item.name, "Alkaline Battery (AA)");
    assert_eq!(reports[0].results[0].item.category, CategoryTag::Hazardous);
    assert_eq!(stages, 2, "both live stages should have been shown");
    assert_eq!(session.scanner.camera(), CameraState::Off);
    assert_eq!(session.scanner.history().len(), 1);
    assert!(!session.scanner.is_analyzing());
}

#[test]
fn headless_stop_camera_cancels_capture() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    let mut draws = ScriptedDraws::new([2, 0, 0, 51, 0]);

    session.start_camera();
    session.capture().unwrap();
    for _ in 0..20 {
        assert!(session.tick(FRAME, &mut draws).is_none());
    }
    session.stop_camera();
    for _ in 0..50 {
        assert!(session.tick(FRAME, &mut draws).is_none());
    }

    assert!(session.scanner.history().is_empty());
    assert_eq!(draws.remaining(), 5, "a cancelled run never reaches the classifier");
}

#[test]
fn headless_sorting_board_completes() {
    let mut session = Session::new(SessionConfig::default()).unwrap();
    let deck: Vec<_> = session.quiz.deck().to_vec();

    // one wrong drop first; it must not count
    let first = deck[0];
    let wrong = CategoryTag::ALL
        .into_iter()
        .find(|tag| *tag != first.category)
        .unwrap();
    let drop = session.drop_item(0, wrong).unwrap();
    assert!(!drop.outcome.correct);
    assert_eq!(session.quiz.sorted_count(), 0);

    for (idx, item) in deck.iter().enumerate() {
        let drop = session.drop_item(idx, item.category).unwrap();
        assert!(drop.outcome.correct);
        assert_eq!(drop.completed, idx + 1 == deck.len());
    }

    assert!(session.quiz.is_complete());
    let latest = session.toasts.latest().unwrap();
    assert_eq!(latest.kind, NotificationKind::Success);
    assert!(latest.message.contains("sorted all waste items"));
    assert!(session.drop_item(0, first.category).is_err());
}

#[test]
fn headless_challenge_to_completion() {
    for (counting, expected) in [
        (CompletionCounting::OnCompletion, 24),
        (CompletionCounting::OnStartAndCompletion, 25),
    ] {
        let mut session = Session::new(SessionConfig {
            counting,
            live_detection: false,
        })
        .unwrap();

        // start at 10%, then 30, 50, 70, 90 and finally 100
        for _ in 0..6 {
            session.activate_challenge(2).unwrap();
        }

        let challenge = session.scoreboard.challenge(2).unwrap();
        assert_eq!(challenge.state, ChallengeState::Completed);
        assert_eq!(challenge.progress, 100);
        assert_eq!(session.scoreboard.profile().points, 2470);
        assert_eq!(session.scoreboard.profile().challenges_completed, expected);
        assert!(session.activate_challenge(2).is_err());
    }
}
