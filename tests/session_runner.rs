//! 答题会话测试：题目开始 / 结果页信号与策略调用的先后关系

mod common;

use std::time::Duration;

use common::{test_timing, Action, ScriptedSurface};
use kahoot_autoplay::error::{AnswerError, SessionError};
use kahoot_autoplay::infrastructure::Key;
use kahoot_autoplay::models::{Question, SliderTarget};
use kahoot_autoplay::orchestrator::{QuestionOutcome, SessionRunner};
use kahoot_autoplay::services::selectors;
use tokio_test::{assert_err, assert_ok};
use tokio_util::sync::CancellationToken;

fn runner(continue_on_answer_error: bool) -> SessionRunner {
    SessionRunner::new(&test_timing(), continue_on_answer_error, CancellationToken::new())
}

fn observed(phase: &'static str) -> Action {
    Action::Observed(phase)
}

#[tokio::test(start_paused = true)]
async fn test_session_answers_in_phase_order() {
    let surface = ScriptedSurface::new()
        .with_phases()
        .with_buttons(4)
        .with_elements(selectors::open_ended_input(), &["input"]);
    let questions = vec![
        Question::single(None, 2),
        Question::open_ended(None, "42"),
    ];

    let report = assert_ok!(runner(true).run(&questions, &surface).await);

    assert_eq!(report.answered(), 2);
    assert_eq!(report.total(), 2);
    assert_eq!(
        surface.actions(),
        vec![
            observed("active"),
            Action::Activate("button#2".to_string()),
            observed("result"),
            observed("active"),
            Action::Type("input".to_string(), "42".to_string()),
            Action::Keys(vec![Key::Enter]),
            observed("result"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_session_skips_unknown_but_keeps_in_sync() {
    let surface = ScriptedSurface::new().with_phases().with_buttons(4);
    let questions = vec![
        Question::unknown(Some("投票".to_string())),
        Question::single(None, 0),
    ];

    let report = assert_ok!(runner(true).run(&questions, &surface).await);

    assert_eq!(report.skipped(), 1);
    assert_eq!(report.answered(), 1);
    assert_eq!(report.outcomes[0].1, QuestionOutcome::Skipped);
    assert_eq!(
        surface.actions(),
        vec![
            observed("active"),
            observed("result"),
            observed("active"),
            Action::Activate("button#0".to_string()),
            observed("result"),
        ]
    );
}

#[tokio::test(start_paused = true)]
async fn test_session_with_no_questions_touches_nothing() {
    let surface = ScriptedSurface::new().with_phases();

    let report = assert_ok!(runner(true).run(&[], &surface).await);

    assert_eq!(report.total(), 0);
    assert_eq!(surface.lookups(&selectors::question_active()), 0);
    assert!(surface.actions().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_phase_timeout_is_fatal() {
    let surface = ScriptedSurface::new().with_buttons(4);
    let questions = vec![Question::single(None, 1)];

    let err = assert_err!(runner(true).run(&questions, &surface).await);

    match err {
        SessionError::Timeout {
            question, waited, ..
        } => {
            assert_eq!(question, 1);
            assert_eq!(waited, Duration::from_millis(test_timing().phase_timeout_ms));
        }
        other => panic!("意外的错误: {:?}", other),
    }
    assert!(surface.activated().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_session_continues_after_slider_failure() {
    let surface = ScriptedSurface::new()
        .with_phases()
        .with_buttons(4)
        .with_slider("1000", 0, 1000..=1000);
    let questions = vec![
        Question::slider(None, SliderTarget::from_number(1000.0)),
        Question::single(None, 1),
    ];

    let report = assert_ok!(runner(true).run(&questions, &surface).await);

    assert_eq!(report.failed(), 1);
    assert_eq!(report.answered(), 1);
    assert!(matches!(report.outcomes[0].1, QuestionOutcome::Failed(_)));
    assert!(surface.activated().contains(&"button#1".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_session_aborts_on_slider_failure_when_configured() {
    let surface = ScriptedSurface::new()
        .with_phases()
        .with_buttons(4)
        .with_slider("1000", 0, 1000..=1000);
    let questions = vec![
        Question::slider(None, SliderTarget::from_number(1000.0)),
        Question::single(None, 1),
    ];

    let err = assert_err!(runner(false).run(&questions, &surface).await);

    assert!(matches!(
        err,
        SessionError::Answer {
            question: 1,
            source: AnswerError::ConvergenceFailure { .. }
        }
    ));
    assert!(!surface.activated().contains(&"button#1".to_string()));
}

#[tokio::test(start_paused = true)]
async fn test_session_missing_controls_abort_even_when_continuing() {
    let surface = ScriptedSurface::new().with_phases();
    let questions = vec![Question::single(None, 0), Question::single(None, 1)];

    let err = assert_err!(runner(true).run(&questions, &surface).await);

    assert!(matches!(
        err,
        SessionError::Answer {
            question: 1,
            source: AnswerError::ElementNotFound { .. }
        }
    ));
    assert_eq!(surface.actions(), vec![observed("active")]);
}

#[tokio::test(start_paused = true)]
async fn test_session_cancelled_before_start() {
    let surface = ScriptedSurface::new().with_phases().with_buttons(4);
    let cancel = CancellationToken::new();
    cancel.cancel();
    let runner = SessionRunner::new(&test_timing(), true, cancel);

    let err = assert_err!(runner.run(&[Question::single(None, 0)], &surface).await);

    assert!(matches!(err, SessionError::Cancelled));
    assert!(surface.actions().is_empty());
}
