use proptest::prelude::*;
use quiz_core::builder;
use quiz_core::model::{Difficulty, SessionConfig, SessionId};
use quiz_core::session::{KeyCommand, QuizSession, SessionAction, SessionTimings, Timer};
use quiz_core::time::fixed_now;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn start(count: u32, seed: u64) -> QuizSession {
    let config = SessionConfig::new("X", count, Difficulty::Easy).unwrap();
    let deck = builder::build_with_rng(&config, &mut StdRng::seed_from_u64(seed));
    QuizSession::new(
        SessionId::new(1),
        config,
        deck,
        SessionTimings::default(),
        fixed_now(),
    )
}

/// Fire every timer (and follow-ups) until nothing is left.
fn settle(session: &mut QuizSession, mut timers: Vec<Timer>) {
    while let Some(timer) = timers.pop() {
        let step = session.fire(timer.token(), fixed_now());
        timers.extend(step.into_timers());
    }
}

#[test]
fn typed_answers_all_correct_reach_full_score() {
    let mut session = start(3, 11);
    assert_eq!(session.total_cards(), 3);

    for resolved in 0..3 {
        assert_eq!(session.known_count() + session.unknown_count(), resolved);
        let answer = session.current_card().unwrap().answer().to_string();
        let _ = session.apply(SessionAction::Know);
        let _ = session.apply(SessionAction::ChangeAnswer(answer.to_uppercase()));
        let step = session.apply(SessionAction::SubmitAnswer);
        settle(&mut session, step.into_timers());
    }

    assert!(session.is_finished());
    assert_eq!(session.known_count(), 3);
    assert_eq!(session.unknown_count(), 0);
    assert_eq!(session.summary().score_percent(), Some(100.0));
}

#[test]
fn dont_know_every_card_skips_grading() {
    let mut session = start(2, 5);
    for _ in 0..2 {
        let step = session.apply(SessionAction::DontKnow);
        settle(&mut session, step.into_timers());
    }

    assert!(session.is_finished());
    assert_eq!(session.unknown_count(), 2);
    assert_eq!(session.known_count(), 0);
    assert!(!session.summary().celebrates());
}

#[test]
fn completed_session_ignores_further_input() {
    let mut session = start(2, 1);
    for _ in 0..2 {
        let step = session.apply(SessionAction::Key(KeyCommand::ArrowLeft));
        settle(&mut session, step.into_timers());
    }
    assert!(session.is_finished());
    assert!(session.current_card().is_none());

    for action in [
        SessionAction::Flip,
        SessionAction::Know,
        SessionAction::DontKnow,
        SessionAction::SubmitAnswer,
        SessionAction::Key(KeyCommand::Enter),
    ] {
        assert!(!session.apply(action).is_applied());
    }
    assert_eq!(session.unknown_count(), 2);
    assert_eq!(session.current_index(), 1);
}

fn action_strategy() -> impl Strategy<Value = Option<SessionAction>> {
    prop_oneof![
        Just(Some(SessionAction::Flip)),
        Just(Some(SessionAction::Know)),
        Just(Some(SessionAction::DontKnow)),
        Just(Some(SessionAction::SubmitAnswer)),
        Just(Some(SessionAction::Key(KeyCommand::Enter))),
        Just(Some(SessionAction::Key(KeyCommand::ArrowLeft))),
        Just(Some(SessionAction::Key(KeyCommand::ArrowRight))),
        "[ a-zA-Z0-9]{0,12}".prop_map(|text| Some(SessionAction::ChangeAnswer(text))),
        // `None` fires the oldest pending timer.
        Just(None),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn counters_track_the_index(
        count in 1u32..8,
        seed in any::<u64>(),
        actions in prop::collection::vec(action_strategy(), 0..120),
    ) {
        let mut session = start(count, seed);
        let mut pending: Vec<Timer> = Vec::new();

        for action in actions {
            let step = match action {
                Some(action) => session.apply(action),
                None if !pending.is_empty() => {
                    let timer = pending.remove(0);
                    session.fire(timer.token(), fixed_now())
                }
                None => continue,
            };
            pending.extend(step.into_timers());

            let resolved = session.known_count() + session.unknown_count();
            let index = session.current_index() as u32;
            if session.is_finished() {
                prop_assert_eq!(resolved, count);
            } else {
                prop_assert!(session.current_index() < session.total_cards());
                if session.input_locked() && pending_resolved(&session) {
                    prop_assert_eq!(resolved, index + 1);
                } else {
                    prop_assert_eq!(resolved, index);
                }
            }
            prop_assert!(!(session.input_locked() && session.awaiting_typed_answer()));
        }
    }
}

fn pending_resolved(session: &QuizSession) -> bool {
    use quiz_core::session::{CardPhase, GradingStage};
    matches!(
        session.phase(),
        CardPhase::DontKnowGrading | CardPhase::Grading(GradingStage::Resolved { .. })
    )
}
