use dioxus::prelude::*;
use quiz_core::model::{Appearance, Difficulty, SessionConfig};
use quiz_core::session::{KeyCommand, SessionAction};
use storage::repository::{PreferenceRepository, SnapshotRepository};

use super::test_harness::{ViewHarness, ViewKind, drive_dom, setup_view_harness};

fn config(count: u32) -> SessionConfig {
    SessionConfig::new("Geography", count, Difficulty::Medium).unwrap()
}

fn dispatch(harness: &mut ViewHarness, action: SessionAction) {
    let callback = harness.handles.dispatch();
    harness.dom.in_runtime(|| callback.call(action));
    drive_dom(&mut harness.dom);
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_form_defaults() {
    let mut harness = setup_view_harness(ViewKind::Home, None);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Generate Flashcards"), "missing title in {html}");
    assert!(html.contains("Enter Topic"), "missing topic input in {html}");
    assert!(html.contains("value=\"5\""), "missing default count in {html}");
    assert!(html.contains("Medium"), "missing difficulty option in {html}");
    assert!(html.contains("Dark Mode"), "missing appearance toggle in {html}");
    assert!(html.contains("snowflake"), "missing snowflakes in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_session() {
    let mut harness = setup_view_harness(ViewKind::Quiz, None);
    harness.rebuild();
    let html = harness.render();
    assert!(html.contains("No quiz in progress."), "missing notice in {html}");
    assert!(html.contains("Back to Setup"), "missing link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_first_card() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(3)));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Question Card 1 of 3"), "missing progress in {html}");
    assert!(html.contains("Score: 0 / 0"), "missing score in {html}");
    assert!(html.contains("on Geography (medium)"), "missing question in {html}");
    assert!(html.contains("Quit"), "missing quit in {html}");
    assert!(!html.contains("answer-input"), "answer input shown too early in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn dont_know_advances_after_timer() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(3)));
    harness.rebuild();

    dispatch(&mut harness, SessionAction::Key(KeyCommand::ArrowLeft));
    let html = harness.render();
    assert!(html.contains("Score: 0 / 1"), "unknown not counted in {html}");

    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Question Card 2 of 3"), "did not advance in {html}");

    harness.quiz_loop.flush().await;
    let stored = harness.storage.snapshots.load_snapshot().await.unwrap().unwrap();
    assert_eq!(stored.unknown_count, 1);
    assert_eq!(stored.current_index, 1);
}

#[tokio::test(flavor = "current_thread")]
async fn know_opens_answer_entry() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(2)));
    harness.rebuild();

    dispatch(&mut harness, SessionAction::Know);
    let html = harness.render();
    assert!(html.contains("answer-input"), "missing answer input in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn perfect_run_celebrates() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(1)));
    harness.rebuild();

    dispatch(&mut harness, SessionAction::Know);
    dispatch(&mut harness, SessionAction::ChangeAnswer(" answer 1 ".into()));
    dispatch(&mut harness, SessionAction::Key(KeyCommand::Enter));
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Session Complete!"), "missing summary in {html}");
    assert!(html.contains("100%"), "missing score in {html}");
    assert!(html.contains("confetti__piece"), "missing confetti in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn failed_run_has_no_confetti() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(1)));
    harness.rebuild();

    dispatch(&mut harness, SessionAction::DontKnow);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Session Complete!"), "missing summary in {html}");
    assert!(html.contains(">0%<"), "missing score in {html}");
    assert!(html.contains("Restart"), "missing restart in {html}");
    assert!(!html.contains("confetti__piece"), "unexpected confetti in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn restart_after_completion_prefills_the_form() {
    let mut harness = setup_view_harness(ViewKind::Quiz, Some(config(2)));
    harness.rebuild();

    for _ in 0..2 {
        dispatch(&mut harness, SessionAction::DontKnow);
        harness.settle().await;
    }
    let html = harness.render();
    assert!(html.contains("Session Complete!"), "missing summary in {html}");

    let restart = harness.handles.restart();
    harness.dom.in_runtime(|| restart.call(()));
    drive_dom(&mut harness.dom);

    assert!(!harness.has_active_quiz());
    let draft = harness.draft();
    assert_eq!(draft.topic, "Geography");
    assert_eq!(draft.question_count, "2");
    assert_eq!(draft.difficulty, Difficulty::Medium);

    harness.quiz_loop.flush().await;
    let stored = harness.storage.snapshots.load_snapshot().await.unwrap().unwrap();
    assert_eq!(stored.current_index, 0);
    assert_eq!(stored.known_count + stored.unknown_count, 0);
    assert!(stored.deck.is_empty());
}

#[tokio::test(flavor = "current_thread")]
async fn appearance_toggle_flips_label_and_persists() {
    let mut harness = setup_view_harness(ViewKind::Home, None);
    harness.rebuild();
    assert!(harness.render().contains("Dark Mode"));

    let toggle = harness.handles.toggle_appearance();
    harness.dom.in_runtime(|| toggle.call(()));
    drive_dom(&mut harness.dom);
    harness.settle().await;

    let html = harness.render();
    assert!(html.contains("Light Mode"), "label did not flip in {html}");
    let appearance = harness.handles.appearance();
    assert_eq!(harness.dom.in_runtime(|| *appearance.peek()), Appearance::Dark);
    assert_eq!(
        harness.storage.preferences.get_appearance().await.unwrap(),
        Some(Appearance::Dark)
    );

    let toggle = harness.handles.toggle_appearance();
    harness.dom.in_runtime(|| toggle.call(()));
    drive_dom(&mut harness.dom);
    harness.settle().await;

    assert!(harness.render().contains("Dark Mode"));
    assert_eq!(
        harness.storage.preferences.get_appearance().await.unwrap(),
        Some(Appearance::Light)
    );
}
