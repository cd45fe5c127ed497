use std::sync::Arc;

use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::session::{KeyCommand, SessionAction, Timer};
use services::QuizLoopService;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::decor::Snowflakes;
use crate::views::scripts::focus_quiz_root;
use crate::views::summary::SummaryPanel;
use crate::views::{ActiveQuiz, ViewError};
use crate::vm::{ActiveCardVm, CardFace, QuizScreen, QuizVm};

#[cfg(test)]
use crate::views::test_harness::ViewTestHandles;

/// Sleep out each timer, feed it back, and chain whatever it schedules next.
fn schedule(vm: Signal<Option<QuizVm>>, quiz_loop: Arc<QuizLoopService>, timers: Vec<Timer>) {
    for timer in timers {
        let quiz_loop = Arc::clone(&quiz_loop);
        let mut vm = vm;
        spawn(async move {
            tokio::time::sleep(timer.delay()).await;
            let follow_up = vm
                .write()
                .as_mut()
                .map(|vm| vm.fire(&quiz_loop, &timer))
                .unwrap_or_default();
            schedule(vm, quiz_loop, follow_up);
        });
    }
}

#[component]
pub fn QuizView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let active = use_context::<ActiveQuiz>();
    let vm = active.vm;

    let dispatch = {
        let quiz_loop = ctx.quiz_loop();
        use_callback(move |action: SessionAction| {
            let mut vm = vm;
            let timers = vm
                .write()
                .as_mut()
                .map(|vm| vm.dispatch(&quiz_loop, action))
                .unwrap_or_default();
            schedule(vm, Arc::clone(&quiz_loop), timers);
        })
    };

    let restart = {
        let quiz_loop = ctx.quiz_loop();
        use_callback(move |()| {
            let mut vm = vm;
            let mut draft = active.draft;
            let taken = vm.write().take();
            if let Some(current) = taken {
                draft.set(quiz_loop.restart(current.into_session()));
            }
            let _ = navigator.push(Route::Home {});
        })
    };

    #[cfg(test)]
    {
        let mut registered = use_signal(|| false);
        if !registered() {
            registered.set(true);
            if let Some(handles) = try_consume_context::<ViewTestHandles>() {
                handles.register_quiz(dispatch, restart, active);
            }
        }
    }

    use_effect(focus_quiz_root);

    let screen = vm.read().as_ref().map(QuizVm::screen);

    match screen {
        None => rsx! {
            div { class: "page quiz-page",
                p { "{ViewError::NoActiveQuiz.message()}" }
                button {
                    class: "btn btn-secondary",
                    r#type: "button",
                    onclick: move |_| {
                        let _ = navigator.push(Route::Home {});
                    },
                    "Back to Setup"
                }
            }
        },
        Some(QuizScreen::Complete(summary)) => rsx! {
            SummaryPanel { summary, on_restart: restart }
        },
        Some(QuizScreen::Active(card)) => rsx! {
            ActiveCard { card, dispatch, on_quit: restart }
        },
    }
}

#[component]
fn ActiveCard(
    card: ActiveCardVm,
    dispatch: Callback<SessionAction>,
    on_quit: EventHandler<()>,
) -> Element {
    let on_key = move |evt: KeyboardEvent| {
        if let Some(key) = KeyCommand::from_key_name(&evt.key().to_string()) {
            dispatch.call(SessionAction::Key(key));
        }
    };
    let badge_class = if card.score_flash {
        "score-badge score-badge--flash"
    } else {
        "score-badge"
    };
    let card_class = match card.face {
        CardFace::Question => "flashcard",
        CardFace::Answer => "flashcard flashcard--flipped",
    };
    let progress_style = format!("width: {:.1}%;", card.progress_percent);

    rsx! {
        div { class: "page quiz-page", id: "quiz-root", tabindex: "0", onkeydown: on_key,
            Snowflakes {}
            p { class: "{badge_class}", id: "score-badge", "{card.score_label}" }
            div { class: "progress",
                p { class: "progress__label", "{card.progress_label}" }
                div { class: "progress__track",
                    div { class: "progress__fill", style: "{progress_style}" }
                }
            }
            div {
                class: "{card_class}",
                id: "flashcard",
                onclick: move |_| dispatch.call(SessionAction::Flip),
                div { class: "flashcard__face", "{card.face_text}" }
            }
            if card.awaiting_typed_answer {
                div { class: "answer-entry",
                    input {
                        id: "answer-input",
                        r#type: "text",
                        placeholder: "Type your answer here",
                        value: "{card.typed_answer}",
                        disabled: card.input_locked,
                        oninput: move |evt| dispatch.call(SessionAction::ChangeAnswer(evt.value())),
                    }
                    button {
                        class: "btn btn-primary",
                        id: "submit-answer",
                        r#type: "button",
                        disabled: !card.can_submit,
                        onclick: move |_| dispatch.call(SessionAction::SubmitAnswer),
                        "Submit"
                    }
                }
            } else {
                div { class: "quiz-actions",
                    button {
                        class: "btn btn-know",
                        id: "know",
                        r#type: "button",
                        disabled: card.input_locked,
                        onclick: move |_| dispatch.call(SessionAction::Know),
                        "Know"
                    }
                    button {
                        class: "btn btn-dont-know",
                        id: "dont-know",
                        r#type: "button",
                        disabled: card.input_locked,
                        onclick: move |_| dispatch.call(SessionAction::DontKnow),
                        "Don't Know"
                    }
                }
            }
            button {
                class: "btn btn-ghost",
                id: "quit",
                r#type: "button",
                onclick: move |_| on_quit.call(()),
                "Quit"
            }
        }
    }
}
