use dioxus::prelude::*;
use dioxus_router::use_navigator;

use quiz_core::model::{Difficulty, MAX_QUESTION_COUNT};

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::decor::Snowflakes;
use crate::views::{ActiveQuiz, ViewError};
use crate::vm::submit_draft;

#[component]
pub fn HomeView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let active = use_context::<ActiveQuiz>();
    let mut draft = active.draft;
    let mut error = use_signal(|| None::<ViewError>);

    let start = move |_| {
        let quiz_loop = ctx.quiz_loop();
        let result = submit_draft(&quiz_loop, &draft.read());
        match result {
            Ok(vm) => {
                error.set(None);
                let mut slot = active.vm;
                slot.set(Some(vm));
                let _ = navigator.push(Route::Quiz {});
            }
            Err(err) => {
                tracing::debug!(error = ?err, "quiz config rejected");
                error.set(Some(err));
            }
        }
    };

    let current = draft.read().clone();

    rsx! {
        div { class: "page config-page",
            Snowflakes {}
            h2 { class: "config-page__title", "Generate Flashcards" }
            p { class: "config-page__subtitle", "Pick a topic and we'll build a deck for you." }
            div { class: "config-form",
                input {
                    id: "topic",
                    r#type: "text",
                    placeholder: "Enter Topic",
                    value: "{current.topic}",
                    oninput: move |evt| draft.write().topic = evt.value(),
                }
                input {
                    id: "question-count",
                    r#type: "number",
                    min: "1",
                    max: "{MAX_QUESTION_COUNT}",
                    placeholder: "Number of Questions",
                    value: "{current.question_count}",
                    oninput: move |evt| draft.write().question_count = evt.value(),
                }
                select {
                    id: "difficulty",
                    onchange: move |evt| match evt.value().parse::<Difficulty>() {
                        Ok(difficulty) => draft.write().difficulty = difficulty,
                        Err(err) => tracing::debug!(error = %err, "ignoring difficulty"),
                    },
                    for difficulty in Difficulty::ALL {
                        option {
                            value: "{difficulty.as_str()}",
                            selected: current.difficulty == difficulty,
                            "{difficulty.label()}"
                        }
                    }
                }
                if let Some(err) = error() {
                    p { class: "form-error", role: "alert", "{err.message()}" }
                }
                button {
                    class: "btn btn-primary",
                    id: "generate",
                    r#type: "button",
                    onclick: start,
                    "Generate Flashcards"
                }
            }
        }
    }
}
