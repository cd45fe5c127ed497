use dioxus::prelude::*;
use dioxus_router::Router;

use quiz_core::model::Appearance;

use crate::context::AppContext;
use crate::routes::Route;
use crate::views::{ActiveQuiz, system_prefers_dark};

/// Root-level signals shared by every route.
pub(crate) fn use_ui_state(initial: impl FnOnce() -> ActiveQuiz) -> Signal<Appearance> {
    use_context_provider(initial);
    use_context_provider(|| Signal::new(Appearance::default()))
}

#[component]
pub fn App() -> Element {
    let ctx = use_context::<AppContext>();
    let appearance = use_ui_state(|| ActiveQuiz::new(None));

    // Stored preference wins; the webview's color scheme is the fallback.
    let _appearance_load = use_resource(move || {
        let service = ctx.appearance();
        let mut appearance = appearance;
        async move {
            let system = system_prefers_dark().await;
            let resolved = service.load(system).await;
            tracing::debug!(appearance = %resolved, "appearance resolved");
            appearance.set(resolved);
        }
    });

    let root_class = format!("app-root theme-{}", appearance());

    rsx! {
        document::Stylesheet { href: asset!("/assets/style.css") }
        document::Title { "Flashcard Quiz" }

        div { class: "{root_class}",
            ErrorBoundary {
                handle_error: |errors: ErrorContext| rsx! {
                    div { class: "fatal",
                        h1 { "Something went wrong" }
                        pre { "{errors:?}" }
                    }
                },
                Router::<Route> {}
            }
        }
    }
}
