use dioxus::prelude::*;

use crate::views::decor::Confetti;
use crate::vm::SummaryVm;

#[component]
pub fn SummaryPanel(summary: SummaryVm, on_restart: EventHandler<()>) -> Element {
    rsx! {
        div { class: "page summary-page",
            if summary.celebrates {
                Confetti {}
            }
            h2 { class: "summary-page__title", "Session Complete!" }
            dl { class: "summary",
                dt { "Known Cards" }
                dd { id: "summary-known", "{summary.known}" }

                dt { "Unknown Cards" }
                dd { id: "summary-unknown", "{summary.unknown}" }

                dt { "Score" }
                dd { id: "summary-score", "{summary.score_label}" }

                dt { "Time" }
                dd { "{summary.elapsed_label}" }
            }
            button {
                class: "btn btn-primary",
                id: "restart",
                r#type: "button",
                onclick: move |_| on_restart.call(()),
                "Restart"
            }
        }
    }
}
