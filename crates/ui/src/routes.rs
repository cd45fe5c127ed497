use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable};

use crate::views::{AppearanceToggle, HomeView, QuizView};

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(Layout)]
        #[route("/", HomeView)] Home {},
        #[route("/quiz", QuizView)] Quiz {},
}

#[component]
fn Layout() -> Element {
    rsx! {
        div { class: "app",
            header { class: "topbar",
                h1 { "Flashcard Quiz" }
                AppearanceToggle {}
            }
            main { class: "content",
                Outlet::<Route> {}
            }
        }
    }
}
