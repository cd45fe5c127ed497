use dioxus::prelude::*;

use quiz_core::model::Appearance;

use crate::context::AppContext;
#[cfg(test)]
use crate::views::test_harness::ViewTestHandles;

#[component]
pub fn AppearanceToggle() -> Element {
    let ctx = use_context::<AppContext>();
    let mut appearance = use_context::<Signal<Appearance>>();
    let label = if appearance().is_dark() {
        "Light Mode"
    } else {
        "Dark Mode"
    };

    let toggle = use_callback(move |()| {
        let next = appearance.peek().toggled();
        appearance.set(next);
        let service = ctx.appearance();
        spawn(async move {
            if let Err(err) = service.save(next).await {
                tracing::warn!(error = %err, "failed to save appearance");
            }
        });
    });

    #[cfg(test)]
    if let Some(handles) = try_consume_context::<ViewTestHandles>() {
        handles.register_appearance(toggle);
    }

    rsx! {
        button {
            class: "appearance-toggle",
            id: "appearance-toggle",
            r#type: "button",
            onclick: move |_| toggle.call(()),
            "{label}"
        }
    }
}
