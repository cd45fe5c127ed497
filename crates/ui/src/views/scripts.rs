use dioxus::document::eval;

/// `prefers-color-scheme` from the webview, `None` when it cannot be asked.
pub(crate) async fn system_prefers_dark() -> Option<bool> {
    eval("return window.matchMedia('(prefers-color-scheme: dark)').matches;")
        .join::<bool>()
        .await
        .ok()
}

pub(crate) fn focus_quiz_root() {
    let _ = eval("document.getElementById('quiz-root')?.focus();");
}
