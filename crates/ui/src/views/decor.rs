//! Purely decorative layers. Positions are derived from the element index so
//! renders are stable and carry no state.

use dioxus::prelude::*;

pub const SNOWFLAKE_COUNT: u32 = 20;
pub const CONFETTI_PER_BURST: u32 = 40;

const GOLDEN_RATIO_CONJUGATE: f64 = 0.618_033_988_749_895;
const CONFETTI_COLORS: [&str; 4] = ["#FFD700", "#FF69B4", "#87CEEB", "#FFFFFF"];

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlakeLayout {
    pub left_percent: f64,
    pub delay_secs: f64,
}

/// Spread flakes across the width without clustering; delays stay under 5s.
#[must_use]
pub fn flake_layout(index: u32) -> FlakeLayout {
    let spread = (f64::from(index) * GOLDEN_RATIO_CONJUGATE).fract();
    FlakeLayout {
        left_percent: spread * 100.0,
        delay_secs: f64::from(index % 5) * 0.9 + spread * 0.5,
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConfettiPiece {
    pub from_left: bool,
    pub color: &'static str,
    pub top_percent: f64,
    pub drift_vw: f64,
    pub delay_secs: f64,
}

/// Two bursts, one from each side at mid height.
#[must_use]
pub fn confetti_piece(index: u32) -> ConfettiPiece {
    let from_left = index < CONFETTI_PER_BURST;
    let local = index % CONFETTI_PER_BURST;
    let spread = (f64::from(local) * GOLDEN_RATIO_CONJUGATE).fract();
    let drift = 30.0 + spread * 40.0;
    ConfettiPiece {
        from_left,
        color: CONFETTI_COLORS[(local % 4) as usize],
        top_percent: 40.0 + spread * 20.0,
        drift_vw: if from_left { drift } else { -drift },
        delay_secs: f64::from(local % 8) * 0.05,
    }
}

#[component]
pub fn Snowflakes() -> Element {
    rsx! {
        div { class: "snowfall", aria_hidden: "true",
            for index in 0..SNOWFLAKE_COUNT {
                Snowflake { key: "{index}", index }
            }
        }
    }
}

#[component]
fn Snowflake(index: u32) -> Element {
    let layout = flake_layout(index);
    let style = format!(
        "left: {:.2}%; animation-delay: {:.2}s;",
        layout.left_percent, layout.delay_secs
    );
    rsx! {
        span { class: "snowflake", style: "{style}", "❄" }
    }
}

#[component]
pub fn Confetti() -> Element {
    rsx! {
        div { class: "confetti", aria_hidden: "true",
            for index in 0..CONFETTI_PER_BURST * 2 {
                ConfettiBit { key: "{index}", index }
            }
        }
    }
}

#[component]
fn ConfettiBit(index: u32) -> Element {
    let piece = confetti_piece(index);
    let side = if piece.from_left { "left: 0" } else { "right: 0" };
    let style = format!(
        "{side}; top: {:.1}%; background: {}; --drift: {:.1}vw; animation-delay: {:.2}s;",
        piece.top_percent, piece.color, piece.drift_vw, piece.delay_secs
    );
    rsx! {
        span { class: "confetti__piece", style: "{style}" }
    }
}
