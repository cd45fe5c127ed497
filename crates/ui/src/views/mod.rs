mod appearance;
mod config_form;
mod decor;
mod quiz;
mod scripts;
mod state;
mod summary;

#[cfg(test)]
mod test_harness;
#[cfg(test)]
mod view_smoke;

pub(crate) use scripts::system_prefers_dark;

pub use appearance::AppearanceToggle;
pub use config_form::HomeView;
pub use decor::{
    CONFETTI_PER_BURST, Confetti, ConfettiPiece, FlakeLayout, SNOWFLAKE_COUNT, Snowflakes,
    confetti_piece, flake_layout,
};
pub use quiz::QuizView;
pub use state::{ActiveQuiz, ViewError};
pub use summary::SummaryPanel;
