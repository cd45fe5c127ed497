use dioxus::prelude::*;

use quiz_core::model::{ConfigError, SessionConfigDraft};
use services::QuizError;

use crate::vm::QuizVm;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    Config(ConfigError),
    NoActiveQuiz,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::Config(err) => err.to_string(),
            ViewError::NoActiveQuiz => "No quiz in progress.".to_string(),
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::Config(err) => ViewError::Config(err),
            _ => ViewError::Unknown,
        }
    }
}

/// The quiz in play and the form that starts the next one.
///
/// Lives at the app root so both routes see the same session.
#[derive(Clone, Copy)]
pub struct ActiveQuiz {
    pub vm: Signal<Option<QuizVm>>,
    pub draft: Signal<SessionConfigDraft>,
}

impl ActiveQuiz {
    #[must_use]
    pub fn new(initial: Option<QuizVm>) -> Self {
        Self {
            vm: Signal::new(initial),
            draft: Signal::new(SessionConfigDraft::default()),
        }
    }
}
