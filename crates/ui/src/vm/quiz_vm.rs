use quiz_core::model::{SessionConfigDraft, SessionSummary};
use quiz_core::session::{QuizSession, SessionAction, Timer};
use services::QuizLoopService;

use crate::views::ViewError;
use crate::vm::time_fmt::format_elapsed;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardFace {
    Question,
    Answer,
}

/// Everything the quiz page shows for a card in play.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveCardVm {
    pub score_label: String,
    pub score_flash: bool,
    pub progress_label: String,
    pub progress_percent: f64,
    pub face: CardFace,
    pub face_text: String,
    pub input_locked: bool,
    pub awaiting_typed_answer: bool,
    pub typed_answer: String,
    pub can_submit: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SummaryVm {
    pub known: u32,
    pub unknown: u32,
    pub score_label: String,
    pub elapsed_label: String,
    pub celebrates: bool,
}

impl From<&SessionSummary> for SummaryVm {
    fn from(summary: &SessionSummary) -> Self {
        Self {
            known: summary.known(),
            unknown: summary.unknown(),
            score_label: score_label(summary),
            elapsed_label: summary
                .elapsed()
                .map_or_else(|| "--".to_string(), format_elapsed),
            celebrates: summary.celebrates(),
        }
    }
}

/// Score truncated to tenths, so the label never reads above the
/// celebration threshold when the score is below it.
fn score_label(summary: &SessionSummary) -> String {
    let answered = u64::from(summary.answered());
    if answered == 0 {
        return "0%".to_string();
    }
    let tenths = u64::from(summary.known()) * 1000 / answered;
    if tenths % 10 == 0 {
        format!("{}%", tenths / 10)
    } else {
        format!("{}.{}%", tenths / 10, tenths % 10)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum QuizScreen {
    Active(ActiveCardVm),
    Complete(SummaryVm),
}

pub struct QuizVm {
    session: QuizSession,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self { session }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    #[must_use]
    pub fn into_session(self) -> QuizSession {
        self.session
    }

    /// Apply an action and return the timers the caller must schedule.
    pub fn dispatch(&mut self, quiz_loop: &QuizLoopService, action: SessionAction) -> Vec<Timer> {
        quiz_loop.apply(&mut self.session, action).into_timers()
    }

    /// Feed a fired timer back and return any follow-up timers.
    pub fn fire(&mut self, quiz_loop: &QuizLoopService, timer: &Timer) -> Vec<Timer> {
        quiz_loop.fire(&mut self.session, timer).into_timers()
    }

    #[must_use]
    pub fn screen(&self) -> QuizScreen {
        let session = &self.session;
        let Some(card) = session.current_card() else {
            return QuizScreen::Complete(SummaryVm::from(&session.summary()));
        };

        let known = session.known_count();
        let answered = known.saturating_add(session.unknown_count());
        let position = session.current_index() + 1;
        let total = session.total_cards();
        let (face, face_text) = if session.revealed() {
            (CardFace::Answer, card.answer())
        } else {
            (CardFace::Question, card.question())
        };
        let typed_answer = session.typed_answer().to_string();

        QuizScreen::Active(ActiveCardVm {
            score_label: format!("Score: {known} / {answered}"),
            score_flash: session.score_flash(),
            progress_label: format!("Question Card {position} of {total}"),
            progress_percent: progress_percent(position, total),
            face,
            face_text: face_text.to_string(),
            input_locked: session.input_locked(),
            awaiting_typed_answer: session.awaiting_typed_answer(),
            can_submit: session.awaiting_typed_answer()
                && !session.input_locked()
                && !typed_answer.trim().is_empty(),
            typed_answer,
        })
    }
}

#[allow(clippy::cast_precision_loss)]
fn progress_percent(position: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    position as f64 / total as f64 * 100.0
}

/// Start a session from the form and wrap it for the quiz page.
///
/// # Errors
///
/// Returns `ViewError::Config` when the draft does not validate.
pub fn submit_draft(
    quiz_loop: &QuizLoopService,
    draft: &SessionConfigDraft,
) -> Result<QuizVm, ViewError> {
    let session = quiz_loop.start_from_draft(draft)?;
    Ok(QuizVm::new(session))
}
