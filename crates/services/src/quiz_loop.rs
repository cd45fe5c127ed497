use std::sync::atomic::{AtomicU64, Ordering};

use quiz_core::builder;
use quiz_core::model::{SessionConfig, SessionConfigDraft, SessionId, SessionSnapshot};
use quiz_core::session::{QuizSession, SessionAction, SessionTimings, Step, Timer};

use crate::Clock;
use crate::error::QuizError;
use crate::snapshot_writer::SnapshotWriter;

/// Orchestrates session start, action dispatch and snapshot commits.
pub struct QuizLoopService {
    clock: Clock,
    timings: SessionTimings,
    snapshots: SnapshotWriter,
    next_id: AtomicU64,
}

impl QuizLoopService {
    #[must_use]
    pub fn new(clock: Clock, snapshots: SnapshotWriter) -> Self {
        Self {
            clock,
            timings: SessionTimings::default(),
            snapshots,
            next_id: AtomicU64::new(1),
        }
    }

    #[must_use]
    pub fn with_timings(mut self, timings: SessionTimings) -> Self {
        self.timings = timings;
        self
    }

    /// Validate raw form input and start a session from it.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Config` when the draft does not validate; no deck is built.
    pub fn start_from_draft(&self, draft: &SessionConfigDraft) -> Result<QuizSession, QuizError> {
        let config = draft.validate()?;
        Ok(self.start(config))
    }

    /// Build a fresh deck and session for a validated config.
    #[must_use]
    pub fn start(&self, config: SessionConfig) -> QuizSession {
        let id = SessionId::new(self.next_id.fetch_add(1, Ordering::Relaxed));
        let deck = builder::build(&config);
        tracing::info!(
            session = %id,
            topic = config.topic(),
            questions = config.question_count(),
            difficulty = %config.difficulty(),
            "quiz session started"
        );
        let session = QuizSession::new(id, config, deck, self.timings, self.clock.now());
        self.commit(&session);
        session
    }

    /// Apply a user action and commit a snapshot when progress changed.
    pub fn apply(&self, session: &mut QuizSession, action: SessionAction) -> Step {
        let before = progress(session);
        let step = session.apply(action);
        if step.is_applied() {
            tracing::debug!(session = %session.id(), phase = session.phase().name(), "action applied");
            self.after_change(session, before);
        }
        step
    }

    /// Feed a fired timer back into the session.
    pub fn fire(&self, session: &mut QuizSession, timer: &Timer) -> Step {
        let before = progress(session);
        let step = session.fire(timer.token(), self.clock.now());
        if step.is_applied() {
            tracing::debug!(
                session = %session.id(),
                kind = ?timer.kind(),
                phase = session.phase().name(),
                "timer fired"
            );
            self.after_change(session, before);
        } else {
            tracing::debug!(kind = ?timer.kind(), "stale timer ignored");
        }
        step
    }

    /// Discard a session, clear the stored progress, and return a form draft
    /// prefilled with its config.
    #[must_use]
    pub fn restart(&self, session: QuizSession) -> SessionConfigDraft {
        tracing::info!(
            session = %session.id(),
            finished = session.is_finished(),
            "quiz session discarded"
        );
        self.snapshots.submit(SessionSnapshot::cleared(self.clock.now()));
        let config = session.config();
        SessionConfigDraft {
            topic: config.topic().to_string(),
            question_count: config.question_count().to_string(),
            difficulty: config.difficulty(),
        }
    }

    /// Wait for queued snapshot writes.
    pub async fn flush(&self) {
        self.snapshots.flush().await;
    }

    fn after_change(&self, session: &QuizSession, before: Progress) {
        if progress(session) == before {
            return;
        }
        if session.is_finished() {
            let summary = session.summary();
            tracing::info!(
                session = %session.id(),
                known = summary.known(),
                unknown = summary.unknown(),
                "quiz session finished"
            );
        }
        self.commit(session);
    }

    fn commit(&self, session: &QuizSession) {
        self.snapshots.submit(session.snapshot(self.clock.now()));
    }
}

type Progress = (usize, u32, u32, bool);

fn progress(session: &QuizSession) -> Progress {
    (
        session.current_index(),
        session.known_count(),
        session.unknown_count(),
        session.is_finished(),
    )
}
