//! Quiz session state machine.
//!
//! All transitions are synchronous. Delayed transitions are returned to the
//! caller as [`Timer`]s; the caller sleeps and hands the token back through
//! [`QuizSession::fire`]. A session only honours the token it is currently
//! waiting on, so timers from an older session or a superseded wait are no-ops.

use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;

use crate::model::{Card, Deck, SessionConfig, SessionId, SessionSnapshot, SessionSummary};

//
// ─── TIMINGS ───────────────────────────────────────────────────────────────────
//

/// Delays for the timed parts of a card resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionTimings {
    /// Submitted answer is shown before it is graded.
    pub grade_delay: Duration,
    /// Pause between grading and moving to the next card.
    pub settle_delay: Duration,
    /// How long the answer stays visible after "Don't Know".
    pub dont_know_delay: Duration,
    /// How long the score badge stays highlighted after a correct answer.
    pub score_flash: Duration,
}

impl Default for SessionTimings {
    fn default() -> Self {
        Self {
            grade_delay: Duration::from_millis(800),
            settle_delay: Duration::from_millis(500),
            dont_know_delay: Duration::from_millis(2500),
            score_flash: Duration::from_millis(300),
        }
    }
}

impl SessionTimings {
    /// Zero delays. Timers still have to be fired.
    #[must_use]
    pub fn immediate() -> Self {
        Self {
            grade_delay: Duration::ZERO,
            settle_delay: Duration::ZERO,
            dont_know_delay: Duration::ZERO,
            score_flash: Duration::ZERO,
        }
    }
}

//
// ─── TIMERS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    session: SessionId,
    seq: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerKind {
    Grade,
    Advance,
    ClearScoreFlash,
}

/// A delayed transition the caller must schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timer {
    token: TimerToken,
    kind: TimerKind,
    delay: Duration,
}

impl Timer {
    #[must_use]
    pub fn token(&self) -> TimerToken {
        self.token
    }

    #[must_use]
    pub fn kind(&self) -> TimerKind {
        self.kind
    }

    #[must_use]
    pub fn delay(&self) -> Duration {
        self.delay
    }
}

//
// ─── ACTIONS ───────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Enter,
    ArrowRight,
    ArrowLeft,
}

impl KeyCommand {
    /// Map a DOM `KeyboardEvent.key` name.
    #[must_use]
    pub fn from_key_name(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(KeyCommand::Enter),
            "ArrowRight" => Some(KeyCommand::ArrowRight),
            "ArrowLeft" => Some(KeyCommand::ArrowLeft),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    Flip,
    Know,
    DontKnow,
    ChangeAnswer(String),
    SubmitAnswer,
    Key(KeyCommand),
}

/// What an action or timer did to the session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Step {
    applied: bool,
    timers: Vec<Timer>,
}

impl Step {
    fn ignored() -> Self {
        Self::default()
    }

    fn applied() -> Self {
        Self {
            applied: true,
            timers: Vec::new(),
        }
    }

    fn with_timer(mut self, timer: Timer) -> Self {
        self.timers.push(timer);
        self
    }

    /// True when session state changed.
    #[must_use]
    pub fn is_applied(&self) -> bool {
        self.applied
    }

    #[must_use]
    pub fn timers(&self) -> &[Timer] {
        &self.timers
    }

    #[must_use]
    pub fn into_timers(self) -> Vec<Timer> {
        self.timers
    }
}

//
// ─── PHASES ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GradingStage {
    /// Answer submitted and shown; waiting for the grade timer.
    Pending { typed: String },
    /// Graded; waiting to move on.
    Resolved { correct: bool },
}

/// Where the current card is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardPhase {
    Unrevealed { flipped: bool },
    AwaitingTypedAnswer { typed: String },
    Grading(GradingStage),
    DontKnowGrading,
    Complete,
}

impl CardPhase {
    #[must_use]
    pub fn revealed(&self) -> bool {
        match self {
            CardPhase::Unrevealed { flipped } => *flipped,
            CardPhase::Grading(GradingStage::Pending { .. }) | CardPhase::DontKnowGrading => true,
            CardPhase::AwaitingTypedAnswer { .. }
            | CardPhase::Grading(GradingStage::Resolved { .. })
            | CardPhase::Complete => false,
        }
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        matches!(self, CardPhase::Grading(_) | CardPhase::DontKnowGrading)
    }

    #[must_use]
    pub fn awaiting_typed_answer(&self) -> bool {
        matches!(self, CardPhase::AwaitingTypedAnswer { .. })
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        matches!(self, CardPhase::Complete)
    }

    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            CardPhase::Unrevealed { .. } => "unrevealed",
            CardPhase::AwaitingTypedAnswer { .. } => "awaiting_typed_answer",
            CardPhase::Grading(GradingStage::Pending { .. }) => "grading",
            CardPhase::Grading(GradingStage::Resolved { .. }) => "graded",
            CardPhase::DontKnowGrading => "dont_know",
            CardPhase::Complete => "complete",
        }
    }
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

pub struct QuizSession {
    id: SessionId,
    config: SessionConfig,
    deck: Deck,
    timings: SessionTimings,
    current: usize,
    phase: CardPhase,
    known: u32,
    unknown: u32,
    score_flash: bool,
    /// The timer that ends the current locked period.
    lock_timer: Option<TimerToken>,
    flash_timer: Option<TimerToken>,
    next_seq: u64,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl QuizSession {
    #[must_use]
    pub fn new(
        id: SessionId,
        config: SessionConfig,
        deck: Deck,
        timings: SessionTimings,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            config,
            deck,
            timings,
            current: 0,
            phase: CardPhase::Unrevealed { flipped: false },
            known: 0,
            unknown: 0,
            score_flash: false,
            lock_timer: None,
            flash_timer: None,
            next_seq: 0,
            started_at,
            completed_at: None,
        }
    }

    #[must_use]
    pub fn id(&self) -> SessionId {
        self.id
    }

    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn phase(&self) -> &CardPhase {
        &self.phase
    }

    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.deck.len()
    }

    /// The card on screen, or `None` once the session is complete.
    #[must_use]
    pub fn current_card(&self) -> Option<&Card> {
        if self.phase.is_complete() {
            return None;
        }
        self.deck.get(self.current)
    }

    #[must_use]
    pub fn known_count(&self) -> u32 {
        self.known
    }

    #[must_use]
    pub fn unknown_count(&self) -> u32 {
        self.unknown
    }

    #[must_use]
    pub fn score_flash(&self) -> bool {
        self.score_flash
    }

    #[must_use]
    pub fn revealed(&self) -> bool {
        self.phase.revealed()
    }

    #[must_use]
    pub fn input_locked(&self) -> bool {
        self.phase.input_locked()
    }

    #[must_use]
    pub fn awaiting_typed_answer(&self) -> bool {
        self.phase.awaiting_typed_answer()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.phase.is_complete()
    }

    /// Text in the answer field; empty outside `AwaitingTypedAnswer`.
    #[must_use]
    pub fn typed_answer(&self) -> &str {
        match &self.phase {
            CardPhase::AwaitingTypedAnswer { typed } => typed,
            _ => "",
        }
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    #[must_use]
    pub fn summary(&self) -> SessionSummary {
        SessionSummary::new(self.known, self.unknown, self.started_at, self.completed_at)
    }

    #[must_use]
    pub fn snapshot(&self, saved_at: DateTime<Utc>) -> SessionSnapshot {
        SessionSnapshot {
            current_index: self.current,
            known_count: self.known,
            unknown_count: self.unknown,
            deck: self.deck.cards().to_vec(),
            saved_at,
        }
    }

    /// Apply a user action. Actions that are not allowed in the current phase
    /// return an ignored step.
    pub fn apply(&mut self, action: SessionAction) -> Step {
        match action {
            SessionAction::Flip => self.flip(),
            SessionAction::Know => self.know(),
            SessionAction::DontKnow => self.dont_know(),
            SessionAction::ChangeAnswer(text) => self.change_answer(text),
            SessionAction::SubmitAnswer => self.submit_answer(),
            SessionAction::Key(key) => self.key(key),
        }
    }

    pub fn flip(&mut self) -> Step {
        match &mut self.phase {
            CardPhase::Unrevealed { flipped } => {
                *flipped = !*flipped;
                Step::applied()
            }
            _ => Step::ignored(),
        }
    }

    pub fn know(&mut self) -> Step {
        if !matches!(self.phase, CardPhase::Unrevealed { .. }) {
            return Step::ignored();
        }
        self.phase = CardPhase::AwaitingTypedAnswer {
            typed: String::new(),
        };
        Step::applied()
    }

    pub fn dont_know(&mut self) -> Step {
        if !matches!(self.phase, CardPhase::Unrevealed { .. }) {
            return Step::ignored();
        }
        self.phase = CardPhase::DontKnowGrading;
        self.unknown = self.unknown.saturating_add(1);
        let timer = self.lock(TimerKind::Advance, self.timings.dont_know_delay);
        Step::applied().with_timer(timer)
    }

    pub fn change_answer(&mut self, text: impl Into<String>) -> Step {
        match &mut self.phase {
            CardPhase::AwaitingTypedAnswer { typed } => {
                *typed = text.into();
                Step::applied()
            }
            _ => Step::ignored(),
        }
    }

    pub fn submit_answer(&mut self) -> Step {
        let CardPhase::AwaitingTypedAnswer { typed } = &mut self.phase else {
            return Step::ignored();
        };
        if typed.trim().is_empty() {
            return Step::ignored();
        }
        let typed = std::mem::take(typed);
        self.phase = CardPhase::Grading(GradingStage::Pending { typed });
        let timer = self.lock(TimerKind::Grade, self.timings.grade_delay);
        Step::applied().with_timer(timer)
    }

    /// Keyboard shortcuts: Enter submits while typing, arrows mirror
    /// Know/Don't Know otherwise. Disabled while locked and once complete.
    pub fn key(&mut self, key: KeyCommand) -> Step {
        if self.phase.is_complete() || self.phase.input_locked() {
            return Step::ignored();
        }
        let awaiting = self.phase.awaiting_typed_answer();
        match key {
            KeyCommand::Enter if awaiting => self.submit_answer(),
            KeyCommand::ArrowRight if !awaiting => self.know(),
            KeyCommand::ArrowLeft if !awaiting => self.dont_know(),
            _ => Step::ignored(),
        }
    }

    /// Run the transition a timer was scheduled for.
    pub fn fire(&mut self, token: TimerToken, now: DateTime<Utc>) -> Step {
        if token.session != self.id {
            return Step::ignored();
        }
        if self.flash_timer == Some(token) {
            self.flash_timer = None;
            self.score_flash = false;
            return Step::applied();
        }
        if self.lock_timer != Some(token) {
            return Step::ignored();
        }
        self.lock_timer = None;

        match &self.phase {
            CardPhase::Grading(GradingStage::Pending { typed }) => {
                let correct = self
                    .deck
                    .get(self.current)
                    .is_some_and(|card| card.accepts(typed));
                self.resolve(correct)
            }
            CardPhase::Grading(GradingStage::Resolved { .. }) | CardPhase::DontKnowGrading => {
                self.advance(now);
                Step::applied()
            }
            CardPhase::Unrevealed { .. }
            | CardPhase::AwaitingTypedAnswer { .. }
            | CardPhase::Complete => Step::ignored(),
        }
    }

    fn resolve(&mut self, correct: bool) -> Step {
        let mut step = Step::applied();
        if correct {
            self.known = self.known.saturating_add(1);
            self.score_flash = true;
            let flash = self.next_timer(TimerKind::ClearScoreFlash, self.timings.score_flash);
            self.flash_timer = Some(flash.token);
            step = step.with_timer(flash);
        } else {
            self.unknown = self.unknown.saturating_add(1);
        }
        self.phase = CardPhase::Grading(GradingStage::Resolved { correct });
        let advance = self.lock(TimerKind::Advance, self.timings.settle_delay);
        step.with_timer(advance)
    }

    fn advance(&mut self, now: DateTime<Utc>) {
        if self.current + 1 < self.deck.len() {
            self.current += 1;
            self.phase = CardPhase::Unrevealed { flipped: false };
        } else {
            self.phase = CardPhase::Complete;
            self.completed_at = Some(now);
        }
    }

    fn lock(&mut self, kind: TimerKind, delay: Duration) -> Timer {
        let timer = self.next_timer(kind, delay);
        self.lock_timer = Some(timer.token);
        timer
    }

    fn next_timer(&mut self, kind: TimerKind, delay: Duration) -> Timer {
        let token = TimerToken {
            session: self.id,
            seq: self.next_seq,
        };
        self.next_seq = self.next_seq.wrapping_add(1);
        Timer { token, kind, delay }
    }
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("id", &self.id)
            .field("deck_len", &self.deck.len())
            .field("current", &self.current)
            .field("phase", &self.phase.name())
            .field("known", &self.known)
            .field("unknown", &self.unknown)
            .field("lock_timer", &self.lock_timer)
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
