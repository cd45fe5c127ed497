use chrono::{DateTime, Duration, Utc};

/// Minimum score percentage that earns the celebration on the summary screen.
pub const CELEBRATION_THRESHOLD: f64 = 90.0;

/// End-of-session result.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    known: u32,
    unknown: u32,
    started_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl SessionSummary {
    #[must_use]
    pub fn new(
        known: u32,
        unknown: u32,
        started_at: DateTime<Utc>,
        completed_at: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            known,
            unknown,
            started_at,
            completed_at,
        }
    }

    #[must_use]
    pub fn known(&self) -> u32 {
        self.known
    }

    #[must_use]
    pub fn unknown(&self) -> u32 {
        self.unknown
    }

    #[must_use]
    pub fn answered(&self) -> u32 {
        self.known.saturating_add(self.unknown)
    }

    /// `known / (known + unknown) * 100`, or `None` when nothing was answered.
    #[must_use]
    pub fn score_percent(&self) -> Option<f64> {
        let answered = self.answered();
        if answered == 0 {
            return None;
        }
        Some(f64::from(self.known) / f64::from(answered) * 100.0)
    }

    #[must_use]
    pub fn celebrates(&self) -> bool {
        self.score_percent()
            .is_some_and(|score| score >= CELEBRATION_THRESHOLD)
    }

    #[must_use]
    pub fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    #[must_use]
    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Wall time between start and completion, if the session finished.
    #[must_use]
    pub fn elapsed(&self) -> Option<Duration> {
        self.completed_at
            .map(|completed| completed - self.started_at)
            .filter(|elapsed| *elapsed >= Duration::zero())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn summary(known: u32, unknown: u32) -> SessionSummary {
        SessionSummary::new(known, unknown, fixed_now(), Some(fixed_now()))
    }

    #[test]
    fn nine_of_ten_celebrates() {
        let s = summary(9, 1);
        assert_eq!(s.score_percent(), Some(90.0));
        assert!(s.celebrates());
    }

    #[test]
    fn eight_of_ten_does_not_celebrate() {
        let s = summary(8, 2);
        assert_eq!(s.score_percent(), Some(80.0));
        assert!(!s.celebrates());
    }

    #[test]
    fn empty_summary_has_no_score() {
        let s = summary(0, 0);
        assert_eq!(s.score_percent(), None);
        assert!(!s.celebrates());
    }

    #[test]
    fn perfect_run_is_one_hundred() {
        assert_eq!(summary(3, 0).score_percent(), Some(100.0));
    }

    #[test]
    fn elapsed_requires_completion() {
        let start = fixed_now();
        let open = SessionSummary::new(1, 0, start, None);
        assert_eq!(open.elapsed(), None);

        let done = SessionSummary::new(1, 0, start, Some(start + Duration::seconds(75)));
        assert_eq!(done.elapsed(), Some(Duration::seconds(75)));
    }
}
