use serde::{Deserialize, Serialize};

/// A single question/answer pair. Cards never change after generation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    question: String,
    answer: String,
}

impl Card {
    #[must_use]
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }

    #[must_use]
    pub fn question(&self) -> &str {
        &self.question
    }

    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Whether a typed answer counts as correct for this card.
    ///
    /// Comparison ignores case and surrounding whitespace on both sides.
    #[must_use]
    pub fn accepts(&self, typed: &str) -> bool {
        normalize(typed) == normalize(&self.answer)
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}
