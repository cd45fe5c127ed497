use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Upper bound for the number of cards in one session.
pub const MAX_QUESTION_COUNT: u32 = 50;

const DEFAULT_QUESTION_COUNT: u32 = 5;

//
// ─── DIFFICULTY ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Stable lowercase name, used in generated questions and form values.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(ConfigError::UnknownDifficulty { raw: s.to_string() }),
        }
    }
}

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

/// Configuration problems, worded for display next to the form.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Please enter a topic.")]
    BlankTopic,

    #[error("Number of questions must be at least 1.")]
    TooFewQuestions,

    #[error("Number of questions must be at most {max}.")]
    TooManyQuestions { max: u32 },

    #[error("Number of questions must be a whole number, got {raw:?}.")]
    InvalidQuestionCount { raw: String },

    #[error("Unknown difficulty {raw:?}.")]
    UnknownDifficulty { raw: String },
}

//
// ─── CONFIG ────────────────────────────────────────────────────────────────────
//

/// A validated quiz configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfig {
    topic: String,
    question_count: u32,
    difficulty: Difficulty,
}

impl SessionConfig {
    /// # Errors
    ///
    /// Returns `ConfigError::BlankTopic` when the topic is empty after trimming,
    /// and `TooFewQuestions`/`TooManyQuestions` when the count is outside
    /// `1..=MAX_QUESTION_COUNT`.
    pub fn new(
        topic: impl AsRef<str>,
        question_count: u32,
        difficulty: Difficulty,
    ) -> Result<Self, ConfigError> {
        let topic = topic.as_ref().trim();
        if topic.is_empty() {
            return Err(ConfigError::BlankTopic);
        }
        if question_count < 1 {
            return Err(ConfigError::TooFewQuestions);
        }
        if question_count > MAX_QUESTION_COUNT {
            return Err(ConfigError::TooManyQuestions {
                max: MAX_QUESTION_COUNT,
            });
        }
        Ok(Self {
            topic: topic.to_string(),
            question_count,
            difficulty,
        })
    }

    #[must_use]
    pub fn topic(&self) -> &str {
        &self.topic
    }

    #[must_use]
    pub fn question_count(&self) -> u32 {
        self.question_count
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

/// Raw form input, validated into a `SessionConfig` on submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionConfigDraft {
    pub topic: String,
    pub question_count: String,
    pub difficulty: Difficulty,
}

impl Default for SessionConfigDraft {
    fn default() -> Self {
        Self {
            topic: String::new(),
            question_count: DEFAULT_QUESTION_COUNT.to_string(),
            difficulty: Difficulty::default(),
        }
    }
}

impl SessionConfigDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns the first `ConfigError` found, checking the topic before the count.
    pub fn validate(&self) -> Result<SessionConfig, ConfigError> {
        if self.topic.trim().is_empty() {
            return Err(ConfigError::BlankTopic);
        }
        let count = parse_count(&self.question_count)?;
        SessionConfig::new(&self.topic, count, self.difficulty)
    }
}

fn parse_count(raw: &str) -> Result<u32, ConfigError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ConfigError::TooFewQuestions);
    }
    match trimmed.parse::<i64>() {
        Ok(value) if value < 1 => Err(ConfigError::TooFewQuestions),
        Ok(value) => u32::try_from(value).map_err(|_| ConfigError::TooManyQuestions {
            max: MAX_QUESTION_COUNT,
        }),
        Err(_) => Err(ConfigError::InvalidQuestionCount {
            raw: raw.to_string(),
        }),
    }
}
