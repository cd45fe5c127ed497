use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::Card;

/// Storage key for the progress snapshot.
pub const SNAPSHOT_KEY: &str = "flashcardProgress";

/// Mirror of the live session, written after every committed change.
///
/// Nothing reads it back into a running session. `deck` is empty only in a
/// cleared snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub current_index: usize,
    pub known_count: u32,
    pub unknown_count: u32,
    pub deck: Vec<Card>,
    pub saved_at: DateTime<Utc>,
}

impl SessionSnapshot {
    /// Progress with no session behind it.
    #[must_use]
    pub fn cleared(saved_at: DateTime<Utc>) -> Self {
        Self {
            current_index: 0,
            known_count: 0,
            unknown_count: 0,
            deck: Vec::new(),
            saved_at,
        }
    }
}
