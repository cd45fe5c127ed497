mod appearance;
mod card;
mod config;
mod deck;
mod ids;
mod snapshot;
mod summary;

pub use appearance::{APPEARANCE_KEY, Appearance, AppearanceError};
pub use card::Card;
pub use config::{
    ConfigError, Difficulty, MAX_QUESTION_COUNT, SessionConfig, SessionConfigDraft,
};
pub use deck::{Deck, DeckError};
pub use ids::SessionId;
pub use snapshot::{SNAPSHOT_KEY, SessionSnapshot};
pub use summary::{CELEBRATION_THRESHOLD, SessionSummary};
