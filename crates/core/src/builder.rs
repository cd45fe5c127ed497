//! Deck generation for a validated `SessionConfig`.
//!
//! Card content is a positional placeholder; there is no content source behind it.

use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::{Card, Deck, SessionConfig};

/// Build a shuffled deck using the thread-local RNG.
#[must_use]
pub fn build(config: &SessionConfig) -> Deck {
    build_with_rng(config, &mut rand::rng())
}

/// Build a shuffled deck with a caller-provided RNG.
#[must_use]
pub fn build_with_rng<R: Rng + ?Sized>(config: &SessionConfig, rng: &mut R) -> Deck {
    let mut cards = generate(config);
    cards.shuffle(rng);
    Deck::from_generated(cards)
}

/// The unshuffled cards for a config, in generation order.
#[must_use]
pub fn generate(config: &SessionConfig) -> Vec<Card> {
    (1..=config.question_count())
        .map(|position| placeholder_card(config, position))
        .collect()
}

fn placeholder_card(config: &SessionConfig, position: u32) -> Card {
    Card::new(
        format!(
            "Q{position} on {} ({})",
            config.topic(),
            config.difficulty()
        ),
        format!("Answer {position}"),
    )
}
