use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Card;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeckError {
    #[error("a deck needs at least one card")]
    Empty,
}

/// Ordered, non-empty sequence of cards for one session.
///
/// The order is fixed when the deck is built. A deck is replaced wholesale on
/// regeneration and never edited card by card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Card>", into = "Vec<Card>")]
pub struct Deck {
    cards: Vec<Card>,
}

impl TryFrom<Vec<Card>> for Deck {
    type Error = DeckError;

    fn try_from(cards: Vec<Card>) -> Result<Self, Self::Error> {
        Self::new(cards)
    }
}

impl From<Deck> for Vec<Card> {
    fn from(deck: Deck) -> Self {
        deck.cards
    }
}

impl Deck {
    /// # Errors
    ///
    /// Returns `DeckError::Empty` if `cards` is empty.
    pub fn new(cards: Vec<Card>) -> Result<Self, DeckError> {
        if cards.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(Self { cards })
    }

    /// `SessionConfig` never allows zero questions, so generated decks are non-empty.
    pub(crate) fn from_generated(cards: Vec<Card>) -> Self {
        debug_assert!(!cards.is_empty());
        Self { cards }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_deck_is_rejected() {
        assert_eq!(Deck::new(Vec::new()).unwrap_err(), DeckError::Empty);
    }

    #[test]
    fn deck_keeps_order() {
        let deck = Deck::new(vec![Card::new("a", "1"), Card::new("b", "2")]).unwrap();
        assert_eq!(deck.len(), 2);
        assert!(!deck.is_empty());
        assert_eq!(deck.get(1).unwrap().question(), "b");
        assert!(deck.get(2).is_none());
    }

    #[test]
    fn deck_serializes_as_plain_list() {
        let deck = Deck::new(vec![Card::new("a", "1")]).unwrap();
        let json = serde_json::to_string(&deck).unwrap();
        assert_eq!(json, r#"[{"question":"a","answer":"1"}]"#);
    }

    #[test]
    fn empty_list_does_not_deserialize() {
        let err = serde_json::from_str::<Deck>("[]").unwrap_err();
        assert!(err.to_string().contains("at least one card"));
    }
}
