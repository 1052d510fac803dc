//! The in-memory card collection.

use crate::card::Card;

/// Cards in the order the server returned them.
///
/// A deck is only ever replaced wholesale; there is no API for patching
/// individual cards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Card> {
        self.cards.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Largest valid index, or `None` for an empty deck.
    pub fn last_index(&self) -> Option<usize> {
        self.cards.len().checked_sub(1)
    }

    /// Clamps `index` into the deck's valid range (0 when empty).
    pub fn clamp(&self, index: usize) -> usize {
        self.last_index().map_or(0, |last| index.min(last))
    }
}

impl From<Vec<Card>> for Deck {
    fn from(cards: Vec<Card>) -> Self {
        Self { cards }
    }
}

impl FromIterator<Card> for Deck {
    fn from_iter<I: IntoIterator<Item = Card>>(iter: I) -> Self {
        Self {
            cards: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp() {
        let deck: Deck = (0..3usize).map(|i| Card::new(i, "f", "b")).collect();
        assert_eq!(deck.clamp(0), 0);
        assert_eq!(deck.clamp(2), 2);
        assert_eq!(deck.clamp(10), 2);
        assert_eq!(Deck::new().clamp(5), 0);
        assert_eq!(Deck::new().last_index(), None);
    }
}
