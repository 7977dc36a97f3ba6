use crate::{count_named, Card, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Append-only list of drafted cards, in pick order.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decklist {
    cards: Vec<Card>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckEntry {
    pub card: Card,
    pub count: usize,
}

impl Decklist {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_all(&mut self, cards: &[Card]) {
        self.cards.extend_from_slice(cards);
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn count(&self, name: &str) -> usize {
        count_named(&self.cards, name)
    }

    pub fn leader(&self) -> Option<&Card> {
        self.cards.iter().find(|card| card.is_leader())
    }

    pub fn tier_counts(&self) -> BTreeMap<Tier, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.tier).or_insert(0) += 1;
        }
        counts
    }

    /// One entry per distinct name, leader first, then gold, silver, bronze.
    /// Names within a tier keep the order they were first drafted in.
    pub fn summary(&self) -> Vec<DeckEntry> {
        let mut entries: Vec<DeckEntry> = Vec::new();
        for card in &self.cards {
            match entries.iter_mut().find(|entry| entry.card.name == card.name) {
                Some(entry) => entry.count += 1,
                None => entries.push(DeckEntry {
                    card: card.clone(),
                    count: 1,
                }),
            }
        }
        entries.sort_by_key(|entry| entry.card.tier.display_rank());
        entries
    }
}
