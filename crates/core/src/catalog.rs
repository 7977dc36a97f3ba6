use crate::{Card, Tier};
use std::collections::BTreeMap;

/// Read-only card catalog keyed by faction, then tier.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    factions: BTreeMap<String, BTreeMap<Tier, Vec<Card>>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a catalog from a flat card list, grouping on each card's faction and tier.
    pub fn from_cards(cards: impl IntoIterator<Item = Card>) -> Self {
        let mut catalog = Self::new();
        for card in cards {
            catalog.insert(card);
        }
        catalog
    }

    pub fn insert(&mut self, card: Card) {
        self.factions
            .entry(card.faction.clone())
            .or_default()
            .entry(card.tier)
            .or_default()
            .push(card);
    }

    pub fn cards(&self, faction: &str, tier: Tier) -> &[Card] {
        self.factions
            .get(faction)
            .and_then(|tiers| tiers.get(&tier))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn has_faction(&self, faction: &str) -> bool {
        self.factions.contains_key(faction)
    }

    /// Leader cards of the given factions, flattened in faction order.
    pub fn leaders<'a>(&'a self, factions: &[String]) -> Vec<&'a Card> {
        factions
            .iter()
            .flat_map(|faction| self.cards(faction, Tier::Leader))
            .collect()
    }

    /// Distinct card names of a faction's tier.
    pub fn distinct_names(&self, faction: &str, tier: Tier) -> usize {
        let mut names: Vec<&str> = self
            .cards(faction, tier)
            .iter()
            .map(|card| card.name.as_str())
            .collect();
        names.sort_unstable();
        names.dedup();
        names.len()
    }

    pub fn len(&self) -> usize {
        self.factions
            .values()
            .flat_map(|tiers| tiers.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
