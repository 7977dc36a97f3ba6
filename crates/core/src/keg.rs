use crate::{count_named, Card, Catalog, DraftConfig, RngState, Tier};
use log::{debug, warn};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KegError {
    #[error("no {0} cards in the pool")]
    EmptyPool(Tier),
    #[error("{tier} pool exhausted: accepted {accepted} cards after {attempts} draws")]
    PoolExhausted {
        tier: Tier,
        accepted: usize,
        attempts: u32,
    },
}

/// Weighted candidate cards per keg tier, fixed once a faction is chosen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Pool {
    tiers: BTreeMap<Tier, Vec<Card>>,
}

impl Pool {
    /// Neutral cards once, then the faction's cards `faction_weight` times, so a
    /// uniform draw favours faction cards by that factor.
    pub fn derive(catalog: &Catalog, config: &DraftConfig, faction: &str) -> Self {
        let mut tiers = BTreeMap::new();
        for tier in Tier::KEG_TIERS {
            let neutral = catalog.cards(&config.neutral, tier);
            let own = catalog.cards(faction, tier);
            let mut cards = Vec::with_capacity(neutral.len() + own.len() * config.faction_weight);
            cards.extend_from_slice(neutral);
            for _ in 0..config.faction_weight {
                cards.extend_from_slice(own);
            }
            tiers.insert(tier, cards);
        }
        Self { tiers }
    }

    pub fn tier(&self, tier: Tier) -> &[Card] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn sizes(&self) -> BTreeMap<Tier, usize> {
        self.tiers
            .iter()
            .map(|(tier, cards)| (*tier, cards.len()))
            .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KegRules {
    pub size: usize,
    /// Deck-wide copy limit. `None` disables the check.
    pub limit: Option<usize>,
    pub max_attempts: u32,
}

impl KegRules {
    pub fn for_tier(config: &DraftConfig, tier: Tier) -> Self {
        Self {
            size: config.keg_size,
            limit: config.copy_limit(tier),
            max_attempts: config.max_draw_attempts,
        }
    }
}

/// Draws cards uniformly with replacement from `pool`, keeping a draw only while
/// its name stays under the copy limit across `decklist` and the keg so far.
pub fn generate_keg(
    tier: Tier,
    pool: &[Card],
    decklist: &[Card],
    rules: KegRules,
    rng: &mut RngState,
) -> Result<Vec<Card>, KegError> {
    if pool.is_empty() {
        return Err(KegError::EmptyPool(tier));
    }
    let mut keg: Vec<Card> = Vec::with_capacity(rules.size);
    let mut attempts = 0u32;
    while keg.len() < rules.size {
        if attempts >= rules.max_attempts {
            warn!(
                "{tier} pool exhausted after {attempts} draws ({} of {} accepted)",
                keg.len(),
                rules.size
            );
            return Err(KegError::PoolExhausted {
                tier,
                accepted: keg.len(),
                attempts,
            });
        }
        attempts += 1;
        let card = &pool[rng.below(pool.len())];
        let eligible = match rules.limit {
            Some(limit) => {
                count_named(decklist, &card.name) + count_named(&keg, &card.name) < limit
            }
            None => true,
        };
        if eligible {
            keg.push(card.clone());
        }
    }
    debug!("{tier} keg filled in {attempts} draws");
    Ok(keg)
}
