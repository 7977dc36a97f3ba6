use crate::AutoplayError;
use kegdraft_core::{Catalog, DraftConfig, DraftError, KegError, Pool, RngState, Tier};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrequencyReport {
    pub faction: String,
    pub tier: Tier,
    pub runs: u32,
    /// Draw count per card name.
    pub counts: BTreeMap<String, u64>,
    pub faction_names: usize,
    pub neutral_names: usize,
    pub faction_draws: u64,
    pub neutral_draws: u64,
}

impl FrequencyReport {
    pub fn faction_per_card(&self) -> f64 {
        per_card(self.faction_draws, self.faction_names)
    }

    pub fn neutral_per_card(&self) -> f64 {
        per_card(self.neutral_draws, self.neutral_names)
    }

    /// How much more often an average faction card is drawn than an average neutral card.
    pub fn weight_ratio(&self) -> Option<f64> {
        let neutral = self.neutral_per_card();
        (neutral > 0.0).then(|| self.faction_per_card() / neutral)
    }
}

fn per_card(draws: u64, names: usize) -> f64 {
    if names == 0 {
        0.0
    } else {
        draws as f64 / names as f64
    }
}

/// Derives the pool for `faction` `runs` times and makes `keg_size` uniform draws
/// from its `tier` cards each time, before any copy limit is applied.
pub fn offer_frequencies(
    config: &DraftConfig,
    catalog: &Catalog,
    faction: &str,
    tier: Tier,
    runs: u32,
    seed: u64,
) -> Result<FrequencyReport, AutoplayError> {
    if catalog.cards(faction, Tier::Leader).is_empty() {
        return Err(AutoplayError::UnknownFaction(faction.to_string()));
    }
    let mut rng = RngState::from_seed(seed);
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    let mut faction_draws = 0;
    let mut neutral_draws = 0;
    for _ in 0..runs {
        let pool = Pool::derive(catalog, config, faction);
        let cards = pool.tier(tier);
        if cards.is_empty() {
            return Err(DraftError::from(KegError::EmptyPool(tier)).into());
        }
        for _ in 0..config.keg_size {
            let card = &cards[rng.below(cards.len())];
            if card.faction == faction {
                faction_draws += 1;
            } else {
                neutral_draws += 1;
            }
            *counts.entry(card.name.clone()).or_insert(0) += 1;
        }
    }
    Ok(FrequencyReport {
        faction: faction.to_string(),
        tier,
        runs,
        counts,
        faction_names: catalog.distinct_names(faction, tier),
        neutral_names: catalog.distinct_names(&config.neutral, tier),
        faction_draws,
        neutral_draws,
    })
}
