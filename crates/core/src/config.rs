use crate::Tier;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const NEUTRAL_FACTION: &str = "Neutral";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyLimit {
    pub tier: Tier,
    pub limit: usize,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("draft sequence is empty")]
    EmptySequence,
    #[error("leader tier cannot appear in the keg sequence (step {0})")]
    LeaderInSequence(usize),
    #[error("no playable factions configured")]
    NoFactions,
    #[error("{what}: cannot pick {picks} of {offered}")]
    PicksExceedOffer {
        what: &'static str,
        picks: usize,
        offered: usize,
    },
    #[error("{0} must be greater than zero")]
    Zero(&'static str),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DraftConfig {
    pub neutral: String,
    pub factions: Vec<String>,
    pub sequence: Vec<Tier>,
    pub copy_limits: Vec<CopyLimit>,
    pub leader_choices: usize,
    pub leader_picks: usize,
    pub keg_size: usize,
    pub keg_picks: usize,
    pub faction_weight: usize,
    pub max_draw_attempts: u32,
}

impl Default for DraftConfig {
    fn default() -> Self {
        use Tier::{Bronze, Gold, Silver};
        Self {
            neutral: NEUTRAL_FACTION.to_string(),
            factions: [
                "Scoia'tael",
                "Nilfgaard",
                "Monster",
                "Northern Realms",
                "Skellige",
            ]
            .iter()
            .map(|name| name.to_string())
            .collect(),
            sequence: vec![
                Gold, Bronze, Bronze, Bronze, Silver, Bronze, Bronze, Bronze, Silver, Bronze,
                Bronze, Gold, Bronze, Bronze, Silver,
            ],
            copy_limits: vec![
                CopyLimit {
                    tier: Bronze,
                    limit: 3,
                },
                CopyLimit {
                    tier: Silver,
                    limit: 1,
                },
                CopyLimit {
                    tier: Gold,
                    limit: 1,
                },
            ],
            leader_choices: 4,
            leader_picks: 1,
            keg_size: 5,
            keg_picks: 2,
            faction_weight: 2,
            max_draw_attempts: 10_000,
        }
    }
}

impl DraftConfig {
    /// Deck-wide copy limit for a tier. `None` means unlimited.
    pub fn copy_limit(&self, tier: Tier) -> Option<usize> {
        self.copy_limits
            .iter()
            .find(|rule| rule.tier == tier)
            .map(|rule| rule.limit)
    }

    pub fn keg_count(&self) -> usize {
        self.sequence.len()
    }

    pub fn deck_size(&self) -> usize {
        self.leader_picks + self.keg_picks * self.keg_count()
    }

    /// Number of keg picks the plan makes from `tier`.
    pub fn picks_of(&self, tier: Tier) -> usize {
        self.sequence.iter().filter(|step| **step == tier).count() * self.keg_picks
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sequence.is_empty() {
            return Err(ConfigError::EmptySequence);
        }
        if let Some(idx) = self.sequence.iter().position(|tier| *tier == Tier::Leader) {
            return Err(ConfigError::LeaderInSequence(idx));
        }
        if self.factions.is_empty() {
            return Err(ConfigError::NoFactions);
        }
        for (what, value) in [
            ("leader_choices", self.leader_choices),
            ("leader_picks", self.leader_picks),
            ("keg_size", self.keg_size),
            ("keg_picks", self.keg_picks),
            ("faction_weight", self.faction_weight),
            ("max_draw_attempts", self.max_draw_attempts as usize),
        ] {
            if value == 0 {
                return Err(ConfigError::Zero(what));
            }
        }
        if self.leader_picks > self.leader_choices {
            return Err(ConfigError::PicksExceedOffer {
                what: "leader step",
                picks: self.leader_picks,
                offered: self.leader_choices,
            });
        }
        if self.keg_picks > self.keg_size {
            return Err(ConfigError::PicksExceedOffer {
                what: "keg step",
                picks: self.keg_picks,
                offered: self.keg_size,
            });
        }
        Ok(())
    }
}
