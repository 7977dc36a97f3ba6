use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PickPolicy {
    /// Always take the leftmost offered cards.
    First,
    /// Uniformly random distinct slots.
    Random,
    /// Faction cards before neutral ones, then leftmost.
    FactionFirst,
}

impl PickPolicy {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "first" => Some(Self::First),
            "random" => Some(Self::Random),
            "faction" | "faction_first" => Some(Self::FactionFirst),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Random => "random",
            Self::FactionFirst => "faction",
        }
    }
}

#[derive(Debug, Clone)]
pub struct AutoplayConfig {
    pub seed: u64,
    pub policy: PickPolicy,
    /// Leader faction to steer the leader pick towards, when offered.
    pub faction: Option<String>,
}

impl Default for AutoplayConfig {
    fn default() -> Self {
        Self {
            seed: 0xC0FFEE,
            policy: PickPolicy::Random,
            faction: None,
        }
    }
}
