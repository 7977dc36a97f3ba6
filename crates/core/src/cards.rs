use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Tier {
    Leader,
    Bronze,
    Silver,
    Gold,
}

impl Tier {
    /// Tiers that can appear in a keg.
    pub const KEG_TIERS: [Tier; 3] = [Tier::Bronze, Tier::Silver, Tier::Gold];

    pub fn name(self) -> &'static str {
        match self {
            Tier::Leader => "Leader",
            Tier::Bronze => "Bronze",
            Tier::Silver => "Silver",
            Tier::Gold => "Gold",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "leader" => Some(Tier::Leader),
            "bronze" => Some(Tier::Bronze),
            "silver" => Some(Tier::Silver),
            "gold" => Some(Tier::Gold),
            _ => None,
        }
    }

    /// Display rank used when listing a deck: leader first, then gold down to bronze.
    pub fn display_rank(self) -> u8 {
        match self {
            Tier::Leader => 0,
            Tier::Gold => 1,
            Tier::Silver => 2,
            Tier::Bronze => 3,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub name: String,
    #[serde(default)]
    pub faction: String,
    #[serde(alias = "group")]
    pub tier: Tier,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subtypes: String,
    #[serde(default)]
    pub arts: Vec<String>,
}

impl Card {
    pub fn new(name: impl Into<String>, faction: impl Into<String>, tier: Tier) -> Self {
        Self {
            name: name.into(),
            faction: faction.into(),
            tier,
            text: String::new(),
            subtypes: String::new(),
            arts: Vec::new(),
        }
    }

    pub fn is_leader(&self) -> bool {
        self.tier == Tier::Leader
    }
}

/// Number of cards in `cards` sharing `name`.
pub fn count_named(cards: &[Card], name: &str) -> usize {
    cards.iter().filter(|card| card.name == name).count()
}
