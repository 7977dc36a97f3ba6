use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub use kegdraft_core::{Card, Catalog, CopyLimit, DraftConfig, Tier};

/// Card record as stored in `cards.json`. Faction and tier default to the map keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCard {
    pub name: String,
    #[serde(default)]
    pub faction: Option<String>,
    #[serde(default, alias = "tier")]
    pub group: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub subtypes: String,
    #[serde(default)]
    pub arts: Vec<String>,
}

/// faction -> tier name -> cards
pub type CatalogFile = BTreeMap<String, BTreeMap<String, Vec<RawCard>>>;

#[derive(Debug, Clone)]
pub struct Assets {
    pub config: DraftConfig,
    pub catalog: Catalog,
}
