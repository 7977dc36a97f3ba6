use crate::schema::{Assets, Card, Catalog, CatalogFile, DraftConfig, RawCard, Tier};
use anyhow::{bail, Context};
use log::debug;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

const CARDS_FILE: &str = "cards.json";
const DRAFT_FILE: &str = "draft.json";

pub fn load_assets(dir: &Path) -> anyhow::Result<Assets> {
    let config = load_draft_config(dir)?;
    let catalog = load_catalog(&dir.join(CARDS_FILE))?;
    validate_catalog(&config, &catalog)
        .with_context(|| format!("validate {}", dir.join(CARDS_FILE).display()))?;
    Ok(Assets { config, catalog })
}

/// Reads `draft.json` from `dir`, or the standard plan when the file is absent.
pub fn load_draft_config(dir: &Path) -> anyhow::Result<DraftConfig> {
    let path = dir.join(DRAFT_FILE);
    if !path.exists() {
        debug!("{} missing, using the standard draft plan", path.display());
        return Ok(DraftConfig::default());
    }
    let config: DraftConfig = load_json(&path)?;
    config
        .validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

pub fn load_catalog(path: &Path) -> anyhow::Result<Catalog> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_catalog(&raw).with_context(|| format!("parse {}", path.display()))
}

pub fn parse_catalog(raw: &str) -> anyhow::Result<Catalog> {
    let file: CatalogFile = serde_json::from_str(raw)?;
    let mut catalog = Catalog::new();
    for (faction, tiers) in file {
        for (tier_name, cards) in tiers {
            let Some(tier) = Tier::from_name(&tier_name) else {
                bail!("unknown tier {tier_name:?} under faction {faction:?}");
            };
            for raw in cards {
                catalog.insert(card_from_raw(raw, &faction, tier)?);
            }
        }
    }
    debug!("catalog loaded: {} cards", catalog.len());
    Ok(catalog)
}

fn card_from_raw(raw: RawCard, faction: &str, tier: Tier) -> anyhow::Result<Card> {
    if raw.name.trim().is_empty() {
        bail!("{faction} {tier} card without a name");
    }
    if let Some(group) = raw.group.as_deref() {
        if Tier::from_name(group) != Some(tier) {
            bail!(
                "card {:?} declares group {group:?} but is listed under {tier}",
                raw.name
            );
        }
    }
    Ok(Card {
        name: raw.name,
        faction: raw.faction.unwrap_or_else(|| faction.to_string()),
        tier,
        text: raw.text,
        subtypes: raw.subtypes,
        arts: raw.arts,
    })
}

/// Checks that every playable faction can complete a draft under `config`:
/// enough leaders to offer, and for every keg tier enough copy capacity left
/// for the last keg of that tier.
pub fn validate_catalog(config: &DraftConfig, catalog: &Catalog) -> anyhow::Result<()> {
    if !catalog.has_faction(&config.neutral) {
        bail!("missing neutral faction {:?}", config.neutral);
    }
    for faction in &config.factions {
        if !catalog.has_faction(faction) {
            bail!("missing faction {faction:?}");
        }
    }
    let leaders = catalog.leaders(&config.factions).len();
    if leaders < config.leader_choices {
        bail!(
            "need {} leaders, catalog has {leaders}",
            config.leader_choices
        );
    }
    for tier in Tier::KEG_TIERS {
        let picks = config.picks_of(tier);
        if picks == 0 {
            continue;
        }
        let Some(limit) = config.copy_limit(tier) else {
            continue;
        };
        let drafted_before_last = picks - config.keg_picks;
        for faction in &config.factions {
            let names = distinct_pool_names(catalog, &config.neutral, faction, tier);
            let capacity = names * limit;
            if capacity < drafted_before_last + config.keg_size {
                bail!(
                    "{faction} {tier} pool has {names} names; {} are needed to fill every keg",
                    (drafted_before_last + config.keg_size).div_ceil(limit)
                );
            }
        }
    }
    Ok(())
}

fn distinct_pool_names(catalog: &Catalog, neutral: &str, faction: &str, tier: Tier) -> usize {
    let mut names: Vec<&str> = catalog
        .cards(neutral, tier)
        .iter()
        .chain(catalog.cards(faction, tier))
        .map(|card| card.name.as_str())
        .collect();
    names.sort_unstable();
    names.dedup();
    names.len()
}

fn load_json<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let value = serde_json::from_str(&raw).with_context(|| format!("parse {}", path.display()))?;
    Ok(value)
}
