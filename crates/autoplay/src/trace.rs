use crate::{AutoplayError, FrequencyReport, PickPolicy};
use kegdraft_core::{DeckEntry, Tier};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepRecord {
    pub step: usize,
    pub header: String,
    pub tier: Tier,
    pub offered: Vec<String>,
    pub picked: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DraftReport {
    pub seed: u64,
    pub policy: PickPolicy,
    pub faction: String,
    pub steps: Vec<StepRecord>,
    pub deck_size: usize,
    pub decklist: Vec<DeckEntry>,
    pub event_count: usize,
}

impl DraftReport {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "seed: {} policy: {} faction: {}",
                self.seed,
                self.policy.name(),
                self.faction
            ),
            format!("deck: {} cards, events: {}", self.deck_size, self.event_count),
            String::new(),
            "steps:".to_string(),
        ];
        for step in &self.steps {
            lines.push(format!("  {:>2} | {} [{}]", step.step, step.header, step.tier));
            lines.push(format!("     offered: {}", step.offered.join(", ")));
            lines.push(format!("     picked:  {}", step.picked.join(", ")));
        }
        lines.push(String::new());
        lines.push("decklist:".to_string());
        lines.extend(format_decklist(&self.decklist));
        lines.join("\n")
    }
}

/// One line per distinct card, with a multiplier for repeated copies.
pub fn format_decklist(entries: &[DeckEntry]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| {
            if entry.count > 1 {
                format!("  [{}] {} x{}", entry.card.tier, entry.card.name, entry.count)
            } else {
                format!("  [{}] {}", entry.card.tier, entry.card.name)
            }
        })
        .collect()
}

impl FrequencyReport {
    pub fn to_text_report(&self) -> String {
        let mut lines = vec![
            format!(
                "{} {} draws over {} pools",
                self.faction, self.tier, self.runs
            ),
            format!(
                "  faction: {} draws across {} names ({:.1} per card)",
                self.faction_draws,
                self.faction_names,
                self.faction_per_card()
            ),
            format!(
                "  neutral: {} draws across {} names ({:.1} per card)",
                self.neutral_draws,
                self.neutral_names,
                self.neutral_per_card()
            ),
        ];
        match self.weight_ratio() {
            Some(ratio) => lines.push(format!("  ratio: {ratio:.2}")),
            None => lines.push("  ratio: n/a".to_string()),
        }
        for (name, count) in &self.counts {
            lines.push(format!("    {count:>6}  {name}"));
        }
        lines.join("\n")
    }
}

pub fn write_json(path: &Path, report: &DraftReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let body = serde_json::to_string_pretty(report)?;
    fs::write(path, body)?;
    Ok(())
}

pub fn write_text(path: &Path, report: &DraftReport) -> Result<(), AutoplayError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, report.to_text_report())?;
    Ok(())
}
