use crate::{choose_indices, leader_index, AutoplayConfig, AutoplayError, DraftReport, StepRecord};
use kegdraft_core::{Advance, Catalog, Draft, DraftConfig, DraftStep, EventBus, Offer, RngState};
use log::{info, warn};

/// Pick choices use their own rng so the policy never changes what the draft offers.
const PICK_STREAM: u64 = 0x9E37_79B9_7F4A_7C15;

/// Runs a complete draft without user input.
pub fn run_draft(
    config: &DraftConfig,
    catalog: &Catalog,
    autoplay: &AutoplayConfig,
) -> Result<DraftReport, AutoplayError> {
    let mut draft = Draft::new(config.clone(), catalog.clone(), autoplay.seed)?;
    let mut events = EventBus::default();
    let mut picker = RngState::from_seed(autoplay.seed ^ PICK_STREAM);
    let mut steps = Vec::with_capacity(config.keg_count() + 1);

    let mut offer = draft.start(&mut events)?;
    let completion = loop {
        let indices = pick_for(&draft, &offer, autoplay, &mut picker);
        steps.push(StepRecord {
            step: steps.len(),
            header: offer.header.clone(),
            tier: offer.tier,
            offered: offer.cards.iter().map(|card| card.name.clone()).collect(),
            picked: indices
                .iter()
                .map(|&idx| offer.cards[idx].name.clone())
                .collect(),
        });
        match draft.pick(&indices, &mut events)? {
            Advance::Offer(next) => offer = next,
            Advance::Complete(done) => break done,
        }
    };

    let event_count = events.drain().count();
    info!(
        "autoplay seed {} finished: {} cards, {} events",
        autoplay.seed,
        completion.decklist.len(),
        event_count
    );
    Ok(DraftReport {
        seed: autoplay.seed,
        policy: autoplay.policy,
        faction: draft.faction().unwrap_or_default().to_string(),
        steps,
        deck_size: completion.decklist.len(),
        decklist: completion.decklist.summary(),
        event_count,
    })
}

fn pick_for(
    draft: &Draft,
    offer: &Offer,
    autoplay: &AutoplayConfig,
    picker: &mut RngState,
) -> Vec<usize> {
    if offer.step == DraftStep::Leader {
        if let Some(wanted) = autoplay.faction.as_deref() {
            match leader_index(offer, wanted) {
                Some(idx) => return vec![idx],
                None => warn!("no {wanted} leader offered, falling back to policy"),
            }
        }
    }
    choose_indices(autoplay.policy, offer, draft.faction(), picker)
}
