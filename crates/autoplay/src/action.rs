use crate::PickPolicy;
use kegdraft_core::{Offer, RngState};

/// Chooses `offer.to_choose` distinct slot indices of `offer`.
pub fn choose_indices(
    policy: PickPolicy,
    offer: &Offer,
    faction: Option<&str>,
    rng: &mut RngState,
) -> Vec<usize> {
    let slots: Vec<usize> = (0..offer.cards.len()).collect();
    match policy {
        PickPolicy::First => slots.into_iter().take(offer.to_choose).collect(),
        PickPolicy::Random => rng
            .sample_distinct(&slots, offer.to_choose)
            .into_iter()
            .copied()
            .collect(),
        PickPolicy::FactionFirst => {
            let mut ordered = slots;
            ordered.sort_by_key(|&idx| match faction {
                Some(faction) => offer.cards[idx].faction != faction,
                None => false,
            });
            ordered.truncate(offer.to_choose);
            ordered
        }
    }
}

/// Index of the first offered leader of `faction`.
pub fn leader_index(offer: &Offer, faction: &str) -> Option<usize> {
    offer.cards.iter().position(|card| card.faction == faction)
}
