use crate::{
    generate_keg, Card, Catalog, ConfigError, Decklist, DraftConfig, Event, EventBus, KegError,
    KegRules, Pool, RngState, Tier,
};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),
    #[error("draft already started")]
    AlreadyStarted,
    #[error("draft not started")]
    NotStarted,
    #[error("draft already complete")]
    AlreadyComplete,
    #[error("not enough leaders: need {needed}, catalog has {available}")]
    NotEnoughLeaders { needed: usize, available: usize },
    #[error("expected {expected} cards, got {got}")]
    WrongSelectionCount { expected: usize, got: usize },
    #[error("card not in the current offer: {0}")]
    NotOffered(String),
    #[error("invalid offer index {0}")]
    InvalidIndex(usize),
    #[error("keg error: {0}")]
    Keg(#[from] KegError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DraftStep {
    NotStarted,
    Leader,
    Keg(usize),
    Done,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    pub header: String,
    pub step: DraftStep,
    pub tier: Tier,
    pub cards: Vec<Card>,
    pub to_choose: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub header: String,
    pub decklist: Decklist,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advance {
    Offer(Offer),
    Complete(Completion),
}

impl Advance {
    pub fn offer(&self) -> Option<&Offer> {
        match self {
            Advance::Offer(offer) => Some(offer),
            Advance::Complete(_) => None,
        }
    }
}

/// Draft state machine: a leader step followed by one step per keg in the plan.
#[derive(Debug)]
pub struct Draft {
    config: DraftConfig,
    catalog: Catalog,
    rng: RngState,
    step: DraftStep,
    decklist: Decklist,
    faction: Option<String>,
    pool: Option<Pool>,
    offer: Option<Offer>,
}

impl Draft {
    pub fn new(config: DraftConfig, catalog: Catalog, seed: u64) -> Result<Self, DraftError> {
        config.validate()?;
        Ok(Self {
            config,
            catalog,
            rng: RngState::from_seed(seed),
            step: DraftStep::NotStarted,
            decklist: Decklist::new(),
            faction: None,
            pool: None,
            offer: None,
        })
    }

    /// Offers `leader_choices` distinct leaders drawn from every playable faction.
    pub fn start(&mut self, events: &mut EventBus) -> Result<Offer, DraftError> {
        if self.step != DraftStep::NotStarted {
            return Err(DraftError::AlreadyStarted);
        }
        let leaders = self.catalog.leaders(&self.config.factions);
        if leaders.len() < self.config.leader_choices {
            return Err(DraftError::NotEnoughLeaders {
                needed: self.config.leader_choices,
                available: leaders.len(),
            });
        }
        let cards: Vec<Card> = self
            .rng
            .sample_distinct(&leaders, self.config.leader_choices)
            .into_iter()
            .map(|card| (*card).clone())
            .collect();
        events.push(Event::DraftStarted {
            leaders: names_of(&cards),
        });
        let to_choose = self.config.leader_picks;
        let offer = Offer {
            header: "Choose a leader".to_string(),
            step: DraftStep::Leader,
            tier: Tier::Leader,
            cards,
            to_choose,
        };
        self.step = DraftStep::Leader;
        self.offer = Some(offer.clone());
        Ok(offer)
    }

    /// Records the user's picks for the current offer and moves to the next step.
    /// Nothing is committed when an error is returned.
    pub fn advance(
        &mut self,
        selection: &[Card],
        events: &mut EventBus,
    ) -> Result<Advance, DraftError> {
        let next_keg = match self.step {
            DraftStep::NotStarted => return Err(DraftError::NotStarted),
            DraftStep::Done => return Err(DraftError::AlreadyComplete),
            DraftStep::Leader => 0,
            DraftStep::Keg(index) => index + 1,
        };
        let offer = self.offer.as_ref().ok_or(DraftError::NotStarted)?;
        check_selection(offer, selection)?;

        let mut decklist = self.decklist.clone();
        decklist.push_all(selection);
        let chosen_pool = match self.step {
            DraftStep::Leader => {
                let leader = &selection[0];
                Some(Pool::derive(&self.catalog, &self.config, &leader.faction))
            }
            _ => None,
        };

        let next_offer = if next_keg < self.config.keg_count() {
            let pool = chosen_pool
                .as_ref()
                .or(self.pool.as_ref())
                .ok_or(DraftError::NotStarted)?;
            Some(keg_offer(
                &self.config,
                pool,
                &decklist,
                next_keg,
                &mut self.rng,
            )?)
        } else {
            None
        };

        if let Some(pool) = chosen_pool {
            let leader = &selection[0];
            info!("leader {} chosen, faction {}", leader.name, leader.faction);
            events.push(Event::LeaderChosen {
                name: leader.name.clone(),
                faction: leader.faction.clone(),
            });
            events.push(Event::PoolDerived {
                faction: leader.faction.clone(),
                sizes: pool.sizes(),
            });
            self.faction = Some(leader.faction.clone());
            self.pool = Some(pool);
        }
        self.decklist = decklist;
        events.push(Event::CardsPicked {
            names: names_of(selection),
            deck_size: self.decklist.len(),
        });

        let Some(offer) = next_offer else {
            self.step = DraftStep::Done;
            self.offer = None;
            info!("draft complete with {} cards", self.decklist.len());
            events.push(Event::DraftCompleted {
                deck_size: self.decklist.len(),
            });
            return Ok(Advance::Complete(self.completion_value()));
        };

        events.push(Event::KegOffered {
            index: next_keg,
            tier: offer.tier,
            cards: names_of(&offer.cards),
        });
        self.step = DraftStep::Keg(next_keg);
        self.offer = Some(offer.clone());
        Ok(Advance::Offer(offer))
    }

    /// Picks cards of the current offer by position.
    pub fn pick(&mut self, indices: &[usize], events: &mut EventBus) -> Result<Advance, DraftError> {
        let offer = self.offer.as_ref().ok_or(match self.step {
            DraftStep::Done => DraftError::AlreadyComplete,
            _ => DraftError::NotStarted,
        })?;
        let mut seen = Vec::with_capacity(indices.len());
        for &idx in indices {
            if idx >= offer.cards.len() || seen.contains(&idx) {
                return Err(DraftError::InvalidIndex(idx));
            }
            seen.push(idx);
        }
        let selection: Vec<Card> = indices.iter().map(|&idx| offer.cards[idx].clone()).collect();
        self.advance(&selection, events)
    }

    fn completion_value(&self) -> Completion {
        Completion {
            header: "Completed".to_string(),
            decklist: self.decklist.clone(),
        }
    }

    pub fn is_done(&self) -> bool {
        self.step == DraftStep::Done
    }

    /// Final result, available once the plan is exhausted.
    pub fn completion(&self) -> Option<Completion> {
        self.is_done().then(|| self.completion_value())
    }

    pub fn current_offer(&self) -> Option<&Offer> {
        self.offer.as_ref()
    }

    pub fn step(&self) -> DraftStep {
        self.step
    }

    pub fn decklist(&self) -> &Decklist {
        &self.decklist
    }

    pub fn faction(&self) -> Option<&str> {
        self.faction.as_deref()
    }

    pub fn pool(&self) -> Option<&Pool> {
        self.pool.as_ref()
    }

    pub fn config(&self) -> &DraftConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.rng.seed()
    }

    /// Keg steps finished so far.
    pub fn completed_kegs(&self) -> usize {
        match self.step {
            DraftStep::NotStarted | DraftStep::Leader => 0,
            DraftStep::Keg(index) => index,
            DraftStep::Done => self.config.keg_count(),
        }
    }
}

/// Each selected card must match a distinct slot of the offer.
fn check_selection(offer: &Offer, selection: &[Card]) -> Result<(), DraftError> {
    if selection.len() != offer.to_choose {
        return Err(DraftError::WrongSelectionCount {
            expected: offer.to_choose,
            got: selection.len(),
        });
    }
    let mut used = vec![false; offer.cards.len()];
    for card in selection {
        let slot = offer
            .cards
            .iter()
            .enumerate()
            .position(|(idx, offered)| !used[idx] && offered == card)
            .ok_or_else(|| DraftError::NotOffered(card.name.clone()))?;
        used[slot] = true;
    }
    Ok(())
}

fn keg_offer(
    config: &DraftConfig,
    pool: &Pool,
    decklist: &Decklist,
    index: usize,
    rng: &mut RngState,
) -> Result<Offer, DraftError> {
    let tier = config.sequence[index];
    let rules = KegRules::for_tier(config, tier);
    let cards = generate_keg(tier, pool.tier(tier), decklist.cards(), rules, rng)?;
    debug!("keg {} ({tier}) offers {:?}", index + 1, names_of(&cards));
    Ok(Offer {
        header: format!(
            "Keg {}/{} - Choose {} cards",
            index + 1,
            config.keg_count(),
            config.keg_picks
        ),
        step: DraftStep::Keg(index),
        tier,
        cards,
        to_choose: config.keg_picks,
    })
}

fn names_of(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|card| card.name.clone()).collect()
}
