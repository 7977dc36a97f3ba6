use crate::Tier;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Event {
    DraftStarted {
        leaders: Vec<String>,
    },
    LeaderChosen {
        name: String,
        faction: String,
    },
    PoolDerived {
        faction: String,
        sizes: BTreeMap<Tier, usize>,
    },
    KegOffered {
        index: usize,
        tier: Tier,
        cards: Vec<String>,
    },
    CardsPicked {
        names: Vec<String>,
        deck_size: usize,
    },
    DraftCompleted {
        deck_size: usize,
    },
}

#[derive(Debug, Default)]
pub struct EventBus {
    queue: Vec<Event>,
}

impl EventBus {
    pub fn push(&mut self, event: Event) {
        self.queue.push(event);
    }

    pub fn drain(&mut self) -> impl Iterator<Item = Event> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}
