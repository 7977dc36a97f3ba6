use kegdraft_core::{
    count_named, generate_keg, Advance, Card, Catalog, ConfigError, Draft, DraftConfig,
    DraftError, DraftStep, Event, EventBus, KegRules, RngState, Tier,
};

const FACTIONS: [&str; 5] = [
    "Scoia'tael",
    "Nilfgaard",
    "Monster",
    "Northern Realms",
    "Skellige",
];

fn tier_cards(faction: &str, tier: Tier, amount: usize) -> Vec<Card> {
    (0..amount)
        .map(|idx| Card::new(format!("{faction} {tier} {idx}"), faction, tier))
        .collect()
}

fn sample_catalog() -> Catalog {
    let mut cards = Vec::new();
    cards.extend(tier_cards("Neutral", Tier::Gold, 4));
    cards.extend(tier_cards("Neutral", Tier::Silver, 5));
    cards.extend(tier_cards("Neutral", Tier::Bronze, 4));
    for faction in FACTIONS {
        cards.extend(tier_cards(faction, Tier::Leader, 2));
        cards.extend(tier_cards(faction, Tier::Gold, 4));
        cards.extend(tier_cards(faction, Tier::Silver, 5));
        cards.extend(tier_cards(faction, Tier::Bronze, 4));
    }
    Catalog::from_cards(cards)
}

fn new_draft(seed: u64) -> Draft {
    Draft::new(DraftConfig::default(), sample_catalog(), seed).expect("draft")
}

fn run_to_end(draft: &mut Draft, events: &mut EventBus) {
    draft.start(events).expect("start");
    loop {
        let to_choose = draft.current_offer().expect("offer").to_choose;
        match draft.pick(&[0, 1][..to_choose], events) {
            Ok(Advance::Offer(_)) => continue,
            Ok(Advance::Complete(_)) => break,
            Err(err) => panic!("draft failed: {err}"),
        }
    }
}

#[test]
fn leader_offer_has_four_distinct_leaders() {
    let mut draft = new_draft(1);
    let offer = draft.start(&mut EventBus::default()).expect("start");
    assert_eq!(offer.header, "Choose a leader");
    assert_eq!(offer.step, DraftStep::Leader);
    assert_eq!(offer.to_choose, 1);
    assert_eq!(offer.cards.len(), 4);
    assert!(offer.cards.iter().all(Card::is_leader));
    let mut names: Vec<&str> = offer.cards.iter().map(|card| card.name.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), 4);
}

#[test]
fn leader_pick_leads_to_first_gold_keg() {
    let mut draft = new_draft(2);
    let mut events = EventBus::default();
    let leader = draft.start(&mut events).expect("start").cards[0].clone();
    let next = draft
        .advance(std::slice::from_ref(&leader), &mut events)
        .expect("advance");
    let offer = next.offer().expect("keg offer").clone();
    assert_eq!(offer.header, "Keg 1/15 - Choose 2 cards");
    assert_eq!(offer.tier, Tier::Gold);
    assert_eq!(offer.to_choose, 2);
    assert_eq!(offer.cards.len(), 5);
    assert!(offer.cards.iter().all(|card| card.tier == Tier::Gold
        && (card.faction == "Neutral" || card.faction == leader.faction)));
    assert_eq!(draft.faction(), Some(leader.faction.as_str()));

    let picks = vec![offer.cards[3].clone(), offer.cards[1].clone()];
    draft.advance(&picks, &mut events).expect("advance");
    assert_eq!(
        draft.decklist().cards(),
        &[leader, picks[0].clone(), picks[1].clone()]
    );
}

#[test]
fn completed_draft_follows_the_plan() {
    for seed in 0..20 {
        let mut draft = new_draft(seed);
        run_to_end(&mut draft, &mut EventBus::default());
        let config = DraftConfig::default();
        let cards = draft.decklist().cards();
        assert_eq!(cards.len(), 31);
        assert_eq!(cards.len(), config.deck_size());
        assert!(cards[0].is_leader());
        for (idx, tier) in config.sequence.iter().enumerate() {
            assert_eq!(cards[1 + idx * 2].tier, *tier, "seed {seed} keg {idx}");
            assert_eq!(cards[2 + idx * 2].tier, *tier, "seed {seed} keg {idx}");
        }
        for card in &cards[1..] {
            let limit = config.copy_limit(card.tier).expect("limit");
            assert!(count_named(cards, &card.name) <= limit, "seed {seed}: {}", card.name);
        }
        assert!(cards[1..]
            .iter()
            .all(|card| card.faction == "Neutral" || card.faction == cards[0].faction));
    }
}

#[test]
fn every_keg_offers_five_and_asks_for_two() {
    let mut draft = new_draft(8);
    let mut events = EventBus::default();
    draft.start(&mut events).expect("start");
    let mut next = draft.pick(&[2], &mut events).expect("leader");
    let mut kegs = 0;
    while let Advance::Offer(offer) = next {
        kegs += 1;
        assert_eq!(offer.cards.len(), 5);
        assert_eq!(offer.to_choose, 2);
        assert_eq!(draft.completed_kegs(), kegs - 1);
        assert_eq!(draft.decklist().len(), 1 + 2 * (kegs - 1));
        next = draft.pick(&[4, 0], &mut events).expect("keg");
    }
    assert_eq!(kegs, 15);
}

#[test]
fn completion_is_stable() {
    let mut draft = new_draft(5);
    let mut events = EventBus::default();
    run_to_end(&mut draft, &mut events);
    assert!(draft.is_done());
    let first = draft.completion().expect("completion");
    assert_eq!(first.header, "Completed");
    assert_eq!(draft.completion(), Some(first.clone()));
    assert!(draft.current_offer().is_none());
    assert_eq!(
        draft.advance(&[], &mut events),
        Err(DraftError::AlreadyComplete)
    );
    assert!(draft.is_done());
    assert_eq!(draft.completion(), Some(first));
}

#[test]
fn same_seed_replays_same_offers() {
    let mut a = new_draft(77);
    let mut b = new_draft(77);
    run_to_end(&mut a, &mut EventBus::default());
    run_to_end(&mut b, &mut EventBus::default());
    assert_eq!(a.decklist(), b.decklist());
}

#[test]
fn wrong_selection_count_is_rejected_without_side_effects() {
    let mut draft = new_draft(3);
    let mut events = EventBus::default();
    let offer = draft.start(&mut events).expect("start");
    let err = draft.advance(&offer.cards[..2], &mut events).unwrap_err();
    assert_eq!(
        err,
        DraftError::WrongSelectionCount {
            expected: 1,
            got: 2
        }
    );
    assert!(draft.decklist().is_empty());
    assert_eq!(draft.step(), DraftStep::Leader);
    assert_eq!(draft.current_offer(), Some(&offer));
}

#[test]
fn cards_outside_the_offer_are_rejected() {
    let mut draft = new_draft(3);
    let mut events = EventBus::default();
    draft.start(&mut events).expect("start");
    let stranger = Card::new("Unknown Leader", "Skellige", Tier::Leader);
    assert_eq!(
        draft.advance(&[stranger], &mut events),
        Err(DraftError::NotOffered("Unknown Leader".to_string()))
    );
}

#[test]
fn repeated_slot_needs_repeated_offer() {
    let mut draft = new_draft(4);
    let mut events = EventBus::default();
    draft.start(&mut events).expect("start");
    let offer = draft.pick(&[0], &mut events).expect("leader");
    let offer = offer.offer().expect("keg").clone();
    let twice = vec![offer.cards[0].clone(), offer.cards[0].clone()];
    // Gold cards are unique in the offer, so the second copy has no slot.
    assert_eq!(
        draft.advance(&twice, &mut events),
        Err(DraftError::NotOffered(offer.cards[0].name.clone()))
    );
    assert_eq!(
        draft.pick(&[1, 1], &mut events),
        Err(DraftError::InvalidIndex(1))
    );
    assert_eq!(
        draft.pick(&[0, 5], &mut events),
        Err(DraftError::InvalidIndex(5))
    );
}

#[test]
fn lifecycle_errors() {
    let mut draft = new_draft(6);
    let mut events = EventBus::default();
    assert_eq!(draft.advance(&[], &mut events), Err(DraftError::NotStarted));
    assert_eq!(draft.pick(&[0], &mut events), Err(DraftError::NotStarted));
    draft.start(&mut events).expect("start");
    assert_eq!(
        draft.start(&mut events).unwrap_err(),
        DraftError::AlreadyStarted
    );
}

#[test]
fn too_few_leaders_fails_to_start() {
    let catalog = Catalog::from_cards(tier_cards("Skellige", Tier::Leader, 3));
    let mut draft = Draft::new(DraftConfig::default(), catalog, 1).expect("draft");
    assert_eq!(
        draft.start(&mut EventBus::default()).unwrap_err(),
        DraftError::NotEnoughLeaders {
            needed: 4,
            available: 3
        }
    );
}

#[test]
fn exhausted_pool_surfaces_as_error() {
    let mut cards = tier_cards("Skellige", Tier::Leader, 4);
    cards.extend(tier_cards("Skellige", Tier::Gold, 2));
    let config = DraftConfig {
        max_draw_attempts: 200,
        ..DraftConfig::default()
    };
    let mut draft = Draft::new(config, Catalog::from_cards(cards), 1).expect("draft");
    let mut events = EventBus::default();
    draft.start(&mut events).expect("start");
    let err = draft.pick(&[0], &mut events).unwrap_err();
    assert!(matches!(err, DraftError::Keg(_)), "{err:?}");
    assert_eq!(draft.step(), DraftStep::Leader);
    assert!(draft.decklist().is_empty());
    assert!(draft.faction().is_none());
}

#[test]
fn events_trace_the_draft() {
    let mut draft = new_draft(12);
    let mut events = EventBus::default();
    run_to_end(&mut draft, &mut events);
    let all: Vec<Event> = events.drain().collect();
    assert!(matches!(all.first(), Some(Event::DraftStarted { leaders }) if leaders.len() == 4));
    assert!(matches!(all.get(1), Some(Event::LeaderChosen { .. })));
    assert!(matches!(all.get(2), Some(Event::PoolDerived { .. })));
    let offered = all
        .iter()
        .filter(|event| matches!(event, Event::KegOffered { .. }))
        .count();
    let picked = all
        .iter()
        .filter(|event| matches!(event, Event::CardsPicked { .. }))
        .count();
    assert_eq!(offered, 15);
    assert_eq!(picked, 16);
    assert_eq!(all.last(), Some(&Event::DraftCompleted { deck_size: 31 }));
    assert!(events.is_empty());
}

#[test]
fn two_bronze_names_still_fill_a_keg() {
    let pool = vec![
        Card::new("Clan Drummond Shieldmaiden", "Neutral", Tier::Bronze),
        Card::new("Clan Tordarroch Armorsmith", "Skellige", Tier::Bronze),
        Card::new("Clan Tordarroch Armorsmith", "Skellige", Tier::Bronze),
    ];
    let rules = KegRules::for_tier(&DraftConfig::default(), Tier::Bronze);
    let mut rng = RngState::from_seed(21);
    for _ in 0..50 {
        let keg = generate_keg(Tier::Bronze, &pool, &[], rules, &mut rng).expect("keg");
        assert_eq!(keg.len(), 5);
        for card in &keg {
            assert!(count_named(&keg, &card.name) <= 3);
        }
    }
}

#[test]
fn keg_respects_cards_already_drafted() {
    let pool = vec![
        Card::new("Reaver Scout", "Neutral", Tier::Bronze),
        Card::new("Dimeritium Shackles", "Neutral", Tier::Bronze),
    ];
    let deck = vec![pool[0].clone(), pool[0].clone()];
    let rules = KegRules::for_tier(&DraftConfig::default(), Tier::Bronze);
    let mut rng = RngState::from_seed(8);
    let err = generate_keg(Tier::Bronze, &pool, &deck, rules, &mut rng).unwrap_err();
    // One more scout plus three shackles is all the limit allows.
    assert!(err.to_string().contains("accepted 4"), "{err}");
}

macro_rules! invalid_config_case {
    ($name:ident, $patch:expr, $expected:expr) => {
        #[test]
        fn $name() {
            let mut config = DraftConfig::default();
            let patch: fn(&mut DraftConfig) = $patch;
            patch(&mut config);
            assert_eq!(config.validate(), Err($expected));
            assert!(matches!(
                Draft::new(config, Catalog::new(), 0),
                Err(DraftError::Config(_))
            ));
        }
    };
}

invalid_config_case!(
    empty_sequence,
    |config| config.sequence.clear(),
    ConfigError::EmptySequence
);
invalid_config_case!(
    leader_in_sequence,
    |config| config.sequence[3] = Tier::Leader,
    ConfigError::LeaderInSequence(3)
);
invalid_config_case!(
    no_factions,
    |config| config.factions.clear(),
    ConfigError::NoFactions
);
invalid_config_case!(
    zero_weight,
    |config| config.faction_weight = 0,
    ConfigError::Zero("faction_weight")
);
invalid_config_case!(
    picks_exceed_keg,
    |config| config.keg_picks = 6,
    ConfigError::PicksExceedOffer {
        what: "keg step",
        picks: 6,
        offered: 5
    }
);

#[test]
fn default_plan_matches_keg_sequence() {
    use Tier::{Bronze, Gold, Silver};
    let config = DraftConfig::default();
    assert_eq!(
        config.sequence,
        vec![
            Gold, Bronze, Bronze, Bronze, Silver, Bronze, Bronze, Bronze, Silver, Bronze, Bronze,
            Gold, Bronze, Bronze, Silver
        ]
    );
    assert_eq!(config.copy_limit(Bronze), Some(3));
    assert_eq!(config.copy_limit(Silver), Some(1));
    assert_eq!(config.copy_limit(Gold), Some(1));
    assert_eq!(config.copy_limit(Tier::Leader), None);
    assert_eq!(config.picks_of(Bronze), 18);
    assert!(config.validate().is_ok());
}

#[test]
fn config_round_trips_through_json_with_defaults() {
    let config: DraftConfig =
        serde_json::from_str(r#"{ "keg_size": 6, "sequence": ["Gold", "Bronze"] }"#)
            .expect("parse");
    assert_eq!(config.keg_size, 6);
    assert_eq!(config.keg_count(), 2);
    assert_eq!(config.keg_picks, 2);
    assert_eq!(config.neutral, "Neutral");
}
