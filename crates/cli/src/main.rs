use anyhow::{anyhow, Context};
use log::LevelFilter;
use kegdraft_autoplay::{
    format_decklist, offer_frequencies, run_draft, write_json, write_text, AutoplayConfig,
    DraftReport, PickPolicy,
};
use kegdraft_core::{Advance, Draft, DraftError, Event, EventBus, Offer, Tier};
use kegdraft_data::load_assets;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

const DEFAULT_SEED: u64 = 0xC0FFEE;

#[derive(Debug, Clone, PartialEq)]
struct CliOptions {
    assets: PathBuf,
    seed: Option<u64>,
    auto: Option<PickPolicy>,
    stats: Option<u32>,
    faction: Option<String>,
    report: Option<PathBuf>,
    verbose: bool,
}

fn parse_cli_options(args: &[String]) -> anyhow::Result<CliOptions> {
    let mut options = CliOptions {
        assets: PathBuf::from("assets"),
        seed: None,
        auto: None,
        stats: None,
        faction: None,
        report: None,
        verbose: false,
    };
    let mut idx = 0usize;
    while idx < args.len() {
        match args[idx].as_str() {
            "--auto" => {
                let policy = args.get(idx + 1).and_then(|value| PickPolicy::from_name(value));
                if policy.is_some() {
                    idx += 1;
                }
                options.auto = Some(policy.unwrap_or(PickPolicy::Random));
            }
            "--assets" => {
                if let Some(value) = args.get(idx + 1) {
                    options.assets = PathBuf::from(value);
                    idx += 1;
                }
            }
            "--seed" => {
                options.seed = Some(parse_value(args, idx, "--seed")?);
                idx += 1;
            }
            "--stats" => {
                options.stats = Some(parse_value(args, idx, "--stats")?);
                idx += 1;
            }
            "--faction" => {
                if let Some(value) = args.get(idx + 1) {
                    options.faction = Some(value.clone());
                    idx += 1;
                }
            }
            "--report" => {
                if let Some(value) = args.get(idx + 1) {
                    options.report = Some(PathBuf::from(value));
                    idx += 1;
                }
            }
            "--verbose" | "-v" => options.verbose = true,
            _ => {}
        }
        idx += 1;
    }
    Ok(options)
}

fn parse_value<T: std::str::FromStr>(
    args: &[String],
    idx: usize,
    flag: &str,
) -> anyhow::Result<T> {
    let value = args
        .get(idx + 1)
        .ok_or_else(|| anyhow!("{flag} needs a value"))?;
    value
        .parse::<T>()
        .map_err(|_| anyhow!("invalid value for {flag}: {value:?}"))
}

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = match parse_cli_options(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(2);
        }
    };
    env_logger::Builder::new()
        .filter_level(if options.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        })
        .init();
    let result = if options.stats.is_some() {
        run_stats(&options)
    } else if options.auto.is_some() {
        run_auto(&options)
    } else {
        run_interactive(&options)
    };
    if let Err(err) = result {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run_auto(options: &CliOptions) -> anyhow::Result<()> {
    let assets = load_assets(&options.assets)?;
    let autoplay = AutoplayConfig {
        seed: options.seed.unwrap_or(DEFAULT_SEED),
        policy: options.auto.unwrap_or(PickPolicy::Random),
        faction: options.faction.clone(),
    };
    let report = run_draft(&assets.config, &assets.catalog, &autoplay)?;
    println!("{}", report.to_text_report());
    if let Some(path) = options.report.as_deref() {
        write_report(path, &report)?;
        println!("report written to {}", path.display());
    }
    Ok(())
}

fn write_report(path: &Path, report: &DraftReport) -> anyhow::Result<()> {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        write_json(path, report)?;
    } else {
        write_text(path, report)?;
    }
    Ok(())
}

fn run_stats(options: &CliOptions) -> anyhow::Result<()> {
    let assets = load_assets(&options.assets)?;
    let runs = options.stats.unwrap_or(1_000);
    let factions: Vec<String> = match options.faction.as_ref() {
        Some(faction) => vec![faction.clone()],
        None => assets.config.factions.clone(),
    };
    for faction in &factions {
        for tier in Tier::KEG_TIERS {
            let report = offer_frequencies(
                &assets.config,
                &assets.catalog,
                faction,
                tier,
                runs,
                options.seed.unwrap_or(DEFAULT_SEED),
            )?;
            println!("{}\n", report.to_text_report());
        }
    }
    Ok(())
}

fn run_interactive(options: &CliOptions) -> anyhow::Result<()> {
    let assets = load_assets(&options.assets)?;
    let seed = options.seed.unwrap_or_else(seed_from_clock);
    let mut draft = Draft::new(assets.config, assets.catalog, seed)?;
    let mut events = EventBus::default();
    println!("seed: {}", draft.seed());

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut offer = draft.start(&mut events)?;
    loop {
        print_events(&mut events);
        print_offer(&offer);
        let Some(indices) = prompt_indices(&mut lines, &offer)? else {
            println!("draft abandoned");
            return Ok(());
        };
        match draft.pick(&indices, &mut events) {
            Ok(Advance::Offer(next)) => offer = next,
            Ok(Advance::Complete(done)) => {
                print_events(&mut events);
                println!("{} ({} cards)", done.header, done.decklist.len());
                for line in format_decklist(&done.decklist.summary()) {
                    println!("{line}");
                }
                return Ok(());
            }
            Err(err) if can_retry(&err) => println!("invalid pick: {err}"),
            Err(err) => return Err(err.into()),
        }
    }
}

/// Errors caused by the typed input; anything else ends the draft.
fn can_retry(err: &DraftError) -> bool {
    matches!(
        err,
        DraftError::WrongSelectionCount { .. }
            | DraftError::NotOffered(_)
            | DraftError::InvalidIndex(_)
    )
}

fn print_offer(offer: &Offer) {
    println!();
    println!("{}", offer.header);
    for (idx, card) in offer.cards.iter().enumerate() {
        let subtypes = if card.subtypes.is_empty() {
            String::new()
        } else {
            format!(" ({})", card.subtypes)
        };
        println!("  {}: [{}] {} - {}{}", idx + 1, card.tier, card.name, card.faction, subtypes);
        if !card.text.is_empty() {
            println!("       {}", card.text);
        }
    }
}

fn print_events(events: &mut EventBus) {
    for event in events.drain() {
        if let Event::CardsPicked { names, deck_size } = event {
            println!("picked {} (deck: {deck_size})", names.join(", "));
        }
    }
}

/// Reads 1-based slot numbers until exactly `to_choose` distinct valid ones are given.
/// `None` on end of input or `quit`.
fn prompt_indices(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    offer: &Offer,
) -> anyhow::Result<Option<Vec<usize>>> {
    loop {
        print!("pick {}> ", offer.to_choose);
        io::stdout().flush().context("flush stdout")?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("read stdin")?;
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "q" {
            return Ok(None);
        }
        match parse_indices(trimmed, offer.cards.len(), offer.to_choose) {
            Ok(indices) => return Ok(Some(indices)),
            Err(msg) => println!("{msg}"),
        }
    }
}

fn parse_indices(input: &str, slots: usize, to_choose: usize) -> Result<Vec<usize>, String> {
    let mut indices = Vec::with_capacity(to_choose);
    for token in input.split(|c: char| c.is_whitespace() || c == ',') {
        if token.is_empty() {
            continue;
        }
        let value: usize = token
            .parse()
            .map_err(|_| format!("not a number: {token}"))?;
        if value == 0 || value > slots {
            return Err(format!("choose between 1 and {slots}"));
        }
        if indices.contains(&(value - 1)) {
            return Err(format!("{value} chosen twice"));
        }
        indices.push(value - 1);
    }
    if indices.len() != to_choose {
        return Err(format!("choose exactly {to_choose}"));
    }
    Ok(indices)
}

fn seed_from_clock() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or(DEFAULT_SEED)
}
