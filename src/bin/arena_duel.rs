//! Arena duel runner
//!
//! Resolves one combat between two character sheets and prints the log.
//! Sheets are read from JSON files; a missing side is generated at `--level`.

use std::path::PathBuf;

use brute_arena::balance::build_random_player;
use brute_arena::character::CharacterSheet;
use brute_arena::combat::{EffectSource, LogEntry, LogEvent};
use brute_arena::core::error::Result;
use brute_arena::core::rng::seeded_rng;
use brute_arena::core::types::{CharacterId, Side};
use brute_arena::resolve_combat;
use clap::{Parser, ValueEnum};

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// The combat outcome and log as JSON
    Json,
    /// A readable transcript, one line per log entry
    Text,
}

/// Arena Duel - resolve one combat and print its log
#[derive(Parser, Debug)]
#[command(name = "arena_duel")]
#[command(about = "Resolve a single combat between two character sheets")]
struct Args {
    /// Left fighter sheet (JSON); generated when absent
    #[arg(long)]
    left: Option<PathBuf>,

    /// Right fighter sheet (JSON); generated when absent
    #[arg(long)]
    right: Option<PathBuf>,

    /// Level of generated fighters
    #[arg(long, default_value_t = 10)]
    level: u32,

    /// Random seed for replaying a combat
    #[arg(long)]
    seed: Option<u64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,
}

fn load_sheet(path: &PathBuf) -> Result<CharacterSheet> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

fn side_name<'a>(side: Side, names: &'a [String; 2]) -> &'a str {
    &names[side.index()]
}

fn source_name(source: &EffectSource) -> &'static str {
    match source {
        EffectSource::Ability(id) => id.definition().map(|d| d.name).unwrap_or_else(|| id.key()),
        EffectSource::Combo(id) => id.definition().map(|d| d.name).unwrap_or_else(|| id.key()),
    }
}

fn describe(entry: &LogEntry, names: &[String; 2]) -> String {
    let name = |side: Side| side_name(side, names);
    let line = match &entry.event {
        LogEvent::Intro { left, right } => format!(
            "{} (lv {}, {} hp) vs {} (lv {}, {} hp)",
            left.name, left.level, left.max_health, right.name, right.level, right.max_health
        ),
        LogEvent::ComboActivated { fighter, combo } => format!(
            "{} activates {}",
            name(*fighter),
            combo.definition().map(|d| d.name).unwrap_or_else(|| combo.key())
        ),
        LogEvent::AbilityTriggered { fighter, source } => {
            format!("{} triggers {}", name(*fighter), source_name(source))
        }
        LogEvent::Attack {
            attacker,
            damage,
            critical,
            modifiers,
        } => {
            let crit = if *critical { " (critical)" } else { "" };
            let extra = if modifiers.is_empty() {
                String::new()
            } else {
                format!(" {:?}", modifiers)
            };
            format!(
                "{} hits {} for {}{}{}",
                name(*attacker),
                name(attacker.opponent()),
                damage,
                crit,
                extra
            )
        }
        LogEvent::Dodge { attacker } => format!("{} dodges {}", name(attacker.opponent()), name(*attacker)),
        LogEvent::Heal { fighter, amount, source } => {
            format!("{} heals {} ({})", name(*fighter), amount, source_name(source))
        }
        LogEvent::Lifesteal { fighter, amount, source } => {
            format!("{} drains {} ({})", name(*fighter), amount, source_name(source))
        }
        LogEvent::Thorns { fighter, damage } => {
            format!("{} reflects {} onto {}", name(*fighter), damage, name(fighter.opponent()))
        }
        LogEvent::Counter { fighter, damage } => {
            format!("{} counters {} for {}", name(*fighter), name(fighter.opponent()), damage)
        }
        LogEvent::ExtraStrike {
            attacker,
            damage,
            hits,
            source,
        } => format!(
            "{} strikes again ({}, {} hits) for {}",
            name(*attacker),
            source_name(source),
            hits,
            damage
        ),
        LogEvent::PoisonTick {
            fighter,
            damage,
            stacks_remaining,
        } => format!("{} takes {} poison ({} left)", name(*fighter), damage, stacks_remaining),
        LogEvent::Stunned { fighter } => format!("{} is stunned", name(*fighter)),
        LogEvent::Status => "status".to_string(),
        LogEvent::End { winner, decided_by, .. } => format!("{} wins by {:?}", name(*winner), decided_by),
    };

    format!(
        "[{:>2}] {:<48} {}/{} | {}/{}",
        entry.turn,
        line,
        entry.health.left.health,
        entry.health.left.max_health,
        entry.health.right.health,
        entry.health.right.max_health
    )
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("brute_arena=info")),
        )
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = seeded_rng(seed);

    let left = match &args.left {
        Some(path) => load_sheet(path)?,
        None => build_random_player(CharacterId(1), args.level, &mut rng),
    };
    let right = match &args.right {
        Some(path) => load_sheet(path)?,
        None => build_random_player(CharacterId(2), args.level, &mut rng),
    };

    tracing::info!(seed, left = %left.name, right = %right.name, "Resolving combat");
    let outcome = resolve_combat(&left, &right, &mut rng);

    match args.format {
        OutputFormat::Json => println!("{}", outcome.to_json()),
        OutputFormat::Text => {
            let names = [left.name.clone(), right.name.clone()];
            for entry in outcome.log.iter() {
                println!("{}", describe(entry, &names));
            }
            println!("seed {}", seed);
        }
    }

    Ok(())
}
