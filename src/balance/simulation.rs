//! Round-robin balance simulation

use std::hash::Hash;
use std::time::Instant;

use ahash::AHashMap;
use rand::Rng;
use rayon::prelude::*;
use tracing::{debug, info};

use crate::balance::players::{build_key, build_random_player};
use crate::balance::report::{sort_by_win_rate, BalanceReport, BuildEntry, CategoryEntries, Tally, WinRateEntry};
use crate::catalog::{AbilityId, AccessoryId, ArmorId, WeaponId};
use crate::character::CharacterSheet;
use crate::combat::{Combat, Fighter};
use crate::core::config::BalanceConfig;
use crate::core::rng::{derive_seed, seeded_rng};
use crate::core::types::{CharacterId, Side};

/// Results per ability, weapon, armor, accessory and build
#[derive(Debug, Default)]
struct Tallies {
    abilities: AHashMap<AbilityId, Tally>,
    weapons: AHashMap<WeaponId, Tally>,
    armors: AHashMap<ArmorId, Tally>,
    accessories: AHashMap<AccessoryId, Tally>,
    builds: AHashMap<String, Tally>,
}

impl Tallies {
    fn record(&mut self, sheet: &CharacterSheet, wins: u64, fights: u64) {
        for ability in &sheet.abilities {
            self.abilities.entry(*ability).or_default().record(wins, fights);
        }

        let mut weapons: Vec<WeaponId> = sheet.equipped_weapons().collect();
        weapons.sort_unstable();
        weapons.dedup();
        for weapon in weapons {
            self.weapons.entry(weapon).or_default().record(wins, fights);
        }

        if let Some(armor) = sheet.armor {
            self.armors.entry(armor).or_default().record(wins, fights);
        }
        if let Some(accessory) = sheet.accessory {
            self.accessories.entry(accessory).or_default().record(wins, fights);
        }
        self.builds.entry(build_key(sheet)).or_default().record(wins, fights);
    }

    fn into_entries(self, baseline: f64) -> CategoryEntries {
        CategoryEntries {
            abilities: win_rates(self.abilities, baseline, |a| {
                (a.key(), a.definition().map(|d| d.name).unwrap_or_else(|| a.key()))
            }),
            weapons: win_rates(self.weapons, baseline, |w| {
                (w.key(), w.definition().map(|d| d.name).unwrap_or_else(|| w.key()))
            }),
            armors: win_rates(self.armors, baseline, |a| {
                (a.key(), a.definition().map(|d| d.name).unwrap_or_else(|| a.key()))
            }),
            accessories: win_rates(self.accessories, baseline, |a| {
                (a.key(), a.definition().map(|d| d.name).unwrap_or_else(|| a.key()))
            }),
            builds: self
                .builds
                .into_iter()
                .map(|(build, tally)| BuildEntry {
                    build,
                    appearances: tally.appearances,
                    wins: tally.wins,
                    total_fights: tally.fights,
                    win_rate: tally.win_rate(),
                })
                .collect(),
        }
    }
}

fn win_rates<K: Eq + Hash>(
    tallies: AHashMap<K, Tally>,
    baseline: f64,
    describe: impl Fn(&K) -> (&'static str, &'static str),
) -> Vec<WinRateEntry> {
    let mut entries: Vec<WinRateEntry> = tallies
        .iter()
        .map(|(key, tally)| {
            let (id, name) = describe(key);
            WinRateEntry::new(id, name, tally, baseline)
        })
        .collect();
    sort_by_win_rate(&mut entries);
    entries
}

/// Wins of `a` over `b` across `matches` combats
///
/// Sides alternate every match so the left-side initiative tie-break
/// favors neither fighter.
pub fn play_pair<R: Rng + ?Sized>(a: &Fighter, b: &Fighter, matches: u32, rng: &mut R) -> u64 {
    let mut a_wins = 0;
    for m in 0..matches {
        let a_left = m % 2 == 0;
        let (left, right) = if a_left { (a, b) } else { (b, a) };
        let outcome = Combat::new(left.clone(), right.clone()).run(rng);
        if (outcome.winner == Side::Left) == a_left {
            a_wins += 1;
        }
    }
    a_wins
}

struct PairResult {
    first: usize,
    second: usize,
    first_wins: u64,
}

/// Round-robin pairs of `n` players
fn round_robin(n: usize) -> Vec<(usize, usize)> {
    (0..n).flat_map(|i| (i + 1..n).map(move |j| (i, j))).collect()
}

/// Run the balance simulation
///
/// Each cycle builds a fresh pool of players and fights every pairing in
/// parallel. Every cycle and pairing draws from its own generator derived
/// from the configured seed, so a run is reproducible.
pub fn run_balance_simulation(config: &BalanceConfig) -> BalanceReport {
    let start = Instant::now();
    let matches = config.matches_per_pair as u64;

    let mut tallies = Tallies::default();
    let mut total_fights = 0u64;
    let mut next_id = 1u64;

    for cycle in 0..config.cycles {
        let cycle_seed = derive_seed(config.seed, cycle as u64);
        let mut rng = seeded_rng(cycle_seed);

        let players: Vec<CharacterSheet> = (0..config.players_per_cycle)
            .map(|_| {
                let id = CharacterId(next_id);
                next_id += 1;
                build_random_player(id, config.target_level, &mut rng)
            })
            .collect();
        let fighters: Vec<Fighter> = players.iter().map(Fighter::from_sheet).collect();

        let pairs = round_robin(players.len());
        let results: Vec<PairResult> = pairs
            .par_iter()
            .enumerate()
            .map(|(index, &(first, second))| {
                let mut rng = seeded_rng(derive_seed(cycle_seed, index as u64 + 1));
                let first_wins = play_pair(&fighters[first], &fighters[second], config.matches_per_pair, &mut rng);
                PairResult {
                    first,
                    second,
                    first_wins,
                }
            })
            .collect();

        for result in results {
            debug!(
                first = %players[result.first].name,
                second = %players[result.second].name,
                first_wins = result.first_wins,
                "Pairing finished"
            );
            tallies.record(&players[result.first], result.first_wins, matches);
            tallies.record(&players[result.second], matches - result.first_wins, matches);
            total_fights += matches;
        }

        info!(cycle = cycle + 1, cycles = config.cycles, "Balance cycle complete");
    }

    BalanceReport::new(
        config,
        tallies.into_entries(config.baseline_win_rate),
        total_fights,
        start.elapsed(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Attributes;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn small_config() -> BalanceConfig {
        BalanceConfig {
            cycles: 2,
            players_per_cycle: 4,
            target_level: 5,
            matches_per_pair: 20,
            seed: 99,
            ..BalanceConfig::default()
        }
    }

    #[test]
    fn test_round_robin_pairs() {
        assert_eq!(round_robin(3), vec![(0, 1), (0, 2), (1, 2)]);
        assert_eq!(round_robin(6).len(), 15);
        assert!(round_robin(1).is_empty());
    }

    #[test]
    fn test_identical_fighters_split_evenly() {
        let attrs = Attributes::new(100, 10, 8, 8);
        let a = Fighter::plain(CharacterId(1), "A", attrs);
        let b = Fighter::plain(CharacterId(2), "B", attrs);
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let wins = play_pair(&a, &b, 2000, &mut rng);
        assert!((850..=1150).contains(&wins), "wins {}", wins);
    }

    #[test]
    fn test_simulation_counts_fights() {
        let config = small_config();
        let report = run_balance_simulation(&config);
        assert_eq!(report.total_fights, config.total_fights());
        assert_eq!(report.total_fights, 2 * 6 * 20);
        assert!((0.0..=100.0).contains(&report.balance_score));
    }

    #[test]
    fn test_simulation_is_reproducible() {
        let config = small_config();
        let first = run_balance_simulation(&config);
        let second = run_balance_simulation(&config);
        assert_eq!(first.abilities, second.abilities);
        assert_eq!(first.weapons, second.weapons);
        assert_eq!(first.strong_builds, second.strong_builds);
        assert_eq!(first.balance_score, second.balance_score);
    }

    #[test]
    fn test_wins_never_exceed_fights() {
        let report = run_balance_simulation(&small_config());
        for entry in report.abilities.iter().chain(&report.weapons).chain(&report.armors) {
            assert!(entry.wins <= entry.total_fights);
            assert!(entry.appearances > 0);
        }
    }
}
