//! Balance report and serialization

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::config::BalanceConfig;

/// Builds above this win rate (percent) count against the balance score
pub const DOMINANT_BUILD_WIN_RATE: f64 = 60.0;
/// Most over-performing builds listed
pub const MAX_LISTED_BUILDS: usize = 30;

const SPREAD_PENALTY: f64 = 2.0;
const DOMINANT_BUILD_PENALTY: f64 = 5.0;

/// Appearances and results accumulated for one key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub appearances: u64,
    pub wins: u64,
    pub fights: u64,
}

impl Tally {
    pub fn record(&mut self, wins: u64, fights: u64) {
        self.appearances += 1;
        self.wins += wins;
        self.fights += fights;
    }

    /// Percent of fights won
    pub fn win_rate(&self) -> f64 {
        if self.fights == 0 {
            0.0
        } else {
            self.wins as f64 * 100.0 / self.fights as f64
        }
    }
}

/// Win rate of one ability, weapon, armor or accessory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinRateEntry {
    pub id: String,
    pub name: String,
    pub appearances: u64,
    pub wins: u64,
    pub total_fights: u64,
    pub win_rate: f64,
    /// Win rate minus the baseline, in percentage points
    pub impact: f64,
}

impl WinRateEntry {
    pub fn new(id: &str, name: &str, tally: &Tally, baseline: f64) -> Self {
        let win_rate = tally.win_rate();
        Self {
            id: id.to_string(),
            name: name.to_string(),
            appearances: tally.appearances,
            wins: tally.wins,
            total_fights: tally.fights,
            win_rate,
            impact: win_rate - baseline,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildEntry {
    pub build: String,
    pub appearances: u64,
    pub wins: u64,
    pub total_fights: u64,
    pub win_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BalanceGrade {
    Excellent,
    Good,
    Fair,
    NeedsWork,
}

impl BalanceGrade {
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            BalanceGrade::Excellent
        } else if score >= 70.0 {
            BalanceGrade::Good
        } else if score >= 50.0 {
            BalanceGrade::Fair
        } else {
            BalanceGrade::NeedsWork
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BalanceGrade::Excellent => "excellent",
            BalanceGrade::Good => "good",
            BalanceGrade::Fair => "fair",
            BalanceGrade::NeedsWork => "needs work",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceSummary {
    pub ability_spread: f64,
    pub weapon_spread: f64,
    pub dominant_build_count: usize,
    pub weak_ability_count: usize,
    pub weak_weapon_count: usize,
}

/// Complete balance run output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceReport {
    pub config: BalanceConfig,
    pub total_fights: u64,
    pub simulation_time_ms: u64,
    pub balance_score: f64,
    pub grade: BalanceGrade,
    pub abilities: Vec<WinRateEntry>,
    pub weapons: Vec<WinRateEntry>,
    pub armors: Vec<WinRateEntry>,
    pub accessories: Vec<WinRateEntry>,
    pub strong_builds: Vec<BuildEntry>,
    pub weak_abilities: Vec<WinRateEntry>,
    pub weak_weapons: Vec<WinRateEntry>,
    pub summary: BalanceSummary,
}

/// Highest win rate first; ties by id so output does not depend on map order
pub fn sort_by_win_rate(entries: &mut [WinRateEntry]) {
    entries.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate).then_with(|| a.id.cmp(&b.id)));
}

/// Highest minus lowest win rate; zero with fewer than two entries
pub fn spread(sorted: &[WinRateEntry]) -> f64 {
    match (sorted.first(), sorted.last()) {
        (Some(top), Some(bottom)) if sorted.len() > 1 => top.win_rate - bottom.win_rate,
        _ => 0.0,
    }
}

pub fn balance_score(ability_spread: f64, weapon_spread: f64, dominant_builds: usize) -> f64 {
    let score = 100.0
        - ability_spread * SPREAD_PENALTY
        - weapon_spread * SPREAD_PENALTY
        - dominant_builds as f64 * DOMINANT_BUILD_PENALTY;
    score.max(0.0)
}

/// Per-category entries, already sorted, handed to the report
#[derive(Debug, Clone, Default)]
pub struct CategoryEntries {
    pub abilities: Vec<WinRateEntry>,
    pub weapons: Vec<WinRateEntry>,
    pub armors: Vec<WinRateEntry>,
    pub accessories: Vec<WinRateEntry>,
    pub builds: Vec<BuildEntry>,
}

impl BalanceReport {
    pub fn new(config: &BalanceConfig, entries: CategoryEntries, total_fights: u64, elapsed: Duration) -> Self {
        let mut strong_builds: Vec<BuildEntry> = entries
            .builds
            .into_iter()
            .filter(|b| {
                b.win_rate > config.strong_build_threshold && b.appearances >= config.min_build_appearances as u64
            })
            .collect();
        strong_builds.sort_by(|a, b| b.win_rate.total_cmp(&a.win_rate).then_with(|| a.build.cmp(&b.build)));
        strong_builds.truncate(MAX_LISTED_BUILDS);

        let weak = |list: &[WinRateEntry]| -> Vec<WinRateEntry> {
            list.iter()
                .filter(|e| e.win_rate < config.weak_threshold)
                .cloned()
                .collect()
        };
        let weak_abilities = weak(&entries.abilities);
        let weak_weapons = weak(&entries.weapons);

        let ability_spread = spread(&entries.abilities);
        let weapon_spread = spread(&entries.weapons);
        let dominant_build_count = strong_builds
            .iter()
            .filter(|b| b.win_rate > DOMINANT_BUILD_WIN_RATE)
            .count();
        let score = balance_score(ability_spread, weapon_spread, dominant_build_count);

        Self {
            config: config.clone(),
            total_fights,
            simulation_time_ms: elapsed.as_millis() as u64,
            balance_score: score,
            grade: BalanceGrade::from_score(score),
            summary: BalanceSummary {
                ability_spread,
                weapon_spread,
                dominant_build_count,
                weak_ability_count: weak_abilities.len(),
                weak_weapon_count: weak_weapons.len(),
            },
            abilities: entries.abilities,
            weapons: entries.weapons,
            armors: entries.armors,
            accessories: entries.accessories,
            strong_builds,
            weak_abilities,
            weak_weapons,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn summary(&self) -> String {
        let mut out = format!(
            "Simulated {} fights in {}ms\nBalance score {:.0}/100 ({})\nAbility spread {:.1}%, weapon spread {:.1}%, {} dominant builds",
            self.total_fights,
            self.simulation_time_ms,
            self.balance_score,
            self.grade.label(),
            self.summary.ability_spread,
            self.summary.weapon_spread,
            self.summary.dominant_build_count,
        );

        for (title, list) in [
            ("Abilities", &self.abilities),
            ("Weapons", &self.weapons),
            ("Armors", &self.armors),
            ("Accessories", &self.accessories),
        ] {
            out.push_str(&format!("\n\n{}:", title));
            for entry in list {
                out.push_str(&format!(
                    "\n  {:<22} {:>6} seen {:>6.1}% {:>+6.1}",
                    entry.name, entry.appearances, entry.win_rate, entry.impact
                ));
            }
        }

        if !self.strong_builds.is_empty() {
            out.push_str("\n\nOver-performing builds:");
            for build in &self.strong_builds {
                out.push_str(&format!("\n  {:>5.1}%  {}", build.win_rate, build.build));
            }
        }

        for (title, list) in [("Weak abilities", &self.weak_abilities), ("Weak weapons", &self.weak_weapons)] {
            if !list.is_empty() {
                let names: Vec<&str> = list.iter().map(|e| e.name.as_str()).collect();
                out.push_str(&format!("\n\n{}: {}", title, names.join(", ")));
            }
        }

        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: &str, wins: u64, fights: u64) -> WinRateEntry {
        let tally = Tally {
            appearances: 1,
            wins,
            fights,
        };
        WinRateEntry::new(id, id, &tally, 50.0)
    }

    #[test]
    fn test_tally_win_rate() {
        let mut tally = Tally::default();
        assert_eq!(tally.win_rate(), 0.0);
        tally.record(30, 40);
        tally.record(10, 40);
        assert_eq!(tally.appearances, 2);
        assert_eq!(tally.win_rate(), 50.0);
    }

    #[test]
    fn test_sort_and_spread() {
        let mut entries = vec![entry("b", 40, 100), entry("a", 60, 100), entry("c", 40, 100)];
        sort_by_win_rate(&mut entries);
        let ids: Vec<&str> = entries.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(spread(&entries), 20.0);
        assert_eq!(spread(&entries[..1]), 0.0);
        assert_eq!(entries[0].impact, 10.0);
    }

    #[test]
    fn test_score_and_grade() {
        assert_eq!(balance_score(0.0, 0.0, 0), 100.0);
        assert_eq!(balance_score(5.0, 5.0, 1), 75.0);
        assert_eq!(balance_score(40.0, 40.0, 3), 0.0);
        assert_eq!(BalanceGrade::from_score(85.0), BalanceGrade::Excellent);
        assert_eq!(BalanceGrade::from_score(70.0), BalanceGrade::Good);
        assert_eq!(BalanceGrade::from_score(50.0), BalanceGrade::Fair);
        assert_eq!(BalanceGrade::from_score(49.9), BalanceGrade::NeedsWork);
    }

    #[test]
    fn test_report_filters_builds_and_weak_entries() {
        let build = |name: &str, appearances: u64, wins: u64| BuildEntry {
            build: name.to_string(),
            appearances,
            wins,
            total_fights: 100,
            win_rate: wins as f64,
        };
        let mut abilities = vec![entry("thorns", 45, 100), entry("fury", 55, 100)];
        sort_by_win_rate(&mut abilities);

        let entries = CategoryEntries {
            abilities,
            builds: vec![build("rare", 1, 90), build("strong", 4, 62), build("fine", 5, 52)],
            ..CategoryEntries::default()
        };
        let report = BalanceReport::new(&BalanceConfig::default(), entries, 400, Duration::from_millis(5));

        assert_eq!(report.strong_builds.len(), 1);
        assert_eq!(report.strong_builds[0].build, "strong");
        assert_eq!(report.summary.dominant_build_count, 1);
        assert_eq!(report.weak_abilities.len(), 1);
        assert_eq!(report.weak_abilities[0].id, "thorns");
        assert_eq!(report.summary.ability_spread, 10.0);
        // 100 - 2 * 10 - 5 * 1
        assert_eq!(report.balance_score, 75.0);
        assert_eq!(report.grade, BalanceGrade::Good);
        assert!(report.summary().contains("Balance score 75/100 (good)"));
    }
}
