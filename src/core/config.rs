//! Balance simulation configuration with documented constants
//!
//! Engine rules are fixed constants (see `combat::constants`). What is
//! tunable is the offline balance simulator: how many synthetic players to
//! build, how far to level them, and how many matches to run per pairing.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ArenaError, Result};

/// Configuration for the offline balance simulator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalanceConfig {
    /// Number of independent player pools to generate
    ///
    /// Each cycle builds a fresh pool, so more cycles means more distinct
    /// builds sampled.
    pub cycles: u32,

    /// Synthetic players built per cycle
    ///
    /// Every pair fights, so the number of pairings grows quadratically.
    pub players_per_cycle: u32,

    /// Level every synthetic player is grown to before fighting
    pub target_level: u32,

    /// Combats run for each pairing
    ///
    /// Win rates converge slowly; a few thousand keeps the noise under 1%.
    pub matches_per_pair: u32,

    /// Base seed; every cycle and pairing derives its own generator from it
    pub seed: u64,

    /// Win rate the report measures impact against (percent)
    pub baseline_win_rate: f64,

    /// Builds above this win rate (percent) are reported as over-performing
    pub strong_build_threshold: f64,

    /// Minimum appearances before a build can be reported
    pub min_build_appearances: u32,

    /// Abilities and weapons below this win rate (percent) are reported as weak
    pub weak_threshold: f64,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            cycles: 5,
            players_per_cycle: 6,
            target_level: 20,
            matches_per_pair: 10_000,
            seed: 12345,
            baseline_win_rate: 50.0,
            strong_build_threshold: 55.0,
            min_build_appearances: 3,
            weak_threshold: 48.0,
        }
    }
}

impl BalanceConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: BalanceConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.players_per_cycle < 2 {
            return Err(ArenaError::InvalidConfig(format!(
                "players_per_cycle ({}) must be at least 2 to form a pairing",
                self.players_per_cycle
            )));
        }

        if self.target_level == 0 {
            return Err(ArenaError::InvalidConfig(
                "target_level must be at least 1".into(),
            ));
        }

        if self.weak_threshold >= self.strong_build_threshold {
            return Err(ArenaError::InvalidConfig(format!(
                "weak_threshold ({}) should be < strong_build_threshold ({})",
                self.weak_threshold, self.strong_build_threshold
            )));
        }

        Ok(())
    }

    /// Number of pairings in one cycle
    pub fn pairs_per_cycle(&self) -> u64 {
        let n = self.players_per_cycle as u64;
        n * n.saturating_sub(1) / 2
    }

    /// Total combats the configuration will run
    pub fn total_fights(&self) -> u64 {
        self.cycles as u64 * self.pairs_per_cycle() * self.matches_per_pair as u64
    }
}
