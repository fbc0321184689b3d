//! Offline balance simulator
//!
//! Levels random synthetic players, fights every pairing many times and
//! reports win rates per ability, weapon, armor, accessory and build.

pub mod players;
pub mod report;
pub mod simulation;

pub use players::{auto_equip, base_character, build_key, build_random_player, grow_one_level, SYNTHETIC_BASE};
pub use report::{BalanceGrade, BalanceReport, BalanceSummary, BuildEntry, Tally, WinRateEntry};
pub use simulation::{play_pair, run_balance_simulation};
