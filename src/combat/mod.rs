//! Combat resolution
//!
//! Sheets are resolved into loadouts, loadouts into fighters, and fighters
//! are run through the turn engine which produces an outcome and a log.

pub mod attack;
pub mod constants;
pub mod engine;
pub mod equipment;
pub mod fighter;
pub mod log;

pub use attack::{dodge_chance, mitigate, resolve_attack, scale, Strike};
pub use engine::{Combat, CombatOutcome, CombatPhase};
pub use equipment::{active_combos, effective_attributes, flat_attributes, requirement_met, resolve_loadout, ResolvedLoadout};
pub use fighter::{AbilityEffects, Buff, ComboEffects, Fighter, Granted, Poison};
pub use log::{
    CombatLog, Decision, EffectSource, FighterCard, HealthBar, HealthSnapshot, LogEntry, LogEvent, StrikeModifier,
};
