//! Brute Arena - deterministic auto-battler combat and progression engine
//!
//! Two character sheets go in, a winner and a replayable combat log come
//! out. Progression turns experience into level-ups and reward choices,
//! described as field updates the caller persists.

pub mod balance;
pub mod catalog;
pub mod character;
pub mod combat;
pub mod core;
pub mod progression;

use rand::Rng;

use crate::catalog::ComboId;
use crate::character::CharacterSheet;
use crate::combat::{Combat, CombatOutcome, Fighter};
use crate::core::error::Result;
use crate::core::types::Attributes;
use crate::progression::{FieldUpdates, LevelUp};

/// Fight two sheets to a decision; `a` stands on the left
pub fn resolve_combat<R: Rng + ?Sized>(a: &CharacterSheet, b: &CharacterSheet, rng: &mut R) -> CombatOutcome {
    Combat::new(Fighter::from_sheet(a), Fighter::from_sheet(b)).run(rng)
}

/// Attributes after equipment and active combos
pub fn effective_attributes(sheet: &CharacterSheet) -> Attributes {
    combat::effective_attributes(sheet)
}

/// Combos the sheet's equipment activates, in catalog order
pub fn active_combos(sheet: &CharacterSheet) -> Vec<ComboId> {
    combat::active_combos(sheet)
}

pub fn level_up<R: Rng + ?Sized>(sheet: &CharacterSheet, rng: &mut R) -> LevelUp {
    progression::level_up(sheet, rng)
}

/// Take the pending reward at `index`
pub fn apply_reward_choice(sheet: &CharacterSheet, index: usize) -> Result<FieldUpdates> {
    progression::choose_pending_reward(sheet, index)
}
