//! Equipment and combo resolution
//!
//! Effective attributes are the base attributes plus flat item bonuses, then
//! each active combo's percentage modifiers in catalog order, truncating
//! after every multiplication.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{ComboBonus, ComboDefinition, ComboId, StatModifier, WeaponId, WeaponRequirement, COMBO_LIBRARY};
use crate::character::CharacterSheet;
use crate::core::types::Attributes;

/// Resolver output: what a sheet fights with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedLoadout {
    pub attributes: Attributes,
    /// Active combos in catalog order
    pub combos: Vec<ComboId>,
}

/// Resolve effective attributes and active combos in one pass
pub fn resolve_loadout(sheet: &CharacterSheet) -> ResolvedLoadout {
    let active = active_combo_definitions(sheet);
    let mut attributes = flat_attributes(sheet);
    for def in &active {
        if let ComboBonus::Stats(modifier) = def.bonus {
            apply_modifier(&mut attributes, &modifier);
        }
    }

    ResolvedLoadout {
        attributes,
        combos: active.iter().map(|def| def.id).collect(),
    }
}

pub fn effective_attributes(sheet: &CharacterSheet) -> Attributes {
    resolve_loadout(sheet).attributes
}

pub fn active_combos(sheet: &CharacterSheet) -> Vec<ComboId> {
    active_combo_definitions(sheet).iter().map(|def| def.id).collect()
}

/// Base attributes plus every equipped item's flat bonus
///
/// Unknown ids never reach this point; a missing catalog entry contributes
/// nothing.
pub fn flat_attributes(sheet: &CharacterSheet) -> Attributes {
    let mut stats = sheet.attributes;

    for weapon in sheet.equipped_weapons().filter_map(|id| id.definition()) {
        stats.strength += weapon.damage;
        stats.speed += weapon.speed;
    }

    if let Some(armor) = sheet.armor.and_then(|id| id.definition()) {
        stats.defense += armor.defense;
        stats.speed += armor.speed;
        stats.max_health += armor.health;
    }

    if let Some(accessory) = sheet.accessory.and_then(|id| id.definition()) {
        stats.strength += accessory.strength;
        stats.defense += accessory.defense;
        stats.speed += accessory.speed;
        stats.max_health += accessory.health;
    }

    stats
}

pub(crate) fn active_combo_definitions(sheet: &CharacterSheet) -> Vec<&'static ComboDefinition> {
    let equipped: Vec<WeaponId> = sheet.equipped_weapons().collect();
    if equipped.is_empty() {
        return Vec::new();
    }

    COMBO_LIBRARY
        .iter()
        .filter(|def| {
            if let Some(required) = def.accessory {
                if sheet.accessory != Some(required) {
                    return false;
                }
            }
            requirement_met(&def.weapons, &equipped)
        })
        .filter(|def| {
            let ok = def.bonus.is_well_formed();
            if !ok {
                warn!(combo = def.id.key(), "Skipping combo with malformed bonus");
            }
            ok
        })
        .collect()
}

/// Multiset containment or distinct-count check against equipped weapons
pub fn requirement_met(requirement: &WeaponRequirement, equipped: &[WeaponId]) -> bool {
    match requirement {
        WeaponRequirement::AnyDistinct(count) => {
            let mut distinct = equipped.to_vec();
            distinct.sort();
            distinct.dedup();
            distinct.len() >= *count
        }
        WeaponRequirement::Exact(required) => {
            let mut available = equipped.to_vec();
            required.iter().all(|weapon| match available.iter().position(|w| w == weapon) {
                Some(index) => {
                    available.swap_remove(index);
                    true
                }
                None => false,
            })
        }
    }
}

fn apply_modifier(stats: &mut Attributes, modifier: &StatModifier) {
    stats.strength = scale_stat(stats.strength, modifier.strength);
    stats.defense = scale_stat(stats.defense, modifier.defense);
    stats.speed = scale_stat(stats.speed, modifier.speed);
    stats.max_health = scale_stat(stats.max_health, modifier.health);
}

fn scale_stat(value: i32, percent: f64) -> i32 {
    if percent == 0.0 {
        return value;
    }
    (value as f64 * (1.0 + percent)).trunc() as i32
}
