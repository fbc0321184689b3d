//! Synthetic players for balance runs

use rand::Rng;

use crate::catalog::{ArmorId, WeaponId};
use crate::character::{CharacterSheet, InventoryItem};
use crate::core::types::{Attributes, CharacterId};
use crate::progression::{choose_pending_reward, level_up};

/// Attributes every synthetic player starts from
pub const SYNTHETIC_BASE: Attributes = Attributes {
    max_health: 100,
    strength: 10,
    defense: 8,
    speed: 8,
};

const NAMES: &[&str] = &[
    "Warrior",
    "Barbarian",
    "Paladin",
    "Assassin",
    "Berserker",
    "Knight",
    "Druid",
    "Monk",
    "Ranger",
    "Warlock",
    "Gladiator",
    "Viking",
];

pub fn base_character(id: CharacterId) -> CharacterSheet {
    let name = format!("{}_{}", NAMES[id.0 as usize % NAMES.len()], id.0);
    CharacterSheet::with_attributes(id, name, SYNTHETIC_BASE)
}

/// Level once and take a random reward from the offers
pub fn grow_one_level<R: Rng + ?Sized>(sheet: &mut CharacterSheet, rng: &mut R) {
    let growth = level_up(sheet, rng);
    growth.field_updates().apply_to(sheet);

    let offered = growth.reward_choices.len();
    if offered == 0 {
        return;
    }
    let pick = rng.gen_range(0..offered);
    if let Ok(updates) = choose_pending_reward(sheet, pick) {
        updates.apply_to(sheet);
    }
}

/// Fill empty equipment slots from the inventory
///
/// Only touches empty slots: the strongest weapon by damage, the armor with
/// the most defense and the first accessory owned.
pub fn auto_equip(sheet: &mut CharacterSheet) {
    if sheet.equipped_weapons().next().is_none() {
        let best = sheet
            .inventory
            .iter()
            .filter_map(|item| match item {
                InventoryItem::Weapon(w) => Some(*w),
                _ => None,
            })
            .max_by_key(|w| weapon_damage(*w));
        sheet.weapons[0] = best;
    }

    if sheet.armor.is_none() {
        sheet.armor = sheet
            .inventory
            .iter()
            .filter_map(|item| match item {
                InventoryItem::Armor(a) => Some(*a),
                _ => None,
            })
            .max_by_key(|a| armor_defense(*a));
    }

    if sheet.accessory.is_none() {
        sheet.accessory = sheet.inventory.iter().find_map(|item| match item {
            InventoryItem::Accessory(a) => Some(*a),
            _ => None,
        });
    }
}

fn weapon_damage(weapon: WeaponId) -> i32 {
    weapon.definition().map(|d| d.damage).unwrap_or(0)
}

fn armor_defense(armor: ArmorId) -> i32 {
    armor.definition().map(|d| d.defense).unwrap_or(0)
}

/// A player levelled from 1 to `target_level`, equipped
pub fn build_random_player<R: Rng + ?Sized>(id: CharacterId, target_level: u32, rng: &mut R) -> CharacterSheet {
    let mut sheet = base_character(id);
    while sheet.level < target_level {
        grow_one_level(&mut sheet, rng);
    }
    auto_equip(&mut sheet);
    sheet
}

/// Display key of a build: weapons, armor, then abilities sorted by name
pub fn build_key(sheet: &CharacterSheet) -> String {
    let mut parts: Vec<&str> = sheet
        .equipped_weapons()
        .map(|w| w.definition().map(|d| d.name).unwrap_or_else(|| w.key()))
        .collect();
    if let Some(armor) = sheet.armor {
        parts.push(armor.definition().map(|d| d.name).unwrap_or_else(|| armor.key()));
    }

    let mut abilities: Vec<&str> = sheet
        .abilities
        .iter()
        .map(|a| a.definition().map(|d| d.name).unwrap_or_else(|| a.key()))
        .collect();
    abilities.sort_unstable();
    parts.extend(abilities);

    if parts.is_empty() {
        "(unequipped)".to_string()
    } else {
        parts.join(" + ")
    }
}
