//! Persistent character sheet
//!
//! The sheet is owned by the caller. The engine only reads it; progression
//! describes changes as `FieldUpdates` which the caller persists.

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, AccessoryId, ArmorId, WeaponId};
use crate::character::lenient;
use crate::core::types::{Attributes, CharacterId};
use crate::progression::experience::xp_for_level;
use crate::progression::rewards::PendingReward;

/// Number of weapon slots on a sheet
pub const WEAPON_SLOTS: usize = 4;

/// Attributes of a freshly created character
pub const STARTING_ATTRIBUTES: Attributes = Attributes {
    max_health: 120,
    strength: 10,
    defense: 10,
    speed: 10,
};

/// An owned item, equipped or not
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum InventoryItem {
    Weapon(WeaponId),
    Armor(ArmorId),
    Accessory(AccessoryId),
}

impl InventoryItem {
    /// Resolve a persisted `{type, id}` pair
    pub fn from_record(kind: &str, id: &str) -> Option<InventoryItem> {
        match kind {
            "weapon" => WeaponId::from_key(id).map(InventoryItem::Weapon),
            "armor" => ArmorId::from_key(id).map(InventoryItem::Armor),
            "accessory" => AccessoryId::from_key(id).map(InventoryItem::Accessory),
            _ => None,
        }
    }
}

fn default_level() -> u32 {
    1
}

fn default_experience_next() -> u32 {
    xp_for_level(1)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CharacterSheet {
    pub id: CharacterId,
    pub name: String,
    #[serde(default = "default_level")]
    pub level: u32,
    #[serde(default)]
    pub experience: u32,
    #[serde(default = "default_experience_next")]
    pub experience_next: u32,
    /// Max health without stat boosts; mirrors `max_health` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_health: Option<i32>,
    pub attributes: Attributes,
    #[serde(default, deserialize_with = "lenient::weapon_slots")]
    pub weapons: [Option<WeaponId>; WEAPON_SLOTS],
    #[serde(default, deserialize_with = "lenient::armor")]
    pub armor: Option<ArmorId>,
    #[serde(default, deserialize_with = "lenient::accessory")]
    pub accessory: Option<AccessoryId>,
    #[serde(default, deserialize_with = "lenient::abilities")]
    pub abilities: Vec<AbilityId>,
    #[serde(default, deserialize_with = "lenient::inventory")]
    pub inventory: Vec<InventoryItem>,
    #[serde(default, deserialize_with = "lenient::pending_choices")]
    pub pending_choices: Option<Vec<PendingReward>>,
}

impl CharacterSheet {
    /// A level 1 character with starting attributes and nothing equipped
    pub fn new(id: CharacterId, name: impl Into<String>) -> Self {
        Self::with_attributes(id, name, STARTING_ATTRIBUTES)
    }

    pub fn with_attributes(id: CharacterId, name: impl Into<String>, attributes: Attributes) -> Self {
        Self {
            id,
            name: name.into(),
            level: 1,
            experience: 0,
            experience_next: xp_for_level(1),
            base_health: Some(attributes.max_health),
            attributes,
            weapons: [None; WEAPON_SLOTS],
            armor: None,
            accessory: None,
            abilities: Vec::new(),
            inventory: Vec::new(),
            pending_choices: None,
        }
    }

    /// Equipped weapons in slot order, empty slots skipped
    pub fn equipped_weapons(&self) -> impl Iterator<Item = WeaponId> + '_ {
        self.weapons.iter().flatten().copied()
    }

    pub fn first_empty_weapon_slot(&self) -> Option<usize> {
        self.weapons.iter().position(|slot| slot.is_none())
    }

    pub fn base_health(&self) -> i32 {
        self.base_health.unwrap_or(self.attributes.max_health)
    }

    pub fn knows_ability(&self, ability: AbilityId) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn owns_weapon(&self, weapon: WeaponId) -> bool {
        self.inventory.contains(&InventoryItem::Weapon(weapon)) || self.equipped_weapons().any(|w| w == weapon)
    }

    pub fn owns_armor(&self, armor: ArmorId) -> bool {
        self.inventory.contains(&InventoryItem::Armor(armor)) || self.armor == Some(armor)
    }

    pub fn owns_accessory(&self, accessory: AccessoryId) -> bool {
        self.inventory.contains(&InventoryItem::Accessory(accessory)) || self.accessory == Some(accessory)
    }

    /// Owned weapons (inventory and equipped), deduplicated, catalog order
    pub fn owned_weapons(&self) -> Vec<WeaponId> {
        WeaponId::all().iter().copied().filter(|w| self.owns_weapon(*w)).collect()
    }

    pub fn owned_armors(&self) -> Vec<ArmorId> {
        ArmorId::all().iter().copied().filter(|a| self.owns_armor(*a)).collect()
    }

    pub fn owned_accessories(&self) -> Vec<AccessoryId> {
        AccessoryId::all().iter().copied().filter(|a| self.owns_accessory(*a)).collect()
    }
}
