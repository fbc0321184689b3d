//! Level-up rewards and the sheet updates they produce

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, AccessoryId, ArmorId, StatBoostId, WeaponId};
use crate::character::{CharacterSheet, InventoryItem, WEAPON_SLOTS};
use crate::core::error::{ArenaError, Result};
use crate::core::types::Attributes;

/// One of the options offered after a level-up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum RewardChoice {
    Weapon(WeaponId),
    Armor(ArmorId),
    Accessory(AccessoryId),
    Ability(AbilityId),
    #[serde(rename = "boost")]
    StatBoost(StatBoostId),
}

impl RewardChoice {
    /// Resolve a persisted `{type, id}` pair
    pub fn from_record(kind: &str, id: &str) -> Option<RewardChoice> {
        match kind {
            "weapon" => WeaponId::from_key(id).map(RewardChoice::Weapon),
            "armor" => ArmorId::from_key(id).map(RewardChoice::Armor),
            "accessory" => AccessoryId::from_key(id).map(RewardChoice::Accessory),
            "ability" => AbilityId::from_key(id).map(RewardChoice::Ability),
            "boost" => StatBoostId::from_key(id).map(RewardChoice::StatBoost),
            _ => None,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            RewardChoice::Weapon(_) => "weapon",
            RewardChoice::Armor(_) => "armor",
            RewardChoice::Accessory(_) => "accessory",
            RewardChoice::Ability(_) => "ability",
            RewardChoice::StatBoost(_) => "boost",
        }
    }

    pub fn id_key(&self) -> &'static str {
        match self {
            RewardChoice::Weapon(id) => id.key(),
            RewardChoice::Armor(id) => id.key(),
            RewardChoice::Accessory(id) => id.key(),
            RewardChoice::Ability(id) => id.key(),
            RewardChoice::StatBoost(id) => id.key(),
        }
    }

    /// Display name from the catalog, falling back to the id key
    pub fn name(&self) -> &'static str {
        let name = match self {
            RewardChoice::Weapon(id) => id.definition().map(|d| d.name),
            RewardChoice::Armor(id) => id.definition().map(|d| d.name),
            RewardChoice::Accessory(id) => id.definition().map(|d| d.name),
            RewardChoice::Ability(id) => id.definition().map(|d| d.name),
            RewardChoice::StatBoost(id) => id.definition().map(|d| d.name),
        };
        name.unwrap_or_else(|| self.id_key())
    }
}

/// One slot of a persisted pending set
///
/// Offers this build does not recognise keep their slot, so the indices of
/// the other offers never shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum PendingReward {
    Offered(RewardChoice),
    Unrecognized {
        #[serde(rename = "type")]
        kind: String,
        id: String,
    },
}

impl PendingReward {
    pub fn choice(&self) -> Option<&RewardChoice> {
        match self {
            PendingReward::Offered(choice) => Some(choice),
            PendingReward::Unrecognized { .. } => None,
        }
    }
}

impl From<RewardChoice> for PendingReward {
    fn from(choice: RewardChoice) -> Self {
        PendingReward::Offered(choice)
    }
}

/// Sheet fields changed by a progression operation
///
/// Absent fields are unchanged. `pending_choices` is doubly optional:
/// `Some(None)` clears the pending set.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FieldUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experience_next: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Attributes>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_health: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weapons: Option<[Option<WeaponId>; WEAPON_SLOTS]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub armor: Option<ArmorId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accessory: Option<AccessoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub abilities: Option<Vec<AbilityId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inventory: Option<Vec<InventoryItem>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pending_choices: Option<Option<Vec<RewardChoice>>>,
}

impl FieldUpdates {
    pub fn is_empty(&self) -> bool {
        *self == FieldUpdates::default()
    }

    /// Fields set on `later` win
    pub fn merge(&mut self, later: FieldUpdates) {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if later.$field.is_some() {
                    self.$field = later.$field;
                })*
            };
        }
        take!(
            level,
            experience,
            experience_next,
            attributes,
            base_health,
            weapons,
            armor,
            accessory,
            abilities,
            inventory,
            pending_choices
        );
    }

    /// Write the changed fields onto a sheet
    pub fn apply_to(&self, sheet: &mut CharacterSheet) {
        if let Some(level) = self.level {
            sheet.level = level;
        }
        if let Some(experience) = self.experience {
            sheet.experience = experience;
        }
        if let Some(next) = self.experience_next {
            sheet.experience_next = next;
        }
        if let Some(attributes) = self.attributes {
            sheet.attributes = attributes;
        }
        if let Some(base) = self.base_health {
            sheet.base_health = Some(base);
        }
        if let Some(weapons) = self.weapons {
            sheet.weapons = weapons;
        }
        if let Some(armor) = self.armor {
            sheet.armor = Some(armor);
        }
        if let Some(accessory) = self.accessory {
            sheet.accessory = Some(accessory);
        }
        if let Some(abilities) = &self.abilities {
            sheet.abilities = abilities.clone();
        }
        if let Some(inventory) = &self.inventory {
            sheet.inventory = inventory.clone();
        }
        if let Some(pending) = &self.pending_choices {
            sheet.pending_choices = pending
                .as_ref()
                .map(|choices| choices.iter().copied().map(PendingReward::from).collect());
        }
    }
}

fn with_item(sheet: &CharacterSheet, item: InventoryItem) -> Vec<InventoryItem> {
    let mut inventory = sheet.inventory.clone();
    inventory.push(item);
    inventory
}

/// Updates granting `choice` to the sheet
///
/// Items go to the inventory and are equipped only into an empty slot.
/// Boosts add their deltas; health boosts also raise the base health.
pub fn reward_updates(sheet: &CharacterSheet, choice: &RewardChoice) -> FieldUpdates {
    let mut updates = FieldUpdates::default();

    match *choice {
        RewardChoice::Weapon(weapon) => {
            updates.inventory = Some(with_item(sheet, InventoryItem::Weapon(weapon)));
            if let Some(slot) = sheet.first_empty_weapon_slot() {
                let mut weapons = sheet.weapons;
                weapons[slot] = Some(weapon);
                updates.weapons = Some(weapons);
            }
        }
        RewardChoice::Armor(armor) => {
            updates.inventory = Some(with_item(sheet, InventoryItem::Armor(armor)));
            if sheet.armor.is_none() {
                updates.armor = Some(armor);
            }
        }
        RewardChoice::Accessory(accessory) => {
            updates.inventory = Some(with_item(sheet, InventoryItem::Accessory(accessory)));
            if sheet.accessory.is_none() {
                updates.accessory = Some(accessory);
            }
        }
        RewardChoice::Ability(ability) => {
            if !sheet.knows_ability(ability) {
                let mut abilities = sheet.abilities.clone();
                abilities.push(ability);
                updates.abilities = Some(abilities);
            }
        }
        RewardChoice::StatBoost(boost) => {
            if let Some(def) = boost.definition() {
                updates.attributes = Some(sheet.attributes.plus(&def.deltas));
                if def.deltas.max_health != 0 {
                    updates.base_health = Some(sheet.base_health() + def.deltas.max_health);
                }
            }
        }
    }

    updates
}

/// Take the pending choice at `index`
///
/// The returned updates grant the reward and clear the pending set. An
/// unrecognized offer cannot be taken; the pending set is left as it was.
pub fn choose_pending_reward(sheet: &CharacterSheet, index: usize) -> Result<FieldUpdates> {
    let choices = sheet
        .pending_choices
        .as_ref()
        .ok_or(ArenaError::NoPendingChoice(sheet.id))?;
    let slot = choices.get(index).ok_or(ArenaError::InvalidRewardChoice {
        index,
        available: choices.len(),
    })?;
    let choice = match slot {
        PendingReward::Offered(choice) => choice,
        PendingReward::Unrecognized { kind, id } => {
            return Err(ArenaError::UnrecognizedRewardChoice {
                index,
                kind: kind.clone(),
                id: id.clone(),
            })
        }
    };

    let mut updates = reward_updates(sheet, choice);
    updates.pending_choices = Some(None);
    Ok(updates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::CharacterId;

    fn sheet() -> CharacterSheet {
        CharacterSheet::new(CharacterId(3), "Vex")
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_string(&RewardChoice::StatBoost(StatBoostId::BoostHp)).unwrap();
        assert_eq!(json, r#"{"type":"boost","id":"boost_hp"}"#);
        let json = serde_json::to_string(&RewardChoice::Ability(AbilityId::WarCry)).unwrap();
        assert_eq!(json, r#"{"type":"ability","id":"war_cry"}"#);
    }

    #[test]
    fn test_from_record() {
        assert_eq!(
            RewardChoice::from_record("weapon", "katana"),
            Some(RewardChoice::Weapon(WeaponId::Katana))
        );
        assert_eq!(RewardChoice::from_record("boost", "boost_all"), Some(RewardChoice::StatBoost(StatBoostId::BoostAll)));
        assert_eq!(RewardChoice::from_record("weapon", "laser"), None);
        assert_eq!(RewardChoice::from_record("pet", "katana"), None);
    }

    #[test]
    fn test_weapon_fills_first_empty_slot() {
        let mut sheet = sheet();
        sheet.weapons[0] = Some(WeaponId::Sword);
        let updates = reward_updates(&sheet, &RewardChoice::Weapon(WeaponId::Axe));
        assert_eq!(updates.weapons, Some([Some(WeaponId::Sword), Some(WeaponId::Axe), None, None]));
        assert_eq!(updates.inventory, Some(vec![InventoryItem::Weapon(WeaponId::Axe)]));
    }

    #[test]
    fn test_weapon_with_full_slots_goes_to_inventory_only() {
        let mut sheet = sheet();
        sheet.weapons = [Some(WeaponId::Sword); WEAPON_SLOTS];
        let updates = reward_updates(&sheet, &RewardChoice::Weapon(WeaponId::Axe));
        assert_eq!(updates.weapons, None);
        assert!(updates.inventory.is_some());
    }

    #[test]
    fn test_armor_does_not_replace_equipped() {
        let mut sheet = sheet();
        sheet.armor = Some(ArmorId::Leather);
        let updates = reward_updates(&sheet, &RewardChoice::Armor(ArmorId::Plate));
        assert_eq!(updates.armor, None);
        assert_eq!(updates.inventory, Some(vec![InventoryItem::Armor(ArmorId::Plate)]));
    }

    #[test]
    fn test_health_boost_raises_base_health() {
        let mut sheet = sheet();
        sheet.base_health = Some(110);
        let updates = reward_updates(&sheet, &RewardChoice::StatBoost(StatBoostId::BoostHp));
        assert_eq!(updates.attributes.map(|a| a.max_health), Some(145));
        assert_eq!(updates.base_health, Some(135));

        let updates = reward_updates(&sheet, &RewardChoice::StatBoost(StatBoostId::BoostStr));
        assert_eq!(updates.attributes.map(|a| a.strength), Some(15));
        assert_eq!(updates.base_health, None);
    }

    #[test]
    fn test_choose_pending_reward_clears_choices() {
        let mut sheet = sheet();
        sheet.pending_choices = Some(vec![
            RewardChoice::Ability(AbilityId::Thorns).into(),
            RewardChoice::StatBoost(StatBoostId::BoostDef).into(),
        ]);

        let updates = choose_pending_reward(&sheet, 0).unwrap();
        assert_eq!(updates.pending_choices, Some(None));
        updates.apply_to(&mut sheet);
        assert_eq!(sheet.abilities, vec![AbilityId::Thorns]);
        assert_eq!(sheet.pending_choices, None);
    }

    #[test]
    fn test_choose_pending_reward_errors() {
        let mut sheet = sheet();
        assert!(matches!(
            choose_pending_reward(&sheet, 0),
            Err(ArenaError::NoPendingChoice(CharacterId(3)))
        ));

        sheet.pending_choices = Some(vec![RewardChoice::StatBoost(StatBoostId::BoostDef).into()]);
        assert!(matches!(
            choose_pending_reward(&sheet, 3),
            Err(ArenaError::InvalidRewardChoice { index: 3, available: 1 })
        ));
    }

    #[test]
    fn test_unrecognized_offer_keeps_other_indices() {
        let mut sheet = sheet();
        sheet.pending_choices = Some(vec![
            RewardChoice::Weapon(WeaponId::Katana).into(),
            PendingReward::Unrecognized {
                kind: "weapon".into(),
                id: "plasma_whip".into(),
            },
            RewardChoice::StatBoost(StatBoostId::BoostAll).into(),
        ]);

        let err = choose_pending_reward(&sheet, 1).unwrap_err();
        assert!(matches!(
            err,
            ArenaError::UnrecognizedRewardChoice { index: 1, ref id, .. } if id == "plasma_whip"
        ));

        let updates = choose_pending_reward(&sheet, 2).unwrap();
        assert_eq!(updates.attributes.map(|a| a.max_health), Some(130));
        assert_eq!(updates.weapons, None);

        let updates = choose_pending_reward(&sheet, 0).unwrap();
        assert_eq!(updates.weapons.map(|w| w[0]), Some(Some(WeaponId::Katana)));
    }

    #[test]
    fn test_pending_reward_wire_format() {
        let known = serde_json::to_string(&PendingReward::from(RewardChoice::Armor(ArmorId::Plate))).unwrap();
        assert_eq!(known, r#"{"type":"armor","id":"plate"}"#);
        let unknown = PendingReward::Unrecognized {
            kind: "mount".into(),
            id: "horse".into(),
        };
        assert_eq!(serde_json::to_string(&unknown).unwrap(), r#"{"type":"mount","id":"horse"}"#);
    }

    #[test]
    fn test_merge_prefers_later() {
        let mut first = FieldUpdates {
            level: Some(2),
            experience: Some(10),
            ..FieldUpdates::default()
        };
        first.merge(FieldUpdates {
            experience: Some(20),
            armor: Some(ArmorId::Plate),
            ..FieldUpdates::default()
        });
        assert_eq!(first.level, Some(2));
        assert_eq!(first.experience, Some(20));
        assert_eq!(first.armor, Some(ArmorId::Plate));
        assert!(!first.is_empty());
        assert!(FieldUpdates::default().is_empty());
    }

    #[test]
    fn test_updates_serialize_only_changed_fields() {
        let updates = FieldUpdates {
            level: Some(4),
            pending_choices: Some(None),
            ..FieldUpdates::default()
        };
        let json = serde_json::to_string(&updates).unwrap();
        assert_eq!(json, r#"{"level":4,"pending_choices":null}"#);
    }
}
