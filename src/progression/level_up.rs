//! Level-up stat growth and reward offers

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::catalog::{AbilityId, AccessoryId, ArmorId, StatBoostId, WeaponId};
use crate::character::CharacterSheet;
use crate::core::types::Attributes;
use crate::progression::experience::xp_for_level;
use crate::progression::rewards::{FieldUpdates, RewardChoice};

/// Rewards offered per level-up
pub const REWARD_CHOICES: usize = 3;

/// Health gained per level, inclusive
const HEALTH_GROWTH: (i32, i32) = (8, 15);
/// Strength, defense and speed gained per level, inclusive
const STAT_GROWTH: (i32, i32) = (1, 2);

/// Third offer: below this roll it is a boost
const THIRD_OFFER_BOOST_ROLL: f64 = 0.5;
/// Third offer: below this roll (and above the boost roll) it is armor
const THIRD_OFFER_ARMOR_ROLL: f64 = 0.75;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LevelUp {
    pub new_level: u32,
    pub experience_next: u32,
    /// Attributes gained this level
    pub deltas: Attributes,
    /// Attributes after the gain
    pub attributes: Attributes,
    pub reward_choices: Vec<RewardChoice>,
}

impl LevelUp {
    /// The base health is reset to the new max health
    pub fn field_updates(&self) -> FieldUpdates {
        FieldUpdates {
            level: Some(self.new_level),
            experience_next: Some(self.experience_next),
            attributes: Some(self.attributes),
            base_health: Some(self.attributes.max_health),
            pending_choices: Some(Some(self.reward_choices.clone())),
            ..FieldUpdates::default()
        }
    }
}

fn roll_growth<R: Rng + ?Sized>(rng: &mut R) -> Attributes {
    Attributes {
        max_health: rng.gen_range(HEALTH_GROWTH.0..=HEALTH_GROWTH.1),
        strength: rng.gen_range(STAT_GROWTH.0..=STAT_GROWTH.1),
        defense: rng.gen_range(STAT_GROWTH.0..=STAT_GROWTH.1),
        speed: rng.gen_range(STAT_GROWTH.0..=STAT_GROWTH.1),
    }
}

/// Advance a sheet by one level
pub fn level_up<R: Rng + ?Sized>(sheet: &CharacterSheet, rng: &mut R) -> LevelUp {
    let new_level = sheet.level + 1;
    let deltas = roll_growth(rng);
    let reward_choices = generate_reward_choices(sheet, rng);

    LevelUp {
        new_level,
        experience_next: xp_for_level(new_level),
        deltas,
        attributes: sheet.attributes.plus(&deltas),
        reward_choices,
    }
}

fn unowned<T: Copy>(all: &[T], owned: impl Fn(T) -> bool) -> Vec<T> {
    all.iter().copied().filter(|id| !owned(*id)).collect()
}

fn pick_boost<R: Rng + ?Sized>(offered: &[RewardChoice], rng: &mut R) -> Option<RewardChoice> {
    let fresh: Vec<StatBoostId> = unowned(StatBoostId::all(), |boost| {
        offered.contains(&RewardChoice::StatBoost(boost))
    });
    fresh.choose(rng).copied().map(RewardChoice::StatBoost)
}

/// Up to three distinct rewards, never something the sheet already owns
///
/// One unowned weapon and one unknown ability when any remain, then a third
/// offer that is a boost, armor or an accessory. Missing offers are filled
/// with boosts not yet on the list.
pub fn generate_reward_choices<R: Rng + ?Sized>(sheet: &CharacterSheet, rng: &mut R) -> Vec<RewardChoice> {
    let mut choices = Vec::with_capacity(REWARD_CHOICES);

    let weapons = unowned(WeaponId::all(), |w| sheet.owns_weapon(w));
    if let Some(weapon) = weapons.choose(rng) {
        choices.push(RewardChoice::Weapon(*weapon));
    }

    let abilities = unowned(AbilityId::all(), |a| sheet.knows_ability(a));
    if let Some(ability) = abilities.choose(rng) {
        choices.push(RewardChoice::Ability(*ability));
    }

    let roll: f64 = rng.gen();
    let third = if roll < THIRD_OFFER_BOOST_ROLL {
        None
    } else if roll < THIRD_OFFER_ARMOR_ROLL {
        unowned(ArmorId::all(), |a| sheet.owns_armor(a))
            .choose(rng)
            .copied()
            .map(RewardChoice::Armor)
    } else {
        unowned(AccessoryId::all(), |a| sheet.owns_accessory(a))
            .choose(rng)
            .copied()
            .map(RewardChoice::Accessory)
    };
    if let Some(third) = third.or_else(|| pick_boost(&choices, rng)) {
        choices.push(third);
    }

    while choices.len() < REWARD_CHOICES {
        match pick_boost(&choices, rng) {
            Some(boost) => choices.push(boost),
            None => break,
        }
    }

    choices
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::InventoryItem;
    use crate::core::types::CharacterId;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn sheet() -> CharacterSheet {
        CharacterSheet::new(CharacterId(5), "Mira")
    }

    #[test]
    fn test_growth_within_bounds() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..200 {
            let growth = roll_growth(&mut rng);
            assert!((8..=15).contains(&growth.max_health));
            assert!((1..=2).contains(&growth.strength));
            assert!((1..=2).contains(&growth.defense));
            assert!((1..=2).contains(&growth.speed));
        }
    }

    #[test]
    fn test_level_up_updates() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let base = sheet();
        let result = level_up(&base, &mut rng);

        assert_eq!(result.new_level, 2);
        assert_eq!(result.experience_next, 130);
        assert_eq!(result.attributes, base.attributes.plus(&result.deltas));
        assert_eq!(result.reward_choices.len(), REWARD_CHOICES);

        let updates = result.field_updates();
        assert_eq!(updates.base_health, Some(result.attributes.max_health));
        assert_eq!(updates.experience, None);
    }

    #[test]
    fn test_fresh_sheet_offers_weapon_and_ability_first() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let choices = generate_reward_choices(&sheet(), &mut rng);
            assert_eq!(choices.len(), 3);
            assert!(matches!(choices[0], RewardChoice::Weapon(_)));
            assert!(matches!(choices[1], RewardChoice::Ability(_)));
        }
    }

    #[test]
    fn test_never_offers_owned_items() {
        let mut owner = sheet();
        owner.weapons[0] = Some(WeaponId::Sword);
        owner.inventory = WeaponId::all()
            .iter()
            .filter(|w| **w != WeaponId::Sword && **w != WeaponId::Katana)
            .map(|w| InventoryItem::Weapon(*w))
            .collect();
        owner.abilities = AbilityId::all().to_vec();
        owner.armor = Some(ArmorId::Plate);

        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..100 {
            let choices = generate_reward_choices(&owner, &mut rng);
            assert_eq!(choices.len(), 3);
            assert_eq!(choices[0], RewardChoice::Weapon(WeaponId::Katana));
            assert!(!choices.iter().any(|c| matches!(c, RewardChoice::Ability(_))));
            assert!(!choices.contains(&RewardChoice::Armor(ArmorId::Plate)));
        }
    }

    #[test]
    fn test_choices_are_distinct() {
        let mut owner = sheet();
        owner.inventory = WeaponId::all().iter().map(|w| InventoryItem::Weapon(*w)).collect();
        owner.abilities = AbilityId::all().to_vec();

        let mut rng = ChaCha8Rng::seed_from_u64(8);
        for _ in 0..100 {
            let choices = generate_reward_choices(&owner, &mut rng);
            assert_eq!(choices.len(), 3);
            for (i, a) in choices.iter().enumerate() {
                assert!(choices[i + 1..].iter().all(|b| b != a));
            }
        }
    }
}
