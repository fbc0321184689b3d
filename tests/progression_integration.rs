//! Progression integration tests: awards, level-ups and reward choices

use proptest::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use brute_arena::catalog::{AbilityId, AccessoryId, ArmorId, StatBoostId, WeaponId};
use brute_arena::character::{CharacterSheet, InventoryItem};
use brute_arena::core::error::ArenaError;
use brute_arena::core::types::CharacterId;
use brute_arena::progression::{
    award_experience, experience_for_result, reward_updates, xp_for_level, RewardChoice, LEVEL_CAP,
};
use brute_arena::{apply_reward_choice, level_up, resolve_combat};

fn fresh(id: u64) -> CharacterSheet {
    CharacterSheet::new(CharacterId(id), format!("Hero_{}", id))
}

#[test]
fn test_match_to_level_up_flow() {
    let mut winner = fresh(1);
    let loser = fresh(2);
    let mut rng = ChaCha8Rng::seed_from_u64(31);

    // Two wins against a level 1 opponent: 35 each
    for _ in 0..2 {
        let gained = experience_for_result(true, winner.level, loser.level);
        assert_eq!(gained, 35);
        award_experience(&winner, gained, &mut rng).updates.apply_to(&mut winner);
    }
    assert_eq!(winner.level, 1);
    assert_eq!(winner.experience, 70);

    let award = award_experience(&winner, 35, &mut rng);
    assert!(award.leveled_up());
    award.updates.apply_to(&mut winner);
    assert_eq!(winner.level, 2);
    assert_eq!(winner.experience, 5);
    assert_eq!(winner.experience_next, xp_for_level(2));
    assert_eq!(winner.pending_choices.as_ref().map(Vec::len), Some(3));
    assert_eq!(winner.base_health(), winner.attributes.max_health);

    let updates = apply_reward_choice(&winner, 1).unwrap();
    updates.apply_to(&mut winner);
    assert_eq!(winner.pending_choices, None);
    assert!(matches!(
        apply_reward_choice(&winner, 0),
        Err(ArenaError::NoPendingChoice(CharacterId(1)))
    ));
}

#[test]
fn test_out_of_range_choice_fails_loudly() {
    let mut sheet = fresh(1);
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let growth = level_up(&sheet, &mut rng);
    growth.field_updates().apply_to(&mut sheet);

    let err = apply_reward_choice(&sheet, 3).unwrap_err();
    assert!(matches!(err, ArenaError::InvalidRewardChoice { index: 3, available: 3 }));
    assert!(err.to_string().contains("3"));
}

#[test]
fn test_unrecognized_offer_does_not_shift_later_picks() {
    let json = r#"{
        "id": 8,
        "name": "Courier",
        "attributes": { "max_health": 100, "strength": 10, "defense": 10, "speed": 10 },
        "pending_choices": [
            { "type": "weapon", "id": "katana" },
            { "type": "weapon", "id": "plasma_whip" },
            { "type": "boost", "id": "boost_all" }
        ]
    }"#;
    let sheet: CharacterSheet = serde_json::from_str(json).unwrap();

    let updates = apply_reward_choice(&sheet, 2).unwrap();
    assert_eq!(updates.attributes.map(|a| (a.max_health, a.strength)), Some((110, 12)));
    assert_eq!(updates.weapons, None);

    let err = apply_reward_choice(&sheet, 1).unwrap_err();
    assert!(matches!(err, ArenaError::UnrecognizedRewardChoice { index: 1, .. }));
    assert!(err.to_string().contains("plasma_whip"));

    let mut taken = sheet.clone();
    apply_reward_choice(&sheet, 0).unwrap().apply_to(&mut taken);
    assert_eq!(taken.weapons[0], Some(WeaponId::Katana));
    assert_eq!(taken.pending_choices, None);
}

#[test]
fn test_leveled_sheet_still_fights() {
    let mut a = fresh(1);
    let mut rng = ChaCha8Rng::seed_from_u64(12);
    for _ in 0..5 {
        let growth = level_up(&a, &mut rng);
        growth.field_updates().apply_to(&mut a);
        apply_reward_choice(&a, 0).unwrap().apply_to(&mut a);
    }
    assert_eq!(a.level, 6);
    assert!(a.owned_weapons().len() >= 1);

    let outcome = resolve_combat(&a, &fresh(2), &mut rng);
    assert_eq!(outcome.log.last().map(|e| e.event.kind()), Some("end"));
}

#[test]
fn test_level_cap_stops_growth() {
    let mut sheet = fresh(1);
    sheet.level = LEVEL_CAP;
    sheet.experience = sheet.experience_next - 1;
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let award = award_experience(&sheet, 10_000, &mut rng);
    assert!(!award.leveled_up());
}

#[test]
fn test_sheet_roundtrip_after_rewards() {
    let mut sheet = fresh(1);
    reward_updates(&sheet, &RewardChoice::Weapon(WeaponId::Scythe)).apply_to(&mut sheet);
    reward_updates(&sheet, &RewardChoice::Armor(ArmorId::DragonScale)).apply_to(&mut sheet);
    reward_updates(&sheet, &RewardChoice::Accessory(AccessoryId::AmuletOfLife)).apply_to(&mut sheet);
    reward_updates(&sheet, &RewardChoice::Ability(AbilityId::Fury)).apply_to(&mut sheet);
    reward_updates(&sheet, &RewardChoice::StatBoost(StatBoostId::BoostAll)).apply_to(&mut sheet);

    assert_eq!(sheet.weapons[0], Some(WeaponId::Scythe));
    assert_eq!(sheet.armor, Some(ArmorId::DragonScale));
    assert_eq!(sheet.accessory, Some(AccessoryId::AmuletOfLife));
    assert_eq!(sheet.abilities, vec![AbilityId::Fury]);
    assert_eq!(sheet.attributes.max_health, 130);
    assert_eq!(sheet.base_health(), 130);

    let json = serde_json::to_string(&sheet).unwrap();
    let decoded: CharacterSheet = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, sheet);
}

fn owned_sheet_strategy() -> impl Strategy<Value = CharacterSheet> {
    (
        prop::collection::vec(0..WeaponId::all().len(), 0..8),
        prop::collection::vec(0..AbilityId::all().len(), 0..12),
        prop::option::of(0..ArmorId::all().len()),
        prop::collection::vec(0..AccessoryId::all().len(), 0..4),
        1u32..40,
    )
        .prop_map(|(weapons, abilities, armor, accessories, level)| {
            let mut sheet = fresh(1);
            sheet.level = level;
            for (slot, i) in weapons.iter().take(2).enumerate() {
                sheet.weapons[slot] = Some(WeaponId::all()[*i]);
            }
            sheet.inventory.extend(weapons.iter().skip(2).map(|i| InventoryItem::Weapon(WeaponId::all()[*i])));
            for i in abilities {
                let ability = AbilityId::all()[i];
                if !sheet.abilities.contains(&ability) {
                    sheet.abilities.push(ability);
                }
            }
            sheet.armor = armor.map(|i| ArmorId::all()[i]);
            sheet
                .inventory
                .extend(accessories.iter().map(|i| InventoryItem::Accessory(AccessoryId::all()[*i])));
            sheet
        })
}

fn already_owned(sheet: &CharacterSheet, choice: &RewardChoice) -> bool {
    match *choice {
        RewardChoice::Weapon(w) => sheet.owns_weapon(w),
        RewardChoice::Armor(a) => sheet.owns_armor(a),
        RewardChoice::Accessory(a) => sheet.owns_accessory(a),
        RewardChoice::Ability(a) => sheet.knows_ability(a),
        RewardChoice::StatBoost(_) => false,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    #[test]
    fn prop_level_up_offers_three_distinct_unowned(sheet in owned_sheet_strategy(), seed in any::<u64>()) {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let growth = level_up(&sheet, &mut rng);

        prop_assert_eq!(growth.reward_choices.len(), 3);
        for (i, choice) in growth.reward_choices.iter().enumerate() {
            prop_assert!(!already_owned(&sheet, choice), "offered owned {:?}", choice);
            prop_assert!(growth.reward_choices[i + 1..].iter().all(|other| other != choice));
        }
        prop_assert_eq!(growth.new_level, sheet.level + 1);
        prop_assert!((8..=15).contains(&growth.deltas.max_health));
    }

    #[test]
    fn prop_weapon_reward_fills_empty_first_slot(index in 0..WeaponId::all().len()) {
        let weapon = WeaponId::all()[index];
        let mut sheet = fresh(1);
        reward_updates(&sheet, &RewardChoice::Weapon(weapon)).apply_to(&mut sheet);

        prop_assert_eq!(sheet.weapons[0], Some(weapon));
        let copies = sheet.inventory.iter().filter(|item| **item == InventoryItem::Weapon(weapon)).count();
        prop_assert_eq!(copies, 1);
    }

    #[test]
    fn prop_xp_curve_matches_formula(level in 1u32..=LEVEL_CAP) {
        let expected = (100.0 * 1.3f64.powf(level as f64 - 1.0)).floor() as u32;
        prop_assert_eq!(xp_for_level(level), expected);
    }
}
