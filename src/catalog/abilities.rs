//! Learnable abilities

use serde::{Deserialize, Serialize};

use crate::catalog::effects::{is_factor, is_fraction, ChanceEffect, DamageBuff, PoisonDose, ThresholdEffect};

/// Ability identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityId {
    CriticalStrike,
    Evasion,
    Counterattack,
    Healing,
    Fury,
    DoubleStrike,
    Vampiric,
    MagicShield,
    Venom,
    WarCry,
    LastStand,
    Thorns,
    Regeneration,
    DivineBlessing,
    ProtectiveAura,
}

impl AbilityId {
    pub fn all() -> &'static [AbilityId] {
        &[
            AbilityId::CriticalStrike,
            AbilityId::Evasion,
            AbilityId::Counterattack,
            AbilityId::Healing,
            AbilityId::Fury,
            AbilityId::DoubleStrike,
            AbilityId::Vampiric,
            AbilityId::MagicShield,
            AbilityId::Venom,
            AbilityId::WarCry,
            AbilityId::LastStand,
            AbilityId::Thorns,
            AbilityId::Regeneration,
            AbilityId::DivineBlessing,
            AbilityId::ProtectiveAura,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            AbilityId::CriticalStrike => "critical_strike",
            AbilityId::Evasion => "evasion",
            AbilityId::Counterattack => "counterattack",
            AbilityId::Healing => "healing",
            AbilityId::Fury => "fury",
            AbilityId::DoubleStrike => "double_strike",
            AbilityId::Vampiric => "vampiric",
            AbilityId::MagicShield => "magic_shield",
            AbilityId::Venom => "venom",
            AbilityId::WarCry => "war_cry",
            AbilityId::LastStand => "last_stand",
            AbilityId::Thorns => "thorns",
            AbilityId::Regeneration => "regeneration",
            AbilityId::DivineBlessing => "divine_blessing",
            AbilityId::ProtectiveAura => "protective_aura",
        }
    }

    pub fn from_key(key: &str) -> Option<AbilityId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static AbilityDefinition> {
        ABILITY_LIBRARY.iter().find(|def| def.id == *self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbilityKind {
    /// Always on
    Passive,
    /// Limited number of uses per combat
    Active,
}

/// When the engine consults an ability
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    OnAttack,
    OnDefend,
    OnHitReceived,
    OnLowHealth,
    OnCombatStart,
    OnLethalBlow,
    OnFirstHit,
    TurnStart,
}

/// What an ability does once triggered
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AbilityEffect {
    /// Chance to multiply outgoing damage
    CriticalStrike(ChanceEffect),
    /// Flat addition to dodge chance
    Evasion { dodge_bonus: f64 },
    /// Chance to hit back for a multiple of strength
    Counterattack(ChanceEffect),
    /// Heal a fraction of max health once health falls to the threshold
    Healing(ThresholdEffect),
    /// Damage multiplier while at or below the threshold
    Fury(ThresholdEffect),
    /// Chance of a second hit for a fraction of the damage
    DoubleStrike(ChanceEffect),
    /// Heal a fraction of damage dealt
    Vampiric { fraction: f64 },
    /// Multiplier on incoming damage
    MagicShield { factor: f64 },
    /// Poison inflicted with the first landed hit
    Venom(PoisonDose),
    /// Damage buff pushed at combat start
    WarCry(DamageBuff),
    /// Survive a lethal blow at 1 health
    LastStand,
    /// Reflect a fraction of damage received
    Thorns { fraction: f64 },
    /// Heal a fraction of max health every turn
    Regeneration { fraction: f64 },
    /// Heal a fraction of max health at turn start once at or below the threshold
    DivineBlessing(ThresholdEffect),
    /// Multiplier on incoming damage
    ProtectiveAura { factor: f64 },
}

impl AbilityEffect {
    pub fn is_well_formed(&self) -> bool {
        match *self {
            AbilityEffect::CriticalStrike(roll)
            | AbilityEffect::Counterattack(roll)
            | AbilityEffect::DoubleStrike(roll) => roll.is_well_formed(),
            AbilityEffect::Healing(threshold)
            | AbilityEffect::Fury(threshold)
            | AbilityEffect::DivineBlessing(threshold) => threshold.is_well_formed(),
            AbilityEffect::Evasion { dodge_bonus } => is_fraction(dodge_bonus),
            AbilityEffect::Vampiric { fraction }
            | AbilityEffect::Thorns { fraction }
            | AbilityEffect::Regeneration { fraction } => is_fraction(fraction),
            AbilityEffect::MagicShield { factor } | AbilityEffect::ProtectiveAura { factor } => {
                is_factor(factor)
            }
            AbilityEffect::Venom(dose) => dose.is_well_formed(),
            AbilityEffect::WarCry(buff) => buff.is_well_formed(),
            AbilityEffect::LastStand => true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AbilityDefinition {
    pub id: AbilityId,
    pub name: &'static str,
    pub description: &'static str,
    pub kind: AbilityKind,
    pub trigger: Trigger,
    /// Uses per combat for active abilities
    pub uses: Option<u32>,
    pub effect: AbilityEffect,
}

pub static ABILITY_LIBRARY: &[AbilityDefinition] = &[
    AbilityDefinition {
        id: AbilityId::CriticalStrike,
        name: "Critical Strike",
        description: "25% chance to deal double damage",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnAttack,
        uses: None,
        effect: AbilityEffect::CriticalStrike(ChanceEffect { chance: 0.25, factor: 2.0 }),
    },
    AbilityDefinition {
        id: AbilityId::Evasion,
        name: "Evasion",
        description: "+20% dodge chance",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnDefend,
        uses: None,
        effect: AbilityEffect::Evasion { dodge_bonus: 0.20 },
    },
    AbilityDefinition {
        id: AbilityId::Counterattack,
        name: "Counterattack",
        description: "25% chance to strike back when hit",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnHitReceived,
        uses: None,
        effect: AbilityEffect::Counterattack(ChanceEffect { chance: 0.25, factor: 1.2 }),
    },
    AbilityDefinition {
        id: AbilityId::Healing,
        name: "Healing",
        description: "Heal 25% health when dropping under 30% (1 use)",
        kind: AbilityKind::Active,
        trigger: Trigger::OnLowHealth,
        uses: Some(1),
        effect: AbilityEffect::Healing(ThresholdEffect { threshold: 0.30, factor: 0.25 }),
    },
    AbilityDefinition {
        id: AbilityId::Fury,
        name: "Fury",
        description: "+60% damage under 25% health",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnAttack,
        uses: None,
        effect: AbilityEffect::Fury(ThresholdEffect { threshold: 0.25, factor: 1.6 }),
    },
    AbilityDefinition {
        id: AbilityId::DoubleStrike,
        name: "Double Strike",
        description: "20% chance to strike twice",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnAttack,
        uses: None,
        effect: AbilityEffect::DoubleStrike(ChanceEffect { chance: 0.20, factor: 0.5 }),
    },
    AbilityDefinition {
        id: AbilityId::Vampiric,
        name: "Vampiric",
        description: "Steal 20% of damage dealt as health",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnAttack,
        uses: None,
        effect: AbilityEffect::Vampiric { fraction: 0.20 },
    },
    AbilityDefinition {
        id: AbilityId::MagicShield,
        name: "Magic Shield",
        description: "Reduce all damage taken by 20%",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnDefend,
        uses: None,
        effect: AbilityEffect::MagicShield { factor: 0.80 },
    },
    AbilityDefinition {
        id: AbilityId::Venom,
        name: "Venom",
        description: "Poison the opponent (5 damage per turn, 4 turns)",
        kind: AbilityKind::Active,
        trigger: Trigger::OnFirstHit,
        uses: Some(1),
        effect: AbilityEffect::Venom(PoisonDose { damage: 5, duration: 4 }),
    },
    AbilityDefinition {
        id: AbilityId::WarCry,
        name: "War Cry",
        description: "+35% damage for 4 turns at combat start",
        kind: AbilityKind::Active,
        trigger: Trigger::OnCombatStart,
        uses: Some(1),
        effect: AbilityEffect::WarCry(DamageBuff { bonus: 0.35, duration: 4 }),
    },
    AbilityDefinition {
        id: AbilityId::LastStand,
        name: "Last Stand",
        description: "Survive a lethal blow with 1 health (1 use)",
        kind: AbilityKind::Active,
        trigger: Trigger::OnLethalBlow,
        uses: Some(1),
        effect: AbilityEffect::LastStand,
    },
    AbilityDefinition {
        id: AbilityId::Thorns,
        name: "Thorns",
        description: "Reflect 30% of damage received",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnHitReceived,
        uses: None,
        effect: AbilityEffect::Thorns { fraction: 0.30 },
    },
    AbilityDefinition {
        id: AbilityId::Regeneration,
        name: "Regeneration",
        description: "Recover 8% health every turn",
        kind: AbilityKind::Passive,
        trigger: Trigger::TurnStart,
        uses: None,
        effect: AbilityEffect::Regeneration { fraction: 0.08 },
    },
    AbilityDefinition {
        id: AbilityId::DivineBlessing,
        name: "Divine Blessing",
        description: "Heal 35% health at turn start when at or under 50% (1 use)",
        kind: AbilityKind::Active,
        trigger: Trigger::TurnStart,
        uses: Some(1),
        effect: AbilityEffect::DivineBlessing(ThresholdEffect { threshold: 0.50, factor: 0.35 }),
    },
    AbilityDefinition {
        id: AbilityId::ProtectiveAura,
        name: "Protective Aura",
        description: "Reduce all damage taken by 15%",
        kind: AbilityKind::Passive,
        trigger: Trigger::OnDefend,
        uses: None,
        effect: AbilityEffect::ProtectiveAura { factor: 0.85 },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_ability_defined_once() {
        assert_eq!(ABILITY_LIBRARY.len(), AbilityId::all().len());
        for id in AbilityId::all() {
            assert_eq!(ABILITY_LIBRARY.iter().filter(|def| def.id == *id).count(), 1);
        }
    }

    #[test]
    fn test_active_abilities_have_uses() {
        for def in ABILITY_LIBRARY {
            match def.kind {
                AbilityKind::Active => assert!(def.uses.unwrap_or(0) > 0, "{}", def.name),
                AbilityKind::Passive => assert!(def.uses.is_none(), "{}", def.name),
            }
        }
    }

    #[test]
    fn test_all_effects_well_formed() {
        for def in ABILITY_LIBRARY {
            assert!(def.effect.is_well_formed(), "{} is malformed", def.name);
        }
    }

    #[test]
    fn test_key_roundtrip() {
        for id in AbilityId::all() {
            assert_eq!(AbilityId::from_key(id.key()), Some(*id));
        }
        assert_eq!(AbilityId::from_key("telekinesis"), None);
    }
}
