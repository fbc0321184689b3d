//! Weapon combination table
//!
//! Declaration order matters: stat multipliers of simultaneously active
//! combos are applied in the order they appear in `COMBO_LIBRARY`.

use serde::{Deserialize, Serialize};

use crate::catalog::effects::{is_fraction, PoisonDose};
use crate::catalog::items::{AccessoryId, WeaponId};

/// Combo identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComboId {
    DualStyle,
    BruteForce,
    LethalHunter,
    Phalanx,
    ProjectileRain,
    BladeMaster,
    CrushingBlow,
    Assassin,
    FullArsenal,
    SupremeReach,
    DeadlyShadow,
    Reaper,
    Berserker,
    AncestralGuardian,
    CuttingWind,
    Executioner,
}

impl ComboId {
    pub fn all() -> &'static [ComboId] {
        &[
            ComboId::DualStyle,
            ComboId::BruteForce,
            ComboId::LethalHunter,
            ComboId::Phalanx,
            ComboId::ProjectileRain,
            ComboId::BladeMaster,
            ComboId::CrushingBlow,
            ComboId::Assassin,
            ComboId::FullArsenal,
            ComboId::SupremeReach,
            ComboId::DeadlyShadow,
            ComboId::Reaper,
            ComboId::Berserker,
            ComboId::AncestralGuardian,
            ComboId::CuttingWind,
            ComboId::Executioner,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            ComboId::DualStyle => "dual_style",
            ComboId::BruteForce => "brute_force",
            ComboId::LethalHunter => "lethal_hunter",
            ComboId::Phalanx => "phalanx",
            ComboId::ProjectileRain => "projectile_rain",
            ComboId::BladeMaster => "blade_master",
            ComboId::CrushingBlow => "crushing_blow",
            ComboId::Assassin => "assassin",
            ComboId::FullArsenal => "full_arsenal",
            ComboId::SupremeReach => "supreme_reach",
            ComboId::DeadlyShadow => "deadly_shadow",
            ComboId::Reaper => "reaper",
            ComboId::Berserker => "berserker",
            ComboId::AncestralGuardian => "ancestral_guardian",
            ComboId::CuttingWind => "cutting_wind",
            ComboId::Executioner => "executioner",
        }
    }

    pub fn from_key(key: &str) -> Option<ComboId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static ComboDefinition> {
        COMBO_LIBRARY.iter().find(|def| def.id == *self)
    }
}

/// Which equipped weapons unlock a combo
#[derive(Debug, Clone)]
pub enum WeaponRequirement {
    /// At least this many distinct weapon ids equipped
    AnyDistinct(usize),
    /// Multiset containment: duplicates must be equipped in separate slots
    Exact(&'static [WeaponId]),
}

/// Percentage modifiers; each non-zero field multiplies the running stat by
/// `1 + value`
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct StatModifier {
    pub strength: f64,
    pub defense: f64,
    pub speed: f64,
    pub health: f64,
    /// Added to the fighter's critical-hit chance rather than a stat
    pub critical_chance: f64,
}

impl StatModifier {
    pub fn is_well_formed(&self) -> bool {
        [self.strength, self.defense, self.speed, self.health]
            .iter()
            .all(|pct| pct.is_finite() && *pct >= -1.0)
            && is_fraction(self.critical_chance)
    }

    /// True when any stat multiplier is below one
    pub fn lowers_a_stat(&self) -> bool {
        [self.strength, self.defense, self.speed, self.health]
            .iter()
            .any(|pct| *pct < 0.0)
    }
}

/// Named combat behaviour unlocked by a combo
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComboEffect {
    /// Poison the opponent before the first turn
    PoisonOnStart(PoisonDose),
    /// Chance of two follow-up hits after a landed attack
    Volley { chance: f64 },
    /// Chance of stunning the defender on a landed attack
    Stun { chance: f64 },
    /// Damage multiplier on the wielder's first strike of the combat
    FirstStrike { multiplier: f64 },
    /// Always wins initiative
    AlwaysFirst,
    /// Heal a fraction of damage dealt
    Lifesteal { fraction: f64 },
    /// Bonus damage against a defender at or below a health fraction
    Execute { threshold: f64, bonus: f64 },
}

impl ComboEffect {
    pub fn is_well_formed(&self) -> bool {
        match *self {
            ComboEffect::PoisonOnStart(dose) => dose.is_well_formed(),
            ComboEffect::Volley { chance } | ComboEffect::Stun { chance } => is_fraction(chance),
            ComboEffect::FirstStrike { multiplier } => multiplier.is_finite() && multiplier >= 0.0,
            ComboEffect::AlwaysFirst => true,
            ComboEffect::Lifesteal { fraction } => is_fraction(fraction),
            ComboEffect::Execute { threshold, bonus } => {
                is_fraction(threshold) && bonus.is_finite() && bonus >= 0.0
            }
        }
    }
}

/// A combo grants either stat multipliers or a named effect, never both
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ComboBonus {
    Stats(StatModifier),
    Effect(ComboEffect),
}

impl ComboBonus {
    pub fn is_well_formed(&self) -> bool {
        match self {
            ComboBonus::Stats(modifier) => modifier.is_well_formed(),
            ComboBonus::Effect(effect) => effect.is_well_formed(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComboDefinition {
    pub id: ComboId,
    pub name: &'static str,
    pub description: &'static str,
    pub weapons: WeaponRequirement,
    pub accessory: Option<AccessoryId>,
    pub bonus: ComboBonus,
}

const NO_MODIFIER: StatModifier = StatModifier {
    strength: 0.0,
    defense: 0.0,
    speed: 0.0,
    health: 0.0,
    critical_chance: 0.0,
};

pub static COMBO_LIBRARY: &[ComboDefinition] = &[
    ComboDefinition {
        id: ComboId::DualStyle,
        name: "Dual Style",
        description: "+15% speed",
        weapons: WeaponRequirement::Exact(&[WeaponId::Sword, WeaponId::Dagger]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier { speed: 0.15, ..NO_MODIFIER }),
    },
    ComboDefinition {
        id: ComboId::BruteForce,
        name: "Brute Force",
        description: "+25% strength, -10% speed",
        weapons: WeaponRequirement::Exact(&[WeaponId::Axe, WeaponId::Warhammer]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier {
            strength: 0.25,
            speed: -0.10,
            ..NO_MODIFIER
        }),
    },
    ComboDefinition {
        id: ComboId::LethalHunter,
        name: "Lethal Hunter",
        description: "Poisons the opponent for 3 turns",
        weapons: WeaponRequirement::Exact(&[WeaponId::Longbow, WeaponId::Dagger]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::PoisonOnStart(PoisonDose { damage: 4, duration: 3 })),
    },
    ComboDefinition {
        id: ComboId::Phalanx,
        name: "Phalanx",
        description: "+30% defense",
        weapons: WeaponRequirement::Exact(&[WeaponId::Spear]),
        accessory: Some(AccessoryId::GuardianCloak),
        bonus: ComboBonus::Stats(StatModifier { defense: 0.30, ..NO_MODIFIER }),
    },
    ComboDefinition {
        id: ComboId::ProjectileRain,
        name: "Projectile Rain",
        description: "15% chance to strike three times",
        weapons: WeaponRequirement::Exact(&[WeaponId::Trident, WeaponId::Longbow]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::Volley { chance: 0.15 }),
    },
    ComboDefinition {
        id: ComboId::BladeMaster,
        name: "Blade Master",
        description: "+20% critical chance",
        weapons: WeaponRequirement::Exact(&[WeaponId::Sword, WeaponId::Sword]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier { critical_chance: 0.20, ..NO_MODIFIER }),
    },
    ComboDefinition {
        id: ComboId::CrushingBlow,
        name: "Crushing Blow",
        description: "20% chance to stun for 1 turn",
        weapons: WeaponRequirement::Exact(&[WeaponId::Warhammer, WeaponId::Mace]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::Stun { chance: 0.20 }),
    },
    ComboDefinition {
        id: ComboId::Assassin,
        name: "Assassin",
        description: "First strike deals x2.5 damage",
        weapons: WeaponRequirement::Exact(&[WeaponId::Dagger, WeaponId::Dagger]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::FirstStrike { multiplier: 2.5 }),
    },
    ComboDefinition {
        id: ComboId::FullArsenal,
        name: "Full Arsenal",
        description: "+10% to every stat",
        weapons: WeaponRequirement::AnyDistinct(4),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier {
            strength: 0.10,
            defense: 0.10,
            speed: 0.10,
            health: 0.10,
            critical_chance: 0.0,
        }),
    },
    ComboDefinition {
        id: ComboId::SupremeReach,
        name: "Supreme Reach",
        description: "Always strikes first",
        weapons: WeaponRequirement::Exact(&[WeaponId::Longbow, WeaponId::Spear]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::AlwaysFirst),
    },
    ComboDefinition {
        id: ComboId::DeadlyShadow,
        name: "Deadly Shadow",
        description: "+10% speed, +15% critical chance",
        weapons: WeaponRequirement::Exact(&[WeaponId::Katana, WeaponId::Dagger]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier {
            speed: 0.10,
            critical_chance: 0.15,
            ..NO_MODIFIER
        }),
    },
    ComboDefinition {
        id: ComboId::Reaper,
        name: "The Reaper",
        description: "Steals 15% of damage dealt as health",
        weapons: WeaponRequirement::Exact(&[WeaponId::Scythe, WeaponId::Mace]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::Lifesteal { fraction: 0.15 }),
    },
    ComboDefinition {
        id: ComboId::Berserker,
        name: "Berserker",
        description: "+20% strength, -15% defense",
        weapons: WeaponRequirement::Exact(&[WeaponId::Axe, WeaponId::Sword]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier {
            strength: 0.20,
            defense: -0.15,
            ..NO_MODIFIER
        }),
    },
    ComboDefinition {
        id: ComboId::AncestralGuardian,
        name: "Ancestral Guardian",
        description: "+15% defense, +15% health",
        weapons: WeaponRequirement::Exact(&[WeaponId::Trident, WeaponId::Warhammer]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier {
            defense: 0.15,
            health: 0.15,
            ..NO_MODIFIER
        }),
    },
    ComboDefinition {
        id: ComboId::CuttingWind,
        name: "Cutting Wind",
        description: "+25% speed",
        weapons: WeaponRequirement::Exact(&[WeaponId::Katana, WeaponId::Longbow]),
        accessory: None,
        bonus: ComboBonus::Stats(StatModifier { speed: 0.25, ..NO_MODIFIER }),
    },
    ComboDefinition {
        id: ComboId::Executioner,
        name: "The Executioner",
        description: "+50% damage against opponents under 20% health",
        weapons: WeaponRequirement::Exact(&[WeaponId::Scythe, WeaponId::Axe]),
        accessory: None,
        bonus: ComboBonus::Effect(ComboEffect::Execute {
            threshold: 0.20,
            bonus: 0.50,
        }),
    },
];
