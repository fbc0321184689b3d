//! Fighter preparation
//!
//! A `Fighter` is the per-combat state derived from a character sheet. It is
//! built fresh for every combat and owns nothing of the sheet except its id.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{
    AbilityEffect, AbilityId, ChanceEffect, ComboBonus, ComboEffect, ComboId, DamageBuff, PoisonDose,
    ThresholdEffect,
};
use crate::character::CharacterSheet;
use crate::combat::equipment::{resolve_loadout, ResolvedLoadout};
use crate::core::types::{Attributes, CharacterId};

/// Learned ability effects, one slot per ability
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AbilityEffects {
    pub critical_strike: Option<ChanceEffect>,
    pub evasion: Option<f64>,
    pub counterattack: Option<ChanceEffect>,
    pub healing: Option<ThresholdEffect>,
    pub fury: Option<ThresholdEffect>,
    pub double_strike: Option<ChanceEffect>,
    pub vampiric: Option<f64>,
    pub magic_shield: Option<f64>,
    pub venom: Option<PoisonDose>,
    pub war_cry: Option<DamageBuff>,
    pub last_stand: bool,
    pub thorns: Option<f64>,
    pub regeneration: Option<f64>,
    pub divine_blessing: Option<ThresholdEffect>,
    pub protective_aura: Option<f64>,
}

impl AbilityEffects {
    fn register(&mut self, effect: AbilityEffect) {
        match effect {
            AbilityEffect::CriticalStrike(roll) => self.critical_strike = Some(roll),
            AbilityEffect::Evasion { dodge_bonus } => self.evasion = Some(dodge_bonus),
            AbilityEffect::Counterattack(roll) => self.counterattack = Some(roll),
            AbilityEffect::Healing(threshold) => self.healing = Some(threshold),
            AbilityEffect::Fury(threshold) => self.fury = Some(threshold),
            AbilityEffect::DoubleStrike(roll) => self.double_strike = Some(roll),
            AbilityEffect::Vampiric { fraction } => self.vampiric = Some(fraction),
            AbilityEffect::MagicShield { factor } => self.magic_shield = Some(factor),
            AbilityEffect::Venom(dose) => self.venom = Some(dose),
            AbilityEffect::WarCry(buff) => self.war_cry = Some(buff),
            AbilityEffect::LastStand => self.last_stand = true,
            AbilityEffect::Thorns { fraction } => self.thorns = Some(fraction),
            AbilityEffect::Regeneration { fraction } => self.regeneration = Some(fraction),
            AbilityEffect::DivineBlessing(threshold) => self.divine_blessing = Some(threshold),
            AbilityEffect::ProtectiveAura { factor } => self.protective_aura = Some(factor),
        }
    }
}

/// A combo effect together with the combo that granted it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Granted<T> {
    pub combo: ComboId,
    pub params: T,
}

/// Active combo effects indexed by kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ComboEffects {
    pub poison_on_start: Option<Granted<PoisonDose>>,
    pub volley: Option<Granted<f64>>,
    pub stun: Option<Granted<f64>>,
    pub first_strike: Option<Granted<f64>>,
    pub always_first: Option<ComboId>,
    pub lifesteal: Option<Granted<f64>>,
    /// (threshold, bonus)
    pub execute: Option<Granted<(f64, f64)>>,
    /// Running total of every combo's critical-chance bonus
    pub critical_bonus: f64,
}

impl ComboEffects {
    fn register(&mut self, combo: ComboId, effect: ComboEffect) {
        match effect {
            ComboEffect::PoisonOnStart(dose) => self.poison_on_start = Some(Granted { combo, params: dose }),
            ComboEffect::Volley { chance } => self.volley = Some(Granted { combo, params: chance }),
            ComboEffect::Stun { chance } => self.stun = Some(Granted { combo, params: chance }),
            ComboEffect::FirstStrike { multiplier } => {
                self.first_strike = Some(Granted { combo, params: multiplier })
            }
            ComboEffect::AlwaysFirst => self.always_first = Some(combo),
            ComboEffect::Lifesteal { fraction } => self.lifesteal = Some(Granted { combo, params: fraction }),
            ComboEffect::Execute { threshold, bonus } => {
                self.execute = Some(Granted {
                    combo,
                    params: (threshold, bonus),
                })
            }
        }
    }
}

/// Timed outgoing damage bonus
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Buff {
    pub source: AbilityId,
    pub damage_bonus: f64,
    pub turns_remaining: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Poison {
    pub stacks: u32,
    pub damage: i32,
}

#[derive(Debug, Clone)]
pub struct Fighter {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    pub health: i32,
    pub max_health: i32,
    pub strength: i32,
    pub defense: i32,
    pub speed: i32,
    pub abilities: Vec<AbilityId>,
    pub ability_effects: AbilityEffects,
    /// Remaining uses of limited abilities
    pub ability_uses: BTreeMap<AbilityId, u32>,
    pub combos: Vec<ComboId>,
    pub combo_effects: ComboEffects,
    pub buffs: Vec<Buff>,
    pub stunned: bool,
    pub poison: Poison,
    pub first_hit_done: bool,
}

impl Fighter {
    /// Resolve the sheet's equipment and prepare it for combat
    pub fn from_sheet(sheet: &CharacterSheet) -> Self {
        Self::prepare(sheet, &resolve_loadout(sheet))
    }

    pub fn prepare(sheet: &CharacterSheet, loadout: &ResolvedLoadout) -> Self {
        let mut ability_effects = AbilityEffects::default();
        let mut ability_uses = BTreeMap::new();
        let mut abilities = Vec::with_capacity(sheet.abilities.len());

        for def in sheet.abilities.iter().filter_map(|id| id.definition()) {
            if !def.effect.is_well_formed() {
                warn!(ability = def.id.key(), "Skipping ability with malformed effect");
                continue;
            }
            ability_effects.register(def.effect);
            if let Some(uses) = def.uses {
                ability_uses.insert(def.id, uses);
            }
            abilities.push(def.id);
        }

        let mut combo_effects = ComboEffects::default();
        for def in loadout.combos.iter().filter_map(|id| id.definition()) {
            match def.bonus {
                ComboBonus::Effect(effect) if effect.is_well_formed() => combo_effects.register(def.id, effect),
                ComboBonus::Effect(_) => warn!(combo = def.id.key(), "Skipping combo with malformed effect"),
                ComboBonus::Stats(modifier) => combo_effects.critical_bonus += modifier.critical_chance,
            }
        }

        let stats = loadout.attributes;
        Self {
            id: sheet.id,
            name: sheet.name.clone(),
            level: sheet.level.max(1),
            health: stats.max_health,
            max_health: stats.max_health,
            strength: stats.strength,
            defense: stats.defense,
            speed: stats.speed,
            abilities,
            ability_effects,
            ability_uses,
            combos: loadout.combos.clone(),
            combo_effects,
            buffs: Vec::new(),
            stunned: false,
            poison: Poison::default(),
            first_hit_done: false,
        }
    }

    /// A fighter with the given attributes and nothing else
    pub fn plain(id: CharacterId, name: impl Into<String>, attributes: Attributes) -> Self {
        let sheet = CharacterSheet::with_attributes(id, name, attributes);
        Self::from_sheet(&sheet)
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    pub fn health_fraction(&self) -> f64 {
        if self.max_health <= 0 {
            return 0.0;
        }
        self.health as f64 / self.max_health as f64
    }

    pub fn uses_left(&self, ability: AbilityId) -> u32 {
        self.ability_uses.get(&ability).copied().unwrap_or(0)
    }

    /// Consume one use of a limited ability; false if none remain
    pub fn try_consume(&mut self, ability: AbilityId) -> bool {
        match self.ability_uses.get_mut(&ability) {
            Some(uses) if *uses > 0 => {
                *uses -= 1;
                true
            }
            _ => false,
        }
    }

    /// Heal up to max health, returning the amount actually restored
    pub fn heal(&mut self, amount: i32) -> i32 {
        let before = self.health;
        self.health = (self.health + amount.max(0)).min(self.max_health).max(before);
        self.health - before
    }

    /// Tick every buff down by one turn, dropping the expired ones
    pub fn decay_buffs(&mut self) {
        self.buffs.retain_mut(|buff| {
            buff.turns_remaining = buff.turns_remaining.saturating_sub(1);
            buff.turns_remaining > 0
        });
    }
}
