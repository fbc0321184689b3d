//! Single attack resolution
//!
//! Steps run in a fixed order, each mutating the running damage value:
//! dodge, base damage, first strike, critical, fury, execute, damage buffs,
//! incoming reductions, defense, last stand. Once damage lands the on-hit
//! effects follow: venom, stun, defender heal, lifesteal, thorns, counter
//! and extra strikes. Each multiplier floors the running value.

use rand::Rng;
use tracing::trace;

use crate::catalog::AbilityId;
use crate::combat::constants::{
    BASE_DODGE_CHANCE, CRITICAL_MULTIPLIER, DEFENSE_MITIGATION, DODGE_PER_SPEED, MAX_DODGE_CHANCE, MIN_DAMAGE,
    MIN_DODGE_CHANCE, STRENGTH_DAMAGE_FACTOR, STRENGTH_DAMAGE_SPREAD, VOLLEY_HIT_FACTORS,
};
use crate::combat::fighter::{Fighter, Poison};
use crate::combat::log::{CombatLog, EffectSource, HealthBar, HealthSnapshot, LogEvent, StrikeModifier};
use crate::core::types::Side;

/// What happened to the primary hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strike {
    Dodged,
    /// Damage actually applied by the primary hit
    Landed { damage: i32 },
}

/// Multiply and floor
pub fn scale(damage: i32, factor: f64) -> i32 {
    (damage as f64 * factor).floor() as i32
}

/// Subtract defense and clamp to the minimum landed damage
pub fn mitigate(damage: i32, defense: i32) -> i32 {
    ((damage as f64 - defense as f64 * DEFENSE_MITIGATION).floor() as i32).max(MIN_DAMAGE)
}

pub fn dodge_chance(attacker: &Fighter, defender: &Fighter) -> f64 {
    let mut chance = BASE_DODGE_CHANCE + (defender.speed - attacker.speed) as f64 * DODGE_PER_SPEED;
    if let Some(bonus) = defender.ability_effects.evasion {
        chance += bonus;
    }
    chance.clamp(MIN_DODGE_CHANCE, MAX_DODGE_CHANCE)
}

pub fn health_bar(fighter: &Fighter) -> HealthBar {
    HealthBar {
        health: fighter.health.max(0),
        max_health: fighter.max_health,
    }
}

pub fn health_snapshot(fighters: &[Fighter; 2]) -> HealthSnapshot {
    HealthSnapshot {
        left: health_bar(&fighters[0]),
        right: health_bar(&fighters[1]),
    }
}

/// Attacker and defender borrowed out of the pair, plus where to log
struct Exchange<'a> {
    attacker: &'a mut Fighter,
    defender: &'a mut Fighter,
    attacker_side: Side,
    turn: u32,
    log: &'a mut CombatLog,
}

impl<'a> Exchange<'a> {
    fn new(fighters: &'a mut [Fighter; 2], attacker_side: Side, turn: u32, log: &'a mut CombatLog) -> Self {
        let [left, right] = fighters;
        let (attacker, defender) = match attacker_side {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };
        Self {
            attacker,
            defender,
            attacker_side,
            turn,
            log,
        }
    }

    fn defender_side(&self) -> Side {
        self.attacker_side.opponent()
    }

    fn snapshot(&self) -> HealthSnapshot {
        let (left, right) = match self.attacker_side {
            Side::Left => (&*self.attacker, &*self.defender),
            Side::Right => (&*self.defender, &*self.attacker),
        };
        HealthSnapshot {
            left: health_bar(left),
            right: health_bar(right),
        }
    }

    fn record(&mut self, event: LogEvent) {
        let health = self.snapshot();
        self.log.push(self.turn, event, health);
    }

    fn either_down(&self) -> bool {
        !self.attacker.is_alive() || !self.defender.is_alive()
    }
}

/// Resolve one attack by `attacker_side` against its opponent
pub fn resolve_attack<R: Rng + ?Sized>(
    fighters: &mut [Fighter; 2],
    attacker_side: Side,
    turn: u32,
    log: &mut CombatLog,
    rng: &mut R,
) -> Strike {
    let mut ex = Exchange::new(fighters, attacker_side, turn, log);

    // Dodge
    let dodge = dodge_chance(&*ex.attacker, &*ex.defender);
    if rng.gen::<f64>() < dodge {
        trace!(turn, attacker = ?attacker_side, dodge, "Attack dodged");
        ex.record(LogEvent::Dodge { attacker: attacker_side });
        return Strike::Dodged;
    }

    let mut modifiers = Vec::new();

    // Base damage
    let strength = ex.attacker.strength as f64;
    let mut damage =
        (strength * STRENGTH_DAMAGE_FACTOR + rng.gen::<f64>() * strength * STRENGTH_DAMAGE_SPREAD).floor() as i32;

    // First strike
    if !ex.attacker.first_hit_done {
        if let Some(first) = ex.attacker.combo_effects.first_strike {
            damage = scale(damage, first.params);
            modifiers.push(StrikeModifier::FirstStrike);
        }
    }

    // Critical
    let critical_ability = ex.attacker.ability_effects.critical_strike;
    let critical_chance =
        critical_ability.map_or(0.0, |roll| roll.chance) + ex.attacker.combo_effects.critical_bonus;
    let mut critical = false;
    if critical_chance > 0.0 && rng.gen::<f64>() < critical_chance {
        damage = scale(damage, critical_ability.map_or(CRITICAL_MULTIPLIER, |roll| roll.factor));
        critical = true;
        modifiers.push(StrikeModifier::Critical);
    }

    // Fury
    if let Some(fury) = ex.attacker.ability_effects.fury {
        if ex.attacker.health_fraction() <= fury.threshold {
            damage = scale(damage, fury.factor);
            modifiers.push(StrikeModifier::Fury);
        }
    }

    // Execute
    if let Some(execute) = ex.attacker.combo_effects.execute {
        let (threshold, bonus) = execute.params;
        if ex.defender.health_fraction() <= threshold {
            damage = scale(damage, 1.0 + bonus);
            modifiers.push(StrikeModifier::Execute);
        }
    }

    // Timed damage buffs
    if !ex.attacker.buffs.is_empty() {
        for buff in &ex.attacker.buffs {
            damage = scale(damage, 1.0 + buff.damage_bonus);
        }
        modifiers.push(StrikeModifier::DamageBuff);
    }

    // Incoming reductions
    let reductions = [ex.defender.ability_effects.magic_shield, ex.defender.ability_effects.protective_aura];
    if reductions.iter().any(Option::is_some) {
        for factor in reductions.into_iter().flatten() {
            damage = scale(damage, factor);
        }
        modifiers.push(StrikeModifier::Shielded);
    }

    damage = mitigate(damage, ex.defender.defense);

    // Last stand
    if ex.defender.health - damage <= 0
        && ex.defender.ability_effects.last_stand
        && ex.defender.try_consume(AbilityId::LastStand)
    {
        damage = ex.defender.health - 1;
        ex.record(LogEvent::AbilityTriggered {
            fighter: ex.defender_side(),
            source: EffectSource::Ability(AbilityId::LastStand),
        });
    }

    ex.defender.health -= damage;

    // Venom
    let mut venom_applied = false;
    if !ex.attacker.first_hit_done {
        if let Some(dose) = ex.attacker.ability_effects.venom {
            if ex.attacker.try_consume(AbilityId::Venom) {
                ex.defender.poison = Poison {
                    stacks: dose.duration,
                    damage: dose.damage,
                };
                venom_applied = true;
                modifiers.push(StrikeModifier::Poisoned);
            }
        }
    }
    ex.attacker.first_hit_done = true;

    // Stun
    if let Some(stun) = ex.attacker.combo_effects.stun {
        if rng.gen::<f64>() < stun.params {
            ex.defender.stunned = true;
            modifiers.push(StrikeModifier::Stunned);
        }
    }

    trace!(turn, attacker = ?attacker_side, damage, critical, ?modifiers, "Attack landed");
    ex.record(LogEvent::Attack {
        attacker: attacker_side,
        damage,
        critical,
        modifiers,
    });
    if venom_applied {
        ex.record(LogEvent::AbilityTriggered {
            fighter: attacker_side,
            source: EffectSource::Ability(AbilityId::Venom),
        });
    }

    // Defender's emergency heal
    if let Some(healing) = ex.defender.ability_effects.healing {
        if ex.defender.is_alive()
            && ex.defender.health_fraction() <= healing.threshold
            && ex.defender.try_consume(AbilityId::Healing)
        {
            let amount = ex.defender.heal(scale(ex.defender.max_health, healing.factor));
            ex.record(LogEvent::Heal {
                fighter: ex.defender_side(),
                amount,
                source: EffectSource::Ability(AbilityId::Healing),
            });
        }
    }

    // Lifesteal
    if let Some(fraction) = ex.attacker.ability_effects.vampiric {
        drain(&mut ex, damage, fraction, EffectSource::Ability(AbilityId::Vampiric));
    }
    if let Some(lifesteal) = ex.attacker.combo_effects.lifesteal {
        drain(&mut ex, damage, lifesteal.params, EffectSource::Combo(lifesteal.combo));
    }

    // Thorns
    if let Some(fraction) = ex.defender.ability_effects.thorns {
        let reflected = scale(damage, fraction);
        if ex.defender.is_alive() && reflected > 0 {
            ex.attacker.health -= reflected;
            ex.record(LogEvent::Thorns {
                fighter: ex.defender_side(),
                damage: reflected,
            });
        }
    }
    if ex.either_down() {
        return Strike::Landed { damage };
    }

    // Counterattack
    if let Some(counter) = ex.defender.ability_effects.counterattack {
        if rng.gen::<f64>() < counter.chance {
            let counter_damage = scale(ex.defender.strength, counter.factor).max(MIN_DAMAGE);
            ex.attacker.health -= counter_damage;
            ex.record(LogEvent::Counter {
                fighter: ex.defender_side(),
                damage: counter_damage,
            });
        }
    }
    if ex.either_down() {
        return Strike::Landed { damage };
    }

    // Extra strikes
    if let Some(double) = ex.attacker.ability_effects.double_strike {
        if rng.gen::<f64>() < double.chance {
            let extra = scale(damage, double.factor).max(MIN_DAMAGE);
            extra_strike(&mut ex, extra, 1, EffectSource::Ability(AbilityId::DoubleStrike));
        }
    }
    if let Some(volley) = ex.attacker.combo_effects.volley {
        if ex.defender.is_alive() && rng.gen::<f64>() < volley.params {
            let extra = VOLLEY_HIT_FACTORS
                .iter()
                .map(|factor| scale(damage, *factor).max(MIN_DAMAGE))
                .sum();
            extra_strike(&mut ex, extra, VOLLEY_HIT_FACTORS.len() as u32, EffectSource::Combo(volley.combo));
        }
    }

    Strike::Landed { damage }
}

fn drain(ex: &mut Exchange<'_>, damage: i32, fraction: f64, source: EffectSource) {
    let amount = ex.attacker.heal(scale(damage, fraction));
    if amount > 0 {
        ex.record(LogEvent::Lifesteal {
            fighter: ex.attacker_side,
            amount,
            source,
        });
    }
}

fn extra_strike(ex: &mut Exchange<'_>, damage: i32, hits: u32, source: EffectSource) {
    if !ex.defender.is_alive() {
        return;
    }
    ex.defender.health -= damage;
    ex.record(LogEvent::ExtraStrike {
        attacker: ex.attacker_side,
        damage,
        hits,
        source,
    });
}
