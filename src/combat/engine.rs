//! Turn engine
//!
//! Drives two prepared fighters through the combat phases:
//! - NotStarted: nothing logged yet
//! - Running: intro and start-of-combat effects done, turns in progress
//! - Finished: a winner is decided and the end entry is logged

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::AbilityId;
use crate::combat::attack::{health_snapshot, resolve_attack, scale};
use crate::combat::constants::{ALWAYS_FIRST_BONUS, INITIATIVE_JITTER, STATUS_INTERVAL, TURN_CAP};
use crate::combat::fighter::{Buff, Fighter, Poison};
use crate::combat::log::{CombatLog, Decision, EffectSource, FighterCard, LogEvent};
use crate::core::types::{CharacterId, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum CombatPhase {
    NotStarted,
    Running,
    Finished { winner: Side, decided_by: Decision },
}

/// Result handed back to the caller
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatOutcome {
    pub winner_id: CharacterId,
    pub loser_id: CharacterId,
    pub winner: Side,
    pub decided_by: Decision,
    pub log: CombatLog,
    /// Turns started, including the one the combat ended on
    pub turns: u32,
}

impl CombatOutcome {
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct Combat {
    fighters: [Fighter; 2],
    phase: CombatPhase,
    turn: u32,
    log: CombatLog,
}

impl Combat {
    pub fn new(left: Fighter, right: Fighter) -> Self {
        Self {
            fighters: [left, right],
            phase: CombatPhase::NotStarted,
            turn: 0,
            log: CombatLog::new(),
        }
    }

    pub fn phase(&self) -> CombatPhase {
        self.phase
    }

    pub fn turn(&self) -> u32 {
        self.turn
    }

    pub fn fighter(&self, side: Side) -> &Fighter {
        &self.fighters[side.index()]
    }

    pub fn log(&self) -> &CombatLog {
        &self.log
    }

    /// Run turns until the combat is finished
    pub fn run<R: Rng + ?Sized>(mut self, rng: &mut R) -> CombatOutcome {
        loop {
            if let CombatPhase::Finished { winner, decided_by } = self.run_turn(rng) {
                return self.into_outcome(winner, decided_by);
            }
        }
    }

    /// Advance by one turn, starting the combat first if needed
    pub fn run_turn<R: Rng + ?Sized>(&mut self, rng: &mut R) -> CombatPhase {
        match self.phase {
            CombatPhase::Finished { .. } => return self.phase,
            CombatPhase::NotStarted => self.start(),
            CombatPhase::Running => {}
        }

        self.turn += 1;
        self.phase_pre_turn();

        let first = self.roll_initiative(rng);
        resolve_attack(&mut self.fighters, first, self.turn, &mut self.log, rng);
        if self.anyone_down() {
            return self.finish(Decision::Knockout, rng);
        }

        let second = first.opponent();
        if self.fighters[second.index()].stunned {
            self.fighters[second.index()].stunned = false;
            self.record(LogEvent::Stunned { fighter: second });
        } else {
            resolve_attack(&mut self.fighters, second, self.turn, &mut self.log, rng);
            if self.anyone_down() {
                return self.finish(Decision::Knockout, rng);
            }
        }

        if self.phase_poison() {
            return self.finish(Decision::Knockout, rng);
        }

        for fighter in &mut self.fighters {
            fighter.decay_buffs();
        }

        if self.turn % STATUS_INTERVAL == 0 {
            self.record(LogEvent::Status);
        }

        if self.turn >= TURN_CAP {
            return self.finish(Decision::TurnCap, rng);
        }
        self.phase
    }

    /// Intro, combos, start-of-combat abilities and combo poison
    fn start(&mut self) {
        let [left, right] = &self.fighters;
        debug!(left = %left.name, right = %right.name, "Combat started");
        let intro = LogEvent::Intro {
            left: card(left),
            right: card(right),
        };
        self.record(intro);

        for side in Side::both() {
            for combo in self.fighters[side.index()].combos.clone() {
                self.record(LogEvent::ComboActivated { fighter: side, combo });
            }
        }

        for side in Side::both() {
            let fighter = &mut self.fighters[side.index()];
            if let Some(war_cry) = fighter.ability_effects.war_cry {
                if fighter.try_consume(AbilityId::WarCry) {
                    fighter.buffs.push(Buff {
                        source: AbilityId::WarCry,
                        damage_bonus: war_cry.bonus,
                        turns_remaining: war_cry.duration,
                    });
                    self.record(LogEvent::AbilityTriggered {
                        fighter: side,
                        source: EffectSource::Ability(AbilityId::WarCry),
                    });
                }
            }
        }

        for side in Side::both() {
            if let Some(poison) = self.fighters[side.index()].combo_effects.poison_on_start {
                self.fighters[side.opponent().index()].poison = Poison {
                    stacks: poison.params.duration,
                    damage: poison.params.damage,
                };
                self.record(LogEvent::AbilityTriggered {
                    fighter: side,
                    source: EffectSource::Combo(poison.combo),
                });
            }
        }

        self.phase = CombatPhase::Running;
    }

    /// Regeneration then divine blessing, left before right
    fn phase_pre_turn(&mut self) {
        for side in Side::both() {
            let fighter = &mut self.fighters[side.index()];
            if !fighter.is_alive() {
                continue;
            }

            if let Some(fraction) = fighter.ability_effects.regeneration {
                let amount = fighter.heal(scale(fighter.max_health, fraction));
                if amount > 0 {
                    self.record(LogEvent::Heal {
                        fighter: side,
                        amount,
                        source: EffectSource::Ability(AbilityId::Regeneration),
                    });
                }
            }

            let fighter = &mut self.fighters[side.index()];
            if let Some(blessing) = fighter.ability_effects.divine_blessing {
                if fighter.health_fraction() <= blessing.threshold && fighter.try_consume(AbilityId::DivineBlessing) {
                    let amount = fighter.heal(scale(fighter.max_health, blessing.factor));
                    self.record(LogEvent::Heal {
                        fighter: side,
                        amount,
                        source: EffectSource::Ability(AbilityId::DivineBlessing),
                    });
                }
            }
        }
    }

    /// Speed plus jitter; higher acts first, left wins ties
    fn roll_initiative<R: Rng + ?Sized>(&self, rng: &mut R) -> Side {
        let [left, right] = &self.fighters;
        let left_roll = initiative(left, rng);
        let right_roll = initiative(right, rng);
        if left_roll >= right_roll {
            Side::Left
        } else {
            Side::Right
        }
    }

    /// Tick poison on both sides; true if it knocked someone out
    fn phase_poison(&mut self) -> bool {
        for side in Side::both() {
            let fighter = &mut self.fighters[side.index()];
            if fighter.poison.stacks == 0 {
                continue;
            }
            let damage = fighter.poison.damage;
            fighter.health -= damage;
            fighter.poison.stacks -= 1;
            let stacks_remaining = fighter.poison.stacks;
            self.record(LogEvent::PoisonTick {
                fighter: side,
                damage,
                stacks_remaining,
            });
            if !self.fighters[side.index()].is_alive() {
                return true;
            }
        }
        false
    }

    fn finish<R: Rng + ?Sized>(&mut self, decided_by: Decision, rng: &mut R) -> CombatPhase {
        let mut decided_by = decided_by;
        if !self.anyone_down() {
            let (defeated, decision) = self.cap_loser(rng);
            self.fighters[defeated.index()].health = 0;
            decided_by = decision;
        }

        let winner = if self.fighters[0].is_alive() { Side::Left } else { Side::Right };
        let winner_id = self.fighters[winner.index()].id;
        let loser_id = self.fighters[winner.opponent().index()].id;
        self.record(LogEvent::End {
            winner,
            winner_id,
            loser_id,
            decided_by,
        });

        debug!(turns = self.turn, ?winner, ?decided_by, "Combat finished");
        self.phase = CombatPhase::Finished { winner, decided_by };
        self.phase
    }

    /// Lower health fraction loses; exact ties go to a coin flip
    fn cap_loser<R: Rng + ?Sized>(&self, rng: &mut R) -> (Side, Decision) {
        let [left, right] = &self.fighters;
        // Cross-multiplied so equal fractions compare exactly
        let left_share = left.health as i64 * right.max_health as i64;
        let right_share = right.health as i64 * left.max_health as i64;
        match left_share.cmp(&right_share) {
            std::cmp::Ordering::Less => (Side::Left, Decision::TurnCap),
            std::cmp::Ordering::Greater => (Side::Right, Decision::TurnCap),
            std::cmp::Ordering::Equal => {
                let loser = if rng.gen_bool(0.5) { Side::Left } else { Side::Right };
                (loser, Decision::CoinFlip)
            }
        }
    }

    fn anyone_down(&self) -> bool {
        self.fighters.iter().any(|fighter| !fighter.is_alive())
    }

    fn record(&mut self, event: LogEvent) {
        let health = health_snapshot(&self.fighters);
        self.log.push(self.turn, event, health);
    }

    fn into_outcome(self, winner: Side, decided_by: Decision) -> CombatOutcome {
        let [left, right] = &self.fighters;
        let (winner_fighter, loser_fighter) = match winner {
            Side::Left => (left, right),
            Side::Right => (right, left),
        };
        CombatOutcome {
            winner_id: winner_fighter.id,
            loser_id: loser_fighter.id,
            winner,
            decided_by,
            turns: self.turn,
            log: self.log,
        }
    }
}

fn card(fighter: &Fighter) -> FighterCard {
    FighterCard {
        id: fighter.id,
        name: fighter.name.clone(),
        level: fighter.level,
        max_health: fighter.max_health,
    }
}

fn initiative<R: Rng + ?Sized>(fighter: &Fighter, rng: &mut R) -> f64 {
    let mut roll = fighter.speed as f64 + rng.gen::<f64>() * INITIATIVE_JITTER;
    if fighter.combo_effects.always_first.is_some() {
        roll += ALWAYS_FIRST_BONUS;
    }
    roll
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::fighter::Granted;
    use crate::core::types::Attributes;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn fighter(id: u64, attributes: Attributes) -> Fighter {
        Fighter::plain(CharacterId(id), format!("F{}", id), attributes)
    }

    fn even_pair() -> (Fighter, Fighter) {
        let stats = Attributes::new(100, 10, 8, 8);
        (fighter(1, stats), fighter(2, stats))
    }

    #[test]
    fn test_phases_advance() {
        let (left, right) = even_pair();
        let mut combat = Combat::new(left, right);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(combat.phase(), CombatPhase::NotStarted);

        let phase = combat.run_turn(&mut rng);
        assert_eq!(combat.turn(), 1);
        assert!(matches!(phase, CombatPhase::Running | CombatPhase::Finished { .. }));
        assert_eq!(combat.log().entries()[0].event.kind(), "intro");
    }

    #[test]
    fn test_run_finishes_with_end_entry() {
        let (left, right) = even_pair();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let outcome = Combat::new(left, right).run(&mut rng);

        assert!(outcome.turns >= 1 && outcome.turns <= TURN_CAP);
        assert_ne!(outcome.winner_id, outcome.loser_id);
        let last = outcome.log.last().unwrap();
        assert!(matches!(last.event, LogEvent::End { .. }));
        assert_eq!(last.health.get(outcome.winner.opponent()).health, 0);
    }

    #[test]
    fn test_turn_cap_decides_by_health_fraction() {
        // Neither side can hurt the other meaningfully within the cap
        let tank = Attributes::new(100_000, 1, 0, 8);
        let mut left = fighter(1, tank);
        let right = fighter(2, tank);
        left.health = 90_000;

        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let outcome = Combat::new(left, right).run(&mut rng);
        assert_eq!(outcome.turns, TURN_CAP);
        assert_eq!(outcome.decided_by, Decision::TurnCap);
        assert_eq!(outcome.loser_id, CharacterId(1));
    }

    #[test]
    fn test_left_wins_initiative_ties() {
        let (left, right) = even_pair();
        let combat = Combat::new(left, right);
        let mut rng = StepRng::new(1 << 63, 0);
        assert_eq!(combat.roll_initiative(&mut rng), Side::Left);
    }

    #[test]
    fn test_always_first_wins_initiative() {
        let (left, mut right) = even_pair();
        right.combo_effects.always_first = Some(crate::catalog::ComboId::SupremeReach);
        let combat = Combat::new(left, right);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..50 {
            assert_eq!(combat.roll_initiative(&mut rng), Side::Right);
        }
    }

    #[test]
    fn test_stunned_fighter_skips_reply() {
        let stats = Attributes::new(1_000, 10, 8, 8);
        let left = fighter(1, stats);
        let mut right = fighter(2, stats);
        right.stunned = true;

        let mut combat = Combat::new(left, right);
        // Left wins the tied initiative; right is stunned and skips
        combat.run_turn(&mut StepRng::new(1 << 63, 0));
        assert!(!combat.fighter(Side::Right).stunned);
        assert_eq!(combat.log().of_kind("stunned").count(), 1);
        assert_eq!(combat.log().of_kind("attack").count(), 1);
    }

    #[test]
    fn test_war_cry_and_start_poison() {
        let stats = Attributes::new(1_000, 10, 8, 8);
        let mut left = fighter(1, stats);
        left.ability_effects.war_cry = Some(crate::catalog::DamageBuff { bonus: 0.35, duration: 4 });
        left.ability_uses.insert(AbilityId::WarCry, 1);
        let mut right = fighter(2, stats);
        right.combo_effects.poison_on_start = Some(Granted {
            combo: crate::catalog::ComboId::LethalHunter,
            params: crate::catalog::PoisonDose { damage: 4, duration: 3 },
        });

        let mut combat = Combat::new(left, right);
        combat.start();
        assert_eq!(combat.phase(), CombatPhase::Running);
        assert_eq!(combat.fighter(Side::Left).buffs.len(), 1);
        assert_eq!(combat.fighter(Side::Left).uses_left(AbilityId::WarCry), 0);
        assert_eq!(combat.fighter(Side::Left).poison, Poison { stacks: 3, damage: 4 });
        assert_eq!(combat.log().of_kind("ability_triggered").count(), 2);
    }

    #[test]
    fn test_status_every_third_turn() {
        let stats = Attributes::new(100_000, 5, 0, 8);
        let mut combat = Combat::new(fighter(1, stats), fighter(2, stats));
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..9 {
            combat.run_turn(&mut rng);
        }
        let turns: Vec<u32> = combat.log().of_kind("status").map(|entry| entry.turn).collect();
        assert_eq!(turns, vec![3, 6, 9]);
    }

    fn heals(combat: &Combat) -> Vec<(Side, i32, EffectSource)> {
        combat
            .log()
            .iter()
            .filter_map(|entry| match entry.event {
                LogEvent::Heal { fighter, amount, source } => Some((fighter, amount, source)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_regeneration_heals_each_turn_start() {
        let (mut left, right) = even_pair();
        left.ability_effects.regeneration = Some(0.08);
        left.health = 50;

        let mut combat = Combat::new(left, right);
        combat.phase_pre_turn();
        assert_eq!(combat.fighter(Side::Left).health, 58);
        combat.phase_pre_turn();
        assert_eq!(combat.fighter(Side::Left).health, 66);

        let regen = EffectSource::Ability(AbilityId::Regeneration);
        assert_eq!(heals(&combat), vec![(Side::Left, 8, regen), (Side::Left, 8, regen)]);
    }

    #[test]
    fn test_regeneration_at_full_health_logs_nothing() {
        let (mut left, right) = even_pair();
        left.ability_effects.regeneration = Some(0.08);

        let mut combat = Combat::new(left, right);
        combat.phase_pre_turn();
        assert_eq!(combat.fighter(Side::Left).health, 100);
        assert!(heals(&combat).is_empty());
    }

    #[test]
    fn test_divine_blessing_fires_once() {
        let (left, mut right) = even_pair();
        right.ability_effects.divine_blessing = Some(crate::catalog::ThresholdEffect {
            threshold: 0.50,
            factor: 0.35,
        });
        right.ability_uses.insert(AbilityId::DivineBlessing, 1);
        right.health = 50;

        let mut combat = Combat::new(left, right);
        combat.phase_pre_turn();
        assert_eq!(combat.fighter(Side::Right).health, 85);
        assert_eq!(combat.fighter(Side::Right).uses_left(AbilityId::DivineBlessing), 0);

        combat.fighters[1].health = 40;
        combat.phase_pre_turn();
        assert_eq!(combat.fighter(Side::Right).health, 40);
        assert_eq!(
            heals(&combat),
            vec![(Side::Right, 35, EffectSource::Ability(AbilityId::DivineBlessing))]
        );
    }

    #[test]
    fn test_regeneration_runs_before_blessing_check() {
        let (mut left, right) = even_pair();
        left.ability_effects.regeneration = Some(0.08);
        left.ability_effects.divine_blessing = Some(crate::catalog::ThresholdEffect {
            threshold: 0.50,
            factor: 0.35,
        });
        left.ability_uses.insert(AbilityId::DivineBlessing, 1);
        left.health = 45;

        let mut combat = Combat::new(left, right);
        combat.phase_pre_turn();
        // 45 + 8 lifts the fighter above the blessing threshold
        assert_eq!(combat.fighter(Side::Left).health, 53);
        assert_eq!(combat.fighter(Side::Left).uses_left(AbilityId::DivineBlessing), 1);
    }
}
