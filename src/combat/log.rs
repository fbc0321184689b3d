//! Combat log: the replay record consumed by renderers
//!
//! Every entry carries the turn it happened on and both fighters' health
//! right after the event, so a consumer can rebuild the visual state from
//! any single entry.

use serde::{Deserialize, Serialize};

use crate::catalog::{AbilityId, ComboId};
use crate::core::types::{CharacterId, Side};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthBar {
    /// Never negative
    pub health: i32,
    pub max_health: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub left: HealthBar,
    pub right: HealthBar,
}

impl HealthSnapshot {
    pub fn get(&self, side: Side) -> HealthBar {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Who a fighter is, as shown in the intro
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FighterCard {
    pub id: CharacterId,
    pub name: String,
    pub level: u32,
    pub max_health: i32,
}

/// What granted an effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum EffectSource {
    Ability(AbilityId),
    Combo(ComboId),
}

/// Modifiers that shaped a landed attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrikeModifier {
    FirstStrike,
    Critical,
    Fury,
    Execute,
    DamageBuff,
    Shielded,
    Poisoned,
    Stunned,
}

/// How the winner was decided
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Knockout,
    /// Lower health fraction at the turn cap
    TurnCap,
    /// Equal health fractions at the turn cap
    CoinFlip,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LogEvent {
    Intro {
        left: FighterCard,
        right: FighterCard,
    },
    ComboActivated {
        fighter: Side,
        combo: ComboId,
    },
    /// A limited ability or start-of-combat effect fired
    AbilityTriggered {
        fighter: Side,
        source: EffectSource,
    },
    Attack {
        attacker: Side,
        damage: i32,
        critical: bool,
        modifiers: Vec<StrikeModifier>,
    },
    Dodge {
        attacker: Side,
    },
    Heal {
        fighter: Side,
        amount: i32,
        source: EffectSource,
    },
    Lifesteal {
        fighter: Side,
        amount: i32,
        source: EffectSource,
    },
    /// `fighter` reflects damage onto its attacker
    Thorns {
        fighter: Side,
        damage: i32,
    },
    Counter {
        fighter: Side,
        damage: i32,
    },
    ExtraStrike {
        attacker: Side,
        damage: i32,
        hits: u32,
        source: EffectSource,
    },
    PoisonTick {
        fighter: Side,
        damage: i32,
        stacks_remaining: u32,
    },
    /// `fighter` loses its reply attack
    Stunned {
        fighter: Side,
    },
    Status,
    End {
        winner: Side,
        winner_id: CharacterId,
        loser_id: CharacterId,
        decided_by: Decision,
    },
}

impl LogEvent {
    /// Wire discriminator of this event
    pub fn kind(&self) -> &'static str {
        match self {
            LogEvent::Intro { .. } => "intro",
            LogEvent::ComboActivated { .. } => "combo_activated",
            LogEvent::AbilityTriggered { .. } => "ability_triggered",
            LogEvent::Attack { .. } => "attack",
            LogEvent::Dodge { .. } => "dodge",
            LogEvent::Heal { .. } => "heal",
            LogEvent::Lifesteal { .. } => "lifesteal",
            LogEvent::Thorns { .. } => "thorns",
            LogEvent::Counter { .. } => "counter",
            LogEvent::ExtraStrike { .. } => "extra_strike",
            LogEvent::PoisonTick { .. } => "poison_tick",
            LogEvent::Stunned { .. } => "stunned",
            LogEvent::Status => "status",
            LogEvent::End { .. } => "end",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// 0 for entries emitted before the first turn
    pub turn: u32,
    #[serde(flatten)]
    pub event: LogEvent,
    pub health: HealthSnapshot,
}

/// Append-only, chronologically ordered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CombatLog {
    entries: Vec<LogEntry>,
}

impl CombatLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: u32, event: LogEvent, health: HealthSnapshot) {
        self.entries.push(LogEntry { turn, event, health });
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn last(&self) -> Option<&LogEntry> {
        self.entries.last()
    }

    /// Entries whose wire discriminator is `kind`
    pub fn of_kind<'a>(&'a self, kind: &'a str) -> impl Iterator<Item = &'a LogEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.event.kind() == kind)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "[]".to_string())
    }
}

impl<'a> IntoIterator for &'a CombatLog {
    type Item = &'a LogEntry;
    type IntoIter = std::slice::Iter<'a, LogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> HealthSnapshot {
        HealthSnapshot {
            left: HealthBar { health: 80, max_health: 100 },
            right: HealthBar { health: 0, max_health: 120 },
        }
    }

    #[test]
    fn test_entry_wire_format_is_flat_and_tagged() {
        let entry = LogEntry {
            turn: 4,
            event: LogEvent::Attack {
                attacker: Side::Left,
                damage: 17,
                critical: true,
                modifiers: vec![StrikeModifier::Critical],
            },
            health: snapshot(),
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(value["type"], "attack");
        assert_eq!(value["turn"], 4);
        assert_eq!(value["attacker"], "left");
        assert_eq!(value["modifiers"][0], "critical");
        assert_eq!(value["health"]["right"]["max_health"], 120);
    }

    #[test]
    fn test_effect_source_wire_format() {
        let json = serde_json::to_string(&EffectSource::Combo(ComboId::Reaper)).unwrap();
        assert_eq!(json, r#"{"kind":"combo","id":"reaper"}"#);
    }

    #[test]
    fn test_unknown_fields_are_tolerated() {
        let json = r#"{
            "type": "dodge",
            "turn": 2,
            "attacker": "right",
            "flavour": "swift",
            "health": {
                "left": { "health": 50, "max_health": 100 },
                "right": { "health": 60, "max_health": 100 }
            }
        }"#;
        let entry: LogEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.event, LogEvent::Dodge { attacker: Side::Right });
    }

    #[test]
    fn test_log_roundtrip_and_filter() {
        let mut log = CombatLog::new();
        log.push(0, LogEvent::Status, snapshot());
        log.push(1, LogEvent::Dodge { attacker: Side::Left }, snapshot());
        log.push(3, LogEvent::Status, snapshot());

        assert_eq!(log.of_kind("status").count(), 2);
        let decoded: CombatLog = serde_json::from_str(&log.to_json()).unwrap();
        assert_eq!(decoded, log);
    }

    #[test]
    fn test_kind_matches_serde_tag() {
        let event = LogEvent::PoisonTick {
            fighter: Side::Right,
            damage: 5,
            stacks_remaining: 2,
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["type"], event.kind());
    }
}
