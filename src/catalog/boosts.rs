//! Flat stat boosts offered as level-up rewards

use serde::{Deserialize, Serialize};

use crate::core::types::Attributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatBoostId {
    BoostStr,
    BoostDef,
    BoostSpd,
    BoostHp,
    BoostStrHp,
    BoostDefSpd,
    BoostAll,
}

impl StatBoostId {
    pub fn all() -> &'static [StatBoostId] {
        &[
            StatBoostId::BoostStr,
            StatBoostId::BoostDef,
            StatBoostId::BoostSpd,
            StatBoostId::BoostHp,
            StatBoostId::BoostStrHp,
            StatBoostId::BoostDefSpd,
            StatBoostId::BoostAll,
        ]
    }

    pub fn key(&self) -> &'static str {
        match self {
            StatBoostId::BoostStr => "boost_str",
            StatBoostId::BoostDef => "boost_def",
            StatBoostId::BoostSpd => "boost_spd",
            StatBoostId::BoostHp => "boost_hp",
            StatBoostId::BoostStrHp => "boost_str_hp",
            StatBoostId::BoostDefSpd => "boost_def_spd",
            StatBoostId::BoostAll => "boost_all",
        }
    }

    pub fn from_key(key: &str) -> Option<StatBoostId> {
        Self::all().iter().copied().find(|id| id.key() == key)
    }

    pub fn definition(&self) -> Option<&'static StatBoostDefinition> {
        STAT_BOOSTS.iter().find(|def| def.id == *self)
    }
}

#[derive(Debug, Clone)]
pub struct StatBoostDefinition {
    pub id: StatBoostId,
    pub name: &'static str,
    /// Flat deltas added to the character's base attributes
    pub deltas: Attributes,
}

pub static STAT_BOOSTS: &[StatBoostDefinition] = &[
    StatBoostDefinition {
        id: StatBoostId::BoostStr,
        name: "+5 Strength",
        deltas: Attributes { max_health: 0, strength: 5, defense: 0, speed: 0 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostDef,
        name: "+5 Defense",
        deltas: Attributes { max_health: 0, strength: 0, defense: 5, speed: 0 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostSpd,
        name: "+5 Speed",
        deltas: Attributes { max_health: 0, strength: 0, defense: 0, speed: 5 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostHp,
        name: "+25 Health",
        deltas: Attributes { max_health: 25, strength: 0, defense: 0, speed: 0 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostStrHp,
        name: "+3 Strength +15 Health",
        deltas: Attributes { max_health: 15, strength: 3, defense: 0, speed: 0 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostDefSpd,
        name: "+3 Defense +3 Speed",
        deltas: Attributes { max_health: 0, strength: 0, defense: 3, speed: 3 },
    },
    StatBoostDefinition {
        id: StatBoostId::BoostAll,
        name: "+2 to every stat",
        deltas: Attributes { max_health: 10, strength: 2, defense: 2, speed: 2 },
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boosts_are_non_negative() {
        for def in STAT_BOOSTS {
            assert!(def.deltas.dominates(&Attributes::default()), "{}", def.name);
        }
    }

    #[test]
    fn test_every_boost_defined() {
        assert_eq!(STAT_BOOSTS.len(), StatBoostId::all().len());
        assert!(StatBoostId::all().iter().all(|id| id.definition().is_some()));
    }
}
