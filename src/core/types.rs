//! Core type definitions used throughout the codebase

use serde::{Deserialize, Serialize};

/// Opaque identifier of a persisted character
///
/// The engine never dereferences it; it only echoes it back in outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CharacterId(pub u64);

impl CharacterId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CharacterId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four combat attributes
///
/// Used both for base values on a character sheet and for the effective
/// values after equipment and combos. Values are signed: speed deltas on
/// gear can push a stat below its base.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attributes {
    pub max_health: i32,
    pub strength: i32,
    pub defense: i32,
    pub speed: i32,
}

impl Attributes {
    pub fn new(max_health: i32, strength: i32, defense: i32, speed: i32) -> Self {
        Self {
            max_health,
            strength,
            defense,
            speed,
        }
    }

    /// Component-wise sum
    pub fn plus(&self, other: &Attributes) -> Attributes {
        Attributes {
            max_health: self.max_health + other.max_health,
            strength: self.strength + other.strength,
            defense: self.defense + other.defense,
            speed: self.speed + other.speed,
        }
    }

    /// True if every component is at least the other's
    pub fn dominates(&self, other: &Attributes) -> bool {
        self.max_health >= other.max_health
            && self.strength >= other.strength
            && self.defense >= other.defense
            && self.speed >= other.speed
    }
}

/// Which side of a combat a fighter stands on
///
/// Left is the fighter passed first to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    /// Both sides in left/right order
    pub fn both() -> [Side; 2] {
        [Side::Left, Side::Right]
    }
}
