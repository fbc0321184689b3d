//! Static, read-only game catalog
//!
//! Every table is a `&'static [Definition]` keyed by a closed id enum.
//! Unknown identifiers in persisted data never reach these tables; they are
//! dropped while decoding a character sheet.

pub mod abilities;
pub mod boosts;
pub mod combos;
pub mod effects;
pub mod items;

pub use abilities::{AbilityDefinition, AbilityEffect, AbilityId, AbilityKind, Trigger, ABILITY_LIBRARY};
pub use boosts::{StatBoostDefinition, StatBoostId, STAT_BOOSTS};
pub use combos::{
    ComboBonus, ComboDefinition, ComboEffect, ComboId, StatModifier, WeaponRequirement, COMBO_LIBRARY,
};
pub use effects::{ChanceEffect, DamageBuff, PoisonDose, ThresholdEffect};
pub use items::{
    AccessoryDefinition, AccessoryId, ArmorDefinition, ArmorId, WeaponDefinition, WeaponId, ACCESSORIES, ARMORS,
    WEAPONS,
};
