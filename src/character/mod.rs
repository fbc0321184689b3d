//! Character sheets as handed to the engine by the persistence layer

pub mod lenient;
pub mod sheet;

pub use sheet::{CharacterSheet, InventoryItem, STARTING_ATTRIBUTES, WEAPON_SLOTS};
