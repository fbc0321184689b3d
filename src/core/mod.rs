pub mod config;
pub mod error;
pub mod rng;
pub mod types;

pub use config::BalanceConfig;
pub use error::{ArenaError, Result};
pub use rng::{derive_seed, seeded_rng, CombatRng};
pub use types::{Attributes, CharacterId, Side};
