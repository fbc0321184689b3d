//! Fixed combat rules

/// Turns before the engine forces a decision
pub const TURN_CAP: u32 = 40;

/// Random initiative added to speed, drawn from [0, INITIATIVE_JITTER)
pub const INITIATIVE_JITTER: f64 = 5.0;

/// Initiative added by an always-first combo
pub const ALWAYS_FIRST_BONUS: f64 = 1000.0;

/// A status snapshot is logged every this many turns
pub const STATUS_INTERVAL: u32 = 3;

// Dodge
pub const BASE_DODGE_CHANCE: f64 = 0.08;
/// Dodge gained per point of speed the defender has over the attacker
pub const DODGE_PER_SPEED: f64 = 0.006;
pub const MIN_DODGE_CHANCE: f64 = 0.03;
pub const MAX_DODGE_CHANCE: f64 = 0.45;

// Damage
pub const STRENGTH_DAMAGE_FACTOR: f64 = 2.2;
/// Upper bound of the random strength-scaled damage roll
pub const STRENGTH_DAMAGE_SPREAD: f64 = 0.8;
/// Defense subtracted from damage per point
pub const DEFENSE_MITIGATION: f64 = 0.7;
/// Landed attacks and extra strikes never deal less
pub const MIN_DAMAGE: i32 = 1;
/// Critical multiplier when the chance comes from combos alone
pub const CRITICAL_MULTIPLIER: f64 = 2.0;

/// Follow-up hit factors of a volley, applied to the landed damage
pub const VOLLEY_HIT_FACTORS: [f64; 2] = [0.4, 0.3];
