//! Experience curve and post-combat awards

use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::character::CharacterSheet;
use crate::progression::level_up::{level_up, LevelUp};
use crate::progression::rewards::FieldUpdates;

/// No level-ups past this level
pub const LEVEL_CAP: u32 = 50;

const BASE_LEVEL_XP: f64 = 100.0;
const LEVEL_XP_GROWTH: f64 = 1.3;

const WIN_BASE_XP: u32 = 30;
const WIN_XP_PER_LEVEL: u32 = 5;
/// Bonus per level the opponent has over the winner
const UNDERDOG_BONUS: f64 = 0.1;
const LOSS_BASE_XP: u32 = 8;
const LOSS_XP_PER_LEVEL: u32 = 2;

/// Experience needed to complete `level`: floor(100 * 1.3^(level - 1))
pub fn xp_for_level(level: u32) -> u32 {
    let exponent = level as f64 - 1.0;
    (BASE_LEVEL_XP * LEVEL_XP_GROWTH.powf(exponent)).floor() as u32
}

/// Experience for beating an opponent of `opponent_level`
pub fn experience_for_win(own_level: u32, opponent_level: u32) -> u32 {
    let base = WIN_BASE_XP + WIN_XP_PER_LEVEL * opponent_level;
    let underdog = opponent_level.saturating_sub(own_level) as f64;
    (base as f64 * (1.0 + underdog * UNDERDOG_BONUS)).floor() as u32
}

/// Experience for losing to an opponent of `opponent_level`
pub fn experience_for_loss(opponent_level: u32) -> u32 {
    LOSS_BASE_XP + LOSS_XP_PER_LEVEL * opponent_level
}

pub fn experience_for_result(won: bool, own_level: u32, opponent_level: u32) -> u32 {
    if won {
        experience_for_win(own_level, opponent_level)
    } else {
        experience_for_loss(opponent_level)
    }
}

/// What an award changes on a sheet
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExperienceAward {
    pub experience_gained: u32,
    pub updates: FieldUpdates,
    pub level_up: Option<LevelUp>,
}

impl ExperienceAward {
    pub fn leveled_up(&self) -> bool {
        self.level_up.is_some()
    }
}

/// Add experience, levelling up once if the threshold is crossed
///
/// Surplus experience carries over into the next level. The sheet itself is
/// left untouched.
pub fn award_experience<R: Rng + ?Sized>(sheet: &CharacterSheet, gained: u32, rng: &mut R) -> ExperienceAward {
    let total = sheet.experience.saturating_add(gained);

    if total >= sheet.experience_next && sheet.level < LEVEL_CAP {
        let level_up = level_up(sheet, rng);
        let mut updates = level_up.field_updates();
        updates.experience = Some(total - sheet.experience_next);
        debug!(character = %sheet.id, level = level_up.new_level, "Level up");
        return ExperienceAward {
            experience_gained: gained,
            updates,
            level_up: Some(level_up),
        };
    }

    ExperienceAward {
        experience_gained: gained,
        updates: FieldUpdates {
            experience: Some(total),
            ..FieldUpdates::default()
        },
        level_up: None,
    }
}
