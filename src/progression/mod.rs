//! Character progression
//!
//! Experience awards, level-ups and reward choices. Nothing here mutates a
//! sheet; every operation returns `FieldUpdates` for the caller to persist.

pub mod experience;
pub mod level_up;
pub mod rewards;

pub use experience::{
    award_experience, experience_for_loss, experience_for_result, experience_for_win, xp_for_level, ExperienceAward,
    LEVEL_CAP,
};
pub use level_up::{generate_reward_choices, level_up, LevelUp, REWARD_CHOICES};
pub use rewards::{choose_pending_reward, reward_updates, FieldUpdates, PendingReward, RewardChoice};
