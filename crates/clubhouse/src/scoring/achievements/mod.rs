//! Achievement catalog and unlock engine.
//!
//! Conditions are a closed enum evaluated as pure predicates over a hole or
//! round snapshot. Unlocking goes through the store's insert-or-ignore so each
//! (player, achievement) pair is recorded at most once.

mod catalog;
mod condition;
mod engine;

pub use catalog::{
    Achievement, AchievementCatalog, AchievementCategory, AchievementId, CatalogError, Rarity,
};
pub use condition::{
    AchievementCondition, AchievementSnapshot, ConditionScope, PlayerHistory, RoundSnapshot,
};
pub use engine::{evaluate, unlock, PlayerAchievement, UnlockedAchievement};
