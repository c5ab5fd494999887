use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::catalog::{Achievement, AchievementCatalog, AchievementId};
use super::condition::{AchievementSnapshot, ConditionScope};
use crate::scoring::domain::PlayerId;
use crate::scoring::repository::{AchievementStore, RepositoryError, UnlockOutcome};

/// Immutable unlock record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerAchievement {
    pub player_id: PlayerId,
    pub achievement_id: AchievementId,
    pub unlocked_at: DateTime<Utc>,
}

/// Newly unlocked achievement returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnlockedAchievement {
    pub achievement_id: AchievementId,
    pub name: String,
    pub points: u32,
}

impl From<&Achievement> for UnlockedAchievement {
    fn from(achievement: &Achievement) -> Self {
        Self {
            achievement_id: achievement.id.clone(),
            name: achievement.name.clone(),
            points: achievement.points,
        }
    }
}

/// Catalog entries whose condition holds for the snapshot. No side effects.
pub fn evaluate<'c>(
    catalog: &'c AchievementCatalog,
    snapshot: &AchievementSnapshot,
) -> Vec<&'c Achievement> {
    let scope = match snapshot {
        AchievementSnapshot::Hole(_) => ConditionScope::Hole,
        AchievementSnapshot::Round(_) => ConditionScope::Round,
    };

    catalog
        .achievements()
        .iter()
        .filter(|achievement| achievement.condition.scope() == scope)
        .filter(|achievement| achievement.condition.is_met(snapshot, achievement.threshold))
        .collect()
}

/// Persist unlocks for the matched achievements at most once per player.
///
/// A duplicate, whether reported as `AlreadyUnlocked` or as a `Conflict`
/// from the store, is a successful no-op and is left out of the result.
pub fn unlock<S: AchievementStore + ?Sized>(
    store: &S,
    player_id: &PlayerId,
    matched: &[&Achievement],
    now: DateTime<Utc>,
) -> Result<Vec<UnlockedAchievement>, RepositoryError> {
    let mut unlocked = Vec::new();

    for achievement in matched {
        let record = PlayerAchievement {
            player_id: player_id.clone(),
            achievement_id: achievement.id.clone(),
            unlocked_at: now,
        };

        match store.insert_if_absent(record) {
            Ok(UnlockOutcome::Created) => {
                info!(
                    player = %player_id,
                    achievement = %achievement.id.0,
                    points = achievement.points,
                    "achievement unlocked"
                );
                unlocked.push(UnlockedAchievement::from(*achievement));
            }
            Ok(UnlockOutcome::AlreadyUnlocked) | Err(RepositoryError::Conflict) => {
                debug!(
                    player = %player_id,
                    achievement = %achievement.id.0,
                    "achievement already unlocked"
                );
            }
            Err(err) => return Err(err),
        }
    }

    Ok(unlocked)
}
