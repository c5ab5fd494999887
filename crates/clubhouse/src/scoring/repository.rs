use serde::{Deserialize, Serialize};

use super::aggregate::RoundSummary;
use super::achievements::PlayerAchievement;
use super::domain::{
    HoleScore, PlayerId, RoundKey, RoundRecord, Tournament, TournamentId, TournamentPlayer,
};

/// Read access to tournament, course and roster records owned elsewhere.
pub trait TournamentDirectory: Send + Sync {
    fn tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, RepositoryError>;
    fn roster(&self, id: &TournamentId) -> Result<Vec<TournamentPlayer>, RepositoryError>;
}

/// Score persistence. Rounds are created lazily by the first upsert.
pub trait ScoreRepository: Send + Sync {
    /// Insert or replace the score for `score.hole_number` within the round.
    fn upsert_score(&self, key: &RoundKey, score: HoleScore) -> Result<(), RepositoryError>;
    /// Consistent copy of every score recorded for the round.
    fn round_scores(&self, key: &RoundKey) -> Result<Vec<HoleScore>, RepositoryError>;
    /// Store the freshly derived totals and completion flag.
    fn record_summary(&self, key: &RoundKey, summary: &RoundSummary)
        -> Result<(), RepositoryError>;
    fn tournament_rounds(&self, id: &TournamentId) -> Result<Vec<RoundRecord>, RepositoryError>;
    fn player_rounds(&self, player_id: &PlayerId) -> Result<Vec<RoundRecord>, RepositoryError>;
}

/// Result of an insert-or-ignore unlock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnlockOutcome {
    Created,
    AlreadyUnlocked,
}

/// Append-only unlock records, unique per (player, achievement).
pub trait AchievementStore: Send + Sync {
    /// Atomically insert unless the pair already exists.
    fn insert_if_absent(&self, record: PlayerAchievement)
        -> Result<UnlockOutcome, RepositoryError>;
    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<PlayerAchievement>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}
