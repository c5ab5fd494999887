//! Scoring and leaderboard engine.
//!
//! A hole submission is normalized, upserted, the round is re-derived from its
//! full score set, and achievements are evaluated against the result.
//! Leaderboards are computed on read.

pub mod achievements;
pub mod aggregate;
pub mod callaway;
pub mod domain;
pub mod format;
pub mod leaderboard;
pub mod repository;
pub mod router;
pub mod service;
pub mod validator;

#[cfg(test)]
mod tests;

pub use aggregate::{summarize_round, RoundSummary};
pub use callaway::{callaway_score, CallawayResult, DeductionAllowance};
pub use domain::{
    Course, Hole, HoleScore, Par, PlayerId, RoundKey, RoundRecord, ScoringFormat, TeeYardage,
    Tournament, TournamentId, TournamentPlayer,
};
pub use format::{calculate, FormatInput, FormatOutcome};
pub use leaderboard::{rank_players, Leaderboard, LeaderboardEntry, RoundFilter};
pub use repository::{
    AchievementStore, RepositoryError, ScoreRepository, TournamentDirectory, UnlockOutcome,
};
pub use router::scoring_router;
pub use service::{
    AchievementLedger, AchievementView, RoundView, ScoreReceipt, ScoreSubmission,
    ScoringService, ScoringServiceError,
};
pub use validator::{validate_entry, HoleEntry, ScoreEntryError};
