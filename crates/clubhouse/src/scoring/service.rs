use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::achievements::{
    evaluate, unlock, AchievementCatalog, AchievementCategory, AchievementId,
    AchievementSnapshot, PlayerHistory, Rarity, RoundSnapshot, UnlockedAchievement,
};
use super::aggregate::{summarize_round, RoundSummary};
use super::domain::{HoleScore, PlayerId, RoundKey, Tournament, TournamentId};
use super::leaderboard::{rank_players, Leaderboard, RoundFilter};
use super::repository::{AchievementStore, RepositoryError, ScoreRepository, TournamentDirectory};
use super::validator::{validate_entry, HoleEntry, ScoreEntryError};

/// Hole entry as submitted for a tournament.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreSubmission {
    pub player_id: PlayerId,
    pub round_number: u8,
    pub hole_number: u8,
    pub strokes: u8,
    pub putts: u8,
    #[serde(default)]
    pub fairway_hit: bool,
    #[serde(default)]
    pub green_in_regulation: bool,
}

/// Result of a score write: the stored score, fresh round totals and unlocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReceipt {
    pub key: RoundKey,
    pub score: HoleScore,
    pub round: RoundSummary,
    pub unlocked: Vec<UnlockedAchievement>,
    pub points_awarded: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundView {
    pub key: RoundKey,
    pub summary: RoundSummary,
    pub scores: Vec<HoleScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementView {
    pub achievement_id: AchievementId,
    pub name: String,
    pub rarity: Option<Rarity>,
    pub category: Option<AchievementCategory>,
    pub points: u32,
    pub unlocked_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AchievementLedger {
    pub player_id: PlayerId,
    pub total_points: u32,
    pub achievements: Vec<AchievementView>,
}

/// Request-driven scoring pipeline: validate, persist, aggregate, unlock.
/// Holds no mutable state of its own.
pub struct ScoringService<D, S, A> {
    directory: Arc<D>,
    scores: Arc<S>,
    achievements: Arc<A>,
    catalog: Arc<AchievementCatalog>,
}

impl<D, S, A> ScoringService<D, S, A>
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    pub fn new(
        directory: Arc<D>,
        scores: Arc<S>,
        achievements: Arc<A>,
        catalog: AchievementCatalog,
    ) -> Self {
        Self {
            directory,
            scores,
            achievements,
            catalog: Arc::new(catalog),
        }
    }

    /// Record one hole and return the re-derived round plus any unlocks.
    pub fn submit_score(
        &self,
        tournament_id: &TournamentId,
        submission: ScoreSubmission,
    ) -> Result<ScoreReceipt, ScoringServiceError> {
        let tournament = self.tournament(tournament_id)?;
        if !tournament.has_round(submission.round_number) {
            return Err(ScoringServiceError::InvalidRound(submission.round_number));
        }

        let roster = self.directory.roster(tournament_id)?;
        if !roster
            .iter()
            .any(|player| player.player_id == submission.player_id)
        {
            return Err(ScoringServiceError::UnknownPlayer(
                submission.player_id.0.clone(),
            ));
        }

        let hole = tournament
            .course
            .hole(submission.hole_number)
            .ok_or(ScoringServiceError::UnknownHole(submission.hole_number))?;

        let entry = validate_entry(HoleEntry {
            par: hole.par,
            strokes: submission.strokes,
            putts: submission.putts,
            fairway_hit: submission.fairway_hit,
            green_in_regulation: submission.green_in_regulation,
        })
        .map_err(|err| {
            warn!(
                tournament = %tournament_id,
                player = %submission.player_id,
                hole = submission.hole_number,
                %err,
                "score rejected"
            );
            err
        })?;

        let key = RoundKey {
            tournament_id: tournament_id.clone(),
            player_id: submission.player_id,
            round_number: submission.round_number,
        };
        let score = entry.into_score(submission.hole_number);
        self.scores.upsert_score(&key, score)?;

        let round_scores = self.scores.round_scores(&key)?;
        let summary = summarize_round(&round_scores);
        self.scores.record_summary(&key, &summary)?;
        debug!(
            tournament = %key.tournament_id,
            player = %key.player_id,
            round = key.round_number,
            hole = score.hole_number,
            total = summary.total_strokes,
            "score recorded"
        );

        let mut matched = evaluate(&self.catalog, &AchievementSnapshot::Hole(score));
        if summary.is_complete {
            info!(
                tournament = %key.tournament_id,
                player = %key.player_id,
                round = key.round_number,
                total = summary.total_strokes,
                "round complete"
            );
            let snapshot = AchievementSnapshot::Round(RoundSnapshot {
                key: key.clone(),
                summary,
                scores: round_scores,
                history: self.player_history(&key.player_id)?,
            });
            matched.extend(evaluate(&self.catalog, &snapshot));
        }

        let unlocked = unlock(
            self.achievements.as_ref(),
            &key.player_id,
            &matched,
            Utc::now(),
        )?;
        let points_awarded = unlocked.iter().map(|achievement| achievement.points).sum();

        Ok(ScoreReceipt {
            key,
            score,
            round: summary,
            unlocked,
            points_awarded,
        })
    }

    pub fn round(&self, key: &RoundKey) -> Result<RoundView, ScoringServiceError> {
        let tournament = self.tournament(&key.tournament_id)?;
        if !tournament.has_round(key.round_number) {
            return Err(ScoringServiceError::InvalidRound(key.round_number));
        }

        let mut scores = self.scores.round_scores(key)?;
        scores.sort_by_key(|score| score.hole_number);
        Ok(RoundView {
            key: key.clone(),
            summary: summarize_round(&scores),
            scores,
        })
    }

    /// Rank the roster on read from a fresh copy of the tournament's rounds.
    pub fn leaderboard(
        &self,
        tournament_id: &TournamentId,
        filter: RoundFilter,
    ) -> Result<Leaderboard, ScoringServiceError> {
        let tournament = self.tournament(tournament_id)?;
        if let RoundFilter::Round(number) = filter {
            if !tournament.has_round(number) {
                return Err(ScoringServiceError::InvalidRound(number));
            }
        }

        let roster = self.directory.roster(tournament_id)?;
        let rounds = self.scores.tournament_rounds(tournament_id)?;
        Ok(rank_players(&tournament, &roster, &rounds, filter))
    }

    pub fn player_achievements(
        &self,
        player_id: &PlayerId,
    ) -> Result<AchievementLedger, ScoringServiceError> {
        let mut records = self.achievements.for_player(player_id)?;
        records.sort_by(|a, b| {
            a.unlocked_at
                .cmp(&b.unlocked_at)
                .then_with(|| a.achievement_id.cmp(&b.achievement_id))
        });

        let achievements: Vec<AchievementView> = records
            .into_iter()
            .map(|record| match self.catalog.get(&record.achievement_id) {
                Some(achievement) => AchievementView {
                    achievement_id: record.achievement_id,
                    name: achievement.name.clone(),
                    rarity: Some(achievement.rarity),
                    category: Some(achievement.category),
                    points: achievement.points,
                    unlocked_at: record.unlocked_at,
                },
                None => AchievementView {
                    name: record.achievement_id.0.clone(),
                    achievement_id: record.achievement_id,
                    rarity: None,
                    category: None,
                    points: 0,
                    unlocked_at: record.unlocked_at,
                },
            })
            .collect();

        Ok(AchievementLedger {
            player_id: player_id.clone(),
            total_points: achievements.iter().map(|view| view.points).sum(),
            achievements,
        })
    }

    fn tournament(&self, id: &TournamentId) -> Result<Tournament, ScoringServiceError> {
        self.directory
            .tournament(id)?
            .ok_or_else(|| ScoringServiceError::UnknownTournament(id.0.clone()))
    }

    fn player_history(&self, player_id: &PlayerId) -> Result<PlayerHistory, RepositoryError> {
        let rounds = self.scores.player_rounds(player_id)?;
        let rounds_completed = rounds
            .iter()
            .filter(|record| summarize_round(&record.scores).is_complete)
            .count() as u32;
        let career_birdies = rounds
            .iter()
            .flat_map(|record| record.scores.iter())
            .filter(|score| score.strokes >= 1 && score.to_par() <= -1)
            .count() as u32;

        Ok(PlayerHistory {
            rounds_completed,
            career_birdies,
        })
    }
}

/// Error raised by the scoring service.
#[derive(Debug, thiserror::Error)]
pub enum ScoringServiceError {
    #[error("tournament '{0}' not found")]
    UnknownTournament(String),
    #[error("player '{0}' is not entered in this tournament")]
    UnknownPlayer(String),
    #[error("hole {0} is not on the course card")]
    UnknownHole(u8),
    #[error("round {0} is not part of this tournament")]
    InvalidRound(u8),
    #[error(transparent)]
    InvalidEntry(#[from] ScoreEntryError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
