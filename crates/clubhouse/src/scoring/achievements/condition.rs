use serde::{Deserialize, Serialize};

use crate::scoring::aggregate::RoundSummary;
use crate::scoring::domain::{HoleScore, RoundKey};

/// Cumulative facts about a player, including the round being evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PlayerHistory {
    pub rounds_completed: u32,
    pub career_birdies: u32,
}

/// Completed round as seen by round-scoped conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundSnapshot {
    pub key: RoundKey,
    pub summary: RoundSummary,
    pub scores: Vec<HoleScore>,
    pub history: PlayerHistory,
}

impl RoundSnapshot {
    fn count(&self, predicate: impl Fn(&HoleScore) -> bool) -> u32 {
        self.scores.iter().filter(|score| predicate(score)).count() as u32
    }
}

/// Facts an achievement can be evaluated against.
#[derive(Debug, Clone, PartialEq)]
pub enum AchievementSnapshot {
    Hole(HoleScore),
    Round(RoundSnapshot),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConditionScope {
    Hole,
    Round,
}

/// Closed set of unlock conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCondition {
    Birdie,
    Eagle,
    Albatross,
    HoleInOne,
    ChipIn,
    RoundComplete,
    /// Complete round with a total below the threshold.
    BreakScore,
    /// Complete round with a total equal to the threshold.
    ExactScore,
    UnderParRound,
    BogeyFreeRound,
    NoThreePutts,
    /// At least `threshold` birdies or better in one round.
    BirdiesInRound,
    FairwaysHit,
    GreensInRegulation,
    RoundsCompleted,
    CareerBirdies,
}

impl AchievementCondition {
    pub const fn scope(self) -> ConditionScope {
        match self {
            AchievementCondition::Birdie
            | AchievementCondition::Eagle
            | AchievementCondition::Albatross
            | AchievementCondition::HoleInOne
            | AchievementCondition::ChipIn => ConditionScope::Hole,
            _ => ConditionScope::Round,
        }
    }

    pub const fn requires_threshold(self) -> bool {
        matches!(
            self,
            AchievementCondition::BreakScore
                | AchievementCondition::ExactScore
                | AchievementCondition::BirdiesInRound
                | AchievementCondition::FairwaysHit
                | AchievementCondition::GreensInRegulation
                | AchievementCondition::RoundsCompleted
                | AchievementCondition::CareerBirdies
        )
    }

    /// Pure predicate over a snapshot. Threshold conditions without a
    /// threshold never match.
    pub fn is_met(self, snapshot: &AchievementSnapshot, threshold: Option<u32>) -> bool {
        match snapshot {
            AchievementSnapshot::Hole(score) => self.is_met_by_hole(score),
            AchievementSnapshot::Round(round) => self.is_met_by_round(round, threshold),
        }
    }

    fn is_met_by_hole(self, score: &HoleScore) -> bool {
        match self {
            AchievementCondition::Birdie => score.to_par() == -1,
            AchievementCondition::Eagle => score.to_par() == -2,
            AchievementCondition::Albatross => score.to_par() == -3,
            AchievementCondition::HoleInOne => score.strokes == 1,
            AchievementCondition::ChipIn => score.putts == 0 && score.strokes > 1,
            _ => false,
        }
    }

    fn is_met_by_round(self, round: &RoundSnapshot, threshold: Option<u32>) -> bool {
        let complete = round.summary.is_complete;
        let total = round.summary.total_strokes;
        let at_least = |value: u32| threshold.is_some_and(|t| value >= t);

        match self {
            AchievementCondition::RoundComplete => complete,
            AchievementCondition::BreakScore => complete && threshold.is_some_and(|t| total < t),
            AchievementCondition::ExactScore => complete && threshold == Some(total),
            AchievementCondition::UnderParRound => complete && round.summary.score_to_par < 0,
            AchievementCondition::BogeyFreeRound => {
                complete && round.scores.iter().all(|score| score.to_par() <= 0)
            }
            AchievementCondition::NoThreePutts => {
                complete && round.scores.iter().all(|score| score.putts < 3)
            }
            AchievementCondition::BirdiesInRound => {
                at_least(round.count(|score| score.to_par() <= -1))
            }
            AchievementCondition::FairwaysHit => {
                complete && at_least(round.count(|score| score.fairway_hit))
            }
            AchievementCondition::GreensInRegulation => {
                complete && at_least(round.count(|score| score.green_in_regulation))
            }
            AchievementCondition::RoundsCompleted => at_least(round.history.rounds_completed),
            AchievementCondition::CareerBirdies => at_least(round.history.career_birdies),
            _ => false,
        }
    }
}
