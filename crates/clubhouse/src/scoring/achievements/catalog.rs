use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::condition::AchievementCondition;

/// Identifier wrapper for catalog entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AchievementId(pub String);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AchievementCategory {
    Scoring,
    Rounds,
    Accuracy,
    Putting,
    Milestones,
}

/// Unlockable condition definition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub id: AchievementId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub condition: AchievementCondition,
    pub rarity: Rarity,
    pub category: AchievementCategory,
    pub points: u32,
    #[serde(default)]
    pub threshold: Option<u32>,
}

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("achievement id '{0}' appears more than once")]
    DuplicateId(String),
    #[error("achievement '{id}' uses {condition:?} which needs a threshold")]
    MissingThreshold {
        id: String,
        condition: AchievementCondition,
    },
    #[error("failed to read achievement catalog: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid achievement catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validated set of achievements the engine evaluates.
#[derive(Debug, Clone, PartialEq)]
pub struct AchievementCatalog {
    achievements: Vec<Achievement>,
}

impl AchievementCatalog {
    pub fn new(achievements: Vec<Achievement>) -> Result<Self, CatalogError> {
        let mut ids = HashSet::new();
        for achievement in &achievements {
            if !ids.insert(&achievement.id) {
                return Err(CatalogError::DuplicateId(achievement.id.0.clone()));
            }
            if achievement.condition.requires_threshold() && achievement.threshold.is_none() {
                return Err(CatalogError::MissingThreshold {
                    id: achievement.id.0.clone(),
                    condition: achievement.condition,
                });
            }
        }
        Ok(Self { achievements })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CatalogError> {
        let achievements: Vec<Achievement> = serde_json::from_reader(reader)?;
        Self::new(achievements)
    }

    pub fn achievements(&self) -> &[Achievement] {
        &self.achievements
    }

    pub fn get(&self, id: &AchievementId) -> Option<&Achievement> {
        self.achievements.iter().find(|achievement| &achievement.id == id)
    }

    pub fn len(&self) -> usize {
        self.achievements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.achievements.is_empty()
    }

    /// Built-in catalog used when no catalog file is configured.
    pub fn standard() -> Self {
        use AchievementCategory::*;
        use AchievementCondition as C;
        use Rarity::*;

        let entry = |id: &str,
                     name: &str,
                     description: &str,
                     condition: AchievementCondition,
                     rarity: Rarity,
                     category: AchievementCategory,
                     points: u32,
                     threshold: Option<u32>| Achievement {
            id: AchievementId(id.to_string()),
            name: name.to_string(),
            description: description.to_string(),
            condition,
            rarity,
            category,
            points,
            threshold,
        };

        let achievements = vec![
            entry("first_birdie", "First Birdie", "Make a birdie", C::Birdie, Common, Scoring, 10, None),
            entry("eagle_eye", "Eagle Eye", "Make an eagle", C::Eagle, Rare, Scoring, 50, None),
            entry("albatross", "Albatross", "Three under par on a single hole", C::Albatross, Legendary, Scoring, 200, None),
            entry("hole_in_one", "Ace", "Hole out from the tee", C::HoleInOne, Legendary, Scoring, 250, None),
            entry("chip_in", "Chip In", "Hole out from off the green", C::ChipIn, Rare, Putting, 30, None),
            entry("first_round", "Full Card", "Finish all 18 holes of a round", C::RoundComplete, Common, Rounds, 10, None),
            entry("break_100", "Break 100", "Finish a round under 100", C::BreakScore, Common, Milestones, 25, Some(100)),
            entry("break_90", "Break 90", "Finish a round under 90", C::BreakScore, Rare, Milestones, 50, Some(90)),
            entry("break_80", "Break 80", "Finish a round under 80", C::BreakScore, Epic, Milestones, 100, Some(80)),
            entry("nice_round", "Nice", "Finish a round on exactly 69", C::ExactScore, Epic, Milestones, 69, Some(69)),
            entry("under_par", "Red Number", "Finish a round under par", C::UnderParRound, Legendary, Milestones, 150, None),
            entry("bogey_free", "Clean Card", "Finish a round without a bogey", C::BogeyFreeRound, Epic, Scoring, 120, None),
            entry("no_three_putts", "Lag Master", "Finish a round without a three-putt", C::NoThreePutts, Rare, Putting, 40, None),
            entry("birdie_run", "Birdie Fest", "Make three birdies in one round", C::BirdiesInRound, Rare, Scoring, 60, Some(3)),
            entry("fairway_finder", "Fairway Finder", "Hit ten fairways in a round", C::FairwaysHit, Rare, Accuracy, 40, Some(10)),
            entry("greens_machine", "Greens Machine", "Hit twelve greens in regulation in a round", C::GreensInRegulation, Epic, Accuracy, 80, Some(12)),
            entry("regular", "Regular", "Complete ten rounds", C::RoundsCompleted, Rare, Rounds, 50, Some(10)),
            entry("birdie_collector", "Birdie Collector", "Make fifty career birdies", C::CareerBirdies, Epic, Milestones, 100, Some(50)),
        ];

        Self { achievements }
    }
}
