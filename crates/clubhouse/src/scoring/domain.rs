use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier wrapper for tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TournamentId(pub String);

/// Identifier wrapper for players entered in tournaments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub String);

impl fmt::Display for TournamentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

pub const HOLES_PER_ROUND: usize = 18;
pub const FRONT_NINE_LAST_HOLE: u8 = 9;

/// Par of a single hole. Only 3, 4 and 5 are valid on a course card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Par {
    Three,
    Four,
    Five,
}

impl Par {
    pub const fn strokes(self) -> u8 {
        match self {
            Par::Three => 3,
            Par::Four => 4,
            Par::Five => 5,
        }
    }
}

impl TryFrom<u8> for Par {
    type Error = InvalidPar;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            3 => Ok(Par::Three),
            4 => Ok(Par::Four),
            5 => Ok(Par::Five),
            other => Err(InvalidPar(other)),
        }
    }
}

impl From<Par> for u8 {
    fn from(value: Par) -> Self {
        value.strokes()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("par must be 3, 4 or 5 (got {0})")]
pub struct InvalidPar(pub u8);

/// One hole on a course card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hole {
    pub number: u8,
    pub par: Par,
    #[serde(default)]
    pub yardages: Vec<TeeYardage>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeeYardage {
    pub tee: String,
    pub yards: u16,
}

/// Course card. Hole numbers are unique within a course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub name: String,
    pub holes: Vec<Hole>,
}

impl Course {
    pub fn hole(&self, number: u8) -> Option<&Hole> {
        self.holes.iter().find(|hole| hole.number == number)
    }
}

/// Tournament-wide scoring format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringFormat {
    StrokePlay,
    Handicap,
    Stableford,
    Callaway,
}

impl ScoringFormat {
    pub const fn label(self) -> &'static str {
        match self {
            ScoringFormat::StrokePlay => "stroke_play",
            ScoringFormat::Handicap => "handicap",
            ScoringFormat::Stableford => "stableford",
            ScoringFormat::Callaway => "callaway",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "stroke_play" | "stroke" => Some(Self::StrokePlay),
            "handicap" => Some(Self::Handicap),
            "stableford" => Some(Self::Stableford),
            "callaway" => Some(Self::Callaway),
            _ => None,
        }
    }
}

impl fmt::Display for ScoringFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Tournament record as read from the tournament directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub format: ScoringFormat,
    pub rounds: u8,
    pub course: Course,
}

impl Tournament {
    pub fn has_round(&self, round_number: u8) -> bool {
        (1..=self.rounds).contains(&round_number)
    }
}

/// A player entered in a tournament. A missing handicap counts as scratch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TournamentPlayer {
    pub player_id: PlayerId,
    pub name: String,
    #[serde(default)]
    pub handicap: Option<f64>,
    #[serde(default)]
    pub tee: Option<String>,
}

impl TournamentPlayer {
    pub fn effective_handicap(&self) -> f64 {
        self.handicap.filter(|value| value.is_finite()).unwrap_or(0.0)
    }
}

/// Addresses one player's play of one numbered round.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RoundKey {
    pub tournament_id: TournamentId,
    pub player_id: PlayerId,
    pub round_number: u8,
}

/// Persisted, normalized result of one hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleScore {
    pub hole_number: u8,
    pub par: Par,
    pub strokes: u8,
    pub putts: u8,
    pub fairway_hit: bool,
    pub green_in_regulation: bool,
}

impl HoleScore {
    /// Strokes relative to par; negative under par.
    pub fn to_par(&self) -> i32 {
        i32::from(self.strokes) - i32::from(self.par.strokes())
    }
}

/// Round record held by the score store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub key: RoundKey,
    pub scores: Vec<HoleScore>,
    pub is_complete: bool,
}
