use serde::{Deserialize, Serialize};

use super::aggregate::summarize_round;
use super::callaway::callaway_score;
use super::domain::{HoleScore, ScoringFormat, HOLES_PER_ROUND};

/// Points awarded for playing exactly to handicap.
pub const STABLEFORD_BASELINE_POINTS: i32 = 36;

/// Inputs for a single round's net calculation. The handicap is always
/// explicit and par comes from the scores themselves.
#[derive(Debug, Clone, Copy)]
pub struct FormatInput<'a> {
    pub gross_total: u32,
    pub handicap: f64,
    pub format: ScoringFormat,
    pub scores: &'a [HoleScore],
}

/// Net result of a round: strokes for stroke-based formats, points for Stableford.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatOutcome {
    Net(i32),
    Points(i32),
}

impl FormatOutcome {
    pub const fn value(self) -> i32 {
        match self {
            FormatOutcome::Net(value) | FormatOutcome::Points(value) => value,
        }
    }

    /// Lower is better. Points are negated so more points rank first.
    pub const fn ranking_key(self) -> i32 {
        match self {
            FormatOutcome::Net(value) => value,
            FormatOutcome::Points(value) => -value,
        }
    }

    pub fn combine(self, other: FormatOutcome) -> FormatOutcome {
        match self {
            FormatOutcome::Net(value) => FormatOutcome::Net(value + other.value()),
            FormatOutcome::Points(value) => FormatOutcome::Points(value + other.value()),
        }
    }
}

/// Rounds halves toward positive infinity.
pub(crate) fn round_half_up(value: f64) -> i32 {
    (value + 0.5).floor() as i32
}

/// Net score under the tournament format. `None` until the round has a gross
/// total. Stableford points stay `None` until all 18 holes are in.
pub fn calculate(input: FormatInput<'_>) -> Option<FormatOutcome> {
    if input.gross_total == 0 {
        return None;
    }

    let gross = f64::from(input.gross_total);
    let outcome = match input.format {
        ScoringFormat::StrokePlay | ScoringFormat::Handicap => {
            FormatOutcome::Net(round_half_up(gross - input.handicap))
        }
        ScoringFormat::Stableford => {
            let summary = summarize_round(input.scores);
            if !summary.is_complete {
                return None;
            }
            let total_par = f64::from(summary.total_par_for_completed_holes);
            let diff = total_par - (gross - input.handicap);
            let points = round_half_up(f64::from(STABLEFORD_BASELINE_POINTS) + diff);
            FormatOutcome::Points(points.max(0))
        }
        ScoringFormat::Callaway => {
            let summary = summarize_round(input.scores);
            if usize::from(summary.holes_completed) != HOLES_PER_ROUND {
                FormatOutcome::Net(input.gross_total as i32)
            } else {
                FormatOutcome::Net(callaway_score(input.scores, input.handicap).final_score)
            }
        }
    };

    Some(outcome)
}
