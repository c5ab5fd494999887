use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::domain::{HoleScore, FRONT_NINE_LAST_HOLE, HOLES_PER_ROUND};

/// Derived totals for one round. Always recomputed from the full score set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoundSummary {
    pub front_nine_total: u32,
    pub back_nine_total: u32,
    pub total_strokes: u32,
    pub holes_completed: u8,
    pub total_par_for_completed_holes: u32,
    pub score_to_par: i32,
    pub is_complete: bool,
}

/// Fold a round's hole scores into front/back/total sums.
///
/// Only holes 1-18 with at least one stroke count. When a hole appears more
/// than once the last entry wins, matching upsert-by-hole semantics.
pub fn summarize_round(scores: &[HoleScore]) -> RoundSummary {
    let holes: BTreeMap<u8, &HoleScore> = scores
        .iter()
        .filter(|score| score.strokes >= 1 && (1..=18).contains(&score.hole_number))
        .map(|score| (score.hole_number, score))
        .collect();

    let mut summary = RoundSummary::default();
    for (number, score) in &holes {
        let strokes = u32::from(score.strokes);
        if *number <= FRONT_NINE_LAST_HOLE {
            summary.front_nine_total += strokes;
        } else {
            summary.back_nine_total += strokes;
        }
        summary.total_par_for_completed_holes += u32::from(score.par.strokes());
    }

    summary.total_strokes = summary.front_nine_total + summary.back_nine_total;
    summary.holes_completed = holes.len() as u8;
    summary.score_to_par = if summary.holes_completed > 0 {
        summary.total_strokes as i32 - summary.total_par_for_completed_holes as i32
    } else {
        0
    };
    summary.is_complete = holes.len() == HOLES_PER_ROUND;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::Par;

    fn hole(number: u8, par: Par, strokes: u8) -> HoleScore {
        HoleScore {
            hole_number: number,
            par,
            strokes,
            putts: 2,
            fairway_hit: false,
            green_in_regulation: false,
        }
    }

    #[test]
    fn empty_round_is_all_zero() {
        let summary = summarize_round(&[]);
        assert_eq!(summary, RoundSummary::default());
        assert!(!summary.is_complete);
    }

    #[test]
    fn partial_round_only_counts_par_of_played_holes() {
        let scores = vec![hole(1, Par::Four, 5), hole(2, Par::Three, 3), hole(10, Par::Five, 4)];
        let summary = summarize_round(&scores);
        assert_eq!(summary.front_nine_total, 8);
        assert_eq!(summary.back_nine_total, 4);
        assert_eq!(summary.total_strokes, 12);
        assert_eq!(summary.holes_completed, 3);
        assert_eq!(summary.total_par_for_completed_holes, 12);
        assert_eq!(summary.score_to_par, 0);
        assert!(!summary.is_complete);
    }

    #[test]
    fn full_round_is_complete() {
        let scores: Vec<HoleScore> = (1..=18).map(|n| hole(n, Par::Four, 5)).collect();
        let summary = summarize_round(&scores);
        assert!(summary.is_complete);
        assert_eq!(summary.total_strokes, 90);
        assert_eq!(summary.score_to_par, 18);
        assert_eq!(
            summary.front_nine_total + summary.back_nine_total,
            summary.total_strokes
        );
    }

    #[test]
    fn duplicate_and_zero_stroke_rows_do_not_drift() {
        let scores = vec![
            hole(1, Par::Four, 7),
            hole(1, Par::Four, 4),
            hole(2, Par::Four, 0),
        ];
        let summary = summarize_round(&scores);
        assert_eq!(summary.total_strokes, 4);
        assert_eq!(summary.holes_completed, 1);
        assert_eq!(summarize_round(&scores), summary);
    }
}
