//! Callaway handicap system.
//!
//! Each hole is capped at double par, the capped total selects a number of
//! "worst holes" from a fixed table, and the over-par deficits of those holes
//! are deducted. Half a worst hole deducts half of the next deficit, rounded
//! down.

use std::cmp::Reverse;

use serde::{Deserialize, Serialize};

use super::domain::HoleScore;
use super::format::round_half_up;

/// Upper bound of each adjusted-gross band and the worst holes it deducts,
/// expressed in half holes. Anything above the last bound deducts six.
const DEDUCTION_TABLE: [(u32, u8); 12] = [
    (72, 0),
    (75, 1),
    (80, 2),
    (85, 3),
    (90, 4),
    (95, 5),
    (100, 6),
    (105, 7),
    (110, 8),
    (115, 9),
    (120, 10),
    (125, 11),
];
const MAX_DEDUCTION_HALF_HOLES: u8 = 12;

/// Number of worst holes to deduct, in half-hole steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DeductionAllowance {
    half_holes: u8,
}

impl DeductionAllowance {
    pub fn for_adjusted_gross(adjusted_gross: u32) -> Self {
        let half_holes = DEDUCTION_TABLE
            .iter()
            .find(|(upper, _)| adjusted_gross <= *upper)
            .map(|(_, half_holes)| *half_holes)
            .unwrap_or(MAX_DEDUCTION_HALF_HOLES);
        Self { half_holes }
    }

    pub const fn whole_holes(self) -> usize {
        (self.half_holes / 2) as usize
    }

    pub const fn has_half_hole(self) -> bool {
        self.half_holes % 2 == 1
    }

    pub const fn is_zero(self) -> bool {
        self.half_holes == 0
    }

    pub fn as_f64(self) -> f64 {
        f64::from(self.half_holes) / 2.0
    }
}

/// Breakdown of a Callaway calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallawayResult {
    pub adjusted_gross: u32,
    pub allowance: DeductionAllowance,
    pub deducted_holes: Vec<u8>,
    pub total_deduction: u32,
    pub final_score: i32,
}

struct Deficit {
    hole_number: u8,
    capped: u32,
    over_par: u32,
}

fn capped_strokes(score: &HoleScore) -> u32 {
    let double_par = 2 * u32::from(score.par.strokes());
    u32::from(score.strokes).min(double_par)
}

/// Sum of strokes after capping every hole at double par.
pub fn adjusted_gross(scores: &[HoleScore]) -> u32 {
    scores.iter().map(capped_strokes).sum()
}

/// Score a full round under Callaway. The handicap is added, not subtracted.
pub fn callaway_score(scores: &[HoleScore], handicap: f64) -> CallawayResult {
    let adjusted_gross = adjusted_gross(scores);
    let allowance = DeductionAllowance::for_adjusted_gross(adjusted_gross);

    if allowance.is_zero() {
        return CallawayResult {
            adjusted_gross,
            allowance,
            deducted_holes: Vec::new(),
            total_deduction: 0,
            final_score: round_half_up(f64::from(adjusted_gross) + handicap),
        };
    }

    let mut deficits: Vec<Deficit> = scores
        .iter()
        .filter_map(|score| {
            let capped = capped_strokes(score);
            let par = u32::from(score.par.strokes());
            (capped > par).then(|| Deficit {
                hole_number: score.hole_number,
                capped,
                over_par: capped - par,
            })
        })
        .collect();
    deficits.sort_by_key(|deficit| (Reverse(deficit.over_par), Reverse(deficit.capped)));

    let whole = allowance.whole_holes().min(deficits.len());
    let mut deducted_holes: Vec<u8> = deficits[..whole]
        .iter()
        .map(|deficit| deficit.hole_number)
        .collect();
    let mut total_deduction: u32 = deficits[..whole]
        .iter()
        .map(|deficit| deficit.over_par)
        .sum();

    if allowance.has_half_hole() {
        if let Some(next) = deficits.get(whole) {
            total_deduction += next.over_par / 2;
            deducted_holes.push(next.hole_number);
        }
    }

    let final_score =
        round_half_up(f64::from(adjusted_gross) - f64::from(total_deduction) + handicap);

    CallawayResult {
        adjusted_gross,
        allowance,
        deducted_holes,
        total_deduction,
        final_score,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::domain::Par;

    fn card(pars: &[Par; 18], strokes: &[u8; 18]) -> Vec<HoleScore> {
        pars.iter()
            .zip(strokes.iter())
            .enumerate()
            .map(|(idx, (par, strokes))| HoleScore {
                hole_number: idx as u8 + 1,
                par: *par,
                strokes: *strokes,
                putts: 2,
                fairway_hit: false,
                green_in_regulation: false,
            })
            .collect()
    }

    fn par_72() -> [Par; 18] {
        use Par::{Five as F, Four as V, Three as T};
        [V, V, T, F, V, V, T, F, V, V, V, T, F, V, V, T, F, V]
    }

    #[test]
    fn table_bands_follow_five_stroke_steps() {
        let cases = [
            (60, 0.0),
            (72, 0.0),
            (73, 0.5),
            (75, 0.5),
            (76, 1.0),
            (85, 1.5),
            (90, 2.0),
            (95, 2.5),
            (96, 3.0),
            (100, 3.0),
            (125, 5.5),
            (126, 6.0),
            (180, 6.0),
        ];
        for (gross, expected) in cases {
            assert_eq!(
                DeductionAllowance::for_adjusted_gross(gross).as_f64(),
                expected,
                "adjusted gross {gross}"
            );
        }
    }

    #[test]
    fn holes_are_capped_at_double_par() {
        let mut strokes = [4u8; 18];
        strokes[2] = 9; // par 3 caps at 6
        let scores = card(&par_72(), &strokes);
        assert_eq!(adjusted_gross(&scores), 17 * 4 + 6);
    }

    #[test]
    fn zero_deduction_adds_handicap() {
        let pars = par_72();
        let strokes = pars.map(|par| par.strokes());
        let result = callaway_score(&card(&pars, &strokes), 2.0);
        assert_eq!(result.adjusted_gross, 72);
        assert_eq!(result.total_deduction, 0);
        assert_eq!(result.final_score, 74);
        assert!(result.deducted_holes.is_empty());
    }

    #[test]
    fn two_and_a_half_worst_holes_are_deducted() {
        let pars = par_72();
        let mut strokes = pars.map(|par| par.strokes() + 1); // 90
        strokes[3] = 9; // par 5, +4
        strokes[0] = 6; // par 4, +2
        strokes[1] = 6; // par 4, +2, same capped strokes as hole 1
        // adjusted: 90 + 3 + 1 + 1 = 95 -> 2.5 worst holes
        let result = callaway_score(&card(&pars, &strokes), 0.0);
        assert_eq!(result.adjusted_gross, 95);
        assert_eq!(result.allowance.as_f64(), 2.5);
        assert_eq!(result.deducted_holes, vec![4, 1, 2]);
        assert_eq!(result.total_deduction, 4 + 2 + 1);
        assert_eq!(result.final_score, 88);
    }

    #[test]
    fn ties_on_deficit_prefer_higher_capped_strokes() {
        let pars = par_72();
        let mut strokes = pars.map(|par| par.strokes() + 1);
        strokes[2] = 5; // par 3, +2, capped 5
        strokes[3] = 7; // par 5, +2, capped 7
        // adjusted 90 + 1 + 1 = 92 -> 2.5
        let result = callaway_score(&card(&pars, &strokes), 1.0);
        assert_eq!(result.adjusted_gross, 92);
        assert_eq!(result.deducted_holes[..2], [4, 3]);
        assert_eq!(result.total_deduction, 2 + 2);
        assert_eq!(result.final_score, 92 - 4 + 1);
    }

    #[test]
    fn fewer_over_par_holes_than_allowance_deducts_what_exists() {
        let pars = par_72();
        let mut strokes = pars.map(|par| par.strokes());
        strokes[0] = 8; // +4
        // adjusted 76 -> 1 worst hole
        let result = callaway_score(&card(&pars, &strokes), 0.0);
        assert_eq!(result.total_deduction, 4);
        assert_eq!(result.final_score, 72);

        let mut strokes = pars.map(|par| par.strokes());
        strokes[0] = 5; // 73 -> half a hole of a single +1 deficit
        let result = callaway_score(&card(&pars, &strokes), 0.0);
        assert_eq!(result.total_deduction, 0);
        assert_eq!(result.final_score, 73);
    }

    #[test]
    fn raising_one_hole_moves_the_score_by_at_most_the_increase() {
        let pars = par_72();
        let base: [u8; 18] = [5, 6, 4, 7, 5, 4, 3, 6, 5, 6, 5, 4, 6, 5, 7, 3, 5, 6];
        let before = callaway_score(&card(&pars, &base), 1.5);
        for hole in 0..18 {
            for extra in 1..=6u8 {
                let mut raised = base;
                raised[hole] += extra;
                let after = callaway_score(&card(&pars, &raised), 1.5);
                let extra = i32::from(extra);
                assert!(after.adjusted_gross >= before.adjusted_gross);
                assert!(
                    after.final_score - before.final_score <= extra,
                    "hole {hole} +{extra} rose too far"
                );
                assert!(
                    before.final_score - after.final_score <= extra,
                    "hole {hole} +{extra} dropped too far"
                );
            }
        }
    }
}
