//! Offline import of a hole-by-hole scorecard exported as CSV.
//!
//! Expected header: `Hole,Par,Strokes,Putts,Fairway,GIR`. Every row goes
//! through the same normalization as a live submission.

mod parser;

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use serde::Serialize;

use crate::scoring::domain::{HoleScore, InvalidPar, Par, ScoringFormat};
use crate::scoring::format::{calculate, FormatInput, FormatOutcome};
use crate::scoring::validator::{validate_entry, HoleEntry, ScoreEntryError};
use crate::scoring::{summarize_round, RoundSummary};

#[derive(Debug, thiserror::Error)]
pub enum ScorecardImportError {
    #[error("failed to read scorecard: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid scorecard CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("hole {hole}: {source}")]
    Par { hole: u8, source: InvalidPar },
    #[error("hole {hole}: {source}")]
    Entry { hole: u8, source: ScoreEntryError },
    #[error("hole number {0} is outside 1-18")]
    HoleOutOfRange(u8),
}

/// Normalized card with derived totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scorecard {
    pub scores: Vec<HoleScore>,
    pub summary: RoundSummary,
}

impl Scorecard {
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ScorecardImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    /// Later rows for the same hole replace earlier ones.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ScorecardImportError> {
        let mut holes: BTreeMap<u8, HoleScore> = BTreeMap::new();

        for row in parser::parse_rows(reader)? {
            if !(1..=18).contains(&row.hole) {
                return Err(ScorecardImportError::HoleOutOfRange(row.hole));
            }
            let par = Par::try_from(row.par).map_err(|source| ScorecardImportError::Par {
                hole: row.hole,
                source,
            })?;
            let entry = validate_entry(HoleEntry {
                par,
                strokes: row.strokes,
                putts: row.putts,
                fairway_hit: row.fairway_hit,
                green_in_regulation: row.green_in_regulation,
            })
            .map_err(|source| ScorecardImportError::Entry {
                hole: row.hole,
                source,
            })?;
            holes.insert(row.hole, entry.into_score(row.hole));
        }

        let scores: Vec<HoleScore> = holes.into_values().collect();
        let summary = summarize_round(&scores);
        Ok(Self { scores, summary })
    }

    /// Net result using the card's own pars, with the same rules as the leaderboard.
    pub fn net(&self, format: ScoringFormat, handicap: f64) -> Option<FormatOutcome> {
        calculate(FormatInput {
            gross_total: self.summary.total_strokes,
            handicap,
            format,
            scores: &self.scores,
        })
    }
}
