//! Golf-consistency normalization for a single hole entry.
//!
//! Entries are corrected rather than rejected: hole-by-hole entry happens live
//! on the course and a slightly inconsistent card must never block play. The
//! only hard failure is a stroke count below one.

use serde::{Deserialize, Serialize};

use super::domain::{HoleScore, Par};

/// Raw per-hole entry as submitted by a player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HoleEntry {
    pub par: Par,
    pub strokes: u8,
    pub putts: u8,
    #[serde(default)]
    pub fairway_hit: bool,
    #[serde(default)]
    pub green_in_regulation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScoreEntryError {
    #[error("a hole cannot be scored with {0} strokes")]
    NonPositiveStrokes(u8),
}

impl HoleEntry {
    /// Apply the consistency rules in order. Total and idempotent.
    pub fn normalize(self) -> HoleEntry {
        let par = i32::from(self.par.strokes());
        let strokes = i32::from(self.strokes);
        let mut putts = self.putts;

        let shots_to_green = strokes - i32::from(putts);
        let mut green_in_regulation = shots_to_green <= par - 2;

        if putts > self.strokes {
            putts = self.strokes.saturating_sub(1);
        }

        if !green_in_regulation && strokes == par && putts >= 2 {
            putts = 1;
        }

        // Holed from off the green.
        if green_in_regulation && putts == 0 && strokes < par {
            green_in_regulation = false;
        }

        let fairway_hit = self.fairway_hit && self.par != Par::Three;

        HoleEntry {
            par: self.par,
            strokes: self.strokes,
            putts,
            fairway_hit,
            green_in_regulation,
        }
    }

    pub fn into_score(self, hole_number: u8) -> HoleScore {
        HoleScore {
            hole_number,
            par: self.par,
            strokes: self.strokes,
            putts: self.putts,
            fairway_hit: self.fairway_hit,
            green_in_regulation: self.green_in_regulation,
        }
    }
}

/// Reject unscorable entries, then normalize.
pub fn validate_entry(entry: HoleEntry) -> Result<HoleEntry, ScoreEntryError> {
    if entry.strokes < 1 {
        return Err(ScoreEntryError::NonPositiveStrokes(entry.strokes));
    }
    Ok(entry.normalize())
}
