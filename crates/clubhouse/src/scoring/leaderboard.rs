use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use super::aggregate::summarize_round;
use super::domain::{
    HoleScore, PlayerId, RoundRecord, ScoringFormat, Tournament, TournamentId, TournamentPlayer,
};
use super::format::{calculate, FormatInput, FormatOutcome};

/// Which rounds a leaderboard covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundFilter {
    Round(u8),
    AllRounds,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub player_id: PlayerId,
    pub name: String,
    pub gross_total: u32,
    pub net_score: Option<i32>,
    pub holes_completed: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leaderboard {
    pub tournament_id: TournamentId,
    pub format: ScoringFormat,
    pub filter: RoundFilter,
    pub entries: Vec<LeaderboardEntry>,
}

/// Hole scores per player and round, last record wins.
struct Cards<'r>(HashMap<&'r PlayerId, HashMap<u8, &'r [HoleScore]>>);

impl<'r> Cards<'r> {
    fn collect(tournament_id: &TournamentId, rounds: &'r [RoundRecord]) -> Self {
        let mut cards: HashMap<&'r PlayerId, HashMap<u8, &'r [HoleScore]>> = HashMap::new();
        for record in rounds
            .iter()
            .filter(|record| &record.key.tournament_id == tournament_id)
        {
            cards
                .entry(&record.key.player_id)
                .or_default()
                .insert(record.key.round_number, record.scores.as_slice());
        }
        Self(cards)
    }

    fn card(&self, player_id: &PlayerId, round_number: u8) -> &'r [HoleScore] {
        self.0
            .get(player_id)
            .and_then(|rounds| rounds.get(&round_number))
            .copied()
            .unwrap_or(&[])
    }
}

struct Standing<'a> {
    player: &'a TournamentPlayer,
    gross_total: u32,
    holes_completed: u32,
    outcome: Option<FormatOutcome>,
}

/// Rank every rostered player once.
///
/// Players without a net score sort last; equal scores keep roster order and
/// share a rank.
pub fn rank_players(
    tournament: &Tournament,
    roster: &[TournamentPlayer],
    rounds: &[RoundRecord],
    filter: RoundFilter,
) -> Leaderboard {
    let cards = Cards::collect(&tournament.id, rounds);

    let mut seen = HashSet::new();
    let mut standings: Vec<Standing<'_>> = roster
        .iter()
        .filter(|player| seen.insert(&player.player_id))
        .map(|player| match filter {
            RoundFilter::AllRounds if tournament.rounds > 1 => {
                all_rounds_standing(player, tournament, &cards)
            }
            RoundFilter::AllRounds => {
                round_standing(player, tournament.format, cards.card(&player.player_id, 1))
            }
            RoundFilter::Round(number) => round_standing(
                player,
                tournament.format,
                cards.card(&player.player_id, number),
            ),
        })
        .collect();

    standings.sort_by_key(|standing| match standing.outcome {
        Some(outcome) => (false, outcome.ranking_key()),
        None => (true, 0),
    });

    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(standings.len());
    let mut previous: Option<(Option<i32>, u32)> = None;
    for (position, standing) in standings.into_iter().enumerate() {
        let key = standing.outcome.map(FormatOutcome::ranking_key);
        let rank = match previous {
            Some((prev_key, prev_rank)) if prev_key == key => prev_rank,
            _ => position as u32 + 1,
        };
        previous = Some((key, rank));
        entries.push(LeaderboardEntry {
            rank,
            player_id: standing.player.player_id.clone(),
            name: standing.player.name.clone(),
            gross_total: standing.gross_total,
            net_score: standing.outcome.map(FormatOutcome::value),
            holes_completed: standing.holes_completed,
        });
    }

    Leaderboard {
        tournament_id: tournament.id.clone(),
        format: tournament.format,
        filter,
        entries,
    }
}

fn round_standing<'a>(
    player: &'a TournamentPlayer,
    format: ScoringFormat,
    scores: &[HoleScore],
) -> Standing<'a> {
    let summary = summarize_round(scores);
    let outcome = calculate(FormatInput {
        gross_total: summary.total_strokes,
        handicap: player.effective_handicap(),
        format,
        scores,
    });
    Standing {
        player,
        gross_total: summary.total_strokes,
        holes_completed: u32::from(summary.holes_completed),
        outcome,
    }
}

/// Sum per-round nets. Any incomplete round leaves the total undefined.
fn all_rounds_standing<'a>(
    player: &'a TournamentPlayer,
    tournament: &Tournament,
    cards: &Cards<'_>,
) -> Standing<'a> {
    let mut gross_total = 0;
    let mut holes_completed = 0;
    let mut outcome: Option<Option<FormatOutcome>> = None;

    for round in 1..=tournament.rounds {
        let scores = cards.card(&player.player_id, round);
        let summary = summarize_round(scores);
        let standing = round_standing(player, tournament.format, scores);
        gross_total += standing.gross_total;
        holes_completed += standing.holes_completed;

        let round_outcome = standing.outcome.filter(|_| summary.is_complete);
        outcome = Some(match (outcome, round_outcome) {
            (None, current) => current,
            (Some(Some(total)), Some(current)) => Some(total.combine(current)),
            _ => None,
        });
    }

    Standing {
        player,
        gross_total,
        holes_completed,
        outcome: outcome.flatten(),
    }
}
