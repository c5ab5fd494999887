use crate::infra::{
    parse_format, InMemoryAchievementStore, InMemoryScoreRepository, InMemoryTournamentDirectory,
};
use chrono::{SecondsFormat, Utc};
use clap::Args;
use clubhouse::error::AppError;
use clubhouse::scorecard::Scorecard;
use clubhouse::scoring::achievements::AchievementCatalog;
use clubhouse::scoring::{
    callaway_score, Course, Hole, Leaderboard, Par, PlayerId, RoundFilter, RoundKey,
    ScoreSubmission, ScoringFormat, ScoringService, TeeYardage, Tournament, TournamentId,
    TournamentPlayer,
};
use std::path::PathBuf;
use std::sync::Arc;

pub(crate) const DEMO_TOURNAMENT: &str = "riverside-classic";

const DEMO_PARS: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4];
const DEMO_YARDS: [u16; 18] = [
    385, 402, 168, 521, 377, 410, 155, 540, 395, 362, 418, 182, 505, 390, 371, 149, 533, 426,
];

/// Strokes relative to par, hole by hole, for each demo player and round.
const DEMO_CARDS: [(&str, [[i8; 18]; 2]); 3] = [
    (
        "maya",
        [
            [0, -1, 0, 0, 1, 0, 0, -1, 0, 0, 0, 0, -1, 0, 1, 0, 0, 0],
            [0, 0, 0, -1, 0, 0, 0, 0, 0, 0, -1, 0, 0, 0, 0, 0, -1, 0],
        ],
    ),
    (
        "jonah",
        [
            [1, 1, 0, 2, 1, 0, 1, 1, 2, 1, 0, 1, 1, 2, 1, 0, 1, 1],
            [1, 0, 1, 1, 2, 1, 0, 1, 1, 1, 1, 0, 3, 1, 1, 1, 0, 1],
        ],
    ),
    (
        "priya",
        [
            [0, 1, -2, 0, 1, 1, 0, 0, 1, 0, 1, 0, 1, 0, 0, 1, 0, 1],
            [0, 1, 0, 1, 0, 0, 1, 0, 1, 0, 1, 1, 0, 0, 1, 0, 1, 0],
        ],
    ),
];

type DemoService =
    ScoringService<InMemoryTournamentDirectory, InMemoryScoreRepository, InMemoryAchievementStore>;

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Scoring format for the seeded tournament
    #[arg(long, value_parser = parse_format, default_value = "handicap")]
    pub(crate) format: ScoringFormat,
    /// Play only the first round
    #[arg(long)]
    pub(crate) single_round: bool,
}

#[derive(Args, Debug)]
pub(crate) struct CardArgs {
    /// Scorecard CSV with columns Hole,Par,Strokes,Putts,Fairway,GIR
    #[arg(long)]
    pub(crate) csv: PathBuf,
    /// Scoring format used to compute the net result
    #[arg(long, value_parser = parse_format)]
    pub(crate) format: ScoringFormat,
    /// Playing handicap (defaults to scratch)
    #[arg(long)]
    pub(crate) handicap: Option<f64>,
}

pub(crate) fn demo_course() -> Course {
    Course {
        name: "Riverside Links".to_string(),
        holes: DEMO_PARS
            .iter()
            .zip(DEMO_YARDS)
            .enumerate()
            .filter_map(|(idx, (par, yards))| {
                let par = Par::try_from(*par).ok()?;
                Some(Hole {
                    number: idx as u8 + 1,
                    par,
                    yardages: vec![
                        TeeYardage {
                            tee: "blue".to_string(),
                            yards,
                        },
                        TeeYardage {
                            tee: "white".to_string(),
                            yards: yards.saturating_sub(25),
                        },
                    ],
                })
            })
            .collect(),
    }
}

pub(crate) fn demo_roster() -> Vec<TournamentPlayer> {
    vec![
        TournamentPlayer {
            player_id: PlayerId("maya".to_string()),
            name: "Maya Chen".to_string(),
            handicap: Some(2.4),
            tee: Some("blue".to_string()),
        },
        TournamentPlayer {
            player_id: PlayerId("jonah".to_string()),
            name: "Jonah Reyes".to_string(),
            handicap: Some(18.0),
            tee: Some("white".to_string()),
        },
        TournamentPlayer {
            player_id: PlayerId("priya".to_string()),
            name: "Priya Nair".to_string(),
            handicap: None,
            tee: Some("white".to_string()),
        },
    ]
}

/// Registers the demo tournament so a fresh server has something to score.
pub(crate) fn seed_directory(
    directory: &InMemoryTournamentDirectory,
    format: ScoringFormat,
    rounds: u8,
) -> Result<TournamentId, AppError> {
    let id = TournamentId(DEMO_TOURNAMENT.to_string());
    let tournament = Tournament {
        id: id.clone(),
        name: "Riverside Classic".to_string(),
        format,
        rounds,
        course: demo_course(),
    };
    directory.register(tournament, demo_roster())?;
    Ok(id)
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        format,
        single_round,
    } = args;
    let rounds: u8 = if single_round { 1 } else { 2 };

    let directory = Arc::new(InMemoryTournamentDirectory::default());
    let scores = Arc::new(InMemoryScoreRepository::default());
    let achievements = Arc::new(InMemoryAchievementStore::default());
    let tournament_id = seed_directory(&directory, format, rounds)?;
    let service = ScoringService::new(
        directory,
        scores.clone(),
        achievements,
        AchievementCatalog::standard(),
    );

    println!("Scoring engine demo");
    println!(
        "Run at {} | format {} | {} round(s)",
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        format,
        rounds
    );

    for round_number in 1..=rounds {
        println!("\nRound {round_number}");
        for (player, cards) in DEMO_CARDS.iter() {
            let card = cards[usize::from(round_number - 1)];
            let unlocked = play_demo_round(&service, &tournament_id, player, round_number, card)?;
            let key = RoundKey {
                tournament_id: tournament_id.clone(),
                player_id: PlayerId(player.to_string()),
                round_number,
            };
            if let Some(summary) = scores.summary(&key)? {
                println!(
                    "- {}: {} strokes ({:+}), front {} / back {}",
                    player,
                    summary.total_strokes,
                    summary.score_to_par,
                    summary.front_nine_total,
                    summary.back_nine_total
                );
            }
            for line in unlocked {
                println!("    unlocked {line}");
            }
        }

        let board = service.leaderboard(&tournament_id, RoundFilter::Round(round_number))?;
        render_leaderboard(&format!("Leaderboard after round {round_number}"), &board);
    }

    if rounds > 1 {
        let board = service.leaderboard(&tournament_id, RoundFilter::AllRounds)?;
        render_leaderboard("Tournament leaderboard", &board);
    }

    println!("\nAchievement points");
    for player in demo_roster() {
        let ledger = service.player_achievements(&player.player_id)?;
        println!(
            "- {}: {} points from {} achievements",
            player.name,
            ledger.total_points,
            ledger.achievements.len()
        );
    }

    Ok(())
}

fn play_demo_round(
    service: &DemoService,
    tournament_id: &TournamentId,
    player: &str,
    round_number: u8,
    over_par: [i8; 18],
) -> Result<Vec<String>, AppError> {
    let mut unlocked = Vec::new();
    for (idx, (par, offset)) in DEMO_PARS.iter().zip(over_par).enumerate() {
        let strokes = (i16::from(*par) + i16::from(offset)).max(1) as u8;
        let putts = if offset < 0 { 1 } else { 2 };
        let receipt = service.submit_score(
            tournament_id,
            ScoreSubmission {
                player_id: PlayerId(player.to_string()),
                round_number,
                hole_number: idx as u8 + 1,
                strokes,
                putts,
                fairway_hit: offset <= 0,
                green_in_regulation: false,
            },
        )?;
        unlocked.extend(receipt.unlocked.iter().map(|achievement| {
            format!(
                "{} (+{}) on hole {}",
                achievement.name, achievement.points, receipt.score.hole_number
            )
        }));
    }
    Ok(unlocked)
}

fn render_leaderboard(title: &str, board: &Leaderboard) {
    let unit = match board.format {
        ScoringFormat::Stableford => "pts",
        _ => "net",
    };
    println!("\n{title}");
    for entry in &board.entries {
        let net = entry
            .net_score
            .map(|value| format!("{value} {unit}"))
            .unwrap_or_else(|| "--".to_string());
        println!(
            "{:>3}. {:<12} gross {:>3} | {} | {} holes",
            entry.rank, entry.name, entry.gross_total, net, entry.holes_completed
        );
    }
}

pub(crate) fn run_card(args: CardArgs) -> Result<(), AppError> {
    let CardArgs {
        csv,
        format,
        handicap,
    } = args;
    let handicap = handicap.unwrap_or(0.0);
    let card = Scorecard::from_path(&csv)?;
    let summary = card.summary;

    println!("Scorecard {}", csv.display());
    println!(
        "Holes {} | front {} | back {} | total {} ({:+} to par)",
        summary.holes_completed,
        summary.front_nine_total,
        summary.back_nine_total,
        summary.total_strokes,
        summary.score_to_par
    );
    if !summary.is_complete {
        println!("Round incomplete: {} of 18 holes", summary.holes_completed);
    }

    match card.net(format, handicap) {
        Some(outcome) if format == ScoringFormat::Stableford => {
            println!("{format} points: {}", outcome.value())
        }
        Some(outcome) => println!("{format} net score: {}", outcome.value()),
        None if summary.holes_completed == 0 => {
            println!("{format} net score: not available (no strokes recorded)")
        }
        None => println!("{format} points: not available until all 18 holes are in"),
    }

    if format == ScoringFormat::Callaway && summary.is_complete {
        let breakdown = callaway_score(&card.scores, handicap);
        println!(
            "Callaway: adjusted gross {} | {} worst holes {:?} | deduction {}",
            breakdown.adjusted_gross,
            breakdown.allowance.as_f64(),
            breakdown.deducted_holes,
            breakdown.total_deduction
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clubhouse::scoring::TournamentDirectory;

    #[test]
    fn demo_course_is_a_par_72_with_two_tees() {
        let course = demo_course();
        assert_eq!(course.holes.len(), 18);
        let total_par: u32 = course
            .holes
            .iter()
            .map(|hole| u32::from(hole.par.strokes()))
            .sum();
        assert_eq!(total_par, 72);
        assert!(course.holes.iter().all(|hole| hole.yardages.len() == 2));
    }

    #[test]
    fn seeding_twice_is_a_conflict() {
        let directory = InMemoryTournamentDirectory::default();
        let id = seed_directory(&directory, ScoringFormat::Stableford, 2).expect("seeded");
        assert_eq!(directory.roster(&id).expect("roster").len(), 3);
        assert!(seed_directory(&directory, ScoringFormat::Stableford, 2).is_err());
    }

    #[test]
    fn demo_runs_for_every_format() {
        for format in [
            ScoringFormat::StrokePlay,
            ScoringFormat::Handicap,
            ScoringFormat::Stableford,
            ScoringFormat::Callaway,
        ] {
            run_demo(DemoArgs {
                format,
                single_round: false,
            })
            .expect("demo completes");
        }
    }
}
