use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use serde_json::Value;

use crate::scoring::achievements::{AchievementCatalog, AchievementId, PlayerAchievement};
use crate::scoring::aggregate::RoundSummary;
use crate::scoring::domain::{
    Course, Hole, HoleScore, Par, PlayerId, RoundKey, RoundRecord, ScoringFormat, Tournament,
    TournamentId, TournamentPlayer,
};
use crate::scoring::repository::{
    AchievementStore, RepositoryError, ScoreRepository, TournamentDirectory, UnlockOutcome,
};
use crate::scoring::service::{ScoreSubmission, ScoringService};
use crate::scoring::scoring_router;

pub(super) const TOURNAMENT: &str = "club-champs";

pub(super) const PAR_72: [u8; 18] = [4, 4, 3, 5, 4, 4, 3, 5, 4, 4, 4, 3, 5, 4, 4, 3, 5, 4];

pub(super) fn tournament_id() -> TournamentId {
    TournamentId(TOURNAMENT.to_string())
}

pub(super) fn course() -> Course {
    Course {
        name: "Riverside Links".to_string(),
        holes: PAR_72
            .iter()
            .enumerate()
            .map(|(idx, par)| Hole {
                number: idx as u8 + 1,
                par: Par::try_from(*par).expect("valid par"),
                yardages: Vec::new(),
            })
            .collect(),
    }
}

pub(super) fn tournament(format: ScoringFormat, rounds: u8) -> Tournament {
    Tournament {
        id: tournament_id(),
        name: "Club Championship".to_string(),
        format,
        rounds,
        course: course(),
    }
}

pub(super) fn roster() -> Vec<TournamentPlayer> {
    vec![
        TournamentPlayer {
            player_id: PlayerId("amy".to_string()),
            name: "Amy".to_string(),
            handicap: Some(10.0),
            tee: Some("white".to_string()),
        },
        TournamentPlayer {
            player_id: PlayerId("bo".to_string()),
            name: "Bo".to_string(),
            handicap: None,
            tee: Some("blue".to_string()),
        },
    ]
}

pub(super) fn submission(player: &str, round: u8, hole: u8, strokes: u8, putts: u8) -> ScoreSubmission {
    ScoreSubmission {
        player_id: PlayerId(player.to_string()),
        round_number: round,
        hole_number: hole,
        strokes,
        putts,
        fairway_hit: true,
        green_in_regulation: false,
    }
}

#[derive(Default)]
pub(super) struct MemoryDirectory {
    tournaments: Mutex<HashMap<TournamentId, (Tournament, Vec<TournamentPlayer>)>>,
}

impl MemoryDirectory {
    pub(super) fn with(tournament: Tournament, roster: Vec<TournamentPlayer>) -> Self {
        let directory = Self::default();
        directory
            .tournaments
            .lock()
            .expect("directory mutex poisoned")
            .insert(tournament.id.clone(), (tournament, roster));
        directory
    }
}

impl TournamentDirectory for MemoryDirectory {
    fn tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, RepositoryError> {
        let guard = self.tournaments.lock().expect("directory mutex poisoned");
        Ok(guard.get(id).map(|(tournament, _)| tournament.clone()))
    }

    fn roster(&self, id: &TournamentId) -> Result<Vec<TournamentPlayer>, RepositoryError> {
        let guard = self.tournaments.lock().expect("directory mutex poisoned");
        guard
            .get(id)
            .map(|(_, roster)| roster.clone())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Default)]
pub(super) struct MemoryScores {
    rounds: Mutex<BTreeMap<RoundKey, (BTreeMap<u8, HoleScore>, bool)>>,
}

impl MemoryScores {
    fn records(&self, filter: impl Fn(&RoundKey) -> bool) -> Vec<RoundRecord> {
        let guard = self.rounds.lock().expect("score mutex poisoned");
        guard
            .iter()
            .filter(|(key, _)| filter(key))
            .map(|(key, (scores, complete))| RoundRecord {
                key: key.clone(),
                scores: scores.values().copied().collect(),
                is_complete: *complete,
            })
            .collect()
    }

    pub(super) fn is_complete(&self, key: &RoundKey) -> bool {
        let guard = self.rounds.lock().expect("score mutex poisoned");
        guard.get(key).map(|(_, complete)| *complete).unwrap_or(false)
    }
}

impl ScoreRepository for MemoryScores {
    fn upsert_score(&self, key: &RoundKey, score: HoleScore) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().expect("score mutex poisoned");
        guard
            .entry(key.clone())
            .or_default()
            .0
            .insert(score.hole_number, score);
        Ok(())
    }

    fn round_scores(&self, key: &RoundKey) -> Result<Vec<HoleScore>, RepositoryError> {
        let guard = self.rounds.lock().expect("score mutex poisoned");
        Ok(guard
            .get(key)
            .map(|(scores, _)| scores.values().copied().collect())
            .unwrap_or_default())
    }

    fn record_summary(&self, key: &RoundKey, summary: &RoundSummary) -> Result<(), RepositoryError> {
        let mut guard = self.rounds.lock().expect("score mutex poisoned");
        match guard.get_mut(key) {
            Some((_, complete)) => {
                *complete = summary.is_complete;
                Ok(())
            }
            None => Err(RepositoryError::NotFound),
        }
    }

    fn tournament_rounds(&self, id: &TournamentId) -> Result<Vec<RoundRecord>, RepositoryError> {
        Ok(self.records(|key| &key.tournament_id == id))
    }

    fn player_rounds(&self, player_id: &PlayerId) -> Result<Vec<RoundRecord>, RepositoryError> {
        Ok(self.records(|key| &key.player_id == player_id))
    }
}

#[derive(Default)]
pub(super) struct MemoryAchievements {
    records: Mutex<HashMap<(PlayerId, AchievementId), PlayerAchievement>>,
}

impl AchievementStore for MemoryAchievements {
    fn insert_if_absent(&self, record: PlayerAchievement) -> Result<UnlockOutcome, RepositoryError> {
        let mut guard = self.records.lock().expect("achievement mutex poisoned");
        let key = (record.player_id.clone(), record.achievement_id.clone());
        if guard.contains_key(&key) {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }
        guard.insert(key, record);
        Ok(UnlockOutcome::Created)
    }

    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<PlayerAchievement>, RepositoryError> {
        let guard = self.records.lock().expect("achievement mutex poisoned");
        Ok(guard
            .values()
            .filter(|record| &record.player_id == player_id)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableScores;

impl ScoreRepository for UnavailableScores {
    fn upsert_score(&self, _key: &RoundKey, _score: HoleScore) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn round_scores(&self, _key: &RoundKey) -> Result<Vec<HoleScore>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn record_summary(&self, _key: &RoundKey, _summary: &RoundSummary) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn tournament_rounds(&self, _id: &TournamentId) -> Result<Vec<RoundRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn player_rounds(&self, _player_id: &PlayerId) -> Result<Vec<RoundRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

pub(super) type MemoryService = ScoringService<MemoryDirectory, MemoryScores, MemoryAchievements>;

pub(super) fn build_service(
    format: ScoringFormat,
    rounds: u8,
) -> (MemoryService, Arc<MemoryScores>, Arc<MemoryAchievements>) {
    let directory = Arc::new(MemoryDirectory::with(tournament(format, rounds), roster()));
    let scores = Arc::new(MemoryScores::default());
    let achievements = Arc::new(MemoryAchievements::default());
    let service = ScoringService::new(
        directory,
        scores.clone(),
        achievements.clone(),
        AchievementCatalog::standard(),
    );
    (service, scores, achievements)
}

/// Play every hole of a round at `par + over_par[i]`.
pub(super) fn play_round(service: &MemoryService, player: &str, round: u8, over_par: [i8; 18]) {
    for (idx, par) in PAR_72.iter().enumerate() {
        let strokes = (*par as i8 + over_par[idx]) as u8;
        service
            .submit_score(&tournament_id(), submission(player, round, idx as u8 + 1, strokes, 2.min(strokes)))
            .expect("score accepted");
    }
}

pub(super) fn scoring_router_with_service(service: MemoryService) -> axum::Router {
    scoring_router(Arc::new(service))
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, status: StatusCode) {
    assert_eq!(response.status(), status);
}
