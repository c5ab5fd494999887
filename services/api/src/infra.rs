use clubhouse::scoring::achievements::{AchievementId, PlayerAchievement};
use clubhouse::scoring::{
    AchievementStore, HoleScore, PlayerId, RepositoryError, RoundKey, RoundRecord, RoundSummary,
    ScoreRepository, ScoringFormat, Tournament, TournamentDirectory, TournamentId,
    TournamentPlayer, UnlockOutcome,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

fn lock<'a, T>(mutex: &'a Mutex<T>, name: &str) -> Result<MutexGuard<'a, T>, RepositoryError> {
    mutex
        .lock()
        .map_err(|_| RepositoryError::Unavailable(format!("{name} mutex poisoned")))
}

/// Tournaments and rosters kept in process. Seeded at startup.
#[derive(Default, Clone)]
pub(crate) struct InMemoryTournamentDirectory {
    tournaments: Arc<Mutex<HashMap<TournamentId, (Tournament, Vec<TournamentPlayer>)>>>,
}

impl InMemoryTournamentDirectory {
    pub(crate) fn register(
        &self,
        tournament: Tournament,
        roster: Vec<TournamentPlayer>,
    ) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.tournaments, "directory")?;
        if guard.contains_key(&tournament.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(tournament.id.clone(), (tournament, roster));
        Ok(())
    }
}

impl TournamentDirectory for InMemoryTournamentDirectory {
    fn tournament(&self, id: &TournamentId) -> Result<Option<Tournament>, RepositoryError> {
        let guard = lock(&self.tournaments, "directory")?;
        Ok(guard.get(id).map(|(tournament, _)| tournament.clone()))
    }

    fn roster(&self, id: &TournamentId) -> Result<Vec<TournamentPlayer>, RepositoryError> {
        let guard = lock(&self.tournaments, "directory")?;
        guard
            .get(id)
            .map(|(_, roster)| roster.clone())
            .ok_or(RepositoryError::NotFound)
    }
}

#[derive(Debug, Default, Clone)]
struct StoredRound {
    scores: BTreeMap<u8, HoleScore>,
    summary: RoundSummary,
}

/// Rounds keyed by (tournament, player, round); holes upserted by number.
#[derive(Default, Clone)]
pub(crate) struct InMemoryScoreRepository {
    rounds: Arc<Mutex<BTreeMap<RoundKey, StoredRound>>>,
}

impl InMemoryScoreRepository {
    fn records(
        &self,
        filter: impl Fn(&RoundKey) -> bool,
    ) -> Result<Vec<RoundRecord>, RepositoryError> {
        let guard = lock(&self.rounds, "score")?;
        Ok(guard
            .iter()
            .filter(|(key, _)| filter(key))
            .map(|(key, round)| RoundRecord {
                key: key.clone(),
                scores: round.scores.values().copied().collect(),
                is_complete: round.summary.is_complete,
            })
            .collect())
    }

    pub(crate) fn summary(&self, key: &RoundKey) -> Result<Option<RoundSummary>, RepositoryError> {
        let guard = lock(&self.rounds, "score")?;
        Ok(guard.get(key).map(|round| round.summary))
    }
}

impl ScoreRepository for InMemoryScoreRepository {
    fn upsert_score(&self, key: &RoundKey, score: HoleScore) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.rounds, "score")?;
        guard
            .entry(key.clone())
            .or_default()
            .scores
            .insert(score.hole_number, score);
        Ok(())
    }

    fn round_scores(&self, key: &RoundKey) -> Result<Vec<HoleScore>, RepositoryError> {
        let guard = lock(&self.rounds, "score")?;
        Ok(guard
            .get(key)
            .map(|round| round.scores.values().copied().collect())
            .unwrap_or_default())
    }

    fn record_summary(&self, key: &RoundKey, summary: &RoundSummary) -> Result<(), RepositoryError> {
        let mut guard = lock(&self.rounds, "score")?;
        let round = guard.get_mut(key).ok_or(RepositoryError::NotFound)?;
        round.summary = *summary;
        Ok(())
    }

    fn tournament_rounds(&self, id: &TournamentId) -> Result<Vec<RoundRecord>, RepositoryError> {
        self.records(|key| &key.tournament_id == id)
    }

    fn player_rounds(&self, player_id: &PlayerId) -> Result<Vec<RoundRecord>, RepositoryError> {
        self.records(|key| &key.player_id == player_id)
    }
}

/// Unlock records with a uniqueness constraint on (player, achievement).
#[derive(Default, Clone)]
pub(crate) struct InMemoryAchievementStore {
    records: Arc<Mutex<HashMap<(PlayerId, AchievementId), PlayerAchievement>>>,
}

impl AchievementStore for InMemoryAchievementStore {
    fn insert_if_absent(&self, record: PlayerAchievement) -> Result<UnlockOutcome, RepositoryError> {
        let mut guard = lock(&self.records, "achievement")?;
        let key = (record.player_id.clone(), record.achievement_id.clone());
        if guard.contains_key(&key) {
            return Ok(UnlockOutcome::AlreadyUnlocked);
        }
        guard.insert(key, record);
        Ok(UnlockOutcome::Created)
    }

    fn for_player(&self, player_id: &PlayerId) -> Result<Vec<PlayerAchievement>, RepositoryError> {
        let guard = lock(&self.records, "achievement")?;
        let mut records: Vec<PlayerAchievement> = guard
            .values()
            .filter(|record| &record.player_id == player_id)
            .cloned()
            .collect();
        records.sort_by(|a, b| {
            a.unlocked_at
                .cmp(&b.unlocked_at)
                .then_with(|| a.achievement_id.cmp(&b.achievement_id))
        });
        Ok(records)
    }
}

pub(crate) fn parse_format(raw: &str) -> Result<ScoringFormat, String> {
    ScoringFormat::parse(raw).ok_or_else(|| {
        format!("unknown scoring format '{raw}' (expected stroke_play, handicap, stableford or callaway)")
    })
}
