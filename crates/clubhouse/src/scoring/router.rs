use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::domain::{PlayerId, RoundKey, TournamentId};
use super::leaderboard::RoundFilter;
use super::repository::{AchievementStore, ScoreRepository, TournamentDirectory};
use super::service::{ScoreSubmission, ScoringService, ScoringServiceError};
use crate::error::scoring_status;

type SharedService<D, S, A> = Arc<ScoringService<D, S, A>>;

/// Router builder exposing score entry, rounds, leaderboards and achievements.
pub fn scoring_router<D, S, A>(service: SharedService<D, S, A>) -> Router
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/tournaments/:tournament_id/scores",
            post(submit_score_handler::<D, S, A>),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/players/:player_id/rounds/:round_number",
            get(round_handler::<D, S, A>),
        )
        .route(
            "/api/v1/tournaments/:tournament_id/leaderboard",
            get(leaderboard_handler::<D, S, A>),
        )
        .route(
            "/api/v1/players/:player_id/achievements",
            get(achievements_handler::<D, S, A>),
        )
        .with_state(service)
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LeaderboardQuery {
    #[serde(default)]
    pub(crate) round: Option<u8>,
}

pub(crate) async fn submit_score_handler<D, S, A>(
    State(service): State<SharedService<D, S, A>>,
    Path(tournament_id): Path<String>,
    axum::Json(submission): axum::Json<ScoreSubmission>,
) -> Response
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    match service.submit_score(&TournamentId(tournament_id), submission) {
        Ok(receipt) => (StatusCode::OK, axum::Json(receipt)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn round_handler<D, S, A>(
    State(service): State<SharedService<D, S, A>>,
    Path((tournament_id, player_id, round_number)): Path<(String, String, u8)>,
) -> Response
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    let key = RoundKey {
        tournament_id: TournamentId(tournament_id),
        player_id: PlayerId(player_id),
        round_number,
    };
    match service.round(&key) {
        Ok(view) => (StatusCode::OK, axum::Json(view)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn leaderboard_handler<D, S, A>(
    State(service): State<SharedService<D, S, A>>,
    Path(tournament_id): Path<String>,
    Query(query): Query<LeaderboardQuery>,
) -> Response
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    let filter = query
        .round
        .map(RoundFilter::Round)
        .unwrap_or(RoundFilter::AllRounds);
    match service.leaderboard(&TournamentId(tournament_id), filter) {
        Ok(board) => (StatusCode::OK, axum::Json(board)).into_response(),
        Err(err) => error_response(err),
    }
}

pub(crate) async fn achievements_handler<D, S, A>(
    State(service): State<SharedService<D, S, A>>,
    Path(player_id): Path<String>,
) -> Response
where
    D: TournamentDirectory + 'static,
    S: ScoreRepository + 'static,
    A: AchievementStore + 'static,
{
    match service.player_achievements(&PlayerId(player_id)) {
        Ok(ledger) => (StatusCode::OK, axum::Json(ledger)).into_response(),
        Err(err) => error_response(err),
    }
}

fn error_response(err: ScoringServiceError) -> Response {
    let payload = json!({ "error": err.to_string() });
    (scoring_status(&err), axum::Json(payload)).into_response()
}
