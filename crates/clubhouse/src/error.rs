use crate::config::ConfigError;
use crate::scorecard::ScorecardImportError;
use crate::scoring::achievements::CatalogError;
use crate::scoring::repository::RepositoryError;
use crate::scoring::service::ScoringServiceError;
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Catalog(CatalogError),
    Scoring(ScoringServiceError),
    Import(ScorecardImportError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Catalog(err) => write!(f, "achievement catalog error: {}", err),
            AppError::Scoring(err) => write!(f, "scoring error: {}", err),
            AppError::Import(err) => write!(f, "scorecard import error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Catalog(err) => Some(err),
            AppError::Scoring(err) => Some(err),
            AppError::Import(err) => Some(err),
        }
    }
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Scoring(err) => scoring_status(err),
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Catalog(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Caller mistakes are 4xx; store trouble is 5xx.
pub(crate) fn scoring_status(err: &ScoringServiceError) -> StatusCode {
    match err {
        ScoringServiceError::UnknownTournament(_)
        | ScoringServiceError::UnknownPlayer(_)
        | ScoringServiceError::InvalidRound(_)
        | ScoringServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScoringServiceError::UnknownHole(_) | ScoringServiceError::InvalidEntry(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        ScoringServiceError::Repository(RepositoryError::Unavailable(_)) => {
            StatusCode::SERVICE_UNAVAILABLE
        }
        ScoringServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.to_string() }));
        (self.status(), body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<CatalogError> for AppError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<ScoringServiceError> for AppError {
    fn from(value: ScoringServiceError) -> Self {
        Self::Scoring(value)
    }
}

impl From<RepositoryError> for AppError {
    fn from(value: RepositoryError) -> Self {
        Self::Scoring(ScoringServiceError::Repository(value))
    }
}

impl From<ScorecardImportError> for AppError {
    fn from(value: ScorecardImportError) -> Self {
        Self::Import(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::validator::ScoreEntryError;

    #[test]
    fn scoring_errors_keep_their_http_status() {
        let invalid = AppError::from(ScoringServiceError::InvalidEntry(
            ScoreEntryError::NonPositiveStrokes(0),
        ));
        assert_eq!(invalid.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let offline = AppError::from(ScoringServiceError::Repository(
            RepositoryError::Unavailable("pool exhausted".to_string()),
        ));
        assert_eq!(offline.status(), StatusCode::SERVICE_UNAVAILABLE);

        let missing = AppError::from(ScoringServiceError::UnknownPlayer("zed".to_string()));
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn infrastructure_errors_are_server_errors() {
        let err = AppError::from(CatalogError::DuplicateId("eagle_eye".to_string()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().contains("eagle_eye"));
    }
}
