use crate::cli::ServeArgs;
use crate::demo::seed_directory;
use crate::infra::{
    AppState, InMemoryAchievementStore, InMemoryScoreRepository, InMemoryTournamentDirectory,
};
use crate::routes::with_scoring_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use clubhouse::config::AppConfig;
use clubhouse::error::AppError;
use clubhouse::scoring::achievements::AchievementCatalog;
use clubhouse::scoring::{ScoringFormat, ScoringService};
use clubhouse::telemetry;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let catalog = match &config.achievements.catalog_path {
        Some(path) => {
            let catalog = AchievementCatalog::from_path(path)?;
            info!(path = %path.display(), achievements = catalog.len(), "loaded achievement catalog");
            catalog
        }
        None => AchievementCatalog::standard(),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let directory = Arc::new(InMemoryTournamentDirectory::default());
    let tournament_id = seed_directory(&directory, ScoringFormat::Handicap, 2)?;
    info!(tournament = %tournament_id, "seeded demo tournament");

    let scoring_service = Arc::new(ScoringService::new(
        directory,
        Arc::new(InMemoryScoreRepository::default()),
        Arc::new(InMemoryAchievementStore::default()),
        catalog,
    ));

    let app = with_scoring_routes(scoring_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "scoring service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
