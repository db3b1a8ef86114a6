use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryCandidateSource, InMemoryOfferPublisher};
use crate::routes::with_matching_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use crew_match::config::AppConfig;
use crew_match::error::AppError;
use crew_match::telemetry;
use crew_match::workflows::matching::{
    CrewMatchingService, RankingPipeline, RecomputeTiming, RosterImporter,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{info, warn};

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let pool = match &config.matching.roster_path {
        Some(path) => {
            let pool = RosterImporter::from_path(path)?;
            info!(roster = %path.display(), candidates = pool.len(), "roster loaded");
            pool
        }
        None => {
            warn!("APP_ROSTER_PATH not set; serving an empty candidate pool");
            Vec::new()
        }
    };

    let source = Arc::new(InMemoryCandidateSource::with_candidates(pool));
    let offers = Arc::new(InMemoryOfferPublisher::default());
    let service = Arc::new(CrewMatchingService::new(
        source,
        offers,
        RankingPipeline::default(),
    ));
    let recompute = Arc::new(service.recompute_controller(RecomputeTiming {
        debounce: config.matching.debounce(),
        processing_delay: config.matching.processing_delay(),
    })?);

    let app = with_matching_routes(service, recompute)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "crew matching service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
