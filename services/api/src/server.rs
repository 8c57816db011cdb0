use crate::cli::ServeArgs;
use crate::infra::{load_store, AppState};
use crate::routes::with_application_routes;
use ats_core::analytics::AnalyticsService;
use ats_core::config::AppConfig;
use ats_core::error::AppError;
use ats_core::search::SearchService;
use ats_core::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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
    if let Some(fixtures) = args.fixtures.take() {
        config.fixtures.directory = Some(fixtures);
    }

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let store = Arc::new(load_store(config.fixtures.directory.as_deref())?);
    let search = Arc::new(SearchService::new(store.clone()));
    let analytics = Arc::new(AnalyticsService::new(store));

    let app = with_application_routes(search, analytics, config.search.max_limit)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        max_limit = config.search.max_limit,
        "ats search and analytics ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
