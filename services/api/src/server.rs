use crate::cli::ServeArgs;
use crate::infra::{
    AppState, InMemoryLeadRepository, InMemoryLeaderboard, InMemoryScanRepository,
    LoggedReportSender,
};
use crate::routes::with_outcome_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use launch_outcomes::analytics::TracingAnalyticsSink;
use launch_outcomes::config::AppConfig;
use launch_outcomes::error::AppError;
use launch_outcomes::scans::{LeadService, ScanService};
use launch_outcomes::telemetry;
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

    let flags = Arc::new(config.flags.clone());
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        flags: flags.clone(),
        analytics: Arc::new(TracingAnalyticsSink::new(&flags)),
    };

    let scan_repository = Arc::new(InMemoryScanRepository::default());
    let scans = Arc::new(ScanService::new(scan_repository.clone()));
    let leaderboard = Arc::new(InMemoryLeaderboard::default());
    let leads = Arc::new(LeadService::new(
        scan_repository,
        Arc::new(InMemoryLeadRepository::default()),
        Arc::new(LoggedReportSender),
    ));

    let app = with_outcome_routes(scans, leaderboard, leads, flags.clone())
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        analytics = flags.enable_analytics,
        leaderboard = flags.show_leaderboard,
        "outcome service ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
