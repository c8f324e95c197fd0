use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use launch_outcomes::analytics::{record, AnalyticsEvent};
use launch_outcomes::error::AppError;
use launch_outcomes::experiments::FeatureFlags;
use launch_outcomes::outcomes::{
    generate_quick_wins, Category, OutcomePresentation, OutcomeRenderer, QuickWin, RenderRequest,
    ScoreSet,
};
use launch_outcomes::scans::{
    lead_router, leaderboard_router, scan_router, LeadRepository, LeadService,
    LeaderboardRepository, ReportSender, ScanRepository, ScanService,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Deserialize)]
pub(crate) struct QuickWinsRequest {
    pub(crate) scores: ScoreSet,
}

#[derive(Debug, Serialize)]
pub(crate) struct QuickWinsResponse {
    pub(crate) lowest_category: Category,
    pub(crate) quick_wins: Vec<QuickWin>,
}

pub(crate) fn with_outcome_routes<R, L, D, M>(
    scans: Arc<ScanService<R>>,
    leaderboard: Arc<L>,
    leads: Arc<LeadService<R, D, M>>,
    flags: Arc<FeatureFlags>,
) -> axum::Router
where
    R: ScanRepository + 'static,
    L: LeaderboardRepository + 'static,
    D: LeadRepository + 'static,
    M: ReportSender + 'static,
{
    scan_router(scans, flags)
        .merge(leaderboard_router(leaderboard))
        .merge(lead_router(leads))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route("/api/v1/outcomes", axum::routing::post(outcome_endpoint))
        .route("/api/v1/quick-wins", axum::routing::post(quick_wins_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn outcome_endpoint(
    Extension(state): Extension<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Json<OutcomePresentation>, AppError> {
    request.scores.validate()?;

    let view = OutcomeRenderer::new(&state.flags).render(&request);
    debug!(tier = %view.tier, badge = %view.badge, "outcome rendered");

    record(
        state.analytics.as_ref(),
        AnalyticsEvent::OutcomeViewed,
        &view.analytics,
        [
            ("cta_variant", json!(view.experiments.cta_text.key())),
            ("bucketed", json!(view.experiments.bucketed)),
        ],
    );
    if view.confetti {
        record(
            state.analytics.as_ref(),
            AnalyticsEvent::ConfettiTriggered,
            &view.analytics,
            std::iter::empty(),
        );
    }

    Ok(Json(view))
}

pub(crate) async fn quick_wins_endpoint(
    Json(payload): Json<QuickWinsRequest>,
) -> Result<Json<QuickWinsResponse>, AppError> {
    let QuickWinsRequest { scores } = payload;
    scores.validate()?;

    Ok(Json(QuickWinsResponse {
        lowest_category: scores.lowest_category(),
        quick_wins: generate_quick_wins(&scores),
    }))
}
