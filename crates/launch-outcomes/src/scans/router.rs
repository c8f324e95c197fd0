use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use super::domain::{BrandElements, DeviceScan, ScanId, ScanRecord, ScanStatus, ScanSubmission};
use super::leaderboard::{LeaderboardStandings, LeaderboardSubmission};
use super::leads::{LeadId, LeadSubmission, ReportSender};
use super::repository::{LeadRepository, LeaderboardRepository, RepositoryError, ScanRepository};
use super::service::{LeadService, LeadServiceError, ScanService, ScanServiceError};
use crate::experiments::FeatureFlags;
use crate::outcomes::{OutcomePresentation, OutcomeRenderer, RenderRequest};

/// Shared state for the scan endpoints.
pub struct ScanRouterState<R> {
    pub service: Arc<ScanService<R>>,
    pub flags: Arc<FeatureFlags>,
}

impl<R> Clone for ScanRouterState<R> {
    fn clone(&self) -> Self {
        Self {
            service: Arc::clone(&self.service),
            flags: Arc::clone(&self.flags),
        }
    }
}

/// Scan record as returned over HTTP, with the outcome rendered on read.
#[derive(Debug, Clone, Serialize)]
pub struct ScanView {
    pub scan_id: ScanId,
    pub url: String,
    pub domain: Option<String>,
    pub status: ScanStatus,
    pub progress: u8,
    pub created_at: DateTime<Utc>,
    pub desktop: Option<DeviceScan>,
    pub mobile: Option<DeviceScan>,
    pub screenshot: Option<String>,
    pub brand: Option<BrandElements>,
    pub outcome: Option<OutcomePresentation>,
}

impl ScanView {
    pub fn render(record: &ScanRecord, flags: &FeatureFlags, visitor_id: Option<&str>) -> Self {
        let renderer = OutcomeRenderer::new(flags);
        let outcome = record.desktop.as_ref().map(|scan| {
            let mut request = RenderRequest::new(scan.scores);
            request.domain = record.domain.clone();
            request.visitor_id = visitor_id.map(str::to_string);
            renderer.render(&request)
        });
        let status = record.status();
        Self {
            scan_id: record.id.clone(),
            url: record.url.clone(),
            domain: record.domain.clone(),
            status,
            progress: status.progress(),
            created_at: record.created_at,
            desktop: record.desktop.clone(),
            mobile: record.mobile.clone(),
            screenshot: record.screenshot.clone(),
            brand: record.brand.clone(),
            outcome,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ScanQuery {
    pub visitor_id: Option<String>,
}

/// Router builder exposing scan submission and lookup.
pub fn scan_router<R>(service: Arc<ScanService<R>>, flags: Arc<FeatureFlags>) -> Router
where
    R: ScanRepository + 'static,
{
    Router::new()
        .route("/api/v1/scans", post(submit_handler::<R>))
        .route("/api/v1/scans/:scan_id", get(status_handler::<R>))
        .with_state(ScanRouterState { service, flags })
}

fn error_response(status: StatusCode, message: impl ToString) -> Response {
    let payload = json!({ "error": message.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn submit_handler<R>(
    State(state): State<ScanRouterState<R>>,
    axum::Json(submission): axum::Json<ScanSubmission>,
) -> Response
where
    R: ScanRepository + 'static,
{
    match state.service.submit(submission) {
        Ok(record) => {
            let view = ScanView::render(&record, &state.flags, None);
            (StatusCode::CREATED, axum::Json(view)).into_response()
        }
        Err(ScanServiceError::Url(error)) => error_response(StatusCode::BAD_REQUEST, error),
        Err(ScanServiceError::Scores(error)) => error_response(StatusCode::BAD_REQUEST, error),
        Err(ScanServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "scan already exists")
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

pub(crate) async fn status_handler<R>(
    State(state): State<ScanRouterState<R>>,
    Path(scan_id): Path<String>,
    Query(query): Query<ScanQuery>,
) -> Response
where
    R: ScanRepository + 'static,
{
    let id = ScanId(scan_id);
    match state.service.get(&id) {
        Ok(record) => {
            let view = ScanView::render(&record, &state.flags, query.visitor_id.as_deref());
            (StatusCode::OK, axum::Json(view)).into_response()
        }
        Err(ScanServiceError::Repository(RepositoryError::NotFound)) => {
            let payload = json!({
                "scan_id": id.0,
                "error": "Scan not found",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

/// Router builder for the opt-in leaderboard.
pub fn leaderboard_router<L>(repository: Arc<L>) -> Router
where
    L: LeaderboardRepository + 'static,
{
    Router::new()
        .route(
            "/api/v1/leaderboard",
            get(standings_handler::<L>).post(join_handler::<L>),
        )
        .with_state(repository)
}

pub(crate) async fn standings_handler<L>(State(repository): State<Arc<L>>) -> Response
where
    L: LeaderboardRepository + 'static,
{
    match repository.entries() {
        Ok(entries) => {
            let standings = LeaderboardStandings::from_entries(&entries);
            (StatusCode::OK, axum::Json(standings)).into_response()
        }
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, error),
    }
}

pub(crate) async fn join_handler<L>(
    State(repository): State<Arc<L>>,
    axum::Json(submission): axum::Json<LeaderboardSubmission>,
) -> Response
where
    L: LeaderboardRepository + 'static,
{
    let entry = match submission.validate(Utc::now()) {
        Ok(entry) => entry,
        Err(error) if error.is_malformed() => {
            return error_response(StatusCode::BAD_REQUEST, error)
        }
        Err(error) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, error),
    };

    match repository.insert(entry) {
        Ok(entry) => {
            info!(entry_id = %entry.id, domain = %entry.domain, badge = %entry.badge, "leaderboard entry submitted");
            let payload = json!({
                "success": true,
                "message": "Successfully submitted to leaderboard",
                "entry": entry,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(RepositoryError::Conflict) => {
            error_response(StatusCode::CONFLICT, "domain already on the leaderboard")
        }
        Err(error) => error_response(StatusCode::INTERNAL_SERVER_ERROR, error),
    }
}

const LEAD_THANKS: &str = "Thank you! Your report will be sent to your email shortly.";

/// Router builder for report requests.
pub fn lead_router<R, L, M>(service: Arc<LeadService<R, L, M>>) -> Router
where
    R: ScanRepository + 'static,
    L: LeadRepository + 'static,
    M: ReportSender + 'static,
{
    Router::new()
        .route("/api/v1/leads", post(capture_handler::<R, L, M>))
        .route("/api/v1/leads/:lead_id/report", get(report_handler::<R, L, M>))
        .with_state(service)
}

pub(crate) async fn capture_handler<R, L, M>(
    State(service): State<Arc<LeadService<R, L, M>>>,
    axum::Json(submission): axum::Json<LeadSubmission>,
) -> Response
where
    R: ScanRepository + 'static,
    L: LeadRepository + 'static,
    M: ReportSender + 'static,
{
    match service.capture(submission).await {
        Ok(lead) => {
            let payload = json!({
                "success": true,
                "lead_id": lead.id,
                "report_sent": lead.report_sent_at.is_some(),
                "message": LEAD_THANKS,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(LeadServiceError::Invalid(error)) => error_response(StatusCode::BAD_REQUEST, error),
        Err(LeadServiceError::Repository(RepositoryError::Conflict)) => {
            error_response(StatusCode::CONFLICT, "lead already exists")
        }
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}

pub(crate) async fn report_handler<R, L, M>(
    State(service): State<Arc<LeadService<R, L, M>>>,
    Path(lead_id): Path<String>,
) -> Response
where
    R: ScanRepository + 'static,
    L: LeadRepository + 'static,
    M: ReportSender + 'static,
{
    match service.report(&LeadId(lead_id)) {
        Ok((lead, report)) => {
            let payload = json!({
                "report": report,
                "report_url": lead.report_url,
                "report_sent_at": lead.report_sent_at,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(
            error @ (LeadServiceError::LeadNotFound
            | LeadServiceError::NoScan
            | LeadServiceError::ScanNotFound),
        ) => error_response(StatusCode::NOT_FOUND, error),
        Err(other) => error_response(StatusCode::INTERNAL_SERVER_ERROR, other),
    }
}
