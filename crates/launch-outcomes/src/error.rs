use crate::config::ConfigError;
use crate::outcomes::ScoreRangeError;
use crate::scans::{LeaderboardError, RepositoryError, ScanServiceError};
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
    Scores(ScoreRangeError),
    Scan(ScanServiceError),
    Leaderboard(LeaderboardError),
}

impl AppError {
    /// Malformed input is a 400; a well-formed request refused by a rule is a 422.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Scores(_)
            | AppError::Scan(ScanServiceError::Url(_))
            | AppError::Scan(ScanServiceError::Scores(_)) => StatusCode::BAD_REQUEST,
            AppError::Leaderboard(err) if err.is_malformed() => StatusCode::BAD_REQUEST,
            AppError::Leaderboard(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Scan(ScanServiceError::Repository(RepositoryError::NotFound)) => {
                StatusCode::NOT_FOUND
            }
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Scan(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Scores(err) => write!(f, "invalid scores: {}", err),
            AppError::Scan(err) => write!(f, "scan error: {}", err),
            AppError::Leaderboard(err) => write!(f, "leaderboard error: {}", err),
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
            AppError::Scores(err) => Some(err),
            AppError::Scan(err) => Some(err),
            AppError::Leaderboard(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
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

impl From<ScoreRangeError> for AppError {
    fn from(value: ScoreRangeError) -> Self {
        Self::Scores(value)
    }
}

impl From<ScanServiceError> for AppError {
    fn from(value: ScanServiceError) -> Self {
        Self::Scan(value)
    }
}

impl From<LeaderboardError> for AppError {
    fn from(value: LeaderboardError) -> Self {
        Self::Leaderboard(value)
    }
}
