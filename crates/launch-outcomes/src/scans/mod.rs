//! Scan records, the collaborator pipeline that fills them, report leads, and the opt-in
//! leaderboard.
//!
//! Collaborators (performance scanner, screenshot capture, brand extraction, report email)
//! sit behind traits; the crate ships no network clients for them.

pub mod domain;
pub mod leaderboard;
pub mod leads;
pub mod pipeline;
pub mod repository;
pub mod router;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    canonical_domain, domain_of, normalize_url, BrandElements, CoreWebVitals, DeviceClass,
    DeviceScan, Issue, IssueSeverity, OutcomeSnapshot, ScanId, ScanRecord, ScanResults, ScanStatus,
    ScanSubmission, ScanUrlError,
};
pub use leaderboard::{
    BadgeDistribution, EntryStatus, LeaderboardEntry, LeaderboardError, LeaderboardRow,
    LeaderboardStandings, LeaderboardSubmission, TOP_PERFORMERS,
};
pub use leads::{LeadError, LeadId, LeadRecord, LeadReport, LeadSubmission, ReportSender};
pub use pipeline::{
    BrandExtractor, CollaboratorError, PerformanceScanner, ScanPipeline, ScreenshotCapturer,
};
pub use repository::{LeadRepository, LeaderboardRepository, RepositoryError, ScanRepository};
pub use router::{lead_router, leaderboard_router, scan_router, ScanView};
pub use service::{LeadService, LeadServiceError, ScanService, ScanServiceError};
