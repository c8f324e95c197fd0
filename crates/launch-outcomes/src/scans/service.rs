use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};

use super::domain::{normalize_url, ScanId, ScanRecord, ScanResults, ScanSubmission, ScanUrlError};
use super::leads::{LeadError, LeadId, LeadRecord, LeadReport, LeadSubmission, ReportSender};
use super::pipeline::{BrandExtractor, PerformanceScanner, ScanPipeline, ScreenshotCapturer};
use super::repository::{LeadRepository, RepositoryError, ScanRepository};
use crate::outcomes::ScoreRangeError;

/// Creates scan records, folds in collaborator results, and snapshots the outcome.
pub struct ScanService<R> {
    repository: Arc<R>,
}

impl<R> ScanService<R>
where
    R: ScanRepository + 'static,
{
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Register a scan for `url`; it stays `running` until results arrive.
    pub fn start(&self, url: &str) -> Result<ScanRecord, ScanServiceError> {
        let url = normalize_url(url)?;
        let record = ScanRecord::new(url, Utc::now());
        let stored = self.repository.insert(record)?;
        info!(scan_id = %stored.id, url = %stored.url, "scan started");
        Ok(stored)
    }

    /// Merge collaborator results into a scan. Scores are validated here, at the
    /// boundary, so everything downstream can trust them.
    pub fn complete(
        &self,
        scan_id: &ScanId,
        results: ScanResults,
    ) -> Result<ScanRecord, ScanServiceError> {
        for scan in results.desktop.iter().chain(results.mobile.iter()) {
            scan.scores.validate()?;
        }

        let mut record = self
            .repository
            .fetch(scan_id)?
            .ok_or(RepositoryError::NotFound)?;
        record.absorb(results);
        self.repository.update(record.clone())?;

        if let Some(snapshot) = &record.snapshot {
            info!(
                scan_id = %record.id,
                tier = %snapshot.tier,
                badge = %snapshot.badge,
                overall_score = %snapshot.overall_score,
                "scan completed"
            );
        }
        Ok(record)
    }

    /// Start and complete in one step with results measured elsewhere.
    pub fn submit(&self, submission: ScanSubmission) -> Result<ScanRecord, ScanServiceError> {
        let ScanSubmission { url, results } = submission;
        for scan in results.desktop.iter().chain(results.mobile.iter()) {
            scan.scores.validate()?;
        }
        let record = self.start(&url)?;
        self.complete(&record.id, results)
    }

    /// Run the collaborator pipeline for `url` and store whatever it gathered.
    pub async fn scan_with<P, S, B>(
        &self,
        url: &str,
        pipeline: &ScanPipeline<P, S, B>,
    ) -> Result<ScanRecord, ScanServiceError>
    where
        P: PerformanceScanner + 'static,
        S: ScreenshotCapturer + 'static,
        B: BrandExtractor + 'static,
    {
        let record = self.start(url)?;
        let results = pipeline.run(&record.url).await;
        self.complete(&record.id, results)
    }

    pub fn get(&self, scan_id: &ScanId) -> Result<ScanRecord, ScanServiceError> {
        let record = self
            .repository
            .fetch(scan_id)?
            .ok_or(RepositoryError::NotFound)?;
        Ok(record)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ScanServiceError {
    #[error(transparent)]
    Url(#[from] ScanUrlError),
    #[error(transparent)]
    Scores(#[from] ScoreRangeError),
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Stores report requests and emails the report for the scan they name.
pub struct LeadService<R, L, M> {
    scans: Arc<R>,
    leads: Arc<L>,
    sender: Arc<M>,
}

impl<R, L, M> LeadService<R, L, M>
where
    R: ScanRepository + 'static,
    L: LeadRepository + 'static,
    M: ReportSender + 'static,
{
    pub fn new(scans: Arc<R>, leads: Arc<L>, sender: Arc<M>) -> Self {
        Self {
            scans,
            leads,
            sender,
        }
    }

    /// Store the lead, then send the report when it names a known scan. Delivery is
    /// best effort: a lead whose report could not be sent is still stored.
    pub async fn capture(
        &self,
        submission: LeadSubmission,
    ) -> Result<LeadRecord, LeadServiceError> {
        let lead = submission.validate(Utc::now())?;
        let mut lead = self.leads.insert(lead)?;
        info!(lead_id = %lead.id, scan_id = ?lead.scan_id, "lead captured");

        let Some(scan_id) = lead.scan_id.clone() else {
            return Ok(lead);
        };
        let scan = match self.scans.fetch(&scan_id) {
            Ok(Some(scan)) => scan,
            Ok(None) => {
                warn!(lead_id = %lead.id, %scan_id, "lead names an unknown scan; no report sent");
                return Ok(lead);
            }
            Err(error) => {
                warn!(lead_id = %lead.id, %scan_id, %error, "scan lookup failed; no report sent");
                return Ok(lead);
            }
        };

        let report = LeadReport::compose(&lead, &scan);
        if let Some(location) = deliver(Arc::clone(&self.sender), report).await {
            lead.report_url = Some(location);
            lead.report_sent_at = Some(Utc::now());
            self.leads.update(lead.clone())?;
        }
        Ok(lead)
    }

    /// The stored lead with its report rebuilt from the current scan record.
    pub fn report(&self, lead_id: &LeadId) -> Result<(LeadRecord, LeadReport), LeadServiceError> {
        let lead = self
            .leads
            .fetch(lead_id)?
            .ok_or(LeadServiceError::LeadNotFound)?;
        let scan_id = lead.scan_id.as_ref().ok_or(LeadServiceError::NoScan)?;
        let scan = self
            .scans
            .fetch(scan_id)?
            .ok_or(LeadServiceError::ScanNotFound)?;
        let report = LeadReport::compose(&lead, &scan);
        Ok((lead, report))
    }
}

async fn deliver<M>(sender: Arc<M>, report: LeadReport) -> Option<String>
where
    M: ReportSender + 'static,
{
    let lead_id = report.lead_id.clone();
    let task = tokio::task::spawn_blocking(move || sender.send(&report));
    match task.await {
        Ok(Ok(location)) => {
            info!(%lead_id, %location, "report sent");
            Some(location)
        }
        Ok(Err(error)) => {
            warn!(%lead_id, %error, "report delivery failed; lead kept without it");
            None
        }
        Err(error) => {
            warn!(%lead_id, %error, "report task aborted; lead kept without it");
            None
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LeadServiceError {
    #[error(transparent)]
    Invalid(#[from] LeadError),
    #[error("Lead not found")]
    LeadNotFound,
    #[error("No scan associated with lead")]
    NoScan,
    #[error("Scan not found")]
    ScanNotFound,
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
