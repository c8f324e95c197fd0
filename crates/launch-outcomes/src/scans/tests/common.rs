use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use axum::response::Response;
use serde_json::Value;

use crate::outcomes::ScoreSet;
use crate::scans::domain::{
    BrandElements, CoreWebVitals, DeviceClass, DeviceScan, ScanId, ScanRecord, ScanResults,
    ScanSubmission,
};
use crate::scans::leaderboard::LeaderboardEntry;
use crate::scans::leads::{LeadId, LeadRecord, LeadReport, LeadSubmission, ReportSender};
use crate::scans::pipeline::{
    BrandExtractor, CollaboratorError, PerformanceScanner, ScanPipeline, ScreenshotCapturer,
};
use crate::scans::repository::{
    LeadRepository, LeaderboardRepository, RepositoryError, ScanRepository,
};
use crate::scans::{LeadService, ScanService};

pub(super) const SITE: &str = "https://www.bestshop.com/";

pub(super) fn device_scan(scores: ScoreSet) -> DeviceScan {
    DeviceScan {
        scores,
        core_web_vitals: CoreWebVitals {
            lcp: "2.1 s".to_string(),
            fid: "40 ms".to_string(),
            cls: "0.02".to_string(),
            tbt: "120 ms".to_string(),
        },
        top_issues: Vec::new(),
    }
}

pub(super) fn results(desktop: ScoreSet) -> ScanResults {
    ScanResults {
        desktop: Some(device_scan(desktop)),
        mobile: Some(device_scan(ScoreSet::new(
            desktop.performance.saturating_sub(10),
            desktop.accessibility,
            desktop.best_practices,
            desktop.seo,
        ))),
        screenshot: Some("data:image/png;base64,AAAA".to_string()),
        brand: Some(brand()),
    }
}

pub(super) fn brand() -> BrandElements {
    BrandElements {
        business_name: Some("Best Shop".to_string()),
        primary_color: Some("#1f2937".to_string()),
        ..BrandElements::default()
    }
}

pub(super) fn submission(desktop: ScoreSet) -> ScanSubmission {
    ScanSubmission {
        url: SITE.to_string(),
        results: results(desktop),
    }
}

pub(super) fn build_service() -> (ScanService<MemoryScans>, Arc<MemoryScans>) {
    let repository = Arc::new(MemoryScans::default());
    (ScanService::new(repository.clone()), repository)
}

#[derive(Default, Clone)]
pub(super) struct MemoryScans {
    pub(super) records: Arc<Mutex<HashMap<ScanId, ScanRecord>>>,
}

impl ScanRepository for MemoryScans {
    fn insert(&self, record: ScanRecord) -> Result<ScanRecord, RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ScanRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().expect("repository mutex poisoned");
        guard.insert(record.id.clone(), record);
        Ok(())
    }

    fn fetch(&self, id: &ScanId) -> Result<Option<ScanRecord>, RepositoryError> {
        let guard = self.records.lock().expect("repository mutex poisoned");
        Ok(guard.get(id).cloned())
    }
}

pub(super) struct ConflictScans;

impl ScanRepository for ConflictScans {
    fn insert(&self, _record: ScanRecord) -> Result<ScanRecord, RepositoryError> {
        Err(RepositoryError::Conflict)
    }

    fn update(&self, _record: ScanRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("read only".to_string()))
    }

    fn fetch(&self, _id: &ScanId) -> Result<Option<ScanRecord>, RepositoryError> {
        Ok(None)
    }
}

pub(super) struct UnavailableScans;

impl ScanRepository for UnavailableScans {
    fn insert(&self, _record: ScanRecord) -> Result<ScanRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _record: ScanRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &ScanId) -> Result<Option<ScanRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeaderboard {
    entries: Arc<Mutex<Vec<LeaderboardEntry>>>,
}

impl LeaderboardRepository for MemoryLeaderboard {
    fn insert(&self, entry: LeaderboardEntry) -> Result<LeaderboardEntry, RepositoryError> {
        let mut guard = self.entries.lock().expect("leaderboard mutex poisoned");
        if guard.iter().any(|existing| existing.domain == entry.domain) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        Ok(self.entries.lock().expect("leaderboard mutex poisoned").clone())
    }
}

#[derive(Default, Clone)]
pub(super) struct MemoryLeads {
    pub(super) leads: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for MemoryLeads {
    fn insert(&self, lead: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        if guard.contains_key(&lead.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    fn update(&self, lead: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.leads.lock().expect("lead mutex poisoned");
        guard.insert(lead.id.clone(), lead);
        Ok(())
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Ok(self.leads.lock().expect("lead mutex poisoned").get(id).cloned())
    }
}

pub(super) struct UnavailableLeads;

impl LeadRepository for UnavailableLeads {
    fn insert(&self, _lead: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn update(&self, _lead: LeadRecord) -> Result<(), RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }

    fn fetch(&self, _id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        Err(RepositoryError::Unavailable("database offline".to_string()))
    }
}

/// Sender that keeps every report it was asked to deliver.
#[derive(Default)]
pub(super) struct RecordingSender {
    pub(super) sent: Mutex<Vec<LeadReport>>,
}

impl RecordingSender {
    pub(super) fn sent(&self) -> Vec<LeadReport> {
        self.sent.lock().expect("sender mutex poisoned").clone()
    }
}

impl ReportSender for RecordingSender {
    fn send(&self, report: &LeadReport) -> Result<String, CollaboratorError> {
        self.sent
            .lock()
            .expect("sender mutex poisoned")
            .push(report.clone());
        Ok(format!("/reports/report-{}.html", report.scan_id))
    }
}

pub(super) struct FailingSender;

impl ReportSender for FailingSender {
    fn send(&self, _report: &LeadReport) -> Result<String, CollaboratorError> {
        Err(CollaboratorError::Unavailable("smtp refused".to_string()))
    }
}

pub(super) fn lead_submission(scan_id: Option<&ScanId>) -> LeadSubmission {
    LeadSubmission {
        first_name: Some("Dana".to_string()),
        last_name: Some("Reyes".to_string()),
        email: Some("Dana@BestShop.com".to_string()),
        company: Some("Best Shop".to_string()),
        scan_id: scan_id.cloned(),
        ..LeadSubmission::default()
    }
}

pub(super) fn build_lead_service<M: ReportSender + 'static>(
    sender: Arc<M>,
) -> (
    LeadService<MemoryScans, MemoryLeads, M>,
    ScanService<MemoryScans>,
    Arc<MemoryLeads>,
) {
    let scans = Arc::new(MemoryScans::default());
    let leads = Arc::new(MemoryLeads::default());
    (
        LeadService::new(scans.clone(), leads.clone(), sender),
        ScanService::new(scans),
        leads,
    )
}

/// Scanner that reports fixed scores and counts its calls.
pub(super) struct FixedScanner {
    pub(super) scores: ScoreSet,
    pub(super) fail_mobile: bool,
    pub(super) calls: AtomicUsize,
}

impl FixedScanner {
    pub(super) fn new(scores: ScoreSet) -> Self {
        Self {
            scores,
            fail_mobile: false,
            calls: AtomicUsize::new(0),
        }
    }
}

impl PerformanceScanner for FixedScanner {
    fn scan(&self, _url: &str, device: DeviceClass) -> Result<DeviceScan, CollaboratorError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_mobile && device == DeviceClass::Mobile {
            return Err(CollaboratorError::Unavailable("quota exceeded".to_string()));
        }
        Ok(device_scan(self.scores))
    }
}

pub(super) struct FailingScanner;

impl PerformanceScanner for FailingScanner {
    fn scan(&self, _url: &str, _device: DeviceClass) -> Result<DeviceScan, CollaboratorError> {
        Err(CollaboratorError::InvalidResponse("missing categories".to_string()))
    }
}

pub(super) struct StaticScreenshots(pub(super) Option<String>);

impl ScreenshotCapturer for StaticScreenshots {
    fn capture(&self, _url: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(self.0.clone())
    }
}

pub(super) struct BrokenScreenshots;

impl ScreenshotCapturer for BrokenScreenshots {
    fn capture(&self, _url: &str) -> Result<Option<String>, CollaboratorError> {
        Err(CollaboratorError::Unavailable("browser crashed".to_string()))
    }
}

pub(super) struct StaticBrand;

impl BrandExtractor for StaticBrand {
    fn extract(&self, _url: &str) -> Result<BrandElements, CollaboratorError> {
        Ok(brand())
    }
}

pub(super) struct BrokenBrand;

impl BrandExtractor for BrokenBrand {
    fn extract(&self, _url: &str) -> Result<BrandElements, CollaboratorError> {
        Err(CollaboratorError::InvalidResponse("no markup".to_string()))
    }
}

pub(super) fn healthy_pipeline(
    scores: ScoreSet,
) -> ScanPipeline<FixedScanner, StaticScreenshots, StaticBrand> {
    ScanPipeline::new(
        Arc::new(FixedScanner::new(scores)),
        Arc::new(StaticScreenshots(Some("data:image/png;base64,AAAA".to_string()))),
        Arc::new(StaticBrand),
    )
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
