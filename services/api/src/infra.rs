use launch_outcomes::analytics::AnalyticsSink;
use launch_outcomes::experiments::FeatureFlags;
use launch_outcomes::scans::{
    CollaboratorError, LeadId, LeadRecord, LeadReport, LeadRepository, LeaderboardEntry,
    LeaderboardRepository, RepositoryError, ReportSender, ScanId, ScanRecord, ScanRepository,
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
    pub(crate) flags: Arc<FeatureFlags>,
    pub(crate) analytics: Arc<dyn AnalyticsSink>,
}

fn poisoned<T>(_: T) -> RepositoryError {
    RepositoryError::Unavailable("in-memory store poisoned".to_string())
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryScanRepository {
    records: Arc<Mutex<HashMap<ScanId, ScanRecord>>>,
}

impl ScanRepository for InMemoryScanRepository {
    fn insert(&self, record: ScanRecord) -> Result<ScanRecord, RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(record.id.clone(), record.clone());
        Ok(record)
    }

    fn update(&self, record: ScanRecord) -> Result<(), RepositoryError> {
        let mut guard = self.records.lock().map_err(poisoned)?;
        if guard.contains_key(&record.id) {
            guard.insert(record.id.clone(), record);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &ScanId) -> Result<Option<ScanRecord>, RepositoryError> {
        let guard = self.records.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

/// One entry per domain; resubmissions are conflicts until verification exists.
#[derive(Default, Clone)]
pub(crate) struct InMemoryLeaderboard {
    entries: Arc<Mutex<Vec<LeaderboardEntry>>>,
}

impl LeaderboardRepository for InMemoryLeaderboard {
    fn insert(&self, entry: LeaderboardEntry) -> Result<LeaderboardEntry, RepositoryError> {
        let mut guard = self.entries.lock().map_err(poisoned)?;
        if guard.iter().any(|existing| existing.domain == entry.domain) {
            return Err(RepositoryError::Conflict);
        }
        guard.push(entry.clone());
        Ok(entry)
    }

    fn entries(&self) -> Result<Vec<LeaderboardEntry>, RepositoryError> {
        let guard = self.entries.lock().map_err(poisoned)?;
        Ok(guard.clone())
    }
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryLeadRepository {
    leads: Arc<Mutex<HashMap<LeadId, LeadRecord>>>,
}

impl LeadRepository for InMemoryLeadRepository {
    fn insert(&self, lead: LeadRecord) -> Result<LeadRecord, RepositoryError> {
        let mut guard = self.leads.lock().map_err(poisoned)?;
        if guard.contains_key(&lead.id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(lead.id.clone(), lead.clone());
        Ok(lead)
    }

    fn update(&self, lead: LeadRecord) -> Result<(), RepositoryError> {
        let mut guard = self.leads.lock().map_err(poisoned)?;
        if guard.contains_key(&lead.id) {
            guard.insert(lead.id.clone(), lead);
            Ok(())
        } else {
            Err(RepositoryError::NotFound)
        }
    }

    fn fetch(&self, id: &LeadId) -> Result<Option<LeadRecord>, RepositoryError> {
        let guard = self.leads.lock().map_err(poisoned)?;
        Ok(guard.get(id).cloned())
    }
}

/// Stand-in mailer: logs the report and hands back the path it would be served from.
#[derive(Default, Clone, Copy)]
pub(crate) struct LoggedReportSender;

impl ReportSender for LoggedReportSender {
    fn send(&self, report: &LeadReport) -> Result<String, CollaboratorError> {
        let location = format!("/reports/report-{}.html", report.scan_id);
        info!(
            lead_id = %report.lead_id,
            scan_id = %report.scan_id,
            subject = %report.subject,
            quick_wins = report.quick_wins.len(),
            %location,
            "report email queued"
        );
        Ok(location)
    }
}
