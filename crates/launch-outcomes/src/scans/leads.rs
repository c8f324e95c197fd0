use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use super::domain::{DeviceClass, OutcomeSnapshot, ScanId, ScanRecord};
use super::pipeline::CollaboratorError;
use crate::links::report_email_subject;
use crate::outcomes::{generate_quick_wins, QuickWin};

static LEAD_SEQUENCE: AtomicU64 = AtomicU64::new(1);

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LeadId(pub String);

impl LeadId {
    pub fn next() -> Self {
        let id = LEAD_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("lead-{id:06}"))
    }
}

impl fmt::Display for LeadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Report request from the outcome panel. Everything is optional on the wire so
/// that gaps come back as a `LeadError` rather than a deserialization failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LeadSubmission {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub scan_id: Option<ScanId>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeadError {
    #[error("First name, last name, and email are required")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadRecord {
    pub id: LeadId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub scan_id: Option<ScanId>,
    pub report_url: Option<String>,
    pub report_sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

fn filled(value: Option<String>) -> Option<String> {
    value
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn plausible_email(email: &str) -> bool {
    let Some((local, host)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !host.contains('@')
        && host.split('.').count() > 1
        && host.split('.').all(|label| !label.is_empty())
        && !email.chars().any(char::is_whitespace)
}

impl LeadSubmission {
    pub fn validate(self, created_at: DateTime<Utc>) -> Result<LeadRecord, LeadError> {
        let (Some(first_name), Some(last_name), Some(email)) = (
            filled(self.first_name),
            filled(self.last_name),
            filled(self.email),
        ) else {
            return Err(LeadError::MissingFields);
        };
        if !plausible_email(&email) {
            return Err(LeadError::InvalidEmail);
        }

        Ok(LeadRecord {
            id: LeadId::next(),
            first_name,
            last_name,
            email: email.to_ascii_lowercase(),
            phone: filled(self.phone),
            company: filled(self.company),
            scan_id: self.scan_id.filter(|id| !id.0.trim().is_empty()),
            report_url: None,
            report_sent_at: None,
            created_at,
        })
    }
}

/// Everything a report email carries, assembled from the finished scan and the lead.
#[derive(Debug, Clone, Serialize)]
pub struct LeadReport {
    pub lead_id: LeadId,
    pub recipient: String,
    pub first_name: String,
    pub subject: String,
    pub scan_id: ScanId,
    pub url: String,
    pub domain: Option<String>,
    pub snapshot: Option<OutcomeSnapshot>,
    pub quick_wins: Vec<QuickWin>,
}

impl LeadReport {
    pub fn compose(lead: &LeadRecord, scan: &ScanRecord) -> Self {
        let subject = report_email_subject(
            scan.domain.as_deref(),
            scan.snapshot.map(|snapshot| snapshot.tier),
        );
        let quick_wins = scan
            .scores(DeviceClass::Desktop)
            .map(generate_quick_wins)
            .unwrap_or_default();
        Self {
            lead_id: lead.id.clone(),
            recipient: lead.email.clone(),
            first_name: lead.first_name.clone(),
            subject,
            scan_id: scan.id.clone(),
            url: scan.url.clone(),
            domain: scan.domain.clone(),
            snapshot: scan.snapshot,
            quick_wins,
        }
    }
}

/// Renders and emails a report; returns where the rendered report can be fetched.
pub trait ReportSender: Send + Sync {
    fn send(&self, report: &LeadReport) -> Result<String, CollaboratorError>;
}
