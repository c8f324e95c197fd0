use std::sync::Arc;

use chrono::Utc;

use super::common::*;
use crate::outcomes::{Category, ScoreSet, Tier};
use crate::scans::domain::{ScanId, ScanRecord};
use crate::scans::leads::{LeadError, LeadId, LeadReport, LeadSubmission};
use crate::scans::repository::{LeadRepository, RepositoryError};
use crate::scans::{LeadService, LeadServiceError};

#[test]
fn names_and_email_are_required() {
    let mut unnamed = lead_submission(None);
    unnamed.last_name = Some("   ".to_string());
    assert_eq!(unnamed.validate(Utc::now()), Err(LeadError::MissingFields));

    assert_eq!(
        LeadSubmission::default().validate(Utc::now()),
        Err(LeadError::MissingFields)
    );
}

#[test]
fn implausible_emails_are_rejected() {
    let rejected = [
        "dana",
        "dana@",
        "@bestshop.com",
        "dana@localhost",
        "dana@shop..com",
        "da na@shop.com",
    ];
    for email in rejected {
        let mut submission = lead_submission(None);
        submission.email = Some(email.to_string());
        assert_eq!(
            submission.validate(Utc::now()),
            Err(LeadError::InvalidEmail),
            "{email}"
        );
    }
}

#[test]
fn accepted_leads_are_trimmed_and_pending() {
    let mut submission = lead_submission(Some(&ScanId("   ".to_string())));
    submission.first_name = Some("  Dana ".to_string());
    submission.phone = Some(" ".to_string());

    let lead = submission.validate(Utc::now()).expect("valid lead");
    assert_eq!(lead.first_name, "Dana");
    assert_eq!(lead.email, "dana@bestshop.com");
    assert_eq!(lead.phone, None);
    assert_eq!(lead.company.as_deref(), Some("Best Shop"));
    assert_eq!(lead.scan_id, None);
    assert!(lead.report_sent_at.is_none());
    assert!(lead.id.0.starts_with("lead-"));
}

#[test]
fn report_carries_subject_outcome_and_quick_wins() {
    let lead = lead_submission(None).validate(Utc::now()).expect("valid lead");
    let mut scan = ScanRecord::new(SITE.to_string(), Utc::now());
    scan.absorb(results(ScoreSet::new(55, 90, 95, 70)));

    let report = LeadReport::compose(&lead, &scan);
    assert_eq!(
        report.subject,
        "Website Performance Report for bestshop.com (NEEDS_BOOST tier)"
    );
    assert_eq!(report.recipient, "dana@bestshop.com");
    assert_eq!(
        report.snapshot.map(|snapshot| snapshot.tier),
        Some(Tier::NeedsBoost)
    );
    assert_eq!(
        report.quick_wins.first().map(|win| win.category),
        Some(Category::Performance)
    );
}

#[test]
fn report_for_a_running_scan_has_no_tier() {
    let lead = lead_submission(None).validate(Utc::now()).expect("valid lead");
    let scan = ScanRecord::new(SITE.to_string(), Utc::now());

    let report = LeadReport::compose(&lead, &scan);
    assert_eq!(report.subject, "Website Performance Report for bestshop.com");
    assert!(report.snapshot.is_none());
    assert!(report.quick_wins.is_empty());
}

#[tokio::test]
async fn capture_sends_the_report_for_a_finished_scan() {
    let sender = Arc::new(RecordingSender::default());
    let (leads, scans, repository) = build_lead_service(sender.clone());
    let scan = scans
        .submit(submission(ScoreSet::uniform(95)))
        .expect("scan stored");

    let lead = leads
        .capture(lead_submission(Some(&scan.id)))
        .await
        .expect("lead captured");

    assert!(lead.report_sent_at.is_some());
    assert_eq!(
        lead.report_url,
        Some(format!("/reports/report-{}.html", scan.id))
    );
    let stored = repository
        .fetch(&lead.id)
        .expect("fetch succeeds")
        .expect("lead present");
    assert_eq!(stored, lead);

    let sent = sender.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].lead_id, lead.id);
    assert_eq!(
        sent[0].subject,
        "Website Performance Report for bestshop.com (PASS tier)"
    );
}

#[tokio::test]
async fn capture_without_a_scan_sends_nothing() {
    let sender = Arc::new(RecordingSender::default());
    let (leads, _, repository) = build_lead_service(sender.clone());

    let lead = leads
        .capture(lead_submission(None))
        .await
        .expect("lead captured");

    assert!(lead.report_sent_at.is_none());
    assert!(sender.sent().is_empty());
    assert!(repository.fetch(&lead.id).expect("fetch succeeds").is_some());
}

#[tokio::test]
async fn capture_for_an_unknown_scan_keeps_the_lead() {
    let sender = Arc::new(RecordingSender::default());
    let (leads, _, repository) = build_lead_service(sender.clone());

    let lead = leads
        .capture(lead_submission(Some(&ScanId("scan-999999".to_string()))))
        .await
        .expect("lead captured");

    assert!(lead.report_url.is_none());
    assert!(sender.sent().is_empty());
    assert!(repository.fetch(&lead.id).expect("fetch succeeds").is_some());
}

#[tokio::test]
async fn failed_delivery_does_not_fail_the_capture() {
    let (leads, scans, repository) = build_lead_service(Arc::new(FailingSender));
    let scan = scans
        .submit(submission(ScoreSet::uniform(70)))
        .expect("scan stored");

    let lead = leads
        .capture(lead_submission(Some(&scan.id)))
        .await
        .expect("lead captured despite delivery failure");

    assert!(lead.report_sent_at.is_none());
    let stored = repository
        .fetch(&lead.id)
        .expect("fetch succeeds")
        .expect("lead present");
    assert!(stored.report_url.is_none());
}

#[tokio::test]
async fn capture_surfaces_validation_and_storage_errors() {
    let (leads, _, _) = build_lead_service(Arc::new(RecordingSender::default()));
    match leads.capture(LeadSubmission::default()).await {
        Err(LeadServiceError::Invalid(LeadError::MissingFields)) => {}
        other => panic!("expected validation error, got {other:?}"),
    }

    let offline = LeadService::new(
        Arc::new(MemoryScans::default()),
        Arc::new(UnavailableLeads),
        Arc::new(RecordingSender::default()),
    );
    match offline.capture(lead_submission(None)).await {
        Err(LeadServiceError::Repository(RepositoryError::Unavailable(_))) => {}
        other => panic!("expected repository error, got {other:?}"),
    }
}

#[tokio::test]
async fn report_lookup_distinguishes_missing_lead_scan_and_record() {
    let (leads, scans, repository) = build_lead_service(Arc::new(RecordingSender::default()));

    match leads.report(&LeadId("lead-999999".to_string())) {
        Err(LeadServiceError::LeadNotFound) => {}
        other => panic!("expected missing lead, got {other:?}"),
    }

    let without_scan = leads
        .capture(lead_submission(None))
        .await
        .expect("lead captured");
    assert!(matches!(
        leads.report(&without_scan.id),
        Err(LeadServiceError::NoScan)
    ));

    let mut dangling = lead_submission(None).validate(Utc::now()).expect("valid lead");
    dangling.scan_id = Some(ScanId("scan-999999".to_string()));
    let dangling = repository.insert(dangling).expect("lead stored");
    assert!(matches!(
        leads.report(&dangling.id),
        Err(LeadServiceError::ScanNotFound)
    ));

    let scan = scans
        .submit(submission(ScoreSet::uniform(92)))
        .expect("scan stored");
    let lead = leads
        .capture(lead_submission(Some(&scan.id)))
        .await
        .expect("lead captured");
    let (stored, report) = leads.report(&lead.id).expect("report available");
    assert_eq!(stored.report_url, lead.report_url);
    assert_eq!(report.scan_id, scan.id);
}
