use std::sync::Arc;

use super::common::*;
use crate::outcomes::{Badge, ScoreSet, Tier};
use crate::scans::domain::{ScanId, ScanResults, ScanStatus, ScanUrlError};
use crate::scans::pipeline::ScanPipeline;
use crate::scans::repository::{RepositoryError, ScanRepository};
use crate::scans::{ScanService, ScanServiceError};

#[test]
fn start_stores_a_running_scan() {
    let (service, repository) = build_service();
    let record = service.start(SITE).expect("scan starts");

    assert_eq!(record.status(), ScanStatus::Running);
    assert_eq!(record.domain.as_deref(), Some("bestshop.com"));
    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored, record);
}

#[test]
fn start_rejects_bad_urls() {
    let (service, repository) = build_service();
    match service.start("not a url") {
        Err(ScanServiceError::Url(ScanUrlError::InvalidFormat)) => {}
        other => panic!("expected url error, got {other:?}"),
    }
    assert!(repository.records.lock().expect("lock").is_empty());
}

#[test]
fn submit_snapshots_the_outcome() {
    let (service, repository) = build_service();
    let record = service
        .submit(submission(ScoreSet::uniform(98)))
        .expect("submission stored");

    assert_eq!(record.status(), ScanStatus::Complete);
    let snapshot = record.snapshot.expect("snapshot");
    assert_eq!(snapshot.tier, Tier::Pass);
    assert_eq!(snapshot.badge, Badge::Platinum);

    let stored = repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .expect("record present");
    assert_eq!(stored.snapshot, Some(snapshot));
}

#[test]
fn submit_rejects_out_of_range_scores_before_storing() {
    let (service, repository) = build_service();
    let mut submission = submission(ScoreSet::uniform(90));
    if let Some(mobile) = submission.results.mobile.as_mut() {
        mobile.scores.seo = 140;
    }

    match service.submit(submission) {
        Err(ScanServiceError::Scores(error)) => assert_eq!(error.value, 140),
        other => panic!("expected score range error, got {other:?}"),
    }
    assert!(repository.records.lock().expect("lock").is_empty());
}

#[test]
fn complete_requires_an_existing_scan() {
    let (service, _) = build_service();
    let missing = ScanId("scan-missing".to_string());
    match service.complete(&missing, ScanResults::default()) {
        Err(ScanServiceError::Repository(RepositoryError::NotFound)) => {}
        other => panic!("expected not found, got {other:?}"),
    }
}

#[test]
fn get_propagates_not_found() {
    let (service, _) = build_service();
    assert!(matches!(
        service.get(&ScanId("scan-000000".to_string())),
        Err(ScanServiceError::Repository(RepositoryError::NotFound))
    ));
}

#[test]
fn repository_outage_surfaces_as_repository_error() {
    let service = ScanService::new(Arc::new(UnavailableScans));
    assert!(matches!(
        service.start(SITE),
        Err(ScanServiceError::Repository(RepositoryError::Unavailable(_)))
    ));
}

#[tokio::test]
async fn scan_with_runs_the_pipeline_and_completes() {
    let (service, _) = build_service();
    let record = service
        .scan_with(SITE, &healthy_pipeline(ScoreSet::new(72, 85, 90, 88)))
        .await
        .expect("scan completes");

    assert_eq!(record.status(), ScanStatus::Complete);
    assert_eq!(
        record.snapshot.map(|snapshot| snapshot.tier),
        Some(Tier::NeedsBoost)
    );
    assert!(record.brand.is_some());
}

#[tokio::test]
async fn scan_with_keeps_running_when_scanner_is_down() {
    let (service, repository) = build_service();
    let pipeline = ScanPipeline::new(
        Arc::new(FailingScanner),
        Arc::new(BrokenScreenshots),
        Arc::new(StaticBrand),
    );

    let record = service
        .scan_with(SITE, &pipeline)
        .await
        .expect("best effort scan still stored");

    assert_eq!(record.status(), ScanStatus::Running);
    assert!(record.snapshot.is_none());
    assert_eq!(record.brand, Some(brand()));
    assert!(repository
        .fetch(&record.id)
        .expect("fetch succeeds")
        .is_some());
}
