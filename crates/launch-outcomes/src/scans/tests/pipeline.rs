use std::sync::atomic::Ordering;
use std::sync::Arc;

use super::common::*;
use crate::outcomes::ScoreSet;
use crate::scans::pipeline::ScanPipeline;

#[tokio::test]
async fn pipeline_collects_every_collaborator() {
    let scores = ScoreSet::new(91, 94, 96, 99);
    let results = healthy_pipeline(scores).run(SITE).await;

    assert_eq!(results.desktop.map(|scan| scan.scores), Some(scores));
    assert_eq!(results.mobile.map(|scan| scan.scores), Some(scores));
    assert!(results.screenshot.is_some());
    assert_eq!(results.brand, Some(brand()));
}

#[tokio::test]
async fn pipeline_scans_each_device_once() {
    let scanner = Arc::new(FixedScanner::new(ScoreSet::uniform(70)));
    let pipeline = ScanPipeline::new(
        scanner.clone(),
        Arc::new(StaticScreenshots(None)),
        Arc::new(StaticBrand),
    );

    let results = pipeline.run(SITE).await;
    assert_eq!(scanner.calls.load(Ordering::SeqCst), 2);
    assert!(results.screenshot.is_none(), "empty capture stays absent");
}

#[tokio::test]
async fn failed_collaborators_are_left_out() {
    let mut scanner = FixedScanner::new(ScoreSet::uniform(88));
    scanner.fail_mobile = true;
    let pipeline = ScanPipeline::new(
        Arc::new(scanner),
        Arc::new(BrokenScreenshots),
        Arc::new(BrokenBrand),
    );

    let results = pipeline.run(SITE).await;
    assert!(results.desktop.is_some());
    assert!(results.mobile.is_none());
    assert!(results.screenshot.is_none());
    assert!(results.brand.is_none());
}

#[tokio::test]
async fn scanner_outage_yields_empty_scores() {
    let pipeline = ScanPipeline::new(
        Arc::new(FailingScanner),
        Arc::new(StaticScreenshots(Some("shot".to_string()))),
        Arc::new(StaticBrand),
    );

    let results = pipeline.run(SITE).await;
    assert!(results.desktop.is_none());
    assert!(results.mobile.is_none());
    assert_eq!(results.screenshot.as_deref(), Some("shot"));
}
