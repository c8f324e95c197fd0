use crate::infra::{
    InMemoryLeadRepository, InMemoryLeaderboard, InMemoryScanRepository, LoggedReportSender,
};
use chrono::Utc;
use clap::Args;
use launch_outcomes::analytics::{record, AnalyticsEvent, AnalyticsSink, MemoryAnalyticsSink};
use launch_outcomes::config::AppConfig;
use launch_outcomes::error::AppError;
use launch_outcomes::links::{
    badge_share_data, calendar_url, quick_win_guide_url, report_email_subject, social_share_url,
    SocialPlatform,
};
use launch_outcomes::outcomes::{OutcomePresentation, OutcomeRenderer, RenderRequest, ScoreSet};
use launch_outcomes::scans::{
    domain_of, BrandElements, BrandExtractor, CollaboratorError, CoreWebVitals, DeviceClass,
    DeviceScan, LeadService, LeadSubmission, LeaderboardRepository, LeaderboardStandings,
    LeaderboardSubmission, PerformanceScanner, ScanPipeline, ScanService, ScreenshotCapturer,
};
use serde_json::json;
use std::sync::Arc;

const SHARE_ORIGIN: &str = "https://launchin7.com/badge";

const SAMPLE_SITES: [&str; 4] = [
    "https://www.quickbuy-store.com",
    "https://launchpad-app.io/pricing",
    "https://nightly-news.blog",
    "https://offline.example",
];

#[derive(Args, Debug)]
pub(crate) struct EvaluateArgs {
    /// Performance category score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) performance: u8,
    /// Accessibility category score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) accessibility: u8,
    /// Best-practices category score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) best_practices: u8,
    /// SEO category score (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) seo: u8,
    /// Scanned domain, used for personalization and links
    #[arg(long)]
    pub(crate) domain: Option<String>,
    /// Visitor identifier for sticky experiment bucketing
    #[arg(long)]
    pub(crate) visitor: Option<String>,
    /// Print the outcome as JSON instead of text
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Visitor identifier for sticky experiment bucketing
    #[arg(long)]
    pub(crate) visitor: Option<String>,
    /// Skip the leaderboard portion of the demo.
    #[arg(long)]
    pub(crate) skip_leaderboard: bool,
}

pub(crate) fn run_evaluate(args: EvaluateArgs) -> Result<(), AppError> {
    let EvaluateArgs {
        performance,
        accessibility,
        best_practices,
        seo,
        domain,
        visitor,
        json,
    } = args;

    let flags = AppConfig::load()?.flags;
    let scores = ScoreSet::new(performance, accessibility, best_practices, seo);
    scores.validate()?;

    let mut request = RenderRequest::new(scores);
    request.domain = domain;
    request.visitor_id = visitor;
    let view = OutcomeRenderer::new(&flags).render(&request);

    if json {
        match serde_json::to_string_pretty(&view) {
            Ok(json) => println!("{}", json),
            Err(err) => println!("Outcome payload unavailable: {}", err),
        }
    } else {
        render_outcome(&view, &scores, request.domain.as_deref());
    }
    Ok(())
}

pub(crate) async fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        visitor,
        skip_leaderboard,
    } = args;

    let flags = AppConfig::load()?.flags;
    let analytics = MemoryAnalyticsSink::default();
    let scan_repository = Arc::new(InMemoryScanRepository::default());
    let service = ScanService::new(scan_repository.clone());
    let leads = LeadService::new(
        scan_repository,
        Arc::new(InMemoryLeadRepository::default()),
        Arc::new(LoggedReportSender),
    );
    let leaderboard = InMemoryLeaderboard::default();
    let pipeline = ScanPipeline::new(
        Arc::new(SampleScanner),
        Arc::new(SampleScreenshots),
        Arc::new(SampleBrand),
    );

    println!("Launch outcomes demo");
    for url in SAMPLE_SITES {
        println!("\nScanning {}", url);
        let scan = match service.scan_with(url, &pipeline).await {
            Ok(scan) => scan,
            Err(err) => {
                println!("  Scan rejected: {}", err);
                continue;
            }
        };
        let status = scan.status();
        println!(
            "- {} -> {} ({}% done)",
            scan.id,
            status.key(),
            status.progress()
        );
        if let Some(brand) = &scan.brand {
            if let Some(name) = &brand.business_name {
                println!("  Brand: {}", name);
            }
        }

        let Some(desktop) = scan.desktop.as_ref() else {
            println!("  No desktop scores yet; outcome withheld");
            continue;
        };

        let mut request = RenderRequest::new(desktop.scores);
        request.domain = scan.domain.clone();
        request.visitor_id = visitor.clone();
        let view = OutcomeRenderer::new(&flags).render(&request);
        record_view(&analytics, &view);
        render_outcome(&view, &desktop.scores, scan.domain.as_deref());

        let report_request = LeadSubmission {
            first_name: Some("Demo".to_string()),
            last_name: Some("Owner".to_string()),
            email: scan.domain.as_ref().map(|domain| format!("owner@{domain}")),
            scan_id: Some(scan.id.clone()),
            ..LeadSubmission::default()
        };
        match leads.capture(report_request).await {
            Ok(lead) => {
                record(
                    &analytics,
                    AnalyticsEvent::ReportRequested,
                    &view.analytics,
                    [("lead_id", json!(lead.id))],
                );
                match &lead.report_url {
                    Some(location) => {
                        println!("  Report: emailed to {} ({})", lead.email, location)
                    }
                    None => println!("  Report: requested by {}, not sent", lead.email),
                }
            }
            Err(err) => println!("  Report request rejected: {}", err),
        }

        if skip_leaderboard || !view.leaderboard_eligible {
            continue;
        }
        let submission = LeaderboardSubmission {
            domain: scan.domain.clone(),
            score: Some(i64::from(view.overall_score.value())),
            badge: Some(view.badge),
            industry: view.personalization.industry_hint().map(str::to_string),
            email: None,
        };
        let entry = match submission.validate(Utc::now()) {
            Ok(entry) => entry,
            Err(err) => {
                println!("  Leaderboard: {}", err);
                continue;
            }
        };
        match leaderboard.insert(entry) {
            Ok(entry) => {
                record(
                    &analytics,
                    AnalyticsEvent::LeaderboardOptedIn,
                    &view.analytics,
                    [("entry_id", json!(entry.id))],
                );
                println!("  Leaderboard: submitted as {} ({:?})", entry.id, entry.status);
            }
            Err(err) => println!("  Leaderboard unavailable: {}", err),
        }
    }

    if !skip_leaderboard {
        match leaderboard.entries() {
            Ok(entries) => render_standings(&LeaderboardStandings::from_entries(&entries)),
            Err(err) => println!("\nLeaderboard unavailable: {}", err),
        }
    }

    let events = analytics.events();
    if events.is_empty() {
        println!("\nAnalytics: no events captured");
    } else {
        println!("\nAnalytics events captured:");
        for (event, properties) in events {
            println!(
                "  - {} {}",
                event.name(),
                serde_json::Value::Object(properties)
            );
        }
    }

    Ok(())
}

fn record_view(sink: &dyn AnalyticsSink, view: &OutcomePresentation) {
    record(
        sink,
        AnalyticsEvent::OutcomeViewed,
        &view.analytics,
        [("cta_variant", json!(view.experiments.cta_text.key()))],
    );
    if view.confetti {
        record(
            sink,
            AnalyticsEvent::ConfettiTriggered,
            &view.analytics,
            std::iter::empty(),
        );
    }
}

fn render_outcome(view: &OutcomePresentation, scores: &ScoreSet, domain: Option<&str>) {
    println!("  {} {}", view.icon, view.title);
    println!("  {}", view.subtitle);
    println!(
        "  Overall {} | tier {} | badge {} | weighted {}",
        view.overall_score, view.tier, view.badge, view.analytics_score
    );
    for bullet in &view.bullets {
        println!("    * {}", bullet);
    }
    if let Some(hint) = view.personalization.industry_hint() {
        println!("  Personalized for {} sites", hint);
    }
    println!(
        "  Primary: {} [{}] | Secondary: {} [{}]",
        view.primary_cta.text,
        view.primary_cta.action.key(),
        view.secondary_cta.text,
        view.secondary_cta.action.key()
    );
    if let Some(incentive) = view.incentive {
        println!("  Incentive: {}", incentive);
    }
    if view.experiments.bucketed {
        println!(
            "  Experiments: cta={} animation={}",
            view.experiments.cta_text.key(),
            view.experiments.badge_animation.key()
        );
    }

    if !view.quick_wins.is_empty() {
        println!("  Quick wins:");
        for win in &view.quick_wins {
            println!(
                "    - [{}] {} ({}, {:?} impact)",
                win.category_label, win.title, win.estimated_time, win.impact
            );
        }
        println!(
            "    Guide: {}",
            quick_win_guide_url(view.quick_wins[0].category.key())
        );
    }

    println!(
        "  Book a call: {}",
        calendar_url(view.tier, domain, Some(scores))
    );
    println!(
        "  Report subject: {}",
        report_email_subject(domain, Some(view.tier))
    );
    if view.share_enabled {
        if let Some(share) = badge_share_data(view.badge, SHARE_ORIGIN, domain) {
            for platform in [SocialPlatform::Linkedin, SocialPlatform::Facebook] {
                println!(
                    "  Share on {:?}: {}",
                    platform,
                    social_share_url(platform, &share)
                );
            }
        }
    }
}

fn render_standings(standings: &LeaderboardStandings) {
    println!(
        "\nLeaderboard: {} sites | average score {}",
        standings.total_sites, standings.average_score
    );
    for (rank, row) in standings.top_performers.iter().enumerate() {
        println!(
            "  {}. {} {} ({}, {})",
            rank + 1,
            row.domain,
            row.score,
            row.badge,
            row.industry
        );
    }
    let distribution = &standings.distribution;
    println!(
        "  Badges: platinum {} | gold {} | silver {} | bronze {}",
        distribution.platinum, distribution.gold, distribution.silver, distribution.bronze
    );
}

fn sample_scores(domain: &str) -> Option<ScoreSet> {
    match domain {
        "quickbuy-store.com" => Some(ScoreSet::new(42, 71, 83, 77)),
        "launchpad-app.io" => Some(ScoreSet::new(78, 88, 92, 85)),
        "nightly-news.blog" => Some(ScoreSet::new(96, 99, 100, 98)),
        _ => None,
    }
}

/// Canned measurements for the sample sites; anything else is "unreachable".
struct SampleScanner;

impl PerformanceScanner for SampleScanner {
    fn scan(&self, url: &str, device: DeviceClass) -> Result<DeviceScan, CollaboratorError> {
        let scores = domain_of(url)
            .as_deref()
            .and_then(sample_scores)
            .ok_or_else(|| CollaboratorError::Unavailable(format!("{url} did not respond")))?;
        let scores = match device {
            DeviceClass::Desktop => scores,
            DeviceClass::Mobile => ScoreSet {
                performance: scores.performance.saturating_sub(12),
                ..scores
            },
        };
        Ok(DeviceScan {
            scores,
            core_web_vitals: CoreWebVitals {
                lcp: "2.4 s".to_string(),
                fid: "60 ms".to_string(),
                cls: "0.05".to_string(),
                tbt: "180 ms".to_string(),
            },
            top_issues: Vec::new(),
        })
    }
}

struct SampleScreenshots;

impl ScreenshotCapturer for SampleScreenshots {
    fn capture(&self, _url: &str) -> Result<Option<String>, CollaboratorError> {
        Ok(None)
    }
}

struct SampleBrand;

impl BrandExtractor for SampleBrand {
    fn extract(&self, url: &str) -> Result<BrandElements, CollaboratorError> {
        let domain = domain_of(url)
            .ok_or_else(|| CollaboratorError::InvalidResponse("no host".to_string()))?;
        let name = domain.split('.').next().unwrap_or_default().replace('-', " ");
        Ok(BrandElements {
            business_name: Some(name),
            ..BrandElements::default()
        })
    }
}
