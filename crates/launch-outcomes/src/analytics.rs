//! Analytics events built from the stable outcome bundle.

use crate::experiments::FeatureFlags;
use crate::outcomes::{Badge, OverallScore, Tier};
use serde::Serialize;
use serde_json::{Map, Value};
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalyticsEvent {
    OutcomeViewed,
    CtaClicked,
    BadgeShared,
    QuickWinsOpened,
    ReportRequested,
    CalendarOpened,
    ConfettiTriggered,
    LeaderboardOptedIn,
}

impl AnalyticsEvent {
    pub const fn name(self) -> &'static str {
        match self {
            Self::OutcomeViewed => "outcome_viewed",
            Self::CtaClicked => "cta_clicked",
            Self::BadgeShared => "badge_shared",
            Self::QuickWinsOpened => "quick_wins_opened",
            Self::ReportRequested => "report_requested",
            Self::CalendarOpened => "calendar_opened",
            Self::ConfettiTriggered => "confetti_triggered",
            Self::LeaderboardOptedIn => "leaderboard_opted_in",
        }
    }
}

/// The four outcome fields every analytics event carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyticsBundle {
    pub tier: Tier,
    pub overall_score: OverallScore,
    pub badge: Badge,
    pub domain: Option<String>,
}

impl AnalyticsBundle {
    pub fn properties(&self) -> Map<String, Value> {
        let mut properties = Map::new();
        properties.insert("tier".into(), Value::from(self.tier.key()));
        properties.insert(
            "overall_score".into(),
            Value::from(self.overall_score.value()),
        );
        properties.insert("badge".into(), Value::from(self.badge.key()));
        properties.insert(
            "domain".into(),
            Value::from(self.domain.as_deref().unwrap_or("unknown")),
        );
        properties
    }
}

/// Destination for analytics events (Plausible, GA4, a log line...).
pub trait AnalyticsSink: Send + Sync {
    fn track(&self, event: AnalyticsEvent, properties: Map<String, Value>);
}

/// Emit `event` with the bundle's properties plus any extras.
pub fn record(
    sink: &dyn AnalyticsSink,
    event: AnalyticsEvent,
    bundle: &AnalyticsBundle,
    extra: impl IntoIterator<Item = (&'static str, Value)>,
) {
    let mut properties = bundle.properties();
    for (key, value) in extra {
        properties.insert(key.to_string(), value);
    }
    sink.track(event, properties);
}

/// Writes events to the tracing subscriber when analytics are enabled.
#[derive(Debug, Clone)]
pub struct TracingAnalyticsSink {
    enabled: bool,
}

impl TracingAnalyticsSink {
    pub fn new(flags: &FeatureFlags) -> Self {
        Self {
            enabled: flags.enable_analytics,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl AnalyticsSink for TracingAnalyticsSink {
    fn track(&self, event: AnalyticsEvent, properties: Map<String, Value>) {
        if !self.enabled {
            debug!(event = event.name(), "analytics disabled, dropping event");
            return;
        }
        let properties = Value::Object(properties);
        info!(event = event.name(), %properties, "analytics event");
    }
}

/// Keeps events in memory; used by the CLI demo and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryAnalyticsSink {
    events: Arc<Mutex<Vec<(AnalyticsEvent, Map<String, Value>)>>>,
}

impl MemoryAnalyticsSink {
    pub fn events(&self) -> Vec<(AnalyticsEvent, Map<String, Value>)> {
        self.events
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl AnalyticsSink for MemoryAnalyticsSink {
    fn track(&self, event: AnalyticsEvent, properties: Map<String, Value>) {
        if let Ok(mut guard) = self.events.lock() {
            guard.push((event, properties));
        }
    }
}
