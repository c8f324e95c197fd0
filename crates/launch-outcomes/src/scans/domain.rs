use crate::outcomes::{evaluate, Badge, OverallScore, ScoreSet, Tier};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScanId(pub String);

static SCAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

impl ScanId {
    pub fn next() -> Self {
        let id = SCAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Self(format!("scan-{id:06}"))
    }
}

impl fmt::Display for ScanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Desktop,
    Mobile,
}

impl DeviceClass {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Desktop => "desktop",
            Self::Mobile => "mobile",
        }
    }
}

/// Core Web Vitals as display strings (e.g. `"2.1 s"`), exactly as measured.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoreWebVitals {
    pub lcp: String,
    pub fid: String,
    pub cls: String,
    pub tbt: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueSeverity {
    Critical,
    Important,
    Minor,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub severity: IssueSeverity,
}

/// Measurements for one device class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceScan {
    pub scores: ScoreSet,
    #[serde(default)]
    pub core_web_vitals: CoreWebVitals,
    #[serde(default)]
    pub top_issues: Vec<Issue>,
}

/// Best-effort brand details scraped from the page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrandElements {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub business_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tagline: Option<String>,
}

/// Whatever the collaborators managed to produce. Every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResults {
    #[serde(default)]
    pub desktop: Option<DeviceScan>,
    #[serde(default)]
    pub mobile: Option<DeviceScan>,
    #[serde(default)]
    pub screenshot: Option<String>,
    #[serde(default)]
    pub brand: Option<BrandElements>,
}

/// Scan request carrying results measured elsewhere.
#[derive(Debug, Clone, Deserialize)]
pub struct ScanSubmission {
    pub url: String,
    #[serde(flatten)]
    pub results: ScanResults,
}

/// Outcome captured when a scan completes, for reports and the leaderboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutcomeSnapshot {
    pub overall_score: OverallScore,
    pub tier: Tier,
    pub badge: Badge,
}

impl OutcomeSnapshot {
    pub fn capture(scores: &ScoreSet) -> Self {
        let evaluation = evaluate(scores);
        Self {
            overall_score: evaluation.overall_score,
            tier: evaluation.tier,
            badge: evaluation.badge,
        }
    }

    /// The stored copy must always match a fresh computation.
    pub fn agrees_with(&self, scores: &ScoreSet) -> bool {
        *self == Self::capture(scores)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScanStatus {
    Running,
    Complete,
}

impl ScanStatus {
    pub const fn key(self) -> &'static str {
        match self {
            Self::Running => "running",
            Self::Complete => "complete",
        }
    }

    pub const fn progress(self) -> u8 {
        match self {
            Self::Running => 75,
            Self::Complete => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub id: ScanId,
    pub url: String,
    pub domain: Option<String>,
    pub desktop: Option<DeviceScan>,
    pub mobile: Option<DeviceScan>,
    pub screenshot: Option<String>,
    pub brand: Option<BrandElements>,
    pub snapshot: Option<OutcomeSnapshot>,
    pub created_at: DateTime<Utc>,
}

impl ScanRecord {
    pub fn new(url: String, created_at: DateTime<Utc>) -> Self {
        let domain = domain_of(&url);
        Self {
            id: ScanId::next(),
            url,
            domain,
            desktop: None,
            mobile: None,
            screenshot: None,
            brand: None,
            snapshot: None,
            created_at,
        }
    }

    /// Desktop scores decide completion; mobile is a bonus.
    pub fn status(&self) -> ScanStatus {
        if self.desktop.is_some() {
            ScanStatus::Complete
        } else {
            ScanStatus::Running
        }
    }

    pub fn scores(&self, device: DeviceClass) -> Option<&ScoreSet> {
        match device {
            DeviceClass::Desktop => self.desktop.as_ref().map(|scan| &scan.scores),
            DeviceClass::Mobile => self.mobile.as_ref().map(|scan| &scan.scores),
        }
    }

    pub(crate) fn absorb(&mut self, results: ScanResults) {
        let ScanResults {
            desktop,
            mobile,
            screenshot,
            brand,
        } = results;
        if desktop.is_some() {
            self.desktop = desktop;
        }
        if mobile.is_some() {
            self.mobile = mobile;
        }
        if screenshot.is_some() {
            self.screenshot = screenshot;
        }
        if brand.is_some() {
            self.brand = brand;
        }
        self.snapshot = self
            .desktop
            .as_ref()
            .map(|scan| OutcomeSnapshot::capture(&scan.scores));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ScanUrlError {
    #[error("URL is required")]
    Missing,
    #[error("Invalid URL format")]
    InvalidFormat,
}

fn split_scheme(url: &str) -> Option<&str> {
    let (scheme, rest) = url.split_once("://")?;
    if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        Some(rest)
    } else {
        None
    }
}

fn host_of(rest: &str) -> &str {
    let authority = rest.split(['/', '?', '#']).next().unwrap_or_default();
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    // IPv6 literals keep their colons inside the brackets.
    if let Some(literal) = host.strip_prefix('[') {
        return literal.split_once(']').map_or("", |(address, _)| address);
    }
    host.split(':').next().unwrap_or_default()
}

/// Accept only absolute http(s) URLs with a host.
pub fn normalize_url(raw: &str) -> Result<String, ScanUrlError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScanUrlError::Missing);
    }
    let rest = split_scheme(trimmed).ok_or(ScanUrlError::InvalidFormat)?;
    let host = host_of(rest);
    if host.is_empty() || trimmed.chars().any(char::is_whitespace) {
        return Err(ScanUrlError::InvalidFormat);
    }
    Ok(trimmed.to_string())
}

/// Lowercased host without port or a leading `www.`.
pub fn domain_of(url: &str) -> Option<String> {
    let host = host_of(split_scheme(url.trim())?).to_ascii_lowercase();
    let host = host.strip_prefix("www.").map(str::to_string).unwrap_or(host);
    if host.is_empty() {
        None
    } else {
        Some(host)
    }
}

/// Canonical site name for a URL or a bare domain such as `www.Foo.com/`.
pub fn canonical_domain(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.contains("://") {
        domain_of(raw)
    } else {
        domain_of(&format!("https://{raw}"))
    }
}
