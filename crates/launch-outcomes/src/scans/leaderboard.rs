use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

use super::domain::canonical_domain;
use crate::outcomes::{Badge, OverallScore, LEADERBOARD_MIN_SCORE, MAX_CATEGORY_SCORE};

/// How many entries the public board shows.
pub const TOP_PERFORMERS: usize = 5;

static ENTRY_SEQUENCE: AtomicU64 = AtomicU64::new(1);

/// Opt-in request from the outcome panel. Fields stay loose so that missing or
/// out-of-range values produce a readable rejection instead of a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LeaderboardSubmission {
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub score: Option<i64>,
    #[serde(default)]
    pub badge: Option<Badge>,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    PendingVerification,
    Verified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    pub id: String,
    pub domain: String,
    pub score: OverallScore,
    pub badge: Badge,
    pub industry: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub submitted_at: DateTime<Utc>,
    pub status: EntryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LeaderboardError {
    #[error("Domain, score, and badge are required")]
    MissingFields,
    #[error("Score must be between 0 and 100")]
    ScoreOutOfRange(i64),
    #[error("Only sites with scores of {minimum} or higher can join the leaderboard")]
    BelowMinimum { score: u8, minimum: u8 },
    #[error("badge {submitted} does not match score {score} (expected {expected})")]
    BadgeMismatch {
        score: u8,
        submitted: Badge,
        expected: Badge,
    },
}

impl LeaderboardError {
    /// Missing or out-of-scale input, as opposed to a submission the board refuses.
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MissingFields | Self::ScoreOutOfRange(_))
    }
}

impl LeaderboardSubmission {
    /// Gate a submission: required fields, score range, the minimum score, and a
    /// badge that agrees with the score band.
    pub fn validate(self, submitted_at: DateTime<Utc>) -> Result<LeaderboardEntry, LeaderboardError> {
        let domain = self.domain.as_deref().and_then(canonical_domain);
        let (Some(domain), Some(score), Some(badge)) = (domain, self.score, self.badge) else {
            return Err(LeaderboardError::MissingFields);
        };

        if !(0..=i64::from(MAX_CATEGORY_SCORE)).contains(&score) {
            return Err(LeaderboardError::ScoreOutOfRange(score));
        }
        let score = OverallScore(score as u8);

        if score.value() < LEADERBOARD_MIN_SCORE {
            return Err(LeaderboardError::BelowMinimum {
                score: score.value(),
                minimum: LEADERBOARD_MIN_SCORE,
            });
        }

        let expected = Badge::for_score(score);
        if badge != expected {
            return Err(LeaderboardError::BadgeMismatch {
                score: score.value(),
                submitted: badge,
                expected,
            });
        }

        let id = ENTRY_SEQUENCE.fetch_add(1, Ordering::Relaxed);
        Ok(LeaderboardEntry {
            id: format!("lb-{id:06}"),
            domain,
            score,
            badge,
            industry: self
                .industry
                .filter(|industry| !industry.trim().is_empty())
                .unwrap_or_else(|| "other".to_string()),
            email: self.email,
            submitted_at,
            status: EntryStatus::PendingVerification,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardRow {
    pub domain: String,
    pub score: OverallScore,
    pub badge: Badge,
    pub industry: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BadgeDistribution {
    pub platinum: usize,
    pub gold: usize,
    pub silver: usize,
    pub bronze: usize,
    pub none: usize,
}

impl BadgeDistribution {
    fn count(&mut self, badge: Badge) {
        match badge {
            Badge::Platinum => self.platinum += 1,
            Badge::Gold => self.gold += 1,
            Badge::Silver => self.silver += 1,
            Badge::Bronze => self.bronze += 1,
            Badge::None => self.none += 1,
        }
    }
}

/// Public summary of the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardStandings {
    pub total_sites: usize,
    pub top_performers: Vec<LeaderboardRow>,
    pub average_score: u8,
    pub distribution: BadgeDistribution,
}

impl LeaderboardStandings {
    pub fn from_entries(entries: &[LeaderboardEntry]) -> Self {
        let mut distribution = BadgeDistribution::default();
        let mut total: u64 = 0;
        for entry in entries {
            distribution.count(entry.badge);
            total += u64::from(entry.score.value());
        }

        let average_score = if entries.is_empty() {
            0
        } else {
            let count = entries.len() as u64;
            ((total * 2 + count) / (count * 2)) as u8
        };

        let mut ranked: Vec<&LeaderboardEntry> = entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| a.submitted_at.cmp(&b.submitted_at))
        });

        let top_performers = ranked
            .into_iter()
            .take(TOP_PERFORMERS)
            .map(|entry| LeaderboardRow {
                domain: entry.domain.clone(),
                score: entry.score,
                badge: entry.badge,
                industry: entry.industry.clone(),
            })
            .collect();

        Self {
            total_sites: entries.len(),
            top_performers,
            average_score,
            distribution,
        }
    }
}
