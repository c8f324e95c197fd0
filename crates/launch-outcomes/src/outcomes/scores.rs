use serde::{Deserialize, Serialize};
use std::fmt;

/// Highest value any category score may take.
pub const MAX_CATEGORY_SCORE: u8 = 100;

/// The four audit categories reported for every device class of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Performance,
    Accessibility,
    BestPractices,
    Seo,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Performance,
            Self::Accessibility,
            Self::BestPractices,
            Self::Seo,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Performance => "Performance",
            Self::Accessibility => "Accessibility",
            Self::BestPractices => "Best Practices",
            Self::Seo => "SEO",
        }
    }

    /// Stable key used in analytics properties and query strings.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Performance => "performance",
            Self::Accessibility => "accessibility",
            Self::BestPractices => "bestPractices",
            Self::Seo => "seo",
        }
    }
}

/// Category scores for one device class of one scan.
///
/// Every field is expected to lie in `0..=100`. The scoring functions trust that
/// precondition; producers validate with [`ScoreSet::validate`] at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSet {
    pub performance: u8,
    pub accessibility: u8,
    pub best_practices: u8,
    pub seo: u8,
}

impl ScoreSet {
    pub const fn new(performance: u8, accessibility: u8, best_practices: u8, seo: u8) -> Self {
        Self {
            performance,
            accessibility,
            best_practices,
            seo,
        }
    }

    /// All four categories set to the same value.
    pub const fn uniform(score: u8) -> Self {
        Self::new(score, score, score, score)
    }

    pub const fn get(&self, category: Category) -> u8 {
        match category {
            Category::Performance => self.performance,
            Category::Accessibility => self.accessibility,
            Category::BestPractices => self.best_practices,
            Category::Seo => self.seo,
        }
    }

    /// Scores in [`Category::ordered`] order.
    pub const fn values(&self) -> [u8; 4] {
        [
            self.performance,
            self.accessibility,
            self.best_practices,
            self.seo,
        ]
    }

    pub fn overall(&self) -> OverallScore {
        aggregate(self)
    }

    /// Weighted figure reported to analytics providers.
    ///
    /// Not interchangeable with [`ScoreSet::overall`]: tiers and badges are always
    /// derived from the unweighted mean.
    pub fn analytics_score(&self) -> u8 {
        let weighted = u32::from(self.performance) * 30
            + u32::from(self.seo) * 30
            + u32::from(self.accessibility) * 25
            + u32::from(self.best_practices) * 15;
        ((weighted + 50) / 100) as u8
    }

    /// Category with the lowest score; ties keep the earlier category.
    pub fn lowest_category(&self) -> Category {
        let mut lowest = Category::Performance;
        for category in Category::ordered() {
            if self.get(category) < self.get(lowest) {
                lowest = category;
            }
        }
        lowest
    }

    pub fn validate(&self) -> Result<(), ScoreRangeError> {
        for category in Category::ordered() {
            let value = self.get(category);
            if value > MAX_CATEGORY_SCORE {
                return Err(ScoreRangeError { category, value });
            }
        }
        Ok(())
    }
}

/// Category score outside of `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("{} score {value} is outside 0..=100", .category.label())]
pub struct ScoreRangeError {
    pub category: Category,
    pub value: u8,
}

/// Single 0-100 summary of a [`ScoreSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OverallScore(pub u8);

impl OverallScore {
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl fmt::Display for OverallScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<OverallScore> for u8 {
    fn from(value: OverallScore) -> Self {
        value.0
    }
}

/// Unweighted mean of the four categories, rounded half-up.
pub fn aggregate(scores: &ScoreSet) -> OverallScore {
    let sum: u16 = scores.values().iter().map(|value| u16::from(*value)).sum();
    OverallScore(((sum + 2) / 4) as u8)
}
