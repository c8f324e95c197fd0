use super::scores::{OverallScore, ScoreSet};
use super::tier::Tier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reward level shown for non-critical outcomes. Variants are ordered from lowest
/// to highest so badges compare naturally.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Badge {
    #[default]
    None,
    Bronze,
    Silver,
    Gold,
    Platinum,
}

/// Inclusive score band backing a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BadgeRange {
    pub min: u8,
    pub max: u8,
}

impl BadgeRange {
    pub const fn contains(self, score: OverallScore) -> bool {
        score.0 >= self.min && score.0 <= self.max
    }
}

impl Badge {
    /// Awarded badges, lowest first.
    pub const fn awarded() -> [Self; 4] {
        [Self::Bronze, Self::Silver, Self::Gold, Self::Platinum]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::None => "No Badge",
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    pub const fn is_awarded(self) -> bool {
        !matches!(self, Self::None)
    }

    pub const fn range(self) -> Option<BadgeRange> {
        match self {
            Self::None => None,
            Self::Bronze => Some(BadgeRange { min: 60, max: 74 }),
            Self::Silver => Some(BadgeRange { min: 75, max: 89 }),
            Self::Gold => Some(BadgeRange { min: 90, max: 97 }),
            Self::Platinum => Some(BadgeRange { min: 98, max: 100 }),
        }
    }

    /// Badge band for an overall score, ignoring tier.
    pub fn for_score(score: OverallScore) -> Self {
        Self::awarded()
            .into_iter()
            .rev()
            .find(|badge| badge.range().is_some_and(|range| score.0 >= range.min))
            .unwrap_or(Self::None)
    }
}

impl fmt::Display for Badge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Badges are never shown for critical outcomes; otherwise the score band decides.
pub fn evaluate_badge(scores: &ScoreSet, tier: Tier) -> Badge {
    if tier == Tier::Critical {
        return Badge::None;
    }

    Badge::for_score(scores.overall())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcomes::tier::classify;

    fn badge_for(scores: ScoreSet) -> Badge {
        evaluate_badge(&scores, classify(&scores))
    }

    #[test]
    fn literal_boundaries() {
        assert_eq!(badge_for(ScoreSet::uniform(90)), Badge::Gold);
        assert_eq!(badge_for(ScoreSet::uniform(98)), Badge::Platinum);
        assert_eq!(badge_for(ScoreSet::uniform(97)), Badge::Gold);
        assert_eq!(badge_for(ScoreSet::uniform(75)), Badge::Silver);
        assert_eq!(badge_for(ScoreSet::uniform(74)), Badge::Bronze);
        assert_eq!(badge_for(ScoreSet::uniform(60)), Badge::Bronze);
    }

    #[test]
    fn critical_tier_never_earns_a_badge() {
        let scores = ScoreSet::new(49, 100, 100, 100);
        assert_eq!(scores.overall(), OverallScore(87));
        assert_eq!(badge_for(scores), Badge::None);
        assert_eq!(evaluate_badge(&ScoreSet::uniform(100), Tier::Critical), Badge::None);
    }

    #[test]
    fn for_score_matches_ranges() {
        for value in 0..=100u8 {
            let score = OverallScore(value);
            let badge = Badge::for_score(score);
            match badge.range() {
                Some(range) => assert!(range.contains(score), "{value} outside {badge}"),
                None => assert!(value < 60),
            }
        }
    }

    #[test]
    fn badges_order_from_none_to_platinum() {
        assert!(Badge::None < Badge::Bronze);
        assert!(Badge::Gold < Badge::Platinum);
        assert_eq!(
            serde_json::to_string(&Badge::Platinum).expect("serializes"),
            "\"platinum\""
        );
    }
}
