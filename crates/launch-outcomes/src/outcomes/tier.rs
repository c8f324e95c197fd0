use super::scores::ScoreSet;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Overall score below this is always critical.
pub const CRITICAL_OVERALL_THRESHOLD: u8 = 60;
/// Any single category below this forces a critical outcome.
pub const CATEGORY_FLOOR: u8 = 50;
/// Overall score at or above this passes.
pub const PASS_THRESHOLD: u8 = 90;

/// Qualitative outcome bucket shown to the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    Critical,
    NeedsBoost,
    Pass,
}

impl Tier {
    pub const fn ordered() -> [Self; 3] {
        [Self::Critical, Self::NeedsBoost, Self::Pass]
    }

    pub const fn key(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::NeedsBoost => "needs_boost",
            Self::Pass => "pass",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::NeedsBoost => "Needs Boost",
            Self::Pass => "Pass",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Classify a score set. The category floor is checked before the pass threshold,
/// so one failing category is critical no matter how strong the others are.
pub fn classify(scores: &ScoreSet) -> Tier {
    let overall = scores.overall().value();

    if overall < CRITICAL_OVERALL_THRESHOLD
        || scores.values().iter().any(|score| *score < CATEGORY_FLOOR)
    {
        return Tier::Critical;
    }

    if overall >= PASS_THRESHOLD {
        return Tier::Pass;
    }

    Tier::NeedsBoost
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_failing_category_is_critical() {
        assert_eq!(classify(&ScoreSet::new(100, 100, 100, 10)), Tier::Critical);
        assert_eq!(classify(&ScoreSet::new(49, 100, 100, 100)), Tier::Critical);
    }

    #[test]
    fn low_overall_is_critical() {
        assert_eq!(classify(&ScoreSet::new(55, 55, 60, 65)), Tier::Critical);
    }

    #[test]
    fn boundaries_split_needs_boost_and_pass() {
        assert_eq!(classify(&ScoreSet::uniform(60)), Tier::NeedsBoost);
        assert_eq!(classify(&ScoreSet::uniform(89)), Tier::NeedsBoost);
        assert_eq!(classify(&ScoreSet::uniform(90)), Tier::Pass);
        assert_eq!(classify(&ScoreSet::new(59, 100, 100, 100)), Tier::Pass);
    }

    #[test]
    fn floor_is_inclusive_at_fifty() {
        assert_eq!(classify(&ScoreSet::new(50, 100, 100, 100)), Tier::NeedsBoost);
    }

    #[test]
    fn tiers_serialize_as_snake_case() {
        let json = serde_json::to_string(&Tier::NeedsBoost).expect("serializes");
        assert_eq!(json, "\"needs_boost\"");
        assert_eq!(Tier::NeedsBoost.to_string(), "needs_boost");
    }
}
