//! Feature flags and sticky A/B variant assignment.

mod flags;
mod variant;

pub use flags::{
    cta_copy, BadgeAnimation, ColorTheme, CtaCopy, CtaTextVariant, FeatureFlags, FlagOverrides,
    IncentiveDisplay, OutcomeLayout, ScoreDisplayStyle,
};
pub use variant::{assign_variant, bucket_index, variant_hash};

use serde::Serialize;

pub const CTA_TEXT_FLAG: &str = "ctaTextVariant";
pub const BADGE_ANIMATION_FLAG: &str = "badgeAnimation";

/// Experiment arms selected for one visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ExperimentAssignment {
    pub cta_text: CtaTextVariant,
    pub badge_animation: BadgeAnimation,
    pub bucketed: bool,
}

fn salted(flag: &str, visitor_id: &str) -> String {
    format!("{flag}:{visitor_id}")
}

/// Resolve every experiment for a visitor. Each flag hashes the identifier with its
/// own salt, so one visitor can land in differently numbered arms per experiment.
/// Without an identifier the configured flag values apply.
pub fn assign_experiments(flags: &FeatureFlags, visitor_id: Option<&str>) -> ExperimentAssignment {
    let Some(visitor_id) = visitor_id.filter(|id| !id.trim().is_empty()) else {
        return ExperimentAssignment {
            cta_text: flags.cta_text_variant,
            badge_animation: flags.badge_animation,
            bucketed: false,
        };
    };

    let cta_text = CtaTextVariant::from_key(assign_variant(
        &salted(CTA_TEXT_FLAG, visitor_id),
        &CtaTextVariant::KEYS,
    ))
    .unwrap_or(flags.cta_text_variant);

    let badge_animation = BadgeAnimation::from_key(assign_variant(
        &salted(BADGE_ANIMATION_FLAG, visitor_id),
        &BadgeAnimation::KEYS,
    ))
    .unwrap_or(flags.badge_animation);

    ExperimentAssignment {
        cta_text,
        badge_animation,
        bucketed: true,
    }
}
