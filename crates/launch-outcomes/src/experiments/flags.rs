use crate::config::AppEnvironment;
use crate::outcomes::Tier;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaTextVariant {
    Default,
    Urgent,
    Benefit,
}

impl CtaTextVariant {
    pub const KEYS: [&'static str; 3] = ["default", "urgent", "benefit"];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Urgent => "urgent",
            Self::Benefit => "benefit",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "default" => Some(Self::Default),
            "urgent" => Some(Self::Urgent),
            "benefit" => Some(Self::Benefit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BadgeAnimation {
    Bounce,
    Glow,
    Pulse,
    None,
}

impl BadgeAnimation {
    pub const KEYS: [&'static str; 4] = ["bounce", "glow", "pulse", "none"];

    pub const fn key(self) -> &'static str {
        match self {
            Self::Bounce => "bounce",
            Self::Glow => "glow",
            Self::Pulse => "pulse",
            Self::None => "none",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "bounce" => Some(Self::Bounce),
            "glow" => Some(Self::Glow),
            "pulse" => Some(Self::Pulse),
            "none" => Some(Self::None),
            _ => None,
        }
    }

    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Bounce => "animate-bounce",
            Self::Glow => "animate-pulse shadow-lg",
            Self::Pulse => "animate-ping",
            Self::None => "",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncentiveDisplay {
    Always,
    Hover,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeLayout {
    Card,
    Banner,
    Sidebar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreDisplayStyle {
    Minimal,
    Detailed,
    Gauge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorTheme {
    Terminal,
    Modern,
    Brand,
}

/// Process-wide toggles and experiment defaults. Resolved once at startup and
/// shared by reference afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    pub show_confetti: bool,
    pub enable_badge_sharing: bool,
    pub show_leaderboard: bool,
    pub enable_quick_wins: bool,

    pub cta_text_variant: CtaTextVariant,
    pub incentive_display: IncentiveDisplay,
    pub badge_animation: BadgeAnimation,

    pub enable_industry_personalization: bool,
    pub show_competitor_comparison: bool,
    pub dynamic_pricing: bool,

    pub outcome_layout: OutcomeLayout,
    pub score_display_style: ScoreDisplayStyle,
    pub color_theme: ColorTheme,

    pub enable_analytics: bool,
    pub enable_email_capture: bool,
    pub show_social_proof: bool,
    pub enable_retargeting: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            show_confetti: false,
            enable_badge_sharing: true,
            show_leaderboard: true,
            enable_quick_wins: true,

            cta_text_variant: CtaTextVariant::Default,
            incentive_display: IncentiveDisplay::Always,
            badge_animation: BadgeAnimation::Glow,

            enable_industry_personalization: true,
            show_competitor_comparison: false,
            dynamic_pricing: false,

            outcome_layout: OutcomeLayout::Card,
            score_display_style: ScoreDisplayStyle::Detailed,
            color_theme: ColorTheme::Terminal,

            enable_analytics: true,
            enable_email_capture: true,
            show_social_proof: true,
            enable_retargeting: false,
        }
    }
}

impl FeatureFlags {
    /// Defaults merged with the overrides for `environment`.
    pub fn for_environment(environment: AppEnvironment) -> Self {
        let mut flags = Self::default();
        flags.apply(&FlagOverrides::for_environment(environment));
        flags
    }

    pub fn apply(&mut self, overrides: &FlagOverrides) {
        macro_rules! merge {
            ($target:expr, $source:expr; $($field:ident),* $(,)?) => {
                $(
                    if let Some(value) = $source.$field {
                        $target.$field = value;
                    }
                )*
            };
        }

        merge!(
            self,
            overrides;
            show_confetti,
            enable_badge_sharing,
            show_leaderboard,
            enable_quick_wins,
            cta_text_variant,
            incentive_display,
            badge_animation,
            enable_industry_personalization,
            show_competitor_comparison,
            dynamic_pricing,
            outcome_layout,
            score_display_style,
            color_theme,
            enable_analytics,
            enable_email_capture,
            show_social_proof,
            enable_retargeting,
        );
    }
}

/// Partial flag set layered over the defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FlagOverrides {
    pub show_confetti: Option<bool>,
    pub enable_badge_sharing: Option<bool>,
    pub show_leaderboard: Option<bool>,
    pub enable_quick_wins: Option<bool>,
    pub cta_text_variant: Option<CtaTextVariant>,
    pub incentive_display: Option<IncentiveDisplay>,
    pub badge_animation: Option<BadgeAnimation>,
    pub enable_industry_personalization: Option<bool>,
    pub show_competitor_comparison: Option<bool>,
    pub dynamic_pricing: Option<bool>,
    pub outcome_layout: Option<OutcomeLayout>,
    pub score_display_style: Option<ScoreDisplayStyle>,
    pub color_theme: Option<ColorTheme>,
    pub enable_analytics: Option<bool>,
    pub enable_email_capture: Option<bool>,
    pub show_social_proof: Option<bool>,
    pub enable_retargeting: Option<bool>,
}

impl FlagOverrides {
    pub fn for_environment(environment: AppEnvironment) -> Self {
        match environment {
            AppEnvironment::Development => Self {
                enable_analytics: Some(false),
                enable_retargeting: Some(false),
                show_leaderboard: Some(true),
                ..Self::default()
            },
            AppEnvironment::Staging => Self {
                enable_analytics: Some(true),
                enable_retargeting: Some(false),
                show_competitor_comparison: Some(true),
                ..Self::default()
            },
            AppEnvironment::Production => Self {
                enable_analytics: Some(true),
                enable_retargeting: Some(true),
                show_competitor_comparison: Some(false),
                ..Self::default()
            },
            AppEnvironment::Test => Self::default(),
        }
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }
}

/// Primary and secondary button copy for one CTA experiment arm.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CtaCopy {
    pub primary: &'static str,
    pub secondary: &'static str,
}

pub const fn cta_copy(variant: CtaTextVariant, tier: Tier) -> CtaCopy {
    let (primary, secondary) = match (variant, tier) {
        (CtaTextVariant::Default, Tier::Critical) => {
            ("Fix my site now", "Email me the rescue plan (PDF)")
        }
        (CtaTextVariant::Default, Tier::NeedsBoost) => {
            ("Apply quick wins", "Send me the full report")
        }
        (CtaTextVariant::Default, Tier::Pass) => ("Book a growth tune-up", "Share my badge"),
        (CtaTextVariant::Urgent, Tier::Critical) => {
            ("Emergency site repair", "Rush me the fix plan")
        }
        (CtaTextVariant::Urgent, Tier::NeedsBoost) => {
            ("Boost now (5 min fixes)", "Get instant improvements")
        }
        (CtaTextVariant::Urgent, Tier::Pass) => ("Maximize your edge", "Show off your badge"),
        (CtaTextVariant::Benefit, Tier::Critical) => {
            ("Recover lost visitors", "Get my recovery roadmap")
        }
        (CtaTextVariant::Benefit, Tier::NeedsBoost) => {
            ("Unlock hidden gains", "See my potential wins")
        }
        (CtaTextVariant::Benefit, Tier::Pass) => {
            ("Optimize for more growth", "Join the elite club")
        }
    };
    CtaCopy { primary, secondary }
}
