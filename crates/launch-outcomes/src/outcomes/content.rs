use super::tier::Tier;
use serde::{Deserialize, Serialize};

/// Handler a call-to-action button triggers in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CtaAction {
    OpenCalendar,
    SendReport,
    ApplyQuickWins,
    ShareBadge,
}

impl CtaAction {
    pub const fn key(self) -> &'static str {
        match self {
            Self::OpenCalendar => "openCalendar",
            Self::SendReport => "sendReport",
            Self::ApplyQuickWins => "applyQuickWins",
            Self::ShareBadge => "shareBadge",
        }
    }
}

/// Visual style of a call-to-action button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CtaStyle {
    Default,
    Destructive,
    Outline,
    Secondary,
    Ghost,
    Link,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CallToAction {
    pub text: &'static str,
    pub action: CtaAction,
    pub style: CtaStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeTheme {
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
}

/// Static copy and styling for one tier.
#[derive(Debug, PartialEq, Eq, Serialize)]
pub struct OutcomeContent {
    pub tier: Tier,
    pub icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub bullets: [&'static str; 3],
    pub primary_cta: CallToAction,
    pub secondary_cta: CallToAction,
    pub incentive: &'static str,
    pub confetti: bool,
    pub gradient: &'static str,
    pub theme: OutcomeTheme,
}

static CRITICAL: OutcomeContent = OutcomeContent {
    tier: Tier::Critical,
    icon: "alert-triangle",
    title: "🚨 Grounded: Your site isn't flight-ready.",
    subtitle: "Pages are loading slowly and key best practices are missing.",
    bullets: [
        "Heavy or unoptimized images slowing page loads",
        "Render-blocking JavaScript and CSS",
        "Missing caching strategies and CDN optimization",
    ],
    primary_cta: CallToAction {
        text: "Fix my site now",
        action: CtaAction::OpenCalendar,
        style: CtaStyle::Destructive,
    },
    secondary_cta: CallToAction {
        text: "Email me the rescue plan (PDF)",
        action: CtaAction::SendReport,
        style: CtaStyle::Outline,
    },
    incentive: "Free quick-fix checklist included",
    confetti: false,
    gradient: "from-red-500 to-orange-600",
    theme: OutcomeTheme {
        primary: "text-red-400",
        secondary: "text-red-300",
        accent: "text-orange-400",
        background: "bg-red-950/20 border-red-800/30",
    },
};

static NEEDS_BOOST: OutcomeContent = OutcomeContent {
    tier: Tier::NeedsBoost,
    icon: "wrench",
    title: "⚙️ Almost There: A few tweaks = big wins.",
    subtitle: "We found optimization opportunities that could lift conversions.",
    bullets: [
        "Preload key fonts for faster text rendering",
        "Defer non-critical JavaScript execution",
        "Compress and optimize hero images",
    ],
    primary_cta: CallToAction {
        text: "Apply quick wins",
        action: CtaAction::ApplyQuickWins,
        style: CtaStyle::Default,
    },
    secondary_cta: CallToAction {
        text: "Send me the full report",
        action: CtaAction::SendReport,
        style: CtaStyle::Outline,
    },
    incentive: "Mini win-plan delivered via email",
    confetti: false,
    gradient: "from-yellow-500 to-amber-600",
    theme: OutcomeTheme {
        primary: "text-yellow-400",
        secondary: "text-yellow-300",
        accent: "text-amber-400",
        background: "bg-yellow-950/20 border-yellow-800/30",
    },
};

static PASS: OutcomeContent = OutcomeContent {
    tier: Tier::Pass,
    icon: "rocket",
    title: "🚀 Ready for Lift-Off!",
    subtitle: "You're in the top tier. Want to squeeze out that last 1–2s?",
    bullets: [
        "Maintain performance with weekly automated checks",
        "Fine-tune LCP and CLS for perfect scores",
        "A/B test hero sections for maximum impact",
    ],
    primary_cta: CallToAction {
        text: "Book a growth tune-up",
        action: CtaAction::OpenCalendar,
        style: CtaStyle::Default,
    },
    secondary_cta: CallToAction {
        text: "Share my badge",
        action: CtaAction::ShareBadge,
        style: CtaStyle::Outline,
    },
    incentive: "Leaderboard placement (opt-in available)",
    confetti: true,
    gradient: "from-green-500 to-emerald-600",
    theme: OutcomeTheme {
        primary: "text-green-400",
        secondary: "text-green-300",
        accent: "text-emerald-400",
        background: "bg-green-950/20 border-green-800/30",
    },
};

/// Content bundle for a tier. The table is static; callers only ever get a shared view.
pub fn resolve_outcome(tier: Tier) -> &'static OutcomeContent {
    match tier {
        Tier::Critical => &CRITICAL,
        Tier::NeedsBoost => &NEEDS_BOOST,
        Tier::Pass => &PASS,
    }
}
