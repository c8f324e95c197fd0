use super::badge::{evaluate_badge, Badge};
use super::content::{resolve_outcome, CallToAction, CtaAction, CtaStyle, OutcomeTheme};
use super::personalization::{personalize, Personalization};
use super::quick_wins::{generate_quick_wins, QuickWin};
use super::scores::{OverallScore, ScoreSet};
use super::tier::{classify, Tier};
use crate::analytics::AnalyticsBundle;
use crate::experiments::{
    assign_experiments, cta_copy, BadgeAnimation, CtaTextVariant, ExperimentAssignment,
    FeatureFlags, IncentiveDisplay,
};
use serde::{Deserialize, Serialize};

/// Minimum overall score accepted on the public leaderboard.
pub const LEADERBOARD_MIN_SCORE: u8 = 90;

/// Derived classification for one score set. Always recomputed, never stored as truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OutcomeEvaluation {
    pub scores: ScoreSet,
    pub overall_score: OverallScore,
    pub tier: Tier,
    pub badge: Badge,
}

impl OutcomeEvaluation {
    pub fn analytics_bundle(&self, domain: Option<&str>) -> AnalyticsBundle {
        AnalyticsBundle {
            tier: self.tier,
            overall_score: self.overall_score,
            badge: self.badge,
            domain: domain.map(str::to_string),
        }
    }
}

pub fn evaluate(scores: &ScoreSet) -> OutcomeEvaluation {
    let tier = classify(scores);
    OutcomeEvaluation {
        scores: *scores,
        overall_score: scores.overall(),
        tier,
        badge: evaluate_badge(scores, tier),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RenderRequest {
    pub scores: ScoreSet,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default)]
    pub visitor_id: Option<String>,
}

impl RenderRequest {
    pub fn new(scores: ScoreSet) -> Self {
        Self {
            scores,
            domain: None,
            visitor_id: None,
        }
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    pub fn with_visitor(mut self, visitor_id: impl Into<String>) -> Self {
        self.visitor_id = Some(visitor_id.into());
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CtaView {
    pub text: &'static str,
    pub action: CtaAction,
    pub style: CtaStyle,
}

impl CtaView {
    fn labelled(cta: &CallToAction, text: &'static str) -> Self {
        Self {
            text,
            action: cta.action,
            style: cta.style,
        }
    }
}

/// Everything the presentation layer needs to draw the outcome panel.
#[derive(Debug, Clone, Serialize)]
pub struct OutcomePresentation {
    pub tier: Tier,
    pub overall_score: OverallScore,
    pub analytics_score: u8,
    pub badge: Badge,
    pub badge_animation: BadgeAnimation,
    pub badge_animation_class: &'static str,
    pub icon: &'static str,
    pub title: &'static str,
    pub subtitle: &'static str,
    pub bullets: Vec<&'static str>,
    pub personalization: Personalization,
    pub primary_cta: CtaView,
    pub secondary_cta: CtaView,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub incentive: Option<&'static str>,
    pub incentive_display: IncentiveDisplay,
    pub confetti: bool,
    pub gradient: &'static str,
    pub theme: OutcomeTheme,
    pub quick_wins: Vec<QuickWin>,
    pub share_enabled: bool,
    pub leaderboard_eligible: bool,
    pub experiments: ExperimentAssignment,
    pub analytics: AnalyticsBundle,
}

/// Combines classification, static content, personalization, and experiment arms.
pub struct OutcomeRenderer<'a> {
    flags: &'a FeatureFlags,
}

impl<'a> OutcomeRenderer<'a> {
    pub fn new(flags: &'a FeatureFlags) -> Self {
        Self { flags }
    }

    pub fn render(&self, request: &RenderRequest) -> OutcomePresentation {
        let flags = self.flags;
        let evaluation = evaluate(&request.scores);
        let content = resolve_outcome(evaluation.tier);
        let domain = request.domain.as_deref();

        let personalization = if flags.enable_industry_personalization {
            personalize(domain)
        } else {
            Personalization::default()
        };
        let bullets = if personalization.is_empty() {
            content.bullets.to_vec()
        } else {
            personalization.custom_bullets.to_vec()
        };

        let experiments = assign_experiments(flags, request.visitor_id.as_deref());
        let (primary_text, secondary_text) = match experiments.cta_text {
            CtaTextVariant::Default => (content.primary_cta.text, content.secondary_cta.text),
            variant => {
                let copy = cta_copy(variant, evaluation.tier);
                (copy.primary, copy.secondary)
            }
        };

        let incentive = match flags.incentive_display {
            IncentiveDisplay::Never => None,
            IncentiveDisplay::Always | IncentiveDisplay::Hover => Some(content.incentive),
        };

        let quick_wins = if flags.enable_quick_wins {
            generate_quick_wins(&request.scores)
        } else {
            Vec::new()
        };

        OutcomePresentation {
            tier: evaluation.tier,
            overall_score: evaluation.overall_score,
            analytics_score: request.scores.analytics_score(),
            badge: evaluation.badge,
            badge_animation: experiments.badge_animation,
            badge_animation_class: experiments.badge_animation.css_class(),
            icon: content.icon,
            title: content.title,
            subtitle: content.subtitle,
            bullets,
            personalization,
            primary_cta: CtaView::labelled(&content.primary_cta, primary_text),
            secondary_cta: CtaView::labelled(&content.secondary_cta, secondary_text),
            incentive,
            incentive_display: flags.incentive_display,
            confetti: evaluation.tier == Tier::Pass && flags.show_confetti && content.confetti,
            gradient: content.gradient,
            theme: content.theme,
            quick_wins,
            share_enabled: flags.enable_badge_sharing && evaluation.badge.is_awarded(),
            leaderboard_eligible: flags.show_leaderboard
                && evaluation.tier != Tier::Critical
                && evaluation.overall_score.value() >= LEADERBOARD_MIN_SCORE,
            experiments,
            analytics: evaluation.analytics_bundle(domain),
        }
    }
}
