//! Scoring, tier classification, badges, and the content that goes with them.
//!
//! Everything in this module is pure: the same [`ScoreSet`] and domain always
//! produce the same outcome, so results can be recomputed on every request.

mod badge;
mod content;
mod personalization;
mod presentation;
mod quick_wins;
mod scores;
mod tier;

pub use badge::{evaluate_badge, Badge, BadgeRange};
pub use content::{
    resolve_outcome, CallToAction, CtaAction, CtaStyle, OutcomeContent, OutcomeTheme,
};
pub use personalization::{personalize, Industry, Personalization};
pub use presentation::{
    evaluate, CtaView, OutcomeEvaluation, OutcomePresentation, OutcomeRenderer, RenderRequest,
    LEADERBOARD_MIN_SCORE,
};
pub use quick_wins::{
    generate_quick_wins, Difficulty, Impact, QuickWin, MAX_QUICK_WINS, QUICK_WIN_THRESHOLD,
};
pub use scores::{aggregate, Category, OverallScore, ScoreRangeError, ScoreSet, MAX_CATEGORY_SCORE};
pub use tier::{classify, Tier, CATEGORY_FLOOR, CRITICAL_OVERALL_THRESHOLD, PASS_THRESHOLD};
