//! Outbound link builders for the call-to-action handlers.

use crate::outcomes::{Badge, ScoreSet, Tier};
use serde::Serialize;
use std::fmt::Write as _;

pub const CALENDAR_URL: &str = "https://calendly.com/launchin7/website-consultation";
pub const BLOG_URL: &str = "https://launchin7.com/blog";

const CALENDAR_TRACKING: [(&str, &str); 3] = [
    ("utm_source", "app"),
    ("utm_medium", "cta"),
    ("utm_campaign", "consultation"),
];
const BLOG_TRACKING: [(&str, &str); 2] = [("utm_source", "app"), ("utm_medium", "content")];

/// `application/x-www-form-urlencoded` encoding of one key or value.
pub fn form_encode(raw: &str) -> String {
    let mut encoded = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'*' | b'-' | b'.' | b'_' => {
                encoded.push(byte as char)
            }
            b' ' => encoded.push('+'),
            other => {
                let _ = write!(encoded, "%{other:02X}");
            }
        }
    }
    encoded
}

fn with_query<'a>(base: &str, params: impl IntoIterator<Item = (&'a str, String)>) -> String {
    let query: Vec<String> = params
        .into_iter()
        .map(|(key, value)| format!("{}={}", form_encode(key), form_encode(&value)))
        .collect();
    if query.is_empty() {
        base.to_string()
    } else {
        format!("{base}?{}", query.join("&"))
    }
}

/// Booking link tagged with the visitor's tier, domain, and scores.
pub fn calendar_url(tier: Tier, domain: Option<&str>, scores: Option<&ScoreSet>) -> String {
    let mut params: Vec<(&str, String)> = CALENDAR_TRACKING
        .iter()
        .map(|(key, value)| (*key, value.to_string()))
        .collect();
    params.push(("utm_content", tier.key().to_string()));
    if let Some(domain) = domain {
        params.push(("utm_term", domain.to_string()));
    }
    if let Some(scores) = scores {
        let joined = scores
            .values()
            .iter()
            .map(u8::to_string)
            .collect::<Vec<_>>()
            .join(",");
        params.push(("scores", joined));
    }
    with_query(CALENDAR_URL, params)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SocialPlatform {
    Instagram,
    Linkedin,
    Facebook,
}

impl SocialPlatform {
    pub const fn ordered() -> [Self; 3] {
        [Self::Instagram, Self::Linkedin, Self::Facebook]
    }

    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Instagram => "https://www.instagram.com/",
            Self::Linkedin => "https://www.linkedin.com/sharing/share-offsite/",
            Self::Facebook => "https://www.facebook.com/sharer/sharer.php",
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ShareData {
    pub title: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
}

/// Instagram has no share endpoint; its link is only used for copy-to-clipboard.
pub fn social_share_url(platform: SocialPlatform, share: &ShareData) -> String {
    let mut params: Vec<(&str, String)> = Vec::new();
    match platform {
        SocialPlatform::Instagram => {}
        SocialPlatform::Linkedin => {
            if let Some(url) = &share.url {
                params.push(("url", url.clone()));
            }
            if let Some(title) = &share.title {
                params.push(("title", title.clone()));
            }
            if let Some(text) = &share.text {
                params.push(("summary", text.clone()));
            }
        }
        SocialPlatform::Facebook => {
            if let Some(url) = &share.url {
                params.push(("u", url.clone()));
            }
            if let Some(title) = &share.title {
                params.push(("quote", title.clone()));
            }
        }
    }
    with_query(platform.base_url(), params)
}

/// Canned share text for an awarded badge. `None` when there is nothing to share.
pub fn badge_share_text(badge: Badge, platform: SocialPlatform) -> Option<&'static str> {
    let text = match (badge, platform) {
        (Badge::None, _) => return None,
        (Badge::Bronze, SocialPlatform::Instagram) => "Just analyzed my website performance and earned a Bronze badge! 🥉 Working on those optimizations with @LaunchIn7 #WebPerformance #BronzeBadge #WebsiteOptimization",
        (Badge::Bronze, SocialPlatform::Linkedin) => "Proud to share that our website just earned a Bronze performance badge! Always room for improvement and optimization. 🥉",
        (Badge::Bronze, SocialPlatform::Facebook) => "Our website just got graded and we earned a Bronze badge! Time to optimize and improve our performance! 🥉",
        (Badge::Silver, SocialPlatform::Instagram) => "Website performance check: Silver badge achieved! 🥈 Getting closer to that perfect score with @LaunchIn7 #WebPerformance #SilverBadge #DigitalExcellence",
        (Badge::Silver, SocialPlatform::Linkedin) => "Excited to share our website just earned a Silver performance badge! Great progress on our optimization journey. 🥈",
        (Badge::Silver, SocialPlatform::Facebook) => "Just got our website graded - Silver badge earned! 🥈 Making great progress on performance optimization!",
        (Badge::Gold, SocialPlatform::Instagram) => "🏆 Gold badge for website performance! So close to perfect scores. Thanks @LaunchIn7 for the analysis! #WebPerformance #GoldStandard #WebsiteGoals #DigitalWins",
        (Badge::Gold, SocialPlatform::Linkedin) => "Thrilled to announce our website just earned a Gold performance badge! 🏆 High-performing websites drive better user experiences.",
        (Badge::Gold, SocialPlatform::Facebook) => "Incredible news! Our website just earned a Gold performance badge! 🏆 All that optimization work is paying off!",
        (Badge::Platinum, SocialPlatform::Instagram) => "🚀 PLATINUM BADGE! Our website just scored in the top tier for performance! Peak optimization achieved with @LaunchIn7 #WebPerformance #Platinum #TopTier #WebsiteWins #DigitalExcellence",
        (Badge::Platinum, SocialPlatform::Linkedin) => "Proud to share our website just achieved PLATINUM status for performance! 🚀 When you prioritize user experience, it shows.",
        (Badge::Platinum, SocialPlatform::Facebook) => "AMAZING! Our website just earned a PLATINUM performance badge! 🚀 Top tier performance unlocked!",
    };
    Some(text)
}

/// Share payload for a badge; the landing URL carries the domain when known.
pub fn badge_share_data(badge: Badge, origin: &str, domain: Option<&str>) -> Option<ShareData> {
    let text = badge_share_text(badge, SocialPlatform::Instagram)?;
    let url = match domain {
        Some(domain) => format!("{origin}?domain={}", form_encode(domain)),
        None => origin.to_string(),
    };
    Some(ShareData {
        title: Some(format!("{} Website Performance Badge", badge.label())),
        text: Some(text.to_string()),
        url: Some(url),
    })
}

pub fn report_email_subject(domain: Option<&str>, tier: Option<Tier>) -> String {
    const BASE: &str = "Website Performance Report";
    match (domain, tier) {
        (Some(domain), Some(tier)) => {
            format!("{BASE} for {domain} ({} tier)", tier.key().to_uppercase())
        }
        (Some(domain), None) => format!("{BASE} for {domain}"),
        _ => BASE.to_string(),
    }
}

/// Guide for a quick-win issue type; unknown types fall back to the blog.
pub fn quick_win_guide_url(issue_type: &str) -> String {
    let path = match issue_type {
        "images" => "image-optimization",
        "caching" => "browser-caching",
        "performance" => "core-web-vitals",
        "accessibility" => "web-accessibility",
        _ => {
            return with_query(
                BLOG_URL,
                BLOG_TRACKING.iter().map(|(key, value)| (*key, value.to_string())),
            )
        }
    };
    format!("https://launchin7.com/guides/{path}")
}
