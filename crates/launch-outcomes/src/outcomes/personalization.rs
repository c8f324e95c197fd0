use serde::{Deserialize, Serialize};

/// Industry inferred from the scanned domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    #[serde(rename = "e-commerce")]
    ECommerce,
    #[serde(rename = "saas")]
    Saas,
    #[serde(rename = "content")]
    Content,
}

impl Industry {
    pub const fn hint(self) -> &'static str {
        match self {
            Self::ECommerce => "e-commerce",
            Self::Saas => "saas",
            Self::Content => "content",
        }
    }
}

struct IndustryProfile {
    industry: Industry,
    keywords: &'static [&'static str],
    bullets: &'static [&'static str],
}

// Checked in order; a domain such as "appstore" resolves to e-commerce.
const PROFILES: [IndustryProfile; 3] = [
    IndustryProfile {
        industry: Industry::ECommerce,
        keywords: &["shop", "store", "cart", "buy"],
        bullets: &[
            "Optimize product image loading for faster browsing",
            "Implement efficient cart and checkout flows",
            "Add structured data for rich product snippets",
        ],
    },
    IndustryProfile {
        industry: Industry::Saas,
        keywords: &["app", "platform", "software", "saas"],
        bullets: &[
            "Optimize dashboard loading and interactivity",
            "Implement progressive loading for data tables",
            "Add proper focus management for accessibility",
        ],
    },
    IndustryProfile {
        industry: Industry::Content,
        keywords: &["blog", "news", "media", "content"],
        bullets: &[
            "Optimize article loading and reading experience",
            "Implement lazy loading for images and videos",
            "Add proper heading structure for better SEO",
        ],
    },
];

/// Industry hint and replacement bullets. Empty is the common case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Personalization {
    #[serde(rename = "industry_hint", skip_serializing_if = "Option::is_none")]
    pub industry: Option<Industry>,
    #[serde(skip_serializing_if = "<[_]>::is_empty")]
    pub custom_bullets: &'static [&'static str],
}

impl Personalization {
    pub fn is_empty(&self) -> bool {
        self.industry.is_none()
    }

    pub fn industry_hint(&self) -> Option<&'static str> {
        self.industry.map(Industry::hint)
    }
}

pub fn personalize(domain: Option<&str>) -> Personalization {
    let Some(domain) = domain else {
        return Personalization::default();
    };

    let domain = domain.to_lowercase();
    PROFILES
        .iter()
        .find(|profile| {
            profile
                .keywords
                .iter()
                .any(|keyword| domain.contains(keyword))
        })
        .map(|profile| Personalization {
            industry: Some(profile.industry),
            custom_bullets: profile.bullets,
        })
        .unwrap_or_default()
}
