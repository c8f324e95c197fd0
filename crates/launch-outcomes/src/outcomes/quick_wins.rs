use super::scores::{Category, ScoreSet};
use serde::{Deserialize, Serialize};

/// Categories scoring below this get remediation suggestions.
pub const QUICK_WIN_THRESHOLD: u8 = 80;
/// Upper bound on suggestions returned.
pub const MAX_QUICK_WINS: usize = 6;

// Earlier categories survive truncation.
const CATEGORY_PRIORITY: [Category; 4] = [
    Category::Performance,
    Category::Accessibility,
    Category::Seo,
    Category::BestPractices,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

/// Low-effort, pre-scripted remediation tied to a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuickWin {
    pub category: Category,
    pub category_label: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub impact: Impact,
    pub difficulty: Difficulty,
    pub estimated_time: &'static str,
}

const fn win(
    category: Category,
    title: &'static str,
    description: &'static str,
    impact: Impact,
    difficulty: Difficulty,
    estimated_time: &'static str,
) -> QuickWin {
    QuickWin {
        category,
        category_label: category.label(),
        title,
        description,
        impact,
        difficulty,
        estimated_time,
    }
}

fn catalog(category: Category) -> [QuickWin; 2] {
    match category {
        Category::Performance => [
            win(
                category,
                "Optimize Images",
                "Compress and convert images to WebP format for faster loading",
                Impact::High,
                Difficulty::Easy,
                "15 minutes",
            ),
            win(
                category,
                "Enable Browser Caching",
                "Set cache headers to reduce repeat load times",
                Impact::High,
                Difficulty::Medium,
                "10 minutes",
            ),
        ],
        Category::Accessibility => [
            win(
                category,
                "Add Alt Text to Images",
                "Provide descriptive alt text for all images",
                Impact::High,
                Difficulty::Easy,
                "20 minutes",
            ),
            win(
                category,
                "Improve Color Contrast",
                "Ensure text meets WCAG color contrast requirements",
                Impact::Medium,
                Difficulty::Easy,
                "15 minutes",
            ),
        ],
        Category::Seo => [
            win(
                category,
                "Add Meta Descriptions",
                "Write compelling meta descriptions for all pages",
                Impact::Medium,
                Difficulty::Easy,
                "30 minutes",
            ),
            win(
                category,
                "Optimize Page Titles",
                "Create unique, descriptive titles for each page",
                Impact::High,
                Difficulty::Easy,
                "20 minutes",
            ),
        ],
        Category::BestPractices => [
            win(
                category,
                "Update to HTTPS",
                "Ensure all pages are served over secure HTTPS",
                Impact::High,
                Difficulty::Medium,
                "30 minutes",
            ),
            win(
                category,
                "Fix Console Errors",
                "Resolve JavaScript errors shown in browser console",
                Impact::Medium,
                Difficulty::Medium,
                "45 minutes",
            ),
        ],
    }
}

pub fn generate_quick_wins(scores: &ScoreSet) -> Vec<QuickWin> {
    CATEGORY_PRIORITY
        .into_iter()
        .filter(|category| scores.get(*category) < QUICK_WIN_THRESHOLD)
        .flat_map(catalog)
        .take(MAX_QUICK_WINS)
        .collect()
}
