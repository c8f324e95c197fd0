use chrono::{Duration, TimeZone, Utc};

use crate::outcomes::{Badge, OverallScore};
use crate::scans::leaderboard::{
    EntryStatus, LeaderboardEntry, LeaderboardError, LeaderboardStandings, LeaderboardSubmission,
};

fn submission(domain: &str, score: i64, badge: Badge) -> LeaderboardSubmission {
    LeaderboardSubmission {
        domain: Some(domain.to_string()),
        score: Some(score),
        badge: Some(badge),
        ..LeaderboardSubmission::default()
    }
}

fn accepted(domain: &str, score: i64, badge: Badge, minutes: i64) -> LeaderboardEntry {
    let submitted_at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap() + Duration::minutes(minutes);
    submission(domain, score, badge)
        .validate(submitted_at)
        .expect("valid entry")
}

#[test]
fn missing_fields_are_rejected() {
    let mut incomplete = submission("bestshop.com", 95, Badge::Gold);
    incomplete.badge = None;
    assert_eq!(
        incomplete.validate(Utc::now()),
        Err(LeaderboardError::MissingFields)
    );
    assert_eq!(
        submission("   ", 95, Badge::Gold).validate(Utc::now()),
        Err(LeaderboardError::MissingFields)
    );
}

#[test]
fn scores_outside_the_scale_are_rejected() {
    assert_eq!(
        submission("bestshop.com", 101, Badge::Platinum).validate(Utc::now()),
        Err(LeaderboardError::ScoreOutOfRange(101))
    );
    assert_eq!(
        submission("bestshop.com", -1, Badge::None).validate(Utc::now()),
        Err(LeaderboardError::ScoreOutOfRange(-1))
    );
}

#[test]
fn scores_below_ninety_cannot_join() {
    assert_eq!(
        submission("bestshop.com", 89, Badge::Silver).validate(Utc::now()),
        Err(LeaderboardError::BelowMinimum {
            score: 89,
            minimum: 90
        })
    );
}

#[test]
fn badge_must_match_score_band() {
    assert_eq!(
        submission("bestshop.com", 97, Badge::Platinum).validate(Utc::now()),
        Err(LeaderboardError::BadgeMismatch {
            score: 97,
            submitted: Badge::Platinum,
            expected: Badge::Gold,
        })
    );
}

#[test]
fn accepted_entries_are_pending_with_default_industry() {
    let entry = accepted("BestShop.com", 98, Badge::Platinum, 0);
    assert_eq!(entry.domain, "bestshop.com");
    assert_eq!(entry.score, OverallScore(98));
    assert_eq!(entry.industry, "other");
    assert_eq!(entry.status, EntryStatus::PendingVerification);
    assert!(entry.id.starts_with("lb-"));
}

#[test]
fn submitted_urls_collapse_to_their_domain() {
    assert_eq!(accepted("https://Foo.com/", 95, Badge::Gold, 0).domain, "foo.com");
    assert_eq!(accepted("www.foo.com", 95, Badge::Gold, 0).domain, "foo.com");
    assert_eq!(
        submission("ftp://foo.com", 95, Badge::Gold).validate(Utc::now()),
        Err(LeaderboardError::MissingFields)
    );
}

#[test]
fn standings_rank_average_and_count() {
    let entries = vec![
        accepted("a.com", 91, Badge::Gold, 0),
        accepted("b.com", 99, Badge::Platinum, 1),
        accepted("c.com", 95, Badge::Gold, 2),
        accepted("d.com", 95, Badge::Gold, 3),
        accepted("e.com", 90, Badge::Gold, 4),
        accepted("f.com", 98, Badge::Platinum, 5),
    ];

    let standings = LeaderboardStandings::from_entries(&entries);
    assert_eq!(standings.total_sites, 6);
    let ranked: Vec<&str> = standings
        .top_performers
        .iter()
        .map(|row| row.domain.as_str())
        .collect();
    assert_eq!(ranked, vec!["b.com", "f.com", "c.com", "d.com", "a.com"]);
    // 568 / 6 = 94.67
    assert_eq!(standings.average_score, 95);
    assert_eq!(standings.distribution.platinum, 2);
    assert_eq!(standings.distribution.gold, 4);
    assert_eq!(standings.distribution.silver, 0);
}

#[test]
fn empty_board_has_zero_average() {
    let standings = LeaderboardStandings::from_entries(&[]);
    assert_eq!(standings.total_sites, 0);
    assert_eq!(standings.average_score, 0);
    assert!(standings.top_performers.is_empty());
}
