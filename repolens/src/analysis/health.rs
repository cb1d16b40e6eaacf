//! Repository health classification.
//!
//! Health is a pure function of the repository's attributes: four
//! independent criteria each contribute one point, and the total maps to
//! an ordinal label. An archived repository is always classified lowest,
//! regardless of anything else.

use chrono::{DateTime, Duration, Utc};

use crate::api::Repository;

/// Days within which an update still counts as "recent".
pub const RECENT_UPDATE_WINDOW_DAYS: i64 = 90;

/// Ordinal health label, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HealthLabel {
    Poor,
    Fair,
    Good,
    Excellent,
}

impl HealthLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            HealthLabel::Poor => "poor",
            HealthLabel::Fair => "fair",
            HealthLabel::Good => "good",
            HealthLabel::Excellent => "excellent",
        }
    }
}

/// Count the health criteria a repository satisfies, 0 through 4.
///
/// Criteria: a non-empty description, at least one topic, a license, and
/// an update within [`RECENT_UPDATE_WINDOW_DAYS`] of `now`.
pub fn health_score(repo: &Repository, now: DateTime<Utc>) -> u8 {
    let mut score = 0;
    if repo.description.as_deref().is_some_and(|d| !d.is_empty()) {
        score += 1;
    }
    if !repo.topics.is_empty() {
        score += 1;
    }
    if repo.license_name.is_some() {
        score += 1;
    }
    if now.signed_duration_since(repo.updated_at) <= Duration::days(RECENT_UPDATE_WINDOW_DAYS) {
        score += 1;
    }
    score
}

/// Classify a repository's health.
pub fn classify(repo: &Repository, now: DateTime<Utc>) -> HealthLabel {
    if repo.is_archived {
        return HealthLabel::Poor;
    }
    match health_score(repo, now) {
        4 => HealthLabel::Excellent,
        3 => HealthLabel::Good,
        2 => HealthLabel::Fair,
        _ => HealthLabel::Poor,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::sample_repository;

    #[test]
    fn test_full_criteria_classify_excellent() {
        // sample_repository has description, topics, license and a fresh
        // update timestamp.
        let repo = sample_repository("healthy", 10);
        assert_eq!(classify(&repo, Utc::now()), HealthLabel::Excellent);
        assert_eq!(health_score(&repo, Utc::now()), 4);
    }

    #[test]
    fn test_archived_is_always_poor() {
        let mut repo = sample_repository("archived", 10_000);
        repo.is_archived = true;
        assert_eq!(classify(&repo, Utc::now()), HealthLabel::Poor);
        // The underlying score is irrelevant once archived.
        assert_eq!(health_score(&repo, Utc::now()), 4);
    }

    #[test]
    fn test_stale_update_loses_a_point() {
        let mut repo = sample_repository("stale", 10);
        repo.updated_at = Utc::now() - Duration::days(RECENT_UPDATE_WINDOW_DAYS + 1);
        assert_eq!(health_score(&repo, Utc::now()), 3);
        assert_eq!(classify(&repo, Utc::now()), HealthLabel::Good);
    }

    #[test]
    fn test_bare_repository_is_poor() {
        let mut repo = sample_repository("bare", 10);
        repo.description = None;
        repo.topics.clear();
        repo.license_name = None;
        repo.updated_at = Utc::now() - Duration::days(365);
        assert_eq!(health_score(&repo, Utc::now()), 0);
        assert_eq!(classify(&repo, Utc::now()), HealthLabel::Poor);
    }

    #[test]
    fn test_two_criteria_is_fair() {
        let mut repo = sample_repository("middling", 10);
        repo.topics.clear();
        repo.license_name = None;
        assert_eq!(health_score(&repo, Utc::now()), 2);
        assert_eq!(classify(&repo, Utc::now()), HealthLabel::Fair);
    }

    #[test]
    fn test_labels_are_ordered() {
        assert!(HealthLabel::Poor < HealthLabel::Fair);
        assert!(HealthLabel::Fair < HealthLabel::Good);
        assert!(HealthLabel::Good < HealthLabel::Excellent);
    }
}
