//! Repository activity scoring.

use chrono::{DateTime, Utc};

use crate::api::Repository;

/// Upper bound on the recency bonus.
pub const RECENCY_BONUS_MAX: f64 = 25.0;

/// Window over which the recency bonus decays to zero, in days.
const RECENCY_WINDOW_DAYS: f64 = 90.0;

/// Score a repository's activity.
///
/// Popularity counters enter through a logarithmic transform so that a
/// repository with 10x the stars does not drown out everything else; a
/// linearly decaying recency bonus, capped at [`RECENCY_BONUS_MAX`], is
/// added on top. The result is a relative ranking value, not a bounded
/// percentage.
pub fn activity_score(repo: &Repository, now: DateTime<Utc>) -> f64 {
    let stars = repo.stargazers_count.max(0) as f64;
    let forks = repo.forks_count.max(0) as f64;
    let popularity = (stars + 1.0).ln() * 10.0 + (forks + 1.0).ln() * 5.0;

    let last_push = repo.pushed_at.unwrap_or(repo.updated_at);
    let days_idle = now.signed_duration_since(last_push).num_days().max(0) as f64;
    let recency = (RECENCY_BONUS_MAX * (1.0 - days_idle / RECENCY_WINDOW_DAYS))
        .clamp(0.0, RECENCY_BONUS_MAX);

    popularity + recency
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_fixtures::sample_repository;
    use chrono::Duration;

    #[test]
    fn test_more_stars_score_higher() {
        let now = Utc::now();
        let small = sample_repository("small", 5);
        let large = sample_repository("large", 5000);
        assert!(activity_score(&large, now) > activity_score(&small, now));
    }

    #[test]
    fn test_log_transform_compresses_popularity() {
        let now = Utc::now();
        let a = sample_repository("a", 100);
        let b = sample_repository("b", 1000);
        let c = sample_repository("c", 10000);

        // Equal multiplicative steps produce roughly equal additive steps.
        let step_ab = activity_score(&b, now) - activity_score(&a, now);
        let step_bc = activity_score(&c, now) - activity_score(&b, now);
        assert!((step_ab - step_bc).abs() < 1.0);
    }

    #[test]
    fn test_recency_bonus_is_capped() {
        let now = Utc::now();
        let mut fresh = sample_repository("fresh", 0);
        fresh.forks_count = 0;
        fresh.pushed_at = Some(now);

        let mut idle = sample_repository("idle", 0);
        idle.forks_count = 0;
        idle.pushed_at = Some(now - Duration::days(400));

        let bonus = activity_score(&fresh, now) - activity_score(&idle, now);
        assert!(bonus <= RECENCY_BONUS_MAX + f64::EPSILON);
        assert!(bonus > 0.0);
    }

    #[test]
    fn test_stale_repo_gets_no_bonus() {
        let now = Utc::now();
        let mut repo = sample_repository("stale", 0);
        repo.forks_count = 0;
        repo.stargazers_count = 0;
        repo.pushed_at = Some(now - Duration::days(365));

        // ln(1) terms vanish, and the bonus has fully decayed.
        assert_eq!(activity_score(&repo, now), 0.0);
    }
}
