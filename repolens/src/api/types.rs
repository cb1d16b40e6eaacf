//! Response envelope types for the showcase backend API.
//!
//! These mirror the JSON the backend serves: a repository listing with
//! pagination, aggregate statistics and a rate-limit snapshot; a single
//! repository detail; and a per-language distribution.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A GitHub repository as shaped by the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Repository {
    pub id: i64,
    pub name: String,
    pub full_name: String,
    pub owner_login: String,
    pub description: Option<String>,
    pub html_url: String,
    pub language: Option<String>,
    pub size_kb: i64,
    pub stargazers_count: i64,
    pub watchers_count: i64,
    pub forks_count: i64,
    pub open_issues_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub pushed_at: Option<DateTime<Utc>>,
    pub is_fork: bool,
    pub is_archived: bool,
    #[serde(default)]
    pub topics: Vec<String>,
    pub license_name: Option<String>,
}

/// Detail view of a single repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryDetail {
    #[serde(flatten)]
    pub repository: Repository,
    #[serde(default)]
    pub readme_content: String,
    #[serde(default)]
    pub contributors_count: i64,
    #[serde(default)]
    pub commit_count: i64,
    #[serde(default)]
    pub branch_count: i64,
    #[serde(default)]
    pub release_count: i64,
}

/// Aggregate statistics over the listed repositories.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CollectionStats {
    pub total_count: i64,
    pub total_stars: i64,
    pub total_forks: i64,
    pub most_used_language: Option<String>,
}

/// Pagination metadata on listing responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: i64,
    pub per_page: i64,
    pub total_pages: i64,
    pub total_count: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Rate-limit quota as reported by the backend.
///
/// Used only to choose a TTL multiplier for newly stored cache entries;
/// never persisted itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimitSnapshot {
    pub limit: u32,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
    #[serde(default)]
    pub used: u32,
}

/// The repository listing envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryListResponse {
    pub repositories: Vec<Repository>,
    pub pagination: Pagination,
    pub statistics: CollectionStats,
    pub rate_limit: RateLimitSnapshot,
}

/// One language's share of the showcased repositories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LanguageStats {
    pub language: String,
    pub byte_count: i64,
    pub percentage: f64,
    pub repository_count: i64,
}

/// The per-language distribution envelope.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LanguageBreakdown {
    pub languages: Vec<LanguageStats>,
}

/// Parameters accepted by the repository listing endpoint.
#[derive(Debug, Clone, Default)]
pub struct RepoListParams {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub language: Option<String>,
    pub search: Option<String>,
}

impl RepoListParams {
    /// Flatten into (name, value) pairs for canonical serialization.
    pub fn to_pairs(&self) -> Vec<(&'static str, Option<String>)> {
        vec![
            ("page", self.page.map(|v| v.to_string())),
            ("per_page", self.per_page.map(|v| v.to_string())),
            ("sort", self.sort.clone()),
            ("direction", self.direction.clone()),
            ("language", self.language.clone()),
            ("search", self.search.clone()),
        ]
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A minimal repository for tests across the crate.
    pub(crate) fn sample_repository(name: &str, stars: i64) -> Repository {
        Repository {
            id: 1,
            name: name.to_string(),
            full_name: format!("octocat/{}", name),
            owner_login: "octocat".to_string(),
            description: Some("A sample repository".to_string()),
            html_url: format!("https://github.com/octocat/{}", name),
            language: Some("Rust".to_string()),
            size_kb: 1024,
            stargazers_count: stars,
            watchers_count: stars,
            forks_count: stars / 2,
            open_issues_count: 3,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            pushed_at: Some(Utc::now()),
            is_fork: false,
            is_archived: false,
            topics: vec!["systems".to_string()],
            license_name: Some("MIT".to_string()),
        }
    }

    #[test]
    fn test_repo_list_params_pairs() {
        let params = RepoListParams {
            page: Some(2),
            per_page: Some(20),
            sort: Some("stars".to_string()),
            ..RepoListParams::default()
        };
        let pairs = params.to_pairs();
        assert!(pairs.contains(&("page", Some("2".to_string()))));
        assert!(pairs.contains(&("language", None)));
    }

    #[test]
    fn test_listing_envelope_roundtrip() {
        let json = serde_json::json!({
            "repositories": [],
            "pagination": {
                "current_page": 1,
                "per_page": 20,
                "total_pages": 0,
                "total_count": 0,
                "has_next_page": false,
                "has_previous_page": false
            },
            "statistics": {
                "total_count": 0,
                "total_stars": 0,
                "total_forks": 0,
                "most_used_language": null
            },
            "rate_limit": {
                "limit": 5000,
                "remaining": 4999,
                "reset_at": "2026-01-01T00:00:00Z"
            }
        });

        let parsed: RepositoryListResponse = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.rate_limit.remaining, 4999);
        assert_eq!(parsed.rate_limit.used, 0);
        assert!(parsed.repositories.is_empty());
    }
}
