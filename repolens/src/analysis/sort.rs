//! Filtering and stable sorting over repository listings.

use crate::api::Repository;

/// Sortable repository attribute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Stars,
    Forks,
    Name,
    Updated,
    Size,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Filter criteria over a repository listing.
///
/// The default filter passes everything through.
#[derive(Debug, Clone)]
pub struct RepoFilter {
    /// Keep only repositories in this language (exact match).
    pub language: Option<String>,

    /// Keep only repositories with at least this many stars.
    pub min_stars: Option<i64>,

    /// Whether forked repositories pass the filter.
    pub include_forks: bool,

    /// Whether archived repositories pass the filter.
    pub include_archived: bool,

    /// Case-insensitive substring match against name and description.
    pub query: Option<String>,
}

impl Default for RepoFilter {
    fn default() -> Self {
        Self {
            language: None,
            min_stars: None,
            include_forks: true,
            include_archived: true,
            query: None,
        }
    }
}

impl RepoFilter {
    /// Whether a single repository passes the filter.
    pub fn matches(&self, repo: &Repository) -> bool {
        if let Some(language) = &self.language {
            if repo.language.as_deref() != Some(language.as_str()) {
                return false;
            }
        }
        if let Some(min_stars) = self.min_stars {
            if repo.stargazers_count < min_stars {
                return false;
            }
        }
        if !self.include_forks && repo.is_fork {
            return false;
        }
        if !self.include_archived && repo.is_archived {
            return false;
        }
        if let Some(query) = &self.query {
            let query = query.to_lowercase();
            let in_name = repo.name.to_lowercase().contains(&query);
            let in_description = repo
                .description
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&query));
            if !in_name && !in_description {
                return false;
            }
        }
        true
    }
}

/// Keep the repositories passing `filter`, preserving input order.
pub fn filter_repositories(repos: Vec<Repository>, filter: &RepoFilter) -> Vec<Repository> {
    repos.into_iter().filter(|r| filter.matches(r)).collect()
}

/// Stable in-place sort by `key` in `direction`.
///
/// Ties keep the input order; there is no secondary sort key.
pub fn sort_repositories(repos: &mut [Repository], key: SortKey, direction: SortDirection) {
    repos.sort_by(|a, b| {
        let ordering = match key {
            SortKey::Stars => a.stargazers_count.cmp(&b.stargazers_count),
            SortKey::Forks => a.forks_count.cmp(&b.forks_count),
            SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
            SortKey::Updated => a.updated_at.cmp(&b.updated_at),
            SortKey::Size => a.size_kb.cmp(&b.size_kb),
        };
        match direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    });
}
