//! Cache-backed client for the showcase backend API.
//!
//! The client deduplicates and rate-limits outbound reads: responses are
//! served from the in-memory TTL cache while fresh, concurrent identical
//! misses are coalesced into one network call, and the TTL chosen for a
//! newly stored response scales with the observed rate-limit headroom:
//! when quota runs low, responses are held twice as long, trading
//! staleness for preserved request budget.
//!
//! # Example
//!
//! ```ignore
//! use repolens::api::ShowcaseClient;
//! use repolens::config::Config;
//!
//! let config = Config::from_env()?;
//! let client = ShowcaseClient::new(&config)?;
//!
//! let listing = client.get_repositories(&Default::default()).await?;
//! client.prefetch(&listing.repositories).await;
//! ```

mod error;
mod query;
mod singleflight;
mod transport;
mod types;

pub use error::FetchError;
pub use query::{cache_key, canonical_query};
pub use transport::{BoxFuture, HttpTransport, ReqwestTransport, TransportResponse};
pub use types::{
    CollectionStats, LanguageBreakdown, LanguageStats, Pagination, RateLimitSnapshot,
    RepoListParams, Repository, RepositoryDetail, RepositoryListResponse,
};

#[cfg(test)]
pub(crate) use types::tests as test_fixtures;

use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;
use futures::future::join_all;
use futures::FutureExt;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, trace, warn};

use crate::cache::{CacheStats, TtlCache};
use crate::config::Config;
use singleflight::FlightTable;

/// Maximum number of repositories prefetched from a listing.
pub const PREFETCH_LIMIT: usize = 5;

const REPOSITORIES_ENDPOINT: &str = "/api/github/repositories";
const LANGUAGES_ENDPOINT: &str = "/api/github/languages";

/// Cache-backed client for repository listings, details and language
/// distributions.
///
/// Cheap to clone; clones share the cache and in-flight table.
#[derive(Clone)]
pub struct ShowcaseClient {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    transport: Arc<dyn HttpTransport>,
    cache: Arc<TtlCache>,
    flights: FlightTable<Bytes, FetchError>,
    base_url: String,
    base_ttl: Duration,
    headroom_threshold: u32,
}

/// Minimal envelope used to read quota out of a response body when the
/// backend did not send rate-limit headers.
#[derive(Deserialize)]
struct RateLimitEnvelope {
    rate_limit: RateLimitSnapshot,
}

impl ShowcaseClient {
    /// Build a client with the real reqwest transport.
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        let transport = Arc::new(ReqwestTransport::new(config)?);
        Ok(Self::with_transport(config, transport))
    }

    /// Build a client over an injected transport.
    pub fn with_transport(config: &Config, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            inner: Arc::new(ClientInner {
                transport,
                cache: Arc::new(TtlCache::new()),
                flights: FlightTable::new(),
                base_url: config.api_base_url.trim_end_matches('/').to_string(),
                base_ttl: config.cache.base_ttl,
                headroom_threshold: config.cache.headroom_threshold,
            }),
        }
    }

    /// Fetch the repository listing.
    pub async fn get_repositories(
        &self,
        params: &RepoListParams,
    ) -> Result<RepositoryListResponse, FetchError> {
        self.fetch_json(REPOSITORIES_ENDPOINT, &params.to_pairs())
            .await
    }

    /// Fetch detail for a single repository.
    pub async fn get_repository_details(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<RepositoryDetail, FetchError> {
        let endpoint = format!("{}/{}/{}", REPOSITORIES_ENDPOINT, owner, name);
        self.fetch_json(&endpoint, &[]).await
    }

    /// Fetch the per-language distribution.
    pub async fn get_language_breakdown(&self) -> Result<LanguageBreakdown, FetchError> {
        self.fetch_json(LANGUAGES_ENDPOINT, &[]).await
    }

    /// Warm the detail cache for the leading repositories of a listing.
    ///
    /// Fires detail fetches for the first [`PREFETCH_LIMIT`] repositories
    /// that are neither archived nor starless, all concurrently. Element
    /// failures are logged and swallowed so one bad repository never
    /// aborts the batch. Returns how many fetches completed.
    pub async fn prefetch(&self, repos: &[Repository]) -> usize {
        let targets: Vec<&Repository> = repos
            .iter()
            .filter(|r| !r.is_archived && r.stargazers_count > 0)
            .take(PREFETCH_LIMIT)
            .collect();

        let fetches = targets
            .iter()
            .map(|repo| self.get_repository_details(&repo.owner_login, &repo.name));
        let results = join_all(fetches).await;

        let mut succeeded = 0;
        for (repo, result) in targets.iter().zip(results) {
            match result {
                Ok(_) => succeeded += 1,
                Err(e) => warn!(repo = %repo.full_name, error = %e, "prefetch failed"),
            }
        }
        succeeded
    }

    /// Unconditionally empty the response cache.
    pub fn clear_cache(&self) {
        self.inner.cache.clear();
    }

    /// Current cache statistics.
    pub fn cache_stats(&self) -> CacheStats {
        self.inner.cache.stats()
    }

    /// Handle on the cache, for wiring up the background sweeper.
    pub fn cache(&self) -> Arc<TtlCache> {
        Arc::clone(&self.inner.cache)
    }

    /// Fetch and decode an endpoint, going through the cache.
    async fn fetch_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &query::Params<'_>,
    ) -> Result<T, FetchError> {
        let key = query::cache_key(endpoint, params);
        let bytes = self.fetch_bytes(&key, endpoint, params).await?;

        match serde_json::from_slice(&bytes) {
            Ok(value) => Ok(value),
            Err(e) => {
                // An undecodable body must not survive as a cached hit.
                self.inner.cache.remove(&key);
                Err(e.into())
            }
        }
    }

    /// Resolve a key to response bytes: cache hit, coalesced in-flight
    /// request, or a fresh network call.
    async fn fetch_bytes(
        &self,
        key: &str,
        endpoint: &str,
        params: &query::Params<'_>,
    ) -> Result<Bytes, FetchError> {
        if let Some(hit) = self.inner.cache.get(key) {
            trace!(key = %key, "cache hit");
            return Ok(hit);
        }

        let url = query::request_url(&self.inner.base_url, endpoint, params);
        let (flight, leader) = self.inner.flights.join_or_insert(key, || {
            let inner = Arc::clone(&self.inner);
            let key = key.to_string();
            async move {
                let result = inner.fetch_and_store(&key, &url).await;
                inner.flights.remove(&key);
                result
            }
            .boxed()
        });

        if !leader {
            trace!(key = %key, "joined in-flight request");
        }
        flight.await
    }
}

impl ClientInner {
    /// Perform the network call and store the response with a TTL scaled
    /// to the observed rate-limit headroom.
    async fn fetch_and_store(&self, key: &str, url: &str) -> Result<Bytes, FetchError> {
        debug!(url = %url, "cache miss, fetching");
        let response = self.transport.get(url).await?;

        let remaining = response
            .rate_limit
            .as_ref()
            .map(|rl| rl.remaining)
            .or_else(|| {
                serde_json::from_slice::<RateLimitEnvelope>(&response.body)
                    .ok()
                    .map(|envelope| envelope.rate_limit.remaining)
            });

        let ttl = match remaining {
            Some(remaining) if remaining <= self.headroom_threshold => self.base_ttl * 2,
            _ => self.base_ttl,
        };

        self.cache.insert(key, response.body.clone(), ttl);
        Ok(response.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use transport::tests::MockTransport;
    use types::tests::sample_repository;

    fn test_config() -> Config {
        Config::default().with_base_ttl(Duration::from_secs(60))
    }

    fn client_with(transport: MockTransport) -> (ShowcaseClient, Arc<MockTransport>) {
        let transport = Arc::new(transport);
        let client = ShowcaseClient::with_transport(&test_config(), transport.clone());
        (client, transport)
    }

    fn listing_body(repos: Vec<Repository>, remaining: u32) -> Vec<u8> {
        let count = repos.len() as i64;
        let response = RepositoryListResponse {
            repositories: repos,
            pagination: Pagination {
                current_page: 1,
                per_page: 20,
                total_pages: 1,
                total_count: count,
                has_next_page: false,
                has_previous_page: false,
            },
            statistics: CollectionStats {
                total_count: count,
                ..CollectionStats::default()
            },
            rate_limit: RateLimitSnapshot {
                limit: 5000,
                remaining,
                reset_at: Utc::now(),
                used: 5000 - remaining,
            },
        };
        serde_json::to_vec(&response).unwrap()
    }

    fn detail_body() -> Vec<u8> {
        let detail = RepositoryDetail {
            repository: sample_repository("detail", 10),
            readme_content: String::new(),
            contributors_count: 1,
            commit_count: 42,
            branch_count: 1,
            release_count: 0,
        };
        serde_json::to_vec(&detail).unwrap()
    }

    #[tokio::test]
    async fn test_repeat_get_within_ttl_hits_cache() {
        let (client, transport) = client_with(MockTransport::new(listing_body(vec![], 4000)));
        let params = RepoListParams::default();

        client.get_repositories(&params).await.unwrap();
        client.get_repositories(&params).await.unwrap();

        assert_eq!(transport.call_count(), 1);
        assert_eq!(client.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_expired_entry_issues_new_call() {
        let transport = Arc::new(MockTransport::new(listing_body(vec![], 4000)));
        let config = test_config().with_base_ttl(Duration::from_millis(10));
        let client = ShowcaseClient::with_transport(&config, transport.clone());
        let params = RepoListParams::default();

        client.get_repositories(&params).await.unwrap();
        tokio::time::sleep(Duration::from_millis(30)).await;
        client.get_repositories(&params).await.unwrap();

        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_ttl_base_with_comfortable_headroom() {
        let (client, _) =
            client_with(MockTransport::new(listing_body(vec![], 4000)).with_remaining(150));

        client
            .get_repositories(&RepoListParams::default())
            .await
            .unwrap();

        let ttl = client.cache().entry_ttl(REPOSITORIES_ENDPOINT).unwrap();
        assert_eq!(ttl, Duration::from_secs(60));
    }

    #[tokio::test]
    async fn test_ttl_doubled_when_quota_scarce() {
        let (client, _) =
            client_with(MockTransport::new(listing_body(vec![], 50)).with_remaining(50));

        client
            .get_repositories(&RepoListParams::default())
            .await
            .unwrap();

        let ttl = client.cache().entry_ttl(REPOSITORIES_ENDPOINT).unwrap();
        assert_eq!(ttl, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_ttl_from_body_envelope_when_headers_absent() {
        // No header snapshot; the body reports 50 remaining.
        let (client, _) = client_with(MockTransport::new(listing_body(vec![], 50)));

        client
            .get_repositories(&RepoListParams::default())
            .await
            .unwrap();

        let ttl = client.cache().entry_ttl(REPOSITORIES_ENDPOINT).unwrap();
        assert_eq!(ttl, Duration::from_secs(120));
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let (client, transport) = client_with(MockTransport::new(listing_body(vec![], 4000)));
        let params = RepoListParams::default();

        client.get_repositories(&params).await.unwrap();
        client.clear_cache();
        client.get_repositories(&params).await.unwrap();

        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_transport_error_propagates_and_nothing_cached() {
        let (client, transport) = client_with(
            MockTransport::new(listing_body(vec![], 4000)).failing_on("/repositories"),
        );
        let params = RepoListParams::default();

        let err = client.get_repositories(&params).await.unwrap_err();
        assert!(matches!(err, FetchError::Transport(_)));
        assert_eq!(client.cache_stats().total_entries, 0);

        // No negative caching: the next call goes to the network again.
        let _ = client.get_repositories(&params).await;
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_decode_error_does_not_poison_cache() {
        let (client, _) = client_with(MockTransport::new(&b"not json"[..]));

        let err = client
            .get_repositories(&RepoListParams::default())
            .await
            .unwrap_err();
        assert!(matches!(err, FetchError::Decode(_)));
        assert_eq!(client.cache_stats().total_entries, 0);
    }

    #[tokio::test]
    async fn test_concurrent_gets_share_one_call() {
        let (client, transport) = client_with(
            MockTransport::new(listing_body(vec![], 4000)).with_delay(Duration::from_millis(50)),
        );
        let params = RepoListParams::default();

        let (a, b) = tokio::join!(
            client.get_repositories(&params),
            client.get_repositories(&params),
        );

        assert!(a.is_ok());
        assert!(b.is_ok());
        assert_eq!(transport.call_count(), 1);
    }

    #[tokio::test]
    async fn test_distinct_params_use_distinct_keys() {
        let (client, transport) = client_with(MockTransport::new(listing_body(vec![], 4000)));

        let first = RepoListParams {
            page: Some(1),
            ..RepoListParams::default()
        };
        let second = RepoListParams {
            page: Some(2),
            ..RepoListParams::default()
        };

        client.get_repositories(&first).await.unwrap();
        client.get_repositories(&second).await.unwrap();

        assert_eq!(transport.call_count(), 2);
        assert_eq!(client.cache_stats().total_entries, 2);
    }

    #[tokio::test]
    async fn test_prefetch_takes_first_five_eligible() {
        let (client, transport) = client_with(MockTransport::new(detail_body()));

        let mut repos: Vec<Repository> = (0..10)
            .map(|i| sample_repository(&format!("repo-{}", i), 10 + i))
            .collect();
        // Ineligible entries ahead of the eligible ones must be skipped.
        let mut archived = sample_repository("archived", 100);
        archived.is_archived = true;
        let starless = sample_repository("starless", 0);
        repos.insert(0, archived);
        repos.insert(1, starless);

        let succeeded = client.prefetch(&repos).await;

        assert_eq!(succeeded, PREFETCH_LIMIT);
        assert_eq!(transport.call_count(), PREFETCH_LIMIT);
    }

    #[tokio::test]
    async fn test_prefetch_swallows_element_failure() {
        let (client, transport) =
            client_with(MockTransport::new(detail_body()).failing_on("repo-2"));

        let repos: Vec<Repository> = (0..5)
            .map(|i| sample_repository(&format!("repo-{}", i), 10))
            .collect();

        let succeeded = client.prefetch(&repos).await;

        assert_eq!(succeeded, 4);
        assert_eq!(transport.call_count(), 5);
    }
}
