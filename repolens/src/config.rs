//! Application configuration.
//!
//! Configuration is loaded from environment variables with per-field
//! defaults, so a bare `Config::from_env()` always succeeds in a dev
//! environment. Builder-style `with_*` methods allow tests and embedders
//! to override individual fields without touching the process environment.

use std::env;
use std::time::Duration;

use thiserror::Error;

/// Default TTL applied to cached responses when rate-limit headroom is
/// comfortable.
pub const DEFAULT_BASE_TTL_SECS: u64 = 300;

/// Remaining-quota threshold below which cached responses are held for
/// twice the base TTL, trading staleness for preserved request budget.
pub const RATE_LIMIT_HEADROOM_THRESHOLD: u32 = 100;

/// Default interval for the background cache sweep (in seconds).
///
/// The sweeper runs at this interval to physically delete expired entries.
/// 60 seconds keeps the key space bounded without measurable overhead;
/// correctness never depends on the sweep because reads re-check freshness.
pub const DEFAULT_SWEEP_INTERVAL_SECS: u64 = 60;

/// Default interval at which the telemetry collector re-samples
/// navigation/paint timing and recomputes derived metrics (in seconds).
pub const DEFAULT_RESAMPLE_INTERVAL_SECS: u64 = 5;

/// Default fraction of recorded samples forwarded to the reporting
/// endpoint.
pub const DEFAULT_TELEMETRY_SAMPLE_RATE: f64 = 0.1;

/// Errors raised while loading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable was present but failed to parse.
    #[error("invalid value for {name}: {value}")]
    InvalidValue { name: String, value: String },
}

/// Deployment environment, from `REPOLENS_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// Cache tuning knobs.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL for cached responses while rate-limit headroom is above the
    /// threshold; doubled once headroom drops below it.
    pub base_ttl: Duration,

    /// Remaining-quota threshold for TTL doubling.
    pub headroom_threshold: u32,

    /// Interval between background sweeps of expired entries.
    pub sweep_interval: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            base_ttl: Duration::from_secs(DEFAULT_BASE_TTL_SECS),
            headroom_threshold: RATE_LIMIT_HEADROOM_THRESHOLD,
            sweep_interval: Duration::from_secs(DEFAULT_SWEEP_INTERVAL_SECS),
        }
    }
}

/// Telemetry collection and reporting configuration.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// Optional endpoint for best-effort sample reporting. Reporting is
    /// disabled when unset.
    pub report_endpoint: Option<String>,

    /// Fraction of samples forwarded to the endpoint, in `(0.0, 1.0]`.
    pub sample_rate: f64,

    /// Page/session URL attached to reported samples.
    pub page_url: String,

    /// User agent string attached to reported samples.
    pub user_agent: String,

    /// Interval between navigation/paint re-samples.
    pub resample_interval: Duration,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            report_endpoint: None,
            sample_rate: DEFAULT_TELEMETRY_SAMPLE_RATE,
            page_url: String::from("http://localhost:3000/"),
            user_agent: concat!("repolens/", env!("CARGO_PKG_VERSION")).to_string(),
            resample_interval: Duration::from_secs(DEFAULT_RESAMPLE_INTERVAL_SECS),
        }
    }
}

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the showcase backend API.
    pub api_base_url: String,

    /// GitHub access token, forwarded to the backend as a bearer token.
    pub github_token: Option<String>,

    /// Per-request timeout on the HTTP transport.
    pub request_timeout: Duration,

    /// Deployment environment.
    pub environment: Environment,

    /// Cache configuration.
    pub cache: CacheConfig,

    /// Telemetry configuration.
    pub telemetry: TelemetryConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: String::from("http://localhost:3001"),
            github_token: None,
            request_timeout: Duration::from_secs(30),
            environment: Environment::Development,
            cache: CacheConfig::default(),
            telemetry: TelemetryConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Recognized variables:
    /// - `REPOLENS_API_BASE_URL`
    /// - `GITHUB_TOKEN`
    /// - `REPOLENS_ENV` (`development` | `production`)
    /// - `REPOLENS_TELEMETRY_ENDPOINT`
    /// - `REPOLENS_TELEMETRY_SAMPLE_RATE`
    /// - `REPOLENS_CACHE_TTL_SECS`
    ///
    /// Unset variables fall back to defaults; a set-but-unparsable value
    /// is an error rather than a silent fallback.
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Ok(url) = env::var("REPOLENS_API_BASE_URL") {
            config.api_base_url = url.trim_end_matches('/').to_string();
        }
        if let Ok(token) = env::var("GITHUB_TOKEN") {
            if !token.is_empty() {
                config.github_token = Some(token);
            }
        }
        if let Ok(environment) = env::var("REPOLENS_ENV") {
            config.environment = match environment.as_str() {
                "production" | "prod" => Environment::Production,
                "development" | "dev" => Environment::Development,
                other => {
                    return Err(ConfigError::InvalidValue {
                        name: "REPOLENS_ENV".to_string(),
                        value: other.to_string(),
                    })
                }
            };
        }
        if let Ok(endpoint) = env::var("REPOLENS_TELEMETRY_ENDPOINT") {
            if !endpoint.is_empty() {
                config.telemetry.report_endpoint = Some(endpoint);
            }
        }
        if let Ok(rate) = env::var("REPOLENS_TELEMETRY_SAMPLE_RATE") {
            config.telemetry.sample_rate =
                rate.parse::<f64>()
                    .ok()
                    .filter(|r| *r > 0.0 && *r <= 1.0)
                    .ok_or_else(|| ConfigError::InvalidValue {
                        name: "REPOLENS_TELEMETRY_SAMPLE_RATE".to_string(),
                        value: rate.clone(),
                    })?;
        }
        if let Ok(ttl) = env::var("REPOLENS_CACHE_TTL_SECS") {
            let secs = ttl
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidValue {
                    name: "REPOLENS_CACHE_TTL_SECS".to_string(),
                    value: ttl.clone(),
                })?;
            config.cache.base_ttl = Duration::from_secs(secs);
        }

        Ok(config)
    }

    /// Override the API base URL.
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    /// Override the base cache TTL.
    pub fn with_base_ttl(mut self, ttl: Duration) -> Self {
        self.cache.base_ttl = ttl;
        self
    }

    /// Override the telemetry reporting endpoint.
    pub fn with_telemetry_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.telemetry.report_endpoint = Some(endpoint.into());
        self
    }
}
