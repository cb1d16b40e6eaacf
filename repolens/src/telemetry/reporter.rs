//! Best-effort sample reporting.
//!
//! Reporting is fire-and-forget by design: a failed POST is logged at
//! debug level and dropped, never retried, and never allowed to affect
//! collector state. Sampling uses a deterministic stride (every Nth
//! sample for a rate of 1/N) so behavior is reproducible in tests.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use serde_json::json;
use tracing::debug;

use super::sample::VitalSample;

/// Reporter configuration.
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Endpoint receiving the POSTed samples.
    pub endpoint: String,

    /// Fraction of samples to forward, in `(0.0, 1.0]`.
    pub sample_rate: f64,

    /// Page/session URL attached to each report.
    pub page_url: String,

    /// User agent string attached to each report.
    pub user_agent: String,
}

/// Forwards a sampled fraction of observations to a telemetry endpoint.
pub struct MetricReporter {
    client: reqwest::Client,
    config: ReporterConfig,
    stride: u64,
    counter: AtomicU64,
}

impl MetricReporter {
    pub fn new(config: ReporterConfig) -> Self {
        let stride = if config.sample_rate > 0.0 {
            (1.0 / config.sample_rate).round().max(1.0) as u64
        } else {
            u64::MAX
        };
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(5))
            .build()
            .unwrap_or_default();

        Self {
            client,
            config,
            stride,
            counter: AtomicU64::new(0),
        }
    }

    /// Build a reporter from telemetry configuration.
    ///
    /// Returns `None` when no endpoint is configured, in which case
    /// reporting stays disabled.
    pub fn from_config(config: &crate::config::TelemetryConfig) -> Option<Self> {
        let endpoint = config.report_endpoint.clone()?;
        Some(Self::new(ReporterConfig {
            endpoint,
            sample_rate: config.sample_rate,
            page_url: config.page_url.clone(),
            user_agent: config.user_agent.clone(),
        }))
    }

    /// Report a sample, best-effort.
    ///
    /// Returns immediately; the POST runs on a spawned task. Without a
    /// running runtime the sample is dropped, which is acceptable for
    /// telemetry.
    pub fn report(&self, sample: VitalSample) {
        if !self.should_sample() {
            return;
        }

        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            debug!("no runtime available, dropping telemetry sample");
            return;
        };

        let body = json!({
            "metric": {
                "name": sample.name.as_str(),
                "value": sample.value,
                "timestamp": sample.timestamp,
            },
            "url": self.config.page_url,
            "userAgent": self.config.user_agent,
        });
        let request = self.client.post(&self.config.endpoint).json(&body);

        handle.spawn(async move {
            if let Err(e) = request.send().await {
                debug!(error = %e, "telemetry report failed");
            }
        });
    }

    /// Deterministic stride sampling: the first sample reports, then
    /// every `stride`th after it.
    fn should_sample(&self) -> bool {
        let n = self.counter.fetch_add(1, Ordering::Relaxed);
        self.stride != u64::MAX && n % self.stride == 0
    }
}
