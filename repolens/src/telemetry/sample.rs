//! Metric identities, thresholds and sample classification.
//!
//! Every sample is rated at creation time against fixed two-level
//! thresholds: at or below the good bound rates `Good`, at or below the
//! poor bound rates `NeedsImprovement`, and anything above rates `Poor`.
//! The rating is a pure function of `(name, value)`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identity of a collected performance metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricName {
    #[serde(rename = "largest-contentful-paint")]
    LargestContentfulPaint,
    #[serde(rename = "first-input-delay")]
    FirstInputDelay,
    #[serde(rename = "cumulative-layout-shift")]
    CumulativeLayoutShift,
    #[serde(rename = "first-contentful-paint")]
    FirstContentfulPaint,
    #[serde(rename = "time-to-first-byte")]
    TimeToFirstByte,
    #[serde(rename = "dom-content-loaded")]
    DomContentLoaded,
    #[serde(rename = "load-complete")]
    LoadComplete,
    #[serde(rename = "time-to-interactive")]
    TimeToInteractive,
    #[serde(rename = "total-blocking-time")]
    TotalBlockingTime,
}

impl MetricName {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::LargestContentfulPaint => "largest-contentful-paint",
            MetricName::FirstInputDelay => "first-input-delay",
            MetricName::CumulativeLayoutShift => "cumulative-layout-shift",
            MetricName::FirstContentfulPaint => "first-contentful-paint",
            MetricName::TimeToFirstByte => "time-to-first-byte",
            MetricName::DomContentLoaded => "dom-content-loaded",
            MetricName::LoadComplete => "load-complete",
            MetricName::TimeToInteractive => "time-to-interactive",
            MetricName::TotalBlockingTime => "total-blocking-time",
        }
    }

    /// The (good-upper-bound, poor-upper-bound) pair for this metric.
    ///
    /// Values are milliseconds except cumulative layout shift, which is
    /// unitless. The web-vital bounds follow the conventional published
    /// thresholds; the navigation and derived metrics use in-house
    /// bounds in the same spirit.
    pub fn thresholds(self) -> (f64, f64) {
        match self {
            MetricName::LargestContentfulPaint => (2500.0, 4000.0),
            MetricName::FirstInputDelay => (100.0, 300.0),
            MetricName::CumulativeLayoutShift => (0.1, 0.25),
            MetricName::FirstContentfulPaint => (1800.0, 3000.0),
            MetricName::TimeToFirstByte => (800.0, 1800.0),
            MetricName::DomContentLoaded => (2000.0, 4000.0),
            MetricName::LoadComplete => (3000.0, 6000.0),
            MetricName::TimeToInteractive => (3800.0, 7300.0),
            MetricName::TotalBlockingTime => (200.0, 600.0),
        }
    }
}

/// Classification of a single sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Rating {
    #[serde(rename = "good")]
    Good,
    #[serde(rename = "needs-improvement")]
    NeedsImprovement,
    #[serde(rename = "poor")]
    Poor,
}

impl Rating {
    /// Point value used by the composite score.
    pub fn points(self) -> u32 {
        match self {
            Rating::Good => 100,
            Rating::NeedsImprovement => 75,
            Rating::Poor => 50,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rating::Good => "good",
            Rating::NeedsImprovement => "needs-improvement",
            Rating::Poor => "poor",
        }
    }
}

/// Rate a value against its metric's thresholds.
pub fn rate(name: MetricName, value: f64) -> Rating {
    let (good, poor) = name.thresholds();
    if value <= good {
        Rating::Good
    } else if value <= poor {
        Rating::NeedsImprovement
    } else {
        Rating::Poor
    }
}

/// One recorded observation. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VitalSample {
    pub name: MetricName,
    pub value: f64,
    pub rating: Rating,
    pub timestamp: DateTime<Utc>,
}

impl VitalSample {
    pub fn new(name: MetricName, value: f64) -> Self {
        Self {
            name,
            value,
            rating: rate(name, value),
            timestamp: Utc::now(),
        }
    }
}
