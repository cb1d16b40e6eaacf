//! Sample aggregation and scoring.

use parking_lot::Mutex;
use serde::Serialize;

use super::probe::{TimingEvent, TimingProbe};
use super::reporter::MetricReporter;
use super::sample::{MetricName, Rating, VitalSample};
use super::snapshot::MetricsSnapshot;

/// Counts of historical samples per rating bucket.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RatingCounts {
    pub good: usize,
    pub needs_improvement: usize,
    pub poor: usize,
}

#[derive(Default)]
struct CollectorState {
    history: Vec<VitalSample>,
    snapshot: MetricsSnapshot,
    layout_shift_total: f64,
}

/// Aggregates performance samples into a rolling history and a running
/// quality score.
///
/// The history is append-only and unbounded; samples are never mutated
/// after creation and are cleared only when the collector is dropped.
/// All mutation happens under one lock, so producers on any task see a
/// consistent snapshot.
#[derive(Default)]
pub struct VitalsCollector {
    state: Mutex<CollectorState>,
    reporter: Option<MetricReporter>,
}

impl VitalsCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collector that forwards a sampled fraction of recorded
    /// observations to a reporting endpoint, best-effort.
    pub fn with_reporter(reporter: MetricReporter) -> Self {
        Self {
            state: Mutex::new(CollectorState::default()),
            reporter: Some(reporter),
        }
    }

    /// Record one observation.
    ///
    /// Appends to the history, updates the latest-value snapshot, and
    /// hands the sample to the reporter when one is configured.
    /// Reporting failures never affect local state.
    pub fn record_sample(&self, name: MetricName, value: f64) {
        let sample = VitalSample::new(name, value);

        {
            let mut state = self.state.lock();
            state.snapshot.set(name, value);
            state.history.push(sample.clone());
        }

        if let Some(reporter) = &self.reporter {
            reporter.report(sample);
        }
    }

    /// Apply an asynchronous platform observation.
    pub fn apply_event(&self, event: TimingEvent) {
        match event {
            TimingEvent::LayoutShift {
                value,
                had_recent_input,
            } => {
                // User-caused shifts are excluded by platform convention.
                if had_recent_input {
                    return;
                }
                let total = {
                    let mut state = self.state.lock();
                    state.layout_shift_total += value;
                    state.layout_shift_total
                };
                self.record_sample(MetricName::CumulativeLayoutShift, total);
            }
            TimingEvent::LargestContentfulPaint { value_ms } => {
                self.record_sample(MetricName::LargestContentfulPaint, value_ms);
            }
            TimingEvent::FirstInput { delay_ms } => {
                self.record_sample(MetricName::FirstInputDelay, delay_ms);
            }
        }
    }

    /// Sample whatever one-shot timing the probe can supply.
    ///
    /// A capability the probe lacks is skipped silently.
    pub fn sample_probe(&self, probe: &dyn TimingProbe) {
        if let Some(nav) = probe.navigation_timing() {
            self.record_sample(MetricName::TimeToFirstByte, nav.time_to_first_byte_ms);
            self.record_sample(MetricName::DomContentLoaded, nav.dom_content_loaded_ms);
            self.record_sample(MetricName::LoadComplete, nav.load_complete_ms);
        }
        if let Some(paint) = probe.paint_timing() {
            self.record_sample(
                MetricName::FirstContentfulPaint,
                paint.first_contentful_paint_ms,
            );
        }
    }

    /// Recompute the derived metrics from whatever raw metrics are set.
    ///
    /// Interactivity readiness is estimated as
    /// `max(dom_content_loaded, load_complete)` and blocking time as
    /// `max(0, tti - first_contentful_paint)`. Both are placeholder
    /// heuristics rather than the platform-standard computations, kept
    /// for parity with the showcase dashboard.
    pub fn resample_derived(&self) {
        let (dcl, load, fcp) = {
            let state = self.state.lock();
            (
                state.snapshot.get(MetricName::DomContentLoaded),
                state.snapshot.get(MetricName::LoadComplete),
                state.snapshot.get(MetricName::FirstContentfulPaint),
            )
        };

        let tti = match (dcl, load) {
            (Some(d), Some(l)) => Some(d.max(l)),
            (Some(d), None) => Some(d),
            (None, Some(l)) => Some(l),
            (None, None) => None,
        };

        if let Some(tti) = tti {
            self.record_sample(MetricName::TimeToInteractive, tti);
            if let Some(fcp) = fcp {
                self.record_sample(MetricName::TotalBlockingTime, (tti - fcp).max(0.0));
            }
        }
    }

    /// Composite quality score over the whole history.
    ///
    /// `None` until the first sample; otherwise the rounded mean of the
    /// per-rating point values.
    pub fn overall_score(&self) -> Option<u32> {
        let state = self.state.lock();
        if state.history.is_empty() {
            return None;
        }
        let total: u64 = state
            .history
            .iter()
            .map(|sample| sample.rating.points() as u64)
            .sum();
        let mean = total as f64 / state.history.len() as f64;
        Some(mean.round() as u32)
    }

    /// Counts of historical samples per rating bucket.
    pub fn rating_counts(&self) -> RatingCounts {
        let state = self.state.lock();
        let mut counts = RatingCounts::default();
        for sample in &state.history {
            match sample.rating {
                Rating::Good => counts.good += 1,
                Rating::NeedsImprovement => counts.needs_improvement += 1,
                Rating::Poor => counts.poor += 1,
            }
        }
        counts
    }

    /// Latest-value snapshot of all metrics.
    pub fn snapshot(&self) -> MetricsSnapshot {
        self.state.lock().snapshot
    }

    /// Number of samples recorded so far.
    pub fn sample_count(&self) -> usize {
        self.state.lock().history.len()
    }
}
