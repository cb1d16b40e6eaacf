//! Performance-telemetry collection and scoring.
//!
//! Samples flow from platform sources into a single collector that
//! classifies each one against fixed thresholds, keeps an append-only
//! history, and derives a composite quality score.
//!
//! # Architecture
//!
//! ```text
//! TimingProbe ──(one-shot + periodic)──► VitalsCollector ──► score / counts
//! Observers ──► mpsc queue ──(owning task)──┘         └──► MetricReporter (best-effort POST)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use repolens::telemetry::{run_collector, NullProbe, VitalsCollector};
//!
//! let collector = Arc::new(VitalsCollector::new());
//! let (events_tx, events_rx) = tokio::sync::mpsc::channel(64);
//! tokio::spawn(run_collector(
//!     collector.clone(),
//!     Arc::new(NullProbe),
//!     events_rx,
//!     Duration::from_secs(5),
//!     cancel.clone(),
//! ));
//!
//! // ... later
//! println!("score: {:?}", collector.overall_score());
//! ```

mod collector;
mod probe;
mod reporter;
mod sample;
mod snapshot;

pub use collector::{RatingCounts, VitalsCollector};
pub use probe::{
    run_collector, NavigationTiming, NullProbe, PaintTiming, StaticProbe, TimingEvent, TimingProbe,
};
pub use reporter::{MetricReporter, ReporterConfig};
pub use sample::{rate, MetricName, Rating, VitalSample};
pub use snapshot::MetricsSnapshot;
