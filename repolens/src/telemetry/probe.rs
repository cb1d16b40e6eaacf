//! Platform timing sources and the event-driven collection loop.
//!
//! Platform observers (layout-shift, largest-contentful-paint,
//! first-input) arrive as typed events on a single mpsc queue consumed
//! by one owning task, so producers never touch collector state
//! directly. One-shot navigation/paint timing comes from a
//! [`TimingProbe`]; a probe that cannot supply a capability simply
//! returns `None` and collection for that signal is skipped.

use std::sync::Arc;
use std::time::Duration;

use serde::Deserialize;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::collector::VitalsCollector;

/// Navigation timing as sampled from the platform, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct NavigationTiming {
    pub time_to_first_byte_ms: f64,
    pub dom_content_loaded_ms: f64,
    pub load_complete_ms: f64,
}

/// Paint timing as sampled from the platform, in milliseconds.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct PaintTiming {
    pub first_contentful_paint_ms: f64,
}

/// One-shot timing source.
///
/// Each method returns `None` when the platform does not expose that
/// capability; absence is non-fatal and simply skips collection.
pub trait TimingProbe: Send + Sync {
    fn navigation_timing(&self) -> Option<NavigationTiming>;
    fn paint_timing(&self) -> Option<PaintTiming>;
}

/// Probe with no capabilities at all.
///
/// Useful for tests and headless runs where only observer events exist.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullProbe;

impl TimingProbe for NullProbe {
    fn navigation_timing(&self) -> Option<NavigationTiming> {
        None
    }

    fn paint_timing(&self) -> Option<PaintTiming> {
        None
    }
}

/// Probe answering with fixed values, for replay and tests.
#[derive(Debug, Default, Clone, Copy)]
pub struct StaticProbe {
    pub navigation: Option<NavigationTiming>,
    pub paint: Option<PaintTiming>,
}

impl TimingProbe for StaticProbe {
    fn navigation_timing(&self) -> Option<NavigationTiming> {
        self.navigation
    }

    fn paint_timing(&self) -> Option<PaintTiming> {
        self.paint
    }
}

/// Asynchronous platform-reported observation.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TimingEvent {
    /// A layout instability increment. Shifts caused by recent user
    /// input are excluded from accumulation by platform convention.
    LayoutShift { value: f64, had_recent_input: bool },

    /// Largest rendered content timing, milliseconds.
    LargestContentfulPaint { value_ms: f64 },

    /// First input responsiveness, milliseconds of delay.
    FirstInput { delay_ms: f64 },
}

/// Drive passive collection until cancelled.
///
/// On activation the probe is sampled once; thereafter observer events
/// are applied as they arrive, and every `resample_interval` the probe
/// is re-sampled and the derived metrics are recomputed from whatever
/// raw metrics are currently set.
pub async fn run_collector(
    collector: Arc<VitalsCollector>,
    probe: Arc<dyn TimingProbe>,
    mut events: mpsc::Receiver<TimingEvent>,
    resample_interval: Duration,
    cancel: CancellationToken,
) {
    collector.sample_probe(probe.as_ref());

    let mut ticker = tokio::time::interval(resample_interval);
    ticker.tick().await;

    let mut events_open = true;
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("telemetry collector shutting down");
                break;
            }
            event = events.recv(), if events_open => {
                match event {
                    Some(event) => collector.apply_event(event),
                    None => events_open = false,
                }
            }
            _ = ticker.tick() => {
                collector.sample_probe(probe.as_ref());
                collector.resample_derived();
            }
        }
    }
}
