//! Latest-value snapshot of all tracked metrics.

use serde::Serialize;

use super::sample::MetricName;

/// Mapping from metric name to its latest observed value.
///
/// Every field starts unset and flips to observed on the first sample;
/// later samples of the same metric overwrite the value in place, which
/// is a value update, not a state change.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MetricsSnapshot {
    pub largest_contentful_paint: Option<f64>,
    pub first_input_delay: Option<f64>,
    pub cumulative_layout_shift: Option<f64>,
    pub first_contentful_paint: Option<f64>,
    pub time_to_first_byte: Option<f64>,
    pub dom_content_loaded: Option<f64>,
    pub load_complete: Option<f64>,
    pub time_to_interactive: Option<f64>,
    pub total_blocking_time: Option<f64>,
}

impl MetricsSnapshot {
    pub fn get(&self, name: MetricName) -> Option<f64> {
        match name {
            MetricName::LargestContentfulPaint => self.largest_contentful_paint,
            MetricName::FirstInputDelay => self.first_input_delay,
            MetricName::CumulativeLayoutShift => self.cumulative_layout_shift,
            MetricName::FirstContentfulPaint => self.first_contentful_paint,
            MetricName::TimeToFirstByte => self.time_to_first_byte,
            MetricName::DomContentLoaded => self.dom_content_loaded,
            MetricName::LoadComplete => self.load_complete,
            MetricName::TimeToInteractive => self.time_to_interactive,
            MetricName::TotalBlockingTime => self.total_blocking_time,
        }
    }

    pub fn set(&mut self, name: MetricName, value: f64) {
        let slot = match name {
            MetricName::LargestContentfulPaint => &mut self.largest_contentful_paint,
            MetricName::FirstInputDelay => &mut self.first_input_delay,
            MetricName::CumulativeLayoutShift => &mut self.cumulative_layout_shift,
            MetricName::FirstContentfulPaint => &mut self.first_contentful_paint,
            MetricName::TimeToFirstByte => &mut self.time_to_first_byte,
            MetricName::DomContentLoaded => &mut self.dom_content_loaded,
            MetricName::LoadComplete => &mut self.load_complete,
            MetricName::TimeToInteractive => &mut self.time_to_interactive,
            MetricName::TotalBlockingTime => &mut self.total_blocking_time,
        };
        *slot = Some(value);
    }
}
