//! Replay recorded timing events through the collector.
//!
//! A replay file is JSON of the form:
//!
//! ```json
//! {
//!   "navigation": {
//!     "time_to_first_byte_ms": 120.0,
//!     "dom_content_loaded_ms": 800.0,
//!     "load_complete_ms": 1500.0
//!   },
//!   "paint": { "first_contentful_paint_ms": 900.0 },
//!   "events": [
//!     { "type": "layout-shift", "value": 0.05, "had_recent_input": false },
//!     { "type": "largest-contentful-paint", "value_ms": 1800.0 },
//!     { "type": "first-input", "delay_ms": 45.0 }
//!   ]
//! }
//! ```

use std::path::PathBuf;

use clap::Args;
use repolens::telemetry::{
    NavigationTiming, PaintTiming, StaticProbe, TimingEvent, VitalsCollector,
};
use serde::Deserialize;

use crate::error::CliError;

/// Arguments for the vitals replay command.
#[derive(Debug, Args)]
pub struct VitalsArgs {
    /// Path to a JSON replay file
    pub file: PathBuf,
}

#[derive(Debug, Deserialize)]
struct ReplayFile {
    navigation: Option<NavigationTiming>,
    paint: Option<PaintTiming>,
    #[serde(default)]
    events: Vec<TimingEvent>,
}

/// Feed a replay file through a fresh collector and print the results.
pub fn run(args: VitalsArgs) -> Result<(), CliError> {
    let text = std::fs::read_to_string(&args.file)?;
    let replay: ReplayFile = serde_json::from_str(&text)?;

    let collector = VitalsCollector::new();
    let probe = StaticProbe {
        navigation: replay.navigation,
        paint: replay.paint,
    };

    collector.sample_probe(&probe);
    for event in replay.events {
        collector.apply_event(event);
    }
    collector.resample_derived();

    let counts = collector.rating_counts();
    match collector.overall_score() {
        Some(score) => println!("overall score: {}", score),
        None => println!("overall score: n/a (no samples)"),
    }
    println!(
        "ratings: {} good, {} needs-improvement, {} poor",
        counts.good, counts.needs_improvement, counts.poor
    );
    println!(
        "{}",
        serde_json::to_string_pretty(&collector.snapshot())?
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_replay_file_parses() {
        let json = r#"{
            "navigation": {
                "time_to_first_byte_ms": 120.0,
                "dom_content_loaded_ms": 800.0,
                "load_complete_ms": 1500.0
            },
            "events": [
                { "type": "first-input", "delay_ms": 45.0 }
            ]
        }"#;
        let replay: ReplayFile = serde_json::from_str(json).unwrap();
        assert!(replay.navigation.is_some());
        assert!(replay.paint.is_none());
        assert_eq!(replay.events.len(), 1);
    }

    #[test]
    fn test_run_replays_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"events": [{{ "type": "largest-contentful-paint", "value_ms": 1200.0 }}]}}"#
        )
        .unwrap();

        let result = run(VitalsArgs {
            file: file.path().to_path_buf(),
        });
        assert!(result.is_ok());
    }
}
