use chrono::{DateTime, Local};
use std::time::{Duration, Instant};
use tracing::info;

/// A simple wall-clock timer for logging elapsed time.
pub struct Timer {
    label: String,
    start: Instant,
}

impl Timer {
    pub fn start(label: impl Into<String>) -> Self {
        let label = label.into();
        info!("⏱  Starting: {}", label);
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        info!(
            "⏱  Finished: {} (took {:.2?})",
            self.label,
            self.start.elapsed()
        );
    }
}

/// Default output file name when `--output-file` is not given:
/// `noaa-buoy_<stations>_<filter>_<timestamp>.csv`, commas in the station
/// list swapped for dashes so the name stays path-friendly.
pub fn default_output_name(
    stations: &str,
    date_filter: Option<&str>,
    now: DateTime<Local>,
) -> String {
    format!(
        "noaa-buoy_{}_{}_{}.csv",
        stations.replace(',', "-"),
        date_filter.unwrap_or("realtime"),
        now.format("%Y%m%d%H%M%S%z")
    )
}
