//! Pipeline orchestrator: date-filter resolution → fan-out fetch → CSV fan-in.
//!
//! Every (station × fetch-unit) pair becomes one spawned task; all tasks run
//! at once and every failure collapses to an empty block. Join handles are
//! held in task-construction order (station-major, fetch-unit-minor) and
//! awaited in that order, so the output layout never depends on which fetch
//! finishes first.

use crate::config::AppConfig;
use crate::models::{FetchTask, FetchUnit, ScrapeResult};
use crate::scraper::date_range::resolve_range;
use crate::scraper::transform::to_csv_block;
use crate::scraper::urls::resource_url;
use crate::scraper::{BuoyDataSource, NdbcSource};
use anyhow::Result;
use chrono::Local;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

/// NDBC standard-met column names, led by the station-id column the
/// transformer prepends to every record.
const HEADER_FIELDS: &str =
    "station_id,YY,MM,DD,hh,mm,WDIR,WSPD,GST,WVHT,DPD,APD,MWD,PRES,ATMP,WTMP,DEWP,VIS,PTDY,TIDE";
const HEADER_UNITS: &str =
    "station_id,yr,mo,dy,hr,mn,degT,m/s,m/s,m,sec,sec,degT,hPa,degC,degC,degC,nmi,hPa,ft";

pub struct Pipeline {
    config: AppConfig,
    source: Arc<dyn BuoyDataSource>,
}

impl Pipeline {
    pub fn new(config: AppConfig) -> Result<Self> {
        let source = Arc::new(NdbcSource::new(&config.scraper)?);
        Ok(Self { config, source })
    }

    /// Construct a pipeline over an arbitrary source (tests).
    pub fn with_source(config: AppConfig, source: Arc<dyn BuoyDataSource>) -> Self {
        Self { config, source }
    }

    /// Fetch and normalize all requested station data into one CSV string.
    ///
    /// Fails only on a malformed date filter, before any network activity;
    /// individual fetch failures become empty contributions.
    pub async fn run(
        &self,
        stations: &[String],
        date_filter: Option<&str>,
        add_headers: bool,
    ) -> Result<ScrapeResult> {
        let units = resolve_range(date_filter, Local::now().date_naive())?;
        let tasks = build_tasks(stations, &units, &self.config.scraper.base_url);

        info!(
            "Fetching {} resources ({} stations × {} periods)",
            tasks.len(),
            stations.len(),
            units.len()
        );

        let mut handles = Vec::with_capacity(tasks.len());
        for task in &tasks {
            let source = Arc::clone(&self.source);
            let url = task.url.clone();
            handles.push((task.clone(), tokio::spawn(async move {
                source.fetch_text(&url).await
            })));
        }

        let mut csv = String::new();
        if add_headers {
            csv.push_str(HEADER_FIELDS);
            csv.push('\n');
            csv.push_str(HEADER_UNITS);
            csv.push('\n');
        }

        let mut failures = 0usize;
        for (task, handle) in handles {
            match handle.await {
                Ok(Ok(body)) => {
                    debug!("{} {}: {} bytes", task.station, task.unit, body.len());
                    csv.push_str(&to_csv_block(&body, &task.station));
                }
                Ok(Err(e)) => {
                    warn!("{} {} ({}): {:#}", task.station, task.unit, task.url, e);
                    failures += 1;
                }
                Err(e) => {
                    error!("Task panic for {} {}: {}", task.station, task.unit, e);
                    failures += 1;
                }
            }
        }

        info!(
            "Done: {} resources, {} unavailable",
            tasks.len(),
            failures
        );

        Ok(ScrapeResult {
            csv,
            tasks: tasks.len(),
            failures,
        })
    }
}

/// Expand (stations × units) into the ordered task list. Outer loop over
/// stations in input order, inner loop over units in resolver order; this
/// nesting is the output-ordering contract.
fn build_tasks(stations: &[String], units: &[FetchUnit], base_url: &str) -> Vec<FetchTask> {
    let mut tasks = Vec::with_capacity(stations.len() * units.len());
    for station in stations {
        for unit in units {
            tasks.push(FetchTask {
                station: station.clone(),
                unit: *unit,
                url: resource_url(base_url, station, unit),
            });
        }
    }
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use async_trait::async_trait;
    use std::collections::HashMap;

    /// In-memory source: URLs absent from the map behave like failed fetches.
    struct FakeSource {
        bodies: HashMap<String, String>,
    }

    #[async_trait]
    impl BuoyDataSource for FakeSource {
        async fn fetch_text(&self, url: &str) -> Result<String> {
            self.bodies
                .get(url)
                .cloned()
                .ok_or_else(|| anyhow!("HTTP 404 Not Found for {}", url))
        }
    }

    fn pipeline_with(bodies: HashMap<String, String>) -> Pipeline {
        Pipeline::with_source(AppConfig::default(), Arc::new(FakeSource { bodies }))
    }

    fn default_base() -> String {
        AppConfig::default().scraper.base_url
    }

    fn yearly_url(base: &str, station: &str, year: i32) -> String {
        resource_url(base, station, &FetchUnit::Year(year))
    }

    #[test]
    fn task_order_is_station_major() {
        let stations = vec!["PORO3".to_string(), "UNLA2".to_string()];
        let units = vec![FetchUnit::Year(2016), FetchUnit::Year(2015)];
        let tasks = build_tasks(&stations, &units, "https://www.ndbc.noaa.gov");

        let labels: Vec<String> = tasks
            .iter()
            .map(|t| format!("{} {}", t.station, t.unit))
            .collect();
        assert_eq!(
            labels,
            vec!["PORO3 2016", "PORO3 2015", "UNLA2 2016", "UNLA2 2015"]
        );
    }

    #[tokio::test]
    async fn failed_fetch_keeps_its_slot_empty() {
        // Three yearly tasks; the middle one has no body and must not shift
        // or drop the blocks around it.
        let stations = vec!["PORO3".to_string()];
        let base = default_base();

        let mut bodies = HashMap::new();
        bodies.insert(
            yearly_url(&base, "PORO3", 2017),
            "#hdr\n2017 01 01 00 00 1\n".to_string(),
        );
        bodies.insert(
            yearly_url(&base, "PORO3", 2015),
            "#hdr\n2015 01 01 00 00 3\n".to_string(),
        );

        let result = pipeline_with(bodies)
            .run(&stations, Some("2017-2015"), false)
            .await
            .unwrap();

        assert_eq!(result.tasks, 3);
        assert_eq!(result.failures, 1);
        assert_eq!(
            result.csv,
            "PORO3,2017,01,01,00,00,1\nPORO3,2015,01,01,00,00,3\n"
        );
    }

    #[tokio::test]
    async fn headers_precede_station_blocks_in_input_order() {
        let stations = vec!["PORO3".to_string(), "UNLA2".to_string()];
        let base = default_base();

        let mut bodies = HashMap::new();
        bodies.insert(
            yearly_url(&base, "PORO3", 2015),
            "#YY MM\n2015 06\n".to_string(),
        );
        bodies.insert(
            yearly_url(&base, "UNLA2", 2015),
            "#YY MM\n2015 07\n".to_string(),
        );

        let result = pipeline_with(bodies)
            .run(&stations, Some("2015"), true)
            .await
            .unwrap();

        let lines: Vec<&str> = result.csv.lines().collect();
        assert_eq!(lines[0], HEADER_FIELDS);
        assert_eq!(lines[1], HEADER_UNITS);
        assert_eq!(lines[2], "PORO3,2015,06");
        assert_eq!(lines[3], "UNLA2,2015,07");
        assert_eq!(result.failures, 0);
    }

    #[test]
    fn header_suppression_leaves_pure_data() {
        let pipeline = pipeline_with(HashMap::new());
        let stations = vec!["PORO3".to_string()];

        let result = tokio_test::block_on(pipeline.run(&stations, Some("2015"), false)).unwrap();
        assert_eq!(result.csv, "");
        assert_eq!(result.failures, 1);
    }

    #[tokio::test]
    async fn malformed_filter_fails_before_any_fetch() {
        let pipeline = pipeline_with(HashMap::new());
        let stations = vec!["PORO3".to_string()];

        let err = pipeline
            .run(&stations, Some("sometime"), true)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("sometime"));
    }
}
