use std::fmt;

// ── Fetch unit ────────────────────────────────────────────────────────────────

/// One resolved period descriptor, mapping to exactly one remote resource.
///
/// NDBC serves realtime data as a rolling ~45-day feed, fully archived years
/// as one yearly file, and the current/prior year broken out by month.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchUnit {
    Realtime,
    Year(i32),
    YearMonth { year: i32, month: u32 },
}

impl fmt::Display for FetchUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchUnit::Realtime => write!(f, "realtime"),
            FetchUnit::Year(y) => write!(f, "{}", y),
            FetchUnit::YearMonth { year, month } => write!(f, "{}/{}", year, month),
        }
    }
}

// ── Fetch task ────────────────────────────────────────────────────────────────

/// The unit of concurrent work: one station, one period, one resolved URL.
///
/// Tasks are generated station-major, fetch-unit-minor, and that construction
/// order is the contract for output ordering regardless of completion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTask {
    pub station: String,
    pub unit: FetchUnit,
    pub url: String,
}

// ── Scrape result ─────────────────────────────────────────────────────────────

/// Aggregated outcome of one pipeline run.
#[derive(Debug)]
pub struct ScrapeResult {
    /// The full CSV text, header lines included when requested.
    pub csv: String,
    pub tasks: usize,
    pub failures: usize,
}
