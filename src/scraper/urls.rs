//! Resource locators for the three NDBC feed layouts.

use crate::models::FetchUnit;

/// Build the URL for one (station, fetch unit) pair.
///
/// Station ids are assumed path-safe; the only normalization is case folding
/// (upper for the realtime feed, lower for the archives, matching how NDBC
/// names its files).
pub fn resource_url(base: &str, station: &str, unit: &FetchUnit) -> String {
    let base = base.trim_end_matches('/');
    match unit {
        FetchUnit::Realtime => {
            format!("{}/data/realtime2/{}.txt", base, station.to_uppercase())
        }
        FetchUnit::Year(year) => format!(
            "{}/view_text_file.php?filename={}h{}.txt.gz&dir=data/historical/stdmet/",
            base,
            station.to_lowercase(),
            year
        ),
        FetchUnit::YearMonth { year, month } => format!(
            "{}/view_text_file.php?filename={}{}{}.txt.gz&dir=data/stdmet/{}/",
            base,
            station.to_lowercase(),
            month_code(*month),
            year,
            month_abbr(*month)
        ),
    }
}

/// NDBC's monthly file-name code: the month number, except `a`/`b`/`v` for
/// October/November/December. The `v` for December is the service's own
/// irregularity, not a typo.
fn month_code(month: u32) -> String {
    match month {
        10 => "a".to_string(),
        11 => "b".to_string(),
        12 => "v".to_string(),
        m => m.to_string(),
    }
}

fn month_abbr(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => unreachable!("month out of range"),
    }
}
