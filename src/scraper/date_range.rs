//! Date-filter resolution: expands the user's range token into the ordered
//! list of fetch units to retrieve.
//!
//! NDBC only archives a year as a single historical file once it is neither
//! the current nor the prior year; until then the data exists as per-month
//! files (plus the realtime feed for the latest observations). The resolver
//! encodes that partitioning so callers never have to know about it.

use crate::models::FetchUnit;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RangeError {
    #[error("unrecognized date filter token '{0}' (expected 'realtime', a 4-digit year, or YYYY/M)")]
    BadToken(String),
}

/// Expand a raw date-filter token into an ordered fetch-unit sequence.
///
/// `None` or an empty/whitespace token means `"realtime"`. The sequence is a
/// pure function of `(token, today)` — network timing never enters into it.
pub fn resolve_range(token: Option<&str>, today: NaiveDate) -> Result<Vec<FetchUnit>, RangeError> {
    let raw = match token.map(str::trim) {
        Some(t) if !t.is_empty() => t,
        _ => "realtime",
    };

    // Split on '-' and drop duplicates, keeping first-occurrence order.
    let mut tokens: Vec<&str> = Vec::new();
    for t in raw.split('-') {
        if !tokens.contains(&t) {
            tokens.push(t);
        }
    }

    let mut seeds = if tokens.len() == 1 {
        vec![parse_seed(tokens[0])?]
    } else {
        // Only the first two tokens participate; anything beyond is silently
        // discarded, as is the order the user typed them in.
        let a = seed_year(tokens[0], today)?;
        let b = seed_year(tokens[1], today)?;
        let (high, low) = (a.max(b), a.min(b));
        (low..=high).rev().map(FetchUnit::Year).collect()
    };

    expand_unarchived_years(&mut seeds, today);
    Ok(seeds)
}

/// Interpret a single-token filter directly as one fetch unit.
///
/// The `YYYY/M` form never comes from raw user input; it only appears in
/// internally generated sequences, but accepting it here keeps the grammar
/// closed under the resolver's own substitutions.
fn parse_seed(token: &str) -> Result<FetchUnit, RangeError> {
    if token == "realtime" {
        return Ok(FetchUnit::Realtime);
    }
    if let Some(year) = parse_year(token) {
        return Ok(FetchUnit::Year(year));
    }
    if let Some((y, m)) = token.split_once('/') {
        if let (Some(year), Ok(month)) = (parse_year(y), m.parse::<u32>()) {
            if (1..=12).contains(&month) {
                return Ok(FetchUnit::YearMonth { year, month });
            }
        }
    }
    Err(RangeError::BadToken(token.to_string()))
}

/// Resolve a range endpoint to an integer year; `realtime` means this year.
fn seed_year(token: &str, today: NaiveDate) -> Result<i32, RangeError> {
    if token == "realtime" {
        return Ok(today.year());
    }
    parse_year(token).ok_or_else(|| RangeError::BadToken(token.to_string()))
}

fn parse_year(token: &str) -> Option<i32> {
    if token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit()) {
        token.parse().ok()
    } else {
        None
    }
}

/// Replace a leading current-year or prior-year token with per-month units.
///
/// Only the first element is examined and removed; plain year units deeper in
/// the sequence are left alone. When the leading token is the current year
/// (or the realtime feed, which implies it), the expansion also covers the
/// current year's elapsed months and puts a `Realtime` unit at the very front
/// for the not-yet-archived latest observations.
fn expand_unarchived_years(seeds: &mut Vec<FetchUnit>, today: NaiveDate) {
    let current = today.year();
    let prior = current - 1;

    let leading_year = match seeds.first() {
        Some(FetchUnit::Realtime) => Some(current),
        Some(FetchUnit::Year(y)) => Some(*y),
        _ => None,
    };

    let is_current = leading_year == Some(current);
    if !is_current && leading_year != Some(prior) {
        return;
    }

    seeds.remove(0);

    let mut expanded = Vec::new();
    if is_current {
        expanded.push(FetchUnit::Realtime);
        expanded.extend((1..=today.month()).map(|month| FetchUnit::YearMonth {
            year: current,
            month,
        }));
    }
    expanded.extend((1..=12).map(|month| FetchUnit::YearMonth { year: prior, month }));
    expanded.append(seeds);

    // The prior year's monthly files disappear once NDBC consolidates them
    // into the yearly archive, so keep a plain-year reference around unless
    // the range already carries one. Month units do not count as present.
    if !expanded.contains(&FetchUnit::Year(prior)) {
        expanded.push(FetchUnit::Year(prior));
    }

    *seeds = expanded;
}
