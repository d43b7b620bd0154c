//! Station-list input handling.
//!
//! The positional `station_id` argument is either a comma-separated list of
//! ids or the name of an existing file carrying one id per line; a file is
//! detected by a plain existence check, matching the CLI's documented
//! behavior.

use anyhow::{Context, Result, bail};
use std::fs;
use std::path::Path;

/// Resolve the raw `station_id` argument into an ordered station list.
pub fn station_list(input: &str) -> Result<Vec<String>> {
    let stations = if Path::new(input).exists() {
        let content = fs::read_to_string(input)
            .with_context(|| format!("Failed to read station file {}", input))?;
        split_ids(&content, '\n')
    } else {
        split_ids(input, ',')
    };

    if stations.is_empty() {
        bail!("No station ids found in '{}'", input);
    }
    Ok(stations)
}

fn split_ids(input: &str, sep: char) -> Vec<String> {
    input
        .split(sep)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comma_list_preserves_order() {
        let stations = station_list("PORO3,UNLA2").unwrap();
        assert_eq!(stations, vec!["PORO3", "UNLA2"]);
    }

    #[test]
    fn single_id_is_a_one_element_list() {
        assert_eq!(station_list("PORO3").unwrap(), vec!["PORO3"]);
    }

    #[test]
    fn blank_entries_are_skipped() {
        let stations = station_list("PORO3,, UNLA2 ,").unwrap();
        assert_eq!(stations, vec!["PORO3", "UNLA2"]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(station_list(",,").is_err());
    }

    #[test]
    fn file_input_reads_one_id_per_line() {
        let path = std::env::temp_dir().join("raspar_station_list_test.txt");
        fs::write(&path, "PORO3\nUNLA2\n\n").unwrap();

        let stations = station_list(path.to_str().unwrap()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(stations, vec!["PORO3", "UNLA2"]);
    }
}
