//! Normalization of NDBC fixed-width text into CSV records.

/// Convert one fetched text block into station-prefixed CSV lines.
///
/// Comment lines (the `#`-prefixed column-name and unit headers baked into
/// every NDBC file) are dropped, whitespace-delimited columns are collapsed
/// to commas, and every surviving line gains the owning station id as its
/// first field. Stateless; empty input yields empty output.
pub fn to_csv_block(data: &str, station: &str) -> String {
    let mut out = String::with_capacity(data.len());
    for line in data.lines() {
        if line.starts_with('#') || line.trim().is_empty() {
            continue;
        }
        out.push_str(station);
        out.push(',');
        out.push_str(&collapse_columns(line));
        out.push('\n');
    }
    out
}

/// Collapse each whitespace run that follows a non-whitespace token into a
/// single comma. A run trailing the last token still becomes a comma, and
/// leading whitespace is dropped.
fn collapse_columns(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    let mut pending_sep = false;
    let mut seen_token = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            pending_sep = seen_token;
        } else {
            if pending_sep {
                out.push(',');
                pending_sep = false;
            }
            out.push(ch);
            seen_token = true;
        }
    }
    if pending_sep {
        out.push(',');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_lines_are_dropped_and_data_lines_prefixed() {
        let block = "#YY  MM DD hh mm WDIR WSPD\n2025 01 02 03 40  210  5.5\n";
        assert_eq!(
            to_csv_block(block, "PORO3"),
            "PORO3,2025,01,02,03,40,210,5.5\n"
        );
    }

    #[test]
    fn both_header_lines_are_dropped() {
        let block = "#YY  MM DD hh mm WDIR\n#yr  mo dy hr mn degT\n2025 01 02 03 40 210\n2025 01 02 04 40 200\n";
        assert_eq!(
            to_csv_block(block, "UNLA2"),
            "UNLA2,2025,01,02,03,40,210\nUNLA2,2025,01,02,04,40,200\n"
        );
    }

    #[test]
    fn trailing_whitespace_becomes_trailing_comma() {
        assert_eq!(collapse_columns("210  5.5  "), "210,5.5,");
    }

    #[test]
    fn leading_whitespace_is_not_a_separator() {
        assert_eq!(collapse_columns("  210 5.5"), "210,5.5");
    }

    #[test]
    fn tabs_collapse_like_spaces() {
        assert_eq!(collapse_columns("210\t5.5"), "210,5.5");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(to_csv_block("", "PORO3"), "");
        assert_eq!(to_csv_block("\n\n", "PORO3"), "");
    }
}
