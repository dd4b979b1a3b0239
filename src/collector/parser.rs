//! Parser for `df` tabular output.
//!
//! Pure functions over the captured command output, designed to be easily
//! testable with string inputs.

use crate::error::ParseError;
use crate::metrics::{Metric, MetricRecord};

/// Header lines contain this marker and carry no data.
const HEADER_MARKER: &str = "Filesystem";

/// Token index of the mount point in a data row.
const COL_MOUNT_POINT: usize = 8;

/// Parses trimmed `df` output into one record per metric per volume row.
///
/// Header lines are skipped; every other line is tokenized on whitespace
/// (consecutive runs collapse) and evaluated against the full metric
/// registry regardless of the configured selection, since filtering happens
/// at emission. Any underivable value aborts the whole parse; partial
/// results are never returned.
pub fn parse_df_output(content: &str) -> Result<Vec<MetricRecord>, ParseError> {
    let mut records = Vec::new();

    for line in content.lines() {
        if line.contains(HEADER_MARKER) {
            continue;
        }

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let volume = tokens
            .get(COL_MOUNT_POINT)
            .ok_or_else(|| ParseError::new(format!("missing mount point column in '{}'", line)))?;

        for metric in Metric::ALL {
            let value = metric.derive(&tokens)?;
            records.push(MetricRecord {
                metric,
                value,
                volume: (*volume).to_string(),
            });
        }
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::MetricValue;

    const TWO_VOLUMES: &str = "\
Filesystem    1M-blocks  Used Available Capacity   iused      ifree %iused  Mounted on
/dev/disk1s1     476802 14336    381183     4%    488234 4881964626    0%   /
/dev/disk1s4     476802 21504    381183     6%        21 4881964626    0%   /private/var/vm";

    #[test]
    fn test_header_produces_no_records() {
        let records = parse_df_output(
            "Filesystem    1M-blocks  Used Available Capacity   iused      ifree %iused  Mounted on",
        )
        .unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_two_rows_produce_full_registry_each() {
        let records = parse_df_output(TWO_VOLUMES).unwrap();
        assert_eq!(records.len(), 12);

        // Row order is preserved: first volume's six records come first.
        assert!(records[..6].iter().all(|r| r.volume == "/"));
        assert!(records[6..].iter().all(|r| r.volume == "/private/var/vm"));

        // Registry order within a row.
        let metrics: Vec<Metric> = records[..6].iter().map(|r| r.metric).collect();
        assert_eq!(metrics, Metric::ALL.to_vec());
    }

    #[test]
    fn test_derived_values() {
        let records = parse_df_output(TWO_VOLUMES).unwrap();
        assert_eq!(records[0].value, MetricValue::Count(14336));
        assert_eq!(records[1].value, MetricValue::Count(381183));
        // 14336 / (14336 + 381183) * 100
        assert_eq!(records[2].value.to_string(), "3.62");
        assert_eq!(records[3].value, MetricValue::Count(488234));
        assert_eq!(records[6].value, MetricValue::Count(21504));
    }

    #[test]
    fn test_non_numeric_value_is_fatal() {
        let input = "\
Filesystem    1M-blocks  Used Available Capacity   iused      ifree %iused  Mounted on
/dev/disk1s1     476802  n/a    381183     4%    488234 4881964626    0%   /";
        assert!(parse_df_output(input).is_err());
    }

    #[test]
    fn test_short_row_is_fatal() {
        assert!(parse_df_output("/dev/disk1s1 476802 14336").is_err());
    }

    #[test]
    fn test_empty_input_yields_no_records() {
        assert!(parse_df_output("").unwrap().is_empty());
    }
}
