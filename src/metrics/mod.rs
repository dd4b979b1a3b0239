//! Metric registry for logical disk metrics.
//!
//! Six metrics are derived from fixed columns of `df -l -m` output. Their
//! order is fixed and shared by the metric-state bitmask, the parser and
//! the emitter: used, free, %used, iused, ifree, i%used.

use crate::error::{ParseError, ProbeError};
use std::fmt;

/// One derivable quantity about a mounted volume.
///
/// Declaration order is the registry order; `Metric::ALL` and the `as usize`
/// discriminants both follow it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Metric {
    Used,
    Free,
    UsedPercent,
    InodesUsed,
    InodesFree,
    InodesUsedPercent,
}

/// Column positions in the tokenized `df` row.
const COL_USED: usize = 2;
const COL_FREE: usize = 3;
const COL_IUSED: usize = 5;
const COL_IFREE: usize = 6;

impl Metric {
    /// All metrics in registry order.
    pub const ALL: [Metric; 6] = [
        Metric::Used,
        Metric::Free,
        Metric::UsedPercent,
        Metric::InodesUsed,
        Metric::InodesFree,
        Metric::InodesUsedPercent,
    ];

    /// Short key, matching the bitmask position documentation.
    pub fn key(&self) -> &'static str {
        match self {
            Metric::Used => "used",
            Metric::Free => "free",
            Metric::UsedPercent => "%used",
            Metric::InodesUsed => "iused",
            Metric::InodesFree => "ifree",
            Metric::InodesUsedPercent => "i%used",
        }
    }

    /// Stable identifier emitted on every output line.
    ///
    /// Format is `<numeric-code>:<display-name>:<type-code>`.
    pub fn id(&self) -> &'static str {
        match self {
            Metric::Used => "40:Used Space:4",
            Metric::Free => "24:Free Space:4",
            Metric::UsedPercent => "11:% Used Space:6",
            Metric::InodesUsed => "1641:Used Inodes:4",
            Metric::InodesFree => "1642:Free Inodes:4",
            Metric::InodesUsedPercent => "1643:% Used Inodes:6",
        }
    }

    /// Derives this metric's value from one tokenized `df` row.
    ///
    /// A missing or non-numeric column is a `ParseError`; the caller treats
    /// that as fatal rather than skipping the record.
    pub fn derive(&self, row: &[&str]) -> Result<MetricValue, ParseError> {
        match self {
            Metric::Used => Ok(MetricValue::Count(field_i64(row, COL_USED, "used")?)),
            Metric::Free => Ok(MetricValue::Count(field_i64(row, COL_FREE, "free")?)),
            Metric::UsedPercent => {
                let used = field_i64(row, COL_USED, "used")?;
                let free = field_i64(row, COL_FREE, "free")?;
                Ok(MetricValue::Percent(ratio_percent(used, free)))
            }
            Metric::InodesUsed => Ok(MetricValue::Count(field_i64(row, COL_IUSED, "iused")?)),
            Metric::InodesFree => Ok(MetricValue::Count(field_i64(row, COL_IFREE, "ifree")?)),
            Metric::InodesUsedPercent => {
                let iused = field_i64(row, COL_IUSED, "iused")?;
                let ifree = field_i64(row, COL_IFREE, "ifree")?;
                Ok(MetricValue::Percent(ratio_percent(iused, ifree)))
            }
        }
    }
}

/// Parses one whitespace-tokenized column as an integer.
fn field_i64(row: &[&str], idx: usize, name: &str) -> Result<i64, ParseError> {
    row.get(idx)
        .ok_or_else(|| ParseError::new(format!("missing {} column", name)))?
        .parse()
        .map_err(|_| ParseError::new(format!("invalid {} value", name)))
}

/// Percentage of `part` in `part + rest`.
///
/// A zero total yields 0.0 so volumes reporting no capacity at all
/// (e.g. pseudo filesystems) emit "0.00" instead of NaN.
fn ratio_percent(part: i64, rest: i64) -> f64 {
    let total = part + rest;
    if total == 0 {
        return 0.0;
    }
    part as f64 / total as f64 * 100.0
}

/// A derived metric value.
///
/// Counts print as plain integers, percentages with exactly two decimals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MetricValue {
    Count(i64),
    Percent(f64),
}

impl fmt::Display for MetricValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetricValue::Count(v) => write!(f, "{}", v),
            MetricValue::Percent(p) => {
                // Ties round away from zero: 3.625 prints as "3.63".
                // A bare "{:.2}" rounds ties to even and would print "3.62".
                let rounded = (p * 100.0).round() / 100.0;
                write!(f, "{:.2}", rounded)
            }
        }
    }
}

/// One parsed (metric, volume) measurement.
///
/// The parser produces records for every metric regardless of the configured
/// selection; the emitter filters.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricRecord {
    pub metric: Metric,
    pub value: MetricValue,
    pub volume: String,
}

/// Which metrics to emit, in registry order.
///
/// Built once from the command-line metric state and read-only afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MetricSelection {
    enabled: [bool; Metric::ALL.len()],
}

impl Default for MetricSelection {
    fn default() -> Self {
        Self::all()
    }
}

impl MetricSelection {
    /// All metrics enabled. Equivalent to omitting the argument.
    pub fn all() -> Self {
        Self {
            enabled: [true; Metric::ALL.len()],
        }
    }

    /// Parses the metric state argument.
    ///
    /// The argument is a comma-separated list of integer flags, positionally
    /// mapped to the registry order; a metric is enabled iff its flag is 1.
    /// Surrounding or embedded quote characters are stripped first. The
    /// token count must equal the registry size.
    pub fn parse(state: &str) -> Result<Self, ProbeError> {
        let cleaned = state.replace('"', "");
        let tokens: Vec<&str> = cleaned.split(',').collect();

        if tokens.len() != Metric::ALL.len() {
            return Err(ProbeError::Invalid(
                "Invalid number of metric state".to_string(),
            ));
        }

        let mut enabled = [false; Metric::ALL.len()];
        for (slot, token) in enabled.iter_mut().zip(&tokens) {
            let flag: i64 = token.trim().parse().map_err(|_| {
                ProbeError::Invalid(format!("Invalid metric state token '{}'", token))
            })?;
            *slot = flag == 1;
        }

        Ok(Self { enabled })
    }

    pub fn is_enabled(&self, metric: Metric) -> bool {
        self.enabled[metric as usize]
    }
}
