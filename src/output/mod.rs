//! Emitter for the delimited metric protocol.

use crate::metrics::{MetricRecord, MetricSelection};
use std::io::{self, Write};

/// Writes one `<id>|<value>|<volume>|` line per enabled record.
///
/// Records arrive in parse order and are emitted in that order; disabled
/// metrics are silently dropped.
pub fn emit<W: Write>(
    records: &[MetricRecord],
    selection: &MetricSelection,
    mut out: W,
) -> io::Result<()> {
    for record in records {
        if selection.is_enabled(record.metric) {
            writeln!(
                out,
                "{}|{}|{}|",
                record.metric.id(),
                record.value,
                record.volume
            )?;
        }
    }
    Ok(())
}
