use chrono::{SecondsFormat, Timelike};

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Format a timestamp as RFC 3339 with nanosecond precision.
///
/// Trailing zeros of the fractional second are dropped (and the fraction
/// omitted entirely when zero), and UTC is written as `Z`, e.g.
/// `2024-05-01T10:00:00.1234Z`.
pub fn format_rfc3339_nano(ts: &Timestamp) -> String {
    let seconds = ts.to_rfc3339_opts(SecondsFormat::Secs, true);
    let nanos = ts.nanosecond() % 1_000_000_000;
    if nanos == 0 {
        return seconds;
    }

    let fraction = format!("{nanos:09}");
    let fraction = fraction.trim_end_matches('0');
    let base = seconds.trim_end_matches('Z');
    format!("{base}.{fraction}Z")
}
