//! Time utility functions

use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

/// Convert nanoseconds since Unix epoch to DateTime<Utc>
pub fn nanos_to_datetime(nanos: u64) -> DateTime<Utc> {
    let secs = (nanos / 1_000_000_000) as i64;
    let nsecs = (nanos % 1_000_000_000) as u32;
    Utc.timestamp_opt(secs, nsecs).single().unwrap_or_else(|| {
        tracing::warn!(nanos, "Invalid timestamp, using epoch");
        DateTime::UNIX_EPOCH
    })
}

/// Convert nanoseconds since Unix epoch to RFC 3339 (nanosecond precision, `Z` suffix)
pub fn nanos_to_iso(nanos: u64) -> String {
    nanos_to_datetime(nanos).to_rfc3339_opts(SecondsFormat::Nanos, true)
}

/// Current time as RFC 3339 (microsecond precision)
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Whole milliseconds between two nanosecond timestamps, `None` if `end < start`
pub fn duration_ms(start_nanos: u64, end_nanos: u64) -> Option<u64> {
    end_nanos
        .checked_sub(start_nanos)
        .map(|delta| delta / 1_000_000)
}
