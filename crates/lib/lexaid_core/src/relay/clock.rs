//! Response timestamps.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::{DateTime, SecondsFormat, Utc};

/// Latest timestamp handed out, in microseconds since the epoch.
static HIGH_WATER_MICROS: AtomicI64 = AtomicI64::new(i64::MIN);

/// Current UTC time as RFC 3339 with microseconds.
///
/// Never earlier than a previously returned value, even if the wall clock
/// steps backwards.
pub fn response_timestamp() -> String {
    let now = Utc::now();
    let previous = HIGH_WATER_MICROS.fetch_max(now.timestamp_micros(), Ordering::AcqRel);
    let stamp = if previous > now.timestamp_micros() {
        DateTime::<Utc>::from_timestamp_micros(previous).unwrap_or(now)
    } else {
        now
    };
    stamp.to_rfc3339_opts(SecondsFormat::Micros, true)
}
