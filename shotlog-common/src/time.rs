//! Timestamp utilities
//!
//! Upload timestamps are stored as RFC3339 text, but records written by
//! earlier builds may carry bare epoch seconds instead. `parse_uploaded_at`
//! is the single decoder every read path goes through.

use chrono::{DateTime, TimeZone, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Decode an `uploaded_at` value of unknown vintage.
///
/// Priority order:
/// 1. RFC3339 / ISO-8601 string (the current storage format)
/// 2. Bare epoch seconds, integer or fractional
/// 3. Anything else (including empty) falls back to `now()`
pub fn parse_uploaded_at(raw: &str) -> DateTime<Utc> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return dt.with_timezone(&Utc);
    }

    if let Ok(secs) = trimmed.parse::<i64>() {
        if let Some(dt) = Utc.timestamp_opt(secs, 0).single() {
            return dt;
        }
    }

    if let Ok(secs) = trimmed.parse::<f64>() {
        if secs.is_finite() {
            let whole = secs.trunc() as i64;
            let nanos = (secs.fract() * 1_000_000_000.0) as u32;
            if let Some(dt) = Utc.timestamp_opt(whole, nanos).single() {
                return dt;
            }
        }
    }

    now()
}
