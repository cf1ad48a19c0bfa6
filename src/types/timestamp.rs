use crate::types::errors::TimestampError;
use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

pub type Timestamp = DateTime<Utc>;

const OFFSET_LAYOUTS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%:z", "%Y-%m-%d %H:%M:%S%.f%z"];
const NAIVE_LAYOUTS: [&str; 3] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f", "%Y/%m/%d %H:%M:%S%.f"];
const DATE_LAYOUTS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// Parses a timestamp and normalizes it to UTC.
///
/// Values carrying an offset are converted; values without one are taken to already be UTC, and
/// a bare date means midnight UTC.
pub fn parse_timestamp(value: &str) -> Result<Timestamp, TimestampError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(TimestampError::InvalidFormat("Value is an empty string".to_string()));
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Ok(parsed.with_timezone(&Utc));
    }

    for layout in OFFSET_LAYOUTS {
        if let Ok(parsed) = DateTime::parse_from_str(value, layout) {
            return Ok(parsed.with_timezone(&Utc));
        }
    }

    for layout in NAIVE_LAYOUTS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, layout) {
            return Ok(parsed.and_utc());
        }
    }

    for layout in DATE_LAYOUTS {
        if let Ok(date) = NaiveDate::parse_from_str(value, layout) {
            if let Some(midnight) = date.and_hms_opt(0, 0, 0) {
                return Ok(midnight.and_utc());
            }
        }
    }

    Err(TimestampError::UnsupportedLayout(value.to_string()))
}

/// Formats a timestamp the way output files carry it (RFC 3339, `Z` suffix).
pub fn format_timestamp(timestamp: &Timestamp) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
