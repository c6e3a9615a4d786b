//! Parsing of user-supplied start/end times.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};

/// A parsed time and whether it named a whole day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct When {
    pub at: DateTime<Utc>,
    pub date_only: bool,
}

/// Accepts RFC 3339, "YYYY-MM-DDTHH:MM" / "YYYY-MM-DD HH:MM" in local time,
/// or "YYYY-MM-DD" (local midnight).
pub fn parse_when(input: &str) -> Result<When> {
    parse_when_in(input, &Local)
}

pub fn parse_when_in<Tz: TimeZone>(input: &str, tz: &Tz) -> Result<When> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Ok(When {
            at: dt.with_timezone(&Utc),
            date_only: false,
        });
    }

    for format in ["%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(When {
                at: localize(naive, tz, input)?,
                date_only: false,
            });
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(input, "%Y-%m-%d") {
        let midnight = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| anyhow!("Invalid date '{}'", input))?;
        return Ok(When {
            at: localize(midnight, tz, input)?,
            date_only: true,
        });
    }

    Err(anyhow!(
        "Invalid date/time '{}'. Expected RFC 3339, YYYY-MM-DDTHH:MM or YYYY-MM-DD",
        input
    ))
}

/// Parse a YYYY-MM-DD day.
pub fn parse_day(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map_err(|_| anyhow!("Invalid date format '{}'. Expected YYYY-MM-DD", input))
}

fn localize<Tz: TimeZone>(naive: NaiveDateTime, tz: &Tz, input: &str) -> Result<DateTime<Utc>> {
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| anyhow!("'{}' does not exist in the local timezone", input))
}
