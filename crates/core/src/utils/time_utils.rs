use chrono::{NaiveDate, NaiveDateTime};
use mockable::Clock;

use crate::constants::DATE_FORMAT;
use crate::errors::{Result, ValidationError};

/// The calendar day a check-in submitted now belongs to.
///
/// Days follow the server's local day boundary; there is no per-user
/// timezone.
pub fn check_in_day(clock: &dyn Clock) -> NaiveDate {
    clock.local().date_naive()
}

/// Current instant as a naive UTC timestamp, the form every record stores.
pub fn utc_now(clock: &dyn Clock) -> NaiveDateTime {
    clock.utc().naive_utc()
}

/// Parses a strict `YYYY-MM-DD` calendar date.
pub fn parse_calendar_date(raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::InvalidInput("date must not be empty".into()).into());
    }
    let date = NaiveDate::parse_from_str(trimmed, DATE_FORMAT)?;
    // chrono accepts unpadded fields and a signed year; only the canonical form is valid.
    if date.format(DATE_FORMAT).to_string() != trimmed {
        return Err(ValidationError::InvalidInput(format!(
            "date must be YYYY-MM-DD, got {trimmed:?}"
        ))
        .into());
    }
    Ok(date)
}
