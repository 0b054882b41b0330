use chrono::{DateTime, SecondsFormat, SubsecRound, TimeZone, Utc};

/// Re-express `dt` in UTC and drop precision below one microsecond.
pub fn to_utc_micros<Tz: TimeZone>(dt: &DateTime<Tz>) -> DateTime<Utc> {
    dt.with_timezone(&Utc).trunc_subsecs(6)
}

/// RFC 3339 text with a `Z` suffix; fractional digits appear only when the
/// instant has a sub-second part.
pub fn format_rfc3339_utc(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Parse RFC 3339 text and normalize it to UTC, or `None` if it is not
/// RFC 3339.
pub fn parse_rfc3339_utc(input: &str) -> Option<DateTime<Utc>> {
    let dt = DateTime::parse_from_rfc3339(input.trim()).ok()?;
    Some(to_utc_micros(&dt))
}
