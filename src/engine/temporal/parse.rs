use std::sync::LazyLock;

use chrono::{
    DateTime, Duration, FixedOffset, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc,
};
use regex::Regex;

/// Trailing zone designator: `Z`, `UTC`, `GMT` or a `±hh[:]mm` offset.
static ZONE_SUFFIX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(.*[0-9])\s*(z|utc|gmt|[+-][0-9]{2}:?[0-9]{2})$").expect("invalid zone regex")
});

/// `+1 day`, `-2 hours`, `3 weeks ago`.
static RELATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^([+-]?[0-9]+)\s*(sec|second|min|minute|hour|day|week|fortnight|month|year)s?(\s+ago)?$",
    )
    .expect("invalid relative regex")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%d.%m.%Y %H:%M:%S%.f",
    "%d.%m.%Y %H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
    "%d %B %Y %H:%M:%S%.f",
    "%d %B %Y %H:%M",
    "%B %d, %Y %H:%M:%S%.f",
    "%B %d %Y %H:%M:%S%.f",
    "%a, %d %b %Y %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d.%m.%Y",
    "%Y/%m/%d",
    "%m/%d/%Y",
    "%d-%m-%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%a, %d %b %Y",
];

/// Parse a free-form date/time expression. Text without a zone designator
/// is read as UTC; keywords and relative expressions are measured from
/// `now`.
pub(crate) fn parse_datetime_text(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    parse_keyword(text, now)
        .or_else(|| parse_relative(text, now))
        .or_else(|| parse_standard(text))
        .or_else(|| parse_with_zone(text))
        .or_else(|| parse_naive(text).map(|naive| Utc.from_utc_datetime(&naive)))
}

fn parse_keyword(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let midnight = now.date_naive().and_time(NaiveTime::MIN).and_utc();
    match text.to_ascii_lowercase().as_str() {
        "now" => Some(now),
        "today" | "midnight" => Some(midnight),
        "yesterday" => midnight.checked_sub_signed(Duration::days(1)),
        "tomorrow" => midnight.checked_add_signed(Duration::days(1)),
        _ => None,
    }
}

fn parse_relative(text: &str, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let captures = RELATIVE.captures(text)?;
    let mut amount = captures[1].parse::<i64>().ok()?;
    if captures.get(3).is_some() {
        amount = amount.checked_neg()?;
    }
    let unit = captures[2].to_ascii_lowercase();
    let step = match unit.as_str() {
        "sec" | "second" => Duration::try_seconds(amount)?,
        "min" | "minute" => Duration::try_minutes(amount)?,
        "hour" => Duration::try_hours(amount)?,
        "day" => Duration::try_days(amount)?,
        "week" => Duration::try_weeks(amount)?,
        "fortnight" => Duration::try_weeks(amount.checked_mul(2)?)?,
        "month" => return shift_months(now, amount),
        "year" => return shift_months(now, amount.checked_mul(12)?),
        _ => return None,
    };
    now.checked_add_signed(step)
}

fn shift_months(now: DateTime<Utc>, months: i64) -> Option<DateTime<Utc>> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        now.checked_add_months(magnitude)
    } else {
        now.checked_sub_months(magnitude)
    }
}

fn parse_standard(text: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(text)
        .or_else(|_| DateTime::parse_from_rfc2822(text))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_with_zone(text: &str) -> Option<DateTime<Utc>> {
    let captures = ZONE_SUFFIX.captures(text)?;
    let offset = parse_offset(&captures[2])?;
    let naive = parse_naive(captures[1].trim())?;
    offset
        .from_local_datetime(&naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_offset(zone: &str) -> Option<FixedOffset> {
    match zone.to_ascii_lowercase().as_str() {
        "z" | "utc" | "gmt" => return FixedOffset::east_opt(0),
        _ => {}
    }
    let (sign, digits) = zone.split_at(1);
    let digits = digits.replace(':', "");
    let hours = digits.get(..2)?.parse::<i32>().ok()?;
    let minutes = digits.get(2..)?.parse::<i32>().ok()?;
    if minutes >= 60 {
        return None;
    }
    let seconds = hours * 3600 + minutes * 60;
    FixedOffset::east_opt(if sign == "-" { -seconds } else { seconds })
}

fn parse_naive(text: &str) -> Option<NaiveDateTime> {
    DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(text, format).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
                .map(|date| date.and_time(NaiveTime::MIN))
        })
}
