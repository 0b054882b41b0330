//! Normalization of loosely typed time values into a [`UtcInstant`].
//!
//! Inputs are resolved in a fixed order:
//!
//! 1. `Null` is the current time.
//! 2. Booleans count as `0` or `1` seconds since the epoch.
//! 3. Numbers and numeric text are seconds when their magnitude is below
//!    [`MILLISECONDS_THRESHOLD`], milliseconds otherwise.
//! 4. Other text is parsed as a date/time expression, in UTC unless it
//!    carries an offset.
//! 5. Timezone-aware timestamps keep their instant and are re-expressed in
//!    UTC.
//! 6. Anything else is rejected.
//!
//! The seconds/milliseconds split is a heuristic: a seconds value at or above
//! the threshold (after the year 2286) is read as milliseconds, and a
//! milliseconds value below it (before mid-April 1970) as seconds.

mod numeric;
mod parse;

use std::fmt;

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::error::InvalidArgument;
use crate::util::time::{format_rfc3339_utc, to_utc_micros};

/// Magnitude from which numeric inputs are read as milliseconds.
pub const MILLISECONDS_THRESHOLD: i64 = 10_000_000_000;

/// Timezone name of every [`UtcInstant`].
pub const UTC: &str = "UTC";

const FIELD: &str = "$";

/// A time value as it arrives from callers or decoded JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum TemporalInput {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
    DateTime(DateTime<FixedOffset>),
    /// A value of an unsupported kind, described by its type name.
    Other(&'static str),
}

impl TemporalInput {
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(flag) => Self::Bool(*flag),
            Value::Number(number) => {
                if let Some(integer) = number.as_i64() {
                    Self::Integer(integer)
                } else if let Some(float) = number.as_f64() {
                    Self::Float(float)
                } else {
                    Self::Other("number")
                }
            }
            Value::String(text) => Self::Text(text.clone()),
            Value::Array(_) => Self::Other("array"),
            Value::Object(_) => Self::Other("object"),
        }
    }

    fn describe(&self) -> Value {
        match self {
            Self::Null => Value::Null,
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Integer(integer) => Value::from(*integer),
            Self::Float(float) => Value::String(float.to_string()),
            Self::Text(text) => Value::String(text.clone()),
            Self::DateTime(dt) => Value::String(dt.to_rfc3339()),
            Self::Other(kind) => Value::String(format!("<{kind}>")),
        }
    }
}

impl From<bool> for TemporalInput {
    fn from(flag: bool) -> Self {
        Self::Bool(flag)
    }
}

impl From<i64> for TemporalInput {
    fn from(integer: i64) -> Self {
        Self::Integer(integer)
    }
}

impl From<i32> for TemporalInput {
    fn from(integer: i32) -> Self {
        Self::Integer(i64::from(integer))
    }
}

impl From<u32> for TemporalInput {
    fn from(integer: u32) -> Self {
        Self::Integer(i64::from(integer))
    }
}

impl From<f64> for TemporalInput {
    fn from(float: f64) -> Self {
        Self::Float(float)
    }
}

impl From<&str> for TemporalInput {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for TemporalInput {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for TemporalInput {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::DateTime(dt.fixed_offset())
    }
}

impl<T: Into<TemporalInput>> From<Option<T>> for TemporalInput {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Into::into)
    }
}

impl From<&Value> for TemporalInput {
    fn from(value: &Value) -> Self {
        Self::from_json(value)
    }
}

/// A point in time in UTC with microsecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcInstant(DateTime<Utc>);

impl UtcInstant {
    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self(to_utc_micros(dt))
    }

    /// Whole seconds since the Unix epoch.
    pub fn seconds(&self) -> i64 {
        self.0.timestamp()
    }

    /// Microseconds past [`Self::seconds`], always in `0..1_000_000`.
    pub fn microseconds(&self) -> u32 {
        self.0.timestamp_subsec_micros()
    }

    pub fn timezone(&self) -> &'static str {
        UTC
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    pub fn into_datetime(self) -> DateTime<Utc> {
        self.0
    }

    pub fn to_rfc3339(&self) -> String {
        format_rfc3339_utc(&self.0)
    }

    /// `<seconds>.<microseconds>` with exactly six fractional digits.
    pub fn format_unix_micros(&self) -> String {
        format!("{}.{:06}", self.seconds(), self.microseconds())
    }
}

impl fmt::Display for UtcInstant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_rfc3339())
    }
}

impl Serialize for UtcInstant {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut record = serializer.serialize_struct("UtcInstant", 4)?;
        record.serialize_field("seconds", &self.seconds())?;
        record.serialize_field("microseconds", &self.microseconds())?;
        record.serialize_field("timezone", self.timezone())?;
        record.serialize_field("rfc3339", &self.to_rfc3339())?;
        record.end()
    }
}

/// Normalize `input` to a UTC instant, reading the clock for `Null` and
/// relative expressions.
pub fn to_utc_instant(input: impl Into<TemporalInput>) -> Result<UtcInstant, InvalidArgument> {
    to_utc_instant_at(input, Utc::now())
}

/// Same as [`to_utc_instant`] with `now` standing in for the clock.
pub fn to_utc_instant_at(
    input: impl Into<TemporalInput>,
    now: DateTime<Utc>,
) -> Result<UtcInstant, InvalidArgument> {
    let input = input.into();
    let resolved = match &input {
        TemporalInput::Null => Some(now),
        TemporalInput::Bool(flag) => numeric::from_integer(i64::from(*flag)),
        TemporalInput::Integer(integer) => numeric::from_integer(*integer),
        TemporalInput::Float(float) => numeric::from_float(*float),
        TemporalInput::Text(text) => match numeric::parse_numeric_text(text) {
            Some(number) => numeric::from_numeric_text(&number),
            None => {
                let parsed = parse::parse_datetime_text(text, now);
                if parsed.is_none() {
                    return Err(reject(&input, "unrecognized date/time expression"));
                }
                parsed
            }
        },
        TemporalInput::DateTime(dt) => Some(dt.with_timezone(&Utc)),
        TemporalInput::Other(_) => {
            return Err(reject(&input, "unsupported input type"));
        }
    };
    resolved
        .map(|dt| UtcInstant::from_datetime(&dt))
        .ok_or_else(|| reject(&input, "timestamp is out of range"))
}

fn reject(input: &TemporalInput, reason: &str) -> InvalidArgument {
    let value = input.describe();
    tracing::debug!(%value, reason, "rejected temporal input");
    InvalidArgument::new(FIELD, value, reason)
}
