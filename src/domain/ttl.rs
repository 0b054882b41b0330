use std::fmt;
use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use serde::{Serialize, Serializer};
use serde_json::Value;

use crate::domain::error::InvalidArgument;

const FIELD: &str = "ttl";

/// `<optional minus><digits><optional unit>`; sign and unit are validated
/// after the match.
static TTL_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(-?)([0-9]+)([A-Za-z]*)$").expect("invalid ttl regex"));

/// Message time-to-live in whole seconds.
///
/// Serialized in the provider's duration notation, `"<n>s"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Ttl {
    secs: u64,
}

impl Ttl {
    pub const fn from_secs(secs: u64) -> Self {
        Self { secs }
    }

    pub const fn as_secs(self) -> u64 {
        self.secs
    }

    /// Validate a loosely typed `ttl` value.
    ///
    /// Accepted: `null` (unset), non-negative integers, and strings holding
    /// a non-negative integer with an optional `s` suffix. Everything else,
    /// booleans included, is rejected.
    pub fn parse(value: &Value) -> Result<Option<Self>, InvalidArgument> {
        match value {
            Value::Null => Ok(None),
            Value::Bool(_) => Err(reject(value, "booleans are not durations")),
            Value::Number(number) => {
                if let Some(secs) = number.as_u64() {
                    return Ok(Some(Self::from_secs(secs)));
                }
                if number.as_i64().is_some() {
                    return Err(reject(value, "must not be negative"));
                }
                Err(reject(value, "must be a whole number of seconds"))
            }
            Value::String(text) => parse_text(text, value).map(Some),
            Value::Array(_) | Value::Object(_) => Err(reject(
                value,
                "expected a number of seconds or a string like `3600s`",
            )),
        }
    }
}

fn parse_text(text: &str, raw: &Value) -> Result<Ttl, InvalidArgument> {
    let Some(captures) = TTL_TEXT.captures(text) else {
        return Err(reject(raw, "expected a number of seconds or a string like `3600s`"));
    };
    if !captures[1].is_empty() {
        return Err(reject(raw, "must not be negative"));
    }
    match &captures[3] {
        "" | "s" => {}
        _ => return Err(reject(raw, "only the `s` (seconds) suffix is supported")),
    }
    captures[2]
        .parse::<u64>()
        .map(Ttl::from_secs)
        .map_err(|_| reject(raw, "number of seconds is out of range"))
}

fn reject(value: &Value, reason: &str) -> InvalidArgument {
    tracing::debug!(field = FIELD, %value, reason, "rejected ttl");
    InvalidArgument::new(FIELD, value.clone(), reason)
}

impl fmt::Display for Ttl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.secs)
    }
}

impl Serialize for Ttl {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Self::from_secs(secs)
    }
}

impl From<u32> for Ttl {
    fn from(secs: u32) -> Self {
        Self::from_secs(u64::from(secs))
    }
}

impl TryFrom<i64> for Ttl {
    type Error = InvalidArgument;

    fn try_from(secs: i64) -> Result<Self, Self::Error> {
        u64::try_from(secs)
            .map(Self::from_secs)
            .map_err(|_| reject(&Value::from(secs), "must not be negative"))
    }
}

impl TryFrom<&str> for Ttl {
    type Error = InvalidArgument;

    fn try_from(text: &str) -> Result<Self, Self::Error> {
        parse_text(text, &Value::String(text.to_string()))
    }
}

impl TryFrom<Duration> for Ttl {
    type Error = InvalidArgument;

    fn try_from(duration: Duration) -> Result<Self, Self::Error> {
        if duration.subsec_nanos() != 0 {
            return Err(reject(
                &Value::String(format!("{duration:?}")),
                "must be a whole number of seconds",
            ));
        }
        Ok(Self::from_secs(duration.as_secs()))
    }
}

impl From<Ttl> for Duration {
    fn from(ttl: Ttl) -> Self {
        Duration::from_secs(ttl.secs)
    }
}
