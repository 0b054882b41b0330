use std::sync::LazyLock;

use chrono::{DateTime, Utc};
use regex::Regex;

use super::MILLISECONDS_THRESHOLD;

const MICROS_PER_SECOND: i128 = 1_000_000;
const MICROS_PER_MILLI: i128 = 1_000;

static DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([+-]?)([0-9]*)(?:\.([0-9]*))?\s*$").expect("invalid decimal regex")
});

static EXPONENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*[+-]?(?:[0-9]+\.?[0-9]*|\.[0-9]+)[eE][+-]?[0-9]+\s*$")
        .expect("invalid exponent regex")
});

/// `<fraction> <seconds>`, the text layout of a `microtime` reading.
static MICROTIME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*0\.([0-9]+) ([0-9]+)\s*$").expect("invalid microtime regex"));

static UNIX_AT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*@([+-]?)([0-9]+)(?:\.([0-9]*))?\s*$").expect("invalid unix timestamp regex")
});

/// Numeric text split into its parts so the fraction stays exact.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum NumericText {
    Decimal {
        negative: bool,
        whole: String,
        fraction: String,
        /// Always seconds, regardless of magnitude.
        seconds_only: bool,
    },
    Exponent(f64),
}

/// Recognize numeric text: plain decimals, exponent notation, microtime
/// pairs and `@<seconds>`.
pub(crate) fn parse_numeric_text(text: &str) -> Option<NumericText> {
    if let Some(captures) = DECIMAL.captures(text) {
        let whole = captures.get(2).map_or("", |m| m.as_str());
        let fraction = captures.get(3).map_or("", |m| m.as_str());
        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        return Some(NumericText::Decimal {
            negative: &captures[1] == "-",
            whole: whole.to_string(),
            fraction: fraction.to_string(),
            seconds_only: false,
        });
    }
    if EXPONENT.is_match(text) {
        return text.trim().parse::<f64>().ok().map(NumericText::Exponent);
    }
    if let Some(captures) = MICROTIME.captures(text) {
        return Some(NumericText::Decimal {
            negative: false,
            whole: captures[2].to_string(),
            fraction: captures[1].to_string(),
            seconds_only: false,
        });
    }
    if let Some(captures) = UNIX_AT.captures(text) {
        return Some(NumericText::Decimal {
            negative: &captures[1] == "-",
            whole: captures[2].to_string(),
            fraction: captures.get(3).map_or("", |m| m.as_str()).to_string(),
            seconds_only: true,
        });
    }
    None
}

pub(crate) fn from_numeric_text(number: &NumericText) -> Option<DateTime<Utc>> {
    match number {
        NumericText::Exponent(float) => from_float(*float),
        NumericText::Decimal {
            negative,
            whole,
            fraction,
            seconds_only,
        } => {
            let whole = if whole.is_empty() {
                0
            } else {
                whole.parse::<i128>().ok()?
            };
            let micros = if *seconds_only || whole < i128::from(MILLISECONDS_THRESHOLD) {
                whole
                    .checked_mul(MICROS_PER_SECOND)?
                    .checked_add(fraction_units(fraction, 6))?
            } else {
                whole
                    .checked_mul(MICROS_PER_MILLI)?
                    .checked_add(fraction_units(fraction, 3))?
            };
            let micros = if *negative {
                micros.checked_neg()?
            } else {
                micros
            };
            DateTime::from_timestamp_micros(i64::try_from(micros).ok()?)
        }
    }
}

pub(crate) fn from_integer(value: i64) -> Option<DateTime<Utc>> {
    if value.unsigned_abs() < MILLISECONDS_THRESHOLD.unsigned_abs() {
        DateTime::from_timestamp(value, 0)
    } else {
        DateTime::from_timestamp_millis(value)
    }
}

pub(crate) fn from_float(value: f64) -> Option<DateTime<Utc>> {
    if !value.is_finite() {
        return None;
    }
    let micros = if value.abs() < MILLISECONDS_THRESHOLD as f64 {
        (value * 1_000_000.0).round()
    } else {
        (value * 1_000.0).round()
    };
    if micros < i64::MIN as f64 || micros > i64::MAX as f64 {
        return None;
    }
    DateTime::from_timestamp_micros(micros as i64)
}

/// First `digits` fractional digits, right-padded with zeros; the rest is
/// truncated.
fn fraction_units(fraction: &str, digits: usize) -> i128 {
    fraction
        .bytes()
        .chain(std::iter::repeat(b'0'))
        .take(digits)
        .fold(0, |acc, byte| acc * 10 + i128::from(byte - b'0'))
}
