use serde_json::Value;
use thiserror::Error;

use crate::io::{Format, IoError};

/// A value was rejected while building a configuration or normalizing time.
///
/// `field` is the dotted path of the offending field (`ttl`,
/// `notification.color`); `$` refers to the whole input.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid argument for `{field}`: {reason} (got {value})")]
pub struct InvalidArgument {
    pub field: String,
    pub value: Value,
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(field: impl Into<String>, value: Value, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            value,
            reason: reason.into(),
        }
    }
}

/// Errors produced by the `android` command boundary.
#[derive(Debug, Error)]
pub enum AndroidError {
    /// Input could not be parsed in the declared format.
    #[error("failed to read {format} input: {source}")]
    ReadInput {
        format: Format,
        #[source]
        source: IoError,
    },

    /// An input document is not a valid Android configuration.
    #[error("document {index}: {source}")]
    InvalidConfig {
        index: usize,
        #[source]
        source: InvalidArgument,
    },

    /// A configuration could not be converted to its wire mapping.
    #[error("failed to serialize android config: {source}")]
    Serialize {
        #[source]
        source: serde_json::Error,
    },

    /// Output could not be serialized in the declared format.
    #[error("failed to write {format} output: {source}")]
    WriteOutput {
        format: Format,
        #[source]
        source: IoError,
    },
}

/// Errors produced by the `instant` command boundary.
#[derive(Debug, Error)]
pub enum InstantError {
    /// Input could not be parsed in the declared format.
    #[error("failed to read {format} input: {source}")]
    ReadInput {
        format: Format,
        #[source]
        source: IoError,
    },

    /// The `--now` override is not an RFC 3339 timestamp.
    #[error("invalid --now value `{value}`: expected an RFC 3339 timestamp")]
    InvalidNow { value: String },

    /// An input value could not be normalized.
    #[error("value {index}: {source}")]
    InvalidValue {
        index: usize,
        #[source]
        source: InvalidArgument,
    },

    /// Output could not be serialized in the declared format.
    #[error("failed to write {format} output: {source}")]
    WriteOutput {
        format: Format,
        #[source]
        source: IoError,
    },
}
