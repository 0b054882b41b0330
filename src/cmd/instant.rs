use std::io::{Read, Write};

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::error::InstantError;
use crate::engine::temporal::{TemporalInput, UtcInstant, to_utc_instant_at};
use crate::io::{Format, IoError, reader, writer};
use crate::util::time::parse_rfc3339_utc;

/// Command-level options for the `instant` command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InstantCommandOptions {
    /// Clock used for `null` and relative expressions; the system clock when
    /// unset.
    pub now: Option<DateTime<Utc>>,
}

impl InstantCommandOptions {
    /// Options pinned to the RFC 3339 timestamp in `now`.
    pub fn with_now(now: &str) -> Result<Self, InstantError> {
        let now = parse_rfc3339_utc(now).ok_or_else(|| InstantError::InvalidNow {
            value: now.to_string(),
        })?;
        Ok(Self { now: Some(now) })
    }

    fn clock(&self) -> DateTime<Utc> {
        self.now.unwrap_or_else(Utc::now)
    }
}

/// Execute `instant` from input stream to output stream: every input
/// document is one time value.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    input_format: Format,
    output_format: Format,
    options: InstantCommandOptions,
) -> Result<(), InstantError> {
    let values =
        reader::read_values(input, input_format).map_err(|source| InstantError::ReadInput {
            format: input_format,
            source,
        })?;
    let inputs: Vec<TemporalInput> = values.iter().map(TemporalInput::from_json).collect();
    let instants = normalize_all(inputs, options)?;
    write_instants(output, output_format, &instants)
}

/// Normalize one literal text value, as given on the command line.
pub fn run_literal<W: Write>(
    literal: &str,
    output: W,
    output_format: Format,
    options: InstantCommandOptions,
) -> Result<(), InstantError> {
    let instants = normalize_all(vec![TemporalInput::from(literal)], options)?;
    write_instants(output, output_format, &instants)
}

/// Normalize every input against one clock reading.
pub fn normalize_all(
    inputs: Vec<TemporalInput>,
    options: InstantCommandOptions,
) -> Result<Vec<UtcInstant>, InstantError> {
    let now = options.clock();
    inputs
        .into_iter()
        .enumerate()
        .map(|(index, input)| {
            to_utc_instant_at(input, now)
                .map_err(|source| InstantError::InvalidValue { index, source })
        })
        .collect()
}

fn write_instants<W: Write>(
    output: W,
    format: Format,
    instants: &[UtcInstant],
) -> Result<(), InstantError> {
    let records = instants
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<Value>, _>>()
        .map_err(|source| InstantError::WriteOutput {
            format,
            source: IoError::from(source),
        })?;
    writer::write_values(output, format, &records)
        .map_err(|source| InstantError::WriteOutput { format, source })
}

/// Ordered pipeline-step names used for `--emit-pipeline` diagnostics.
pub fn pipeline_steps(literal: bool) -> Vec<String> {
    let first = if literal {
        "take_literal_value"
    } else {
        "read_temporal_documents"
    };
    vec![
        first.to_string(),
        "normalize_instants".to_string(),
        "write_instant_records".to_string(),
    ]
}

/// Determinism guards for the `instant` command.
pub fn deterministic_guards(options: InstantCommandOptions) -> Vec<String> {
    let mut guards = vec![
        "rust_native_execution".to_string(),
        "single_clock_reading_per_run".to_string(),
        "utc_output_timezone".to_string(),
    ];
    if options.now.is_some() {
        guards.push("pinned_clock".to_string());
    }
    guards
}
