use std::io::{Read, Write};

use serde_json::Value;

use crate::domain::android::{AndroidConfig, MessagePriority, WireEnum};
use crate::domain::error::AndroidError;
use crate::io::{Format, reader, writer};
use crate::util::sort::sort_keys;

/// Command-level options for the `android` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AndroidCommandOptions {
    /// Sort wire-mapping keys. If `false`, fields keep their schema order.
    pub sort_keys: bool,
    /// Apply `with_default_sound` to every config.
    pub default_sound: bool,
    /// Overwrite the message priority of every config.
    pub priority: Option<MessagePriority>,
}

impl Default for AndroidCommandOptions {
    fn default() -> Self {
        Self {
            sort_keys: true,
            default_sound: false,
            priority: None,
        }
    }
}

/// Execute `android` from input stream to output stream.
///
/// Every input document is one raw Android config. Each is validated, has
/// the requested options applied, and is written back in canonical form.
pub fn run<R: Read, W: Write>(
    input: R,
    output: W,
    input_format: Format,
    output_format: Format,
    options: AndroidCommandOptions,
) -> Result<(), AndroidError> {
    let values =
        reader::read_values(input, input_format).map_err(|source| AndroidError::ReadInput {
            format: input_format,
            source,
        })?;
    let configs = build_configs(&values, options)?;
    let wire = configs
        .iter()
        .map(|config| {
            let value = config.to_value()?;
            Ok(if options.sort_keys {
                sort_keys(value)
            } else {
                value
            })
        })
        .collect::<Result<Vec<Value>, serde_json::Error>>()
        .map_err(|source| AndroidError::Serialize { source })?;
    writer::write_values(output, output_format, &wire).map_err(|source| {
        AndroidError::WriteOutput {
            format: output_format,
            source,
        }
    })
}

/// Validate raw documents and apply the command options, stopping at the
/// first invalid document.
pub fn build_configs(
    values: &[Value],
    options: AndroidCommandOptions,
) -> Result<Vec<AndroidConfig>, AndroidError> {
    values
        .iter()
        .enumerate()
        .map(|(index, value)| {
            let mut config = AndroidConfig::from_value(value)
                .map_err(|source| AndroidError::InvalidConfig { index, source })?;
            if options.default_sound {
                config = config.with_default_sound();
            }
            if let Some(priority) = options.priority {
                config = config.with_priority(priority);
            }
            Ok(config)
        })
        .collect()
}

/// Ordered pipeline-step names used for `--emit-pipeline` diagnostics.
pub fn pipeline_steps(options: AndroidCommandOptions) -> Vec<String> {
    let mut steps = vec![
        "read_android_documents".to_string(),
        "validate_android_config".to_string(),
    ];
    if options.default_sound {
        steps.push("apply_default_sound".to_string());
    }
    if let Some(priority) = options.priority {
        steps.push(format!("apply_{}_priority", priority.as_str()));
    }
    steps.push("write_android_wire_mapping".to_string());
    steps
}

/// Determinism guards for the `android` command.
pub fn deterministic_guards(options: AndroidCommandOptions) -> Vec<String> {
    let mut guards = vec![
        "rust_native_execution".to_string(),
        "fail_fast_field_validation".to_string(),
        "sparse_wire_mapping".to_string(),
    ];
    if options.sort_keys {
        guards.push("object_keys_sorted".to_string());
    }
    guards
}
