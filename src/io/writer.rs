use std::io::Write;

use serde_json::Value;

use crate::io::format::{json, jsonl};
use crate::io::{Format, IoError};

pub fn write_values<W: Write>(writer: W, format: Format, values: &[Value]) -> Result<(), IoError> {
    match format {
        Format::Json => json::write_json(writer, values),
        Format::Jsonl => jsonl::write_jsonl(writer, values),
        Format::Yaml => Err(IoError::UnsupportedOutput {
            format: format.as_str(),
        }),
    }
}
