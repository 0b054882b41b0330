use std::io::Read;

use serde_json::Value;

use crate::io::format::{json, jsonl, yaml};
use crate::io::{Format, IoError};

pub fn read_values<R: Read>(reader: R, format: Format) -> Result<Vec<Value>, IoError> {
    let values = match format {
        Format::Json => json::read_json(reader)?,
        Format::Jsonl => jsonl::read_jsonl(reader)?,
        Format::Yaml => yaml::read_yaml(reader)?,
    };
    tracing::debug!(%format, documents = values.len(), "read input documents");
    Ok(values)
}
