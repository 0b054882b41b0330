use std::io::{BufRead, BufReader, Read, Write};

use serde_json::Value;

use crate::io::IoError;

/// One JSON document per non-blank line; parse errors carry the 1-based
/// line number.
pub fn read_jsonl<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut values = Vec::new();
    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let value = serde_json::from_str(trimmed).map_err(|source| IoError::JsonlLine {
            line: index + 1,
            source,
        })?;
        values.push(value);
    }
    Ok(values)
}

pub fn write_jsonl<W: Write>(mut writer: W, values: &[Value]) -> Result<(), IoError> {
    for value in values {
        serde_json::to_writer(&mut writer, value)?;
        writer.write_all(b"\n")?;
    }
    Ok(())
}
