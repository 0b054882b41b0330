use std::io::{Read, Write};

use serde_json::{Deserializer, Value};

use crate::io::IoError;

/// Read one or more whitespace-separated JSON documents. A single top-level
/// array is unpacked into its elements.
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let documents = Deserializer::from_reader(reader)
        .into_iter::<Value>()
        .collect::<Result<Vec<_>, _>>()?;
    Ok(match <[Value; 1]>::try_from(documents) {
        Ok([Value::Array(items)]) => items,
        Ok([single]) => vec![single],
        Err(documents) => documents,
    })
}

/// Write a single value as-is, several values as an array; always
/// newline-terminated.
pub fn write_json<W: Write>(mut writer: W, values: &[Value]) -> Result<(), IoError> {
    match values {
        [single] => serde_json::to_writer(&mut writer, single)?,
        _ => serde_json::to_writer(&mut writer, values)?,
    }
    writer.write_all(b"\n")?;
    Ok(())
}
