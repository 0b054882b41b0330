use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::io::IoError;

/// Read every document of a YAML stream (`---` separated) as JSON values.
/// A lone top-level sequence is unpacked into its elements.
pub fn read_yaml<R: Read>(reader: R) -> Result<Vec<Value>, IoError> {
    let mut documents = Vec::new();
    for document in serde_yaml::Deserializer::from_reader(reader) {
        let yaml_value = serde_yaml::Value::deserialize(document)?;
        documents.push(serde_json::to_value(yaml_value)?);
    }
    Ok(match <[Value; 1]>::try_from(documents) {
        Ok([Value::Array(items)]) => items,
        Ok([single]) => vec![single],
        Err(documents) => documents,
    })
}
