use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::domain::android::WireEnum;
use crate::domain::error::InvalidArgument;

/// Strict reader over one JSON object of the wire mapping.
///
/// Construction rejects non-objects and unknown keys. Every accessor treats
/// `null` as an unset field.
pub(crate) struct ObjectReader<'a> {
    path: String,
    entries: &'a Map<String, Value>,
}

impl<'a> ObjectReader<'a> {
    pub(crate) fn new(
        path: impl Into<String>,
        value: &'a Value,
        allowed: &[&str],
    ) -> Result<Self, InvalidArgument> {
        let path = path.into();
        let Value::Object(entries) = value else {
            return Err(reject(&path, value, "expected an object"));
        };
        let reader = Self { path, entries };
        if let Some(unknown) = entries.keys().find(|key| !allowed.contains(&key.as_str())) {
            let field = reader.field_path(unknown);
            return Err(reject(&field, &entries[unknown], "unknown field"));
        }
        Ok(reader)
    }

    pub(crate) fn field_path(&self, key: &str) -> String {
        if self.path == "$" || self.path.is_empty() {
            key.to_string()
        } else {
            format!("{}.{key}", self.path)
        }
    }

    /// Raw value of `key`, `null` when absent.
    pub(crate) fn raw(&self, key: &str) -> &'a Value {
        self.entries.get(key).unwrap_or(&Value::Null)
    }

    pub(crate) fn string(&self, key: &str) -> Result<Option<String>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            Value::String(text) => Ok(Some(text.clone())),
            other => Err(reject(&self.field_path(key), other, "expected a string")),
        }
    }

    pub(crate) fn boolean(&self, key: &str) -> Result<Option<bool>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            Value::Bool(flag) => Ok(Some(*flag)),
            other => Err(reject(&self.field_path(key), other, "expected a boolean")),
        }
    }

    pub(crate) fn count(&self, key: &str) -> Result<Option<u32>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            Value::Number(number) => number
                .as_u64()
                .and_then(|count| u32::try_from(count).ok())
                .map(Some)
                .ok_or_else(|| {
                    reject(
                        &self.field_path(key),
                        self.raw(key),
                        "expected a non-negative 32-bit integer",
                    )
                }),
            other => Err(reject(
                &self.field_path(key),
                other,
                "expected a non-negative 32-bit integer",
            )),
        }
    }

    pub(crate) fn string_list(&self, key: &str) -> Result<Option<Vec<String>>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(index, item)| match item {
                    Value::String(text) => Ok(text.clone()),
                    other => Err(reject(
                        &format!("{}[{index}]", self.field_path(key)),
                        other,
                        "expected a string",
                    )),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            other => Err(reject(
                &self.field_path(key),
                other,
                "expected an array of strings",
            )),
        }
    }

    pub(crate) fn string_map(
        &self,
        key: &str,
    ) -> Result<Option<BTreeMap<String, String>>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            Value::Object(entries) => entries
                .iter()
                .map(|(name, item)| match item {
                    Value::String(text) => Ok((name.clone(), text.clone())),
                    other => Err(reject(
                        &format!("{}.{name}", self.field_path(key)),
                        other,
                        "expected a string",
                    )),
                })
                .collect::<Result<BTreeMap<_, _>, _>>()
                .map(Some),
            other => Err(reject(
                &self.field_path(key),
                other,
                "expected an object of strings",
            )),
        }
    }

    pub(crate) fn enumeration<T: WireEnum>(&self, key: &str) -> Result<Option<T>, InvalidArgument> {
        let Some(text) = self.string(key)? else {
            return Ok(None);
        };
        T::from_wire(&text).map(Some).ok_or_else(|| {
            let expected = T::VARIANTS
                .iter()
                .map(|variant| format!("`{}`", variant.as_str()))
                .collect::<Vec<_>>()
                .join(", ");
            reject(
                &self.field_path(key),
                self.raw(key),
                &format!("expected one of {expected}"),
            )
        })
    }

    /// Nested object reader, `None` when the field is absent or `null`.
    pub(crate) fn object(
        &self,
        key: &str,
        allowed: &[&str],
    ) -> Result<Option<ObjectReader<'a>>, InvalidArgument> {
        match self.raw(key) {
            Value::Null => Ok(None),
            value => ObjectReader::new(self.field_path(key), value, allowed).map(Some),
        }
    }
}

pub(crate) fn reject(field: &str, value: &Value, reason: &str) -> InvalidArgument {
    tracing::debug!(field, %value, reason, "rejected field");
    InvalidArgument::new(field, value.clone(), reason)
}
