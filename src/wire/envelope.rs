use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;

/// Success bodies wrap their payload as `{message, data}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    #[serde(default)]
    pub message: Option<String>,
    pub data: T,
}

/// Failure bodies carry a message and, for validation failures, a
/// field-keyed error map.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub errors: Option<BTreeMap<String, Value>>,
}

impl ErrorBody {
    pub fn parse(text: &str) -> Option<ErrorBody> {
        serde_json::from_str(text).ok()
    }

    /// Field errors flattened to one string per field. Some backends send
    /// a list of messages per field; the first one is what the form shows.
    pub fn field_errors(&self) -> BTreeMap<String, String> {
        let mut flat = BTreeMap::new();
        if let Some(ref errors) = self.errors {
            for (field, value) in errors {
                let message = match value {
                    Value::String(s) => s.clone(),
                    Value::Array(items) => items
                        .iter()
                        .filter_map(Value::as_str)
                        .next()
                        .unwrap_or_default()
                        .to_string(),
                    other => other.to_string(),
                };
                if !message.is_empty() {
                    flat.insert(field.clone(), message);
                }
            }
        }
        flat
    }
}
