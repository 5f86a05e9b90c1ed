//! Current values of the page's controls.
//!
//! The browser submits every control's value with each change event; the
//! callback handlers read their inputs from this struct.

use crate::controls::ControlId;
use serde::{Deserialize, Deserializer, Serialize};

/// Snapshot of all control values, as strings.
///
/// Missing entries deserialize to empty strings. Numbers are accepted and
/// stringified so `{"year": 2012}` and `{"year": "2012"}` are equivalent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlValues {
    #[serde(default, deserialize_with = "string_or_number")]
    pub parameter: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub year: String,
    #[serde(default, deserialize_with = "string_or_number")]
    pub state: String,
}

impl ControlValues {
    pub fn get(&self, id: ControlId) -> &str {
        match id {
            ControlId::Parameter => &self.parameter,
            ControlId::Year => &self.year,
            ControlId::State => &self.state,
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected a string or number, got {}",
            other
        ))),
    }
}
