use serde::{Deserialize, Serialize};

use crate::field::FieldName;

/// Default path of the save endpoint
pub const SAVE_OPTION_PATH: &str = "/ajax/save_option";

/// Older deployments expose the endpoint under this path
pub const LEGACY_SAVE_OPTION_PATH: &str = "/ajax_save_option";

/// Table identifier some deployments expect alongside each saved option
pub const OPTIONS_TABLE: &str = "options";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveRequest {
    pub name: FieldName,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl SaveRequest {
    pub fn new(name: FieldName, value: impl Into<String>) -> Self {
        SaveRequest {
            name,
            value: value.into(),
            table: None,
        }
    }

    pub fn with_table(mut self, table: Option<impl Into<String>>) -> Self {
        self.table = table.map(Into::into);
        self
    }
}

impl log::kv::ToValue for SaveRequest {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from_debug(self)
    }
}

/// Body of a successful save response
#[derive(Clone, Debug, PartialEq)]
pub enum SaveReply {
    Json(serde_json::Value),
    Text(String),
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseFormat {
    /// The body must parse as JSON for the save to count as successful
    #[default]
    Json,
    /// The body is taken verbatim
    Text,
}
