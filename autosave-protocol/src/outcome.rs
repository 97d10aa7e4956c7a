use serde::{Deserialize, Serialize};

/// Visible result of the latest save of a field
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    #[default]
    Neutral,
    Success,
    Error,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Neutral => "neutral",
            Outcome::Success => "success",
            Outcome::Error => "error",
        }
    }
}

impl log::kv::ToValue for Outcome {
    fn to_value(&self) -> log::kv::Value<'_> {
        log::kv::Value::from(self.as_str())
    }
}

/// Per-field save state. `Pending` is tracked but never shown.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldPhase {
    #[default]
    Neutral,
    Pending,
    Success,
    Error,
}

impl FieldPhase {
    pub fn is_pending(&self) -> bool {
        matches!(self, FieldPhase::Pending)
    }
}

impl From<Outcome> for FieldPhase {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Neutral => FieldPhase::Neutral,
            Outcome::Success => FieldPhase::Success,
            Outcome::Error => FieldPhase::Error,
        }
    }
}
