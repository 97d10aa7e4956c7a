mod colour;

use serde::{Deserialize, Serialize};

use crate::outcome::Outcome;

pub use self::colour::Colour;

/// Visual treatment applied to a field for a given outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Indicator {
    Class(String),
    Colour(Colour),
}

/// How outcomes are rendered on a field.
///
/// `Neutral` never has an indicator, so applying it clears whatever the
/// previous outcome left behind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum IndicatorStyle {
    Classes { success: String, error: String },
    Colours { success: Colour, error: Colour },
}

impl IndicatorStyle {
    /// Bootstrap 3 form-group classes
    pub fn bootstrap() -> Self {
        IndicatorStyle::Classes {
            success: "has-success".to_string(),
            error: "has-error".to_string(),
        }
    }

    pub fn indicator_for(&self, outcome: Outcome) -> Option<Indicator> {
        match (self, outcome) {
            (_, Outcome::Neutral) => None,
            (IndicatorStyle::Classes { success, .. }, Outcome::Success) => {
                Some(Indicator::Class(success.clone()))
            }
            (IndicatorStyle::Classes { error, .. }, Outcome::Error) => {
                Some(Indicator::Class(error.clone()))
            }
            (IndicatorStyle::Colours { success, .. }, Outcome::Success) => {
                Some(Indicator::Colour(*success))
            }
            (IndicatorStyle::Colours { error, .. }, Outcome::Error) => {
                Some(Indicator::Colour(*error))
            }
        }
    }
}

impl Default for IndicatorStyle {
    fn default() -> Self {
        IndicatorStyle::Classes {
            success: "success".to_string(),
            error: "error".to_string(),
        }
    }
}
