//! Names of the form fields the validator reacts to.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A form field, identified by name.
///
/// The three tracked fields get their own variants; anything else is kept
/// verbatim in `Other` and only ever receives the generic positive check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldName {
    Quantity,
    Rate,
    Amount,
    Other(String),
}

impl FieldName {
    /// The three fields whose relationship the heuristic checks.
    pub const TRACKED: [FieldName; 3] = [FieldName::Quantity, FieldName::Rate, FieldName::Amount];

    /// Maps an input name to a field. `fuel_qty` is the purchase form's
    /// name for the quantity input.
    pub fn parse(name: &str) -> FieldName {
        match name.trim() {
            "quantity" | "fuel_qty" => FieldName::Quantity,
            "rate" => FieldName::Rate,
            "amount" => FieldName::Amount,
            other => FieldName::Other(other.to_owned()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            FieldName::Quantity => "quantity",
            FieldName::Rate => "rate",
            FieldName::Amount => "amount",
            FieldName::Other(name) => name,
        }
    }

    /// Element id of the matching input on the purchase form.
    pub fn input_id(&self) -> &str {
        match self {
            FieldName::Quantity => "fuel_qty",
            other => other.as_str(),
        }
    }

    pub fn is_tracked(&self) -> bool {
        !matches!(self, FieldName::Other(_))
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
