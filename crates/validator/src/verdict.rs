//! Classification outcome for one form field.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictState {
    Valid,
    Warning,
    /// No classification; any previously shown feedback is cleared.
    Neutral,
}

impl VerdictState {
    /// State class set on the input element, `None` for neutral.
    pub fn css_class(self) -> Option<&'static str> {
        match self {
            VerdictState::Valid => Some("valid"),
            VerdictState::Warning => Some("warning"),
            VerdictState::Neutral => None,
        }
    }

    /// Every class this module may set, for clearing before re-applying.
    pub const CLASSES: [&'static str; 2] = ["valid", "warning"];
}

/// A state plus an optional human-readable explanation.
///
/// Built fresh for every input event and replaces whatever was shown for the
/// field before.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Verdict {
    pub state: VerdictState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Verdict {
    pub fn neutral() -> Self {
        Self {
            state: VerdictState::Neutral,
            message: None,
        }
    }

    /// Valid with no message: the generic marker for a plausible value.
    pub fn valid() -> Self {
        Self {
            state: VerdictState::Valid,
            message: None,
        }
    }

    pub fn valid_with(message: impl Into<String>) -> Self {
        Self {
            state: VerdictState::Valid,
            message: Some(message.into()),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            state: VerdictState::Warning,
            message: Some(message.into()),
        }
    }

    pub fn is_neutral(&self) -> bool {
        self.state == VerdictState::Neutral
    }
}
