//! The input-event entry point hosts register against the form.

use crate::feedback::{FeedbackSink, FormSource};
use crate::field::FieldName;
use crate::heuristic::{validate, FormReading, HeuristicConfig};
use crate::verdict::Verdict;
use fuelsense_core::FxError;
use serde_json::Value;

/// One validator per page session, passed by reference to the host's
/// input handlers.
#[derive(Debug, Clone, Default)]
pub struct Validator {
    config: HeuristicConfig,
}

impl Validator {
    pub fn new(config: HeuristicConfig) -> Self {
        Self { config }
    }

    pub fn from_json(params: &Value) -> Self {
        Self::new(HeuristicConfig::from_json(params))
    }

    pub fn config(&self) -> &HeuristicConfig {
        &self.config
    }

    /// Captures the current form state for a change of `field` to `value`.
    ///
    /// Siblings are fetched by direct lookup, one per tracked field.
    pub fn read(&self, field: FieldName, value: &str, form: &dyn FormSource) -> FormReading {
        let mut reading = FormReading::changed(field.clone(), value);
        for sibling in FieldName::TRACKED.iter().filter(|f| **f != field) {
            reading.set(sibling, form.value(sibling));
        }
        reading
    }

    /// Fails with `FxError::HostUnavailable` naming the first tracked input
    /// the form lacks. Hosts call this once before wiring input events.
    pub fn require_inputs(form: &dyn FormSource) -> Result<(), FxError> {
        match FieldName::TRACKED.iter().find(|f| form.value(f).is_none()) {
            Some(missing) => Err(FxError::HostUnavailable(format!(
                "form has no #{} input",
                missing.input_id()
            ))),
            None => Ok(()),
        }
    }

    /// Classifies a reading without touching any feedback.
    pub fn classify(&self, reading: &FormReading) -> Verdict {
        validate(reading, &self.config)
    }

    /// Handles one input event: classify the changed field against its
    /// siblings and show the result through `sink`.
    pub fn on_field_change(
        &self,
        field: &str,
        value: &str,
        form: &dyn FormSource,
        sink: &mut dyn FeedbackSink,
    ) -> Result<Verdict, FxError> {
        let field = FieldName::parse(field);
        let reading = self.read(field.clone(), value, form);
        let verdict = self.classify(&reading);
        log::debug!(
            "{field} = {value:?} -> {:?}{}",
            verdict.state,
            verdict
                .message
                .as_deref()
                .map(|m| format!(" ({m})"))
                .unwrap_or_default()
        );
        sink.apply(&field, &verdict)?;
        Ok(verdict)
    }
}
