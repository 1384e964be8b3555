//! Reflecting verdicts back onto the form.
//!
//! A [`FeedbackSink`] owns the visual side: the state class on the input and
//! a tooltip next to it. [`TooltipRegistry`] guarantees one tooltip per input,
//! created on first use and reused afterwards.

use crate::field::FieldName;
use crate::verdict::{Verdict, VerdictState};
use fuelsense_core::FxError;
use std::collections::HashMap;

/// Read access to the current text of named form inputs.
pub trait FormSource {
    /// Current value of `field`, or `None` if the form has no such input.
    fn value(&self, field: &FieldName) -> Option<String>;
}

impl FormSource for HashMap<String, String> {
    fn value(&self, field: &FieldName) -> Option<String> {
        self.get(field.as_str())
            .or_else(|| self.get(field.input_id()))
            .cloned()
    }
}

/// Applies a verdict to the input that produced it.
pub trait FeedbackSink {
    /// Replaces whatever feedback `field` currently shows with `verdict`.
    /// A neutral verdict clears the state class and the tooltip text.
    fn apply(&mut self, field: &FieldName, verdict: &Verdict) -> Result<(), FxError>;
}

/// Lazily created, reused tooltip handles keyed by field.
///
/// `T` is whatever the host uses for a tooltip: a DOM element in the
/// browser, a plain [`Tooltip`] record elsewhere.
#[derive(Debug)]
pub struct TooltipRegistry<T> {
    tooltips: HashMap<FieldName, T>,
    created: usize,
}

impl<T> Default for TooltipRegistry<T> {
    fn default() -> Self {
        Self {
            tooltips: HashMap::new(),
            created: 0,
        }
    }
}

impl<T> TooltipRegistry<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the tooltip for `field`, calling `create` only the first time.
    pub fn get_or_create(
        &mut self,
        field: &FieldName,
        create: impl FnOnce() -> Result<T, FxError>,
    ) -> Result<&mut T, FxError> {
        if !self.tooltips.contains_key(field) {
            let tooltip = create()?;
            self.created += 1;
            self.tooltips.insert(field.clone(), tooltip);
        }
        self.tooltips
            .get_mut(field)
            .ok_or_else(|| FxError::UnknownField(field.to_string()))
    }

    /// The tooltip for `field` if one was ever created.
    pub fn get(&self, field: &FieldName) -> Option<&T> {
        self.tooltips.get(field)
    }

    pub fn get_mut(&mut self, field: &FieldName) -> Option<&mut T> {
        self.tooltips.get_mut(field)
    }

    /// Total number of tooltips ever created.
    pub fn created(&self) -> usize {
        self.created
    }
}

/// Text and category of a tooltip.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tooltip {
    pub text: String,
    pub category: Option<VerdictState>,
}

/// In-memory sink recording the class and tooltip of each field.
///
/// Used by the CLI and by tests in place of a real form.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    classes: HashMap<FieldName, &'static str>,
    tooltips: TooltipRegistry<Tooltip>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state class of `field`, if any.
    pub fn class(&self, field: &FieldName) -> Option<&'static str> {
        self.classes.get(field).copied()
    }

    pub fn tooltip(&self, field: &FieldName) -> Option<&Tooltip> {
        self.tooltips.get(field)
    }

    pub fn tooltips_created(&self) -> usize {
        self.tooltips.created()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn apply(&mut self, field: &FieldName, verdict: &Verdict) -> Result<(), FxError> {
        match verdict.state.css_class() {
            Some(class) => {
                self.classes.insert(field.clone(), class);
            }
            None => {
                self.classes.remove(field);
            }
        }

        if verdict.is_neutral() {
            if let Some(tooltip) = self.tooltips.get_mut(field) {
                *tooltip = Tooltip::default();
            }
            return Ok(());
        }

        let tooltip = self.tooltips.get_or_create(field, || Ok(Tooltip::default()))?;
        tooltip.text = verdict.message.clone().unwrap_or_default();
        tooltip.category = Some(verdict.state);
        Ok(())
    }
}
