//! Inline feedback on the purchase form's inputs.

use crate::{document, host_error, to_js};
use fuelsense_core::FxError;
use fuelsense_validator::{
    assess_or_report, FeedbackSink, FieldName, FormSource, TooltipRegistry, Transaction,
    Validator, Verdict, VerdictState,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement};

const TOOLTIP_CLASS: &str = "validation-tooltip";

/// Reads input values straight from the document by element id.
struct DomForm {
    document: Document,
}

impl DomForm {
    fn input(&self, id: &str) -> Option<HtmlInputElement> {
        self.document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlInputElement>().ok())
    }
}

impl FormSource for DomForm {
    fn value(&self, field: &FieldName) -> Option<String> {
        self.input(field.input_id()).map(|input| input.value())
    }
}

/// Sets state classes on inputs and keeps one tooltip element per input.
struct DomFeedback {
    document: Document,
    tooltips: TooltipRegistry<Element>,
}

/// Creates an empty tooltip next to `input`.
fn create_tooltip(document: &Document, input: &Element) -> Result<Element, FxError> {
    let tooltip = document
        .create_element("div")
        .map_err(|e| host_error("createElement", e))?;
    tooltip.set_class_name(TOOLTIP_CLASS);
    let parent = input
        .parent_element()
        .ok_or_else(|| FxError::HostUnavailable("input has no parent".into()))?;
    parent
        .append_child(&tooltip)
        .map_err(|e| host_error("appendChild", e))?;
    Ok(tooltip)
}

impl FeedbackSink for DomFeedback {
    fn apply(&mut self, field: &FieldName, verdict: &Verdict) -> Result<(), FxError> {
        let Some(input) = self.document.get_element_by_id(field.input_id()) else {
            return Ok(());
        };
        let classes = input.class_list();
        let [valid, warning] = VerdictState::CLASSES;
        classes
            .remove_2(valid, warning)
            .map_err(|e| host_error("classList.remove", e))?;
        if let Some(class) = verdict.state.css_class() {
            classes
                .add_1(class)
                .map_err(|e| host_error("classList.add", e))?;
        }

        if verdict.is_neutral() {
            if let Some(tooltip) = self.tooltips.get(field) {
                tooltip.set_text_content(None);
                tooltip.set_class_name(TOOLTIP_CLASS);
            }
            return Ok(());
        }

        let document = &self.document;
        let tooltip = self
            .tooltips
            .get_or_create(field, || create_tooltip(document, &input))?;
        tooltip.set_text_content(verdict.message.as_deref());
        let category = verdict.state.css_class().unwrap_or_default();
        tooltip.set_class_name(&format!("{TOOLTIP_CLASS} {category}"));
        Ok(())
    }
}

/// Validator wired to the page's form.
#[wasm_bindgen]
pub struct FormFeedback {
    validator: Validator,
    form: DomForm,
    feedback: DomFeedback,
}

#[wasm_bindgen]
impl FormFeedback {
    /// `config_json` overrides thresholds; pass `"{}"` for defaults.
    #[wasm_bindgen(constructor)]
    pub fn new(config_json: &str) -> Result<FormFeedback, JsValue> {
        let config: serde_json::Value = serde_json::from_str(config_json)
            .map_err(|e| to_js(FxError::InvalidConfig(e.to_string())))?;
        let document = document().map_err(to_js)?;
        let form = DomForm {
            document: document.clone(),
        };
        Validator::require_inputs(&form).map_err(to_js)?;
        Ok(Self {
            validator: Validator::from_json(&config),
            form,
            feedback: DomFeedback {
                document,
                tooltips: TooltipRegistry::new(),
            },
        })
    }

    /// Input event on the element with id `input_id`. Returns the verdict
    /// as a JSON string.
    pub fn on_input(&mut self, input_id: &str) -> Result<String, JsValue> {
        let value = self
            .form
            .input(input_id)
            .map(|input| input.value())
            .unwrap_or_default();
        let verdict = self
            .validator
            .on_field_change(input_id, &value, &self.form, &mut self.feedback)
            .map_err(to_js)?;
        serde_json::to_string(&verdict).map_err(|e| to_js(FxError::InvalidConfig(e.to_string())))
    }

    /// Submit: grades the whole transaction. Returns the result panel JSON.
    pub fn assess(&self) -> Result<String, JsValue> {
        let read = |id: &str| self.form.input(id).map(|i| i.value()).unwrap_or_default();
        let tx = Transaction {
            fuel_qty: read("fuel_qty"),
            rate: read("rate"),
            amount: read("amount"),
            pump_id: read("pump_id"),
            emp_id: read("emp_id"),
        };
        serde_json::to_string(&assess_or_report(&tx))
            .map_err(|e| to_js(FxError::InvalidConfig(e.to_string())))
    }
}
