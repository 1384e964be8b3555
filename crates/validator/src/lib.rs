#![deny(unsafe_code)]
//! Inline validation hints for the fuel-purchase form.
//!
//! [`Validator::on_field_change`] classifies the changed field as valid,
//! warning, or neutral from quantity, rate, and amount, then shows the
//! verdict through a [`FeedbackSink`]. [`risk`] grades whole submissions.

pub mod feedback;
pub mod field;
pub mod handler;
pub mod heuristic;
pub mod risk;
pub mod verdict;

pub use feedback::{FeedbackSink, FormSource, RecordingFeedback, Tooltip, TooltipRegistry};
pub use field::FieldName;
pub use handler::Validator;
pub use heuristic::{validate, FormReading, HeuristicConfig};
pub use risk::{assess_or_report, assess_transaction, Assessment, RiskLevel, Transaction};
pub use verdict::{Verdict, VerdictState};
