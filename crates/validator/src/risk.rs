//! Rule-based risk triage of a submitted fuel transaction.
//!
//! Unlike the inline heuristic, which looks at relative deviation while the
//! user types, triage runs once on submit and grades the absolute gap
//! between the charged amount and `quantity * rate`.

use crate::heuristic::parse_number;
use fuelsense_core::params::param_string;
use fuelsense_core::FxError;
use serde::Serialize;
use serde_json::Value;

/// Absolute amount gap above which a transaction is high risk.
const HIGH_RISK_GAP: f64 = 10.0;
/// Absolute amount gap above which a transaction is medium risk.
const MEDIUM_RISK_GAP: f64 = 5.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// Grades an absolute amount gap.
    pub fn from_gap(gap: f64) -> Self {
        if gap > HIGH_RISK_GAP {
            RiskLevel::High
        } else if gap > MEDIUM_RISK_GAP {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    pub fn prediction(self) -> &'static str {
        match self {
            RiskLevel::High => "High Risk - Amount mismatch detected",
            RiskLevel::Medium => "Medium Risk - Minor discrepancy",
            RiskLevel::Low => "Low Risk - Transaction appears normal",
        }
    }

    /// Alert category shown with the result.
    pub fn class(self) -> &'static str {
        match self {
            RiskLevel::High => "danger",
            RiskLevel::Medium => "warning",
            RiskLevel::Low => "success",
        }
    }
}

/// A submitted purchase, fields kept as entered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Transaction {
    pub fuel_qty: String,
    pub rate: String,
    pub amount: String,
    pub pump_id: String,
    pub emp_id: String,
}

impl Transaction {
    /// Reads a submission object. Numeric fields may arrive as JSON numbers
    /// or strings; missing fields become empty strings.
    pub fn from_json(body: &Value) -> Self {
        let text = |name: &str| match body.get(name) {
            Some(Value::Number(n)) => n.to_string(),
            _ => param_string(body, name, ""),
        };
        Self {
            fuel_qty: text("fuel_qty"),
            rate: text("rate"),
            amount: text("amount"),
            pump_id: text("pump_id"),
            emp_id: text("emp_id"),
        }
    }
}

/// Outcome of triage, shaped like the form's result panel expects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    /// `None` when the numbers could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<RiskLevel>,
    pub prediction: String,
    pub class: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_amount: Option<f64>,
    pub pump_id: String,
    pub emp_id: String,
}

impl Assessment {
    /// The response shown when a submission cannot be assessed.
    pub fn failed(tx: &Transaction) -> Self {
        Self {
            level: None,
            prediction: "Error in calculation".into(),
            class: "danger".into(),
            status: "error".into(),
            expected_amount: None,
            pump_id: tx.pump_id.clone(),
            emp_id: tx.emp_id.clone(),
        }
    }
}

/// Grades `tx` by `|amount - fuel_qty * rate|`.
///
/// Returns `FxError::InvalidInput` naming the first field that is not a
/// finite number.
pub fn assess_transaction(tx: &Transaction) -> Result<Assessment, FxError> {
    let number = |name: &str, raw: &str| {
        parse_number(raw).ok_or_else(|| FxError::InvalidInput(format!("{name} is not a number: {raw:?}")))
    };
    let quantity = number("fuel_qty", &tx.fuel_qty)?;
    let rate = number("rate", &tx.rate)?;
    let amount = number("amount", &tx.amount)?;

    let expected = quantity * rate;
    let gap = (amount - expected).abs();
    if !gap.is_finite() {
        return Err(FxError::InvalidInput(format!(
            "amount gap is not finite for {quantity} x {rate}"
        )));
    }
    let level = RiskLevel::from_gap(gap);
    log::debug!(
        "pump {} / employee {}: expected {expected:.2}, charged {amount:.2}, {level:?}",
        tx.pump_id,
        tx.emp_id
    );

    Ok(Assessment {
        level: Some(level),
        prediction: level.prediction().into(),
        class: level.class().into(),
        status: "success".into(),
        expected_amount: Some(expected),
        pump_id: tx.pump_id.clone(),
        emp_id: tx.emp_id.clone(),
    })
}

/// Triage that never fails: unreadable submissions become
/// [`Assessment::failed`].
pub fn assess_or_report(tx: &Transaction) -> Assessment {
    assess_transaction(tx).unwrap_or_else(|e| {
        log::warn!("cannot assess transaction: {e}");
        Assessment::failed(tx)
    })
}
