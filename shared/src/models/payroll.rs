//! Payroll Model
//!
//! Amounts are stored as `f64` and computed with `rust_decimal`.

use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};

/// Disbursement state of a payroll line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PayrollStatus {
    Paid,
    Pending,
}

impl std::fmt::Display for PayrollStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Paid => "Paid",
            Self::Pending => "Pending",
        })
    }
}

/// One employee's pay for one billing cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayrollRecord {
    pub id: String,
    pub employee_id: String,
    /// Billing cycle label, e.g. `May 2024`
    pub month: String,
    pub base_salary: f64,
    pub allowances: f64,
    pub deductions: f64,
    pub net_pay: f64,
    pub status: PayrollStatus,
}

impl PayrollRecord {
    /// Build a record with `net_pay` derived from its components
    pub fn new(
        id: impl Into<String>,
        employee_id: impl Into<String>,
        month: impl Into<String>,
        base_salary: f64,
        allowances: f64,
        deductions: f64,
        status: PayrollStatus,
    ) -> Self {
        Self {
            id: id.into(),
            employee_id: employee_id.into(),
            month: month.into(),
            base_salary,
            allowances,
            deductions,
            net_pay: net_pay(base_salary, allowances, deductions),
            status,
        }
    }
}

/// `base + allowances - deductions`, rounded to cents
pub fn net_pay(base_salary: f64, allowances: f64, deductions: f64) -> f64 {
    to_f64(to_decimal(base_salary) + to_decimal(allowances) - to_decimal(deductions))
}

/// Convert a stored amount for calculation; non-finite input becomes zero
pub fn to_decimal(value: f64) -> Decimal {
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Round to cents and convert back for storage
pub fn to_f64(value: Decimal) -> f64 {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}
