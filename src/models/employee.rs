//! Employee record model.
//!
//! This module defines the [`Employee`] struct, the unit of work for both
//! the net pay calculator and every anomaly strategy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// An employee record as supplied by the employee store.
///
/// Records are immutable once submitted to the engine. `location` may be
/// absent, in which case professional tax falls back to the `default`
/// table and peer grouping treats the absence as its own bucket.
///
/// # Example
///
/// ```
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     employee_id: "E001".to_string(),
///     name: "Asha Rao".to_string(),
///     department: "Engineering".to_string(),
///     location: Some("Mumbai".to_string()),
///     salary: Decimal::from(80000),
///     bonus: Decimal::from(10000),
///     deductions: Decimal::from(5000),
/// };
/// assert_eq!(employee.gross_pay().unwrap(), Decimal::from(90000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    /// Stable identity key for the employee.
    pub employee_id: String,
    /// Display name, carried into reports.
    pub name: String,
    /// Department used for peer grouping.
    pub department: String,
    /// Work location; selects the professional tax table.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Base salary for the period.
    pub salary: Decimal,
    /// Bonus paid on top of salary.
    pub bonus: Decimal,
    /// Personal or ad-hoc deductions not derived from rules.
    pub deductions: Decimal,
}

impl Employee {
    /// Returns salary plus bonus.
    ///
    /// # Errors
    ///
    /// Returns `InvalidRecord` if the sum does not fit in a `Decimal`.
    pub fn gross_pay(&self) -> EngineResult<Decimal> {
        self.salary
            .checked_add(self.bonus)
            .ok_or_else(|| self.out_of_range("bonus"))
    }

    /// Rejects records the engine cannot safely compute with.
    ///
    /// The ID must be non-blank and every amount non-negative.
    pub fn validate(&self) -> EngineResult<()> {
        if self.employee_id.trim().is_empty() {
            return Err(self.invalid("employee_id", "must not be empty"));
        }

        for (field, value) in [
            ("salary", self.salary),
            ("bonus", self.bonus),
            ("deductions", self.deductions),
        ] {
            if value < Decimal::ZERO {
                return Err(self.invalid(field, &format!("must not be negative, got {}", value)));
            }
        }

        Ok(())
    }

    /// The error for an amount too large to compute with.
    pub(crate) fn out_of_range(&self, field: &str) -> EngineError {
        self.invalid(field, "amount out of range")
    }

    fn invalid(&self, field: &str, message: &str) -> EngineError {
        EngineError::InvalidRecord {
            employee_id: self.employee_id.clone(),
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}
