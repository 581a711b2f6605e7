//! Net pay result models.
//!
//! This module contains the [`NetPayResult`] returned by the net pay
//! calculator and its itemized [`DeductionBreakdown`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Itemized deductions applied to one employee's gross pay.
///
/// # Example
///
/// ```
/// use payroll_engine::models::DeductionBreakdown;
/// use rust_decimal::Decimal;
///
/// let breakdown = DeductionBreakdown::new(
///     Decimal::from(9000),
///     Decimal::from(10800),
///     Decimal::from(200),
///     Decimal::from(5000),
/// )
/// .unwrap();
/// assert_eq!(breakdown.total_deductions, Decimal::from(25000));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeductionBreakdown {
    /// Income tax from the matched income-tax slab.
    pub company_tax: Decimal,
    /// Flat-rate social security contribution.
    pub social_security: Decimal,
    /// Flat professional tax from the location's slab table.
    pub professional_tax: Decimal,
    /// Pass-through personal deductions from the employee record.
    pub personal_deductions: Decimal,
    /// Sum of the four components above.
    pub total_deductions: Decimal,
}

impl DeductionBreakdown {
    /// Builds a breakdown, deriving `total_deductions` from its parts.
    ///
    /// Returns `None` if the total does not fit in a `Decimal`.
    pub fn new(
        company_tax: Decimal,
        social_security: Decimal,
        professional_tax: Decimal,
        personal_deductions: Decimal,
    ) -> Option<Self> {
        let total_deductions = company_tax
            .checked_add(social_security)?
            .checked_add(professional_tax)?
            .checked_add(personal_deductions)?;

        Some(Self {
            company_tax,
            social_security,
            professional_tax,
            personal_deductions,
            total_deductions,
        })
    }
}

/// The outcome of computing one employee's net pay.
///
/// `net_pay` may be negative when deductions exceed gross pay; that is a
/// signal for the absolute rule checks, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetPayResult {
    /// The employee this result belongs to.
    pub employee_id: String,
    /// Salary plus bonus.
    pub gross_pay: Decimal,
    /// Gross pay minus total deductions.
    pub net_pay: Decimal,
    /// Itemized deductions.
    pub breakdown: DeductionBreakdown,
}

impl NetPayResult {
    /// Returns true if deductions exceeded gross pay.
    pub fn is_negative(&self) -> bool {
        self.net_pay < Decimal::ZERO
    }
}
