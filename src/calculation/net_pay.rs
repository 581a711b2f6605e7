//! Net pay calculation.
//!
//! This module turns one employee record and the rule table into gross pay,
//! net pay, and an itemized deduction breakdown.

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::RuleTable;
use crate::error::EngineResult;
use crate::models::{DeductionBreakdown, Employee, NetPayResult};

use super::find_slab;

/// Computes an employee's net pay from the rule table.
///
/// - `gross_pay = salary + bonus`
/// - `company_tax = gross_pay * rate` of the single income-tax slab
///   containing gross pay (zero if none does)
/// - `social_security = gross_pay * social_security_percent`
/// - `professional_tax` is the flat amount of the slab containing gross pay
///   in the location's table, or the `default` table when the location is
///   absent or unknown (zero if no slab matches)
/// - `net_pay = gross_pay - total_deductions`, which may be negative
///
/// The function is pure: identical inputs always give identical output.
///
/// # Errors
///
/// - `InvalidRecord` if the employee ID is blank, any amount is negative, or
///   an amount is too large for the arithmetic to stay in range
/// - `MissingRuleSection` if neither the employee's location nor `default`
///   has a professional tax table
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_net_pay;
/// use payroll_engine::config::{ProfessionalTaxSlab, RuleTable, TaxSlab};
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
/// use std::collections::HashMap;
///
/// let rules = RuleTable {
///     social_security_percent: Decimal::new(12, 2),
///     income_tax_slabs: vec![TaxSlab {
///         min: Decimal::ZERO,
///         max: Some(Decimal::from(9999999)),
///         rate: Decimal::new(10, 2),
///     }],
///     professional_tax: HashMap::from([
///         (
///             "Mumbai".to_string(),
///             vec![ProfessionalTaxSlab {
///                 min: Decimal::from(10001),
///                 max: Some(Decimal::from(9999999)),
///                 tax: Decimal::from(200),
///             }],
///         ),
///         ("default".to_string(), vec![]),
///     ]),
///     detection: Default::default(),
/// };
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
///
/// let result = compute_net_pay(&employee, &rules).unwrap();
/// assert_eq!(result.gross_pay, Decimal::from(90000));
/// assert_eq!(result.breakdown.company_tax, Decimal::from(9000));
/// assert_eq!(result.breakdown.social_security, Decimal::from(10800));
/// assert_eq!(result.breakdown.professional_tax, Decimal::from(200));
/// assert_eq!(result.net_pay, Decimal::from(65000));
/// ```
pub fn compute_net_pay(employee: &Employee, rules: &RuleTable) -> EngineResult<NetPayResult> {
    employee.validate()?;

    let gross_pay = employee.gross_pay()?;

    let company_tax = match find_slab(&rules.income_tax_slabs, gross_pay) {
        Some(slab) => gross_pay
            .checked_mul(slab.rate)
            .ok_or_else(|| employee.out_of_range("salary"))?,
        None => Decimal::ZERO,
    };

    let social_security = gross_pay
        .checked_mul(rules.social_security_percent)
        .ok_or_else(|| employee.out_of_range("salary"))?;

    let location_slabs = rules.professional_tax_slabs(employee.location.as_deref())?;
    let professional_tax =
        find_slab(location_slabs, gross_pay).map_or(Decimal::ZERO, |slab| slab.tax);

    let breakdown = DeductionBreakdown::new(
        company_tax,
        social_security,
        professional_tax,
        employee.deductions,
    )
    .ok_or_else(|| employee.out_of_range("deductions"))?;
    let net_pay = gross_pay
        .checked_sub(breakdown.total_deductions)
        .ok_or_else(|| employee.out_of_range("deductions"))?;

    debug!(
        employee_id = %employee.employee_id,
        gross_pay = %gross_pay.normalize(),
        total_deductions = %breakdown.total_deductions.normalize(),
        net_pay = %net_pay.normalize(),
        "Computed net pay"
    );

    Ok(NetPayResult {
        employee_id: employee.employee_id.clone(),
        gross_pay,
        net_pay,
        breakdown,
    })
}
