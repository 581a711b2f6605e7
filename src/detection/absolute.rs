//! Absolute rule checks.
//!
//! Context-free checks on a single employee's record and computed pay.
//! Both rules are independent and may fire together.

use crate::config::DetectionThresholds;
use crate::models::{Employee, Flag, NetPayResult};

use super::display_percent;

/// Flags impossible or unusual pay regardless of history or peers.
///
/// - Negative net pay raises an anomaly: total deductions exceed gross pay.
/// - `bonus > salary * bonus_review_multiplier` raises a review.
pub fn check_absolute_rules(
    employee: &Employee,
    net_pay: &NetPayResult,
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    let mut flags = Vec::new();

    if net_pay.is_negative() {
        flags.push(Flag::anomaly(format!(
            "Total deductions {} exceed gross pay {} (net pay {})",
            net_pay.breakdown.total_deductions.normalize(),
            net_pay.gross_pay.normalize(),
            net_pay.net_pay.normalize()
        )));
    }

    // A limit past the `Decimal` range is above every bonus.
    let over_limit = employee
        .salary
        .checked_mul(thresholds.bonus_review_multiplier)
        .is_some_and(|limit| employee.bonus > limit);
    if over_limit {
        flags.push(Flag::review(format!(
            "Bonus {} exceeds {} of base salary {}",
            employee.bonus.normalize(),
            display_percent(thresholds.bonus_review_multiplier),
            employee.salary.normalize()
        )));
    }

    flags
}
