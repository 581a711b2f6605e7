//! Historical variance strategy.
//!
//! Compares an employee's proposed net pay against the average of their
//! most recent finalized net pays.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::DetectionThresholds;
use crate::models::{Employee, Flag, HistoryRecord, NetPayResult};

use super::{SkipReason, display_percent, display_whole};

/// History records grouped by employee, preserving store order.
///
/// Built once per batch so each employee needs a single hash lookup
/// instead of a scan of the whole history.
#[derive(Debug, Clone, Default)]
pub struct HistoryIndex<'a> {
    by_employee: HashMap<&'a str, Vec<&'a HistoryRecord>>,
}

impl<'a> HistoryIndex<'a> {
    /// Groups `history` by `employee_id`.
    pub fn new(history: &'a [HistoryRecord]) -> Self {
        let mut by_employee: HashMap<&'a str, Vec<&'a HistoryRecord>> = HashMap::new();
        for record in history {
            by_employee
                .entry(record.employee_id.as_str())
                .or_default()
                .push(record);
        }
        Self { by_employee }
    }

    /// Returns an employee's records, most recent first.
    pub fn records_for(&self, employee_id: &str) -> &[&'a HistoryRecord] {
        self.by_employee
            .get(employee_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}

/// Flags a proposed net pay that deviates sharply from recent history.
///
/// Filters `history` to the employee's records (expected most-recent-first,
/// never re-sorted), averages up to `history_window` of them, and compares:
///
/// - `|change| > historical_anomaly_ratio` raises an anomaly
/// - otherwise `|change| > historical_review_ratio` raises a review
///
/// where `change = (net_pay - average) / average`. Emits nothing when fewer
/// than `min_history_records` records exist, the average is zero, or the
/// records are too large to sum.
///
/// # Examples
///
/// ```
/// use payroll_engine::config::DetectionThresholds;
/// use payroll_engine::detection::check_historical_variance;
/// use payroll_engine::models::{
///     DeductionBreakdown, Employee, FlagLevel, HistoryRecord, NetPayResult, PayPeriod,
/// };
/// use rust_decimal::Decimal;
///
/// let employee = Employee {
///     employee_id: "E001".to_string(),
///     name: "Asha Rao".to_string(),
///     department: "Engineering".to_string(),
///     location: None,
///     salary: Decimal::from(80000),
///     bonus: Decimal::ZERO,
///     deductions: Decimal::ZERO,
/// };
/// let proposed = NetPayResult {
///     employee_id: "E001".to_string(),
///     gross_pay: Decimal::from(80000),
///     net_pay: Decimal::from(80000),
///     breakdown: DeductionBreakdown::new(
///         Decimal::ZERO, Decimal::ZERO, Decimal::ZERO, Decimal::ZERO,
///     )
///     .unwrap(),
/// };
/// let history: Vec<HistoryRecord> = ["2026-03", "2026-02", "2026-01"]
///     .into_iter()
///     .map(|period| HistoryRecord {
///         employee_id: "E001".to_string(),
///         pay_period: PayPeriod::new(period),
///         net_pay: Decimal::from(50000),
///     })
///     .collect();
///
/// let flags =
///     check_historical_variance(&employee, &proposed, &history, &DetectionThresholds::default());
/// assert_eq!(flags.len(), 1);
/// assert_eq!(flags[0].level, FlagLevel::Anomaly);
/// ```
pub fn check_historical_variance(
    employee: &Employee,
    net_pay: &NetPayResult,
    history: &[HistoryRecord],
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    let records: Vec<&HistoryRecord> = history
        .iter()
        .filter(|r| r.employee_id == employee.employee_id)
        .collect();
    evaluate(employee, net_pay, &records, thresholds)
}

/// Same as [`check_historical_variance`], reading from a prebuilt index.
pub fn check_historical_variance_in(
    employee: &Employee,
    net_pay: &NetPayResult,
    index: &HistoryIndex<'_>,
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    evaluate(
        employee,
        net_pay,
        index.records_for(&employee.employee_id),
        thresholds,
    )
}

fn evaluate(
    employee: &Employee,
    net_pay: &NetPayResult,
    records: &[&HistoryRecord],
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    let (change, average) = match relative_change(net_pay.net_pay, records, thresholds) {
        Ok(result) => result,
        Err(reason) => {
            debug!(
                employee_id = %employee.employee_id,
                reason = %reason,
                "Skipped historical variance check"
            );
            return Vec::new();
        }
    };

    let magnitude = change.abs();
    let flag = if magnitude > thresholds.historical_anomaly_ratio {
        Flag::anomaly(reason(change, average, net_pay.net_pay))
    } else if magnitude > thresholds.historical_review_ratio {
        Flag::review(reason(change, average, net_pay.net_pay))
    } else {
        return Vec::new();
    };

    vec![flag]
}

/// Returns `(change, average)` over the windowed records.
fn relative_change(
    current: Decimal,
    records: &[&HistoryRecord],
    thresholds: &DetectionThresholds,
) -> Result<(Decimal, Decimal), SkipReason> {
    if records.len() < thresholds.min_history_records {
        return Err(SkipReason::InsufficientHistory {
            found: records.len(),
            required: thresholds.min_history_records,
        });
    }

    let window = &records[..records.len().min(thresholds.history_window)];
    let total = window
        .iter()
        .try_fold(Decimal::ZERO, |sum, r| sum.checked_add(r.net_pay))
        .ok_or(SkipReason::AmountOutOfRange)?;
    let average = total / Decimal::from(window.len());

    if average.is_zero() {
        return Err(SkipReason::UndefinedRatio);
    }

    // A ratio past the `Decimal` range saturates; it exceeds any threshold.
    let change = current
        .checked_sub(average)
        .and_then(|delta| delta.checked_div(average))
        .unwrap_or(if (current > average) == average.is_sign_positive() {
            Decimal::MAX
        } else {
            Decimal::MIN
        });
    Ok((change, average))
}

fn reason(change: Decimal, average: Decimal, proposed: Decimal) -> String {
    // The sign of `change` flips when the average is negative.
    let direction = if proposed > average { "rose" } else { "dropped" };
    format!(
        "Net pay {} {} against recent average (average {}, proposed {})",
        direction,
        display_percent(change.abs()),
        display_whole(average),
        display_whole(proposed)
    )
}
