//! Batch report builder.

use tracing::{debug, info};

use crate::calculation::compute_net_pay;
use crate::config::RuleTable;
use crate::error::EngineResult;
use crate::models::{Employee, EmployeeFlags, HistoryRecord, PayPeriod, Report};

use super::{
    HistoryIndex, PeerGroups, check_absolute_rules, check_historical_variance_in,
    check_peer_variance_in,
};

/// Runs net pay and every anomaly strategy over a payroll batch.
///
/// For each employee, in input order, net pay is computed and the
/// historical, peer, and absolute strategies run in that fixed order. Only
/// employees with at least one flag appear in the report. Peer groups and
/// the history lookup are aggregated once up front, so the build is linear
/// in batch and history size.
///
/// When `pay_period` is `None` the current `YYYY-MM` token is used.
///
/// # Errors
///
/// Propagates the first net pay failure (`InvalidRecord` or
/// `MissingRuleSection`); no partial report is returned.
pub fn build_report(
    batch: &[Employee],
    history: &[HistoryRecord],
    rules: &RuleTable,
    pay_period: Option<PayPeriod>,
) -> EngineResult<Report> {
    let pay_period = pay_period.unwrap_or_else(PayPeriod::current);
    let thresholds = &rules.detection;
    let peer_groups = PeerGroups::from_batch(batch);
    let history_index = HistoryIndex::new(history);

    let mut flagged_employees = Vec::new();
    for employee in batch {
        let net_pay = compute_net_pay(employee, rules)?;

        let mut flags = check_historical_variance_in(employee, &net_pay, &history_index, thresholds);
        flags.extend(check_peer_variance_in(employee, &peer_groups, thresholds));
        flags.extend(check_absolute_rules(employee, &net_pay, thresholds));

        if flags.is_empty() {
            continue;
        }

        debug!(
            employee_id = %employee.employee_id,
            flags = flags.len(),
            "Employee flagged"
        );
        flagged_employees.push(EmployeeFlags {
            employee_id: employee.employee_id.clone(),
            name: employee.name.clone(),
            flags,
        });
    }

    let report = Report::new(pay_period, flagged_employees);
    info!(
        pay_period = %report.pay_period,
        employees = batch.len(),
        flagged = report.flagged_employees.len(),
        status = ?report.status,
        "Built detection report"
    );
    Ok(report)
}
