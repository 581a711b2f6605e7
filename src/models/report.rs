//! Batch detection report models.
//!
//! This module contains the [`Report`] produced for a payroll batch and the
//! [`ReportStatus`] precedence rule.

use serde::{Deserialize, Serialize};

use super::{Flag, FlagLevel, PayPeriod};

/// Overall verdict for a payroll batch.
///
/// `AnomalyDetected` if any flag is an anomaly, else `ReviewRequired` if
/// any flag exists at all, else `Clean`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    /// No flags were raised.
    Clean,
    /// At least one review flag and no anomalies.
    ReviewRequired,
    /// At least one anomaly flag.
    AnomalyDetected,
}

impl ReportStatus {
    /// Derives the status from every flag in a report.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::{Flag, ReportStatus};
    ///
    /// let flags = vec![Flag::review("a"), Flag::anomaly("b")];
    /// assert_eq!(ReportStatus::from_flags(flags.iter()), ReportStatus::AnomalyDetected);
    /// assert_eq!(ReportStatus::from_flags(std::iter::empty::<&Flag>()), ReportStatus::Clean);
    /// ```
    pub fn from_flags<'a>(flags: impl IntoIterator<Item = &'a Flag>) -> Self {
        match flags.into_iter().map(|f| f.level).max() {
            Some(FlagLevel::Anomaly) => ReportStatus::AnomalyDetected,
            Some(FlagLevel::Review) => ReportStatus::ReviewRequired,
            None => ReportStatus::Clean,
        }
    }
}

/// All flags raised against one employee, in strategy order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeFlags {
    /// The flagged employee.
    pub employee_id: String,
    /// The employee's display name.
    pub name: String,
    /// Historical, then peer, then absolute-rule flags. Never empty.
    pub flags: Vec<Flag>,
}

/// The detection report for one payroll batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    /// The payroll run the batch belongs to.
    pub pay_period: PayPeriod,
    /// Overall verdict.
    pub status: ReportStatus,
    /// Flagged employees in batch input order. Unflagged employees are omitted.
    pub flagged_employees: Vec<EmployeeFlags>,
}

impl Report {
    /// Builds a report, deriving the status from the entries.
    pub fn new(pay_period: PayPeriod, flagged_employees: Vec<EmployeeFlags>) -> Self {
        let status = ReportStatus::from_flags(flagged_employees.iter().flat_map(|e| &e.flags));
        Self {
            pay_period,
            status,
            flagged_employees,
        }
    }

    /// Total number of flags across all employees.
    pub fn flag_count(&self) -> usize {
        self.flagged_employees.iter().map(|e| e.flags.len()).sum()
    }

    /// Returns true if no employee was flagged.
    pub fn is_clean(&self) -> bool {
        self.status == ReportStatus::Clean
    }
}
