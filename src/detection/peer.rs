//! Peer aggregation and the peer variance strategy.
//!
//! Employees are grouped by exact `(department, location)`; an absent
//! location forms its own group. Group totals are computed once per batch
//! so that each employee's peer average, excluding themselves, is O(1).

use std::collections::HashMap;
use std::fmt;

use rust_decimal::Decimal;
use tracing::debug;

use crate::config::DetectionThresholds;
use crate::models::{Employee, Flag, FlagLevel};

use super::{SkipReason, display_whole};

/// The `(department, location)` pair employees are compared within.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PeerGroupKey {
    /// Exact department name.
    pub department: String,
    /// Exact location name, or `None` for employees without one.
    pub location: Option<String>,
}

impl PeerGroupKey {
    /// Returns the group an employee belongs to.
    pub fn of(employee: &Employee) -> Self {
        Self {
            department: employee.department.clone(),
            location: employee.location.clone(),
        }
    }
}

impl fmt::Display for PeerGroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.location {
            Some(location) => write!(f, "{} / {}", self.department, location),
            None => write!(f, "{} / no location", self.department),
        }
    }
}

#[derive(Debug, Clone)]
struct GroupTotals {
    /// `None` once the running sum leaves the `Decimal` range.
    salary_sum: Option<Decimal>,
    members: usize,
    /// Salary sum and entry count per employee ID, for excluding self.
    by_employee: HashMap<String, (Option<Decimal>, usize)>,
}

impl GroupTotals {
    fn new() -> Self {
        Self {
            salary_sum: Some(Decimal::ZERO),
            members: 0,
            by_employee: HashMap::new(),
        }
    }

    fn add(&mut self, employee: &Employee) {
        self.salary_sum = self
            .salary_sum
            .and_then(|sum| sum.checked_add(employee.salary));
        self.members += 1;

        let own = self
            .by_employee
            .entry(employee.employee_id.clone())
            .or_insert((Some(Decimal::ZERO), 0));
        own.0 = own.0.and_then(|sum| sum.checked_add(employee.salary));
        own.1 += 1;
    }

    /// Salary sum over every entry whose ID is not `exclude`.
    ///
    /// Falls back to the per-employee sums when the group total overflowed
    /// but the remaining entries still fit.
    fn sum_excluding(&self, exclude: Option<&str>) -> Option<Decimal> {
        let own = exclude.and_then(|id| self.by_employee.get(id));
        let from_total = match own {
            Some((own_sum, _)) => self
                .salary_sum
                .zip(*own_sum)
                .and_then(|(total, own_sum)| total.checked_sub(own_sum)),
            None => self.salary_sum,
        };

        from_total.or_else(|| {
            self.by_employee
                .iter()
                .filter(|(id, _)| Some(id.as_str()) != exclude)
                .try_fold(Decimal::ZERO, |acc, (_, (sum, _))| acc.checked_add((*sum)?))
        })
    }
}

/// Pre-aggregated salary totals for every peer group in a batch.
#[derive(Debug, Clone, Default)]
pub struct PeerGroups {
    groups: HashMap<PeerGroupKey, GroupTotals>,
}

impl PeerGroups {
    /// Aggregates a batch in one pass.
    pub fn from_batch(batch: &[Employee]) -> Self {
        let mut groups: HashMap<PeerGroupKey, GroupTotals> = HashMap::new();
        for employee in batch {
            groups
                .entry(PeerGroupKey::of(employee))
                .or_insert_with(GroupTotals::new)
                .add(employee);
        }
        Self { groups }
    }

    /// Number of distinct groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Returns true if the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Average salary of the employee's peers, excluding every batch entry
    /// with the employee's own ID.
    ///
    /// Returns `None` when the employee has no peers or the peers' salaries
    /// are too large to sum.
    pub fn peer_average(&self, employee: &Employee) -> Option<Decimal> {
        self.peer_average_or_skip(employee).ok()
    }

    fn peer_average_or_skip(&self, employee: &Employee) -> Result<Decimal, SkipReason> {
        let totals = self
            .groups
            .get(&PeerGroupKey::of(employee))
            .ok_or(SkipReason::NoPeers)?;
        let own_count = totals
            .by_employee
            .get(&employee.employee_id)
            .map_or(0, |(_, count)| *count);

        let peers = totals.members - own_count;
        if peers == 0 {
            return Err(SkipReason::NoPeers);
        }

        let peer_sum = totals
            .sum_excluding(Some(&employee.employee_id))
            .ok_or(SkipReason::AmountOutOfRange)?;
        Ok(peer_sum / Decimal::from(peers))
    }

    /// Average salary per group, for groups with at least two distinct
    /// employee IDs.
    ///
    /// A lone employee has no peers, even when submitted more than once, so
    /// its group yields no usable average. Groups whose total is out of
    /// range are left out.
    pub fn averages(&self) -> HashMap<PeerGroupKey, Decimal> {
        self.groups
            .iter()
            .filter(|(_, totals)| totals.by_employee.len() >= 2)
            .filter_map(|(key, totals)| {
                let sum = totals.sum_excluding(None)?;
                Some((key.clone(), sum / Decimal::from(totals.members)))
            })
            .collect()
    }
}

/// Computes the average salary of every `(department, location)` group
/// with at least two distinct employees.
///
/// # Example
///
/// ```
/// use payroll_engine::detection::{PeerGroupKey, compute_peer_averages};
/// use payroll_engine::models::Employee;
/// use rust_decimal::Decimal;
///
/// let make = |id: &str, salary: i64| Employee {
///     employee_id: id.to_string(),
///     name: id.to_string(),
///     department: "Sales".to_string(),
///     location: Some("Delhi".to_string()),
///     salary: Decimal::from(salary),
///     bonus: Decimal::ZERO,
///     deductions: Decimal::ZERO,
/// };
///
/// let averages = compute_peer_averages(&[make("E1", 40000), make("E2", 60000)]);
/// let key = PeerGroupKey { department: "Sales".to_string(), location: Some("Delhi".to_string()) };
/// assert_eq!(averages[&key], Decimal::from(50000));
/// ```
pub fn compute_peer_averages(batch: &[Employee]) -> HashMap<PeerGroupKey, Decimal> {
    PeerGroups::from_batch(batch).averages()
}

/// Flags a salary far above the employee's peers in the batch.
///
/// Peers are the other batch members with the same department and
/// location. Rules are checked high to low and the first match wins:
///
/// - `salary > peer_average * peer_anomaly_multiplier` raises an anomaly
/// - `salary > peer_average * peer_review_multiplier` raises a review
///
/// No flag is raised when the employee has no peers.
pub fn check_peer_variance(
    employee: &Employee,
    batch: &[Employee],
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    check_peer_variance_in(employee, &PeerGroups::from_batch(batch), thresholds)
}

/// Same as [`check_peer_variance`], reading from pre-aggregated groups.
pub fn check_peer_variance_in(
    employee: &Employee,
    groups: &PeerGroups,
    thresholds: &DetectionThresholds,
) -> Vec<Flag> {
    let average = match groups.peer_average_or_skip(employee) {
        Ok(average) => average,
        Err(reason) => {
            debug!(
                employee_id = %employee.employee_id,
                reason = %reason,
                "Skipped peer variance check"
            );
            return Vec::new();
        }
    };

    // A limit past the `Decimal` range is above every salary.
    let exceeds = |multiplier: Decimal| {
        average
            .checked_mul(multiplier)
            .is_some_and(|limit| employee.salary > limit)
    };

    let (level, multiplier) = if exceeds(thresholds.peer_anomaly_multiplier) {
        (FlagLevel::Anomaly, thresholds.peer_anomaly_multiplier)
    } else if exceeds(thresholds.peer_review_multiplier) {
        (FlagLevel::Review, thresholds.peer_review_multiplier)
    } else {
        return Vec::new();
    };

    vec![Flag {
        level,
        reason: format!(
            "Salary {} is more than {}x the peer average of {} in {}",
            display_whole(employee.salary),
            multiplier.normalize(),
            display_whole(average),
            PeerGroupKey::of(employee)
        ),
    }]
}
