//! Payroll anomaly detection.
//!
//! This module contains the peer aggregator, the three anomaly strategies
//! (historical variance, peer variance, and absolute rule checks), and the
//! batch report builder that runs them over a payroll batch.
//!
//! Every strategy inspects one employee against its context and returns
//! zero or more [`Flag`](crate::models::Flag)s. Strategies never fail; when
//! a check cannot be evaluated meaningfully it is skipped and the
//! [`SkipReason`] is logged at debug level.

mod absolute;
mod historical;
mod peer;
mod report;

use std::fmt;

use rust_decimal::{Decimal, RoundingStrategy};

pub use absolute::check_absolute_rules;
pub use historical::{HistoryIndex, check_historical_variance, check_historical_variance_in};
pub use peer::{
    PeerGroupKey, PeerGroups, check_peer_variance, check_peer_variance_in, compute_peer_averages,
};
pub use report::build_report;

/// Why a strategy produced no flags without evaluating its thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Too few history records for the employee.
    InsufficientHistory {
        /// Matching records found.
        found: usize,
        /// Records required.
        required: usize,
    },
    /// The historical average is zero, so a relative change is undefined.
    UndefinedRatio,
    /// No other employee shares the department and location.
    NoPeers,
    /// The amounts involved are too large to combine in a `Decimal`.
    AmountOutOfRange,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::InsufficientHistory { found, required } => write!(
                f,
                "insufficient history: {} records, {} required",
                found, required
            ),
            SkipReason::UndefinedRatio => write!(f, "historical average is zero"),
            SkipReason::NoPeers => write!(f, "no peers in department and location"),
            SkipReason::AmountOutOfRange => write!(f, "amounts out of range"),
        }
    }
}

/// Rounds a value to a whole number for flag reasons.
///
/// Comparisons always use the unrounded value; this is display only.
pub(crate) fn display_whole(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats a ratio as a whole percentage, or as a multiple when the
/// percentage is out of range.
pub(crate) fn display_percent(ratio: Decimal) -> String {
    match ratio.checked_mul(Decimal::ONE_HUNDRED) {
        Some(percent) => format!("{}%", display_whole(percent)),
        None => format!("{}x", display_whole(ratio)),
    }
}
