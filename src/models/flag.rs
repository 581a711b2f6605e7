//! Anomaly flags.

use serde::{Deserialize, Serialize};

/// Severity of a detection finding.
///
/// Ordered so that `Anomaly` compares greater than `Review`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FlagLevel {
    /// Worth a human look before the run is finalized.
    Review,
    /// Almost certainly wrong; blocks a clean report.
    Anomaly,
}

/// A single finding raised by an anomaly strategy.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Flag, FlagLevel};
///
/// let flag = Flag::review("Bonus 200001 exceeds 200% of base salary 100000");
/// assert_eq!(flag.level, FlagLevel::Review);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flag {
    /// How severe the finding is.
    pub level: FlagLevel,
    /// Audit-friendly explanation with the computed values embedded.
    pub reason: String,
}

impl Flag {
    /// Creates a `Review` flag.
    pub fn review(reason: impl Into<String>) -> Self {
        Self {
            level: FlagLevel::Review,
            reason: reason.into(),
        }
    }

    /// Creates an `Anomaly` flag.
    pub fn anomaly(reason: impl Into<String>) -> Self {
        Self {
            level: FlagLevel::Anomaly,
            reason: reason.into(),
        }
    }
}
