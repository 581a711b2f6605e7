//! Pay period token.
//!
//! This module contains the [`PayPeriod`] type identifying one payroll run.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An opaque, sortable identifier for one payroll run (e.g. `"2026-01"`).
///
/// The engine never parses the token; it only carries it into reports
/// and history records. Ordering is plain string ordering, which is
/// chronological for the `YYYY-MM` tokens produced by [`PayPeriod::current`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::PayPeriod;
///
/// let period = PayPeriod::new("2026-01");
/// assert_eq!(period.as_str(), "2026-01");
/// assert!(PayPeriod::new("2025-12") < period);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PayPeriod(String);

impl PayPeriod {
    /// Wraps an existing period token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the `YYYY-MM` token for the current UTC month.
    pub fn current() -> Self {
        Self::for_instant(Utc::now())
    }

    /// Returns the `YYYY-MM` token for the month containing `instant`.
    pub fn for_instant(instant: DateTime<Utc>) -> Self {
        Self(instant.format("%Y-%m").to_string())
    }

    /// Returns the raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PayPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PayPeriod {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}
