//! Historical pay records.

use std::fs;
use std::path::Path;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::PayPeriod;

/// One finalized net pay from an earlier payroll run.
///
/// The history store is append-only and owned outside the engine. The
/// engine expects it most-recent-first per employee and never reorders it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// The employee the record belongs to.
    pub employee_id: String,
    /// The run the net pay was paid in.
    pub pay_period: PayPeriod,
    /// The net pay that was paid.
    pub net_pay: Decimal,
}

/// Loads a history snapshot from a JSON array of [`HistoryRecord`]s.
///
/// Records are returned in file order; the file is expected to already be
/// most-recent-first.
pub fn load_history<P: AsRef<Path>>(path: P) -> EngineResult<Vec<HistoryRecord>> {
    let path = path.as_ref();
    let path_str = path.display().to_string();

    let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
        path: path_str.clone(),
    })?;

    serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
        path: path_str,
        message: e.to_string(),
    })
}
