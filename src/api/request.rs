//! Request types for the payroll engine API.

use serde::{Deserialize, Serialize};

use crate::models::{Employee, HistoryRecord, PayPeriod};

/// Request body for the `/calculate` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The employee to compute net pay for.
    pub employee: Employee,
}

/// Request body for the `/detect` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetectionRequest {
    /// The proposed payroll batch, in report order.
    pub employees: Vec<Employee>,
    /// History to compare against; the server's snapshot when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<Vec<HistoryRecord>>,
    /// The run being checked; the current month when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pay_period: Option<PayPeriod>,
}
