//! Core data models for the payroll engine.
//!
//! This module contains all the domain models used throughout the engine.

mod employee;
mod flag;
mod history;
mod net_pay;
mod pay_period;
mod report;

pub use employee::Employee;
pub use flag::{Flag, FlagLevel};
pub use history::{HistoryRecord, load_history};
pub use net_pay::{DeductionBreakdown, NetPayResult};
pub use pay_period::PayPeriod;
pub use report::{EmployeeFlags, Report, ReportStatus};
