//! HTTP API module for the payroll engine.
//!
//! This module provides the REST endpoints for net pay calculation
//! (`POST /calculate`) and batch anomaly detection (`POST /detect`).

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CalculationRequest, DetectionRequest};
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
