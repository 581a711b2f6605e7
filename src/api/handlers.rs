//! HTTP request handlers for the payroll engine API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::compute_net_pay;
use crate::detection::build_report;

use super::request::{CalculationRequest, DetectionRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/calculate", post(calculate_handler))
        .route("/detect", post(detect_handler))
        .with_state(state)
}

/// Handler for POST /calculate endpoint.
///
/// Accepts one employee record and returns its net pay breakdown.
async fn calculate_handler(
    State(state): State<AppState>,
    payload: Result<Json<CalculationRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing calculation request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    match compute_net_pay(&request.employee, state.rules()) {
        Ok(result) => {
            info!(
                correlation_id = %correlation_id,
                employee_id = %result.employee_id,
                net_pay = %result.net_pay.normalize(),
                "Calculation completed successfully"
            );
            json_ok(result)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Calculation failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

/// Handler for POST /detect endpoint.
///
/// Accepts a payroll batch (and optionally its history and pay period) and
/// returns the anomaly report.
async fn detect_handler(
    State(state): State<AppState>,
    payload: Result<Json<DetectionRequest>, JsonRejection>,
) -> Response {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing detection request");

    let request = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => return rejection_response(rejection, correlation_id),
    };

    let history = request.history.as_deref().unwrap_or(state.history());

    let start_time = Instant::now();
    match build_report(&request.employees, history, state.rules(), request.pay_period) {
        Ok(report) => {
            info!(
                correlation_id = %correlation_id,
                employees = request.employees.len(),
                status = ?report.status,
                flags = report.flag_count(),
                duration_us = start_time.elapsed().as_micros(),
                "Detection completed successfully"
            );
            json_ok(report)
        }
        Err(err) => {
            warn!(correlation_id = %correlation_id, error = %err, "Detection failed");
            ApiErrorResponse::from(err).into_response()
        }
    }
}

fn json_ok<T: serde::Serialize>(body: T) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        Json(body),
    )
        .into_response()
}

/// Maps a JSON extraction failure to a 400 response.
fn rejection_response(rejection: JsonRejection, correlation_id: Uuid) -> Response {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            if body_text.contains("missing field") {
                ApiError::validation_error(body_text)
            } else {
                ApiError::malformed_json(body_text)
            }
        }
        JsonRejection::JsonSyntaxError(err) => {
            warn!(
                correlation_id = %correlation_id,
                error = %err,
                "JSON syntax error"
            );
            ApiError::malformed_json(format!("Invalid JSON syntax: {}", err))
        }
        JsonRejection::MissingJsonContentType(_) => {
            ApiError::new("MISSING_CONTENT_TYPE", "Content-Type must be application/json")
        }
        _ => ApiError::malformed_json("Failed to parse request body"),
    };

    ApiErrorResponse::bad_request(error).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RulesLoader;
    use crate::models::{Employee, NetPayResult, Report, ReportStatus};
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use std::str::FromStr;
    use tower::ServiceExt;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_test_state() -> AppState {
        let rules = RulesLoader::load("./config/rules.yaml")
            .expect("Failed to load config")
            .into_rules();
        AppState::new(rules, vec![])
    }

    fn create_valid_employee() -> Employee {
        Employee {
            employee_id: "E001".to_string(),
            name: "Asha Rao".to_string(),
            department: "Engineering".to_string(),
            location: Some("Mumbai".to_string()),
            salary: dec("80000"),
            bonus: dec("10000"),
            deductions: dec("5000"),
        }
    }

    async fn post(router: Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("Content-Type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_calculate_valid_request_returns_200() {
        let router = create_router(create_test_state());
        let body = serde_json::to_string(&CalculationRequest {
            employee: create_valid_employee(),
        })
        .unwrap();

        let (status, body) = post(router, "/calculate", body).await;
        assert_eq!(status, StatusCode::OK);

        let result: NetPayResult = serde_json::from_slice(&body).unwrap();
        assert_eq!(result.gross_pay, dec("90000"));
        assert_eq!(result.net_pay, dec("65000"));
    }

    #[tokio::test]
    async fn test_calculate_malformed_json_returns_400() {
        let router = create_router(create_test_state());

        let (status, body) = post(router, "/calculate", "{not json".to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_calculate_missing_field_returns_validation_error() {
        let router = create_router(create_test_state());
        let body = r#"{"employee": {"employee_id": "E001", "name": "A", "department": "X"}}"#;

        let (status, body) = post(router, "/calculate", body.to_string()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert!(error.message.contains("missing field"));
    }

    #[tokio::test]
    async fn test_calculate_negative_salary_returns_invalid_record() {
        let router = create_router(create_test_state());
        let mut employee = create_valid_employee();
        employee.salary = dec("-5");
        let body = serde_json::to_string(&CalculationRequest { employee }).unwrap();

        let (status, body) = post(router, "/calculate", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "INVALID_RECORD");
    }

    #[tokio::test]
    async fn test_detect_uses_request_pay_period() {
        let router = create_router(create_test_state());
        let body = serde_json::json!({
            "employees": [create_valid_employee()],
            "pay_period": "2026-10"
        })
        .to_string();

        let (status, body) = post(router, "/detect", body).await;
        assert_eq!(status, StatusCode::OK);

        let report: Report = serde_json::from_slice(&body).unwrap();
        assert_eq!(report.pay_period.as_str(), "2026-10");
        assert_eq!(report.status, ReportStatus::Clean);
    }
}
