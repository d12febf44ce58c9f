//! HTTP request handlers for the bill estimation API.
//!
//! This module contains the handler functions for all API endpoints.

use std::time::Instant;

use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use tracing::{info, warn};
use uuid::Uuid;

use crate::calculation::estimate;
use crate::error::{EstimatorError, EstimatorResult};
use crate::models::{BillEstimate, BillTerms, NewEstimation, Unit};

use super::request::{ClientFilter, EstimateRequest};
use super::response::{ApiError, ApiErrorResponse};
use super::state::AppState;

/// Creates the API router with all endpoints.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/estimate", post(estimate_handler))
        .route("/presets/:name", get(preset_handler))
        .route("/units", get(units_handler))
        .route(
            "/estimations",
            post(create_estimation_handler).get(list_estimations_handler),
        )
        .route(
            "/estimations/:id",
            get(get_estimation_handler)
                .put(update_estimation_handler)
                .delete(delete_estimation_handler),
        )
        .with_state(state)
}

/// Turns a JSON extraction failure into an API error.
fn json_rejection_error(rejection: JsonRejection, correlation_id: Uuid) -> ApiErrorResponse {
    let error = match rejection {
        JsonRejection::JsonDataError(err) => {
            let body_text = err.body_text();
            warn!(
                correlation_id = %correlation_id,
                error = %body_text,
                "JSON data error"
            );
            ApiError::validation_error(body_text)
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
    ApiErrorResponse::new(StatusCode::BAD_REQUEST, error)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiErrorResponse> {
    Uuid::parse_str(raw).map_err(|_| {
        ApiErrorResponse::new(
            StatusCode::BAD_REQUEST,
            ApiError::with_details(
                "VALIDATION_ERROR",
                format!("Invalid estimation id: {}", raw),
                "id",
            ),
        )
    })
}

fn failure(err: EstimatorError, correlation_id: Uuid) -> ApiErrorResponse {
    warn!(correlation_id = %correlation_id, error = %err, "Request failed");
    err.into()
}

/// Picks the terms an estimate request asks for.
fn resolve_terms(state: &AppState, request: &EstimateRequest) -> EstimatorResult<BillTerms> {
    match (&request.terms, &request.preset) {
        (Some(terms), _) => Ok(terms.clone()),
        (None, Some(preset)) => state.config().get_preset(preset).cloned(),
        (None, None) => state.config().default_terms().cloned(),
    }
}

fn perform_estimate(state: &AppState, request: &EstimateRequest) -> EstimatorResult<BillEstimate> {
    let terms = resolve_terms(state, request)?;
    estimate(
        &request.components,
        &terms,
        request.staff_count,
        request.month_days,
    )
}

/// Handler for POST /estimate.
///
/// Computes an audited estimate without storing anything.
async fn estimate_handler(
    State(state): State<AppState>,
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing estimate request");

    let Json(request) = payload.map_err(|r| json_rejection_error(r, correlation_id))?;

    let start_time = Instant::now();
    let result = perform_estimate(&state, &request).map_err(|e| failure(e, correlation_id))?;
    info!(
        correlation_id = %correlation_id,
        staff_count = result.staff_count,
        grand_total = %result.totals.grand_total,
        duration_us = start_time.elapsed().as_micros(),
        "Estimate completed successfully"
    );

    Ok((StatusCode::OK, Json(result)).into_response())
}

/// Handler for GET /presets/:name.
async fn preset_handler(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<BillTerms>, ApiErrorResponse> {
    state
        .config()
        .get_preset(&name)
        .cloned()
        .map(Json)
        .map_err(|e| ApiErrorResponse::from(e).with_status(StatusCode::NOT_FOUND))
}

/// Handler for GET /units.
async fn units_handler(
    State(state): State<AppState>,
    Query(filter): Query<ClientFilter>,
) -> Json<Vec<Unit>> {
    let units = match filter.client_id.as_deref() {
        Some(client_id) => state
            .config()
            .units_for_client(client_id)
            .into_iter()
            .cloned()
            .collect(),
        None => state.config().units().to_vec(),
    };
    Json(units)
}

/// Handler for POST /estimations.
async fn create_estimation_handler(
    State(state): State<AppState>,
    payload: Result<Json<NewEstimation>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, "Processing create estimation request");

    let Json(new) = payload.map_err(|r| json_rejection_error(r, correlation_id))?;
    let record = state
        .estimations()
        .create(new)
        .map_err(|e| failure(e, correlation_id))?;

    Ok((StatusCode::CREATED, Json(record)).into_response())
}

/// Handler for GET /estimations.
async fn list_estimations_handler(
    State(state): State<AppState>,
    Query(filter): Query<ClientFilter>,
) -> Result<Response, ApiErrorResponse> {
    let records = state
        .estimations()
        .list(filter.client_id.as_deref())
        .map_err(ApiErrorResponse::from)?;
    Ok(Json(records).into_response())
}

/// Handler for GET /estimations/:id.
async fn get_estimation_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Response, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    let record = state.estimations().get(id).map_err(ApiErrorResponse::from)?;
    Ok(Json(record).into_response())
}

/// Handler for PUT /estimations/:id.
///
/// Totals are recomputed from the submitted inputs.
async fn update_estimation_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    payload: Result<Json<NewEstimation>, JsonRejection>,
) -> Result<Response, ApiErrorResponse> {
    let correlation_id = Uuid::new_v4();
    info!(correlation_id = %correlation_id, estimation_id = %raw_id, "Processing update estimation request");

    let id = parse_id(&raw_id)?;
    let Json(new) = payload.map_err(|r| json_rejection_error(r, correlation_id))?;
    let record = state
        .estimations()
        .update(id, new)
        .map_err(|e| failure(e, correlation_id))?;

    Ok(Json(record).into_response())
}

/// Handler for DELETE /estimations/:id.
async fn delete_estimation_handler(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, ApiErrorResponse> {
    let id = parse_id(&raw_id)?;
    state
        .estimations()
        .delete(id)
        .map_err(ApiErrorResponse::from)?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigLoader;
    use crate::models::EstimationRecord;
    use axum::body::Body;
    use axum::http::Request;
    use rust_decimal::Decimal;
    use serde_json::{Value, json};
    use std::str::FromStr;
    use tower::ServiceExt;

    fn create_test_router() -> Router {
        let config = ConfigLoader::load("./config/axis").expect("Failed to load config");
        create_router(AppState::new(config))
    }

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    async fn send(router: Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    fn reference_estimate_request() -> Value {
        json!({
            "components": { "basic": "10000", "da": "2000", "hra": "3000" },
            "terms": {
                "epf_percent": "13",
                "esi_percent": "3.25",
                "bonus_percent": "8.33",
                "leave_percent": "5",
                "gratuity_percent": "4.81",
                "holiday_percent": "0",
                "service_charge_percent": "10"
            },
            "staff_count": 2,
            "month_days": 30
        })
    }

    fn new_estimation_body() -> Value {
        json!({
            "client_id": "client_acme",
            "unit_code": "U-001",
            "service": "Security Guard",
            "staff_count": 2,
            "month_days": 30,
            "month": 6,
            "year": 2026,
            "components": { "basic": 10000, "da": 2000, "hra": 3000 },
            "terms": {
                "epf_percent": 13,
                "esi_percent": "3.25",
                "bonus_percent": "8.33",
                "leave_percent": 5,
                "gratuity_percent": "4.81",
                "service_charge_percent": 10
            }
        })
    }

    #[tokio::test]
    async fn test_estimate_returns_reference_totals() {
        let (status, body) =
            send(create_test_router(), "POST", "/estimate", Some(reference_estimate_request())).await;

        assert_eq!(status, StatusCode::OK);
        let result: BillEstimate = serde_json::from_value(body).unwrap();
        assert_eq!(result.totals.total_per_head, dec("20748"));
        assert_eq!(result.totals.grand_total, dec("41496"));
        assert_eq!(result.month_days, 30);
        assert_eq!(result.audit_trace.steps.len(), 11);
    }

    #[tokio::test]
    async fn test_estimate_uses_default_preset_without_terms() {
        let mut request = reference_estimate_request();
        request.as_object_mut().unwrap().remove("terms");

        let (status, body) = send(create_test_router(), "POST", "/estimate", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["grand_total"].as_str().unwrap(), "41496");
    }

    #[tokio::test]
    async fn test_estimate_with_named_preset() {
        let mut request = reference_estimate_request();
        let object = request.as_object_mut().unwrap();
        object.remove("terms");
        object.insert("preset".to_string(), json!("esi_exempt"));

        let (status, body) = send(create_test_router(), "POST", "/estimate", Some(request)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["esi_amount"].as_str().unwrap(), "0");
    }

    #[tokio::test]
    async fn test_estimate_with_unknown_preset_returns_400() {
        let mut request = reference_estimate_request();
        let object = request.as_object_mut().unwrap();
        object.remove("terms");
        object.insert("preset".to_string(), json!("nope"));

        let (status, body) = send(create_test_router(), "POST", "/estimate", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "PRESET_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_estimate_zero_staff_count_returns_validation_error() {
        let mut request = reference_estimate_request();
        request["staff_count"] = json!(0);

        let (status, body) = send(create_test_router(), "POST", "/estimate", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let error: ApiError = serde_json::from_value(body).unwrap();
        assert_eq!(error.code, "VALIDATION_ERROR");
        assert_eq!(error.details.as_deref(), Some("staff_count"));
    }

    #[tokio::test]
    async fn test_estimate_malformed_json_returns_400() {
        let response = create_test_router()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/estimate")
                    .header("Content-Type", "application/json")
                    .body(Body::from("{invalid json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let error: ApiError = serde_json::from_slice(&body).unwrap();
        assert_eq!(error.code, "MALFORMED_JSON");
    }

    #[tokio::test]
    async fn test_estimate_missing_staff_count_returns_validation_error() {
        let mut request = reference_estimate_request();
        request.as_object_mut().unwrap().remove("staff_count");

        let (status, body) = send(create_test_router(), "POST", "/estimate", Some(request)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["message"].as_str().unwrap().contains("staff_count"));
    }

    #[tokio::test]
    async fn test_get_preset_and_unknown_preset() {
        let router = create_test_router();
        let (status, body) = send(router.clone(), "GET", "/presets/standard", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["esi_percent"].as_str().unwrap(), "3.25");

        let (status, body) = send(router, "GET", "/presets/unknown", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "PRESET_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_units_filtered_by_client() {
        let router = create_test_router();
        let (_, all) = send(router.clone(), "GET", "/units", None).await;
        let (status, acme) = send(router, "GET", "/units?client_id=client_acme", None).await;

        assert_eq!(status, StatusCode::OK);
        let all = all.as_array().unwrap();
        let acme = acme.as_array().unwrap();
        assert!(acme.len() < all.len());
        assert!(acme.iter().all(|u| u["client_id"].is_null() || u["client_id"] == "client_acme"));
    }

    #[tokio::test]
    async fn test_estimation_crud_lifecycle() {
        let router = create_test_router();

        let (status, body) = send(router.clone(), "POST", "/estimations", Some(new_estimation_body())).await;
        assert_eq!(status, StatusCode::CREATED);
        let created: EstimationRecord = serde_json::from_value(body).unwrap();
        assert_eq!(created.totals.grand_total, dec("41496"));

        let uri = format!("/estimations/{}", created.id);
        let (status, body) = send(router.clone(), "GET", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(serde_json::from_value::<EstimationRecord>(body).unwrap(), created);

        let mut changed = new_estimation_body();
        changed["staff_count"] = json!(4);
        let (status, body) = send(router.clone(), "PUT", &uri, Some(changed)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["totals"]["grand_total"].as_str().unwrap(), "82992");

        let (status, body) = send(router.clone(), "DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        assert!(body.is_null());

        let (status, body) = send(router, "GET", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], "ESTIMATION_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_create_estimation_ignores_client_supplied_totals() {
        let mut body = new_estimation_body();
        body["totals"] = json!({ "grand_total": "1" });

        let (status, body) = send(create_test_router(), "POST", "/estimations", Some(body)).await;

        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["totals"]["grand_total"].as_str().unwrap(), "41496");
    }

    #[tokio::test]
    async fn test_create_estimation_with_unknown_unit_returns_400() {
        let mut body = new_estimation_body();
        body["unit_code"] = json!("U-999");

        let (status, body) = send(create_test_router(), "POST", "/estimations", Some(body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "UNIT_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_list_estimations_by_client() {
        let router = create_test_router();
        send(router.clone(), "POST", "/estimations", Some(new_estimation_body())).await;
        let mut other = new_estimation_body();
        other["client_id"] = json!("client_globex");
        other["unit_code"] = json!("U-003");
        send(router.clone(), "POST", "/estimations", Some(other)).await;

        let (status, body) = send(router.clone(), "GET", "/estimations?client_id=client_globex", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);

        let (_, body) = send(router, "GET", "/estimations", None).await;
        assert_eq!(body.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_estimation_id_returns_400() {
        let (status, body) = send(create_test_router(), "GET", "/estimations/not-a-uuid", None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["code"], "VALIDATION_ERROR");
    }
}
