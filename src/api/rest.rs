//! REST API Handlers
//!
//! Implements the REST endpoints for drive health, file analysis,
//! tiering plans, compression sweeps, cloud options, and alerts.

use crate::domain::{AlertSeverity, StorageTier};
use crate::error::Error;
use crate::planning::RiskTolerance;
use crate::service::AdvisorService;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

// =============================================================================
// Request/Response Types
// =============================================================================

/// Tiering plan request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TieringPlanRequest {
    /// Optional monthly cost ceiling; accepted but not enforced by the planner
    #[serde(default)]
    pub max_cost: Option<f64>,
    /// Target region for the advisory cloud mapping
    #[serde(default = "default_region")]
    pub region: String,
    /// conservative, balanced, or aggressive
    #[serde(default = "default_tolerance")]
    pub risk_tolerance: String,
}

fn default_region() -> String {
    "us-east-1".to_string()
}

fn default_tolerance() -> String {
    "balanced".to_string()
}

#[derive(Debug, Clone, Deserialize)]
pub struct FilesQuery {
    #[serde(default)]
    pub tier: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompressionQuery {
    #[serde(default)]
    pub min_roi: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudOptionsQuery {
    #[serde(default)]
    pub tier: Option<String>,
    #[serde(default)]
    pub size_gb: Option<f64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AlertsQuery {
    #[serde(default)]
    pub severity: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApplyPlanQuery {
    #[serde(default)]
    pub plan_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LifecycleQuery {
    #[serde(default)]
    pub provider: Option<String>,
}

/// API error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

// =============================================================================
// REST Router
// =============================================================================

/// REST API router builder
pub struct RestRouter {
    service: Arc<AdvisorService>,
}

impl RestRouter {
    /// Create a new REST router
    pub fn new(service: Arc<AdvisorService>) -> Self {
        Self { service }
    }

    /// Build the Axum router
    pub fn build(self) -> Router {
        Router::new()
            .route("/", get(root))
            // Drive endpoints
            .route("/api/drives", get(get_drives))
            .route("/api/drives/:id", get(get_drive))
            .route("/api/drives/:id/health", get(get_drive_health))
            // File endpoints
            .route("/api/files", get(get_files))
            .route("/api/files/:id", get(get_file))
            // Planning endpoints
            .route("/api/tiering-plan", post(create_tiering_plan))
            .route("/api/compression", get(get_compression))
            .route("/api/cloud-options", get(get_cloud_options))
            // Alert endpoints
            .route("/api/alerts", get(get_alerts))
            .route("/api/alerts/:id/acknowledge", post(acknowledge_alert))
            // Overview and export
            .route("/api/dashboard", get(get_dashboard))
            .route("/api/apply-plan", post(apply_plan))
            .route("/api/export/lifecycle", get(export_lifecycle))
            // Health endpoint
            .route("/health", get(health_check))
            .with_state(self.service)
    }
}

type AppState = Arc<AdvisorService>;

/// Map a domain error onto an HTTP response
fn error_response(err: Error) -> Response {
    let status = if err.is_not_found() {
        StatusCode::NOT_FOUND
    } else if err.is_validation() {
        StatusCode::BAD_REQUEST
    } else {
        error!("request failed: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let error = match status {
        StatusCode::NOT_FOUND => "not_found",
        StatusCode::BAD_REQUEST => "validation_failed",
        _ => "internal_error",
    };

    (
        status,
        Json(ApiErrorResponse {
            error: error.into(),
            message: err.to_string(),
            details: None,
        }),
    )
        .into_response()
}

// =============================================================================
// Handlers
// =============================================================================

/// Service banner
async fn root() -> impl IntoResponse {
    Json(serde_json::json!({
        "message": "storage-sentinel - risk-aware storage advisor",
        "version": crate::VERSION,
        "status": "operational"
    }))
}

/// Liveness probe
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// List all drives with health metrics
async fn get_drives(State(service): State<AppState>) -> Response {
    match service.drives().await {
        Ok(drives) => (StatusCode::OK, Json(drives)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Get one drive
async fn get_drive(State(service): State<AppState>, Path(id): Path<String>) -> Response {
    match service.drive(&id).await {
        Ok(drive) => (StatusCode::OK, Json(drive)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Recompute the health analysis for one drive
async fn get_drive_health(State(service): State<AppState>, Path(id): Path<String>) -> Response {
    match service.drive_health(&id).await {
        Ok(report) => (StatusCode::OK, Json(report)).into_response(),
        Err(e) => error_response(e),
    }
}

/// List files, optionally filtered by current tier
async fn get_files(
    State(service): State<AppState>,
    Query(query): Query<FilesQuery>,
) -> Response {
    let tier = match query.tier.as_deref().map(str::parse::<StorageTier>) {
        Some(Ok(tier)) => Some(tier),
        Some(Err(e)) => return error_response(e),
        None => None,
    };

    match service.files(tier).await {
        Ok(files) => (StatusCode::OK, Json(files)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Get one file with access and compression analyses
async fn get_file(State(service): State<AppState>, Path(id): Path<String>) -> Response {
    match service.file_detail(&id, Utc::now()).await {
        Ok(detail) => (StatusCode::OK, Json(detail)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Generate a fleet-wide tiering plan
async fn create_tiering_plan(
    State(service): State<AppState>,
    Json(request): Json<TieringPlanRequest>,
) -> Response {
    let tolerance = match request.risk_tolerance.parse::<RiskTolerance>() {
        Ok(tolerance) => tolerance,
        Err(e) => return error_response(e),
    };

    info!(
        %tolerance,
        region = %request.region,
        "tiering plan requested"
    );

    match service.tiering_plan(tolerance, Utc::now()).await {
        Ok(plan) => (StatusCode::OK, Json(plan)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Fleet-wide compression sweep
async fn get_compression(
    State(service): State<AppState>,
    Query(query): Query<CompressionQuery>,
) -> Response {
    match service.compression_sweep(query.min_roi).await {
        Ok(sweep) => (StatusCode::OK, Json(sweep)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Ranked cloud options for a tier and size.
///
/// An unrecognized tier string falls back to the COLD candidates.
async fn get_cloud_options(
    State(service): State<AppState>,
    Query(query): Query<CloudOptionsQuery>,
) -> Response {
    let tier = query
        .tier
        .as_deref()
        .and_then(|t| t.parse::<StorageTier>().ok())
        .unwrap_or(StorageTier::Cold);
    let size_gb = query.size_gb.unwrap_or(100.0);

    let options = service.cloud_options(tier, size_gb);
    (StatusCode::OK, Json(options)).into_response()
}

/// List alerts, optionally filtered by severity
async fn get_alerts(
    State(service): State<AppState>,
    Query(query): Query<AlertsQuery>,
) -> Response {
    let severity = match query.severity.as_deref().map(str::parse::<AlertSeverity>) {
        Some(Ok(severity)) => Some(severity),
        Some(Err(e)) => return error_response(e),
        None => None,
    };

    match service.alerts(severity).await {
        Ok(alerts) => (StatusCode::OK, Json(alerts)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Acknowledge an alert
async fn acknowledge_alert(State(service): State<AppState>, Path(id): Path<String>) -> Response {
    match service.acknowledge_alert(&id).await {
        Ok(alert) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "message": "Alert acknowledged",
                "alert_id": alert.id
            })),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// Dashboard overview
async fn get_dashboard(State(service): State<AppState>) -> Response {
    match service.dashboard().await {
        Ok(summary) => (StatusCode::OK, Json(summary)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Simulate applying a tiering plan
async fn apply_plan(
    State(service): State<AppState>,
    Query(query): Query<ApplyPlanQuery>,
) -> Response {
    let plan_id = query.plan_id.unwrap_or_else(|| "default".to_string());
    match service.apply_plan(&plan_id, Utc::now()).await {
        Ok(applied) => (StatusCode::OK, Json(applied)).into_response(),
        Err(e) => error_response(e),
    }
}

/// Export a cloud lifecycle policy
async fn export_lifecycle(
    State(service): State<AppState>,
    Query(query): Query<LifecycleQuery>,
) -> Response {
    let provider = query.provider.unwrap_or_else(|| "aws".to_string());
    (StatusCode::OK, Json(service.lifecycle_policy(&provider))).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::inventory::sample_inventory;
    use axum::body::Body;
    use axum::http::Request;
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    fn router() -> Router {
        let now = Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap();
        let service = Arc::new(AdvisorService::new(
            Arc::new(sample_inventory(now)),
            Settings::default(),
        ));
        RestRouter::new(service).build()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_root_banner() {
        let response = router()
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "operational");
    }

    #[tokio::test]
    async fn test_get_drives_and_detail() {
        let response = router()
            .oneshot(Request::get("/api/drives").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body.as_array().unwrap().len(), 5);

        let response = router()
            .oneshot(
                Request::get("/api/drives/drive-001")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_drive_is_404() {
        let response = router()
            .oneshot(
                Request::get("/api/drives/drive-999")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "not_found");
    }

    #[tokio::test]
    async fn test_drive_health_recomputed() {
        let response = router()
            .oneshot(
                Request::get("/api/drives/drive-005/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["health_score"].as_f64().unwrap() < 50.0);
        assert_eq!(body["top_factors"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_files_tier_filter_validation() {
        let response = router()
            .oneshot(
                Request::get("/api/files?tier=hot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = router()
            .oneshot(
                Request::get("/api/files?tier=frozen")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_tiering_plan_endpoint() {
        let response = router()
            .oneshot(
                Request::post("/api/tiering-plan")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"risk_tolerance":"aggressive"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert!(body["total_recommendations"].as_u64().unwrap() > 0);
        assert_eq!(body["strategy_options"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_tiering_plan_rejects_bad_tolerance() {
        let response = router()
            .oneshot(
                Request::post("/api/tiering-plan")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"risk_tolerance":"reckless"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cloud_options_unknown_tier_falls_back() {
        let response = router()
            .oneshot(
                Request::get("/api/cloud-options?tier=glacial&size_gb=10")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        // COLD fallback candidates
        let tiers: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|o| o["tier"].as_str().unwrap())
            .collect();
        assert!(tiers.contains(&"glacier-instant"));
    }

    #[tokio::test]
    async fn test_acknowledge_alert_flow() {
        let app = router();
        let response = app
            .clone()
            .oneshot(
                Request::post("/api/alerts/alert-001/acknowledge")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::post("/api/alerts/alert-999/acknowledge")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_dashboard_endpoint() {
        let response = router()
            .oneshot(Request::get("/api/dashboard").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["storage_summary"]["total_files"], 18);
    }

    #[tokio::test]
    async fn test_apply_plan_simulated() {
        let response = router()
            .oneshot(
                Request::post("/api/apply-plan?plan_id=pilot")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["status"], "simulated");
        assert_eq!(body["plan_id"], "pilot");
    }

    #[tokio::test]
    async fn test_lifecycle_export() {
        let response = router()
            .oneshot(
                Request::get("/api/export/lifecycle?provider=aws")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["Rules"].as_array().unwrap().len(), 3);
    }
}
