//! Health check handlers

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::state::AppState;

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
}

/// Readiness check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReadinessResponse {
    /// Whether the service is ready to take advisory requests
    pub ready: bool,
    /// Weather backend status
    pub weather: ServiceStatus,
    /// Inference backend status
    pub inference: ServiceStatus,
}

/// Status of a single backing service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Whether the service responded
    pub healthy: bool,
    /// The model in use, when the service reports one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// Liveness check
///
/// Always returns OK while the process is running.
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness check
///
/// Probes both the weather service and the inference backend. Returns
/// 503 when either is unreachable so load balancers hold traffic.
pub async fn readiness_check(
    State(state): State<AppState>,
) -> (StatusCode, Json<ReadinessResponse>) {
    let health = state.advisory_service.backend_health().await;

    let response = ReadinessResponse {
        ready: health.is_ready(),
        weather: ServiceStatus {
            healthy: health.weather,
            model: None,
        },
        inference: ServiceStatus {
            healthy: health.inference,
            model: Some(state.advisory_service.current_model()),
        },
    };

    let status = if response.ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (status, Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn health_reports_package_version() {
        let response = health_check().await;
        assert_eq!(response.status, "ok");
        assert_eq!(response.version, env!("CARGO_PKG_VERSION"));
    }

    #[test]
    fn readiness_response_serializes() {
        let response = ReadinessResponse {
            ready: false,
            weather: ServiceStatus {
                healthy: true,
                model: None,
            },
            inference: ServiceStatus {
                healthy: false,
                model: Some("gpt-4o-mini".to_string()),
            },
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["ready"], false);
        assert_eq!(json["inference"]["model"], "gpt-4o-mini");
        assert!(json["weather"].get("model").is_none());
    }
}
