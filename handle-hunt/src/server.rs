//! HTTP surface for the availability engine.
//!
//! Three routes: a liveness probe, the supported platform list, and the
//! hunt endpoint. Every JSON response is wrapped in [`ApiResponse`].

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use handle_hunt_lib::{parse_platform_list, HandleHunter, HuntError, Verdict};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

pub const HEALTH_TEXT: &str = "Server Available!..";
pub const SUCCESS_MESSAGE: &str = "Request completed successfully";

/// Status used when the engine rejects a request.
const FAILURE_STATUS: StatusCode = StatusCode::EXPECTATION_FAILED;

/// Shared state for handlers.
#[derive(Clone)]
pub struct AppState {
    pub hunter: HandleHunter,
}

/// JSON envelope of every API response.
///
/// The HTTP status always equals `status_code`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub status_code: u16,
    pub data: Vec<T>,
    pub results: usize,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            success: true,
            message: SUCCESS_MESSAGE.to_string(),
            status_code: StatusCode::OK.as_u16(),
            results: data.len(),
            data,
        }
    }

    pub fn failure<M: Into<String>>(message: M) -> Self {
        Self {
            success: false,
            message: message.into(),
            status_code: FAILURE_STATUS.as_u16(),
            data: Vec::new(),
            results: 0,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status_code).unwrap_or(FAILURE_STATUS);
        (status, Json(self)).into_response()
    }
}

impl<T> From<HuntError> for ApiResponse<T> {
    fn from(err: HuntError) -> Self {
        Self::failure(err.to_string())
    }
}

/// Query string of `POST /hunt/{username}`.
#[derive(Debug, Default, Deserialize)]
pub struct HuntQuery {
    /// Comma-separated platform ids
    pub platforms: Option<String>,
}

/// Create the web server router
pub fn create_router(hunter: HandleHunter) -> Router {
    Router::new()
        .route("/health-check", get(health_check))
        .route("/supported-platforms", get(supported_platforms))
        .route("/hunt/{username}", post(hunt))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { hunter })
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(hunter: HandleHunter, addr: SocketAddr) -> Result<(), HuntError> {
    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        HuntError::network_with_source(format!("Failed to bind {}", addr), e.to_string())
    })?;

    info!(
        %addr,
        platforms = hunter.supported_platforms().len(),
        "handle-hunt server listening"
    );

    axum::serve(listener, create_router(hunter))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to install Ctrl-C handler");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

pub async fn health_check() -> &'static str {
    HEALTH_TEXT
}

pub async fn supported_platforms(State(state): State<AppState>) -> ApiResponse<String> {
    ApiResponse::ok(state.hunter.supported_platforms())
}

/// Check `username` on the requested platforms, or the defaults if none.
pub async fn hunt(
    State(state): State<AppState>,
    Path(username): Path<String>,
    Query(query): Query<HuntQuery>,
) -> ApiResponse<Verdict> {
    let platforms = parse_platform_list(query.platforms.as_deref())
        .unwrap_or_else(|| state.hunter.default_platforms());

    match state.hunter.check_all(&username, &platforms).await {
        Ok(verdicts) => ApiResponse::ok(verdicts),
        Err(e) if e.is_invalid_input() => {
            warn!(username = %username, error = %e, "hunt request rejected");
            e.into()
        }
        Err(e) => {
            error!(username = %username, error = %e, "hunt request failed");
            e.into()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_envelope() {
        let response = ApiResponse::ok(vec!["github".to_string(), "tiktok".to_string()]);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["statusCode"], 200);
        assert_eq!(json["message"], SUCCESS_MESSAGE);
        assert_eq!(json["results"], 2);
        assert_eq!(json["data"][1], "tiktok");
    }

    #[test]
    fn test_failure_envelope_from_error() {
        let response: ApiResponse<Verdict> =
            HuntError::invalid_handle("a b", "Only letters").into();
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], false);
        assert_eq!(json["statusCode"], 417);
        assert_eq!(json["results"], 0);
        assert_eq!(json["data"], serde_json::json!([]));
        assert!(json["message"].as_str().unwrap().contains("Invalid handle"));
    }

    #[test]
    fn test_envelope_status_matches_body() {
        let response = ApiResponse::<String>::failure("boom").into_response();
        assert_eq!(response.status(), StatusCode::EXPECTATION_FAILED);
    }
}
