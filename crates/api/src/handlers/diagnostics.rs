//! Connectivity check against the CMS.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::{SecondsFormat, Utc};
use reel_cms::CmsConfig;
use serde::Serialize;
use serde_json::Value;

use crate::state::AppState;

/// Body of `GET /api/test-sanity`, for both outcomes.
#[derive(Debug, Serialize)]
pub struct DiagnosticResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub config: CmsConfig,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// RFC 3339, UTC, millisecond precision.
    pub timestamp: String,
}

/// GET /api/test-sanity -- run the connectivity query and report.
///
/// 200 with the query result on success, 500 with the error message
/// otherwise. The configuration in use is echoed either way.
pub async fn test_cms(State(state): State<AppState>) -> (StatusCode, Json<DiagnosticResponse>) {
    let config = state.cms.as_ref().clone();
    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    match state.content.probe().await {
        Ok(result) => (
            StatusCode::OK,
            Json(DiagnosticResponse {
                success: true,
                error: None,
                config,
                result: Some(result),
                timestamp,
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "CMS connectivity check failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DiagnosticResponse {
                    success: false,
                    error: Some(e.to_string()),
                    config,
                    result: None,
                    timestamp,
                }),
            )
        }
    }
}
