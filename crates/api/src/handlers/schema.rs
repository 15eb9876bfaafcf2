//! Studio configuration export.

use axum::extract::State;
use axum::Json;
use reel_core::schema::StudioConfig;

use crate::state::AppState;

/// GET /api/schema -- the studio configuration and `project` schema for
/// the configured project and dataset.
pub async fn studio(State(state): State<AppState>) -> Json<StudioConfig> {
    Json(StudioConfig::new(&state.cms.project_id, &state.cms.dataset))
}
