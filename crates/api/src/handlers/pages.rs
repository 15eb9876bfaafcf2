//! Page loaders for the listing and project detail pages.

use axum::extract::{Path, State};
use axum::Json;
use reel_core::error::CoreError;
use reel_core::project::Project;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Payload for the listing page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub all_projects: Vec<Project>,
}

/// Payload for a project detail page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPage {
    pub project: Project,
    pub all_projects: Vec<Project>,
}

/// GET /api/pages/home
pub async fn home(State(state): State<AppState>) -> Json<HomePage> {
    let all_projects = state.content.list_projects().await;
    Json(HomePage { all_projects })
}

/// GET /api/pages/project/{slug}
///
/// Both reads are independent and run concurrently. An unknown slug (or a
/// failed lookup) becomes a 404.
pub async fn project(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> AppResult<Json<ProjectPage>> {
    let (project, all_projects) = tokio::join!(
        state.content.get_project_by_slug(&slug),
        state.content.list_projects(),
    );

    let project = project.ok_or_else(|| {
        tracing::info!(slug = %slug, "Project not found");
        AppError::Core(CoreError::NotFound {
            entity: "Project",
            key: slug.clone(),
        })
    })?;

    Ok(Json(ProjectPage {
        project,
        all_projects,
    }))
}
