pub mod health;
pub mod pages;

use axum::routing::get;
use axum::Router;

use crate::handlers::{diagnostics, schema};
use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /test-sanity                 CMS connectivity check
/// /schema                      studio configuration + project schema
///
/// /pages/home                  listing page payload
/// /pages/project/{slug}        detail page payload (404 on unknown slug)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/test-sanity", get(diagnostics::test_cms))
        .route("/schema", get(schema::studio))
        .nest("/pages", pages::router())
}
