use std::sync::Arc;

use reel_cms::{CmsConfig, ContentClient};

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Cheap to clone: everything inside is behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// CMS connection settings, echoed by the diagnostic route.
    pub cms: Arc<CmsConfig>,
    /// Read access to project content.
    pub content: ContentClient,
}
