//! Page-facing content operations.
//!
//! [`ContentClient`] answers the two questions pages ask: "all projects in
//! display order" and "the project with this slug". Neither returns an
//! error: every [`CmsError`] is logged and mapped to an empty list or
//! `None`, so a CMS outage renders as an empty page rather than a crash.
//! Only [`ContentClient::probe`] exposes the failure, for diagnostics.

use std::sync::{Arc, OnceLock};

use reel_core::project::{sort_by_rank, Project};
use reel_core::schema::{project_schema, validate_document, DocumentSchema};
use serde_json::Value;

use crate::queries::{CONNECTIVITY_QUERY, PROJECTS_QUERY, PROJECT_BY_SLUG_QUERY, SLUG_PARAM};
use crate::transport::{CmsError, QueryParams, QueryTransport};

/// Stateless reader over a [`QueryTransport`]. Cheap to clone.
#[derive(Clone)]
pub struct ContentClient {
    transport: Arc<dyn QueryTransport>,
}

impl ContentClient {
    pub fn new(transport: Arc<dyn QueryTransport>) -> Self {
        Self { transport }
    }

    /// All projects, ascending by rank.
    ///
    /// Returns an empty list when the CMS is unreachable, rejects the
    /// query, or answers with something other than a list.
    pub async fn list_projects(&self) -> Vec<Project> {
        let value = match self.transport.fetch(PROJECTS_QUERY, &QueryParams::new()).await {
            Ok(value) => value,
            Err(e) => {
                log_failure("list_projects", &e);
                return Vec::new();
            }
        };

        let mut projects = match value {
            Value::Array(items) => decode_projects(items),
            Value::Null => Vec::new(),
            other => {
                tracing::warn!(
                    operation = "list_projects",
                    got = %short(&other),
                    "Expected a list of projects, returning none"
                );
                Vec::new()
            }
        };

        sort_by_rank(&mut projects);
        tracing::debug!(count = projects.len(), "Listed projects");
        projects
    }

    /// The project whose slug is exactly `slug`, if any.
    ///
    /// Returns `None` when nothing matches and when the lookup fails.
    pub async fn get_project_by_slug(&self, slug: &str) -> Option<Project> {
        if slug.is_empty() {
            return None;
        }

        let params = QueryParams::new().with(SLUG_PARAM, slug);
        let value = match self.transport.fetch(PROJECT_BY_SLUG_QUERY, &params).await {
            Ok(value) => value,
            Err(e) => {
                log_failure("get_project_by_slug", &e);
                return None;
            }
        };

        // `[0]` already yields one document; tolerate a list anyway.
        let candidate = match value {
            Value::Array(items) => items.into_iter().next()?,
            Value::Null => return None,
            other => other,
        };

        let project = decode_project(candidate)?;
        if !project.matches_slug(slug) {
            tracing::warn!(
                slug,
                returned = ?project.slug_str(),
                "Slug lookup returned a different project, ignoring it"
            );
            return None;
        }
        Some(project)
    }

    /// Run the connectivity query and surface the outcome as-is.
    pub async fn probe(&self) -> Result<Value, CmsError> {
        self.transport
            .fetch(CONNECTIVITY_QUERY, &QueryParams::new())
            .await
    }
}

/// Log a failed fetch. Every variant ends in the same fallback; the log
/// keeps the distinction.
fn log_failure(operation: &'static str, err: &CmsError) {
    match err {
        CmsError::Request(e) => {
            tracing::warn!(operation, error = %e, "CMS unreachable, using fallback");
        }
        CmsError::Api { status, .. } => {
            tracing::warn!(operation, status, error = %err, "CMS returned an error status, using fallback");
        }
        CmsError::Query { kind, .. } => {
            tracing::warn!(operation, kind = %kind, error = %err, "CMS rejected the query, using fallback");
        }
        CmsError::Decode(msg) => {
            tracing::warn!(operation, error = %msg, "Malformed CMS response, using fallback");
        }
    }
}

fn decode_projects(items: Vec<Value>) -> Vec<Project> {
    items.into_iter().filter_map(decode_project).collect()
}

fn decode_project(value: Value) -> Option<Project> {
    let Value::Object(document) = &value else {
        tracing::warn!(got = %short(&value), "Skipping non-object project document");
        return None;
    };

    // The studio enforces the schema; here an incomplete record is only noted.
    let report = validate_document(schema(), document);
    if !report.is_valid {
        let id = document.get("_id").and_then(Value::as_str).unwrap_or_default();
        let fields: Vec<&str> = report.errors.iter().map(|e| e.field.as_str()).collect();
        tracing::debug!(
            id,
            fields = ?fields,
            "Project document is incomplete"
        );
    }

    match serde_json::from_value(value) {
        Ok(project) => Some(project),
        Err(e) => {
            tracing::warn!(error = %e, "Skipping undecodable project document");
            None
        }
    }
}

fn schema() -> &'static DocumentSchema {
    static SCHEMA: OnceLock<DocumentSchema> = OnceLock::new();
    SCHEMA.get_or_init(project_schema)
}

/// First bytes of a value's JSON text, for log lines.
fn short(value: &Value) -> String {
    let text = value.to_string();
    match text.char_indices().nth(80) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text,
    }
}
