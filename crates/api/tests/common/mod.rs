#![allow(dead_code)]

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use reel_api::config::ServerConfig;
use reel_api::router::build_app_router;
use reel_api::state::AppState;
use reel_cms::queries::{CONNECTIVITY_QUERY, PROJECTS_QUERY, PROJECT_BY_SLUG_QUERY, SLUG_PARAM};
use reel_cms::{CmsConfig, CmsError, ContentClient, QueryParams, QueryTransport};
use serde_json::{json, Value};
use tower::ServiceExt;

/// In-memory CMS answering the site's queries from a fixed document list.
pub struct FakeCms {
    pub documents: Vec<Value>,
}

#[async_trait]
impl QueryTransport for FakeCms {
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, CmsError> {
        match query {
            q if q == PROJECTS_QUERY => Ok(Value::Array(self.documents.clone())),
            q if q == PROJECT_BY_SLUG_QUERY => {
                let slug = params.get(SLUG_PARAM).cloned().unwrap_or(Value::Null);
                Ok(self
                    .documents
                    .iter()
                    .find(|d| d["slug"]["current"] == slug)
                    .cloned()
                    .unwrap_or(Value::Null))
            }
            q if q == CONNECTIVITY_QUERY => Ok(self
                .documents
                .first()
                .map(|d| json!({ "_id": d["_id"], "title": d["title"] }))
                .unwrap_or(Value::Null)),
            other => Err(CmsError::Query {
                kind: "unsupported".into(),
                description: other.to_string(),
            }),
        }
    }
}

/// A CMS that rejects every query.
pub struct BrokenCms;

#[async_trait]
impl QueryTransport for BrokenCms {
    async fn fetch(&self, _query: &str, _params: &QueryParams) -> Result<Value, CmsError> {
        Err(CmsError::Api {
            status: 503,
            body: "Service Unavailable".into(),
        })
    }
}

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
    }
}

/// Build the full application router over `transport`.
pub fn build_test_app(transport: Arc<dyn QueryTransport>) -> Router {
    let config = test_config();
    let state = AppState {
        config: Arc::new(config.clone()),
        cms: Arc::new(CmsConfig::default()),
        content: ContentClient::new(transport),
    };
    build_app_router(state, &config)
}

/// App over a fake CMS holding `documents`.
pub fn app_with(documents: Vec<Value>) -> Router {
    build_test_app(Arc::new(FakeCms { documents }))
}

/// A project document as the CMS projection returns it.
pub fn project_doc(id: &str, slug: &str, rank: &str) -> Value {
    json!({
        "_id": id,
        "title": format!("Project {id}"),
        "category": "commercial",
        "slug": { "current": slug },
        "orderRank": rank,
        "thumbnail": {
            "asset": { "_ref": format!("image-{id}-1920x1080-jpg"), "_type": "reference" },
            "alt": "Thumbnail",
            "url": format!("https://cdn.sanity.io/images/cr745m4x/production/{id}-1920x1080.jpg")
        },
        "credits": [{ "role": "Director", "name": "Jo" }],
        "vimeoUrl": format!("https://vimeo.com/{id}"),
        "featured": false
    })
}

/// Send a GET request through the router.
pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
