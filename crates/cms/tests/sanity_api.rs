//! The HTTP transport against a local mock of the query endpoint.

use std::sync::Arc;

use assert_matches::assert_matches;
use reel_cms::queries::{PROJECTS_QUERY, PROJECT_BY_SLUG_QUERY, SLUG_PARAM};
use reel_cms::{CmsConfig, CmsError, ContentClient, QueryParams, QueryTransport, SanityApi};
use serde_json::{json, Value};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const QUERY_PATH: &str = "/v2023-05-03/data/query/production";

fn api_for(server: &MockServer) -> SanityApi {
    SanityApi::new(&CmsConfig::default()).with_base_url(&server.uri())
}

fn envelope(result: Value) -> Value {
    json!({ "ms": 3, "query": "*", "result": result })
}

#[tokio::test]
async fn sends_query_and_json_encoded_slug() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", PROJECT_BY_SLUG_QUERY))
        .and(query_param("$slug", "\"night-swim\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "_id": "p1",
            "slug": { "current": "night-swim" }
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let params = QueryParams::new().with(SLUG_PARAM, "night-swim");
    let value = api_for(&server)
        .fetch(PROJECT_BY_SLUG_QUERY, &params)
        .await
        .unwrap();

    assert_eq!(value["_id"], "p1");
}

#[tokio::test]
async fn success_without_result_is_null() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ms": 1 })))
        .mount(&server)
        .await;

    let value = api_for(&server)
        .fetch(PROJECTS_QUERY, &QueryParams::new())
        .await
        .unwrap();
    assert_eq!(value, Value::Null);
}

#[tokio::test]
async fn query_error_envelope_is_a_query_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {
                "type": "queryParseError",
                "description": "expected ']' following expression"
            }
        })))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .fetch("*[", &QueryParams::new())
        .await;
    assert_matches!(
        result,
        Err(CmsError::Query { ref kind, .. }) if kind == "queryParseError"
    );
}

#[tokio::test]
async fn missing_dataset_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "statusCode": 404,
            "error": "Not Found",
            "message": "Dataset not found"
        })))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .fetch(PROJECTS_QUERY, &QueryParams::new())
        .await;
    assert_matches!(result, Err(CmsError::Api { status: 404, ref body }) if body.contains("Dataset not found"));
}

#[tokio::test]
async fn server_error_is_an_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
        .mount(&server)
        .await;

    let result = api_for(&server)
        .fetch(PROJECTS_QUERY, &QueryParams::new())
        .await;
    assert_matches!(result, Err(CmsError::Api { status: 503, ref body }) if body == "upstream unavailable");
}

#[tokio::test]
async fn content_client_over_http_sorts_and_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", PROJECTS_QUERY))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            { "_id": "b", "orderRank": "b" },
            { "_id": "a", "orderRank": "a" }
        ]))))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(QUERY_PATH))
        .and(query_param("query", PROJECT_BY_SLUG_QUERY))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = ContentClient::new(Arc::new(api_for(&server)));

    let ids: Vec<_> = client
        .list_projects()
        .await
        .into_iter()
        .map(|p| p.id)
        .collect();
    assert_eq!(ids, ["a", "b"]);
    assert!(client.get_project_by_slug("a").await.is_none());
}
