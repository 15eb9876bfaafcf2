//! HTTP client for the CMS query endpoint.
//!
//! Wraps `GET /v{version}/data/query/{dataset}` using [`reqwest`]. The
//! query text travels in the `query` parameter and each named parameter as
//! `$name=<json>`.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::CmsConfig;
use crate::transport::{CmsError, QueryParams, QueryTransport};

/// HTTP transport for one CMS project/dataset.
pub struct SanityApi {
    client: reqwest::Client,
    base_url: String,
    query_path: String,
}

impl SanityApi {
    /// Create a client for the project and dataset in `config`.
    pub fn new(config: &CmsConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    /// Create a client reusing an existing [`reqwest::Client`]
    /// (shares its connection pool).
    pub fn with_client(client: reqwest::Client, config: &CmsConfig) -> Self {
        Self {
            client,
            base_url: config.query_base_url(),
            query_path: config.query_path(),
        }
    }

    /// Send queries to `base_url` instead of the project's API host.
    /// The versioned dataset path is kept.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// The endpoint queries are sent to.
    pub fn query_url(&self) -> String {
        format!("{}{}", self.base_url, self.query_path)
    }
}

#[async_trait]
impl QueryTransport for SanityApi {
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, CmsError> {
        let response = self
            .client
            .get(self.query_url())
            .query(&[("query", query)])
            .query(&params.to_query_pairs())
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;

        tracing::debug!(status, bytes = body.len(), "CMS query response received");

        interpret_response(status, &body)
    }
}

/// Turn a query endpoint response into the `result` value or a typed error.
///
/// The endpoint answers `{"result": ..., "ms": .., "query": ..}` on success
/// and `{"error": {"type": .., "description": ..}}` when it rejects the
/// query. Any other non-2xx answer (unknown dataset, bad token, gateway
/// errors) keeps its status and raw body.
pub fn interpret_response(status: u16, body: &str) -> Result<Value, CmsError> {
    let parsed: Result<Value, _> = serde_json::from_str(body);

    if let Ok(Value::Object(envelope)) = &parsed {
        if let Some(rejection) = query_rejection(envelope.get("error")) {
            return Err(rejection);
        }
    }

    if !(200..300).contains(&status) {
        return Err(CmsError::Api {
            status,
            body: body.to_string(),
        });
    }

    match parsed {
        Ok(Value::Object(mut envelope)) => Ok(envelope.remove("result").unwrap_or(Value::Null)),
        Ok(other) => Err(CmsError::Decode(format!(
            "expected a JSON object, got {}",
            json_kind(&other)
        ))),
        Err(e) => Err(CmsError::Decode(e.to_string())),
    }
}

/// A query error envelope: an `error` object naming its `type` or
/// carrying a `description`.
fn query_rejection(error: Option<&Value>) -> Option<CmsError> {
    let error = error?.as_object()?;
    let field = |name: &str| error.get(name).and_then(Value::as_str).map(str::to_string);

    let kind = field("type");
    let description = field("description");
    if kind.is_none() && description.is_none() {
        return None;
    }

    Some(CmsError::Query {
        kind: kind.unwrap_or_default(),
        description: description.unwrap_or_default(),
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
