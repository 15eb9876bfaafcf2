//! The seam between the access layer and the wire.
//!
//! [`QueryTransport`] executes one GROQ query and returns the raw `result`
//! value. [`SanityApi`](crate::api::SanityApi) is the HTTP implementation;
//! tests substitute in-memory transports.

use async_trait::async_trait;
use serde_json::Value;

/// Errors from executing a query against the CMS.
#[derive(Debug, thiserror::Error)]
pub enum CmsError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The CMS returned a non-2xx status without a query error envelope.
    #[error("CMS API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The CMS rejected the query (syntax error, unknown parameter, ...).
    #[error("CMS query error ({kind}): {description}")]
    Query { kind: String, description: String },

    /// The response body was not what the query API returns.
    #[error("Malformed CMS response: {0}")]
    Decode(String),
}

/// Named query parameters, referenced as `$name` inside the query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    params: Vec<(String, Value)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a parameter. Setting the same name twice replaces the value.
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(n, _)| n == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name.to_string(), value)),
        }
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.params.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameters as URL query pairs: `$name` mapped to the JSON-encoded value.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.params
            .iter()
            .map(|(name, value)| (format!("${name}"), value.to_string()))
            .collect()
    }
}

/// Executes read queries against the CMS.
#[async_trait]
pub trait QueryTransport: Send + Sync {
    /// Run `query` with `params` and return the `result` member of the
    /// response (`Value::Null` when the query matched nothing).
    async fn fetch(&self, query: &str, params: &QueryParams) -> Result<Value, CmsError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_encode_as_json() {
        let params = QueryParams::new().with("slug", "night-swim").with("limit", 3);
        assert_eq!(
            params.to_query_pairs(),
            vec![
                ("$slug".to_string(), "\"night-swim\"".to_string()),
                ("$limit".to_string(), "3".to_string()),
            ]
        );
    }

    #[test]
    fn params_replace_existing_name() {
        let params = QueryParams::new().with("slug", "a").with("slug", "b");
        assert_eq!(params.get("slug"), Some(&Value::from("b")));
        assert_eq!(params.to_query_pairs().len(), 1);
    }

    #[test]
    fn empty_params() {
        assert!(QueryParams::new().is_empty());
        assert!(QueryParams::new().to_query_pairs().is_empty());
    }

    #[test]
    fn error_display() {
        let err = CmsError::Query {
            kind: "queryParseError".into(),
            description: "unexpected token".into(),
        };
        assert_eq!(
            err.to_string(),
            "CMS query error (queryParseError): unexpected token"
        );

        let err = CmsError::Api {
            status: 503,
            body: "down".into(),
        };
        assert_eq!(err.to_string(), "CMS API error (503): down");
    }

    #[test]
    fn request_error_display() {
        let req_err = reqwest::Client::new().get("://bad").build().unwrap_err();
        let err = CmsError::Request(req_err);
        assert!(err.to_string().contains("HTTP request failed"));
    }
}
