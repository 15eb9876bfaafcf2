use serde::Serialize;

pub const DEFAULT_PROJECT_ID: &str = "cr745m4x";
pub const DEFAULT_DATASET: &str = "production";
pub const DEFAULT_API_VERSION: &str = "2023-05-03";

/// Connection settings for the CMS query API.
///
/// Built once at startup and passed by value into the access layer.
/// Serializes as `{projectId, dataset, apiVersion}` for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CmsConfig {
    pub project_id: String,
    pub dataset: String,
    pub api_version: String,
    /// Query through the CDN-backed endpoint.
    #[serde(skip)]
    pub use_cdn: bool,
}

impl Default for CmsConfig {
    fn default() -> Self {
        Self {
            project_id: DEFAULT_PROJECT_ID.to_string(),
            dataset: DEFAULT_DATASET.to_string(),
            api_version: DEFAULT_API_VERSION.to_string(),
            use_cdn: true,
        }
    }
}

impl CmsConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                     | Default       |
    /// |-----------------------------|---------------|
    /// | `PUBLIC_SANITY_PROJECT_ID`  | `cr745m4x`    |
    /// | `PUBLIC_SANITY_DATASET`     | `production`  |
    /// | `PUBLIC_SANITY_API_VERSION` | `2023-05-03`  |
    /// | `SANITY_USE_CDN`            | `true`        |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reading from `lookup`.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str, default: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let use_cdn = !matches!(
            get("SANITY_USE_CDN", "true").to_ascii_lowercase().as_str(),
            "false" | "0" | "no" | "off"
        );

        Self {
            project_id: get("PUBLIC_SANITY_PROJECT_ID", DEFAULT_PROJECT_ID),
            dataset: get("PUBLIC_SANITY_DATASET", DEFAULT_DATASET),
            api_version: get("PUBLIC_SANITY_API_VERSION", DEFAULT_API_VERSION),
            use_cdn,
        }
    }

    /// Base URL of the query API host, CDN or live.
    pub fn query_base_url(&self) -> String {
        let host = if self.use_cdn { "apicdn" } else { "api" };
        format!("https://{}.{host}.sanity.io", self.project_id)
    }

    /// API version as used in URL paths (`v2023-05-03`).
    pub fn version_path(&self) -> String {
        if self.api_version.starts_with('v') {
            self.api_version.clone()
        } else {
            format!("v{}", self.api_version)
        }
    }

    /// Path of the query endpoint for the configured dataset, relative to
    /// the API host.
    pub fn query_path(&self) -> String {
        format!("/{}/data/query/{}", self.version_path(), self.dataset)
    }

    /// Full URL of the query endpoint for the configured dataset.
    pub fn query_url(&self) -> String {
        format!("{}{}", self.query_base_url(), self.query_path())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn falls_back_to_defaults() {
        let config = CmsConfig::from_lookup(lookup(&[]));
        assert_eq!(config, CmsConfig::default());
        assert_eq!(config.project_id, "cr745m4x");
        assert_eq!(config.dataset, "production");
        assert_eq!(config.api_version, "2023-05-03");
        assert!(config.use_cdn);
    }

    #[test]
    fn environment_overrides_defaults() {
        let config = CmsConfig::from_lookup(lookup(&[
            ("PUBLIC_SANITY_PROJECT_ID", "abc123"),
            ("PUBLIC_SANITY_DATASET", "staging"),
            ("PUBLIC_SANITY_API_VERSION", "v2024-01-01"),
            ("SANITY_USE_CDN", "false"),
        ]));
        assert_eq!(config.project_id, "abc123");
        assert_eq!(config.dataset, "staging");
        assert_eq!(config.api_version, "v2024-01-01");
        assert!(!config.use_cdn);
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = CmsConfig::from_lookup(lookup(&[("PUBLIC_SANITY_DATASET", "  ")]));
        assert_eq!(config.dataset, "production");
    }

    #[test]
    fn query_path_carries_version_and_dataset() {
        let config = CmsConfig {
            dataset: "staging".into(),
            ..CmsConfig::default()
        };
        assert_eq!(config.query_path(), "/v2023-05-03/data/query/staging");
    }

    #[test]
    fn query_url_uses_cdn_host() {
        let config = CmsConfig::default();
        assert_eq!(
            config.query_url(),
            "https://cr745m4x.apicdn.sanity.io/v2023-05-03/data/query/production"
        );
    }

    #[test]
    fn query_url_without_cdn() {
        let config = CmsConfig {
            use_cdn: false,
            api_version: "v1".into(),
            ..CmsConfig::default()
        };
        assert_eq!(
            config.query_url(),
            "https://cr745m4x.api.sanity.io/v1/data/query/production"
        );
    }

    #[test]
    fn serializes_camel_case_without_cdn_flag() {
        let json = serde_json::to_value(CmsConfig::default()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "projectId": "cr745m4x",
                "dataset": "production",
                "apiVersion": "2023-05-03"
            })
        );
    }
}
