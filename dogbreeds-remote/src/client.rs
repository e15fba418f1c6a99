//! dog.ceo breed catalog client.
//!
//! Fetches `{base_url}/breed/{breed}/list` and collapses every failure
//! (HTTP error, non-"success" status, bad JSON, transport error) into
//! `BreedError::BreedNotFound`.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};
use url::Url;

use dogbreeds_core::constants::{
    DEFAULT_DOG_API_BASE_URL, DEFAULT_TIMEOUT_SECONDS, ENV_BASE_URL, ENV_TIMEOUT_SECONDS,
    SUCCESS_STATUS,
};
use dogbreeds_core::error::{BreedError, Result};
use dogbreeds_core::normalize::normalize_breed;
use dogbreeds_core::traits::BreedFetcher;

/// dog.ceo client configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DogApiConfig {
    /// API root, e.g. "https://dog.ceo/api"
    pub base_url: String,
    /// Request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for DogApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_DOG_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl DogApiConfig {
    /// Creates a config pointing at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// Default config overlaid with `DOG_API_BASE_URL` and
    /// `DOG_API_TIMEOUT_SECONDS` when set.
    pub fn from_env() -> Self {
        Self::default().overlay(|key| std::env::var(key).ok())
    }

    fn overlay(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|u| !u.trim().is_empty()) {
            self.base_url = url.trim().to_string();
        }
        if let Some(seconds) = lookup(ENV_TIMEOUT_SECONDS).and_then(|s| s.trim().parse().ok()) {
            self.timeout_seconds = seconds;
        }
        self
    }
}

/// [`BreedFetcher`] backed by the dog.ceo REST API.
pub struct DogApiBreedFetcher {
    config: DogApiConfig,
    http_client: reqwest::Client,
}

impl DogApiBreedFetcher {
    /// Creates a client for the public dog.ceo API.
    pub fn new() -> Result<Self> {
        Self::with_config(DogApiConfig::default())
    }

    /// Creates a client with the given config.
    pub fn with_config(config: DogApiConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| {
                BreedError::InvalidArgument(format!("failed to create HTTP client: {e}"))
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &DogApiConfig {
        &self.config
    }

    pub(crate) fn list_url(&self, breed: &str) -> Result<Url> {
        let mut url = Url::parse(self.config.base_url.trim())
            .map_err(|e| BreedError::not_found(breed, format!("invalid base URL: {e}")))?;

        url.path_segments_mut()
            .map_err(|_| BreedError::not_found(breed, "base URL cannot carry a path"))?
            .pop_if_empty()
            .push("breed")
            .push(breed)
            .push("list");

        Ok(url)
    }

    async fn fetch(&self, breed: &str) -> Result<Vec<String>> {
        let url = self.list_url(breed)?;
        debug!(%url, "Requesting sub-breeds");

        let response = self
            .http_client
            .get(url)
            .send()
            .await
            .map_err(|e| BreedError::not_found(breed, format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BreedError::not_found(breed, format!("failed to read body: {e}")))?;

        if body.trim().is_empty() {
            return Err(BreedError::not_found(breed, "empty response"));
        }

        let payload: BreedListResponse = serde_json::from_str(&body)
            .map_err(|e| BreedError::not_found(breed, format!("malformed response: {e}")))?;

        if !status.is_success() || !payload.status.eq_ignore_ascii_case(SUCCESS_STATUS) {
            warn!(breed, %status, api_status = %payload.status, "Catalog rejected breed");
            return Err(BreedError::not_found(
                breed,
                format!("HTTP {status}, status '{}'", payload.status),
            ));
        }

        let mut sub_breeds: Vec<String> = serde_json::from_value(payload.message)
            .map_err(|e| BreedError::not_found(breed, format!("unexpected payload: {e}")))?;
        sub_breeds.sort();

        debug!(breed, count = sub_breeds.len(), "Fetched sub-breeds");
        Ok(sub_breeds)
    }
}

#[async_trait]
impl BreedFetcher for DogApiBreedFetcher {
    #[instrument(skip(self))]
    async fn sub_breeds(&self, breed: &str) -> Result<Vec<String>> {
        let breed = normalize_breed(Some(breed));
        self.fetch(&breed).await
    }
}

#[derive(Debug, Deserialize)]
struct BreedListResponse {
    #[serde(default)]
    status: String,
    #[serde(default)]
    message: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use dogbreeds_cache::CachingBreedFetcher;

    fn client_for(server: &MockServer) -> DogApiBreedFetcher {
        DogApiBreedFetcher::with_config(DogApiConfig::new(server.uri()).with_timeout_seconds(5))
            .unwrap()
    }

    async fn mount_list(server: &MockServer, breed: &str, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("/breed/{breed}/list")))
            .respond_with(template)
            .mount(server)
            .await;
    }

    #[test]
    fn test_config_defaults() {
        let config = DogApiConfig::default();
        assert_eq!(config.base_url, "https://dog.ceo/api");
        assert_eq!(config.timeout_seconds, 30);
    }

    #[test]
    fn test_config_overlay() {
        let config = DogApiConfig::default().overlay(|key| match key {
            "DOG_API_BASE_URL" => Some(" http://localhost:9000/api ".into()),
            "DOG_API_TIMEOUT_SECONDS" => Some("7".into()),
            _ => None,
        });
        assert_eq!(config.base_url, "http://localhost:9000/api");
        assert_eq!(config.timeout_seconds, 7);
    }

    #[test]
    fn test_config_overlay_ignores_bad_values() {
        let config = DogApiConfig::default().overlay(|key| match key {
            "DOG_API_BASE_URL" => Some("   ".into()),
            "DOG_API_TIMEOUT_SECONDS" => Some("soon".into()),
            _ => None,
        });
        assert_eq!(config, DogApiConfig::default());
    }

    #[test]
    fn test_list_url() {
        let client = DogApiBreedFetcher::new().unwrap();
        assert_eq!(
            client.list_url("hound").unwrap().as_str(),
            "https://dog.ceo/api/breed/hound/list"
        );

        let client =
            DogApiBreedFetcher::with_config(DogApiConfig::new("http://localhost:8080/")).unwrap();
        assert_eq!(
            client.list_url("shiba inu").unwrap().as_str(),
            "http://localhost:8080/breed/shiba%20inu/list"
        );
    }

    #[test]
    fn test_list_url_invalid_base() {
        let client = DogApiBreedFetcher::with_config(DogApiConfig::new("not a url")).unwrap();
        assert!(client.list_url("hound").unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_fetch_sorted_sub_breeds() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "hound",
            ResponseTemplate::new(200).set_body_json(json!({
                "message": ["walker", "afghan", "plott", "basset"],
                "status": "success"
            })),
        )
        .await;

        let subs = client_for(&server).sub_breeds("hound").await.unwrap();
        assert_eq!(subs, vec!["afghan", "basset", "plott", "walker"]);
    }

    #[tokio::test]
    async fn test_request_uses_normalized_name() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "hound",
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": ["afghan"], "status": "SUCCESS" })),
        )
        .await;

        let subs = client_for(&server).sub_breeds("  HoUnD ").await.unwrap();
        assert_eq!(subs, vec!["afghan"]);
    }

    #[tokio::test]
    async fn test_breed_without_sub_breeds() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "pug",
            ResponseTemplate::new(200).set_body_json(json!({ "message": [], "status": "success" })),
        )
        .await;

        assert!(client_for(&server).sub_breeds("pug").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_breed_404() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "unicorn",
            ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "message": "Breed not found (main breed does not exist)",
                "code": 404
            })),
        )
        .await;

        let err = client_for(&server).sub_breeds("Unicorn").await.unwrap_err();
        match err {
            BreedError::BreedNotFound { breed, .. } => assert_eq!(breed, "unicorn"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_ok_status_code_with_error_status_field() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "hound",
            ResponseTemplate::new(200).set_body_json(json!({ "message": [], "status": "error" })),
        )
        .await;

        assert!(client_for(&server).sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_with_success_field() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "hound",
            ResponseTemplate::new(500).set_body_json(json!({ "message": [], "status": "success" })),
        )
        .await;

        assert!(client_for(&server).sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_malformed_json() {
        let server = MockServer::start().await;
        mount_list(&server, "hound", ResponseTemplate::new(200).set_body_string("{not json")).await;

        assert!(client_for(&server).sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_empty_body() {
        let server = MockServer::start().await;
        mount_list(&server, "hound", ResponseTemplate::new(200)).await;

        assert!(client_for(&server).sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_message_not_a_list() {
        let server = MockServer::start().await;
        mount_list(
            &server,
            "hound",
            ResponseTemplate::new(200)
                .set_body_json(json!({ "message": { "afghan": [] }, "status": "success" })),
        )
        .await;

        assert!(client_for(&server).sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let config = DogApiConfig::new("http://127.0.0.1:1").with_timeout_seconds(2);
        let client = DogApiBreedFetcher::with_config(config).unwrap();

        assert!(client.sub_breeds("hound").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_cache_hits_remote_once() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/breed/retriever/list"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "message": ["golden", "chesapeake", "curly", "flatcoated"],
                "status": "success"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let cache = CachingBreedFetcher::wrap(client_for(&server));

        let first = cache.get(Some("Retriever")).await.unwrap();
        let second = cache.get(Some(" RETRIEVER ")).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.first().map(String::as_str), Some("chesapeake"));
        assert_eq!(cache.calls_made(), 1);
    }

    #[tokio::test]
    async fn test_cache_retries_remote_failures() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/breed/unicorn/list"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(json!({ "status": "error", "message": "Breed not found" })),
            )
            .expect(3)
            .mount(&server)
            .await;

        let cache = CachingBreedFetcher::wrap(client_for(&server));
        for _ in 0..3 {
            assert!(cache.get(Some("unicorn")).await.unwrap_err().is_not_found());
        }
        assert_eq!(cache.calls_made(), 3);
    }
}
