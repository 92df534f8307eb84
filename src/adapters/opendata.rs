use crate::core::{ConfigProvider, VoteResource, VoteSource};
use crate::domain::results::ResultsDocument;
use crate::utils::error::{ExplorerError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://ckan.opendata.swiss";
pub const DEFAULT_DATASET_ID: &str =
    "echtzeitdaten-zu-den-eidgenossischen-abstimmungen-gemeindestand-am-datum-der-abstimmung";
const PACKAGE_SHOW_PATH: &str = "/api/3/action/package_show";

#[derive(Debug, Deserialize)]
struct PackageShowResponse {
    success: bool,
    result: Option<Package>,
    error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct Package {
    #[serde(default)]
    resources: Vec<CkanResource>,
}

#[derive(Debug, Deserialize)]
struct CkanResource {
    coverage: Option<String>,
    #[serde(default)]
    description: BTreeMap<String, Option<String>>,
    download_url: Option<String>,
    format: Option<String>,
    last_modified: Option<String>,
}

impl CkanResource {
    fn into_vote_resource(self, language: &str) -> VoteResource {
        let descriptions: BTreeMap<String, String> = self
            .description
            .into_iter()
            .filter_map(|(lang, text)| text.map(|t| (lang, t)))
            .collect();

        VoteResource {
            date: self.coverage,
            description: descriptions.get(language).cloned(),
            descriptions,
            download_url: self.download_url,
            format: self.format,
            last_modified: self.last_modified,
        }
    }
}

/// opendata.swiss CKAN 客戶端
pub struct OpenDataClient {
    client: Client,
    base_url: String,
    dataset_id: String,
    language: String,
    headers: HashMap<String, String>,
    retry_attempts: u32,
    retry_delay: Duration,
}

impl OpenDataClient {
    pub fn from_config<C: ConfigProvider>(config: &C) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds()))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url().trim_end_matches('/').to_string(),
            dataset_id: config.dataset_id().to_string(),
            language: config.language().to_string(),
            headers: config.headers(),
            retry_attempts: config.retry_attempts(),
            retry_delay: Duration::from_secs(config.retry_delay_seconds()),
        })
    }

    pub fn catalogue_url(&self) -> String {
        format!("{}{}", self.base_url, PACKAGE_SHOW_PATH)
    }

    async fn get_bytes(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let mut attempt = 0;
        loop {
            match self.send_once(url, query).await {
                Ok(bytes) => return Ok(bytes),
                Err(e) if e.is_retryable() && attempt < self.retry_attempts => {
                    attempt += 1;
                    tracing::warn!(
                        "Request to {} failed ({}), retry {}/{} in {:?}",
                        url,
                        e,
                        attempt,
                        self.retry_attempts,
                        self.retry_delay
                    );
                    tokio::time::sleep(self.retry_delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }

    async fn send_once(&self, url: &str, query: &[(&str, &str)]) -> Result<Vec<u8>> {
        let mut request = self.client.get(url);

        // 添加自定義標頭
        for (key, value) in &self.headers {
            request = request.header(key, value);
        }
        if !query.is_empty() {
            request = request.query(query);
        }

        tracing::debug!("Making API request to: {}", url);
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        let status = response.status();
        if !status.is_success() {
            return Err(ExplorerError::HttpStatusError {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        Ok(response.bytes().await?.to_vec())
    }
}

#[async_trait]
impl VoteSource for OpenDataClient {
    async fn fetch_catalogue(&self) -> Result<Vec<VoteResource>> {
        let url = self.catalogue_url();
        let bytes = self
            .get_bytes(&url, &[("id", self.dataset_id.as_str())])
            .await?;
        let response: PackageShowResponse = serde_json::from_slice(&bytes)?;

        if !response.success {
            let detail = response
                .error
                .map(|e| e.to_string())
                .unwrap_or_else(|| "no error details".to_string());
            return Err(ExplorerError::ApiUnsuccessfulError { message: detail });
        }

        let package = response
            .result
            .ok_or_else(|| ExplorerError::ApiUnsuccessfulError {
                message: "response has no result".to_string(),
            })?;

        let resources: Vec<VoteResource> = package
            .resources
            .into_iter()
            .map(|r| r.into_vote_resource(&self.language))
            .collect();

        tracing::info!(
            "📡 Fetched {} vote resources from dataset '{}'",
            resources.len(),
            self.dataset_id
        );
        Ok(resources)
    }

    async fn fetch_results(&self, download_url: &str) -> Result<ResultsDocument> {
        crate::utils::validation::validate_url("download_url", download_url)?;
        let bytes = self.get_bytes(download_url, &[]).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;

    struct MockConfig {
        base_url: String,
        retry_attempts: u32,
        headers: HashMap<String, String>,
    }

    impl MockConfig {
        fn new(base_url: String) -> Self {
            Self {
                base_url,
                retry_attempts: 0,
                headers: HashMap::new(),
            }
        }
    }

    impl ConfigProvider for MockConfig {
        fn base_url(&self) -> &str {
            &self.base_url
        }

        fn dataset_id(&self) -> &str {
            DEFAULT_DATASET_ID
        }

        fn language(&self) -> &str {
            "en"
        }

        fn timeout_seconds(&self) -> u64 {
            5
        }

        fn retry_attempts(&self) -> u32 {
            self.retry_attempts
        }

        fn retry_delay_seconds(&self) -> u64 {
            0
        }

        fn headers(&self) -> HashMap<String, String> {
            self.headers.clone()
        }
    }

    fn catalogue_body() -> serde_json::Value {
        serde_json::json!({
            "success": true,
            "result": {
                "resources": [
                    {
                        "coverage": "2024-11-24",
                        "description": {
                            "de": "Eidgenössische Vorlagen: 1. Autobahnen",
                            "en": "Federal proposals: 1. Motorway expansion",
                            "fr": "",
                            "it": null
                        },
                        "download_url": "https://ogd-static.voteinfo-app.ch/v1/ogd/sd-t-17-02-20241124-eidgAbstimmung.json",
                        "format": "JSON",
                        "last_modified": "2024-11-25T08:00:00"
                    },
                    {
                        "description": {"de": "Nur Deutsch"}
                    }
                ]
            }
        })
    }

    #[tokio::test]
    async fn test_fetch_catalogue_maps_resources() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/3/action/package_show")
                .query_param("id", DEFAULT_DATASET_ID);
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(catalogue_body());
        });

        let client = OpenDataClient::from_config(&MockConfig::new(server.base_url())).unwrap();
        let resources = client.fetch_catalogue().await.unwrap();

        api_mock.assert();
        assert_eq!(resources.len(), 2);
        assert_eq!(resources[0].date.as_deref(), Some("2024-11-24"));
        assert_eq!(
            resources[0].description.as_deref(),
            Some("Federal proposals: 1. Motorway expansion")
        );
        // null translations are dropped, empty strings kept
        assert_eq!(resources[0].descriptions.len(), 3);
        assert_eq!(resources[0].format.as_deref(), Some("JSON"));

        assert_eq!(resources[1].description, None);
        assert_eq!(resources[1].description_or_default(), "No description available");
        assert_eq!(resources[1].download_url, None);
    }

    #[tokio::test]
    async fn test_unsuccessful_api_response() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/3/action/package_show");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({
                    "success": false,
                    "error": {"message": "Not found", "__type": "Not Found Error"}
                }));
        });

        let client = OpenDataClient::from_config(&MockConfig::new(server.base_url())).unwrap();
        let err = client.fetch_catalogue().await.unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ExplorerError::ApiUnsuccessfulError { .. }));
        assert!(err.to_string().contains("Not found"));
    }

    #[tokio::test]
    async fn test_server_errors_are_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/3/action/package_show");
            then.status(503);
        });

        let mut config = MockConfig::new(server.base_url());
        config.retry_attempts = 2;
        let client = OpenDataClient::from_config(&config).unwrap();

        let err = client.fetch_catalogue().await.unwrap_err();

        api_mock.assert_hits(3);
        assert!(matches!(err, ExplorerError::HttpStatusError { status: 503, .. }));
    }

    #[tokio::test]
    async fn test_client_errors_are_not_retried() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/api/3/action/package_show");
            then.status(404);
        });

        let mut config = MockConfig::new(server.base_url());
        config.retry_attempts = 2;
        let client = OpenDataClient::from_config(&config).unwrap();

        let err = client.fetch_catalogue().await.unwrap_err();

        api_mock.assert_hits(1);
        assert!(matches!(err, ExplorerError::HttpStatusError { status: 404, .. }));
    }

    #[tokio::test]
    async fn test_custom_headers_are_sent() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/3/action/package_show")
                .header("x-api-key", "secret");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(catalogue_body());
        });

        let mut config = MockConfig::new(format!("{}/", server.base_url()));
        config
            .headers
            .insert("X-Api-Key".to_string(), "secret".to_string());
        let client = OpenDataClient::from_config(&config).unwrap();

        client.fetch_catalogue().await.unwrap();
        api_mock.assert();
    }

    #[tokio::test]
    async fn test_fetch_results_invalid_json() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/results.json");
            then.status(200).body("<html>maintenance</html>");
        });

        let client = OpenDataClient::from_config(&MockConfig::new(server.base_url())).unwrap();
        let err = client
            .fetch_results(&server.url("/results.json"))
            .await
            .unwrap_err();

        api_mock.assert();
        assert!(matches!(err, ExplorerError::SerializationError(_)));
    }
}
