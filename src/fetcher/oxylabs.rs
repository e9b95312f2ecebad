use crate::error::{FetchError, Result};
use crate::extraction::{ExtractionSpec, FieldRule};
use crate::fetcher::traits::ListingFetcher;
use crate::fetcher::types::SearchParams;
use crate::models::{FetchOutcome, SearchResult};
use async_trait::async_trait;
use indexmap::IndexMap;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// Realtime API endpoint.
const DEFAULT_ENDPOINT: &str = "https://realtime.oxylabs.io/v1/queries";

/// Advisory freshness hint for intermediary caches, in seconds.
const CACHE_MAX_AGE_SECS: u32 = 3600;

/// Basic-auth credentials for the scraping service.
#[derive(Debug, Clone)]
pub struct Credentials {
    username: String,
    password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Read `OXYLABS_USERNAME` / `OXYLABS_PASSWORD` from the environment.
    pub fn from_env() -> Result<Self> {
        let username = std::env::var("OXYLABS_USERNAME")
            .map_err(|_| FetchError::Config("OXYLABS_USERNAME not set".to_string()))?;
        let password = std::env::var("OXYLABS_PASSWORD")
            .map_err(|_| FetchError::Config("OXYLABS_PASSWORD not set".to_string()))?;
        Ok(Self::new(username, password))
    }
}

/// Request body for the Realtime queries endpoint.
#[derive(Debug, Serialize)]
struct QueryRequest<'a> {
    source: &'static str,
    url: String,
    parse: bool,
    render: &'static str,
    parsing_instructions: &'a IndexMap<String, FieldRule>,
}

/// Response envelope; only `results` matters here.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Listing fetcher backed by the Oxylabs Realtime API.
///
/// The service fetches the target page, renders it, runs the extraction
/// rules, and returns structured results; this client only assembles the
/// query and unwraps the answer.
pub struct OxylabsFetcher {
    client: Client,
    credentials: Credentials,
    endpoint: String,
    spec: ExtractionSpec,
}

impl OxylabsFetcher {
    /// Create a fetcher with the bundled extraction rules.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            client: Client::new(),
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            spec: ExtractionSpec::bundled(),
        }
    }

    /// Point the fetcher at a different endpoint (proxies, tests).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Replace the extraction rules, e.g. with ones loaded from a newer
    /// rules file.
    pub fn with_spec(mut self, spec: ExtractionSpec) -> Self {
        self.spec = spec;
        self
    }

    async fn submit(
        &self,
        body: &QueryRequest<'_>,
    ) -> std::result::Result<QueryResponse, reqwest::Error> {
        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.credentials.username, Some(&self.credentials.password))
            .header("Content-Type", "application/json")
            .header("Cache-Control", format!("max-age={}", CACHE_MAX_AGE_SECS))
            .json(body)
            .send()
            .await?;

        response.json::<QueryResponse>().await
    }
}

#[async_trait]
impl ListingFetcher for OxylabsFetcher {
    async fn fetch(&self, params: &SearchParams) -> Result<FetchOutcome> {
        let target = params.target_url()?;

        info!("Scraping url: {}", target);

        let body = QueryRequest {
            source: "universal",
            url: target.to_string(),
            parse: true,
            render: "html",
            parsing_instructions: &self.spec.instructions,
        };

        debug!("Submitting query to {}", self.endpoint);

        match self.submit(&body).await {
            Ok(response) => match response.results.into_iter().next() {
                Some(first) => Ok(FetchOutcome::Found(SearchResult::new(first))),
                None => {
                    info!("Service returned no results");
                    Ok(FetchOutcome::Empty)
                }
            },
            Err(e) => {
                warn!("Error fetching results: {}", e);
                Ok(FetchOutcome::Failed(e.to_string()))
            }
        }
    }

    fn source_name(&self) -> &'static str {
        "Oxylabs Realtime"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_body_has_wire_shape() {
        let spec = ExtractionSpec::bundled();
        let body = QueryRequest {
            source: "universal",
            url: "https://example.com/search?checkin=2024-01-01".to_string(),
            parse: true,
            render: "html",
            parsing_instructions: &spec.instructions,
        };

        let wire = serde_json::to_value(&body).unwrap();
        assert_eq!(wire["source"], "universal");
        assert_eq!(wire["parse"], true);
        assert_eq!(wire["render"], "html");
        assert_eq!(
            wire["url"],
            "https://example.com/search?checkin=2024-01-01"
        );
        assert!(wire["parsing_instructions"]["listings"]["_items"].is_object());
    }

    #[test]
    fn results_field_is_optional() {
        let parsed: QueryResponse = serde_json::from_str(r#"{"message": "no queries"}"#).unwrap();
        assert!(parsed.results.is_empty());
    }

    #[test]
    fn credentials_from_env() {
        // Sequential on purpose: both cases touch the same process-wide vars.
        std::env::remove_var("OXYLABS_USERNAME");
        std::env::remove_var("OXYLABS_PASSWORD");
        assert!(matches!(
            Credentials::from_env().unwrap_err(),
            FetchError::Config(_)
        ));

        std::env::set_var("OXYLABS_USERNAME", "user");
        assert!(matches!(
            Credentials::from_env().unwrap_err(),
            FetchError::Config(_)
        ));

        std::env::set_var("OXYLABS_PASSWORD", "pass");
        let creds = Credentials::from_env().unwrap();
        assert_eq!(creds.username, "user");
        assert_eq!(creds.password, "pass");

        std::env::remove_var("OXYLABS_USERNAME");
        std::env::remove_var("OXYLABS_PASSWORD");
    }
}
