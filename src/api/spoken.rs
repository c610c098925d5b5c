use reqwest::{Client, Url};

use super::client::{build_http_client, execute_get, ClientConfig};
use super::params::Units;
use super::shortanswer::DEFAULT_TIMEOUT_SECS;
use super::ApiType;
use crate::error::{Result, WolframError};

/// Client for the Spoken Results API: results phrased in full sentence form,
/// suited to text-to-speech delivery. Queries may fail with HTTP 501 when no
/// sufficiently short result can be found.
#[derive(Debug)]
pub struct SpokenResultsClient {
    config: ClientConfig,
    http_client: Client,
}

impl SpokenResultsClient {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = build_http_client(&config);
        Self {
            config,
            http_client,
        }
    }

    pub fn api_type(&self) -> ApiType {
        ApiType::Spoken
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Return a single line of conversational text with a computed response
    /// to the query, using the API's own default timeout of 5 seconds.
    pub async fn get_spoken_results(
        &self,
        input: &str,
        app_id: &str,
        units: Option<Units>,
    ) -> Result<String> {
        self.get_spoken_results_with_timeout(input, app_id, units, DEFAULT_TIMEOUT_SECS)
            .await
    }

    /// Return a single line of conversational text with a computed response
    /// to the query
    pub async fn get_spoken_results_with_timeout(
        &self,
        input: &str,
        app_id: &str,
        units: Option<Units>,
        timeout: u32,
    ) -> Result<String> {
        if input.is_empty() {
            return Err(WolframError::InvalidInput(
                "queries without an input value will fail".to_string(),
            ));
        }

        let mut params = vec![("i", input.to_string()), ("appid", app_id.to_string())];
        if let Some(units) = units {
            params.push(("units", units.as_str().to_string()));
        }
        params.push(("timeout", timeout.to_string()));

        let endpoint = format!("{}{}", self.config.base_url, self.api_type().path());
        let url = Url::parse_with_params(&endpoint, &params)
            .map_err(|e| WolframError::InvalidInput(e.to_string()))?;

        let response = execute_get(&self.http_client, url).await?;
        Ok(response.text().await?)
    }
}
