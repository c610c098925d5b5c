use reqwest::{Client, Url};

use super::client::{build_http_client, execute_get, ClientConfig};
use super::params::Units;
use super::ApiType;
use crate::error::{Result, WolframError};

/// Maximum processing time the API applies when the caller does not choose
/// one.
pub const DEFAULT_TIMEOUT_SECS: u32 = 5;

/// Client for the Short Answers API: a single short line of plain text taken
/// directly from the Result pod. Queries may fail with HTTP 501 when no
/// sufficiently short result can be found.
#[derive(Debug)]
pub struct ShortAnswersClient {
    config: ClientConfig,
    http_client: Client,
}

impl ShortAnswersClient {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = build_http_client(&config);
        Self {
            config,
            http_client,
        }
    }

    pub fn api_type(&self) -> ApiType {
        ApiType::ShortAnswers
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Return a short line of text with a computed response to the query,
    /// using the API's own default timeout of 5 seconds.
    pub async fn get_short_answer(
        &self,
        input: &str,
        app_id: &str,
        units: Option<Units>,
    ) -> Result<String> {
        self.get_short_answer_with_timeout(input, app_id, units, DEFAULT_TIMEOUT_SECS)
            .await
    }

    /// Return a short line of text with a computed response to the query
    pub async fn get_short_answer_with_timeout(
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
