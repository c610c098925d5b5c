use log::{debug, warn};
use reqwest::{Client, Url};

use super::full::FullResultsClient;
use super::http_client::{create_custom_client, default_user_agent, get_http_client};
use super::shortanswer::ShortAnswersClient;
use super::simple::SimpleClient;
use super::spoken::SpokenResultsClient;
use crate::error::{Result, WolframError};

/// Production API host shared by all endpoints.
pub const DEFAULT_BASE_URL: &str = "https://api.wolframalpha.com";

const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Client configuration
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the API host. Overridable for testing against a local
    /// server.
    pub base_url: String,
    /// Local HTTP request timeout in seconds. Distinct from the protocol
    /// timeout parameters, which bound server-side computation.
    pub timeout: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT_SECS,
            user_agent: default_user_agent().to_string(),
        }
    }
}

impl ClientConfig {
    /// Default configuration pointed at a custom host.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }
}

/// Pick the shared pooled client for default settings, a dedicated one
/// otherwise.
pub(crate) fn build_http_client(config: &ClientConfig) -> Client {
    if config.timeout == DEFAULT_TIMEOUT_SECS && config.user_agent == default_user_agent() {
        get_http_client().clone()
    } else {
        create_custom_client(config.timeout, &config.user_agent)
    }
}

/// Issue one GET and classify any non-success status by its documented error
/// body. Retry policy is the caller's concern; nothing is retried here.
pub(crate) async fn execute_get(client: &Client, url: Url) -> Result<reqwest::Response> {
    debug!("---> GET {}", redact_app_id(url.as_str()));
    let response = client.get(url).send().await?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        warn!("<--- received error response ({status}): {body}");
        return Err(WolframError::from_error_body(status.as_u16(), body));
    }
    Ok(response)
}

/// Keep credentials out of logs.
fn redact_app_id(url: &str) -> String {
    match url.split_once("appid=") {
        Some((head, tail)) => {
            let rest = tail.split_once('&').map(|(_, rest)| rest);
            match rest {
                Some(rest) => format!("{head}appid=***&{rest}"),
                None => format!("{head}appid=***"),
            }
        }
        None => url.to_string(),
    }
}

/// Factory for creating per-endpoint API clients
pub struct ClientFactory;

impl ClientFactory {
    /// Build a Full Results API client against the production host
    pub fn full_results_client() -> FullResultsClient {
        FullResultsClient::new(ClientConfig::default())
    }

    /// Build a Full Results API client against a custom host
    pub fn full_results_client_with_url(base_url: impl Into<String>) -> FullResultsClient {
        FullResultsClient::new(ClientConfig::with_base_url(base_url))
    }

    /// Build a Simple API client against the production host
    pub fn simple_api_client() -> SimpleClient {
        SimpleClient::new(ClientConfig::default())
    }

    /// Build a Simple API client against a custom host
    pub fn simple_api_client_with_url(base_url: impl Into<String>) -> SimpleClient {
        SimpleClient::new(ClientConfig::with_base_url(base_url))
    }

    /// Build a Short Answers API client against the production host
    pub fn short_answers_client() -> ShortAnswersClient {
        ShortAnswersClient::new(ClientConfig::default())
    }

    /// Build a Short Answers API client against a custom host
    pub fn short_answers_client_with_url(base_url: impl Into<String>) -> ShortAnswersClient {
        ShortAnswersClient::new(ClientConfig::with_base_url(base_url))
    }

    /// Build a Spoken Results API client against the production host
    pub fn spoken_results_client() -> SpokenResultsClient {
        SpokenResultsClient::new(ClientConfig::default())
    }

    /// Build a Spoken Results API client against a custom host
    pub fn spoken_results_client_with_url(base_url: impl Into<String>) -> SpokenResultsClient {
        SpokenResultsClient::new(ClientConfig::with_base_url(base_url))
    }
}
