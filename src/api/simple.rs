use reqwest::{Client, Url};

use super::client::{build_http_client, execute_get, ClientConfig};
use super::params::{Layout, Units};
use super::ApiType;
use crate::error::{Result, WolframError};

/// Optional parameters for one Simple API call. Unset fields are omitted and
/// the server applies its defaults (divider layout, white background, black
/// text, 14pt, 500px, 5s).
#[derive(Debug, Clone, Default)]
pub struct SimpleRequest {
    pub layout: Option<Layout>,
    /// Background color: an HTML name ("white"), hex RGB ("00AAFF"),
    /// comma-separated decimal RGB(A) ("0,100,200,200"), or
    /// "transparent"/"clear"
    pub background: Option<String>,
    /// Foreground color for text, "black" or "white"
    pub foreground: Option<String>,
    /// Display size of text elements in points
    pub fontsize: Option<u32>,
    /// Desired width in pixels for the output image
    pub width: Option<u32>,
    pub units: Option<Units>,
    /// Maximum seconds allowed to process the query
    pub timeout: Option<u32>,
}

impl SimpleRequest {
    pub(crate) fn to_query_params(&self, input: &str, app_id: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![("i", input.to_string()), ("appid", app_id.to_string())];

        if let Some(layout) = self.layout {
            params.push(("layout", layout.as_str().to_string()));
        }
        if let Some(background) = &self.background {
            params.push(("background", background.clone()));
        }
        if let Some(foreground) = &self.foreground {
            params.push(("foreground", foreground.clone()));
        }
        if let Some(fontsize) = self.fontsize {
            params.push(("fontsize", fontsize.to_string()));
        }
        if let Some(width) = self.width {
            params.push(("width", width.to_string()));
        }
        if let Some(units) = self.units {
            params.push(("units", units.as_str().to_string()));
        }
        if let Some(timeout) = self.timeout {
            params.push(("timeout", timeout.to_string()));
        }
        params
    }
}

/// Client for the Simple API: full Wolfram|Alpha output rendered as a single
/// static image. No disambiguation, drilldown or asynchronous delivery; for
/// those, use the Full Results API.
#[derive(Debug)]
pub struct SimpleClient {
    config: ClientConfig,
    http_client: Client,
}

impl SimpleClient {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = build_http_client(&config);
        Self {
            config,
            http_client,
        }
    }

    pub fn api_type(&self) -> ApiType {
        ApiType::Simple
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Return an image with informational elements relating to the input.
    /// The bytes are the image file as served; no decoding is attempted.
    pub async fn query(
        &self,
        input: &str,
        app_id: &str,
        request: &SimpleRequest,
    ) -> Result<Vec<u8>> {
        if input.is_empty() {
            return Err(WolframError::InvalidInput(
                "queries without an input value will fail".to_string(),
            ));
        }

        let params = request.to_query_params(input, app_id);
        let endpoint = format!("{}{}", self.config.base_url, self.api_type().path());
        let url = Url::parse_with_params(&endpoint, &params)
            .map_err(|e| WolframError::InvalidInput(e.to_string()))?;

        let response = execute_get(&self.http_client, url).await?;
        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }

    /// Query with all server defaults
    pub async fn query_default(&self, input: &str, app_id: &str) -> Result<Vec<u8>> {
        self.query(input, app_id, &SimpleRequest::default()).await
    }
}
