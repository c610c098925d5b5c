use log::{debug, warn};
use reqwest::{Client, Url};
use serde::Deserialize;

use super::client::{build_http_client, execute_get, ClientConfig};
use super::params::{encode_list, encode_timeout_flag, GeoCoordinates, ResultFormat};
use super::selector::Selector;
use super::types::{Pod, QueryResult, QueryResultEnvelope};
use super::ApiType;
use crate::error::{Result, WolframError};

/// Optional parameters for one Full Results call.
///
/// Every field defaults to "absent": the encoded request omits the parameter
/// and the server applies its own default. Location parameters are evaluated
/// by the server in precedence order location → latlong → ip; extra ones act
/// as backups, so exclusivity is deliberately not enforced here.
#[derive(Debug, Clone, Default)]
pub struct FullResultsRequest {
    pub formats: Vec<ResultFormat>,
    /// Assumption tokens from the `input` attribute of previously returned
    /// assumption values
    pub assumptions: Vec<String>,
    pub location: Option<String>,
    pub coordinates: Option<GeoCoordinates>,
    pub ip: Option<String>,
    /// Pod state tokens; repeats chain like repeated button clicks
    pub pod_states: Vec<String>,
    /// Seconds to wait before pods are returned as async stubs. Zero or
    /// negative disables the restriction (sent as `false`).
    pub async_timeout: Option<f32>,
    pub scan_timeout: Option<f32>,
    pub pod_timeout: Option<f32>,
    pub format_timeout: Option<f32>,
    pub parse_timeout: Option<f32>,
    pub total_timeout: Option<f32>,
    pub included_pods: Vec<String>,
    pub excluded_pods: Vec<String>,
    pub pod_titles: Vec<String>,
    pub pod_indexes: Vec<i32>,
    pub scanners: Vec<String>,
}

impl FullResultsRequest {
    /// Assemble the query pairs for this request. Order of distinct
    /// parameters is fixed; order within each repeatable parameter follows
    /// insertion order.
    pub(crate) fn to_query_params(&self, input: &str, app_id: &str) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("input", input.to_string()),
            ("appid", app_id.to_string()),
            ("output", "json".to_string()),
        ];

        if let Some(formats) = encode_list(&self.formats) {
            params.push(("format", formats));
        }
        if let Some(assumptions) = encode_list(&self.assumptions) {
            params.push(("assumption", assumptions));
        }
        if let Some(location) = &self.location {
            params.push(("location", location.clone()));
        }
        if let Some(coordinates) = &self.coordinates {
            params.push(("latlong", coordinates.to_query_value()));
        }
        if let Some(ip) = &self.ip {
            params.push(("ip", ip.clone()));
        }
        if let Some(states) = encode_list(&self.pod_states) {
            params.push(("podstate", states));
        }
        if let Some(flag) = encode_timeout_flag(self.async_timeout) {
            params.push(("async", flag));
        }
        if let Some(timeout) = self.scan_timeout {
            params.push(("scantimeout", timeout.to_string()));
        }
        if let Some(timeout) = self.pod_timeout {
            params.push(("podtimeout", timeout.to_string()));
        }
        if let Some(timeout) = self.format_timeout {
            params.push(("formattimeout", timeout.to_string()));
        }
        if let Some(timeout) = self.parse_timeout {
            params.push(("parsetimeout", timeout.to_string()));
        }
        if let Some(timeout) = self.total_timeout {
            params.push(("totaltimeout", timeout.to_string()));
        }
        if let Some(ids) = encode_list(&self.included_pods) {
            params.push(("includepodid", ids));
        }
        if let Some(ids) = encode_list(&self.excluded_pods) {
            params.push(("excludepodid", ids));
        }
        if let Some(titles) = encode_list(&self.pod_titles) {
            params.push(("podtitle", titles));
        }
        if let Some(indexes) = encode_list(&self.pod_indexes) {
            params.push(("podindex", indexes));
        }
        if let Some(scanners) = encode_list(&self.scanners) {
            params.push(("scanner", scanners));
        }
        params
    }
}

/// Client for the Full Results API: free-form queries answered with a
/// descriptive document of pods wrapping the requested content formats.
#[derive(Debug)]
pub struct FullResultsClient {
    config: ClientConfig,
    http_client: Client,
}

impl FullResultsClient {
    pub fn new(config: ClientConfig) -> Self {
        let http_client = build_http_client(&config);
        Self {
            config,
            http_client,
        }
    }

    pub fn api_type(&self) -> ApiType {
        ApiType::Full
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Start accumulating request parameters for a custom selection. The
    /// returned builder issues exactly one request when terminated with
    /// [`Selector::get_results`].
    pub fn selector(&self) -> Selector<'_> {
        Selector::new(self)
    }

    /// Submit a query with all parameters of `request` applied.
    ///
    /// A well-formed `success=false` document is a normal return value, not
    /// an error; check [`QueryResult::success`] and [`QueryResult::error`].
    pub async fn get_full_results(
        &self,
        input: &str,
        app_id: &str,
        request: &FullResultsRequest,
    ) -> Result<QueryResult> {
        if input.is_empty() {
            return Err(WolframError::InvalidInput(
                "queries without an input value will fail".to_string(),
            ));
        }

        let params = request.to_query_params(input, app_id);
        let url = self.endpoint_url(&params)?;
        let response = execute_get(&self.http_client, url).await?;
        let body = response.text().await?;
        decode_query_result(&body)
    }

    /// Query with the given result formats and otherwise default parameters
    pub async fn get_full_results_for_formats(
        &self,
        input: &str,
        app_id: &str,
        formats: &[ResultFormat],
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            formats: formats.to_vec(),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Re-run a query with assumption tokens taken from a previous response
    pub async fn get_full_results_for_assumptions(
        &self,
        input: &str,
        app_id: &str,
        assumptions: &[String],
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            assumptions: assumptions.to_vec(),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Re-run a query with pod state tokens taken from a previous response
    pub async fn get_full_results_for_pod_states(
        &self,
        input: &str,
        app_id: &str,
        states: &[String],
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            pod_states: states.to_vec(),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Query with a named location ("Boston, MA", "The North Pole")
    pub async fn get_full_results_for_location(
        &self,
        input: &str,
        app_id: &str,
        location: &str,
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            location: Some(location.to_string()),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Query with a latitude/longitude location
    pub async fn get_full_results_for_coordinates(
        &self,
        input: &str,
        app_id: &str,
        latitude: f64,
        longitude: f64,
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            coordinates: Some(GeoCoordinates::new(latitude, longitude)),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Query with an IP-address location. IPv4 and IPv6 are supported.
    pub async fn get_full_results_for_ip(
        &self,
        input: &str,
        app_id: &str,
        ip: &str,
    ) -> Result<QueryResult> {
        let request = FullResultsRequest {
            ip: Some(ip.to_string()),
            ..Default::default()
        };
        self.get_full_results(input, app_id, &request).await
    }

    /// Fetch a pod that was returned as an async stub.
    ///
    /// The stub URL is requested verbatim. Upstream behavior of this
    /// endpoint is not contractually reliable; callers needing robustness
    /// must bring their own retry policy.
    pub async fn load_pod_async(&self, async_pod_url: &str) -> Result<Pod> {
        let url = Url::parse(async_pod_url)
            .map_err(|e| WolframError::InvalidInput(format!("invalid async pod URL: {e}")))?;
        debug!("loading async pod from {}", url.host_str().unwrap_or("?"));

        let response = execute_get(&self.http_client, url).await?;
        let body = response.text().await?;
        decode_pod(&body)
    }

    fn endpoint_url(&self, params: &[(&'static str, String)]) -> Result<Url> {
        let endpoint = format!("{}{}", self.config.base_url, self.api_type().path());
        Url::parse_with_params(&endpoint, params)
            .map_err(|e| WolframError::InvalidInput(e.to_string()))
    }
}

/// Decode a `queryresult` document. Failures on the envelope surface as
/// [`WolframError::Decode`]; count attributes that disagree with their
/// collections are tolerated and logged, never silently repaired.
fn decode_query_result(body: &str) -> Result<QueryResult> {
    let envelope: QueryResultEnvelope = serde_json::from_str(body)
        .map_err(|e| WolframError::Decode(format!("malformed query result document: {e}")))?;
    let result = envelope.queryresult;
    if !result.is_consistent() {
        warn!("query result count attributes disagree with decoded collections");
    }
    Ok(result)
}

fn decode_pod(body: &str) -> Result<Pod> {
    #[derive(Deserialize)]
    struct PodEnvelope {
        pod: Pod,
    }

    serde_json::from_str::<PodEnvelope>(body)
        .map(|envelope| envelope.pod)
        .or_else(|_| serde_json::from_str::<Pod>(body))
        .map_err(|e| WolframError::Decode(format!("malformed pod document: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(params: &[(&'static str, String)]) -> Vec<&'static str> {
        params.iter().map(|(key, _)| *key).collect()
    }

    fn value<'a>(params: &'a [(&'static str, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value.as_str())
    }

    #[test]
    fn default_request_omits_every_optional_parameter() {
        let params = FullResultsRequest::default().to_query_params("pi", "DEMO");
        assert_eq!(keys(&params), vec!["input", "appid", "output"]);
        assert_eq!(value(&params, "input"), Some("pi"));
        assert_eq!(value(&params, "appid"), Some("DEMO"));
        assert_eq!(value(&params, "output"), Some("json"));
    }

    #[test]
    fn formats_join_lowercased_and_nothing_else_appears() {
        let request = FullResultsRequest {
            formats: vec![ResultFormat::Plaintext, ResultFormat::Image],
            ..Default::default()
        };
        let params = request.to_query_params("pi", "DEMO");
        assert_eq!(value(&params, "format"), Some("plaintext,image"));
        for absent in [
            "assumption",
            "location",
            "latlong",
            "ip",
            "podstate",
            "async",
            "scantimeout",
            "podtimeout",
            "formattimeout",
            "parsetimeout",
            "totaltimeout",
        ] {
            assert_eq!(value(&params, absent), None, "{absent} should be omitted");
        }
    }

    #[test]
    fn zero_async_timeout_is_sent_as_false() {
        let request = FullResultsRequest {
            async_timeout: Some(0.0),
            ..Default::default()
        };
        let params = request.to_query_params("pi", "DEMO");
        assert_eq!(value(&params, "async"), Some("false"));
    }

    #[test]
    fn positive_async_timeout_is_sent_as_seconds() {
        let request = FullResultsRequest {
            async_timeout: Some(2.5),
            ..Default::default()
        };
        let params = request.to_query_params("pi", "DEMO");
        assert_eq!(value(&params, "async"), Some("2.5"));
    }

    #[test]
    fn stage_timeouts_are_sent_as_decimals() {
        let request = FullResultsRequest {
            scan_timeout: Some(3.0),
            pod_timeout: Some(4.0),
            format_timeout: Some(8.0),
            parse_timeout: Some(5.0),
            total_timeout: Some(20.0),
            ..Default::default()
        };
        let params = request.to_query_params("weather", "DEMO");
        assert_eq!(value(&params, "scantimeout"), Some("3"));
        assert_eq!(value(&params, "podtimeout"), Some("4"));
        assert_eq!(value(&params, "formattimeout"), Some("8"));
        assert_eq!(value(&params, "parsetimeout"), Some("5"));
        assert_eq!(value(&params, "totaltimeout"), Some("20"));
    }

    #[test]
    fn coordinates_encode_as_latlong_pair() {
        let request = FullResultsRequest {
            coordinates: Some(GeoCoordinates::new(40.42, -3.71)),
            ..Default::default()
        };
        let params = request.to_query_params("what time is it?", "DEMO");
        assert_eq!(value(&params, "latlong"), Some("40.42000000,-3.71000000"));
    }

    #[test]
    fn pod_selection_parameters_encode() {
        let request = FullResultsRequest {
            included_pods: vec!["Result".to_string()],
            excluded_pods: vec!["Input".to_string()],
            pod_titles: vec!["Basic Information".to_string()],
            pod_indexes: vec![1, 2],
            scanners: vec!["Numeric".to_string()],
            ..Default::default()
        };
        let params = request.to_query_params("pi", "DEMO");
        assert_eq!(value(&params, "includepodid"), Some("result"));
        assert_eq!(value(&params, "excludepodid"), Some("input"));
        assert_eq!(value(&params, "podtitle"), Some("basic information"));
        assert_eq!(value(&params, "podindex"), Some("1,2"));
        assert_eq!(value(&params, "scanner"), Some("numeric"));
    }

    #[test]
    fn decode_rejects_malformed_envelope() {
        let error = decode_query_result("<html>not a result</html>").unwrap_err();
        assert!(matches!(error, WolframError::Decode(_)));
    }

    #[test]
    fn decode_pod_accepts_bare_and_wrapped_documents() {
        let bare = r#"{
            "title": "Result",
            "error": false,
            "position": 200,
            "scanner": "Simplification",
            "id": "Result",
            "numsubpods": 0,
            "subpod": []
        }"#;
        let pod = decode_pod(bare).unwrap();
        assert_eq!(pod.id, "Result");

        let wrapped = format!(r#"{{"pod": {bare}}}"#);
        let pod = decode_pod(&wrapped).unwrap();
        assert_eq!(pod.id, "Result");
    }
}
