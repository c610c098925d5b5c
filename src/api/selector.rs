use super::full::{FullResultsClient, FullResultsRequest};
use super::params::{GeoCoordinates, ResultFormat};
use super::types::QueryResult;
use crate::error::Result;

/// Request builder allowing any combination of non-default values for Full
/// Results parameters. Build-up is terminated by [`Selector::get_results`],
/// which issues exactly one request.
///
/// Distinct parameter kinds are order-independent; within one repeatable
/// parameter, append order is preserved. A selector is exclusively owned by
/// its call site and is not meant for reuse after termination; construct a
/// fresh one per request (they are cheap). Concurrent mutation of a single
/// selector is not supported.
#[derive(Debug)]
pub struct Selector<'a> {
    client: &'a FullResultsClient,
    request: FullResultsRequest,
}

impl<'a> Selector<'a> {
    pub(crate) fn new(client: &'a FullResultsClient) -> Self {
        Self {
            client,
            request: FullResultsRequest::default(),
        }
    }

    /// Include a result format in the response. Server default: basic text
    /// and image formats ("plaintext,image").
    pub fn with_result_format(mut self, format: ResultFormat) -> Self {
        self.request.formats.push(format);
        self
    }

    /// Include several result formats in the response
    pub fn with_result_formats(mut self, formats: &[ResultFormat]) -> Self {
        self.request.formats.extend_from_slice(formats);
        self
    }

    /// Apply an assumption token taken from the `input` attribute of a value
    /// in a previous response
    pub fn with_assumption(mut self, assumption: impl Into<String>) -> Self {
        self.request.assumptions.push(assumption.into());
        self
    }

    /// Use this location name as the client location, e.g. for "what time is
    /// it?"
    pub fn located_in(mut self, location: impl Into<String>) -> Self {
        self.request.location = Some(location.into());
        self
    }

    /// Use these coordinates as the client location
    pub fn located_at(mut self, latitude: f64, longitude: f64) -> Self {
        self.request.coordinates = Some(GeoCoordinates::new(latitude, longitude));
        self
    }

    /// Use this IP address as the client location
    pub fn located_at_ip(mut self, ip: impl Into<String>) -> Self {
        self.request.ip = Some(ip.into());
        self
    }

    /// Apply a pod state token from a previous response. Repeats chain like
    /// repeated button clicks.
    pub fn with_pod_state(mut self, pod_state: impl Into<String>) -> Self {
        self.request.pod_states.push(pod_state.into());
        self
    }

    /// Seconds to wait for results before timed-out pods are returned as
    /// links for async loading. Zero or negative disables the restriction.
    pub fn using_async_timeout(mut self, timeout_seconds: f32) -> Self {
        self.request.async_timeout = Some(timeout_seconds);
        self
    }

    /// Seconds allowed for the "scan" stage of processing, effectively
    /// limiting the number and breadth of subtopics. Server default 3.0.
    pub fn using_scan_timeout(mut self, scan_timeout: f32) -> Self {
        self.request.scan_timeout = Some(scan_timeout);
        self
    }

    /// Seconds allowed in the "format" stage for any one pod. Server default
    /// 4.0.
    pub fn using_pod_timeout(mut self, pod_timeout: f32) -> Self {
        self.request.pod_timeout = Some(pod_timeout);
        self
    }

    /// Seconds allowed in the "format" stage for the entire collection of
    /// pods. Server default 8.0.
    pub fn using_format_timeout(mut self, format_timeout: f32) -> Self {
        self.request.format_timeout = Some(format_timeout);
        self
    }

    /// Seconds allowed for the "parsing" stage. Queries that time out here
    /// return success=false with parsetimedout=true. Server default 5.0.
    pub fn using_parse_timeout(mut self, parse_timeout: f32) -> Self {
        self.request.parse_timeout = Some(parse_timeout);
        self
    }

    /// Total seconds allowed for the whole query, a last-resort limit on top
    /// of the per-stage timeouts. Server default 20.0.
    pub fn using_total_timeout(mut self, total_timeout: f32) -> Self {
        self.request.total_timeout = Some(total_timeout);
        self
    }

    /// Include a pod id in the results. Undoes any earlier exclusion of the
    /// same id; the last call wins.
    pub fn with_pod_id(mut self, pod_id: impl Into<String>) -> Self {
        let pod_id = pod_id.into();
        self.request.excluded_pods.retain(|id| *id != pod_id);
        self.request.included_pods.push(pod_id);
        self
    }

    /// Exclude a pod id from the results. Undoes any earlier inclusion of
    /// the same id; the last call wins.
    pub fn without_pod_id(mut self, pod_id: impl Into<String>) -> Self {
        let pod_id = pod_id.into();
        self.request.included_pods.retain(|id| *id != pod_id);
        self.request.excluded_pods.push(pod_id);
        self
    }

    /// Include pods with this title. `*` matches zero or more characters in
    /// pod titles.
    pub fn with_pod_title(mut self, pod_title: impl Into<String>) -> Self {
        self.request.pod_titles.push(pod_title.into());
        self
    }

    /// Include the pod at this index
    pub fn with_pod_index(mut self, index: i32) -> Self {
        self.request.pod_indexes.push(index);
        self
    }

    /// Only return pods produced by this scanner ("Numeric", "Data",
    /// "Traveling")
    pub fn with_pods_using_scanner(mut self, scanner: impl Into<String>) -> Self {
        self.request.scanners.push(scanner.into());
        self
    }

    /// Terminal operation calling the API with all accumulated parameters.
    pub async fn get_results(self, input: &str, app_id: &str) -> Result<QueryResult> {
        self.client
            .get_full_results(input, app_id, &self.request)
            .await
    }
}
