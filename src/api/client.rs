//! HTTP API Client
//!
//! Functions for communicating with the simulator's REST API. All endpoints
//! are same-origin, so requests use relative paths.

use gloo_net::http::Request;
use std::fmt;

/// Status endpoint, polled to repaint the dashboard indicator.
pub const STATUS_ENDPOINT: &str = "/api/status";
/// Control endpoint that starts the simulator.
pub const START_ENDPOINT: &str = "/api/start";
/// Control endpoint that stops the simulator.
pub const STOP_ENDPOINT: &str = "/api/stop";

/// Failure modes of an API call.
///
/// Transport and decode failures are logged at the call site and then
/// propagated; callers decide whether to surface them (control actions) or
/// degrade silently (status refresh).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiError {
    /// Network unreachable or the fetch itself was rejected.
    Network(String),
    /// The server answered with a non-2xx status.
    Http(u16),
    /// The response body was not the JSON we expected.
    Parse(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Http(status) => write!(f, "HTTP error, status: {status}"),
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// Point-in-time snapshot of the simulator state.
///
/// The backend sends more fields (config echo, device count, last update);
/// only `is_running` drives the indicator, the rest is ignored.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct StatusSnapshot {
    pub is_running: bool,
}

/// Response body of the start/stop control endpoints.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct ControlResponse {
    pub status: String,
    pub message: String,
}

impl ControlResponse {
    /// Only the literal status `"success"` counts as success; everything
    /// else carries a server-supplied error message.
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
}

/// Options for [`api_request`].
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: HttpMethod,
    /// When set, these headers replace the defaults wholly rather than
    /// merging key-by-key. The original dashboard shell behaved this way and
    /// callers rely on it; pinned by tests below.
    pub headers: Option<Vec<(String, String)>>,
    /// Raw request body, already serialized.
    pub body: Option<String>,
}

/// Headers that will actually be sent for the given options.
pub fn effective_headers(options: &RequestOptions) -> Vec<(String, String)> {
    match &options.headers {
        Some(headers) => headers.clone(),
        None => vec![("Content-Type".to_string(), "application/json".to_string())],
    }
}

fn log_failure(error: ApiError) -> ApiError {
    web_sys::console::error_1(&format!("API request failed: {error}").into());
    error
}

/// Perform an API call and decode the response as JSON.
///
/// Non-2xx responses become [`ApiError::Http`] carrying the status code;
/// transport and decode failures map to their respective variants. Every
/// failure is logged before propagating.
pub async fn api_request(
    path: &str,
    options: RequestOptions,
) -> Result<serde_json::Value, ApiError> {
    let mut builder = match options.method {
        HttpMethod::Get => Request::get(path),
        HttpMethod::Post => Request::post(path),
    };

    for (name, value) in effective_headers(&options) {
        builder = builder.header(&name, &value);
    }

    let response = match options.body {
        Some(body) => builder
            .body(body)
            .map_err(|e| log_failure(ApiError::Network(e.to_string())))?
            .send()
            .await,
        None => builder.send().await,
    }
    .map_err(|e| log_failure(ApiError::Network(e.to_string())))?;

    if !response.ok() {
        return Err(log_failure(ApiError::Http(response.status())));
    }

    response
        .json()
        .await
        .map_err(|e| log_failure(ApiError::Parse(e.to_string())))
}

/// Fetch the current simulator status.
pub async fn fetch_status() -> Result<StatusSnapshot, ApiError> {
    let value = api_request(STATUS_ENDPOINT, RequestOptions::default()).await?;
    serde_json::from_value(value).map_err(|e| log_failure(ApiError::Parse(e.to_string())))
}

async fn send_control(path: &str) -> Result<ControlResponse, ApiError> {
    let options = RequestOptions {
        method: HttpMethod::Post,
        ..RequestOptions::default()
    };
    let value = api_request(path, options).await?;
    serde_json::from_value(value).map_err(|e| log_failure(ApiError::Parse(e.to_string())))
}

/// Ask the backend to start the simulator.
pub async fn start_simulator() -> Result<ControlResponse, ApiError> {
    send_control(START_ENDPOINT).await
}

/// Ask the backend to stop the simulator.
pub async fn stop_simulator() -> Result<ControlResponse, ApiError> {
    send_control(STOP_ENDPOINT).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_headers_carry_json_content_type() {
        let headers = effective_headers(&RequestOptions::default());
        assert_eq!(
            headers,
            vec![("Content-Type".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn caller_headers_replace_defaults_wholly() {
        // Replacement, not a per-key merge: the default Content-Type is gone
        // once the caller supplies any header set.
        let options = RequestOptions {
            headers: Some(vec![("X-Request-Id".to_string(), "42".to_string())]),
            ..RequestOptions::default()
        };
        let headers = effective_headers(&options);
        assert_eq!(headers, vec![("X-Request-Id".to_string(), "42".to_string())]);
    }

    #[test]
    fn control_response_success_is_literal() {
        let ok = ControlResponse {
            status: "success".to_string(),
            message: "Simulator started".to_string(),
        };
        assert!(ok.is_success());

        for status in ["error", "Success", "ok", ""] {
            let other = ControlResponse {
                status: status.to_string(),
                message: "already running".to_string(),
            };
            assert!(!other.is_success(), "status {status:?} must not be success");
        }
    }

    #[test]
    fn http_error_display_includes_status_code() {
        assert_eq!(ApiError::Http(503).to_string(), "HTTP error, status: 503");
    }
}
