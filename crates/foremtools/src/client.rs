//! Resilient HTTP client for the Forem API
//!
//! One logical call fans out into up to four attempts: 429s, 5xx responses,
//! and transport failures are retried with exponential backoff (or a
//! server-provided `retry-after` delay), while any other non-2xx status fails
//! immediately. Callers see none of the intermediate failures, only the
//! parsed JSON body or a single final [`ApiError`].
//!
//! The client holds process-lifetime state only: the credential, the base
//! URL, and the per-attempt timeout, all immutable after construction.
//! Concurrent calls on a shared client run fully in parallel.

use std::time::Duration;

#[cfg(test)]
use std::sync::{Arc, Mutex};

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Method, StatusCode};

use foremtools_core::error::{error_message, ApiError};
use foremtools_core::query::{build_url, QueryValue};
use foremtools_core::rate_limit::{RateLimitInfo, LIMIT_HEADER, REMAINING_HEADER, RESET_HEADER};
use foremtools_core::retry::{is_retryable_status, retry_delay, RetryState};

use crate::error::Error;
use crate::prelude::{eyre, Result};

/// Default Forem instance (dev.to) API base URL
pub const DEFAULT_BASE_URL: &str = "https://dev.to/api";

const ACCEPT_HEADER: &str = "application/vnd.forem.api-v1+json";
const USER_AGENT_HEADER: &str = concat!("foremtools/", env!("CARGO_PKG_VERSION"));
const API_KEY_HEADER: &str = "api-key";
const REQUEST_ID_HEADER: &str = "x-request-id";
const RETRY_AFTER_HEADER: &str = "retry-after";
const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Forem configuration from environment variables
#[derive(Debug, Clone)]
pub struct ForemConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ForemConfig {
    /// Load configuration from environment variables
    /// Uses FOREM_API_KEY if set, otherwise falls back to DEVTO_API_KEY
    /// Uses FOREM_BASE_URL and FOREM_TIMEOUT_SECONDS with default fallbacks
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("FOREM_API_KEY")
            .or_else(|_| std::env::var("DEVTO_API_KEY"))
            .map_err(|_| {
                eyre!(
                    "Neither FOREM_API_KEY nor DEVTO_API_KEY environment variable is set. \
                     Get an API key from https://dev.to/settings/extensions"
                )
            })?;

        let timeout = std::env::var("FOREM_TIMEOUT_SECONDS")
            .ok()
            .and_then(|value| value.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Ok(Self {
            api_key,
            base_url: std::env::var("FOREM_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            timeout: Duration::from_secs(timeout),
        })
    }
}

/// The pause between attempts. Tests swap the real sleep for a recorder so
/// retry behavior is observable without wall-clock waits.
#[derive(Clone)]
enum Delay {
    Sleep,
    #[cfg(test)]
    Recorded(Arc<Mutex<Vec<Duration>>>),
}

impl Delay {
    async fn wait(&self, duration: Duration) {
        match self {
            Delay::Sleep => tokio::time::sleep(duration).await,
            #[cfg(test)]
            Delay::Recorded(log) => log.lock().unwrap().push(duration),
        }
    }
}

/// Diagnostic context for a failed HTTP response, kept only long enough to
/// decide between retrying and constructing the final [`ApiError`].
struct FailureContext {
    status: u16,
    status_text: String,
    body: String,
    rate_limit: RateLimitInfo,
    request_id: Option<String>,
    retry_after: Option<String>,
}

impl FailureContext {
    fn into_api_error(self, endpoint: &str, method: &Method) -> ApiError {
        ApiError::http(
            self.status,
            error_message(self.status, &self.status_text, &self.body),
            endpoint,
            method.as_str(),
            Some(self.rate_limit),
            self.request_id,
        )
    }
}

/// Outcome of a single attempt, classified before the retry decision.
enum AttemptOutcome {
    /// 2xx with a parsed body (the empty object for a 204).
    Success(serde_json::Value),
    /// 2xx with a body that is not valid JSON. The API contract guarantees
    /// JSON on success, so this is a defect, not an API failure.
    Malformed(serde_json::Error),
    /// Non-2xx response.
    Failed(FailureContext),
    /// No response was obtained.
    Transport(String),
}

/// HTTP client for the Forem API.
pub struct ForemClient {
    http: reqwest::Client,
    api_key: HeaderValue,
    base_url: String,
    delay: Delay,
}

impl ForemClient {
    pub fn new(config: &ForemConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        let mut api_key = HeaderValue::from_str(&config.api_key)
            .map_err(|e| eyre!("Invalid API key value: {}", e))?;
        api_key.set_sensitive(true);

        Ok(Self {
            http,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            delay: Delay::Sleep,
        })
    }

    /// Load configuration from the environment and build a client.
    pub fn from_env() -> Result<Self> {
        Self::new(&ForemConfig::from_env()?)
    }

    #[cfg(test)]
    fn with_recorded_delays(config: &ForemConfig) -> (Self, Arc<Mutex<Vec<Duration>>>) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut client = Self::new(config).expect("client");
        client.delay = Delay::Recorded(log.clone());
        (client, log)
    }

    /// GET `path`, returning the parsed JSON body.
    pub async fn get(
        &self,
        path: &str,
        params: &[(&str, Option<QueryValue>)],
        authenticated: bool,
    ) -> std::result::Result<serde_json::Value, Error> {
        self.request(Method::GET, path, params, None, authenticated)
            .await
    }

    /// POST `path` with an optional JSON body and query parameters.
    pub async fn post(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
        params: &[(&str, Option<QueryValue>)],
    ) -> std::result::Result<serde_json::Value, Error> {
        self.request(Method::POST, path, params, body, true).await
    }

    /// PUT `path` with an optional JSON body.
    pub async fn put(
        &self,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> std::result::Result<serde_json::Value, Error> {
        self.request(Method::PUT, path, &[], body, true).await
    }

    /// Fixed header set plus the conditional `api-key` header.
    /// Unauthenticated calls omit the key entirely rather than sending it
    /// empty.
    fn headers(&self, authenticated: bool) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(USER_AGENT, HeaderValue::from_static(USER_AGENT_HEADER));

        if authenticated {
            headers.insert(API_KEY_HEADER, self.api_key.clone());
        }

        headers
    }

    /// One logical call: build the URL once, then attempt until success, a
    /// terminal failure, or an exhausted retry budget.
    async fn request(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, Option<QueryValue>)],
        body: Option<serde_json::Value>,
        authenticated: bool,
    ) -> std::result::Result<serde_json::Value, Error> {
        let url = build_url(&self.base_url, path, params);
        let headers = self.headers(authenticated);
        let mut state = RetryState::new();

        loop {
            match self.attempt(&method, &url, &headers, &body).await {
                AttemptOutcome::Success(value) => return Ok(value),
                AttemptOutcome::Malformed(error) => return Err(Error::Decode(error)),
                AttemptOutcome::Failed(failure) => {
                    if is_retryable_status(failure.status) && state.can_retry() {
                        let delay = retry_delay(state.attempt(), failure.retry_after.as_deref());
                        self.delay.wait(delay).await;
                        state.advance();
                        continue;
                    }

                    return Err(failure.into_api_error(path, &method).into());
                }
                AttemptOutcome::Transport(error) => {
                    state.record_transport_error(error);

                    if state.can_retry() {
                        let delay = retry_delay(state.attempt(), None);
                        self.delay.wait(delay).await;
                        state.advance();
                        continue;
                    }

                    return Err(ApiError::transport(
                        path,
                        method.as_str(),
                        state.attempts_made(),
                        state.last_transport_error(),
                    )
                    .into());
                }
            }
        }
    }

    /// Perform one attempt and classify the exchange. Timeouts and connection
    /// errors surface as `Transport`, like any failure that produced no
    /// response.
    async fn attempt(
        &self,
        method: &Method,
        url: &str,
        headers: &HeaderMap,
        body: &Option<serde_json::Value>,
    ) -> AttemptOutcome {
        let mut builder = self.http.request(method.clone(), url).headers(headers.clone());
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = match builder.send().await {
            Ok(response) => response,
            Err(error) => return AttemptOutcome::Transport(error.to_string()),
        };

        let status = response.status();

        if status.is_success() {
            if status == StatusCode::NO_CONTENT {
                return AttemptOutcome::Success(serde_json::json!({}));
            }

            let text = match response.text().await {
                Ok(text) => text,
                Err(error) => return AttemptOutcome::Transport(error.to_string()),
            };

            return match serde_json::from_str(&text) {
                Ok(value) => AttemptOutcome::Success(value),
                Err(error) => AttemptOutcome::Malformed(error),
            };
        }

        let response_headers = response.headers().clone();
        let header = |name: &str| {
            response_headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        let status_text = status.canonical_reason().unwrap_or("").to_string();
        let body = response.text().await.unwrap_or_default();

        AttemptOutcome::Failed(FailureContext {
            status: status.as_u16(),
            status_text,
            body,
            rate_limit: RateLimitInfo::from_parts(
                header(LIMIT_HEADER).as_deref(),
                header(REMAINING_HEADER).as_deref(),
                header(RESET_HEADER).as_deref(),
            ),
            request_id: header(REQUEST_ID_HEADER),
            retry_after: header(RETRY_AFTER_HEADER),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::f;
    use mockito::Matcher;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    fn test_config(base_url: &str) -> ForemConfig {
        ForemConfig {
            api_key: "test-api-key".to_string(),
            base_url: base_url.to_string(),
            timeout: Duration::from_secs(5),
        }
    }

    fn api_error(result: std::result::Result<serde_json::Value, Error>) -> ApiError {
        match result {
            Err(Error::Api(error)) => error,
            other => panic!("expected ApiError, got: {:?}", other.map(|v| v.to_string())),
        }
    }

    /// Serve a fixed sequence of raw HTTP responses, one connection each.
    /// An empty entry closes the connection without responding, which the
    /// client sees as a transport failure.
    async fn spawn_sequence_server(responses: Vec<String>) -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            for response in responses {
                let Ok((mut socket, _)) = listener.accept().await else {
                    return;
                };

                let mut buf = [0u8; 4096];
                let _ = socket.read(&mut buf).await;
                if !response.is_empty() {
                    let _ = socket.write_all(response.as_bytes()).await;
                }
                let _ = socket.shutdown().await;
            }
        });

        addr
    }

    fn http_response(status_line: &str, headers: &[(&str, &str)], body: &str) -> String {
        let mut response = format!("HTTP/1.1 {status_line}\r\n");
        for (name, value) in headers {
            response.push_str(&f!("{name}: {value}\r\n"));
        }
        response.push_str(&f!("content-length: {}\r\n", body.len()));
        response.push_str("connection: close\r\n\r\n");
        response.push_str(body);
        response
    }

    #[tokio::test]
    async fn test_get_returns_parsed_json() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles/1")
            .match_header("accept", ACCEPT_HEADER)
            .match_header("api-key", "test-api-key")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id":1,"title":"Test"}"#)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let result = client.get("/articles/1", &[], true).await.unwrap();

        assert_eq!(result, json!({"id": 1, "title": "Test"}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_get_sends_query_parameters() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("page".into(), "1".into()),
                Matcher::UrlEncoded("tag".into(), "rust".into()),
            ]))
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let result = client
            .get(
                "/articles",
                &[
                    ("page", Some(QueryValue::Int(1))),
                    ("tag", Some(QueryValue::from("rust"))),
                    ("empty", Some(QueryValue::from(""))),
                    ("missing", None),
                ],
                true,
            )
            .await
            .unwrap();

        assert_eq!(result, json!([]));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unauthenticated_request_omits_api_key() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles/1")
            .match_header("api-key", Matcher::Missing)
            .with_status(200)
            .with_body("{}")
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        client.get("/articles/1", &[], false).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_no_content_yields_empty_object() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/some-action")
            .with_status(204)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let result = client.post("/some-action", None, &[]).await.unwrap();

        assert_eq!(result, json!({}));
    }

    #[tokio::test]
    async fn test_post_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/articles")
            .match_body(Matcher::Json(json!({"article": {"title": "Test"}})))
            .with_status(201)
            .with_body(r#"{"id":42}"#)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let result = client
            .post(
                "/articles",
                Some(json!({"article": {"title": "Test"}})),
                &[],
            )
            .await
            .unwrap();

        assert_eq!(result, json!({"id": 42}));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_put_sends_json_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("PUT", "/articles/42")
            .match_body(Matcher::Json(json!({"article": {"title": "Updated"}})))
            .with_status(200)
            .with_body(r#"{"id":42}"#)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        client
            .put("/articles/42", Some(json!({"article": {"title": "Updated"}})))
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_post_with_query_params_and_no_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/reactions/toggle")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("reactable_id".into(), "1".into()),
                Matcher::UrlEncoded("reactable_type".into(), "Article".into()),
                Matcher::UrlEncoded("category".into(), "like".into()),
            ]))
            .with_status(200)
            .with_body(r#"{"result":"create"}"#)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        client
            .post(
                "/reactions/toggle",
                None,
                &[
                    ("reactable_id", Some(QueryValue::Int(1))),
                    ("reactable_type", Some(QueryValue::from("Article"))),
                    ("category", Some(QueryValue::from("like"))),
                ],
            )
            .await
            .unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_bad_request_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles")
            .with_status(400)
            .with_body(r#"{"error":"Bad Request","status":400}"#)
            .expect(1)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let error = api_error(client.get("/articles", &[], true).await);

        assert_eq!(error.status, 400);
        assert_eq!(error.endpoint, "/articles");
        assert_eq!(error.method, "GET");
        assert!(error.to_string().contains("Bad Request"));
        assert!(delays.lock().unwrap().is_empty());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_not_found_is_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles/999")
            .with_status(404)
            .with_body(r#"{"error":"not found","status":404}"#)
            .expect(1)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let error = api_error(client.get("/articles/999", &[], true).await);

        assert_eq!(error.status, 404);
        assert!(error.message.contains("not found"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_persistent_server_error_exhausts_retries() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/articles")
            .with_status(500)
            .with_body(r#"{"error":"Internal Server Error"}"#)
            .expect(4)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let error = api_error(client.get("/articles", &[], true).await);

        assert_eq!(error.status, 500);
        // 1 initial + 3 retries, backing off 1s, 2s, 4s.
        assert_eq!(
            *delays.lock().unwrap(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ]
        );
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_server_error_then_success_returns_body() {
        let addr = spawn_sequence_server(vec![
            http_response("500 Internal Server Error", &[], r#"{"error":"Internal"}"#),
            http_response("200 OK", &[("content-type", "application/json")], r#"{"id":1}"#),
        ])
        .await;

        let config = test_config(&f!("http://{addr}"));
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let result = client.get("/articles/1", &[], true).await.unwrap();

        assert_eq!(result, json!({"id": 1}));
        assert_eq!(*delays.lock().unwrap(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_rate_limited_with_retry_after_zero_retries_immediately() {
        let addr = spawn_sequence_server(vec![
            http_response(
                "429 Too Many Requests",
                &[("retry-after", "0")],
                r#"{"error":"Rate limited"}"#,
            ),
            http_response("200 OK", &[("content-type", "application/json")], r#"[{"id":1}]"#),
        ])
        .await;

        let config = test_config(&f!("http://{addr}"));
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let result = client.get("/articles", &[], true).await.unwrap();

        assert_eq!(result, json!([{"id": 1}]));
        assert_eq!(*delays.lock().unwrap(), vec![Duration::ZERO]);
    }

    #[tokio::test]
    async fn test_transport_failure_then_success_returns_body() {
        let addr = spawn_sequence_server(vec![
            String::new(),
            http_response("200 OK", &[("content-type", "application/json")], r#"{"ok":true}"#),
        ])
        .await;

        let config = test_config(&f!("http://{addr}"));
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let result = client.get("/test", &[], true).await.unwrap();

        assert_eq!(result, json!({"ok": true}));
        assert_eq!(delays.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_transport_exhaustion_yields_status_zero() {
        // Nothing listens on port 1, so every attempt fails to connect.
        let config = test_config("http://127.0.0.1:1");
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let error = api_error(client.get("/articles", &[], true).await);

        assert_eq!(error.status, 0);
        assert_eq!(error.endpoint, "/articles");
        assert_eq!(error.method, "GET");
        assert!(error.message.contains("Request failed after 4 attempts"));
        assert_eq!(error.rate_limit, None);
        assert_eq!(error.request_id, None);
        assert_eq!(
            *delays.lock().unwrap(),
            vec![
                Duration::from_secs(1),
                Duration::from_secs(2),
                Duration::from_secs(4),
            ]
        );
    }

    #[tokio::test]
    async fn test_error_carries_rate_limit_and_request_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/articles")
            .with_status(429)
            .with_header("x-ratelimit-limit", "100")
            .with_header("x-ratelimit-remaining", "0")
            .with_header("x-ratelimit-reset", "1700000000")
            .with_header("x-request-id", "req-1")
            .with_header("retry-after", "0")
            .with_body(r#"{"error":"Rate limited"}"#)
            .expect(4)
            .create_async()
            .await;

        let config = test_config(&server.url());
        let (client, delays) = ForemClient::with_recorded_delays(&config);
        let error = api_error(client.get("/articles", &[], true).await);

        assert_eq!(error.status, 429);
        let rate_limit = error.rate_limit.as_ref().expect("rate limit snapshot");
        assert_eq!(rate_limit.limit, Some(100));
        assert_eq!(rate_limit.remaining, Some(0));
        assert_eq!(error.request_id.as_deref(), Some("req-1"));

        let rendered = error.to_string();
        assert!(rendered.contains("req-1"));
        assert!(rendered.contains("rate-limit remaining: 0"));

        assert_eq!(*delays.lock().unwrap(), vec![Duration::ZERO; 3]);
    }

    #[tokio::test]
    async fn test_error_fallback_message_when_body_is_not_json() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/articles/1")
            .with_status(403)
            .with_body("Forbidden")
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let error = api_error(client.get("/articles/1", &[], true).await);

        assert_eq!(error.status, 403);
        assert_eq!(error.message, "API request failed with status 403: Forbidden");
    }

    #[tokio::test]
    async fn test_malformed_success_body_is_a_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/articles/1")
            .with_status(200)
            .with_body("not json")
            .expect(1)
            .create_async()
            .await;

        let client = ForemClient::new(&test_config(&server.url())).unwrap();
        let result = client.get("/articles/1", &[], true).await;

        assert!(matches!(result, Err(Error::Decode(_))));
    }
}
