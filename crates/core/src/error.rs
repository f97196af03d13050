//! Structured API failure type and message composition
//!
//! [`ApiError`] is the single error type the request layer surfaces for a
//! failed call. It is constructed exactly once per logical call, either when
//! a terminal status is seen or when the retry budget is exhausted, and
//! carries enough diagnostic context that a caller can tell quota exhaustion
//! from an outage from a bad request without digging through logs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rate_limit::RateLimitInfo;

/// Error payload shape the Forem API returns on failed requests.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Structured error for a failed API call.
///
/// `status` 0 is reserved for transport-level failures where no response was
/// ever received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub status: u16,
    pub message: String,
    pub endpoint: String,
    pub method: String,
    pub rate_limit: Option<RateLimitInfo>,
    pub request_id: Option<String>,
}

impl ApiError {
    /// Error for a non-2xx HTTP response.
    pub fn http(
        status: u16,
        message: impl Into<String>,
        endpoint: impl Into<String>,
        method: impl Into<String>,
        rate_limit: Option<RateLimitInfo>,
        request_id: Option<String>,
    ) -> Self {
        Self {
            status,
            message: message.into(),
            endpoint: endpoint.into(),
            method: method.into(),
            rate_limit,
            request_id,
        }
    }

    /// Error for a call that never obtained a response.
    ///
    /// No rate-limit snapshot and no request id: neither is obtainable
    /// without a response.
    pub fn transport(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        attempts: u32,
        last_error: Option<&str>,
    ) -> Self {
        Self {
            status: 0,
            message: format!(
                "Request failed after {} attempts: {}",
                attempts,
                last_error.unwrap_or("unknown error")
            ),
            endpoint: endpoint.into(),
            method: method.into(),
            rate_limit: None,
            request_id: None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Forem API Error ({} {} {}): {}",
            self.status, self.method, self.endpoint, self.message
        )?;

        if let Some(request_id) = &self.request_id {
            write!(f, " [request-id: {}]", request_id)?;
        }

        if let Some(remaining) = self.rate_limit.as_ref().and_then(|r| r.remaining) {
            write!(f, " [rate-limit remaining: {}]", remaining)?;
        }

        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Extract a human-readable message from a failed response body.
///
/// Falls back to the numeric status and status text when the body is not the
/// API's JSON error shape.
pub fn error_message(status: u16, status_text: &str, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) if !parsed.error.is_empty() => parsed.error,
        _ => format!("API request failed with status {status}: {status_text}"),
    }
}
