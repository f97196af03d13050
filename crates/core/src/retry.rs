//! Retry decision logic for the request layer
//!
//! The request executor threads an explicit [`RetryState`] through its
//! attempt loop and consults these functions after each attempt. Keeping the
//! decision table here means the loop itself stays a thin piece of I/O
//! plumbing and every branch is unit-testable without a network or a timer.

use std::time::Duration;

/// Maximum number of retries after the initial attempt (4 attempts total).
pub const MAX_RETRIES: u32 = 3;

/// Base delay for exponential backoff.
pub const INITIAL_BACKOFF: Duration = Duration::from_secs(1);

/// Whether a status code is worth retrying.
///
/// 429 and the whole 5xx family are transient. Every other non-2xx status is
/// terminal and fails on the first attempt, regardless of retries remaining.
pub fn is_retryable_status(status: u16) -> bool {
    status == 429 || (500..=599).contains(&status)
}

/// Per-call retry bookkeeping threaded through the executor loop.
#[derive(Debug, Default)]
pub struct RetryState {
    attempt: u32,
    last_transport_error: Option<String>,
}

impl RetryState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero-indexed attempt counter, used for backoff computation.
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Attempts performed so far, counting the one currently being classified.
    pub fn attempts_made(&self) -> u32 {
        self.attempt + 1
    }

    pub fn can_retry(&self) -> bool {
        self.attempt < MAX_RETRIES
    }

    pub fn advance(&mut self) {
        self.attempt += 1;
    }

    pub fn record_transport_error(&mut self, error: String) {
        self.last_transport_error = Some(error);
    }

    pub fn last_transport_error(&self) -> Option<&str> {
        self.last_transport_error.as_deref()
    }
}

/// How long to wait before the next attempt.
///
/// A `retry-after` header that parses as a whole number of seconds wins and
/// is honored exactly; `retry-after: 0` requests an immediate retry. Without
/// it, exponential backoff kicks in: 1s, 2s, 4s for successive retries. No
/// jitter, no cap beyond the fixed retry count.
pub fn retry_delay(attempt: u32, retry_after: Option<&str>) -> Duration {
    if let Some(value) = retry_after {
        if let Ok(seconds) = value.trim().parse::<u64>() {
            return Duration::from_secs(seconds);
        }
    }

    INITIAL_BACKOFF * 2u32.pow(attempt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(is_retryable_status(429));
        assert!(is_retryable_status(500));
        assert!(is_retryable_status(502));
        assert!(is_retryable_status(599));
    }

    #[test]
    fn test_terminal_statuses() {
        assert!(!is_retryable_status(400));
        assert!(!is_retryable_status(401));
        assert!(!is_retryable_status(404));
        assert!(!is_retryable_status(422));
        assert!(!is_retryable_status(600));
    }

    #[test]
    fn test_backoff_sequence() {
        assert_eq!(retry_delay(0, None), Duration::from_secs(1));
        assert_eq!(retry_delay(1, None), Duration::from_secs(2));
        assert_eq!(retry_delay(2, None), Duration::from_secs(4));
    }

    #[test]
    fn test_retry_after_overrides_backoff() {
        assert_eq!(retry_delay(2, Some("7")), Duration::from_secs(7));
        assert_eq!(retry_delay(0, Some(" 10 ")), Duration::from_secs(10));
    }

    #[test]
    fn test_retry_after_zero_means_immediate() {
        assert_eq!(retry_delay(0, Some("0")), Duration::ZERO);
        assert_eq!(retry_delay(2, Some("0")), Duration::ZERO);
    }

    #[test]
    fn test_unparseable_retry_after_falls_back_to_backoff() {
        assert_eq!(retry_delay(1, Some("soon")), Duration::from_secs(2));
        assert_eq!(retry_delay(1, Some("-5")), Duration::from_secs(2));
        assert_eq!(retry_delay(1, Some("")), Duration::from_secs(2));
    }

    #[test]
    fn test_retry_state_bookkeeping() {
        let mut state = RetryState::new();
        assert_eq!(state.attempt(), 0);
        assert_eq!(state.attempts_made(), 1);
        assert!(state.can_retry());

        state.advance();
        state.advance();
        state.advance();
        assert_eq!(state.attempts_made(), 4);
        assert!(!state.can_retry());
    }

    #[test]
    fn test_retry_state_keeps_last_transport_error() {
        let mut state = RetryState::new();
        assert_eq!(state.last_transport_error(), None);

        state.record_transport_error("connection refused".to_string());
        state.record_transport_error("operation timed out".to_string());
        assert_eq!(state.last_transport_error(), Some("operation timed out"));
    }
}
