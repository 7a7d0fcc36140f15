//! Retry engine with jittered exponential backoff.
//!
//! One call runs an attempt function up to `max_attempts` times. Each outcome
//! is classified as success, retryable failure or fatal failure; retryable
//! failures sleep `min(5 minutes, min_delay * 3^attempt * jitter)` before the
//! next attempt, with `jitter` drawn from `[0.8, 1.2)`. The last attempt never
//! sleeps.

use std::fmt;
use std::future::Future;
use std::ops::Range;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tracing::{debug, info, warn};

use crate::error::{is_retryable_status, Error, ErrorKind, Result};
use crate::response::RawResponse;

/// Upper bound for any single backoff sleep.
pub const MAX_BACKOFF: Duration = Duration::from_secs(5 * 60);

/// Growth base of the exponential backoff.
pub const BACKOFF_BASE: u32 = 3;

/// Jitter band in percent, upper bound exclusive.
pub const JITTER_PERCENT: Range<u32> = 80..120;

/// Compute the sleep before the attempt following `attempt` (1-based).
pub fn backoff_delay(attempt: u32, min_delay: Duration) -> Duration {
    let jitter = rand::rng().random_range(JITTER_PERCENT);
    backoff_delay_with_jitter(attempt, min_delay, jitter)
}

/// Deterministic form of [`backoff_delay`] with the jitter fixed in percent.
pub fn backoff_delay_with_jitter(attempt: u32, min_delay: Duration, jitter_percent: u32) -> Duration {
    if min_delay.is_zero() {
        return Duration::ZERO;
    }

    let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
    let nanos = min_delay.as_nanos() as f64
        * f64::from(BACKOFF_BASE).powi(exponent)
        * f64::from(jitter_percent)
        / 100.0;

    if !nanos.is_finite() || nanos >= MAX_BACKOFF.as_nanos() as f64 {
        return MAX_BACKOFF;
    }

    Duration::from_nanos(nanos as u64)
}

/// Configuration for retry behavior.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts per call, the first one included. Zero behaves as one.
    pub max_attempts: u32,
    /// Base delay the backoff grows from.
    pub min_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            min_delay: Duration::from_millis(100),
        }
    }
}

impl RetryConfig {
    /// Set the total number of attempts.
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// Set the base backoff delay.
    pub fn with_min_delay(mut self, delay: Duration) -> Self {
        self.min_delay = delay;
        self
    }

    /// A single attempt, no sleeping.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Default::default()
        }
    }

    fn effective_attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

/// What one attempt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptOutcome {
    /// A response arrived with this status.
    Status(u16),
    /// No response: connection failure or timeout.
    Transport(String),
}

impl fmt::Display for AttemptOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttemptOutcome::Status(status) => write!(f, "status {status}"),
            AttemptOutcome::Transport(message) => write!(f, "transport error: {message}"),
        }
    }
}

/// Record of one attempt, handed to the observer and then discarded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryAttempt {
    /// 1-based attempt number.
    pub attempt: u32,
    /// Status or transport error the attempt ended with.
    pub outcome: AttemptOutcome,
    /// Sleep chosen before the next attempt; `None` when no retry follows.
    pub delay: Option<Duration>,
}

/// Callback receiving every [`RetryAttempt`]. It cannot influence the call.
pub type RetryObserver = Arc<dyn Fn(&RetryAttempt) + Send + Sync>;

/// Runs attempt functions under a [`RetryConfig`].
#[derive(Clone, Default)]
pub struct RetryExecutor {
    config: RetryConfig,
    observer: Option<RetryObserver>,
}

impl fmt::Debug for RetryExecutor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExecutor")
            .field("config", &self.config)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}

enum Failure {
    Status(RawResponse),
    Transport(Error),
}

impl RetryExecutor {
    /// Create an executor from config.
    pub fn new(config: RetryConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Install an observer for attempt records.
    pub fn with_observer(mut self, observer: RetryObserver) -> Self {
        self.observer = Some(observer);
        self
    }

    /// The retry configuration.
    pub fn config(&self) -> &RetryConfig {
        &self.config
    }

    /// Execute `attempt_fn` until it succeeds, fails fatally, or the attempts
    /// run out.
    ///
    /// `attempt_fn` receives the 1-based attempt number. An `Err` from it is
    /// treated as a transport failure when [`Error::is_transport`] holds and
    /// returned unchanged otherwise.
    pub async fn execute<F, Fut>(&self, mut attempt_fn: F) -> Result<RawResponse>
    where
        F: FnMut(u32) -> Fut,
        Fut: Future<Output = Result<RawResponse>>,
    {
        let max_attempts = self.config.effective_attempts();
        let mut last_failure = None;

        for attempt in 1..=max_attempts {
            debug!(attempt, max_attempts, "Request attempt");

            let failure = match attempt_fn(attempt).await {
                Ok(response) if response.is_success() => {
                    debug!(attempt, status = response.status, "Request succeeded");
                    return Ok(response);
                }
                Ok(response) if is_retryable_status(response.status) => {
                    warn!(attempt, status = response.status, "Retryable status");
                    Failure::Status(response)
                }
                Ok(response) if response.is_client_error() => {
                    debug!(attempt, status = response.status, "Client error, not retrying");
                    return Err(Error::new(ErrorKind::Client {
                        status: response.status,
                        message: response.error_message(),
                    }));
                }
                Ok(response) => {
                    return Err(Error::new(ErrorKind::Http {
                        status: response.status,
                        message: response.error_message(),
                    }));
                }
                Err(err) if err.is_transport() => {
                    warn!(attempt, error = %err, "Network error");
                    Failure::Transport(err)
                }
                Err(err) => return Err(err),
            };

            let delay = (attempt < max_attempts)
                .then(|| backoff_delay(attempt, self.config.min_delay));
            let record = RetryAttempt {
                attempt,
                outcome: match &failure {
                    Failure::Status(response) => AttemptOutcome::Status(response.status),
                    Failure::Transport(err) => AttemptOutcome::Transport(err.to_string()),
                },
                delay,
            };
            self.report(&record);

            if let Some(delay) = delay {
                tokio::time::sleep(delay).await;
            }
            last_failure = Some(failure);
        }

        Err(exhausted(max_attempts, last_failure))
    }

    fn report(&self, record: &RetryAttempt) {
        match record.delay {
            Some(delay) => info!(
                attempt = record.attempt,
                delay_ms = delay.as_millis() as u64,
                outcome = %record.outcome,
                "Backing off before retry"
            ),
            None => info!(
                attempt = record.attempt,
                outcome = %record.outcome,
                "No attempts left"
            ),
        }

        if let Some(observer) = &self.observer {
            observer(record);
        }
    }
}

fn exhausted(attempts: u32, last_failure: Option<Failure>) -> Error {
    match last_failure {
        Some(Failure::Status(response)) => Error::new(ErrorKind::RetriesExhausted {
            attempts,
            last_status: Some(response.status),
            message: response.error_message(),
        }),
        Some(Failure::Transport(err)) => Error::with_source(
            ErrorKind::RetriesExhausted {
                attempts,
                last_status: None,
                message: err.to_string(),
            },
            err,
        ),
        None => Error::new(ErrorKind::RetriesExhausted {
            attempts,
            last_status: None,
            message: "no attempt was made".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    fn response(status: u16) -> RawResponse {
        RawResponse::new(status, "", bytes::Bytes::new())
    }

    fn recording_executor(config: RetryConfig) -> (RetryExecutor, Arc<Mutex<Vec<RetryAttempt>>>) {
        let records = Arc::new(Mutex::new(Vec::new()));
        let sink = records.clone();
        let executor = RetryExecutor::new(config)
            .with_observer(Arc::new(move |r: &RetryAttempt| sink.lock().unwrap().push(r.clone())));
        (executor, records)
    }

    #[test]
    fn test_default_config() {
        let config = RetryConfig::default();
        assert_eq!(config.max_attempts, 3);
        assert_eq!(config.min_delay, Duration::from_millis(100));
        assert_eq!(RetryConfig::no_retry().max_attempts, 1);
    }

    #[test]
    fn test_backoff_within_jitter_band() {
        let min_delay = Duration::from_millis(100);
        for attempt in 1..=6u32 {
            let base = min_delay.as_nanos() as f64 * 3f64.powi(attempt as i32);
            let low = Duration::from_nanos((base * 0.8) as u64);
            let high = Duration::from_nanos((base * 1.2) as u64).min(MAX_BACKOFF);
            for _ in 0..200 {
                let delay = backoff_delay(attempt, min_delay);
                assert!(delay >= low.min(MAX_BACKOFF), "attempt {attempt}: {delay:?} < {low:?}");
                assert!(delay <= high, "attempt {attempt}: {delay:?} > {high:?}");
            }
        }
    }

    #[test]
    fn test_backoff_exact_values() {
        let min_delay = Duration::from_millis(100);
        assert_eq!(backoff_delay_with_jitter(1, min_delay, 100), Duration::from_millis(300));
        assert_eq!(backoff_delay_with_jitter(2, min_delay, 80), Duration::from_millis(720));
        assert_eq!(backoff_delay_with_jitter(2, min_delay, 119), Duration::from_millis(1071));
    }

    #[test]
    fn test_backoff_capped_at_five_minutes() {
        let min_delay = Duration::from_secs(1);
        assert_eq!(backoff_delay_with_jitter(6, min_delay, 119), MAX_BACKOFF);
        assert_eq!(backoff_delay(40, min_delay), MAX_BACKOFF);
        assert_eq!(backoff_delay(u32::MAX, min_delay), MAX_BACKOFF);
        assert_eq!(backoff_delay(u32::MAX, Duration::ZERO), Duration::ZERO);
    }

    #[tokio::test(start_paused = true)]
    async fn test_recovers_after_two_unavailable() {
        let (executor, records) = recording_executor(RetryConfig::default());
        let calls = AtomicU32::new(0);

        let result = executor
            .execute(|_| {
                let n = calls.fetch_add(1, Ordering::SeqCst);
                async move { Ok(response(if n < 2 { 503 } else { 200 })) }
            })
            .await
            .unwrap();

        assert_eq!(result.status, 200);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        let records = records.lock().unwrap();
        let sleeps = records.iter().filter(|r| r.delay.is_some()).count();
        assert_eq!(sleeps, 2);
        assert_eq!(records[0].outcome, AttemptOutcome::Status(503));
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_retryable_status_uses_all_attempts() {
        for status in [408, 429, 500, 502, 503, 504] {
            let (executor, records) = recording_executor(RetryConfig::default().with_max_attempts(4));
            let calls = AtomicU32::new(0);

            let err = executor
                .execute(|_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(response(status)) }
                })
                .await
                .unwrap_err();

            assert_eq!(calls.load(Ordering::SeqCst), 4, "status {status}");
            assert!(err.is_exhausted());
            assert_eq!(err.status(), Some(status));
            let records = records.lock().unwrap();
            assert_eq!(records.iter().filter(|r| r.delay.is_some()).count(), 3);
            assert!(records.last().unwrap().delay.is_none());
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_errors_are_never_retried() {
        for status in [400, 401, 403, 404, 409, 422] {
            let (executor, records) = recording_executor(RetryConfig::default());
            let calls = AtomicU32::new(0);

            let err = executor
                .execute(|_| {
                    calls.fetch_add(1, Ordering::SeqCst);
                    async move { Ok(response(status)) }
                })
                .await
                .unwrap_err();

            assert_eq!(calls.load(Ordering::SeqCst), 1, "status {status}");
            assert!(err.is_client_error());
            assert!(records.lock().unwrap().is_empty());
        }
    }

    #[tokio::test]
    async fn test_other_statuses_are_fatal_http_errors() {
        let executor = RetryExecutor::new(RetryConfig::default());
        let err = executor
            .execute(|_| async { Ok(response(501)) })
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Http { status: 501, .. }));

        let err = executor
            .execute(|_| async { Ok(response(302)) })
            .await
            .unwrap_err();
        assert!(matches!(err.kind, ErrorKind::Http { status: 302, .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn test_transport_errors_exhaust_as_transport() {
        let executor = RetryExecutor::new(RetryConfig::default());
        let err = executor
            .execute(|_| async {
                Err(Error::new(ErrorKind::Transport("connection refused".into())))
            })
            .await
            .unwrap_err();

        assert!(err.is_exhausted());
        assert!(err.is_transport());
        assert_eq!(err.status(), None);
        assert!(err.to_string().contains("connection refused"));
    }

    #[tokio::test]
    async fn test_non_transport_errors_pass_through() {
        let executor = RetryExecutor::new(RetryConfig::default());
        let calls = AtomicU32::new(0);
        let err = executor
            .execute(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Err(Error::new(ErrorKind::Config("bad url".into()))) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(err.kind, ErrorKind::Config(_)));
    }

    #[tokio::test]
    async fn test_zero_attempts_still_tries_once() {
        let executor = RetryExecutor::new(RetryConfig::default().with_max_attempts(0));
        let calls = AtomicU32::new(0);
        let err = executor
            .execute(|_| {
                calls.fetch_add(1, Ordering::SeqCst);
                async { Ok(response(503)) }
            })
            .await
            .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(matches!(
            err.kind,
            ErrorKind::RetriesExhausted { attempts: 1, last_status: Some(503), .. }
        ));
    }
}
