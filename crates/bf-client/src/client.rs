//! Transport: one configured HTTP client shared by every service.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use reqwest::header::ACCEPT;
use tracing::{debug, instrument};

use crate::config::ConnectionConfig;
use crate::error::{Error, ErrorKind, Result};
use crate::limiter::RateLimiter;
use crate::response::RawResponse;
use crate::retry::{RetryExecutor, RetryObserver};

/// HTTP client for the BigFix REST API with basic auth, retry and an
/// optional rate-limit hook.
///
/// Cloning is cheap; clones share the connection pool.
#[derive(Clone)]
pub struct BigFixHttpClient {
    inner: reqwest::Client,
    base_url: String,
    user_name: String,
    password: String,
    retry: RetryExecutor,
    limiter: Option<Arc<dyn RateLimiter>>,
}

impl fmt::Debug for BigFixHttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigFixHttpClient")
            .field("base_url", &self.base_url)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("retry", &self.retry)
            .field("limiter", &self.limiter.is_some())
            .finish()
    }
}

impl BigFixHttpClient {
    /// Build the transport from connection settings.
    pub fn new(config: &ConnectionConfig) -> Result<Self> {
        let inner = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .danger_accept_invalid_certs(config.insecure_skip_verify)
            .user_agent(crate::USER_AGENT)
            .gzip(true)
            .deflate(true)
            .build()
            .map_err(|e| Error::with_source(ErrorKind::Config(e.to_string()), e))?;

        Ok(Self {
            inner,
            base_url: config.base_url()?,
            user_name: config.user_name.clone(),
            password: config.password().to_string(),
            retry: RetryExecutor::new(config.retry_config()),
            limiter: None,
        })
    }

    /// Consult `limiter` before every attempt.
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    /// Receive a record for every failed attempt.
    pub fn with_retry_observer(mut self, observer: RetryObserver) -> Self {
        self.retry = self.retry.with_observer(observer);
        self
    }

    /// Scheme, host and port, no trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Absolute URL for an API path.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` as XML under the retry policy and return the body.
    ///
    /// `tag` names the operation for the rate limiter and logs.
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    pub async fn get_xml(&self, path: &str, tag: &str) -> Result<Bytes> {
        let url = self.url(path);
        let response = self
            .retry
            .execute(|attempt| self.send_once(&url, tag, attempt))
            .await?;
        Ok(response.body)
    }

    async fn send_once(&self, url: &str, tag: &str, attempt: u32) -> Result<RawResponse> {
        if let Some(limiter) = &self.limiter {
            limiter.acquire(tag).await;
        }

        debug!(url, tag, attempt, "Sending request");

        let response = self
            .inner
            .get(url)
            .basic_auth(&self.user_name, Some(&self.password))
            .header(ACCEPT, "application/xml")
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;

        debug!(status = status.as_u16(), bytes = body.len(), "Response received");

        Ok(RawResponse::new(
            status.as_u16(),
            status.canonical_reason().unwrap_or_default(),
            body,
        ))
    }
}
