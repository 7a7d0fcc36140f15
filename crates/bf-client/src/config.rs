//! Connection configuration.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, ErrorKind, Result};
use crate::retry::RetryConfig;

/// Default per-request timeout.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Everything needed to reach one BigFix server.
#[derive(Clone)]
pub struct ConnectionConfig {
    /// Host name, optionally with an `http://` or `https://` scheme.
    pub server_name: String,
    pub port: u16,
    pub user_name: String,
    password: String,
    /// Accept invalid TLS certificates.
    pub insecure_skip_verify: bool,
    pub request_timeout: Duration,
    /// Total attempts per request.
    pub max_retries: u32,
    /// Base delay of the retry backoff.
    pub min_retry_delay: Duration,
    /// Extra message substrings treated as "not found".
    pub ignore_error_messages: Vec<String>,
}

impl fmt::Debug for ConnectionConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionConfig")
            .field("server_name", &self.server_name)
            .field("port", &self.port)
            .field("user_name", &self.user_name)
            .field("password", &"[REDACTED]")
            .field("insecure_skip_verify", &self.insecure_skip_verify)
            .field("request_timeout", &self.request_timeout)
            .field("max_retries", &self.max_retries)
            .field("min_retry_delay", &self.min_retry_delay)
            .field("ignore_error_messages", &self.ignore_error_messages)
            .finish()
    }
}

impl ConnectionConfig {
    /// Create a new connection config builder.
    pub fn builder() -> ConnectionConfigBuilder {
        ConnectionConfigBuilder::default()
    }

    /// Load configuration from `BIGFIX_*` environment variables.
    ///
    /// `BIGFIX_SERVER_NAME`, `BIGFIX_PORT`, `BIGFIX_USER_NAME` and
    /// `BIGFIX_PASSWORD` are required. `BIGFIX_REQUEST_TIMEOUT` is in seconds,
    /// `BIGFIX_MIN_RETRY_DELAY` in milliseconds and
    /// `BIGFIX_IGNORE_ERROR_MESSAGES` is comma-separated.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut builder = Self::builder();

        if let Some(server) = lookup("BIGFIX_SERVER_NAME") {
            builder = builder.with_server_name(server);
        }
        if let Some(port) = lookup("BIGFIX_PORT") {
            builder = builder.with_port(parse_var("BIGFIX_PORT", &port)?);
        }
        if let Some(user) = lookup("BIGFIX_USER_NAME") {
            builder = builder.with_user_name(user);
        }
        if let Some(password) = lookup("BIGFIX_PASSWORD") {
            builder = builder.with_password(password);
        }
        if let Some(flag) = lookup("BIGFIX_INSECURE_SKIP_VERIFY") {
            builder = builder.with_insecure_skip_verify(parse_var("BIGFIX_INSECURE_SKIP_VERIFY", &flag)?);
        }
        if let Some(secs) = lookup("BIGFIX_REQUEST_TIMEOUT") {
            builder = builder.with_request_timeout(Duration::from_secs(parse_var(
                "BIGFIX_REQUEST_TIMEOUT",
                &secs,
            )?));
        }
        if let Some(retries) = lookup("BIGFIX_MAX_RETRIES") {
            builder = builder.with_max_retries(parse_var("BIGFIX_MAX_RETRIES", &retries)?);
        }
        if let Some(ms) = lookup("BIGFIX_MIN_RETRY_DELAY") {
            builder = builder.with_min_retry_delay(Duration::from_millis(parse_var(
                "BIGFIX_MIN_RETRY_DELAY",
                &ms,
            )?));
        }
        if let Some(list) = lookup("BIGFIX_IGNORE_ERROR_MESSAGES") {
            builder = builder.with_ignore_error_messages(
                list.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from),
            );
        }

        builder.build()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    /// Scheme, host and port every request path is appended to, without a
    /// trailing slash.
    pub fn base_url(&self) -> Result<String> {
        let server = self.server_name.trim().trim_end_matches('/');
        let with_scheme = if server.starts_with("http://") || server.starts_with("https://") {
            server.to_string()
        } else {
            format!("https://{server}")
        };

        let mut url = url::Url::parse(&with_scheme)?;
        url.set_port(Some(self.port)).map_err(|_| {
            Error::new(ErrorKind::Config(format!(
                "cannot apply port {} to {with_scheme}",
                self.port
            )))
        })?;

        Ok(url.as_str().trim_end_matches('/').to_string())
    }

    /// Retry settings derived from this connection.
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig::default()
            .with_max_attempts(self.max_retries)
            .with_min_delay(self.min_retry_delay)
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T>
where
    T::Err: fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| {
        Error::new(ErrorKind::Config(format!("{key} has invalid value {value:?}: {e}")))
    })
}

/// Builder for [`ConnectionConfig`].
#[derive(Debug, Default)]
pub struct ConnectionConfigBuilder {
    server_name: Option<String>,
    port: Option<u16>,
    user_name: Option<String>,
    password: Option<String>,
    insecure_skip_verify: bool,
    request_timeout: Option<Duration>,
    max_retries: Option<u32>,
    min_retry_delay: Option<Duration>,
    ignore_error_messages: Vec<String>,
}

impl ConnectionConfigBuilder {
    pub fn with_server_name(mut self, server_name: impl Into<String>) -> Self {
        self.server_name = Some(server_name.into());
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn with_user_name(mut self, user_name: impl Into<String>) -> Self {
        self.user_name = Some(user_name.into());
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Skip TLS certificate verification.
    pub fn with_insecure_skip_verify(mut self, skip: bool) -> Self {
        self.insecure_skip_verify = skip;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Total attempts per request (default 3).
    pub fn with_max_retries(mut self, attempts: u32) -> Self {
        self.max_retries = Some(attempts);
        self
    }

    /// Base backoff delay (default 100 ms).
    pub fn with_min_retry_delay(mut self, delay: Duration) -> Self {
        self.min_retry_delay = Some(delay);
        self
    }

    pub fn with_ignore_error_messages<I, S>(mut self, messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.ignore_error_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// Build the configuration, failing on the first missing required field.
    pub fn build(self) -> Result<ConnectionConfig> {
        let defaults = RetryConfig::default();

        Ok(ConnectionConfig {
            server_name: required("server_name", self.server_name)?,
            port: self.port.ok_or_else(|| missing("port"))?,
            user_name: required("user_name", self.user_name)?,
            password: required("password", self.password)?,
            insecure_skip_verify: self.insecure_skip_verify,
            request_timeout: self.request_timeout.unwrap_or(DEFAULT_REQUEST_TIMEOUT),
            max_retries: self.max_retries.unwrap_or(defaults.max_attempts),
            min_retry_delay: self.min_retry_delay.unwrap_or(defaults.min_delay),
            ignore_error_messages: self.ignore_error_messages,
        })
    }
}

fn required(field: &str, value: Option<String>) -> Result<String> {
    value
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| missing(field))
}

fn missing(field: &str) -> Error {
    Error::new(ErrorKind::Config(format!("{field} must be configured")))
}
