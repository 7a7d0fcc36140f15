//! Error types for bigfix-client.

/// Result type alias for bigfix-client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by the transport, the retry engine and the services
/// layered on top of them.
#[derive(Debug, thiserror::Error)]
#[error("{}{}", .context.as_ref().map(|c| format!("{c}: ")).unwrap_or_default(), .kind)]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// What was being fetched when the error surfaced (kind, id, site).
    pub context: Option<String>,
    /// Optional source error.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl Error {
    /// Create a new error with the given kind.
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
            source: None,
        }
    }

    /// Create a new error with the given kind and source.
    pub fn with_source(
        kind: ErrorKind,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            context: None,
            source: Some(Box::new(source)),
        }
    }

    /// Attach request context. An existing context is kept as the inner part.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = Some(match self.context.take() {
            Some(inner) => format!("{context}: {inner}"),
            None => context,
        });
        self
    }

    /// Returns true if this error is retryable.
    pub fn is_retryable(&self) -> bool {
        self.kind.is_retryable()
    }

    /// Returns true if no response was ever received (connection failure,
    /// timeout), including when retries ran out on such failures.
    pub fn is_transport(&self) -> bool {
        matches!(
            self.kind,
            ErrorKind::Transport(_) | ErrorKind::RetriesExhausted { last_status: None, .. }
        )
    }

    /// Returns true for a non-retryable 4xx response.
    pub fn is_client_error(&self) -> bool {
        matches!(self.kind, ErrorKind::Client { .. })
    }

    /// Returns true if every allowed attempt was used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.kind, ErrorKind::RetriesExhausted { .. })
    }

    /// Returns true if this is a site-type or argument validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self.kind, ErrorKind::Validation(_))
    }

    /// Returns true if the payload could not be decoded.
    pub fn is_decode(&self) -> bool {
        matches!(self.kind, ErrorKind::Decode { .. })
    }

    /// Built-in "not found" classification.
    ///
    /// Matches an explicit `NotFound`, a 404, or a client/exhausted error
    /// whose message mentions "not found".
    pub fn is_not_found(&self) -> bool {
        match &self.kind {
            ErrorKind::NotFound(_) => true,
            ErrorKind::Client { status: 404, .. } => true,
            ErrorKind::Client { message, .. } | ErrorKind::RetriesExhausted { message, .. } => {
                message.to_lowercase().contains("not found")
            }
            _ => false,
        }
    }

    /// The HTTP status behind this error, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match &self.kind {
            ErrorKind::Client { status, .. } | ErrorKind::Http { status, .. } => Some(*status),
            ErrorKind::RetriesExhausted { last_status, .. } => *last_status,
            _ => None,
        }
    }
}

/// The kind of error that occurred.
#[derive(Debug, thiserror::Error)]
pub enum ErrorKind {
    /// Caller input rejected before any network call (e.g. bad site type).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Network failure or timeout before a response arrived.
    #[error("Transport error: {0}")]
    Transport(String),

    /// Non-retryable 4xx response.
    #[error("HTTP client error: {status} {message}")]
    Client { status: u16, message: String },

    /// Any other non-success, non-retryable response.
    #[error("HTTP error: {status} {message}")]
    Http { status: u16, message: String },

    /// Retryable failures persisted through every attempt.
    #[error(
        "request failed after {} attempts{}: {}",
        .attempts,
        .last_status.map(|s| format!(" with status {s}")).unwrap_or_default(),
        .message
    )]
    RetriesExhausted {
        attempts: u32,
        last_status: Option<u16>,
        message: String,
    },

    /// Malformed payload.
    #[error("failed to decode {entity} payload ({len} bytes): {message}")]
    Decode {
        entity: String,
        len: usize,
        message: String,
    },

    /// The server answered but the requested object was absent.
    #[error("{0} not found")]
    NotFound(String),

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ErrorKind {
    /// Returns true if this error kind is retryable.
    pub fn is_retryable(&self) -> bool {
        match self {
            ErrorKind::Transport(_) => true,
            ErrorKind::Client { status, .. } | ErrorKind::Http { status, .. } => {
                is_retryable_status(*status)
            }
            _ => false,
        }
    }
}

/// Rate limited, request timeout, or a transient server error.
pub fn is_retryable_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504)
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        Error::with_source(ErrorKind::Transport(message), err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Error::with_source(ErrorKind::Config(format!("Invalid URL: {}", err)), err)
    }
}
