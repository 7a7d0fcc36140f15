//! Raw HTTP response as seen by the retry engine.

use bytes::Bytes;

/// Longest slice of a non-success body carried into error messages.
const ERROR_BODY_LIMIT: usize = 200;

/// A fully read response: status, reason phrase, body bytes.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// HTTP status code.
    pub status: u16,
    /// Canonical reason phrase ("Service Unavailable"), possibly empty.
    pub reason: String,
    /// Undecoded payload.
    pub body: Bytes,
}

impl RawResponse {
    pub fn new(status: u16, reason: impl Into<String>, body: Bytes) -> Self {
        Self {
            status,
            reason: reason.into(),
            body,
        }
    }

    /// Returns true for 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Returns true for 4xx.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// Reason phrase followed by the trimmed, truncated body text.
    pub fn error_message(&self) -> String {
        let body = String::from_utf8_lossy(&self.body);
        let body = body.trim();
        let snippet: String = body.chars().take(ERROR_BODY_LIMIT).collect();
        let ellipsis = if body.chars().count() > ERROR_BODY_LIMIT { "..." } else { "" };

        match (self.reason.is_empty(), snippet.is_empty()) {
            (_, true) => self.reason.clone(),
            (true, false) => format!("{snippet}{ellipsis}"),
            (false, false) => format!("{}: {snippet}{ellipsis}", self.reason),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classes() {
        let ok = RawResponse::new(204, "No Content", Bytes::new());
        assert!(ok.is_success());
        assert!(!ok.is_client_error());

        let missing = RawResponse::new(404, "Not Found", Bytes::new());
        assert!(!missing.is_success());
        assert!(missing.is_client_error());

        let unavailable = RawResponse::new(503, "Service Unavailable", Bytes::new());
        assert!(!unavailable.is_client_error());
    }

    #[test]
    fn test_error_message_includes_body() {
        let resp = RawResponse::new(
            400,
            "Bad Request",
            Bytes::from_static(b"  Computer 42 not found\n"),
        );
        assert_eq!(resp.error_message(), "Bad Request: Computer 42 not found");

        let resp = RawResponse::new(503, "Service Unavailable", Bytes::new());
        assert_eq!(resp.error_message(), "Service Unavailable");

        let resp = RawResponse::new(599, "", Bytes::from_static(b"odd"));
        assert_eq!(resp.error_message(), "odd");
    }

    #[test]
    fn test_error_message_truncates_long_bodies() {
        let body = "x".repeat(500);
        let resp = RawResponse::new(500, "Internal Server Error", Bytes::from(body));
        let message = resp.error_message();
        assert!(message.ends_with("..."));
        assert_eq!(message.len(), "Internal Server Error: ".len() + ERROR_BODY_LIMIT + 3);
    }
}
