//! Degrading "not found" failures to absent results.

use bigfix_client::{ConnectionConfig, Error, ErrorKind, Result};

/// Decides which terminal errors mean "absent" rather than "failed".
///
/// Built-in matches (404, explicit `NotFound`, "not found" in the message)
/// are always on; configured substrings extend them. Only client, exhausted
/// and not-found errors are ever suppressed, so transport and decode
/// failures always surface.
#[derive(Debug, Clone, Default)]
pub struct NotFoundPolicy {
    patterns: Vec<String>,
}

impl NotFoundPolicy {
    pub fn new<I, S>(extra: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = extra
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        Self { patterns }
    }

    pub fn from_config(config: &ConnectionConfig) -> Self {
        Self::new(&config.ignore_error_messages)
    }

    pub fn is_suppressed(&self, err: &Error) -> bool {
        if err.is_not_found() {
            return true;
        }
        if !matches!(
            err.kind,
            ErrorKind::Client { .. } | ErrorKind::RetriesExhausted { .. }
        ) {
            return false;
        }
        // Match what callers see, context included.
        let text = err.to_string().to_lowercase();
        self.patterns.iter().any(|p| text.contains(p.as_str()))
    }

    /// `Ok(None)` for a suppressed error.
    pub fn optional<T>(&self, result: Result<T>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) if self.is_suppressed(&err) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// An empty list for a suppressed error.
    pub fn or_empty<T>(&self, result: Result<Vec<T>>) -> Result<Vec<T>> {
        Ok(self.optional(result)?.unwrap_or_default())
    }
}
