//! XML decoding helpers shared by the entity models.
//!
//! BigFix payloads are loosely typed: numbers and flags arrive as element
//! text that may be empty, padded or spelled in several ways. Wire structs
//! keep such values lenient and the fold step decides what they mean.

use bigfix_client::{Error, ErrorKind, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};

/// Decode a payload into its wire structure.
///
/// Fails only on malformed XML, reporting `what` and the payload size.
pub fn decode<T: DeserializeOwned>(body: &[u8], what: &str) -> Result<T> {
    let text = std::str::from_utf8(body).map_err(|e| decode_error(what, body.len(), e))?;
    quick_xml::de::from_str(text).map_err(|e| decode_error(what, body.len(), e))
}

fn decode_error(
    what: &str,
    len: usize,
    err: impl std::error::Error + Send + Sync + 'static,
) -> Error {
    Error::with_source(
        ErrorKind::Decode {
            entity: what.to_string(),
            len,
            message: err.to_string(),
        },
        err,
    )
}

/// `true`, `1` or `yes` in any case; everything else is false.
pub fn parse_bool(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "true" | "1" | "yes"
    )
}

/// Unsigned integer, zero when absent or malformed.
pub fn parse_u64(value: &str) -> u64 {
    value.trim().parse().unwrap_or_default()
}

/// `deserialize_with` adapter for [`parse_bool`].
pub fn lenient_bool<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(parse_bool(&value))
}

/// `deserialize_with` adapter for [`parse_u64`].
pub fn lenient_u64<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<u64, D::Error> {
    let value = String::deserialize(deserializer)?;
    Ok(parse_u64(&value))
}

/// Pick the payload's resource URL, falling back to the URL requested.
pub fn resolve_resource(payload: String, request_url: &str) -> String {
    if payload.trim().is_empty() {
        request_url.to_string()
    } else {
        payload
    }
}
