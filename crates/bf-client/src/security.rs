//! Encoding helpers for values placed into request paths.
//!
//! Site names are free text chosen by BigFix operators and routinely contain
//! spaces or slashes. They MUST go through [`url::encode_path_segment`] before
//! being formatted into a path.
//!
//! ```rust
//! use bigfix_client::security::url;
//!
//! let path = format!("/api/site/custom/{}", url::encode_path_segment("Patches/Windows 10"));
//! assert_eq!(path, "/api/site/custom/Patches%2FWindows%2010");
//! ```

/// URL encoding utilities.
pub mod url {
    /// Percent-encode a value for use as exactly one path segment.
    ///
    /// Everything outside the unreserved set is encoded, so `/`, `?` and `#`
    /// cannot change the shape of the path.
    #[must_use]
    pub fn encode_path_segment(value: &str) -> String {
        urlencoding::encode(value).into_owned()
    }
}
