//! # bigfix-client
//!
//! Core HTTP client infrastructure for the BigFix REST API.
//!
//! This crate provides the foundation the inventory services build on:
//! - One shared transport with basic auth, TLS policy and request timeout
//! - Retry with jittered exponential backoff (`min_delay * 3^attempt`)
//! - Typed errors separating client errors, exhausted retries and
//!   transport failures
//! - A rate-limit hook consulted before every attempt
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 bigfix-inventory services                   │
//! │  (computers, sites, analyses, tasks, fixlets, actions, ...) │
//! └─────────────────────────────────────────────────────────────┘
//!                              │  path + tag
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    BigFixHttpClient                         │
//! │  - Basic auth, Accept: application/xml                      │
//! │  - RateLimiter hook                                         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    RetryExecutor                            │
//! │  - success / retryable / fatal classification               │
//! │  - backoff sleeps, attempt records                          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```rust,ignore
//! use bigfix_client::{BigFixHttpClient, ConnectionConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), bigfix_client::Error> {
//!     let config = ConnectionConfig::from_env()?;
//!     let client = BigFixHttpClient::new(&config)?;
//!
//!     let xml = client.get_xml("/api/sites", "bigfix_site_list").await?;
//!     println!("{} bytes", xml.len());
//!     Ok(())
//! }
//! ```

mod client;
mod config;
mod error;
mod limiter;
mod response;
mod retry;
pub mod security;

pub use client::BigFixHttpClient;
pub use config::{ConnectionConfig, ConnectionConfigBuilder, DEFAULT_REQUEST_TIMEOUT};
pub use error::{is_retryable_status, Error, ErrorKind, Result};
pub use limiter::RateLimiter;
pub use response::RawResponse;
pub use retry::{
    backoff_delay, backoff_delay_with_jitter, AttemptOutcome, RetryAttempt, RetryConfig,
    RetryExecutor, RetryObserver, BACKOFF_BASE, JITTER_PERCENT, MAX_BACKOFF,
};

/// User-Agent sent with every request.
pub const USER_AGENT: &str = concat!("bigfix-api/", env!("CARGO_PKG_VERSION"));
