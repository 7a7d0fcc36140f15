//! # bigfix-api
//!
//! A read-only client for the BigFix REST API that turns its XML inventory
//! into typed Rust records.
//!
//! ## Security
//!
//! - The password is redacted in `Debug` output of the configuration and
//!   the transport
//! - Tracing spans skip the client, so credentials never reach logs
//! - Invalid TLS certificates are only accepted when explicitly configured
//!
//! ## Crates
//!
//! - **bigfix-client** - Transport, retry with jittered exponential backoff,
//!   connection configuration, error taxonomy, rate-limit hook
//! - **bigfix-inventory** - Computers, sites, analyses, tasks, fixlets,
//!   actions, properties and roles, plus not-found suppression and
//!   multi-site streams
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bigfix_api::{ConnectionConfig, InventoryClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ConnectionConfig::from_env()?;
//!     let client = InventoryClient::new(&config)?;
//!
//!     for site in client.list_sites().await? {
//!         println!("{} ({})", site.name, site.site_type);
//!     }
//!
//!     Ok(())
//! }
//! ```

#[cfg(feature = "client")]
pub use bigfix_client as client;
#[cfg(feature = "inventory")]
pub use bigfix_inventory as inventory;

#[cfg(feature = "client")]
pub use bigfix_client::{BigFixHttpClient, ConnectionConfig, Error, ErrorKind, Result};
#[cfg(feature = "inventory")]
pub use bigfix_inventory::{InventoryClient, NotFoundPolicy, SiteFilter, SiteType};
