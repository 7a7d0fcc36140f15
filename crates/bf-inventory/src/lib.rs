//! # bigfix-inventory
//!
//! Typed access to a BigFix server's inventory: computers, sites, analyses,
//! tasks, fixlets, actions, properties and roles.
//!
//! Requests go through [`bigfix_client`], so every call shares its retry
//! policy, error taxonomy and rate-limit hook. Responses are XML and are
//! folded into stable records:
//!
//! - Computer property bags are routed by property name through
//!   [`PROPERTY_FIELDS`]; unknown names land in `other_properties`.
//! - Timestamps are read with [`parse_timestamp`], which tries several
//!   layouts and leaves the field unset when none fit.
//! - List entries and detail payloads convert to the same record type; a
//!   record built from a list entry uses its name as its title.
//!
//! Site-scoped kinds (analyses, tasks, fixlets) take a site name and type
//! token. An unknown type token is rejected before any request is sent.
//!
//! ## Example
//!
//! ```rust,ignore
//! use bigfix_client::ConnectionConfig;
//! use bigfix_inventory::InventoryClient;
//!
//! #[tokio::main]
//! async fn main() -> bigfix_inventory::Result<()> {
//!     let client = InventoryClient::new(&ConnectionConfig::from_env()?)?;
//!
//!     for computer in client.list_computers().await? {
//!         println!("{} {}", computer.id, computer.name);
//!     }
//!
//!     let task = client.optional(client.get_task("BES Support", "external", 42).await)?;
//!     println!("{task:?}");
//!     Ok(())
//! }
//! ```

mod action;
mod analysis;
mod client;
mod common;
mod computer;
mod fixlet;
mod kind;
mod not_found;
mod property;
mod role;
mod site;
mod site_ref;
mod task;
mod timestamp;
mod xml;

pub use action::{
    Action, ActionSettings, ActionSettingsLocks, ActionTarget, PostActionBehavior,
    PostActionBehaviorLocks, PreActionLocks, TextLock,
};
pub use analysis::{Analysis, AnalysisProperty};
pub use client::InventoryClient;
pub use common::{ContentAction, MimeField};
pub use computer::{split_client_setting, Computer, NameValue, PROPERTY_FIELDS};
pub use fixlet::Fixlet;
pub use kind::EntityKind;
pub use not_found::NotFoundPolicy;
pub use property::Property;
pub use role::{InterfaceLogins, Role};
pub use site::{Site, SiteFile, SitePermission};
pub use site_ref::{SiteFilter, SiteRef, SiteType};
pub use task::Task;
pub use timestamp::parse_timestamp;

pub use bigfix_client::{Error, ErrorKind, Result};
