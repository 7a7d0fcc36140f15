//! Site references and the per-operation path templates they select.
//!
//! The `master` and `action` tokens are synonyms for site lookups but not
//! for site sub-resources or content: `site get` collapses both onto the
//! master action site while permissions, files and content keep a distinct
//! `action/{name}` route.

use std::fmt;
use std::str::FromStr;

use bigfix_client::security::url::encode_path_segment;
use bigfix_client::{Error, ErrorKind, Result};
use serde::Serialize;

use crate::kind::EntityKind;
use crate::site::Site;

/// The four site-type tokens the API routes on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SiteType {
    External,
    Operator,
    Master,
    Action,
}

impl SiteType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SiteType::External => "external",
            SiteType::Operator => "operator",
            SiteType::Master => "master",
            SiteType::Action => "action",
        }
    }
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SiteType {
    type Err = Error;

    fn from_str(token: &str) -> Result<Self> {
        match token {
            "external" => Ok(SiteType::External),
            "operator" => Ok(SiteType::Operator),
            "master" => Ok(SiteType::Master),
            "action" => Ok(SiteType::Action),
            other => Err(Error::new(ErrorKind::Validation(format!(
                "invalid site type: {other}. Must be one of: external, operator, master, action"
            )))),
        }
    }
}

/// `(name, type)` pair scoping site-dependent entities.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct SiteRef {
    name: String,
    site_type: SiteType,
}

impl SiteRef {
    /// Validate a caller-supplied name and type token.
    pub fn parse(name: &str, site_type: &str) -> Result<Self> {
        let site_type = site_type.parse()?;
        Self::new(name, site_type)
    }

    pub fn new(name: impl Into<String>, site_type: SiteType) -> Result<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(Error::new(ErrorKind::Validation(
                "site name must not be empty".to_string(),
            )));
        }
        Ok(Self { name, site_type })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn site_type(&self) -> SiteType {
        self.site_type
    }

    fn segment(&self) -> String {
        encode_path_segment(&self.name)
    }

    /// Path of the site itself.
    pub(crate) fn site_path(&self) -> String {
        match self.site_type {
            SiteType::External | SiteType::Operator => {
                format!("/api/site/{}/{}", self.site_type, self.segment())
            }
            SiteType::Master | SiteType::Action => "/api/site/master".to_string(),
        }
    }

    /// Path of a site sub-resource such as `permissions` or `files`.
    pub(crate) fn site_resource_path(&self, leaf: &str) -> String {
        match self.site_type {
            SiteType::Master => format!("/api/site/master/{leaf}"),
            _ => format!("/api/site/{}/{}/{leaf}", self.site_type, self.segment()),
        }
    }

    /// Path listing site-scoped content of `kind`.
    pub(crate) fn content_list_path(&self, kind: EntityKind) -> String {
        match self.site_type {
            SiteType::Master => format!("/api/{}/master", kind.plural()),
            _ => format!("/api/{}/{}/{}", kind.plural(), self.site_type, self.segment()),
        }
    }

    /// Path of one site-scoped content item.
    pub(crate) fn content_path(&self, kind: EntityKind, id: u64) -> String {
        match self.site_type {
            SiteType::Master => format!("/api/{kind}/master/{id}"),
            _ => format!("/api/{kind}/{}/{}/{id}", self.site_type, self.segment()),
        }
    }
}

impl fmt::Display for SiteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.site_type)
    }
}

/// Selects which sites a scoped listing visits. Unset fields match anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFilter {
    pub name: Option<String>,
    pub site_type: Option<SiteType>,
}

impl SiteFilter {
    /// Match every site.
    pub fn all() -> Self {
        Self::default()
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_site_type(mut self, site_type: SiteType) -> Self {
        self.site_type = Some(site_type);
        self
    }

    /// Exact comparison of name and type; `master` does not match `action`.
    pub fn matches(&self, site: &Site) -> bool {
        self.name.as_deref().is_none_or(|name| name == site.name)
            && self.site_type.is_none_or(|t| t == site.site_type)
    }
}
