//! Sites and their permission and file sub-resources.

use bigfix_client::Result;
use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::site_ref::{SiteRef, SiteType};
use crate::timestamp::parse_timestamp;
use crate::xml::{lenient_bool, lenient_u64, parse_bool, parse_u64};

/// A content site. Identity is `(name, site_type)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    pub resource: String,
    pub name: String,
    pub display_name: String,
    pub description: String,
    pub site_type: SiteType,
    /// Only known from a detail fetch.
    pub global_read_permission: Option<bool>,
    pub subscription_mode: String,
    pub gather_url: String,
}

impl Site {
    /// Reference used to scope content fetches to this site. Fails only for
    /// a nameless site.
    pub fn site_ref(&self) -> Result<SiteRef> {
        SiteRef::new(self.name.clone(), self.site_type)
    }

    fn from_list_item(item: SiteListItemXml, site_type: SiteType) -> Self {
        Self {
            resource: item.resource,
            name: item.name,
            display_name: item.display_name,
            description: String::new(),
            site_type,
            global_read_permission: None,
            subscription_mode: String::new(),
            gather_url: item.gather_url,
        }
    }

    fn from_detail(detail: SiteDetailXml, site_type: SiteType, resource: String) -> Self {
        Self {
            resource,
            name: detail.name,
            display_name: detail.display_name,
            description: detail.description,
            site_type,
            global_read_permission: Some(parse_bool(&detail.global_read_permission)),
            subscription_mode: detail.subscription.mode,
            gather_url: detail.gather_url,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SiteListItemXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DisplayName")]
    display_name: String,
    #[serde(rename = "GatherURL")]
    gather_url: String,
}

/// `/api/sites` payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteListXml {
    #[serde(rename = "ExternalSite")]
    external: Vec<SiteListItemXml>,
    #[serde(rename = "OperatorSite")]
    operator: Vec<SiteListItemXml>,
    #[serde(rename = "ActionSite")]
    action: Vec<SiteListItemXml>,
}

impl SiteListXml {
    /// External sites first, then operator sites, then action sites.
    pub(crate) fn into_sites(self) -> Vec<Site> {
        let external = self
            .external
            .into_iter()
            .map(|s| Site::from_list_item(s, SiteType::External));
        let operator = self
            .operator
            .into_iter()
            .map(|s| Site::from_list_item(s, SiteType::Operator));
        let action = self
            .action
            .into_iter()
            .map(|s| Site::from_list_item(s, SiteType::Action));
        external.chain(operator).chain(action).collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SubscriptionXml {
    #[serde(rename = "Mode")]
    mode: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SiteDetailXml {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "DisplayName")]
    display_name: String,
    #[serde(rename = "Description")]
    description: String,
    #[serde(rename = "GlobalReadPermission")]
    global_read_permission: String,
    #[serde(rename = "Subscription")]
    subscription: SubscriptionXml,
    #[serde(rename = "GatherURL")]
    gather_url: String,
}

/// `<BES>` wrapper of a site detail; exactly one child is expected.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteDetailResponseXml {
    #[serde(rename = "ExternalSite")]
    external: Option<SiteDetailXml>,
    #[serde(rename = "OperatorSite")]
    operator: Option<SiteDetailXml>,
    #[serde(rename = "ActionSite")]
    action: Option<SiteDetailXml>,
}

impl SiteDetailResponseXml {
    /// Pick the detail element matching the requested type. `master` and
    /// `action` both read `<ActionSite>`.
    pub(crate) fn into_site(self, site_type: SiteType, resource: String) -> Option<Site> {
        let (detail, resolved) = match site_type {
            SiteType::External => (self.external, SiteType::External),
            SiteType::Operator => (self.operator, SiteType::Operator),
            SiteType::Master | SiteType::Action => (self.action, SiteType::Action),
        };
        detail.map(|d| Site::from_detail(d, resolved, resource))
    }
}

/// An operator's permission on a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SitePermission {
    pub resource: String,
    pub permission: String,
    pub operator: String,
    pub operator_resource: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct OperatorXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "$text")]
    name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SitePermissionXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "Permission")]
    permission: String,
    #[serde(rename = "Operator")]
    operator: OperatorXml,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SitePermissionsXml {
    #[serde(rename = "SitePermission")]
    permissions: Vec<SitePermissionXml>,
}

impl SitePermissionsXml {
    pub(crate) fn into_permissions(self) -> Vec<SitePermission> {
        self.permissions
            .into_iter()
            .map(|p| SitePermission {
                resource: p.resource,
                permission: p.permission,
                operator: p.operator.name,
                operator_resource: p.operator.resource,
            })
            .collect()
    }
}

/// A file hosted in a site.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteFile {
    pub resource: String,
    pub name: String,
    pub id: u64,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub file_size: String,
    pub is_client_file: bool,
    pub size: u64,
    pub sha1: String,
    pub sha256: String,
    pub download_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct SiteFileXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "@Size", deserialize_with = "lenient_u64")]
    size: u64,
    #[serde(rename = "@SHA1")]
    sha1: String,
    #[serde(rename = "@SHA256")]
    sha256: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "LastModified")]
    last_modified: String,
    #[serde(rename = "FileSize")]
    file_size: String,
    #[serde(rename = "IsClientFile", deserialize_with = "lenient_bool")]
    is_client_file: bool,
    #[serde(rename = "$text")]
    download_url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct SiteFilesXml {
    #[serde(rename = "SiteFile")]
    files: Vec<SiteFileXml>,
}

impl SiteFilesXml {
    pub(crate) fn into_files(self) -> Vec<SiteFile> {
        self.files
            .into_iter()
            .map(|f| SiteFile {
                resource: f.resource,
                name: f.name,
                id: parse_u64(&f.id),
                last_modified: parse_timestamp(&f.last_modified),
                file_size: f.file_size,
                is_client_file: f.is_client_file,
                size: f.size,
                sha1: f.sha1,
                sha256: f.sha256,
                download_url: f.download_url.trim().to_string(),
            })
            .collect()
    }
}
