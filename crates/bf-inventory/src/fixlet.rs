use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::{ContentAction, ContentDetailXml, ContentListItemXml, MimeField};
use crate::site_ref::SiteRef;
use crate::timestamp::parse_timestamp;
use crate::xml::parse_u64;

/// A fixlet: a task with vulnerability metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Fixlet {
    pub id: u64,
    pub resource: String,
    pub site: SiteRef,
    pub name: String,
    pub title: String,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub description: String,
    pub relevance: Vec<String>,
    pub category: String,
    pub download_size: u64,
    pub source: String,
    pub source_id: String,
    pub source_release_date: String,
    pub source_severity: String,
    pub cve_names: String,
    pub delay: String,
    pub mime_fields: Vec<MimeField>,
    pub default_action: Option<ContentAction>,
    pub actions: Vec<ContentAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FixletListXml {
    #[serde(rename = "Fixlet")]
    pub items: Vec<ContentListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct FixletDetailResponseXml {
    #[serde(rename = "Fixlet")]
    pub fixlet: ContentDetailXml,
}

impl Fixlet {
    pub(crate) fn from_list_item(item: ContentListItemXml, site: &SiteRef) -> Self {
        Self {
            id: parse_u64(&item.id),
            resource: item.resource,
            site: site.clone(),
            title: item.name.clone(),
            name: item.name,
            last_modified: parse_timestamp(&item.last_modified),
            description: String::new(),
            relevance: Vec::new(),
            category: String::new(),
            download_size: 0,
            source: String::new(),
            source_id: String::new(),
            source_release_date: String::new(),
            source_severity: String::new(),
            cve_names: String::new(),
            delay: String::new(),
            mime_fields: Vec::new(),
            default_action: None,
            actions: Vec::new(),
        }
    }

    pub(crate) fn from_detail(mut detail: ContentDetailXml, id: u64, resource: String, site: &SiteRef) -> Self {
        let (default_action, actions) = detail.take_actions();
        Self {
            id,
            resource,
            site: site.clone(),
            name: detail.title.clone(),
            title: detail.title,
            last_modified: None,
            description: detail.description,
            relevance: detail.relevance,
            category: detail.category,
            download_size: detail.download_size,
            source: detail.source,
            source_id: detail.source_id,
            source_release_date: detail.source_release_date,
            source_severity: detail.source_severity,
            cve_names: detail.cve_names,
            delay: detail.delay,
            mime_fields: detail.mime_fields,
            default_action,
            actions,
        }
    }

    /// CVE identifiers split out of the space or comma separated list.
    pub fn cves(&self) -> Vec<&str> {
        self.cve_names
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .collect()
    }
}
