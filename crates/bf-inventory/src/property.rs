use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::timestamp::parse_timestamp;
use crate::xml::{lenient_bool, parse_u64};

/// A global retrieved property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Property {
    pub id: u64,
    pub resource: String,
    pub name: String,
    pub is_reserved: bool,
    pub last_modified: Option<DateTime<FixedOffset>>,
    /// Relevance definition; only a detail fetch carries it.
    pub definition: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PropertyListItemXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "@LastModified")]
    last_modified: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "IsReserved", deserialize_with = "lenient_bool")]
    is_reserved: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PropertyListXml {
    #[serde(rename = "Property")]
    pub items: Vec<PropertyListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct PropertyDetailXml {
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "$text")]
    definition: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PropertyDetailResponseXml {
    #[serde(rename = "Property")]
    property: PropertyDetailXml,
}

impl Property {
    pub(crate) fn from_list_item(item: PropertyListItemXml) -> Self {
        Self {
            id: parse_u64(&item.id),
            resource: item.resource,
            name: item.name,
            is_reserved: item.is_reserved,
            last_modified: parse_timestamp(&item.last_modified),
            definition: None,
        }
    }

    /// The detail payload does not say whether the property is reserved.
    pub(crate) fn from_detail(response: PropertyDetailResponseXml, id: u64, resource: String) -> Self {
        Self {
            id,
            resource,
            name: response.property.name,
            is_reserved: false,
            last_modified: None,
            definition: Some(response.property.definition),
        }
    }
}
