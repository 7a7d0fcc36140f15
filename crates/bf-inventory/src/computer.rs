//! Computers and the property-bag fold that builds them.
//!
//! A computer detail is an ordered list of `<Property Name="...">` elements
//! with server-defined names. Known names are dispatched onto typed fields
//! through [`PROPERTY_FIELDS`]; everything else lands in
//! [`Computer::other_properties`] verbatim.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::timestamp::parse_timestamp;
use crate::xml::{parse_u64, resolve_resource};

/// A managed endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Computer {
    pub id: u64,
    pub resource: String,
    pub name: String,
    pub os: String,
    pub last_report_time: Option<DateTime<FixedOffset>>,
    pub cpu: String,
    pub ip_address: String,
    pub ipv6_address: String,
    pub dns_name: String,
    pub mac_address: String,
    pub os_family: String,
    pub os_name: String,
    pub os_version: String,
    pub user_name: String,
    pub ram: String,
    pub locked: String,
    pub bes_relay_selection_method: String,
    pub relay: String,
    pub distance_to_bes_relay: String,
    pub agent_type: String,
    pub device_type: String,
    pub agent_version: String,
    pub computer_type: String,
    pub license_type: String,
    pub free_space_on_system_drive: String,
    pub total_size_of_system_drive: String,
    pub bios: String,
    pub subnet_address: String,
    pub client_settings: Vec<NameValue>,
    pub subscribed_sites: Vec<String>,
    /// Properties with no typed field, in payload order.
    pub other_properties: Vec<NameValue>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NameValue {
    pub name: String,
    pub value: String,
}

impl NameValue {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

type FieldSetter = fn(&mut Computer, &str);

/// Property name to field dispatch. Names match case- and text-exactly.
pub static PROPERTY_FIELDS: &[(&str, FieldSetter)] = &[
    ("ID", fold_id),
    ("Computer Name", |c, v| c.name = v.to_string()),
    ("OS", |c, v| c.os = v.to_string()),
    ("Last Report Time", |c, v| c.last_report_time = parse_timestamp(v)),
    ("CPU", |c, v| c.cpu = v.to_string()),
    ("IP Address", |c, v| c.ip_address = v.to_string()),
    ("IPv6 Address", |c, v| c.ipv6_address = v.to_string()),
    ("DNS Name", |c, v| c.dns_name = v.to_string()),
    ("MAC Address", |c, v| c.mac_address = v.to_string()),
    ("OS Family", |c, v| c.os_family = v.to_string()),
    ("OS Name", |c, v| c.os_name = v.to_string()),
    ("OS Version", |c, v| c.os_version = v.to_string()),
    ("User Name", |c, v| c.user_name = v.to_string()),
    ("RAM", |c, v| c.ram = v.to_string()),
    ("Locked", |c, v| c.locked = v.to_string()),
    ("BES Relay Selection Method", |c, v| c.bes_relay_selection_method = v.to_string()),
    ("Relay", |c, v| c.relay = v.to_string()),
    ("Distance to BES Relay", |c, v| c.distance_to_bes_relay = v.to_string()),
    ("Agent Type", |c, v| c.agent_type = v.to_string()),
    ("Device Type", |c, v| c.device_type = v.to_string()),
    ("Agent Version", |c, v| c.agent_version = v.to_string()),
    ("Computer Type", |c, v| c.computer_type = v.to_string()),
    ("License Type", |c, v| c.license_type = v.to_string()),
    ("Free Space on System Drive", |c, v| c.free_space_on_system_drive = v.to_string()),
    ("Total Size of System Drive", |c, v| c.total_size_of_system_drive = v.to_string()),
    ("BIOS", |c, v| c.bios = v.to_string()),
    ("Subnet Address", |c, v| c.subnet_address = v.to_string()),
    ("Client Settings", fold_client_setting),
    ("Subscribed Sites", |c, v| c.subscribed_sites.push(v.to_string())),
];

fn fold_id(computer: &mut Computer, value: &str) {
    let id = parse_u64(value);
    if id == 0 {
        return;
    }
    if computer.id == 0 {
        computer.id = id;
    } else if computer.id != id {
        warn!(requested = computer.id, reported = id, "Computer ID property disagrees with request");
    }
}

fn fold_client_setting(computer: &mut Computer, value: &str) {
    let setting = split_client_setting(value);
    if !setting.name.is_empty() {
        computer.client_settings.push(setting);
    }
}

/// Split `name=value` on the first `=`. No `=` means the whole text is the
/// name and the value is empty.
pub fn split_client_setting(value: &str) -> NameValue {
    match value.split_once('=') {
        Some((name, value)) => NameValue::new(name, value),
        None => NameValue::new(value, ""),
    }
}

/// `/api/computers` entry, requested with a reduced field set.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ComputerListItemXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "OS")]
    os: String,
    #[serde(rename = "LastReportTime")]
    last_report_time: String,
    #[serde(rename = "CPU")]
    cpu: String,
    #[serde(rename = "IPAddress")]
    ip_address: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ComputerListXml {
    #[serde(rename = "Computer")]
    pub computers: Vec<ComputerListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct PropertyXml {
    #[serde(rename = "@Name")]
    name: String,
    #[serde(rename = "$text")]
    value: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ComputerDetailXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "Property")]
    properties: Vec<PropertyXml>,
}

/// `<BESAPI><Computer Resource="...">` wrapper of a detail response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ComputerDetailResponseXml {
    #[serde(rename = "Computer")]
    pub computer: ComputerDetailXml,
}

impl Computer {
    pub(crate) fn from_list_item(item: ComputerListItemXml) -> Self {
        Self {
            id: parse_u64(&item.id),
            resource: item.resource,
            name: item.name,
            os: item.os,
            last_report_time: parse_timestamp(&item.last_report_time),
            cpu: item.cpu,
            ip_address: item.ip_address,
            ..Default::default()
        }
    }

    /// Fold a detail property bag. The requested id always wins over an
    /// `ID` property.
    pub(crate) fn from_detail(detail: ComputerDetailXml, id: u64, request_url: &str) -> Self {
        let mut computer = Self {
            id,
            resource: resolve_resource(detail.resource, request_url),
            ..Default::default()
        };

        for property in detail.properties {
            computer.apply_property(&property.name, &property.value);
        }

        computer
    }

    /// Route one `(name, value)` pair through the dispatch table.
    pub fn apply_property(&mut self, name: &str, value: &str) {
        match PROPERTY_FIELDS.iter().find(|(field, _)| *field == name) {
            Some((_, set)) => set(self, value),
            None => self.other_properties.push(NameValue::new(name, value)),
        }
    }
}
