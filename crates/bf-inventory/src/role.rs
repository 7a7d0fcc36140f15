use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::timestamp::parse_timestamp;
use crate::xml::{lenient_bool, parse_u64, resolve_resource};

/// An operator role and the privileges it grants.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Role {
    pub id: u64,
    pub resource: String,
    pub name: String,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub master_operator: bool,
    pub custom_content: bool,
    pub show_other_actions: bool,
    pub stop_other_actions: bool,
    pub can_create_actions: bool,
    pub post_action_behavior_privilege: String,
    pub action_script_commands_privilege: String,
    pub can_send_multiple_refresh: bool,
    pub can_submit_queries: bool,
    pub can_lock: bool,
    pub unmanaged_asset_privilege: String,
    pub interface_logins: InterfaceLogins,
}

/// Interfaces a role may log in through.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterfaceLogins {
    #[serde(rename(deserialize = "Console"), deserialize_with = "lenient_bool")]
    pub console: bool,
    #[serde(rename(deserialize = "WebUI"), deserialize_with = "lenient_bool")]
    pub web_ui: bool,
    #[serde(rename(deserialize = "API"), deserialize_with = "lenient_bool")]
    pub api: bool,
}

/// Roles have one shape for list and detail responses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RoleXml {
    #[serde(rename = "@Resource")]
    resource: String,
    #[serde(rename = "@LastModified")]
    last_modified: String,
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "ID")]
    id: String,
    #[serde(rename = "MasterOperator", deserialize_with = "lenient_bool")]
    master_operator: bool,
    #[serde(rename = "CustomContent", deserialize_with = "lenient_bool")]
    custom_content: bool,
    #[serde(rename = "ShowOtherActions", deserialize_with = "lenient_bool")]
    show_other_actions: bool,
    #[serde(rename = "StopOtherActions", deserialize_with = "lenient_bool")]
    stop_other_actions: bool,
    #[serde(rename = "CanCreateActions", deserialize_with = "lenient_bool")]
    can_create_actions: bool,
    #[serde(rename = "PostActionBehaviorPrivilege")]
    post_action_behavior_privilege: String,
    #[serde(rename = "ActionScriptCommandsPrivilege")]
    action_script_commands_privilege: String,
    #[serde(rename = "CanSendMultipleRefresh", deserialize_with = "lenient_bool")]
    can_send_multiple_refresh: bool,
    #[serde(rename = "CanSubmitQueries", deserialize_with = "lenient_bool")]
    can_submit_queries: bool,
    #[serde(rename = "CanLock", deserialize_with = "lenient_bool")]
    can_lock: bool,
    #[serde(rename = "UnmanagedAssetPrivilege")]
    unmanaged_asset_privilege: String,
    #[serde(rename = "InterfaceLogins")]
    interface_logins: InterfaceLogins,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RoleListXml {
    #[serde(rename = "Role")]
    pub roles: Vec<RoleXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct RoleDetailResponseXml {
    #[serde(rename = "Role")]
    pub role: RoleXml,
}

impl From<RoleXml> for Role {
    fn from(xml: RoleXml) -> Self {
        Self {
            id: parse_u64(&xml.id),
            resource: xml.resource,
            name: xml.name,
            last_modified: parse_timestamp(&xml.last_modified),
            master_operator: xml.master_operator,
            custom_content: xml.custom_content,
            show_other_actions: xml.show_other_actions,
            stop_other_actions: xml.stop_other_actions,
            can_create_actions: xml.can_create_actions,
            post_action_behavior_privilege: xml.post_action_behavior_privilege,
            action_script_commands_privilege: xml.action_script_commands_privilege,
            can_send_multiple_refresh: xml.can_send_multiple_refresh,
            can_submit_queries: xml.can_submit_queries,
            can_lock: xml.can_lock,
            unmanaged_asset_privilege: xml.unmanaged_asset_privilege,
            interface_logins: xml.interface_logins,
        }
    }
}

impl Role {
    pub(crate) fn from_detail(response: RoleDetailResponseXml, id: u64, request_url: &str) -> Self {
        let mut role = Role::from(response.role);
        role.id = id;
        role.resource = resolve_resource(std::mem::take(&mut role.resource), request_url);
        role
    }
}
