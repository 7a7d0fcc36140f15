//! Actions issued from the console.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::{ContentListItemXml, ScriptXml};
use crate::timestamp::parse_timestamp;
use crate::xml::{lenient_bool, lenient_u64, parse_u64};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Action {
    pub id: u64,
    pub resource: String,
    pub name: String,
    pub title: String,
    pub last_modified: Option<DateTime<FixedOffset>>,
    pub relevance: String,
    pub action_script: String,
    pub action_script_mime_type: String,
    pub success_criteria: String,
    pub settings: Option<ActionSettings>,
    pub settings_locks: Option<ActionSettingsLocks>,
    pub target: Option<ActionTarget>,
    pub is_urgent: bool,
}

/// `<Settings>` of a single action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettings {
    #[serde(rename(deserialize = "PreActionShowUI"), deserialize_with = "lenient_bool")]
    pub pre_action_show_ui: bool,
    #[serde(rename(deserialize = "HasRunningMessage"), deserialize_with = "lenient_bool")]
    pub has_running_message: bool,
    #[serde(rename(deserialize = "HasTimeRange"), deserialize_with = "lenient_bool")]
    pub has_time_range: bool,
    #[serde(rename(deserialize = "HasStartTime"), deserialize_with = "lenient_bool")]
    pub has_start_time: bool,
    #[serde(rename(deserialize = "HasEndTime"), deserialize_with = "lenient_bool")]
    pub has_end_time: bool,
    #[serde(rename(deserialize = "EndDateTimeLocalOffset"))]
    pub end_date_time_local_offset: String,
    #[serde(rename(deserialize = "HasDayOfWeekConstraint"), deserialize_with = "lenient_bool")]
    pub has_day_of_week_constraint: bool,
    #[serde(rename(deserialize = "UseUTCTime"), deserialize_with = "lenient_bool")]
    pub use_utc_time: bool,
    #[serde(rename(deserialize = "ActiveUserRequirement"))]
    pub active_user_requirement: String,
    #[serde(rename(deserialize = "ActiveUserType"))]
    pub active_user_type: String,
    #[serde(rename(deserialize = "HasWhose"), deserialize_with = "lenient_bool")]
    pub has_whose: bool,
    #[serde(rename(deserialize = "PreActionCacheDownload"), deserialize_with = "lenient_bool")]
    pub pre_action_cache_download: bool,
    #[serde(rename(deserialize = "Reapply"), deserialize_with = "lenient_bool")]
    pub reapply: bool,
    #[serde(rename(deserialize = "HasReapplyLimit"), deserialize_with = "lenient_bool")]
    pub has_reapply_limit: bool,
    #[serde(rename(deserialize = "ReapplyLimit"), deserialize_with = "lenient_u64")]
    pub reapply_limit: u64,
    #[serde(rename(deserialize = "HasReapplyInterval"), deserialize_with = "lenient_bool")]
    pub has_reapply_interval: bool,
    #[serde(rename(deserialize = "HasRetry"), deserialize_with = "lenient_bool")]
    pub has_retry: bool,
    #[serde(rename(deserialize = "HasTemporalDistribution"), deserialize_with = "lenient_bool")]
    pub has_temporal_distribution: bool,
    #[serde(rename(deserialize = "ContinueOnErrors"), deserialize_with = "lenient_bool")]
    pub continue_on_errors: bool,
    #[serde(rename(deserialize = "PostActionBehavior"))]
    pub post_action_behavior: PostActionBehavior,
    #[serde(rename(deserialize = "IsOffer"), deserialize_with = "lenient_bool")]
    pub is_offer: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostActionBehavior {
    #[serde(rename(deserialize = "@Behavior"))]
    pub behavior: String,
}

/// `<SettingsLocks>`: which settings operators may not change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionSettingsLocks {
    #[serde(rename(deserialize = "ActionUITitle"), deserialize_with = "lenient_bool")]
    pub action_ui_title: bool,
    #[serde(rename(deserialize = "PreActionShowUI"), deserialize_with = "lenient_bool")]
    pub pre_action_show_ui: bool,
    #[serde(rename(deserialize = "PreAction"))]
    pub pre_action: PreActionLocks,
    #[serde(rename(deserialize = "HasRunningMessage"), deserialize_with = "lenient_bool")]
    pub has_running_message: bool,
    #[serde(rename(deserialize = "RunningMessage"))]
    pub running_message: TextLock,
    #[serde(rename(deserialize = "TimeRange"), deserialize_with = "lenient_bool")]
    pub time_range: bool,
    #[serde(rename(deserialize = "StartDateTimeOffset"), deserialize_with = "lenient_bool")]
    pub start_date_time_offset: bool,
    #[serde(rename(deserialize = "EndDateTimeOffset"), deserialize_with = "lenient_bool")]
    pub end_date_time_offset: bool,
    #[serde(rename(deserialize = "DayOfWeekConstraint"), deserialize_with = "lenient_bool")]
    pub day_of_week_constraint: bool,
    #[serde(rename(deserialize = "ActiveUserRequirement"), deserialize_with = "lenient_bool")]
    pub active_user_requirement: bool,
    #[serde(rename(deserialize = "ActiveUserType"), deserialize_with = "lenient_bool")]
    pub active_user_type: bool,
    #[serde(rename(deserialize = "Whose"), deserialize_with = "lenient_bool")]
    pub whose: bool,
    #[serde(rename(deserialize = "PreActionCacheDownload"), deserialize_with = "lenient_bool")]
    pub pre_action_cache_download: bool,
    #[serde(rename(deserialize = "Reapply"), deserialize_with = "lenient_bool")]
    pub reapply: bool,
    #[serde(rename(deserialize = "ReapplyLimit"), deserialize_with = "lenient_bool")]
    pub reapply_limit: bool,
    #[serde(rename(deserialize = "RetryCount"), deserialize_with = "lenient_bool")]
    pub retry_count: bool,
    #[serde(rename(deserialize = "RetryWait"), deserialize_with = "lenient_bool")]
    pub retry_wait: bool,
    #[serde(rename(deserialize = "TemporalDistribution"), deserialize_with = "lenient_bool")]
    pub temporal_distribution: bool,
    #[serde(rename(deserialize = "ContinueOnErrors"), deserialize_with = "lenient_bool")]
    pub continue_on_errors: bool,
    #[serde(rename(deserialize = "PostActionBehavior"))]
    pub post_action_behavior: PostActionBehaviorLocks,
    #[serde(rename(deserialize = "IsOffer"), deserialize_with = "lenient_bool")]
    pub is_offer: bool,
    #[serde(rename(deserialize = "AnnounceOffer"), deserialize_with = "lenient_bool")]
    pub announce_offer: bool,
    #[serde(rename(deserialize = "OfferCategory"), deserialize_with = "lenient_bool")]
    pub offer_category: bool,
    #[serde(rename(deserialize = "OfferDescriptionHTML"), deserialize_with = "lenient_bool")]
    pub offer_description_html: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreActionLocks {
    #[serde(rename(deserialize = "Text"), deserialize_with = "lenient_bool")]
    pub text: bool,
    #[serde(rename(deserialize = "AskToSaveWork"), deserialize_with = "lenient_bool")]
    pub ask_to_save_work: bool,
    #[serde(rename(deserialize = "ShowActionButton"), deserialize_with = "lenient_bool")]
    pub show_action_button: bool,
    #[serde(rename(deserialize = "ShowCancelButton"), deserialize_with = "lenient_bool")]
    pub show_cancel_button: bool,
    #[serde(rename(deserialize = "DeadlineBehavior"), deserialize_with = "lenient_bool")]
    pub deadline_behavior: bool,
    #[serde(rename(deserialize = "ShowConfirmation"), deserialize_with = "lenient_bool")]
    pub show_confirmation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextLock {
    #[serde(rename(deserialize = "Text"), deserialize_with = "lenient_bool")]
    pub text: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostActionBehaviorLocks {
    #[serde(rename(deserialize = "Behavior"), deserialize_with = "lenient_bool")]
    pub behavior: bool,
    #[serde(rename(deserialize = "AllowCancel"), deserialize_with = "lenient_bool")]
    pub allow_cancel: bool,
    #[serde(rename(deserialize = "Deadline"), deserialize_with = "lenient_bool")]
    pub deadline: bool,
    #[serde(rename(deserialize = "Title"), deserialize_with = "lenient_bool")]
    pub title: bool,
    #[serde(rename(deserialize = "Text"), deserialize_with = "lenient_bool")]
    pub text: bool,
}

/// Who an action was issued against.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ActionTarget {
    pub all_computers: bool,
    pub computer_ids: Vec<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ActionTargetXml {
    #[serde(rename = "AllComputers", deserialize_with = "lenient_bool")]
    all_computers: bool,
    #[serde(rename = "ComputerID")]
    computer_ids: Vec<String>,
}

impl From<ActionTargetXml> for ActionTarget {
    fn from(xml: ActionTargetXml) -> Self {
        Self {
            all_computers: xml.all_computers,
            computer_ids: xml
                .computer_ids
                .iter()
                .map(|id| id.trim())
                .filter(|id| !id.is_empty())
                .map(parse_u64)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ActionListXml {
    #[serde(rename = "Action")]
    pub items: Vec<ContentListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
struct ActionDetailXml {
    #[serde(rename = "Title")]
    title: String,
    #[serde(rename = "Relevance")]
    relevance: String,
    #[serde(rename = "ActionScript")]
    action_script: ScriptXml,
    #[serde(rename = "SuccessCriteria")]
    success_criteria: String,
    #[serde(rename = "Settings")]
    settings: Option<ActionSettings>,
    #[serde(rename = "SettingsLocks")]
    settings_locks: Option<ActionSettingsLocks>,
    #[serde(rename = "Target")]
    target: Option<ActionTargetXml>,
    #[serde(rename = "IsUrgent", deserialize_with = "lenient_bool")]
    is_urgent: bool,
}

/// `<BES><SingleAction>` wrapper of a detail response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ActionDetailResponseXml {
    #[serde(rename = "SingleAction")]
    action: ActionDetailXml,
}

impl Action {
    pub(crate) fn from_list_item(item: ContentListItemXml) -> Self {
        Self {
            id: parse_u64(&item.id),
            resource: item.resource,
            title: item.name.clone(),
            name: item.name,
            last_modified: parse_timestamp(&item.last_modified),
            relevance: String::new(),
            action_script: String::new(),
            action_script_mime_type: String::new(),
            success_criteria: String::new(),
            settings: None,
            settings_locks: None,
            target: None,
            is_urgent: false,
        }
    }

    pub(crate) fn from_detail(response: ActionDetailResponseXml, id: u64, resource: String) -> Self {
        let detail = response.action;
        Self {
            id,
            resource,
            name: detail.title.clone(),
            title: detail.title,
            last_modified: None,
            relevance: detail.relevance,
            action_script: detail.action_script.text,
            action_script_mime_type: detail.action_script.mime_type,
            success_criteria: detail.success_criteria,
            settings: detail.settings,
            settings_locks: detail.settings_locks,
            target: detail.target.map(ActionTarget::from),
            is_urgent: detail.is_urgent,
        }
    }
}
