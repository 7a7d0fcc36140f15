use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::common::{ContentAction, ContentDetailXml, ContentListItemXml, MimeField};
use crate::site_ref::SiteRef;
use crate::timestamp::parse_timestamp;
use crate::xml::parse_u64;

/// A task: relevance plus actions, with no patch semantics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
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
    pub delay: String,
    pub mime_fields: Vec<MimeField>,
    pub default_action: Option<ContentAction>,
    pub actions: Vec<ContentAction>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TaskListXml {
    #[serde(rename = "Task")]
    pub items: Vec<ContentListItemXml>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct TaskDetailResponseXml {
    #[serde(rename = "Task")]
    pub task: ContentDetailXml,
}

impl Task {
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
            delay: detail.delay,
            mime_fields: detail.mime_fields,
            default_action,
            actions,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site_ref::SiteType;
    use crate::xml::decode;

    const DETAIL: &[u8] = br#"<BES>
      <Task>
        <Title>Restart Endpoint</Title>
        <Description>Restarts the computer.</Description>
        <Relevance>true</Relevance>
        <Category>Maintenance</Category>
        <DownloadSize>0</DownloadSize>
        <Source>Internal</Source>
        <SourceID>R-1</SourceID>
        <SourceSeverity>Low</SourceSeverity>
        <DefaultAction ID="Action1">
          <Description>Restart now</Description>
          <ActionScript MIMEType="application/x-Fixlet-Windows-Shell">restart 60</ActionScript>
        </DefaultAction>
        <Action ID="Action2">
          <Description><PreLink>Click</PreLink><Link>here</Link><PostLink>to postpone.</PostLink></Description>
          <ActionScript>action requires restart</ActionScript>
        </Action>
      </Task>
    </BES>"#;

    fn site() -> SiteRef {
        SiteRef::new("ActionSite", SiteType::Master).unwrap()
    }

    #[test]
    fn test_detail_actions() {
        let xml: TaskDetailResponseXml = decode(DETAIL, "task").unwrap();
        let task = Task::from_detail(xml.task, 31, "https://h/api/task/master/31".into(), &site());

        assert_eq!(task.id, 31);
        assert_eq!(task.title, "Restart Endpoint");
        assert_eq!(task.source_id, "R-1");
        let default = task.default_action.as_ref().unwrap();
        assert_eq!(default.id, "Action1");
        assert_eq!(default.action_script, "restart 60");
        assert_eq!(task.actions.len(), 1);
        assert_eq!(task.actions[0].description, "Click here to postpone.");
    }

    #[test]
    fn test_decoding_twice_is_identical() {
        let first: TaskDetailResponseXml = decode(DETAIL, "task").unwrap();
        let second: TaskDetailResponseXml = decode(DETAIL, "task").unwrap();
        assert_eq!(
            Task::from_detail(first.task, 31, "r".into(), &site()),
            Task::from_detail(second.task, 31, "r".into(), &site())
        );
    }

    #[test]
    fn test_list_item() {
        let xml: TaskListXml = decode(
            br#"<BESAPI><Task Resource="https://h/api/task/master/31" LastModified="garbage"><Name>Restart Endpoint</Name><ID>31</ID></Task></BESAPI>"#,
            "task",
        )
        .unwrap();
        let task = Task::from_list_item(xml.items.into_iter().next().unwrap(), &site());
        assert_eq!(task.title, "Restart Endpoint");
        assert_eq!(task.last_modified, None);
        assert_eq!(task.site.name(), "ActionSite");
    }
}
