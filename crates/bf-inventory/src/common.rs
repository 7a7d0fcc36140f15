//! XML shapes shared by several content kinds.

use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisProperty;
use crate::xml::lenient_u64;

/// `<MIMEField>` name/value pair attached to content.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MimeField {
    #[serde(rename(deserialize = "Name"))]
    pub name: String,
    #[serde(rename(deserialize = "Value"))]
    pub value: String,
}

/// An `<Action>` or `<DefaultAction>` embedded in a task or fixlet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentAction {
    pub id: String,
    pub description: String,
    pub action_script: String,
    pub action_script_mime_type: String,
    pub success_criteria: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentActionXml {
    #[serde(rename = "@ID")]
    id: String,
    #[serde(rename = "Description")]
    description: DescriptionXml,
    #[serde(rename = "ActionScript")]
    action_script: ScriptXml,
    #[serde(rename = "SuccessCriteria")]
    success_criteria: String,
}

impl From<ContentActionXml> for ContentAction {
    fn from(xml: ContentActionXml) -> Self {
        Self {
            id: xml.id,
            description: xml.description.flatten(),
            action_script: xml.action_script.text,
            action_script_mime_type: xml.action_script.mime_type,
            success_criteria: xml.success_criteria,
        }
    }
}

/// Action descriptions arrive as `<PreLink>`, `<Link>`, `<PostLink>` parts
/// or as plain text.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct DescriptionXml {
    #[serde(rename = "$text")]
    text: String,
    #[serde(rename = "PreLink")]
    pre_link: String,
    #[serde(rename = "Link")]
    link: String,
    #[serde(rename = "PostLink")]
    post_link: String,
}

impl DescriptionXml {
    fn flatten(self) -> String {
        let parts: Vec<&str> = [&self.pre_link, &self.link, &self.post_link]
            .into_iter()
            .map(|part| part.trim())
            .filter(|part| !part.is_empty())
            .collect();
        if parts.is_empty() {
            self.text.trim().to_string()
        } else {
            parts.join(" ")
        }
    }
}

/// Script body with its `MIMEType` attribute.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ScriptXml {
    #[serde(rename = "@MIMEType")]
    pub mime_type: String,
    #[serde(rename = "$text")]
    pub text: String,
}

/// List entry shared by analyses, tasks, fixlets and actions.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentListItemXml {
    #[serde(rename = "@Resource")]
    pub resource: String,
    #[serde(rename = "@LastModified")]
    pub last_modified: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "ID")]
    pub id: String,
}

/// Detail body of an analysis, task or fixlet. Each kind reads the subset
/// of fields it carries.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub(crate) struct ContentDetailXml {
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Relevance")]
    pub relevance: Vec<String>,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "DownloadSize", deserialize_with = "lenient_u64")]
    pub download_size: u64,
    #[serde(rename = "Source")]
    pub source: String,
    #[serde(rename = "SourceID")]
    pub source_id: String,
    #[serde(rename = "SourceReleaseDate")]
    pub source_release_date: String,
    #[serde(rename = "SourceSeverity")]
    pub source_severity: String,
    #[serde(rename = "CVENames")]
    pub cve_names: String,
    #[serde(rename = "Delay")]
    pub delay: String,
    #[serde(rename = "MIMEField")]
    pub mime_fields: Vec<MimeField>,
    #[serde(rename = "DefaultAction")]
    pub default_action: Option<ContentActionXml>,
    #[serde(rename = "Action")]
    pub actions: Vec<ContentActionXml>,
    #[serde(rename = "Property")]
    pub properties: Vec<AnalysisProperty>,
}

impl ContentDetailXml {
    pub(crate) fn take_actions(&mut self) -> (Option<ContentAction>, Vec<ContentAction>) {
        (
            self.default_action.take().map(ContentAction::from),
            std::mem::take(&mut self.actions)
                .into_iter()
                .map(ContentAction::from)
                .collect(),
        )
    }
}

/// Title falls back to the short name so a label is never empty.
pub(crate) fn title_or_name(title: String, name: &str) -> String {
    if title.trim().is_empty() {
        name.to_string()
    } else {
        title
    }
}
